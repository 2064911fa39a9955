// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canny edge detection with a selectable Sobel aperture.
//
//   1. Sobel gradients (3- or 5-tap, separable, unnormalised)
//   2. L1 magnitude |gx| + |gy|
//   3. Non-maximum suppression along the quantised gradient direction
//   4. Hysteresis: strong pixels (> high) grow through weak pixels (> low)
//
// Thresholds are in the unnormalised magnitude scale, so the same numbers
// select far more edges with a 5-tap aperture than with a 3-tap one.

use birdseye_core::error::{BirdseyeError, Result};
use image::{GrayImage, Luma};
use imageproc::filter::separable_filter;
use tracing::{debug, instrument};

use crate::filter::{GrayF32, sobel_kernels, to_f32};

/// tan(22.5°) and tan(67.5°): sector boundaries for direction quantisation.
const TAN_22_5: f32 = 0.414_213_57;
const TAN_67_5: f32 = 2.414_213_6;

/// Binary edge map (0 / 255) of `gray`.
#[instrument(skip(gray), fields(low, high, aperture))]
pub fn canny(gray: &GrayImage, low: f32, high: f32, aperture: u32) -> Result<GrayImage> {
    BirdseyeError::check_dimensions(gray.width(), gray.height())?;
    let (deriv, smooth) = sobel_kernels(aperture);
    let plane = to_f32(gray);
    let gx = separable_filter(&plane, deriv, smooth);
    let gy = separable_filter(&plane, smooth, deriv);

    let magnitude = l1_magnitude(&gx, &gy);
    let thin = non_maximum_suppression(&gx, &gy, &magnitude, low);
    let edges = hysteresis(&thin, gray.width(), gray.height(), high);

    debug!(
        edge_pixels = edges.pixels().filter(|p| p.0[0] != 0).count(),
        "Canny edge detection complete"
    );
    Ok(edges)
}

fn l1_magnitude(gx: &GrayF32, gy: &GrayF32) -> Vec<f32> {
    gx.as_raw()
        .iter()
        .zip(gy.as_raw())
        .map(|(x, y)| x.abs() + y.abs())
        .collect()
}

/// Keep only local maxima across the edge; everything at or below `low` is dropped.
///
/// The one-pixel image border is never an edge.
fn non_maximum_suppression(gx: &GrayF32, gy: &GrayF32, magnitude: &[f32], low: f32) -> Vec<f32> {
    let (w, h) = (gx.width() as usize, gx.height() as usize);
    let mut out = vec![0.0f32; w * h];
    if w < 3 || h < 3 {
        return out;
    }

    let gx = gx.as_raw();
    let gy = gy.as_raw();
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let i = y * w + x;
            let m = magnitude[i];
            if m <= low {
                continue;
            }
            let (ax, ay) = (gx[i].abs(), gy[i].abs());

            // Neighbours before and after the pixel along the gradient.
            let (before, after) = if ay <= ax * TAN_22_5 {
                (i - 1, i + 1)
            } else if ay >= ax * TAN_67_5 {
                (i - w, i + w)
            } else if (gx[i] > 0.0) == (gy[i] > 0.0) {
                (i - w - 1, i + w + 1)
            } else {
                (i - w + 1, i + w - 1)
            };

            // Strict on one side so a two-pixel plateau yields a single edge.
            if m > magnitude[before] && m >= magnitude[after] {
                out[i] = m;
            }
        }
    }
    out
}

/// Grow edges from strong pixels (> `high`) through 8-connected pixels that
/// survived suppression (> `low`).
fn hysteresis(thin: &[f32], width: u32, height: u32, high: f32) -> GrayImage {
    let (w, h) = (width as usize, height as usize);
    let mut edges = GrayImage::new(width, height);
    let mut stack: Vec<usize> = Vec::new();

    for (i, &m) in thin.iter().enumerate() {
        if m > high && edges.as_raw()[i] == 0 {
            mark(&mut edges, i, w);
            stack.push(i);
        }
        while let Some(j) = stack.pop() {
            let (x, y) = (j % w, j / w);
            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let k = ny * w + nx;
                    if thin[k] > 0.0 && edges.as_raw()[k] == 0 {
                        mark(&mut edges, k, w);
                        stack.push(k);
                    }
                }
            }
        }
    }
    edges
}

fn mark(edges: &mut GrayImage, index: usize, width: usize) {
    edges.put_pixel((index % width) as u32, (index / width) as u32, Luma([255]));
}
