// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview overlay — the original frame with the detected outline drawn on top.

use birdseye_core::config::OverlayConfig;
use birdseye_core::error::{BirdseyeError, Result};
use birdseye_core::Contour;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use tracing::instrument;

/// Copy of `frame` (as RGBA) with `contour` stroked in the configured colour.
///
/// Without a contour the copy is returned untouched.
#[instrument(skip_all, fields(found = contour.is_some()))]
pub fn draw_outline(
    frame: &DynamicImage,
    contour: Option<&Contour>,
    overlay: &OverlayConfig,
) -> Result<RgbaImage> {
    BirdseyeError::check_dimensions(frame.width(), frame.height())?;
    let mut canvas = frame.to_rgba8();
    let Some(contour) = contour else {
        return Ok(canvas);
    };
    if contour.is_empty() {
        return Ok(canvas);
    }

    let color = Rgba(overlay.color);
    let thickness = overlay.thickness.max(1) as i32;
    // Offsets spanning a thickness×thickness square around each segment.
    let lo = -(thickness - 1) / 2;
    let hi = thickness / 2;

    let points = &contour.points;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        for dy in lo..=hi {
            for dx in lo..=hi {
                draw_line_segment_mut(
                    &mut canvas,
                    ((a.x + dx) as f32, (a.y + dy) as f32),
                    ((b.x + dx) as f32, (b.y + dy) as f32),
                    color,
                );
            }
        }
    }
    Ok(canvas)
}
