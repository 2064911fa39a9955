// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — warp the document quadrilateral of the original
// frame onto a fixed-size, top-down rectangle.

use birdseye_core::config::{OutputConfig, SelectionConfig};
use birdseye_core::error::{BirdseyeError, Result};
use birdseye_core::{PixelFormat, Quadrilateral};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, info, instrument, warn};

use super::homography::Homography;
use crate::contour::approximate_polygon;

/// Destination corners in the order source corners are mapped onto them:
/// (0,0), (W,0), (W,H), (0,H).
pub fn destination_corners(output: &OutputConfig) -> [(f32, f32); 4] {
    let (w, h) = (output.width as f32, output.height as f32);
    [(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]
}

/// Homography taking the quadrilateral's corners, in their stored order, onto
/// the destination rectangle. Corners are not reordered.
pub fn document_homography(quad: &Quadrilateral, output: &OutputConfig) -> Result<Homography> {
    Homography::from_correspondences(quad.corners_f32(), destination_corners(output))
}

/// Rectify `frame` through `quad`.
///
/// With no quadrilateral the frame is returned as an unmodified copy.
/// Otherwise the output is `output.width`×`output.height` in the frame's own
/// channel format (gray stays gray, anything else becomes RGBA). Destination
/// pixels that fall outside the frame are zero.
#[instrument(skip_all, fields(width = frame.width(), height = frame.height(), found = quad.is_some()))]
pub fn rectify(
    frame: &DynamicImage,
    quad: Option<&Quadrilateral>,
    selection: &SelectionConfig,
    output: &OutputConfig,
) -> Result<DynamicImage> {
    BirdseyeError::check_dimensions(frame.width(), frame.height())?;

    let Some(quad) = quad else {
        warn!("No document quadrilateral; returning frame unchanged");
        return Ok(frame.clone());
    };

    let corners = reapproximate(quad, selection.epsilon_factor);
    let homography = document_homography(&corners, output)?;
    let projection = homography.projection();
    debug!(corners = ?corners.corners, "Homography computed");

    let format = PixelFormat::of(frame);
    let rectified = match format {
        PixelFormat::Gray => DynamicImage::ImageLuma8(warp_gray(&frame.to_luma8(), projection, output)),
        PixelFormat::Rgba => DynamicImage::ImageRgba8(warp_rgba(&frame.to_rgba8(), projection, output)),
    };

    info!(out_w = output.width, out_h = output.height, ?format, "Perspective correction applied");
    Ok(rectified)
}

/// Run the corners through the same simplification the selector uses.
///
/// A real quadrilateral comes back unchanged. If the corners are nearly
/// collinear and collapse, the given corners are kept.
fn reapproximate(quad: &Quadrilateral, epsilon_factor: f64) -> Quadrilateral {
    let polygon = approximate_polygon(&quad.corners, epsilon_factor);
    Quadrilateral::from_polygon(&polygon).unwrap_or(*quad)
}

fn warp_gray(gray: &GrayImage, projection: &Projection, output: &OutputConfig) -> GrayImage {
    let mut out = GrayImage::new(output.width, output.height);
    warp_into(gray, projection, Interpolation::Bilinear, Luma([0u8]), &mut out);
    out
}

fn warp_rgba(rgba: &RgbaImage, projection: &Projection, output: &OutputConfig) -> RgbaImage {
    let mut out = RgbaImage::new(output.width, output.height);
    warp_into(rgba, projection, Interpolation::Bilinear, Rgba([0u8, 0, 0, 0]), &mut out);
    out
}
