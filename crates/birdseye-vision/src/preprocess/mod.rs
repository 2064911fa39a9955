// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preprocessing pipeline — grayscale, blur, opening, adaptive threshold and
// Canny, composed in a fixed order to turn a camera frame into an edge map.

pub mod canny;
pub mod stages;

use birdseye_core::config::PreprocessConfig;
use birdseye_core::error::Result;
use image::{DynamicImage, GrayImage};
use tracing::{info, instrument};

pub use canny::canny;
pub use stages::{adaptive_threshold, blur, grayscale, open};

/// Every intermediate buffer produced while preprocessing one frame.
#[derive(Debug, Clone)]
pub struct PreprocessTrace {
    pub gray: GrayImage,
    pub blurred: GrayImage,
    pub opened: GrayImage,
    pub thresholded: GrayImage,
    pub edges: GrayImage,
}

/// Run the full chain and return only the binary edge map.
pub fn preprocess(frame: &DynamicImage, config: &PreprocessConfig) -> Result<GrayImage> {
    Ok(preprocess_traced(frame, config)?.edges)
}

/// Run the full chain, keeping every intermediate stage.
#[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
pub fn preprocess_traced(frame: &DynamicImage, config: &PreprocessConfig) -> Result<PreprocessTrace> {
    let gray = grayscale(frame)?;
    let blurred = blur(&gray, config.blur_kernel_size, config.blur_sigma)?;
    let opened = open(&blurred, config.opening_kernel_size)?;
    let thresholded = adaptive_threshold(
        &opened,
        config.threshold_block_size,
        config.threshold_offset,
    )?;
    let edges = canny(
        &thresholded,
        config.canny_low,
        config.canny_high,
        config.canny_aperture,
    )?;
    info!("Preprocessing complete");

    Ok(PreprocessTrace {
        gray,
        blurred,
        opened,
        thresholded,
        edges,
    })
}
