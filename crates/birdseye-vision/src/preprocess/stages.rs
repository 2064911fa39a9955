// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The four pixel stages that precede edge detection: grayscale conversion,
// Gaussian blur, morphological opening and inverted adaptive thresholding.
// Every stage borrows its input and returns a fresh buffer.

use birdseye_core::error::{BirdseyeError, Result};
use image::{DynamicImage, GrayImage, Luma};
use imageproc::filter::separable_filter_equal;
use imageproc::morphology::{Mask, grayscale_open};
use tracing::{debug, instrument};

use crate::filter::{gaussian_kernel, mean_kernel, to_f32, to_u8};

/// Convert a frame to 8-bit luminance.
///
/// A frame that is already single-channel 8-bit is copied unchanged.
#[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
pub fn grayscale(frame: &DynamicImage) -> Result<GrayImage> {
    BirdseyeError::check_dimensions(frame.width(), frame.height())?;
    let gray = match frame {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        other => other.to_luma8(),
    };
    debug!("Converted to grayscale");
    Ok(gray)
}

/// Gaussian smoothing with an explicit `kernel_size`×`kernel_size` support.
#[instrument(skip(gray), fields(kernel_size, sigma))]
pub fn blur(gray: &GrayImage, kernel_size: u32, sigma: f32) -> Result<GrayImage> {
    BirdseyeError::check_dimensions(gray.width(), gray.height())?;
    let kernel = gaussian_kernel(kernel_size, sigma);
    let blurred = to_u8(&separable_filter_equal(&to_f32(gray), &kernel));
    debug!("Applied Gaussian blur");
    Ok(blurred)
}

/// Morphological opening (erosion, then dilation) with a square element.
///
/// Works on gray levels: removes bright specks narrower than the element.
#[instrument(skip(gray), fields(kernel_size))]
pub fn open(gray: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    BirdseyeError::check_dimensions(gray.width(), gray.height())?;
    let radius = u8::try_from(kernel_size / 2).map_err(|_| {
        BirdseyeError::InvalidConfig(format!("opening kernel {kernel_size} is too large"))
    })?;
    let opened = grayscale_open(gray, &Mask::square(radius));
    debug!("Applied morphological opening");
    Ok(opened)
}

/// Inverted mean-C adaptive threshold.
///
/// A pixel becomes 255 when it is at least `offset` darker than the mean of its
/// `block_size`×`block_size` neighbourhood, otherwise 0. Samples beyond the
/// image edge repeat the nearest edge pixel.
#[instrument(skip(gray), fields(block_size, offset))]
pub fn adaptive_threshold(gray: &GrayImage, block_size: u32, offset: i32) -> Result<GrayImage> {
    BirdseyeError::check_dimensions(gray.width(), gray.height())?;
    let means = separable_filter_equal(&to_f32(gray), &mean_kernel(block_size));

    let mut output = GrayImage::new(gray.width(), gray.height());
    for ((out, value), mean) in output.pixels_mut().zip(gray.pixels()).zip(means.pixels()) {
        let threshold = mean.0[0].round() as i32 - offset;
        if i32::from(value.0[0]) <= threshold {
            *out = Luma([255]);
        }
    }

    debug!("Adaptive threshold complete");
    Ok(output)
}
