// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Float planes and 1D kernels for `imageproc::filter::separable_filter`.
//
// The filter pads by continuity (replicated edge pixels) and, on `Luma<f32>`,
// does no clamping, so signed Sobel responses survive intact.

use image::{GrayImage, ImageBuffer, Luma};

/// Single-channel floating-point plane used for intermediate filter results.
pub type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Widen an 8-bit gray image to floats.
pub fn to_f32(gray: &GrayImage) -> GrayF32 {
    let data = gray.as_raw().iter().map(|&v| v as f32).collect();
    GrayF32::from_raw(gray.width(), gray.height(), data).unwrap_or_else(|| GrayF32::new(0, 0))
}

/// Round and saturate a float plane back to 8 bits.
pub fn to_u8(plane: &GrayF32) -> GrayImage {
    let data = plane
        .as_raw()
        .iter()
        .map(|&v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(plane.width(), plane.height(), data)
        .unwrap_or_else(|| GrayImage::new(0, 0))
}

/// Normalised 1D Gaussian of the given odd length.
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let half = (size / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|v| v / sum).collect()
}

/// Box kernel whose `size` taps average to the local mean.
pub fn mean_kernel(size: u32) -> Vec<f32> {
    vec![1.0 / size as f32; size as usize]
}

/// Sobel derivative and smoothing taps for aperture 3 or 5.
pub fn sobel_kernels(aperture: u32) -> (&'static [f32], &'static [f32]) {
    const DERIV_3: [f32; 3] = [-1.0, 0.0, 1.0];
    const SMOOTH_3: [f32; 3] = [1.0, 2.0, 1.0];
    const DERIV_5: [f32; 5] = [-1.0, -2.0, 0.0, 2.0, 1.0];
    const SMOOTH_5: [f32; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];
    if aperture == 5 {
        (&DERIV_5, &SMOOTH_5)
    } else {
        (&DERIV_3, &SMOOTH_3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::filter::separable_filter;

    #[test]
    fn gaussian_kernel_is_normalised_and_symmetric() {
        let k = gaussian_kernel(25, 1.0);
        assert_eq!(k.len(), 25);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!((k[0] - k[24]).abs() < 1e-9);
        assert!(k[12] > k[11]);
    }

    #[test]
    fn uniform_kernel_sums_to_one() {
        let k = mean_kernel(11);
        assert_eq!(k.len(), 11);
        assert!((k.iter().sum::<f32>() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn sobel_x_is_positive_on_rising_step() {
        let mut gray = GrayImage::new(20, 10);
        for y in 0..10 {
            for x in 10..20 {
                gray.put_pixel(x, y, Luma([100]));
            }
        }
        let (deriv, smooth) = sobel_kernels(3);
        let gx = separable_filter(&to_f32(&gray), deriv, smooth);
        assert!(gx.get_pixel(10, 5).0[0] > 50.0);
        assert!(gx.get_pixel(4, 5).0[0].abs() < 1e-3);
        // Replicated borders: no response at the frame edge.
        assert!(gx.get_pixel(19, 5).0[0].abs() < 1e-3);
    }

    #[test]
    fn u8_round_trip_saturates() {
        let plane = GrayF32::from_raw(3, 1, vec![-4.0, 127.6, 300.0]).unwrap();
        assert_eq!(to_u8(&plane).as_raw(), &vec![0u8, 128, 255]);
    }
}
