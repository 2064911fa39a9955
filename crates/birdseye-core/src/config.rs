// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan configuration. Defaults reproduce the tuned document-scanning pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BirdseyeError, Result};

/// Parameters for the five preprocessing stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Side length of the Gaussian kernel (odd).
    pub blur_kernel_size: u32,
    /// Gaussian standard deviation in pixels.
    pub blur_sigma: f32,
    /// Side length of the square structuring element used for opening (odd).
    pub opening_kernel_size: u32,
    /// Side length of the adaptive threshold neighbourhood (odd).
    pub threshold_block_size: u32,
    /// Subtracted from the local mean before comparison.
    pub threshold_offset: i32,
    /// Canny hysteresis thresholds, on the L1 gradient magnitude.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Sobel aperture used by Canny: 3 or 5.
    pub canny_aperture: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_kernel_size: 25,
            blur_sigma: 1.0,
            opening_kernel_size: 5,
            threshold_block_size: 11,
            threshold_offset: 4,
            canny_low: 50.0,
            canny_high: 150.0,
            canny_aperture: 5,
        }
    }
}

/// Quadrilateral selection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Contours enclosing this many square pixels or fewer are ignored.
    pub min_document_area: f64,
    /// Douglas-Peucker tolerance as a fraction of the contour perimeter.
    pub epsilon_factor: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_document_area: 10_000.0,
            epsilon_factor: 0.02,
        }
    }
}

/// Size of the rectified output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 640,
        }
    }
}

/// Appearance of the detected-outline overlay.
///
/// `color` is RGBA; the default is opaque blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub color: [u8; 4],
    pub thickness: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: [0, 0, 255, 255],
            thickness: 4,
        }
    }
}

/// Complete configuration for one `DocumentScanner`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub preprocess: PreprocessConfig,
    pub selection: SelectionConfig,
    pub output: OutputConfig,
    pub overlay: OverlayConfig,
}

impl ScanConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable by the pipeline.
    pub fn validate(&self) -> Result<()> {
        let p = &self.preprocess;
        require_odd("blur_kernel_size", p.blur_kernel_size)?;
        require_odd("opening_kernel_size", p.opening_kernel_size)?;
        require_odd("threshold_block_size", p.threshold_block_size)?;
        if p.blur_sigma.is_nan() || p.blur_sigma <= 0.0 {
            return Err(invalid(format!("blur_sigma must be positive, got {}", p.blur_sigma)));
        }
        if !(0.0..=p.canny_high).contains(&p.canny_low) {
            return Err(invalid(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {}/{}",
                p.canny_low, p.canny_high
            )));
        }
        if p.canny_aperture != 3 && p.canny_aperture != 5 {
            return Err(invalid(format!(
                "canny_aperture must be 3 or 5, got {}",
                p.canny_aperture
            )));
        }

        let s = &self.selection;
        if !s.epsilon_factor.is_finite() || s.epsilon_factor <= 0.0 {
            return Err(invalid(format!(
                "epsilon_factor must be positive, got {}",
                s.epsilon_factor
            )));
        }
        if !s.min_document_area.is_finite() || s.min_document_area < 0.0 {
            return Err(invalid(format!(
                "min_document_area must be finite and non-negative, got {}",
                s.min_document_area
            )));
        }

        if self.output.width == 0 || self.output.height == 0 {
            return Err(invalid(format!(
                "output size must be non-zero, got {}x{}",
                self.output.width, self.output.height
            )));
        }
        Ok(())
    }
}

fn require_odd(name: &str, value: u32) -> Result<()> {
    if value == 0 || value % 2 == 0 {
        return Err(invalid(format!("{name} must be a positive odd number, got {value}")));
    }
    Ok(())
}

fn invalid(message: String) -> BirdseyeError {
    BirdseyeError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        config.validate().unwrap();
        assert_eq!(config.preprocess.blur_kernel_size, 25);
        assert_eq!(config.preprocess.threshold_block_size, 11);
        assert_eq!(config.selection.min_document_area, 10_000.0);
        assert_eq!((config.output.width, config.output.height), (480, 640));
    }

    #[test]
    fn even_kernel_rejected() {
        let mut config = ScanConfig::default();
        config.preprocess.opening_kernel_size = 4;
        assert!(matches!(
            config.validate(),
            Err(BirdseyeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn inverted_canny_thresholds_rejected() {
        let mut config = ScanConfig::default();
        config.preprocess.canny_low = 200.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unsupported_aperture_rejected() {
        let mut config = ScanConfig::default();
        config.preprocess.canny_aperture = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_selection_values_rejected() {
        for area in [f64::NAN, f64::INFINITY, -1.0] {
            let mut config = ScanConfig::default();
            config.selection.min_document_area = area;
            assert!(
                matches!(config.validate(), Err(BirdseyeError::InvalidConfig(_))),
                "min_document_area = {area}"
            );
        }
        let mut config = ScanConfig::default();
        config.selection.epsilon_factor = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_overlay_is_opaque_blue() {
        assert_eq!(OverlayConfig::default().color, [0, 0, 255, 255]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{ "output": { "width": 600 }, "selection": { "min_document_area": 500.0 } }"#;
        let config: ScanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.output.width, 600);
        assert_eq!(config.output.height, 640);
        assert_eq!(config.selection.min_document_area, 500.0);
        assert_eq!(config.selection.epsilon_factor, 0.02);
        assert_eq!(config.preprocess, PreprocessConfig::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = ScanConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ScanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
