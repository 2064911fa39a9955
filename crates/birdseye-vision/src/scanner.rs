// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline driver: preprocess, extract contours, select the document and
// rectify it, one frame at a time.

use birdseye_core::config::ScanConfig;
use birdseye_core::error::Result;
use birdseye_core::DocumentCandidate;
use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, instrument, warn};

use crate::contour::{find_outer_contours, select_document};
use crate::overlay::draw_outline;
use crate::preprocess::{preprocess, preprocess_traced, PreprocessTrace};
use crate::rectify::rectify;

/// Result of scanning one frame.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// A document was found and warped to the output rectangle.
    Rectified {
        image: DynamicImage,
        candidate: DocumentCandidate,
    },
    /// No document; `image` is an unmodified copy of the input frame.
    NotFound { image: DynamicImage },
}

impl ScanOutcome {
    pub fn image(&self) -> &DynamicImage {
        match self {
            Self::Rectified { image, .. } | Self::NotFound { image } => image,
        }
    }

    pub fn into_image(self) -> DynamicImage {
        match self {
            Self::Rectified { image, .. } | Self::NotFound { image } => image,
        }
    }

    pub fn is_rectified(&self) -> bool {
        matches!(self, Self::Rectified { .. })
    }

    pub fn candidate(&self) -> Option<&DocumentCandidate> {
        match self {
            Self::Rectified { candidate, .. } => Some(candidate),
            Self::NotFound { .. } => None,
        }
    }
}

/// Everything a debugging caller may want to look at after one scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    pub trace: PreprocessTrace,
    /// Number of top-level contours in the edge map.
    pub contour_count: usize,
    /// The input frame with the selected outline drawn on it.
    pub outline: RgbaImage,
}

/// Detects and rectifies a single document per frame.
///
/// Holds configuration only, so one scanner can serve any number of frames
/// and threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    config: ScanConfig,
}

impl DocumentScanner {
    /// Build a scanner after validating `config`.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Find the document boundary without rectifying.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn detect(&self, frame: &DynamicImage) -> Result<Option<DocumentCandidate>> {
        let edges = preprocess(frame, &self.config.preprocess)?;
        let contours = find_outer_contours(&edges);
        debug!(count = contours.len(), "Contours extracted");
        Ok(select_document(&contours, &self.config.selection))
    }

    /// Detect and rectify one frame.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn scan(&self, frame: &DynamicImage) -> Result<ScanOutcome> {
        let candidate = self.detect(frame)?;
        self.finish(frame, candidate)
    }

    /// Detect and rectify one frame, returning only the output image.
    pub fn scan_frame(&self, frame: &DynamicImage) -> Result<DynamicImage> {
        Ok(self.scan(frame)?.into_image())
    }

    /// Like [`scan`](Self::scan), but also keep the intermediate buffers and
    /// an outline preview.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn scan_traced(&self, frame: &DynamicImage) -> Result<ScanReport> {
        let trace = preprocess_traced(frame, &self.config.preprocess)?;
        let contours = find_outer_contours(&trace.edges);
        let candidate = select_document(&contours, &self.config.selection);
        let outline = draw_outline(
            frame,
            candidate.as_ref().map(|c| &c.contour),
            &self.config.overlay,
        )?;
        let outcome = self.finish(frame, candidate)?;

        Ok(ScanReport {
            outcome,
            trace,
            contour_count: contours.len(),
            outline,
        })
    }

    fn finish(&self, frame: &DynamicImage, candidate: Option<DocumentCandidate>) -> Result<ScanOutcome> {
        let image = rectify(
            frame,
            candidate.as_ref().map(|c| &c.quad),
            &self.config.selection,
            &self.config.output,
        )?;

        Ok(match candidate {
            Some(candidate) => {
                info!(area = candidate.area, "Document rectified");
                ScanOutcome::Rectified { image, candidate }
            }
            None => {
                warn!("No document found; passing frame through");
                ScanOutcome::NotFound { image }
            }
        })
    }
}
