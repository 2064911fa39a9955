// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Frame source and sink abstractions.

use birdseye_core::error::Result;
use image::DynamicImage;

/// One image travelling through the scanner, tagged with a name for output.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Short name used to derive output file names (usually the input stem).
    pub label: String,
    pub image: DynamicImage,
}

impl Frame {
    pub fn new(label: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }
}

/// Supplies frames one at a time.
pub trait FrameSource {
    /// The next frame, or `Ok(None)` once the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>>;
}

/// Consumes finished frames.
pub trait FrameSink {
    fn deliver(&mut self, frame: &Frame) -> Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn deliver(&mut self, frame: &Frame) -> Result<()> {
        (**self).deliver(frame)
    }
}
