// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File-backed frame source and PNG sink.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use birdseye_core::error::{BirdseyeError, Result};
use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::encode::encode_png;
use crate::traits::{Frame, FrameSink, FrameSource};

/// Decode encoded image bytes (PNG, JPEG, ...) into an RGBA frame.
pub fn decode_frame(bytes: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|err| BirdseyeError::ImageError(format!("image decoding failed: {}", err)))?;
    BirdseyeError::check_dimensions(image.width(), image.height())?;
    Ok(DynamicImage::ImageRgba8(image.to_rgba8()))
}

/// Yields one RGBA frame per image file, in the order given.
#[derive(Debug, Clone, Default)]
pub struct FileFrameSource {
    pending: VecDeque<PathBuf>,
}

impl FileFrameSource {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            pending: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Files not yet read.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for FileFrameSource {
    #[instrument(skip(self), fields(remaining = self.pending.len()))]
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };
        let bytes = std::fs::read(&path)?;
        let image = decode_frame(&bytes)?;
        debug!(path = %path.display(), width = image.width(), height = image.height(), "Frame loaded");
        Ok(Some(Frame::new(label_for(&path), image)))
    }
}

/// Output label for an input path: its file stem, or "frame" if it has none.
fn label_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_owned())
}

/// Writes each delivered frame to `<dir>/<label>.png`.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngFileSink {
    /// Sink into `dir`, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngFileSink {
    #[instrument(skip_all, fields(label = %frame.label))]
    fn deliver(&mut self, frame: &Frame) -> Result<()> {
        let path = self.dir.join(format!("{}.png", frame.label));
        let bytes = encode_png(&frame.image)?;
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Frame written");
        self.written.push(path);
        Ok(())
    }
}
