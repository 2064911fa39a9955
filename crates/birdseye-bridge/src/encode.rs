// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PNG and base64 encoding of output frames.

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose;
use birdseye_core::error::{BirdseyeError, Result};
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::traits::{Frame, FrameSink};

/// Encode `image` as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| BirdseyeError::ImageError(format!("image encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Encode `image` as PNG and wrap it in standard (padded) base64.
pub fn encode_png_base64(image: &DynamicImage) -> Result<String> {
    let png = encode_png(image)?;
    Ok(general_purpose::STANDARD.encode(png))
}

/// Writes each frame as one line of base64 PNG to a writer (e.g. stdout).
#[derive(Debug)]
pub struct Base64Sink<W: Write> {
    writer: W,
}

impl<W: Write> Base64Sink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for Base64Sink<W> {
    fn deliver(&mut self, frame: &Frame) -> Result<()> {
        let encoded = encode_png_base64(&frame.image)?;
        writeln!(self.writer, "{}", encoded)?;
        self.writer.flush()?;
        debug!(label = %frame.label, chars = encoded.len(), "Frame emitted as base64");
        Ok(())
    }
}
