// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Birdseye.
//
// Only precondition violations and collaborator failures live here. A frame
// without a detectable document is a normal outcome, not an error.

use thiserror::Error;

/// Top-level error type for all Birdseye operations.
#[derive(Debug, Error)]
pub enum BirdseyeError {
    // -- Precondition violations --
    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },

    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    #[error("quadrilateral corners are degenerate; no perspective transform exists")]
    DegenerateQuadrilateral,

    // -- Collaborators --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BirdseyeError {
    /// Reject frames with a zero dimension.
    pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Self::EmptyFrame { width, height });
        }
        Ok(())
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BirdseyeError>;
