// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectifier — homography estimation and the bird's-eye warp.

pub mod homography;
pub mod warp;

pub use homography::Homography;
pub use warp::{destination_corners, document_homography, rectify};
