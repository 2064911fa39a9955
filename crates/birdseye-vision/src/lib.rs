// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// birdseye-vision — Finds a sheet of paper in a camera frame and warps it to a
// flat, top-down view.
//
// The pipeline runs grayscale, blur, opening, adaptive threshold and Canny to
// get an edge map, ranks the outer contours by area, picks the largest one
// that simplifies to four corners, and maps those corners onto a fixed-size
// rectangle.

pub mod contour;
pub mod filter;
pub mod overlay;
pub mod preprocess;
pub mod rectify;
pub mod scanner;

pub use overlay::draw_outline;
pub use preprocess::{preprocess, preprocess_traced, PreprocessTrace};
pub use rectify::{rectify, Homography};
pub use scanner::{DocumentScanner, ScanOutcome, ScanReport};
