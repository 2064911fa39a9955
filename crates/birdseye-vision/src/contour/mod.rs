// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour stage — outer boundary extraction, polygon simplification and
// document quadrilateral selection.

pub mod extract;
pub mod select;
pub mod simplify;

pub use extract::find_outer_contours;
pub use select::select_document;
pub use simplify::{approximate_polygon, simplify_closed};
