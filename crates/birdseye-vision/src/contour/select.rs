// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral selection — pick the contour that best matches a four-sided
// document outline.

use birdseye_core::config::SelectionConfig;
use birdseye_core::{Contour, DocumentCandidate, Quadrilateral};
use tracing::{debug, instrument, warn};

use super::simplify::simplify_closed;

/// Choose the document boundary from area-ranked contours.
///
/// A contour qualifies when its area exceeds `min_document_area` and its
/// simplified polygon has exactly four vertices. A qualifying contour replaces
/// the current pick only if its area is strictly larger, so on area-sorted
/// input the first qualifying contour wins and ties keep the earlier one.
#[instrument(skip_all, fields(contours = contours.len()))]
pub fn select_document(contours: &[Contour], config: &SelectionConfig) -> Option<DocumentCandidate> {
    let best = contours.iter().fold(None, |best: Option<DocumentCandidate>, contour| {
        let area = contour.area();
        if area <= config.min_document_area {
            return best;
        }
        if best.as_ref().is_some_and(|b| area <= b.area) {
            return best;
        }

        let epsilon = config.epsilon_factor * contour.perimeter();
        let polygon = simplify_closed(&contour.points, epsilon);
        match Quadrilateral::from_polygon(&polygon) {
            Some(quad) => Some(DocumentCandidate {
                contour: contour.clone(),
                area,
                quad,
            }),
            None => {
                debug!(area, points = contour.len(), vertices = polygon.len(), "Skipping non-quadrilateral contour");
                best
            }
        }
    });

    match &best {
        Some(candidate) => debug!(
            area = candidate.area,
            corners = ?candidate.quad.corners,
            "Document quadrilateral selected"
        ),
        None => warn!("No contour qualifies as a document outline"),
    }
    best
}
