// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction — outermost closed boundaries of an edge map, ranked by
// enclosed area.

use birdseye_core::Contour;
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use tracing::{debug, instrument};

/// Outer, top-level boundaries of the non-zero regions of `edges`, largest
/// enclosed area first.
///
/// Hole borders and anything nested inside another boundary are dropped.
/// Equal areas keep their tracing order.
#[instrument(skip_all, fields(width = edges.width(), height = edges.height()))]
pub fn find_outer_contours(edges: &GrayImage) -> Vec<Contour> {
    let mut ranked: Vec<(f64, Contour)> = find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| {
            let contour = Contour::new(c.points);
            (contour.area(), contour)
        })
        .collect();

    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    debug!(count = ranked.len(), "Outer contours extracted");

    ranked.into_iter().map(|(_, contour)| contour).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
    use imageproc::rect::Rect;

    fn areas(contours: &[Contour]) -> Vec<f64> {
        contours.iter().map(Contour::area).collect()
    }

    #[test]
    fn empty_map_has_no_contours() {
        let edges = GrayImage::new(40, 40);
        assert!(find_outer_contours(&edges).is_empty());
    }

    #[test]
    fn contours_are_sorted_by_area_descending() {
        let mut edges = GrayImage::new(200, 200);
        draw_filled_rect_mut(&mut edges, Rect::at(5, 5).of_size(20, 20), Luma([255]));
        draw_filled_rect_mut(&mut edges, Rect::at(40, 40).of_size(80, 60), Luma([255]));
        draw_filled_rect_mut(&mut edges, Rect::at(140, 10).of_size(40, 40), Luma([255]));
        draw_filled_rect_mut(&mut edges, Rect::at(140, 150).of_size(10, 30), Luma([255]));

        let found = areas(&find_outer_contours(&edges));
        assert_eq!(found.len(), 4);
        assert!(found.windows(2).all(|w| w[0] >= w[1]), "{found:?}");
        assert!(found[0] > found[1]);
    }

    #[test]
    fn nested_boundaries_are_excluded() {
        let mut edges = GrayImage::new(120, 120);
        // Closed one-pixel outline, with a filled blob inside its hole.
        draw_hollow_rect_mut(&mut edges, Rect::at(10, 10).of_size(100, 100), Luma([255]));
        draw_filled_rect_mut(&mut edges, Rect::at(40, 40).of_size(20, 20), Luma([255]));

        let contours = find_outer_contours(&edges);
        assert_eq!(contours.len(), 1);
        // The outline encloses roughly its own 99x99 span.
        assert!(contours[0].area() > 9000.0, "area = {}", contours[0].area());
    }

    #[test]
    fn open_curve_encloses_nothing() {
        let mut edges = GrayImage::new(50, 50);
        for x in 5..45 {
            edges.put_pixel(x, 25, Luma([255]));
        }
        let contours = find_outer_contours(&edges);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].area() < 1.0);
    }
}
