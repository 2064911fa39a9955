// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Birdseye scanning pipeline.

use image::DynamicImage;
use imageproc::geometry::{arc_length, contour_area};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Channel layout of a pixel buffer flowing through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// One 8-bit luminance channel.
    Gray,
    /// Four 8-bit channels (red, green, blue, alpha).
    Rgba,
}

impl PixelFormat {
    /// Format a frame is processed in: 8-bit gray stays gray, every other
    /// layout is handled as RGBA.
    pub fn of(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(_) => Self::Gray,
            _ => Self::Rgba,
        }
    }
}

/// A closed boundary curve traced from a binary edge map.
///
/// The last point implicitly connects back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area of the closed polygon (shoelace formula), in square pixels.
    pub fn area(&self) -> f64 {
        contour_area(&self.points)
    }

    /// Length of the closed polyline, including the closing segment.
    pub fn perimeter(&self) -> f64 {
        arc_length(&self.points, true)
    }
}

/// Four ordered corners of a document boundary.
///
/// Corner order is whatever order the polygon simplification produced; it is
/// mapped verbatim onto the destination rectangle's (0,0), (W,0), (W,H), (0,H).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quadrilateral {
    pub corners: [Point<i32>; 4],
}

impl Quadrilateral {
    pub fn new(corners: [Point<i32>; 4]) -> Self {
        Self { corners }
    }

    /// Build from a simplified polygon; `None` unless it has exactly 4 vertices.
    pub fn from_polygon(polygon: &[Point<i32>]) -> Option<Self> {
        let corners: [Point<i32>; 4] = polygon.try_into().ok()?;
        Some(Self { corners })
    }

    /// Corners as sub-pixel coordinates for projective math.
    pub fn corners_f32(&self) -> [(f32, f32); 4] {
        self.corners.map(|p| (p.x as f32, p.y as f32))
    }
}

/// The contour chosen as the document boundary, with its simplified corners.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentCandidate {
    pub contour: Contour,
    /// Enclosed area of `contour` (not of `quad`).
    pub area: f64,
    pub quad: Quadrilateral,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: i32, h: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(0, 0),
            Point::new(w, 0),
            Point::new(w, h),
            Point::new(0, h),
        ]
    }

    #[test]
    fn contour_area_ignores_winding() {
        let cw = Contour::new(rect(10, 5));
        let mut points = rect(10, 5);
        points.reverse();
        let ccw = Contour::new(points);
        assert_eq!(cw.area(), 50.0);
        assert_eq!(ccw.area(), 50.0);
    }

    #[test]
    fn degenerate_contours_have_zero_area() {
        assert_eq!(Contour::new(vec![Point::new(1, 1), Point::new(4, 5)]).area(), 0.0);
        assert_eq!(Contour::new(Vec::new()).area(), 0.0);
    }

    #[test]
    fn perimeter_includes_closing_segment() {
        assert_eq!(Contour::new(rect(10, 5)).perimeter(), 30.0);
        // 3-4-5 triangle.
        let tri = Contour::new(vec![Point::new(0, 0), Point::new(3, 0), Point::new(0, 4)]);
        assert!((tri.perimeter() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn quadrilateral_requires_four_vertices() {
        assert!(Quadrilateral::from_polygon(&rect(3, 3)).is_some());
        assert!(Quadrilateral::from_polygon(&rect(3, 3)[..3]).is_none());
    }

    #[test]
    fn only_luma8_is_processed_as_gray() {
        use image::{GrayImage, RgbImage};
        assert_eq!(PixelFormat::of(&DynamicImage::ImageLuma8(GrayImage::new(1, 1))), PixelFormat::Gray);
        assert_eq!(PixelFormat::of(&DynamicImage::ImageRgb8(RgbImage::new(1, 1))), PixelFormat::Rgba);
    }
}
