// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Planar homography from four point correspondences.

use birdseye_core::error::{BirdseyeError, Result};
use imageproc::geometric_transformations::Projection;

/// Below this |sin| of the angle at a vertex, three points count as collinear.
const COLLINEAR_SINE: f64 = 1e-6;

/// Projective transform mapping source points to destination points.
#[derive(Debug, Clone, Copy)]
pub struct Homography {
    projection: Projection,
}

impl Homography {
    /// Solve for the transform taking each `src[i]` to `dst[i]`.
    ///
    /// Fails with `DegenerateQuadrilateral` when three points on either side
    /// are collinear, or when no invertible transform exists.
    pub fn from_correspondences(src: [(f32, f32); 4], dst: [(f32, f32); 4]) -> Result<Self> {
        if has_collinear_triple(&src) || has_collinear_triple(&dst) {
            return Err(BirdseyeError::DegenerateQuadrilateral);
        }
        let projection =
            Projection::from_control_points(src, dst).ok_or(BirdseyeError::DegenerateQuadrilateral)?;
        Ok(Self { projection })
    }

    /// Apply the transform to one point.
    pub fn map_point(&self, point: (f32, f32)) -> (f32, f32) {
        self.projection * point
    }

    /// The reverse mapping.
    pub fn inverse(&self) -> Self {
        Self {
            projection: self.projection.invert(),
        }
    }

    /// The transform in the form `imageproc`'s warping routines take.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }
}

/// Whether any three of the four points lie on one line (or coincide).
fn has_collinear_triple(points: &[(f32, f32); 4]) -> bool {
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    TRIPLES.iter().any(|&[a, b, c]| {
        let (ax, ay) = (points[a].0 as f64, points[a].1 as f64);
        let (ux, uy) = (points[b].0 as f64 - ax, points[b].1 as f64 - ay);
        let (vx, vy) = (points[c].0 as f64 - ax, points[c].1 as f64 - ay);
        let lengths = ux.hypot(uy) * vx.hypot(vy);
        lengths == 0.0 || (ux * vy - uy * vx).abs() <= COLLINEAR_SINE * lengths
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DST: [(f32, f32); 4] = [(0.0, 0.0), (480.0, 0.0), (480.0, 640.0), (0.0, 640.0)];

    fn assert_close(a: (f32, f32), b: (f32, f32), tol: f32) {
        assert!(
            (a.0 - b.0).abs() < tol && (a.1 - b.1).abs() < tol,
            "expected {b:?}, got {a:?}"
        );
    }

    #[test]
    fn identity_for_matching_points() {
        let h = Homography::from_correspondences(DST, DST).unwrap();
        for p in [(13.0, 7.0), (240.0, 320.0), (470.0, 600.0)] {
            assert_close(h.map_point(p), p, 1e-3);
        }
    }

    #[test]
    fn maps_skewed_quad_onto_rectangle() {
        let src = [(312.0, 95.0), (1490.0, 160.0), (1620.0, 1010.0), (205.0, 930.0)];
        let h = Homography::from_correspondences(src, DST).unwrap();
        for (s, d) in src.into_iter().zip(DST) {
            assert_close(h.map_point(s), d, 0.01);
        }
    }

    #[test]
    fn inverse_maps_back() {
        let src = [(10.0, 20.0), (300.0, 5.0), (320.0, 260.0), (0.0, 240.0)];
        let h = Homography::from_correspondences(src, DST).unwrap();
        let inv = h.inverse();
        for (s, d) in src.into_iter().zip(DST) {
            assert_close(inv.map_point(d), s, 0.01);
        }
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let src = [(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (30.0, 30.0)];
        assert!(matches!(
            Homography::from_correspondences(src, DST),
            Err(BirdseyeError::DegenerateQuadrilateral)
        ));
    }

    #[test]
    fn three_collinear_corners_are_degenerate() {
        let src = [(0.0, 0.0), (50.0, 0.0), (100.0, 0.0), (40.0, 90.0)];
        assert!(Homography::from_correspondences(src, DST).is_err());
    }

    #[test]
    fn repeated_corner_is_degenerate() {
        let src = [(0.0, 0.0), (0.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
        assert!(Homography::from_correspondences(src, DST).is_err());
    }
}
