// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Douglas-Peucker simplification of closed polygons.
//
// A closed curve has no natural endpoints, so two anchors are chosen first:
// the vertex farthest from the first point, then the vertex farthest from
// that one. Both chains between the anchors are simplified independently.
// Kept vertices are emitted in their original order, which makes the
// simplification idempotent: feeding a result back in returns it unchanged.

use imageproc::geometry::arc_length;
use imageproc::point::Point;

/// Simplify a closed polygon with tolerance `epsilon_factor` × perimeter.
pub fn approximate_polygon(points: &[Point<i32>], epsilon_factor: f64) -> Vec<Point<i32>> {
    let epsilon = epsilon_factor * arc_length(points, true);
    simplify_closed(points, epsilon)
}

/// Simplify a closed polygon, dropping vertices closer than `epsilon` to the
/// chord that replaces them.
pub fn simplify_closed(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let first = farthest_from(points, points[0]);
    let second = farthest_from(points, points[first]);
    if first == second {
        // Every vertex coincides.
        return vec![points[0]];
    }

    let mut keep = vec![false; n];
    keep[first] = true;
    keep[second] = true;
    mark_chain(points, first, second, epsilon, &mut keep);
    mark_chain(points, second, first, epsilon, &mut keep);

    points
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(p, _)| *p)
        .collect()
}

/// Index of the vertex farthest from `origin` (first one on ties).
fn farthest_from(points: &[Point<i32>], origin: Point<i32>) -> usize {
    let mut best = (0, -1i64);
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - origin.x) as i64;
        let dy = (p.y - origin.y) as i64;
        let d = dx * dx + dy * dy;
        if d > best.1 {
            best = (i, d);
        }
    }
    best.0
}

/// Douglas-Peucker over the cyclic chain `start → end` (indices wrap around).
fn mark_chain(points: &[Point<i32>], start: usize, end: usize, epsilon: f64, keep: &mut [bool]) {
    let n = points.len();
    // Positions are offsets from `start` along the cycle.
    let span = (end + n - start) % n;
    let mut stack = vec![(0usize, span)];

    while let Some((lo, hi)) = stack.pop() {
        if hi <= lo + 1 {
            continue;
        }
        let a = points[(start + lo) % n];
        let b = points[(start + hi) % n];

        let (split, dmax) = (lo + 1..hi)
            .map(|k| (k, distance_to_line(points[(start + k) % n], a, b)))
            .fold((lo, -1.0f64), |best, cur| if cur.1 > best.1 { cur } else { best });

        if dmax > epsilon {
            keep[(start + split) % n] = true;
            stack.push((lo, split));
            stack.push((split, hi));
        }
    }
}

/// Perpendicular distance from `p` to the line through `a` and `b`.
fn distance_to_line(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let (px, py) = (p.x as f64 - ax, p.y as f64 - ay);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return px.hypot(py);
    }
    (dx * py - dy * px).abs() / len
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every integer point along the boundary of an axis-aligned rectangle,
    /// walked clockwise from the top-left corner.
    fn dense_rect(x0: i32, y0: i32, w: i32, h: i32) -> Vec<Point<i32>> {
        let (x1, y1) = (x0 + w, y0 + h);
        let mut pts = Vec::new();
        pts.extend((x0..x1).map(|x| Point::new(x, y0)));
        pts.extend((y0..y1).map(|y| Point::new(x1, y)));
        pts.extend((x0 + 1..=x1).rev().map(|x| Point::new(x, y1)));
        pts.extend((y0 + 1..=y1).rev().map(|y| Point::new(x0, y)));
        pts
    }

    #[test]
    fn dense_rectangle_collapses_to_corners() {
        let poly = approximate_polygon(&dense_rect(10, 20, 200, 120), 0.02);
        assert_eq!(
            poly,
            vec![
                Point::new(10, 20),
                Point::new(210, 20),
                Point::new(210, 140),
                Point::new(10, 140),
            ]
        );
    }

    #[test]
    fn start_in_middle_of_edge_still_gives_four_corners() {
        let mut pts = dense_rect(0, 0, 100, 60);
        pts.rotate_left(37);
        let poly = approximate_polygon(&pts, 0.02);
        assert_eq!(poly.len(), 4, "{poly:?}");
    }

    #[test]
    fn simplification_is_idempotent() {
        let quad = vec![
            Point::new(12, 8),
            Point::new(300, 30),
            Point::new(280, 410),
            Point::new(5, 390),
        ];
        assert_eq!(approximate_polygon(&quad, 0.02), quad);
    }

    #[test]
    fn triangle_keeps_three_vertices() {
        let tri = vec![Point::new(0, 0), Point::new(400, 0), Point::new(0, 400)];
        assert_eq!(approximate_polygon(&tri, 0.02).len(), 3);
    }

    #[test]
    fn small_bump_is_removed() {
        let mut pts = dense_rect(0, 0, 200, 200);
        // A 2-pixel dent on the top edge stays within tolerance (0.02 * ~800).
        pts[100] = Point::new(100, 2);
        assert_eq!(approximate_polygon(&pts, 0.02).len(), 4);
    }

    #[test]
    fn tiny_inputs_are_returned_as_is() {
        let two = vec![Point::new(0, 0), Point::new(5, 5)];
        assert_eq!(simplify_closed(&two, 1.0), two);
        assert!(simplify_closed(&[], 1.0).is_empty());
    }

    #[test]
    fn distance_to_horizontal_line() {
        let d = distance_to_line(Point::new(3, 4), Point::new(0, 0), Point::new(10, 0));
        assert!((d - 4.0).abs() < 1e-12);
    }
}
