//! Star polygon generator.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::types::{Point, Polygon};

/// Point count used by every star in the renderer.
pub const STAR_POINTS: usize = 5;

/// Build a star with `points` tips, the first pointing straight up.
///
/// Vertices alternate between `outer` (even indices) and `inner` (odd
/// indices), stepping `PI / points` radians each. Callers keep
/// `outer >= inner >= 0`; other radii still yield a well-formed, if
/// self-intersecting, polygon.
pub fn star(center: Point, outer: f64, inner: f64, points: usize) -> Polygon {
    let step = PI / points as f64;
    let vertices = (0..2 * points)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let theta = i as f64 * step - FRAC_PI_2;
            Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
        })
        .collect();
    Polygon::new(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_vertex_count() {
        for n in [3, 5, 8] {
            let s = star(Point::new(0.0, 0.0), 10.0, 4.0, n);
            assert_eq!(s.len(), 2 * n);
        }
    }

    #[test]
    fn test_radii_alternate() {
        let center = Point::new(15.0, 25.0);
        let s = star(center, 6.5, 3.575, STAR_POINTS);

        for (i, v) in s.vertices().iter().enumerate() {
            let expected = if i % 2 == 0 { 6.5 } else { 3.575 };
            assert!((center.distance(*v) - expected).abs() < EPS, "vertex {}", i);
        }
    }

    #[test]
    fn test_first_vertex_points_up() {
        let s = star(Point::new(5.0, 5.0), 2.0, 1.0, STAR_POINTS);
        let top = s.vertices()[0];
        assert!((top.x - 5.0).abs() < EPS);
        assert!((top.y - 3.0).abs() < EPS);
    }

    #[test]
    fn test_zero_points_is_empty() {
        assert!(star(Point::default(), 1.0, 0.5, 0).is_empty());
    }
}
