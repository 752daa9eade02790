//! Vector primitives that make up a scene.

use super::Colour;

/// A 2D coordinate in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A closed polygon; the last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// A circle, used as the clip region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, p: Point) -> bool {
        self.center.distance(p) <= self.radius
    }
}

/// A fillable shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Arbitrary polygon (stars).
    Polygon(Polygon),

    /// Axis-aligned rectangle (finder modules, canvas background).
    Rect {
        origin: Point,
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// Axis-aligned square with its top-left corner at `origin`.
    pub fn square(origin: Point, side: f64) -> Self {
        Shape::Rect {
            origin,
            width: side,
            height: side,
        }
    }
}

/// A shape tagged with its fill colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub shape: Shape,
    pub fill: Colour,
}

impl Drawable {
    pub fn new(shape: Shape, fill: Colour) -> Self {
        Self { shape, fill }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_circle_contains() {
        let c = Circle {
            center: Point::new(10.0, 10.0),
            radius: 5.0,
        };
        assert!(c.contains(Point::new(10.0, 15.0)));
        assert!(!c.contains(Point::new(16.0, 10.0)));
    }
}
