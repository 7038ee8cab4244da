//! Plain geometry used by both the window server and the saved layout.
//!
//! Window bounds and normalized screen frames share one convention: the
//! origin is the top-left corner of the primary display and y grows downward.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Point { Point { x, y } }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size { Size { width, height } }

    /// Lets sizes go through the same closeness test as positions.
    pub fn as_point(self) -> Point { Point::new(self.width, self.height) }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Rect { Rect { origin, size } }

    pub fn max_x(&self) -> f64 { self.origin.x + self.size.width }

    pub fn max_y(&self) -> f64 { self.origin.y + self.size.height }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbouring rect.
    pub fn contains(&self, p: Point) -> bool {
        self.origin.x <= p.x && p.x < self.max_x() && self.origin.y <= p.y && p.y < self.max_y()
    }

    pub fn with_y(self, y: f64) -> Rect {
        Rect {
            origin: Point::new(self.origin.x, y),
            size: self.size,
        }
    }
}

/// Per-axis slack allowed when comparing two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub x: f64,
    pub y: f64,
}

impl Tolerance {
    pub fn uniform(px: f64) -> Tolerance { Tolerance { x: px, y: px } }
}

impl Default for Tolerance {
    fn default() -> Self { Tolerance::uniform(4.0) }
}

/// True when both axes differ by strictly less than the tolerance.
pub fn is_close(a: Point, b: Point, tolerance: Tolerance) -> bool {
    (a.x - b.x).abs() < tolerance.x && (a.y - b.y).abs() < tolerance.y
}

/// Moves a bottom-left-origin display rect into the top-left-origin space used
/// by window bounds. `reference` is the primary display's native frame.
pub fn normalize_origin(rect: Rect, reference: Rect) -> Rect {
    rect.with_y(reference.max_y() - rect.max_y())
}
