//! Axis-aligned rectangles in world or screen space.

use glam::DVec2;

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; never negative.
    pub w: f64,
    /// Height; never negative.
    pub h: f64,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle from a corner and a size vector.
    #[must_use]
    pub const fn from_corner(corner: DVec2, size: DVec2) -> Self {
        Self::new(corner.x, corner.y, size.x, size.y)
    }

    /// Right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Top-left corner.
    #[must_use]
    pub const fn corner(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Returns the rectangle moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: DVec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Returns `true` when the two rectangles share interior area.
    ///
    /// Rectangles that only touch along an edge do not intersect, so a body
    /// resting flush against a wall is not in collision with it.
    ///
    /// ```
    /// use mariana::geometry::Rect;
    /// let wall = Rect::new(64.0, 0.0, 64.0, 64.0);
    /// assert!(!Rect::new(44.0, 0.0, 20.0, 36.0).intersects(&wall));
    /// assert!(Rect::new(45.0, 0.0, 20.0, 36.0).intersects(&wall));
    /// ```
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
