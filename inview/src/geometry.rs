//! Value types for points, rectangles and scroll offsets.
//!
//! Every point and rectangle is tagged with the coordinate [`Space`] it was
//! measured in. The two spaces that matter here are a frame's *document*
//! space (layout coordinates at zero scroll) and a frame's *viewport* space
//! (what is actually visible after all of that frame's scrolls are applied).

use crate::oracle::FrameId;
use serde::{Deserialize, Serialize};

/// A named coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    /// Layout coordinates of a frame's document at zero scroll.
    Document(FrameId),
    /// Visible coordinates of a frame after its scrolls are applied.
    /// `Viewport(FrameId::TOP)` is the top-viewport space clicks land in.
    Viewport(FrameId),
}

/// An (x, y) position in a named coordinate space. Immutable value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub space: Space,
}

impl Point {
    pub fn new(x: f64, y: f64, space: Space) -> Self {
        Self { x, y, space }
    }

    /// Returns a point moved by (dx, dy) within the same space.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.space)
    }

    /// Reinterprets the coordinates in another space. Callers are
    /// responsible for having applied the matching translation first.
    pub fn with_space(self, space: Space) -> Self {
        Self::new(self.x, self.y, space)
    }
}

/// An axis-aligned rectangle in the space of its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64, space: Space) -> Self {
        Self {
            origin: Point::new(x, y, space),
            width,
            height,
        }
    }

    pub fn space(&self) -> Space {
        self.origin.space
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
            self.origin.space,
        )
    }

    /// Edge-inclusive containment test. Both values must be in the same space.
    pub fn contains(&self, point: &Point) -> bool {
        debug_assert_eq!(self.space(), point.space);
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            origin: self.origin.translate(dx, dy),
            ..self
        }
    }

    pub fn with_space(self, space: Space) -> Self {
        Self {
            origin: self.origin.with_space(space),
            ..self
        }
    }

    /// Intersection with positive area, or `None` when the rectangles do not
    /// overlap. Edge-touching rectangles count as disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        debug_assert_eq!(self.space(), other.space());
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Some(Rect::new(left, top, right - left, bottom - top, self.space()))
        } else {
            None
        }
    }
}

/// A scroll position of a container or frame document.
///
/// The oracle keeps every offset within `[0, max]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ZERO: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamps each axis into `[0, max]`.
    pub fn clamp_to(self, max: ScrollOffset) -> Self {
        Self {
            x: self.x.clamp(0.0, max.x.max(0.0)),
            y: self.y.clamp(0.0, max.y.max(0.0)),
        }
    }
}
