//! The geometry oracle seam.
//!
//! The resolver never inspects a live page; everything it knows about layout
//! comes through [`GeometryOracle`], and every scroll it performs goes back
//! through the same trait. Handles are opaque arena indices minted by the
//! oracle implementation.

use crate::errors::ActionError;
use crate::geometry::{Rect, ScrollOffset};
use serde::{Deserialize, Serialize};

/// Opaque handle to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque handle to an overflow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(u32);

impl RegionId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque handle to a frame. `FrameId::TOP` is the top document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(u32);

impl FrameId {
    pub const TOP: FrameId = FrameId(0);

    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Overflow classification of a scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overflow {
    /// Content spills out of the box unclipped.
    Visible,
    Scroll,
    Auto,
    /// Clips content but refuses to scroll. Frames declared `scrolling=no`
    /// report this classification.
    Hidden,
}

impl Overflow {
    pub fn scrollable(self) -> bool {
        matches!(self, Overflow::Scroll | Overflow::Auto)
    }

    pub fn clips(self) -> bool {
        !matches!(self, Overflow::Visible)
    }
}

/// Names one scroll container: either an overflow element or a frame's
/// document scroll. A frame boundary acts as a scrollable region of its
/// parent, and `Frame(FrameId::TOP)` is the top document scroll itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollRef {
    Container(RegionId),
    Frame(FrameId),
}

/// Read/write access to page geometry.
///
/// Coordinate conventions:
/// - element and container boxes are reported in the owning frame's document
///   space at zero scroll;
/// - `region_bounds(Frame(f))` is the frame's own viewport `(0, 0, w, h)` in
///   `Document(f)` space;
/// - `frame_viewport(f)` is the embed rectangle in the parent's document
///   space (for `TOP`, the viewport rectangle at the origin).
///
/// Failures for stale or unknown handles propagate to callers unchanged; the
/// resolver performs no recovery for them.
pub trait GeometryOracle {
    fn bounding_box(&self, element: ElementId) -> Result<Rect, ActionError>;

    fn owning_frame(&self, element: ElementId) -> Result<FrameId, ActionError>;

    /// Clipping ancestor containers of the element within its owning frame,
    /// innermost first.
    fn scrollable_ancestors(&self, element: ElementId) -> Result<Vec<RegionId>, ActionError>;

    fn region_bounds(&self, target: ScrollRef) -> Result<Rect, ActionError>;

    fn overflow(&self, target: ScrollRef) -> Result<Overflow, ActionError>;

    fn current_offset(&self, target: ScrollRef) -> Result<ScrollOffset, ActionError>;

    fn max_offset(&self, target: ScrollRef) -> Result<ScrollOffset, ActionError>;

    /// Requests a new offset. Implementations clamp into `[0, max]` per axis
    /// and the change is observable through `current_offset` on return.
    fn set_offset(&mut self, target: ScrollRef, offset: ScrollOffset) -> Result<(), ActionError>;

    fn frame_parent(&self, frame: FrameId) -> Result<Option<FrameId>, ActionError>;

    fn frame_viewport(&self, frame: FrameId) -> Result<Rect, ActionError>;

    /// Clipping ancestor containers of the frame's embed element in the
    /// parent frame, innermost first.
    fn frame_ancestors(&self, frame: FrameId) -> Result<Vec<RegionId>, ActionError>;
}
