//! Scroll-into-view resolution and pointer click dispatch for UI automation
//! clients.
//!
//! Given a target element that may be nested inside scrollable overflow
//! containers and/or frames, this crate computes the minimal set of scroll
//! adjustments needed to make the element's interaction point visible, then
//! dispatches a synthetic click at that point. Layout itself is out of
//! scope: all geometry comes from a [`GeometryOracle`] collaborator, and the
//! bundled [`PageModel`] is an arena-backed oracle suitable for fixtures and
//! replayed layouts.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod frames;
pub mod geometry;
pub mod oracle;
pub mod page;
pub mod pointer;
pub mod resolver;
pub mod session;
#[cfg(test)]
mod tests;

pub use errors::ActionError;
pub use frames::FrameStack;
pub use geometry::{Point, Rect, ScrollOffset, Space};
pub use oracle::{ElementId, FrameId, GeometryOracle, Overflow, RegionId, ScrollRef};
pub use page::PageModel;
pub use pointer::{PointerButton, PointerEvent, PointerEventKind, PointerSink};
pub use resolver::{Resolution, ScrollAdjustment, ScrollResolver};
pub use session::Session;

/// Outcome of a successful click: where the pointer landed (top-viewport
/// coordinates) and which scroll offsets had to change to get there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickResult {
    pub point: Point,
    pub adjustments: Vec<ScrollAdjustment>,
}
