use crate::geometry::Point;
use crate::oracle::{ElementId, FrameId, ScrollRef};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// The interaction point cannot be brought within every enclosing
    /// non-scrollable region. Carries the last computed point for
    /// diagnostics; no pointer event is ever dispatched for it.
    #[error("scroll target unreachable: element {element:?} last seen at ({:.1}, {:.1})", .point.x, .point.y)]
    ScrollTargetUnreachable { element: ElementId, point: Point },

    #[error("stale element handle: {0:?}")]
    StaleElement(ElementId),

    #[error("unknown frame: {0:?}")]
    UnknownFrame(FrameId),

    #[error("unknown scroll region: {0:?}")]
    UnknownRegion(ScrollRef),

    #[error("element {0:?} is outside the active frame context")]
    FrameContextMismatch(ElementId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
