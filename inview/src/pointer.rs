//! Synthetic pointer events and the sink they are delivered to.

use crate::errors::ActionError;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Press,
    Release,
}

/// A single synthetic pointer event at a resolved, in-view point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: PointerButton,
    pub point: Point,
}

impl PointerEvent {
    pub fn press(point: Point) -> Self {
        Self {
            kind: PointerEventKind::Press,
            button: PointerButton::Left,
            point,
        }
    }

    pub fn release(point: Point) -> Self {
        Self {
            kind: PointerEventKind::Release,
            button: PointerButton::Left,
            point,
        }
    }
}

/// Receives dispatched pointer events. Implemented by the page model in
/// tests and by an input driver in a real client.
pub trait PointerSink {
    fn dispatch(&mut self, event: PointerEvent) -> Result<(), ActionError>;
}
