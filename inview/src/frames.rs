//! Frame context stack.
//!
//! Tracks which frame the automation session is currently addressing and
//! translates coordinates across frame boundaries. The stack always has a
//! well-defined top: index 0 is the sentinel top document and is never
//! popped.

use crate::errors::ActionError;
use crate::geometry::{Point, Space};
use crate::oracle::{FrameId, GeometryOracle, ScrollRef};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FrameStack {
    stack: Vec<FrameId>,
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStack {
    pub fn new() -> Self {
        Self {
            stack: vec![FrameId::TOP],
        }
    }

    /// The currently active frame.
    pub fn current(&self) -> FrameId {
        self.stack.last().copied().unwrap_or(FrameId::TOP)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Pushes a frame. The frame must be a direct child of the active frame.
    pub fn enter<O: GeometryOracle>(
        &mut self,
        oracle: &O,
        frame: FrameId,
    ) -> Result<(), ActionError> {
        let parent = oracle.frame_parent(frame)?;
        if parent != Some(self.current()) {
            return Err(ActionError::InvalidArgument(format!(
                "frame {:?} is not a child of the active frame {:?}",
                frame,
                self.current()
            )));
        }
        debug!("frames:enter frame={:?} depth={}", frame, self.stack.len());
        self.stack.push(frame);
        Ok(())
    }

    /// Clears back to the sentinel top document.
    pub fn exit_to_top(&mut self) {
        self.stack.truncate(1);
    }

    /// Translates a point from a frame's document space into the parent's
    /// document space: embed origin in parent space plus the point, minus
    /// the frame's own scroll offset.
    pub fn to_parent_space<O: GeometryOracle>(
        &self,
        oracle: &O,
        point: Point,
        frame: FrameId,
    ) -> Result<Point, ActionError> {
        debug_assert_eq!(point.space, Space::Document(frame));
        let parent = oracle.frame_parent(frame)?.ok_or_else(|| {
            ActionError::InvalidArgument(format!("frame {frame:?} has no parent frame"))
        })?;
        let embed = oracle.frame_viewport(frame)?;
        let scroll = oracle.current_offset(ScrollRef::Frame(frame))?;
        Ok(Point::new(
            embed.left() + point.x - scroll.x,
            embed.top() + point.y - scroll.y,
            Space::Document(parent),
        ))
    }
}
