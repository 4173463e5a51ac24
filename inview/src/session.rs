//! One automation session: a driver (geometry oracle plus pointer sink),
//! the frame context stack, and the two operations exposed to callers.

use crate::errors::ActionError;
use crate::frames::FrameStack;
use crate::geometry::{Point, Rect};
use crate::oracle::{ElementId, FrameId, GeometryOracle};
use crate::pointer::{PointerEvent, PointerSink};
use crate::resolver::ScrollResolver;
use crate::ClickResult;
use tracing::{debug, instrument};

pub struct Session<D: GeometryOracle + PointerSink> {
    driver: D,
    frames: FrameStack,
}

impl<D: GeometryOracle + PointerSink> Session<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            frames: FrameStack::new(),
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn current_frame(&self) -> FrameId {
        self.frames.current()
    }

    /// Switches into a child frame of the active frame.
    pub fn enter_frame(&mut self, frame: FrameId) -> Result<(), ActionError> {
        self.frames.enter(&self.driver, frame)
    }

    /// Restores the context to the top document.
    pub fn exit_to_top(&mut self) {
        self.frames.exit_to_top();
    }

    /// Scrolls the element into view as needed and clicks its interaction
    /// point. On resolution failure no pointer event is dispatched.
    #[instrument(skip(self))]
    pub fn click(&mut self, element: ElementId) -> Result<ClickResult, ActionError> {
        let resolver = ScrollResolver::new(&self.frames);
        let resolution = resolver.resolve(&mut self.driver, element)?;
        self.driver.dispatch(PointerEvent::press(resolution.point))?;
        self.driver.dispatch(PointerEvent::release(resolution.point))?;
        debug!(
            "click:dispatched element={:?} point=({:.1}, {:.1}) adjustments={}",
            element,
            resolution.point.x,
            resolution.point.y,
            resolution.adjustments.len()
        );
        Ok(ClickResult {
            point: resolution.point,
            adjustments: resolution.adjustments,
        })
    }

    /// Projects the element's interaction point under the current scroll
    /// state. Never mutates any scroll offset.
    pub fn interaction_point(&self, element: ElementId) -> Result<Point, ActionError> {
        ScrollResolver::new(&self.frames).interaction_point(&self.driver, element)
    }

    /// The element's bounding box as reported by the oracle. Read-only.
    pub fn bounding_box(&self, element: ElementId) -> Result<Rect, ActionError> {
        self.driver.bounding_box(element)
    }
}
