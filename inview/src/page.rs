//! Arena-backed page geometry.
//!
//! `PageModel` is the reference implementation of [`GeometryOracle`]: frames,
//! overflow containers and elements live in arenas indexed by handle, with
//! explicit parent links instead of live object references. It doubles as a
//! [`PointerSink`] that records dispatched events, which makes it the
//! standard backend for fixtures and for harnesses that replay recorded
//! layouts.
//!
//! The model also carries the one click side effect this layer knows about:
//! releasing a click over an anchor link scrolls the top document toward the
//! anchor's target. That behavior is deliberately loose (any positive scroll
//! satisfies it) and lives here, not in the resolver.

use crate::errors::ActionError;
use crate::geometry::{Point, Rect, ScrollOffset, Space};
use crate::oracle::{ElementId, FrameId, GeometryOracle, Overflow, RegionId, ScrollRef};
use crate::pointer::{PointerEvent, PointerEventKind, PointerSink};
use tracing::debug;

#[derive(Debug)]
struct FrameRecord {
    parent: Option<FrameId>,
    /// Innermost overflow container around the embed element in the parent.
    container: Option<RegionId>,
    /// Embed rectangle in the parent's document space. For the top document
    /// this is the viewport rectangle at the origin.
    embed: Rect,
    doc_width: f64,
    doc_height: f64,
    scroll: ScrollOffset,
    /// `Scroll` for ordinary frames, `Hidden` for `scrolling=no`.
    policy: Overflow,
}

#[derive(Debug)]
struct RegionRecord {
    parent: Option<RegionId>,
    /// Box in the owning frame's document space at zero scroll.
    bounds: Rect,
    content_width: f64,
    content_height: f64,
    scroll: ScrollOffset,
    overflow: Overflow,
}

#[derive(Debug)]
struct ElementRecord {
    frame: FrameId,
    container: Option<RegionId>,
    bounds: Rect,
    anchor: Option<ElementId>,
}

#[derive(Debug)]
pub struct PageModel {
    frames: Vec<FrameRecord>,
    regions: Vec<RegionRecord>,
    elements: Vec<ElementRecord>,
    events: Vec<PointerEvent>,
}

impl PageModel {
    /// Creates a page with the given top viewport and document size.
    pub fn new(viewport: (f64, f64), document: (f64, f64)) -> Self {
        Self {
            frames: vec![FrameRecord {
                parent: None,
                container: None,
                embed: Rect::new(0.0, 0.0, viewport.0, viewport.1, Space::Document(FrameId::TOP)),
                doc_width: document.0,
                doc_height: document.1,
                scroll: ScrollOffset::ZERO,
                policy: Overflow::Scroll,
            }],
            regions: Vec::new(),
            elements: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Adds a frame embedded at `embed` (parent document space) with its own
    /// document size. Builder methods panic on unknown parent handles.
    pub fn add_frame(
        &mut self,
        parent: FrameId,
        container: Option<RegionId>,
        embed: (f64, f64, f64, f64),
        document: (f64, f64),
        policy: Overflow,
    ) -> FrameId {
        assert!((parent.raw() as usize) < self.frames.len(), "unknown frame {parent:?}");
        if let Some(region) = container {
            assert!((region.raw() as usize) < self.regions.len(), "unknown region {region:?}");
        }
        let id = FrameId::new(self.frames.len() as u32);
        self.frames.push(FrameRecord {
            parent: Some(parent),
            container,
            embed: Rect::new(embed.0, embed.1, embed.2, embed.3, Space::Document(parent)),
            doc_width: document.0,
            doc_height: document.1,
            scroll: ScrollOffset::ZERO,
            policy,
        });
        id
    }

    /// Adds an overflow container within a frame. `bounds` is the box in the
    /// frame's document space; `content` is the scrollable content size.
    pub fn add_region(
        &mut self,
        frame: FrameId,
        parent: Option<RegionId>,
        bounds: (f64, f64, f64, f64),
        content: (f64, f64),
        overflow: Overflow,
    ) -> RegionId {
        assert!((frame.raw() as usize) < self.frames.len(), "unknown frame {frame:?}");
        if let Some(region) = parent {
            assert!((region.raw() as usize) < self.regions.len(), "unknown region {region:?}");
        }
        let id = RegionId::new(self.regions.len() as u32);
        self.regions.push(RegionRecord {
            parent,
            bounds: Rect::new(bounds.0, bounds.1, bounds.2, bounds.3, Space::Document(frame)),
            content_width: content.0,
            content_height: content.1,
            scroll: ScrollOffset::ZERO,
            overflow,
        });
        id
    }

    /// Adds an element, optionally inside an overflow container. `bounds` is
    /// the box in the frame's document space at zero scroll.
    pub fn add_element(
        &mut self,
        frame: FrameId,
        container: Option<RegionId>,
        bounds: (f64, f64, f64, f64),
    ) -> ElementId {
        assert!((frame.raw() as usize) < self.frames.len(), "unknown frame {frame:?}");
        if let Some(region) = container {
            assert!((region.raw() as usize) < self.regions.len(), "unknown region {region:?}");
        }
        let id = ElementId::new(self.elements.len() as u32);
        self.elements.push(ElementRecord {
            frame,
            container,
            bounds: Rect::new(bounds.0, bounds.1, bounds.2, bounds.3, Space::Document(frame)),
            anchor: None,
        });
        id
    }

    /// Marks `link` as an anchor whose activation scrolls the top document
    /// toward `target`.
    pub fn set_anchor(&mut self, link: ElementId, target: ElementId) {
        assert!((target.raw() as usize) < self.elements.len(), "unknown element {target:?}");
        assert!((link.raw() as usize) < self.elements.len(), "unknown element {link:?}");
        self.elements[link.raw() as usize].anchor = Some(target);
    }

    /// Every pointer event dispatched so far, in order.
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Current offset of every scroll container, frames first. Used by
    /// before/after equality assertions.
    pub fn scroll_snapshot(&self) -> Vec<(ScrollRef, ScrollOffset)> {
        let frames = self
            .frames
            .iter()
            .enumerate()
            .map(|(i, f)| (ScrollRef::Frame(FrameId::new(i as u32)), f.scroll));
        let regions = self
            .regions
            .iter()
            .enumerate()
            .map(|(i, r)| (ScrollRef::Container(RegionId::new(i as u32)), r.scroll));
        frames.chain(regions).collect()
    }

    fn frame(&self, id: FrameId) -> Result<&FrameRecord, ActionError> {
        self.frames
            .get(id.raw() as usize)
            .ok_or(ActionError::UnknownFrame(id))
    }

    fn region(&self, id: RegionId) -> Result<&RegionRecord, ActionError> {
        self.regions
            .get(id.raw() as usize)
            .ok_or(ActionError::UnknownRegion(ScrollRef::Container(id)))
    }

    fn element(&self, id: ElementId) -> Result<&ElementRecord, ActionError> {
        self.elements
            .get(id.raw() as usize)
            .ok_or(ActionError::StaleElement(id))
    }

    /// Anchor-follow side effect: clicking a link in the top document
    /// scrolls the document so the target's origin reaches the viewport
    /// top, clamped to the maximum offset. Looser than the resolver
    /// contract; any positive scroll satisfies callers.
    fn follow_anchor(&mut self, release: Point) {
        debug_assert_eq!(release.space, Space::Viewport(FrameId::TOP));
        let top = &self.frames[FrameId::TOP.raw() as usize];
        let doc_point = Point::new(
            release.x + top.scroll.x,
            release.y + top.scroll.y,
            Space::Document(FrameId::TOP),
        );
        let target = self.elements.iter().find_map(|e| {
            (e.frame == FrameId::TOP && e.container.is_none() && e.bounds.contains(&doc_point))
                .then_some(e.anchor)
                .flatten()
        });
        let Some(target) = target else { return };
        let Ok(target_record) = self.element(target) else { return };
        let target_top = target_record.bounds.top();
        let top = &mut self.frames[FrameId::TOP.raw() as usize];
        let max_y = (top.doc_height - top.embed.height).max(0.0);
        let before = top.scroll.y;
        top.scroll.y = target_top.clamp(0.0, max_y);
        debug!(
            "page:anchor_follow target={:?} scroll_y {:.1} -> {:.1}",
            target, before, top.scroll.y
        );
    }
}

impl GeometryOracle for PageModel {
    fn bounding_box(&self, element: ElementId) -> Result<Rect, ActionError> {
        Ok(self.element(element)?.bounds)
    }

    fn owning_frame(&self, element: ElementId) -> Result<FrameId, ActionError> {
        Ok(self.element(element)?.frame)
    }

    fn scrollable_ancestors(&self, element: ElementId) -> Result<Vec<RegionId>, ActionError> {
        let mut chain = Vec::new();
        let mut next = self.element(element)?.container;
        while let Some(region) = next {
            chain.push(region);
            next = self.region(region)?.parent;
        }
        Ok(chain)
    }

    fn region_bounds(&self, target: ScrollRef) -> Result<Rect, ActionError> {
        match target {
            ScrollRef::Container(id) => Ok(self.region(id)?.bounds),
            ScrollRef::Frame(id) => {
                let frame = self.frame(id)?;
                Ok(Rect::new(
                    0.0,
                    0.0,
                    frame.embed.width,
                    frame.embed.height,
                    Space::Document(id),
                ))
            }
        }
    }

    fn overflow(&self, target: ScrollRef) -> Result<Overflow, ActionError> {
        match target {
            ScrollRef::Container(id) => Ok(self.region(id)?.overflow),
            ScrollRef::Frame(id) => Ok(self.frame(id)?.policy),
        }
    }

    fn current_offset(&self, target: ScrollRef) -> Result<ScrollOffset, ActionError> {
        match target {
            ScrollRef::Container(id) => Ok(self.region(id)?.scroll),
            ScrollRef::Frame(id) => Ok(self.frame(id)?.scroll),
        }
    }

    fn max_offset(&self, target: ScrollRef) -> Result<ScrollOffset, ActionError> {
        match target {
            ScrollRef::Container(id) => {
                let region = self.region(id)?;
                Ok(ScrollOffset::new(
                    (region.content_width - region.bounds.width).max(0.0),
                    (region.content_height - region.bounds.height).max(0.0),
                ))
            }
            ScrollRef::Frame(id) => {
                let frame = self.frame(id)?;
                Ok(ScrollOffset::new(
                    (frame.doc_width - frame.embed.width).max(0.0),
                    (frame.doc_height - frame.embed.height).max(0.0),
                ))
            }
        }
    }

    fn set_offset(&mut self, target: ScrollRef, offset: ScrollOffset) -> Result<(), ActionError> {
        let max = self.max_offset(target)?;
        let clamped = offset.clamp_to(max);
        match target {
            ScrollRef::Container(id) => {
                self.region(id)?;
                self.regions[id.raw() as usize].scroll = clamped;
            }
            ScrollRef::Frame(id) => {
                self.frame(id)?;
                self.frames[id.raw() as usize].scroll = clamped;
            }
        }
        Ok(())
    }

    fn frame_parent(&self, frame: FrameId) -> Result<Option<FrameId>, ActionError> {
        Ok(self.frame(frame)?.parent)
    }

    fn frame_viewport(&self, frame: FrameId) -> Result<Rect, ActionError> {
        Ok(self.frame(frame)?.embed)
    }

    fn frame_ancestors(&self, frame: FrameId) -> Result<Vec<RegionId>, ActionError> {
        let mut chain = Vec::new();
        let mut next = self.frame(frame)?.container;
        while let Some(region) = next {
            chain.push(region);
            next = self.region(region)?.parent;
        }
        Ok(chain)
    }
}

impl PointerSink for PageModel {
    fn dispatch(&mut self, event: PointerEvent) -> Result<(), ActionError> {
        self.events.push(event);
        if event.kind == PointerEventKind::Release {
            self.follow_anchor(event.point);
        }
        Ok(())
    }
}
