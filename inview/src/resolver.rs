//! Scroll resolution.
//!
//! Computes the ordered sequence of scroll adjustments needed so that an
//! element's interaction point lies within every enclosing visible region,
//! walking overflow containers innermost to outermost within each frame and
//! then the frame chain outward to the top viewport.
//!
//! Policy notes:
//! - The minimal scroll delta aligns the point to the nearest viewport edge
//!   and never overscrolls past `[0, max]`.
//! - An already-visible point produces zero offset changes; `set_offset` is
//!   only called when the current offset does not suffice.
//! - A non-scrollable clipping ancestor (overflow `hidden`, or a frame
//!   declared `scrolling=no`) is never scrolled. Outer regions are still
//!   processed, and resolution fails afterwards if the point stayed clipped.

use crate::errors::ActionError;
use crate::frames::FrameStack;
use crate::geometry::{Point, Rect, ScrollOffset, Space};
use crate::oracle::{ElementId, FrameId, GeometryOracle, RegionId, ScrollRef};
use tracing::{debug, info, warn};

/// Upper bound on frame nesting; a longer chain indicates a cyclic oracle.
const MAX_FRAME_DEPTH: usize = 32;

/// One applied offset change, innermost targets first.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollAdjustment {
    pub target: ScrollRef,
    pub from: ScrollOffset,
    pub to: ScrollOffset,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Interaction point in top-viewport coordinates.
    pub point: Point,
    /// Offset changes that were applied, in application order.
    pub adjustments: Vec<ScrollAdjustment>,
}

/// One frame level of the element's ancestry: the clipping containers within
/// that frame (innermost first), then the frame boundary itself.
struct Hop {
    frame: FrameId,
    regions: Vec<RegionId>,
}

pub struct ScrollResolver<'a> {
    frames: &'a FrameStack,
}

impl<'a> ScrollResolver<'a> {
    pub fn new(frames: &'a FrameStack) -> Self {
        Self { frames }
    }

    /// Resolves the element's interaction point, scrolling whatever is
    /// permitted along the way. Fails with
    /// [`ActionError::ScrollTargetUnreachable`] when a non-scrollable
    /// ancestor keeps the point clipped after all adjustments.
    pub fn resolve<O: GeometryOracle>(
        &self,
        oracle: &mut O,
        element: ElementId,
    ) -> Result<Resolution, ActionError> {
        let origin_frame = oracle.owning_frame(element)?;
        if origin_frame != self.frames.current() {
            return Err(ActionError::FrameContextMismatch(element));
        }

        let mut point = self.candidate_point(oracle, element)?;
        let hops = ancestry(oracle, element, origin_frame)?;
        debug!(
            "resolve:start element={:?} candidate=({:.1}, {:.1}) frames={}",
            element,
            point.x,
            point.y,
            hops.len()
        );

        let mut adjustments = Vec::new();
        let mut blocked: Option<ScrollRef> = None;

        for hop in &hops {
            // Scrolls applied between the element and the current level of
            // this frame's chain.
            let mut shift = ScrollOffset::ZERO;
            for region in &hop.regions {
                let offset = adjust_target(
                    oracle,
                    ScrollRef::Container(*region),
                    &point,
                    shift,
                    &mut adjustments,
                    &mut blocked,
                )?;
                shift.x += offset.x;
                shift.y += offset.y;
            }

            let boundary = ScrollRef::Frame(hop.frame);
            let frame_offset =
                adjust_target(oracle, boundary, &point, shift, &mut adjustments, &mut blocked)?;

            if hop.frame == FrameId::TOP {
                let point = Point::new(
                    point.x - shift.x - frame_offset.x,
                    point.y - shift.y - frame_offset.y,
                    Space::Viewport(FrameId::TOP),
                );
                if let Some(target) = blocked {
                    warn!(
                        "resolve:unreachable element={:?} blocked_by={:?} point=({:.1}, {:.1})",
                        element, target, point.x, point.y
                    );
                    return Err(ActionError::ScrollTargetUnreachable { element, point });
                }
                info!(
                    "resolve:done element={:?} adjustments={} point=({:.1}, {:.1})",
                    element,
                    adjustments.len(),
                    point.x,
                    point.y
                );
                return Ok(Resolution { point, adjustments });
            }

            let content = Point::new(
                point.x - shift.x,
                point.y - shift.y,
                Space::Document(hop.frame),
            );
            point = self.frames.to_parent_space(&*oracle, content, hop.frame)?;
        }

        Err(ActionError::InvalidArgument(
            "frame chain did not terminate at the top document".into(),
        ))
    }

    /// Projects the element's interaction point under the current scroll
    /// state without mutating any offset. Used for size/bounds queries; the
    /// returned point may lie outside the top viewport.
    pub fn interaction_point<O: GeometryOracle>(
        &self,
        oracle: &O,
        element: ElementId,
    ) -> Result<Point, ActionError> {
        let origin_frame = oracle.owning_frame(element)?;
        if origin_frame != self.frames.current() {
            return Err(ActionError::FrameContextMismatch(element));
        }

        let mut point = self.candidate_point(oracle, element)?;
        let hops = ancestry(oracle, element, origin_frame)?;
        for hop in &hops {
            let mut shift = ScrollOffset::ZERO;
            for region in &hop.regions {
                let target = ScrollRef::Container(*region);
                if oracle.overflow(target)?.clips() {
                    let offset = oracle.current_offset(target)?;
                    shift.x += offset.x;
                    shift.y += offset.y;
                }
            }
            let content = Point::new(
                point.x - shift.x,
                point.y - shift.y,
                Space::Document(hop.frame),
            );
            if hop.frame == FrameId::TOP {
                let scroll = oracle.current_offset(ScrollRef::Frame(FrameId::TOP))?;
                return Ok(Point::new(
                    content.x - scroll.x,
                    content.y - scroll.y,
                    Space::Viewport(FrameId::TOP),
                ));
            }
            point = self.frames.to_parent_space(oracle, content, hop.frame)?;
        }

        Err(ActionError::InvalidArgument(
            "frame chain did not terminate at the top document".into(),
        ))
    }

    /// Chooses the candidate interaction point in the element's document
    /// space: the centroid of the element's currently-visible area clipped
    /// to its bounding box, falling back to the box center when nothing is
    /// visible.
    fn candidate_point<O: GeometryOracle>(
        &self,
        oracle: &O,
        element: ElementId,
    ) -> Result<Point, ActionError> {
        let bounds = oracle.bounding_box(element)?;
        let origin_frame = oracle.owning_frame(element)?;
        let hops = ancestry(oracle, element, origin_frame)?;

        // Clip the box through every ancestor under current offsets while
        // accumulating the translation back into the element's document
        // space. Every transform is a pure translation, so one running
        // offset is enough.
        let mut visible = Some(bounds);
        let mut back = (0.0, 0.0);
        'clip: for hop in &hops {
            for region in &hop.regions {
                let target = ScrollRef::Container(*region);
                if !oracle.overflow(target)?.clips() {
                    continue;
                }
                let scroll = oracle.current_offset(target)?;
                let clip = oracle.region_bounds(target)?;
                visible = visible.and_then(|r| r.translate(-scroll.x, -scroll.y).intersect(&clip));
                back = (back.0 + scroll.x, back.1 + scroll.y);
                if visible.is_none() {
                    break 'clip;
                }
            }

            let boundary = ScrollRef::Frame(hop.frame);
            let scroll = oracle.current_offset(boundary)?;
            let clip = oracle.region_bounds(boundary)?;
            visible = visible.and_then(|r| r.translate(-scroll.x, -scroll.y).intersect(&clip));
            back = (back.0 + scroll.x, back.1 + scroll.y);
            if visible.is_none() || hop.frame == FrameId::TOP {
                break 'clip;
            }

            let parent = oracle.frame_parent(hop.frame)?.ok_or_else(|| {
                ActionError::InvalidArgument(format!("frame {:?} has no parent frame", hop.frame))
            })?;
            let embed = oracle.frame_viewport(hop.frame)?;
            visible = visible.map(|r| {
                r.translate(embed.left(), embed.top())
                    .with_space(Space::Document(parent))
            });
            back = (back.0 - embed.left(), back.1 - embed.top());
        }

        Ok(match visible {
            Some(area) => {
                let center = area.center();
                Point::new(
                    center.x + back.0,
                    center.y + back.1,
                    Space::Document(origin_frame),
                )
            }
            None => bounds.center(),
        })
    }
}

/// Builds the element's full ancestry, one hop per frame from the owning
/// frame to the top document.
fn ancestry<O: GeometryOracle>(
    oracle: &O,
    element: ElementId,
    origin_frame: FrameId,
) -> Result<Vec<Hop>, ActionError> {
    let mut hops = Vec::new();
    let mut frame = origin_frame;
    let mut regions = oracle.scrollable_ancestors(element)?;
    loop {
        if hops.len() >= MAX_FRAME_DEPTH {
            return Err(ActionError::InvalidArgument(format!(
                "frame chain exceeds {MAX_FRAME_DEPTH} levels"
            )));
        }
        hops.push(Hop { frame, regions });
        if frame == FrameId::TOP {
            return Ok(hops);
        }
        regions = oracle.frame_ancestors(frame)?;
        frame = oracle
            .frame_parent(frame)?
            .ok_or(ActionError::UnknownFrame(frame))?;
    }
}

/// Checks one scroll target against the point and scrolls it when permitted
/// and necessary. Returns the target's (possibly updated) offset so the
/// caller can extend its running shift.
fn adjust_target<O: GeometryOracle>(
    oracle: &mut O,
    target: ScrollRef,
    point: &Point,
    shift: ScrollOffset,
    adjustments: &mut Vec<ScrollAdjustment>,
    blocked: &mut Option<ScrollRef>,
) -> Result<ScrollOffset, ActionError> {
    let overflow = oracle.overflow(target)?;
    if !overflow.clips() {
        return Ok(ScrollOffset::ZERO);
    }

    let mut offset = oracle.current_offset(target)?;
    let bounds = oracle.region_bounds(target)?;
    let qx = point.x - shift.x;
    let qy = point.y - shift.y;

    if overflow.scrollable() {
        let max = oracle.max_offset(target)?;
        let wanted = ScrollOffset::new(
            nearest_edge(qx, bounds.left(), bounds.right(), offset.x),
            nearest_edge(qy, bounds.top(), bounds.bottom(), offset.y),
        )
        .clamp_to(max);
        if wanted != offset {
            debug!(
                "resolve:scroll target={:?} from=({:.1}, {:.1}) to=({:.1}, {:.1})",
                target, offset.x, offset.y, wanted.x, wanted.y
            );
            oracle.set_offset(target, wanted)?;
            let confirmed = oracle.current_offset(target)?;
            adjustments.push(ScrollAdjustment {
                target,
                from: offset,
                to: confirmed,
            });
            offset = confirmed;
        }
        // Clamping may leave the point clipped when the container has no
        // scroll room left.
        if !in_bounds(qx - offset.x, qy - offset.y, &bounds) && blocked.is_none() {
            *blocked = Some(target);
        }
    } else if !in_bounds(qx - offset.x, qy - offset.y, &bounds) && blocked.is_none() {
        debug!("resolve:clipped target={:?} point=({:.1}, {:.1})", target, qx, qy);
        *blocked = Some(target);
    }

    Ok(offset)
}

/// Minimal offset change bringing `q` to the nearest edge of `[lo, hi]`.
fn nearest_edge(q: f64, lo: f64, hi: f64, offset: f64) -> f64 {
    let rel = q - offset;
    if rel < lo {
        q - lo
    } else if rel > hi {
        q - hi
    } else {
        offset
    }
}

fn in_bounds(x: f64, y: f64, bounds: &Rect) -> bool {
    x >= bounds.left() && x <= bounds.right() && y >= bounds.top() && y <= bounds.bottom()
}
