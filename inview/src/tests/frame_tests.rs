use super::init_tracing;
use crate::{
    ActionError, FrameId, FrameStack, GeometryOracle, Overflow, PageModel, Point, ScrollOffset,
    ScrollRef, Session, Space,
};

#[test]
fn translation_composes_across_two_levels() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 600.0));
    let f1 = page.add_frame(
        FrameId::TOP,
        None,
        (100.0, 100.0, 400.0, 300.0),
        (400.0, 900.0),
        Overflow::Scroll,
    );
    let f2 = page.add_frame(f1, None, (50.0, 50.0, 200.0, 150.0), (200.0, 600.0), Overflow::Scroll);
    page.set_offset(ScrollRef::Frame(f1), ScrollOffset::new(0.0, 20.0)).unwrap();
    page.set_offset(ScrollRef::Frame(f2), ScrollOffset::new(0.0, 30.0)).unwrap();

    let mut stack = FrameStack::new();
    assert_eq!(stack.current(), FrameId::TOP);
    stack.enter(&page, f1).unwrap();
    stack.enter(&page, f2).unwrap();
    assert_eq!(stack.current(), f2);
    assert_eq!(stack.depth(), 3);

    let point = Point::new(10.0, 40.0, Space::Document(f2));
    let in_f1 = stack.to_parent_space(&page, point, f2).unwrap();
    assert_eq!((in_f1.x, in_f1.y), (60.0, 60.0));
    assert_eq!(in_f1.space, Space::Document(f1));

    let in_top = stack.to_parent_space(&page, in_f1, f1).unwrap();
    assert_eq!((in_top.x, in_top.y), (160.0, 140.0));
    assert_eq!(in_top.space, Space::Document(FrameId::TOP));

    stack.exit_to_top();
    assert_eq!(stack.current(), FrameId::TOP);
    assert_eq!(stack.depth(), 1);

    // f2 is not a child of the top document.
    assert!(matches!(
        stack.enter(&page, f2),
        Err(ActionError::InvalidArgument(_))
    ));
}

#[test]
fn frame_out_of_view_scrolls_the_parent_document() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 1300.0));
    let frame = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 900.0, 400.0, 300.0),
        (400.0, 300.0),
        Overflow::Scroll,
    );
    let checkbox = page.add_element(frame, None, (50.0, 50.0, 20.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(frame).unwrap();
    let result = session.click(checkbox).unwrap();

    let targets: Vec<_> = result.adjustments.iter().map(|a| a.target).collect();
    assert_eq!(targets, vec![ScrollRef::Frame(FrameId::TOP)]);
    assert_eq!(result.adjustments[0].to, ScrollOffset::new(0.0, 360.0));
    assert_eq!((result.point.x, result.point.y), (60.0, 600.0));
}

#[test]
fn scrolling_frame_scrolls_its_own_document() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 600.0));
    let frame = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 0.0, 400.0, 200.0),
        (400.0, 800.0),
        Overflow::Scroll,
    );
    let checkbox = page.add_element(frame, None, (50.0, 600.0, 20.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(frame).unwrap();
    let result = session.click(checkbox).unwrap();

    let targets: Vec<_> = result.adjustments.iter().map(|a| a.target).collect();
    assert_eq!(targets, vec![ScrollRef::Frame(frame)]);
    assert_eq!(result.adjustments[0].to, ScrollOffset::new(0.0, 410.0));
    assert_eq!((result.point.x, result.point.y), (60.0, 200.0));
}

#[test]
fn nested_frames_resolve_inner_before_outer() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 1400.0));
    let outer = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 700.0, 400.0, 400.0),
        (400.0, 900.0),
        Overflow::Scroll,
    );
    let inner = page.add_frame(
        outer,
        None,
        (0.0, 500.0, 300.0, 200.0),
        (300.0, 700.0),
        Overflow::Scroll,
    );
    let checkbox = page.add_element(inner, None, (40.0, 600.0, 20.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(outer).unwrap();
    session.enter_frame(inner).unwrap();
    let result = session.click(checkbox).unwrap();

    let targets: Vec<_> = result.adjustments.iter().map(|a| a.target).collect();
    assert_eq!(
        targets,
        vec![
            ScrollRef::Frame(inner),
            ScrollRef::Frame(outer),
            ScrollRef::Frame(FrameId::TOP),
        ]
    );
    assert_eq!(result.adjustments[0].to, ScrollOffset::new(0.0, 410.0));
    assert_eq!(result.adjustments[1].to, ScrollOffset::new(0.0, 300.0));
    assert_eq!(result.adjustments[2].to, ScrollOffset::new(0.0, 500.0));
    assert_eq!((result.point.x, result.point.y), (50.0, 600.0));
    assert_eq!(result.point.space, Space::Viewport(FrameId::TOP));
}

#[test]
fn non_scrollable_frame_fails_without_dispatch() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 600.0));
    let frame = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 0.0, 400.0, 200.0),
        (400.0, 800.0),
        Overflow::Hidden,
    );
    let checkbox = page.add_element(frame, None, (50.0, 600.0, 20.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(frame).unwrap();
    let error = session.click(checkbox).unwrap_err();

    match error {
        ActionError::ScrollTargetUnreachable { element, point } => {
            assert_eq!(element, checkbox);
            assert_eq!((point.x, point.y), (60.0, 610.0));
        }
        other => panic!("expected ScrollTargetUnreachable, got {other:?}"),
    }
    assert!(session.driver().events().is_empty());
    // The frame itself was never scrolled.
    let offset = session.driver().current_offset(ScrollRef::Frame(frame)).unwrap();
    assert_eq!(offset, ScrollOffset::ZERO);
}

#[test]
fn tall_frame_scrolls_only_the_parent() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 1200.0));
    let frame = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 100.0, 600.0, 900.0),
        (600.0, 900.0),
        Overflow::Scroll,
    );
    let checkbox = page.add_element(frame, None, (50.0, 800.0, 20.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(frame).unwrap();
    let result = session.click(checkbox).unwrap();

    let targets: Vec<_> = result.adjustments.iter().map(|a| a.target).collect();
    assert_eq!(targets, vec![ScrollRef::Frame(FrameId::TOP)]);
    assert_eq!((result.point.x, result.point.y), (60.0, 600.0));
}

#[test]
fn container_inside_frame_resolves_before_outer_document() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 1000.0));
    let frame = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 550.0, 400.0, 300.0),
        (400.0, 400.0),
        Overflow::Scroll,
    );
    let pane = page.add_region(
        frame,
        None,
        (0.0, 0.0, 300.0, 100.0),
        (300.0, 500.0),
        Overflow::Scroll,
    );
    let element = page.add_element(frame, Some(pane), (10.0, 300.0, 50.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(frame).unwrap();
    let result = session.click(element).unwrap();

    let targets: Vec<_> = result.adjustments.iter().map(|a| a.target).collect();
    assert_eq!(
        targets,
        vec![ScrollRef::Container(pane), ScrollRef::Frame(FrameId::TOP)]
    );
    assert_eq!((result.point.x, result.point.y), (35.0, 600.0));
}

#[test]
fn frame_embedded_in_overflow_container_scrolls_that_container() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 600.0));
    let pane = page.add_region(
        FrameId::TOP,
        None,
        (0.0, 0.0, 300.0, 200.0),
        (300.0, 800.0),
        Overflow::Scroll,
    );
    let frame = page.add_frame(
        FrameId::TOP,
        Some(pane),
        (0.0, 500.0, 280.0, 150.0),
        (280.0, 150.0),
        Overflow::Scroll,
    );
    let element = page.add_element(frame, None, (20.0, 20.0, 40.0, 20.0));
    let mut session = Session::new(page);

    session.enter_frame(frame).unwrap();
    let result = session.click(element).unwrap();

    let targets: Vec<_> = result.adjustments.iter().map(|a| a.target).collect();
    assert_eq!(targets, vec![ScrollRef::Container(pane)]);
    assert_eq!(result.adjustments[0].to, ScrollOffset::new(0.0, 330.0));
    assert_eq!((result.point.x, result.point.y), (40.0, 200.0));
}

#[test]
fn element_outside_active_frame_context_is_rejected() {
    init_tracing();
    let mut page = PageModel::new((800.0, 600.0), (800.0, 600.0));
    let frame = page.add_frame(
        FrameId::TOP,
        None,
        (0.0, 0.0, 400.0, 200.0),
        (400.0, 400.0),
        Overflow::Scroll,
    );
    let framed = page.add_element(frame, None, (10.0, 10.0, 20.0, 20.0));
    let mut session = Session::new(page);

    // Still at the top document; the framed element is not addressable.
    assert_eq!(
        session.click(framed).unwrap_err(),
        ActionError::FrameContextMismatch(framed)
    );
    assert!(session.driver().events().is_empty());
}
