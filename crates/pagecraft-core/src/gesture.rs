//! Drag and resize gestures.
//!
//! One pointer drives one gesture at a time: `Idle -> Active -> Idle`.
//! Every step writes through to the session at the active breakpoint, so
//! releasing only needs a final clamp and cancelling needs no revert.

use crate::breakpoint::Breakpoint;
use crate::element::{Element, ElementId};
use crate::layout;
use crate::session::EditorSession;
use crate::snap::{AlignTarget, Guides, align_to_targets, snap_to_grid, snap_value};
use crate::style::{StyleProperty, Styles};
use crate::units::px;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Which part of the element a resize drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    Corner(Corner),
    Edge(Edge),
}

impl ResizeHandle {
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::BottomLeft)
                | ResizeHandle::Edge(Edge::Left)
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopRight | Corner::BottomRight)
                | ResizeHandle::Edge(Edge::Right)
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::TopLeft | Corner::TopRight)
                | ResizeHandle::Edge(Edge::Top)
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeHandle::Corner(Corner::BottomLeft | Corner::BottomRight)
                | ResizeHandle::Edge(Edge::Bottom)
        )
    }
}

/// Kind of gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(ResizeHandle),
}

/// A gesture in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGesture {
    pub kind: GestureKind,
    pub element_id: ElementId,
    /// Breakpoint the gesture writes to.
    pub breakpoint: Breakpoint,
    /// Element bounds when the gesture began.
    pub origin: Rect,
    /// Pointer movement accumulated since the gesture began.
    pub delta: Vec2,
    /// Element bounds after the last step.
    pub current: Rect,
}

/// Gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Active(ActiveGesture),
}

/// Drives move and resize gestures against an [`EditorSession`].
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    state: GestureState,
    guides: Guides,
    measured_size: Option<Size>,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active(_))
    }

    /// The gesture in progress, if any.
    pub fn active(&self) -> Option<&ActiveGesture> {
        match &self.state {
            GestureState::Active(active) => Some(active),
            GestureState::Idle => None,
        }
    }

    /// Alignment guides from the last move step.
    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    /// Rendered size of the next element to be grabbed.
    ///
    /// Used for axes whose style value is not in pixels. Cleared when the
    /// gesture ends or the grab is refused.
    pub fn set_measured_size(&mut self, size: Option<Size>) {
        self.measured_size = size;
    }

    /// Start dragging an element. Returns `false` if the gesture is refused.
    pub fn begin_move(&mut self, session: &EditorSession, id: &str) -> bool {
        self.begin(session, id, GestureKind::Move)
    }

    /// Start resizing an element. Returns `false` if the gesture is refused.
    pub fn begin_resize(
        &mut self,
        session: &EditorSession,
        id: &str,
        handle: ResizeHandle,
    ) -> bool {
        self.begin(session, id, GestureKind::Resize(handle))
    }

    fn begin(&mut self, session: &EditorSession, id: &str, kind: GestureKind) -> bool {
        if self.is_active() {
            log::debug!("Ignoring {:?} on {}: another gesture is active", kind, id);
            self.measured_size = None;
            return false;
        }
        let Some(element) = session.element(id) else {
            log::debug!("Ignoring {:?}: unknown element {:?}", kind, id);
            self.measured_size = None;
            return false;
        };
        if !element.is_interactive() {
            log::debug!("Ignoring {:?} on {} {}", kind, element.kind.name(), id);
            self.measured_size = None;
            return false;
        }

        let breakpoint = session.breakpoint();
        let origin = self.bounds_of(session, element, breakpoint);
        log::debug!("Begin {:?} on {} at {:?}", kind, id, origin);

        self.guides.clear();
        self.state = GestureState::Active(ActiveGesture {
            kind,
            element_id: element.id.clone(),
            breakpoint,
            origin,
            delta: Vec2::ZERO,
            current: origin,
        });
        true
    }

    fn bounds_of(
        &self,
        session: &EditorSession,
        element: &Element,
        breakpoint: Breakpoint,
    ) -> Rect {
        let layout = layout::resolve(element, breakpoint);
        let fallback = session.config().fallback_element_size;
        let measured = self.measured_size.unwrap_or(fallback);
        let size = Size::new(
            layout.width_px().unwrap_or(measured.width),
            layout.height_px().unwrap_or(measured.height),
        );
        Rect::from_origin_size(layout.position, size)
    }

    /// Apply pointer movement since the previous step.
    ///
    /// Returns `false` when no gesture is active.
    pub fn step(&mut self, session: &mut EditorSession, delta: Vec2) -> bool {
        let GestureState::Active(active) = &mut self.state else {
            return false;
        };
        active.delta += delta;

        let current = match active.kind {
            GestureKind::Move => {
                let (origin, guides) = move_to(session, active);
                self.guides = guides;
                Rect::from_origin_size(origin, active.origin.size())
            }
            GestureKind::Resize(handle) => {
                self.guides.clear();
                resize_to(session, active, handle)
            }
        };

        if let Some(element) = session.element_mut(&active.element_id) {
            commit(element, active.kind, active.breakpoint, current);
        }
        active.current = current;
        true
    }

    /// Release the pointer.
    ///
    /// A move is clamped inside its container (the parent bar, or the
    /// canvas). Returns the id of the element that was manipulated.
    pub fn end(&mut self, session: &mut EditorSession) -> Option<ElementId> {
        let GestureState::Active(active) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.guides.clear();
        self.measured_size = None;

        if active.kind == GestureKind::Move {
            let container = container_size(session, &active);
            let size = active.current.size();
            let max_x = (container.width - size.width).max(0.0);
            let max_y = (container.height - size.height).max(0.0);
            let origin = active.current.origin();
            let clamped = Point::new(origin.x.clamp(0.0, max_x), origin.y.clamp(0.0, max_y));
            if clamped != origin {
                if let Some(element) = session.element_mut(&active.element_id) {
                    element.write_position(active.breakpoint, clamped);
                }
            }
        }

        log::debug!("End {:?} on {}", active.kind, active.element_id);
        Some(active.element_id)
    }

    /// Cancel the gesture. Steps already written to the session stay.
    pub fn abort(&mut self) -> bool {
        self.guides.clear();
        self.measured_size = None;
        match std::mem::take(&mut self.state) {
            GestureState::Active(active) => {
                log::debug!("Abort {:?} on {}", active.kind, active.element_id);
                true
            }
            GestureState::Idle => false,
        }
    }
}

/// The bar `element` is nested in. A missing or non-bar parent counts as
/// top level.
fn parent_bar<'a>(session: &'a EditorSession, element: &Element) -> Option<&'a Element> {
    element
        .parent_id()
        .and_then(|id| session.element(id))
        .filter(|parent| parent.is_bar())
}

fn scope_of<'a>(session: &'a EditorSession, element: &Element) -> Option<&'a str> {
    parent_bar(session, element).map(|bar| bar.id.as_str())
}

/// Other non-bar elements in the same parent scope, at `breakpoint`.
fn align_targets(
    session: &EditorSession,
    dragged: &str,
    breakpoint: Breakpoint,
) -> Vec<AlignTarget> {
    let scope = session.element(dragged).and_then(|el| scope_of(session, el));
    session
        .elements()
        .iter()
        .filter(|el| el.id != dragged && !el.is_bar() && scope_of(session, el) == scope)
        .map(|el| {
            let layout = layout::resolve(el, breakpoint);
            AlignTarget {
                origin: layout.position,
                width: layout.width_px(),
                height: layout.height_px(),
            }
        })
        .collect()
}

fn move_to(session: &EditorSession, active: &ActiveGesture) -> (Point, Guides) {
    let config = session.config();
    let mut origin = active.origin.origin() + active.delta;

    if config.snap_mode.snaps_to_grid() {
        origin = snap_to_grid(origin, config.grid_size).point;
    }

    if !config.snap_mode.snaps_to_elements() {
        return (origin, Guides::default());
    }

    let targets = align_targets(session, &active.element_id, active.breakpoint);
    let aligned = align_to_targets(
        origin,
        active.origin.size(),
        Some(active.breakpoint.preview_width()),
        &targets,
        config.snap_threshold,
    );
    (aligned.origin, aligned.guides)
}

fn resize_to(session: &EditorSession, active: &ActiveGesture, handle: ResizeHandle) -> Rect {
    let config = session.config();
    let grid = |v: f64| {
        if config.snap_mode.snaps_to_grid() {
            snap_value(v, config.grid_size)
        } else {
            v
        }
    };
    let canvas_width = active.breakpoint.preview_width();
    let page_height = session.page_height();
    let min = config.min_element_size;
    let o = active.origin;
    let d = active.delta;

    let mut r = o;
    if handle.moves_left() {
        r.x0 = grid(o.x0 + d.x).max(0.0).min(r.x1 - min);
    }
    if handle.moves_right() {
        r.x1 = grid(o.x1 + d.x).min(canvas_width).max(r.x0 + min);
    }
    if handle.moves_top() {
        r.y0 = grid(o.y0 + d.y).max(0.0).min(r.y1 - min);
    }
    if handle.moves_bottom() {
        r.y1 = grid(o.y1 + d.y).min(page_height).max(r.y0 + min);
    }
    r
}

fn container_size(session: &EditorSession, active: &ActiveGesture) -> Size {
    let canvas = Size::new(active.breakpoint.preview_width(), session.page_height());
    let parent = session
        .element(&active.element_id)
        .and_then(|el| parent_bar(session, el));
    match parent {
        Some(bar) => {
            let layout = layout::resolve(bar, active.breakpoint);
            Size::new(canvas.width, layout.height_px().unwrap_or(canvas.height))
        }
        None => canvas,
    }
}

fn commit(element: &mut Element, kind: GestureKind, breakpoint: Breakpoint, rect: Rect) {
    element.write_position(breakpoint, rect.origin());
    if let GestureKind::Resize(_) = kind {
        let styles = Styles::new()
            .with(StyleProperty::Width, px(rect.width()))
            .with(StyleProperty::Height, px(rect.height()));
        element.write_styles(breakpoint, &styles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use crate::snap::SnapMode;
    use crate::config::EditorConfig;

    fn session_with(positions: &[(f64, f64)]) -> EditorSession {
        let mut session = EditorSession::default();
        for &(x, y) in positions {
            let id = session.add_element(ElementKind::Container);
            session.element_mut(&id).unwrap().position = Point::new(x, y);
        }
        session
    }

    fn position(session: &EditorSession, id: &str) -> Point {
        session.effective_layout(id).unwrap().position
    }

    #[test]
    fn test_move_snaps_to_grid() {
        let mut session = session_with(&[(20.0, 20.0)]);
        let mut gestures = GestureController::new();

        assert!(gestures.begin_move(&session, "c1"));
        gestures.step(&mut session, Vec2::new(13.0, 26.0));
        assert_eq!(position(&session, "c1"), Point::new(30.0, 50.0));
        assert_eq!(gestures.end(&mut session), Some("c1".to_string()));
        assert!(!gestures.is_active());
    }

    #[test]
    fn test_move_aligns_with_other_element() {
        let mut config = EditorConfig::default();
        config.snap_mode = SnapMode::Elements;
        let mut session = EditorSession::new(config);
        let a = session.add_element(ElementKind::Container);
        let b = session.add_element(ElementKind::Container);
        session.element_mut(&a).unwrap().position = Point::new(0.0, 300.0);
        session.element_mut(&b).unwrap().position = Point::new(400.0, 100.0);

        let mut gestures = GestureController::new();
        gestures.begin_move(&session, &a);
        gestures.step(&mut session, Vec2::new(0.0, -196.0));
        assert_eq!(position(&session, &a), Point::new(0.0, 100.0));
        assert_eq!(gestures.guides().horizontal, vec![100.0, 130.0]);

        gestures.step(&mut session, Vec2::new(0.0, -2.0));
        assert_eq!(position(&session, &a), Point::new(0.0, 100.0));

        gestures.end(&mut session);
        assert!(gestures.guides().is_empty());
    }

    #[test]
    fn test_orphaned_child_aligns_with_top_level() {
        let mut config = EditorConfig::default();
        config.snap_mode = SnapMode::Elements;
        let mut session = EditorSession::new(config);
        let header = session.add_element(ElementKind::Header);
        let a = session.add_element(ElementKind::Container);
        let b = session.add_element(ElementKind::Container);
        session.element_mut(&a).unwrap().position = Point::new(400.0, 100.0);
        session.element_mut(&b).unwrap().position = Point::new(0.0, 300.0);
        session.set_parent(&b, Some(header.as_str())).unwrap();
        session.remove_element(&header);

        let mut gestures = GestureController::new();
        assert!(gestures.begin_move(&session, &b));
        gestures.step(&mut session, Vec2::new(0.0, -196.0));
        assert_eq!(position(&session, &b), Point::new(0.0, 100.0));
        assert!(gestures.guides().horizontal.contains(&100.0));
    }

    #[test]
    fn test_refused_grab_drops_measured_size() {
        let mut session = EditorSession::default();
        let header = session.add_element(ElementKind::Header);
        let text = session.add_element(ElementKind::Text);
        let mut gestures = GestureController::new();

        gestures.set_measured_size(Some(Size::new(0.0, 24.0)));
        assert!(!gestures.begin_move(&session, &header));
        assert!(gestures.begin_move(&session, &text));
        // Auto height falls back to the configured size, not the stale 24px.
        let fallback = session.config().fallback_element_size;
        assert_eq!(gestures.active().unwrap().origin.height(), fallback.height);
    }

    #[test]
    fn test_bars_are_not_targets() {
        let mut config = EditorConfig::default();
        config.snap_mode = SnapMode::Elements;
        let mut session = EditorSession::new(config);
        let text = session.add_element(ElementKind::Container);
        session.add_element(ElementKind::Header);
        session.element_mut(&text).unwrap().position = Point::new(300.0, 300.0);

        let mut gestures = GestureController::new();
        gestures.begin_move(&session, &text);
        // Header top is 0; landing at y=3 must not snap to it.
        gestures.step(&mut session, Vec2::new(0.0, -297.0));
        assert_eq!(position(&session, &text).y, 3.0);
        assert!(gestures.guides().horizontal.is_empty());
    }

    #[test]
    fn test_refuses_bars_and_unknown() {
        let mut session = EditorSession::default();
        let header = session.add_element(ElementKind::Header);
        let text = session.add_element(ElementKind::Text);
        let mut gestures = GestureController::new();

        assert!(!gestures.begin_move(&session, &header));
        assert!(!gestures.begin_resize(&session, &header, ResizeHandle::Edge(Edge::Right)));
        assert!(!gestures.begin_move(&session, "missing"));
        assert!(!gestures.begin_move(&session, ""));
        assert!(!gestures.is_active());
        assert!(!gestures.step(&mut session, Vec2::new(10.0, 10.0)));

        assert!(gestures.begin_move(&session, &text));
        assert!(!gestures.begin_move(&session, &text));
    }

    #[test]
    fn test_move_at_breakpoint_writes_override() {
        let mut session = session_with(&[(200.0, 100.0)]);
        session
            .update_styles("c1", &Styles::new().with(StyleProperty::Color, "red"))
            .unwrap();
        session.set_breakpoint(Breakpoint::Tablet);
        session
            .update_styles("c1", &Styles::new().with(StyleProperty::Background, "blue"))
            .unwrap();

        let mut gestures = GestureController::new();
        gestures.begin_move(&session, "c1");
        gestures.step(&mut session, Vec2::new(0.0, 40.0));
        gestures.end(&mut session);

        let el = session.element("c1").unwrap();
        assert_eq!(el.position, Point::new(200.0, 100.0));
        let over = el.responsive.get(Breakpoint::Tablet).unwrap();
        assert_eq!(over.position, Some(Point::new(200.0, 140.0)));
        assert_eq!(over.styles.get(StyleProperty::Background), Some("blue"));
    }

    #[test]
    fn test_end_clamps_into_canvas() {
        let mut session = session_with(&[(20.0, 20.0)]);
        let mut gestures = GestureController::new();
        gestures.begin_move(&session, "c1");
        gestures.step(&mut session, Vec2::new(-100.0, 2000.0));
        gestures.end(&mut session);

        // 160x60 element on a 1280x640 canvas.
        assert_eq!(position(&session, "c1"), Point::new(0.0, 580.0));
    }

    #[test]
    fn test_end_clamps_into_parent_bar() {
        let mut session = EditorSession::default();
        let header = session.add_element(ElementKind::Header);
        let button = session.add_element(ElementKind::Button);
        session.set_parent(&button, Some(header.as_str())).unwrap();

        let mut gestures = GestureController::new();
        gestures.begin_move(&session, &button);
        gestures.step(&mut session, Vec2::new(0.0, 300.0));
        gestures.end(&mut session);

        // Header is 80px tall, button 60px.
        assert_eq!(position(&session, &button).y, 20.0);
    }

    #[test]
    fn test_abort_keeps_written_steps() {
        let mut session = session_with(&[(20.0, 20.0)]);
        let mut gestures = GestureController::new();
        gestures.begin_move(&session, "c1");
        gestures.step(&mut session, Vec2::new(100.0, 0.0));

        assert!(gestures.abort());
        assert!(!gestures.is_active());
        assert!(gestures.guides().is_empty());
        assert_eq!(position(&session, "c1").x, 120.0);
        assert!(!gestures.abort());
    }

    #[test]
    fn test_resize_bottom_right() {
        let mut session = session_with(&[(100.0, 100.0)]);
        let mut gestures = GestureController::new();
        gestures.begin_resize(&session, "c1", ResizeHandle::Corner(Corner::BottomRight));
        gestures.step(&mut session, Vec2::new(42.0, 17.0));
        gestures.end(&mut session);

        let el = session.element("c1").unwrap();
        assert_eq!(el.position, Point::new(100.0, 100.0));
        assert_eq!(el.styles.get(StyleProperty::Width), Some("200px"));
        assert_eq!(el.styles.get(StyleProperty::Height), Some("80px"));
    }

    #[test]
    fn test_resize_left_edge_keeps_right_fixed() {
        let mut session = session_with(&[(100.0, 100.0)]);
        let mut gestures = GestureController::new();
        gestures.begin_resize(&session, "c1", ResizeHandle::Edge(Edge::Left));
        gestures.step(&mut session, Vec2::new(-30.0, 50.0));

        let el = session.element("c1").unwrap();
        assert_eq!(el.position, Point::new(70.0, 100.0));
        assert_eq!(el.styles.get(StyleProperty::Width), Some("190px"));
        assert_eq!(el.styles.get(StyleProperty::Height), Some("60px"));
    }

    #[test]
    fn test_resize_minimum_size() {
        let mut session = session_with(&[(100.0, 100.0)]);
        let mut gestures = GestureController::new();
        gestures.begin_resize(&session, "c1", ResizeHandle::Corner(Corner::TopLeft));
        gestures.step(&mut session, Vec2::new(500.0, 500.0));

        let el = session.element("c1").unwrap();
        // Right edge 260, bottom edge 160 stay put.
        assert_eq!(el.position, Point::new(240.0, 140.0));
        assert_eq!(el.styles.get(StyleProperty::Width), Some("20px"));
        assert_eq!(el.styles.get(StyleProperty::Height), Some("20px"));
    }

    #[test]
    fn test_resize_clamped_to_canvas() {
        let mut session = session_with(&[(1200.0, 600.0)]);
        let mut gestures = GestureController::new();
        gestures.begin_resize(&session, "c1", ResizeHandle::Corner(Corner::BottomRight));
        gestures.step(&mut session, Vec2::new(400.0, 400.0));

        let el = session.element("c1").unwrap();
        assert_eq!(el.styles.get(StyleProperty::Width), Some("80px"));
        assert_eq!(el.styles.get(StyleProperty::Height), Some("40px"));
    }

    #[test]
    fn test_resize_at_breakpoint_preserves_override() {
        let mut session = session_with(&[(100.0, 100.0)]);
        session.set_breakpoint(Breakpoint::Mobile);
        session
            .update_styles("c1", &Styles::new().with(StyleProperty::Color, "red"))
            .unwrap();

        let mut gestures = GestureController::new();
        gestures.begin_resize(&session, "c1", ResizeHandle::Edge(Edge::Bottom));
        gestures.step(&mut session, Vec2::new(0.0, 40.0));
        gestures.end(&mut session);

        let el = session.element("c1").unwrap();
        assert_eq!(el.styles.get(StyleProperty::Height), Some("60px"));
        let over = el.responsive.get(Breakpoint::Mobile).unwrap();
        assert_eq!(over.styles.get(StyleProperty::Height), Some("100px"));
        assert_eq!(over.styles.get(StyleProperty::Color), Some("red"));
        assert_eq!(over.position, Some(Point::new(100.0, 100.0)));
    }

    #[test]
    fn test_measured_size_for_auto_height() {
        let mut session = EditorSession::default();
        let text = session.add_element(ElementKind::Text);
        let mut gestures = GestureController::new();

        gestures.set_measured_size(Some(Size::new(0.0, 24.0)));
        gestures.begin_move(&session, &text);
        let active = gestures.active().unwrap();
        assert_eq!(active.origin, Rect::new(20.0, 20.0, 180.0, 44.0));
    }

    #[test]
    fn test_handle_edges() {
        let h = ResizeHandle::Corner(Corner::TopRight);
        assert!(h.moves_top() && h.moves_right());
        assert!(!h.moves_left() && !h.moves_bottom());
        let e = ResizeHandle::Edge(Edge::Left);
        assert!(e.moves_left());
        assert!(!e.moves_top() && !e.moves_right() && !e.moves_bottom());
    }
}
