use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

use crate::coords::{Coord, Point, Rect, Size};
use crate::tiler::{RefreshSink, SinkId};

use super::node::{Body, Node};
use super::{ObjectId, Scene, Sprite, menu};

/// Borrowed view of one scene object.
///
/// All accessors are derived from the object's rect and have no side effects.
#[derive(Debug, Copy, Clone)]
pub struct ObjectRef<'a, K> {
    id: ObjectId,
    node: &'a Node<K>,
}

impl<'a, K> ObjectRef<'a, K> {
    #[inline]
    pub(crate) fn new(id: ObjectId, node: &'a Node<K>) -> Self {
        Self { id, node }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Area occupied by the object, world coordinates.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.node.rect
    }

    /// Top-left corner.
    #[inline]
    pub fn position(&self) -> Point {
        self.node.rect.p1()
    }

    #[inline]
    pub fn x(&self) -> Coord {
        self.node.rect.p1().x
    }

    #[inline]
    pub fn y(&self) -> Coord {
        self.node.rect.p1().y
    }

    #[inline]
    pub fn width(&self) -> Coord {
        self.node.rect.width()
    }

    #[inline]
    pub fn height(&self) -> Coord {
        self.node.rect.height()
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.node.rect.size()
    }

    /// Top-center point.
    #[inline]
    pub fn top(&self) -> Point {
        self.node.rect.top()
    }

    /// Bottom-center point.
    #[inline]
    pub fn bottom(&self) -> Point {
        self.node.rect.bottom()
    }

    /// Left-center point.
    #[inline]
    pub fn left(&self) -> Point {
        self.node.rect.left()
    }

    /// Right-center point.
    #[inline]
    pub fn right(&self) -> Point {
        self.node.rect.right()
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.node.rect.center()
    }

    /// Sink the object currently reports to; `None` while detached.
    #[inline]
    pub fn sink(&self) -> Option<SinkId> {
        self.node.sink
    }

    /// List whose chain links this object.
    #[inline]
    pub fn parent(&self) -> Option<ObjectId> {
        self.node.parent
    }

    /// Leaf payload; `None` for lists and menus.
    #[inline]
    pub fn kind(&self) -> Option<&'a K> {
        match &self.node.body {
            Body::Leaf(kind) => Some(kind),
            _ => None,
        }
    }

    /// Lists and menus hold member chains.
    #[inline]
    pub fn is_list(&self) -> bool {
        self.node.body.chain().is_some()
    }

    #[inline]
    pub fn is_menu(&self) -> bool {
        matches!(self.node.body, Body::Menu(..))
    }
}

impl<K: Sprite, S: RefreshSink, const N: usize, const M: usize> Scene<K, S, N, M> {
    // ── geometry without refresh ──────────────────────────────────────────

    /// Moves the top-left corner to `pos`, keeping the size. Marks nothing
    /// dirty; use [`move_to`](Self::move_to) for on-screen objects.
    pub fn set_pos(&mut self, id: ObjectId, pos: Point) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.rect = node.rect.with_pos(pos);
        if matches!(node.body, Body::Menu(..)) {
            self.layout_menu(id);
        }
        true
    }

    /// Resizes in place (top-left fixed). Components below 1 are clamped to 1.
    /// Marks nothing dirty; use [`resize`](Self::resize) for on-screen objects.
    pub fn set_size(&mut self, id: ObjectId, size: Size) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.rect = node.rect.with_size(size);
        if let Body::Menu(_, state) = &mut node.body {
            state.layout = state.layout.resized(node.rect.size());
            self.layout_menu(id);
        }
        true
    }

    // ── refresh-safe geometry ─────────────────────────────────────────────

    /// Moves the object to `pos`, marking both the vacated and the newly
    /// covered area dirty.
    pub fn move_to(&mut self, id: ObjectId, pos: Point) -> bool {
        if !self.contains(id) {
            return false;
        }
        log::trace!("move {:?} to {:?}", id, pos);
        self.refresh(id);
        self.set_pos(id, pos);
        self.refresh(id);
        true
    }

    /// Moves the object by `delta`; see [`move_to`](Self::move_to).
    pub fn move_by(&mut self, id: ObjectId, delta: Point) -> bool {
        match self.node(id) {
            Some(node) => {
                let pos = node.rect.p1() + delta;
                self.move_to(id, pos)
            }
            None => false,
        }
    }

    /// Resizes the object, marking the old and new areas dirty.
    pub fn resize(&mut self, id: ObjectId, size: Size) -> bool {
        if !self.contains(id) {
            return false;
        }
        log::trace!("resize {:?} to {:?}", id, size);
        self.refresh(id);
        self.set_size(id, size);
        self.refresh(id);
        true
    }

    // ── frame hooks ───────────────────────────────────────────────────────

    /// Marks the object's current area dirty in its sink.
    ///
    /// For lists this re-propagates the list's sink to every member first and
    /// then refreshes each member, so a list's sink is the single source of
    /// truth for everything below it. Detached objects are skipped silently.
    pub fn refresh(&mut self, id: ObjectId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let (rect, sink) = (node.rect, node.sink);
        let is_menu = matches!(node.body, Body::Menu(..));
        let is_list = node.body.chain().is_some();

        if is_menu || !is_list {
            self.mark(sink, rect);
        }
        if is_list {
            let mut cur = self.next(id, None);
            while let Some(member) = cur {
                if let Some(m) = self.node_mut(member) {
                    m.sink = sink;
                }
                self.refresh(member);
                cur = self.next(id, Some(member));
            }
        }
        true
    }

    /// Advances the object one frame.
    ///
    /// Leaves run [`Sprite::update`]; when that changes their rect, the old
    /// and the new area are both marked dirty. Lists update their members in
    /// chain order.
    pub fn update(&mut self, id: ObjectId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let sink = node.sink;
        let before = node.rect;
        let is_list = node.body.chain().is_some();

        if let Body::Leaf(kind) = &mut node.body {
            let mut after = before;
            kind.update(&mut after);
            if after != before {
                node.rect = after;
                log::trace!("update moved {:?}: {:?} -> {:?}", id, before, after);
                self.mark(sink, before);
                self.mark(sink, after);
            }
        }

        if is_list {
            let mut cur = self.next(id, None);
            while let Some(member) = cur {
                self.update(member);
                cur = self.next(id, Some(member));
            }
        }
        true
    }

    /// Draws the object into `target`.
    ///
    /// `area` is the world region being redrawn (typically one dirty tile);
    /// leaves that do not overlap it are skipped. Lists draw their members in
    /// chain order, so later members paint over earlier ones.
    pub fn draw<D>(&self, id: ObjectId, target: &mut D, area: Rect) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        match &node.body {
            Body::Leaf(kind) => {
                if node.rect.overlaps(&area) {
                    kind.draw(node.rect, target)?;
                }
                return Ok(());
            }
            Body::Menu(..) => {
                if node.rect.overlaps(&area) {
                    menu::draw_frame(node.rect, target)?;
                }
            }
            Body::List(_) => {}
        }

        let mut cur = self.next(id, None);
        while let Some(member) = cur {
            self.draw(member, target, area)?;
            cur = self.next(id, Some(member));
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn mark(&mut self, sink: Option<SinkId>, rect: Rect) {
        if let Some(s) = sink.and_then(|s| self.sinks.get_mut(s.index())) {
            s.mark_dirty(rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::vec;

    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::scene::testing::{DirtyLog, Probe};

    type TestScene = Scene<Probe, DirtyLog, 8, 2>;

    fn r(x1: Coord, y1: Coord, x2: Coord, y2: Coord) -> Rect {
        Rect::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    fn scene() -> TestScene {
        Scene::new([DirtyLog::default(), DirtyLog::default()])
    }

    fn log(s: &TestScene) -> &[Rect] {
        &s.sink(SinkId::PRIMARY).unwrap().rects
    }

    /// Scene with a root list on the primary sink holding one 10x10 object.
    fn attached() -> (TestScene, ObjectId, ObjectId) {
        let mut s = scene();
        let root = s.create_list(Point::zero()).unwrap();
        s.attach(root, Some(SinkId::PRIMARY));
        let o = s
            .create(Point::new(0, 0), Size::new(10, 10), Probe::default())
            .unwrap();
        assert!(s.add(root, o));
        s.sink_mut(SinkId::PRIMARY).unwrap().rects.clear();
        (s, root, o)
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn set_pos_preserves_size_and_marks_nothing() {
        let (mut s, _, o) = attached();
        assert!(s.set_pos(o, Point::new(-4, 20)));
        let obj = s.get(o).unwrap();
        assert_eq!(obj.position(), Point::new(-4, 20));
        assert_eq!(obj.size(), Size::new(10, 10));
        assert!(log(&s).is_empty());
    }

    #[test]
    fn set_size_keeps_top_left_and_clamps() {
        let (mut s, _, o) = attached();
        s.set_pos(o, Point::new(3, 3));
        assert!(s.set_size(o, Size::new(0, -3)));
        let obj = s.get(o).unwrap();
        assert_eq!(obj.position(), Point::new(3, 3));
        assert_eq!((obj.width(), obj.height()), (1, 1));
        assert!(log(&s).is_empty());
    }

    #[test]
    fn move_to_coordinate_limit_and_back_keeps_size() {
        let (mut s, _, o) = attached();
        assert!(s.move_to(o, Point::new(Coord::MAX - 2, 0)));
        assert_eq!(s.get(o).unwrap().size(), Size::new(10, 10));
        assert_eq!(s.get(o).unwrap().rect().p2().x, Coord::MAX);
        assert!(s.move_to(o, Point::zero()));
        assert_eq!(s.get(o).unwrap().rect(), r(0, 0, 9, 9));
    }

    #[test]
    fn anchors_follow_rect() {
        let (s, _, o) = attached();
        let obj = s.get(o).unwrap();
        assert_eq!(obj.center(), Point::new(4, 4));
        assert_eq!(obj.top(), Point::new(4, 0));
        assert_eq!(obj.bottom(), Point::new(4, 9));
        assert_eq!(obj.left(), Point::new(0, 4));
        assert_eq!(obj.right(), Point::new(9, 4));
    }

    // ── refresh propagation ───────────────────────────────────────────────

    #[test]
    fn move_by_marks_old_and_new_area() {
        let (mut s, _, o) = attached();
        assert!(s.move_by(o, Point::new(5, 0)));

        let obj = s.get(o).unwrap();
        assert_eq!(obj.position(), Point::new(5, 0));
        assert_eq!(obj.size(), Size::new(10, 10));
        assert_eq!(log(&s), &[r(0, 0, 9, 9), r(5, 0, 14, 9)]);
    }

    #[test]
    fn move_to_covers_union_of_disjoint_areas() {
        let (mut s, _, o) = attached();
        s.move_to(o, Point::new(40, 40));
        let sink = s.sink(SinkId::PRIMARY).unwrap();
        assert!(sink.rects.len() >= 2);
        assert!(sink.covers(r(0, 0, 9, 9)));
        assert!(sink.covers(r(40, 40, 49, 49)));
    }

    #[test]
    fn resize_marks_old_and_new_area() {
        let (mut s, _, o) = attached();
        assert!(s.resize(o, Size::new(20, 5)));
        assert_eq!(log(&s), &[r(0, 0, 9, 9), r(0, 0, 19, 4)]);
    }

    #[test]
    fn detached_object_moves_silently() {
        let mut s = scene();
        let o = s
            .create(Point::zero(), Size::new(4, 4), Probe::default())
            .unwrap();
        assert!(s.move_by(o, Point::new(1, 1)));
        assert!(s.refresh(o));
        assert_eq!(s.get(o).unwrap().position(), Point::new(1, 1));
        assert!(log(&s).is_empty());
    }

    #[test]
    fn stale_id_is_rejected() {
        let (mut s, root, o) = attached();
        s.destroy(o).unwrap();
        assert!(!s.move_to(o, Point::zero()));
        assert!(!s.set_size(o, Size::MIN));
        assert!(!s.refresh(o));
        assert!(s.get(o).is_none());
        assert!(!s.has(root, o));
    }

    #[test]
    fn list_refresh_fans_out_new_sink() {
        let (mut s, root, o) = attached();
        s.attach(root, Some(SinkId(1)));
        s.refresh(root);
        assert_eq!(s.get(o).unwrap().sink(), Some(SinkId(1)));
        assert!(log(&s).is_empty());
        assert_eq!(s.sink(SinkId(1)).unwrap().rects, vec![r(0, 0, 9, 9)]);
    }

    #[test]
    fn nested_list_refresh_recurses() {
        let (mut s, root, _) = attached();
        let inner = s.create_list(Point::zero()).unwrap();
        let leaf = s
            .create(Point::new(20, 0), Size::new(2, 2), Probe::default())
            .unwrap();
        s.add(inner, leaf);
        s.add(root, inner);
        assert_eq!(s.get(leaf).unwrap().sink(), Some(SinkId::PRIMARY));
        assert!(s.sink(SinkId::PRIMARY).unwrap().covers(r(20, 0, 21, 1)));
    }

    // ── update / draw ─────────────────────────────────────────────────────

    #[test]
    fn update_that_moves_marks_both_areas() {
        let (mut s, root, o) = attached();
        s.kind_mut(o).unwrap().drift = Point::new(0, 3);
        s.update(root);
        assert_eq!(s.get(o).unwrap().position(), Point::new(0, 3));
        assert_eq!(s.get(o).unwrap().kind().unwrap().updates, 1);
        assert_eq!(log(&s), &[r(0, 0, 9, 9), r(0, 3, 9, 12)]);
    }

    #[test]
    fn update_without_motion_marks_nothing() {
        let (mut s, root, o) = attached();
        s.update(root);
        s.update(root);
        assert_eq!(s.get(o).unwrap().kind().unwrap().updates, 2);
        assert!(log(&s).is_empty());
    }

    #[test]
    fn draw_skips_objects_outside_area() {
        let (mut s, root, o) = attached();
        let far = s
            .create(Point::new(50, 50), Size::new(2, 2), Probe::default())
            .unwrap();
        s.add(root, far);

        let mut display = MockDisplay::<BinaryColor>::new();
        display.set_allow_overdraw(true);
        s.draw(root, &mut display, r(0, 0, 15, 15)).unwrap();

        assert_eq!(s.get(o).unwrap().kind().unwrap().draws.get(), 1);
        assert_eq!(s.get(far).unwrap().kind().unwrap().draws.get(), 0);
        assert_eq!(display.get_pixel(embedded_graphics::prelude::Point::new(9, 9)), Some(BinaryColor::On));
    }
}
