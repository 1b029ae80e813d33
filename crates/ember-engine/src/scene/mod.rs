//! Scene objects and object lists.
//!
//! Responsibilities:
//! - store every object, list and menu in a fixed pool addressed by [`ObjectId`]
//! - keep the singly-linked member chains of lists (no allocation, no cycles)
//! - report every geometry change to the owning [`RefreshSink`] so the tiler
//!   knows which panel areas went stale
//!
//! Lists are objects too, so they nest: `refresh`, `update` and `draw` on a
//! list fan out to its members in chain order, recursing through sub-lists.
//!
//! [`RefreshSink`]: crate::tiler::RefreshSink

mod error;
mod id;
mod list;
mod menu;
mod node;
mod object;
mod sprite;

pub use error::SceneError;
pub use id::ObjectId;
pub use menu::MenuLayout;
pub use object::ObjectRef;
pub use sprite::Sprite;

use crate::coords::{Point, Rect, Size};
use crate::tiler::SinkId;

use node::{Body, Chain, Node, Slot};

/// Fixed-capacity pool of scene objects plus the sinks they report to.
///
/// - `K`: payload type of leaf objects (see [`Sprite`])
/// - `S`: refresh sink type, usually a [`Tiler`](crate::tiler::Tiler)
/// - `N`: pool capacity (objects, lists and menus together)
/// - `M`: number of sinks; objects name theirs with a [`SinkId`]
///
/// The scene never allocates after construction. Objects are created and
/// destroyed by the application; lists only link and unlink them.
#[derive(Debug)]
pub struct Scene<K, S, const N: usize, const M: usize = 1> {
    slots: [Slot<K>; N],
    sinks: [S; M],
    live: usize,
}

impl<K, S, const N: usize, const M: usize> Scene<K, S, N, M> {
    pub fn new(sinks: [S; M]) -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::vacant()),
            sinks,
            live: 0,
        }
    }

    /// Creates a detached object with payload `kind`.
    ///
    /// `size` is clamped to at least 1x1.
    pub fn create(&mut self, pos: Point, size: Size, kind: K) -> Result<ObjectId, SceneError> {
        self.spawn(Rect::from_pos_size(pos, size), Body::Leaf(kind))
    }

    /// Creates an empty, detached list whose own rect is the single pixel at `pos`.
    pub fn create_list(&mut self, pos: Point) -> Result<ObjectId, SceneError> {
        self.spawn(Rect::point(pos), Body::List(Chain::default()))
    }

    pub(crate) fn spawn(&mut self, rect: Rect, body: Body<K>) -> Result<ObjectId, SceneError> {
        let full = SceneError::Full { capacity: N };
        let index = self
            .slots
            .iter()
            .position(|s| s.node.is_none())
            .ok_or(full)?;
        let index16 = u16::try_from(index).map_err(|_| full)?;

        let slot = &mut self.slots[index];
        slot.node = Some(Node::new(rect, body));
        self.live += 1;
        Ok(ObjectId::new(index16, slot.generation))
    }

    /// Returns `true` while `id` names a live object.
    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.node(id).is_some()
    }

    /// Read-only view of an object's geometry and payload.
    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<ObjectRef<'_, K>> {
        self.node(id).map(|node| ObjectRef::new(id, node))
    }

    /// Mutable access to a leaf payload.
    ///
    /// The scene cannot see what changes here; call `refresh` afterwards if
    /// the object's appearance changed.
    pub fn kind_mut(&mut self, id: ObjectId) -> Option<&mut K> {
        match &mut self.node_mut(id)?.body {
            Body::Leaf(kind) => Some(kind),
            _ => None,
        }
    }

    /// Sets the sink an object reports to, without refreshing anything.
    ///
    /// This is how a root list gets connected to the display; members pick the
    /// new sink up on the list's next `refresh`. Fails for unknown objects or
    /// sink ids beyond the scene's sink table.
    pub fn attach(&mut self, id: ObjectId, sink: Option<SinkId>) -> bool {
        if sink.is_some_and(|s| s.index() >= M) {
            log::warn!("attach {:?}: no sink {:?} (scene has {})", id, sink, M);
            return false;
        }
        match self.node_mut(id) {
            Some(node) => {
                node.sink = sink;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn sink(&self, id: SinkId) -> Option<&S> {
        self.sinks.get(id.index())
    }

    #[inline]
    pub fn sink_mut(&mut self, id: SinkId) -> Option<&mut S> {
        self.sinks.get_mut(id.index())
    }

    #[inline]
    pub fn sinks(&self) -> &[S; M] {
        &self.sinks
    }

    #[inline]
    pub fn sinks_mut(&mut self) -> &mut [S; M] {
        &mut self.sinks
    }

    /// Number of live objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    // ── internal lookup ───────────────────────────────────────────────────

    #[inline]
    pub(crate) fn node(&self, id: ObjectId) -> Option<&Node<K>> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: ObjectId) -> Option<&mut Node<K>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    #[inline]
    pub(crate) fn chain(&self, list: ObjectId) -> Option<&Chain> {
        self.node(list)?.body.chain()
    }

    #[inline]
    pub(crate) fn chain_mut(&mut self, list: ObjectId) -> Option<&mut Chain> {
        self.node_mut(list)?.body.chain_mut()
    }

    /// Frees the slot of `id`, returning its node. Links must already be cut.
    pub(crate) fn release(&mut self, id: ObjectId) -> Option<Node<K>> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.live -= 1;
        Some(node)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::vec::Vec;

    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    use crate::coords::Rect;
    use crate::tiler::RefreshSink;

    use super::Sprite;

    /// Sink that remembers every rect it was handed.
    #[derive(Debug, Default)]
    pub struct DirtyLog {
        pub rects: Vec<Rect>,
    }

    impl RefreshSink for DirtyLog {
        fn mark_dirty(&mut self, rect: Rect) {
            self.rects.push(rect);
        }
    }

    impl DirtyLog {
        /// True when some recorded rect fully contains `rect`.
        pub fn covers(&self, rect: Rect) -> bool {
            self.rects
                .iter()
                .any(|r| r.intersect(&rect) == Some(rect))
        }
    }

    /// Payload that counts hook calls and optionally drifts each update.
    #[derive(Debug, Default)]
    pub struct Probe {
        pub drift: crate::coords::Point,
        pub updates: u32,
        pub draws: core::cell::Cell<u32>,
        pub focused: bool,
    }

    impl Sprite for Probe {
        fn draw<D>(&self, rect: Rect, target: &mut D) -> Result<(), D::Error>
        where
            D: DrawTarget<Color = BinaryColor>,
        {
            self.draws.set(self.draws.get() + 1);
            target.fill_solid(&Rectangle::from(rect), BinaryColor::On)
        }

        fn update(&mut self, rect: &mut Rect) {
            self.updates += 1;
            *rect = rect.offset(self.drift);
        }

        fn set_focus(&mut self, focused: bool) {
            self.focused = focused;
        }
    }
}
