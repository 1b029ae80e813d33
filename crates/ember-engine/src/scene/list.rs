use crate::tiler::RefreshSink;

use super::node::Body;
use super::{ObjectId, Scene, SceneError, Sprite};

/// List operations.
///
/// Performance characteristics:
/// - `insert()` links in O(1) after the O(n) membership check
/// - `add()`, `remove()`, `has()`, `prev()` scan the chain, O(n)
/// - `next()` is O(1)
///
/// An object is linked into at most one list at a time. Linking a member of
/// another list, or a list into itself or one of its descendants, fails; the
/// object has to be removed first. Chains therefore never form cycles.
impl<K: Sprite, S: RefreshSink, const N: usize, const M: usize> Scene<K, S, N, M> {
    /// Appends `object` to the tail of `list`.
    ///
    /// On success the object inherits the list's sink and its area is marked
    /// dirty. Returns `false` when `object` is unknown, already present, owned
    /// by another list, or would create a cycle.
    pub fn add(&mut self, list: ObjectId, object: ObjectId) -> bool {
        if !self.can_link(list, object) {
            return false;
        }
        let tail = self.prev(list, None);
        let sink = self.node(list).and_then(|n| n.sink);
        if let Some(node) = self.node_mut(object) {
            node.next = None;
            node.parent = Some(list);
            node.sink = sink;
        }
        match tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(object);
                }
            }
            None => {
                if let Some(chain) = self.chain_mut(list) {
                    chain.first = Some(object);
                }
            }
        }
        log::debug!("add {:?} to {:?}", object, list);
        self.refresh(object);
        true
    }

    /// Links `object` at the head of `list`. Same rules as [`add`](Self::add).
    pub fn insert(&mut self, list: ObjectId, object: ObjectId) -> bool {
        if !self.can_link(list, object) {
            return false;
        }
        let (first, sink) = match self.node(list) {
            Some(node) => (node.body.chain().and_then(|c| c.first), node.sink),
            None => return false,
        };
        if let Some(node) = self.node_mut(object) {
            node.next = first;
            node.parent = Some(list);
            node.sink = sink;
        }
        if let Some(chain) = self.chain_mut(list) {
            chain.first = Some(object);
        }
        log::debug!("insert {:?} into {:?}", object, list);
        self.refresh(object);
        true
    }

    /// Unlinks `object` from `list`.
    ///
    /// The object's area is marked dirty through the sink it had as a member;
    /// its link and sink are cleared afterwards. Menus also drop the object's
    /// selection and close the gap it left. Returns `false` when the object is
    /// not in the list.
    pub fn remove(&mut self, list: ObjectId, object: ObjectId) -> bool {
        let Some(first) = self.chain(list).and_then(|c| c.first) else {
            return false;
        };
        if !self.contains(object) {
            return false;
        }

        let pred = if first == object {
            None
        } else {
            match self.prev(list, Some(object)) {
                Some(pred) => Some(pred),
                None => return false,
            }
        };

        self.refresh(object);
        let next = self.node(object).and_then(|n| n.next);
        match pred {
            Some(pred) => {
                if let Some(node) = self.node_mut(pred) {
                    node.next = next;
                }
            }
            None => {
                if let Some(chain) = self.chain_mut(list) {
                    chain.first = next;
                }
            }
        }
        if let Some(node) = self.node_mut(object) {
            node.next = None;
            node.parent = None;
            node.sink = None;
        }
        log::debug!("remove {:?} from {:?}", object, list);
        if self.is_menu(list) {
            self.menu_item_left(list, object);
        }
        true
    }

    /// Destroys an object, returning its payload (`None` for lists and menus).
    ///
    /// A linked object is removed from its list first. Members of a destroyed
    /// list become detached objects; their area is refreshed before the sink
    /// is dropped.
    pub fn destroy(&mut self, id: ObjectId) -> Result<Option<K>, SceneError> {
        let parent = self.node(id).ok_or(SceneError::StaleId)?.parent;
        match parent {
            Some(list) => {
                self.remove(list, id);
            }
            None => {
                self.refresh(id);
            }
        }

        if let Some(item) = self.selected(id) {
            self.focus(item, false);
        }
        let mut cur = self.chain(id).and_then(|c| c.first);
        while let Some(member) = cur {
            let Some(node) = self.node_mut(member) else {
                break;
            };
            cur = node.next;
            node.next = None;
            node.parent = None;
            node.sink = None;
        }

        let node = self.release(id).ok_or(SceneError::StaleId)?;
        log::debug!("destroy {:?}", id);
        Ok(match node.body {
            Body::Leaf(kind) => Some(kind),
            Body::List(_) | Body::Menu(..) => None,
        })
    }

    /// Membership test by identity, O(n).
    pub fn has(&self, list: ObjectId, object: ObjectId) -> bool {
        self.members(list).any(|m| m == object)
    }

    /// Member after `prev`; `None` returns the head.
    ///
    /// Yields `None` at the end of the chain, for an empty list, when `list`
    /// is not a list, or when `prev` is not one of its members.
    pub fn next(&self, list: ObjectId, prev: Option<ObjectId>) -> Option<ObjectId> {
        match prev {
            None => self.chain(list)?.first,
            Some(prev) => {
                let node = self.node(prev)?;
                if node.parent == Some(list) { node.next } else { None }
            }
        }
    }

    /// Member before `curr`; `None` returns the tail.
    ///
    /// Scans from the head for the node whose successor is `curr`, so the
    /// head has no predecessor.
    pub fn prev(&self, list: ObjectId, curr: Option<ObjectId>) -> Option<ObjectId> {
        let mut p = self.chain(list)?.first;
        while let Some(id) = p {
            let next = self.node(id)?.next;
            if next == curr {
                break;
            }
            p = next;
        }
        p
    }

    /// Iterates members in chain order.
    pub fn members(&self, list: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        core::iter::successors(self.next(list, None), move |&id| self.next(list, Some(id)))
    }

    /// Number of members, O(n).
    pub fn member_count(&self, list: ObjectId) -> usize {
        self.members(list).count()
    }

    fn can_link(&self, list: ObjectId, object: ObjectId) -> bool {
        let Some(list_node) = self.node(list) else {
            return false;
        };
        if list_node.body.chain().is_none() {
            log::warn!("{:?} is not a list; cannot link {:?}", list, object);
            return false;
        }
        let Some(node) = self.node(object) else {
            return false;
        };
        if self.has(list, object) {
            log::debug!("{:?} already in {:?}", object, list);
            return false;
        }
        if let Some(owner) = node.parent {
            log::warn!("{:?} is linked into {:?}; remove it first", object, owner);
            return false;
        }
        let mut ancestor = Some(list);
        while let Some(a) = ancestor {
            if a == object {
                log::warn!("linking {:?} into {:?} would form a cycle", object, list);
                return false;
            }
            ancestor = self.node(a).and_then(|n| n.parent);
        }
        true
    }
}
