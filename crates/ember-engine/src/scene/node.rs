use crate::coords::Rect;
use crate::tiler::SinkId;

use super::ObjectId;
use super::menu::MenuState;

/// Pool entry: the scene-side wrapper around one object.
///
/// List bookkeeping (`next`, `parent`) and the sink handle live here rather
/// than in the payload, so payload types never know about membership.
#[derive(Debug)]
pub(crate) struct Node<K> {
    pub rect: Rect,
    pub sink: Option<SinkId>,
    /// Successor in the owning list's chain.
    pub next: Option<ObjectId>,
    /// List whose chain currently links this node.
    pub parent: Option<ObjectId>,
    pub body: Body<K>,
}

impl<K> Node<K> {
    pub fn new(rect: Rect, body: Body<K>) -> Self {
        Self {
            rect,
            sink: None,
            next: None,
            parent: None,
            body,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Body<K> {
    Leaf(K),
    List(Chain),
    Menu(Chain, MenuState),
}

impl<K> Body<K> {
    #[inline]
    pub fn chain(&self) -> Option<&Chain> {
        match self {
            Body::Leaf(_) => None,
            Body::List(chain) | Body::Menu(chain, _) => Some(chain),
        }
    }

    #[inline]
    pub fn chain_mut(&mut self) -> Option<&mut Chain> {
        match self {
            Body::Leaf(_) => None,
            Body::List(chain) | Body::Menu(chain, _) => Some(chain),
        }
    }
}

/// Head of a singly-linked member chain.
#[derive(Debug, Default, Copy, Clone)]
pub(crate) struct Chain {
    pub first: Option<ObjectId>,
}

/// Fixed pool slot.
#[derive(Debug)]
pub(crate) struct Slot<K> {
    pub generation: u16,
    pub node: Option<Node<K>>,
}

impl<K> Slot<K> {
    pub const fn vacant() -> Self {
        Self {
            generation: 0,
            node: None,
        }
    }
}
