use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment};

use crate::coords::{Coord, Point, Rect, Size};
use crate::tiler::RefreshSink;

use super::node::{Body, Chain};
use super::{ObjectId, Scene, SceneError, Sprite};

/// Gap between the menu edge and its items.
const PADDING: Coord = 4;
/// Inset of the drawn frame.
const FRAME_INSET: Coord = 2;

/// How a menu arranges its items.
///
/// Both layouts stack items top to bottom starting `PADDING` pixels inside
/// the menu, with a 1 pixel gap between items.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuLayout {
    /// Fixed width; the menu grows downwards to fit its items. Items keep
    /// their own size.
    List { width: Coord },
    /// Fixed size; every item is stretched to the menu width minus padding.
    FixedWidth { size: Size },
}

impl MenuLayout {
    /// Layout after the menu itself was resized to `size`.
    pub(crate) fn resized(self, size: Size) -> Self {
        match self {
            MenuLayout::List { .. } => MenuLayout::List { width: size.w },
            MenuLayout::FixedWidth { .. } => MenuLayout::FixedWidth { size },
        }
    }
}

#[derive(Debug)]
pub(crate) struct MenuState {
    pub selected: Option<ObjectId>,
    pub layout: MenuLayout,
}

/// Menus: lists with a selection cursor.
///
/// The selected item receives `Sprite::set_focus(true)`; moving the cursor
/// wraps around at both ends. Items are repositioned whenever the menu
/// changes shape or gains an item.
impl<K: Sprite, S: RefreshSink, const N: usize, const M: usize> Scene<K, S, N, M> {
    pub fn create_menu(&mut self, pos: Point, layout: MenuLayout) -> Result<ObjectId, SceneError> {
        let size = match layout {
            MenuLayout::List { width } => Size::new(width, 1),
            MenuLayout::FixedWidth { size } => size,
        };
        let state = MenuState {
            selected: None,
            layout,
        };
        let id = self.spawn(
            Rect::from_pos_size(pos, size),
            Body::Menu(Chain::default(), state),
        )?;
        self.layout_menu(id);
        Ok(id)
    }

    /// Appends an item, lays the menu out again and selects the item if the
    /// menu had no selection.
    pub fn menu_add(&mut self, menu: ObjectId, item: ObjectId) -> bool {
        self.link_item(menu, item, false)
    }

    /// Inserts an item at the top; otherwise like [`menu_add`](Self::menu_add).
    pub fn menu_insert(&mut self, menu: ObjectId, item: ObjectId) -> bool {
        self.link_item(menu, item, true)
    }

    /// Currently selected item.
    pub fn selected(&self, menu: ObjectId) -> Option<ObjectId> {
        match &self.node(menu)?.body {
            Body::Menu(_, state) => state.selected,
            _ => None,
        }
    }

    /// Moves the selection to the next item, wrapping to the first.
    pub fn menu_down(&mut self, menu: ObjectId) -> Option<ObjectId> {
        if !self.is_menu(menu) {
            return None;
        }
        let current = self.selected(menu);
        let target = self
            .next(menu, current)
            .or_else(|| self.next(menu, None));
        self.select(menu, target);
        target
    }

    /// Moves the selection to the previous item, wrapping to the last.
    pub fn menu_up(&mut self, menu: ObjectId) -> Option<ObjectId> {
        if !self.is_menu(menu) {
            return None;
        }
        let target = match self.selected(menu) {
            Some(current) => self.prev(menu, Some(current)).or_else(|| self.prev(menu, None)),
            None => self.prev(menu, None),
        };
        self.select(menu, target);
        target
    }

    pub(super) fn is_menu(&self, id: ObjectId) -> bool {
        self.node(id)
            .is_some_and(|n| matches!(n.body, Body::Menu(..)))
    }

    fn link_item(&mut self, menu: ObjectId, item: ObjectId, at_head: bool) -> bool {
        if !self.is_menu(menu) {
            return false;
        }
        let linked = if at_head {
            self.insert(menu, item)
        } else {
            self.add(menu, item)
        };
        if !linked {
            return false;
        }
        self.update(item);
        self.layout_menu(menu);
        self.refresh(menu);
        if self.selected(menu).is_none() {
            self.select(menu, Some(item));
        }
        true
    }

    fn select(&mut self, menu: ObjectId, item: Option<ObjectId>) {
        if let Some(old) = self.selected(menu) {
            self.focus(old, false);
        }
        if let Some(Body::Menu(_, state)) = self.node_mut(menu).map(|n| &mut n.body) {
            state.selected = item;
        }
        if let Some(new) = item {
            self.focus(new, true);
        }
    }

    pub(super) fn focus(&mut self, id: ObjectId, focused: bool) {
        if let Some(Body::Leaf(kind)) = self.node_mut(id).map(|n| &mut n.body) {
            kind.set_focus(focused);
        }
        self.refresh(id);
    }

    /// Called after `item` was unlinked from `menu`: drops the selection if it
    /// pointed at `item` and closes the gap the item left.
    pub(super) fn menu_item_left(&mut self, menu: ObjectId, item: ObjectId) {
        let mut was_selected = false;
        if let Some(Body::Menu(_, state)) = self.node_mut(menu).map(|n| &mut n.body) {
            if state.selected == Some(item) {
                state.selected = None;
                was_selected = true;
            }
        }
        if was_selected {
            self.focus(item, false);
        }
        // Old extent first; a list layout shrinks with its items.
        self.refresh(menu);
        self.layout_menu(menu);
        self.refresh(menu);
    }

    /// Repositions items without marking anything dirty.
    pub(crate) fn layout_menu(&mut self, menu: ObjectId) {
        let Some(node) = self.node(menu) else {
            return;
        };
        let Body::Menu(_, state) = &node.body else {
            return;
        };
        let layout = state.layout;
        let origin = node.rect.p1();
        let item_width = node.rect.width().saturating_sub(2 * PADDING);

        let x = origin.x.saturating_add(PADDING);
        let mut y = origin.y.saturating_add(PADDING);
        let mut cur = self.next(menu, None);
        while let Some(item) = cur {
            self.set_pos(item, Point::new(x, y));
            if matches!(layout, MenuLayout::FixedWidth { .. }) {
                let height = self.get(item).map_or(1, |o| o.height());
                self.set_size(item, Size::new(item_width, height));
            }
            let height = self.get(item).map_or(1, |o| o.height());
            y = y.saturating_add(height).saturating_add(1);
            cur = self.next(menu, Some(item));
        }

        if let MenuLayout::List { width } = layout {
            let bottom = y.saturating_add(PADDING + 3);
            let height = bottom.saturating_sub(origin.y).saturating_add(1);
            if let Some(node) = self.node_mut(menu) {
                node.rect = Rect::from_pos_size(origin, Size::new(width, height));
            }
        }
    }
}

/// Outline drawn around a menu's items.
pub(crate) fn draw_frame<D>(rect: Rect, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(BinaryColor::On)
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    Rectangle::from(rect.inset(FRAME_INSET))
        .into_styled(style)
        .draw(target)
}
