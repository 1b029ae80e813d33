//! Ready-made sprite payloads.
//!
//! [`Shape`] covers the common cases of a monochrome UI: filled blocks,
//! outlined boxes and 1bpp bitmaps, with optional constant velocity and
//! inverted rendering while a menu has it selected.

mod bitmap;

pub use bitmap::Bitmap;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment};

use crate::coords::{Point, Rect};
use crate::scene::Sprite;

/// How a [`Shape`] fills its rect.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Style {
    /// Solid block.
    Fill,
    /// One pixel border drawn inside the rect, interior cleared.
    Outline,
    /// Image anchored at the top-left corner, clipped to the rect.
    Bitmap(Bitmap),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Shape {
    pub style: Style,
    /// Pixels moved per update.
    pub velocity: Point,
    inverted: bool,
}

impl Shape {
    #[inline]
    pub const fn new(style: Style) -> Self {
        Self { style, velocity: Point { x: 0, y: 0 }, inverted: false }
    }

    #[inline]
    pub const fn fill() -> Self {
        Self::new(Style::Fill)
    }

    #[inline]
    pub const fn outline() -> Self {
        Self::new(Style::Outline)
    }

    #[inline]
    pub const fn bitmap(bitmap: Bitmap) -> Self {
        Self::new(Style::Bitmap(bitmap))
    }

    #[inline]
    pub fn with_velocity(mut self, velocity: Point) -> Self {
        self.velocity = velocity;
        self
    }

    /// True while a menu has this shape selected.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    #[inline]
    fn ink(&self) -> BinaryColor {
        if self.inverted { BinaryColor::Off } else { BinaryColor::On }
    }
}

impl Sprite for Shape {
    fn draw<D>(&self, rect: Rect, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let area = Rectangle::from(rect);
        let ink = self.ink();
        match self.style {
            Style::Fill => target.fill_solid(&area, ink),
            Style::Outline => {
                let style = PrimitiveStyleBuilder::new()
                    .stroke_color(ink)
                    .stroke_width(1)
                    .stroke_alignment(StrokeAlignment::Inside)
                    .fill_color(ink.invert())
                    .build();
                area.into_styled(style).draw(target)
            }
            Style::Bitmap(bitmap) => bitmap.draw(rect, ink, target),
        }
    }

    fn update(&mut self, rect: &mut Rect) {
        if self.velocity != Point::zero() {
            *rect = rect.offset(self.velocity);
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.inverted = focused;
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::coords::Size;

    fn draw(shape: &Shape, rect: Rect) -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        shape.draw(rect, &mut display).unwrap();
        display
    }

    // ── styles ────────────────────────────────────────────────────────────

    #[test]
    fn fill_covers_rect() {
        let d = draw(&Shape::fill(), Rect::new(Point::new(1, 1), Point::new(3, 2)));
        d.assert_pattern(&[
            "    ", //
            " ###", //
            " ###", //
        ]);
    }

    #[test]
    fn outline_clears_interior() {
        let d = draw(&Shape::outline(), Rect::from_pos_size(Point::zero(), Size::new(4, 3)));
        d.assert_pattern(&[
            "####", //
            "#..#", //
            "####", //
        ]);
    }

    #[test]
    fn focus_inverts_ink() {
        let mut shape = Shape::fill();
        shape.set_focus(true);
        assert!(shape.is_inverted());
        let d = draw(&shape, Rect::from_pos_size(Point::zero(), Size::new(2, 1)));
        d.assert_pattern(&[".."]);
    }

    #[test]
    fn bitmap_is_clipped_to_rect() {
        static DOT: [u8; 2] = [0b1000_0000, 0b0100_0000];
        let shape = Shape::bitmap(Bitmap::new(&DOT, 2));
        let d = draw(&shape, Rect::from_pos_size(Point::zero(), Size::new(3, 2)));
        d.assert_pattern(&[
            "#..", //
            ".#.", //
        ]);
    }

    // ── motion ────────────────────────────────────────────────────────────

    #[test]
    fn update_applies_velocity() {
        let mut shape = Shape::fill().with_velocity(Point::new(2, -1));
        let mut rect = Rect::from_pos_size(Point::new(5, 5), Size::new(2, 2));
        shape.update(&mut rect);
        assert_eq!(rect.p1(), Point::new(7, 4));
        assert_eq!(rect.size(), Size::new(2, 2));
    }

    #[test]
    fn still_shape_leaves_rect_alone() {
        let mut shape = Shape::outline();
        let mut rect = Rect::from_pos_size(Point::new(5, 5), Size::new(2, 2));
        let before = rect;
        shape.update(&mut rect);
        assert_eq!(rect, before);
    }
}
