use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::DrawTarget;

use crate::coords::Rect;

/// Content hooks for a scene object.
///
/// The scene owns an object's geometry, list links and sink handle; the
/// payload only decides what the object looks like and how it animates.
/// Every hook has a no-op default, so `()` is a valid payload for a bare
/// object that only occupies space.
///
/// # Implementing a sprite
///
/// ```rust,ignore
/// use ember_engine::prelude::*;
///
/// struct Ball { dx: Coord }
///
/// impl Sprite for Ball {
///     fn draw<D>(&self, rect: Rect, target: &mut D) -> Result<(), D::Error>
///     where
///         D: DrawTarget<Color = BinaryColor>,
///     {
///         Rectangle::from(rect)
///             .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
///             .draw(target)
///     }
///
///     fn update(&mut self, rect: &mut Rect) {
///         *rect = rect.offset(Point::new(self.dx, 0));
///     }
/// }
/// ```
pub trait Sprite {
    /// Renders the object occupying `rect` (world coordinates) into `target`.
    ///
    /// `target` may cover only one tile of the panel; drawing outside its
    /// bounding box is clipped by the target.
    fn draw<D>(&self, rect: Rect, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let _ = (rect, target);
        Ok(())
    }

    /// Advances the object by one frame.
    ///
    /// Writing to `rect` moves or resizes the object. The scene marks both the
    /// old and the new area dirty afterwards, so updates never leave stale
    /// pixels behind.
    fn update(&mut self, rect: &mut Rect) {
        let _ = rect;
    }

    /// Called by menus when the object gains or loses the selection.
    fn set_focus(&mut self, focused: bool) {
        let _ = focused;
    }
}

impl Sprite for () {}
