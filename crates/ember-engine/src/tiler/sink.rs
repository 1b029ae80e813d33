use crate::coords::Rect;

/// Receiver of dirty-region notifications.
///
/// `mark_dirty` declares that `rect` (world space) may have changed and must be
/// considered by the next redraw pass. Implementations must tolerate redundant
/// and overlapping calls: marking too much only costs redraw work, marking too
/// little leaves stale pixels on the panel.
///
/// The scene never reads dirty state back.
pub trait RefreshSink {
    fn mark_dirty(&mut self, rect: Rect);
}

impl<S: RefreshSink + ?Sized> RefreshSink for &mut S {
    #[inline]
    fn mark_dirty(&mut self, rect: Rect) {
        (**self).mark_dirty(rect)
    }
}

/// Handle naming one of the sinks registered with a scene.
///
/// Objects hold an `Option<SinkId>`; `None` is the detached state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SinkId(pub u8);

impl SinkId {
    /// The first (and usually only) sink of a scene.
    pub const PRIMARY: SinkId = SinkId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
