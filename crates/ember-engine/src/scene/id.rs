/// Handle to an object, list or menu stored in a [`Scene`](super::Scene).
///
/// Identity rules:
/// 1) `index`: slot in the scene's fixed pool
/// 2) `generation`: bumped every time the slot is freed, so a handle kept past
///    `destroy` never resolves to whatever reuses the slot
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObjectId {
    pub(crate) index: u16,
    pub(crate) generation: u16,
}

impl ObjectId {
    #[inline]
    pub(crate) const fn new(index: u16, generation: u16) -> Self {
        Self { index, generation }
    }

    /// Slot index inside the scene pool.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}
