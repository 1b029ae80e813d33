use core::fmt;

/// Failure to create or destroy a scene object.
///
/// Membership operations never produce this; they report failure through
/// their `bool` result.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Every slot of the fixed pool is in use.
    Full { capacity: usize },
    /// The handle refers to an object that was destroyed.
    StaleId,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Full { capacity } => {
                write!(f, "scene pool exhausted ({capacity} objects)")
            }
            SceneError::StaleId => f.write_str("object handle is stale"),
        }
    }
}

impl core::error::Error for SceneError {}
