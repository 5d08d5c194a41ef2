use thiserror::Error;

/// Errors returned by [`OpenAddressingMap`](crate::OpenAddressingMap).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The requested initial capacity was below 1.
    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// The key is not present in the map.
    #[error("key not found")]
    KeyNotFound,
}

pub type Result<T> = std::result::Result<T, MapError>;
