use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RedBlackError {
    /// The search ran off the bottom of the subtree without meeting the key.
    #[error("Key not found: {0}")]
    KeyNotFound(i64),
}

pub type Result<T> = std::result::Result<T, RedBlackError>;
