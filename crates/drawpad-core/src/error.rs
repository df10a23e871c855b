//! Error types for editing operations.

use crate::item::ItemId;
use thiserror::Error;

/// Errors raised by item and board edits.
///
/// The editor treats every one of these as a no-op: it logs and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Item {0} is not a text item")]
    NotText(ItemId),
}

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;
