//! Error type shared by the floor-map model and the node primitives.

use crate::types::ItemId;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while configuring nodes or building a floor map.
#[derive(Debug, Error)]
pub enum FloorMapError {
    /// A repeat trigger was configured with a zero-length interval.
    #[error("repeat interval must be positive, got {0:?}")]
    InvalidRepeatInterval(Duration),
    /// Two items in the same floor map share an id.
    #[error("duplicate item id {0}")]
    DuplicateItemId(ItemId),
    /// A floor map layout could not be decoded.
    #[error("invalid floor map layout: {0}")]
    Layout(#[from] serde_json::Error),
}
