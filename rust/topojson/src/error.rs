// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology decoding.

use crate::topology::{Coordinate, RingId};

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a topology.
///
/// Every variant except [`Error::RingNotFound`] aborts a build; a document
/// either decodes completely or not at all.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input tree does not have the expected shape.
    #[error("schema error at {path}: {message}")]
    Schema { path: String, message: String },

    /// A signed arc reference resolves outside the arc list.
    #[error("arc reference {reference} resolves to arc {index}, but the topology has {len} arcs")]
    ArcIndexOutOfRange {
        reference: i32,
        index: usize,
        len: usize,
    },

    /// The concatenated arcs of a ring do not end where they started.
    #[error("ring is not closed: starts at ({}, {}) but ends at ({}, {})", .first.x, .first.y, .last.x, .last.y)]
    UnclosedRing { first: Coordinate, last: Coordinate },

    /// A ring or line decoded to no coordinates at all.
    #[error("ring has no coordinates")]
    EmptyRing,

    /// A ring identifier was not issued by this topology.
    #[error("ring not found: {0:?}")]
    RingNotFound(RingId),

    /// Raw text handed to `from_json` is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
