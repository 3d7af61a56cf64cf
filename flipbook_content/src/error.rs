// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors raised while fetching or decoding content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The document source could not be reached or refused the request.
    #[error("transport error: {0}")]
    Transport(String),

    /// A document did not have the expected shape.
    #[error("malformed document: {0}")]
    Decode(#[from] serde_json::Error),

    /// A required configuration value is missing or empty.
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),
}

/// Result alias for content operations.
pub type Result<T, E = ContentError> = core::result::Result<T, E>;
