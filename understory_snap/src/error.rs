// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Result alias for fallible snap configuration.
pub type SnapResult<T> = Result<T, SnapError>;

/// Configuration errors.
///
/// Navigation and gesture handling never fail: they report no-ops through
/// `bool` returns instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapError {
    /// A virtual slide needs an explicit size: its visibility must be known
    /// before it is ever mounted and measured.
    #[error("virtual slides require an explicit size, not `auto`")]
    VirtualSlideSize,

    /// A length string could not be parsed.
    #[error("invalid length: {0:?}")]
    InvalidLength(String),
}

impl SnapError {
    pub(crate) fn invalid_length(input: impl Into<String>) -> Self {
        Self::InvalidLength(input.into())
    }
}
