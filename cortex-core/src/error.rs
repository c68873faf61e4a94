// Copyright 2025 Cortex Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types shared by the Cortex crates
//!
//! Absence of a record is not an error: lookups return `Ok(None)` so that
//! callers can distinguish "not found" from a failing store.

use thiserror::Error;

/// Result type for Cortex operations
pub type CortexResult<T> = Result<T, CortexError>;

/// Errors that can occur across the memory channels and the correlator
#[derive(Debug, Error)]
pub enum CortexError {
    /// Backing persistence unreachable or a write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Malformed input rejected before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CortexError {
    fn from(e: serde_json::Error) -> Self {
        CortexError::Serialization(e.to_string())
    }
}
