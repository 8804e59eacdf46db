//! Error types for the deck box generator.
//!
//! Every variant is raised while validating parameters or the panel plan,
//! before the first panel reaches a renderer.

use thiserror::Error;

/// Errors that can occur while laying out a deck box.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeckBoxError {
    /// A physical or ambient parameter is out of range.
    #[error("Invalid parameter '{name}': {value} ({reason})")]
    InvalidParameter {
        name: String,
        value: f64,
        reason: String,
    },

    /// A derived segment of an edge profile would be zero or negative.
    #[error("Geometry underflow in {profile} edge: length {length} must exceed {minimum}")]
    GeometryUnderflow {
        profile: String,
        length: f64,
        minimum: f64,
    },

    /// An edge code names a symbol that was never registered.
    #[error("Unregistered edge symbol '{symbol}' on panel {panel}")]
    UnregisteredEdgeSymbol { symbol: char, panel: String },

    /// A symbol was registered twice.
    #[error("Edge symbol '{0}' is already registered")]
    DuplicateEdgeSymbol(char),

    /// An edge code string does not hold exactly four symbols.
    #[error("Invalid edge code '{0}': expected exactly 4 symbols")]
    InvalidEdgeCode(String),
}

impl DeckBoxError {
    pub fn invalid_parameter(name: &str, value: f64, reason: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    pub fn underflow(profile: &str, length: f64, minimum: f64) -> Self {
        Self::GeometryUnderflow {
            profile: profile.to_string(),
            length,
            minimum,
        }
    }
}

/// Result type alias for deck box operations.
pub type DeckBoxResult<T> = Result<T, DeckBoxError>;
