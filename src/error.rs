//! Error taxonomy for the scene model.
//!
//! Apart from `SerializationError`, every variant is a precondition
//! violation detected before any state changes, so a returned error leaves
//! the caller's data untouched.

use thiserror::Error;

pub type AlbumResult<T> = Result<T, AlbumError>;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("{op}: invalid shape name {name:?} (must be non-empty and contain no whitespace)")]
    InvalidName { op: &'static str, name: String },

    #[error("{op}: a shape named {name:?} already exists")]
    DuplicateName { op: &'static str, name: String },

    #[error("{op}: no shape named {name:?}")]
    UnknownName { op: &'static str, name: String },

    #[error("{op}: unsupported shape kind {kind:?}")]
    UnsupportedKind { op: &'static str, kind: String },

    #[error("{op}: {axis} extent must be positive and finite, got {value}")]
    InvalidExtent {
        op: &'static str,
        axis: char,
        value: f64,
    },

    #[error("{op}: position must be finite, got ({x}, {y})")]
    InvalidPosition {
        op: &'static str,
        x: f64,
        y: f64,
    },

    #[error("{op}: color channels must lie in [0.0, 1.0], got ({r}, {g}, {b})")]
    InvalidColor {
        op: &'static str,
        r: f64,
        g: f64,
        b: f64,
    },

    #[error("{op}: invalid range [{lower}, {upper}] for a log of length {len}")]
    InvalidRange {
        op: &'static str,
        lower: usize,
        upper: usize,
        len: usize,
    },

    #[error("{op}: checkpoint id is required")]
    MissingId { op: &'static str },

    #[error("{op}: shape name is required")]
    MissingName { op: &'static str },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AlbumError {
    /// Name of the operation that rejected its input.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::InvalidName { op, .. }
            | Self::DuplicateName { op, .. }
            | Self::UnknownName { op, .. }
            | Self::UnsupportedKind { op, .. }
            | Self::InvalidExtent { op, .. }
            | Self::InvalidPosition { op, .. }
            | Self::InvalidColor { op, .. }
            | Self::InvalidRange { op, .. }
            | Self::MissingId { op }
            | Self::MissingName { op } => op,
            Self::SerializationError(_) => "serialize",
        }
    }
}
