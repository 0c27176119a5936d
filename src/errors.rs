//! Error Types
//!
//! This module defines the error types used throughout the compositor.
//!
//! # Overview
//!
//! Lookup misses (unknown pass, technique, or resource names) are part of the
//! normal control flow and are reported through `bool` / `Option` returns,
//! never through this enum. [`CompositorError`] covers genuine contract
//! violations only:
//! - Writing a value of the wrong type into a [`Uniform`](crate::resources::Uniform)
//! - Requesting a quad with degenerate dimensions
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, CompositorError>`.

use thiserror::Error;

/// The main error type for the compositor.
#[derive(Error, Debug)]
pub enum CompositorError {
    /// A uniform was assigned a value of a different type than it was
    /// declared with.
    #[error("Uniform type mismatch on '{name}': expected {expected}, got {got}")]
    UniformTypeMismatch {
        /// Name of the uniform being written.
        name: String,
        /// Type the uniform was declared with.
        expected: &'static str,
        /// Type of the rejected value.
        got: &'static str,
    },

    /// Quad geometry was requested with non-positive or non-finite dimensions.
    #[error("Invalid quad dimensions: {width} x {height}")]
    InvalidQuadSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

/// Alias for `Result<T, CompositorError>`.
pub type Result<T> = std::result::Result<T, CompositorError>;
