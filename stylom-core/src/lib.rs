//! N-gram-based text attribution and generation library.
//!
//! This crate provides a statistical stylometry engine including:
//! - Word-level tokenization with a fixed punctuation policy
//! - Per-author n-gram frequency models built from a corpus on disk
//! - Author attribution of unknown texts by cosine similarity
//! - Synthetic text generation sampled from an author's distribution
//! - Frequency-rank queries over an author's n-grams
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core attribution models and analysis logic.
///
/// This module exposes the high-level engine interface while keeping
/// internal helpers private.
pub mod model;

/// Error type shared by all fallible operations of this crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
