//! Top-level module for the n-gram attribution system.
//!
//! This module provides a word-level n-gram stylometry engine, including:
//! - Text normalization and tokenization (`tokenizer`)
//! - Corpus discovery from a directory layout (`Corpus`)
//! - Per-author frequency models (`FrequencyModel`, `AuthorModels`)
//! - The attribution capability interface and its default
//!   implementation (`Attribution`, `NGramEngine`)
//! - Weighted random text generation (`generator`)

/// High-level interface for building models and running attribution,
/// generation and rank queries over them.
///
/// Exposes the `Attribution` capability trait and the default
/// `NGramEngine` implementation.
pub mod engine;

/// Per-author n-gram frequency vectors.
///
/// Handles count accumulation, cosine similarity, rank grouping
/// and model merging.
pub mod frequency;

/// Corpus discovery from the `root/<author>/<work>` directory layout.
pub mod corpus;

/// Text normalization: punctuation policy, lowercasing and the
/// fixed minimum-length filter.
pub mod tokenizer;

/// Internal weighted sampling and text file generation.
///
/// This module is not exposed publicly.
mod generator;

pub use corpus::Corpus;
pub use engine::{Attribution, NGramEngine};
pub use frequency::{AuthorModels, FrequencyModel};
