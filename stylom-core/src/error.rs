use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the attribution engine.
///
/// Partial failure is the norm: every variant except `Io` on the corpus
/// root is scoped to a single call, and a failed query never invalidates
/// models built for other authors.
#[derive(Error, Debug)]
pub enum StylomError {
	#[error("IO Error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Corpus root not found or not a directory: {0}")]
	CorpusNotFound(PathBuf),

	#[error("N-gram size must be between 1 and 20, got {0}")]
	InvalidNgramSize(usize),

	#[error("Cannot compute cosine similarity against the zero vector ({0})")]
	DegenerateVector(String),

	#[error("No model for author: {0}")]
	UnknownAuthor(String),

	#[error("Model for author '{0}' is empty")]
	EmptyModel(String),

	#[error("Rank {rank} out of range, only {groups} distinct count values")]
	RankOutOfRange { rank: usize, groups: usize },
}

pub type SmResult<T> = Result<T, StylomError>;
