use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{SmResult, StylomError};
use crate::io;

/// A corpus of known authors discovered from a directory layout.
///
/// The expected layout is `root/<author-name>/<work-file>`: one
/// directory per author, any file naming inside. The author name is
/// the directory basename; work files are UTF-8 text.
///
/// # Notes
/// - Discovery happens once, when the corpus is opened. Re-pointing an
///   engine at another root rebuilds a fresh `Corpus`.
/// - A missing or unreadable *author* directory never fails the corpus:
///   it simply yields an empty work list, so one bad author cannot
///   prevent the others from being analyzed.
#[derive(Clone, Debug)]
pub struct Corpus {
	root: PathBuf,
	authors: Vec<String>,
}

impl Corpus {
	/// Opens a corpus rooted at `root`.
	///
	/// # Parameters
	/// - `root`: Path to the directory containing one subdirectory per
	///   author. Relative paths are resolved against the current
	///   working directory.
	///
	/// # Errors
	/// Returns `CorpusNotFound` if the resolved path does not exist or
	/// is not a directory.
	pub fn open<P: AsRef<Path>>(root: P) -> SmResult<Self> {
		let root = io::resolve_dir(root);

		if !root.is_dir() {
			return Err(StylomError::CorpusNotFound(root));
		}

		let authors = io::list_dirs(&root)?;
		debug!(root = %root.display(), authors = authors.len(), "corpus discovered");

		Ok(Self { root, authors })
	}

	/// Resolved root directory of the corpus.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Names of the discovered authors (directory basenames),
	/// in no particular order.
	pub fn authors(&self) -> &[String] {
		&self.authors
	}

	/// Full paths of the works directly inside an author's directory.
	///
	/// Fails silently: a missing or unreadable author directory yields
	/// an empty list.
	pub fn works(&self, author: &str) -> Vec<PathBuf> {
		io::list_files(self.root.join(author)).unwrap_or_default()
	}
}
