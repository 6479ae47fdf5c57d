use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use tracing::{debug, info, warn};

use super::corpus::Corpus;
use super::frequency::{AuthorModels, FrequencyModel};
use super::generator;
use super::tokenizer::tokenize;
use crate::error::{SmResult, StylomError};
use crate::io;

/// Highest accepted n-gram size.
const MAX_NGRAM_SIZE: usize = 20;

/// The fixed capability interface of an attribution engine.
///
/// Alternate implementations (different counting or scoring strategies)
/// satisfy this same interface and are selected by the driver at
/// startup; the driver itself never contains analysis logic.
///
/// # Notes
/// - `analyze` returns an explicit `AuthorModels` value rather than
///   mutating hidden engine state, so models built from different
///   corpora or n-gram sizes can coexist and be queried independently.
/// - The trait is object-safe: drivers may hold a `Box<dyn Attribution>`.
pub trait Attribution {
	/// Sets whether punctuation is stripped before tokenization.
	fn set_punctuation_policy(&mut self, strip_punctuation: bool);

	/// Sets the n-gram size used by analysis and every query.
	///
	/// # Errors
	/// Returns `InvalidNgramSize` unless `1 <= ngram_size <= 20`.
	fn set_ngram_size(&mut self, ngram_size: usize) -> SmResult<()>;

	/// Points the engine at a corpus root (`root/<author>/<work>`).
	///
	/// Relative paths are resolved against the current working
	/// directory. Discovery runs immediately and from scratch.
	///
	/// # Errors
	/// Returns `CorpusNotFound` if the root is not a directory.
	fn set_author_root(&mut self, root: &Path) -> SmResult<()>;

	/// Builds one frequency model per author from the current corpus.
	fn analyze(&self) -> SmResult<AuthorModels>;

	/// Scores an unknown text against every author model.
	///
	/// Returns one `(author, score)` pair per author, unordered;
	/// callers needing a ranking must sort.
	fn find_author(&self, models: &AuthorModels, unknown: &Path) -> SmResult<Vec<(String, f64)>>;

	/// Writes `length` n-grams sampled from an author's distribution
	/// to the file at `destination`.
	fn gen_text(
		&self,
		models: &AuthorModels,
		author: &str,
		length: usize,
		destination: &Path,
	) -> SmResult<()>;

	/// Returns the group of n-grams occupying the 1-indexed frequency
	/// rank `rank` for an author, each as its token sequence.
	fn get_nth_element(
		&self,
		models: &AuthorModels,
		author: &str,
		rank: usize,
	) -> SmResult<Vec<Vec<String>>>;
}

/// Default attribution engine over raw n-gram frequency counts.
///
/// # Responsibilities
/// - Hold the analysis configuration (n-gram size, punctuation policy,
///   corpus root)
/// - Build per-author frequency models, one analysis pass at a time
/// - Answer attribution, generation and rank queries against a model set
///
/// # Invariants
/// - `ngram_size` is always in [1, 20]
/// - Counts accumulate across all of an author's works with no
///   per-work normalization: longer works dominate the author's vector
#[derive(Debug)]
pub struct NGramEngine {
	ngram_size: usize,
	strip_punctuation: bool,
	corpus: Option<Corpus>,
}

impl Default for NGramEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl NGramEngine {
	/// Creates an engine with unigram analysis, punctuation kept and
	/// no corpus configured.
	pub fn new() -> Self {
		Self {
			ngram_size: 1,
			strip_punctuation: false,
			corpus: None,
		}
	}

	/// Builds one author's frequency model from their work files.
	///
	/// A work that cannot be read is skipped with a warning; one bad
	/// file never aborts the rest of the author, and one bad author
	/// never aborts the analysis.
	fn build_author_model(
		works: &[PathBuf],
		ngram_size: usize,
		strip_punctuation: bool,
	) -> FrequencyModel {
		let mut model = FrequencyModel::new();
		for work in works {
			let text = match io::read_file(work) {
				Ok(text) => text,
				Err(error) => {
					warn!(work = %work.display(), %error, "skipping unreadable work");
					continue;
				}
			};
			let tokens = tokenize(&text, strip_punctuation);
			model.add_work(&tokens, ngram_size);
		}
		model
	}

	/// Builds the unknown text's frequency vector with the exact same
	/// tokenization and windowing rules as corpus works.
	fn vectorize_file(&self, path: &Path) -> SmResult<FrequencyModel> {
		let text = io::read_file(path)?;
		let tokens = tokenize(&text, self.strip_punctuation);
		let mut vector = FrequencyModel::new();
		vector.add_work(&tokens, self.ngram_size);
		Ok(vector)
	}

	/// Writes one human-readable frequency dump per author into `dir`,
	/// named `<author> Occurenc_mots.txt`, one `<ngram-key> <count>`
	/// pair per line, newline-terminated.
	///
	/// Observability artifact only: nothing in the crate reads these
	/// files back.
	pub fn write_frequency_dumps<P: AsRef<Path>>(
		models: &AuthorModels,
		dir: P,
	) -> SmResult<()> {
		for (author, model) in models.iter() {
			let path = dir.as_ref().join(format!("{} Occurenc_mots.txt", author));
			let file = File::create(&path)?;
			let mut writer = BufWriter::new(file);
			for (ngram, count) in model.sorted_counts() {
				writeln!(writer, "{} {}", ngram, count)?;
			}
			writer.flush()?;
		}
		Ok(())
	}
}

impl Attribution for NGramEngine {
	fn set_punctuation_policy(&mut self, strip_punctuation: bool) {
		self.strip_punctuation = strip_punctuation;
	}

	fn set_ngram_size(&mut self, ngram_size: usize) -> SmResult<()> {
		if ngram_size == 0 || ngram_size > MAX_NGRAM_SIZE {
			return Err(StylomError::InvalidNgramSize(ngram_size));
		}
		self.ngram_size = ngram_size;
		Ok(())
	}

	fn set_author_root(&mut self, root: &Path) -> SmResult<()> {
		self.corpus = Some(Corpus::open(root)?);
		Ok(())
	}

	/// Builds every author model in one batch pass.
	///
	/// # Behavior
	/// - Authors are independent units, so model building is spread
	///   over one thread per chunk of authors and the partial results
	///   are collected over a channel.
	/// - An empty author directory yields an empty but present model.
	fn analyze(&self) -> SmResult<AuthorModels> {
		let corpus = match &self.corpus {
			Some(corpus) => corpus,
			None => {
				warn!("no author root configured, nothing to analyze");
				return Ok(AuthorModels::new());
			}
		};

		// Snapshot each author's work list so threads own their input.
		let assignments: Vec<(String, Vec<PathBuf>)> = corpus
			.authors()
			.iter()
			.map(|author| (author.clone(), corpus.works(author)))
			.collect();

		let cpus = num_cpus::get();
		let chunk_size = (assignments.len() + cpus - 1) / cpus.max(1);

		let mut models = AuthorModels::new();
		if assignments.is_empty() {
			return Ok(models);
		}

		let ngram_size = self.ngram_size;
		let strip_punctuation = self.strip_punctuation;

		let (tx, rx) = mpsc::channel();
		for chunk in assignments.chunks(chunk_size.max(1)) {
			let tx = tx.clone();
			let chunk: Vec<(String, Vec<PathBuf>)> = chunk.to_vec();

			thread::spawn(move || {
				for (author, works) in chunk {
					let model =
						Self::build_author_model(&works, ngram_size, strip_punctuation);
					tx.send((author, model)).expect("Failed to send from thread");
				}
			});
		}
		drop(tx);

		for (author, model) in rx.iter() {
			debug!(
				author = %author,
				ngrams = model.len(),
				total = model.total(),
				"author model built"
			);
			models.insert(author, model);
		}

		info!(authors = models.len(), ngram_size, "analysis complete");
		Ok(models)
	}

	/// # Behavior
	/// 1. Vectorizes the unknown file with the same punctuation and
	///    length rules as corpus works.
	/// 2. Scores cosine similarity against every author model.
	///
	/// # Errors
	/// A zero-norm vector on either side is a `DegenerateVector` error
	/// and fails this call (never coerced to 0 or NaN). Other model
	/// sets remain usable.
	fn find_author(&self, models: &AuthorModels, unknown: &Path) -> SmResult<Vec<(String, f64)>> {
		let unknown_vector = self.vectorize_file(unknown)?;
		if unknown_vector.total() == 0 {
			return Err(StylomError::DegenerateVector(format!(
				"unknown text {}",
				unknown.display()
			)));
		}

		let mut results = Vec::with_capacity(models.len());
		for (author, model) in models.iter() {
			let score = unknown_vector
				.cosine_similarity(model)
				.map_err(|_| StylomError::DegenerateVector(format!("author '{}'", author)))?;
			results.push((author.to_owned(), score));
		}
		Ok(results)
	}

	fn gen_text(
		&self,
		models: &AuthorModels,
		author: &str,
		length: usize,
		destination: &Path,
	) -> SmResult<()> {
		let model = models.get(author)?;
		generator::gen_text(author, model, length, destination)
	}

	fn get_nth_element(
		&self,
		models: &AuthorModels,
		author: &str,
		rank: usize,
	) -> SmResult<Vec<Vec<String>>> {
		let model = models.get(author)?;
		if model.is_empty() {
			return Err(StylomError::EmptyModel(author.to_owned()));
		}
		model.rank_group(rank)
	}
}

#[cfg(test)]
mod tests {

	use std::fs;
	use std::path::Path;

	use super::{Attribution, NGramEngine};
	use crate::error::StylomError;

	/// Builds a `root/<author>/<work>` tree from (author, file, text) triples.
	fn corpus_dir(entries: &[(&str, &str, &str)]) -> tempfile::TempDir {
		let dir = tempfile::tempdir().unwrap();
		for (author, work, text) in entries {
			let author_dir = dir.path().join(author);
			fs::create_dir_all(&author_dir).unwrap();
			fs::write(author_dir.join(work), text).unwrap();
		}
		dir
	}

	fn engine_on(root: &Path, ngram_size: usize) -> NGramEngine {
		let mut engine = NGramEngine::new();
		engine.set_ngram_size(ngram_size).unwrap();
		engine.set_punctuation_policy(true);
		engine.set_author_root(root).unwrap();
		engine
	}

	#[test]
	fn ngram_size_bounds_are_enforced() {
		let mut engine = NGramEngine::new();
		assert!(matches!(
			engine.set_ngram_size(0),
			Err(StylomError::InvalidNgramSize(0))
		));
		assert!(matches!(
			engine.set_ngram_size(21),
			Err(StylomError::InvalidNgramSize(21))
		));
		engine.set_ngram_size(20).unwrap();
	}

	#[test]
	fn missing_root_is_a_typed_error() {
		let dir = tempfile::tempdir().unwrap();
		let mut engine = NGramEngine::new();
		assert!(matches!(
			engine.set_author_root(&dir.path().join("nope")),
			Err(StylomError::CorpusNotFound(_))
		));
	}

	#[test]
	fn analyze_without_root_yields_no_models() {
		let engine = NGramEngine::new();
		assert!(engine.analyze().unwrap().is_empty());
	}

	#[test]
	fn counts_accumulate_across_works_of_one_author() {
		let dir = corpus_dir(&[
			("Verne", "lune.txt", "the cat sat"),
			("Verne", "terre.txt", "the cat ran"),
		]);
		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();

		let model = models.get("Verne").unwrap();
		assert_eq!(model.count("the"), 2);
		assert_eq!(model.count("cat"), 2);
		assert_eq!(model.count("sat"), 1);
		assert_eq!(model.count("ran"), 1);
		assert_eq!(model.total(), 6);
	}

	#[test]
	fn empty_author_directory_yields_present_empty_model() {
		let dir = corpus_dir(&[("Balzac", "a.txt", "the cat sat the cat ran")]);
		fs::create_dir(dir.path().join("Hugo")).unwrap();

		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();

		assert!(models.contains("Hugo"));
		assert!(models.get("Hugo").unwrap().is_empty());
		assert!(!models.get("Balzac").unwrap().is_empty());
	}

	#[test]
	fn short_tokens_only_yield_an_empty_model_and_gen_text_fails() {
		// Every token of "a a b" is filtered out by the length rule,
		// so the model exists but cannot be sampled.
		let dir = corpus_dir(&[("A", "work.txt", "a a b")]);
		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();

		assert!(models.get("A").unwrap().is_empty());
		let out = dir.path().join("out.txt");
		assert!(matches!(
			engine.gen_text(&models, "A", 5, &out),
			Err(StylomError::EmptyModel(_))
		));
	}

	#[test]
	fn rank_query_groups_ties() {
		let dir = corpus_dir(&[("A", "work.txt", "the cat sat the cat ran")]);
		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();

		let mut first = engine.get_nth_element(&models, "A", 1).unwrap();
		first.sort();
		assert_eq!(first, vec![vec!["cat".to_owned()], vec!["the".to_owned()]]);

		let mut second = engine.get_nth_element(&models, "A", 2).unwrap();
		second.sort();
		assert_eq!(second, vec![vec!["ran".to_owned()], vec!["sat".to_owned()]]);

		assert!(matches!(
			engine.get_nth_element(&models, "A", 3),
			Err(StylomError::RankOutOfRange { .. })
		));
		assert!(matches!(
			engine.get_nth_element(&models, "Nobody", 1),
			Err(StylomError::UnknownAuthor(_))
		));
	}

	#[test]
	fn find_author_returns_one_bounded_score_per_author() {
		let dir = corpus_dir(&[
			(
				"Verne",
				"lune.txt",
				"the crew sailed around the moon and the stars kept watch",
			),
			(
				"Balzac",
				"goriot.txt",
				"the pension dining room smelled faintly of soup and old wood",
			),
		]);
		let unknown = dir.path().join("unknown.txt");
		fs::write(&unknown, "the crew watched the moon and the silent stars").unwrap();

		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();
		let mut scores = engine.find_author(&models, &unknown).unwrap();

		assert_eq!(scores.len(), 2);
		for (_, score) in &scores {
			assert!((0.0..=1.0).contains(score));
		}
		// The moon text must score closer to Verne than to Balzac.
		scores.sort_by(|a, b| b.1.total_cmp(&a.1));
		assert_eq!(scores[0].0, "Verne");
	}

	#[test]
	fn scoring_an_authors_own_work_approaches_one() {
		let text = "the crew sailed around the moon while the stars kept \
		            their silent watch over the little projectile";
		let dir = corpus_dir(&[("Verne", "lune.txt", text)]);
		let unknown = dir.path().join("unknown.txt");
		fs::write(&unknown, text).unwrap();

		let engine = engine_on(dir.path(), 2);
		let models = engine.analyze().unwrap();
		let scores = engine.find_author(&models, &unknown).unwrap();
		assert!(scores[0].1 > 0.999, "score = {}", scores[0].1);
	}

	#[test]
	fn degenerate_unknown_text_is_a_typed_error() {
		let dir = corpus_dir(&[("A", "work.txt", "the cat sat the cat ran")]);
		let unknown = dir.path().join("unknown.txt");
		fs::write(&unknown, "a a b").unwrap();

		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();
		assert!(matches!(
			engine.find_author(&models, &unknown),
			Err(StylomError::DegenerateVector(_))
		));
	}

	#[test]
	fn degenerate_author_model_fails_the_whole_call() {
		let dir = corpus_dir(&[("A", "work.txt", "the cat sat the cat ran")]);
		fs::create_dir(dir.path().join("Empty")).unwrap();
		let unknown = dir.path().join("unknown.txt");
		fs::write(&unknown, "the cat came back").unwrap();

		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();
		assert!(matches!(
			engine.find_author(&models, &unknown),
			Err(StylomError::DegenerateVector(_))
		));
	}

	#[test]
	fn frequency_dumps_have_one_pair_per_line() {
		let dir = corpus_dir(&[("A", "work.txt", "the cat sat the cat ran")]);
		let engine = engine_on(dir.path(), 1);
		let models = engine.analyze().unwrap();

		let out = tempfile::tempdir().unwrap();
		NGramEngine::write_frequency_dumps(&models, out.path()).unwrap();

		let dump = fs::read_to_string(out.path().join("A Occurenc_mots.txt")).unwrap();
		assert!(dump.ends_with('\n'));
		let lines: Vec<&str> = dump.lines().collect();
		assert_eq!(lines.len(), 4);
		for line in lines {
			let (ngram, count) = line.rsplit_once(' ').unwrap();
			let count: u64 = count.parse().unwrap();
			assert_eq!(models.get("A").unwrap().count(ngram), count);
		}
	}

	#[test]
	fn bigram_windows_never_span_work_boundaries() {
		// Two works of one author: windows never join tokens of
		// different files.
		let dir = corpus_dir(&[
			("A", "one.txt", "first work"),
			("A", "two.txt", "second work"),
		]);
		let engine = engine_on(dir.path(), 2);
		let models = engine.analyze().unwrap();
		let model = models.get("A").unwrap();

		assert_eq!(model.count("first work"), 1);
		assert_eq!(model.count("second work"), 1);
		assert_eq!(model.count("work second"), 0);
		assert_eq!(model.total(), 2);
	}
}
