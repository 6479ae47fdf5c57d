use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SmResult, StylomError};

/// Represents one author's n-gram frequency vector.
///
/// A `FrequencyModel` maps each n-gram key (the n tokens joined by a
/// single space) to its number of occurrences, aggregated across all
/// works the vector was fed.
///
/// Conceptually, this is a sparse count vector over the space of
/// n-grams; similarity between two of them is measured by the cosine
/// of the angle they form.
///
/// ## Responsibilities:
/// - Accumulate n-gram occurrences from token streams
/// - Compute the vector norm and cosine similarity against another model
/// - Group n-grams into frequency ranks
/// - Merge with another model (ex. parallel analysis support)
///
/// ## Invariants
/// - Every stored count is strictly positive
/// - `total` always equals the sum of all stored counts
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FrequencyModel {
	/// N-gram key (tokens joined by a single space) to occurrence count.
	/// Example: { "the cat" => 42, "cat sat" => 3 }
	counts: HashMap<String, u64>,
	/// Sum of all occurrence counts.
	total: u64,
}

impl FrequencyModel {
	/// Creates a new empty frequency model.
	pub fn new() -> Self {
		Self {
			counts: HashMap::new(),
			total: 0,
		}
	}

	/// Records one occurrence of an n-gram key.
	pub fn add_ngram(&mut self, ngram: &str) {
		*self.counts.entry(ngram.to_owned()).or_insert(0) += 1;
		self.total += 1;
	}

	/// Feeds a whole work's token stream into the model.
	///
	/// Slides a window of `ngram_size` tokens over the stream with a
	/// stride of 1, producing `len - ngram_size + 1` windows, and counts
	/// each window's key.
	///
	/// # Notes
	/// - A work shorter than `ngram_size` tokens contributes nothing.
	/// - Works are not normalized individually before aggregation:
	///   longer works weigh more in the final vector. This is the
	///   documented behavior, not an accident.
	pub fn add_work(&mut self, tokens: &[String], ngram_size: usize) {
		if ngram_size == 0 || tokens.len() < ngram_size {
			// Too short, no n-grams to count
			return;
		}

		for window in tokens.windows(ngram_size) {
			let key = window.join(" ");
			self.add_ngram(&key);
		}
	}

	/// Returns the occurrence count of an n-gram key (0 if absent).
	pub fn count(&self, ngram: &str) -> u64 {
		self.counts.get(ngram).copied().unwrap_or(0)
	}

	/// Returns the sum of all occurrence counts.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Returns the number of distinct n-gram keys.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// True if the model holds no n-grams at all.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(ngram, count)` pairs in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.counts.iter().map(|(key, &count)| (key.as_str(), count))
	}

	/// Euclidean norm of the count vector: `sqrt(Σ count²)`.
	pub fn norm(&self) -> f64 {
		self.counts
			.values()
			.map(|&count| (count as f64) * (count as f64))
			.sum::<f64>()
			.sqrt()
	}

	/// Cosine similarity between this vector and `other`.
	///
	/// `cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)`, where the dot product
	/// runs over the union of keys (absent keys contribute 0, so only
	/// the intersection is actually walked).
	///
	/// For non-negative count vectors the result lies in [0, 1].
	///
	/// # Errors
	/// Returns `DegenerateVector` if either vector has a zero norm.
	/// A 0/0 is never silently coerced to 0.0 or propagated as NaN.
	pub fn cosine_similarity(&self, other: &Self) -> SmResult<f64> {
		let self_norm = self.norm();
		if self_norm == 0.0 {
			return Err(StylomError::DegenerateVector("left operand".to_owned()));
		}
		let other_norm = other.norm();
		if other_norm == 0.0 {
			return Err(StylomError::DegenerateVector("right operand".to_owned()));
		}

		// Walk the smaller map, look up in the larger one.
		let (small, large) = if self.counts.len() <= other.counts.len() {
			(&self.counts, &other.counts)
		} else {
			(&other.counts, &self.counts)
		};
		let dot: f64 = small
			.iter()
			.filter_map(|(key, &count)| {
				large.get(key).map(|&c| (count as f64) * (c as f64))
			})
			.sum();

		Ok(dot / (self_norm * other_norm))
	}

	/// Merges another frequency model into this one.
	///
	/// Occurrence counts for matching keys are summed.
	///
	/// This method is intended for parallel analysis, where partial
	/// models built on separate threads are combined into a single one.
	pub fn merge(&mut self, other: &Self) {
		for (key, &count) in &other.counts {
			*self.counts.entry(key.clone()).or_insert(0) += count;
		}
		self.total += other.total;
	}

	/// Returns all `(ngram, count)` pairs sorted by descending count,
	/// ties broken by key for stable output.
	pub fn sorted_counts(&self) -> Vec<(String, u64)> {
		let mut pairs: Vec<(String, u64)> = self
			.counts
			.iter()
			.map(|(key, &count)| (key.clone(), count))
			.collect();
		pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
		pairs
	}

	/// Returns the group of n-grams occupying the 1-indexed frequency
	/// rank `rank`, each split back into its tokens.
	///
	/// Ranks are formed by distinct count values in descending order:
	/// every n-gram sharing the highest count occupies rank 1, the
	/// n-grams with the next distinct count occupy rank 2, and so on.
	///
	/// # Errors
	/// Returns `RankOutOfRange` if `rank` is 0 or exceeds the number of
	/// distinct count values.
	pub fn rank_group(&self, rank: usize) -> SmResult<Vec<Vec<String>>> {
		let sorted = self.sorted_counts();

		let mut groups: Vec<(u64, Vec<Vec<String>>)> = Vec::new();
		for (key, count) in sorted {
			let tokens: Vec<String> = key.split(' ').map(str::to_owned).collect();
			match groups.last_mut() {
				Some((value, members)) if *value == count => members.push(tokens),
				_ => groups.push((count, vec![tokens])),
			}
		}

		if rank == 0 || rank > groups.len() {
			return Err(StylomError::RankOutOfRange {
				rank,
				groups: groups.len(),
			});
		}

		Ok(groups.swap_remove(rank - 1).1)
	}
}

/// The set of frequency models produced by one analysis pass,
/// keyed by author name.
///
/// This is an explicit value object: it is returned by `analyze` and
/// passed into every subsequent query, so two analyses of different
/// corpora (or with different n-gram sizes) can coexist safely.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AuthorModels {
	models: HashMap<String, FrequencyModel>,
}

impl AuthorModels {
	/// Creates an empty model set.
	pub fn new() -> Self {
		Self {
			models: HashMap::new(),
		}
	}

	/// Inserts (or replaces) an author's model.
	pub fn insert(&mut self, author: String, model: FrequencyModel) {
		self.models.insert(author, model);
	}

	/// Returns an author's model.
	///
	/// # Errors
	/// Returns `UnknownAuthor` if no model exists for `author`.
	pub fn get(&self, author: &str) -> SmResult<&FrequencyModel> {
		self.models
			.get(author)
			.ok_or_else(|| StylomError::UnknownAuthor(author.to_owned()))
	}

	/// True if a model (possibly empty) exists for `author`.
	pub fn contains(&self, author: &str) -> bool {
		self.models.contains_key(author)
	}

	/// Iterates over `(author, model)` pairs in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FrequencyModel)> {
		self.models.iter().map(|(author, model)| (author.as_str(), model))
	}

	/// Number of authors in the set.
	pub fn len(&self) -> usize {
		self.models.len()
	}

	/// True if the set holds no authors.
	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}
}
