use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::Rng;

use super::frequency::FrequencyModel;
use crate::error::{SmResult, StylomError};

/// Samples one n-gram from the empirical distribution using weighted
/// random sampling.
///
/// The probability of selecting an n-gram is proportional to its
/// occurrence count: `P(ngram) = count / total`.
///
/// This function performs:
/// - an O(n) scan over the pairs
/// - a cumulative subtraction to select a bucket
fn sample<'a, R: Rng>(pairs: &[(&'a str, u64)], total: u64, rng: &mut R) -> &'a str {
	let mut r = rng.random_range(0..total);

	let mut fallback = pairs[pairs.len() - 1].0;
	for (ngram, count) in pairs {
		if r < *count {
			return ngram;
		}
		r -= count;
		fallback = ngram;
	}

	// Fallback: should not happen, but kept for safety.
	fallback
}

/// Writes `length` n-grams sampled from `model` to the file at
/// `destination`, separated by single spaces, with no trailing space
/// after the final n-gram.
///
/// # Behavior
/// - Each position is sampled independently, with replacement, from
///   the model's frequency distribution. The generator does not
///   condition on the previously emitted n-gram: it is a
///   unigram-over-n-grams sampler, not a Markov chain over states.
///   Deliberate scope limit.
/// - The file handle lives inside this function, so it is released on
///   every path, early error returns included.
///
/// # Errors
/// Returns `EmptyModel` if the model has a zero total count (no
/// probability distribution to sample from), or `Io` on write failure.
pub(super) fn gen_text<P: AsRef<Path>>(
	author: &str,
	model: &FrequencyModel,
	length: usize,
	destination: P,
) -> SmResult<()> {
	let total = model.total();
	if total == 0 {
		return Err(StylomError::EmptyModel(author.to_owned()));
	}

	let pairs: Vec<(&str, u64)> = model.iter().collect();
	let mut rng = rand::rng();

	let file = File::create(destination)?;
	let mut writer = BufWriter::new(file);
	for i in 0..length {
		let ngram = sample(&pairs, total, &mut rng);
		if i < length - 1 {
			write!(writer, "{} ", ngram)?;
		} else {
			write!(writer, "{}", ngram)?;
		}
	}
	writer.flush()?;

	Ok(())
}
