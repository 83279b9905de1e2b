use std::collections::{BTreeMap, HashMap};
use std::io::BufRead;

use rand::prelude::IteratorRandom;
use rand::Rng;

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::frequency_model::FrequencyModel;

/// Strategy used to select the first word of a generated sentence.
///
/// # Variants
/// - `Random`: pick the start word uniformly at random from the model keys.
/// - `Custom(&str)`: use the provided word as the start of the sentence.
#[derive(PartialEq)]
pub enum StartWord<'a> {
	Random,
	Custom(&'a str),
}

/// Probability distribution over the successors of a single word.
///
/// Probabilities are stored in a sorted map, so iteration order is the
/// lexicographic order of the successor words. The cumulative threshold
/// scan in `pick_at` depends on that order at rounding edge cases.
///
/// ## Invariants
/// - Built from a non-empty count table, never constructed empty
/// - Each probability lies in (0, 1]
/// - Probabilities sum to 1.0 within floating-point tolerance
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Distribution {
	/// Successor probabilities, sorted by successor word.
	probabilities: BTreeMap<String, f64>,
}

impl Distribution {
	/// Wraps normalized probabilities. Construction goes through
	/// `Transitions::normalize`, which rejects empty tables.
	pub(crate) fn new(probabilities: BTreeMap<String, f64>) -> Self {
		Self { probabilities }
	}

	/// Returns the probability of `successor`, if it was ever observed.
	pub fn probability(&self, successor: &str) -> Option<f64> {
		self.probabilities.get(successor).copied()
	}

	/// Iterates over `(successor, probability)` pairs in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.probabilities.iter().map(|(successor, p)| (successor.as_str(), *p))
	}

	/// Returns the number of distinct successors.
	pub fn len(&self) -> usize {
		self.probabilities.len()
	}

	/// Returns `true` if the distribution holds no successor.
	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// Picks the successor whose cumulative probability first exceeds
	/// `threshold`, scanning in sorted successor order.
	///
	/// With a threshold drawn uniformly from `[0, 1)` each successor is
	/// selected with its own probability. If rounding keeps the cumulative
	/// sum at or below the threshold through the whole scan, the last
	/// successor iterated is returned; that path is only reachable when
	/// the sum of probabilities rounds below the threshold.
	///
	/// Returns `None` only for an empty distribution, which normalization
	/// never produces.
	pub fn pick_at(&self, threshold: f64) -> Option<&str> {
		let mut accumulated = 0.0;
		let mut fallback = None;
		for (successor, probability) in &self.probabilities {
			accumulated += probability;
			if accumulated > threshold {
				return Some(successor.as_str());
			}
			fallback = Some(successor.as_str());
		}

		// Rounding fallback: should not happen, but kept for safety.
		fallback
	}

	/// Picks a successor at random, weighted by probability.
	///
	/// The threshold is drawn uniformly from `[0, 1)` using the provided
	/// random source, so callers control determinism.
	pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		self.pick_at(rng.random::<f64>())
	}
}

/// Normalized first-order Markov model over words.
///
/// The `SentenceModel` maps every word observed in first position to the
/// probability distribution of its successors. It is the only artifact
/// that outlives corpus loading and is immutable once built.
///
/// # Responsibilities
/// - Build from a line source (scan, count, normalize)
/// - Expose per-word distributions for inspection
/// - Generate sentences by chained weighted-random picks
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SentenceModel {
	/// Mapping from a word to the distribution of its successors.
	words: HashMap<String, Distribution>,
}

impl SentenceModel {
	/// Wraps normalized distributions produced by `FrequencyModel::normalize`.
	pub(crate) fn from_distributions(words: HashMap<String, Distribution>) -> Self {
		Self { words }
	}

	/// Builds a normalized model by scanning a line source in order.
	///
	/// Equivalent to accumulating a `FrequencyModel` over the lines and
	/// normalizing it once the source is exhausted. An empty or fully
	/// degenerate source yields an empty model.
	///
	/// # Errors
	/// Returns `ModelError::InvalidModelState` if normalization meets an
	/// empty count table. Scanning never produces one.
	pub fn from_lines<I, S>(lines: I) -> Result<Self, ModelError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		FrequencyModel::from_lines(lines).normalize()
	}

	/// Builds a normalized model by streaming lines from a reader.
	///
	/// # Errors
	/// Returns `ModelError::Io` if reading fails.
	pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ModelError> {
		FrequencyModel::from_reader(reader)?.normalize()
	}

	/// Returns the successor distribution of `word`, if `word` was ever
	/// observed in first position.
	pub fn distribution(&self, word: &str) -> Option<&Distribution> {
		self.words.get(word)
	}

	/// Iterates over every word with outgoing transitions.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.words.keys().map(String::as_str)
	}

	/// Returns `true` if `word` has outgoing transitions.
	pub fn contains(&self, word: &str) -> bool {
		self.words.contains_key(word)
	}

	/// Returns the number of words with outgoing transitions.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` if the model holds no word at all.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Generates a sentence using the process-wide random source.
	///
	/// See `generate_with` for the generation contract.
	pub fn generate(&self, start: &StartWord<'_>, length: usize) -> Result<String, ModelError> {
		self.generate_with(start, length, &mut rand::rng())
	}

	/// Generates a sentence of `length` words, joined by single spaces.
	///
	/// Starting from the selected word, each step appends the current word
	/// and advances to a weighted-random successor. The successor of the
	/// final appended word is still resolved, so every appended word must
	/// have outgoing transitions.
	///
	/// # Errors
	/// - `ModelError::EmptyModel` if the model holds no word.
	/// - `ModelError::MissingTransition` if a reached word has no
	///   outgoing transitions (a word only ever observed line-final, or a
	///   custom start word absent from the corpus). The partial sentence
	///   is discarded, not returned.
	pub fn generate_with<R: Rng>(
		&self,
		start: &StartWord<'_>,
		length: usize,
		rng: &mut R,
	) -> Result<String, ModelError> {
		if self.words.is_empty() {
			return Err(ModelError::EmptyModel);
		}

		let mut current: &str = match start {
			StartWord::Random => {
				// Uniform over the model keys; the model is not empty here
				self.words.keys().choose(rng).ok_or(ModelError::EmptyModel)?.as_str()
			}
			StartWord::Custom(word) => word,
		};

		let mut output: Vec<String> = Vec::with_capacity(length);
		for _ in 0..length {
			output.push(current.to_owned());

			let distribution = self
				.words
				.get(current)
				.ok_or_else(|| ModelError::MissingTransition { word: current.to_owned() })?;
			current = distribution
				.pick(rng)
				.ok_or_else(|| ModelError::InvalidModelState { word: current.to_owned() })?;
		}

		log::trace!("generated {} words", output.len());
		Ok(output.join(" "))
	}
}
