use std::collections::HashMap;
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use super::digraph::{digraphs_from, Digraph};
use super::error::ModelError;
use super::sentence_model::SentenceModel;
use super::transitions::Transitions;

/// Raw transition frequency model for a whole corpus.
///
/// The `FrequencyModel` maps each observed word to the count table of the
/// words seen immediately after it. It is the mutable accumulator of the
/// corpus scan and is discarded once normalized into a `SentenceModel`.
///
/// # Responsibilities
/// - Count digraphs from tokenized lines
/// - Accumulate counts across a whole line source, one line at a time
/// - Merge with another frequency model, summing overlapping counts
/// - Normalize every word's counts into probability distributions
///
/// # Invariants
/// - Each key maps to the count table owned by that same word
/// - Counts are additive and never decrease
/// - Every stored table holds at least one observation
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FrequencyModel {
	/// Mapping from a word to its successor count table.
	words: HashMap<String, Transitions>,
}

impl FrequencyModel {
	/// Creates a new empty frequency model.
	pub fn new() -> Self {
		Self { words: HashMap::new() }
	}

	/// Builds a frequency model from a sequence of digraphs.
	///
	/// Every occurrence is accumulated; repeated digraphs increase their
	/// count rather than being deduplicated. The final counts do not
	/// depend on the input order.
	pub fn from_digraphs<'a, I>(digraphs: I) -> Self
	where
		I: IntoIterator<Item = Digraph<'a>>,
	{
		let mut model = Self::new();
		for digraph in digraphs {
			model.add_digraph(digraph);
		}
		model
	}

	/// Tokenizes one line and accumulates its digraphs into the model.
	///
	/// Lines with fewer than two words contribute nothing.
	pub fn add_line(&mut self, line: &str) {
		for digraph in digraphs_from(line) {
			self.add_digraph(digraph);
		}
	}

	/// Records a single observed adjacency.
	fn add_digraph(&mut self, digraph: Digraph<'_>) {
		self.words
			.entry(digraph.first.to_owned())
			.or_insert_with(|| Transitions::new(digraph.first))
			.record(digraph.second);
	}

	/// Builds a frequency model by scanning a line source in order.
	///
	/// Lines are consumed one at a time; the running model is the only
	/// state kept during the scan. An empty source, or one made entirely
	/// of lines with fewer than two words, yields an empty model.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut model = Self::new();
		let mut scanned = 0usize;
		for line in lines {
			model.add_line(line.as_ref());
			scanned += 1;
		}
		log::debug!("scanned {} lines into {} distinct words", scanned, model.len());
		model
	}

	/// Builds a frequency model by streaming lines from a reader.
	///
	/// # Errors
	/// Returns `ModelError::Io` if reading a line fails.
	pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ModelError> {
		let mut model = Self::new();
		let mut scanned = 0usize;
		for line in reader.lines() {
			model.add_line(&line?);
			scanned += 1;
		}
		log::debug!("scanned {} lines into {} distinct words", scanned, model.len());
		Ok(model)
	}

	/// Merges another frequency model into this one.
	///
	/// Words present on one side only are carried through unchanged; words
	/// present on both sides have their count tables merged, summing the
	/// counts of overlapping successors. No word is ever lost, and the
	/// per-key totals do not depend on the merge order.
	///
	/// # Errors
	/// Propagates `ModelError::WordMismatch` from the table merge. The
	/// tables are keyed by their owning word, so this cannot trigger
	/// without corrupting the map first.
	pub fn merge(&mut self, other: &Self) -> Result<(), ModelError> {
		for (word, transitions) in &other.words {
			if let Some(existing) = self.words.get_mut(word) {
				existing.merge(transitions)?;
			} else {
				self.words.insert(word.clone(), transitions.clone());
			}
		}

		Ok(())
	}

	/// Returns the recorded count for the `(word, successor)` adjacency.
	pub fn count(&self, word: &str, successor: &str) -> usize {
		self.words.get(word).map_or(0, |transitions| transitions.count(successor))
	}

	/// Returns the total number of observations for `word`.
	///
	/// Equals the number of times `word` appeared as the first element of
	/// a digraph.
	pub fn total(&self, word: &str) -> usize {
		self.words.get(word).map_or(0, Transitions::total)
	}

	/// Iterates over `(successor, count)` pairs recorded for `word`.
	///
	/// Returns `None` if the word was never observed in first position.
	pub fn successors(&self, word: &str) -> Option<impl Iterator<Item = (&str, usize)>> {
		self.words.get(word).map(Transitions::successors)
	}

	/// Iterates over every word observed in first position.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.words.keys().map(String::as_str)
	}

	/// Returns the number of distinct words with outgoing transitions.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// Returns `true` if no digraph was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Normalizes every word's counts, consuming the raw model.
	///
	/// # Errors
	/// Returns `ModelError::InvalidModelState` if a word holds an empty
	/// count table. Counting never produces one, so this only triggers on
	/// models assembled by hand.
	pub fn normalize(self) -> Result<SentenceModel, ModelError> {
		let mut distributions = HashMap::with_capacity(self.words.len());
		for (word, transitions) in self.words {
			distributions.insert(word, transitions.normalize()?);
		}

		log::debug!("normalized model with {} words", distributions.len());
		Ok(SentenceModel::from_distributions(distributions))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn model_from(lines: &[&str]) -> FrequencyModel {
		FrequencyModel::from_lines(lines)
	}

	#[test]
	fn test_count_digraphs() {
		let model = FrequencyModel::from_digraphs(digraphs_from("the cat sat on the mat"));

		assert_eq!(model.count("the", "cat"), 1);
		assert_eq!(model.count("the", "mat"), 1);
		assert_eq!(model.count("cat", "sat"), 1);
		assert_eq!(model.count("sat", "on"), 1);
		assert_eq!(model.count("on", "the"), 1);
		// "mat" is line-final and never gains outgoing transitions
		assert_eq!(model.total("mat"), 0);
	}

	#[test]
	fn test_totals_match_first_position_occurrences() {
		let model = model_from(&["a b a b a c"]);
		// "a" appears three times in first position
		assert_eq!(model.total("a"), 3);
		assert_eq!(model.count("a", "b"), 2);
		assert_eq!(model.count("a", "c"), 1);
		assert_eq!(model.total("b"), 2);
	}

	#[test]
	fn test_degenerate_lines_ignored() {
		let model = model_from(&["", "word", "  ", "two words"]);
		assert_eq!(model.len(), 1);
		assert_eq!(model.count("two", "words"), 1);
	}

	#[test]
	fn test_empty_source_yields_empty_model() {
		let model = FrequencyModel::from_lines(std::iter::empty::<&str>());
		assert!(model.is_empty());
	}

	#[test]
	fn test_from_reader() {
		let corpus = "the cat sat\nthe dog sat\n";
		let model = FrequencyModel::from_reader(corpus.as_bytes()).unwrap();
		assert_eq!(model.count("the", "cat"), 1);
		assert_eq!(model.count("the", "dog"), 1);
		assert_eq!(model.count("cat", "sat"), 1);
		assert_eq!(model.count("dog", "sat"), 1);
	}

	#[test]
	fn test_merge_carries_and_sums() {
		let mut left = model_from(&["the cat sat"]);
		let right = model_from(&["the dog sat"]);

		left.merge(&right).unwrap();
		assert_eq!(left.count("the", "cat"), 1);
		assert_eq!(left.count("the", "dog"), 1);
		assert_eq!(left.total("the"), 2);
		assert_eq!(left.count("cat", "sat"), 1);
		assert_eq!(left.count("dog", "sat"), 1);
	}

	#[test]
	fn test_merge_associative_and_commutative_totals() {
		let a = model_from(&["x y z"]);
		let b = model_from(&["x z y x"]);
		let c = model_from(&["y x"]);

		// (a + b) + c
		let mut left = a.clone();
		left.merge(&b).unwrap();
		left.merge(&c).unwrap();

		// (c + b) + a
		let mut right = c.clone();
		right.merge(&b).unwrap();
		right.merge(&a).unwrap();

		for word in ["x", "y", "z"] {
			assert_eq!(left.total(word), right.total(word));
			for successor in ["x", "y", "z"] {
				assert_eq!(left.count(word, successor), right.count(word, successor));
			}
		}
	}

	#[test]
	fn test_normalize_consumes_into_sentence_model() {
		let model = model_from(&["the cat sat", "the dog sat"]);
		let normalized = model.normalize().unwrap();

		let the = normalized.distribution("the").unwrap();
		assert_eq!(the.probability("cat"), Some(0.5));
		assert_eq!(the.probability("dog"), Some(0.5));
		assert_eq!(normalized.distribution("cat").unwrap().probability("sat"), Some(1.0));
	}
}
