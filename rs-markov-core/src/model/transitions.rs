use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::sentence_model::Distribution;

/// Successor count table for a single word.
///
/// A `Transitions` records every word observed immediately after its
/// owning word, together with how many times that adjacency occurred.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities
/// - Accumulate successor occurrences during counting
/// - Merge with another table owned by the same word
/// - Normalize raw counts into a probability `Distribution`
///
/// ## Invariants
/// - All successors belong to the same `word`
/// - Each stored occurrence count is strictly positive
/// - Counts only ever increase
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Transitions {
	/// The word owning this table.
	word: String,
	/// Outgoing transitions indexed by the successor word.
	/// The value represents how many times this adjacency was observed.
	/// Example: { "cat" => 3, "dog" => 1 }
	counts: HashMap<String, usize>,
}

impl Transitions {
	/// Creates a new empty count table for the given word.
	pub fn new(word: &str) -> Self {
		Self {
			word: word.to_owned(),
			counts: HashMap::new(),
		}
	}

	/// Returns the word owning this table.
	pub fn word(&self) -> &str {
		&self.word
	}

	/// Records one occurrence of a transition toward `successor`.
	///
	/// - If the successor was already seen, its occurrence count is increased.
	/// - Otherwise, a new entry is created with an initial count of 1.
	pub fn record(&mut self, successor: &str) {
		*self.counts.entry(successor.to_owned()).or_insert(0) += 1;
	}

	/// Returns the recorded count for `successor`, 0 if never observed.
	pub fn count(&self, successor: &str) -> usize {
		self.counts.get(successor).copied().unwrap_or(0)
	}

	/// Returns the sum of all successor counts.
	///
	/// Equals the number of times the owning word appeared as the first
	/// element of a digraph.
	pub fn total(&self) -> usize {
		self.counts.values().sum()
	}

	/// Returns the number of distinct successors.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// Returns `true` if no transition was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Iterates over `(successor, count)` pairs in no particular order.
	pub fn successors(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(successor, count)| (successor.as_str(), *count))
	}

	/// Merges another count table into this one.
	///
	/// Both tables must belong to the same word. Occurrence counts for
	/// successors present on both sides are summed; successors present on
	/// one side only are carried through unchanged. No successor is ever
	/// lost, and the operation is associative and commutative over the
	/// per-successor totals.
	///
	/// # Errors
	/// Returns `ModelError::WordMismatch` if the owning words differ.
	pub fn merge(&mut self, other: &Self) -> Result<(), ModelError> {
		if self.word != other.word {
			return Err(ModelError::WordMismatch {
				expected: self.word.clone(),
				found: other.word.clone(),
			});
		}

		for (successor, count) in &other.counts {
			*self.counts.entry(successor.clone()).or_insert(0) += *count;
		}

		Ok(())
	}

	/// Normalizes the raw counts into a probability distribution.
	///
	/// Each successor's probability is its count divided by the total,
	/// so the resulting probabilities sum to 1.0 (within floating-point
	/// tolerance). The input counts are not mutated.
	///
	/// # Errors
	/// Returns `ModelError::InvalidModelState` if the table is empty.
	/// Every table produced by counting holds at least one observation,
	/// so this only triggers on hand-built tables.
	pub fn normalize(&self) -> Result<Distribution, ModelError> {
		let total = self.total();
		if total == 0 {
			return Err(ModelError::InvalidModelState { word: self.word.clone() });
		}

		let probabilities = self
			.counts
			.iter()
			.map(|(successor, count)| (successor.clone(), *count as f64 / total as f64))
			.collect();

		Ok(Distribution::new(probabilities))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_record_counts() {
		let mut transitions = Transitions::new("the");
		transitions.record("cat");
		transitions.record("dog");
		transitions.record("cat");

		assert_eq!(transitions.count("cat"), 2);
		assert_eq!(transitions.count("dog"), 1);
		assert_eq!(transitions.count("mat"), 0);
		assert_eq!(transitions.total(), 3);
		assert_eq!(transitions.len(), 2);
	}

	#[test]
	fn test_merge_sums_overlapping_and_keeps_disjoint() {
		let mut left = Transitions::new("the");
		left.record("cat");
		left.record("cat");
		left.record("dog");

		let mut right = Transitions::new("the");
		right.record("cat");
		right.record("mat");

		left.merge(&right).unwrap();
		assert_eq!(left.count("cat"), 3);
		assert_eq!(left.count("dog"), 1);
		assert_eq!(left.count("mat"), 1);
		assert_eq!(left.total(), 5);
	}

	#[test]
	fn test_merge_word_mismatch() {
		let mut left = Transitions::new("the");
		let right = Transitions::new("a");
		assert!(matches!(
			left.merge(&right),
			Err(ModelError::WordMismatch { .. })
		));
	}

	#[test]
	fn test_merge_associative_and_commutative_totals() {
		let mut a = Transitions::new("w");
		a.record("x");
		a.record("y");
		let mut b = Transitions::new("w");
		b.record("x");
		let mut c = Transitions::new("w");
		c.record("y");
		c.record("z");

		// (a + b) + c
		let mut left = a.clone();
		left.merge(&b).unwrap();
		left.merge(&c).unwrap();

		// a + (b + c), with b and c swapped for good measure
		let mut tail = c.clone();
		tail.merge(&b).unwrap();
		let mut right = a.clone();
		right.merge(&tail).unwrap();

		for successor in ["x", "y", "z"] {
			assert_eq!(left.count(successor), right.count(successor));
		}
		assert_eq!(left.total(), right.total());
	}

	#[test]
	fn test_normalize_probabilities() {
		let mut transitions = Transitions::new("the");
		transitions.record("cat");
		transitions.record("cat");
		transitions.record("cat");
		transitions.record("dog");

		let distribution = transitions.normalize().unwrap();
		assert_eq!(distribution.probability("cat"), Some(0.75));
		assert_eq!(distribution.probability("dog"), Some(0.25));

		let sum: f64 = distribution.iter().map(|(_, p)| p).sum();
		assert!((sum - 1.0).abs() < 1e-9);
	}

	#[test]
	fn test_normalize_single_repeated_pair() {
		let mut transitions = Transitions::new("a");
		for _ in 0..7 {
			transitions.record("b");
		}

		let distribution = transitions.normalize().unwrap();
		assert_eq!(distribution.len(), 1);
		assert_eq!(distribution.probability("b"), Some(1.0));
	}

	#[test]
	fn test_normalize_empty_fails_fast() {
		let empty = Transitions::new("orphan");
		assert!(matches!(
			empty.normalize(),
			Err(ModelError::InvalidModelState { word }) if word == "orphan"
		));
	}
}
