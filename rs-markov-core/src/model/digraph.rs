/// An ordered pair of adjacent words observed in a line.
///
/// Digraphs borrow from the tokenized line and are consumed immediately
/// by the frequency model. They never outlive the line they came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Digraph<'a> {
	/// The word observed first.
	pub first: &'a str,
	/// The word immediately following `first`.
	pub second: &'a str,
}

/// Splits a line into its ordered sequence of adjacent word pairs.
///
/// Words are separated by whitespace. Lines with fewer than two words
/// produce no digraphs.
///
/// # Notes
/// - Pure function, no errors. A degenerate line is not a failure.
/// - For a line of `n >= 2` words the result holds exactly `n - 1` pairs,
///   and each pair's `first` equals the previous pair's `second`.
pub fn digraphs_from(line: &str) -> Vec<Digraph<'_>> {
	let words: Vec<&str> = line.split_whitespace().collect();
	if words.len() < 2 {
		return Vec::new();
	}

	words
		.windows(2)
		.map(|pair| Digraph { first: pair[0], second: pair[1] })
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_line() {
		assert!(digraphs_from("").is_empty());
	}

	#[test]
	fn test_single_word() {
		assert!(digraphs_from("hello").is_empty());
		assert!(digraphs_from("   hello   ").is_empty());
	}

	#[test]
	fn test_two_words() {
		let digraphs = digraphs_from("hello world");
		assert_eq!(digraphs, vec![Digraph { first: "hello", second: "world" }]);
	}

	#[test]
	fn test_pair_count_and_order() {
		let digraphs = digraphs_from("the cat sat on the mat");
		assert_eq!(digraphs.len(), 5);
		assert_eq!(digraphs[0], Digraph { first: "the", second: "cat" });
		assert_eq!(digraphs[4], Digraph { first: "the", second: "mat" });
	}

	#[test]
	fn test_chain_continuity() {
		let digraphs = digraphs_from("a b c d e");
		for pair in digraphs.windows(2) {
			assert_eq!(pair[0].second, pair[1].first);
		}
	}

	#[test]
	fn test_irregular_whitespace() {
		let digraphs = digraphs_from("  one \t two\t\tthree ");
		assert_eq!(digraphs.len(), 2);
		assert_eq!(digraphs[0], Digraph { first: "one", second: "two" });
		assert_eq!(digraphs[1], Digraph { first: "two", second: "three" });
	}

	#[test]
	fn test_repeated_words_kept() {
		// Repetitions are distinct observations, not duplicates
		let digraphs = digraphs_from("ho ho ho");
		assert_eq!(digraphs.len(), 2);
		assert_eq!(digraphs[0], digraphs[1]);
	}
}
