use thiserror::Error;

/// Error kinds raised while building or sampling a Markov model.
///
/// Construction errors (`InvalidModelState`, `WordMismatch`) indicate
/// misuse of the API and are not expected on any corpus-driven path.
/// `MissingTransition` and `EmptyModel` are genuine corpus-dependent
/// conditions that callers are expected to handle.
#[derive(Error, Debug)]
pub enum ModelError {
	/// A word's count table was normalized with no recorded transitions.
	#[error("invalid model state: no transitions recorded for `{word}`")]
	InvalidModelState { word: String },

	/// Generation reached a word that has no outgoing transitions.
	#[error("missing transition: `{word}` has no successors in the model")]
	MissingTransition { word: String },

	/// Generation was requested from a model with no words at all.
	#[error("cannot generate a sentence from an empty model")]
	EmptyModel,

	/// Two count tables belonging to different words were merged.
	#[error("word mismatch: expected `{expected}`, got `{found}`")]
	WordMismatch { expected: String, found: String },

	/// Reading the corpus source failed.
	#[error("corpus read failed: {0}")]
	Io(#[from] std::io::Error),
}
