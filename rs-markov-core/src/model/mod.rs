//! Top-level module for the Markov sentence generation system.
//!
//! This module provides a word-level first-order Markov chain, including:
//! - Line tokenization into digraphs (`digraph`)
//! - Raw transition counting and merging (`FrequencyModel`)
//! - Normalized probability distributions and sampling (`SentenceModel`)
//! - Internal per-word count tables (`Transitions`)
//! - Typed error kinds (`ModelError`)

/// Error kinds raised by model construction and generation.
pub mod error;

/// Line tokenization into ordered adjacent word pairs.
pub mod digraph;

/// Raw transition frequency model.
///
/// Handles digraph counting, line ingestion, model merging and
/// normalization into a `SentenceModel`.
pub mod frequency_model;

/// Normalized probability model and sentence sampling.
///
/// Supports weighted-random successor picks and chained generation
/// with a random or caller-supplied start word.
pub mod sentence_model;

/// Internal representation of a single word's successor counts.
///
/// Tracks outgoing transitions and supports merging and normalization.
/// This module is not exposed publicly.
mod transitions;
