//! Word-level Markov chain sentence generation library.
//!
//! This crate provides a small first-order Markov chain system including:
//! - Line tokenization into adjacent word pairs
//! - Transition frequency counting and model merging
//! - Normalization of counts into probability distributions
//! - Weighted-random sentence generation
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core Markov model types and generation logic.
///
/// This module exposes the frequency and sentence models while keeping
/// internal per-word count tables private.
pub mod model;

/// I/O utilities (corpus file loading, path helpers).
///
/// Used by the binaries to open and enumerate corpus files.
pub mod io;
