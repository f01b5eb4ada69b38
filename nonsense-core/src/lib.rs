//! Nonsense novel generation library.
//!
//! This crate synthesizes pseudo-text whose surface statistics — letter
//! frequency, word shape, sentence and paragraph length, punctuation
//! usage — mimic a sample corpus in an arbitrary, possibly unknown,
//! alphabet, with no semantic understanding of the text:
//! - Weighted sampling with adaptive decay and repeat suppression
//! - Corpus analysis into a reusable statistical profile
//! - Unsupervised discovery of the alphabet's vowel-like characters
//! - Word, sentence and paragraph synthesis from the learned profile
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core sampling, analysis and generation logic.
pub mod model;

/// Error types for sampling and generation.
pub mod errors;

/// I/O utilities (file loading, path helpers).
///
/// Only the directory listing helper is exposed; the rest serves the
/// profile cache internally.
pub mod io;
