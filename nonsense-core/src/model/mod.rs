//! Top-level module for the nonsense generation system.
//!
//! This crate learns the surface statistics of a sample corpus and writes
//! pseudo-text that mimics them, including:
//! - Weighted random sampling with decay and repeat suppression
//!   (`WeightedSampler`)
//! - Corpus analysis into a statistical profile (`CorpusAnalyzer`,
//!   `StatisticalProfile`)
//! - Unsupervised vowel discovery for unknown alphabets
//! - Word, sentence and paragraph synthesis (`Author`)

/// Weighted random sampling over arbitrary tokens.
///
/// Supports per-draw weight decay, single-retry repeat suppression, and
/// biased draws over a token subset.
pub mod sampler;

/// The statistical fingerprint of a corpus: one sampler per surface
/// feature plus the inferred vowel set, with built-in defaults and a
/// binary cache convention.
pub mod profile;

/// Corpus analysis. Streams lines into the profile samplers, with a
/// parallel character pass and a sequential structural pass.
pub mod analyzer;

/// Unsupervised vowel discovery from letter frequencies and word
/// co-occurrence.
pub mod vowels;

/// Session tunables: reuse, capitalization and punctuation chances, and
/// the optional random seed.
pub mod generation_input;

/// The generation session: vocabulary management and word, sentence and
/// paragraph synthesis against a profile.
pub mod author;
