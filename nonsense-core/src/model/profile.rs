use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::analyzer::CorpusAnalyzer;
use super::sampler::WeightedSampler;
use crate::io;

/// Matched punctuation alphabet. Even-indexed characters open a pair and
/// are immediately followed by their closing character.
pub const MATCHED_PUNCTUATION: &str = "<>[]{}()\"\"";

/// Characters that may appear inside a sentence.
pub const MIDLINE_PUNCTUATION: &str = "`¬¦£$%^&*_+-=€;:'@#~/\\|";

/// Characters that terminate a sentence.
pub const ENDING_PUNCTUATION: &str = "!?.…";

/// The full statistical fingerprint of a corpus: one weighted sampler per
/// surface feature, plus the inferred vowel characters.
///
/// Built once per session, either by `CorpusAnalyzer` or from the built-in
/// defaults, and then consumed read-mostly by an `Author` (the letters
/// sampler self-adjusts through its decay flag). Serializable so a learned
/// profile can be cached next to its corpus and reloaded quickly.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StatisticalProfile {
	/// Letter frequencies; decaying, repeat-suppressed.
	pub letters: WeightedSampler<char>,
	/// Word lengths in characters.
	pub word_sizes: WeightedSampler<usize>,
	/// Sentence lengths in words.
	pub sentence_sizes: WeightedSampler<usize>,
	/// Paragraph lengths in sentences.
	pub paragraph_sizes: WeightedSampler<usize>,
	/// Consonant/vowel skeletons, strings over {c, v}.
	pub word_shapes: WeightedSampler<String>,
	/// Punctuation drawn inside a sentence.
	pub midline_punctuation: WeightedSampler<String>,
	/// Punctuation drawn at the end of a sentence.
	pub endline_punctuation: WeightedSampler<String>,
	/// Opener/closer pairs that must close within one sentence.
	pub matched_punctuation: WeightedSampler<(char, char)>,
	/// Characters that behave like vowels, in discovery order.
	pub vowels: String,
}

impl StatisticalProfile {
	/// Builds a profile from the corpus file at `filepath`.
	///
	/// Follows the binary-cache convention: when `<stem>.bin` exists next
	/// to the corpus it is deserialized instead of re-analyzing, and a
	/// fresh analysis is serialized back for the next run.
	///
	/// Never fails: an unreadable corpus falls back to the built-in
	/// default profile, and cache problems only cost the speedup.
	pub fn from_corpus<P: AsRef<Path>>(filepath: P) -> Self {
		let filepath = filepath.as_ref();
		let cache_path = io::build_output_path(filepath, "bin").ok();

		if let Some(cache) = cache_path.as_ref().filter(|path| path.exists()) {
			match fs::read(cache) {
				Ok(bytes) => match postcard::from_bytes(&bytes) {
					Ok(profile) => {
						log::info!("loaded cached profile {}", cache.display());
						return profile;
					}
					Err(error) => {
						log::warn!("ignoring corrupt profile cache {}: {}", cache.display(), error)
					}
				},
				Err(error) => log::warn!("cannot read profile cache {}: {}", cache.display(), error),
			}
		}

		let lines = match io::read_file(filepath) {
			Ok(lines) => lines,
			Err(error) => {
				log::warn!(
					"cannot read corpus {}: {}; using the default profile",
					filepath.display(),
					error
				);
				return Self::default();
			}
		};

		let profile = CorpusAnalyzer::analyze(&lines);

		if let Some(cache) = &cache_path {
			match postcard::to_stdvec(&profile) {
				Ok(bytes) => {
					if let Err(error) = fs::write(cache, bytes) {
						log::warn!("cannot write profile cache {}: {}", cache.display(), error);
					}
				}
				Err(error) => log::warn!("cannot serialize profile: {}", error),
			}
		}

		profile
	}
}

impl Default for StatisticalProfile {
	/// The built-in English profile, used whole when no corpus is given
	/// and feature by feature when a corpus leaves a sampler empty.
	fn default() -> Self {
		let mut letters = WeightedSampler::with_flags(true, true);
		for (letter, weight) in [
			('a', 110.0),
			('b', 20.0),
			('c', 37.0),
			('d', 57.0),
			('e', 171.0),
			('f', 30.0),
			('g', 27.0),
			('h', 82.0),
			('i', 94.0),
			('j', 2.0),
			('k', 10.0),
			('l', 54.0),
			('m', 32.0),
			('n', 91.0),
			('o', 101.0),
			('p', 26.0),
			('q', 1.0),
			('r', 81.0),
			('s', 86.0),
			('t', 122.0),
			('u', 37.0),
			('v', 13.0),
			('w', 32.0),
			('x', 2.0),
			('y', 27.0),
			('z', 1.0),
		] {
			letters.add(letter, weight);
		}

		let mut word_sizes = WeightedSampler::with_flags(false, true);
		for (size, weight) in [
			(1, 3.0),
			(2, 8.0),
			(3, 15.0),
			(4, 28.0),
			(5, 31.0),
			(6, 18.0),
			(7, 11.0),
			(8, 6.0),
			(9, 2.0),
			(10, 2.0),
			(11, 1.0),
			(12, 1.0),
		] {
			word_sizes.add(size, weight);
		}

		let mut sentence_sizes = WeightedSampler::with_flags(false, true);
		for (size, weight) in [(5, 4.0), (10, 6.0), (20, 5.0), (25, 3.0), (40, 1.0)] {
			sentence_sizes.add(size, weight);
		}

		let mut paragraph_sizes = WeightedSampler::with_flags(false, true);
		for (size, weight) in [
			(5, 7.0),
			(8, 10.0),
			(10, 7.0),
			(12, 5.0),
			(14, 4.0),
			(15, 2.0),
			(20, 1.0),
			(50, 1.0),
			(90, 1.0),
		] {
			paragraph_sizes.add(size, weight);
		}

		let mut word_shapes = WeightedSampler::with_flags(false, true);
		for (shape, weight) in [
			("ccvc", 8.0),
			("vcv", 3.0),
			("cvvc", 4.0),
			("cv", 3.0),
			("cvcc", 10.0),
			("v", 1.0),
		] {
			word_shapes.add(shape.to_owned(), weight);
		}

		let mut midline_punctuation = WeightedSampler::new();
		for (mark, weight) in [(",", 40.0), (";", 1.0), (":", 7.0), (" -", 8.0), ("~", 2.0)] {
			midline_punctuation.add(mark.to_owned(), weight);
		}

		let mut endline_punctuation = WeightedSampler::new();
		for (mark, weight) in [(".", 80.0), ("?", 9.0), ("...", 3.0), ("!", 2.0), ("!?", 1.0)] {
			endline_punctuation.add(mark.to_owned(), weight);
		}

		let mut matched_punctuation = WeightedSampler::new();
		matched_punctuation.add(('(', ')'), 5.0);
		matched_punctuation.add(('"', '"'), 20.0);

		Self {
			letters,
			word_sizes,
			sentence_sizes,
			paragraph_sizes,
			word_shapes,
			midline_punctuation,
			endline_punctuation,
			matched_punctuation,
			vowels: "aeiou".to_owned(),
		}
	}
}

impl fmt::Display for StatisticalProfile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "[StatisticalProfile]")?;
		writeln!(f, "Letters:\n{}", self.letters)?;
		writeln!(f, "Word shapes:\n{}", self.word_shapes)?;
		writeln!(f, "Word sizes:\n{}", self.word_sizes)?;
		writeln!(f, "Sentence sizes:\n{}", self.sentence_sizes)?;
		writeln!(f, "Paragraph sizes:\n{}", self.paragraph_sizes)?;
		writeln!(f, "Midline punctuation:\n{}", self.midline_punctuation)?;
		writeln!(f, "Endline punctuation:\n{}", self.endline_punctuation)?;
		writeln!(f, "Matched punctuation:")?;
		for (pair, weight) in self.matched_punctuation.iter() {
			writeln!(f, "{}{} - {}", pair.0, pair.1, weight)?;
		}
		writeln!(f, "Vowels: {}", self.vowels)
	}
}
