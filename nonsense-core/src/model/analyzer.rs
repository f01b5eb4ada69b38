use std::sync::mpsc;
use std::thread;

use indexmap::IndexSet;

use super::profile::{ENDING_PUNCTUATION, MATCHED_PUNCTUATION, MIDLINE_PUNCTUATION, StatisticalProfile};
use super::sampler::WeightedSampler;
use super::vowels::infer_vowels;

/// Builds a `StatisticalProfile` from corpus lines.
///
/// Analysis runs in two passes over the same lines:
/// 1. A character pass classifying every character into the letter and
///    punctuation samplers and collecting the distinct cleaned words.
///    This pass is order-insensitive per character, so it is chunked
///    across worker threads and merged back in chunk order.
/// 2. A sequential structural pass tracking words-per-sentence and
///    sentences-per-paragraph counters, word lengths and shape templates.
///
/// Vowel inference runs between the passes: shape templates depend on
/// the inferred vowel set.
///
/// Features the corpus could not supply (typically paragraph sizes, when
/// the text has no blank lines or indentation) fall back to the built-in
/// defaults feature by feature, so the result is always usable.
pub struct CorpusAnalyzer;

impl CorpusAnalyzer {
	/// Analyzes corpus lines into a complete profile.
	pub fn analyze(lines: &[String]) -> StatisticalProfile {
		let tally = Self::tally_characters(lines);
		let vowels = infer_vowels(&tally.words, &tally.letters);
		log::info!("inferred vowels: {:?}", vowels);

		let mut profile = StatisticalProfile {
			letters: tally.letters,
			word_sizes: WeightedSampler::with_flags(false, true),
			sentence_sizes: WeightedSampler::with_flags(false, true),
			paragraph_sizes: WeightedSampler::with_flags(false, true),
			word_shapes: WeightedSampler::with_flags(false, true),
			midline_punctuation: tally.midline,
			endline_punctuation: tally.endline,
			matched_punctuation: tally.matched,
			vowels,
		};

		Self::structural_pass(lines, &mut profile);
		Self::fill_empty_features(&mut profile);
		profile
	}

	/// Character pass: chunks the lines across worker threads, classifies
	/// every character and collects distinct cleaned words, then merges
	/// the partial tallies in chunk order so the word set keeps corpus
	/// order and the result is deterministic.
	fn tally_characters(lines: &[String]) -> CharacterTally {
		let mut tally = CharacterTally::new();
		if lines.is_empty() {
			return tally;
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunk_size = lines.len().div_ceil(cpus * factor).max(1);

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let mut partial = CharacterTally::new();
				for line in &chunk {
					partial.observe_line(line);
				}
				tx.send((index, partial)).expect("failed to send from worker");
			});
		}
		drop(tx);

		let mut partials: Vec<(usize, CharacterTally)> = rx.iter().collect();
		partials.sort_by_key(|(index, _)| *index);
		for (_, partial) in partials {
			tally.merge(partial);
		}
		tally
	}

	/// Structural pass: word lengths, shape templates, and the two
	/// running counters that translate punctuation and layout into
	/// sentence and paragraph sizes.
	fn structural_pass(lines: &[String], profile: &mut StatisticalProfile) {
		let mut words_in_sentence = 0;
		let mut sentences_in_paragraph = 0;

		for line in lines {
			// A blank line after at least one sentence, or an indented
			// line, closes the paragraph
			if (sentences_in_paragraph > 0 && line.trim().is_empty()) || line.starts_with('\t') {
				if sentences_in_paragraph > 0 {
					profile.paragraph_sizes.add(sentences_in_paragraph, 1.0);
				}
				sentences_in_paragraph = 0;
			}

			for word in line.split_whitespace() {
				profile.word_sizes.add(word.chars().count(), 1.0);

				let shape = word_shape(word, &profile.vowels);
				if !shape.is_empty() {
					profile.word_shapes.add(shape, 1.0);
				}

				words_in_sentence += 1;
				for character in word.chars() {
					if ENDING_PUNCTUATION.contains(character) && words_in_sentence > 0 {
						sentences_in_paragraph += 1;
						profile.sentence_sizes.add(words_in_sentence, 1.0);
						words_in_sentence = 0;
					}
				}
			}
		}
	}

	/// Replaces every sampler the corpus left empty with its built-in
	/// default, and the vowel set likewise.
	fn fill_empty_features(profile: &mut StatisticalProfile) {
		let defaults = StatisticalProfile::default();
		if profile.letters.is_empty() {
			profile.letters = defaults.letters;
		}
		if profile.word_sizes.is_empty() {
			profile.word_sizes = defaults.word_sizes;
		}
		if profile.sentence_sizes.is_empty() {
			profile.sentence_sizes = defaults.sentence_sizes;
		}
		if profile.paragraph_sizes.is_empty() {
			// Liable to not parse in certain sources
			log::debug!("corpus has no paragraph structure; keeping default paragraph sizes");
			profile.paragraph_sizes = defaults.paragraph_sizes;
		}
		if profile.word_shapes.is_empty() {
			profile.word_shapes = defaults.word_shapes;
		}
		if profile.midline_punctuation.is_empty() {
			profile.midline_punctuation = defaults.midline_punctuation;
		}
		if profile.endline_punctuation.is_empty() {
			profile.endline_punctuation = defaults.endline_punctuation;
		}
		if profile.matched_punctuation.is_empty() {
			profile.matched_punctuation = defaults.matched_punctuation;
		}
		if profile.vowels.is_empty() {
			profile.vowels = defaults.vowels;
		}
	}
}

/// Partial result of the character pass. One per worker thread, merged
/// into the final tally in chunk order.
struct CharacterTally {
	letters: WeightedSampler<char>,
	midline: WeightedSampler<String>,
	endline: WeightedSampler<String>,
	matched: WeightedSampler<(char, char)>,
	words: IndexSet<String>,
}

impl CharacterTally {
	fn new() -> Self {
		Self {
			// The letters sampler decays and suppresses repeats during
			// generation
			letters: WeightedSampler::with_flags(true, true),
			midline: WeightedSampler::new(),
			endline: WeightedSampler::new(),
			matched: WeightedSampler::new(),
			words: IndexSet::new(),
		}
	}

	/// Classifies every character of every word on the line and records
	/// the cleaned (lowercased, letters-only) word.
	fn observe_line(&mut self, line: &str) {
		for word in line.split_whitespace() {
			let lowered = word.to_lowercase();
			for character in lowered.chars() {
				self.classify(character);
			}

			let cleaned: String = lowered.chars().filter(|c| c.is_alphabetic()).collect();
			if !cleaned.is_empty() {
				self.words.insert(cleaned);
			}
		}
	}

	/// Routes one character to its sampler. Characters outside the four
	/// classes are ignored.
	fn classify(&mut self, character: char) {
		if character.is_alphabetic() {
			self.letters.add(character, 1.0);
		} else if let Some(index) = MATCHED_PUNCTUATION.chars().position(|m| m == character) {
			// Odd indices are closing marks; only the opener records the
			// pair
			if index % 2 == 0 {
				if let Some(closer) = MATCHED_PUNCTUATION.chars().nth(index + 1) {
					self.matched.add((character, closer), 1.0);
				}
			}
		} else if ENDING_PUNCTUATION.contains(character) {
			self.endline.add(character.to_string(), 1.0);
		} else if MIDLINE_PUNCTUATION.contains(character) {
			self.midline.add(character.to_string(), 1.0);
		}
	}

	fn merge(&mut self, other: CharacterTally) {
		self.letters.merge(other.letters);
		self.midline.merge(other.midline);
		self.endline.merge(other.endline);
		self.matched.merge(other.matched);
		self.words.extend(other.words);
	}
}

/// Reduces a word to its consonant/vowel skeleton. Non-alphabetic
/// characters contribute nothing.
fn word_shape(word: &str, vowels: &str) -> String {
	let mut shape = String::new();
	for character in word.to_lowercase().chars() {
		if vowels.contains(character) {
			shape.push('v');
		} else if character.is_alphabetic() {
			shape.push('c');
		}
	}
	shape
}
