use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::generation_input::GenerationInput;
use super::profile::StatisticalProfile;
use crate::errors::AuthorError;

/// Effective-weight multiplier for the vowel set when a slot needs a
/// vowel, and when it must not produce one.
const VOWEL_SLOT_BIAS: f64 = 100.0;
const CONSONANT_SLOT_BIAS: f64 = 0.0;

/// One nonsense-writing session.
///
/// Owns everything generation touches: the statistical profile, the
/// growing vocabulary of synthesized words, the last emitted word (for
/// soft repeat avoidance), the tunables, and the single random stream
/// every draw flows from. Nothing is shared between sessions, so two
/// authors with the same profile copy and seed produce the same novel.
///
/// # Responsibilities
/// - Synthesize words from shape templates and vowel-biased letter draws
/// - Assemble sentences with matched, midline and ending punctuation
/// - Accumulate sentences into paragraphs and paragraphs into a novel
///
/// # Invariants
/// - Every synthesized word contains at least one vowel-set character
/// - Every matched pair opened within a sentence is closed before its
///   ending mark
/// - `word_count` >= `vocabulary.len()` at all times
pub struct Author {
	profile: StatisticalProfile,
	input: GenerationInput,

	/// Previously synthesized words, available for reuse.
	vocabulary: Vec<String>,

	/// Runs ahead of the vocabulary length: the reuse path bumps it too,
	/// which skews reuse toward early words as the novel grows.
	word_count: usize,

	last_word: String,

	/// The vowel set as characters, for biased letter draws.
	vowel_chars: Vec<char>,

	rng: StdRng,
}

impl Author {
	/// Creates a session over a profile.
	///
	/// The random stream is seeded from `input.seed` when given, so a
	/// fixed seed replays the same text; otherwise from the OS.
	pub fn new(profile: StatisticalProfile, input: GenerationInput) -> Self {
		let rng = match input.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		};
		let vowel_chars: Vec<char> = profile.vowels.chars().collect();

		Self {
			profile,
			input,
			vocabulary: Vec::new(),
			word_count: 0,
			last_word: String::new(),
			vowel_chars,
			rng,
		}
	}

	/// Returns the profile driving this session.
	pub fn profile(&self) -> &StatisticalProfile {
		&self.profile
	}

	/// Returns the words synthesized so far.
	pub fn vocabulary(&self) -> &[String] {
		&self.vocabulary
	}

	/// Returns the word counter, which may exceed the vocabulary length.
	pub fn word_count(&self) -> usize {
		self.word_count
	}

	/// Writes paragraphs into `sink` until `total_size` word-units have
	/// been produced. Always writes at least one paragraph, even for a
	/// target of zero.
	///
	/// Returns the number of word-units written.
	pub fn write<W: Write>(&mut self, total_size: usize, sink: &mut W) -> Result<usize, AuthorError> {
		let mut written = 0;
		loop {
			let (paragraph, length) = self.paragraph()?;
			sink.write_all(paragraph.as_bytes())?;
			written += length;
			if written >= total_size {
				break;
			}
		}
		log::debug!("wrote {} word-units for a target of {}", written, total_size);
		Ok(written)
	}

	/// Returns a paragraph of text and its word count.
	///
	/// The target is a `paragraph_sizes` draw jittered to a uniform value
	/// in `[0.8, 1.2)` of the base; whole sentences accumulate until the
	/// target is reached. Output is indented with one tab and followed by
	/// a blank line.
	pub fn paragraph(&mut self) -> Result<(String, usize), AuthorError> {
		let base = self.profile.paragraph_sizes.get(&mut self.rng)?;
		let size = ((base as f64 * self.rng.random_range(0.8..1.2)) as usize).max(1);

		let mut sentences = Vec::new();
		let mut length = 0;
		while length < size {
			let (sentence, words) = self.sentence()?;
			sentences.push(sentence);
			length += words;
		}

		Ok((format!("\t{}\n\n", sentences.join(" ")), length))
	}

	/// Returns a sentence of text and its word count.
	///
	/// The target length is a `sentence_sizes` draw widened by a uniform
	/// factor in `[0.8, 1.5)`. The first word is capitalized. Interior
	/// words may open or close one matched punctuation pair at a time
	/// (the close roll gets easier the longer a pair stays open) or take
	/// a midline mark; the ending mark is drawn last, after any pending
	/// closer is forced in.
	pub fn sentence(&mut self) -> Result<(String, usize), AuthorError> {
		let base = self.profile.sentence_sizes.get(&mut self.rng)?;
		let size = ((base as f64 * self.rng.random_range(0.8..1.5)) as usize).max(1);

		let mut sentence = String::new();
		let mut opener: Option<char> = None;
		let mut closer: Option<char> = None;
		let mut match_chance = self.input.matched_chance();

		for position in 0..size {
			let mut word = self.word()?;
			if word == self.last_word {
				// Retry once to avoid repeats; a second identical draw
				// is kept
				word = self.word()?;
			}
			self.last_word = word.clone();

			if position == 0 {
				sentence.push_str(&capitalize(&word));
			} else if let Some(open) = opener.take() {
				sentence.push(' ');
				sentence.push(open);
				sentence.push_str(&word);
			} else {
				sentence.push(' ');
				sentence.push_str(&word);
			}

			if position == 0 || position == size - 1 {
				continue;
			}

			if self.rng.random::<f64>() > match_chance {
				match closer.take() {
					Some(close) => {
						sentence.push(close);
						match_chance = self.input.matched_chance();
					}
					None => {
						let pair = self.profile.matched_punctuation.get(&mut self.rng)?;
						opener = Some(pair.0);
						closer = Some(pair.1);
					}
				}
				continue;
			}
			if closer.is_some() {
				// Make it increasingly likely to roll the closer
				match_chance *= 0.8;
			}
			if self.rng.random::<f64>() > self.input.midline_chance() {
				let mark = self.profile.midline_punctuation.get(&mut self.rng)?;
				sentence.push_str(&mark);
			}
		}

		// A pair opened late must still close inside this sentence
		if let Some(close) = closer {
			sentence.push(close);
		}
		let ending = self.profile.endline_punctuation.get(&mut self.rng)?;
		sentence.push_str(&ending);

		Ok((sentence, size))
	}

	/// Returns a word, reusing the vocabulary most of the time.
	///
	/// A fresh word is synthesized when the vocabulary is empty or the
	/// reuse roll fails; this path bumps `word_count` on top of the bump
	/// in `create_word`, which is what lets the counter outgrow the
	/// vocabulary. A reuse index beyond the vocabulary is taken as a cue
	/// to synthesize, not an error.
	pub fn word(&mut self) -> Result<String, AuthorError> {
		if self.word_count == 0 || self.rng.random::<f64>() > self.input.new_word_chance() {
			self.word_count += 1;
			return self.create_word();
		}

		let choice = self.rng.random_range(0..self.word_count);
		match self.vocabulary.get(choice) {
			Some(word) => Ok(word.clone()),
			None => self.create_word(),
		}
	}

	/// Synthesizes a new word and appends it to the vocabulary.
	///
	/// Draws a shape template and fills every slot with a letter draw
	/// biased by the vowel set, then repairs the word until it contains
	/// at least one vowel character. Capitalizes rarely.
	pub fn create_word(&mut self) -> Result<String, AuthorError> {
		let template = self.profile.word_shapes.get(&mut self.rng)?;

		let mut letters = Vec::with_capacity(template.len());
		for slot in template.chars() {
			let letter = if slot == 'v' {
				self.vowel_letter()?
			} else {
				self.consonant_letter()?
			};
			letters.push(letter);
		}
		if letters.is_empty() {
			letters.push(self.vowel_letter()?);
		}

		while !letters.iter().any(|c| self.vowel_chars.contains(c)) {
			let index = self.repair_index(letters.len());
			letters[index] = self.vowel_letter()?;
		}

		let mut word: String = letters.into_iter().collect();
		if self.rng.random::<f64>() > self.input.capital_chance() {
			word = capitalize(&word);
		}

		self.vocabulary.push(word.clone());
		self.word_count += 1;
		Ok(word)
	}

	/// Picks the position to overwrite when a word lacks a vowel: the
	/// only slot for tiny words, otherwise near the midpoint with a
	/// jitter spanning a quarter of the length each way.
	fn repair_index(&mut self, length: usize) -> usize {
		match length {
			0 | 1 => 0,
			2 => self.rng.random_range(0..2),
			_ => {
				let midpoint = (length / 2) as i64;
				let span = (length / 4) as i64;
				let jitter = if span > 0 {
					self.rng.random_range(-span..span)
				} else {
					0
				};
				(midpoint + jitter) as usize
			}
		}
	}

	fn vowel_letter(&mut self) -> Result<char, AuthorError> {
		let letter =
			self.profile
				.letters
				.get_weighted(&mut self.rng, Some(VOWEL_SLOT_BIAS), &self.vowel_chars)?;
		Ok(letter)
	}

	fn consonant_letter(&mut self) -> Result<char, AuthorError> {
		let letter =
			self.profile
				.letters
				.get_weighted(&mut self.rng, Some(CONSONANT_SLOT_BIAS), &self.vowel_chars)?;
		Ok(letter)
	}
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first
			.to_uppercase()
			.chain(chars.flat_map(|c| c.to_lowercase()))
			.collect(),
		None => String::new(),
	}
}
