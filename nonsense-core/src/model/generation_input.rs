use crate::errors::AuthorError;

/// Chance of reusing a vocabulary word instead of synthesizing a new one.
pub const NEW_WORD_CHANCE: f64 = 0.96;

/// Chance of leaving a synthesized word uncapitalized.
pub const CAPITAL_CHANCE: f64 = 0.98;

/// Threshold rolled against for midline punctuation after a word.
pub const PUNCTUATION_MIDLINE_CHANCE: f64 = 0.92;

/// Base threshold rolled against for matched punctuation. Decays while a
/// closer is pending, so open pairs tend to close quickly.
pub const PUNCTUATION_MATCHED_CHANCE: f64 = 0.97;

/// Tunables for one generation session.
///
/// All chances are thresholds in `[0.0, 1.0]`: an event fires when a
/// uniform roll *exceeds* the threshold, matching the constants above.
/// The optional seed makes the session's entire draw sequence
/// reproducible.
///
/// # Invariants
/// - Every chance stays within `[0.0, 1.0]`; the setters reject anything
///   else with a configuration error
pub struct GenerationInput {
	/// Seed for the session's random stream. `None` draws one from the
	/// operating system.
	pub seed: Option<u64>,

	new_word_chance: f64,
	capital_chance: f64,
	midline_chance: f64,
	matched_chance: f64,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			seed: None,
			new_word_chance: NEW_WORD_CHANCE,
			capital_chance: CAPITAL_CHANCE,
			midline_chance: PUNCTUATION_MIDLINE_CHANCE,
			matched_chance: PUNCTUATION_MATCHED_CHANCE,
		}
	}
}

impl GenerationInput {
	/// Returns the word-reuse threshold.
	pub fn new_word_chance(&self) -> f64 {
		self.new_word_chance
	}

	/// Returns the capitalization threshold.
	pub fn capital_chance(&self) -> f64 {
		self.capital_chance
	}

	/// Returns the midline punctuation threshold.
	pub fn midline_chance(&self) -> f64 {
		self.midline_chance
	}

	/// Returns the base matched punctuation threshold.
	pub fn matched_chance(&self) -> f64 {
		self.matched_chance
	}

	/// Sets the word-reuse threshold.
	///
	/// # Errors
	/// Rejects values outside `[0.0, 1.0]`.
	pub fn set_new_word_chance(&mut self, value: f64) -> Result<(), AuthorError> {
		validate_chance("new_word_chance", value)?;
		self.new_word_chance = value;
		Ok(())
	}

	/// Sets the capitalization threshold.
	///
	/// # Errors
	/// Rejects values outside `[0.0, 1.0]`.
	pub fn set_capital_chance(&mut self, value: f64) -> Result<(), AuthorError> {
		validate_chance("capital_chance", value)?;
		self.capital_chance = value;
		Ok(())
	}

	/// Sets the midline punctuation threshold.
	///
	/// # Errors
	/// Rejects values outside `[0.0, 1.0]`.
	pub fn set_midline_chance(&mut self, value: f64) -> Result<(), AuthorError> {
		validate_chance("midline_chance", value)?;
		self.midline_chance = value;
		Ok(())
	}

	/// Sets the base matched punctuation threshold.
	///
	/// # Errors
	/// Rejects values outside `[0.0, 1.0]`.
	pub fn set_matched_chance(&mut self, value: f64) -> Result<(), AuthorError> {
		validate_chance("matched_chance", value)?;
		self.matched_chance = value;
		Ok(())
	}
}

fn validate_chance(name: &str, value: f64) -> Result<(), AuthorError> {
	if !(0.0..=1.0).contains(&value) {
		return Err(AuthorError::Configuration(format!(
			"{} must be between 0.0 and 1.0, got {}",
			name, value
		)));
	}
	Ok(())
}
