use nonsense_core::errors::AuthorError;
use nonsense_core::model::author::Author;
use nonsense_core::model::generation_input::GenerationInput;
use nonsense_core::model::profile::StatisticalProfile;
use nonsense_core::model::sampler::WeightedSampler;

fn seeded_input(seed: u64) -> GenerationInput {
	let mut input = GenerationInput::default();
	input.seed = Some(seed);
	input
}

fn seeded_author(seed: u64) -> Author {
	Author::new(StatisticalProfile::default(), seeded_input(seed))
}

/// Default profile with the shape table replaced, so word synthesis can
/// be cornered into degenerate templates.
fn profile_with_shapes(shapes: &[(&str, f64)]) -> StatisticalProfile {
	let mut profile = StatisticalProfile::default();
	let mut word_shapes = WeightedSampler::with_flags(false, true);
	for (shape, weight) in shapes {
		word_shapes.add(shape.to_string(), *weight);
	}
	profile.word_shapes = word_shapes;
	profile
}

#[test]
fn fixed_seed_reproduces_the_same_text() {
	let mut first = seeded_author(42);
	let mut second = seeded_author(42);

	for _ in 0..5 {
		let (left, left_words) = first.paragraph().unwrap();
		let (right, right_words) = second.paragraph().unwrap();
		assert_eq!(left, right);
		assert_eq!(left_words, right_words);
	}
}

#[test]
fn different_seeds_diverge() {
	let mut first = seeded_author(1);
	let mut second = seeded_author(2);

	let (left, _) = first.paragraph().unwrap();
	let (right, _) = second.paragraph().unwrap();
	assert_ne!(left, right);
}

#[test]
fn every_word_contains_a_vowel() {
	// All-consonant templates force the repair loop to run every time
	let profile = profile_with_shapes(&[("ccc", 1.0), ("ccccc", 1.0)]);
	let mut author = Author::new(profile, seeded_input(3));

	for _ in 0..300 {
		let word = author.create_word().unwrap();
		assert!(
			word.to_lowercase().chars().any(|c| "aeiou".contains(c)),
			"no vowel in {:?}",
			word
		);
	}
}

#[test]
fn single_consonant_template_becomes_a_vowel() {
	let profile = profile_with_shapes(&[("c", 1.0)]);
	let mut author = Author::new(profile, seeded_input(4));

	for _ in 0..100 {
		let word = author.create_word().unwrap();
		assert_eq!(word.chars().count(), 1);
		assert!(
			word.to_lowercase().chars().all(|c| "aeiou".contains(c)),
			"got {:?}",
			word
		);
	}
}

#[test]
fn synthesized_words_grow_the_vocabulary() {
	let mut author = seeded_author(5);
	for _ in 0..50 {
		author.create_word().unwrap();
	}

	assert_eq!(author.vocabulary().len(), 50);
	assert!(author.word_count() >= author.vocabulary().len());
}

#[test]
fn word_reuse_survives_counter_overrun() {
	// With reuse forced on, the counter outruns the vocabulary and
	// out-of-range indices must quietly synthesize instead of panicking
	let mut input = seeded_input(6);
	input.set_new_word_chance(1.0).unwrap();
	let mut author = Author::new(StatisticalProfile::default(), input);

	for _ in 0..1000 {
		author.word().unwrap();
	}
	assert!(author.word_count() >= author.vocabulary().len());
	assert!(!author.vocabulary().is_empty());
}

#[test]
fn sentences_close_every_opened_pair() {
	// A single pair type and an aggressive matched threshold make
	// balance failures loud
	let mut profile = StatisticalProfile::default();
	let mut matched = WeightedSampler::new();
	matched.add(('(', ')'), 1.0);
	profile.matched_punctuation = matched;

	let mut input = seeded_input(7);
	input.set_matched_chance(0.5).unwrap();
	let mut author = Author::new(profile, input);

	for _ in 0..200 {
		let (sentence, _) = author.sentence().unwrap();
		let opens = sentence.matches('(').count();
		let closes = sentence.matches(')').count();
		assert_eq!(opens, closes, "unbalanced sentence {:?}", sentence);
	}
}

#[test]
fn sentence_length_stays_within_the_jitter_band() {
	let mut profile = StatisticalProfile::default();
	let mut sentence_sizes = WeightedSampler::with_flags(false, true);
	sentence_sizes.add(10usize, 1.0);
	profile.sentence_sizes = sentence_sizes;

	let mut author = Author::new(profile, seeded_input(8));
	for _ in 0..200 {
		let (_, words) = author.sentence().unwrap();
		assert!((8..15).contains(&words), "length {} out of band", words);
	}
}

#[test]
fn first_sentence_word_is_capitalized() {
	let mut author = seeded_author(9);
	for _ in 0..50 {
		let (sentence, _) = author.sentence().unwrap();
		let first = sentence.chars().next().unwrap();
		assert!(first.is_uppercase(), "sentence {:?}", sentence);
	}
}

#[test]
fn paragraphs_are_indented_and_separated() {
	let mut author = seeded_author(10);
	let (paragraph, words) = author.paragraph().unwrap();

	assert!(paragraph.starts_with('\t'));
	assert!(paragraph.ends_with("\n\n"));
	assert!(words > 0);
}

#[test]
fn write_emits_at_least_one_paragraph_for_a_zero_target() {
	let mut author = seeded_author(11);
	let mut output = Vec::new();

	let written = author.write(0, &mut output).unwrap();
	assert!(written > 0);
	assert!(!output.is_empty());

	let text = String::from_utf8(output).unwrap();
	assert!(text.starts_with('\t'));
	assert!(text.ends_with("\n\n"));
}

#[test]
fn write_reaches_the_target_without_overshooting_wildly() {
	let mut author = seeded_author(12);
	let mut output = Vec::new();

	let written = author.write(10_000, &mut output).unwrap();
	// At most one paragraph past the target, and the default tables cap
	// a paragraph well under 300 word-units
	assert!(written >= 10_000);
	assert!(written < 10_300, "overshot to {}", written);
}

#[test]
fn empty_letters_profile_fails_cleanly() {
	let mut profile = StatisticalProfile::default();
	profile.letters = WeightedSampler::with_flags(true, true);

	let mut author = Author::new(profile, seeded_input(13));
	match author.create_word() {
		Err(AuthorError::EmptyDistribution(_)) => {}
		other => panic!("expected EmptyDistribution, got {:?}", other.map(|_| ())),
	}
}

#[test]
fn chance_setters_reject_out_of_range_values() {
	let mut input = GenerationInput::default();

	assert!(input.set_new_word_chance(1.5).is_err());
	assert!(input.set_capital_chance(-0.1).is_err());
	assert!(input.set_midline_chance(2.0).is_err());
	assert!(input.set_matched_chance(0.5).is_ok());
}
