use indexmap::IndexSet;

use super::sampler::WeightedSampler;

/// Number of pruning rounds applied to the vowel candidates. Each round
/// widens the tolerance, so later rounds only remove rarely-confirmed
/// candidates.
pub const VOWEL_FILTER_ITERATIONS: usize = 10;

/// Discovers which characters of an unknown alphabet behave like vowels.
///
/// No prior knowledge of the script is used; the only inputs are the set
/// of distinct cleaned words seen in the corpus (in corpus order) and the
/// global letter frequencies. Works in two phases:
///
/// 1. Candidate generation: for every word that shares no character with
///    the candidates so far, the word's globally most frequent character
///    is assumed to be a vowel. Frequent consonants sneak in here.
/// 2. Pruning: a candidate is only trusted if enough words rely on it as
///    their sole vowel. Ten rounds with a rising tolerance strip the
///    false positives, most recently added candidates first.
///
/// Returns the surviving candidates in discovery order. Empty when the
/// corpus offered no usable words; callers fall back to a default set.
pub fn infer_vowels(words: &IndexSet<String>, letters: &WeightedSampler<char>) -> String {
	let candidates = candidate_vowels(words, letters);
	filter_vowels(candidates, words)
}

/// Phase 1: over-inclusive candidate string.
fn candidate_vowels(words: &IndexSet<String>, letters: &WeightedSampler<char>) -> String {
	let mut candidates = String::new();
	for word in words {
		// A word already covered by a candidate adds no information
		if word.chars().any(|c| candidates.contains(c)) {
			continue;
		}

		// Assume the word's most frequent character is its vowel; ties
		// keep the first occurrence
		let mut best: Option<(char, f64)> = None;
		for c in word.chars() {
			let frequency = letters.value(&c);
			if frequency > best.map_or(0.0, |(_, weight)| weight) {
				best = Some((c, frequency));
			}
		}
		if let Some((vowel, _)) = best {
			candidates.push(vowel);
		}
	}
	candidates
}

/// Phase 2: iterative pruning of unlikely candidates.
///
/// A candidate `v` earns one use for every word of length >= 4 in which
/// `v` is the only candidate character (after deleting `v` itself, no
/// character of the current pruned string remains). The scan stops early
/// once `uses` strictly exceeds the round number; a candidate that never
/// gets there is removed permanently.
fn filter_vowels(mut true_vowels: String, words: &IndexSet<String>) -> String {
	for iteration in 0..VOWEL_FILTER_ITERATIONS {
		let snapshot = true_vowels.clone();
		// Go backwards, as the last candidates are the least likely
		for vowel in snapshot.chars().rev() {
			let mut uses = 0;
			let mut trusted = false;
			for word in words {
				if word.chars().count() < 4 || !word.contains(vowel) {
					continue;
				}
				let stripped: String = word.chars().filter(|&c| c != vowel).collect();
				// Does any other current candidate cover this word?
				if !stripped.chars().any(|c| true_vowels.contains(c)) {
					uses += 1;
				}
				if uses > iteration {
					trusted = true;
					break;
				}
			}
			if !trusted {
				true_vowels.retain(|c| c != vowel);
			}
		}
	}
	true_vowels
}
