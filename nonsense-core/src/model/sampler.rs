use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use crate::errors::EmptyDistributionError;

/// Multiplier applied to a token's stored weight every time it is drawn
/// from a sampler with `adjust_on_select` set. Slightly below 1.0, so
/// over-dominant tokens flatten out over the lifetime of a session.
pub const WEIGHT_DECAY: f64 = 0.9998;

/// A weighted random sampler over arbitrary tokens.
///
/// Stores a token -> weight table and draws tokens with probability
/// proportional to their weight. Weights are real numbers so that the
/// long-run decay adjustment composes cleanly.
///
/// # Responsibilities
/// - Accumulate token weights during corpus analysis (`add`, `merge`)
/// - Draw tokens with optional per-subset bias (`get`, `get_weighted`)
/// - Optionally decay the chosen token's weight after each draw
/// - Optionally suppress an immediate repeat of the previous draw
///
/// # Invariants
/// - Tokens are kept in insertion order, so a fixed seed replays the
///   same draw sequence
/// - Drawing requires a total effective weight > 0; anything else is an
///   `EmptyDistributionError`, never a retry loop
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WeightedSampler<T: Eq + Hash> {
	/// Token weights in insertion order.
	weights: IndexMap<T, f64>,

	/// Multiply the chosen token's stored weight by `WEIGHT_DECAY` after
	/// each draw.
	adjust_on_select: bool,

	/// Discard a draw equal to the previous one and retry exactly once.
	suppress_immediate_repeat: bool,

	/// The previously drawn token, for repeat suppression.
	last_selected: Option<T>,
}

impl<T: Eq + Hash> Default for WeightedSampler<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Eq + Hash> WeightedSampler<T> {
	/// Creates an empty sampler with no decay and no repeat suppression.
	pub fn new() -> Self {
		Self::with_flags(false, false)
	}

	/// Creates an empty sampler with explicit behavior flags.
	pub fn with_flags(adjust_on_select: bool, suppress_immediate_repeat: bool) -> Self {
		Self {
			weights: IndexMap::new(),
			adjust_on_select,
			suppress_immediate_repeat,
			last_selected: None,
		}
	}

	/// Adds weight to a token, inserting it if it is new.
	///
	/// Call sites are responsible for not feeding empty tokens (an empty
	/// shape template, a zero size) into the table.
	pub fn add(&mut self, token: T, weight: f64) {
		*self.weights.entry(token).or_insert(0.0) += weight;
	}

	/// Returns the stored weight of a token, 0.0 if absent.
	pub fn value(&self, token: &T) -> f64 {
		self.weights.get(token).copied().unwrap_or(0.0)
	}

	/// Removes all tokens and their weights.
	pub fn clear(&mut self) {
		self.weights.clear();
		self.last_selected = None;
	}

	/// Returns true if no tokens are stored.
	pub fn is_empty(&self) -> bool {
		self.weights.is_empty()
	}

	/// Returns the number of stored tokens.
	pub fn len(&self) -> usize {
		self.weights.len()
	}

	/// Iterates over tokens and their stored weights in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
		self.weights.iter().map(|(token, weight)| (token, *weight))
	}

	/// Merges another sampler into this one by summing weights.
	///
	/// Used to combine partial tables built by parallel corpus workers.
	/// The behavior flags of `self` are kept.
	pub fn merge(&mut self, other: Self) {
		for (token, weight) in other.weights {
			*self.weights.entry(token).or_insert(0.0) += weight;
		}
	}
}

impl<T: Clone + Eq + Hash> WeightedSampler<T> {
	/// Draws a token with probability proportional to its stored weight.
	pub fn get<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<T, EmptyDistributionError> {
		self.get_weighted(rng, None, &[])
	}

	/// Draws a token from a biased view of the table.
	///
	/// Each token present in `subset` has its effective weight multiplied
	/// by `bias`; stored weights are never touched by the bias. A bias of
	/// zero removes the subset from the draw entirely, which is fine as
	/// long as some other token keeps a positive weight.
	///
	/// # Behavior
	/// - Draw a uniform value in `[0, total)` and walk the table in
	///   insertion order, subtracting effective weights until the value
	///   goes negative; that token is the candidate.
	/// - With `suppress_immediate_repeat`, a candidate equal to the last
	///   draw is discarded and one full re-draw is made with the repeat
	///   marker cleared, so a second identical draw is accepted.
	/// - With `adjust_on_select`, the chosen token's stored weight is
	///   multiplied by `WEIGHT_DECAY` before returning.
	///
	/// # Errors
	/// `EmptyDistributionError` when the total effective weight is not
	/// positive.
	pub fn get_weighted<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		bias: Option<f64>,
		subset: &[T],
	) -> Result<T, EmptyDistributionError> {
		let mut token = self.pick(rng, bias, subset)?;
		if self.suppress_immediate_repeat && self.last_selected.as_ref() == Some(&token) {
			// Clear the marker so the retry is accepted even if it lands
			// on the same token again
			self.last_selected = None;
			token = self.pick(rng, bias, subset)?;
		}
		self.last_selected = Some(token.clone());

		if self.adjust_on_select {
			if let Some(weight) = self.weights.get_mut(&token) {
				*weight *= WEIGHT_DECAY;
			}
		}
		Ok(token)
	}

	/// Performs one unconditional weighted draw over the biased table.
	fn pick<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		bias: Option<f64>,
		subset: &[T],
	) -> Result<T, EmptyDistributionError> {
		let effective = |token: &T, weight: f64| -> f64 {
			match bias {
				Some(factor) if subset.contains(token) => weight * factor,
				_ => weight,
			}
		};

		let total: f64 = self
			.weights
			.iter()
			.map(|(token, weight)| effective(token, *weight))
			.sum();
		if total <= 0.0 {
			return Err(EmptyDistributionError);
		}

		let mut remaining = rng.random_range(0.0..total);
		let mut fallback = None;
		for (token, weight) in &self.weights {
			let weight = effective(token, *weight);
			if weight <= 0.0 {
				continue;
			}
			remaining -= weight;
			if remaining < 0.0 {
				return Ok(token.clone());
			}
			fallback = Some(token.clone());
		}

		// Rounding can leave a sliver of `remaining`; the last positive
		// token takes it
		fallback.ok_or(EmptyDistributionError)
	}
}

impl<T: fmt::Display + Eq + Hash> fmt::Display for WeightedSampler<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (token, weight) in &self.weights {
			writeln!(f, "{} - {}", token, weight)?;
		}
		Ok(())
	}
}
