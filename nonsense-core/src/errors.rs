use std::io;

use thiserror::Error;

/// Returned when a weighted draw is requested from a sampler whose total
/// effective weight is not positive.
///
/// This can happen on a sampler that was never populated, or when a bias
/// factor of zero wipes out every remaining token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot sample from a distribution with no positive weight")]
pub struct EmptyDistributionError;

/// Error type for generation and configuration failures.
#[derive(Debug, Error)]
pub enum AuthorError {
	#[error(transparent)]
	EmptyDistribution(#[from] EmptyDistributionError),
	#[error("configuration error: {0}")]
	Configuration(String),
	#[error(transparent)]
	Io(#[from] io::Error),
}
