use thiserror::Error;

/// Positional access beyond the current bounds of a
/// [`ListState`](crate::ListState). Reported before any mutation; the
/// holder's value and listeners are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of bounds for list of length {len}")]
pub struct OutOfBounds {
	pub index: usize,
	pub len: usize,
}
