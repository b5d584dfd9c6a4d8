use thiserror::Error;

/// Enum representing an error while building or transforming an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
	/// A transition, initial state or final state names an inexistent state.
	#[error("Inexistent State ID \"{0}\"")]
	InvalidState(String),

	/// A transition uses a symbol outside of the alphabet.
	#[error("Inexistent Symbol \"{0}\"")]
	InvalidSymbol(String),

	/// The construction input does not have the expected shape.
	#[error("Malformed input: {0}")]
	MalformedInput(String),

	/// An operation requiring a deterministic automaton got a nondeterministic one.
	#[error("Automaton is not deterministic")]
	NotDeterministic,
}

impl AutomatonError {
	/// Creates a new `AutomatonError::MalformedInput` error.
	pub(crate) fn malformed<M: Into<String>>(msg: M) -> Self {
		Self::MalformedInput(msg.into())
	}

	/// Checks whether the error is a reference to an inexistent state or symbol.
	pub fn is_invalid_reference(&self) -> bool {
		matches!(self, Self::InvalidState(_) | Self::InvalidSymbol(_))
	}
}
