use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved marker for epsilon transitions in the textual representation.
pub const EPSILON: &str = "$";

/// Label of a transition, either an alphabet symbol or epsilon.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Label {
	Epsilon,
	Symbol(String),
}

impl Label {
	/// Creates a new symbol label.
	pub fn symbol<T: Into<String>>(symbol: T) -> Self {
		Self::Symbol(symbol.into())
	}

	/// Checks whether the label is epsilon.
	pub fn is_epsilon(&self) -> bool {
		matches!(self, Self::Epsilon)
	}

	/// Returns the symbol of the label, or None for epsilon.
	pub fn as_symbol(&self) -> Option<&str> {
		match self {
			Self::Epsilon => None,
			Self::Symbol(symbol) => Some(symbol),
		}
	}
}

impl From<&str> for Label {
	fn from(label: &str) -> Self {
		if label == EPSILON {
			Self::Epsilon
		} else {
			Self::symbol(label)
		}
	}
}

impl From<String> for Label {
	fn from(label: String) -> Self {
		if label == EPSILON {
			Self::Epsilon
		} else {
			Self::Symbol(label)
		}
	}
}

impl From<Label> for String {
	fn from(label: Label) -> Self {
		match label {
			Label::Epsilon => EPSILON.into(),
			Label::Symbol(symbol) => symbol,
		}
	}
}

impl fmt::Display for Label {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Epsilon => f.write_str(EPSILON),
			Self::Symbol(symbol) => f.write_str(symbol),
		}
	}
}
