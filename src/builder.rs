use super::{nfa::State, AutomatonError, Label, StateId, StateSet, EPSILON, NFA};
use std::collections::{BTreeMap, BTreeSet};

/// Mutable builder for an [`NFA`].
///
/// Every operation validates its arguments before touching the builder,
/// so a failed call leaves the builder unchanged.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<S>
where
	S: StateId,
{
	states: BTreeMap<S, State<S>>,
	alphabet: BTreeSet<String>,
	initial: Option<S>,
}

impl<S> Default for AutomatonBuilder<S>
where
	S: StateId,
{
	fn default() -> Self {
		Self::from_parts(BTreeMap::new(), BTreeSet::new(), None)
	}
}

impl<S> AutomatonBuilder<S>
where
	S: StateId,
{
	/// Creates a new empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn from_parts(
		states: BTreeMap<S, State<S>>,
		alphabet: BTreeSet<String>,
		initial: Option<S>,
	) -> Self {
		Self {
			states,
			alphabet,
			initial,
		}
	}

	/// Checks whether the builder includes a state.
	pub fn has_state(&self, id: &S) -> bool {
		self.states.contains_key(id)
	}

	/// Adds a new state. Adding an existing state keeps its transitions.
	pub fn add_state(&mut self, id: S) {
		self.states
			.entry(id)
			.or_insert_with(|| State::new(false, BTreeMap::new()));
	}

	/// Adds a new input symbol.
	/// Returns an `AutomatonError::MalformedInput` error for the epsilon marker or an empty symbol.
	pub fn add_symbol<T: Into<String>>(&mut self, symbol: T) -> Result<(), AutomatonError> {
		let symbol = symbol.into();
		if symbol.is_empty() {
			Err(AutomatonError::malformed("empty symbol"))
		} else if symbol == EPSILON {
			Err(AutomatonError::malformed(format!(
				"\"{}\" is reserved for epsilon transitions",
				EPSILON
			)))
		} else {
			self.alphabet.insert(symbol);
			Ok(())
		}
	}

	/// Adds transitions from a state to a set of destinations.
	/// Destinations are merged with the ones already present for the same state & label.
	/// Returns an `AutomatonError::InvalidState` or `AutomatonError::InvalidSymbol` error
	/// if one of the states or the symbol is inexistent.
	pub fn add_transition<L, D>(&mut self, prev: S, label: L, next: D) -> Result<(), AutomatonError>
	where
		L: Into<Label>,
		D: IntoIterator<Item = S>,
	{
		let label = label.into();
		if !self.has_state(&prev) {
			return Err(AutomatonError::InvalidState(prev.to_string()));
		}
		if let Label::Symbol(symbol) = &label {
			if !self.alphabet.contains(symbol) {
				return Err(AutomatonError::InvalidSymbol(symbol.clone()));
			}
		}
		let next = next.into_iter().collect::<StateSet<S>>();
		if let Some(id) = next.iter().find(|id| !self.has_state(id)) {
			return Err(AutomatonError::InvalidState(id.to_string()));
		}

		if !next.is_empty() {
			if let Some(state) = self.states.get_mut(&prev) {
				state
					.transitions
					.entry(label)
					.or_insert_with(StateSet::new)
					.extend(next);
			}
		}
		Ok(())
	}

	/// Sets the initial state.
	/// Returns an `AutomatonError::InvalidState` error if the state is inexistent.
	pub fn set_initial(&mut self, id: S) -> Result<(), AutomatonError> {
		if self.has_state(&id) {
			self.initial = Some(id);
			Ok(())
		} else {
			Err(AutomatonError::InvalidState(id.to_string()))
		}
	}

	/// Marks a state as accepting.
	/// Returns an `AutomatonError::InvalidState` error if the state is inexistent.
	pub fn set_final(&mut self, id: S) -> Result<(), AutomatonError> {
		match self.states.get_mut(&id) {
			Some(state) => {
				state.accepts = true;
				Ok(())
			}
			None => Err(AutomatonError::InvalidState(id.to_string())),
		}
	}

	/// Finishes the construction.
	/// Returns an `AutomatonError::MalformedInput` error if no initial state was set.
	pub fn build(self) -> Result<NFA<S>, AutomatonError> {
		match self.initial {
			Some(initial) => Ok(NFA::from_parts(self.states, self.alphabet, initial)),
			None => Err(AutomatonError::malformed("missing initial state")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Automaton;

	fn builder() -> AutomatonBuilder<&'static str> {
		let mut builder = AutomatonBuilder::new();
		builder.add_state("q0");
		builder.add_state("q1");
		builder.add_symbol("a").unwrap();
		builder
	}

	#[test]
	fn merge_transitions() {
		let mut builder = builder();
		builder.add_transition("q0", "a", vec!["q0"]).unwrap();
		builder.add_transition("q0", "a", vec!["q1"]).unwrap();
		builder.add_state("q0");
		builder.set_initial("q0").unwrap();
		let nfa = builder.build().unwrap();
		assert_eq!(
			vec![&"q0", &"q1"],
			nfa.transitions_for(&"q0", &Label::symbol("a")),
			"Transitions not accumulated"
		);
	}

	#[test]
	fn invalid_references() {
		let mut builder = builder();
		assert_eq!(
			Err(AutomatonError::InvalidState("q9".into())),
			builder.add_transition("q9", "a", vec!["q0"])
		);
		assert_eq!(
			Err(AutomatonError::InvalidSymbol("b".into())),
			builder.add_transition("q0", "b", vec!["q0"])
		);
		assert_eq!(
			Err(AutomatonError::InvalidState("q9".into())),
			builder.add_transition("q0", "a", vec!["q1", "q9"])
		);
		assert!(builder.set_initial("q9").unwrap_err().is_invalid_reference());
		assert!(builder.set_final("q9").unwrap_err().is_invalid_reference());

		// failed calls leave no partial transitions behind
		builder.set_initial("q0").unwrap();
		let nfa = builder.build().unwrap();
		assert!(nfa.transitions().is_empty(), "Failed transition partially applied");
	}

	#[test]
	fn reserved_symbols() {
		let mut builder = builder();
		assert!(matches!(
			builder.add_symbol("$"),
			Err(AutomatonError::MalformedInput(_))
		));
		assert!(builder.add_symbol("").is_err(), "Empty symbol accepted");
		builder.add_transition("q0", "$", vec!["q1"]).unwrap();
		builder.set_initial("q0").unwrap();
		let nfa = builder.build().unwrap();
		assert_eq!(1, nfa.alphabet().len());
		assert_eq!(vec![&"q1"], nfa.transitions_for(&"q0", &Label::Epsilon));
	}

	#[test]
	fn missing_initial() {
		assert!(matches!(
			builder().build(),
			Err(AutomatonError::MalformedInput(_))
		));
	}

	#[test]
	fn empty_destinations() {
		let mut builder = builder();
		builder.add_transition("q0", "a", Vec::new()).unwrap();
		builder.set_initial("q0").unwrap();
		let nfa = builder.build().unwrap();
		assert!(nfa.transitions().is_empty(), "Empty destination set stored");
	}

	#[test]
	fn edit_existing() {
		let nfa = crate::automaton::tests::scenario_a();
		let mut builder = nfa.to_builder();
		builder.set_final("q0".to_string()).unwrap();
		let edited = builder.build().unwrap();
		assert!(!nfa.accepts_str("1"), "Source NFA mutated");
		assert!(edited.accepts_str("1"));
	}
}
