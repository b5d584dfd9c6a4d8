use super::{nfa, Automaton, AutomatonError, Label, StateId, StateSet, NFA};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, BTreeSet},
	convert::TryFrom,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct State<S> {
	pub accepts: bool,
	pub transitions: BTreeMap<String, S>,
}

impl<S> State<S> {
	pub fn new(accepts: bool, transitions: BTreeMap<String, S>) -> Self {
		Self {
			accepts,
			transitions,
		}
	}
}

/// A deterministic finite state automaton.
///
/// Has no epsilon transitions and at most one destination per state & symbol.
/// The transition function may be partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	try_from = "NFA<S>",
	into = "NFA<S>",
	bound(
		serialize = "S: StateId + Serialize",
		deserialize = "S: StateId + Deserialize<'de>"
	)
)]
pub struct DFA<S>
where
	S: StateId,
{
	states: BTreeMap<S, State<S>>,
	alphabet: BTreeSet<String>,
	initial: S,
}

impl<S> DFA<S>
where
	S: StateId,
{
	/// Assembles a DFA from already validated parts.
	pub(crate) fn from_parts(
		states: BTreeMap<S, State<S>>,
		alphabet: BTreeSet<String>,
		initial: S,
	) -> Self {
		Self {
			states,
			alphabet,
			initial,
		}
	}

	/// Creates a DFA with the same states & transitions as another automaton.
	/// Returns an `AutomatonError::NotDeterministic` error if the automaton is nondeterministic.
	pub fn from_automaton<A>(automaton: &A) -> Result<Self, AutomatonError>
	where
		A: Automaton<S> + ?Sized,
	{
		if !automaton.is_deterministic() {
			return Err(AutomatonError::NotDeterministic);
		}
		let states = automaton
			.states()
			.map(|id| {
				let transitions = automaton
					.alphabet()
					.iter()
					.filter_map(|symbol| {
						automaton
							.transitions_for(id, &Label::symbol(symbol.as_str()))
							.first()
							.map(|next| (symbol.clone(), (*next).clone()))
					})
					.collect();
				(id.clone(), State::new(automaton.is_final(id), transitions))
			})
			.collect();
		Ok(Self::from_parts(
			states,
			automaton.alphabet().clone(),
			automaton.initial().clone(),
		))
	}

	/// Returns the destination of a state for a symbol.
	pub fn next(&self, id: &S, symbol: &str) -> Option<&S> {
		self.states
			.get(id)
			.and_then(|state| state.transitions.get(symbol))
	}

	/// Checks whether every state has a transition for every symbol.
	pub fn is_total(&self) -> bool {
		self.states
			.values()
			.all(|state| state.transitions.len() == self.alphabet.len())
	}
}

impl<S> TryFrom<NFA<S>> for DFA<S>
where
	S: StateId,
{
	type Error = AutomatonError;

	fn try_from(nfa: NFA<S>) -> Result<Self, Self::Error> {
		Self::from_automaton(&nfa)
	}
}

impl<S> From<DFA<S>> for NFA<S>
where
	S: StateId,
{
	fn from(dfa: DFA<S>) -> Self {
		let states = dfa
			.states
			.into_iter()
			.map(|(id, state)| {
				let transitions = state
					.transitions
					.into_iter()
					.map(|(symbol, next)| (Label::Symbol(symbol), StateSet::singleton(next)))
					.collect();
				(id, nfa::State::new(state.accepts, transitions))
			})
			.collect();
		NFA::from_parts(states, dfa.alphabet, dfa.initial)
	}
}

impl<S> Automaton<S> for DFA<S>
where
	S: StateId,
{
	fn states(&self) -> Box<dyn Iterator<Item = &S> + '_> {
		Box::new(self.states.keys())
	}

	fn has_state(&self, id: &S) -> bool {
		self.states.contains_key(id)
	}

	fn alphabet(&self) -> &BTreeSet<String> {
		&self.alphabet
	}

	fn initial(&self) -> &S {
		&self.initial
	}

	fn is_final(&self, id: &S) -> bool {
		self.states.get(id).map_or(false, |state| state.accepts)
	}

	fn transitions_for(&self, id: &S, label: &Label) -> Vec<&S> {
		label
			.as_symbol()
			.and_then(|symbol| self.next(id, symbol))
			.into_iter()
			.collect()
	}

	fn transitions(&self) -> Vec<(&S, Label, &S)> {
		self.states
			.iter()
			.flat_map(|(prev, state)| {
				state
					.transitions
					.iter()
					.map(move |(symbol, next)| (prev, Label::symbol(symbol.as_str()), next))
			})
			.collect()
	}
}
