use super::{Automaton, AutomatonBuilder, AutomatonError, Label, StateId, StateSet};
use serde::{Deserialize, Serialize};
use std::{
	collections::{BTreeMap, BTreeSet},
	convert::TryFrom,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	deny_unknown_fields,
	bound(deserialize = "S: StateId + Deserialize<'de>")
)]
pub(crate) struct State<S>
where
	S: StateId,
{
	#[serde(default)]
	pub accepts: bool,
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub transitions: BTreeMap<Label, StateSet<S>>,
}

impl<S> State<S>
where
	S: StateId,
{
	pub fn new(accepts: bool, transitions: BTreeMap<Label, StateSet<S>>) -> Self {
		Self {
			accepts,
			transitions,
		}
	}
}

/// A nondeterministic finite state automaton, possibly with epsilon transitions.
///
/// Instances are immutable, use an [`AutomatonBuilder`] to construct one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
	try_from = "Definition<S>",
	bound(deserialize = "S: StateId + Deserialize<'de>")
)]
pub struct NFA<S>
where
	S: StateId,
{
	states: BTreeMap<S, State<S>>,
	alphabet: BTreeSet<String>,
	initial: S,
}

/// Unvalidated serialized form of an NFA.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Definition<S>
where
	S: StateId,
{
	states: BTreeMap<S, State<S>>,
	#[serde(default)]
	alphabet: BTreeSet<String>,
	initial: S,
}

impl<S> NFA<S>
where
	S: StateId,
{
	/// Assembles an NFA from already validated parts.
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

	/// Returns a builder containing the definition of this NFA.
	pub fn to_builder(&self) -> AutomatonBuilder<S> {
		AutomatonBuilder::from_parts(
			self.states.clone(),
			self.alphabet.clone(),
			Some(self.initial.clone()),
		)
	}
}

impl<S> TryFrom<Definition<S>> for NFA<S>
where
	S: StateId,
{
	type Error = AutomatonError;

	fn try_from(definition: Definition<S>) -> Result<Self, Self::Error> {
		let mut builder = AutomatonBuilder::new();
		for id in definition.states.keys() {
			builder.add_state(id.clone());
		}
		for symbol in definition.alphabet {
			builder.add_symbol(symbol)?;
		}
		for (id, state) in definition.states {
			for (label, next) in state.transitions {
				builder.add_transition(id.clone(), label, next)?;
			}
			if state.accepts {
				builder.set_final(id)?;
			}
		}
		builder.set_initial(definition.initial)?;
		builder.build()
	}
}

impl<S> Automaton<S> for NFA<S>
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
		self.states
			.get(id)
			.and_then(|state| state.transitions.get(label))
			.map(|next| next.iter().collect())
			.unwrap_or_default()
	}

	fn transitions(&self) -> Vec<(&S, Label, &S)> {
		self.states
			.iter()
			.flat_map(|(prev, state)| {
				state.transitions.iter().flat_map(move |(label, next)| {
					next.iter().map(move |next| (prev, label.clone(), next))
				})
			})
			.collect()
	}
}
