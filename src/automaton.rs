use super::{subset, AutomatonBuilder, AutomatonError, DFA, Label, NFA, StateId, StateSet};
use std::{
	collections::{BTreeMap, BTreeSet},
	fmt,
};

/// Result of classifying an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Determinism {
	Deterministic,
	Nondeterministic,
}

impl fmt::Display for Determinism {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Deterministic => f.write_str("DFA"),
			Self::Nondeterministic => f.write_str("NFA"),
		}
	}
}

/// Trait representing a read-only finite automaton.
///
/// A missing transition and a transition into the empty set are the same thing,
/// implementors never report empty destination sets.
pub trait Automaton<S>
where
	S: StateId,
{
	/// Returns the states in ascending order.
	fn states(&self) -> Box<dyn Iterator<Item = &S> + '_>;

	/// Checks whether the states of the automaton include a state.
	fn has_state(&self, id: &S) -> bool;

	/// Returns the input symbols, never containing the epsilon marker.
	fn alphabet(&self) -> &BTreeSet<String>;

	/// Returns the initial state.
	fn initial(&self) -> &S;

	/// Checks whether a state is accepting.
	fn is_final(&self, id: &S) -> bool;

	/// Returns the destinations of a state for a label.
	fn transitions_for(&self, id: &S, label: &Label) -> Vec<&S>;

	/// Returns every `(state, label, destination)` triple, ordered by state and label.
	fn transitions(&self) -> Vec<(&S, Label, &S)>;

	/// Returns the accepting states.
	fn final_states(&self) -> StateSet<S> {
		self.states()
			.filter(|id| self.is_final(id))
			.cloned()
			.collect()
	}

	/// Returns the union of the destinations for a label over every state in a set.
	fn move_on(&self, set: &StateSet<S>, label: &Label) -> StateSet<S> {
		set.iter()
			.flat_map(|id| self.transitions_for(id, label))
			.cloned()
			.collect()
	}

	/// Computes the set of states reachable from a set using only epsilon transitions.
	/// The result always includes the passed states.
	fn epsilon_closure(&self, set: &StateSet<S>) -> StateSet<S> {
		let mut closure = set.clone();
		let mut frontier = set.clone();
		while !frontier.is_empty() {
			frontier = self
				.move_on(&frontier, &Label::Epsilon)
				.into_iter()
				.filter(|id| !closure.contains(id))
				.collect();
			closure.extend(frontier.iter().cloned());
		}
		closure
	}

	/// Returns the active states before any input is consumed.
	fn start(&self) -> StateSet<S> {
		self.epsilon_closure(&StateSet::singleton(self.initial().clone()))
	}

	/// Performs a single step on a symbol, including the following epsilon closure.
	fn step(&self, set: &StateSet<S>, symbol: &str) -> StateSet<S> {
		self.epsilon_closure(&self.move_on(set, &Label::symbol(symbol)))
	}

	/// Runs the automaton on a sequence of symbols.
	fn accepts<'a, V>(&self, inputs: V) -> bool
	where
		V: IntoIterator<Item = &'a str>,
	{
		let mut active = self.start();
		for symbol in inputs {
			if active.is_empty() {
				return false;
			}
			active = self.step(&active, symbol);
		}
		active.iter().any(|id| self.is_final(id))
	}

	/// Runs the automaton on a string, reading one symbol per character.
	fn accepts_str(&self, input: &str) -> bool {
		let symbols = input.chars().map(String::from).collect::<Vec<_>>();
		self.accepts(symbols.iter().map(String::as_str))
	}

	/// Checks whether the automaton has no epsilon transitions
	/// and at most one destination per state & symbol.
	fn is_deterministic(&self) -> bool {
		self.states().all(|id| {
			self.transitions_for(id, &Label::Epsilon).is_empty()
				&& self
					.alphabet()
					.iter()
					.all(|symbol| self.transitions_for(id, &Label::symbol(symbol.as_str())).len() <= 1)
		})
	}

	/// Classifies the automaton as deterministic or nondeterministic.
	fn classify(&self) -> Determinism {
		if self.is_deterministic() {
			Determinism::Deterministic
		} else {
			Determinism::Nondeterministic
		}
	}

	/// Converts the automaton into an equivalent DFA using subset construction.
	fn to_dfa(&self) -> DFA<StateSet<S>> {
		subset::construct(self)
	}

	/// Creates a copy of the automaton with renamed states.
	/// Returns an `AutomatonError::MalformedInput` error if two states get the same name.
	fn rename<T, F>(&self, mut f: F) -> Result<NFA<T>, AutomatonError>
	where
		T: StateId,
		F: FnMut(&S) -> T,
	{
		let names = self.states().map(|id| (id, f(id))).collect::<BTreeMap<_, _>>();
		let distinct = names.values().collect::<BTreeSet<_>>();
		if distinct.len() != names.len() {
			return Err(AutomatonError::malformed("state names collide after renaming"));
		}
		let name = |id: &S| {
			names
				.get(id)
				.cloned()
				.ok_or_else(|| AutomatonError::InvalidState(id.to_string()))
		};

		let mut builder = AutomatonBuilder::new();
		for id in names.values() {
			builder.add_state(id.clone());
		}
		for symbol in self.alphabet() {
			builder.add_symbol(symbol.as_str())?;
		}
		for (prev, label, next) in self.transitions() {
			builder.add_transition(name(prev)?, label, Some(name(next)?))?;
		}
		builder.set_initial(name(self.initial())?)?;
		for id in self.final_states().iter() {
			builder.set_final(name(id)?)?;
		}
		builder.build()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use maplit::btreeset;

	/// States {q0,q1}, alphabet {0,1}, q0-0->{q0,q1}, q0-1->{q0}, q1-1->{q1}, final {q1}.
	pub(crate) fn scenario_a() -> NFA<String> {
		let mut builder = AutomatonBuilder::new();
		builder.add_state("q0".to_string());
		builder.add_state("q1".to_string());
		builder.add_symbol("0").unwrap();
		builder.add_symbol("1").unwrap();
		builder
			.add_transition("q0".to_string(), "0", vec!["q0".to_string(), "q1".to_string()])
			.unwrap();
		builder
			.add_transition("q0".to_string(), "1", vec!["q0".to_string()])
			.unwrap();
		builder
			.add_transition("q1".to_string(), "1", vec!["q1".to_string()])
			.unwrap();
		builder.set_initial("q0".to_string()).unwrap();
		builder.set_final("q1".to_string()).unwrap();
		builder.build().unwrap()
	}

	/// States {q0,q1}, alphabet {0}, q0-$->{q1}, q1-0->{q1}, final {q1}.
	pub(crate) fn scenario_b() -> NFA<String> {
		let mut builder = AutomatonBuilder::new();
		builder.add_state("q0".to_string());
		builder.add_state("q1".to_string());
		builder.add_symbol("0").unwrap();
		builder
			.add_transition("q0".to_string(), Label::Epsilon, vec!["q1".to_string()])
			.unwrap();
		builder
			.add_transition("q1".to_string(), "0", vec!["q1".to_string()])
			.unwrap();
		builder.set_initial("q0".to_string()).unwrap();
		builder.set_final("q1".to_string()).unwrap();
		builder.build().unwrap()
	}

	/// Epsilon chain 0 -$-> 1 -$-> 2 -$-> 0 with 3 -a-> 3 off to the side.
	fn epsilon_cycle() -> NFA<u8> {
		let mut builder = AutomatonBuilder::new();
		for id in 0..4 {
			builder.add_state(id);
		}
		builder.add_symbol("a").unwrap();
		builder.add_transition(0, Label::Epsilon, vec![1]).unwrap();
		builder.add_transition(1, Label::Epsilon, vec![2]).unwrap();
		builder.add_transition(2, Label::Epsilon, vec![0]).unwrap();
		builder.add_transition(3, "a", vec![3]).unwrap();
		builder.set_initial(3).unwrap();
		builder.build().unwrap()
	}

	#[test]
	fn move_on() {
		let nfa = scenario_a();
		let set = StateSet::from(btreeset!["q0".to_string(), "q1".to_string()]);
		assert_eq!(
			StateSet::from(btreeset!["q0".to_string(), "q1".to_string()]),
			nfa.move_on(&set, &Label::symbol("1")),
			"Incorrect union of destinations"
		);
		assert!(
			nfa.move_on(&StateSet::singleton("q1".to_string()), &Label::symbol("0"))
				.is_empty(),
			"Missing transition not empty"
		);
	}

	#[test]
	fn closure() {
		let nfa = epsilon_cycle();
		let closure = nfa.epsilon_closure(&StateSet::singleton(1));
		assert_eq!(StateSet::from(btreeset![0, 1, 2]), closure, "Incorrect closure");
		assert_eq!(
			closure,
			nfa.epsilon_closure(&closure),
			"Closure not idempotent"
		);
		assert_eq!(
			StateSet::singleton(3),
			nfa.epsilon_closure(&StateSet::singleton(3)),
			"Closure not reflexive"
		);
		assert!(nfa.epsilon_closure(&StateSet::new()).is_empty());
	}

	#[test]
	fn run() {
		let nfa = scenario_a();
		assert!(nfa.accepts_str("01"), "Incorrect result on accepting run");
		// q0 -0-> q1 is taken on the trailing 0
		assert!(nfa.accepts_str("10"), "Incorrect result on accepting run");
		assert!(!nfa.accepts_str("11"), "Incorrect result on rejecting run");
		assert!(!nfa.accepts_str(""), "Empty string accepted");
		assert!(!nfa.accepts_str("0x1"), "Foreign symbol accepted");
		assert!(nfa.accepts(vec!["1", "0", "1"]));
	}

	#[test]
	fn run_epsilon() {
		let nfa = scenario_b();
		assert!(nfa.accepts_str("0"), "Incorrect result on accepting run");
		assert!(nfa.accepts_str(""), "Epsilon not followed before input");
		assert!(nfa.accepts_str("000"));
	}

	#[test]
	fn classify() {
		assert_eq!(Determinism::Nondeterministic, scenario_a().classify());
		assert_eq!(Determinism::Nondeterministic, scenario_b().classify());
		assert!(!epsilon_cycle().is_deterministic(), "Epsilon transitions ignored");

		let mut builder = AutomatonBuilder::new();
		builder.add_state(0);
		builder.add_state(1);
		builder.add_symbol("a").unwrap();
		builder.add_symbol("b").unwrap();
		builder.add_transition(0, "a", vec![1]).unwrap();
		builder.set_initial(0).unwrap();
		let partial = builder.build().unwrap();
		assert!(partial.is_deterministic(), "Partial DFA classified as NFA");
		assert_eq!("DFA", partial.classify().to_string());
	}

	#[test]
	fn rename() {
		let nfa = epsilon_cycle();
		let renamed = nfa.rename(|id| format!("s{}", id)).unwrap();
		assert!(renamed.has_state(&"s3".to_string()));
		assert_eq!("s3", renamed.initial().as_str());
		assert_eq!(nfa.transitions().len(), renamed.transitions().len());

		assert_eq!(
			Err(AutomatonError::malformed("state names collide after renaming")),
			nfa.rename(|_| "s"),
			"Colliding names accepted"
		);
	}
}
