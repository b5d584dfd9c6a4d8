use super::{dfa::State, Automaton, StateId, StateSet, DFA};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Converts an automaton into a DFA whose states are sets of the original states.
///
/// Every discovered set has a transition for every symbol. A symbol without any move
/// leads into the empty set, which then becomes an explicit non-accepting dead state.
pub(crate) fn construct<S, A>(nfa: &A) -> DFA<StateSet<S>>
where
	S: StateId,
	A: Automaton<S> + ?Sized,
{
	let initial = nfa.start();

	let mut states = BTreeMap::new();
	let mut discovered = BTreeSet::new();
	let mut queue = VecDeque::new();
	discovered.insert(initial.clone());
	queue.push_back(initial.clone());

	while let Some(set) = queue.pop_front() {
		let mut transitions = BTreeMap::new();
		for symbol in nfa.alphabet() {
			let next = nfa.step(&set, symbol);
			if discovered.insert(next.clone()) {
				queue.push_back(next.clone());
			}
			transitions.insert(symbol.clone(), next);
		}
		let accepts = set.iter().any(|id| nfa.is_final(id));
		states.insert(set, State::new(accepts, transitions));
	}

	DFA::from_parts(states, nfa.alphabet().clone(), initial)
}
