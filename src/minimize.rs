use super::{dfa::State, Automaton, AutomatonError, StateId, StateSet, DFA};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Destination block of every symbol, `None` standing for a missing transition.
type Behaviour = Vec<Option<usize>>;

impl<S> DFA<S>
where
	S: StateId,
{
	/// Returns the states reachable from the initial state.
	pub fn reachable(&self) -> BTreeSet<&S> {
		let mut reachable = BTreeSet::new();
		let mut queue = VecDeque::new();
		reachable.insert(self.initial());
		queue.push_back(self.initial());

		while let Some(id) = queue.pop_front() {
			for symbol in self.alphabet() {
				if let Some(next) = self.next(id, symbol) {
					if reachable.insert(next) {
						queue.push_back(next);
					}
				}
			}
		}
		reachable
	}

	/// Merges equivalent states using partition refinement.
	///
	/// Unreachable states are dropped first. Each state of the result is the block of
	/// original states it replaces.
	///
	/// The result is minimal only for total DFAs. A missing transition is never merged
	/// with a move into a rejecting state, so partial DFAs may keep several dead states.
	pub fn minimize(&self) -> DFA<StateSet<S>> {
		let reachable = self.reachable();

		// start with accepting & non-accepting states
		let mut block_of = reachable
			.iter()
			.map(|id| (*id, self.is_final(id) as usize))
			.collect::<BTreeMap<&S, usize>>();
		let mut count = block_of.values().collect::<BTreeSet<_>>().len();

		loop {
			let mut refined = BTreeMap::<(usize, Behaviour), Vec<&S>>::new();
			for id in &reachable {
				let behaviour = self
					.alphabet()
					.iter()
					.map(|symbol| {
						self.next(id, symbol)
							.and_then(|next| block_of.get(next).copied())
					})
					.collect();
				let block = block_of.get(*id).copied().unwrap_or_default();
				refined.entry((block, behaviour)).or_default().push(*id);
			}

			block_of = refined
				.values()
				.enumerate()
				.flat_map(|(block, ids)| ids.iter().map(move |id| (*id, block)))
				.collect();

			// blocks only ever split, so an unchanged count is the fixed point
			let stable = refined.len() == count;
			count = refined.len();
			if stable {
				break;
			}
		}

		let mut blocks = vec![StateSet::new(); count];
		for (id, block) in &block_of {
			blocks[*block].insert((*id).clone());
		}
		let block = |id: &S| block_of.get(id).map(|block| blocks[*block].clone());

		let states = blocks
			.iter()
			.filter_map(|members| {
				let representative = members.first()?;
				let transitions = self
					.alphabet()
					.iter()
					.filter_map(|symbol| {
						let next = self.next(representative, symbol)?;
						Some((symbol.clone(), block(next)?))
					})
					.collect();
				Some((
					members.clone(),
					State::new(self.is_final(representative), transitions),
				))
			})
			.collect();

		let initial = block(self.initial()).unwrap_or_default();
		DFA::from_parts(states, self.alphabet().clone(), initial)
	}
}

/// Minimizes an automaton.
/// Returns an `AutomatonError::NotDeterministic` error if the automaton is nondeterministic.
pub fn minimize<S, A>(automaton: &A) -> Result<DFA<StateSet<S>>, AutomatonError>
where
	S: StateId,
	A: Automaton<S> + ?Sized,
{
	Ok(DFA::from_automaton(automaton)?.minimize())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		automaton::tests::{scenario_a, scenario_b},
		subset::tests::{same_language, thompson},
		AutomatonBuilder, NFA,
	};
	use std::convert::TryFrom;

	/// Textbook DFA over {0,1}: state 3 is unreachable, 0 & 4 and 1 & 7 are equivalent.
	fn redundant() -> DFA<u8> {
		let mut builder = AutomatonBuilder::new();
		for id in 0..8 {
			builder.add_state(id);
		}
		builder.add_symbol("0").unwrap();
		builder.add_symbol("1").unwrap();
		let table = [
			(0, 1, 5),
			(1, 6, 2),
			(2, 0, 2),
			(3, 2, 6),
			(4, 7, 5),
			(5, 2, 6),
			(6, 6, 4),
			(7, 6, 2),
		];
		for (prev, zero, one) in &table {
			builder.add_transition(*prev, "0", vec![*zero]).unwrap();
			builder.add_transition(*prev, "1", vec![*one]).unwrap();
		}
		builder.set_initial(0).unwrap();
		builder.set_final(2).unwrap();
		DFA::try_from(builder.build().unwrap()).unwrap()
	}

	#[test]
	fn merge_equivalent() {
		let dfa = redundant();
		let minimal = dfa.minimize();
		assert!(!dfa.reachable().contains(&3), "Unreachable state reported reachable");
		assert_eq!(5, minimal.states().count(), "Incorrect number of blocks");
		assert!(minimal.has_state(&StateSet::from(maplit::btreeset![0, 4])));
		assert!(minimal.has_state(&StateSet::from(maplit::btreeset![1, 7])));
		assert!(minimal.has_state(&StateSet::from(maplit::btreeset![5])));
		assert!(same_language(&dfa, &minimal, 8), "Minimization changed the language");
	}

	#[test]
	fn prune_unreachable() {
		let minimal = redundant().minimize();
		assert!(
			minimal.states().all(|block| !block.contains(&3)),
			"Unreachable state kept"
		);
	}

	#[test]
	fn idempotent() {
		let once = redundant().minimize();
		let twice = once.minimize();
		assert!(
			twice.states().all(|block| block.len() == 1),
			"Minimal DFA was reduced again"
		);
		let unwrapped = twice
			.rename(|block| block.first().cloned().unwrap())
			.unwrap();
		assert_eq!(NFA::from(once), unwrapped, "Minimal DFA changed shape");
	}

	#[test]
	fn minimize_converted() {
		let nfa = thompson();
		let dfa = nfa.to_dfa();
		let minimal = dfa.minimize();
		assert_eq!(4, minimal.states().count(), "(a|b)*abb needs four states");
		assert!(same_language(&nfa, &minimal, 8));

		let nfa = scenario_b();
		let minimal = minimize(&nfa.to_dfa()).unwrap();
		assert_eq!(1, minimal.states().count());
		assert!(minimal.accepts_str("000"));
	}

	#[test]
	fn partial() {
		let mut builder = AutomatonBuilder::new();
		for id in 0..3 {
			builder.add_state(id);
		}
		builder.add_symbol("a").unwrap();
		builder.add_symbol("b").unwrap();
		builder.add_transition(0, "a", vec![1]).unwrap();
		builder.add_transition(0, "b", vec![2]).unwrap();
		builder.set_initial(0).unwrap();
		builder.set_final(1).unwrap();
		builder.set_final(2).unwrap();
		let minimal = minimize(&builder.build().unwrap()).unwrap();

		assert_eq!(2, minimal.states().count(), "Equal final states not merged");
		assert!(minimal.accepts_str("a"));
		assert!(minimal.accepts_str("b"));
		assert!(!minimal.accepts_str("ab"), "Missing transition treated as loop");
	}

	#[test]
	fn partial_dead_states() {
		let mut builder = AutomatonBuilder::new();
		for id in 0..3 {
			builder.add_state(id);
		}
		builder.add_symbol("a").unwrap();
		builder.add_symbol("b").unwrap();
		builder.add_transition(0, "a", vec![1]).unwrap();
		builder.add_transition(0, "b", vec![2]).unwrap();
		builder.add_transition(2, "a", vec![2]).unwrap();
		builder.set_initial(0).unwrap();
		let nfa = builder.build().unwrap();

		assert_eq!(3, minimize(&nfa).unwrap().states().count(), "Partial dead states merged");
		let total = nfa.to_dfa();
		assert!(total.is_total());
		assert_eq!(1, total.minimize().states().count(), "Dead states of total DFA kept");
	}

	#[test]
	fn reject_nondeterministic() {
		assert_eq!(
			Err(AutomatonError::NotDeterministic),
			minimize(&scenario_a())
		);
	}
}
