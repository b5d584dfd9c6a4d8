use serde::{Deserialize, Serialize};
use std::{
	collections::{btree_set, BTreeSet},
	fmt,
	hash::Hash,
	iter::FromIterator,
};

/// Trait for types usable as state identifiers.
pub trait StateId: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

impl<T> StateId for T where T: Clone + Ord + Hash + fmt::Debug + fmt::Display {}

/// A set of states.
///
/// Equality, ordering and hashing are structural over the sorted members,
/// so two sets with the same members are the same state of a subset automaton.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateSet<S>(BTreeSet<S>)
where
	S: Ord;

impl<S> StateSet<S>
where
	S: Ord,
{
	/// Creates a new empty state set.
	pub fn new() -> Self {
		Self(BTreeSet::new())
	}

	/// Creates a new state set containing a single state.
	pub fn singleton(id: S) -> Self {
		let mut set = Self::new();
		set.insert(id);
		set
	}

	/// Inserts a state, returning whether it was newly added.
	pub fn insert(&mut self, id: S) -> bool {
		self.0.insert(id)
	}

	pub fn contains(&self, id: &S) -> bool {
		self.0.contains(id)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_set::Iter<'_, S> {
		self.0.iter()
	}

	/// Returns the smallest state of the set.
	pub fn first(&self) -> Option<&S> {
		self.0.iter().next()
	}

	/// Checks whether the two sets share at least one state.
	pub fn intersects(&self, other: &Self) -> bool {
		self.0.intersection(&other.0).next().is_some()
	}
}

impl<S> Default for StateSet<S>
where
	S: Ord,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<S> From<BTreeSet<S>> for StateSet<S>
where
	S: Ord,
{
	fn from(set: BTreeSet<S>) -> Self {
		Self(set)
	}
}

impl<S> FromIterator<S> for StateSet<S>
where
	S: Ord,
{
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<S> Extend<S> for StateSet<S>
where
	S: Ord,
{
	fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
		self.0.extend(iter)
	}
}

impl<S> IntoIterator for StateSet<S>
where
	S: Ord,
{
	type Item = S;
	type IntoIter = btree_set::IntoIter<S>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

impl<'a, S> IntoIterator for &'a StateSet<S>
where
	S: Ord,
{
	type Item = &'a S;
	type IntoIter = btree_set::Iter<'a, S>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Renders as `{q0 q1}`. Members are space separated so a set survives comma-joined lists.
/// Members containing spaces make the rendering ambiguous, `{a b}` being both `{a, b}` and
/// the singleton of `a b`.
impl<S> fmt::Display for StateSet<S>
where
	S: Ord + fmt::Display,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("{")?;
		for (index, id) in self.0.iter().enumerate() {
			if index != 0 {
				f.write_str(" ")?;
			}
			write!(f, "{}", id)?;
		}
		f.write_str("}")
	}
}
