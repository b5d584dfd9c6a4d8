//! Plain text representation of an automaton.
//!
//! ```text
//! States: q0,q1
//! Alphabet: 0,1
//! Transitions:
//! q0 -0-> q0
//! q0 -$-> q1
//! Initial State: q0
//! Final States: q1
//! ```
//!
//! Lists are comma-joined without escaping, epsilon is written as `$`.

use super::{Automaton, AutomatonBuilder, AutomatonError, Label, StateId, NFA};
use std::{fmt, iter, marker::PhantomData};

/// Wrapper displaying an automaton in the text representation.
pub struct Text<'a, S, A>
where
	A: ?Sized,
{
	automaton: &'a A,
	_state: PhantomData<S>,
}

impl<'a, S, A> Text<'a, S, A>
where
	S: StateId,
	A: Automaton<S> + ?Sized,
{
	pub fn new(automaton: &'a A) -> Self {
		Self {
			automaton,
			_state: PhantomData,
		}
	}
}

fn join<T, I>(items: I) -> String
where
	T: fmt::Display,
	I: IntoIterator<Item = T>,
{
	items
		.into_iter()
		.map(|item| item.to_string())
		.collect::<Vec<_>>()
		.join(",")
}

impl<'a, S, A> fmt::Display for Text<'a, S, A>
where
	S: StateId,
	A: Automaton<S> + ?Sized,
{
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let automaton = self.automaton;
		writeln!(f, "States: {}", join(automaton.states()))?;
		writeln!(f, "Alphabet: {}", join(automaton.alphabet()))?;
		writeln!(f, "Transitions:")?;
		for (prev, label, next) in automaton.transitions() {
			writeln!(f, "{} -{}-> {}", prev, label, next)?;
		}
		writeln!(f, "Initial State: {}", automaton.initial())?;
		writeln!(f, "Final States: {}", join(automaton.final_states().iter()))
	}
}

/// Renders an automaton in the text representation.
pub fn to_text<S, A>(automaton: &A) -> String
where
	S: StateId,
	A: Automaton<S> + ?Sized,
{
	Text::<S, A>::new(automaton).to_string()
}

/// Returns the value of a `name: value` line.
fn field<'a>(line: Option<&'a str>, name: &str) -> Result<&'a str, AutomatonError> {
	line.and_then(|line| line.strip_prefix(name))
		.and_then(|rest| rest.strip_prefix(':'))
		.map(str::trim)
		.ok_or_else(|| AutomatonError::malformed(format!("expected \"{}:\"", name)))
}

fn list(values: &str) -> impl Iterator<Item = String> + '_ {
	values
		.split(',')
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(String::from)
}

/// Parses a `<state> -<symbol>-> <state>` line.
fn transition(line: &str) -> Result<(String, Label, String), AutomatonError> {
	let malformed = || AutomatonError::malformed(format!("invalid transition \"{}\"", line));
	let (prev, rest) = line.split_once(" -").ok_or_else(malformed)?;
	let (label, next) = rest.rsplit_once("-> ").ok_or_else(malformed)?;
	let (prev, next) = (prev.trim(), next.trim());
	if prev.is_empty() || label.is_empty() || next.is_empty() {
		return Err(malformed());
	}
	Ok((prev.into(), Label::from(label), next.into()))
}

/// Parses the text representation into an NFA with string state identifiers.
pub fn from_text(text: &str) -> Result<NFA<String>, AutomatonError> {
	let mut lines = text.lines().filter(|line| !line.trim().is_empty());
	let mut builder = AutomatonBuilder::new();

	for id in list(field(lines.next(), "States")?) {
		builder.add_state(id);
	}
	for symbol in list(field(lines.next(), "Alphabet")?) {
		builder.add_symbol(symbol)?;
	}
	if !field(lines.next(), "Transitions")?.is_empty() {
		return Err(AutomatonError::malformed("unexpected text after \"Transitions:\""));
	}

	let initial = loop {
		let line = lines
			.next()
			.ok_or_else(|| AutomatonError::malformed("expected \"Initial State:\""))?;
		if line.starts_with("Initial State") {
			break field(Some(line), "Initial State")?;
		}
		let (prev, label, next) = transition(line)?;
		builder.add_transition(prev, label, iter::once(next))?;
	};
	builder.set_initial(initial.to_string())?;

	for id in list(field(lines.next(), "Final States")?) {
		builder.set_final(id)?;
	}
	if let Some(line) = lines.next() {
		return Err(AutomatonError::malformed(format!("unexpected line \"{}\"", line)));
	}
	builder.build()
}
