use super::{minimize, text, Automaton, AutomatonError, Determinism, NFA};
use log::{debug, info};
use std::{fs, io, path::Path};
use thiserror::Error;

/// Enum representing an error of a session operation.
#[derive(Debug, Error)]
pub enum SessionError {
	#[error("No automaton has been input yet")]
	NoAutomaton,

	#[error(transparent)]
	Automaton(#[from] AutomatonError),

	#[error(transparent)]
	Io(#[from] io::Error),
}

/// Holds the automaton the user is currently working on.
///
/// Converted and minimized automata replace the current one,
/// their set states being renamed to their textual form.
/// Conversion fails with `AutomatonError::MalformedInput` when two set states share a
/// textual form, which can only happen with state names containing spaces.
#[derive(Debug, Default)]
pub struct Session {
	automaton: Option<NFA<String>>,
}

impl Session {
	/// Creates a new session without an automaton.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current automaton, if any.
	pub fn automaton(&self) -> Option<&NFA<String>> {
		self.automaton.as_ref()
	}

	fn current(&self) -> Result<&NFA<String>, SessionError> {
		self.automaton.as_ref().ok_or(SessionError::NoAutomaton)
	}

	fn replace(&mut self, automaton: NFA<String>) -> &NFA<String> {
		debug!(
			"automaton has {} states, {} symbols & {} transitions",
			automaton.states().count(),
			automaton.alphabet().len(),
			automaton.transitions().len()
		);
		self.automaton.insert(automaton)
	}

	/// Replaces the current automaton with an input one.
	pub fn input(&mut self, automaton: NFA<String>) -> &NFA<String> {
		info!("automaton input");
		self.replace(automaton)
	}

	/// Replaces the current automaton with one read from a file.
	pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<&NFA<String>, SessionError> {
		let path = path.as_ref();
		let automaton = text::from_text(&fs::read_to_string(path)?)?;
		info!("automaton loaded from {}", path.display());
		Ok(self.replace(automaton))
	}

	/// Runs the current automaton on a string.
	pub fn test(&self, input: &str) -> Result<bool, SessionError> {
		let accepted = self.current()?.accepts_str(input);
		debug!("input {:?} accepted: {}", input, accepted);
		Ok(accepted)
	}

	/// Replaces the current automaton with the equivalent DFA.
	pub fn convert(&mut self) -> Result<&NFA<String>, SessionError> {
		let dfa = self.current()?.to_dfa().rename(|set| set.to_string())?;
		info!("automaton converted to DFA");
		Ok(self.replace(dfa))
	}

	/// Replaces the current automaton with the minimal DFA.
	/// Fails if the current automaton is nondeterministic.
	pub fn minimize(&mut self) -> Result<&NFA<String>, SessionError> {
		let minimal = minimize(self.current()?)?.rename(|block| block.to_string())?;
		info!("automaton minimized");
		Ok(self.replace(minimal))
	}

	/// Writes the current automaton to a file.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
		let path = path.as_ref();
		fs::write(path, text::to_text(self.current()?))?;
		info!("automaton saved to {}", path.display());
		Ok(())
	}

	/// Classifies the current automaton.
	pub fn classify(&self) -> Result<Determinism, SessionError> {
		Ok(self.current()?.classify())
	}
}
