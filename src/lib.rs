mod automaton;
mod builder;
mod dfa;
mod error;
mod label;
mod minimize;
mod nfa;
mod session;
mod state;
mod subset;
pub mod text;

pub use automaton::{Automaton, Determinism};
pub use builder::AutomatonBuilder;
pub use dfa::DFA;
pub use error::AutomatonError;
pub use label::{Label, EPSILON};
pub use minimize::minimize;
pub use nfa::NFA;
pub use session::{Session, SessionError};
pub use state::{StateId, StateSet};
