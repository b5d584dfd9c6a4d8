use anyhow::{bail, Context, Result};
use clap::Parser;
use finite_automata::{
	Automaton, AutomatonBuilder, AutomatonError, Determinism, Label, Session, EPSILON, NFA,
};
use log::warn;
use std::{
	collections::BTreeSet,
	fmt,
	io::{self, BufRead, Write},
	path::PathBuf,
};

#[derive(Parser, Debug)]
#[command(
	name = "finite-automata",
	about = "Builds, converts, minimizes & tests finite automata"
)]
struct Cli {
	/// Automaton file to open at startup
	#[arg(value_name = "FILE")]
	file: Option<PathBuf>,
}

struct Console<R> {
	input: R,
}

impl<R> Console<R>
where
	R: BufRead,
{
	fn prompt(&mut self, text: &str) -> Result<String> {
		print!("{}", text);
		io::stdout().flush()?;
		let mut line = String::new();
		if self.input.read_line(&mut line)? == 0 {
			bail!("unexpected end of input");
		}
		Ok(line.trim().to_string())
	}
}

fn list(line: &str) -> Vec<String> {
	line.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(String::from)
		.collect()
}

fn input_automaton<R: BufRead>(console: &mut Console<R>) -> Result<NFA<String>> {
	let count = console.prompt("Enter the number of states: ")?;
	let count = count.parse::<usize>().map_err(|_| {
		AutomatonError::MalformedInput(format!("\"{}\" is not a number of states", count))
	})?;
	let states = (0..count).map(|id| format!("q{}", id)).collect::<Vec<_>>();
	let alphabet = list(&console.prompt("Enter the symbols in the alphabet separated by commas: ")?)
		.into_iter()
		.collect::<BTreeSet<_>>();

	let mut builder = AutomatonBuilder::new();
	for id in &states {
		builder.add_state(id.clone());
	}
	for symbol in &alphabet {
		builder.add_symbol(symbol.as_str())?;
	}
	for id in &states {
		for symbol in &alphabet {
			let next = console.prompt(&format!(
				"Enter the next states for transition ({} -{}-> ?) separated by commas: ",
				id, symbol
			))?;
			builder.add_transition(id.clone(), symbol.as_str(), list(&next))?;
		}
		let next = console.prompt(&format!(
			"Enter the next states for epsilon transition ({} -{}-> ?) separated by commas (leave empty if none): ",
			id, EPSILON
		))?;
		builder.add_transition(id.clone(), Label::Epsilon, list(&next))?;
	}
	builder.set_initial(console.prompt("Enter the initial state: ")?)?;
	for id in list(&console.prompt("Enter the final states (comma-separated): ")?) {
		builder.set_final(id)?;
	}
	Ok(builder.build()?)
}

fn print_table(automaton: &NFA<String>) {
	let mut labels = automaton
		.alphabet()
		.iter()
		.map(|symbol| Label::symbol(symbol.as_str()))
		.collect::<Vec<_>>();
	if automaton
		.transitions()
		.iter()
		.any(|(_, label, _)| label.is_epsilon())
	{
		labels.push(Label::Epsilon);
	}
	let cell = |id: &String, label: &Label| {
		automaton
			.transitions_for(id, label)
			.iter()
			.map(|next| next.as_str())
			.collect::<Vec<_>>()
			.join(",")
	};

	let state_width = automaton.states().map(String::len).max().unwrap_or(0);
	let widths = labels
		.iter()
		.map(|label| {
			automaton
				.states()
				.map(|id| cell(id, label).len())
				.chain(Some(label.to_string().len()))
				.max()
				.unwrap_or(0)
		})
		.collect::<Vec<_>>();

	println!("Transition Table:");
	let mut header = format!("{:<1$} |", "", state_width);
	for (label, width) in labels.iter().zip(&widths) {
		header.push_str(&format!(" {:<1$} |", label.to_string(), width));
	}
	println!("{}", header);
	println!("{}", "-".repeat(header.len()));
	for id in automaton.states() {
		let marker = match (automaton.initial() == id, automaton.is_final(id)) {
			(true, true) => "->*",
			(true, false) => "-> ",
			(false, true) => "  *",
			(false, false) => "   ",
		};
		let mut row = format!("{:<1$} |", id, state_width);
		for (label, width) in labels.iter().zip(&widths) {
			row.push_str(&format!(" {:<1$} |", cell(id, label), width));
		}
		println!("{} {}", row, marker);
	}
}

fn report<E: fmt::Display>(err: E) {
	warn!("operation failed: {}", err);
	println!("Error: {}", err);
}

fn main() -> Result<()> {
	env_logger::init();

	let cli = Cli::parse();
	let mut session = Session::new();
	if let Some(path) = &cli.file {
		let automaton = session
			.open(path)
			.with_context(|| format!("failed to open {}", path.display()))?;
		print_table(automaton);
	}

	let stdin = io::stdin();
	let mut console = Console {
		input: stdin.lock(),
	};
	loop {
		println!("Finite Automaton Menu");
		println!("1. Input FA");
		println!("2. Test string");
		println!("3. Convert to DFA");
		println!("4. Minimize");
		println!("5. Save to file");
		println!("6. Check if NFA or DFA");
		println!("7. Exit");

		let choice = match console.prompt("Enter your choice: ") {
			Ok(choice) => choice,
			Err(_) => break,
		};
		match choice.as_str() {
			"1" => match input_automaton(&mut console) {
				Ok(automaton) => print_table(session.input(automaton)),
				Err(err) => report(err),
			},
			"2" => {
				let input = console.prompt("Enter the string to test: ")?;
				match session.test(&input) {
					Ok(true) => println!("Accepted"),
					Ok(false) => println!("Rejected"),
					Err(err) => report(err),
				}
			}
			"3" => match session.convert() {
				Ok(automaton) => print_table(automaton),
				Err(err) => report(err),
			},
			"4" => match session.minimize() {
				Ok(automaton) => print_table(automaton),
				Err(err) => report(err),
			},
			"5" => {
				let name = console.prompt("Enter the file name to save: ")?;
				match session.save(&name) {
					Ok(()) => println!("Saved to {}", name),
					Err(err) => report(err),
				}
			}
			"6" => match session.classify() {
				Ok(Determinism::Deterministic) => println!("The automaton is a DFA."),
				Ok(Determinism::Nondeterministic) => println!("The automaton is an NFA."),
				Err(err) => report(err),
			},
			"7" => {
				println!("Exiting...");
				break;
			}
			_ => println!("Invalid choice! Please try again."),
		}
	}
	Ok(())
}
