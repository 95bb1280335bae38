//! Built-in REPL commands, checked by literal match before argv ever
//! reaches the resolver (spec §4.L step 7).

use wf_history::History;
use wf_routing::FrozenRouteCollection;

/// A recognized built-in command name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
	Exit,
	Clear,
	ClearHistory,
	History,
	Help,
}

impl Builtin {
	/// Recognizes `argv[0]` as a built-in, if it is one. Built-ins never
	/// take arguments of their own in this core; an application wanting
	/// `history --clear`-style surface area defines it as an ordinary
	/// route instead.
	pub fn recognize(argv: &[String]) -> Option<Builtin> {
		match argv.first().map(String::as_str)? {
			"exit" | "quit" | "q" => Some(Builtin::Exit),
			"clear" | "cls" => Some(Builtin::Clear),
			"clear-history" => Some(Builtin::ClearHistory),
			"history" => Some(Builtin::History),
			"help" => Some(Builtin::Help),
			_ => None,
		}
	}
}

/// Renders the output of a `help` built-in.
///
/// Full help-text rendering (formatting, grouping, color) is an external
/// concern per spec §1; this is the minimal baseline the core ships so a
/// bare application still has *something* to show.
pub trait HelpRenderer: Send + Sync {
	fn render(&self, routes: &FrozenRouteCollection) -> String;
}

/// Lists every route's original pattern and description, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHelpRenderer;

impl HelpRenderer for DefaultHelpRenderer {
	fn render(&self, routes: &FrozenRouteCollection) -> String {
		let mut out = String::from("Available commands:\n");
		for endpoint in routes.iter() {
			out.push_str("  ");
			out.push_str(&endpoint.route.original_pattern);
			out.push('\n');
		}
		out.push_str("\nBuilt-ins: exit, clear, clear-history, history, help\n");
		out
	}
}

/// Renders the output of a `history` built-in: one `n  entry` line per
/// stored entry, oldest first.
pub fn render_history(history: &History) -> String {
	let mut out = String::new();
	for (index, entry) in history.iter().enumerate() {
		out.push_str(&format!("{:>5}  {}\n", index + 1, entry));
	}
	out
}
