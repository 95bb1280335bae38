//! The public-facing builder applications depend on: declare routes,
//! converters, and a keymap profile, then either run once against argv or
//! host an interactive REPL.
//!
//! Grounded on the split between a thin public-facing entry point and a
//! heavier internal registry that the pattern/routing/line-editor/history
//! crates implement — the same shape as an `Invocation` type composed over
//! a registry in the teacher workspace.

mod builtin_routes;
mod builder;
mod error;

pub use builder::{Cli, GroupBuilder, RouteMeta};
pub use error::BuildError;
pub use wf_repl::ReplConfig;
pub use wf_routing::{BoundArguments, BoundValue, CancellationSignal, HandlerOutcome};

use wf_repl::{Repl, ReplError};
use wf_routing::{ConverterRegistry, DispatchOutcome, FrozenRouteCollection, dispatch, resolve};
use wf_term::Terminal;

/// A built, immutable application: a frozen route collection, converter
/// registry, and keymap profile ready to drive a single invocation or a
/// REPL session.
pub struct App {
	pub(crate) name: String,
	pub(crate) version: String,
	pub(crate) description: Option<String>,
	pub(crate) routes: FrozenRouteCollection,
	pub(crate) converters: ConverterRegistry,
	pub(crate) profile: wf_keymap::Profile,
	pub(crate) repl_config: ReplConfig,
}

impl App {
	/// Resolves `argv` against this application's routes and dispatches to
	/// the matched handler, returning the process exit code (spec §6).
	pub fn run(&self, argv: &[String]) -> i32 {
		let cancel = CancellationSignal::new();
		let outcome = resolve(argv, &self.routes);

		if let wf_routing::ResolveOutcome::NoMatch { reasons } = &outcome {
			eprintln!("no command matches: {}", argv.join(" "));
			for reason in reasons.iter().take(5) {
				eprintln!("  {}: {}", reason.pattern, reason.failure);
			}
			return 2;
		}

		match dispatch(outcome, &self.converters, &cancel) {
			DispatchOutcome::Ran(HandlerOutcome::ExitCode(code)) => code,
			DispatchOutcome::Ran(HandlerOutcome::Error(err)) => {
				eprintln!("error: {err}");
				1
			}
			DispatchOutcome::TypeError(err) => {
				eprintln!("argument error: {err}");
				2
			}
			DispatchOutcome::NoMatch => 2,
		}
	}

	/// Hosts the interactive REPL (spec §4.L) against `terminal` until the
	/// user exits, returning the last dispatched handler's exit code.
	pub fn repl(&self, terminal: &mut dyn Terminal) -> Result<i32, ReplError> {
		let mut repl = Repl::new(terminal, self.profile.clone(), &self.routes, &self.converters, self.repl_config.clone());
		repl.run()?;
		Ok(repl.last_exit_code())
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn routes(&self) -> &FrozenRouteCollection {
		&self.routes
	}
}
