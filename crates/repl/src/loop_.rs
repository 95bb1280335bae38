//! The REPL loop: render prompt, drive the line editor, tokenize, dispatch.
//!
//! This ties together [`wf_line_editor::Editor`], [`wf_history::History`],
//! and [`wf_routing`]'s resolver/dispatcher exactly as spec §4.L prescribes:
//! accepted lines are re-tokenized into argv and fed through the same path
//! an external invocation would take.

use std::path::PathBuf;

use thiserror::Error;
use wf_history::History;
use wf_keymap::Profile;
use wf_line_editor::{CompletionSource, Editor, EditorEvent};
use wf_routing::{CancellationSignal, ConverterRegistry, DispatchOutcome, FrozenRouteCollection, MatchFailure, dispatch, resolve};
use wf_term::Terminal;

use crate::builtins::{Builtin, DefaultHelpRenderer, HelpRenderer, render_history};
use crate::tokenize::{TokenizeError, strip_continuation, tokenize, wants_continuation};

/// Errors that can terminate the REPL loop outright (as opposed to a
/// recoverable argv-time error, which is reported and the loop continues).
#[derive(Debug, Error)]
pub enum ReplError {
	#[error(transparent)]
	Terminal(#[from] wf_term::Error),
	#[error("failed to read or write history file: {0}")]
	History(#[from] std::io::Error),
}

/// Static configuration for a [`Repl`] session.
#[derive(Debug, Clone)]
pub struct ReplConfig {
	pub prompt: String,
	pub continuation_prompt: String,
	/// Whether a trailing, unescaped backslash joins the next accepted line
	/// before tokenization (spec §4.L step 6).
	pub multiline: bool,
	/// If set, history is loaded from this path at the start of [`Repl::run`]
	/// and saved back to it on clean exit.
	pub history_path: Option<PathBuf>,
}

impl Default for ReplConfig {
	fn default() -> Self {
		Self {
			prompt: "> ".to_string(),
			continuation_prompt: "... ".to_string(),
			multiline: false,
			history_path: None,
		}
	}
}

/// What a single accepted-line cycle produced.
enum LineOutcome {
	Exit,
	Cancelled,
	Accepted(String),
}

/// Drives the interactive read-eval-print loop described in spec §4.L.
pub struct Repl<'a> {
	terminal: &'a mut dyn Terminal,
	profile: Profile,
	history: History,
	routes: &'a FrozenRouteCollection,
	converters: &'a ConverterRegistry,
	completion: Option<&'a dyn CompletionSource>,
	help: Box<dyn HelpRenderer>,
	cancel: CancellationSignal,
	config: ReplConfig,
	editor: Editor,
	last_exit_code: i32,
}

impl<'a> Repl<'a> {
	pub fn new(terminal: &'a mut dyn Terminal, profile: Profile, routes: &'a FrozenRouteCollection, converters: &'a ConverterRegistry, config: ReplConfig) -> Self {
		Self {
			terminal,
			profile,
			history: History::default(),
			routes,
			converters,
			completion: None,
			help: Box::new(DefaultHelpRenderer),
			cancel: CancellationSignal::new(),
			config,
			editor: Editor::new(),
			last_exit_code: 0,
		}
	}

	/// Supplies a tab-completion source. Without one, `TabComplete` always
	/// rings the bell (spec §4.J: "zero candidates: emit a bell").
	pub fn with_completion(mut self, source: &'a dyn CompletionSource) -> Self {
		self.completion = Some(source);
		self
	}

	/// Overrides the default `help` built-in's renderer.
	pub fn with_help_renderer(mut self, renderer: Box<dyn HelpRenderer>) -> Self {
		self.help = renderer;
		self
	}

	/// A clone of the cancellation signal raised during handler execution
	/// when the interrupt chord fires. An application that wants true
	/// concurrent cancellation (rather than cooperative polling inside the
	/// handler) must arrange to call [`CancellationSignal::cancel`] itself —
	/// this core REPL loop is single-threaded and does not read further keys
	/// while a handler is running (spec §5: `readKey` and handler
	/// invocation are its only two blocking points, and they don't overlap).
	pub fn cancellation_signal(&self) -> CancellationSignal {
		self.cancel.clone()
	}

	/// The exit code of the most recently dispatched handler, `0` before
	/// any command has run.
	pub fn last_exit_code(&self) -> i32 {
		self.last_exit_code
	}

	/// Runs the loop until the user exits (Ctrl+D on an empty line, or the
	/// `exit`/`quit`/`q` built-in).
	pub fn run(&mut self) -> Result<(), ReplError> {
		if let Some(path) = self.config.history_path.clone() {
			self.history.load(&path)?;
		}

		loop {
			match self.read_accepted_line()? {
				LineOutcome::Exit => break,
				LineOutcome::Cancelled => continue,
				LineOutcome::Accepted(line) => {
					if line.is_empty() {
						continue;
					}
					self.history.push(line.clone());

					let tokens = match tokenize(&line) {
						Ok(tokens) => tokens,
						Err(err) => {
							self.write_line(&format!("parse error: {err}"))?;
							continue;
						}
					};
					if tokens.is_empty() {
						continue;
					}

					if let Some(builtin) = Builtin::recognize(&tokens) {
						if self.run_builtin(builtin)? {
							break;
						}
						continue;
					}

					self.dispatch(&tokens)?;
				}
			}
		}

		if let Some(path) = &self.config.history_path {
			self.history.save(path)?;
		}
		Ok(())
	}

	fn read_accepted_line(&mut self) -> Result<LineOutcome, ReplError> {
		let mut joined = String::new();
		let mut prompt = self.config.prompt.clone();

		loop {
			let should_cancel = || false;
			let event = self
				.editor
				.read_line(self.terminal, &self.profile, &self.history, self.completion, &should_cancel, &prompt, 0)?;

			match event {
				EditorEvent::Exit => return Ok(LineOutcome::Exit),
				EditorEvent::Cancelled => return Ok(LineOutcome::Cancelled),
				EditorEvent::Accepted(line) => {
					if self.config.multiline && wants_continuation(&line) {
						if !joined.is_empty() {
							joined.push('\n');
						}
						joined.push_str(strip_continuation(&line));
						prompt = self.config.continuation_prompt.clone();
						continue;
					}
					joined.push_str(&line);
					return Ok(LineOutcome::Accepted(joined));
				}
			}
		}
	}

	/// Runs a recognized built-in. Returns `true` if the loop should stop.
	fn run_builtin(&mut self, builtin: Builtin) -> Result<bool, ReplError> {
		match builtin {
			Builtin::Exit => Ok(true),
			Builtin::Clear => {
				self.terminal.clear_screen()?;
				self.terminal.flush()?;
				Ok(false)
			}
			Builtin::ClearHistory => {
				self.history.clear();
				Ok(false)
			}
			Builtin::History => {
				self.write_line(render_history(&self.history).trim_end())?;
				Ok(false)
			}
			Builtin::Help => {
				self.write_line(self.help.render(self.routes).trim_end())?;
				Ok(false)
			}
		}
	}

	fn dispatch(&mut self, tokens: &[String]) -> Result<(), ReplError> {
		let argv = tokens.to_vec();
		self.cancel.reset();
		let outcome = resolve(&argv, self.routes);

		let report = match &outcome {
			wf_routing::ResolveOutcome::NoMatch { reasons } => Some(format_no_match(&argv, reasons)),
			wf_routing::ResolveOutcome::Matched { .. } => None,
		};
		if let Some(report) = report {
			tracing::debug!(argv = ?argv, "no route matched");
			self.write_line(&report)?;
			self.last_exit_code = 2;
			return Ok(());
		}

		match dispatch(outcome, self.converters, &self.cancel) {
			DispatchOutcome::Ran(outcome) => {
				self.last_exit_code = match outcome {
					wf_routing::HandlerOutcome::ExitCode(code) => code,
					wf_routing::HandlerOutcome::Error(err) => {
						self.write_line(&format!("error: {err}"))?;
						1
					}
				};
			}
			DispatchOutcome::TypeError(err) => {
				tracing::debug!(%err, "argument conversion failed");
				self.write_line(&format!("argument error: {err}"))?;
				self.last_exit_code = 2;
			}
			DispatchOutcome::NoMatch => unreachable!("no-match outcomes are reported above before dispatching"),
		}
		Ok(())
	}

	fn write_line(&mut self, text: &str) -> Result<(), ReplError> {
		self.terminal.write(text)?;
		self.terminal.write("\n")?;
		self.terminal.flush()?;
		Ok(())
	}
}

fn format_no_match(argv: &[String], reasons: &[wf_routing::NoMatchReason]) -> String {
	let mut out = format!("no command matches: {}\n", argv.join(" "));
	for reason in reasons.iter().take(3) {
		out.push_str(&format!("  {}: {}\n", reason.pattern, describe_failure(&reason.failure)));
	}
	out.trim_end().to_string()
}

fn describe_failure(failure: &MatchFailure) -> String {
	failure.to_string()
}
