//! Key-binding profile composition.
//!
//! A [`Profile`] maps key-chord sequences to [`ActionName`]s. Profiles are
//! built from a named base (one of [`NamedProfile`]'s built-ins) plus three
//! layers applied in order: removals, overrides, then additions. Any layer
//! that references an unknown action name fails the build immediately —
//! unknown actions are never discovered later at keypress time.

use std::fmt;

use thiserror::Error;
use wf_keymap_parser::{Node, ParseError, parse_seq};

use crate::actions::ActionName;
use crate::matcher::{ContinuationKind, MatchResult, Matcher};

/// A fully resolved key-binding profile.
#[derive(Debug, Clone)]
pub struct Profile {
	matcher: Matcher<ActionName>,
}

impl Profile {
	/// Looks up a key-chord sequence against this profile's bindings.
	pub fn lookup(&self, nodes: &[Node]) -> MatchResult<ActionName> {
		self.matcher.lookup(nodes)
	}

	/// Returns `true` if any binding starts with this prefix.
	pub fn has_prefix(&self, nodes: &[Node]) -> bool {
		self.matcher.has_prefix(nodes)
	}

	/// Returns the possible next keys from a prefix, for help displays.
	pub fn continuations(&self, prefix: &[Node]) -> Vec<(Node, Option<ActionName>, ContinuationKind)> {
		self.matcher.continuations_with_kind(prefix)
	}
}

/// One of the built-in base profiles a [`ProfileBuilder`] starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedProfile {
	/// Minimal bindings: arrow keys, Enter, Backspace, Ctrl+C, Ctrl+D.
	Default,
	/// Emacs-style bindings (Ctrl+a/e/k/y, Alt+f/b, ...).
	Emacs,
	/// Vi-style modal bindings layered on top of the default set.
	Vi,
	/// VSCode-style bindings (Ctrl+Left/Right for word motion, etc).
	VSCode,
}

impl NamedProfile {
	fn bindings(self) -> &'static [(&'static str, ActionName)] {
		match self {
			NamedProfile::Default => DEFAULT_BINDINGS,
			NamedProfile::Emacs => EMACS_BINDINGS,
			NamedProfile::Vi => VI_BINDINGS,
			NamedProfile::VSCode => VSCODE_BINDINGS,
		}
	}
}

impl fmt::Display for NamedProfile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			NamedProfile::Default => "default",
			NamedProfile::Emacs => "emacs",
			NamedProfile::Vi => "vi",
			NamedProfile::VSCode => "vscode",
		};
		write!(f, "{name}")
	}
}

const DEFAULT_BINDINGS: &[(&str, ActionName)] = &[
	("Left", ActionName::BackwardChar),
	("Right", ActionName::ForwardChar),
	("Up", ActionName::PreviousHistory),
	("Down", ActionName::NextHistory),
	("Home", ActionName::BeginningOfLine),
	("End", ActionName::EndOfLine),
	("Backspace", ActionName::DeleteCharBackward),
	("Delete", ActionName::DeleteCharForward),
	("Enter", ActionName::AcceptLine),
	("Tab", ActionName::TabComplete),
	("Shift+Tab", ActionName::TabCompleteReverse),
	("Escape", ActionName::CancelLine),
	("Ctrl+c", ActionName::Interrupt),
	("Ctrl+d", ActionName::EndOfFile),
	("Ctrl+l", ActionName::ClearScreen),
	("@any", ActionName::SelfInsertOrOverwrite),
];

const EMACS_BINDINGS: &[(&str, ActionName)] = &[
	("Left", ActionName::BackwardChar),
	("Right", ActionName::ForwardChar),
	("Up", ActionName::PreviousHistory),
	("Down", ActionName::NextHistory),
	("Enter", ActionName::AcceptLine),
	("Tab", ActionName::TabComplete),
	("Shift+Tab", ActionName::TabCompleteReverse),
	("Backspace", ActionName::DeleteCharBackward),
	("Delete", ActionName::DeleteCharForward),
	("Ctrl+a", ActionName::BeginningOfLine),
	("Ctrl+e", ActionName::EndOfLine),
	("Ctrl+f", ActionName::ForwardChar),
	("Ctrl+b", ActionName::BackwardChar),
	("Ctrl+k", ActionName::KillLine),
	("Ctrl+u", ActionName::BackwardKillLine),
	("Ctrl+w", ActionName::BackwardKillWord),
	("Ctrl+y", ActionName::Yank),
	("Alt+y", ActionName::YankPop),
	("Alt+f", ActionName::ForwardWord),
	("Alt+b", ActionName::BackwardWord),
	("Alt+d", ActionName::KillWord),
	("Alt+u", ActionName::UpcaseWord),
	("Alt+l", ActionName::DowncaseWord),
	("Alt+c", ActionName::CapitalizeWord),
	("Ctrl+t", ActionName::TransposeChars),
	("Ctrl+_", ActionName::Undo),
	("Ctrl+r", ActionName::ReverseSearchHistory),
	("Ctrl+s", ActionName::ForwardSearchHistory),
	("Ctrl+p", ActionName::PreviousHistory),
	("Ctrl+n", ActionName::NextHistory),
	("Escape", ActionName::CancelLine),
	("Ctrl+c", ActionName::Interrupt),
	("Ctrl+d", ActionName::EndOfFile),
	("Ctrl+l", ActionName::ClearScreen),
	("@any", ActionName::SelfInsertOrOverwrite),
];

const VI_BINDINGS: &[(&str, ActionName)] = &[
	("Left", ActionName::BackwardChar),
	("Right", ActionName::ForwardChar),
	("Up", ActionName::PreviousHistory),
	("Down", ActionName::NextHistory),
	("Enter", ActionName::AcceptLine),
	("Tab", ActionName::TabComplete),
	("Backspace", ActionName::DeleteCharBackward),
	("Delete", ActionName::DeleteCharForward),
	("Escape", ActionName::ClearSelection),
	("h", ActionName::BackwardChar),
	("l", ActionName::ForwardChar),
	("k", ActionName::PreviousHistory),
	("j", ActionName::NextHistory),
	("w", ActionName::ForwardWord),
	("b", ActionName::BackwardWord),
	("e", ActionName::ForwardWordEnd),
	("0", ActionName::BeginningOfLine),
	("$", ActionName::EndOfLine),
	("x", ActionName::DeleteCharForward),
	("u", ActionName::Undo),
	("v", ActionName::StartSelection),
	("Ctrl+c", ActionName::Interrupt),
	("Ctrl+d", ActionName::EndOfFile),
	("Ctrl+l", ActionName::ClearScreen),
	("@any", ActionName::SelfInsertOrOverwrite),
];

const VSCODE_BINDINGS: &[(&str, ActionName)] = &[
	("Left", ActionName::BackwardChar),
	("Right", ActionName::ForwardChar),
	("Up", ActionName::PreviousHistory),
	("Down", ActionName::NextHistory),
	("Home", ActionName::BeginningOfLine),
	("End", ActionName::EndOfLine),
	("Enter", ActionName::AcceptLine),
	("Tab", ActionName::TabComplete),
	("Shift+Tab", ActionName::TabCompleteReverse),
	("Backspace", ActionName::DeleteCharBackward),
	("Delete", ActionName::DeleteCharForward),
	("Ctrl+Left", ActionName::BackwardWord),
	("Ctrl+Right", ActionName::ForwardWord),
	("Ctrl+Backspace", ActionName::BackwardKillWord),
	("Ctrl+Delete", ActionName::KillWord),
	("Ctrl+z", ActionName::Undo),
	("Ctrl+Shift+z", ActionName::Redo),
	("Ctrl+a", ActionName::SelectAll),
	("Escape", ActionName::CancelLine),
	("Ctrl+c", ActionName::Interrupt),
	("Ctrl+d", ActionName::EndOfFile),
	("Ctrl+l", ActionName::ClearScreen),
	("@any", ActionName::SelfInsertOrOverwrite),
];

/// Errors that can occur while building a [`Profile`].
#[derive(Debug, Error)]
pub enum Error {
	/// A removal, override, or addition referenced an action name that
	/// isn't in [`crate::ACTION_NAMES`].
	#[error("unknown action {0:?}")]
	UnknownAction(String),
	/// A key pattern in a removal, override, or addition failed to parse.
	#[error("invalid key pattern {pattern:?}: {source}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// The underlying parse failure.
		source: ParseError,
	},
}

/// Builds a [`Profile`] from a named base plus removal/override/addition
/// layers, applied in that order.
#[derive(Debug)]
pub struct ProfileBuilder {
	base: NamedProfile,
	removals: Vec<String>,
	overrides: Vec<(String, String)>,
	additions: Vec<(String, String)>,
}

impl ProfileBuilder {
	/// Starts a new builder from a named base profile.
	pub fn new(base: NamedProfile) -> Self {
		Self {
			base,
			removals: Vec::new(),
			overrides: Vec::new(),
			additions: Vec::new(),
		}
	}

	/// Removes the binding for `pattern`, if the base profile has one.
	pub fn remove(mut self, pattern: impl Into<String>) -> Self {
		self.removals.push(pattern.into());
		self
	}

	/// Replaces the binding for `pattern` with `action`, if present in the
	/// base or a prior layer; otherwise behaves like [`Self::add`].
	pub fn override_binding(mut self, pattern: impl Into<String>, action: impl Into<String>) -> Self {
		self.overrides.push((pattern.into(), action.into()));
		self
	}

	/// Adds a new binding for `pattern`, replacing any existing binding for
	/// the exact same sequence.
	pub fn add(mut self, pattern: impl Into<String>, action: impl Into<String>) -> Self {
		self.additions.push((pattern.into(), action.into()));
		self
	}

	/// Resolves all layers into a [`Profile`], failing on the first unknown
	/// action name or unparseable key pattern encountered.
	pub fn build(self) -> Result<Profile, Error> {
		let mut matcher: Matcher<ActionName> = Matcher::new();

		for (pattern, action) in self.base.bindings() {
			matcher.add(parse_pattern(pattern)?, *action);
		}

		for pattern in &self.removals {
			matcher.remove(&parse_pattern(pattern)?);
		}

		for (pattern, action) in &self.overrides {
			let action = resolve_action(action)?;
			matcher.add(parse_pattern(pattern)?, action);
		}

		for (pattern, action) in &self.additions {
			let action = resolve_action(action)?;
			matcher.add(parse_pattern(pattern)?, action);
		}

		Ok(Profile { matcher })
	}
}

fn parse_pattern(pattern: &str) -> Result<Vec<Node>, Error> {
	parse_seq(pattern).map_err(|source| Error::InvalidPattern {
		pattern: pattern.to_string(),
		source,
	})
}

fn resolve_action(name: &str) -> Result<ActionName, Error> {
	name.parse().map_err(|()| Error::UnknownAction(name.to_string()))
}

#[cfg(test)]
mod tests {
	use wf_keymap_parser::parse_seq;

	use super::*;

	#[test]
	fn default_profile_builds() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		assert_eq!(
			profile.lookup(&parse_seq("Enter").unwrap()),
			MatchResult::Complete(ActionName::AcceptLine)
		);
	}

	#[test]
	fn removal_drops_base_binding() {
		let profile = ProfileBuilder::new(NamedProfile::Emacs)
			.remove("Ctrl+k")
			.build()
			.unwrap();
		assert_eq!(profile.lookup(&parse_seq("Ctrl+k").unwrap()), MatchResult::None);
	}

	#[test]
	fn override_replaces_base_binding() {
		let profile = ProfileBuilder::new(NamedProfile::Emacs)
			.override_binding("Ctrl+k", "backward-kill-line")
			.build()
			.unwrap();
		assert_eq!(
			profile.lookup(&parse_seq("Ctrl+k").unwrap()),
			MatchResult::Complete(ActionName::BackwardKillLine)
		);
	}

	#[test]
	fn addition_introduces_new_binding() {
		let profile = ProfileBuilder::new(NamedProfile::Default)
			.add("Ctrl+g g", "beginning-of-buffer")
			.build()
			.unwrap();
		assert_eq!(
			profile.lookup(&parse_seq("Ctrl+g g").unwrap()),
			MatchResult::Complete(ActionName::BeginningOfBuffer)
		);
	}

	#[test]
	fn unknown_action_fails_at_build_time_not_lookup_time() {
		let err = ProfileBuilder::new(NamedProfile::Default)
			.add("Ctrl+x Ctrl+s", "save-the-world")
			.build()
			.unwrap_err();
		assert!(matches!(err, Error::UnknownAction(name) if name == "save-the-world"));
	}

	#[test]
	fn invalid_pattern_fails_at_build_time() {
		let err = ProfileBuilder::new(NamedProfile::Default)
			.add("Ctrl+", "forward-char")
			.build()
			.unwrap_err();
		assert!(matches!(err, Error::InvalidPattern { .. }));
	}

	#[test]
	fn layers_apply_in_order_removal_then_override_then_addition() {
		// Override a removed binding: removal happens first, so the override
		// re-introduces it rather than being a no-op.
		let profile = ProfileBuilder::new(NamedProfile::Emacs)
			.remove("Ctrl+k")
			.override_binding("Ctrl+k", "kill-whole-line")
			.build()
			.unwrap();
		assert_eq!(
			profile.lookup(&parse_seq("Ctrl+k").unwrap()),
			MatchResult::Complete(ActionName::KillWholeLine)
		);
	}
}
