//! The fixed registry of editor action names.
//!
//! Every keybinding resolves to one of these. The set is closed: profile
//! construction rejects unknown action names (spec's `UnknownAction`) at
//! build time rather than at keypress time.

use std::fmt;
use std::str::FromStr;

/// An action the line editor can perform in response to a key-chord.
///
/// See module docs: this is a closed set resolved entirely at profile
/// build time, never looked up dynamically by string at keypress time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ActionName {
	// Cursor movement.
	ForwardChar,
	BackwardChar,
	ForwardWord,
	BackwardWord,
	ForwardWordEnd,
	BeginningOfLine,
	EndOfLine,
	BeginningOfBuffer,
	EndOfBuffer,
	NextLine,
	PreviousLine,

	// Insertion / deletion.
	SelfInsertOrOverwrite,
	QuotedInsert,
	InsertNewline,
	InsertTab,
	DeleteCharForward,
	DeleteCharBackward,
	ToggleInsertMode,

	// Kill ring.
	KillLine,
	KillWholeLine,
	BackwardKillLine,
	KillWord,
	BackwardKillWord,
	KillRegion,
	Yank,
	YankPop,

	// Undo / redo.
	Undo,
	Redo,

	// Word case operations.
	UpcaseWord,
	DowncaseWord,
	CapitalizeWord,
	TransposeChars,
	TransposeWords,

	// Selection.
	SetMark,
	StartSelection,
	ClearSelection,
	SelectAll,
	ExchangePointAndMark,

	// History.
	PreviousHistory,
	NextHistory,
	BeginningOfHistory,
	EndOfHistory,
	HistorySearchBackward,
	HistorySearchForward,

	// Incremental search.
	ReverseSearchHistory,
	ForwardSearchHistory,

	// Completion.
	TabComplete,
	TabCompleteReverse,

	// Control flow.
	AcceptLine,
	CancelLine,
	Interrupt,
	EndOfFile,
	ClearScreen,
	RefreshLine,
	DigitArgument,
}

/// All action names, in declaration order.
///
/// Used to validate profile construction input and to render a help
/// listing; not consulted on the hot keypress path.
pub const ACTION_NAMES: &[(&str, ActionName)] = &[
	("forward-char", ActionName::ForwardChar),
	("backward-char", ActionName::BackwardChar),
	("forward-word", ActionName::ForwardWord),
	("backward-word", ActionName::BackwardWord),
	("forward-word-end", ActionName::ForwardWordEnd),
	("beginning-of-line", ActionName::BeginningOfLine),
	("end-of-line", ActionName::EndOfLine),
	("beginning-of-buffer", ActionName::BeginningOfBuffer),
	("end-of-buffer", ActionName::EndOfBuffer),
	("next-line", ActionName::NextLine),
	("previous-line", ActionName::PreviousLine),
	("self-insert", ActionName::SelfInsertOrOverwrite),
	("quoted-insert", ActionName::QuotedInsert),
	("insert-newline", ActionName::InsertNewline),
	("insert-tab", ActionName::InsertTab),
	("delete-char", ActionName::DeleteCharForward),
	("delete-char-backward", ActionName::DeleteCharBackward),
	("toggle-insert-mode", ActionName::ToggleInsertMode),
	("kill-line", ActionName::KillLine),
	("kill-whole-line", ActionName::KillWholeLine),
	("backward-kill-line", ActionName::BackwardKillLine),
	("kill-word", ActionName::KillWord),
	("backward-kill-word", ActionName::BackwardKillWord),
	("kill-region", ActionName::KillRegion),
	("yank", ActionName::Yank),
	("yank-pop", ActionName::YankPop),
	("undo", ActionName::Undo),
	("redo", ActionName::Redo),
	("upcase-word", ActionName::UpcaseWord),
	("downcase-word", ActionName::DowncaseWord),
	("capitalize-word", ActionName::CapitalizeWord),
	("transpose-chars", ActionName::TransposeChars),
	("transpose-words", ActionName::TransposeWords),
	("set-mark", ActionName::SetMark),
	("start-selection", ActionName::StartSelection),
	("clear-selection", ActionName::ClearSelection),
	("select-all", ActionName::SelectAll),
	("exchange-point-and-mark", ActionName::ExchangePointAndMark),
	("previous-history", ActionName::PreviousHistory),
	("next-history", ActionName::NextHistory),
	("beginning-of-history", ActionName::BeginningOfHistory),
	("end-of-history", ActionName::EndOfHistory),
	("history-search-backward", ActionName::HistorySearchBackward),
	("history-search-forward", ActionName::HistorySearchForward),
	("reverse-search-history", ActionName::ReverseSearchHistory),
	("forward-search-history", ActionName::ForwardSearchHistory),
	("tab-complete", ActionName::TabComplete),
	("tab-complete-reverse", ActionName::TabCompleteReverse),
	("accept-line", ActionName::AcceptLine),
	("cancel-line", ActionName::CancelLine),
	("interrupt", ActionName::Interrupt),
	("end-of-file", ActionName::EndOfFile),
	("clear-screen", ActionName::ClearScreen),
	("refresh-line", ActionName::RefreshLine),
	("digit-argument", ActionName::DigitArgument),
];

impl FromStr for ActionName {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ACTION_NAMES
			.iter()
			.find(|(name, _)| *name == s)
			.map(|(_, action)| *action)
			.ok_or(())
	}
}

impl fmt::Display for ActionName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = ACTION_NAMES
			.iter()
			.find(|(_, action)| action == self)
			.map(|(name, _)| *name)
			.unwrap_or("unknown");
		write!(f, "{name}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_action_name_round_trips() {
		for (name, action) in ACTION_NAMES {
			assert_eq!(name.parse::<ActionName>().unwrap(), *action);
			assert_eq!(action.to_string(), *name);
		}
	}

	#[test]
	fn unknown_name_fails() {
		assert!("not-a-real-action".parse::<ActionName>().is_err());
	}

	#[test]
	fn registry_has_no_duplicate_names() {
		let mut names: Vec<&str> = ACTION_NAMES.iter().map(|(n, _)| *n).collect();
		let before = names.len();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), before);
	}
}
