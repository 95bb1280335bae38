//! The line editor's state machine: mode transitions, the per-keystroke
//! loop, and action execution.

use unicode_width::UnicodeWidthStr;
use wf_history::History;
use wf_keymap::{ActionName, MatchResult, Profile};
use wf_keymap_parser::{Key, Modifier, Node};
use wf_term::{Error as TermError, KeyCode, KeyEvent, Terminal};

use crate::buffer::EditorBuffer;
use crate::completion::{CompletionSource, MenuCompleteState, current_token_range};
use crate::kill_ring::KillRing;
use crate::motion;
use crate::search::{SearchDirection, SearchState, search};
use crate::undo::UndoStack;

/// The editor's current mode.
#[derive(Debug)]
enum Mode {
	Normal,
	Search(SearchState),
	MenuComplete(MenuCompleteState),
}

/// What happened when a line editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
	/// The user accepted the current line.
	Accepted(String),
	/// The user cancelled (empty buffer interrupt, or search escape with an
	/// empty outer buffer).
	Cancelled,
	/// The user asked to end the session entirely (end-of-file on an empty
	/// line).
	Exit,
}

/// Owns state that persists across lines within one REPL session: the kill
/// ring and insert-vs-overwrite preference. Buffer, undo, and mode reset at
/// the start of every [`Editor::read_line`] call.
pub struct Editor {
	kill_ring: KillRing,
	last_was_yank: bool,
}

impl Default for Editor {
	fn default() -> Self {
		Self::new()
	}
}

impl Editor {
	pub fn new() -> Self {
		Self {
			kill_ring: KillRing::default(),
			last_was_yank: false,
		}
	}

	/// Runs one interactive line-editing session: renders `prompt`, reads
	/// keys, and returns once the line is accepted, cancelled, or the
	/// session should end.
	///
	/// `row` is the terminal row the prompt starts on; callers render a
	/// fresh prompt at the start of a new row before each call.
	pub fn read_line(
		&mut self,
		terminal: &mut dyn Terminal,
		profile: &Profile,
		history: &History,
		completion: Option<&dyn CompletionSource>,
		should_cancel: &dyn Fn() -> bool,
		prompt: &str,
		row: u16,
	) -> Result<EditorEvent, TermError> {
		let mut buffer = EditorBuffer::new();
		let mut undo = UndoStack::new();
		let mut mode = Mode::Normal;
		let mut pending: Vec<Node> = Vec::new();
		let mut history_cursor = history.len();
		let mut pending_line = String::new();

		render(terminal, &render_prompt(prompt, &mode), &buffer, row)?;

		loop {
			let key = terminal.read_key(should_cancel)?;
			tracing::trace!(?key, "read_key");
			let node = key_to_node(key);
			pending.push(node);

			let resolved = match profile.lookup(&pending) {
				MatchResult::Complete(action) => Some(action),
				MatchResult::Partial { .. } => None,
				MatchResult::None if pending.len() > 1 => {
					pending = vec![node];
					match profile.lookup(&pending) {
						MatchResult::Complete(action) => Some(action),
						MatchResult::Partial { .. } => None,
						MatchResult::None => Some(implicit_action(key)),
					}
				}
				MatchResult::None => Some(implicit_action(key)),
			};

			let Some(action) = resolved else {
				continue;
			};
			pending.clear();

			let outcome = if matches!(mode, Mode::Search(_)) {
				self.execute_search(action, key, &mut buffer, &mut undo, history, &mut history_cursor, &mut pending_line, completion, &mut mode)
			} else if matches!(mode, Mode::MenuComplete(_)) {
				self.execute_menu_complete(action, &mut buffer, &mut mode)
			} else {
				self.execute_normal(action, key, &mut buffer, &mut undo, history, &mut history_cursor, &mut pending_line, completion)
			};

			// Mode transitions that must happen outside the per-mode
			// handlers below (entering Search/MenuComplete) are applied
			// here so the handlers above can stay borrow-simple.
			if matches!(mode, Mode::Normal) {
				if let Some(transition) = self.maybe_enter_mode(action, &buffer, completion) {
					mode = transition;
				}
			}

			match outcome {
				StepOutcome::Continue => {}
				StepOutcome::Refresh => {}
				StepOutcome::Accept(line) => return Ok(EditorEvent::Accepted(line)),
				StepOutcome::Cancel => return Ok(EditorEvent::Cancelled),
				StepOutcome::Exit => return Ok(EditorEvent::Exit),
			}

			render(terminal, &render_prompt(prompt, &mode), &buffer, row)?;
		}
	}

	#[allow(clippy::too_many_arguments)]
	fn execute_normal(
		&mut self,
		action: ActionName,
		key: KeyEvent,
		buffer: &mut EditorBuffer,
		undo: &mut UndoStack,
		history: &History,
		history_cursor: &mut usize,
		pending_line: &mut String,
		completion: Option<&dyn CompletionSource>,
	) -> StepOutcome {
		let _ = completion;
		let was_yank = matches!(action, ActionName::Yank | ActionName::YankPop);

		let result = match action {
			ActionName::ForwardChar => {
				buffer.move_right();
				StepOutcome::Continue
			}
			ActionName::BackwardChar => {
				buffer.move_left();
				StepOutcome::Continue
			}
			ActionName::ForwardWord => {
				let pos = motion::forward_word(buffer.text(), buffer.cursor());
				buffer.move_to(pos);
				StepOutcome::Continue
			}
			ActionName::BackwardWord => {
				let pos = motion::backward_word(buffer.text(), buffer.cursor());
				buffer.move_to(pos);
				StepOutcome::Continue
			}
			ActionName::ForwardWordEnd => {
				let pos = motion::word_end(buffer.text(), buffer.cursor());
				buffer.move_to(pos);
				StepOutcome::Continue
			}
			ActionName::BeginningOfLine | ActionName::BeginningOfBuffer => {
				buffer.move_home();
				StepOutcome::Continue
			}
			ActionName::EndOfLine | ActionName::EndOfBuffer => {
				buffer.move_end();
				StepOutcome::Continue
			}
			ActionName::SelfInsertOrOverwrite => {
				if let KeyCode::Char(c) = key.code {
					let before = buffer.snapshot();
					buffer.insert_str(&c.to_string());
					undo.record(before, true);
				}
				StepOutcome::Continue
			}
			ActionName::QuotedInsert => StepOutcome::Continue,
			ActionName::InsertNewline => {
				let before = buffer.snapshot();
				buffer.insert_str("\n");
				undo.record(before, false);
				StepOutcome::Continue
			}
			ActionName::InsertTab => {
				let before = buffer.snapshot();
				buffer.insert_str("\t");
				undo.record(before, false);
				StepOutcome::Continue
			}
			ActionName::DeleteCharForward => {
				let before = buffer.snapshot();
				if buffer.delete_char_forward().is_some() {
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::DeleteCharBackward => {
				let before = buffer.snapshot();
				if buffer.delete_char_backward().is_some() {
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::ToggleInsertMode => {
				buffer.toggle_insert_mode();
				StepOutcome::Continue
			}
			ActionName::KillLine => {
				let before = buffer.snapshot();
				let end = buffer.text().len();
				let start = buffer.cursor();
				if start < end {
					let killed = buffer.delete_range(start, end);
					self.kill_ring.push(killed);
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::KillWholeLine => {
				let before = buffer.snapshot();
				let killed = buffer.delete_range(0, buffer.text().len());
				self.kill_ring.push(killed);
				undo.record(before, false);
				StepOutcome::Continue
			}
			ActionName::BackwardKillLine => {
				let before = buffer.snapshot();
				let end = buffer.cursor();
				if end > 0 {
					let killed = buffer.delete_range(0, end);
					self.kill_ring.push(killed);
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::KillWord => {
				let before = buffer.snapshot();
				let end = motion::forward_word(buffer.text(), buffer.cursor());
				let start = buffer.cursor();
				if start < end {
					let killed = buffer.delete_range(start, end);
					self.kill_ring.push(killed);
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::BackwardKillWord => {
				let before = buffer.snapshot();
				let start = motion::backward_word(buffer.text(), buffer.cursor());
				let end = buffer.cursor();
				if start < end {
					let killed = buffer.delete_range(start, end);
					self.kill_ring.push(killed);
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::KillRegion => {
				if let Some((start, end)) = buffer.selection_range() {
					let before = buffer.snapshot();
					let killed = buffer.delete_range(start, end);
					self.kill_ring.push(killed);
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::Yank => {
				if let Some(text) = self.kill_ring.yank().map(str::to_string) {
					let before = buffer.snapshot();
					buffer.insert_str(&text);
					undo.record(before, false);
				}
				StepOutcome::Continue
			}
			ActionName::YankPop => {
				// Valid only immediately after Yank/YankPop; callers track
				// that via `self.last_was_yank`.
				if self.last_was_yank {
					if let Some(text) = self.kill_ring.yank_pop().map(str::to_string) {
						let before = buffer.snapshot();
						buffer.insert_str(&text);
						undo.record(before, false);
					}
				}
				StepOutcome::Continue
			}
			ActionName::Undo => {
				let current = buffer.snapshot();
				if let Some(previous) = undo.undo(current) {
					buffer.restore(previous);
				}
				StepOutcome::Continue
			}
			ActionName::Redo => {
				let current = buffer.snapshot();
				if let Some(next) = undo.redo(current) {
					buffer.restore(next);
				}
				StepOutcome::Continue
			}
			ActionName::UpcaseWord => {
				transform_word(buffer, undo, |w| w.to_uppercase());
				StepOutcome::Continue
			}
			ActionName::DowncaseWord => {
				transform_word(buffer, undo, |w| w.to_lowercase());
				StepOutcome::Continue
			}
			ActionName::CapitalizeWord => {
				transform_word(buffer, undo, capitalize);
				StepOutcome::Continue
			}
			ActionName::TransposeChars => {
				let before = buffer.snapshot();
				transpose_chars(buffer);
				undo.record(before, false);
				StepOutcome::Continue
			}
			ActionName::TransposeWords => StepOutcome::Continue,
			ActionName::SetMark | ActionName::StartSelection => {
				buffer.set_selection_anchor(Some(buffer.cursor()));
				StepOutcome::Continue
			}
			ActionName::ClearSelection => {
				buffer.clear_selection();
				StepOutcome::Continue
			}
			ActionName::SelectAll => {
				buffer.set_selection_anchor(Some(0));
				buffer.move_to(buffer.text().len());
				StepOutcome::Continue
			}
			ActionName::ExchangePointAndMark => {
				if let Some(anchor) = buffer.selection_anchor() {
					let cursor = buffer.cursor();
					buffer.set_selection_anchor(Some(cursor));
					buffer.move_to(anchor);
				}
				StepOutcome::Continue
			}
			ActionName::PreviousHistory => {
				navigate_history(buffer, history, history_cursor, pending_line, -1);
				StepOutcome::Continue
			}
			ActionName::NextHistory => {
				navigate_history(buffer, history, history_cursor, pending_line, 1);
				StepOutcome::Continue
			}
			ActionName::BeginningOfHistory => {
				if history.len() > 0 {
					*history_cursor = 0;
					if let Some(entry) = history.get(0) {
						buffer.set_text(entry, entry.len());
					}
				}
				StepOutcome::Continue
			}
			ActionName::EndOfHistory => {
				*history_cursor = history.len();
				buffer.set_text(pending_line.clone(), pending_line.len());
				StepOutcome::Continue
			}
			ActionName::HistorySearchBackward => {
				let prefix = &buffer.text()[..buffer.cursor()];
				if let Some((idx, text)) = search(history, prefix, Some(history.len()), SearchDirection::Backward) {
					*history_cursor = idx;
					let cursor = text.len();
					buffer.set_text(text, cursor);
				}
				StepOutcome::Continue
			}
			ActionName::HistorySearchForward => {
				let prefix = &buffer.text()[..buffer.cursor()];
				if let Some((idx, text)) = search(history, prefix, Some(*history_cursor), SearchDirection::Forward) {
					*history_cursor = idx;
					let cursor = text.len();
					buffer.set_text(text, cursor);
				}
				StepOutcome::Continue
			}
			ActionName::ReverseSearchHistory | ActionName::ForwardSearchHistory => StepOutcome::Continue,
			ActionName::TabComplete | ActionName::TabCompleteReverse => StepOutcome::Continue,
			ActionName::AcceptLine => StepOutcome::Accept(buffer.text().to_string()),
			ActionName::CancelLine => {
				if buffer.is_empty() {
					StepOutcome::Cancel
				} else {
					let before = buffer.snapshot();
					buffer.set_text(String::new(), 0);
					undo.record(before, false);
					StepOutcome::Continue
				}
			}
			ActionName::Interrupt => {
				if buffer.is_empty() {
					StepOutcome::Cancel
				} else {
					let before = buffer.snapshot();
					buffer.set_text(String::new(), 0);
					undo.record(before, false);
					StepOutcome::Continue
				}
			}
			ActionName::EndOfFile => {
				if buffer.is_empty() {
					StepOutcome::Exit
				} else {
					let before = buffer.snapshot();
					if buffer.delete_char_forward().is_some() {
						undo.record(before, false);
					}
					StepOutcome::Continue
				}
			}
			ActionName::ClearScreen => StepOutcome::Refresh,
			ActionName::RefreshLine => StepOutcome::Refresh,
			ActionName::DigitArgument => StepOutcome::Continue,
			ActionName::NextLine | ActionName::PreviousLine => StepOutcome::Continue,
			_ => StepOutcome::Continue,
		};

		self.last_was_yank = was_yank;
		result
	}

	#[allow(clippy::too_many_arguments)]
	fn execute_search(
		&mut self,
		action: ActionName,
		key: KeyEvent,
		buffer: &mut EditorBuffer,
		undo: &mut UndoStack,
		history: &History,
		history_cursor: &mut usize,
		pending_line: &mut String,
		completion: Option<&dyn CompletionSource>,
		mode: &mut Mode,
	) -> StepOutcome {
		let Mode::Search(state) = mode else { unreachable!() };

		if key.code == KeyCode::Escape {
			let text = state.pre_search_text.clone();
			let cursor = state.pre_search_cursor;
			buffer.set_text(text, cursor);
			*mode = Mode::Normal;
			return StepOutcome::Continue;
		}

		match action {
			ActionName::SelfInsertOrOverwrite => {
				if let KeyCode::Char(c) = key.code {
					state.pattern.push(c);
					if let Some((idx, text)) = search(history, &state.pattern, None, state.direction) {
						state.candidate = Some(idx);
						buffer.set_text(text, 0);
					} else {
						state.candidate = None;
					}
				}
				StepOutcome::Continue
			}
			ActionName::DeleteCharBackward => {
				state.pattern.pop();
				if let Some((idx, text)) = search(history, &state.pattern, None, state.direction) {
					state.candidate = Some(idx);
					buffer.set_text(text, 0);
				} else {
					state.candidate = None;
					buffer.set_text(state.pre_search_text.clone(), state.pre_search_cursor);
				}
				StepOutcome::Continue
			}
			ActionName::ReverseSearchHistory | ActionName::ForwardSearchHistory => {
				if let Some((idx, text)) = search(history, &state.pattern, state.candidate, state.direction) {
					state.candidate = Some(idx);
					buffer.set_text(text, 0);
				}
				StepOutcome::Continue
			}
			ActionName::AcceptLine => {
				let accepted = buffer.text().to_string();
				*mode = Mode::Normal;
				StepOutcome::Accept(accepted)
			}
			ActionName::CancelLine | ActionName::Interrupt => {
				let text = state.pre_search_text.clone();
				let cursor = state.pre_search_cursor;
				buffer.set_text(text, cursor);
				*mode = Mode::Normal;
				StepOutcome::Continue
			}
			_ => {
				// Any other bound action accepts the current candidate and
				// then executes that action in Normal mode.
				*mode = Mode::Normal;
				self.execute_normal(action, key, buffer, undo, history, history_cursor, pending_line, completion)
			}
		}
	}

	fn execute_menu_complete(&mut self, action: ActionName, buffer: &mut EditorBuffer, mode: &mut Mode) -> StepOutcome {
		let Mode::MenuComplete(state) = mode else { unreachable!() };

		match action {
			ActionName::TabComplete => {
				state.cycle_forward();
				apply_candidate(buffer, state);
				StepOutcome::Continue
			}
			ActionName::TabCompleteReverse => {
				state.cycle_backward();
				apply_candidate(buffer, state);
				StepOutcome::Continue
			}
			_ => {
				*mode = Mode::Normal;
				StepOutcome::Continue
			}
		}
	}

	fn maybe_enter_mode(&mut self, action: ActionName, buffer: &EditorBuffer, completion: Option<&dyn CompletionSource>) -> Option<Mode> {
		match action {
			ActionName::ReverseSearchHistory => Some(Mode::Search(SearchState::new(SearchDirection::Backward, buffer.text().to_string(), buffer.cursor()))),
			ActionName::ForwardSearchHistory => Some(Mode::Search(SearchState::new(SearchDirection::Forward, buffer.text().to_string(), buffer.cursor()))),
			ActionName::TabComplete | ActionName::TabCompleteReverse => {
				let source = completion?;
				let (start, end) = current_token_range(buffer.text(), buffer.cursor());
				let candidates = source.complete(buffer.text(), buffer.cursor());
				match candidates.len() {
					0 => None,
					_ => Some(Mode::MenuComplete(MenuCompleteState::new(candidates, (start, end)))),
				}
			}
			_ => None,
		}
	}
}

/// A single keystroke's effect on the editing session.
enum StepOutcome {
	Continue,
	Refresh,
	Accept(String),
	Cancel,
	Exit,
}

fn implicit_action(key: KeyEvent) -> ActionName {
	if matches!(key.code, KeyCode::Char(_)) && !key.modifiers.ctrl && !key.modifiers.alt {
		ActionName::SelfInsertOrOverwrite
	} else {
		ActionName::RefreshLine
	}
}

fn key_to_node(key: KeyEvent) -> Node {
	let mut modifiers = 0u8;
	if key.modifiers.ctrl {
		modifiers |= Modifier::Ctrl as u8;
	}
	if key.modifiers.alt {
		modifiers |= Modifier::Alt as u8;
	}
	if key.modifiers.shift {
		modifiers |= Modifier::Shift as u8;
	}
	let mapped_key = match key.code {
		KeyCode::Char(c) => Key::Char(c),
		KeyCode::F(n) => Key::F(n),
		KeyCode::Enter => Key::Enter,
		KeyCode::Escape => Key::Escape,
		KeyCode::Tab => Key::Tab,
		KeyCode::Backspace => Key::Backspace,
		KeyCode::Delete => Key::Delete,
		KeyCode::Insert => Key::Insert,
		KeyCode::Home => Key::Home,
		KeyCode::End => Key::End,
		KeyCode::PageUp => Key::PageUp,
		KeyCode::PageDown => Key::PageDown,
		KeyCode::Up => Key::Up,
		KeyCode::Down => Key::Down,
		KeyCode::Left => Key::Left,
		KeyCode::Right => Key::Right,
	};
	Node::new(modifiers, mapped_key)
}

fn navigate_history(buffer: &mut EditorBuffer, history: &History, history_cursor: &mut usize, pending_line: &mut String, delta: i32) {
	if delta < 0 {
		if *history_cursor == 0 {
			return;
		}
		if *history_cursor == history.len() {
			*pending_line = buffer.text().to_string();
		}
		*history_cursor -= 1;
	} else {
		if *history_cursor >= history.len() {
			return;
		}
		*history_cursor += 1;
	}

	if *history_cursor == history.len() {
		buffer.set_text(pending_line.clone(), pending_line.len());
	} else if let Some(entry) = history.get(*history_cursor) {
		buffer.set_text(entry, entry.len());
	}
}

fn transform_word(buffer: &mut EditorBuffer, undo: &mut UndoStack, transform: impl Fn(&str) -> String) {
	let start = {
		let mut i = buffer.cursor();
		let text = buffer.text();
		while i < text.len() && !text[i..].chars().next().unwrap().is_alphanumeric() {
			i += text[i..].chars().next().unwrap().len_utf8();
		}
		i
	};
	let end = motion::word_end(buffer.text(), buffer.cursor());
	if start >= end {
		return;
	}
	let before = buffer.snapshot();
	let word = buffer.text()[start..end].to_string();
	let replacement = transform(&word);
	buffer.delete_range(start, end);
	buffer.move_to(start);
	buffer.insert_str(&replacement);
	undo.record(before, false);
}

fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
		None => String::new(),
	}
}

fn transpose_chars(buffer: &mut EditorBuffer) {
	let cursor = buffer.cursor();
	if cursor == 0 || cursor >= buffer.text().len() {
		return;
	}
	let before_start = buffer.prev_boundary(cursor);
	let after_end = buffer.next_boundary(cursor);
	let first = buffer.text()[before_start..cursor].to_string();
	let second = buffer.text()[cursor..after_end].to_string();
	buffer.delete_range(before_start, after_end);
	buffer.move_to(before_start);
	buffer.insert_str(&format!("{second}{first}"));
}

fn apply_candidate(buffer: &mut EditorBuffer, state: &MenuCompleteState) {
	let (start, end) = state.token_range;
	let replacement = state.current().replacement.clone();
	let new_end = start + replacement.len();
	buffer.delete_range(start, end.min(buffer.text().len()));
	buffer.move_to(start);
	buffer.insert_str(&replacement);
	buffer.move_to(new_end);
}

fn render_prompt(prompt: &str, mode: &Mode) -> String {
	match mode {
		Mode::Normal | Mode::MenuComplete(_) => prompt.to_string(),
		Mode::Search(state) => format!("{}`{}': ", state.prompt_label(), state.pattern),
	}
}

fn render(terminal: &mut dyn Terminal, prompt: &str, buffer: &EditorBuffer, row: u16) -> Result<(), TermError> {
	terminal.clear_line()?;
	terminal.move_cursor(row, 0)?;
	terminal.write(prompt)?;
	terminal.write(buffer.text())?;
	let column = UnicodeWidthStr::width(prompt) + UnicodeWidthStr::width(&buffer.text()[..buffer.cursor()]);
	terminal.move_cursor(row, column as u16)?;
	terminal.flush()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use wf_keymap::{NamedProfile, ProfileBuilder};

	struct ScriptedTerminal {
		keys: RefCell<std::collections::VecDeque<KeyEvent>>,
		written: RefCell<String>,
	}

	impl ScriptedTerminal {
		fn new(keys: Vec<KeyEvent>) -> Self {
			Self {
				keys: RefCell::new(keys.into_iter().collect()),
				written: RefCell::new(String::new()),
			}
		}
	}

	impl Terminal for ScriptedTerminal {
		fn width(&self) -> u16 {
			80
		}
		fn height(&self) -> u16 {
			24
		}
		fn supports_color(&self) -> bool {
			false
		}
		fn supports_hyperlinks(&self) -> bool {
			false
		}
		fn read_key(&mut self, _should_cancel: &dyn Fn() -> bool) -> Result<KeyEvent, TermError> {
			self.keys.borrow_mut().pop_front().ok_or(TermError::Cancelled)
		}
		fn write(&mut self, text: &str) -> Result<(), TermError> {
			self.written.borrow_mut().push_str(text);
			Ok(())
		}
		fn move_cursor(&mut self, _row: u16, _col: u16) -> Result<(), TermError> {
			Ok(())
		}
		fn clear_line(&mut self) -> Result<(), TermError> {
			Ok(())
		}
		fn clear_screen(&mut self) -> Result<(), TermError> {
			Ok(())
		}
		fn set_color(&mut self, _fg: Option<wf_term::Color>, _bg: Option<wf_term::Color>) -> Result<(), TermError> {
			Ok(())
		}
		fn reset_style(&mut self) -> Result<(), TermError> {
			Ok(())
		}
		fn flush(&mut self) -> Result<(), TermError> {
			Ok(())
		}
	}

	fn char_key(c: char) -> KeyEvent {
		KeyEvent::new(KeyCode::Char(c))
	}

	fn enter_key() -> KeyEvent {
		KeyEvent::new(KeyCode::Enter)
	}

	#[test]
	fn types_a_line_and_accepts_it() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		let history = History::new(10);
		let mut terminal = ScriptedTerminal::new(vec![char_key('h'), char_key('i'), enter_key()]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Accepted("hi".to_string()));
	}

	#[test]
	fn backspace_removes_the_last_character() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		let history = History::new(10);
		let mut terminal = ScriptedTerminal::new(vec![char_key('h'), char_key('i'), KeyEvent::new(KeyCode::Backspace), enter_key()]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Accepted("h".to_string()));
	}

	#[test]
	fn ctrl_c_on_empty_buffer_cancels() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		let history = History::new(10);
		let mut interrupt = KeyEvent::new(KeyCode::Char('c'));
		interrupt.modifiers.ctrl = true;
		let mut terminal = ScriptedTerminal::new(vec![interrupt]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Cancelled);
	}

	#[test]
	fn ctrl_c_on_nonempty_buffer_clears_it_instead_of_cancelling() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		let history = History::new(10);
		let mut interrupt = KeyEvent::new(KeyCode::Char('c'));
		interrupt.modifiers.ctrl = true;
		let mut terminal = ScriptedTerminal::new(vec![char_key('h'), interrupt, enter_key()]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Accepted(String::new()));
	}

	#[test]
	fn ctrl_d_on_empty_buffer_exits() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		let history = History::new(10);
		let mut eof = KeyEvent::new(KeyCode::Char('d'));
		eof.modifiers.ctrl = true;
		let mut terminal = ScriptedTerminal::new(vec![eof]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Exit);
	}

	#[test]
	fn previous_history_recalls_the_last_entry() {
		let profile = ProfileBuilder::new(NamedProfile::Default).build().unwrap();
		let mut history = History::new(10);
		history.push("first command");
		let mut terminal = ScriptedTerminal::new(vec![KeyEvent::new(KeyCode::Up), enter_key()]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Accepted("first command".to_string()));
	}

	#[test]
	fn emacs_kill_line_then_yank_restores_the_text() {
		let profile = ProfileBuilder::new(NamedProfile::Emacs).build().unwrap();
		let history = History::new(10);
		let mut home = KeyEvent::new(KeyCode::Char('a'));
		home.modifiers.ctrl = true;
		let mut kill = KeyEvent::new(KeyCode::Char('k'));
		kill.modifiers.ctrl = true;
		let mut yank = KeyEvent::new(KeyCode::Char('y'));
		yank.modifiers.ctrl = true;
		let mut terminal = ScriptedTerminal::new(vec![char_key('h'), char_key('i'), home, kill, yank, enter_key()]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Accepted("hi".to_string()));
	}

	#[test]
	fn undo_restores_text_after_a_kill() {
		let profile = ProfileBuilder::new(NamedProfile::Emacs).build().unwrap();
		let history = History::new(10);
		let mut home = KeyEvent::new(KeyCode::Char('a'));
		home.modifiers.ctrl = true;
		let mut kill = KeyEvent::new(KeyCode::Char('k'));
		kill.modifiers.ctrl = true;
		let mut undo = KeyEvent::new(KeyCode::Char('_'));
		undo.modifiers.ctrl = true;
		let mut terminal = ScriptedTerminal::new(vec![char_key('h'), char_key('i'), home, kill, undo, enter_key()]);
		let mut editor = Editor::new();

		let result = editor.read_line(&mut terminal, &profile, &history, None, &|| false, "> ", 0).unwrap();
		assert_eq!(result, EditorEvent::Accepted("hi".to_string()));
	}
}
