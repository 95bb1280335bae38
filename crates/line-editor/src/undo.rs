//! Snapshot-based undo/redo.
//!
//! Stores whole-buffer snapshots rather than edit deltas: input lines are
//! short enough that the simpler model costs nothing observable, unlike a
//! full document editor where deltas matter for memory.

use crate::buffer::Snapshot;

/// Maximum undo history size in steps.
pub const MAX_UNDO: usize = 200;

/// Grouped snapshot-based undo store.
#[derive(Debug, Default)]
pub struct UndoStack {
	undo_stack: Vec<Snapshot>,
	redo_stack: Vec<Snapshot>,
	group_open: bool,
}

impl UndoStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	/// Clears the redo stack. Must be called whenever a non-undo/redo edit
	/// is made.
	pub fn clear_redo(&mut self) {
		self.redo_stack.clear();
	}

	/// Records `before` as the state to restore on undo.
	///
	/// If `merge` is true and a group is already open, this edit joins the
	/// open group instead of pushing a new undo entry — consecutive
	/// printable insertions collapse into a single undo step. Any other
	/// call closes the previous group and opens a new one.
	pub fn record(&mut self, before: Snapshot, merge: bool) {
		if merge && self.group_open {
			self.clear_redo();
			return;
		}
		self.undo_stack.push(before);
		if self.undo_stack.len() > MAX_UNDO {
			self.undo_stack.remove(0);
		}
		self.group_open = merge;
		self.clear_redo();
	}

	/// Ends the currently open merge group, if any, so the next `record`
	/// call (even with `merge: true`) starts a fresh undo step.
	pub fn break_group(&mut self) {
		self.group_open = false;
	}

	/// Pops the most recent undo entry, pushing `current` onto the redo
	/// stack, and returns the state to restore.
	pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let previous = self.undo_stack.pop()?;
		self.redo_stack.push(current);
		self.group_open = false;
		Some(previous)
	}

	/// Pops the most recent redo entry, pushing `current` onto the undo
	/// stack, and returns the state to restore.
	pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let next = self.redo_stack.pop()?;
		self.undo_stack.push(current);
		Some(next)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn snap(text: &str, cursor: usize) -> Snapshot {
		Snapshot { text: text.to_string(), cursor }
	}

	#[test]
	fn undo_restores_the_previous_snapshot() {
		let mut stack = UndoStack::new();
		stack.record(snap("", 0), false);
		let restored = stack.undo(snap("a", 1)).unwrap();
		assert_eq!(restored, snap("", 0));
	}

	#[test]
	fn redo_restores_what_undo_replaced() {
		let mut stack = UndoStack::new();
		stack.record(snap("", 0), false);
		stack.undo(snap("a", 1)).unwrap();
		let redone = stack.redo(snap("", 0)).unwrap();
		assert_eq!(redone, snap("a", 1));
	}

	#[test]
	fn merged_edits_collapse_into_one_undo_step() {
		let mut stack = UndoStack::new();
		stack.record(snap("", 0), true);
		stack.record(snap("a", 1), true);
		stack.record(snap("ab", 2), true);
		// Only the first snapshot in the group is retained as the undo target.
		let restored = stack.undo(snap("abc", 3)).unwrap();
		assert_eq!(restored, snap("", 0));
		assert!(!stack.can_undo());
	}

	#[test]
	fn non_merging_edit_clears_redo() {
		let mut stack = UndoStack::new();
		stack.record(snap("", 0), false);
		stack.undo(snap("a", 1)).unwrap();
		assert!(stack.can_redo());
		stack.record(snap("a", 1), false);
		assert!(!stack.can_redo());
	}

	#[test]
	fn break_group_starts_a_fresh_undo_step() {
		let mut stack = UndoStack::new();
		stack.record(snap("", 0), true);
		stack.break_group();
		stack.record(snap("a", 1), true);
		assert!(stack.undo(snap("ab", 2)).is_some());
		assert!(stack.undo(snap("a", 1)).is_some());
		assert!(!stack.can_undo());
	}
}
