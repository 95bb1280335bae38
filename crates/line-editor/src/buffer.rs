//! The editable text buffer: content, cursor, selection, and insert/overwrite
//! mode. All positions are byte offsets that fall on grapheme-cluster
//! boundaries.

use unicode_segmentation::UnicodeSegmentation;

/// An immutable snapshot of buffer state, used by the undo stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	pub text: String,
	pub cursor: usize,
}

/// The line editor's text buffer.
#[derive(Debug, Clone, Default)]
pub struct EditorBuffer {
	text: String,
	cursor: usize,
	selection_anchor: Option<usize>,
	insert_mode: bool,
}

impl EditorBuffer {
	/// Creates an empty buffer in insert mode.
	pub fn new() -> Self {
		Self {
			text: String::new(),
			cursor: 0,
			selection_anchor: None,
			insert_mode: true,
		}
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	pub fn is_overwrite(&self) -> bool {
		!self.insert_mode
	}

	pub fn toggle_insert_mode(&mut self) {
		self.insert_mode = !self.insert_mode;
	}

	pub fn selection_anchor(&self) -> Option<usize> {
		self.selection_anchor
	}

	pub fn set_selection_anchor(&mut self, anchor: Option<usize>) {
		self.selection_anchor = anchor;
	}

	/// Clears the selection, if any.
	pub fn clear_selection(&mut self) {
		self.selection_anchor = None;
	}

	/// The selected byte range, ordered `(start, end)`, if a selection is
	/// active.
	pub fn selection_range(&self) -> Option<(usize, usize)> {
		self.selection_anchor.map(|anchor| if anchor <= self.cursor { (anchor, self.cursor) } else { (self.cursor, anchor) })
	}

	/// Replaces the entire buffer, moving the cursor to `cursor` (clamped to
	/// a valid boundary) and clearing the selection.
	pub fn set_text(&mut self, text: impl Into<String>, cursor: usize) {
		self.text = text.into();
		self.cursor = cursor.min(self.text.len());
		self.selection_anchor = None;
	}

	pub fn snapshot(&self) -> Snapshot {
		Snapshot {
			text: self.text.clone(),
			cursor: self.cursor,
		}
	}

	pub fn restore(&mut self, snapshot: Snapshot) {
		self.text = snapshot.text;
		self.cursor = snapshot.cursor.min(self.text.len());
		self.selection_anchor = None;
	}

	/// The byte offset of the next grapheme boundary after `pos`, or the
	/// end of the text.
	pub fn next_boundary(&self, pos: usize) -> usize {
		self.text[pos..].grapheme_indices(true).nth(1).map(|(offset, _)| pos + offset).unwrap_or(self.text.len())
	}

	/// The byte offset of the previous grapheme boundary before `pos`, or 0.
	pub fn prev_boundary(&self, pos: usize) -> usize {
		self.text[..pos].grapheme_indices(true).next_back().map(|(offset, _)| offset).unwrap_or(0)
	}

	pub fn move_to(&mut self, pos: usize) {
		self.cursor = pos.min(self.text.len());
	}

	pub fn move_left(&mut self) {
		self.cursor = self.prev_boundary(self.cursor);
	}

	pub fn move_right(&mut self) {
		self.cursor = self.next_boundary(self.cursor);
	}

	pub fn move_home(&mut self) {
		self.cursor = 0;
	}

	pub fn move_end(&mut self) {
		self.cursor = self.text.len();
	}

	/// Inserts `s` at the cursor. In overwrite mode, first removes the
	/// grapheme cluster (if any) currently under the cursor.
	pub fn insert_str(&mut self, s: &str) {
		if !self.insert_mode {
			let end = self.next_boundary(self.cursor);
			self.text.replace_range(self.cursor..end, "");
		}
		self.text.insert_str(self.cursor, s);
		self.cursor += s.len();
		self.selection_anchor = None;
	}

	/// Removes and returns the text in `start..end`, moving the cursor to
	/// `start`.
	pub fn delete_range(&mut self, start: usize, end: usize) -> String {
		let removed = self.text[start..end].to_string();
		self.text.replace_range(start..end, "");
		self.cursor = start;
		self.selection_anchor = None;
		removed
	}

	/// Deletes the grapheme cluster after the cursor, if any.
	pub fn delete_char_forward(&mut self) -> Option<String> {
		if self.cursor >= self.text.len() {
			return None;
		}
		let end = self.next_boundary(self.cursor);
		Some(self.delete_range(self.cursor, end))
	}

	/// Deletes the grapheme cluster before the cursor, if any.
	pub fn delete_char_backward(&mut self) -> Option<String> {
		if self.cursor == 0 {
			return None;
		}
		let start = self.prev_boundary(self.cursor);
		Some(self.delete_range(start, self.cursor))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_advances_cursor_by_byte_length() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("hi");
		assert_eq!(buf.text(), "hi");
		assert_eq!(buf.cursor(), 2);
	}

	#[test]
	fn overwrite_mode_replaces_the_next_grapheme() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("abc");
		buf.move_to(0);
		buf.toggle_insert_mode();
		assert!(buf.is_overwrite());
		buf.insert_str("X");
		assert_eq!(buf.text(), "Xbc");
	}

	#[test]
	fn delete_char_backward_removes_preceding_grapheme() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("abc");
		let removed = buf.delete_char_backward().unwrap();
		assert_eq!(removed, "c");
		assert_eq!(buf.text(), "ab");
		assert_eq!(buf.cursor(), 2);
	}

	#[test]
	fn delete_char_backward_at_start_is_a_no_op() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("abc");
		buf.move_home();
		assert_eq!(buf.delete_char_backward(), None);
	}

	#[test]
	fn grapheme_boundaries_treat_multibyte_clusters_as_one_unit() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("a\u{00e9}b"); // 'a', 'é' (2 bytes), 'b'
		buf.move_home();
		buf.move_right();
		let after_first = buf.cursor();
		buf.move_right();
		assert_eq!(buf.cursor(), after_first + 2);
	}

	#[test]
	fn selection_range_orders_anchor_and_cursor() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("abcdef");
		buf.set_selection_anchor(Some(2));
		buf.move_to(5);
		assert_eq!(buf.selection_range(), Some((2, 5)));
		buf.move_to(0);
		assert_eq!(buf.selection_range(), Some((0, 2)));
	}

	#[test]
	fn snapshot_round_trips_text_and_cursor() {
		let mut buf = EditorBuffer::new();
		buf.insert_str("hello");
		buf.move_to(2);
		let snap = buf.snapshot();
		buf.insert_str("XX");
		buf.restore(snap);
		assert_eq!(buf.text(), "hello");
		assert_eq!(buf.cursor(), 2);
	}
}
