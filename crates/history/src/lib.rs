//! A capacity-bounded, deduplicated line history with optional persistence.
//!
//! Used by the line editor to back `PreviousHistory`/`NextHistory` and
//! incremental history search. [`History`] itself is not thread-safe; if a
//! caller persists on a background task it must snapshot the entries under
//! a mutex first (see [`History::snapshot`]).

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Default capacity when none is specified.
pub const DEFAULT_CAPACITY: usize = 1000;

/// An ordered, deduplicated, size-bounded sequence of accepted lines.
#[derive(Debug, Clone)]
pub struct History {
	entries: VecDeque<String>,
	capacity: usize,
}

impl Default for History {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}

impl History {
	/// Creates an empty history bounded to `capacity` entries.
	pub fn new(capacity: usize) -> Self {
		Self {
			entries: VecDeque::with_capacity(capacity.min(64)),
			capacity: capacity.max(1),
		}
	}

	/// Number of entries currently stored.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the history is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// The bound on the number of entries this history will retain.
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Appends `line` to the history.
	///
	/// If `line` is identical to the most recent entry, the existing entry
	/// is moved to the tail instead of inserting a duplicate. If the
	/// history is at capacity, the oldest entry is evicted first.
	pub fn push(&mut self, line: impl Into<String>) {
		let line = line.into();
		if line.is_empty() {
			return;
		}
		if self.entries.back().is_some_and(|last| last == &line) {
			return;
		}
		if self.entries.len() >= self.capacity {
			self.entries.pop_front();
		}
		self.entries.push_back(line);
	}

	/// Returns the entry at `index` (0 = oldest), if any.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.entries.get(index).map(String::as_str)
	}

	/// Iterates entries from oldest to newest.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}

	/// Clears all entries.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Takes an immutable snapshot suitable for persisting from another
	/// thread without holding a lock on `self`.
	pub fn snapshot(&self) -> Vec<String> {
		self.entries.iter().cloned().collect()
	}

	/// Writes entries one per line, in insertion order, to `path`.
	pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
		let mut file = io::BufWriter::new(std::fs::File::create(path)?);
		for entry in &self.entries {
			writeln!(file, "{entry}")?;
		}
		file.flush()
	}

	/// Loads entries one per line from `path`, replacing the current
	/// contents.
	///
	/// Tolerates a partially written or corrupt file: lines are validated
	/// as they're read, and loading stops at the first malformed line
	/// rather than failing outright. A line is malformed if it contains a
	/// NUL byte (never produced by [`History::save`], so its presence
	/// indicates truncation mid-write or foreign content).
	pub fn load(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
		let file = match std::fs::File::open(path) {
			Ok(file) => file,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
			Err(err) => return Err(err),
		};

		let mut loaded = VecDeque::new();
		for line in io::BufReader::new(file).lines() {
			let line = match line {
				Ok(line) => line,
				Err(_) => break,
			};
			if line.contains('\0') {
				tracing::warn!("history file truncated at malformed line; stopping load");
				break;
			}
			loaded.push_back(line);
		}

		while loaded.len() > self.capacity {
			loaded.pop_front();
		}
		self.entries = loaded;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn evicts_oldest_past_capacity() {
		let mut h = History::new(2);
		h.push("a");
		h.push("b");
		h.push("c");
		assert_eq!(h.iter().collect::<Vec<_>>(), vec!["b", "c"]);
	}

	#[test]
	fn coalesces_consecutive_duplicates() {
		let mut h = History::new(10);
		h.push("same");
		h.push("same");
		assert_eq!(h.len(), 1);
	}

	#[test]
	fn non_consecutive_duplicates_both_kept() {
		let mut h = History::new(10);
		h.push("a");
		h.push("b");
		h.push("a");
		assert_eq!(h.iter().collect::<Vec<_>>(), vec!["a", "b", "a"]);
	}

	#[test]
	fn empty_lines_are_not_recorded() {
		let mut h = History::new(10);
		h.push("");
		assert!(h.is_empty());
	}

	#[test]
	fn round_trips_through_a_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("history");

		let mut h = History::new(10);
		h.push("one");
		h.push("two");
		h.save(&path).unwrap();

		let mut loaded = History::new(10);
		loaded.load(&path).unwrap();
		assert_eq!(loaded.iter().collect::<Vec<_>>(), vec!["one", "two"]);
	}

	#[test]
	fn loading_missing_file_is_a_no_op() {
		let mut h = History::new(10);
		h.load("/nonexistent/path/to/history").unwrap();
		assert!(h.is_empty());
	}

	#[test]
	fn truncates_at_first_malformed_line() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("history");
		std::fs::write(&path, "good one\ngood two\nbad\0line\nafter bad\n").unwrap();

		let mut h = History::new(10);
		h.load(&path).unwrap();
		assert_eq!(h.iter().collect::<Vec<_>>(), vec!["good one", "good two"]);
	}

	#[test]
	fn load_respects_capacity() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("history");
		std::fs::write(&path, "a\nb\nc\nd\n").unwrap();

		let mut h = History::new(2);
		h.load(&path).unwrap();
		assert_eq!(h.iter().collect::<Vec<_>>(), vec!["c", "d"]);
	}
}
