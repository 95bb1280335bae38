//! Incremental (reverse/forward) history search.

use wf_history::History;

/// Direction an incremental search walks through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
	Backward,
	Forward,
}

/// State while in `Search` mode.
#[derive(Debug, Clone)]
pub struct SearchState {
	pub direction: SearchDirection,
	pub pattern: String,
	/// Index into history of the current candidate, if any has matched yet.
	pub candidate: Option<usize>,
	/// The buffer text to restore if the search is cancelled.
	pub pre_search_text: String,
	pub pre_search_cursor: usize,
}

impl SearchState {
	pub fn new(direction: SearchDirection, pre_search_text: String, pre_search_cursor: usize) -> Self {
		Self {
			direction,
			pattern: String::new(),
			candidate: None,
			pre_search_text,
			pre_search_cursor,
		}
	}

	/// The prompt prefix shown while this search is active.
	pub fn prompt_label(&self) -> &'static str {
		match self.direction {
			SearchDirection::Backward => "(reverse-i-search)",
			SearchDirection::Forward => "(forward-i-search)",
		}
	}
}

/// Searches `history` for `pattern` (case-insensitive substring), starting
/// just past `from` and walking in `direction`, wrapping within bounds.
///
/// Returns the matching entry's index and text, if any.
pub fn search(history: &History, pattern: &str, from: Option<usize>, direction: SearchDirection) -> Option<(usize, String)> {
	if pattern.is_empty() {
		return None;
	}
	let needle = pattern.to_lowercase();
	let len = history.len();
	if len == 0 {
		return None;
	}

	let indices: Box<dyn Iterator<Item = usize>> = match direction {
		SearchDirection::Backward => {
			let start = from.unwrap_or(len);
			Box::new((0..start).rev())
		}
		SearchDirection::Forward => {
			let start = from.map(|i| i + 1).unwrap_or(0);
			Box::new(start..len)
		}
	};

	for idx in indices {
		if let Some(entry) = history.get(idx) {
			if entry.to_lowercase().contains(&needle) {
				return Some((idx, entry.to_string()));
			}
		}
	}
	None
}
