//! Word-boundary motions: a "word" is a maximal run of alphanumerics or
//! underscore.

fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

/// The byte offset of the start of the next word at or after `pos`.
/// If there's no further word, returns the end of `text`.
pub fn forward_word(text: &str, pos: usize) -> usize {
	let mut chars = text[pos..].char_indices();
	// Skip any word we're currently inside.
	let mut offset = pos;
	let mut in_word = text[pos..].chars().next().is_some_and(is_word_char);
	if in_word {
		for (i, c) in &mut chars {
			if !is_word_char(c) {
				offset = pos + i;
				in_word = false;
				break;
			}
		}
		if in_word {
			return text.len();
		}
	}
	// Skip non-word separators to the start of the next word.
	for (i, c) in text[offset..].char_indices() {
		if is_word_char(c) {
			return offset + i;
		}
	}
	text.len()
}

/// The byte offset of the start of the word before `pos`, skipping any
/// separators immediately to the left of `pos` first.
pub fn backward_word(text: &str, pos: usize) -> usize {
	let mut i = pos;
	while i > 0 {
		let c = text[..i].chars().next_back().unwrap();
		if is_word_char(c) {
			break;
		}
		i -= c.len_utf8();
	}
	while i > 0 {
		let c = text[..i].chars().next_back().unwrap();
		if !is_word_char(c) {
			break;
		}
		i -= c.len_utf8();
	}
	i
}

/// The byte offset one past the end of the word starting at or to the
/// right of `pos` (for `ForwardWordEnd` and the word-casing actions).
pub fn word_end(text: &str, pos: usize) -> usize {
	let start = {
		let mut i = pos;
		while i < text.len() {
			let c = text[i..].chars().next().unwrap();
			if is_word_char(c) {
				break;
			}
			i += c.len_utf8();
		}
		i
	};
	let mut end = start;
	for (i, c) in text[start..].char_indices() {
		if !is_word_char(c) {
			return start + i;
		}
		end = start + i + c.len_utf8();
	}
	end
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn forward_word_skips_to_the_next_word_start() {
		assert_eq!(forward_word("foo bar baz", 0), 4);
		assert_eq!(forward_word("foo bar baz", 4), 8);
	}

	#[test]
	fn forward_word_from_mid_word_skips_the_rest_of_it() {
		assert_eq!(forward_word("foo bar", 1), 4);
	}

	#[test]
	fn forward_word_at_last_word_reaches_the_end() {
		assert_eq!(forward_word("foo bar", 4), 7);
	}

	#[test]
	fn backward_word_from_mid_word_goes_to_its_start() {
		assert_eq!(backward_word("foo bar baz", 10), 8);
	}

	#[test]
	fn backward_word_skips_separators_first() {
		assert_eq!(backward_word("foo   bar", 6), 0);
	}

	#[test]
	fn word_end_finds_the_end_of_the_current_or_next_word() {
		assert_eq!(word_end("foo bar", 0), 3);
		assert_eq!(word_end("foo bar", 3), 7);
	}

	#[test]
	fn underscore_is_a_word_character() {
		assert_eq!(forward_word("snake_case next", 0), 11);
	}
}
