//! POSIX-ish shell tokenization for lines accepted by the line editor.
//!
//! Whitespace separates tokens; a single-quoted span is taken literally
//! (no escapes recognized inside it); a double-quoted span allows `\"` and
//! `\\` escapes; a backslash outside any quote escapes the following
//! character. A trailing, unescaped backslash at the very end of the line
//! is left untouched here — joining it with a following line is the REPL
//! loop's call, since it depends on whether multiline input is enabled.

use thiserror::Error;

/// Why a line failed to tokenize into argv.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
	#[error("unterminated {0} quote starting at byte {1}")]
	UnterminatedQuote(char, usize),
}

/// Whether `line`, as accepted, ends in an odd number of trailing
/// backslashes (outside of quotes) — the multiline continuation signal.
pub fn wants_continuation(line: &str) -> bool {
	let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
	trailing % 2 == 1
}

/// Strips exactly one trailing backslash used as a continuation marker.
pub fn strip_continuation(line: &str) -> &str {
	line.strip_suffix('\\').unwrap_or(line)
}

/// Splits `line` into argv tokens.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
	let mut tokens = Vec::new();
	let mut current = String::new();
	let mut in_token = false;
	let mut chars = line.char_indices().peekable();

	while let Some((offset, c)) = chars.next() {
		match c {
			c if c.is_whitespace() => {
				if in_token {
					tokens.push(std::mem::take(&mut current));
					in_token = false;
				}
			}
			'\'' => {
				in_token = true;
				loop {
					match chars.next() {
						Some((_, '\'')) => break,
						Some((_, c)) => current.push(c),
						None => return Err(TokenizeError::UnterminatedQuote('\'', offset)),
					}
				}
			}
			'"' => {
				in_token = true;
				loop {
					match chars.next() {
						Some((_, '"')) => break,
						Some((_, '\\')) => match chars.next() {
							Some((_, c @ ('"' | '\\'))) => current.push(c),
							Some((_, c)) => {
								current.push('\\');
								current.push(c);
							}
							None => return Err(TokenizeError::UnterminatedQuote('"', offset)),
						},
						Some((_, c)) => current.push(c),
						None => return Err(TokenizeError::UnterminatedQuote('"', offset)),
					}
				}
			}
			'\\' => {
				in_token = true;
				match chars.peek() {
					Some(&(_, next)) => {
						current.push(next);
						chars.next();
					}
					None => current.push('\\'),
				}
			}
			c => {
				in_token = true;
				current.push(c);
			}
		}
	}

	if in_token {
		tokens.push(current);
	}

	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn argv(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn splits_on_whitespace() {
		assert_eq!(tokenize("deploy prod --force").unwrap(), argv(&["deploy", "prod", "--force"]));
	}

	#[test]
	fn single_quotes_are_literal() {
		assert_eq!(tokenize(r#"echo 'a b\nc'"#).unwrap(), argv(&["echo", r"a b\nc"]));
	}

	#[test]
	fn double_quotes_allow_escapes() {
		assert_eq!(tokenize(r#"echo "a \"b\" c""#).unwrap(), argv(&["echo", "a \"b\" c"]));
	}

	#[test]
	fn backslash_outside_quotes_escapes_next_char() {
		assert_eq!(tokenize(r"echo a\ b").unwrap(), argv(&["echo", "a b"]));
	}

	#[test]
	fn unterminated_single_quote_is_an_error() {
		assert!(matches!(tokenize("echo 'unterminated").unwrap_err(), TokenizeError::UnterminatedQuote('\'', _)));
	}

	#[test]
	fn unterminated_double_quote_is_an_error() {
		assert!(matches!(tokenize("echo \"unterminated").unwrap_err(), TokenizeError::UnterminatedQuote('"', _)));
	}

	#[test]
	fn empty_line_has_no_tokens() {
		assert_eq!(tokenize("   ").unwrap(), Vec::<String>::new());
	}

	#[test]
	fn trailing_backslash_signals_continuation() {
		assert!(wants_continuation(r"echo a\"));
		assert!(!wants_continuation(r"echo a\\"));
		assert_eq!(strip_continuation(r"echo a\"), "echo a");
	}

	#[test]
	fn adjacent_quoted_spans_join_into_one_token() {
		assert_eq!(tokenize(r#"'foo'"bar""#).unwrap(), argv(&["foobar"]));
	}
}
