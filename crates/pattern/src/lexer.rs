//! Tokenizes a pattern string.
//!
//! Whitespace separates top-level segments and is simply skipped; whitespace
//! that appears between an `{` and its matching `}` is a syntax error.

use crate::error::PatternError;
use crate::token::{Token, TokenKind};

const WORD_BOUNDARY: &[char] = &['{', '}', ',', '|', ':', '?'];

/// Tokenizes `pattern`, failing at the first lexical error.
pub fn lex(pattern: &str) -> Result<Vec<Token>, PatternError> {
	let chars: Vec<(usize, char)> = pattern.char_indices().collect();
	let mut tokens = Vec::new();
	let mut i = 0;
	let mut depth: u32 = 0;
	let mut after_dash = false;

	while i < chars.len() {
		let (offset, c) = chars[i];

		if c.is_whitespace() {
			if depth > 0 {
				return Err(PatternError::syntax(offset, "whitespace is not allowed inside { }"));
			}
			while i < chars.len() && chars[i].1.is_whitespace() {
				i += 1;
			}
			after_dash = false;
			continue;
		}

		match c {
			'{' => {
				tokens.push(Token { kind: TokenKind::LBrace, offset });
				depth += 1;
				i += 1;
				after_dash = false;
			}
			'}' => {
				if depth == 0 {
					return Err(PatternError::syntax(offset, "unbalanced '}'"));
				}
				tokens.push(Token { kind: TokenKind::RBrace, offset });
				depth -= 1;
				i += 1;
				after_dash = false;
			}
			'*' => {
				tokens.push(Token { kind: TokenKind::Star, offset });
				i += 1;
			}
			':' => {
				tokens.push(Token { kind: TokenKind::Colon, offset });
				i += 1;
			}
			'?' => {
				tokens.push(Token { kind: TokenKind::QMark, offset });
				i += 1;
			}
			',' => {
				tokens.push(Token { kind: TokenKind::Comma, offset });
				i += 1;
				after_dash = false;
			}
			'|' => {
				tokens.push(Token { kind: TokenKind::Pipe, offset });
				i += 1;
				let start = i;
				while i < chars.len() && !chars[i].1.is_whitespace() {
					i += 1;
				}
				if i > start {
					let text: String = chars[start..i].iter().map(|(_, c)| c).collect();
					tokens.push(Token {
						kind: TokenKind::Literal(text),
						offset: chars[start].0,
					});
				}
				after_dash = false;
			}
			'-' => {
				if i + 1 < chars.len() && chars[i + 1].1 == '-' {
					tokens.push(Token { kind: TokenKind::DoubleDash, offset });
					i += 2;
				} else {
					tokens.push(Token { kind: TokenKind::Dash, offset });
					i += 1;
				}
				after_dash = true;
			}
			_ => {
				let start = i;
				while i < chars.len() && !chars[i].1.is_whitespace() && !WORD_BOUNDARY.contains(&chars[i].1) {
					i += 1;
				}
				let text: String = chars[start..i].iter().map(|(_, c)| c).collect();
				let kind = if depth > 0 || after_dash {
					TokenKind::Ident(text)
				} else {
					TokenKind::Literal(text)
				};
				tokens.push(Token { kind, offset: chars[start].0 });
				after_dash = false;
			}
		}
	}

	if depth > 0 {
		return Err(PatternError::syntax(pattern.len(), "unclosed '{'"));
	}

	tokens.push(Token {
		kind: TokenKind::Eof,
		offset: pattern.len(),
	});
	Ok(tokens)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kinds(pattern: &str) -> Vec<TokenKind> {
		lex(pattern).unwrap().into_iter().map(|t| t.kind).collect()
	}

	#[test]
	fn lexes_a_bare_literal() {
		assert_eq!(kinds("add"), vec![TokenKind::Literal("add".into()), TokenKind::Eof]);
	}

	#[test]
	fn lexes_a_required_parameter() {
		assert_eq!(
			kinds("{x}"),
			vec![
				TokenKind::LBrace,
				TokenKind::Ident("x".into()),
				TokenKind::RBrace,
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn lexes_typed_optional_parameter() {
		assert_eq!(
			kinds("{x:int?}"),
			vec![
				TokenKind::LBrace,
				TokenKind::Ident("x".into()),
				TokenKind::Colon,
				TokenKind::Ident("int".into()),
				TokenKind::QMark,
				TokenKind::RBrace,
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn lexes_catch_all() {
		assert_eq!(
			kinds("{*files}"),
			vec![
				TokenKind::LBrace,
				TokenKind::Star,
				TokenKind::Ident("files".into()),
				TokenKind::RBrace,
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn lexes_long_and_short_option() {
		assert_eq!(
			kinds("--tag,-t"),
			vec![
				TokenKind::DoubleDash,
				TokenKind::Ident("tag".into()),
				TokenKind::Comma,
				TokenKind::Dash,
				TokenKind::Ident("t".into()),
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn lexes_option_with_dashes_in_long_form() {
		assert_eq!(
			kinds("--dry-run"),
			vec![TokenKind::DoubleDash, TokenKind::Ident("dry-run".into()), TokenKind::Eof]
		);
	}

	#[test]
	fn lexes_description_after_pipe() {
		assert_eq!(
			kinds("add|adds two numbers"),
			vec![
				TokenKind::Literal("add".into()),
				TokenKind::Pipe,
				TokenKind::Literal("adds".into()),
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn rejects_whitespace_inside_braces() {
		let err = lex("{x :int}").unwrap_err();
		assert!(matches!(err, PatternError::PatternSyntax { offset: 2, .. }));
	}

	#[test]
	fn rejects_unclosed_brace() {
		assert!(lex("{x").is_err());
	}

	#[test]
	fn rejects_unbalanced_closing_brace() {
		assert!(lex("x}").is_err());
	}

	#[test]
	fn repeated_marker_is_a_trailing_star() {
		assert_eq!(
			kinds("--tag,-t {v}*"),
			vec![
				TokenKind::DoubleDash,
				TokenKind::Ident("tag".into()),
				TokenKind::Comma,
				TokenKind::Dash,
				TokenKind::Ident("t".into()),
				TokenKind::LBrace,
				TokenKind::Ident("v".into()),
				TokenKind::RBrace,
				TokenKind::Star,
				TokenKind::Eof,
			]
		);
	}
}
