//! Recursive-descent parser for key-chord strings.
//!
//! Supports chords such as `"Ctrl+Alt+F1"` or `"g g"` (a whitespace
//! separated sequence) and character-group patterns like `"@digit"`.

use std::str::FromStr;

use crate::node::{CharGroup, KEY_SEP, Key, Modifier, Node};


/// Function pointer type for parser combinators.
type ParserFn<T> = fn(&mut Parser) -> Result<Option<T>, ParseError>;

/// An error raised while parsing a key-chord string.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

impl std::fmt::Display for ParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "parse error at position {}: {}", self.position, self.message)
	}
}

impl std::error::Error for ParseError {}

/// Maintains the parser's state for recursive descent parsing.
struct Parser<'a> {
	input: &'a str,
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	fn peek_at(&self, n: usize) -> Option<char> {
		self.input.chars().nth(n)
	}

	fn next(&mut self) -> Option<char> {
		if let Some(ch) = self.peek() {
			self.position += ch.len_utf8();
			self.input = &self.input[ch.len_utf8()..];
			Some(ch)
		} else {
			None
		}
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	fn take(&mut self, expected: char) -> Result<(), ParseError> {
		match self.next() {
			Some(ch) if ch == expected => Ok(()),
			Some(ch) => Err(ParseError {
				message: format!("expected '{expected}', found '{ch}'"),
				position: self.position - ch.len_utf8(),
			}),
			None => Err(ParseError {
				message: format!("expected '{expected}', found end of input"),
				position: self.position,
			}),
		}
	}

	/// Attempts to parse with a fallback: restores state if parsing fails.
	fn try_parse<T, F>(&mut self, f: F) -> Result<Option<T>, ParseError>
	where
		F: FnOnce(&mut Parser<'a>) -> Result<Option<T>, ParseError>,
	{
		let snapshot = (self.input, self.position);
		match f(self) {
			Ok(Some(val)) => Ok(Some(val)),
			Ok(None) | Err(_) => {
				self.input = snapshot.0;
				self.position = snapshot.1;
				Ok(None)
			}
		}
	}

	fn take_while<F>(&mut self, predicate: F) -> String
	where
		F: Fn(char) -> bool,
	{
		let mut result = String::new();
		while let Some(ch) = self.peek() {
			if predicate(ch) {
				result.push(ch);
				self.next();
			} else {
				break;
			}
		}
		result
	}

	fn alt<T>(&mut self, parsers: &[ParserFn<T>]) -> Result<Option<T>, ParseError> {
		for p in parsers {
			if let Some(value) = p(self)? {
				return Ok(Some(value));
			}
		}
		Ok(None)
	}

	fn error(&self, message: String) -> ParseError {
		ParseError {
			message,
			position: self.position,
		}
	}
}

/// Parses a single key-chord expression into a [`Node`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the input does not match the expected
/// grammar, or if trailing input remains after a valid chord.
pub fn parse(s: &str) -> Result<Node, ParseError> {
	let mut parser = Parser::new(s);
	let node = parse_node(&mut parser)?;

	if !parser.is_end() {
		return Err(parser.error(format!("expected end of input, found: {}", parser.peek().unwrap())));
	}

	Ok(node)
}

/// Grammar: `node = modifiers* key`.
fn parse_node(parser: &mut Parser) -> Result<Node, ParseError> {
	let mut modifiers: u8 = 0;

	for _ in 0..3 {
		if let Some(modifier) = try_parse_modifier(parser)? {
			modifiers |= modifier as u8;
		} else {
			break;
		}
	}

	let key = parse_key(parser)?;
	Ok(Node::new(modifiers, key))
}

/// Attempts to parse a single modifier name, followed by [`KEY_SEP`].
fn try_parse_modifier(parser: &mut Parser) -> Result<Option<Modifier>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		let Ok(modifier) = name.parse::<Modifier>() else {
			return Ok(None);
		};
		p.take(KEY_SEP)?;
		Ok(Some(modifier))
	})
}

/// Parses a key value: function key, named key, character group, or char.
fn parse_key(parser: &mut Parser) -> Result<Key, ParseError> {
	match parser.alt(&[try_parse_fn_key, try_parse_named_key, try_parse_group, try_parse_char])? {
		Some(key) => Ok(key),
		None => Err(parser.error("expected a valid key".to_string())),
	}
}

/// Attempts to parse a function key (`"F1"` through `"F35"`).
///
/// Only activates when the input starts with `f`/`F` followed by a digit.
/// Once activated the digits must form a valid function key number or an
/// error is raised (no silent fallback to a char key).
fn try_parse_fn_key(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	if !matches!(parser.peek(), Some(ch) if ch.eq_ignore_ascii_case(&'f')) {
		return Ok(None);
	}
	if !matches!(parser.peek_at(1), Some(ch) if ch.is_ascii_digit()) {
		return Ok(None);
	}

	parser.next();
	let num = parser.take_while(|ch| ch.is_ascii_digit());

	match num.parse::<u8>() {
		Ok(n) if (1..=35).contains(&n) => Ok(Some(Key::F(n))),
		_ => Err(parser.error("invalid function key number (must be 1-35)".to_string())),
	}
}

/// Attempts to parse a named key such as `"Enter"`, `"Escape"`, `"Home"`.
fn try_parse_named_key(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	parser.try_parse(|p| {
		let name = p.take_while(|ch| ch.is_ascii_alphabetic());
		if name.len() < 2 {
			return Ok(None);
		}
		match name.parse::<Key>() {
			Ok(key) => Ok(Some(key)),
			Err(_) => Ok(None),
		}
	})
}

/// Attempts to parse a character group like `"@digit"` or `"@any"`.
fn try_parse_group(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	if parser.peek() != Some('@') || parser.peek_at(1).is_none() {
		return Ok(None);
	}

	parser.take('@')?;
	let group_name = parser.take_while(|ch| ch.is_ascii_alphabetic());
	match group_name.parse::<CharGroup>() {
		Ok(group) => Ok(Some(Key::Group(group))),
		Err(_) => Err(parser.error(format!("unknown char group: '@{group_name}'"))),
	}
}

/// Attempts to parse a single character as a key.
fn try_parse_char(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	match parser.peek() {
		Some(ch) => {
			parser.next();
			Ok(Some(Key::Char(ch)))
		}
		None => Ok(None),
	}
}

/// Parses a whitespace-separated sequence of key-chords (e.g. `"g g"`).
///
/// # Errors
///
/// Returns a [`ParseError`] if any segment fails to parse.
pub fn parse_seq(s: &str) -> Result<Vec<Node>, ParseError> {
	s.split_whitespace().map(parse).collect()
}

impl FromStr for Node {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
