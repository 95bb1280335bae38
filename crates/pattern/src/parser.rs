//! Builds a segment list from a lexed token stream.
//!
//! ```text
//! Segment   := Literal | Parameter | Option
//! Literal   := LITERAL ['|' LITERAL]
//! Parameter := '{' ['*'] IDENT [':' IDENT] ['?'] '}' ['|' LITERAL]
//! Option    := OptName [',' ShortName] [Parameter ['*']] ['|' LITERAL]
//! OptName   := '--' IDENT
//! ShortName := '-' IDENT
//! ```

use crate::error::PatternError;
use crate::token::{Token, TokenKind};
use crate::types::{OptionSpec, SegmentSpec};

/// Parses a token stream (as produced by [`crate::lexer::lex`]) into an
/// ordered list of [`SegmentSpec`]s, enforcing the constraints from the
/// grammar above: at most one catch-all, last-positional placement, unique
/// parameter names, single-character short forms.
pub fn parse(tokens: &[Token]) -> Result<Vec<SegmentSpec>, PatternError> {
	let mut parser = Parser { tokens, pos: 0 };
	let mut segments = Vec::new();
	let mut seen_catch_all = false;
	let mut seen_names = std::collections::HashSet::new();
	let mut seen_long_forms = std::collections::HashSet::new();

	while !parser.is_eof() {
		let segment = parser.parse_segment()?;

		if let SegmentSpec::Parameter { name, catch_all, .. } = &segment {
			if seen_catch_all {
				return Err(PatternError::CatchAllMustBeLast { name: name.clone() });
			}
			if *catch_all {
				seen_catch_all = true;
			}
			if !seen_names.insert(name.clone()) {
				return Err(PatternError::DuplicateParameterName(name.clone()));
			}
		}

		if let SegmentSpec::Option(opt) = &segment {
			if !seen_long_forms.insert(opt.long_form.clone()) {
				return Err(PatternError::DuplicateOptionName(opt.long_form.clone()));
			}
			if let Some(name) = &opt.value_param {
				if !seen_names.insert(name.clone()) {
					return Err(PatternError::DuplicateParameterName(name.clone()));
				}
			}
		}

		segments.push(segment);
	}

	Ok(segments)
}

struct Parser<'a> {
	tokens: &'a [Token],
	pos: usize,
}

impl<'a> Parser<'a> {
	fn is_eof(&self) -> bool {
		matches!(self.peek().kind, TokenKind::Eof)
	}

	fn peek(&self) -> &Token {
		&self.tokens[self.pos]
	}

	fn next(&mut self) -> &Token {
		let tok = &self.tokens[self.pos];
		if self.pos + 1 < self.tokens.len() {
			self.pos += 1;
		}
		tok
	}

	fn expect_ident(&mut self, what: &str) -> Result<String, PatternError> {
		match self.next().kind.clone() {
			TokenKind::Ident(s) => Ok(s),
			other => Err(PatternError::syntax(
				self.tokens[self.pos.saturating_sub(1)].offset,
				format!("expected {what}, found {other:?}"),
			)),
		}
	}

	fn eat(&mut self, kind: &TokenKind) -> bool {
		if &self.peek().kind == kind {
			self.next();
			true
		} else {
			false
		}
	}

	fn parse_segment(&mut self) -> Result<SegmentSpec, PatternError> {
		match &self.peek().kind {
			TokenKind::LBrace => self.parse_parameter(),
			TokenKind::DoubleDash => self.parse_option(),
			TokenKind::Literal(_) => self.parse_literal(),
			other => Err(PatternError::syntax(self.peek().offset, format!("unexpected token {other:?}"))),
		}
	}

	fn parse_description(&mut self) -> Option<String> {
		if self.eat(&TokenKind::Pipe) {
			if let TokenKind::Literal(text) = self.peek().kind.clone() {
				self.next();
				return Some(text);
			}
			return Some(String::new());
		}
		None
	}

	fn parse_literal(&mut self) -> Result<SegmentSpec, PatternError> {
		let text = match self.next().kind.clone() {
			TokenKind::Literal(text) => text,
			_ => unreachable!("caller checked TokenKind::Literal"),
		};
		let description = self.parse_description();
		Ok(SegmentSpec::Literal { text, description })
	}

	fn parse_parameter(&mut self) -> Result<SegmentSpec, PatternError> {
		self.next(); // consume '{'
		let catch_all = self.eat(&TokenKind::Star);
		let name = self.expect_ident("a parameter name")?;

		let ty = if self.eat(&TokenKind::Colon) {
			Some(self.expect_ident("a type name")?)
		} else {
			None
		};

		let optional = self.eat(&TokenKind::QMark);

		if !self.eat(&TokenKind::RBrace) {
			return Err(PatternError::syntax(self.peek().offset, "expected '}'"));
		}

		if catch_all && optional {
			return Err(PatternError::CatchAllCannotBeOptional(name));
		}

		let description = self.parse_description();

		Ok(SegmentSpec::Parameter {
			name,
			ty,
			optional,
			catch_all,
			description,
		})
	}

	fn parse_option(&mut self) -> Result<SegmentSpec, PatternError> {
		self.next(); // consume '--'
		let long_form = self.expect_ident("a long option name")?;

		let mut short_form = None;
		if self.eat(&TokenKind::Comma) {
			let dash_offset = self.peek().offset;
			if !self.eat(&TokenKind::Dash) {
				return Err(PatternError::syntax(dash_offset, "expected '-' before a short option form"));
			}
			let short = self.expect_ident("a short option name")?;
			let mut chars = short.chars();
			let first = chars.next();
			if first.is_none() || chars.next().is_some() {
				return Err(PatternError::BadShortForm(short));
			}
			short_form = first;
		}

		let mut expects_value = false;
		let mut value_param = None;
		let mut value_type = None;
		let mut optional = true;
		let mut repeated = false;

		if matches!(self.peek().kind, TokenKind::LBrace) {
			expects_value = true;
			self.next(); // consume '{'
			let name = self.expect_ident("a value parameter name")?;
			let ty = if self.eat(&TokenKind::Colon) {
				Some(self.expect_ident("a value type name")?)
			} else {
				None
			};
			let value_optional = self.eat(&TokenKind::QMark);
			if !self.eat(&TokenKind::RBrace) {
				return Err(PatternError::syntax(self.peek().offset, "expected '}'"));
			}
			repeated = self.eat(&TokenKind::Star);

			value_param = Some(name);
			value_type = ty;
			optional = value_optional;
		}

		let description = self.parse_description();

		Ok(SegmentSpec::Option(OptionSpec {
			long_form,
			short_form,
			expects_value,
			value_param,
			value_type,
			optional,
			repeated,
			description,
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lexer::lex;

	fn parse_str(s: &str) -> Result<Vec<SegmentSpec>, PatternError> {
		parse(&lex(s)?)
	}

	#[test]
	fn parses_plain_literal() {
		let segs = parse_str("add").unwrap();
		assert_eq!(
			segs,
			vec![SegmentSpec::Literal {
				text: "add".into(),
				description: None,
			}]
		);
	}

	#[test]
	fn parses_required_and_optional_parameters() {
		let segs = parse_str("{x} {y?}").unwrap();
		assert_eq!(segs.len(), 2);
		assert!(matches!(&segs[0], SegmentSpec::Parameter { optional: false, .. }));
		assert!(matches!(&segs[1], SegmentSpec::Parameter { optional: true, .. }));
	}

	#[test]
	fn parses_catch_all() {
		let segs = parse_str("grep {pattern} {*files}").unwrap();
		match &segs[1] {
			SegmentSpec::Parameter { catch_all, name, .. } => {
				assert!(catch_all);
				assert_eq!(name, "files");
			}
			other => panic!("expected catch-all parameter, got {other:?}"),
		}
	}

	#[test]
	fn rejects_catch_all_not_last() {
		let err = parse_str("cp {*files} {dest}").unwrap_err();
		assert!(matches!(err, PatternError::CatchAllMustBeLast { .. }));
	}

	#[test]
	fn rejects_optional_catch_all() {
		let err = parse_str("{*files?}").unwrap_err();
		assert!(matches!(err, PatternError::CatchAllCannotBeOptional(_)));
	}

	#[test]
	fn rejects_duplicate_parameter_names() {
		let err = parse_str("mv {x} {x}").unwrap_err();
		assert!(matches!(err, PatternError::DuplicateParameterName(n) if n == "x"));
	}

	#[test]
	fn parses_flag_option() {
		let segs = parse_str("--verbose,-v").unwrap();
		match &segs[0] {
			SegmentSpec::Option(opt) => {
				assert_eq!(opt.long_form, "verbose");
				assert_eq!(opt.short_form, Some('v'));
				assert!(!opt.expects_value);
				assert!(opt.optional);
			}
			other => panic!("expected option, got {other:?}"),
		}
	}

	#[test]
	fn parses_valued_option_required_by_default() {
		let segs = parse_str("--count,-c {n:int}").unwrap();
		match &segs[0] {
			SegmentSpec::Option(opt) => {
				assert!(opt.expects_value);
				assert_eq!(opt.value_param.as_deref(), Some("n"));
				assert_eq!(opt.value_type.as_deref(), Some("int"));
				assert!(!opt.optional);
			}
			other => panic!("expected option, got {other:?}"),
		}
	}

	#[test]
	fn parses_optional_valued_option() {
		let segs = parse_str("--count,-c {n:int?}").unwrap();
		match &segs[0] {
			SegmentSpec::Option(opt) => assert!(opt.optional),
			other => panic!("expected option, got {other:?}"),
		}
	}

	#[test]
	fn parses_repeated_option() {
		let segs = parse_str("--tag,-t {v}*").unwrap();
		match &segs[0] {
			SegmentSpec::Option(opt) => assert!(opt.repeated),
			other => panic!("expected option, got {other:?}"),
		}
	}

	#[test]
	fn rejects_bad_short_form() {
		let err = parse_str("--verbose,-vv").unwrap_err();
		assert!(matches!(err, PatternError::BadShortForm(_)));
	}

	#[test]
	fn parses_description_on_literal_and_parameter() {
		let segs = parse_str("add|adds").unwrap();
		assert_eq!(segs[0].description(), Some("adds"));

		let segs = parse_str("{x|the x value}").unwrap();
		assert_eq!(segs[0].description(), Some("the"));
	}

	#[test]
	fn rejects_duplicate_option_long_forms() {
		let err = parse_str("--verbose --verbose").unwrap_err();
		assert!(matches!(err, PatternError::DuplicateOptionName(n) if n == "verbose"));
	}
}
