//! Produces an immutable [`CompiledRoute`] from a parsed segment list.

use crate::error::PatternError;
use crate::types::SegmentSpec;

/// Contribution to specificity for each segment kind, from the spec's table.
mod score {
	pub const LITERAL: i64 = 100;
	pub const REQUIRED_OPTION: i64 = 50;
	pub const OPTIONAL_OPTION: i64 = 25;
	pub const TYPED_PARAMETER: i64 = 20;
	pub const UNTYPED_PARAMETER: i64 = 10;
	pub const OPTIONAL_PARAMETER: i64 = 5;
	pub const CATCH_ALL: i64 = 1;
}

/// An immutable, fully-resolved route compiled from a pattern string.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRoute {
	/// Segments in declaration order, with option long forms normalized to
	/// lowercase.
	pub segments: Vec<SegmentSpec>,
	/// Deterministic specificity score, used to order routes during match.
	pub specificity: i64,
	/// Name of the catch-all parameter, if the pattern declared one.
	pub catch_all_name: Option<String>,
	/// The original, unmodified pattern string (for diagnostics and help).
	pub original_pattern: String,
}

/// Lexes, parses, and compiles `pattern` into a [`CompiledRoute`].
pub fn compile(pattern: &str) -> Result<CompiledRoute, PatternError> {
	let tokens = crate::lexer::lex(pattern)?;
	let segments = crate::parser::parse(&tokens)?;
	compile_segments(pattern, segments)
}

/// Compiles an already-parsed segment list, normalizing option forms and
/// computing specificity.
pub fn compile_segments(original_pattern: &str, mut segments: Vec<SegmentSpec>) -> Result<CompiledRoute, PatternError> {
	let mut specificity = 0i64;
	let mut catch_all_name = None;

	for segment in &mut segments {
		match segment {
			SegmentSpec::Literal { .. } => specificity += score::LITERAL,
			SegmentSpec::Parameter {
				name,
				ty,
				optional,
				catch_all,
				..
			} => {
				if *catch_all {
					specificity += score::CATCH_ALL;
					catch_all_name = Some(name.clone());
				} else if *optional {
					specificity += score::OPTIONAL_PARAMETER;
				} else if ty.is_some() {
					specificity += score::TYPED_PARAMETER;
				} else {
					specificity += score::UNTYPED_PARAMETER;
				}
			}
			SegmentSpec::Option(opt) => {
				opt.long_form = opt.long_form.to_ascii_lowercase();
				specificity += if opt.optional { score::OPTIONAL_OPTION } else { score::REQUIRED_OPTION };
			}
		}
	}

	Ok(CompiledRoute {
		segments,
		specificity,
		catch_all_name,
		original_pattern: original_pattern.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn literal_only_route_scores_100_per_segment() {
		let route = compile("status report").unwrap();
		assert_eq!(route.specificity, 200);
	}

	#[test]
	fn literal_beats_typed_positional_in_specificity() {
		let literal_route = compile("deploy prod").unwrap();
		let param_route = compile("deploy {env}").unwrap();
		assert!(literal_route.specificity > param_route.specificity);
		assert_eq!(literal_route.specificity, 200);
		assert_eq!(param_route.specificity, 110);
	}

	#[test]
	fn catch_all_name_is_recorded() {
		let route = compile("grep {pattern} {*files}").unwrap();
		assert_eq!(route.catch_all_name.as_deref(), Some("files"));
	}

	#[test]
	fn option_long_form_is_lowercased() {
		let route = compile("--Verbose,-v").unwrap();
		match &route.segments[0] {
			SegmentSpec::Option(opt) => assert_eq!(opt.long_form, "verbose"),
			other => panic!("expected option, got {other:?}"),
		}
	}

	#[test]
	fn required_option_outscores_optional_option() {
		let required = compile("--count,-c {n:int}").unwrap();
		let optional = compile("--count,-c {n:int?}").unwrap();
		assert_eq!(required.specificity, 50);
		assert_eq!(optional.specificity, 25);
	}
}
