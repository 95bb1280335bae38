//! Matches an argv token list against a frozen route collection.

use wf_pattern::{CompiledRoute, OptionSpec, SegmentSpec};

use crate::collection::FrozenRouteCollection;
use crate::error::{MatchFailure, NoMatchReason};
use crate::types::{Endpoint, ExtractedValue, ExtractedValues, RouteId};

/// The result of resolving an argv list against a route collection.
#[derive(Debug)]
pub enum ResolveOutcome<'a> {
	Matched {
		route_id: RouteId,
		endpoint: &'a Endpoint,
		extracted: ExtractedValues,
		defaults_used: Vec<String>,
	},
	NoMatch {
		reasons: Vec<NoMatchReason>,
	},
}

/// Tries every endpoint in priority order, returning the first match.
pub fn resolve<'a>(argv: &[String], routes: &'a FrozenRouteCollection) -> ResolveOutcome<'a> {
	let mut reasons = Vec::new();

	for endpoint in routes.iter() {
		match try_match(&endpoint.route, argv) {
			Ok((extracted, defaults_used)) => {
				return ResolveOutcome::Matched {
					route_id: endpoint.id,
					endpoint,
					extracted,
					defaults_used,
				};
			}
			Err(failure) => reasons.push(NoMatchReason {
				route_id: endpoint.id,
				pattern: endpoint.route.original_pattern.clone(),
				failure,
			}),
		}
	}

	ResolveOutcome::NoMatch { reasons }
}

/// Declared options of a route, gathered once per match attempt.
fn declared_options(route: &CompiledRoute) -> Vec<&OptionSpec> {
	route
		.segments
		.iter()
		.filter_map(|s| match s {
			SegmentSpec::Option(opt) => Some(opt),
			_ => None,
		})
		.collect()
}

/// Whether `token` is itself one of `route`'s declared option forms (long,
/// short, or a valid short-option bundle). Used to decide whether a token
/// following a value-expecting option is that option's value or the start of
/// the next option.
fn is_defined_option_form(token: &str, declared: &[&OptionSpec]) -> bool {
	if let Some(body) = token.strip_prefix("--") {
		let name = body.split('=').next().unwrap_or(body).to_ascii_lowercase();
		return declared.iter().any(|o| o.long_form == name);
	}
	if let Some(rest) = token.strip_prefix('-') {
		if rest.is_empty() {
			return false;
		}
		let mut chars = rest.chars();
		let first = chars.next().unwrap();
		if chars.next().is_none() {
			return declared.iter().any(|o| o.short_form == Some(first));
		}
		return is_valid_short_bundle(rest, declared);
	}
	false
}

/// A short-option bundle (`-cvf`) is valid, getopt-style, when every letter
/// but the last names a declared boolean short option and the last letter
/// names any declared short option — boolean or value-taking. A value-taking
/// option in the last slot consumes the following argv token, mirroring
/// `tar -cvf out.tar`.
fn is_valid_short_bundle(rest: &str, declared: &[&OptionSpec]) -> bool {
	let chars: Vec<char> = rest.chars().collect();
	let Some((last, init)) = chars.split_last() else {
		return false;
	};
	init.iter().all(|c| declared.iter().any(|o| o.short_form == Some(*c) && !o.expects_value))
		&& declared.iter().any(|o| o.short_form == Some(*last))
}

/// Whether `token` looks like option syntax that failed to match any
/// declared option of this route — distinguished from a plain leftover
/// positional (including a negative number).
fn looks_like_unknown_option(token: &str) -> bool {
	match token.strip_prefix('-') {
		Some(rest) if !rest.is_empty() => !rest.chars().all(|c| c.is_ascii_digit()),
		_ => false,
	}
}

struct OptionState {
	seen: bool,
	values: Vec<String>,
}

/// Attempts to match `argv` against `route`, returning extracted values and
/// the names of optional parameters that fell back to their default (absent)
/// value.
fn try_match(route: &CompiledRoute, argv: &[String]) -> Result<(ExtractedValues, Vec<String>), MatchFailure> {
	let declared = declared_options(route);
	let marker_idx = argv.iter().position(|t| t == "--");
	let option_scan_bound = marker_idx.unwrap_or(argv.len());

	let mut consumed = vec![false; argv.len()];
	if let Some(idx) = marker_idx {
		consumed[idx] = true;
	}

	let mut states: std::collections::HashMap<String, OptionState> = declared
		.iter()
		.map(|o| (o.long_form.clone(), OptionState { seen: false, values: Vec::new() }))
		.collect();

	let mut i = 0;
	while i < option_scan_bound {
		if consumed[i] {
			i += 1;
			continue;
		}
		let token = argv[i].as_str();

		if let Some(body) = token.strip_prefix("--") {
			let (name_part, inline_value) = match body.find('=') {
				Some(pos) => (&body[..pos], Some(body[pos + 1..].to_string())),
				None => (body, None),
			};
			let name = name_part.to_ascii_lowercase();
			if let Some(opt) = declared.iter().find(|o| o.long_form == name) {
				consumed[i] = true;
				consume_option(opt, inline_value, argv, i, option_scan_bound, &declared, &mut consumed, &mut states);
			}
			i += 1;
			continue;
		}

		if let Some(rest) = token.strip_prefix('-') {
			if !rest.is_empty() {
				let mut chars = rest.chars();
				let first = chars.next().unwrap();
				if chars.next().is_none() {
					// single-character short form, unless it's a negative digit
					// not colliding with a declared short option.
					let is_negative_digit = first.is_ascii_digit() && !declared.iter().any(|o| o.short_form == Some(first));
					if !is_negative_digit {
						if let Some(opt) = declared.iter().find(|o| o.short_form == Some(first)) {
							consumed[i] = true;
							consume_option(opt, None, argv, i, option_scan_bound, &declared, &mut consumed, &mut states);
						}
					}
				} else if is_valid_short_bundle(rest, &declared) {
					consumed[i] = true;
					let chars: Vec<char> = rest.chars().collect();
					let (init, last) = chars.split_at(chars.len() - 1);
					for c in init {
						if let Some(opt) = declared.iter().find(|o| o.short_form == Some(*c)) {
							states.get_mut(&opt.long_form).unwrap().seen = true;
						}
					}
					let last = last[0];
					if let Some(opt) = declared.iter().find(|o| o.short_form == Some(last)) {
						if !opt.expects_value {
							states.get_mut(&opt.long_form).unwrap().seen = true;
						} else {
							consume_option(opt, None, argv, i, option_scan_bound, &declared, &mut consumed, &mut states);
						}
					}
				}
			}
		}
		i += 1;
	}

	for opt in &declared {
		let state = states.get(&opt.long_form).unwrap();
		if opt.expects_value && !opt.optional && !state.seen {
			return Err(MatchFailure::MissingRequiredOption(opt.long_form.clone()));
		}
	}

	let mut extracted: ExtractedValues = std::collections::HashMap::new();
	for opt in &declared {
		let state = states.remove(&opt.long_form).unwrap();
		let value = if !opt.expects_value {
			ExtractedValue::Flag(state.seen)
		} else if opt.repeated {
			if state.values.is_empty() {
				ExtractedValue::Absent
			} else {
				ExtractedValue::Many(state.values)
			}
		} else if let Some(v) = state.values.into_iter().next() {
			ExtractedValue::Single(v)
		} else {
			ExtractedValue::Absent
		};
		extracted.insert(opt.long_form.clone(), value);
	}

	let positional_tokens: Vec<&str> = argv
		.iter()
		.enumerate()
		.filter(|(idx, _)| !consumed[*idx])
		.map(|(_, t)| t.as_str())
		.collect();

	let mut pos_cursor = 0usize;
	let mut defaults_used = Vec::new();

	for (idx, segment) in route.segments.iter().enumerate() {
		match segment {
			SegmentSpec::Literal { text, .. } => {
				let found = positional_tokens.get(pos_cursor).copied();
				match found {
					Some(tok) if tok == text => pos_cursor += 1,
					Some(tok) => return Err(MatchFailure::LiteralMismatch { expected: text.clone(), found: Some(tok.to_string()) }),
					None => return Err(MatchFailure::LiteralMismatch { expected: text.clone(), found: None }),
				}
			}
			SegmentSpec::Parameter { name, catch_all, optional, .. } if *catch_all => {
				let remaining: Vec<String> = positional_tokens[pos_cursor..].iter().map(|t| t.to_string()).collect();
				pos_cursor = positional_tokens.len();
				let _ = optional;
				if remaining.is_empty() {
					extracted.insert(name.clone(), ExtractedValue::Absent);
				} else {
					extracted.insert(name.clone(), ExtractedValue::Many(remaining));
				}
			}
			SegmentSpec::Parameter { name, optional: true, .. } => {
				let required_after = route.segments[idx + 1..]
					.iter()
					.filter(|s| matches!(s, SegmentSpec::Parameter { optional: false, catch_all: false, .. }))
					.count();
				let tokens_remaining = positional_tokens.len().saturating_sub(pos_cursor);
				if tokens_remaining > 0 && tokens_remaining - 1 >= required_after {
					extracted.insert(name.clone(), ExtractedValue::Single(positional_tokens[pos_cursor].to_string()));
					pos_cursor += 1;
				} else {
					extracted.insert(name.clone(), ExtractedValue::Absent);
					defaults_used.push(name.clone());
				}
			}
			SegmentSpec::Parameter { name, .. } => {
				let found = positional_tokens.get(pos_cursor).copied();
				match found {
					Some(tok) => {
						extracted.insert(name.clone(), ExtractedValue::Single(tok.to_string()));
						pos_cursor += 1;
					}
					None => return Err(MatchFailure::MissingPositional(name.clone())),
				}
			}
			SegmentSpec::Option(_) => {}
		}
	}

	if pos_cursor < positional_tokens.len() {
		let leftover: Vec<String> = positional_tokens[pos_cursor..].iter().map(|t| t.to_string()).collect();
		if let Some(tok) = leftover.iter().find(|t| looks_like_unknown_option(t)) {
			return Err(MatchFailure::UnknownOption(tok.clone()));
		}
		return Err(MatchFailure::ExtraTokens(leftover));
	}

	Ok((extracted, defaults_used))
}

#[allow(clippy::too_many_arguments)]
fn consume_option(
	opt: &OptionSpec,
	inline_value: Option<String>,
	argv: &[String],
	i: usize,
	option_scan_bound: usize,
	declared: &[&OptionSpec],
	consumed: &mut [bool],
	states: &mut std::collections::HashMap<String, OptionState>,
) {
	let state = states.get_mut(&opt.long_form).unwrap();
	if !opt.expects_value {
		state.seen = true;
		return;
	}

	let value = if let Some(v) = inline_value {
		Some(v)
	} else if i + 1 < option_scan_bound && !consumed[i + 1] && !is_defined_option_form(&argv[i + 1], declared) {
		consumed[i + 1] = true;
		Some(argv[i + 1].clone())
	} else {
		None
	};

	if let Some(v) = value {
		state.seen = true;
		state.values.push(v);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use wf_pattern::compile;

	use crate::cancel::CancellationSignal;
	use crate::collection::RouteCollection;
	use crate::types::{BoundArguments, Endpoint as EndpointType, HandlerOutcome, MessageType, TracingSink};

	fn argv(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	fn noop_handler() -> Arc<dyn crate::types::Handler> {
		Arc::new(|_: &BoundArguments, _: &CancellationSignal| HandlerOutcome::ExitCode(0))
	}

	fn collection_of(patterns: &[&str]) -> FrozenRouteCollection {
		let mut collection = RouteCollection::new(Arc::new(TracingSink));
		for pattern in patterns {
			let pattern = pattern.to_string();
			collection
				.add(move |id| EndpointType {
					id,
					route: compile(&pattern).unwrap(),
					handler: noop_handler(),
					order: 0,
					message_type: MessageType::Unspecified,
					group: None,
					aliases: Vec::new(),
				})
				.unwrap();
		}
		collection.freeze()
	}

	#[test]
	fn matches_a_purely_literal_route() {
		let routes = collection_of(&["status"]);
		match resolve(&argv(&["status"]), &routes) {
			ResolveOutcome::Matched { .. } => {}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn literal_route_outranks_parameter_route() {
		let routes = collection_of(&["deploy {env}", "deploy prod"]);
		match resolve(&argv(&["deploy", "prod"]), &routes) {
			ResolveOutcome::Matched { endpoint, .. } => assert_eq!(endpoint.route.original_pattern, "deploy prod"),
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn extracts_a_required_positional() {
		let routes = collection_of(&["deploy {env}"]);
		match resolve(&argv(&["deploy", "staging"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => {
				assert_eq!(extracted.get("env"), Some(&ExtractedValue::Single("staging".into())));
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn missing_required_positional_fails() {
		let routes = collection_of(&["deploy {env}"]);
		match resolve(&argv(&["deploy"]), &routes) {
			ResolveOutcome::NoMatch { reasons } => assert_eq!(reasons.len(), 1),
			other => panic!("expected no match, got {other:?}"),
		}
	}

	#[test]
	fn optional_positional_defers_to_a_later_required_one() {
		let routes = collection_of(&["copy {src} {dst?} {dst2}"]);
		match resolve(&argv(&["copy", "a", "b"]), &routes) {
			ResolveOutcome::Matched { extracted, defaults_used, .. } => {
				assert_eq!(extracted.get("src"), Some(&ExtractedValue::Single("a".into())));
				assert_eq!(extracted.get("dst"), Some(&ExtractedValue::Absent));
				assert_eq!(extracted.get("dst2"), Some(&ExtractedValue::Single("b".into())));
				assert_eq!(defaults_used, vec!["dst".to_string()]);
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn catch_all_consumes_all_remaining_tokens() {
		let routes = collection_of(&["grep {pattern} {*files}"]);
		match resolve(&argv(&["grep", "needle", "a.txt", "b.txt"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => {
				assert_eq!(extracted.get("files"), Some(&ExtractedValue::Many(vec!["a.txt".into(), "b.txt".into()])));
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn catch_all_may_be_empty() {
		let routes = collection_of(&["grep {pattern} {*files}"]);
		match resolve(&argv(&["grep", "needle"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => assert_eq!(extracted.get("files"), Some(&ExtractedValue::Absent)),
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn flag_option_is_recognized_by_long_or_short_form() {
		let routes = collection_of(&["build --verbose,-v"]);
		match resolve(&argv(&["build", "-v"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => assert_eq!(extracted.get("verbose"), Some(&ExtractedValue::Flag(true))),
			other => panic!("expected a match, got {other:?}"),
		}
		match resolve(&argv(&["build", "--verbose"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => assert_eq!(extracted.get("verbose"), Some(&ExtractedValue::Flag(true))),
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn bundled_boolean_short_flags_expand() {
		let routes = collection_of(&["build --verbose,-v --force,-f"]);
		match resolve(&argv(&["build", "-vf"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => {
				assert_eq!(extracted.get("verbose"), Some(&ExtractedValue::Flag(true)));
				assert_eq!(extracted.get("force"), Some(&ExtractedValue::Flag(true)));
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn bundled_short_flags_may_end_in_a_value_taking_option() {
		let routes = collection_of(&["tar --create,-c --verbose,-v --file,-f {file}"]);
		match resolve(&argv(&["tar", "-cvf", "out.tar"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => {
				assert_eq!(extracted.get("create"), Some(&ExtractedValue::Flag(true)));
				assert_eq!(extracted.get("verbose"), Some(&ExtractedValue::Flag(true)));
				assert_eq!(extracted.get("file"), Some(&ExtractedValue::Single("out.tar".into())));
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn valued_option_accepts_equals_or_space_form() {
		let routes = collection_of(&["connect --port,-p {value:int}"]);
		match resolve(&argv(&["connect", "--port=8080"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => assert_eq!(extracted.get("port"), Some(&ExtractedValue::Single("8080".into()))),
			other => panic!("expected a match, got {other:?}"),
		}
		match resolve(&argv(&["connect", "-p", "8080"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => assert_eq!(extracted.get("port"), Some(&ExtractedValue::Single("8080".into()))),
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn repeated_option_accumulates_values_in_order() {
		let routes = collection_of(&["build --tag,-t {value}*"]);
		match resolve(&argv(&["build", "-t", "a", "--tag", "b", "-t", "c"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => {
				assert_eq!(extracted.get("tag"), Some(&ExtractedValue::Many(vec!["a".into(), "b".into(), "c".into()])));
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn missing_required_option_fails_the_route() {
		let routes = collection_of(&["connect --port,-p {value:int}"]);
		match resolve(&argv(&["connect"]), &routes) {
			ResolveOutcome::NoMatch { reasons } => assert!(matches!(reasons[0].failure, MatchFailure::MissingRequiredOption(_))),
			other => panic!("expected no match, got {other:?}"),
		}
	}

	#[test]
	fn negative_number_positional_is_not_confused_with_an_option() {
		let routes = collection_of(&["offset {n:int}"]);
		match resolve(&argv(&["offset", "-5"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => assert_eq!(extracted.get("n"), Some(&ExtractedValue::Single("-5".into()))),
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn double_dash_forces_remaining_tokens_positional() {
		let routes = collection_of(&["run {*args}"]);
		match resolve(&argv(&["run", "--", "--verbose"]), &routes) {
			ResolveOutcome::Matched { extracted, .. } => {
				assert_eq!(extracted.get("args"), Some(&ExtractedValue::Many(vec!["--verbose".into()])));
			}
			other => panic!("expected a match, got {other:?}"),
		}
	}

	#[test]
	fn unknown_option_form_is_reported_distinctly_from_extra_tokens() {
		let routes = collection_of(&["status"]);
		match resolve(&argv(&["status", "--bogus"]), &routes) {
			ResolveOutcome::NoMatch { reasons } => assert!(matches!(reasons[0].failure, MatchFailure::UnknownOption(_))),
			other => panic!("expected no match, got {other:?}"),
		}
	}

	#[test]
	fn extra_positional_tokens_fail_the_route() {
		let routes = collection_of(&["status"]);
		match resolve(&argv(&["status", "extra"]), &routes) {
			ResolveOutcome::NoMatch { reasons } => assert!(matches!(reasons[0].failure, MatchFailure::ExtraTokens(_))),
			other => panic!("expected no match, got {other:?}"),
		}
	}

	#[test]
	fn no_route_matches_returns_all_reasons() {
		let routes = collection_of(&["status", "deploy {env}"]);
		match resolve(&argv(&["bogus"]), &routes) {
			ResolveOutcome::NoMatch { reasons } => assert_eq!(reasons.len(), 2),
			other => panic!("expected no match, got {other:?}"),
		}
	}
}
