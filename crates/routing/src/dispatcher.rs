//! Binds a matched route's extracted values and invokes its handler.

use crate::binder::{self, ConverterRegistry};
use crate::cancel::CancellationSignal;
use crate::error::TypeConversionError;
use crate::resolver::ResolveOutcome;
use crate::types::HandlerOutcome;

/// What happened when dispatching a resolved argv against a route
/// collection.
#[derive(Debug)]
pub enum DispatchOutcome {
	/// The handler ran; use [`exit_code`] to translate this into a process
	/// exit status.
	///
	/// [`exit_code`]: DispatchOutcome::exit_code
	Ran(HandlerOutcome),
	/// No route matched; see [`ResolveOutcome::NoMatch`].
	NoMatch,
	/// A route matched but its extracted values failed to convert to their
	/// declared types.
	TypeError(TypeConversionError),
}

impl DispatchOutcome {
	/// The conventional process exit code for this outcome: `0` on success,
	/// `1` on a handler error, `2` on no match or a type conversion failure.
	pub fn exit_code(&self) -> i32 {
		match self {
			DispatchOutcome::Ran(HandlerOutcome::ExitCode(code)) => *code,
			DispatchOutcome::Ran(HandlerOutcome::Error(_)) => 1,
			DispatchOutcome::NoMatch => 2,
			DispatchOutcome::TypeError(_) => 2,
		}
	}
}

/// Resolves `argv` against `outcome`'s route, binds its values, and invokes
/// the matched handler. `cancel` is passed through to the handler unchanged.
pub fn dispatch(outcome: ResolveOutcome<'_>, registry: &ConverterRegistry, cancel: &CancellationSignal) -> DispatchOutcome {
	match outcome {
		ResolveOutcome::NoMatch { .. } => DispatchOutcome::NoMatch,
		ResolveOutcome::Matched { endpoint, extracted, .. } => match binder::bind(&endpoint.route, &extracted, registry) {
			Ok(args) => DispatchOutcome::Ran(endpoint.handler.call(&args, cancel)),
			Err(e) => DispatchOutcome::TypeError(e),
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use wf_pattern::compile;

	use crate::collection::RouteCollection;
	use crate::resolver::resolve;
	use crate::types::{BoundArguments, Endpoint, MessageType, TracingSink};

	#[test]
	fn dispatches_to_the_matched_handler_and_reports_its_exit_code() {
		let mut collection = RouteCollection::new(Arc::new(TracingSink));
		collection
			.add(|id| Endpoint {
				id,
				route: compile("ping").unwrap(),
				handler: Arc::new(|_: &BoundArguments, _: &CancellationSignal| HandlerOutcome::ExitCode(0)),
				order: 0,
				message_type: MessageType::Query,
				group: None,
				aliases: Vec::new(),
			})
			.unwrap();
		let frozen = collection.freeze();

		let argv = vec!["ping".to_string()];
		let outcome = resolve(&argv, &frozen);
		let registry = ConverterRegistry::default();
		let dispatched = dispatch(outcome, &registry, &CancellationSignal::new());
		assert_eq!(dispatched.exit_code(), 0);
	}

	#[test]
	fn no_match_reports_exit_code_two() {
		let collection = RouteCollection::new(Arc::new(TracingSink));
		let frozen = collection.freeze();
		let argv = vec!["bogus".to_string()];
		let outcome = resolve(&argv, &frozen);
		let registry = ConverterRegistry::default();
		let dispatched = dispatch(outcome, &registry, &CancellationSignal::new());
		assert_eq!(dispatched.exit_code(), 2);
		assert!(matches!(dispatched, DispatchOutcome::NoMatch));
	}

	#[test]
	fn handler_error_reports_exit_code_one() {
		let mut collection = RouteCollection::new(Arc::new(TracingSink));
		collection
			.add(|id| Endpoint {
				id,
				route: compile("fail").unwrap(),
				handler: Arc::new(|_: &BoundArguments, _: &CancellationSignal| {
					HandlerOutcome::Error(Box::new(std::io::Error::other("boom")))
				}),
				order: 0,
				message_type: MessageType::Command,
				group: None,
				aliases: Vec::new(),
			})
			.unwrap();
		let frozen = collection.freeze();

		let argv = vec!["fail".to_string()];
		let outcome = resolve(&argv, &frozen);
		let registry = ConverterRegistry::default();
		let dispatched = dispatch(outcome, &registry, &CancellationSignal::new());
		assert_eq!(dispatched.exit_code(), 1);
	}
}
