//! Stores endpoints and, once frozen, keeps them sorted for matching.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::CollectionError;
use crate::types::{Diagnostic, DiagnosticSink, Endpoint, RouteId};

/// A mutable collection of endpoints being assembled at application build
/// time.
pub struct RouteCollection {
	sink: Arc<dyn DiagnosticSink>,
	entries: Vec<Option<Endpoint>>,
	by_pattern: HashMap<String, usize>,
	next_id: u32,
}

impl RouteCollection {
	/// Creates an empty collection reporting duplicate-pattern warnings to
	/// `sink`.
	pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
		Self {
			sink,
			entries: Vec::new(),
			by_pattern: HashMap::new(),
			next_id: 0,
		}
	}

	/// Adds `endpoint`, assigning it the next [`RouteId`].
	///
	/// If another endpoint with an identical `original_pattern` was
	/// already added, the earlier one is removed and a warning is reported
	/// — the newly added endpoint wins.
	pub fn add(&mut self, mut build: impl FnMut(RouteId) -> Endpoint) -> Result<RouteId, CollectionError> {
		let id = RouteId(self.next_id);
		self.next_id += 1;

		let endpoint = build(id);
		let pattern = endpoint.route.original_pattern.clone();

		if let Some(&old_index) = self.by_pattern.get(&pattern) {
			self.entries[old_index] = None;
			self.sink.report(Diagnostic::warning(format!(
				"route pattern {pattern:?} declared more than once; the later declaration wins"
			)));
		}

		let index = self.entries.len();
		self.entries.push(Some(endpoint));
		self.by_pattern.insert(pattern, index);

		Ok(id)
	}

	/// Sorts and seals the collection. After this, no more endpoints can be
	/// added.
	pub fn freeze(self) -> FrozenRouteCollection {
		let mut endpoints: Vec<Endpoint> = self.entries.into_iter().flatten().collect();
		endpoints.sort_by(|a, b| {
			a.order
				.cmp(&b.order)
				.then(b.route.specificity.cmp(&a.route.specificity))
				.then(a.id.cmp(&b.id))
		});
		FrozenRouteCollection { endpoints }
	}
}

/// A sorted, immutable collection ready for matching.
///
/// Sorted by `(order asc, specificity desc, declaration index asc)`: the
/// first endpoint that matches a given argv is, by construction, the
/// highest-priority one.
pub struct FrozenRouteCollection {
	endpoints: Vec<Endpoint>,
}

impl FrozenRouteCollection {
	/// Iterates endpoints in match-priority order.
	pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
		self.endpoints.iter()
	}

	/// Number of endpoints.
	pub fn len(&self) -> usize {
		self.endpoints.len()
	}

	pub fn is_empty(&self) -> bool {
		self.endpoints.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use wf_pattern::compile;

	use super::*;
	use crate::cancel::CancellationSignal;
	use crate::types::{BoundArguments, HandlerOutcome, MessageType};

	struct RecordingSink(Mutex<Vec<Diagnostic>>);

	impl DiagnosticSink for RecordingSink {
		fn report(&self, diagnostic: Diagnostic) {
			self.0.lock().unwrap().push(diagnostic);
		}
	}

	fn noop_handler() -> Arc<dyn crate::types::Handler> {
		Arc::new(|_: &BoundArguments, _: &CancellationSignal| HandlerOutcome::ExitCode(0))
	}

	fn endpoint(id: RouteId, pattern: &str, order: i32) -> Endpoint {
		Endpoint {
			id,
			route: compile(pattern).unwrap(),
			handler: noop_handler(),
			order,
			message_type: MessageType::Unspecified,
			group: None,
			aliases: Vec::new(),
		}
	}

	#[test]
	fn sorts_by_order_then_specificity_then_declaration_index() {
		let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
		let mut collection = RouteCollection::new(sink);

		collection.add(|id| endpoint(id, "deploy {env}", 0)).unwrap();
		collection.add(|id| endpoint(id, "deploy prod", 0)).unwrap();

		let frozen = collection.freeze();
		let patterns: Vec<&str> = frozen.iter().map(|e| e.route.original_pattern.as_str()).collect();
		assert_eq!(patterns, vec!["deploy prod", "deploy {env}"]);
	}

	#[test]
	fn explicit_order_field_wins_over_specificity() {
		let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
		let mut collection = RouteCollection::new(sink);

		collection.add(|id| endpoint(id, "deploy prod", 1)).unwrap();
		collection.add(|id| endpoint(id, "deploy {env}", 0)).unwrap();

		let frozen = collection.freeze();
		let patterns: Vec<&str> = frozen.iter().map(|e| e.route.original_pattern.as_str()).collect();
		assert_eq!(patterns, vec!["deploy {env}", "deploy prod"]);
	}

	#[test]
	fn duplicate_pattern_warns_and_last_wins() {
		let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
		let mut collection = RouteCollection::new(sink.clone());

		collection.add(|id| endpoint(id, "status", 0)).unwrap();
		collection.add(|id| endpoint(id, "status", 0)).unwrap();

		let frozen = collection.freeze();
		assert_eq!(frozen.len(), 1);
		assert_eq!(sink.0.lock().unwrap().len(), 1);
	}
}
