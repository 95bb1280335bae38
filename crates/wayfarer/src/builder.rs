//! The public builder: declare routes, converters, and a keymap profile,
//! then produce an immutable [`crate::App`].

use std::sync::{Arc, OnceLock};

use wf_keymap::{NamedProfile, ProfileBuilder};
use wf_routing::{BoundArguments, BoundValue, CancellationSignal, Endpoint, FrozenRouteCollection, Handler, HandlerOutcome, MessageType, RouteCollection, TracingSink};

use crate::error::BuildError;
use crate::App;

/// Per-route metadata beyond the pattern and handler: its [`MessageType`],
/// explicit sort `order`, and capabilities-document group/aliases.
#[derive(Debug, Clone, Default)]
pub struct RouteMeta {
	pub message_type: MessageType,
	pub order: i32,
	pub group: Option<String>,
	pub aliases: Vec<String>,
}

impl RouteMeta {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn message_type(mut self, message_type: MessageType) -> Self {
		self.message_type = message_type;
		self
	}

	pub fn order(mut self, order: i32) -> Self {
		self.order = order;
		self
	}

	pub fn group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}

	pub fn alias(mut self, alias: impl Into<String>) -> Self {
		self.aliases.push(alias.into());
		self
	}
}

/// The public entry point applications construct: declare routes,
/// converters, and a keymap profile, then [`Cli::build`] into an [`App`].
pub struct Cli {
	name: String,
	version: String,
	description: Option<String>,
	collection: RouteCollection,
	converters: wf_routing::ConverterRegistry,
	profile_builder: ProfileBuilder,
	repl_config: wf_repl::ReplConfig,
	routes_cell: Arc<OnceLock<FrozenRouteCollection>>,
	pattern_errors: Vec<(String, wf_pattern::PatternError)>,
}

impl Cli {
	/// Starts a new builder. `name`/`version` are surfaced by `--version`
	/// and the capabilities document (spec §6).
	pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			description: None,
			collection: RouteCollection::new(Arc::new(TracingSink)),
			converters: wf_routing::ConverterRegistry::default(),
			profile_builder: ProfileBuilder::new(NamedProfile::Default),
			repl_config: wf_repl::ReplConfig::default(),
			routes_cell: Arc::new(OnceLock::new()),
			pattern_errors: Vec::new(),
		}
	}

	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Declares a route with default metadata. The handler receives bound,
	/// type-converted arguments plus a cooperative cancellation signal.
	pub fn route<F>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&BoundArguments, &CancellationSignal) -> HandlerOutcome + Send + Sync + 'static,
	{
		self.route_with(pattern, RouteMeta::default(), handler)
	}

	/// Declares a route with explicit [`RouteMeta`] (message type, sort
	/// order, group, aliases).
	pub fn route_with<F>(mut self, pattern: &str, meta: RouteMeta, handler: F) -> Self
	where
		F: Fn(&BoundArguments, &CancellationSignal) -> HandlerOutcome + Send + Sync + 'static,
	{
		self.add_route(pattern, meta, Arc::new(handler));
		self
	}

	fn add_route(&mut self, pattern: &str, meta: RouteMeta, handler: Arc<dyn Handler>) {
		match wf_pattern::compile(pattern) {
			Ok(route) => {
				self.collection
					.add(move |id| Endpoint {
						id,
						route: route.clone(),
						handler: handler.clone(),
						order: meta.order,
						message_type: meta.message_type,
						group: meta.group.clone(),
						aliases: meta.aliases.clone(),
					})
					.expect("collection is not frozen during building");
			}
			Err(source) => self.pattern_errors.push((pattern.to_string(), source)),
		}
	}

	/// Declares a group of routes sharing a `group` label in the
	/// capabilities document (spec's `Group`/`Aliases` metadata, SPEC_FULL
	/// §5).
	pub fn group(mut self, name: &str, build: impl FnOnce(GroupBuilder) -> GroupBuilder) -> Self {
		let group = build(GroupBuilder::new(name));
		for (pattern, meta, handler) in group.routes {
			self.add_route(&pattern, meta, handler);
		}
		self
	}

	/// Registers a named type converter for use in `{param:type}` bindings.
	pub fn converter(mut self, type_name: &str, converter: impl Fn(&str) -> Result<BoundValue, String> + Send + Sync + 'static) -> Self {
		self.converters.register(type_name, converter);
		self
	}

	/// Registers an enum converter matched case-insensitively.
	pub fn converter_enum(mut self, type_name: &str, variants: &[&str]) -> Self {
		self.converters.register_enum(type_name, variants);
		self
	}

	/// Selects a named base keymap profile (default: [`NamedProfile::Default`]).
	pub fn keymap_profile(mut self, base: NamedProfile) -> Self {
		self.profile_builder = ProfileBuilder::new(base);
		self
	}

	/// Replaces the keymap builder outright, for applications layering
	/// removals/overrides/additions atop a base profile.
	pub fn keymap_builder(mut self, builder: ProfileBuilder) -> Self {
		self.profile_builder = builder;
		self
	}

	/// Sets the REPL prompt (default `"> "`).
	pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
		self.repl_config.prompt = prompt.into();
		self
	}

	/// Enables trailing-backslash line continuation in the REPL (spec §4.L).
	pub fn multiline(mut self, multiline: bool) -> Self {
		self.repl_config.multiline = multiline;
		self
	}

	/// Persists REPL history to `path` across sessions.
	pub fn history_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
		self.repl_config.history_path = Some(path.into());
		self
	}

	/// Resolves the keymap profile, registers the three reserved top-level
	/// flags (spec §6), freezes the route collection, and returns an
	/// immutable [`App`].
	pub fn build(mut self) -> Result<App, BuildError> {
		if let Some((pattern, source)) = self.pattern_errors.into_iter().next() {
			return Err(BuildError::Pattern { pattern, source });
		}

		crate::builtin_routes::register(&mut self.collection, &self.name, &self.version, self.description.as_deref(), self.routes_cell.clone())?;

		let profile = self.profile_builder.build()?;
		let routes = self.collection.freeze();
		let _ = self.routes_cell.set(clone_frozen(&routes));

		Ok(App {
			name: self.name,
			version: self.version,
			description: self.description,
			routes,
			converters: self.converters,
			profile,
			repl_config: self.repl_config,
		})
	}
}

/// `FrozenRouteCollection` holds `Arc<dyn Handler>` trait objects, which are
/// cheap to clone; this gives the `--capabilities` handler its own frozen
/// view without borrowing from the `App` being constructed around it.
fn clone_frozen(routes: &FrozenRouteCollection) -> FrozenRouteCollection {
	let sink: Arc<dyn wf_routing::DiagnosticSink> = Arc::new(TracingSink);
	let mut collection = RouteCollection::new(sink);
	for endpoint in routes.iter() {
		let route = endpoint.route.clone();
		let handler = endpoint.handler.clone();
		let order = endpoint.order;
		let message_type = endpoint.message_type;
		let group = endpoint.group.clone();
		let aliases = endpoint.aliases.clone();
		let _ = collection.add(move |id| Endpoint {
			id,
			route: route.clone(),
			handler: handler.clone(),
			order,
			message_type,
			group: group.clone(),
			aliases: aliases.clone(),
		});
	}
	collection.freeze()
}

/// A builder for a named group of routes sharing capabilities-document
/// metadata, produced inside [`Cli::group`]'s closure.
pub struct GroupBuilder {
	name: String,
	routes: Vec<(String, RouteMeta, Arc<dyn Handler>)>,
}

impl GroupBuilder {
	fn new(name: &str) -> Self {
		Self {
			name: name.to_string(),
			routes: Vec::new(),
		}
	}

	pub fn route<F>(self, pattern: &str, handler: F) -> Self
	where
		F: Fn(&BoundArguments, &CancellationSignal) -> HandlerOutcome + Send + Sync + 'static,
	{
		self.route_with(pattern, RouteMeta::default(), handler)
	}

	pub fn route_with<F>(mut self, pattern: &str, mut meta: RouteMeta, handler: F) -> Self
	where
		F: Fn(&BoundArguments, &CancellationSignal) -> HandlerOutcome + Send + Sync + 'static,
	{
		meta.group = Some(self.name.clone());
		self.routes.push((pattern.to_string(), meta, Arc::new(handler)));
		self
	}
}
