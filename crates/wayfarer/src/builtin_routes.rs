//! The three reserved top-level flags (spec §6): `--help`, `--version`,
//! `--capabilities`. Each is registered as an ordinary literal-pattern
//! [`Endpoint`] with a very low `order`, so the existing sort order and
//! [`RouteCollection::add`]'s duplicate-pattern override already give a
//! user-defined route with the same pattern priority, warning included —
//! no special-case runtime logic needed.

use std::sync::{Arc, OnceLock};

use wf_routing::{BoundArguments, CancellationSignal, Endpoint, HandlerOutcome, MessageType, RouteCollection};

/// Lower than any ordinary route is expected to declare; keeps the three
/// reserved flags first in `order` unless a user route explicitly competes.
const RESERVED_ORDER: i32 = i32::MIN;

pub(crate) fn register(
	collection: &mut RouteCollection,
	name: &str,
	version: &str,
	description: Option<&str>,
	routes_for_capabilities: Arc<OnceLock<wf_routing::FrozenRouteCollection>>,
) -> Result<(), wf_routing::CollectionError> {
	let help_name = name.to_string();
	let help_version = version.to_string();
	let help_description = description.map(str::to_string);
	let routes_for_help = routes_for_capabilities.clone();

	collection.add(|id| Endpoint {
		id,
		route: wf_pattern::compile("--help").expect("literal pattern always compiles"),
		handler: Arc::new(move |_: &BoundArguments, _: &CancellationSignal| {
			let routes = routes_for_help.get();
			println!("{} {}", help_name, help_version);
			if let Some(description) = &help_description {
				println!("{description}");
			}
			if let Some(routes) = routes {
				println!();
				println!("Commands:");
				for endpoint in routes.iter() {
					println!("  {}", endpoint.route.original_pattern);
				}
			}
			HandlerOutcome::ExitCode(0)
		}),
		order: RESERVED_ORDER,
		message_type: MessageType::Query,
		group: None,
		aliases: Vec::new(),
	})?;

	let version_owned = version.to_string();
	collection.add(move |id| Endpoint {
		id,
		route: wf_pattern::compile("--version").expect("literal pattern always compiles"),
		handler: {
			let version = version_owned.clone();
			Arc::new(move |_: &BoundArguments, _: &CancellationSignal| {
				println!("{version}");
				HandlerOutcome::ExitCode(0)
			})
		},
		order: RESERVED_ORDER,
		message_type: MessageType::Query,
		group: None,
		aliases: Vec::new(),
	})?;

	let cap_name = name.to_string();
	let cap_version = version.to_string();
	let cap_description = description.map(str::to_string);
	collection.add(move |id| Endpoint {
		id,
		route: wf_pattern::compile("--capabilities").expect("literal pattern always compiles"),
		handler: {
			let name = cap_name.clone();
			let version = cap_version.clone();
			let description = cap_description.clone();
			let routes = routes_for_capabilities.clone();
			Arc::new(move |_: &BoundArguments, _: &CancellationSignal| {
				let Some(frozen) = routes.get() else {
					return HandlerOutcome::ExitCode(1);
				};
				let doc = wf_routing::render_capabilities(&name, &version, description.as_deref(), frozen);
				match serde_json::to_string_pretty(&doc) {
					Ok(json) => {
						println!("{json}");
						HandlerOutcome::ExitCode(0)
					}
					Err(err) => HandlerOutcome::Error(Box::new(err)),
				}
			})
		},
		order: RESERVED_ORDER,
		message_type: MessageType::Query,
		group: None,
		aliases: Vec::new(),
	})?;

	Ok(())
}
