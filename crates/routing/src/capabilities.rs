//! Renders a frozen route collection as the capabilities JSON document an
//! agentic caller can introspect before invoking a command.

use serde::Serialize;
use wf_pattern::SegmentSpec;

use crate::collection::FrozenRouteCollection;
use crate::types::MessageType;

#[derive(Debug, Serialize)]
pub struct CapabilitiesDoc {
	pub name: String,
	pub version: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub commands: Vec<CommandDoc>,
}

#[derive(Debug, Serialize)]
pub struct CommandDoc {
	pub pattern: String,
	#[serde(rename = "messageType")]
	pub message_type: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub parameters: Vec<ParameterDoc>,
	pub options: Vec<OptionDoc>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub aliases: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ParameterDoc {
	pub name: String,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub ty: Option<String>,
	pub optional: bool,
	#[serde(rename = "catchAll")]
	pub catch_all: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionDoc {
	#[serde(rename = "longForm")]
	pub long_form: String,
	#[serde(rename = "shortForm", skip_serializing_if = "Option::is_none")]
	pub short_form: Option<char>,
	#[serde(rename = "expectsValue")]
	pub expects_value: bool,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub value_type: Option<String>,
	pub optional: bool,
	pub repeated: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

fn message_type_tag(message_type: MessageType) -> &'static str {
	match message_type {
		MessageType::Query => "query",
		MessageType::Command => "command",
		MessageType::IdempotentCommand => "idempotentCommand",
		MessageType::Unspecified => "unspecified",
	}
}

/// Renders every endpoint in `routes` into a [`CapabilitiesDoc`].
pub fn render(name: &str, version: &str, description: Option<&str>, routes: &FrozenRouteCollection) -> CapabilitiesDoc {
	let commands = routes
		.iter()
		.map(|endpoint| {
			let mut parameters = Vec::new();
			let mut options = Vec::new();

			for segment in &endpoint.route.segments {
				match segment {
					SegmentSpec::Literal { .. } => {}
					SegmentSpec::Parameter { name, ty, optional, catch_all, description } => parameters.push(ParameterDoc {
						name: name.clone(),
						ty: ty.clone(),
						optional: *optional,
						catch_all: *catch_all,
						description: description.clone(),
					}),
					SegmentSpec::Option(opt) => options.push(OptionDoc {
						long_form: opt.long_form.clone(),
						short_form: opt.short_form,
						expects_value: opt.expects_value,
						value_type: opt.value_type.clone(),
						optional: opt.optional,
						repeated: opt.repeated,
						description: opt.description.clone(),
					}),
				}
			}

			CommandDoc {
				pattern: endpoint.route.original_pattern.clone(),
				message_type: message_type_tag(endpoint.message_type),
				description: None,
				parameters,
				options,
				group: endpoint.group.clone(),
				aliases: endpoint.aliases.clone(),
			}
		})
		.collect();

	CapabilitiesDoc {
		name: name.to_string(),
		version: version.to_string(),
		description: description.map(str::to_string),
		commands,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use wf_pattern::compile;

	use crate::cancel::CancellationSignal;
	use crate::collection::RouteCollection;
	use crate::types::{BoundArguments, Endpoint, HandlerOutcome, TracingSink};

	#[test]
	fn renders_routes_in_priority_order_with_their_parameters_and_options() {
		let mut collection = RouteCollection::new(Arc::new(TracingSink));
		collection
			.add(|id| Endpoint {
				id,
				route: compile("deploy {env:string} --dry-run,-n").unwrap(),
				handler: Arc::new(|_: &BoundArguments, _: &CancellationSignal| HandlerOutcome::ExitCode(0)),
				order: 0,
				message_type: MessageType::Command,
				group: Some("deployment".into()),
				aliases: vec!["release".into()],
			})
			.unwrap();
		let frozen = collection.freeze();

		let doc = render("wayfarer-demo", "1.0.0", Some("an example app"), &frozen);
		assert_eq!(doc.name, "wayfarer-demo");
		assert_eq!(doc.commands.len(), 1);
		let command = &doc.commands[0];
		assert_eq!(command.pattern, "deploy {env:string} --dry-run,-n");
		assert_eq!(command.message_type, "command");
		assert_eq!(command.parameters.len(), 1);
		assert_eq!(command.options.len(), 1);
		assert_eq!(command.group.as_deref(), Some("deployment"));
		assert_eq!(command.aliases, vec!["release".to_string()]);

		let json = serde_json::to_string(&doc).unwrap();
		assert!(json.contains("\"messageType\":\"command\""));
	}
}
