use std::collections::HashMap;
use std::sync::Arc;

use wf_pattern::CompiledRoute;

/// Stable identifier assigned to an endpoint at `add()` time.
///
/// Equal to the endpoint's declaration index; used for diagnostics and to
/// let a later `add()` override an earlier one with the same pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub u32);

/// Severity of a build-time [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Warning,
	Error,
}

/// A build-time notice: a duplicate pattern, a built-in override, and so on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub severity: Severity,
	pub message: String,
}

impl Diagnostic {
	pub fn warning(message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Warning,
			message: message.into(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			severity: Severity::Error,
			message: message.into(),
		}
	}
}

/// Receives build-time diagnostics from route collection and profile
/// construction. The default sink forwards to `tracing`.
pub trait DiagnosticSink: Send + Sync {
	fn report(&self, diagnostic: Diagnostic);
}

/// A [`DiagnosticSink`] that logs through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn report(&self, diagnostic: Diagnostic) {
		match diagnostic.severity {
			Severity::Warning => tracing::warn!("{}", diagnostic.message),
			Severity::Error => tracing::error!("{}", diagnostic.message),
		}
	}
}

/// How a command affects the world, surfaced verbatim in the capabilities
/// document so an agent caller can judge whether a call is safe to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
	/// Reads state without side effects.
	Query,
	/// Has side effects; repeating it is not necessarily safe.
	Command,
	/// Has side effects but is safe to repeat (same result each time).
	IdempotentCommand,
	Unspecified,
}

impl Default for MessageType {
	fn default() -> Self {
		MessageType::Unspecified
	}
}

/// Either `Single(one value)` or `Many(values in argv order)`, as extracted
/// by the resolver from argv and before type conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedValue {
	Single(String),
	Many(Vec<String>),
	Flag(bool),
	Absent,
}

/// Mapping from parameter-or-option name to its extracted (pre-conversion)
/// value, produced by the resolver and consumed by the binder.
pub type ExtractedValues = HashMap<String, ExtractedValue>;

/// A typed value after binder conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
	Str(String),
	Int(i64),
	UInt(u64),
	Float(f64),
	Bool(bool),
	Timestamp(chrono::DateTime<chrono::Utc>),
	Duration(chrono::Duration),
	Uuid(uuid::Uuid),
	Enum(String),
	List(Vec<BoundValue>),
	Absent,
}

/// Extracted values after conversion into typed values, ready for dispatch.
#[derive(Debug, Clone, Default)]
pub struct BoundArguments(pub HashMap<String, BoundValue>);

impl BoundArguments {
	pub fn get(&self, name: &str) -> Option<&BoundValue> {
		self.0.get(name)
	}
}

/// A compiled route plus its handler and build-time metadata.
pub struct Endpoint {
	pub id: RouteId,
	pub route: CompiledRoute,
	pub handler: Arc<dyn Handler>,
	/// Lower runs earlier in sort order; overrides specificity on ties.
	pub order: i32,
	pub message_type: MessageType,
	pub group: Option<String>,
	pub aliases: Vec<String>,
}

/// The outcome of invoking a [`Handler`].
#[derive(Debug)]
pub enum HandlerOutcome {
	/// The handler completed; its return value becomes the process exit
	/// code (`0` is success).
	ExitCode(i32),
	/// The handler raised an error; reported to the user, a non-zero exit
	/// code is derived by the caller.
	Error(Box<dyn std::error::Error + Send + Sync>),
}

/// A handler invoked by the dispatcher with bound, type-converted
/// arguments.
///
/// Handlers run to completion synchronously from the dispatcher's
/// perspective; an application embedding an async handler blocks on its own
/// runtime inside `call` (see spec's note that async and sync handlers are
/// observationally equivalent to the core).
pub trait Handler: Send + Sync {
	fn call(&self, args: &BoundArguments, cancel: &crate::cancel::CancellationSignal) -> HandlerOutcome;
}

impl<F> Handler for F
where
	F: Fn(&BoundArguments, &crate::cancel::CancellationSignal) -> HandlerOutcome + Send + Sync,
{
	fn call(&self, args: &BoundArguments, cancel: &crate::cancel::CancellationSignal) -> HandlerOutcome {
		self(args, cancel)
	}
}
