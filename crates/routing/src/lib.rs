//! Route collection, resolver, value binder, dispatcher, and capabilities
//! renderer built on top of [`wf_pattern`]'s compiled routes.

mod binder;
mod cancel;
mod capabilities;
mod collection;
mod dispatcher;
mod error;
mod resolver;
mod types;

pub use binder::{ConverterRegistry, bind};
pub use cancel::CancellationSignal;
pub use capabilities::{CapabilitiesDoc, CommandDoc, OptionDoc, ParameterDoc, render as render_capabilities};
pub use collection::{FrozenRouteCollection, RouteCollection};
pub use dispatcher::{DispatchOutcome, dispatch};
pub use error::{CollectionError, MatchFailure, NoMatchReason, TypeConversionError};
pub use resolver::{ResolveOutcome, resolve};
pub use types::{
	BoundArguments, BoundValue, Diagnostic, DiagnosticSink, Endpoint, ExtractedValue, ExtractedValues, Handler, HandlerOutcome, MessageType, RouteId,
	Severity, TracingSink,
};
