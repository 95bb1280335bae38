use thiserror::Error;

use crate::types::RouteId;

/// Why a single route failed to match a given argv during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchFailure {
	#[error("expected literal {expected:?}, found {found:?}")]
	LiteralMismatch { expected: String, found: Option<String> },
	#[error("missing required option {0:?}")]
	MissingRequiredOption(String),
	#[error("missing required positional parameter {0:?}")]
	MissingPositional(String),
	#[error("unexpected extra tokens: {0:?}")]
	ExtraTokens(Vec<String>),
	#[error("unknown option {0:?}")]
	UnknownOption(String),
	#[error("catch-all {0:?} requires at least one value")]
	CatchAllRequiredButEmpty(String),
}

/// Per-route failure reasons accumulated when nothing matched, used to
/// report a useful diagnostic to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoMatchReason {
	pub route_id: RouteId,
	pub pattern: String,
	pub failure: MatchFailure,
}

/// Errors from attempting to convert an extracted value to its declared
/// type.
#[derive(Debug, Error, PartialEq)]
#[error("could not convert {raw:?} to {target} for parameter {param:?}")]
pub struct TypeConversionError {
	pub param: String,
	pub raw: String,
	pub target: String,
}

/// Errors that can occur while building or mutating a route collection.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
	#[error("cannot add an endpoint to a frozen route collection")]
	CollectionFrozen,
}
