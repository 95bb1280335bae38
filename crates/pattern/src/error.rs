use thiserror::Error;

/// Errors raised while lexing, parsing, or compiling a route pattern.
///
/// All variants are fatal at build time: a pattern that fails any of these
/// checks never reaches the route collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
	/// The pattern string could not be tokenized or parsed.
	#[error("pattern syntax error at byte {offset}: {message}")]
	PatternSyntax {
		/// Byte offset into the original pattern where the error was detected.
		offset: usize,
		/// Human-readable description of what went wrong.
		message: String,
	},

	/// More than one catch-all was declared, or it wasn't the last positional.
	#[error("catch-all parameter {name:?} must be the last positional segment")]
	CatchAllMustBeLast {
		/// Name of the offending catch-all parameter.
		name: String,
	},

	/// A short option form was not exactly one character.
	#[error("short option form {0:?} must be exactly one character")]
	BadShortForm(String),

	/// The same parameter name was declared more than once in a pattern.
	#[error("duplicate parameter name {0:?}")]
	DuplicateParameterName(String),

	/// A catch-all parameter was marked optional (`{*name?}`), which isn't
	/// meaningful: catch-alls already accept zero remaining tokens.
	#[error("catch-all parameter {0:?} cannot be marked optional")]
	CatchAllCannotBeOptional(String),

	/// Two options in the same pattern declared the same long form.
	#[error("duplicate option long form {0:?}")]
	DuplicateOptionName(String),
}

impl PatternError {
	pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
		Self::PatternSyntax {
			offset,
			message: message.into(),
		}
	}
}
