//! Build-time errors surfaced by [`crate::builder::Cli::build`].

use thiserror::Error;

/// Everything that can go wrong assembling an [`crate::App`] before it ever
/// sees argv.
#[derive(Debug, Error)]
pub enum BuildError {
	#[error("route {pattern:?}: {source}")]
	Pattern { pattern: String, source: wf_pattern::PatternError },
	#[error("keymap profile: {0}")]
	Keymap(#[from] wf_keymap::Error),
	#[error(transparent)]
	Collection(#[from] wf_routing::CollectionError),
}
