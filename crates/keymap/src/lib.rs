//! Key-binding profiles for the line editor.
//!
//! Provides the fixed [`ActionName`] registry, [`Profile`] composition
//! (base + removals + overrides + additions), and a trie-based [`Matcher`]
//! for resolving key-chord sequences to actions.

mod actions;
mod matcher;
mod profile;

pub use actions::{ACTION_NAMES, ActionName};
pub use matcher::{ContinuationKind, MatchResult, Matcher};
pub use profile::{Error, NamedProfile, Profile, ProfileBuilder};
pub use wf_keymap_parser::{Key, Modifier, Node, parse_seq};
