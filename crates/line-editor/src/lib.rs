//! An Emacs/Vi/VSCode-configurable line editor for interactive CLIs.
//!
//! Ties together a grapheme-aware text buffer, snapshot-based undo, a
//! bounded kill ring, word motions, tab completion, and incremental history
//! search behind a single [`Editor::read_line`] entry point driven by a
//! [`wf_keymap::Profile`].

mod buffer;
mod completion;
mod editor;
mod kill_ring;
mod motion;
mod search;
mod undo;

pub use buffer::{EditorBuffer, Snapshot};
pub use completion::{Candidate, CompletionSource, MenuCompleteState, current_token_range};
pub use editor::{Editor, EditorEvent};
pub use kill_ring::{DEFAULT_CAPACITY, KillRing};
pub use motion::{backward_word, forward_word, word_end};
pub use search::{SearchDirection, SearchState, search};
pub use undo::{MAX_UNDO, UndoStack};
