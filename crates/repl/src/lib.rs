//! The interactive REPL loop (spec §4.L): prompt rendering via
//! [`wf_line_editor`], a POSIX-ish argv tokenizer, built-in commands
//! checked ahead of the resolver, and dispatch through [`wf_routing`].

mod builtins;
mod loop_;
mod tokenize;

pub use builtins::{Builtin, DefaultHelpRenderer, HelpRenderer, render_history};
pub use loop_::{Repl, ReplConfig, ReplError};
pub use tokenize::{TokenizeError, strip_continuation, tokenize, wants_continuation};
