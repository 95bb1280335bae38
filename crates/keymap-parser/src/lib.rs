//! Key-chord lexer and parser.
//!
//! Parses key-chord strings into structured [`Node`]s. Grammar:
//!
//! ```text
//! node      = modifiers* key
//! modifiers = modifier "+"
//! modifier  = "ctrl" | "alt" | "shift"
//! key       = fn-key | named-key | group | char
//! fn-key    = "f" digit digit?
//! named-key = "enter" | "escape" | "tab" | "backspace" | "delete" | ...
//! group     = "@" ("digit" | "lower" | "upper" | "alnum" | "alpha" | "any")
//! char      = ascii-char
//! ```
//!
//! # Examples
//!
//! ```
//! use wf_keymap_parser::{parse, Node, Key, Modifier};
//!
//! let node = parse("Ctrl+a").unwrap();
//! assert_eq!(node, Node::new(Modifier::Ctrl as u8, Key::Char('a')));
//! ```

pub mod node;
pub mod parser;

pub use node::{CharGroup, Key, Modifier, Modifiers, Node};
pub use parser::{ParseError, parse, parse_seq};
