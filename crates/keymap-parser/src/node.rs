//! Key and modifier types for parsed key-chords.

use std::fmt;
use std::str::FromStr;

/// Separator between a modifier name and the rest of a chord (`Ctrl+x`).
pub const KEY_SEP: char = '+';

/// A single modifier bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
	/// Control key held.
	Ctrl = 0b001,
	/// Alt/Option key held.
	Alt = 0b010,
	/// Shift key held.
	Shift = 0b100,
}

impl FromStr for Modifier {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"ctrl" | "control" => Ok(Modifier::Ctrl),
			"alt" | "opt" | "option" => Ok(Modifier::Alt),
			"shift" => Ok(Modifier::Shift),
			_ => Err(()),
		}
	}
}

/// A bitset of active [`Modifier`]s.
pub type Modifiers = u8;

/// A character class usable in a key pattern (`@digit`, `@any`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharGroup {
	/// ASCII digits `0`-`9`.
	Digit,
	/// ASCII lowercase letters.
	Lower,
	/// ASCII uppercase letters.
	Upper,
	/// ASCII letters or digits.
	Alnum,
	/// ASCII letters.
	Alpha,
	/// Any character.
	Any,
}

impl CharGroup {
	/// Returns whether `ch` belongs to this group.
	pub fn matches(self, ch: char) -> bool {
		match self {
			CharGroup::Digit => ch.is_ascii_digit(),
			CharGroup::Lower => ch.is_ascii_lowercase(),
			CharGroup::Upper => ch.is_ascii_uppercase(),
			CharGroup::Alnum => ch.is_ascii_alphanumeric(),
			CharGroup::Alpha => ch.is_ascii_alphabetic(),
			CharGroup::Any => true,
		}
	}
}

impl FromStr for CharGroup {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"digit" => Ok(CharGroup::Digit),
			"lower" => Ok(CharGroup::Lower),
			"upper" => Ok(CharGroup::Upper),
			"alnum" => Ok(CharGroup::Alnum),
			"alpha" => Ok(CharGroup::Alpha),
			"any" => Ok(CharGroup::Any),
			_ => Err(()),
		}
	}
}

impl fmt::Display for CharGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			CharGroup::Digit => "digit",
			CharGroup::Lower => "lower",
			CharGroup::Upper => "upper",
			CharGroup::Alnum => "alnum",
			CharGroup::Alpha => "alpha",
			CharGroup::Any => "any",
		};
		write!(f, "@{name}")
	}
}

/// A named, non-printable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	/// A single printable character.
	Char(char),
	/// A function key, `F(1)` through `F(35)`.
	F(u8),
	/// A character group pattern.
	Group(CharGroup),
	/// Enter / Return.
	Enter,
	/// Escape.
	Escape,
	/// Tab.
	Tab,
	/// Backspace.
	Backspace,
	/// Delete (forward delete).
	Delete,
	/// Insert.
	Insert,
	/// Home.
	Home,
	/// End.
	End,
	/// Page Up.
	PageUp,
	/// Page Down.
	PageDown,
	/// Up arrow.
	Up,
	/// Down arrow.
	Down,
	/// Left arrow.
	Left,
	/// Right arrow.
	Right,
}

impl FromStr for Key {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"enter" | "return" => Ok(Key::Enter),
			"escape" | "esc" => Ok(Key::Escape),
			"tab" => Ok(Key::Tab),
			"backspace" | "bs" => Ok(Key::Backspace),
			"delete" | "del" => Ok(Key::Delete),
			"insert" | "ins" => Ok(Key::Insert),
			"home" => Ok(Key::Home),
			"end" => Ok(Key::End),
			"pageup" | "pgup" => Ok(Key::PageUp),
			"pagedown" | "pgdn" => Ok(Key::PageDown),
			"up" => Ok(Key::Up),
			"down" => Ok(Key::Down),
			"left" => Ok(Key::Left),
			"right" => Ok(Key::Right),
			_ => Err(()),
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Char(c) => write!(f, "{c}"),
			Key::F(n) => write!(f, "f{n}"),
			Key::Group(g) => write!(f, "{g}"),
			Key::Enter => write!(f, "enter"),
			Key::Escape => write!(f, "escape"),
			Key::Tab => write!(f, "tab"),
			Key::Backspace => write!(f, "backspace"),
			Key::Delete => write!(f, "delete"),
			Key::Insert => write!(f, "insert"),
			Key::Home => write!(f, "home"),
			Key::End => write!(f, "end"),
			Key::PageUp => write!(f, "pageup"),
			Key::PageDown => write!(f, "pagedown"),
			Key::Up => write!(f, "up"),
			Key::Down => write!(f, "down"),
			Key::Left => write!(f, "left"),
			Key::Right => write!(f, "right"),
		}
	}
}

/// A parsed key-chord: a key plus a modifier bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
	/// Active modifier bits (see [`Modifier`]).
	pub modifiers: Modifiers,
	/// The key pressed.
	pub key: Key,
}

impl Node {
	/// Creates a new node from a modifier bitset and a key.
	pub fn new(modifiers: Modifiers, key: Key) -> Self {
		Self { modifiers, key }
	}
}

impl From<Key> for Node {
	fn from(key: Key) -> Self {
		Self { modifiers: 0, key }
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers & (Modifier::Ctrl as u8) != 0 {
			write!(f, "Ctrl+")?;
		}
		if self.modifiers & (Modifier::Alt as u8) != 0 {
			write!(f, "Alt+")?;
		}
		if self.modifiers & (Modifier::Shift as u8) != 0 {
			write!(f, "Shift+")?;
		}
		write!(f, "{}", self.key)
	}
}
