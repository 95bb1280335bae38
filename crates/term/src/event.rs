use std::fmt;

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Whether Ctrl is held.
	pub ctrl: bool,
	/// Whether Alt is held.
	pub alt: bool,
	/// Whether Shift is held.
	pub shift: bool,
}

impl Modifiers {
	/// No modifiers held.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	/// Whether no modifiers are held.
	pub fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift
	}
}

/// The key that was pressed, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character.
	Char(char),
	/// A function key, `F(1)` through `F(35)`.
	F(u8),
	Enter,
	Escape,
	Tab,
	Backspace,
	Delete,
	Insert,
	Home,
	End,
	PageUp,
	PageDown,
	Up,
	Down,
	Left,
	Right,
}

impl fmt::Display for KeyCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KeyCode::Char(c) => write!(f, "{c}"),
			KeyCode::F(n) => write!(f, "F{n}"),
			KeyCode::Enter => write!(f, "Enter"),
			KeyCode::Escape => write!(f, "Escape"),
			KeyCode::Tab => write!(f, "Tab"),
			KeyCode::Backspace => write!(f, "Backspace"),
			KeyCode::Delete => write!(f, "Delete"),
			KeyCode::Insert => write!(f, "Insert"),
			KeyCode::Home => write!(f, "Home"),
			KeyCode::End => write!(f, "End"),
			KeyCode::PageUp => write!(f, "PageUp"),
			KeyCode::PageDown => write!(f, "PageDown"),
			KeyCode::Up => write!(f, "Up"),
			KeyCode::Down => write!(f, "Down"),
			KeyCode::Left => write!(f, "Left"),
			KeyCode::Right => write!(f, "Right"),
		}
	}
}

/// A single key press with its active modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
	/// The key pressed.
	pub code: KeyCode,
	/// Active modifiers.
	pub modifiers: Modifiers,
}

impl KeyEvent {
	/// Creates a key event with no modifiers.
	pub fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Returns the digit this key represents, if it's an unmodified digit
	/// character. Used for `DigitArgument` prefix counts.
	pub fn as_digit(&self) -> Option<u32> {
		if self.modifiers.is_empty() {
			if let KeyCode::Char(c) = self.code {
				return c.to_digit(10);
			}
		}
		None
	}
}
