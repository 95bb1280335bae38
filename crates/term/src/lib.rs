//! Terminal abstraction used by the line editor.
//!
//! This crate is deliberately narrow: it exposes only what [`wf_line_editor`]
//! needs to render a prompt and read keys, and nothing else. A concrete
//! backend lives behind the `termina-backend` feature; callers embedding the
//! editor in a different host (a test harness, a non-interactive pipe) can
//! implement [`Terminal`] themselves instead.

mod color;
mod event;

#[cfg(feature = "termina-backend")]
mod backend;

pub use color::Color;
pub use event::{KeyCode, KeyEvent, Modifiers};

#[cfg(feature = "termina-backend")]
pub use backend::TerminaTerminal;

/// Error reading from or writing to a terminal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The underlying I/O operation failed.
	#[error("terminal I/O error: {0}")]
	Io(#[from] std::io::Error),
	/// `readKey` was interrupted by a cancellation signal before a key
	/// arrived.
	#[error("read cancelled")]
	Cancelled,
}

/// A cursor-aware, color-capable sink/source for the line editor.
///
/// Implementations must not block indefinitely: [`Terminal::read_key`] is
/// the editor's only blocking point and must return [`Error::Cancelled`]
/// promptly once asked to.
pub trait Terminal {
	/// Current terminal width in columns.
	fn width(&self) -> u16;

	/// Current terminal height in rows.
	fn height(&self) -> u16;

	/// Whether the terminal supports ANSI color output.
	fn supports_color(&self) -> bool;

	/// Whether the terminal supports OSC-8 hyperlinks.
	fn supports_hyperlinks(&self) -> bool;

	/// Blocks until a key event arrives, or returns [`Error::Cancelled`] if
	/// `should_cancel` starts returning `true` while waiting.
	fn read_key(&mut self, should_cancel: &dyn Fn() -> bool) -> Result<KeyEvent, Error>;

	/// Writes text at the current cursor position without interpreting it.
	fn write(&mut self, text: &str) -> Result<(), Error>;

	/// Moves the cursor to an absolute `(row, col)`, both 0-indexed.
	fn move_cursor(&mut self, row: u16, col: u16) -> Result<(), Error>;

	/// Clears the current line.
	fn clear_line(&mut self) -> Result<(), Error>;

	/// Clears the entire screen.
	fn clear_screen(&mut self) -> Result<(), Error>;

	/// Sets foreground/background color for subsequent writes.
	fn set_color(&mut self, fg: Option<Color>, bg: Option<Color>) -> Result<(), Error>;

	/// Resets all styling to the terminal default.
	fn reset_style(&mut self) -> Result<(), Error>;

	/// Flushes any buffered output.
	fn flush(&mut self) -> Result<(), Error>;
}
