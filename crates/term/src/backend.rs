//! `termina`-backed [`Terminal`] implementation.
//!
//! Polls in short timeout slices rather than blocking indefinitely on
//! `read`, so `read_key` can notice a cancellation signal promptly.

use std::io::Write as _;
use std::time::Duration;

use termina::escape::csi::{Csi, Cursor, Edit, EraseInDisplay, EraseInLine};
use termina::event::{Event, KeyCode as TmKeyCode, KeyEventKind, Modifiers as TmModifiers};
use termina::style::{ColorSpec, RgbColor};
use termina::{PlatformTerminal, Terminal as _};

use crate::{Color, Error, KeyCode, KeyEvent, Modifiers, Terminal};

const POLL_SLICE: Duration = Duration::from_millis(25);

/// A [`Terminal`] backed by a real TTY via the `termina` crate.
pub struct TerminaTerminal {
	terminal: PlatformTerminal,
}

impl TerminaTerminal {
	/// Opens the current process's controlling terminal in raw mode.
	pub fn open() -> Result<Self, Error> {
		let terminal = PlatformTerminal::new()?;
		Ok(Self { terminal })
	}
}

impl Terminal for TerminaTerminal {
	fn width(&self) -> u16 {
		self.terminal.size().map(|s| s.cols).unwrap_or(80)
	}

	fn height(&self) -> u16 {
		self.terminal.size().map(|s| s.rows).unwrap_or(24)
	}

	fn supports_color(&self) -> bool {
		true
	}

	fn supports_hyperlinks(&self) -> bool {
		false
	}

	fn read_key(&mut self, should_cancel: &dyn Fn() -> bool) -> Result<KeyEvent, Error> {
		let events = self.terminal.event_reader();
		let mut filter = |e: &Event| matches!(e, Event::Key(_));

		loop {
			if should_cancel() {
				return Err(Error::Cancelled);
			}
			if events.poll(Some(POLL_SLICE), &mut filter)? {
				if let Event::Key(key) = events.read(&mut filter)? {
					if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
						return Ok(convert_key(key));
					}
				}
			}
		}
	}

	fn write(&mut self, text: &str) -> Result<(), Error> {
		self.terminal.write_all(text.as_bytes())?;
		Ok(())
	}

	fn move_cursor(&mut self, row: u16, col: u16) -> Result<(), Error> {
		write!(self.terminal, "{}", Csi::Cursor(Cursor::Position { line: row + 1, col: col + 1 }))?;
		Ok(())
	}

	fn clear_line(&mut self) -> Result<(), Error> {
		write!(self.terminal, "{}", Csi::Edit(Edit::EraseInLine(EraseInLine::EraseLine)))?;
		Ok(())
	}

	fn clear_screen(&mut self) -> Result<(), Error> {
		write!(self.terminal, "{}", Csi::Edit(Edit::EraseInDisplay(EraseInDisplay::EraseDisplay)))?;
		Ok(())
	}

	fn set_color(&mut self, fg: Option<Color>, bg: Option<Color>) -> Result<(), Error> {
		if let Some(fg) = fg {
			write!(self.terminal, "{}", Csi::Sgr(termina::escape::csi::Sgr::Foreground(to_color_spec(fg))))?;
		}
		if let Some(bg) = bg {
			write!(self.terminal, "{}", Csi::Sgr(termina::escape::csi::Sgr::Background(to_color_spec(bg))))?;
		}
		Ok(())
	}

	fn reset_style(&mut self) -> Result<(), Error> {
		write!(self.terminal, "{}", Csi::Sgr(termina::escape::csi::Sgr::Reset))?;
		Ok(())
	}

	fn flush(&mut self) -> Result<(), Error> {
		self.terminal.flush()?;
		Ok(())
	}
}

fn to_color_spec(color: Color) -> ColorSpec {
	match color {
		Color::Rgb(r, g, b) => ColorSpec::TrueColor(RgbColor::new(r, g, b)),
		named => ColorSpec::PaletteIndex(ansi_index(named)),
	}
}

fn ansi_index(color: Color) -> u8 {
	match color {
		Color::Black => 0,
		Color::Red => 1,
		Color::Green => 2,
		Color::Yellow => 3,
		Color::Blue => 4,
		Color::Magenta => 5,
		Color::Cyan => 6,
		Color::White => 7,
		Color::BrightBlack => 8,
		Color::BrightRed => 9,
		Color::BrightGreen => 10,
		Color::BrightYellow => 11,
		Color::BrightBlue => 12,
		Color::BrightMagenta => 13,
		Color::BrightCyan => 14,
		Color::BrightWhite => 15,
		Color::Rgb(..) => unreachable!("handled by to_color_spec before calling ansi_index"),
	}
}

fn convert_key(event: termina::event::KeyEvent) -> KeyEvent {
	let modifiers = Modifiers {
		ctrl: event.modifiers.contains(TmModifiers::CONTROL),
		alt: event.modifiers.contains(TmModifiers::ALT),
		shift: event.modifiers.contains(TmModifiers::SHIFT),
	};

	let code = match event.code {
		TmKeyCode::Char(c) => KeyCode::Char(c),
		TmKeyCode::Escape => KeyCode::Escape,
		TmKeyCode::Enter => KeyCode::Enter,
		TmKeyCode::Tab => KeyCode::Tab,
		TmKeyCode::Backspace => KeyCode::Backspace,
		TmKeyCode::Delete => KeyCode::Delete,
		TmKeyCode::Insert => KeyCode::Insert,
		TmKeyCode::Home => KeyCode::Home,
		TmKeyCode::End => KeyCode::End,
		TmKeyCode::PageUp => KeyCode::PageUp,
		TmKeyCode::PageDown => KeyCode::PageDown,
		TmKeyCode::Up => KeyCode::Up,
		TmKeyCode::Down => KeyCode::Down,
		TmKeyCode::Left => KeyCode::Left,
		TmKeyCode::Right => KeyCode::Right,
		TmKeyCode::Function(n) => KeyCode::F(n),
		_ => KeyCode::Char('\0'),
	};

	KeyEvent { code, modifiers }
}
