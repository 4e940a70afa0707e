//! Where frames go: an inline terminal region, a test buffer, or nowhere.

use std::io::{self, Stderr};

use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use ratatui::crossterm::{cursor, execute, terminal};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};
use tracing::debug;

/// A target that can repaint a frame in place.
pub trait Surface {
	/// Render one frame.
	fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()>;

	/// Erase everything this surface has drawn.
	fn clear(&mut self) -> io::Result<()>;
}

/// Raw mode plus bracketed paste. Restores cooked mode and the cursor when
/// dropped.
struct RawMode;

impl RawMode {
	fn enable() -> io::Result<Self> {
		terminal::enable_raw_mode()?;
		let mode = Self;
		execute!(io::stderr(), EnableBracketedPaste)?;
		Ok(mode)
	}
}

impl Drop for RawMode {
	fn drop(&mut self) {
		if let Err(error) = terminal::disable_raw_mode() {
			debug!(%error, "failed to disable raw mode");
		}
		let _ = execute!(io::stderr(), DisableBracketedPaste, cursor::Show);
	}
}

/// Leave raw mode and show the cursor without going through a surface. For
/// panic hooks, which run while a surface may still be alive.
pub fn restore_terminal() {
	let _ = terminal::disable_raw_mode();
	let _ = execute!(io::stderr(), DisableBracketedPaste, cursor::Show);
}

/// Frames drawn through a ratatui [`Terminal`].
pub struct TerminalSurface<B: Backend> {
	terminal: Terminal<B>,
	_raw_mode: Option<RawMode>,
}

impl TerminalSurface<CrosstermBackend<Stderr>> {
	/// Claim `height` rows below the cursor on stderr and switch to raw mode.
	///
	/// Stdout is left untouched so it can carry the command's result.
	pub fn inline(height: u16) -> io::Result<Self> {
		let raw_mode = RawMode::enable()?;
		let backend = CrosstermBackend::new(io::stderr());
		let terminal = Terminal::with_options(
			backend,
			TerminalOptions {
				viewport: Viewport::Inline(height),
			},
		)?;
		Ok(Self {
			terminal,
			_raw_mode: Some(raw_mode),
		})
	}
}

impl<B: Backend> TerminalSurface<B> {
	/// Wrap an existing terminal without touching terminal modes.
	pub fn new(terminal: Terminal<B>) -> Self {
		Self {
			terminal,
			_raw_mode: None,
		}
	}

	pub fn backend(&self) -> &B {
		self.terminal.backend()
	}

	pub fn backend_mut(&mut self) -> &mut B {
		self.terminal.backend_mut()
	}
}

impl<B: Backend> Surface for TerminalSurface<B> {
	fn draw(&mut self, render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
		self.terminal.draw(|frame| render(frame))?;
		Ok(())
	}

	fn clear(&mut self) -> io::Result<()> {
		self.terminal.clear()
	}
}

/// Surface for runs without a terminal. Nothing is drawn.
#[derive(Debug, Default)]
pub struct Headless;

impl Surface for Headless {
	fn draw(&mut self, _render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
		Ok(())
	}

	fn clear(&mut self) -> io::Result<()> {
		Ok(())
	}
}
