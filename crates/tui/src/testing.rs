//! Helpers shared by the unit tests.

use std::io;
use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, Terminal};

use crate::event::{Event, QueuedEvents};
use crate::runtime::Component;
use crate::surface::Surface;

/// Surface that counts calls instead of drawing.
#[derive(Debug, Default)]
pub(crate) struct Recording {
	pub(crate) draws: usize,
	pub(crate) clears: usize,
}

impl Surface for Recording {
	fn draw(&mut self, _render: &mut dyn FnMut(&mut Frame<'_>)) -> io::Result<()> {
		self.draws += 1;
		Ok(())
	}

	fn clear(&mut self) -> io::Result<()> {
		self.clears += 1;
		Ok(())
	}
}

pub(crate) fn fast_ticks() -> QueuedEvents {
	QueuedEvents::new(Duration::from_millis(10))
}

pub(crate) fn slow_ticks() -> QueuedEvents {
	QueuedEvents::new(Duration::from_secs(3600))
}

pub(crate) fn key(code: KeyCode) -> Event {
	Event::Key(KeyEvent::from(code))
}

pub(crate) fn ctrl(ch: char) -> Event {
	Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}

pub(crate) fn typed(text: &str) -> Vec<Event> {
	text.chars().map(|ch| key(KeyCode::Char(ch))).collect()
}

/// Render `component` into a fresh buffer and return its rows, trailing
/// blanks trimmed.
pub(crate) fn render_rows<C: Component>(component: &C, width: u16, height: u16) -> Vec<String> {
	let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
	terminal.draw(|frame| component.render(frame)).unwrap();
	buffer_rows(terminal.backend().buffer())
}

pub(crate) fn buffer_rows(buffer: &Buffer) -> Vec<String> {
	(0..buffer.area.height)
		.map(|y| {
			(0..buffer.area.width)
				.map(|x| buffer[(x, y)].symbol())
				.collect::<String>()
				.trim_end()
				.to_string()
		})
		.collect()
}

pub(crate) fn snapshot<C: Component>(component: &C, width: u16, height: u16) -> String {
	render_rows(component, width, height).join("\n")
}
