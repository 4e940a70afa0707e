//! Multi-line text editor.

use std::time::Duration;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use tui_textarea::{CursorMove, Input, TextArea};

use crate::components::CharLimit;
use crate::event::Event;
use crate::runtime::{Component, Context, ExitReason, Transition};
use crate::style::Theme;

#[derive(Clone, Debug)]
pub struct WriteOptions {
	pub placeholder: String,
	pub value: String,
	/// Visible lines.
	pub height: u16,
	pub char_limit: CharLimit,
	pub line_numbers: bool,
	pub timeout: Option<Duration>,
	pub theme: Theme,
}

impl Default for WriteOptions {
	fn default() -> Self {
		Self {
			placeholder: "Write something...".into(),
			value: String::new(),
			height: 5,
			char_limit: CharLimit::NONE,
			line_numbers: false,
			timeout: None,
			theme: Theme::default(),
		}
	}
}

pub struct WriteSession {
	options: WriteOptions,
	editor: TextArea<'static>,
	timed_out: bool,
}

impl WriteSession {
	#[must_use]
	pub fn new(options: WriteOptions) -> Self {
		let value = options.char_limit.clip(&[], &options.value);
		let lines: Vec<String> = value.lines().map(String::from).collect();
		let mut editor = if lines.is_empty() {
			TextArea::default()
		} else {
			TextArea::new(lines)
		};
		editor.set_placeholder_text(options.placeholder.as_str());
		editor.set_placeholder_style(options.theme.empty_style());
		editor.set_cursor_line_style(Style::default());
		if options.line_numbers {
			editor.set_line_number_style(options.theme.muted);
		}
		editor.move_cursor(CursorMove::Bottom);
		editor.move_cursor(CursorMove::End);

		Self {
			options,
			editor,
			timed_out: false,
		}
	}

	#[must_use]
	pub fn height(&self) -> u16 {
		self.options.height.max(1)
	}

	/// The text entered so far, lines joined with `\n`.
	#[must_use]
	pub fn value(&self) -> String {
		self.editor.lines().join("\n")
	}

	#[must_use]
	pub fn timed_out(&self) -> bool {
		self.timed_out
	}

	fn on_key(&mut self, key: &KeyEvent) -> Transition {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);
		match key.code {
			KeyCode::Esc => Transition::Exit(ExitReason::Cancelled),
			KeyCode::Char('d') if ctrl => Transition::Exit(ExitReason::Submitted),
			KeyCode::Enter if alt => Transition::Exit(ExitReason::Submitted),
			_ if !self.options.char_limit.admits(self.editor.lines(), key) => Transition::Continue,
			_ => {
				self.editor.input(Input::from(*key));
				Transition::Redraw
			}
		}
	}

	fn on_paste(&mut self, text: &str) -> Transition {
		let text = text.replace("\r\n", "\n").replace('\r', "\n");
		let clipped = self.options.char_limit.clip(self.editor.lines(), &text).to_string();
		if self.editor.insert_str(clipped) {
			Transition::Redraw
		} else {
			Transition::Continue
		}
	}
}

impl Component for WriteSession {
	fn init(&mut self, _cx: &mut Context) -> anyhow::Result<Transition> {
		Ok(Transition::Redraw)
	}

	fn update(&mut self, event: &Event, cx: &mut Context) -> anyhow::Result<Transition> {
		Ok(match event {
			Event::Key(key) => self.on_key(key),
			Event::Paste(text) => self.on_paste(text),
			Event::Interrupt => Transition::Exit(ExitReason::Cancelled),
			Event::Tick if self.options.timeout.is_some_and(|timeout| cx.elapsed() >= timeout) => {
				self.timed_out = true;
				Transition::Exit(ExitReason::Cancelled)
			}
			Event::Tick | Event::Resize(..) | Event::Task(_) => Transition::Continue,
		})
	}

	fn render(&self, frame: &mut Frame<'_>) {
		frame.render_widget(&self.editor, frame.area());
	}
}

#[cfg(test)]
mod tests {
	use ratatui::crossterm::event::KeyCode;

	use super::*;
	use crate::event::EventSource;
	use crate::runtime::{Finished, Runtime};
	use crate::testing::{Recording, ctrl, key, render_rows, slow_ticks, typed};

	fn run(options: WriteOptions, events: Vec<Event>) -> Finished<WriteSession> {
		let queue = slow_ticks();
		let tx = queue.sender();
		for event in events {
			tx.send(event);
		}
		Runtime::new(Recording::default(), queue)
			.run(WriteSession::new(options))
			.unwrap()
	}

	#[test]
	fn enter_breaks_lines_and_ctrl_d_submits() {
		let mut events = typed("first");
		events.push(key(KeyCode::Enter));
		events.extend(typed("second"));
		events.push(ctrl('d'));
		let finished = run(WriteOptions::default(), events);

		assert_eq!(finished.reason, ExitReason::Submitted);
		assert_eq!(finished.session.state.value(), "first\nsecond");
	}

	#[test]
	fn alt_enter_submits() {
		let mut events = typed("note");
		events.push(Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)));
		let finished = run(WriteOptions::default(), events);

		assert_eq!(finished.reason, ExitReason::Submitted);
		assert_eq!(finished.session.state.value(), "note");
	}

	#[test]
	fn escape_cancels() {
		let finished = run(WriteOptions::default(), vec![key(KeyCode::Esc)]);
		assert_eq!(finished.reason, ExitReason::Cancelled);
	}

	#[test]
	fn initial_value_keeps_its_lines() {
		let options = WriteOptions {
			value: "one\ntwo".into(),
			..WriteOptions::default()
		};
		let session = WriteSession::new(options);
		assert_eq!(session.value(), "one\ntwo");
		assert_eq!(render_rows(&session, 10, 3), ["one", "two", ""]);
	}

	#[test]
	fn paste_keeps_line_breaks_within_the_limit() {
		let options = WriteOptions {
			char_limit: CharLimit::new(7),
			..WriteOptions::default()
		};
		let events = vec![Event::Paste("ab\r\ncd\nefgh".into()), key(KeyCode::Char('z')), ctrl('d')];
		let finished = run(options, events);

		assert_eq!(finished.session.state.value(), "ab\ncd\ne");
	}

	#[test]
	fn line_numbers_prefix_each_line() {
		let options = WriteOptions {
			value: "alpha\nbeta".into(),
			line_numbers: true,
			..WriteOptions::default()
		};
		let rows = render_rows(&WriteSession::new(options), 20, 2);
		assert!(rows[0].contains('1') && rows[0].ends_with("alpha"), "{rows:?}");
		assert!(rows[1].contains('2') && rows[1].ends_with("beta"), "{rows:?}");
	}
}
