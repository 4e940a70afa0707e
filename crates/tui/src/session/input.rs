//! Single-line text prompt.

use std::time::Duration;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Style;
use tui_textarea::{CursorMove, Input, TextArea};

use crate::components::{CharLimit, PromptContext, render_prompt};
use crate::event::Event;
use crate::runtime::{Component, Context, ExitReason, Transition};
use crate::style::Theme;

#[derive(Clone, Debug)]
pub struct InputOptions {
	pub prompt: String,
	pub placeholder: String,
	pub value: String,
	pub char_limit: CharLimit,
	/// Replace every typed character with `*` on screen.
	pub password: bool,
	pub timeout: Option<Duration>,
	pub theme: Theme,
}

impl Default for InputOptions {
	fn default() -> Self {
		Self {
			prompt: "> ".into(),
			placeholder: "Type something...".into(),
			value: String::new(),
			char_limit: CharLimit::new(400),
			password: false,
			timeout: None,
			theme: Theme::default(),
		}
	}
}

pub struct InputSession {
	options: InputOptions,
	input: TextArea<'static>,
	timed_out: bool,
}

impl InputSession {
	#[must_use]
	pub fn new(options: InputOptions) -> Self {
		let value: String = options.value.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect();
		let value = options.char_limit.clip(&[], &value).to_string();
		let mut input = TextArea::new(vec![value]);
		input.set_placeholder_text(options.placeholder.as_str());
		input.set_placeholder_style(options.theme.empty_style());
		input.set_cursor_line_style(Style::default());
		if options.password {
			input.set_mask_char('*');
		}
		input.move_cursor(CursorMove::End);

		Self {
			options,
			input,
			timed_out: false,
		}
	}

	/// The text entered so far.
	#[must_use]
	pub fn value(&self) -> &str {
		self.input.lines().first().map_or("", String::as_str)
	}

	#[must_use]
	pub fn timed_out(&self) -> bool {
		self.timed_out
	}

	fn on_key(&mut self, key: &KeyEvent) -> Transition {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Esc => Transition::Exit(ExitReason::Cancelled),
			KeyCode::Enter => Transition::Exit(ExitReason::Submitted),
			KeyCode::Char('m') if ctrl => Transition::Exit(ExitReason::Submitted),
			KeyCode::Char('j') if ctrl => Transition::Continue,
			_ if !self.options.char_limit.admits(self.input.lines(), key) => Transition::Continue,
			_ => {
				self.input.input(Input::from(*key));
				Transition::Redraw
			}
		}
	}

	fn on_paste(&mut self, text: &str) -> Transition {
		let line: String = text.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect();
		let clipped = self.options.char_limit.clip(self.input.lines(), &line).to_string();
		if self.input.insert_str(clipped) {
			Transition::Redraw
		} else {
			Transition::Continue
		}
	}
}

impl Component for InputSession {
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
		render_prompt(
			frame,
			PromptContext {
				prompt: &self.options.prompt,
				input: &self.input,
				status: None,
				area: frame.area(),
				theme: &self.options.theme,
			},
		);
	}
}
