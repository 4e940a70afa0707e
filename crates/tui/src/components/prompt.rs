use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthStr;

use crate::style::Theme;

/// Argument bundle for rendering an input row.
pub struct PromptContext<'a> {
	/// Text in front of the input, such as `"> "`.
	pub prompt: &'a str,
	/// The editable input. Its own placeholder shows when it is empty.
	pub input: &'a TextArea<'static>,
	/// Right-aligned status, such as a match count.
	pub status: Option<&'a str>,
	pub area: Rect,
	pub theme: &'a Theme,
}

/// Render the prompt, the input and an optional status on one row.
pub fn render_prompt(frame: &mut Frame<'_>, ctx: PromptContext<'_>) {
	let PromptContext {
		prompt,
		input,
		status,
		area,
		theme,
	} = ctx;
	if area.width == 0 || area.height == 0 {
		return;
	}

	let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX).min(area.width);
	let prompt_area = Rect {
		width: prompt_width,
		height: 1,
		..area
	};
	frame.render_widget(Line::from(Span::styled(prompt, theme.prompt)), prompt_area);

	let input_area = Rect {
		x: area.x + prompt_width,
		width: area.width - prompt_width,
		height: 1,
		..area
	};
	frame.render_widget(input, input_area);

	if let Some(status) = status {
		render_status(frame, input_area, status, theme);
	}
}

/// Right-align `text` on the first row of `area`, keeping clear of whatever
/// is already drawn there.
fn render_status(frame: &mut Frame<'_>, area: Rect, text: &str, theme: &Theme) {
	if area.width == 0 || text.is_empty() {
		return;
	}

	let line = Line::from(Span::styled(text.to_string(), theme.empty_style()));
	let line_width = u16::try_from(line.width()).unwrap_or(u16::MAX);
	let buffer = frame.buffer_mut();
	let row = area.top();

	let mut start_x = area.right().saturating_sub(line_width).max(area.left());
	let last_used = (area.left()..area.right())
		.rev()
		.find(|&x| buffer.cell((x, row)).is_some_and(|cell| !cell.symbol().trim().is_empty()));
	if let Some(last_x) = last_used {
		start_x = start_x.max(last_x.saturating_add(3));
	}
	if start_x.saturating_add(line_width) > area.right() {
		return;
	}

	buffer.set_line(start_x, row, &line, line_width);
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;

	fn render(value: &str, status: Option<&str>, width: u16) -> String {
		let mut input = TextArea::new(vec![value.to_string()]);
		input.set_placeholder_text("Search...");
		let theme = Theme::default();
		let mut terminal = Terminal::new(TestBackend::new(width, 1)).unwrap();
		terminal
			.draw(|frame| {
				let area = frame.area();
				render_prompt(
					frame,
					PromptContext {
						prompt: "> ",
						input: &input,
						status,
						area,
						theme: &theme,
					},
				);
			})
			.unwrap();
		let buffer = terminal.backend().buffer();
		(0..width)
			.map(|x| buffer[(x, 0)].symbol())
			.collect::<String>()
			.trim_end()
			.to_string()
	}

	#[test]
	fn shows_prompt_value_and_status() {
		assert_eq!(render("abc", Some("2/10"), 20), "> abc           2/10");
	}

	#[test]
	fn empty_input_shows_placeholder() {
		assert_eq!(render("", None, 20), "> Search...");
	}

	#[test]
	fn status_is_hidden_when_it_would_touch_the_input() {
		assert_eq!(render("abcdefghijkl", Some("9/9"), 18), "> abcdefghijkl");
	}
}
