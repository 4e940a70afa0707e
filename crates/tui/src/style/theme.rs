use ratatui::style::{Color, Modifier, Style};

/// Styles for every element the sessions render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	/// Prompt in front of an input line.
	pub prompt: Style,
	/// Placeholders, counters and other muted text.
	pub muted: Style,
	/// Matched characters in search results.
	pub highlight: Style,
	/// The row under the cursor.
	pub cursor: Style,
	/// Markers of selected rows.
	pub selected: Style,
	/// Spinner glyphs and progress bars.
	pub accent: Style,
	/// Titles next to spinners and gauges.
	pub title: Style,
}

impl Theme {
	/// Style for the muted parts of the UI.
	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.muted
	}

	/// Style for matched characters on the cursor row.
	#[must_use]
	pub fn cursor_highlight_style(&self) -> Style {
		self.cursor.patch(self.highlight)
	}
}

impl Default for Theme {
	fn default() -> Self {
		dark()
	}
}

fn dark() -> Theme {
	Theme {
		prompt: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
		muted: Style::new().fg(Color::DarkGray),
		highlight: Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD),
		cursor: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
		selected: Style::new().fg(Color::Green),
		accent: Style::new().fg(Color::Magenta),
		title: Style::new(),
	}
}

fn light() -> Theme {
	Theme {
		prompt: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
		muted: Style::new().fg(Color::Gray),
		highlight: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
		cursor: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
		selected: Style::new().fg(Color::Green),
		accent: Style::new().fg(Color::Blue),
		title: Style::new(),
	}
}

const BUILTINS: &[(&str, fn() -> Theme)] = &[("default", dark), ("light", light)];

/// Look up a built-in theme. Names are matched case-insensitively.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	let name = name.trim();
	BUILTINS
		.iter()
		.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
		.map(|(_, build)| build())
}

/// Names of the built-in themes.
pub fn names() -> impl Iterator<Item = &'static str> {
	BUILTINS.iter().map(|(name, _)| *name)
}
