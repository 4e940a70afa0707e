use std::time::Duration;

use chew_tui::session::Align;
use clap::ValueEnum;

/// How `search` prints the confirmed selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// One line per selected candidate.
	#[default]
	Plain,
	Json,
}

/// Side of the title the spinner is drawn on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum AlignArg {
	#[default]
	Left,
	Right,
}

impl From<AlignArg> for Align {
	fn from(value: AlignArg) -> Self {
		match value {
			AlignArg::Left => Align::Left,
			AlignArg::Right => Align::Right,
		}
	}
}

/// Parse durations such as `500ms`, `2s`, `1.5m` or a bare number of seconds.
pub(crate) fn parse_duration(text: &str) -> Result<Duration, String> {
	let text = text.trim();
	let split = text
		.find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
		.unwrap_or(text.len());
	let (number, unit) = text.split_at(split);
	let value: f64 = number
		.parse()
		.map_err(|_| format!("`{text}` is not a duration (try 500ms, 2s or 1m)"))?;
	let scale = match unit.trim() {
		"ms" => 0.001,
		"" | "s" => 1.0,
		"m" => 60.0,
		"h" => 3600.0,
		other => return Err(format!("unknown duration unit `{other}` (use ms, s, m or h)")),
	};
	Duration::try_from_secs_f64(value * scale).map_err(|err| format!("`{text}`: {err}"))
}
