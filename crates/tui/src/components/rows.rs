use std::mem;
use std::ops::Range;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

const ELLIPSIS: char = '…';

/// Build a line for `text` with the characters in `spans` highlighted.
///
/// Text wider than `max_width` columns is cut on the right and ends in an
/// ellipsis; highlights past the cut are dropped.
#[must_use]
pub fn highlight_line(
	text: &str,
	spans: &[Range<usize>],
	max_width: usize,
	base: Style,
	highlight: Style,
) -> Line<'static> {
	let (visible, truncated) = truncate(text, max_width);

	let mut ranges = spans.iter().peekable();
	let mut line = Line::default();
	let mut buffer = String::new();
	let mut highlighted = false;

	for (index, ch) in text.chars().take(visible).enumerate() {
		while ranges.peek().is_some_and(|range| range.end <= index) {
			ranges.next();
		}
		let should_highlight = ranges.peek().is_some_and(|range| range.contains(&index));
		if should_highlight != highlighted && !buffer.is_empty() {
			let style = if highlighted { highlight } else { base };
			line.spans.push(Span::styled(mem::take(&mut buffer), style));
		}
		highlighted = should_highlight;
		buffer.push(ch);
	}

	if !buffer.is_empty() {
		let style = if highlighted { highlight } else { base };
		line.spans.push(Span::styled(buffer, style));
	}
	if truncated {
		line.spans.push(Span::styled(ELLIPSIS.to_string(), base));
	}
	line
}

/// Number of leading characters of `text` that fit in `max_width` columns,
/// leaving room for an ellipsis when the text does not fit whole.
fn truncate(text: &str, max_width: usize) -> (usize, bool) {
	let widths: Vec<usize> = text.chars().map(|ch| ch.width().unwrap_or(0)).collect();
	if widths.iter().sum::<usize>() <= max_width {
		return (widths.len(), false);
	}
	if max_width == 0 {
		return (0, false);
	}

	let available = max_width - 1;
	let mut used = 0;
	let mut count = 0;
	for width in widths {
		if used + width > available {
			break;
		}
		used += width;
		count += 1;
	}
	(count, true)
}
