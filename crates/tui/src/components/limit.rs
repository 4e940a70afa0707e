use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Upper bound on the number of characters an editor accepts. Line breaks
/// count as one character each.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CharLimit(Option<usize>);

impl CharLimit {
	pub const NONE: Self = Self(None);

	/// A limit of `max` characters. Zero means unlimited.
	#[must_use]
	pub fn new(max: usize) -> Self {
		Self((max > 0).then_some(max))
	}

	#[must_use]
	pub fn max(self) -> Option<usize> {
		self.0
	}

	/// Characters that can still be added to `lines`.
	#[must_use]
	pub fn room(self, lines: &[String]) -> usize {
		match self.0 {
			Some(max) => max.saturating_sub(count(lines)),
			None => usize::MAX,
		}
	}

	/// Whether `key` may reach the editor. Keys that would insert text are
	/// refused once the limit is reached; everything else passes.
	#[must_use]
	pub fn admits(self, lines: &[String], key: &KeyEvent) -> bool {
		!inserts(key) || self.room(lines) > 0
	}

	/// The prefix of `text` that still fits after `lines`.
	#[must_use]
	pub fn clip<'a>(self, lines: &[String], text: &'a str) -> &'a str {
		let room = self.room(lines);
		match text.char_indices().nth(room) {
			Some((end, _)) => &text[..end],
			None => text,
		}
	}
}

fn count(lines: &[String]) -> usize {
	let breaks = lines.len().saturating_sub(1);
	lines.iter().map(|line| line.chars().count()).sum::<usize>() + breaks
}

fn inserts(key: &KeyEvent) -> bool {
	let plain = !key
		.modifiers
		.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
	match key.code {
		KeyCode::Char(_) | KeyCode::Tab => plain,
		KeyCode::Enter => true,
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lines(text: &str) -> Vec<String> {
		text.split('\n').map(String::from).collect()
	}

	#[test]
	fn zero_means_unlimited() {
		assert_eq!(CharLimit::new(0), CharLimit::NONE);
		assert_eq!(CharLimit::NONE.room(&lines("abc")), usize::MAX);
	}

	#[test]
	fn line_breaks_count() {
		let limit = CharLimit::new(5);
		assert_eq!(limit.room(&lines("ab\nc")), 1);
		assert_eq!(limit.room(&lines("abcdef")), 0);
	}

	#[test]
	fn full_editor_refuses_only_inserting_keys() {
		let limit = CharLimit::new(2);
		let full = lines("ab");
		assert!(!limit.admits(&full, &KeyEvent::from(KeyCode::Char('c'))));
		assert!(!limit.admits(&full, &KeyEvent::from(KeyCode::Enter)));
		assert!(limit.admits(&full, &KeyEvent::from(KeyCode::Backspace)));
		assert!(limit.admits(&full, &KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL)));
	}

	#[test]
	fn clip_counts_characters_not_bytes() {
		let limit = CharLimit::new(4);
		assert_eq!(limit.clip(&lines("ab"), "éèê"), "éè");
		assert_eq!(limit.clip(&lines(""), "ok"), "ok");
	}
}
