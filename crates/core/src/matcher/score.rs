//! Per-candidate scoring.
//!
//! Ordering is decided by [`Score`]'s `Ord`: total gap first, then bonus.
//! Only that ordering matters to callers; the weights below can be tuned
//! freely as long as the gap stays the primary key.

use std::cmp::Ordering;

/// Bonus for a matched character at the start of a word.
const BOUNDARY_BONUS: i32 = 8;
/// Bonus for a matched uppercase character following a lowercase one.
const CAMEL_BONUS: i32 = 6;
/// Bonus for each matched character directly following the previous match.
const CONSECUTIVE_BONUS: i32 = 4;
/// Penalty per character between the candidate start and the first match.
const LEADING_PENALTY: i32 = 1;
/// Leading distance beyond this many characters is not penalized further.
const MAX_LEADING_PENALTY: i32 = 24;

/// Relevance of a candidate for a query. Greater is better.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Score {
	gap: u32,
	bonus: i32,
}

impl Score {
	/// Score assigned to every candidate when the query is empty.
	pub const NEUTRAL: Score = Score { gap: 0, bonus: 0 };

	/// Number of unmatched characters between the first and last match.
	#[must_use]
	pub fn gap(self) -> u32 {
		self.gap
	}

	/// Boundary, contiguity and position bonus used to break gap ties.
	#[must_use]
	pub fn bonus(self) -> i32 {
		self.bonus
	}
}

impl Ord for Score {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.gap
			.cmp(&self.gap)
			.then_with(|| self.bonus.cmp(&other.bonus))
	}
}

impl PartialOrd for Score {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Fold a character for case-insensitive comparison.
pub(crate) fn fold(ch: char) -> char {
	if ch.is_ascii() {
		ch.to_ascii_lowercase()
	} else {
		ch.to_lowercase().next().unwrap_or(ch)
	}
}

fn is_separator(ch: char) -> bool {
	ch.is_whitespace() || matches!(ch, '/' | '\\' | '-' | '_' | '.' | ':')
}

/// Reusable buffers for scoring many candidates against one query.
#[derive(Default)]
pub(crate) struct Scratch {
	original: Vec<char>,
	folded: Vec<char>,
	positions: Vec<usize>,
}

impl Scratch {
	/// Score `candidate` against an already folded, non-empty `query`.
	///
	/// On success the matched character positions are left in
	/// [`Scratch::positions`].
	pub(crate) fn score(&mut self, query: &[char], candidate: &str) -> Option<Score> {
		self.original.clear();
		self.folded.clear();
		self.positions.clear();

		for ch in candidate.chars() {
			self.original.push(ch);
			self.folded.push(fold(ch));
		}

		let (start, end) = minimal_window(query, &self.folded)?;
		align_backwards(query, &self.folded, end, &mut self.positions);
		debug_assert_eq!(self.positions.first().copied(), Some(start));

		let span = end - start + 1;
		let gap = u32::try_from(span - query.len()).unwrap_or(u32::MAX);
		let bonus = self.bonus(start);
		Some(Score { gap, bonus })
	}

	pub(crate) fn positions(&self) -> &[usize] {
		&self.positions
	}

	fn bonus(&self, start: usize) -> i32 {
		let mut bonus = 0;
		let mut previous: Option<usize> = None;
		for &position in &self.positions {
			if position == 0 || is_separator(self.original[position - 1]) {
				bonus += BOUNDARY_BONUS;
			} else if self.original[position].is_uppercase()
				&& self.original[position - 1].is_lowercase()
			{
				bonus += CAMEL_BONUS;
			}
			if previous.is_some_and(|prev| prev + 1 == position) {
				bonus += CONSECUTIVE_BONUS;
			}
			previous = Some(position);
		}
		let leading = i32::try_from(start).unwrap_or(i32::MAX);
		bonus - leading.min(MAX_LEADING_PENALTY) * LEADING_PENALTY
	}
}

/// Find the leftmost shortest window of `text` containing `query` as a
/// subsequence. Returns inclusive `(start, end)` character positions.
fn minimal_window(query: &[char], text: &[char]) -> Option<(usize, usize)> {
	let first = *query.first()?;
	if query.len() > text.len() {
		return None;
	}

	let mut best: Option<(usize, usize)> = None;
	let mut from = 0;
	while from < text.len() {
		let Some(offset) = text[from..].iter().position(|&ch| ch == first) else {
			break;
		};
		let anchor = from + offset;

		let mut matched = 0;
		let mut cursor = anchor;
		while cursor < text.len() && matched < query.len() {
			if text[cursor] == query[matched] {
				matched += 1;
			}
			cursor += 1;
		}
		if matched < query.len() {
			break;
		}
		let end = cursor - 1;

		let mut remaining = query.len();
		let mut start = end + 1;
		while remaining > 0 {
			start -= 1;
			if text[start] == query[remaining - 1] {
				remaining -= 1;
			}
		}

		let shorter = best.is_none_or(|(best_start, best_end)| end - start < best_end - best_start);
		if shorter {
			best = Some((start, end));
			if end - start + 1 == query.len() {
				break;
			}
		}
		from = start + 1;
	}
	best
}

/// Collect the positions of the back-to-front greedy alignment ending at
/// `end`, in ascending order.
fn align_backwards(query: &[char], text: &[char], end: usize, positions: &mut Vec<usize>) {
	let mut remaining = query.len();
	let mut cursor = end + 1;
	while remaining > 0 && cursor > 0 {
		cursor -= 1;
		if text[cursor] == query[remaining - 1] {
			positions.push(cursor);
			remaining -= 1;
		}
	}
	positions.reverse();
}
