//! Fuzzy subsequence matching and ranking.
//!
//! A candidate matches when every query character appears in it, in order,
//! ignoring case. Matches are ordered by the number of unmatched characters
//! inside the matched window (fewer is better), then by a bonus for word
//! boundaries and contiguous runs, then by original position.

mod candidates;
mod ranking;
mod score;

use std::ops::Range;

pub use candidates::CandidateSet;
pub use score::Score;

use ranking::ScoreAggregator;
use score::{Scratch, fold};

/// Default cap on the number of matches retained per ranking.
pub const DEFAULT_MAX_RESULTS: usize = 2_000;

/// A candidate that matched the query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
	/// Index of the candidate in its [`CandidateSet`].
	pub index: usize,
	pub score: Score,
	/// Merged character ranges of the matched characters, ascending.
	pub spans: Vec<Range<usize>>,
}

impl Match {
	/// Character positions covered by [`Match::spans`].
	pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
		self.spans.iter().flat_map(Clone::clone)
	}
}

/// Outcome of ranking a candidate set against one query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranking {
	/// Retained matches, most relevant first.
	pub matches: Vec<Match>,
	/// Number of candidates that matched, including ones not retained.
	pub matched: usize,
}

impl Ranking {
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.matches.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.matches.len()
	}

	#[must_use]
	pub fn get(&self, position: usize) -> Option<&Match> {
		self.matches.get(position)
	}

	/// Candidate indices in rank order.
	pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
		self.matches.iter().map(|m| m.index)
	}
}

/// Ranks candidates for a query. Holds scratch buffers so repeated rankings
/// (one per keystroke) do not reallocate per candidate.
pub struct Matcher {
	max_results: usize,
	scratch: Scratch,
	query: Vec<char>,
}

impl Default for Matcher {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_RESULTS)
	}
}

impl Matcher {
	/// Create a matcher that retains at most `max_results` matches.
	#[must_use]
	pub fn new(max_results: usize) -> Self {
		Self {
			max_results,
			scratch: Scratch::default(),
			query: Vec::new(),
		}
	}

	/// Rank `candidates` against `query`.
	///
	/// An empty query matches every candidate with a neutral score, in
	/// original order. The result is fully determined by its inputs.
	pub fn rank(&mut self, query: &str, candidates: &CandidateSet) -> Ranking {
		self.query.clear();
		self.query.extend(query.chars().map(fold));

		if self.query.is_empty() {
			let matches = (0..candidates.len())
				.take(self.max_results)
				.map(|index| Match {
					index,
					score: Score::NEUTRAL,
					spans: Vec::new(),
				})
				.collect();
			return Ranking {
				matches,
				matched: candidates.len(),
			};
		}

		let mut aggregator = ScoreAggregator::new(self.max_results);
		for (index, candidate) in candidates.iter().enumerate() {
			if let Some(score) = self.scratch.score(&self.query, candidate) {
				aggregator.push(index, score);
			}
		}

		let matched = aggregator.matched();
		let matches = aggregator
			.into_sorted()
			.into_iter()
			.map(|ranked| {
				// Re-align the retained few to recover their positions.
				let spans = match self.scratch.score(&self.query, &candidates[ranked.index]) {
					Some(_) => merge_positions(self.scratch.positions()),
					None => Vec::new(),
				};
				Match {
					index: ranked.index,
					score: ranked.score,
					spans,
				}
			})
			.collect();

		Ranking { matches, matched }
	}
}

fn merge_positions(positions: &[usize]) -> Vec<Range<usize>> {
	let mut spans: Vec<Range<usize>> = Vec::new();
	for &position in positions {
		match spans.last_mut() {
			Some(span) if span.end == position => span.end += 1,
			_ => spans.push(position..position + 1),
		}
	}
	spans
}
