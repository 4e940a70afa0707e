use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::score::Score;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct RankedMatch {
	pub(crate) index: usize,
	pub(crate) score: Score,
}

impl Ord for RankedMatch {
	fn cmp(&self, other: &Self) -> Ordering {
		self.score
			.cmp(&other.score)
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl PartialOrd for RankedMatch {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Keeps the `limit` best matches seen so far while counting all of them.
pub(crate) struct ScoreAggregator {
	heap: BinaryHeap<Reverse<RankedMatch>>,
	limit: usize,
	matched: usize,
}

impl ScoreAggregator {
	pub(crate) fn new(limit: usize) -> Self {
		Self {
			heap: BinaryHeap::with_capacity(limit.min(4_096)),
			limit,
			matched: 0,
		}
	}

	pub(crate) fn push(&mut self, index: usize, score: Score) {
		self.matched += 1;
		let entry = RankedMatch { index, score };
		if self.heap.len() < self.limit {
			self.heap.push(Reverse(entry));
		} else if let Some(mut current_min) = self.heap.peek_mut() {
			if entry > current_min.0 {
				*current_min = Reverse(entry);
			}
		}
	}

	pub(crate) fn matched(&self) -> usize {
		self.matched
	}

	/// Retained matches, best first.
	pub(crate) fn into_sorted(self) -> Vec<RankedMatch> {
		let mut entries: Vec<RankedMatch> = self.heap.into_iter().map(|entry| entry.0).collect();
		entries.sort_unstable_by(|a, b| b.cmp(a));
		entries
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keeps_only_the_best_entries() {
		let mut aggregator = ScoreAggregator::new(2);
		aggregator.push(0, Score::NEUTRAL);
		aggregator.push(1, Score::NEUTRAL);
		aggregator.push(2, Score::NEUTRAL);

		assert_eq!(aggregator.matched(), 3);
		let indices: Vec<usize> = aggregator.into_sorted().iter().map(|m| m.index).collect();
		assert_eq!(indices, vec![0, 1]);
	}

	#[test]
	fn zero_limit_still_counts() {
		let mut aggregator = ScoreAggregator::new(0);
		aggregator.push(4, Score::NEUTRAL);
		assert_eq!(aggregator.matched(), 1);
		assert!(aggregator.into_sorted().is_empty());
	}
}
