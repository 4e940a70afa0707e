use std::ops::Range;

/// Window of `height` rows over a longer list, scrolled just enough to keep
/// a cursor visible.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListViewport {
	offset: usize,
	height: usize,
}

impl ListViewport {
	#[must_use]
	pub fn new(height: usize) -> Self {
		Self { offset: 0, height }
	}

	/// Index of the first visible row.
	#[must_use]
	pub fn offset(&self) -> usize {
		self.offset
	}

	#[must_use]
	pub fn height(&self) -> usize {
		self.height
	}

	pub fn reset(&mut self) {
		self.offset = 0;
	}

	/// Scroll the minimum distance that brings `cursor` into view.
	pub fn scroll_to(&mut self, cursor: usize) {
		if cursor < self.offset {
			self.offset = cursor;
		} else if cursor >= self.offset + self.height {
			self.offset = (cursor + 1).saturating_sub(self.height);
		}
	}

	/// Visible indices of a list with `len` rows.
	#[must_use]
	pub fn range(&self, len: usize) -> Range<usize> {
		let start = self.offset.min(len);
		let end = (self.offset + self.height).min(len);
		start..end
	}
}
