use std::io::{self, BufRead};
use std::ops::Index;

/// Immutable, ordered list of candidate strings.
///
/// A candidate's position in the set is its identifier for the lifetime of a
/// session; rankings and selections refer to candidates by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateSet {
	items: Vec<String>,
}

impl CandidateSet {
	/// Read one candidate per line.
	///
	/// Line endings (`\n` or `\r\n`) are stripped and blank lines are skipped,
	/// so a trailing newline never produces an empty candidate.
	pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
		let mut items = Vec::new();
		for line in reader.lines() {
			let line = line?;
			let line = line.strip_suffix('\r').map(str::to_owned).unwrap_or(line);
			if !line.is_empty() {
				items.push(line);
			}
		}
		Ok(Self { items })
	}

	/// Build a set from already split lines, keeping them as given.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			items: lines.into_iter().map(Into::into).collect(),
		}
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	#[must_use]
	pub fn get(&self, index: usize) -> Option<&str> {
		self.items.get(index).map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.items.iter().map(String::as_str)
	}
}

impl Index<usize> for CandidateSet {
	type Output = str;

	fn index(&self, index: usize) -> &Self::Output {
		&self.items[index]
	}
}

impl<S: Into<String>> FromIterator<S> for CandidateSet {
	fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
		Self::from_lines(iter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reader_strips_line_endings_and_blank_lines() {
		let input = b"alpha\r\nbeta\n\ngamma\n";
		let set = CandidateSet::from_reader(&input[..]).unwrap();
		let items: Vec<&str> = set.iter().collect();
		assert_eq!(items, vec!["alpha", "beta", "gamma"]);
	}

	#[test]
	fn reader_accepts_missing_final_newline() {
		let set = CandidateSet::from_reader(&b"one\ntwo"[..]).unwrap();
		assert_eq!(set.len(), 2);
		assert_eq!(&set[1], "two");
	}

	#[test]
	fn empty_input_gives_empty_set() {
		let set = CandidateSet::from_reader(&b""[..]).unwrap();
		assert!(set.is_empty());
		assert_eq!(set.get(0), None);
	}
}
