use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

/// What `search` reports after a confirmed selection.
#[derive(Debug, Serialize)]
pub(crate) struct SearchOutput<'a> {
	pub(crate) query: &'a str,
	/// Selected candidates in input order.
	pub(crate) selected: Vec<&'a str>,
	/// Zero-based input positions of `selected`.
	pub(crate) indices: &'a [usize],
}

/// Print each selected candidate on its own line.
pub(crate) fn print_plain(output: &SearchOutput<'_>) -> Result<()> {
	let mut stdout = io::stdout().lock();
	for line in &output.selected {
		writeln!(stdout, "{line}")?;
	}
	stdout.flush()?;
	Ok(())
}

pub(crate) fn format_json(output: &SearchOutput<'_>) -> Result<String> {
	Ok(serde_json::to_string_pretty(output)?)
}

pub(crate) fn print_json(output: &SearchOutput<'_>) -> Result<()> {
	println!("{}", format_json(output)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use serde_json::Value;

	use super::*;

	#[test]
	fn json_lists_selection_and_positions() {
		let output = SearchOutput {
			query: "fb",
			selected: vec!["foobar.go"],
			indices: &[1],
		};

		let json = format_json(&output).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["query"], "fb");
		assert_eq!(value["selected"][0], "foobar.go");
		assert_eq!(value["indices"][0], 1);
	}
}
