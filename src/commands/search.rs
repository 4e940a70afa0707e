use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use chew_core::{CandidateSet, Matcher};
use chew_tui::ExitReason;
use chew_tui::session::{SearchOptions, SearchSession};
use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::cli::{OutputFormat, SearchArgs, SearchOutput, print_json, print_plain};
use crate::exit::Exit;
use crate::settings::ResolvedConfig;

pub(super) fn run(args: &SearchArgs, settings: &ResolvedConfig) -> Result<Exit> {
	let candidates = load_candidates()?;
	if candidates.is_empty() {
		bail!("nothing to search: no input lines and no files");
	}
	debug!(candidates = candidates.len(), "candidates loaded");

	if args.select_if_one
		&& let Some(index) = unique_match(&args.value, &candidates, settings.search.max_results)
	{
		let selected: Vec<&str> = candidates.get(index).into_iter().collect();
		emit(args.output, &args.value, selected, &[index])?;
		return Ok(Exit::SUCCESS);
	}

	let options = SearchOptions {
		prompt: settings.search.prompt.clone(),
		placeholder: settings.search.placeholder.clone(),
		value: args.value.clone(),
		indicator: args.indicator.clone(),
		height: settings.search.height,
		limit: args.selection_limit(),
		select_if_one: args.select_if_one,
		highlight: !args.no_highlight,
		max_results: settings.search.max_results,
		timeout: args.timeout,
		theme: settings.theme.clone(),
	};
	let session = SearchSession::new(candidates, options);
	let height = session.height();
	let finished = super::run_interactive("search", height, settings, session)?;
	if finished.reason != ExitReason::Submitted {
		return Ok(Exit::from_reason(finished.reason));
	}

	let session = finished.into_state();
	emit(args.output, session.query(), session.submitted_values(), session.submitted())?;
	Ok(Exit::SUCCESS)
}

fn emit(format: OutputFormat, query: &str, selected: Vec<&str>, indices: &[usize]) -> Result<()> {
	let output = SearchOutput {
		query,
		selected,
		indices,
	};
	match format {
		OutputFormat::Plain => print_plain(&output),
		OutputFormat::Json => print_json(&output),
	}
}

/// Index of the only candidate matching `query`, if exactly one does.
fn unique_match(query: &str, candidates: &CandidateSet, max_results: usize) -> Option<usize> {
	let ranking = Matcher::new(max_results).rank(query, candidates);
	match ranking.matches.as_slice() {
		[only] if ranking.matched == 1 => Some(only.index),
		_ => None,
	}
}

/// Lines from piped stdin, or the files below the working directory when
/// stdin is a terminal.
fn load_candidates() -> Result<CandidateSet> {
	let stdin = io::stdin();
	if !stdin.is_terminal() {
		return CandidateSet::from_reader(stdin.lock()).context("failed to read candidates from stdin");
	}
	Ok(walk_files(Path::new(".")))
}

/// Relative paths of the files below `root`, honouring ignore files.
fn walk_files(root: &Path) -> CandidateSet {
	let walker = WalkBuilder::new(root)
		.hidden(false)
		.git_ignore(true)
		.git_global(true)
		.git_exclude(true)
		.ignore(true)
		.parents(true)
		.filter_entry(|entry| entry.file_name() != ".git")
		.sort_by_file_name(|a, b| a.cmp(b))
		.build();

	let mut paths = Vec::new();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(error) => {
				warn!(%error, "skipping unreadable path");
				continue;
			}
		};
		if !entry.file_type().is_some_and(|kind| kind.is_file()) {
			continue;
		}
		let path = entry.path();
		let relative = path.strip_prefix(root).unwrap_or(path);
		paths.push(relative.to_string_lossy().into_owned());
	}
	CandidateSet::from_lines(paths)
}
