use anyhow::Result;
use chew_tui::session::{ProgressOptions, ProgressSession};

use crate::cli::ProgressArgs;
use crate::exit::Exit;
use crate::settings::ResolvedConfig;

pub(super) fn run(args: &ProgressArgs, settings: &ResolvedConfig) -> Result<Exit> {
	let options = ProgressOptions {
		title: args.title.clone(),
		duration: args.time,
		theme: settings.theme.clone(),
	};

	let finished = super::run_or_headless("progress", 1, settings, ProgressSession::new(options))?;
	Ok(Exit::from_reason(finished.reason))
}
