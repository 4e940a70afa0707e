use anyhow::Result;
use chew_tui::ExitReason;
use chew_tui::components::CharLimit;
use chew_tui::session::{InputOptions, InputSession};

use crate::cli::InputArgs;
use crate::exit::Exit;
use crate::settings::ResolvedConfig;

pub(super) fn run(args: &InputArgs, settings: &ResolvedConfig) -> Result<Exit> {
	let options = InputOptions {
		prompt: settings.input.prompt.clone(),
		placeholder: settings.input.placeholder.clone(),
		value: args.value.clone(),
		char_limit: CharLimit::new(args.char_limit),
		password: args.password,
		timeout: args.timeout,
		theme: settings.theme.clone(),
	};

	let finished = super::run_interactive("input", 1, settings, InputSession::new(options))?;
	if finished.reason == ExitReason::Submitted {
		println!("{}", finished.session.state.value());
	}
	Ok(Exit::from_reason(finished.reason))
}
