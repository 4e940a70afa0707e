use anyhow::Result;
use chew_tui::ExitReason;
use chew_tui::components::CharLimit;
use chew_tui::session::{WriteOptions, WriteSession};

use crate::cli::WriteArgs;
use crate::exit::Exit;
use crate::settings::ResolvedConfig;

pub(super) fn run(args: &WriteArgs, settings: &ResolvedConfig) -> Result<Exit> {
	let options = WriteOptions {
		placeholder: args.placeholder.clone(),
		value: args.value.clone(),
		height: settings.write.height,
		char_limit: CharLimit::new(args.char_limit),
		line_numbers: args.show_line_numbers,
		timeout: args.timeout,
		theme: settings.theme.clone(),
	};
	let session = WriteSession::new(options);
	let height = session.height();

	let finished = super::run_interactive("write", height, settings, session)?;
	if finished.reason == ExitReason::Submitted {
		println!("{}", finished.session.state.value());
	}
	Ok(Exit::from_reason(finished.reason))
}
