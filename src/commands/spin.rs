use std::io::{self, Write};

use anyhow::{Result, bail};
use chew_core::{CapturedOutput, OutputMode, TaskSpec};
use chew_tui::session::{SpinOptions, SpinPhase, SpinSession};
use tracing::info;

use crate::cli::SpinArgs;
use crate::exit::Exit;
use crate::settings::ResolvedConfig;

pub(super) fn run(args: &SpinArgs, settings: &ResolvedConfig) -> Result<Exit> {
	let capture = args.show_output || args.show_error;
	let spec = TaskSpec::new(args.command.iter().cloned())
		.with_output(if capture {
			OutputMode::Capture
		} else {
			OutputMode::Discard
		})
		.with_grace_period(settings.spin.grace_period);

	let options = SpinOptions {
		title: settings.spin.title.clone(),
		spinner: settings.spin.spinner.clone(),
		align: args.align.into(),
		timeout: args.timeout,
		theme: settings.theme.clone(),
	};

	let mut session = super::run_or_headless("spin", 1, settings, SpinSession::new(spec, options))?.into_state();
	let output = session.take_output();

	match session.phase() {
		SpinPhase::Finished(code) => {
			let code = *code;
			if let Some(output) = &output {
				report(args, code, output)?;
			}
			Ok(Exit::from_command(code))
		}
		SpinPhase::Failed(reason) => bail!("{reason}"),
		_ => {
			info!(timed_out = session.timed_out(), "command cancelled");
			Ok(Exit::CANCELLED)
		}
	}
}

/// Replay captured streams according to `--show-output` and `--show-error`.
fn report(args: &SpinArgs, code: i32, output: &CapturedOutput) -> io::Result<()> {
	if args.show_output {
		let mut stdout = io::stdout().lock();
		stdout.write_all(&output.stdout)?;
		stdout.flush()?;
		io::stderr().lock().write_all(&output.stderr)?;
	} else if args.show_error && code != 0 {
		let mut stderr = io::stderr().lock();
		stderr.write_all(&output.stdout)?;
		stderr.write_all(&output.stderr)?;
	}
	Ok(())
}
