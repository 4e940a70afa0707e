mod app_dirs;
mod cli;
mod commands;
mod exit;
mod logging;
mod settings;

use std::panic;
use std::process::ExitCode;

use anyhow::{Result, bail};
use cli::{CliArgs, parse_cli};
use exit::Exit;
use tracing::{error, info};

fn main() -> ExitCode {
	let cli = parse_cli();

	match run(&cli) {
		Ok(exit) => exit.into(),
		Err(err) => {
			error!("command failed: {err:#}");
			eprintln!("chew: {err:#}");
			Exit::FAILURE.into()
		}
	}
}

fn run(cli: &CliArgs) -> Result<Exit> {
	if let Some(path) = logging::initialize(cli.log_file.as_deref())? {
		info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging initialized");
	}
	install_panic_hook();

	if cli.list_themes {
		for name in chew_tui::style::names() {
			println!("{name}");
		}
		return Ok(Exit::SUCCESS);
	}
	if cli.list_spinners {
		for name in chew_tui::session::spinner_names() {
			println!("{name}");
		}
		return Ok(Exit::SUCCESS);
	}

	let resolved = settings::load(cli)?;
	if cli.print_config {
		resolved.print_summary();
	}

	let Some(command) = &cli.command else {
		bail!("no command given; see `chew --help`");
	};
	let exit = commands::run(command, &resolved)?;
	info!(code = exit.code(), "exiting");
	Ok(exit)
}

/// Put the terminal back in cooked mode before the default hook prints the
/// panic message.
fn install_panic_hook() {
	let previous = panic::take_hook();
	panic::set_hook(Box::new(move |info| {
		chew_tui::restore_terminal();
		error!(%info, "panic");
		previous(info);
	}));
}
