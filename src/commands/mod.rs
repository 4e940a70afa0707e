//! One module per subcommand. Each builds its session from the resolved
//! settings, runs it on the right surface and turns the outcome into output
//! and an exit status.

mod input;
mod progress;
mod search;
mod spin;
mod write;

use std::io::{self, IsTerminal};

use anyhow::{Context as _, Result, bail};
#[cfg(unix)]
use chew_tui::SignalForwarder;
use chew_tui::{Component, EventSource, Finished, Headless, QueuedEvents, Runtime, Surface, TerminalEvents, TerminalSurface};
use tracing::debug;

use crate::cli::Command;
use crate::exit::Exit;
use crate::settings::ResolvedConfig;

pub(crate) fn run(command: &Command, settings: &ResolvedConfig) -> Result<Exit> {
	match command {
		Command::Spin(args) => spin::run(args, settings),
		Command::Search(args) => search::run(args, settings),
		Command::Input(args) => input::run(args, settings),
		Command::Write(args) => write::run(args, settings),
		Command::Progress(args) => progress::run(args, settings),
	}
}

/// Run `component` in an inline viewport of `height` rows on stderr.
///
/// Fails when stderr is not a terminal, since the session cannot take input.
fn run_interactive<C: Component>(
	name: &str,
	height: u16,
	settings: &ResolvedConfig,
	component: C,
) -> Result<Finished<C>> {
	if !io::stderr().is_terminal() {
		bail!("`chew {name}` needs a terminal on stderr");
	}
	let surface = TerminalSurface::inline(height).context("failed to prepare the terminal")?;
	let events = TerminalEvents::spawn(settings.tick_rate);
	drive(surface, events, component)
}

/// Like [`run_interactive`], but falls back to a headless run without a
/// terminal. For sessions that need no input to finish.
fn run_or_headless<C: Component>(
	name: &str,
	height: u16,
	settings: &ResolvedConfig,
	component: C,
) -> Result<Finished<C>> {
	if io::stderr().is_terminal() {
		return run_interactive(name, height, settings, component);
	}
	debug!(command = name, "stderr is not a terminal; running headless");
	drive(Headless, QueuedEvents::new(settings.tick_rate), component)
}

fn drive<S, E, C>(surface: S, events: E, component: C) -> Result<Finished<C>>
where
	S: Surface,
	E: EventSource,
	C: Component,
{
	#[cfg(unix)]
	let _signals = SignalForwarder::spawn(events.sender()).context("failed to install signal handlers")?;

	let finished = Runtime::new(surface, events).run(component)?;
	Ok(finished)
}
