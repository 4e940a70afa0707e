use std::time::Duration;

use chew_tui::Theme;
use throbber_widgets_tui::Set;

mod errors;
mod sources;
mod summary;
pub(super) mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Validated configuration with every default filled in.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
	pub(crate) tick_rate: Duration,
	pub(crate) theme_name: String,
	pub(crate) theme: Theme,
	pub(crate) spin: SpinSettings,
	pub(crate) search: SearchSettings,
	pub(crate) input: InputSettings,
	pub(crate) write: WriteSettings,
}

#[derive(Debug, Clone)]
pub(crate) struct SpinSettings {
	pub(crate) spinner_name: String,
	pub(crate) spinner: Set,
	pub(crate) title: String,
	/// Time between SIGTERM and SIGKILL on cancellation.
	pub(crate) grace_period: Duration,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchSettings {
	pub(crate) height: u16,
	pub(crate) max_results: usize,
	pub(crate) prompt: String,
	pub(crate) placeholder: String,
}

#[derive(Debug, Clone)]
pub(crate) struct InputSettings {
	pub(crate) prompt: String,
	pub(crate) placeholder: String,
}

#[derive(Debug, Clone)]
pub(crate) struct WriteSettings {
	pub(crate) height: u16,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration to
	/// stderr.
	pub(crate) fn print_summary(&self) {
		summary::print_summary(self);
	}
}
