use serde::Deserialize;

use crate::cli::{CliArgs, Command};

pub(super) const DEFAULT_TICK_RATE_MS: u64 = 80;
pub(super) const DEFAULT_SPINNER: &str = "dots";
pub(super) const DEFAULT_SPIN_TITLE: &str = "Loading...";
pub(super) const DEFAULT_GRACE_PERIOD_MS: u64 = 2_000;
pub(super) const DEFAULT_SEARCH_HEIGHT: u16 = 10;
pub(super) const DEFAULT_MAX_RESULTS: usize = chew_core::matcher::DEFAULT_MAX_RESULTS;
pub(super) const DEFAULT_PROMPT: &str = "> ";
pub(super) const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";
pub(super) const DEFAULT_INPUT_PLACEHOLDER: &str = "Type something...";
pub(super) const DEFAULT_WRITE_HEIGHT: u16 = 5;
pub(super) const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RuntimeSection {
	pub(super) tick_rate_ms: Option<u64>,
}

impl RuntimeSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(ms) = cli.tick_rate_ms {
			self.tick_rate_ms = Some(ms);
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SpinSection {
	pub(super) spinner: Option<String>,
	pub(super) title: Option<String>,
	pub(super) grace_period_ms: Option<u64>,
}

impl SpinSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		let Some(Command::Spin(args)) = &cli.command else {
			return;
		};
		if let Some(spinner) = &args.spinner {
			self.spinner = Some(spinner.clone());
		}
		if let Some(title) = &args.title {
			self.title = Some(title.clone());
		}
		if let Some(ms) = args.grace_period_ms {
			self.grace_period_ms = Some(ms);
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) height: Option<u16>,
	pub(super) max_results: Option<usize>,
	pub(super) prompt: Option<String>,
	pub(super) placeholder: Option<String>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		let Some(Command::Search(args)) = &cli.command else {
			return;
		};
		if let Some(height) = args.height {
			self.height = Some(height);
		}
		if let Some(max_results) = args.max_results {
			self.max_results = Some(max_results);
		}
		if let Some(prompt) = &args.prompt {
			self.prompt = Some(prompt.clone());
		}
		if let Some(placeholder) = &args.placeholder {
			self.placeholder = Some(placeholder.clone());
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct InputSection {
	pub(super) prompt: Option<String>,
	pub(super) placeholder: Option<String>,
}

impl InputSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		let Some(Command::Input(args)) = &cli.command else {
			return;
		};
		if let Some(prompt) = &args.prompt {
			self.prompt = Some(prompt.clone());
		}
		if let Some(placeholder) = &args.placeholder {
			self.placeholder = Some(placeholder.clone());
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct WriteSection {
	pub(super) height: Option<u16>,
}

impl WriteSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(Command::Write(args)) = &cli.command
			&& let Some(height) = args.height
		{
			self.height = Some(height);
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ThemeSection {
	pub(super) name: Option<String>,
}

impl ThemeSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(name) = &cli.theme {
			self.name = Some(name.clone());
		}
	}
}
