use std::env;
use std::time::Duration;

use serde::Deserialize;

use super::resolved::{
	ConfigError, ConfigSources, InputSettings, ResolvedConfig, SearchSettings, SettingSource, SpinSettings,
	WriteSettings, validation,
};
use crate::cli::{CliArgs, Command};

mod sections;

use sections::{
	DEFAULT_GRACE_PERIOD_MS, DEFAULT_INPUT_PLACEHOLDER, DEFAULT_MAX_RESULTS, DEFAULT_PROMPT, DEFAULT_SEARCH_HEIGHT,
	DEFAULT_SEARCH_PLACEHOLDER, DEFAULT_SPIN_TITLE, DEFAULT_SPINNER, DEFAULT_THEME, DEFAULT_TICK_RATE_MS,
	DEFAULT_WRITE_HEIGHT, InputSection, RuntimeSection, SearchSection, SpinSection, ThemeSection, WriteSection,
};

/// Mirror of the configuration file before CLI overrides and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	runtime: RuntimeSection,
	spin: SpinSection,
	search: SearchSection,
	input: InputSection,
	write: WriteSection,
	theme: ThemeSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.runtime.apply_cli_overrides(cli);
		self.spin.apply_cli_overrides(cli);
		self.search.apply_cli_overrides(cli);
		self.input.apply_cli_overrides(cli);
		self.write.apply_cli_overrides(cli);
		self.theme.apply_cli_overrides(cli);
	}

	/// Validate the merged values and fill in defaults.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig, ConfigError> {
		let sources = self.sources(cli);

		let tick_rate_ms = self.runtime.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS);
		validation::positive("runtime.tick_rate_ms", tick_rate_ms, sources.tick_rate())?;

		let theme_name = self.theme.name.unwrap_or_else(|| DEFAULT_THEME.into());
		let theme = validation::theme(&theme_name, sources.theme())?;

		let spinner_name = self.spin.spinner.unwrap_or_else(|| DEFAULT_SPINNER.into());
		let spinner = validation::spinner(&spinner_name, sources.spinner())?;

		let search_height = self.search.height.unwrap_or(DEFAULT_SEARCH_HEIGHT);
		validation::positive("search.height", search_height, sources.search_height())?;
		let max_results = self.search.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
		validation::positive("search.max_results", max_results, sources.search_max_results())?;

		let write_height = self.write.height.unwrap_or(DEFAULT_WRITE_HEIGHT);
		validation::positive("write.height", write_height, sources.write_height())?;

		Ok(ResolvedConfig {
			tick_rate: Duration::from_millis(tick_rate_ms),
			theme_name,
			theme,
			spin: SpinSettings {
				spinner_name,
				spinner,
				title: self.spin.title.unwrap_or_else(|| DEFAULT_SPIN_TITLE.into()),
				grace_period: Duration::from_millis(
					self.spin.grace_period_ms.unwrap_or(DEFAULT_GRACE_PERIOD_MS),
				),
			},
			search: SearchSettings {
				height: search_height,
				max_results,
				prompt: self.search.prompt.unwrap_or_else(|| DEFAULT_PROMPT.into()),
				placeholder: self
					.search
					.placeholder
					.unwrap_or_else(|| DEFAULT_SEARCH_PLACEHOLDER.into()),
			},
			input: InputSettings {
				prompt: self.input.prompt.unwrap_or_else(|| DEFAULT_PROMPT.into()),
				placeholder: self
					.input
					.placeholder
					.unwrap_or_else(|| DEFAULT_INPUT_PLACEHOLDER.into()),
			},
			write: WriteSettings { height: write_height },
		})
	}

	/// Record where each validated value came from.
	fn sources(&self, cli: &CliArgs) -> ConfigSources {
		let spin = match &cli.command {
			Some(Command::Spin(args)) => Some(args),
			_ => None,
		};
		let search = match &cli.command {
			Some(Command::Search(args)) => Some(args),
			_ => None,
		};
		let write = match &cli.command {
			Some(Command::Write(args)) => Some(args),
			_ => None,
		};

		ConfigSources {
			tick_rate: detect_source(
				cli.tick_rate_ms.is_some(),
				self.runtime.tick_rate_ms.is_some(),
				"CHEW__RUNTIME__TICK_RATE_MS",
				"--tick-rate",
				"runtime.tick_rate_ms",
			),
			theme: detect_source(
				cli.theme.is_some(),
				self.theme.name.is_some(),
				"CHEW__THEME__NAME",
				"--theme",
				"theme.name",
			),
			spinner: detect_source(
				spin.is_some_and(|args| args.spinner.is_some()),
				self.spin.spinner.is_some(),
				"CHEW__SPIN__SPINNER",
				"--spinner",
				"spin.spinner",
			),
			search_height: detect_source(
				search.is_some_and(|args| args.height.is_some()),
				self.search.height.is_some(),
				"CHEW__SEARCH__HEIGHT",
				"--height",
				"search.height",
			),
			search_max_results: detect_source(
				search.is_some_and(|args| args.max_results.is_some()),
				self.search.max_results.is_some(),
				"CHEW__SEARCH__MAX_RESULTS",
				"--max-results",
				"search.max_results",
			),
			write_height: detect_source(
				write.is_some_and(|args| args.height.is_some()),
				self.write.height.is_some(),
				"CHEW__WRITE__HEIGHT",
				"--height",
				"write.height",
			),
		}
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
