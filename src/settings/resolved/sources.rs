use std::fmt;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origins of the validated values. `None` means the default was used.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) tick_rate: Option<SettingSource>,
	pub(crate) theme: Option<SettingSource>,
	pub(crate) spinner: Option<SettingSource>,
	pub(crate) search_height: Option<SettingSource>,
	pub(crate) search_max_results: Option<SettingSource>,
	pub(crate) write_height: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn tick_rate(&self) -> SettingSource {
		or_key(&self.tick_rate, "runtime.tick_rate_ms")
	}

	pub(crate) fn theme(&self) -> SettingSource {
		or_key(&self.theme, "theme.name")
	}

	pub(crate) fn spinner(&self) -> SettingSource {
		or_key(&self.spinner, "spin.spinner")
	}

	pub(crate) fn search_height(&self) -> SettingSource {
		or_key(&self.search_height, "search.height")
	}

	pub(crate) fn search_max_results(&self) -> SettingSource {
		or_key(&self.search_max_results, "search.max_results")
	}

	pub(crate) fn write_height(&self) -> SettingSource {
		or_key(&self.write_height, "write.height")
	}
}

fn or_key(source: &Option<SettingSource>, key: &'static str) -> SettingSource {
	source.clone().unwrap_or(SettingSource::ConfigKey(key))
}
