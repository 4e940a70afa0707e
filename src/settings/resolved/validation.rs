use chew_tui::Theme;
use chew_tui::session::{spinner as spinner_by_name, spinner_names};
use throbber_widgets_tui::Set;

use super::{ConfigError, SettingSource};

/// Reject zero for counts, heights and intervals.
pub(crate) fn positive<T>(key: &'static str, value: T, origin: SettingSource) -> Result<(), ConfigError>
where
	T: PartialEq + Default + ToString,
{
	if value == T::default() {
		return Err(ConfigError::invalid(key, value.to_string(), origin, "must be greater than zero"));
	}
	Ok(())
}

pub(crate) fn theme(name: &str, origin: SettingSource) -> Result<Theme, ConfigError> {
	chew_tui::style::by_name(name).ok_or_else(|| {
		let known: Vec<_> = chew_tui::style::names().collect();
		ConfigError::invalid(
			"theme.name",
			name,
			origin,
			format!("unknown theme (expected one of: {})", known.join(", ")),
		)
	})
}

pub(crate) fn spinner(name: &str, origin: SettingSource) -> Result<Set, ConfigError> {
	spinner_by_name(name).ok_or_else(|| {
		let known: Vec<_> = spinner_names().collect();
		ConfigError::invalid(
			"spin.spinner",
			name,
			origin,
			format!("unknown spinner (expected one of: {})", known.join(", ")),
		)
	})
}
