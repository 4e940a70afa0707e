//! File logging.
//!
//! The terminal belongs to the UI, so log records only ever go to a file.
//! Logging stays off unless `CHEW_LOG` holds a filter directive or a log file
//! is named on the command line.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Registry, fmt};

use crate::app_dirs;

const FILTER_ENV: &str = "CHEW_LOG";
const DEFAULT_FILTER: &str = "chew=info,chew_core=info,chew_tui=info";
const LOG_FILE_NAME: &str = "chew.log";

/// Install the global subscriber. Returns the log file path when logging is
/// enabled.
pub fn initialize(log_file: Option<&Path>) -> Result<Option<PathBuf>> {
	let directive = env::var(FILTER_ENV).ok().filter(|value| !value.trim().is_empty());
	if directive.is_none() && log_file.is_none() {
		return Ok(None);
	}

	let path = match log_file {
		Some(path) => path.to_path_buf(),
		None => app_dirs::get_cache_dir()?.join(LOG_FILE_NAME),
	};
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	let filter = EnvFilter::try_new(directive.as_deref().unwrap_or(DEFAULT_FILTER))
		.with_context(|| format!("invalid {FILTER_ENV} directive"))?;
	Registry::default()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(Arc::new(file))
				.with_ansi(false)
				.with_target(true)
				.with_level(true),
		)
		.try_init()
		.context("failed to install the log subscriber")?;

	Ok(Some(path))
}
