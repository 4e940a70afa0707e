use std::io;

use thiserror::Error;

/// Reasons a supervised command could not be started.
#[derive(Debug, Error)]
pub enum TaskError {
	#[error("no command given")]
	EmptyCommand,
	#[error("failed to start `{program}`: {error}")]
	Spawn { program: String, error: io::Error },
}

impl TaskError {
	/// Whether the program could not be found on `PATH`.
	#[must_use]
	pub fn is_not_found(&self) -> bool {
		matches!(self, TaskError::Spawn { error, .. } if error.kind() == io::ErrorKind::NotFound)
	}
}
