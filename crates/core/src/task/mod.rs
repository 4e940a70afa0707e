//! Supervision of a single external command.
//!
//! [`start`] spawns the command and returns a [`TaskHandle`]. A supervisor
//! thread owns the child process and reports exactly one [`TaskEvent`] through
//! the sender it was given: the command exited, was killed on request, or
//! never started.

mod supervisor;

use std::fmt;
use std::time::Duration;

use chew_stream::{Prioritized, Priority};

pub use supervisor::{TaskHandle, start};

use crate::TaskError;

/// Time a cancelled command gets to exit after `SIGTERM` before it is killed.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// What happens to the command's stdout and stderr.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
	/// Redirect both streams to the null device.
	#[default]
	Discard,
	/// Buffer both streams and hand them back with the terminal event.
	Capture,
}

/// Command line and supervision options for one task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSpec {
	pub argv: Vec<String>,
	pub output: OutputMode,
	pub grace_period: Duration,
}

impl TaskSpec {
	pub fn new<I, S>(argv: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			argv: argv.into_iter().map(Into::into).collect(),
			output: OutputMode::Discard,
			grace_period: DEFAULT_GRACE_PERIOD,
		}
	}

	#[must_use]
	pub fn with_output(mut self, output: OutputMode) -> Self {
		self.output = output;
		self
	}

	#[must_use]
	pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
		self.grace_period = grace_period;
		self
	}

	/// The program name, if any.
	#[must_use]
	pub fn program(&self) -> Option<&str> {
		self.argv.first().map(String::as_str)
	}
}

/// Streams collected in [`OutputMode::Capture`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapturedOutput {
	pub stdout: Vec<u8>,
	pub stderr: Vec<u8>,
}

/// Lifecycle of a task as observed by its owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskStatus {
	Running,
	Exited(i32),
	Killed,
	FailedToStart(String),
}

impl fmt::Display for TaskStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TaskStatus::Running => f.write_str("running"),
			TaskStatus::Exited(code) => write!(f, "exited with code {code}"),
			TaskStatus::Killed => f.write_str("killed"),
			TaskStatus::FailedToStart(reason) => write!(f, "failed to start: {reason}"),
		}
	}
}

/// The single terminal event of a task.
#[derive(Debug)]
pub enum TaskEvent {
	/// The command exited on its own. Death by an outside signal is reported
	/// as `128 + signal`.
	Exited {
		code: i32,
		output: Option<CapturedOutput>,
	},
	/// The command was terminated because cancellation was requested.
	Killed { output: Option<CapturedOutput> },
	/// The command could not be spawned.
	FailedToStart(TaskError),
}

impl TaskEvent {
	#[must_use]
	pub fn status(&self) -> TaskStatus {
		match self {
			TaskEvent::Exited { code, .. } => TaskStatus::Exited(*code),
			TaskEvent::Killed { .. } => TaskStatus::Killed,
			TaskEvent::FailedToStart(error) => TaskStatus::FailedToStart(error.to_string()),
		}
	}

	/// Take the captured streams, if the task ran in capture mode.
	pub fn take_output(&mut self) -> Option<CapturedOutput> {
		match self {
			TaskEvent::Exited { output, .. } | TaskEvent::Killed { output } => output.take(),
			TaskEvent::FailedToStart(_) => None,
		}
	}
}

impl Prioritized for TaskEvent {
	fn priority(&self) -> Priority {
		Priority::Essential
	}
}

#[cfg(all(test, unix))]
mod tests;
