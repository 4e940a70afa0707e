use std::process::ExitCode;

use chew_tui::ExitReason;

/// Process exit status of a `chew` invocation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Exit(u8);

impl Exit {
	pub(crate) const SUCCESS: Exit = Exit(0);
	pub(crate) const FAILURE: Exit = Exit(1);
	/// Cancelled by the user, a signal or a timeout.
	pub(crate) const CANCELLED: Exit = Exit(130);

	/// Pass a child's exit code through. Codes outside `0..=255` become a
	/// generic failure.
	pub(crate) fn from_command(code: i32) -> Self {
		u8::try_from(code).map_or(Self::FAILURE, Exit)
	}

	pub(crate) fn from_reason(reason: ExitReason) -> Self {
		match reason {
			ExitReason::Submitted | ExitReason::TaskFinished => Self::SUCCESS,
			ExitReason::Cancelled => Self::CANCELLED,
			ExitReason::Aborted => Self::FAILURE,
		}
	}

	pub(crate) fn code(self) -> u8 {
		self.0
	}
}

impl From<Exit> for ExitCode {
	fn from(exit: Exit) -> Self {
		ExitCode::from(exit.0)
	}
}
