//! Spinner shown while a command runs.

use std::time::Duration;

use anyhow::Context as _;
use chew_core::task::{self, CapturedOutput, TaskEvent, TaskHandle, TaskSpec};
use ratatui::Frame;
use ratatui::text::{Line, Span};
use throbber_widgets_tui::{Set, Throbber, ThrobberState};
use tracing::{debug, info};

use crate::event::Event;
use crate::runtime::{Component, Context, ExitReason, Transition};
use crate::style::Theme;

/// Spinner styles by name.
const SPINNERS: &[(&str, Set)] = &[
	("dots", throbber_widgets_tui::BRAILLE_SIX),
	("minidot", throbber_widgets_tui::BRAILLE_ONE),
	("points", throbber_widgets_tui::BRAILLE_DOUBLE),
	("braille", throbber_widgets_tui::BRAILLE_EIGHT),
	("line", throbber_widgets_tui::ASCII),
	("pulse", throbber_widgets_tui::VERTICAL_BLOCK),
	("meter", throbber_widgets_tui::HORIZONTAL_BLOCK),
	("arrow", throbber_widgets_tui::ARROW),
	("box", throbber_widgets_tui::BOX_DRAWING),
	("quadrant", throbber_widgets_tui::QUADRANT_BLOCK),
	("circle", throbber_widgets_tui::WHITE_CIRCLE),
	("clock", throbber_widgets_tui::CLOCK),
];

/// Look up a spinner style by name.
#[must_use]
pub fn spinner(name: &str) -> Option<Set> {
	SPINNERS
		.iter()
		.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
		.map(|(_, set)| set.clone())
}

/// Names accepted by [`spinner`].
pub fn spinner_names() -> impl Iterator<Item = &'static str> {
	SPINNERS.iter().map(|(name, _)| *name)
}

/// Which side of the title the spinner sits on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Align {
	#[default]
	Left,
	Right,
}

#[derive(Clone, Debug)]
pub struct SpinOptions {
	pub title: String,
	pub spinner: Set,
	pub align: Align,
	/// Cancel the command once this much time has passed.
	pub timeout: Option<Duration>,
	pub theme: Theme,
}

impl Default for SpinOptions {
	fn default() -> Self {
		Self {
			title: "Loading...".into(),
			spinner: throbber_widgets_tui::BRAILLE_SIX,
			align: Align::Left,
			timeout: None,
			theme: Theme::default(),
		}
	}
}

/// Where the supervised command is in its life.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpinPhase {
	/// Spawn requested; nothing drawn yet.
	Starting,
	Running,
	/// Termination requested; waiting for the child to be reaped.
	Cancelling,
	Finished(i32),
	Cancelled,
	Failed(String),
}

pub struct SpinSession {
	spec: Option<TaskSpec>,
	options: SpinOptions,
	phase: SpinPhase,
	throbber: ThrobberState,
	handle: Option<TaskHandle>,
	output: Option<CapturedOutput>,
	timed_out: bool,
}

impl SpinSession {
	#[must_use]
	pub fn new(spec: TaskSpec, options: SpinOptions) -> Self {
		Self {
			spec: Some(spec),
			options,
			phase: SpinPhase::Starting,
			throbber: ThrobberState::default(),
			handle: None,
			output: None,
			timed_out: false,
		}
	}

	/// Process id of the command, once spawned.
	#[must_use]
	pub fn pid(&self) -> Option<u32> {
		self.handle.as_ref().and_then(TaskHandle::pid)
	}

	#[must_use]
	pub fn phase(&self) -> &SpinPhase {
		&self.phase
	}

	/// Exit code of a command that finished on its own.
	#[must_use]
	pub fn exit_code(&self) -> Option<i32> {
		match self.phase {
			SpinPhase::Finished(code) => Some(code),
			_ => None,
		}
	}

	/// Why the command could not be started.
	#[must_use]
	pub fn failure(&self) -> Option<&str> {
		match &self.phase {
			SpinPhase::Failed(reason) => Some(reason),
			_ => None,
		}
	}

	/// Whether cancellation came from the timeout rather than the user.
	#[must_use]
	pub fn timed_out(&self) -> bool {
		self.timed_out
	}

	/// Output captured from the command, if capture was requested.
	pub fn take_output(&mut self) -> Option<CapturedOutput> {
		self.output.take()
	}

	fn cancel(&mut self) -> Transition {
		match self.phase {
			SpinPhase::Starting | SpinPhase::Running => {
				if let Some(handle) = &self.handle {
					debug!(pid = ?handle.pid(), "cancelling command");
					handle.cancel();
				}
				self.phase = SpinPhase::Cancelling;
				Transition::Redraw
			}
			_ => Transition::Continue,
		}
	}

	fn on_tick(&mut self, elapsed: Duration) -> Transition {
		if self.options.timeout.is_some_and(|timeout| elapsed >= timeout)
			&& matches!(self.phase, SpinPhase::Starting | SpinPhase::Running)
		{
			info!(?elapsed, "command timed out");
			self.timed_out = true;
			return self.cancel();
		}
		match self.phase {
			SpinPhase::Starting => {
				self.phase = SpinPhase::Running;
				Transition::Redraw
			}
			SpinPhase::Running | SpinPhase::Cancelling => {
				self.throbber.calc_next();
				Transition::Redraw
			}
			_ => Transition::Continue,
		}
	}

	fn on_task(&mut self, event: &TaskEvent) -> Transition {
		match event {
			TaskEvent::Exited { code, output } => {
				self.output.clone_from(output);
				if self.phase == SpinPhase::Cancelling {
					self.phase = SpinPhase::Cancelled;
					Transition::Exit(ExitReason::Cancelled)
				} else {
					self.phase = SpinPhase::Finished(*code);
					Transition::Exit(ExitReason::TaskFinished)
				}
			}
			TaskEvent::Killed { output } => {
				self.output.clone_from(output);
				self.phase = SpinPhase::Cancelled;
				Transition::Exit(ExitReason::Cancelled)
			}
			TaskEvent::FailedToStart(error) => {
				self.phase = SpinPhase::Failed(error.to_string());
				Transition::Exit(ExitReason::Aborted)
			}
		}
	}
}

impl Component for SpinSession {
	fn init(&mut self, cx: &mut Context) -> anyhow::Result<Transition> {
		let spec = self.spec.take().context("spinner session started twice")?;
		debug!(argv = ?spec.argv, "starting command");
		self.handle = Some(task::start(spec, cx.sender().map()));
		Ok(Transition::Continue)
	}

	fn update(&mut self, event: &Event, cx: &mut Context) -> anyhow::Result<Transition> {
		Ok(match event {
			Event::Tick => self.on_tick(cx.elapsed()),
			Event::Interrupt => self.cancel(),
			Event::Task(task_event) => self.on_task(task_event),
			Event::Key(_) | Event::Paste(_) | Event::Resize(..) => Transition::Continue,
		})
	}

	fn render(&self, frame: &mut Frame<'_>) {
		let theme = &self.options.theme;
		let throbber = Throbber::default()
			.throbber_set(self.options.spinner.clone())
			.style(theme.accent)
			.throbber_style(theme.accent);
		let symbol = throbber.to_symbol_span(&self.throbber);
		let title = Span::styled(self.options.title.as_str(), theme.title);

		let line = match self.options.align {
			Align::Left => Line::from(vec![symbol, title]),
			Align::Right => Line::from(vec![title, Span::raw(" "), symbol]),
		};
		frame.render_widget(line, frame.area());
	}
}

#[cfg(all(test, unix))]
mod tests;
