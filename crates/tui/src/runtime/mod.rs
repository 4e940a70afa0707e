//! The event loop shared by every interactive command.
//!
//! A [`Component`] owns its state and reacts to [`Event`]s; the [`Runtime`]
//! feeds it event batches, repaints the [`Surface`] when the component asks
//! for it, and stops when the component returns [`Transition::Exit`].
//! Everything runs on the calling thread. Background work (terminal input,
//! subprocesses) reaches the component only as events.

use std::io;
use std::time::{Duration, Instant};

use chew_stream::{EventSender, QueueError};
use ratatui::Frame;
use thiserror::Error;
use tracing::{debug, info};

use crate::event::{Event, EventSource};
use crate::surface::Surface;

/// Why a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitReason {
	/// The user confirmed a value.
	Submitted,
	/// The user (or a timeout) cancelled.
	Cancelled,
	/// The work the session was waiting on completed.
	TaskFinished,
	/// The session could not do its job.
	Aborted,
}

/// What the runtime should do after an `init` or `update`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
	/// Nothing visible changed.
	Continue,
	/// Repaint before waiting for more events.
	Redraw,
	Exit(ExitReason),
}

/// Handles available to a component while it runs.
pub struct Context {
	sender: EventSender<Event>,
	started_at: Instant,
}

impl Context {
	/// Producer handle into the session's event stream.
	#[must_use]
	pub fn sender(&self) -> EventSender<Event> {
		self.sender.clone()
	}

	/// Time since the session started.
	#[must_use]
	pub fn elapsed(&self) -> Duration {
		self.started_at.elapsed()
	}
}

/// A state machine driven by the runtime.
pub trait Component {
	/// Called once before any frame is drawn. Return [`Transition::Redraw`]
	/// to paint the first frame immediately.
	fn init(&mut self, cx: &mut Context) -> anyhow::Result<Transition>;

	fn update(&mut self, event: &Event, cx: &mut Context) -> anyhow::Result<Transition>;

	/// Paint the current state. Must not change it.
	fn render(&self, frame: &mut Frame<'_>);
}

/// Final status of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
	Running,
	Completed,
	Cancelled,
	Failed,
}

impl From<ExitReason> for SessionStatus {
	fn from(reason: ExitReason) -> Self {
		match reason {
			ExitReason::Submitted | ExitReason::TaskFinished => SessionStatus::Completed,
			ExitReason::Cancelled => SessionStatus::Cancelled,
			ExitReason::Aborted => SessionStatus::Failed,
		}
	}
}

/// One run of a component.
#[derive(Debug)]
pub struct Session<C> {
	pub status: SessionStatus,
	pub started_at: Instant,
	pub state: C,
}

/// A session that ran to a clean end.
#[derive(Debug)]
pub struct Finished<C> {
	pub session: Session<C>,
	pub reason: ExitReason,
}

impl<C> Finished<C> {
	/// The component in its final state.
	pub fn into_state(self) -> C {
		self.session.state
	}
}

/// Failures that end a session early. The last frame stays on screen.
#[derive(Debug, Error)]
pub enum RuntimeError {
	#[error("failed to initialize the session")]
	Startup(#[source] anyhow::Error),
	#[error("failed to render a frame")]
	Render(#[source] io::Error),
	#[error("failed to handle an event")]
	Update(#[source] anyhow::Error),
	#[error(transparent)]
	Disconnected(#[from] QueueError),
}

impl RuntimeError {
	/// Every runtime error aborts its session.
	#[must_use]
	pub fn exit_reason(&self) -> ExitReason {
		ExitReason::Aborted
	}
}

/// Drives a component against an event source and a surface.
pub struct Runtime<S, E> {
	surface: S,
	events: E,
}

impl<S: Surface, E: EventSource> Runtime<S, E> {
	pub fn new(surface: S, events: E) -> Self {
		Self { surface, events }
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Run `component` until it exits.
	///
	/// On a clean exit the surface is cleared. On error the loop stops
	/// immediately and whatever was drawn stays.
	pub fn run<C: Component>(&mut self, component: C) -> Result<Finished<C>, RuntimeError> {
		let mut session = Session {
			status: SessionStatus::Running,
			started_at: Instant::now(),
			state: component,
		};
		let mut cx = Context {
			sender: self.events.sender(),
			started_at: session.started_at,
		};

		let mut transition = session.state.init(&mut cx).map_err(RuntimeError::Startup)?;
		debug!(?transition, "session initialized");

		let reason = loop {
			match transition {
				Transition::Exit(reason) => break reason,
				Transition::Redraw => {
					let state = &session.state;
					self.surface
						.draw(&mut |frame| state.render(frame))
						.map_err(RuntimeError::Render)?;
				}
				Transition::Continue => {}
			}

			let batch = self.events.next_batch()?;
			transition = dispatch(&mut session.state, &batch, &mut cx)?;
		};

		self.surface.clear().map_err(RuntimeError::Render)?;
		session.status = reason.into();
		info!(?reason, elapsed = ?session.started_at.elapsed(), "session finished");
		Ok(Finished { session, reason })
	}
}

/// Feed a batch to the component, stopping at the first exit.
fn dispatch<C: Component>(
	component: &mut C,
	batch: &[Event],
	cx: &mut Context,
) -> Result<Transition, RuntimeError> {
	let mut dirty = false;
	for event in batch {
		if matches!(event, Event::Resize(..)) {
			dirty = true;
		}
		match component.update(event, cx).map_err(RuntimeError::Update)? {
			Transition::Continue => {}
			Transition::Redraw => dirty = true,
			exit @ Transition::Exit(_) => return Ok(exit),
		}
	}
	Ok(if dirty {
		Transition::Redraw
	} else {
		Transition::Continue
	})
}
