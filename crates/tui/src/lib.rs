//! Terminal front end for `chew`.
//!
//! Every command is a [`Component`] driven by the same [`Runtime`]: terminal
//! input, ticks and subprocess events arrive as [`Event`] batches, the
//! component updates its state, and the runtime repaints an inline viewport
//! on stderr only when asked to.

pub mod components;
pub mod event;
pub mod runtime;
pub mod session;
pub mod style;
pub mod surface;
#[cfg(test)]
mod testing;

#[cfg(unix)]
pub use event::SignalForwarder;
pub use event::{Event, EventSource, QueuedEvents, TerminalEvents};
pub use runtime::{Component, Context, ExitReason, Finished, Runtime, RuntimeError, SessionStatus, Transition};
pub use style::Theme;
pub use surface::{Headless, Surface, TerminalSurface, restore_terminal};
