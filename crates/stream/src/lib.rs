//! Ordered event delivery across threads, with interrupt priority.
//!
//! Background producers (the terminal reader, a supervised subprocess, a
//! timer) hold an [`EventSender`] and push events without ever touching the
//! consumer's state. The consumer owns the matching [`EventQueue`] and pulls
//! events in batches. Within a batch arrival order is preserved, except that an
//! interrupt always comes first and discards queued input so shutdown stays
//! prompt and deterministic.
//!
//! ```
//! use std::time::Duration;
//!
//! use chew_stream::{EventQueue, Prioritized, Priority};
//!
//! #[derive(Debug, PartialEq)]
//! enum Msg {
//!     Key(char),
//!     Stop,
//! }
//!
//! impl Prioritized for Msg {
//!     fn priority(&self) -> Priority {
//!         match self {
//!             Msg::Key(_) => Priority::Input,
//!             Msg::Stop => Priority::Interrupt,
//!         }
//!     }
//! }
//!
//! let mut queue = EventQueue::new();
//! let tx = queue.sender();
//! tx.send(Msg::Key('a'));
//! tx.send(Msg::Stop);
//! let batch = queue.next_batch(Duration::from_millis(10)).unwrap();
//! assert_eq!(batch, vec![Msg::Stop]);
//! ```

use std::fmt;
use std::sync::mpsc::Sender;

mod queue;

pub use queue::{EventQueue, QueueError};

/// How the consumer treats an event when it shares a batch with others.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Priority {
	/// Supersedes every pending input event in the same batch.
	Interrupt,
	/// Never discarded, even when an interrupt is pending.
	Essential,
	/// Ordinary input. Dropped when an interrupt shares its batch.
	Input,
}

/// Events that can be classified for batch ordering.
pub trait Prioritized {
	/// Priority class of this event.
	fn priority(&self) -> Priority;
}

/// Producer half handed to background workers.
pub struct EventSender<E> {
	tx: Sender<E>,
}

impl<E> EventSender<E> {
	pub(crate) fn new(tx: Sender<E>) -> Self {
		Self { tx }
	}

	/// Push an event to the consumer.
	///
	/// Returns `false` once the consumer has gone away.
	pub fn send(&self, event: E) -> bool {
		self.tx.send(event).is_ok()
	}

	/// Wrap this sender so producers can emit a narrower event type.
	pub fn map<T>(self) -> MappedSender<T, E>
	where
		T: Into<E>,
	{
		MappedSender {
			inner: self,
			_marker: std::marker::PhantomData,
		}
	}
}

impl<E> Clone for EventSender<E> {
	fn clone(&self) -> Self {
		Self {
			tx: self.tx.clone(),
		}
	}
}

impl<E> fmt::Debug for EventSender<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("EventSender(..)")
	}
}

/// Sender that converts a producer-specific type into the queue's event type.
pub struct MappedSender<T, E> {
	inner: EventSender<E>,
	_marker: std::marker::PhantomData<fn(T)>,
}

impl<T: Into<E>, E> MappedSender<T, E> {
	/// Convert and push an event to the consumer.
	pub fn send(&self, event: T) -> bool {
		self.inner.send(event.into())
	}
}

impl<T, E> Clone for MappedSender<T, E> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
			_marker: std::marker::PhantomData,
		}
	}
}

impl<T, E> fmt::Debug for MappedSender<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("MappedSender(..)")
	}
}
