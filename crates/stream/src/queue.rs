use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use thiserror::Error;

use crate::{EventSender, Prioritized, Priority};

/// Failure to pull events from the queue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
	/// Every producer, including the queue's own handle, has gone away.
	#[error("event channel disconnected")]
	Disconnected,
}

/// Consumer half of the event channel.
///
/// The queue keeps a sender of its own so that it never observes a
/// disconnect while it is alive; an idle queue simply times out.
pub struct EventQueue<E> {
	tx: Sender<E>,
	rx: Receiver<E>,
}

impl<E> Default for EventQueue<E> {
	fn default() -> Self {
		let (tx, rx) = mpsc::channel();
		Self { tx, rx }
	}
}

impl<E: Prioritized> EventQueue<E> {
	/// Create an empty queue.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Hand out a producer handle.
	#[must_use]
	pub fn sender(&self) -> EventSender<E> {
		EventSender::new(self.tx.clone())
	}

	/// Wait up to `timeout` for at least one event, then drain whatever else
	/// is already pending.
	///
	/// An empty batch means the timeout elapsed. When the drained events
	/// contain an interrupt, the batch is the first interrupt followed by the
	/// essential events in arrival order; input events and later interrupts
	/// are discarded.
	pub fn next_batch(&mut self, timeout: Duration) -> Result<Vec<E>, QueueError> {
		let first = match self.rx.recv_timeout(timeout) {
			Ok(event) => event,
			Err(RecvTimeoutError::Timeout) => return Ok(Vec::new()),
			Err(RecvTimeoutError::Disconnected) => return Err(QueueError::Disconnected),
		};

		let mut pending = vec![first];
		loop {
			match self.rx.try_recv() {
				Ok(event) => pending.push(event),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => break,
			}
		}

		Ok(prioritize(pending))
	}
}

fn prioritize<E: Prioritized>(pending: Vec<E>) -> Vec<E> {
	let Some(position) = pending
		.iter()
		.position(|event| event.priority() == Priority::Interrupt)
	else {
		return pending;
	};

	let mut batch = Vec::with_capacity(pending.len());
	let mut interrupt = None;
	for (index, event) in pending.into_iter().enumerate() {
		if index == position {
			interrupt = Some(event);
		} else if event.priority() == Priority::Essential {
			batch.push(event);
		}
	}
	if let Some(interrupt) = interrupt {
		batch.insert(0, interrupt);
	}
	batch
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	#[derive(Debug, PartialEq)]
	enum Probe {
		Key(char),
		Done(u8),
		Stop,
	}

	impl Prioritized for Probe {
		fn priority(&self) -> Priority {
			match self {
				Probe::Key(_) => Priority::Input,
				Probe::Done(_) => Priority::Essential,
				Probe::Stop => Priority::Interrupt,
			}
		}
	}

	const WAIT: Duration = Duration::from_millis(200);

	#[test]
	fn idle_queue_times_out_with_empty_batch() {
		let mut queue = EventQueue::<Probe>::new();
		let batch = queue.next_batch(Duration::from_millis(5)).unwrap();
		assert!(batch.is_empty());
	}

	#[test]
	fn events_arrive_in_order() {
		let mut queue = EventQueue::new();
		let tx = queue.sender();
		tx.send(Probe::Key('a'));
		tx.send(Probe::Done(1));
		tx.send(Probe::Key('b'));

		let batch = queue.next_batch(WAIT).unwrap();
		assert_eq!(batch, vec![Probe::Key('a'), Probe::Done(1), Probe::Key('b')]);
	}

	#[test]
	fn interrupt_supersedes_pending_input() {
		let mut queue = EventQueue::new();
		let tx = queue.sender();
		tx.send(Probe::Key('a'));
		tx.send(Probe::Key('b'));
		tx.send(Probe::Stop);
		tx.send(Probe::Key('c'));
		tx.send(Probe::Stop);

		let batch = queue.next_batch(WAIT).unwrap();
		assert_eq!(batch, vec![Probe::Stop]);
	}

	#[test]
	fn interrupt_keeps_essential_events() {
		let mut queue = EventQueue::new();
		let tx = queue.sender();
		tx.send(Probe::Done(7));
		tx.send(Probe::Key('x'));
		tx.send(Probe::Stop);
		tx.send(Probe::Done(8));

		let batch = queue.next_batch(WAIT).unwrap();
		assert_eq!(batch, vec![Probe::Stop, Probe::Done(7), Probe::Done(8)]);
	}

	#[test]
	fn producers_on_other_threads_reach_the_queue() {
		let mut queue = EventQueue::new();
		let tx = queue.sender();
		let worker = thread::spawn(move || {
			tx.send(Probe::Done(3));
		});
		worker.join().unwrap();

		let batch = queue.next_batch(WAIT).unwrap();
		assert_eq!(batch, vec![Probe::Done(3)]);
	}

	#[test]
	fn mapped_sender_converts_events() {
		struct Finished(u8);
		impl From<Finished> for Probe {
			fn from(value: Finished) -> Self {
				Probe::Done(value.0)
			}
		}

		let mut queue = EventQueue::<Probe>::new();
		let mapped = queue.sender().map::<Finished>();
		assert!(mapped.send(Finished(9)));

		let batch = queue.next_batch(WAIT).unwrap();
		assert_eq!(batch, vec![Probe::Done(9)]);
	}
}
