//! Events consumed by the runtime and the sources that produce them.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chew_core::TaskEvent;
use chew_stream::{EventQueue, EventSender, Prioritized, Priority, QueueError};
use ratatui::crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

/// How long the terminal reader blocks in `poll` before rechecking its stop flag.
const READER_POLL: Duration = Duration::from_millis(50);

/// Everything a session can react to.
#[derive(Debug)]
pub enum Event {
	Key(KeyEvent),
	Paste(String),
	Resize(u16, u16),
	/// Periodic heartbeat; drives animations and timeouts.
	Tick,
	/// Ctrl-C, or any other request to stop now.
	Interrupt,
	/// Terminal event of the supervised task.
	Task(TaskEvent),
}

impl Prioritized for Event {
	fn priority(&self) -> Priority {
		match self {
			Event::Interrupt => Priority::Interrupt,
			Event::Task(_) => Priority::Essential,
			Event::Key(_) | Event::Paste(_) | Event::Resize(..) | Event::Tick => Priority::Input,
		}
	}
}

impl From<TaskEvent> for Event {
	fn from(event: TaskEvent) -> Self {
		Event::Task(event)
	}
}

/// Translate a raw terminal event. Returns `None` for events sessions ignore.
#[must_use]
pub fn translate(raw: event::Event) -> Option<Event> {
	match raw {
		event::Event::Key(key) if key.kind == KeyEventKind::Release => None,
		event::Event::Key(key) if is_interrupt(&key) => Some(Event::Interrupt),
		event::Event::Key(key) => Some(Event::Key(key)),
		event::Event::Paste(text) => Some(Event::Paste(text)),
		event::Event::Resize(width, height) => Some(Event::Resize(width, height)),
		_ => None,
	}
}

fn is_interrupt(key: &KeyEvent) -> bool {
	key.modifiers.contains(KeyModifiers::CONTROL)
		&& matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// A stream of event batches for the runtime loop.
pub trait EventSource {
	/// Handle for producers that feed this source (tasks, timers).
	fn sender(&self) -> EventSender<Event>;

	/// Block until events are available or the next tick is due.
	///
	/// An interrupt, when present, is the first event of the batch.
	fn next_batch(&mut self) -> Result<Vec<Event>, QueueError>;
}

/// Event queue with a tick timer and no terminal attached.
///
/// Used directly for headless runs and tests, and as the backbone of
/// [`TerminalEvents`].
pub struct QueuedEvents {
	queue: EventQueue<Event>,
	tick_rate: Duration,
	last_tick: Instant,
}

impl QueuedEvents {
	#[must_use]
	pub fn new(tick_rate: Duration) -> Self {
		Self {
			queue: EventQueue::new(),
			tick_rate,
			last_tick: Instant::now(),
		}
	}
}

impl EventSource for QueuedEvents {
	fn sender(&self) -> EventSender<Event> {
		self.queue.sender()
	}

	fn next_batch(&mut self) -> Result<Vec<Event>, QueueError> {
		let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
		let mut batch = self.queue.next_batch(timeout)?;
		let interrupted = matches!(batch.first(), Some(Event::Interrupt));
		if !interrupted && self.last_tick.elapsed() >= self.tick_rate {
			batch.push(Event::Tick);
			self.last_tick = Instant::now();
		}
		Ok(batch)
	}
}

/// Terminal input merged with the task and tick streams.
///
/// A reader thread polls crossterm and forwards translated events into the
/// shared queue. The thread stops when this value is dropped.
pub struct TerminalEvents {
	inner: QueuedEvents,
	running: Arc<AtomicBool>,
	reader: Option<JoinHandle<io::Result<()>>>,
}

impl TerminalEvents {
	#[must_use]
	pub fn spawn(tick_rate: Duration) -> Self {
		let inner = QueuedEvents::new(tick_rate);
		let running = Arc::new(AtomicBool::new(true));
		let flag = Arc::clone(&running);
		let tx = inner.sender();

		let reader = thread::spawn(move || -> io::Result<()> {
			while flag.load(Ordering::Relaxed) {
				if event::poll(READER_POLL)? {
					let Some(event) = translate(event::read()?) else {
						continue;
					};
					if !tx.send(event) {
						break;
					}
				}
			}
			Ok(())
		});

		Self {
			inner,
			running,
			reader: Some(reader),
		}
	}
}

impl EventSource for TerminalEvents {
	fn sender(&self) -> EventSender<Event> {
		self.inner.sender()
	}

	fn next_batch(&mut self) -> Result<Vec<Event>, QueueError> {
		self.inner.next_batch()
	}
}

impl Drop for TerminalEvents {
	fn drop(&mut self) {
		self.running.store(false, Ordering::Relaxed);
		if let Some(reader) = self.reader.take() {
			match reader.join() {
				Ok(Ok(())) => {}
				Ok(Err(error)) => debug!(%error, "terminal reader stopped with an error"),
				Err(_) => debug!("terminal reader panicked"),
			}
		}
	}
}

/// Turns SIGINT and SIGTERM into [`Event::Interrupt`] while alive.
///
/// In raw mode Ctrl-C arrives as a key, but a headless run or an external
/// `kill` still delivers signals, and the session must get the chance to stop
/// its child before the process exits. Dropping it hands both signals back
/// to their default action.
#[cfg(unix)]
pub struct SignalForwarder {
	handle: signal_hook::iterator::Handle,
	thread: Option<JoinHandle<()>>,
	/// Once set, the signals take their default action again.
	released: Arc<AtomicBool>,
}

#[cfg(unix)]
impl SignalForwarder {
	pub fn spawn(sender: EventSender<Event>) -> io::Result<Self> {
		use signal_hook::consts::{SIGINT, SIGTERM};

		let released = Arc::new(AtomicBool::new(false));
		for signal in [SIGINT, SIGTERM] {
			signal_hook::flag::register_conditional_default(signal, Arc::clone(&released))?;
		}
		let mut signals = signal_hook::iterator::Signals::new([SIGINT, SIGTERM])?;
		let handle = signals.handle();
		let thread = thread::spawn(move || {
			for signal in signals.forever() {
				debug!(signal, "signal received");
				if !sender.send(Event::Interrupt) {
					break;
				}
			}
		});

		Ok(Self {
			handle,
			thread: Some(thread),
			released,
		})
	}
}

#[cfg(unix)]
impl Drop for SignalForwarder {
	fn drop(&mut self) {
		self.handle.close();
		if let Some(thread) = self.thread.take() {
			let _ = thread.join();
		}
		// The low-level handlers stay installed; they now fall through to
		// the default disposition instead of feeding a closed iterator.
		self.released.store(true, Ordering::SeqCst);
	}
}
