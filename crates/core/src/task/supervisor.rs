use std::io::{self, Read};
use std::mem;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chew_stream::MappedSender;
use tracing::{debug, warn};

use super::{CapturedOutput, OutputMode, TaskEvent, TaskSpec};
use crate::TaskError;

/// How often the supervisor checks the child while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How long captured streams may stay open after the child is reaped. A
/// descendant that escaped cleanup can hold the pipes open indefinitely.
const OUTPUT_LINGER: Duration = Duration::from_millis(250);

/// Owner-side handle of a supervised command.
///
/// Dropping the handle cancels the command and waits for the supervisor
/// thread, so a task never outlives its owner.
#[derive(Debug)]
pub struct TaskHandle {
	pid: Option<u32>,
	cancel: Option<Sender<()>>,
	thread: Option<JoinHandle<()>>,
}

impl TaskHandle {
	fn inert() -> Self {
		Self {
			pid: None,
			cancel: None,
			thread: None,
		}
	}

	/// Process id of the child, if it was spawned.
	#[must_use]
	pub fn pid(&self) -> Option<u32> {
		self.pid
	}

	/// Ask the supervisor to terminate the command.
	///
	/// Repeated calls are harmless; the terminal event is still delivered
	/// exactly once.
	pub fn cancel(&self) {
		if let Some(cancel) = &self.cancel {
			let _ = cancel.send(());
		}
	}

	/// Whether the supervisor thread has finished (or never ran).
	#[must_use]
	pub fn is_finished(&self) -> bool {
		self.thread.as_ref().is_none_or(JoinHandle::is_finished)
	}

	/// Block until the supervisor thread has delivered its event and exited.
	pub fn join(mut self) {
		self.join_thread();
	}

	fn join_thread(&mut self) {
		if let Some(thread) = self.thread.take() {
			if thread.join().is_err() {
				warn!("task supervisor thread panicked");
			}
		}
	}
}

impl Drop for TaskHandle {
	fn drop(&mut self) {
		if !self.is_finished() {
			debug!(pid = ?self.pid, "task handle dropped while running; cancelling");
			self.cancel();
		}
		self.join_thread();
	}
}

/// Spawn the command described by `spec` and supervise it on a background
/// thread.
///
/// Exactly one [`TaskEvent`] is sent through `events`, including when the
/// command cannot be started at all.
pub fn start<E>(spec: TaskSpec, events: MappedSender<TaskEvent, E>) -> TaskHandle
where
	E: Send + 'static,
	TaskEvent: Into<E>,
{
	let Some((program, args)) = spec.argv.split_first() else {
		events.send(TaskEvent::FailedToStart(TaskError::EmptyCommand));
		return TaskHandle::inert();
	};

	let mut command = Command::new(program);
	command.args(args).stdin(Stdio::null());
	// The child leads a new process group, so signals reach everything it
	// forks.
	#[cfg(unix)]
	std::os::unix::process::CommandExt::process_group(&mut command, 0);
	match spec.output {
		OutputMode::Discard => {
			command.stdout(Stdio::null()).stderr(Stdio::null());
		}
		OutputMode::Capture => {
			command.stdout(Stdio::piped()).stderr(Stdio::piped());
		}
	}

	let mut child = match command.spawn() {
		Ok(child) => child,
		Err(error) => {
			debug!(program = %program, %error, "task failed to start");
			events.send(TaskEvent::FailedToStart(TaskError::Spawn {
				program: program.clone(),
				error,
			}));
			return TaskHandle::inert();
		}
	};

	let pid = child.id();
	debug!(pid, program = %program, "task spawned");

	let capture = match spec.output {
		OutputMode::Capture => Some(Capture::attach(&mut child)),
		OutputMode::Discard => None,
	};

	let (cancel_tx, cancel_rx) = mpsc::channel();
	let grace_period = spec.grace_period;
	let thread = thread::spawn(move || supervise(child, cancel_rx, grace_period, capture, events));

	TaskHandle {
		pid: Some(pid),
		cancel: Some(cancel_tx),
		thread: Some(thread),
	}
}

fn supervise<E>(
	mut child: Child,
	cancel: Receiver<()>,
	grace_period: Duration,
	capture: Option<Capture>,
	events: MappedSender<TaskEvent, E>,
) where
	TaskEvent: Into<E>,
{
	let pid = child.id();
	let (status, requested) = match wait_or_cancel(&mut child, &cancel, grace_period) {
		Ok(outcome) => outcome,
		Err(error) => {
			warn!(pid, %error, "lost track of task; killing it");
			let _ = child.kill();
			(child.wait().ok(), true)
		}
	};

	reap_group(pid);

	let output = capture.map(|capture| capture.collect(Instant::now() + OUTPUT_LINGER));
	let event = match status {
		Some(_) if requested => TaskEvent::Killed { output },
		None => TaskEvent::Killed { output },
		Some(status) => TaskEvent::Exited {
			code: exit_code(status),
			output,
		},
	};
	debug!(pid, status = %event.status(), "task finished");

	if !events.send(event) {
		debug!(pid, "task event dropped; consumer is gone");
	}
}

/// Wait for the child to exit, terminating it if cancellation arrives first.
/// Returns the exit status and whether termination was requested.
fn wait_or_cancel(
	child: &mut Child,
	cancel: &Receiver<()>,
	grace_period: Duration,
) -> io::Result<(Option<ExitStatus>, bool)> {
	loop {
		if let Some(status) = child.try_wait()? {
			return Ok((Some(status), false));
		}
		match cancel.recv_timeout(POLL_INTERVAL) {
			Ok(()) | Err(RecvTimeoutError::Disconnected) => {
				let status = terminate(child, grace_period)?;
				return Ok((Some(status), true));
			}
			Err(RecvTimeoutError::Timeout) => {}
		}
	}
}

/// Politely ask the child to stop, then force it after `grace_period`.
fn terminate(child: &mut Child, grace_period: Duration) -> io::Result<ExitStatus> {
	let pid = child.id();
	if let Err(error) = request_termination(child) {
		debug!(pid, %error, "termination request failed");
	}

	let deadline = Instant::now() + grace_period;
	loop {
		if let Some(status) = child.try_wait()? {
			return Ok(status);
		}
		if Instant::now() >= deadline {
			break;
		}
		thread::sleep(POLL_INTERVAL);
	}

	debug!(pid, ?grace_period, "grace period elapsed; killing task");
	if let Err(error) = force_termination(child) {
		debug!(pid, %error, "kill failed");
	}
	child.wait()
}

#[cfg(unix)]
fn request_termination(child: &mut Child) -> io::Result<()> {
	signal_group(child.id(), libc::SIGTERM)
}

#[cfg(not(unix))]
fn request_termination(child: &mut Child) -> io::Result<()> {
	child.kill()
}

#[cfg(unix)]
fn force_termination(child: &mut Child) -> io::Result<()> {
	signal_group(child.id(), libc::SIGKILL)
}

#[cfg(not(unix))]
fn force_termination(child: &mut Child) -> io::Result<()> {
	child.kill()
}

/// Kill whatever is left of the child's process group once the child itself
/// has been reaped.
#[cfg(unix)]
fn reap_group(pgid: u32) {
	match signal_group(pgid, libc::SIGKILL) {
		Ok(()) => debug!(pgid, "killed leftover processes of the task"),
		Err(error) if error.raw_os_error() == Some(libc::ESRCH) => {}
		Err(error) => debug!(pgid, %error, "failed to clean up the process group"),
	}
}

#[cfg(not(unix))]
fn reap_group(_pgid: u32) {}

/// Send `signal` to every process in the group led by `pgid`.
#[cfg(unix)]
fn signal_group(pgid: u32, signal: libc::c_int) -> io::Result<()> {
	let pgid = libc::pid_t::try_from(pgid).map_err(|_| io::Error::other("process id out of range"))?;
	// SAFETY: `kill` has no memory-safety preconditions. A negative pid
	// addresses the process group the child was spawned into.
	let result = unsafe { libc::kill(-pgid, signal) };
	if result == 0 {
		Ok(())
	} else {
		Err(io::Error::last_os_error())
	}
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
	use std::os::unix::process::ExitStatusExt;

	status
		.code()
		.or_else(|| status.signal().map(|signal| 128 + signal))
		.unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
	status.code().unwrap_or(1)
}

/// Reader threads draining the child's piped streams.
struct Capture {
	stdout: Option<Drain>,
	stderr: Option<Drain>,
}

impl Capture {
	fn attach(child: &mut Child) -> Self {
		Self {
			stdout: child.stdout.take().map(Drain::spawn),
			stderr: child.stderr.take().map(Drain::spawn),
		}
	}

	/// Gather the streams, waiting for end of file until `deadline` at most.
	fn collect(self, deadline: Instant) -> CapturedOutput {
		CapturedOutput {
			stdout: self.stdout.map(|drain| drain.finish(deadline)).unwrap_or_default(),
			stderr: self.stderr.map(|drain| drain.finish(deadline)).unwrap_or_default(),
		}
	}
}

/// One stream read on its own thread into a shared buffer.
struct Drain {
	buffer: Arc<Mutex<Vec<u8>>>,
	/// Disconnects when the reader hits end of file or an error.
	done: Receiver<()>,
}

impl Drain {
	fn spawn<R>(mut pipe: R) -> Self
	where
		R: Read + Send + 'static,
	{
		let buffer = Arc::new(Mutex::new(Vec::new()));
		let (done_tx, done) = mpsc::channel::<()>();
		let sink = Arc::clone(&buffer);
		thread::spawn(move || {
			let _done = done_tx;
			let mut chunk = [0; 8192];
			loop {
				match pipe.read(&mut chunk) {
					Ok(0) => break,
					Ok(read) => match sink.lock() {
						Ok(mut buffer) => buffer.extend_from_slice(&chunk[..read]),
						Err(_) => break,
					},
					Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
					Err(error) => {
						debug!(%error, "stopped reading task output");
						break;
					}
				}
			}
		});
		Self { buffer, done }
	}

	/// Whatever was read by the time the stream closed or `deadline` passed.
	fn finish(self, deadline: Instant) -> Vec<u8> {
		let remaining = deadline.saturating_duration_since(Instant::now());
		if let Err(RecvTimeoutError::Timeout) = self.done.recv_timeout(remaining) {
			debug!("task output still open after the task ended; keeping what arrived");
		}
		self.buffer
			.lock()
			.map(|mut buffer| mem::take(&mut *buffer))
			.unwrap_or_default()
	}
}
