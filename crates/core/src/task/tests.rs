use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use chew_stream::EventQueue;

use super::*;

fn next_event(queue: &mut EventQueue<TaskEvent>) -> TaskEvent {
	let deadline = Instant::now() + Duration::from_secs(10);
	while Instant::now() < deadline {
		let mut batch = queue.next_batch(Duration::from_millis(50)).unwrap();
		if !batch.is_empty() {
			assert_eq!(batch.len(), 1, "a task reports exactly one event");
			return batch.remove(0);
		}
	}
	panic!("task produced no event");
}

fn shell(script: &str) -> TaskSpec {
	TaskSpec::new(["sh", "-c", script])
}

/// File a test script writes a background pid into.
fn pid_file(name: &str) -> PathBuf {
	let path = std::env::temp_dir().join(format!("chew-task-{}-{name}.pid", std::process::id()));
	let _ = fs::remove_file(&path);
	path
}

/// Wait until the script has written the pid of its background process.
fn read_pid(path: &Path) -> u32 {
	let deadline = Instant::now() + Duration::from_secs(5);
	while Instant::now() < deadline {
		if let Some(pid) = fs::read_to_string(path).ok().and_then(|text| text.trim().parse().ok()) {
			return pid;
		}
		thread::sleep(Duration::from_millis(10));
	}
	panic!("no pid written to {}", path.display());
}

/// Whether `pid` names a live process. Zombies waiting for their new parent
/// to reap them count as gone.
fn is_running(pid: u32) -> bool {
	match fs::read_to_string(format!("/proc/{pid}/stat")) {
		Ok(stat) => stat
			.rsplit_once(") ")
			.is_some_and(|(_, rest)| !rest.starts_with('Z')),
		Err(_) => Command::new("kill")
			.args(["-0", &pid.to_string()])
			.status()
			.is_ok_and(|status| status.success()),
	}
}

/// Poll briefly, since the kill may still be in flight when the event lands.
fn wait_gone(pid: u32) -> bool {
	let deadline = Instant::now() + Duration::from_secs(2);
	while Instant::now() < deadline {
		if !is_running(pid) {
			return true;
		}
		thread::sleep(Duration::from_millis(20));
	}
	false
}

fn background_script(path: &Path, tail: &str) -> String {
	format!("sleep 30 & echo $! > '{}'; {tail}", path.display())
}

#[test]
fn exit_code_is_reported() {
	let mut queue = EventQueue::new();
	let handle = start(shell("exit 3"), queue.sender().map());
	assert!(handle.pid().is_some());

	let event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Exited(3));
	handle.join();
}

#[test]
fn discard_mode_returns_no_output() {
	let mut queue = EventQueue::new();
	let _handle = start(shell("echo hidden"), queue.sender().map());

	let mut event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Exited(0));
	assert_eq!(event.take_output(), None);
}

#[test]
fn capture_mode_keeps_streams_apart() {
	let mut queue = EventQueue::new();
	let spec = shell("echo out; echo err >&2; exit 1").with_output(OutputMode::Capture);
	let _handle = start(spec, queue.sender().map());

	let mut event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Exited(1));
	let output = event.take_output().unwrap();
	assert_eq!(output.stdout, b"out\n");
	assert_eq!(output.stderr, b"err\n");
}

#[test]
fn cancel_terminates_and_reports_killed() {
	let mut queue = EventQueue::new();
	let started = Instant::now();
	let handle = start(TaskSpec::new(["sleep", "30"]), queue.sender().map());
	handle.cancel();
	handle.cancel();

	let event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Killed);
	assert!(started.elapsed() < Duration::from_secs(5));
	handle.join();
	assert!(queue.next_batch(Duration::from_millis(50)).unwrap().is_empty());
}

#[test]
fn child_ignoring_term_is_killed_after_grace_period() {
	let mut queue = EventQueue::new();
	let grace = Duration::from_millis(300);
	let spec = shell("trap '' TERM; echo ready; while :; do sleep 0.05; done")
		.with_grace_period(grace);
	let handle = start(spec, queue.sender().map());
	// Give the shell time to install the trap.
	std::thread::sleep(Duration::from_millis(200));

	let cancelled = Instant::now();
	handle.cancel();
	let event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Killed);
	assert!(cancelled.elapsed() >= grace);
}

#[test]
fn external_signal_maps_to_shell_convention() {
	let mut queue = EventQueue::new();
	let _handle = start(shell("kill -TERM $$"), queue.sender().map());

	let event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Exited(143));
}

#[test]
fn missing_program_fails_to_start() {
	let mut queue = EventQueue::new();
	let handle = start(
		TaskSpec::new(["chew-test-no-such-program"]),
		queue.sender().map(),
	);
	assert_eq!(handle.pid(), None);
	assert!(handle.is_finished());

	match next_event(&mut queue) {
		TaskEvent::FailedToStart(error) => assert!(error.is_not_found()),
		other => panic!("unexpected event: {other:?}"),
	}
}

#[test]
fn empty_command_fails_to_start() {
	let mut queue = EventQueue::new();
	let _handle = start(TaskSpec::new(Vec::<String>::new()), queue.sender().map());

	let event = next_event(&mut queue);
	assert_eq!(
		event.status(),
		TaskStatus::FailedToStart("no command given".into())
	);
}

#[test]
fn dropping_the_handle_reaps_the_child() {
	let mut queue = EventQueue::new();
	let started = Instant::now();
	let handle = start(TaskSpec::new(["sleep", "30"]), queue.sender().map());
	drop(handle);
	assert!(started.elapsed() < Duration::from_secs(5));

	let event = next_event(&mut queue);
	assert_eq!(event.status(), TaskStatus::Killed);
}

#[test]
fn cancel_reaches_forked_descendants() {
	let path = pid_file("discard-cancel");
	let mut queue = EventQueue::new();
	let spec = shell(&background_script(&path, "sleep 30; true")).with_grace_period(Duration::from_millis(500));
	let handle = start(spec, queue.sender().map());
	let descendant = read_pid(&path);
	assert!(is_running(descendant));

	let cancelled = Instant::now();
	handle.cancel();
	let event = next_event(&mut queue);
	handle.join();

	assert_eq!(event.status(), TaskStatus::Killed);
	assert!(cancelled.elapsed() < Duration::from_millis(500) + Duration::from_secs(1));
	assert!(wait_gone(descendant), "descendant {descendant} survived cancellation");
	let _ = fs::remove_file(&path);
}

#[test]
fn capture_cancel_is_not_held_open_by_descendants() {
	let path = pid_file("capture-cancel");
	let mut queue = EventQueue::new();
	let grace = Duration::from_millis(200);
	let script = format!("echo started; sleep 30 & echo $! > '{}'; sleep 30", path.display());
	let spec = shell(&script)
		.with_output(OutputMode::Capture)
		.with_grace_period(grace);
	let handle = start(spec, queue.sender().map());
	let descendant = read_pid(&path);

	let cancelled = Instant::now();
	handle.cancel();
	let mut event = next_event(&mut queue);

	assert_eq!(event.status(), TaskStatus::Killed);
	assert!(cancelled.elapsed() < grace + Duration::from_secs(1), "took {:?}", cancelled.elapsed());
	assert_eq!(event.take_output().unwrap().stdout, b"started\n");
	assert!(wait_gone(descendant), "descendant {descendant} survived cancellation");
	handle.join();
	let _ = fs::remove_file(&path);
}

#[test]
fn capture_exit_is_not_held_open_by_descendants() {
	let path = pid_file("capture-exit");
	let mut queue = EventQueue::new();
	let spec = shell(&background_script(&path, "echo done")).with_output(OutputMode::Capture);
	let started = Instant::now();
	let handle = start(spec, queue.sender().map());

	let mut event = next_event(&mut queue);
	let descendant = read_pid(&path);

	assert_eq!(event.status(), TaskStatus::Exited(0));
	assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
	assert_eq!(event.take_output().unwrap().stdout, b"done\n");
	assert!(wait_gone(descendant), "descendant {descendant} outlived the task");
	handle.join();
	let _ = fs::remove_file(&path);
}
