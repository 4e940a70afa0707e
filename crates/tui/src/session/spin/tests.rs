use std::process::Command;
use std::thread;
use std::time::{Duration, Instant};

use chew_core::task::{OutputMode, TaskSpec};

use super::*;
use crate::event::EventSource;
use crate::runtime::{Runtime, SessionStatus};
use crate::surface::Headless;
use crate::testing::{Recording, fast_ticks, render_rows};

fn shell(script: &str) -> TaskSpec {
	TaskSpec::new(["sh", "-c", script])
}

fn options() -> SpinOptions {
	SpinOptions {
		title: "Working".into(),
		spinner: throbber_widgets_tui::ASCII,
		..SpinOptions::default()
	}
}

/// Zombies waiting for their new parent to reap them count as gone.
fn is_alive(pid: u32) -> bool {
	match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
		Ok(stat) => stat
			.rsplit_once(") ")
			.is_some_and(|(_, rest)| !rest.starts_with('Z')),
		Err(_) => Command::new("kill")
			.args(["-0", &pid.to_string()])
			.status()
			.is_ok_and(|status| status.success()),
	}
}

#[test]
fn command_exit_code_is_kept() {
	let mut runtime = Runtime::new(Headless, fast_ticks());
	let finished = runtime.run(SpinSession::new(shell("exit 3"), options())).unwrap();

	assert_eq!(finished.reason, ExitReason::TaskFinished);
	assert_eq!(finished.session.status, SessionStatus::Completed);
	assert_eq!(finished.session.state.exit_code(), Some(3));
}

#[test]
fn interrupt_waits_for_the_child_to_be_reaped() {
	let events = fast_ticks();
	let tx = events.sender();
	let mut runtime = Runtime::new(Recording::default(), events);

	let interrupter = thread::spawn(move || {
		thread::sleep(Duration::from_millis(100));
		tx.send(Event::Interrupt);
	});
	let finished = runtime
		.run(SpinSession::new(TaskSpec::new(["sleep", "30"]), options()))
		.unwrap();
	interrupter.join().unwrap();

	let state = &finished.session.state;
	assert_eq!(finished.reason, ExitReason::Cancelled);
	assert_eq!(state.phase(), &SpinPhase::Cancelled);
	assert!(!state.timed_out());
	let pid = state.pid().unwrap();
	assert!(!is_alive(pid), "child {pid} still running after the session returned");
}

#[test]
fn interrupt_stops_what_the_command_forked() {
	let path = std::env::temp_dir().join(format!("chew-spin-{}-forked.pid", std::process::id()));
	let _ = std::fs::remove_file(&path);
	let script = format!("sleep 30 & echo $! > '{}'; wait", path.display());

	let events = fast_ticks();
	let tx = events.sender();
	let mut runtime = Runtime::new(Headless, events);
	let pid_path = path.clone();
	let interrupter = thread::spawn(move || {
		let deadline = Instant::now() + Duration::from_secs(5);
		let mut descendant = None;
		while descendant.is_none() && Instant::now() < deadline {
			descendant = std::fs::read_to_string(&pid_path)
				.ok()
				.and_then(|text| text.trim().parse::<u32>().ok());
			thread::sleep(Duration::from_millis(10));
		}
		tx.send(Event::Interrupt);
		descendant
	});
	let finished = runtime.run(SpinSession::new(shell(&script), options())).unwrap();
	let descendant = interrupter.join().unwrap().expect("background pid");

	assert_eq!(finished.reason, ExitReason::Cancelled);
	let deadline = Instant::now() + Duration::from_secs(2);
	while is_alive(descendant) && Instant::now() < deadline {
		thread::sleep(Duration::from_millis(20));
	}
	assert!(!is_alive(descendant), "background process {descendant} outlived the session");
	let _ = std::fs::remove_file(&path);
}

#[test]
fn failed_start_exits_without_a_frame() {
	let mut runtime = Runtime::new(Recording::default(), fast_ticks());
	let finished = runtime
		.run(SpinSession::new(TaskSpec::new(["chew-test-missing-binary"]), options()))
		.unwrap();

	assert_eq!(finished.reason, ExitReason::Aborted);
	assert_eq!(finished.session.status, SessionStatus::Failed);
	assert!(finished.session.state.failure().unwrap().contains("chew-test-missing-binary"));
	assert_eq!(runtime.surface().draws, 0);
}

#[test]
fn timeout_cancels_the_command() {
	let spin_options = SpinOptions {
		timeout: Some(Duration::from_millis(50)),
		..options()
	};
	let started = Instant::now();
	let mut runtime = Runtime::new(Headless, fast_ticks());
	let finished = runtime
		.run(SpinSession::new(TaskSpec::new(["sleep", "30"]), spin_options))
		.unwrap();

	assert_eq!(finished.reason, ExitReason::Cancelled);
	assert!(finished.session.state.timed_out());
	assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn captured_output_is_returned() {
	let spec = shell("echo done; echo oops >&2; exit 2").with_output(OutputMode::Capture);
	let mut runtime = Runtime::new(Headless, fast_ticks());
	let mut state = runtime.run(SpinSession::new(spec, options())).unwrap().into_state();

	assert_eq!(state.exit_code(), Some(2));
	let output = state.take_output().unwrap();
	assert_eq!(output.stdout, b"done\n");
	assert_eq!(output.stderr, b"oops\n");
}

#[test]
fn spinner_sits_beside_the_title() {
	let session = SpinSession::new(shell("true"), options());
	let left = render_rows(&session, 20, 1);
	assert!(left[0].starts_with('|'), "unexpected row {:?}", left[0]);
	assert!(left[0].ends_with("Working"));

	let right = SpinSession::new(
		shell("true"),
		SpinOptions {
			align: Align::Right,
			..options()
		},
	);
	let row = &render_rows(&right, 20, 1)[0];
	assert!(row.starts_with("Working |"), "unexpected row {row:?}");
}

#[test]
fn spinner_names_resolve() {
	assert!(spinner("dots").is_some());
	assert!(spinner("LINE").is_some());
	assert!(spinner("nope").is_none());
	assert!(spinner_names().all(|name| spinner(name).is_some()));
}
