//! Delivers real signals to the test process. Kept in its own test binary so the
//! signals cannot reach orchestrators started by other tests.
#![cfg(unix)]

mod common;

use std::os::unix::process::ExitStatusExt;
use std::process::Command;
use std::time::Duration;

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;
use servisor::{
    Config, MSG_GRACEFUL, MSG_SHUTDOWN_RECEIVED, Orchestrator, ServiceRef, ShutdownOutcome,
};
use tokio_util::sync::CancellationToken;

use common::{TestService, RecordingLogger, ShutdownMode};

#[tokio::test(flavor = "multi_thread")]
async fn test_sigterm_triggers_graceful_shutdown() {
    let logger = RecordingLogger::new();
    let a = TestService::new(ShutdownMode::Immediate);
    let b = TestService::new(ShutdownMode::Immediate);

    tokio::spawn(async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        kill(Pid::this(), Signal::SIGTERM).expect("send SIGTERM to self");
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        servisor::run_with_shutdown(
            logger.clone(),
            Duration::from_secs(1),
            [a.clone() as ServiceRef, b.clone() as ServiceRef],
        ),
    )
    .await
    .expect("SIGTERM must end the run phase")
    .expect("signals armed");

    assert_eq!(outcome, ShutdownOutcome::Graceful);
    assert_eq!(a.runs(), 1);
    assert_eq!(b.runs(), 1);
    assert_eq!(a.shutdowns().len(), 1);
    assert_eq!(b.shutdowns().len(), 1);

    let records = logger.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].msg, MSG_SHUTDOWN_RECEIVED);
    assert_eq!(
        records[0].fields,
        vec![("timeout".to_string(), "1s".to_string())]
    );
    assert_eq!(records[1].msg, MSG_GRACEFUL);
}

/// Set in the re-executed child that sends SIGINT to itself.
const CHILD_ENV: &str = "SERVISOR_SIGNAL_CHILD";
const AFTER_RETURN_TEST: &str = "test_sigint_after_return_terminates_process";

#[test]
fn test_sigint_after_return_terminates_process() {
    if std::env::var_os(CHILD_ENV).is_some() {
        sigint_after_return();
    }

    let exe = std::env::current_exe().expect("test binary path");
    let status = Command::new(exe)
        .args(["--exact", AFTER_RETURN_TEST, "--test-threads=1", "--nocapture"])
        .env(CHILD_ENV, "1")
        .status()
        .expect("spawn child test process");

    assert_eq!(
        status.signal(),
        Some(Signal::SIGINT as i32),
        "SIGINT must terminate the process once the orchestrator returned, got {status:?}"
    );
}

/// Child side: one full orchestrator run, then SIGINT to self. Exits with code 3 only
/// if the signal was swallowed.
fn sigint_after_return() -> ! {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    rt.block_on(async {
        let parent = CancellationToken::new();
        parent.cancel();
        let outcome = Orchestrator::builder(Config::default())
            .build()
            .run_until(parent, Vec::<ServiceRef>::new())
            .await
            .expect("signals armed");
        assert_eq!(outcome, ShutdownOutcome::Graceful);
    });

    kill(Pid::this(), Signal::SIGINT).expect("send SIGINT to self");
    std::thread::sleep(Duration::from_secs(2));
    std::process::exit(3);
}
