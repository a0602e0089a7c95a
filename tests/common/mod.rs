#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use servisor::{Field, Level, Logger, Service, ShutdownContext};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// One captured log call.
#[derive(Clone, Debug)]
pub struct Record {
    pub level: Level,
    pub msg: String,
    pub fields: Vec<(String, String)>,
    pub ctx_cancelled: bool,
}

/// Logger that keeps every call in memory.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<Record>>,
}

impl RecordingLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.msg).collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, ctx: &CancellationToken, level: Level, msg: &str, fields: &[Field]) {
        self.records.lock().unwrap().push(Record {
            level,
            msg: msg.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            ctx_cancelled: ctx.is_cancelled(),
        });
    }
}

/// How a [`TestService`] behaves in its shutdown phase.
#[derive(Clone, Copy, Debug)]
pub enum ShutdownMode {
    /// Returns right away.
    Immediate,
    /// Never returns.
    Hang,
    /// Sleeps, then returns.
    Sleep(Duration),
    /// Panics with "shutdown fault".
    Panic,
}

/// What a [`TestService`] observed during one shutdown call.
#[derive(Clone, Debug)]
pub struct ShutdownSeen {
    pub at: Instant,
    pub deadline: Instant,
    pub run_token_cancelled: bool,
}

/// Service that records every interaction.
pub struct TestService {
    mode: ShutdownMode,
    cancel_own_run: bool,
    panic_in_run: bool,
    runs: AtomicUsize,
    run_token: Mutex<Option<CancellationToken>>,
    shutdowns: Mutex<Vec<ShutdownSeen>>,
}

impl TestService {
    pub fn new(mode: ShutdownMode) -> Arc<Self> {
        Self::build(mode, false, false)
    }

    /// Service whose `run` cancels the token it was given shortly after starting.
    pub fn cancelling(mode: ShutdownMode) -> Arc<Self> {
        Self::build(mode, true, false)
    }

    /// Service whose `run` panics with "run fault" shortly after starting.
    pub fn panicking_run() -> Arc<Self> {
        Self::build(ShutdownMode::Immediate, false, true)
    }

    fn build(mode: ShutdownMode, cancel_own_run: bool, panic_in_run: bool) -> Arc<Self> {
        Arc::new(Self {
            mode,
            cancel_own_run,
            panic_in_run,
            runs: AtomicUsize::new(0),
            run_token: Mutex::new(None),
            shutdowns: Mutex::new(Vec::new()),
        })
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> Vec<ShutdownSeen> {
        self.shutdowns.lock().unwrap().clone()
    }

    pub fn run_token(&self) -> Option<CancellationToken> {
        self.run_token.lock().unwrap().clone()
    }
}

#[async_trait]
impl Service for TestService {
    async fn run(&self, ctx: CancellationToken) {
        self.runs.fetch_add(1, Ordering::SeqCst);
        *self.run_token.lock().unwrap() = Some(ctx.clone());

        if self.panic_in_run {
            tokio::time::sleep(Duration::from_millis(20)).await;
            panic!("run fault");
        }
        if self.cancel_own_run {
            tokio::time::sleep(Duration::from_millis(20)).await;
            ctx.cancel();
        }
        ctx.cancelled().await;
    }

    async fn shutdown(&self, ctx: ShutdownContext) {
        let run_token_cancelled = self
            .run_token
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| t.is_cancelled())
            .unwrap_or(false);
        self.shutdowns.lock().unwrap().push(ShutdownSeen {
            at: Instant::now(),
            deadline: ctx.deadline(),
            run_token_cancelled,
        });

        match self.mode {
            ShutdownMode::Immediate => {}
            ShutdownMode::Hang => std::future::pending::<()>().await,
            ShutdownMode::Sleep(d) => tokio::time::sleep(d).await,
            ShutdownMode::Panic => panic!("shutdown fault"),
        }
    }
}

/// Cancels `token` after `delay` on a background task.
pub fn cancel_after(token: &CancellationToken, delay: Duration) {
    let token = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        token.cancel();
    });
}
