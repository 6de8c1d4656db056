//! Background worker: periodic refresh ticks and `git fetch`.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use tokio::{
    process::Command,
    sync::mpsc,
    time::{self, Instant, Interval, MissedTickBehavior},
};

use crate::{
    askpass::{self, Credentials},
    config::Config,
};

/// Commands sent from the UI to the worker.
#[derive(Debug)]
pub enum WorkerCmd {
    /// Fetch from the default remote, optionally with credentials.
    Fetch { credentials: Option<Credentials> },
    Shutdown,
}

/// Events emitted by the worker for UI updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerEvent {
    /// Time to reload the files panel.
    RefreshFiles,
    FetchDone,
    /// The remote asked for credentials git could not provide.
    FetchNeedsCredentials,
    /// User-visible error message.
    Error(String),
    /// Informational log message.
    Log(String),
}

/// Timing and location the worker runs with.
#[derive(Clone, Debug)]
pub struct WorkerSettings {
    pub repo_path: PathBuf,
    pub refresh_interval: Duration,
    /// `None` disables background fetches.
    pub fetch_interval: Option<Duration>,
}

impl WorkerSettings {
    /// Intervals from the `[gui]` table; refresh never runs faster than
    /// every 100ms.
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            repo_path: PathBuf::from(&cfg.git.repo_path),
            refresh_interval: Duration::from_millis(cfg.gui.refresh_interval_ms.max(100)),
            fetch_interval: (cfg.gui.fetch_interval_secs > 0)
                .then(|| Duration::from_secs(cfg.gui.fetch_interval_secs)),
        }
    }
}

/// Main worker loop: handle commands and timers until shutdown.
pub async fn run(
    mut rx: mpsc::Receiver<WorkerCmd>,
    tx: mpsc::Sender<WorkerEvent>,
    settings: WorkerSettings,
) {
    tracing::info!("worker started");
    let mut refresh = ticker(settings.refresh_interval);
    let mut background_fetch = settings.fetch_interval.map(ticker);

    loop {
        tokio::select! {
            cmd = rx.recv() => match cmd {
                Some(WorkerCmd::Fetch { credentials }) => {
                    tracing::info!("fetch requested");
                    let ev = fetch(&settings.repo_path, credentials.as_ref()).await;
                    if tx.send(ev).await.is_err() {
                        break;
                    }
                }
                Some(WorkerCmd::Shutdown) | None => break,
            },
            _ = refresh.tick() => {
                if tx.send(WorkerEvent::RefreshFiles).await.is_err() {
                    break;
                }
            }
            _ = maybe_tick(&mut background_fetch) => {
                // Nobody is there to type credentials for a background fetch.
                let ev = match fetch(&settings.repo_path, None).await {
                    WorkerEvent::FetchDone => WorkerEvent::FetchDone,
                    other => {
                        tracing::warn!("background fetch failed: {other:?}");
                        WorkerEvent::Log(format!("background fetch failed: {other:?}"))
                    }
                };
                if tx.send(ev).await.is_err() {
                    break;
                }
            }
        }
    }
    tracing::info!("worker stopped");
}

/// Interval whose first tick is one period away.
fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Tick of an optional interval; never resolves without one.
async fn maybe_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Run `git fetch` without ever prompting on the terminal.
async fn fetch(repo_path: &Path, credentials: Option<&Credentials>) -> WorkerEvent {
    let mut cmd = Command::new("git");
    cmd.arg("-C")
        .arg(repo_path)
        .arg("fetch")
        .env("GIT_TERMINAL_PROMPT", "0")
        .kill_on_drop(true);
    if let Some(credentials) = credentials {
        match std::env::current_exe() {
            Ok(exe) => askpass::configure(&mut cmd, &exe, credentials),
            Err(e) => return WorkerEvent::Error(format!("cannot locate askpass helper: {e}")),
        }
    }

    match cmd.output().await {
        Ok(out) if out.status.success() => {
            tracing::info!("fetch succeeded");
            WorkerEvent::FetchDone
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            if needs_credentials(&stderr) {
                tracing::info!("fetch needs credentials");
                WorkerEvent::FetchNeedsCredentials
            } else {
                WorkerEvent::Error(format!("git fetch failed: {}", stderr.trim()))
            }
        }
        Err(e) => WorkerEvent::Error(format!("git fetch failed: {e}")),
    }
}

/// True when git gave up because it could not ask for credentials.
pub fn needs_credentials(stderr: &str) -> bool {
    let stderr = stderr.to_ascii_lowercase();
    [
        "could not read username",
        "could not read password",
        "terminal prompts disabled",
        "authentication failed",
    ]
    .iter()
    .any(|marker| stderr.contains(marker))
}
