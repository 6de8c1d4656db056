//! Entry point: arguments, config, logging, then the TUI.

use anyhow::{Result, anyhow};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use repo_tui::{
    askpass,
    config::{Config, LogCfg},
    gui,
    keybindings::Keybindings,
    tui,
};

#[derive(Parser, Debug)]
#[command(name = "repo_tui", version, about = "Side-panel terminal UI for a git repository")]
struct Args {
    /// Config file; created with defaults when missing.
    #[arg(long, env = "REPO_TUI_CONFIG", default_value = "config.toml")]
    config: PathBuf,
    /// Repository to open, overriding `git.repo_path`.
    #[arg(long)]
    repo: Option<String>,
}

/// Log to a file so the TUI keeps the terminal; the guard flushes on drop.
fn init_logging(cfg: &LogCfg) -> Result<WorkerGuard> {
    let path = Path::new(&cfg.file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log file {:?} has no file name", cfg.file))?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // RUST_LOG wins over the config file.
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&cfg.level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", cfg.file);
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Started by `git fetch` to answer a credential prompt.
    if askpass::is_askpass_invocation() {
        let prompt = std::env::args().nth(1).unwrap_or_default();
        println!("{}", askpass::answer_from_env(&prompt));
        return Ok(());
    }

    let args = Args::parse();
    let mut cfg = Config::load_or_default(&args.config)?;
    if let Some(repo) = args.repo {
        cfg.git.repo_path = repo;
    }
    let keys = Keybindings::load_or_default(args.config.with_file_name("keybindings.toml"))?;

    let _log_guard = init_logging(&cfg.log)?;
    tracing::info!(repo = %cfg.git.repo_path, "app starting");

    let mut terminal = tui::init_terminal()?;
    let res = gui::run_app(&mut terminal, cfg, keys).await;
    tui::restore_terminal()?;
    if let Err(ref e) = res {
        tracing::error!("app error: {e}");
    }
    tracing::info!("app exiting");
    res
}
