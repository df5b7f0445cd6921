use anyhow::Context;
use dialoguer::console::style;
use dictionary::editor::{ActiveCursor, ActiveEditor, NoActiveEditor};
use dictionary::service::WatchService;
use dictionary::{watcher, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::{build_reconciler, zero_based};

pub(crate) async fn cmd_watch(
    dir: PathBuf,
    active: Option<PathBuf>,
    cursor_line: Option<u64>,
) -> anyhow::Result<()> {
    let root = std::fs::canonicalize(&dir)
        .with_context(|| format!("Cannot watch {}", dir.display()))?;
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let settings = Settings::load()?;
    let translator_ready = !settings.api_key.trim().is_empty();

    let editor: Arc<dyn ActiveEditor> = match (active, cursor_line) {
        (Some(path), Some(line)) => Arc::new(ActiveCursor::new(path, zero_based(line))),
        _ => Arc::new(NoActiveEditor),
    };

    let reconciler = Arc::new(build_reconciler(&settings, editor)?);
    let (_watcher, events) = watcher::subscribe(&root)?.into_parts();

    println!(
        "{} Watching {} (Ctrl+C to stop)",
        style("→").cyan(),
        style(root.display()).bold()
    );
    if !translator_ready {
        println!(
            "{} No API key configured; run `dict config set-key` first",
            style("!").yellow()
        );
    }

    let service = WatchService::new(reconciler, settings.debounce());
    let stats = service.run(events, shutdown_signal()).await;

    println!(
        "{} Stopped: {} note(s) annotated, {} already up to date, {} conflict(s), {} failure(s)",
        style("✓").green(),
        stats.written,
        stats.unchanged,
        stats.conflicts,
        stats.failures
    );
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            let _ = tokio::signal::ctrl_c().await;
            return;
        };

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM"),
            _ = sigint.recv() => info!("Received SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C");
        }
    }
}
