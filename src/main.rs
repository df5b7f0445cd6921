mod args;
mod commands;

use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_new(dictionary::clienv::log_filter())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch {
            dir,
            active,
            cursor_line,
        } => commands::watch::cmd_watch(dir, active, cursor_line).await?,
        Commands::Apply { file, cursor_line } => {
            commands::apply::cmd_apply(&file, cursor_line).await?
        }
        Commands::Translate { text, to, from } => {
            commands::translate::cmd_translate(&text, &to, from).await?
        }
        Commands::Config { command } => commands::config::cmd_config(command)?,
    }

    Ok(())
}
