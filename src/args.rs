use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dict")]
#[command(version)]
#[command(about = "Annotate language-pair notes (e.g. words.en-fr.md) with translations", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Watch a notes directory and annotate notes as they change
    Watch {
        /// Directory to watch (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Note currently open in the editor
        #[arg(long, requires = "cursor_line")]
        active: Option<PathBuf>,

        /// 1-based cursor line in the active note; that line is never rewritten
        #[arg(long, requires = "active", value_parser = clap::value_parser!(u64).range(1..))]
        cursor_line: Option<u64>,
    },

    /// Annotate a single note once
    Apply {
        /// Note to process, e.g. words.en-fr.md
        file: PathBuf,

        /// 1-based line to leave untouched
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        cursor_line: Option<u64>,
    },

    /// Translate a single text, useful to verify the API key
    Translate {
        text: String,

        /// Target language code
        #[arg(long)]
        to: String,

        /// Source language code (default: from_language setting)
        #[arg(long)]
        from: Option<String>,
    },

    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show current settings
    Show,

    /// Store the Google Cloud Translation API key (prompts when omitted)
    SetKey { key: Option<String> },

    /// Set the default source language
    SetFrom { language: String },
}
