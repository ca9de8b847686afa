//! Command-line surface: argument parsing for the `wsync` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

fn help_styles() -> clap::builder::Styles {
    use anstyle::{AnsiColor, Color, Style};

    clap::builder::Styles::styled()
        .header(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
        .usage(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
}

#[derive(Parser, Debug)]
#[command(name = "wsync", version, about = "Parallel multi-repository synchronization", styles = help_styles())]
pub struct Cli {
    /// Increase log verbosity; repeat for more (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and reconcile every repository with the manifest.
    Sync {
        /// Path to the manifest. Defaults to `manifest.toml` in the current directory.
        #[arg(default_value = "manifest.toml")]
        manifest: PathBuf,

        /// Number of repositories to synchronize concurrently. Omit for sequential.
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        /// Pass `--force` to `git fetch`.
        #[arg(short, long)]
        force: bool,

        /// Only fetch from this remote instead of all of a repo's remotes.
        #[arg(short, long)]
        remote: Option<String>,
    },
    /// Reconcile each repository's configured remotes with the manifest.
    SetRemotes {
        /// Path to the manifest. Defaults to `manifest.toml` in the current directory.
        #[arg(default_value = "manifest.toml")]
        manifest: PathBuf,

        /// Number of repositories to process concurrently. Omit for sequential.
        #[arg(short = 'j', long)]
        jobs: Option<usize>,
    },
}

/// Translate a repeated `-v` count into a `log::LevelFilter`, the way
/// `env_logger` expects it when built up from a CLI flag rather than
/// `RUST_LOG` alone.
pub fn level_filter(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
