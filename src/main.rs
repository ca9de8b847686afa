use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::debug;

use wsync::cli::{level_filter, Cli, Commands};
use wsync::{manifest, process_items, RemoteSetter, Syncer};

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level_filter(cli.verbose))
        .parse_env("RUST_LOG")
        .init();

    let result = match cli.command {
        Commands::Sync {
            manifest,
            jobs,
            force,
            remote,
        } => run_sync(&manifest, jobs, force, remote),
        Commands::SetRemotes { manifest, jobs } => run_set_remotes(&manifest, jobs),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", wsync::styling::error(&format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn workspace_root(manifest_path: &Path) -> std::path::PathBuf {
    manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}

fn run_sync(manifest_path: &Path, jobs: Option<usize>, force: bool, remote: Option<String>) -> anyhow::Result<()> {
    let repos = manifest::load(manifest_path)
        .with_context(|| format!("loading manifest {}", manifest_path.display()))?;
    debug!("loaded {} repositories from {}", repos.len(), manifest_path.display());

    let syncer = Syncer::new(workspace_root(manifest_path), force, remote);
    let collection = process_items(&repos, &syncer, jobs);
    collection
        .handle_result("Failed to synchronize workspace", Some("Summary:"))
        .map_err(anyhow::Error::from)
}

fn run_set_remotes(manifest_path: &Path, jobs: Option<usize>) -> anyhow::Result<()> {
    let repos = manifest::load(manifest_path)
        .with_context(|| format!("loading manifest {}", manifest_path.display()))?;
    debug!("loaded {} repositories from {}", repos.len(), manifest_path.display());

    let setter = RemoteSetter::new(workspace_root(manifest_path));
    let collection = process_items(&repos, &setter, jobs);
    collection
        .handle_result("Failed to set remotes", None)
        .map_err(anyhow::Error::from)
}
