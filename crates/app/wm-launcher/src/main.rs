use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use wm_launcher::{CurrentProcessRelauncher, StartupDecision, StartupOrchestrator, logging};
use wm_patch::DownloadLedger;
use wm_settings::AppSettings;

#[derive(Parser, Debug)]
#[command(name = "wm-launcher", version, about = "Patch and self-update launcher")]
struct Cli {
    /// Installation root. Defaults to the directory holding this executable.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetches and applies patches, restarting when anything was applied.
    Run,
    /// Prints the update status as JSON.
    Check {
        /// Ignore the cached result.
        #[arg(long)]
        force: bool,
    },
    /// Applies already staged patches without contacting the registry.
    ApplyLocal,
    /// Removes an asset from the download ledger so it is fetched again.
    ForgetDownload { asset: String },
    /// Prints the installed version, applied patches and downloaded assets.
    Status,
}

#[derive(Serialize)]
struct InstallStatus {
    installed_version: String,
    applied_patches: Vec<String>,
    downloaded_assets: Vec<String>,
}

fn default_install_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .context("Executable has no parent directory")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_command(command: Commands, orchestrator: StartupOrchestrator) -> Result<()> {
    match command {
        Commands::Run => match orchestrator.run().await {
            StartupDecision::Restart {
                applied_count,
                version,
            } => {
                info!(
                    "Handing over to the patched process ({} patches, {})",
                    applied_count, version
                );
            }
            StartupDecision::Continue(status) => {
                if let Some(summary) = status.startup_patch_summary() {
                    info!(
                        "Updated to {} ({} patches applied)",
                        summary.current_version, summary.applied_count
                    );
                    print_json(&summary)?;
                }
            }
        },
        Commands::Check { force } => {
            let version = orchestrator.installed_version()?;
            let fetcher = orchestrator.fetcher(version)?;
            print_json(&fetcher.check_for_updates(force).await)?;
        }
        Commands::ApplyLocal => {
            let version = orchestrator.installed_version()?;
            let report = orchestrator.applier(version).apply_pending()?;
            println!(
                "Applied {} patches, {} failed, {} held back; now at {}",
                report.applied_count(),
                report.failed.len(),
                report.gated.len(),
                report.version
            );
        }
        Commands::ForgetDownload { asset } => {
            let ledger = DownloadLedger::new(orchestrator.paths().downloaded_patches_file());
            if ledger.forget(&asset)? {
                println!("{asset} will be downloaded again");
            } else {
                println!("{asset} was not in the download ledger");
            }
        }
        Commands::Status => {
            let version = orchestrator.installed_version()?;
            let downloads = DownloadLedger::new(orchestrator.paths().downloaded_patches_file());
            print_json(&InstallStatus {
                installed_version: version.to_string(),
                applied_patches: orchestrator.ledger().applied_ids().into_iter().collect(),
                downloaded_assets: downloads.downloaded().into_iter().collect(),
            })?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let install_root = match cli.root {
        Some(root) => root,
        None => default_install_root()?,
    };
    let settings = AppSettings::load_from_install_root(&install_root)?;
    let paths = settings.paths.resolve(&install_root);
    let _log_guard = logging::init(&paths.log_dir)?;

    let orchestrator = StartupOrchestrator::new(settings, paths, CurrentProcessRelauncher);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?
        .block_on(run_command(
            cli.command.unwrap_or(Commands::Run),
            orchestrator,
        ))
}
