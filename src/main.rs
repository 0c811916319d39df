//! addoncat - addon catalog client
//!
//! Lists the addons of a remote catalog, shows their dependencies and
//! install files, tracks available module updates and edits the log of
//! pending changes consumed by the external updater.

use addoncat::catalog::{CatalogClient, CatalogService, SearchCondition};
use addoncat::changes::AddonUpdateChanges;
use addoncat::cli::{ChangesAction, CliArgs, Command, UrlKind};
use addoncat::config::Config;
use addoncat::output::{create_formatter, OutputFormat, OutputFormatter, UpdateCheck};
use addoncat::persist::{LoadOutcome, SaveOutcome};
use addoncat::progress::Progress;
use addoncat::updates::AvailableUpdates;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "addoncat=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = args.config()?;
    let formatter = create_formatter(OutputFormat::from_cli(args.json));
    let mut progress = Progress::new(!args.quiet && !args.json);
    let mut stdout = io::stdout();

    let exit_code = match &args.command {
        Command::Check {
            module_id,
            current_version,
        } => {
            let mut cache = AvailableUpdates::new();
            cache.load(&config.available_updates_path());
            let check = UpdateCheck {
                module_id,
                current_version,
                latest_version: cache.latest_version(module_id),
                update_available: cache.is_update_available(module_id, current_version),
            };
            formatter.format_check(&check, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Command::Changes { action } => {
            run_changes(&config, action, formatter.as_ref(), &mut stdout)?
        }
        command => {
            let mut client = CatalogClient::from_config(&config)?;
            run_catalog(
                &config,
                command,
                &mut client,
                &mut progress,
                formatter.as_ref(),
                &mut stdout,
            )
            .await?
        }
    };

    stdout.flush()?;
    Ok(exit_code)
}

async fn run_catalog(
    config: &Config,
    command: &Command,
    client: &mut CatalogClient,
    progress: &mut Progress,
    formatter: &dyn OutputFormatter,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    match command {
        Command::Status { version } => {
            progress.spinner("Checking status...");
            let status = client.check_status(version).await;
            progress.finish_and_clear();
            formatter.format_status(version, status?, out)?;
        }
        Command::Search { keyword } => {
            let condition = SearchCondition {
                keyword: keyword.clone(),
            };
            progress.spinner("Fetching addon list...");
            let addons = client.search_for_addons(&condition).await;
            progress.finish_and_clear();
            formatter.format_addons(&addons?, out)?;
        }
        Command::Deps { id } => {
            progress.spinner(&format!("Fetching dependencies of {}...", id));
            let addon = client.get_addon_dependency(id).await;
            progress.finish_and_clear();
            formatter.format_addon(&addon?, out)?;
        }
        Command::File { id } => {
            progress.spinner(&format!("Fetching install file of {}...", id));
            let path = client.get_addon_file(id).await;
            progress.finish_and_clear();
            let path = path?;
            formatter.format_value("file", &path, out)?;
            formatter.format_value("download_url", client.file_download_url(&path)?.as_str(), out)?;
        }
        Command::Updates { save, app_version } => {
            progress.spinner("Fetching update records...");
            let records = if *save {
                let mut cache = AvailableUpdates::new();
                let records = cache.refresh(&*client, app_version).await;
                progress.finish_and_clear();
                let records = records?;
                if let SaveOutcome::Failed(e) = cache.save(&config.available_updates_path()) {
                    eprintln!("Warning: {}", e);
                }
                records
            } else {
                let records = client.get_update_records().await;
                progress.finish_and_clear();
                records?
            };
            formatter.format_updates(&records, out)?;
        }
        Command::Details { id } => {
            progress.spinner(&format!("Fetching details of {}...", id));
            let details = client.get_module_details(id).await;
            progress.finish_and_clear();
            formatter.format_value("details", &details?, out)?;
        }
        Command::Url { kind, path } => {
            let url = match kind {
                UrlKind::Download => client.file_download_url(path)?,
                UrlKind::License => client.license_download_url(path)?,
            };
            formatter.format_value("url", url.as_str(), out)?;
        }
        Command::Check { .. } | Command::Changes { .. } => unreachable!("local command"),
    }

    Ok(ExitCode::SUCCESS)
}

fn run_changes(
    config: &Config,
    action: &ChangesAction,
    formatter: &dyn OutputFormatter,
    out: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let path = config.changes_path();
    let mut changes = AddonUpdateChanges::new();
    if let LoadOutcome::Failed(e) = changes.read_config_file(&path) {
        // Writing now would replace entries we could not read
        if !matches!(action, ChangesAction::List) {
            eprintln!("Error: {}; leaving the changes file untouched", e);
            return Ok(ExitCode::FAILURE);
        }
        eprintln!("Warning: {}", e);
    }

    let modified = match action {
        ChangesAction::List => false,
        ChangesAction::Clear => {
            changes.clear();
            true
        }
        ChangesAction::Discard { kind, value } => {
            if !changes.remove((*kind).into(), value) {
                eprintln!("'{}' is not queued", value);
            }
            true
        }
        queue => match queue.queued() {
            Some((kind, value)) if changes.has(kind, value) => {
                debug!("'{}' already queued as {}", value, kind.prefix());
                false
            }
            Some((kind, value)) => {
                changes.add(kind, value);
                true
            }
            None => false,
        },
    };

    if modified {
        if let SaveOutcome::Failed(e) = changes.write_config_file(&path) {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    }

    formatter.format_changes(&changes, out)?;
    Ok(ExitCode::SUCCESS)
}
