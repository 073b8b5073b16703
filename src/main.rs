use std::{
    io::{self, Write},
    path::Path,
    process::ExitCode,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;

use setuphub::{
    app::{self, App},
    bridge::{Bridge, BridgeEvent},
    cli::{Cli, Commands},
    config::AppConfig,
    logging::{init_tracing, LogTarget},
    registry::{loader::load_entries, CatalogStore, CategoryFilter},
    system::installer::Installer,
    utils::truncate_with_ellipsis,
};

fn build_store(catalog: Option<&Path>) -> Result<CatalogStore> {
    match catalog {
        Some(path) => {
            let drafts = load_entries(path)?;
            tracing::info!(path = %path.display(), entries = drafts.len(), "catalog loaded");
            Ok(CatalogStore::from_drafts(drafts))
        }
        None => Ok(CatalogStore::seeded()),
    }
}

fn run_tui(mut app: App, mut bridge: Bridge) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alt screen")?;

    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        }
    }
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to init terminal")?;

    app::run(&mut app, &mut bridge, &mut terminal)
}

fn list_command(
    store: &CatalogStore,
    category: CategoryFilter,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let entries = match search {
        Some(query) if !query.is_empty() => store.search(query),
        _ => store.list_by_category(category),
    };

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &entries).context("failed to write json")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<24} {:<12} {:<10} {:<12} {:<7} PATH",
        "NAME", "VERSION", "SIZE", "CATEGORY", "METHOD"
    )?;
    for entry in &entries {
        writeln!(
            out,
            "{:<24} {:<12} {:<10} {:<12} {:<7} {}",
            truncate_with_ellipsis(&entry.name, 24),
            truncate_with_ellipsis(&entry.version, 12),
            entry.size_label(),
            entry.category,
            entry.install_method,
            entry.path
        )?;
    }
    Ok(())
}

fn install_command(
    runtime: &Runtime,
    installer: Arc<Installer>,
    path: String,
    silent: bool,
) -> Result<ExitCode> {
    let mut bridge = Bridge::spawn(runtime.handle(), installer);
    let request = bridge.install_software(path.clone(), silent);

    let result = runtime.block_on(async {
        while let Some(event) = bridge.next_event().await {
            match event {
                BridgeEvent::InstallationProgress { progress, .. } => {
                    println!("progress {progress:>3}%");
                }
                BridgeEvent::InstallSoftware { request: id, result } if id == request => {
                    return Some(result);
                }
                BridgeEvent::InstallSoftware { .. } => {}
            }
        }
        None
    });

    let Some(result) = result else {
        bail!("install backend stopped before reporting a result");
    };
    if result.success {
        println!("Installed {path}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "Failed to install {path}: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        Ok(ExitCode::FAILURE)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let target = match command {
        Commands::Tui => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    init_tracing(cli.log_level, target)?;

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let catalog = cli.catalog.or_else(|| config.catalog.clone());
    let store = build_store(catalog.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let installer = Arc::new(Installer::new(config.installer.clone()));

    match command {
        Commands::Tui => {
            let bridge = Bridge::spawn(runtime.handle(), installer);
            let app = App::new(store, config.installer);
            run_tui(app, bridge)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List {
            category,
            search,
            json,
        } => {
            list_command(&store, category, search.as_deref(), json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Install { path, silent } => install_command(&runtime, installer, path, silent),
    }
}
