use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use humansize::{format_size, BINARY};

use reclaim::cleaner::CleanerRegistry;
use reclaim::cli::Cli;
use reclaim::config::Config;
use reclaim::tui::{self, RunOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "reclaim", &mut io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // The TUI owns the terminal, so logs always go to a file
    let log_path = cli
        .log_file
        .clone()
        .or_else(|| config.log_file.clone())
        .or_else(Config::default_log_path);
    init_logging(cli.verbose, cli.quiet, log_path.as_deref());

    tracing::debug!(?config, "Loaded configuration");

    let registry = CleanerRegistry::from_config(&config)?;

    if cli.list {
        print_cleaners(&registry);
        return Ok(());
    }

    let is_root = nix::unistd::geteuid().is_root();
    let options = RunOptions {
        is_root,
        preselect: config.tui.preselect,
        tick_rate: Duration::from_millis(config.tui.tick_rate_ms),
        free_space_path: dirs::home_dir(),
    };
    tracing::info!(?options, cleaners = registry.len(), "Starting TUI");

    let summary = tui::run(&registry, options)?;

    if !summary.completed {
        println!("Bye!");
        return Ok(());
    }

    println!("Cleanup complete: {} cleaned", summary.cleaned);
    if let Some(freed) = summary.freed {
        println!("Freed: {}", format_size(freed, BINARY));
    }
    for (name, error) in &summary.failed {
        eprintln!("  Error cleaning {}: {}", name, error);
    }

    if !summary.failed.is_empty() {
        std::process::exit(5); // Partial failure
    }

    Ok(())
}

fn print_cleaners(registry: &CleanerRegistry) {
    println!("  {:<12} {:<40} {}", "ID", "NAME", "NOTES");
    println!("  {}", "─".repeat(64));

    for cleaner in registry.cleaners() {
        let mut notes = Vec::new();
        if cleaner.requires_privilege() {
            notes.push("requires root");
        }
        if cleaner.as_itemized().is_some() {
            notes.push("per-file selection");
        }
        println!("  {:<12} {:<40} {}", cleaner.id(), cleaner.name(), notes.join(", "));
    }
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn init_logging(verbosity: u8, quiet: bool, log_path: Option<&Path>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reclaim={}", level)));

    // Without a writable log file, logging stays off
    let Some(file) = log_path.and_then(open_log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}
