use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use sc_core::clock::LocalClock;
use sc_core::config::ClockConfig;
use sc_render::AnsiTerminal;

pub mod cli;
pub mod hotreload;
pub mod input;
pub mod session;
pub mod shared;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    init_logging(&cli)?;

    // 3. Charger la config, puis appliquer les overrides CLI
    let overrides = cli.overrides();
    let mut config = resolve_config(&cli)?;
    overrides.apply(&mut config);
    log::info!(
        "Config : segment {}, marge {}, décalage {}, couleur {:?}",
        config.seg_size,
        config.margin,
        config.offset,
        config.color
    );

    let shared = Arc::new(shared::SharedState::new(config));

    // 4. Ctrl-C hors raw mode (SIGINT/SIGTERM)
    {
        let shared = Arc::clone(&shared);
        ctrlc::set_handler(move || shared.request_shutdown())
            .context("Impossible d'installer le handler Ctrl-C")?;
    }

    // 5. Hot-reload de la config (le watcher doit vivre jusqu'à la fin)
    let _watcher = if cli.config.exists() {
        match hotreload::spawn_config_watcher(&cli.config, &shared, overrides) {
            Ok(w) => Some(w),
            Err(e) => {
                log::warn!("Hot-reload indisponible : {e:#}");
                None
            }
        }
    } else {
        None
    };

    // 6. Clavier, seulement sur un vrai terminal
    let interactive = !cli.no_input && std::io::stdin().is_tty();
    let raw_mode = if interactive {
        Some(session::RawModeGuard::enable()?)
    } else {
        None
    };
    let input_thread = if interactive {
        Some(input::spawn_input_thread(Arc::clone(&shared)).context("Thread clavier")?)
    } else {
        None
    };

    session::install_panic_hook();

    // 7. Boucle de rendu
    let mut session = session::Session::new(
        AnsiTerminal::new(std::io::stdout()),
        Arc::clone(&shared),
        Box::new(LocalClock),
    );
    let result = session.run();
    drop(session);

    shared.request_shutdown();
    if let Some(handle) = input_thread
        && handle.join().is_err()
    {
        log::warn!("Le thread clavier a paniqué");
    }
    drop(raw_mode);

    result
}

/// Destination des logs.
#[derive(Debug, PartialEq, Eq)]
enum LogSink {
    Stderr,
    File(PathBuf),
    /// stderr partage l'écran de l'horloge : toute ligne décalerait la frame.
    Discard,
}

fn log_sink(log_file: Option<&Path>, stdout_is_tty: bool, stderr_is_tty: bool) -> LogSink {
    match log_file {
        Some(path) => LogSink::File(path.to_path_buf()),
        None if stdout_is_tty && stderr_is_tty => LogSink::Discard,
        None => LogSink::Stderr,
    }
}

fn init_logging(cli: &cli::Cli) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn));
    let sink = log_sink(
        cli.log_file.as_deref(),
        std::io::stdout().is_tty(),
        std::io::stderr().is_tty(),
    );
    match sink {
        LogSink::Stderr => {}
        LogSink::File(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Impossible de créer {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogSink::Discard => {
            builder.target(env_logger::Target::Pipe(Box::new(std::io::sink())));
        }
    }
    builder.init();
    Ok(())
}

fn resolve_config(cli: &cli::Cli) -> Result<ClockConfig> {
    if cli.config.exists() {
        sc_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ClockConfig::default())
    }
}
