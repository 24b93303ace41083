use std::path::PathBuf;

use clap::Parser;
use sc_core::color::ClockColor;
use sc_core::config::{ClockConfig, validate_separator};

/// segclock : horloge 7 segments pour le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Taille d'un segment, de 1 à 5.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub size: Option<u8>,

    /// Espace entre heures, minutes et secondes.
    #[arg(short, long)]
    pub margin: Option<u16>,

    /// Décalage horizontal de l'horloge, en colonnes.
    #[arg(short, long)]
    pub offset: Option<u16>,

    /// Couleur des chiffres : black, red, green, yellow, blue, magenta, cyan, white.
    #[arg(long)]
    pub color: Option<ClockColor>,

    /// Désactiver la couleur (ignore --color et le fichier de config).
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Séparateur entre les unités (ex. ":" pour les terminaux CJK).
    #[arg(long, value_parser = parse_separator)]
    pub separator: Option<char>,

    /// Intervalle de redessin en millisecondes.
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Fichier de configuration TOML. Défaut : config/segclock.toml.
    #[arg(short, long, default_value = "config/segclock.toml")]
    pub config: PathBuf,

    /// Ne pas lire le clavier (pas de raw mode).
    #[arg(long, default_value_t = false)]
    pub no_input: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Écrire les logs dans ce fichier. Sans ce fichier, les logs sont ignorés
    /// quand stderr est le terminal de l'horloge.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Values given on the command line, to re-apply over every loaded config.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            seg_size: self.size,
            margin: self.margin,
            offset: self.offset,
            color: self.color,
            no_color: self.no_color,
            tick_ms: self.tick_ms,
            separator: self.separator,
        }
    }
}

fn parse_separator(value: &str) -> Result<char, String> {
    validate_separator(value).map_err(|e| e.to_string())
}

/// Overrides CLI, appliqués au chargement initial et à chaque hot-reload.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    seg_size: Option<u8>,
    margin: Option<u16>,
    offset: Option<u16>,
    color: Option<ClockColor>,
    no_color: bool,
    tick_ms: Option<u64>,
    separator: Option<char>,
}

impl Overrides {
    pub fn apply(&self, config: &mut ClockConfig) {
        if let Some(v) = self.seg_size {
            config.seg_size = v;
        }
        if let Some(v) = self.margin {
            config.margin = v;
        }
        if let Some(v) = self.offset {
            config.offset = v;
        }
        if let Some(v) = self.color {
            config.color = Some(v);
        }
        if self.no_color {
            config.color = None;
        }
        if let Some(v) = self.tick_ms {
            config.tick_ms = v;
        }
        if let Some(v) = self.separator {
            config.separator = v;
        }
        config.clamp_all();
    }
}
