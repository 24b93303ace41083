use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::ClockColor;
use crate::error::CoreError;
use crate::geometry::ClockLayout;

/// Plus petite taille de segment acceptée.
pub const MIN_SEG_SIZE: u8 = 1;
/// Plus grande taille de segment acceptée.
pub const MAX_SEG_SIZE: u8 = 5;
/// Séparateur par défaut entre heures, minutes et secondes.
///
/// Largeur ambiguë (East Asian Width "A") : les terminaux en locale CJK
/// l'affichent sur deux colonnes et décalent les minutes et secondes d'une
/// colonne. Utiliser `separator = ":"` dans ce cas.
pub const DEFAULT_SEPARATOR: char = '●';

/// Configuration complète de l'horloge, hot-rechargeable.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use sc_core::config::ClockConfig;
/// let config = ClockConfig::default();
/// assert_eq!(config.seg_size, 2);
/// assert_eq!(config.layout().unit_stride(), 22);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockConfig {
    /// Taille d'un segment en cellules [1, 5].
    pub seg_size: u8,
    /// Espace horizontal entre deux unités de temps.
    pub margin: u16,
    /// Décalage horizontal de la frame (colonne d'origine).
    pub offset: u16,
    /// Couleur des chiffres. `None` = couleur par défaut du terminal.
    pub color: Option<ClockColor>,
    /// Intervalle entre deux redessins, en millisecondes [1, 1000].
    pub tick_ms: u64,
    /// Glyphe des deux points entre les unités, une seule colonne attendue.
    pub separator: char,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            seg_size: 2,
            margin: 4,
            offset: 0,
            color: None,
            tick_ms: 10,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl ClockConfig {
    /// Placement à l'écran dérivé de la configuration.
    #[must_use]
    pub fn layout(&self) -> ClockLayout {
        ClockLayout::new(
            usize::from(self.seg_size),
            usize::from(self.margin),
            usize::from(self.offset),
        )
    }

    /// Copy of this config with another segment size.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidSegmentSize`] if `size` is outside 1..=5.
    ///
    /// # Example
    /// ```
    /// use sc_core::config::ClockConfig;
    /// let config = ClockConfig::default().with_seg_size(4).unwrap();
    /// assert_eq!(config.seg_size, 4);
    /// assert!(ClockConfig::default().with_seg_size(6).is_err());
    /// ```
    pub fn with_seg_size(&self, size: i64) -> Result<Self, CoreError> {
        let seg_size = validate_seg_size(size)?;
        Ok(Self {
            seg_size,
            ..self.clone()
        })
    }

    /// Clamp numeric fields that have a safe fallback.
    /// Called after TOML deserialization. The segment size is validated, not clamped.
    pub fn clamp_all(&mut self) {
        self.tick_ms = self.tick_ms.clamp(1, 1000);
    }
}

/// Check a segment size coming from user input.
///
/// # Errors
/// Returns [`CoreError::InvalidSegmentSize`] if `size` is outside 1..=5.
///
/// # Example
/// ```
/// use sc_core::config::validate_seg_size;
/// assert_eq!(validate_seg_size(3), Ok(3));
/// assert!(validate_seg_size(0).is_err());
/// ```
pub fn validate_seg_size(size: i64) -> Result<u8, CoreError> {
    if (i64::from(MIN_SEG_SIZE)..=i64::from(MAX_SEG_SIZE)).contains(&size) {
        Ok(size as u8)
    } else {
        Err(CoreError::InvalidSegmentSize {
            size,
            min: MIN_SEG_SIZE,
            max: MAX_SEG_SIZE,
        })
    }
}

/// Check a separator string: exactly one printable character.
///
/// # Errors
/// Returns [`CoreError::Config`] for an empty string, several characters or
/// a control character.
///
/// # Example
/// ```
/// use sc_core::config::validate_separator;
/// assert_eq!(validate_separator(":"), Ok(':'));
/// assert!(validate_separator("::").is_err());
/// ```
pub fn validate_separator(value: &str) -> Result<char, CoreError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(c),
        _ => Err(CoreError::Config(format!(
            "separator doit être un seul caractère imprimable, reçu {value:?}"
        ))),
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    clock: Option<ClockSection>,
}

/// Clock section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ClockSection {
    seg_size: Option<i64>,
    margin: Option<u16>,
    offset: Option<u16>,
    color: Option<String>,
    tick_ms: Option<u64>,
    separator: Option<String>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document is not valid TOML, the segment size is
/// outside 1..=5, or the color name is unknown.
///
/// # Example
/// ```
/// use sc_core::config::parse_config;
/// let config = parse_config("[clock]\nseg_size = 3\ncolor = \"green\"").unwrap();
/// assert_eq!(config.seg_size, 3);
/// ```
pub fn parse_config(content: &str) -> Result<ClockConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ClockConfig::default();

    if let Some(c) = file.clock {
        if let Some(v) = c.seg_size {
            config.seg_size = validate_seg_size(v)?;
        }
        if let Some(v) = c.margin {
            config.margin = v;
        }
        if let Some(v) = c.offset {
            config.offset = v;
        }
        if let Some(v) = c.color {
            config.color = match v.as_str() {
                "" | "none" | "default" => None,
                name => Some(name.parse()?),
            };
        }
        if let Some(v) = c.tick_ms {
            config.tick_ms = v;
        }
        if let Some(v) = c.separator {
            config.separator = validate_separator(&v)?;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use sc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/segclock.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ClockConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let config = parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {config:?}", path.display());
    Ok(config)
}
