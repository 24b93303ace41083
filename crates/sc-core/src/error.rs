use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Segment size outside the supported range.
    #[error("Taille de segment invalide : {size} (attendu {min}..={max})")]
    InvalidSegmentSize {
        /// Value that was rejected.
        size: i64,
        /// Smallest accepted size.
        min: u8,
        /// Largest accepted size.
        max: u8,
    },

    /// Unknown color name.
    #[error("Couleur inconnue : {name}")]
    UnknownColor {
        /// The name that did not match any color.
        name: String,
    },

    /// Wall-clock values outside 0-23 / 0-59 / 0-59.
    #[error("Heure invalide : {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        /// Hour value.
        hour: u32,
        /// Minute value.
        minute: u32,
        /// Second value.
        second: u32,
    },
}
