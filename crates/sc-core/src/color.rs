use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Les 8 couleurs ANSI de base, dans l'ordre de leur code SGR (30..=37).
///
/// # Example
/// ```
/// use sc_core::color::ClockColor;
/// assert_eq!(ClockColor::Red.ansi_index(), 1);
/// assert_eq!("cyan".parse::<ClockColor>().unwrap(), ClockColor::Cyan);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl ClockColor {
    /// Toutes les couleurs, dans l'ordre ANSI.
    pub const ALL: [Self; 8] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
    ];

    /// Index 0-7 used in the `ESC[1;3<n>m` sequence.
    #[must_use]
    pub const fn ansi_index(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as accepted on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
        }
    }

    /// Couleur suivante pour le raccourci clavier : aucune → black → … → white → aucune.
    ///
    /// # Example
    /// ```
    /// use sc_core::color::ClockColor;
    /// assert_eq!(ClockColor::cycle(None), Some(ClockColor::Black));
    /// assert_eq!(ClockColor::cycle(Some(ClockColor::White)), None);
    /// ```
    #[must_use]
    pub fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Black),
            Some(c) => Self::ALL.get(usize::from(c.ansi_index()) + 1).copied(),
        }
    }
}

impl fmt::Display for ClockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClockColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or(CoreError::UnknownColor {
                name: s.to_string(),
            })
    }
}
