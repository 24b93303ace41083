use chrono::Timelike;

use crate::error::CoreError;
use crate::geometry::{DIGITS_PER_UNIT, UNITS};
use crate::traits::ClockSource;

/// Heure courante décomposée en chiffres : une ligne par unité, une colonne par chiffre.
///
/// Ligne 0 = heures, 1 = minutes, 2 = secondes ; colonne 0 = dizaines, 1 = unités.
///
/// # Example
/// ```
/// use sc_core::clock::TimeMatrix;
/// let m = TimeMatrix::from_hms(9, 5, 45).unwrap();
/// assert_eq!(m.digits(), [[0, 9], [0, 5], [4, 5]]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeMatrix([[u8; DIGITS_PER_UNIT]; UNITS]);

impl TimeMatrix {
    /// Decompose a wall-clock time into its six digits.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTime`] if a field is out of its 0-23 / 0-59 range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, CoreError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CoreError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self([split(hour), split(minute), split(second)]))
    }

    /// Read the current time from a clock source.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTime`] if the source reports an out-of-range value.
    pub fn now(source: &dyn ClockSource) -> Result<Self, CoreError> {
        let (h, m, s) = source.hms();
        Self::from_hms(h, m, s)
    }

    /// The 3×2 digit matrix.
    #[must_use]
    pub const fn digits(&self) -> [[u8; DIGITS_PER_UNIT]; UNITS] {
        self.0
    }

    /// The two digits of time unit `unit` (0 = hours, 1 = minutes, 2 = seconds).
    #[must_use]
    pub fn unit(&self, unit: usize) -> [u8; DIGITS_PER_UNIT] {
        self.0.get(unit).copied().unwrap_or([0, 0])
    }
}

fn split(value: u32) -> [u8; DIGITS_PER_UNIT] {
    [(value / 10) as u8, (value % 10) as u8]
}

/// Horloge murale locale, lue via `chrono`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl ClockSource for LocalClock {
    fn hms(&self) -> (u32, u32, u32) {
        let now = chrono::Local::now();
        // Leap seconds surface as second == 59 with nanos >= 1e9, never as 60.
        (now.hour(), now.minute(), now.second())
    }
}

/// Horloge figée, pour les tests et les captures reproductibles.
///
/// # Example
/// ```
/// use sc_core::clock::{FixedClock, TimeMatrix};
/// let clock = FixedClock::new(23, 59, 0);
/// assert_eq!(TimeMatrix::now(&clock).unwrap().digits(), [[2, 3], [5, 9], [0, 0]]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FixedClock {
    hour: u32,
    minute: u32,
    second: u32,
}

impl FixedClock {
    #[must_use]
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl ClockSource for FixedClock {
    fn hms(&self) -> (u32, u32, u32) {
        (self.hour, self.minute, self.second)
    }
}
