/// Configuration, types, and shared structures for segclock.
///
/// This crate contains the shared types, traits, and configuration logic
/// used across the segclock workspace.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod traits;

pub use clock::TimeMatrix;
pub use color::ClockColor;
pub use config::ClockConfig;
pub use error::CoreError;
pub use frame::{CharGrid, DigitGrid, FrameCanvas};
pub use geometry::{ClockLayout, FrameGeometry};

/// Re-exports pour accès par chemin sémantique.
pub mod term {
    pub use crate::traits::TerminalDriver;
}
