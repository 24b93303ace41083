/// Terminal output for segclock.
///
/// Provides the ANSI terminal driver, a recording driver for tests, and the
/// clock compositor that repaints the frame in place.
pub mod ansi;
pub mod compositor;
pub mod recording;

pub use ansi::AnsiTerminal;
pub use compositor::Compositor;
pub use recording::{RecordingTerminal, TermOp};
