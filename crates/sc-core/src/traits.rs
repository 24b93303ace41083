use std::io;

use crate::color::ClockColor;

/// Fournit l'heure murale courante.
///
/// Implémenté par : `LocalClock`, `FixedClock`.
///
/// # Example
/// ```
/// use sc_core::traits::ClockSource;
///
/// struct Midnight;
/// impl ClockSource for Midnight {
///     fn hms(&self) -> (u32, u32, u32) { (0, 0, 0) }
/// }
/// ```
pub trait ClockSource: Send + Sync {
    /// Hour (0-23), minute (0-59), second (0-59).
    fn hms(&self) -> (u32, u32, u32);
}

/// Primitives de contrôle du terminal consommées par le compositor.
///
/// Toutes les opérations sont bufferisées ; rien n'atteint la sortie réelle
/// avant `flush()`. Un déplacement de 0 cellule n'émet rien.
///
/// Implémenté par : `AnsiTerminal` (séquences CSI), `RecordingTerminal` (tests).
///
/// # Example
/// ```
/// use sc_core::traits::TerminalDriver;
/// use sc_core::color::ClockColor;
///
/// struct Null;
/// impl TerminalDriver for Null {
///     fn move_up(&mut self, _n: usize) {}
///     fn move_down(&mut self, _n: usize) {}
///     fn move_forward(&mut self, _n: usize) {}
///     fn move_back(&mut self, _n: usize) {}
///     fn move_to_next_line_start(&mut self, _n: usize) {}
///     fn move_to_previous_line_start(&mut self, _n: usize) {}
///     fn hide_cursor(&mut self) {}
///     fn show_cursor(&mut self) {}
///     fn clear_from_cursor_to_end(&mut self) {}
///     fn set_foreground(&mut self, _color: ClockColor) {}
///     fn reset_style(&mut self) {}
///     fn write(&mut self, _text: &str) {}
///     fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
/// }
/// ```
pub trait TerminalDriver {
    /// Cursor up `n` lines.
    fn move_up(&mut self, n: usize);
    /// Cursor down `n` lines.
    fn move_down(&mut self, n: usize);
    /// Cursor right `n` columns.
    fn move_forward(&mut self, n: usize);
    /// Cursor left `n` columns.
    fn move_back(&mut self, n: usize);
    /// Column 0 of the line `n` lines down.
    fn move_to_next_line_start(&mut self, n: usize);
    /// Column 0 of the line `n` lines up.
    fn move_to_previous_line_start(&mut self, n: usize);
    fn hide_cursor(&mut self);
    fn show_cursor(&mut self);
    /// Erase from the cursor to the end of the screen.
    fn clear_from_cursor_to_end(&mut self);
    fn set_foreground(&mut self, color: ClockColor);
    fn reset_style(&mut self);
    /// Queue text at the cursor.
    fn write(&mut self, text: &str);
    /// Commit everything queued since the last flush.
    ///
    /// # Errors
    /// Returns the underlying I/O error if the sink rejects the write.
    fn flush(&mut self) -> io::Result<()>;
}
