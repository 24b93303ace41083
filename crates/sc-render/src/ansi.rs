use std::fmt::Write as _;
use std::io::{self, Write};

use sc_core::color::ClockColor;
use sc_core::traits::TerminalDriver;

/// ESC[ : Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// Driver ANSI : encode les primitives en séquences CSI dans un buffer,
/// écrit le tout d'un bloc sur `flush()`.
///
/// # Example
/// ```
/// use sc_core::traits::TerminalDriver;
/// use sc_render::ansi::AnsiTerminal;
///
/// let mut term = AnsiTerminal::new(Vec::new());
/// term.move_up(3);
/// term.write("12");
/// term.flush().unwrap();
/// assert_eq!(term.get_ref().as_slice(), b"\x1b[3A12");
/// ```
pub struct AnsiTerminal<W: Write> {
    out: W,
    /// Séquences en attente du prochain flush.
    pending: String,
}

impl<W: Write> AnsiTerminal<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out,
            pending: String::with_capacity(4096),
        }
    }

    /// Queued bytes not yet flushed.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// The underlying sink.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consume the driver, dropping anything not flushed.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn csi(&mut self, n: usize, letter: char) {
        // ESC[0A moves one cell on most terminals, so a zero move is skipped.
        if n == 0 {
            return;
        }
        let _ = write!(self.pending, "{CSI}{n}{letter}");
    }
}

impl<W: Write> TerminalDriver for AnsiTerminal<W> {
    fn move_up(&mut self, n: usize) {
        self.csi(n, 'A');
    }

    fn move_down(&mut self, n: usize) {
        self.csi(n, 'B');
    }

    fn move_forward(&mut self, n: usize) {
        self.csi(n, 'C');
    }

    fn move_back(&mut self, n: usize) {
        self.csi(n, 'D');
    }

    fn move_to_next_line_start(&mut self, n: usize) {
        self.csi(n, 'E');
    }

    fn move_to_previous_line_start(&mut self, n: usize) {
        self.csi(n, 'F');
    }

    fn hide_cursor(&mut self) {
        self.pending.push_str(CSI);
        self.pending.push_str("?25l");
    }

    fn show_cursor(&mut self) {
        self.pending.push_str(CSI);
        self.pending.push_str("?25h");
    }

    fn clear_from_cursor_to_end(&mut self) {
        self.pending.push_str(CSI);
        self.pending.push_str("0J");
    }

    fn set_foreground(&mut self, color: ClockColor) {
        let _ = write!(self.pending, "{CSI}1;3{}m", color.ansi_index());
    }

    fn reset_style(&mut self) {
        self.pending.push_str(CSI);
        self.pending.push_str("0m");
    }

    fn write(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.out.write_all(self.pending.as_bytes())?;
            self.pending.clear();
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(f: impl FnOnce(&mut AnsiTerminal<Vec<u8>>)) -> String {
        let mut term = AnsiTerminal::new(Vec::new());
        f(&mut term);
        term.flush().unwrap();
        String::from_utf8(term.into_inner()).unwrap()
    }

    #[test]
    fn cursor_moves_are_bit_exact() {
        assert_eq!(encoded(|t| t.move_up(2)), "\x1b[2A");
        assert_eq!(encoded(|t| t.move_down(3)), "\x1b[3B");
        assert_eq!(encoded(|t| t.move_forward(10)), "\x1b[10C");
        assert_eq!(encoded(|t| t.move_back(1)), "\x1b[1D");
        assert_eq!(encoded(|t| t.move_to_next_line_start(4)), "\x1b[4E");
        assert_eq!(encoded(|t| t.move_to_previous_line_start(6)), "\x1b[6F");
    }

    #[test]
    fn zero_moves_emit_nothing() {
        let out = encoded(|t| {
            t.move_up(0);
            t.move_forward(0);
            t.move_to_previous_line_start(0);
        });
        assert!(out.is_empty());
    }

    #[test]
    fn visibility_clear_and_color() {
        assert_eq!(encoded(|t| t.hide_cursor()), "\x1b[?25l");
        assert_eq!(encoded(|t| t.show_cursor()), "\x1b[?25h");
        assert_eq!(encoded(|t| t.clear_from_cursor_to_end()), "\x1b[0J");
        assert_eq!(encoded(|t| t.set_foreground(ClockColor::Green)), "\x1b[1;32m");
        assert_eq!(encoded(|t| t.set_foreground(ClockColor::White)), "\x1b[1;37m");
        assert_eq!(encoded(|t| t.reset_style()), "\x1b[0m");
    }

    #[test]
    fn nothing_reaches_sink_before_flush() {
        let mut term = AnsiTerminal::new(Vec::new());
        term.write("hello");
        term.move_down(1);
        assert!(term.get_ref().is_empty());
        assert_eq!(term.pending(), "hello\x1b[1B");
        term.flush().unwrap();
        assert_eq!(term.get_ref().as_slice(), b"hello\x1b[1B");
        assert!(term.pending().is_empty());
    }
}
