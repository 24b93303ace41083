use std::io;

use sc_core::color::ClockColor;
use sc_core::traits::TerminalDriver;

/// Une primitive terminal, telle que reçue par le driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermOp {
    Up(usize),
    Down(usize),
    Forward(usize),
    Back(usize),
    NextLineStart(usize),
    PreviousLineStart(usize),
    HideCursor,
    ShowCursor,
    ClearToEnd,
    Foreground(ClockColor),
    ResetStyle,
    Write(String),
}

/// Driver factice qui enregistre les primitives, groupées par flush.
///
/// Sert de sink injectable pour tester le compositor sans terminal réel.
///
/// # Example
/// ```
/// use sc_core::traits::TerminalDriver;
/// use sc_render::recording::{RecordingTerminal, TermOp};
///
/// let mut term = RecordingTerminal::default();
/// term.hide_cursor();
/// term.flush().unwrap();
/// assert_eq!(term.batches(), &[vec![TermOp::HideCursor]]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingTerminal {
    pending: Vec<TermOp>,
    batches: Vec<Vec<TermOp>>,
}

impl RecordingTerminal {
    /// Ops committed so far, one `Vec` per flush.
    #[must_use]
    pub fn batches(&self) -> &[Vec<TermOp>] {
        &self.batches
    }

    /// Ops queued since the last flush.
    #[must_use]
    pub fn pending(&self) -> &[TermOp] {
        &self.pending
    }

    /// The most recent committed batch, if any.
    #[must_use]
    pub fn last_batch(&self) -> Option<&[TermOp]> {
        self.batches.last().map(Vec::as_slice)
    }

    /// Drain the committed batches.
    pub fn take_batches(&mut self) -> Vec<Vec<TermOp>> {
        std::mem::take(&mut self.batches)
    }

    fn push_move(&mut self, n: usize, op: fn(usize) -> TermOp) {
        if n > 0 {
            self.pending.push(op(n));
        }
    }
}

impl TerminalDriver for RecordingTerminal {
    fn move_up(&mut self, n: usize) {
        self.push_move(n, TermOp::Up);
    }

    fn move_down(&mut self, n: usize) {
        self.push_move(n, TermOp::Down);
    }

    fn move_forward(&mut self, n: usize) {
        self.push_move(n, TermOp::Forward);
    }

    fn move_back(&mut self, n: usize) {
        self.push_move(n, TermOp::Back);
    }

    fn move_to_next_line_start(&mut self, n: usize) {
        self.push_move(n, TermOp::NextLineStart);
    }

    fn move_to_previous_line_start(&mut self, n: usize) {
        self.push_move(n, TermOp::PreviousLineStart);
    }

    fn hide_cursor(&mut self) {
        self.pending.push(TermOp::HideCursor);
    }

    fn show_cursor(&mut self) {
        self.pending.push(TermOp::ShowCursor);
    }

    fn clear_from_cursor_to_end(&mut self) {
        self.pending.push(TermOp::ClearToEnd);
    }

    fn set_foreground(&mut self, color: ClockColor) {
        self.pending.push(TermOp::Foreground(color));
    }

    fn reset_style(&mut self) {
        self.pending.push(TermOp::ResetStyle);
    }

    fn write(&mut self, text: &str) {
        self.pending.push(TermOp::Write(text.to_string()));
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.batches.push(std::mem::take(&mut self.pending));
        }
        Ok(())
    }
}
