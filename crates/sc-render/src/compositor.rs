use std::io;

use sc_core::clock::TimeMatrix;
use sc_core::color::ClockColor;
use sc_core::config::DEFAULT_SEPARATOR;
use sc_core::frame::FrameCanvas;
use sc_core::geometry::{ClockLayout, UNITS};
use sc_core::traits::TerminalDriver;
use sc_segment::digit::render_digit;

/// Fin de ligne émise après chaque ligne de frame (fonctionne aussi en raw mode).
const LINE_END: &str = "\r\n";

/// Compositor : assemble HH:MM:SS en une frame et la redessine en place.
///
/// Chaque frame occupe `rows + 1` lignes (chiffres + ligne de statut) et
/// se termine colonne 0 de la ligne juste en dessous. La frame suivante
/// remonte donc d'exactement `rows + 1` lignes : aucune dérive possible.
///
/// Une ligne qui dépasse le bord droit serait repliée par le terminal et
/// casserait ce compte. Avec une largeur de viewport connue, chaque ligne
/// est coupée à `largeur - origin_column` colonnes.
///
/// # Example
/// ```
/// use sc_core::clock::TimeMatrix;
/// use sc_core::geometry::ClockLayout;
/// use sc_render::compositor::Compositor;
/// use sc_render::recording::{RecordingTerminal, TermOp};
///
/// let mut compositor = Compositor::new(RecordingTerminal::default());
/// let time = TimeMatrix::from_hms(12, 34, 56).unwrap();
/// let layout = ClockLayout::new(2, 4, 0);
/// compositor.render_clock(&time, &layout, None).unwrap();
/// compositor.render_clock(&time, &layout, None).unwrap();
/// let second = compositor.terminal().last_batch().unwrap();
/// assert_eq!(second[0], TermOp::PreviousLineStart(6));
/// ```
pub struct Compositor<T: TerminalDriver> {
    term: T,
    /// Layout de la frame actuellement à l'écran. `None` tant que rien n'est dessiné.
    on_screen: Option<ClockLayout>,
    /// Canevas pré-alloué, réutilisé chaque frame.
    canvas: FrameCanvas,
    /// Message court affiché sous les chiffres.
    status: Option<String>,
    separator: char,
    /// Largeur du terminal en colonnes, si connue.
    viewport: Option<usize>,
    /// Largeur visible de la frame à l'écran.
    drawn_width: usize,
    frames: u64,
}

impl<T: TerminalDriver> Compositor<T> {
    /// Create a compositor that owns the terminal driver for the whole session.
    #[must_use]
    pub fn new(term: T) -> Self {
        Self {
            term,
            on_screen: None,
            canvas: FrameCanvas::new(0, 0),
            status: None,
            separator: DEFAULT_SEPARATOR,
            viewport: None,
            drawn_width: 0,
            frames: 0,
        }
    }

    /// Hide the cursor before the first frame.
    ///
    /// # Errors
    /// Returns the I/O error from the terminal flush.
    pub fn begin(&mut self) -> io::Result<()> {
        self.term.hide_cursor();
        self.term.flush()
    }

    /// Set or clear the status message shown under the digits from the next frame on.
    pub fn set_status(&mut self, status: Option<String>) {
        self.status = status;
    }

    /// Glyph drawn between hours, minutes and seconds from the next frame on.
    pub fn set_separator(&mut self, glyph: char) {
        self.separator = glyph;
    }

    /// Terminal width in columns. `None` draws full-width lines.
    pub fn set_viewport_width(&mut self, width: Option<usize>) {
        self.viewport = width;
    }

    /// Columns of the frame that fit on screen for `layout`.
    #[must_use]
    pub fn visible_width(&self, layout: &ClockLayout) -> usize {
        let full = layout.frame_width();
        self.viewport
            .map_or(full, |w| w.saturating_sub(layout.origin_column).min(full))
    }

    /// Emit one full frame for `time` and commit it with a single flush.
    ///
    /// When a frame with a different layout or visible width is on screen,
    /// its region is cleared from the old origin before the new frame is drawn.
    ///
    /// # Errors
    /// Returns the I/O error from the terminal flush.
    pub fn render_clock(
        &mut self,
        time: &TimeMatrix,
        layout: &ClockLayout,
        color: Option<ClockColor>,
    ) -> io::Result<()> {
        let visible = self.visible_width(layout);
        match self.on_screen {
            Some(prev) if prev == *layout && self.drawn_width == visible => {
                self.term.move_to_previous_line_start(prev.frame_height());
            }
            Some(prev) => {
                log::debug!(
                    "Layout changé (segment {} -> {}, largeur {} -> {visible}), reset de la frame",
                    prev.geometry.seg_size,
                    layout.geometry.seg_size,
                    self.drawn_width
                );
                self.term.move_to_previous_line_start(prev.frame_height());
                self.term.clear_from_cursor_to_end();
            }
            None => {}
        }

        self.compose(time, layout);
        self.emit(layout, visible, color);
        self.on_screen = Some(*layout);
        self.drawn_width = visible;
        self.frames += 1;
        self.term.flush()
    }

    /// Restore the cursor and default colors, leaving the cursor below the last frame.
    ///
    /// # Errors
    /// Returns the I/O error from the terminal flush.
    pub fn finish(&mut self) -> io::Result<()> {
        self.term.reset_style();
        self.term.show_cursor();
        self.term.flush()
    }

    /// Layout of the frame currently on screen.
    #[must_use]
    pub const fn on_screen(&self) -> Option<ClockLayout> {
        self.on_screen
    }

    /// Number of frames emitted so far.
    #[must_use]
    pub const fn frames_drawn(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub const fn terminal(&self) -> &T {
        &self.term
    }

    pub fn into_inner(self) -> T {
        self.term
    }

    /// Canevas de la dernière frame composée.
    #[must_use]
    pub const fn canvas(&self) -> &FrameCanvas {
        &self.canvas
    }

    fn compose(&mut self, time: &TimeMatrix, layout: &ClockLayout) {
        let geometry = layout.geometry;
        let width = layout.frame_width();
        if self.canvas.width == width && self.canvas.height == geometry.rows {
            self.canvas.clear();
        } else {
            self.canvas.resize(width, geometry.rows);
        }

        for unit in 0..UNITS {
            for (slot, &value) in time.unit(unit).iter().enumerate() {
                let grid = render_digit(value, geometry.seg_size);
                self.canvas.blit(&grid, layout.digit_column(unit, slot), 0);
            }
        }

        for unit in 0..UNITS - 1 {
            let column = layout.separator_column(unit);
            for row in layout.separator_rows() {
                self.canvas.set(column, row, self.separator);
            }
        }
    }

    fn emit(&mut self, layout: &ClockLayout, visible: usize, color: Option<ClockColor>) {
        if let Some(c) = color {
            self.term.set_foreground(c);
        }
        for y in 0..self.canvas.height {
            self.term.move_forward(layout.origin_column);
            let line: String = self.canvas.row(y).iter().take(visible).collect();
            self.term.write(&line);
            self.term.write(LINE_END);
        }
        if color.is_some() {
            self.term.reset_style();
        }

        // Ligne de statut : toujours émise, pour garder une hauteur constante.
        self.term.clear_from_cursor_to_end();
        if let Some(status) = &self.status {
            let text: String = status.chars().take(visible).collect();
            self.term.move_forward(layout.origin_column);
            self.term.write(&text);
        }
        self.term.write(LINE_END);
    }
}
