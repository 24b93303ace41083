use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sc_core::clock::TimeMatrix;
use sc_core::config::ClockConfig;
use sc_core::term::TerminalDriver;
use sc_core::traits::ClockSource;
use sc_render::Compositor;

use crate::shared::SharedState;

/// Boucle de rendu : seule propriétaire du terminal pendant toute la session.
///
/// Chaque tick relit l'état partagé, lit l'heure et redessine la frame en
/// place. La config n'est rechargée que si sa génération a changé.
///
/// La largeur du terminal est relue à chaque tick : la frame est coupée au
/// bord droit et la ligne de statut signale un terminal trop étroit.
pub struct Session<T: TerminalDriver> {
    compositor: Compositor<T>,
    shared: Arc<SharedState>,
    clock: Box<dyn ClockSource>,
    config: Arc<ClockConfig>,
    seen_generation: u64,
    viewport: Box<dyn Fn() -> Option<usize>>,
    /// Message actuellement transmis au compositor.
    shown_status: Option<String>,
    started: bool,
    finished: bool,
}

impl<T: TerminalDriver> Session<T> {
    pub fn new(term: T, shared: Arc<SharedState>, clock: Box<dyn ClockSource>) -> Self {
        let config = shared.config();
        let seen_generation = shared.generation();
        let mut compositor = Compositor::new(term);
        compositor.set_separator(config.separator);
        Self {
            compositor,
            shared,
            clock,
            config,
            seen_generation,
            viewport: Box::new(terminal_width),
            shown_status: None,
            started: false,
            finished: false,
        }
    }

    /// Replace the function that reads the terminal width.
    #[must_use]
    pub fn with_viewport<F>(mut self, read_width: F) -> Self
    where
        F: Fn() -> Option<usize> + 'static,
    {
        self.viewport = Box::new(read_width);
        self
    }

    /// Draw one frame. Returns the configured tick interval.
    ///
    /// # Errors
    /// Returns an error if the clock is out of range or the terminal write fails.
    pub fn tick(&mut self) -> Result<Duration> {
        if !self.started {
            self.compositor.begin().context("Impossible de masquer le curseur")?;
            self.started = true;
        }

        self.sync_config();
        let width = (self.viewport)();
        self.compositor.set_viewport_width(width);
        self.sync_status(width);

        let time = TimeMatrix::now(self.clock.as_ref())?;
        let layout = self.config.layout();
        self.compositor
            .render_clock(&time, &layout, self.config.color)
            .context("Écriture terminal impossible")?;

        Ok(Duration::from_millis(self.config.tick_ms))
    }

    /// Tick until shutdown is requested, then restore the terminal.
    ///
    /// # Errors
    /// Returns the first error from [`Session::tick`] or from the final restore.
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "Horloge démarrée (segment {}, tick {} ms)",
            self.config.seg_size,
            self.config.tick_ms
        );
        while self.shared.is_running() {
            let start = Instant::now();
            let interval = self.tick()?;
            std::thread::sleep(interval.saturating_sub(start.elapsed()));
        }
        log::info!("Arrêt après {} frames", self.compositor.frames_drawn());
        self.shutdown()
    }

    /// Restore cursor and colors. Safe to call more than once.
    ///
    /// # Errors
    /// Returns the I/O error from the terminal flush.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.compositor
            .finish()
            .context("Impossible de restaurer le terminal")
    }

    #[must_use]
    pub const fn compositor(&self) -> &Compositor<T> {
        &self.compositor
    }

    fn sync_config(&mut self) {
        let generation = self.shared.generation();
        if generation == self.seen_generation {
            return;
        }
        self.seen_generation = generation;
        self.config = self.shared.config();
        self.compositor.set_separator(self.config.separator);
    }

    /// Le message publié est prioritaire ; à défaut, on signale un terminal trop étroit.
    fn sync_status(&mut self, width: Option<usize>) {
        let wanted = match self.shared.status() {
            Some(message) => Some(String::clone(&message)),
            None => narrow_notice(&self.config, width),
        };
        if wanted != self.shown_status {
            self.compositor.set_status(wanted.clone());
            self.shown_status = wanted;
        }
    }
}

impl<T: TerminalDriver> Drop for Session<T> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::warn!("{e:#}");
        }
    }
}

/// Largeur courante du terminal, `None` si elle ne peut pas être lue.
fn terminal_width() -> Option<usize> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _)| usize::from(cols))
        .filter(|&cols| cols > 0)
}

fn narrow_notice(config: &ClockConfig, width: Option<usize>) -> Option<String> {
    let layout = config.layout();
    let needed = layout.origin_column + layout.frame_width();
    match width {
        Some(cols) if cols < needed => Some(format!(
            "Terminal trop étroit : {cols} colonnes pour {needed} nécessaires"
        )),
        _ => None,
    }
}

/// Active le raw mode pour la durée de vie du guard.
pub struct RawModeGuard;

impl RawModeGuard {
    /// # Errors
    /// Returns an error if the terminal refuses raw mode.
    pub fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().context("Impossible d'activer le raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        crossterm::terminal::disable_raw_mode().ok();
    }
}

/// Restaure le terminal avant d'afficher un panic (raw mode, couleurs, curseur).
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        crossterm::terminal::disable_raw_mode().ok();
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(b"\x1b[0m\x1b[?25h\r\n");
        let _ = stderr.flush();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use sc_core::clock::FixedClock;
    use sc_render::{RecordingTerminal, TermOp};

    use super::*;

    fn session(shared: &Arc<SharedState>) -> Session<RecordingTerminal> {
        Session::new(
            RecordingTerminal::default(),
            Arc::clone(shared),
            Box::new(FixedClock::new(12, 34, 56)),
        )
        .with_viewport(|| None)
    }

    fn batches(session: &Session<RecordingTerminal>) -> &[Vec<TermOp>] {
        session.compositor().terminal().batches()
    }

    #[test]
    fn first_tick_hides_cursor_then_draws() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared);
        let interval = s.tick().unwrap();
        assert_eq!(interval, Duration::from_millis(10));

        let all = batches(&s);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], vec![TermOp::HideCursor]);
        assert!(!matches!(all[1][0], TermOp::PreviousLineStart(_)));
        assert_eq!(s.compositor().frames_drawn(), 1);
    }

    #[test]
    fn published_size_takes_effect_with_clear() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared);
        s.tick().unwrap();
        s.tick().unwrap();

        shared.update(|c| c.with_seg_size(4)).unwrap();
        s.tick().unwrap();

        let last = s.compositor().terminal().last_batch().unwrap();
        // Ancienne hauteur : 2*2+1 lignes de chiffres + statut.
        assert_eq!(last[0], TermOp::PreviousLineStart(6));
        assert_eq!(last[1], TermOp::ClearToEnd);
        assert_eq!(s.compositor().on_screen().unwrap().geometry.seg_size, 4);

        s.tick().unwrap();
        let last = s.compositor().terminal().last_batch().unwrap();
        assert_eq!(last[0], TermOp::PreviousLineStart(10));
        assert_ne!(last[1], TermOp::ClearToEnd);
    }

    #[test]
    fn status_is_drawn_under_digits() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared);
        shared.set_status(Some("hors limites".into()));
        s.tick().unwrap();
        let last = s.compositor().terminal().last_batch().unwrap();
        assert!(last.contains(&TermOp::Write("hors limites".into())));

        shared.set_status(None);
        s.tick().unwrap();
        let last = s.compositor().terminal().last_batch().unwrap();
        assert!(!last.contains(&TermOp::Write("hors limites".into())));
    }

    #[test]
    fn run_stops_when_shutdown_requested() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        shared.request_shutdown();
        let mut s = session(&shared);
        s.run().unwrap();
        assert_eq!(s.compositor().frames_drawn(), 0);
        let last = s.compositor().terminal().last_batch().unwrap();
        assert_eq!(last, [TermOp::ResetStyle, TermOp::ShowCursor]);
    }

    #[test]
    fn shutdown_restores_once() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared);
        s.tick().unwrap();
        s.shutdown().unwrap();
        s.shutdown().unwrap();
        let restores = batches(&s)
            .iter()
            .filter(|b| b.contains(&TermOp::ShowCursor))
            .count();
        assert_eq!(restores, 1);
    }

    #[test]
    fn narrow_terminal_clips_and_reports_on_status_line() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared).with_viewport(|| Some(80));
        s.tick().unwrap();
        shared.update(|c| c.with_seg_size(4)).unwrap();
        s.tick().unwrap();
        s.tick().unwrap();

        let last = s.compositor().terminal().last_batch().unwrap();
        let writes: Vec<&str> = last
            .iter()
            .filter_map(|op| match op {
                TermOp::Write(t) if t != "\r\n" => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert!(writes.iter().all(|w| w.chars().count() <= 80));
        assert!(writes.last().unwrap().starts_with("Terminal trop étroit : 80"));
        assert_eq!(last[0], TermOp::PreviousLineStart(10));

        // Un message publié reste prioritaire.
        shared.set_status(Some("taille refusée".into()));
        s.tick().unwrap();
        let last = s.compositor().terminal().last_batch().unwrap();
        assert!(last.contains(&TermOp::Write("taille refusée".into())));
    }

    #[test]
    fn wide_enough_terminal_has_no_notice() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared).with_viewport(|| Some(120));
        s.tick().unwrap();
        let last = s.compositor().terminal().last_batch().unwrap();
        let notice = last
            .iter()
            .any(|op| matches!(op, TermOp::Write(t) if t.starts_with("Terminal")));
        assert!(!notice);
    }

    #[test]
    fn separator_follows_published_config() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared);
        s.tick().unwrap();
        shared.publish(ClockConfig {
            separator: ':',
            ..ClockConfig::default()
        });
        s.tick().unwrap();
        assert_eq!(s.compositor().canvas().count(':'), 4);
    }

    #[test]
    fn failed_reload_leaves_only_frame_text_on_terminal() {
        use std::io::Write as _;

        use sc_core::config::DEFAULT_SEPARATOR;

        use crate::cli::Overrides;
        use crate::hotreload;

        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let mut s = session(&shared);
        s.tick().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[clock]\nseg_size = 9\n").unwrap();
        assert!(!hotreload::reload(file.path(), &shared, &Overrides::default()));
        s.tick().unwrap();

        let last = s.compositor().terminal().last_batch().unwrap();
        let frame_glyphs = [' ', '_', '|', DEFAULT_SEPARATOR];
        for op in last {
            if let TermOp::Write(text) = op {
                assert!(
                    text == "\r\n" || text.chars().all(|c| frame_glyphs.contains(&c)),
                    "texte inattendu sur le terminal : {text:?}"
                );
            }
        }
        let line_ends = last
            .iter()
            .filter(|op| matches!(op, TermOp::Write(t) if t == "\r\n"))
            .count();
        assert_eq!(last[0], TermOp::PreviousLineStart(line_ends));
    }
}
