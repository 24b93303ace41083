use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sc_core::color::ClockColor;
use sc_core::config::{ClockConfig, MAX_SEG_SIZE, MIN_SEG_SIZE};

use crate::shared::SharedState;

/// Délai max d'attente d'un événement avant de revérifier le flag d'arrêt.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Action clavier, découplée de l'événement crossterm pour être testable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Chiffre tapé, pas encore validé.
    SetSize(i64),
    Grow,
    Shrink,
    CycleColor,
    Quit,
    Ignore,
}

/// Traduit une touche en action.
#[must_use]
pub fn action_for(key: &KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c' | 'C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Quit
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => InputAction::Quit,
        KeyCode::Char(d) if d.is_ascii_digit() => {
            InputAction::SetSize(i64::from(d as u8 - b'0'))
        }
        KeyCode::Char('+' | '=') | KeyCode::Up => InputAction::Grow,
        KeyCode::Char('-' | '_') | KeyCode::Down => InputAction::Shrink,
        KeyCode::Char('c' | 'C') => InputAction::CycleColor,
        _ => InputAction::Ignore,
    }
}

/// Applique une action sur l'état partagé. Une taille refusée est signalée
/// dans la ligne de statut et la saisie reste ouverte.
pub fn apply(shared: &SharedState, action: InputAction) {
    let result = match action {
        InputAction::SetSize(n) => shared.update(|c| c.with_seg_size(n)),
        InputAction::Grow => shared.update(|c| c.with_seg_size(i64::from(c.seg_size) + 1)),
        InputAction::Shrink => shared.update(|c| c.with_seg_size(i64::from(c.seg_size) - 1)),
        InputAction::CycleColor => shared.update(|c| {
            Ok(ClockConfig {
                color: ClockColor::cycle(c.color),
                ..c.clone()
            })
        }),
        InputAction::Quit => {
            log::info!("Arrêt demandé au clavier");
            shared.request_shutdown();
            return;
        }
        InputAction::Ignore => return,
    };

    match result {
        Ok(config) => {
            log::debug!(
                "Config clavier : segment {}, couleur {:?}",
                config.seg_size,
                config.color
            );
            shared.set_status(None);
        }
        Err(e) => {
            shared.set_status(Some(format!(
                "{e} - tapez un chiffre de {MIN_SEG_SIZE} à {MAX_SEG_SIZE}"
            )));
        }
    }
}

/// Lance le thread clavier. Suppose le terminal en raw mode.
///
/// Le thread se termine dès que l'arrêt est demandé (au plus `POLL_INTERVAL` plus tard).
pub fn spawn_input_thread(shared: Arc<SharedState>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("segclock-input".into())
        .spawn(move || {
            while shared.is_running() {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => apply(&shared, action_for(&key)),
                        Ok(_) => {}
                        Err(e) => {
                            log::warn!("Lecture clavier impossible : {e}");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        log::warn!("Polling clavier impossible : {e}");
                        break;
                    }
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for(&press(KeyCode::Char('3'))), InputAction::SetSize(3));
        assert_eq!(action_for(&press(KeyCode::Char('0'))), InputAction::SetSize(0));
        assert_eq!(action_for(&press(KeyCode::Char('+'))), InputAction::Grow);
        assert_eq!(action_for(&press(KeyCode::Char('-'))), InputAction::Shrink);
        assert_eq!(action_for(&press(KeyCode::Char('c'))), InputAction::CycleColor);
        assert_eq!(action_for(&press(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(action_for(&press(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(action_for(&press(KeyCode::Char('x'))), InputAction::Ignore);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(&key), InputAction::Quit);
    }

    #[test]
    fn releases_are_ignored() {
        let key = KeyEvent::new_with_kind(
            KeyCode::Char('4'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(action_for(&key), InputAction::Ignore);
    }

    #[test]
    fn valid_size_is_published_and_clears_status() {
        let shared = SharedState::new(ClockConfig::default());
        shared.set_status(Some("old".into()));
        apply(&shared, InputAction::SetSize(4));
        assert_eq!(shared.config().seg_size, 4);
        assert_eq!(shared.generation(), 1);
        assert!(shared.status().is_none());
    }

    #[test]
    fn invalid_size_is_reported_and_not_published() {
        let shared = SharedState::new(ClockConfig::default());
        apply(&shared, InputAction::SetSize(7));
        assert_eq!(shared.config().seg_size, 2);
        assert_eq!(shared.generation(), 0);
        let status = shared.status().unwrap();
        assert!(status.contains('7'), "{status}");

        // Nouvelle saisie valide : le message disparaît.
        apply(&shared, InputAction::SetSize(1));
        assert_eq!(shared.config().seg_size, 1);
        assert!(shared.status().is_none());
    }

    #[test]
    fn grow_and_shrink_stop_at_bounds() {
        let shared = SharedState::new(ClockConfig::default().with_seg_size(5).unwrap());
        apply(&shared, InputAction::Grow);
        assert_eq!(shared.config().seg_size, 5);
        assert!(shared.status().is_some());

        apply(&shared, InputAction::Shrink);
        assert_eq!(shared.config().seg_size, 4);
    }

    #[test]
    fn color_cycles() {
        let shared = SharedState::new(ClockConfig::default());
        apply(&shared, InputAction::CycleColor);
        assert_eq!(shared.config().color, Some(ClockColor::Black));
        apply(&shared, InputAction::CycleColor);
        assert_eq!(shared.config().color, Some(ClockColor::Red));
    }

    #[test]
    fn quit_stops_session() {
        let shared = SharedState::new(ClockConfig::default());
        apply(&shared, InputAction::Quit);
        assert!(!shared.is_running());
    }
}
