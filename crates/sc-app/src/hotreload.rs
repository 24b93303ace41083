use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::cli::Overrides;
use crate::shared::SharedState;

/// Lance un thread qui surveille le fichier config et publie chaque version valide.
///
/// Retourne le Watcher (doit rester vivant tant que l'app tourne).
///
/// # Errors
/// Returns an error if the watcher cannot be created or the path cannot be watched.
pub fn spawn_config_watcher(
    config_path: &Path,
    shared: &Arc<SharedState>,
    overrides: Overrides,
) -> Result<impl Watcher + use<>> {
    let shared = Arc::clone(shared);
    let path = config_path.to_path_buf();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Ok(event) = res
            && matches!(event.kind, EventKind::Modify(_))
        {
            reload(&path, &shared, &overrides);
        }
    })?;

    watcher.watch(config_path, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

/// Recharge la config depuis `path`. Garde l'ancienne si le fichier est invalide.
///
/// Returns `true` when a new configuration was published.
pub fn reload(path: &Path, shared: &SharedState, overrides: &Overrides) -> bool {
    match sc_core::config::load_config(path) {
        Ok(mut config) => {
            overrides.apply(&mut config);
            shared.publish(config);
            log::info!("Config rechargée depuis {}", path.display());
            true
        }
        Err(e) => {
            log::warn!("Erreur de rechargement config : {e:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use sc_core::config::ClockConfig;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn valid_file_is_published() {
        let shared = SharedState::new(ClockConfig::default());
        let file = write_config("[clock]\nseg_size = 4\n");
        assert!(reload(file.path(), &shared, &Overrides::default()));
        assert_eq!(shared.generation(), 1);
        assert_eq!(shared.config().seg_size, 4);
    }

    #[test]
    fn invalid_file_keeps_previous_config() {
        let shared = SharedState::new(ClockConfig::default());
        let file = write_config("[clock]\nseg_size = 9\n");
        assert!(!reload(file.path(), &shared, &Overrides::default()));
        assert_eq!(shared.generation(), 0);
        assert_eq!(shared.config().seg_size, 2);
    }

    #[test]
    fn watcher_starts_on_existing_file() {
        let shared = Arc::new(SharedState::new(ClockConfig::default()));
        let file = write_config("[clock]\n");
        let watcher = spawn_config_watcher(file.path(), &shared, Overrides::default());
        assert!(watcher.is_ok());
    }
}
