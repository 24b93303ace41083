use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use arc_swap::{ArcSwap, ArcSwapOption};
use sc_core::config::ClockConfig;
use sc_core::error::CoreError;

/// État partagé entre la boucle de rendu et les tâches d'entrée
/// (clavier, hot-reload, signaux).
///
/// Seule la boucle de rendu écrit sur le terminal ; les autres threads ne
/// font que publier une config, un message de statut ou une demande d'arrêt.
pub struct SharedState {
    /// Config courante (lecture via arc-swap depuis tous les threads).
    config: ArcSwap<ClockConfig>,
    /// Incrémenté à chaque publication, après le store de la config.
    generation: AtomicU64,
    /// Message affiché sous l'horloge.
    status: ArcSwapOption<String>,
    running: AtomicBool,
}

impl SharedState {
    #[must_use]
    pub fn new(config: ClockConfig) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
            generation: AtomicU64::new(0),
            status: ArcSwapOption::empty(),
            running: AtomicBool::new(true),
        }
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn config(&self) -> Arc<ClockConfig> {
        self.config.load_full()
    }

    /// Number of configurations published so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Replace the configuration and bump the generation.
    pub fn publish(&self, config: ClockConfig) {
        self.config.store(Arc::new(config));
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Derive a new configuration from the current one and publish it.
    ///
    /// Only the keyboard thread calls this; file reloads replace the config wholesale.
    ///
    /// # Errors
    /// Returns the error from `f`; nothing is published in that case.
    pub fn update<F>(&self, f: F) -> Result<Arc<ClockConfig>, CoreError>
    where
        F: FnOnce(&ClockConfig) -> Result<ClockConfig, CoreError>,
    {
        let current = self.config.load_full();
        let next = f(&current)?;
        self.publish(next);
        Ok(self.config())
    }

    pub fn set_status(&self, message: Option<String>) {
        self.status.store(message.map(Arc::new));
    }

    #[must_use]
    pub fn status(&self) -> Option<Arc<String>> {
        self.status.load_full()
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::Release);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
