//! Client-wide state: configuration and discovered installations.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio::sync::watch;
use walogs_types::AppConfig;

use crate::bridge::{FolderPrompts, InstallationRegistry, NativeBridge, Platform};

/// Holds the application config for the lifetime of the process.
///
/// The config has a single writer: every change is a pure
/// `next = f(&prev)` applied under the lock and then written back through
/// the bridge. Persistence failures are logged, never returned.
pub struct ClientContext {
    bridge: Arc<dyn NativeBridge>,
    config: Mutex<AppConfig>,
    /// Serialises updates; `config` itself is only locked for reads and the final swap
    update_lock: Mutex<()>,
    installations: RwLock<InstallationRegistry>,
    config_tx: watch::Sender<AppConfig>,
}

impl ClientContext {
    /// Load the persisted config and scan the configured game directory.
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        let config = bridge.load_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        });
        let installations = scan(bridge.as_ref(), &config);
        tracing::info!(
            platform = %bridge.platform(),
            installations = installations.len(),
            "Client context ready"
        );
        let (config_tx, _) = watch::channel(config.clone());
        Self {
            bridge,
            config: Mutex::new(config),
            update_lock: Mutex::new(()),
            installations: RwLock::new(installations),
            config_tx,
        }
    }

    pub fn platform(&self) -> Platform {
        self.bridge.platform()
    }

    pub fn bridge(&self) -> &Arc<dyn NativeBridge> {
        &self.bridge
    }

    /// Snapshot of the current config.
    pub fn app_config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Receiver notified after every applied update.
    pub fn subscribe(&self) -> watch::Receiver<AppConfig> {
        self.config_tx.subscribe()
    }

    /// Apply `updater` to the current config and persist the result.
    ///
    /// The updater runs without the config lock held, so it may read
    /// [`app_config`](Self::app_config). It must not call
    /// `update_app_config` itself: updates are serialised and a nested one
    /// deadlocks.
    pub fn update_app_config<F>(&self, updater: F)
    where
        F: FnOnce(&AppConfig) -> AppConfig,
    {
        let _writer = self.update_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let prev = self.app_config();
        let next = updater(&prev);
        let directory_changed = prev.wow_directory != next.wow_directory;
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = next.clone();

        // Persist while still holding the writer lock so writes land in update order
        if let Err(e) = self.bridge.save_config(&next) {
            tracing::warn!(error = %e, "Failed to persist config");
        }

        if directory_changed {
            self.refresh_installations_for(&next);
        }
        self.config_tx.send_replace(next);
    }

    /// Installations found under the configured game directory.
    pub fn wow_installations(&self) -> InstallationRegistry {
        self.installations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rescan the configured directory (e.g. after the user installed a new flavor).
    pub fn refresh_installations(&self) {
        let config = self.app_config();
        self.refresh_installations_for(&config);
    }

    fn refresh_installations_for(&self, config: &AppConfig) {
        let found = scan(self.bridge.as_ref(), config);
        tracing::debug!(count = found.len(), "Installation registry refreshed");
        *self
            .installations
            .write()
            .unwrap_or_else(PoisonError::into_inner) = found;
    }

    /// Capture the window geometry from the host and store it in the config.
    ///
    /// No-op on hosts without a window.
    pub fn save_window_position(&self) {
        let Some(geometry) = self.bridge.window_geometry() else {
            tracing::debug!("Host reports no window geometry, nothing to save");
            return;
        };
        self.update_app_config(|prev| AppConfig {
            window: Some(geometry),
            ..prev.clone()
        });
    }

    /// Let the user pick the game folder; a valid choice is stored in the config.
    pub fn select_wow_directory(&self, prompts: &FolderPrompts) -> Option<PathBuf> {
        match self.bridge.select_folder(prompts) {
            Ok(Some(folder)) => {
                self.set_wow_directory(&folder);
                Some(folder)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Folder selection failed");
                None
            }
        }
    }

    pub fn set_wow_directory(&self, folder: &Path) {
        let folder = folder.to_string_lossy().into_owned();
        self.update_app_config(|prev| AppConfig {
            wow_directory: Some(folder),
            ..prev.clone()
        });
    }

    pub fn clear_wow_directory(&self) {
        self.update_app_config(|prev| AppConfig {
            wow_directory: None,
            ..prev.clone()
        });
    }

    pub fn open_external_url(&self, url: &str) {
        if let Err(e) = self.bridge.open_external_url(url) {
            tracing::warn!(error = %e, url, "Failed to open external url");
        }
    }
}

fn scan(bridge: &dyn NativeBridge, config: &AppConfig) -> InstallationRegistry {
    match config.wow_directory.as_deref() {
        Some(dir) => bridge.discover_installations(Path::new(dir)),
        None => InstallationRegistry::new(),
    }
}
