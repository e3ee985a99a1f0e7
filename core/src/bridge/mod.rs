//! Platform bridge between the client and the host shell.
//!
//! Each host exposes a different subset of native capabilities. The
//! [`NativeBridge`] trait gives every capability a no-op default so that a
//! host lacking one simply does nothing; callers never branch on platform.
//!
//! The implementation is picked once at startup by [`create_bridge`]:
//!
//! - [`DesktopBridge`]: config on disk, folder selection, URL opener,
//!   window geometry, installation discovery
//! - [`BrowserBridge`]: nothing native, config kept in memory

mod browser;
mod desktop;
mod installations;

pub use browser::BrowserBridge;
pub use desktop::{DesktopBridge, WindowTracker};
pub use installations::{
    InstallationKind, InstallationRegistry, default_install_roots, detect_install_root,
    discover_installations,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use walogs_types::{AppConfig, WindowGeometry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Desktop,
    Browser,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Browser => "browser",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("config store error: {0}")]
    Config(#[from] confy::ConfyError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("refusing to open non-http url {0:?}")]
    InvalidUrl(String),
    #[error("no config location available on this system")]
    NoConfigLocation,
}

// ─────────────────────────────────────────────────────────────────────────────
// Folder Selection
// ─────────────────────────────────────────────────────────────────────────────

pub const PROMPT_LOCATE_WOW_MAC: &str = "setup-page-locate-wow-mac";
pub const PROMPT_LOCATE_WOW_WINDOWS: &str = "setup-page-locate-wow-windows";
pub const PROMPT_INVALID_LOCATION: &str = "setup-page-invalid-location";
pub const PROMPT_INVALID_LOCATION_MESSAGE: &str = "setup-page-invalid-location-message";
pub const PROMPT_CONFIRM: &str = "confirm";

/// Localized strings shown while the user locates the game folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderPrompts {
    pub locate_wow_mac: String,
    pub locate_wow_windows: String,
    pub invalid_location: String,
    pub invalid_location_message: String,
    pub confirm: String,
}

impl FolderPrompts {
    pub fn english() -> Self {
        Self {
            locate_wow_mac: "Locate the World of Warcraft folder in Applications".to_string(),
            locate_wow_windows: "Locate the World of Warcraft folder (usually under Program Files)"
                .to_string(),
            invalid_location: "Invalid location".to_string(),
            invalid_location_message:
                "The selected folder does not contain a World of Warcraft installation.".to_string(),
            confirm: "Confirm".to_string(),
        }
    }

    /// Prompt matching the host operating system.
    pub fn locate_prompt(&self) -> &str {
        if cfg!(target_os = "macos") {
            &self.locate_wow_mac
        } else {
            &self.locate_wow_windows
        }
    }

    /// Look a prompt up by its localization key.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            PROMPT_LOCATE_WOW_MAC => Some(&self.locate_wow_mac),
            PROMPT_LOCATE_WOW_WINDOWS => Some(&self.locate_wow_windows),
            PROMPT_INVALID_LOCATION => Some(&self.invalid_location),
            PROMPT_INVALID_LOCATION_MESSAGE => Some(&self.invalid_location_message),
            PROMPT_CONFIRM => Some(&self.confirm),
            _ => None,
        }
    }
}

impl Default for FolderPrompts {
    fn default() -> Self {
        Self::english()
    }
}

/// Host-provided folder picker used by the desktop bridge.
pub trait FolderChooser: Send + Sync {
    /// Ask for a folder. `None` means the user cancelled.
    fn choose_folder(&self, prompt: &str, confirm_label: &str) -> Option<PathBuf>;

    /// Show a short notice (e.g. an invalid selection).
    fn notify(&self, title: &str, message: &str);
}

// ─────────────────────────────────────────────────────────────────────────────
// Bridge Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Native capabilities offered by the host.
///
/// Every method has a default that behaves as "capability absent".
pub trait NativeBridge: Send + Sync {
    fn platform(&self) -> Platform;

    fn load_config(&self) -> Result<AppConfig, BridgeError> {
        Ok(AppConfig::default())
    }

    fn save_config(&self, _config: &AppConfig) -> Result<(), BridgeError> {
        Ok(())
    }

    fn select_folder(&self, _prompts: &FolderPrompts) -> Result<Option<PathBuf>, BridgeError> {
        Ok(None)
    }

    fn open_external_url(&self, _url: &str) -> Result<(), BridgeError> {
        Ok(())
    }

    /// Current main window geometry, if the host has a window.
    fn window_geometry(&self) -> Option<WindowGeometry> {
        None
    }

    fn discover_installations(&self, _wow_directory: &Path) -> InstallationRegistry {
        InstallationRegistry::new()
    }
}

/// Build the bridge for `platform`. Called once at startup.
///
/// `window` is where the shell reports its window geometry; hosts without
/// a window ignore it.
pub fn create_bridge(
    platform: Platform,
    chooser: Box<dyn FolderChooser>,
    window: WindowTracker,
) -> Result<Arc<dyn NativeBridge>, BridgeError> {
    let bridge: Arc<dyn NativeBridge> = match platform {
        Platform::Desktop => {
            Arc::new(DesktopBridge::with_default_path(chooser)?.with_window_tracker(window))
        }
        Platform::Browser => Arc::new(BrowserBridge::new()),
    };
    tracing::info!(platform = %platform, "Native bridge initialised");
    Ok(bridge)
}
