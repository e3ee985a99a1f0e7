//! Tests for the client context
//!
//! Covers functional config updates, persistence through the bridge and the
//! installation registry following the configured directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use walogs_types::{AppConfig, WindowGeometry};

use super::ClientContext;
use crate::bridge::{
    BridgeError, FolderPrompts, InstallationKind, InstallationRegistry, NativeBridge, Platform,
    discover_installations,
};

/// Bridge double recording every persisted config.
#[derive(Default)]
struct RecordingBridge {
    initial: AppConfig,
    saved: Mutex<Vec<AppConfig>>,
    fail_saves: bool,
    geometry: Option<WindowGeometry>,
    folder: Option<PathBuf>,
}

impl NativeBridge for RecordingBridge {
    fn platform(&self) -> Platform {
        Platform::Desktop
    }

    fn load_config(&self) -> Result<AppConfig, BridgeError> {
        Ok(self.initial.clone())
    }

    fn save_config(&self, config: &AppConfig) -> Result<(), BridgeError> {
        if self.fail_saves {
            return Err(BridgeError::NoConfigLocation);
        }
        self.saved.lock().unwrap().push(config.clone());
        Ok(())
    }

    fn select_folder(&self, _prompts: &FolderPrompts) -> Result<Option<PathBuf>, BridgeError> {
        Ok(self.folder.clone())
    }

    fn window_geometry(&self) -> Option<WindowGeometry> {
        self.geometry
    }

    fn discover_installations(&self, wow_directory: &Path) -> InstallationRegistry {
        discover_installations(wow_directory)
    }
}

struct FailingLoad;

impl NativeBridge for FailingLoad {
    fn platform(&self) -> Platform {
        Platform::Browser
    }

    fn load_config(&self) -> Result<AppConfig, BridgeError> {
        Err(BridgeError::NoConfigLocation)
    }
}

fn context_with(bridge: RecordingBridge) -> (ClientContext, Arc<RecordingBridge>) {
    let bridge = Arc::new(bridge);
    (ClientContext::new(Arc::clone(&bridge) as Arc<dyn NativeBridge>), bridge)
}

fn make_install_root() -> tempfile::TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("_retail_/Logs")).unwrap();
    fs::create_dir_all(root.path().join("_classic_era_/Logs")).unwrap();
    root
}

#[test]
fn update_applies_function_of_previous_state() {
    let (ctx, bridge) = context_with(RecordingBridge::default());

    ctx.update_app_config(|prev| AppConfig {
        european_number_format: !prev.european_number_format,
        ..prev.clone()
    });
    ctx.update_app_config(|prev| AppConfig {
        european_number_format: !prev.european_number_format,
        ..prev.clone()
    });

    assert!(!ctx.app_config().european_number_format);
    let saved = bridge.saved.lock().unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved[0].european_number_format);
    assert!(!saved[1].european_number_format);
}

#[test]
fn persistence_failure_keeps_the_update() {
    let (ctx, _) = context_with(RecordingBridge { fail_saves: true, ..Default::default() });
    ctx.update_app_config(|prev| AppConfig {
        wow_directory: Some("/nowhere".to_string()),
        ..prev.clone()
    });
    assert_eq!(ctx.app_config().wow_directory.as_deref(), Some("/nowhere"));
}

#[test]
fn load_failure_falls_back_to_defaults() {
    let ctx = ClientContext::new(Arc::new(FailingLoad));
    assert_eq!(ctx.app_config(), AppConfig::default());
    assert!(ctx.wow_installations().is_empty());
}

#[test]
fn installations_follow_configured_directory() {
    let root = make_install_root();
    let initial = AppConfig {
        wow_directory: Some(root.path().to_string_lossy().into_owned()),
        ..Default::default()
    };
    let (ctx, _) = context_with(RecordingBridge { initial, ..Default::default() });

    let found = ctx.wow_installations();
    assert_eq!(
        found.keys().copied().collect::<Vec<_>>(),
        vec![InstallationKind::Retail, InstallationKind::ClassicEra]
    );

    ctx.clear_wow_directory();
    assert!(ctx.wow_installations().is_empty());

    ctx.set_wow_directory(root.path());
    assert_eq!(ctx.wow_installations().len(), 2);
}

#[test]
fn save_window_position_stores_host_geometry() {
    let geometry = WindowGeometry { x: 100, y: 50, width: 1600, height: 900, maximized: false };
    let (ctx, bridge) = context_with(RecordingBridge { geometry: Some(geometry), ..Default::default() });

    ctx.save_window_position();

    assert_eq!(ctx.app_config().window, Some(geometry));
    assert_eq!(bridge.saved.lock().unwrap().last().unwrap().window, Some(geometry));
}

#[test]
fn save_window_position_without_window_is_noop() {
    let (ctx, bridge) = context_with(RecordingBridge::default());
    ctx.save_window_position();
    assert_eq!(ctx.app_config().window, None);
    assert!(bridge.saved.lock().unwrap().is_empty());
}

#[test]
fn selected_folder_is_stored() {
    let root = make_install_root();
    let (ctx, _) = context_with(RecordingBridge {
        folder: Some(root.path().to_path_buf()),
        ..Default::default()
    });

    let chosen = ctx.select_wow_directory(&FolderPrompts::english());
    assert_eq!(chosen.as_deref(), Some(root.path()));
    assert_eq!(
        ctx.app_config().wow_directory,
        Some(root.path().to_string_lossy().into_owned())
    );
    assert!(ctx.wow_installations().contains_key(&InstallationKind::Retail));
}

#[test]
fn cancelled_selection_leaves_config_alone() {
    let (ctx, bridge) = context_with(RecordingBridge::default());
    assert_eq!(ctx.select_wow_directory(&FolderPrompts::english()), None);
    assert_eq!(ctx.app_config().wow_directory, None);
    assert!(bridge.saved.lock().unwrap().is_empty());
}

#[test]
fn subscribers_see_updates() {
    let (ctx, _) = context_with(RecordingBridge::default());
    let mut rx = ctx.subscribe();
    assert!(!rx.has_changed().unwrap());

    ctx.update_app_config(|prev| AppConfig {
        european_number_format: true,
        ..prev.clone()
    });

    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().european_number_format);
}

#[test]
fn updater_may_read_current_config() {
    let (ctx, bridge) = context_with(RecordingBridge::default());

    ctx.update_app_config(|prev| {
        let seen = ctx.app_config();
        assert_eq!(&seen, prev);
        AppConfig {
            european_number_format: !seen.european_number_format,
            ..seen
        }
    });

    assert!(ctx.app_config().european_number_format);
    assert_eq!(bridge.saved.lock().unwrap().len(), 1);
}
