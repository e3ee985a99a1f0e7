use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::thread::JoinHandle;
use std::sync::{Arc, Mutex};

use walogs_types::{AppConfig, WindowGeometry};

use super::installations::{InstallationRegistry, discover_installations};
use super::{BridgeError, FolderChooser, FolderPrompts, NativeBridge, Platform};

const APP_NAME: &str = "wowarenalogs";
const CONFIG_NAME: &str = "config";

/// Attempts before giving up on an invalid folder selection.
const MAX_SELECT_ATTEMPTS: usize = 3;

/// Latest main window geometry, written by the shell when the window moves.
#[derive(Debug, Clone, Default)]
pub struct WindowTracker {
    inner: Arc<Mutex<Option<WindowGeometry>>>,
}

impl WindowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, geometry: WindowGeometry) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(geometry);
        }
    }

    pub fn current(&self) -> Option<WindowGeometry> {
        self.inner.lock().ok().and_then(|g| *g)
    }
}

/// Bridge for the desktop shell: every capability is present.
pub struct DesktopBridge {
    config_path: PathBuf,
    chooser: Box<dyn FolderChooser>,
    window: WindowTracker,
}

impl DesktopBridge {
    pub fn new(config_path: PathBuf, chooser: Box<dyn FolderChooser>) -> Self {
        Self {
            config_path,
            chooser,
            window: WindowTracker::new(),
        }
    }

    /// Use the per-user config location (`~/.config/wowarenalogs/config.toml` on Linux).
    pub fn with_default_path(chooser: Box<dyn FolderChooser>) -> Result<Self, BridgeError> {
        let path = confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?;
        Ok(Self::new(path, chooser))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Share `tracker` with the shell that owns the window.
    pub fn with_window_tracker(mut self, tracker: WindowTracker) -> Self {
        self.window = tracker;
        self
    }

    /// Handle the shell uses to report window moves.
    pub fn window_tracker(&self) -> WindowTracker {
        self.window.clone()
    }

    fn spawn_opener(url: &str) -> std::io::Result<()> {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        } else if cfg!(target_os = "macos") {
            Command::new("open")
        } else {
            Command::new("xdg-open")
        };
        cmd.arg(url);
        spawn_reaped(cmd).map(|_| ())
    }
}

/// Spawn `cmd` and wait for it on a background thread so the child is
/// reaped without blocking the caller.
fn spawn_reaped(mut cmd: Command) -> std::io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = cmd.spawn()?;
    let pid = child.id();
    Ok(std::thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!(pid, %status, "URL opener exited with failure");
            }
            Some(status)
        }
        Err(e) => {
            tracing::warn!(pid, error = %e, "Failed to wait on URL opener");
            None
        }
    }))
}

impl NativeBridge for DesktopBridge {
    fn platform(&self) -> Platform {
        Platform::Desktop
    }

    fn load_config(&self) -> Result<AppConfig, BridgeError> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file yet, using defaults");
            return Ok(AppConfig::default());
        }
        Ok(confy::load_path(&self.config_path)?)
    }

    fn save_config(&self, config: &AppConfig) -> Result<(), BridgeError> {
        confy::store_path(&self.config_path, config)?;
        tracing::debug!(path = %self.config_path.display(), "Config saved");
        Ok(())
    }

    fn select_folder(&self, prompts: &FolderPrompts) -> Result<Option<PathBuf>, BridgeError> {
        for attempt in 1..=MAX_SELECT_ATTEMPTS {
            let Some(folder) = self.chooser.choose_folder(prompts.locate_prompt(), &prompts.confirm)
            else {
                tracing::debug!("Folder selection cancelled");
                return Ok(None);
            };

            if !discover_installations(&folder).is_empty() {
                tracing::info!(folder = %folder.display(), "Game folder selected");
                return Ok(Some(folder));
            }

            tracing::warn!(folder = %folder.display(), attempt, "Selected folder has no installation");
            self.chooser
                .notify(&prompts.invalid_location, &prompts.invalid_location_message);
        }
        Ok(None)
    }

    fn open_external_url(&self, url: &str) -> Result<(), BridgeError> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(BridgeError::InvalidUrl(url.to_string()));
        }
        Self::spawn_opener(url)?;
        Ok(())
    }

    fn window_geometry(&self) -> Option<WindowGeometry> {
        self.window.current()
    }

    fn discover_installations(&self, wow_directory: &Path) -> InstallationRegistry {
        discover_installations(wow_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;

    /// Replays a fixed list of answers and records notices.
    #[derive(Default)]
    struct ScriptedChooser {
        answers: Mutex<VecDeque<Option<PathBuf>>>,
        notices: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedChooser {
        fn new(answers: Vec<Option<PathBuf>>) -> (Self, Arc<Mutex<Vec<String>>>) {
            let notices = Arc::new(Mutex::new(Vec::new()));
            let chooser = Self {
                answers: Mutex::new(answers.into()),
                notices: Arc::clone(&notices),
            };
            (chooser, notices)
        }
    }

    impl FolderChooser for ScriptedChooser {
        fn choose_folder(&self, _prompt: &str, _confirm_label: &str) -> Option<PathBuf> {
            self.answers.lock().unwrap().pop_front().flatten()
        }

        fn notify(&self, title: &str, _message: &str) {
            self.notices.lock().unwrap().push(title.to_string());
        }
    }

    fn bridge_in(dir: &Path, answers: Vec<Option<PathBuf>>) -> (DesktopBridge, Arc<Mutex<Vec<String>>>) {
        let (chooser, notices) = ScriptedChooser::new(answers);
        (DesktopBridge::new(dir.join("config.toml"), Box::new(chooser)), notices)
    }

    #[test]
    fn config_persists_across_bridges() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, _) = bridge_in(dir.path(), vec![]);
        assert_eq!(bridge.load_config().unwrap(), AppConfig::default());

        let config = AppConfig {
            wow_directory: Some("/games/World of Warcraft".to_string()),
            window: Some(WindowGeometry { x: 5, y: 6, width: 800, height: 600, maximized: true }),
            ..Default::default()
        };
        bridge.save_config(&config).unwrap();

        let (reopened, _) = bridge_in(dir.path(), vec![]);
        assert_eq!(reopened.load_config().unwrap(), config);
    }

    #[test]
    fn select_folder_reprompts_after_invalid_choice() {
        let dir = tempfile::tempdir().unwrap();
        let wow = dir.path().join("World of Warcraft");
        fs::create_dir_all(wow.join("_retail_/Logs")).unwrap();
        let bogus = dir.path().join("Downloads");
        fs::create_dir_all(&bogus).unwrap();

        let (bridge, notices) = bridge_in(dir.path(), vec![Some(bogus), Some(wow.clone())]);
        let chosen = bridge.select_folder(&FolderPrompts::english()).unwrap();
        assert_eq!(chosen, Some(wow));
        assert_eq!(notices.lock().unwrap().as_slice(), ["Invalid location"]);
    }

    #[test]
    fn select_folder_gives_up_after_repeated_invalid_choices() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().to_path_buf();
        let answers = vec![Some(bogus.clone()); MAX_SELECT_ATTEMPTS + 1];
        let (bridge, notices) = bridge_in(dir.path(), answers);
        assert_eq!(bridge.select_folder(&FolderPrompts::english()).unwrap(), None);
        assert_eq!(notices.lock().unwrap().len(), MAX_SELECT_ATTEMPTS);
    }

    #[test]
    fn cancelled_selection_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, notices) = bridge_in(dir.path(), vec![None]);
        assert_eq!(bridge.select_folder(&FolderPrompts::english()).unwrap(), None);
        assert!(notices.lock().unwrap().is_empty());
    }

    #[test]
    fn rejects_non_http_urls() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, _) = bridge_in(dir.path(), vec![]);
        let err = bridge.open_external_url("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidUrl(_)));
    }

    #[test]
    fn shared_tracker_reports_shell_updates() {
        let dir = tempfile::tempdir().unwrap();
        let tracker = WindowTracker::new();
        let (bridge, _) = bridge_in(dir.path(), vec![]);
        let bridge = bridge.with_window_tracker(tracker.clone());

        let geometry = WindowGeometry { x: -1920, y: 0, width: 1920, height: 1080, maximized: true };
        tracker.update(geometry);
        assert_eq!(bridge.window_geometry(), Some(geometry));
    }

    #[cfg(unix)]
    #[test]
    fn opener_child_is_reaped() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 3"]);
        let status = spawn_reaped(cmd).unwrap().join().unwrap().unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn window_geometry_follows_tracker() {
        let dir = tempfile::tempdir().unwrap();
        let (bridge, _) = bridge_in(dir.path(), vec![]);
        assert_eq!(bridge.window_geometry(), None);

        let geometry = WindowGeometry { x: 1, y: 2, width: 3, height: 4, maximized: false };
        bridge.window_tracker().update(geometry);
        assert_eq!(bridge.window_geometry(), Some(geometry));
    }
}
