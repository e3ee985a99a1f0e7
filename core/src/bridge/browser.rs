use std::sync::Mutex;

use walogs_types::AppConfig;

use super::{BridgeError, NativeBridge, Platform};

/// Bridge for hosts without native access.
///
/// Config lives in memory for the lifetime of the process; every other
/// capability keeps the trait's no-op default.
#[derive(Debug, Default)]
pub struct BrowserBridge {
    config: Mutex<AppConfig>,
}

impl BrowserBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NativeBridge for BrowserBridge {
    fn platform(&self) -> Platform {
        Platform::Browser
    }

    fn load_config(&self) -> Result<AppConfig, BridgeError> {
        Ok(self.config.lock().map(|c| c.clone()).unwrap_or_default())
    }

    fn save_config(&self, config: &AppConfig) -> Result<(), BridgeError> {
        if let Ok(mut slot) = self.config.lock() {
            *slot = config.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::FolderPrompts;

    #[test]
    fn keeps_config_in_memory() {
        let bridge = BrowserBridge::new();
        let config = AppConfig { european_number_format: true, ..Default::default() };
        bridge.save_config(&config).unwrap();
        assert_eq!(bridge.load_config().unwrap(), config);
    }

    #[test]
    fn has_no_native_capabilities() {
        let bridge = BrowserBridge::new();
        assert_eq!(bridge.platform(), Platform::Browser);
        assert_eq!(bridge.select_folder(&FolderPrompts::english()).unwrap(), None);
        assert_eq!(bridge.window_geometry(), None);
    }
}
