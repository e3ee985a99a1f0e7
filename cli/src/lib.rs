pub mod chooser;
pub mod commands;
pub mod render;

use std::io::Write;
use std::sync::Arc;

use tokio::sync::Mutex;
use walogs_core::{ClientContext, WindowTracker};
use walogs_core::stats::{HttpStatsFetcher, StatsClient};
use walogs_types::StatsSettings;

type HttpStatsClient = StatsClient<HttpStatsFetcher>;

/// State kept for the lifetime of the shell.
pub struct Shell {
    pub client: ClientContext,
    /// Geometry the terminal reports on behalf of a host window
    pub window: WindowTracker,
    stats: Mutex<Option<(StatsSettings, Arc<HttpStatsClient>)>>,
}

impl Shell {
    pub fn new(client: ClientContext, window: WindowTracker) -> Self {
        Self {
            client,
            window,
            stats: Mutex::new(None),
        }
    }

    /// Stats client for the configured feed, rebuilt when the settings change.
    pub async fn stats_client(&self) -> Result<Arc<HttpStatsClient>, String> {
        let settings = self.client.app_config().stats;
        let mut slot = self.stats.lock().await;
        if let Some((current, client)) = slot.as_ref()
            && *current == settings
        {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(StatsClient::from_settings(&settings).map_err(|e| e.to_string())?);
        *slot = Some((settings, Arc::clone(&client)));
        Ok(client)
    }
}

/// Read one line from stdin. `None` on end of input.
pub fn readline() -> Result<Option<String>, String> {
    write!(std::io::stdout(), "> ").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    let mut buffer = String::new();
    let read = std::io::stdin()
        .read_line(&mut buffer)
        .map_err(|e| e.to_string())?;
    Ok((read > 0).then_some(buffer))
}
