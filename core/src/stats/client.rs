use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use walogs_types::{StatsData, StatsSettings, comp_stats_url};

const USER_AGENT: &str = concat!("walogs/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("stats request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("stats feed {url} returned HTTP {status}")]
    Status { status: u16, url: String },
    #[error("invalid stats feed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of the competitive stats document.
pub trait StatsFetcher: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<StatsData, StatsError>> + Send;
}

/// Fetches the versioned feed over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpStatsFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpStatsFetcher {
    pub fn new(base_url: &str) -> Result<Self, StatsError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: comp_stats_url(base_url),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StatsFetcher for HttpStatsFetcher {
    async fn fetch(&self) -> Result<StatsData, StatsError> {
        tracing::debug!(url = %self.url, "Fetching competitive stats");
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }
        let body = response.bytes().await?;
        let data: StatsData = serde_json::from_slice(&body)?;
        tracing::info!(brackets = data.len(), bytes = body.len(), "Competitive stats fetched");
        Ok(data)
    }
}

struct CachedFeed {
    data: Arc<StatsData>,
    fetched_at: Instant,
}

/// Keeps the last fetched feed for `ttl`.
///
/// The whole document is one cache entry since it holds every bracket.
/// Concurrent callers queue on the cache lock, so overlapping requests
/// during a fetch reuse its result instead of fetching again. Failures are
/// not cached.
pub struct StatsClient<F> {
    fetcher: F,
    ttl: Duration,
    cache: Mutex<Option<CachedFeed>>,
}

impl StatsClient<HttpStatsFetcher> {
    pub fn from_settings(settings: &StatsSettings) -> Result<Self, StatsError> {
        Ok(Self::new(
            HttpStatsFetcher::new(&settings.base_url)?,
            Duration::from_secs(settings.cache_ttl_secs),
        ))
    }
}

impl<F: StatsFetcher> StatsClient<F> {
    pub fn new(fetcher: F, ttl: Duration) -> Self {
        Self {
            fetcher,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn get(&self) -> Result<Arc<StatsData>, StatsError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref()
            && cached.fetched_at.elapsed() < self.ttl
        {
            return Ok(Arc::clone(&cached.data));
        }

        let data = Arc::new(self.fetcher.fetch().await?);
        *cache = Some(CachedFeed {
            data: Arc::clone(&data),
            fetched_at: Instant::now(),
        });
        Ok(data)
    }

    /// Drop the cached feed so the next [`get`](Self::get) refetches.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
        tracing::debug!("Competitive stats cache cleared");
    }
}
