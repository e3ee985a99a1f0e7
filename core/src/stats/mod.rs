//! Competitive spec and comp win rates from the public stats feed.

mod client;
mod rank;

pub use client::{HttpStatsFetcher, StatsClient, StatsError, StatsFetcher};
pub use rank::{
    CompStatsRow, CompStatsTable, EXCLUDED_SPEC_KEYS, MIN_SIGNIFICANT_MATCHES, SortKey, rank_bracket,
};

/// What the stats screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum CompStatsView {
    Loading,
    Error(String),
    Ready(CompStatsTable),
}

/// Fetch (or reuse) the feed and rank `bracket` by `sort_key`.
///
/// A bracket missing from the feed renders as an empty table.
pub async fn load_comp_stats<F: StatsFetcher>(
    client: &StatsClient<F>,
    bracket: &str,
    sort_key: SortKey,
) -> CompStatsView {
    match client.get().await {
        Ok(data) => {
            let table = match data.get(bracket) {
                Some(stats) => rank_bracket(bracket, stats, sort_key),
                None => {
                    tracing::debug!(bracket, "Bracket missing from stats feed");
                    CompStatsTable::empty(bracket, sort_key)
                }
            };
            CompStatsView::Ready(table)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load competitive stats");
            CompStatsView::Error(e.to_string())
        }
    }
}
