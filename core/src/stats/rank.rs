use std::cmp::Ordering;

use walogs_types::BracketStats;
use walogs_types::formatting::format_win_rate;

/// Rows with fewer recorded matches are hidden from the table.
pub const MIN_SIGNIFICANT_MATCHES: u64 = 10;

/// Placeholder keys the feed uses for unknown specs.
pub const EXCLUDED_SPEC_KEYS: [&str; 2] = ["0", "(not set)"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Total,
    WinRate,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::WinRate => "winRate",
        }
    }

    /// Unknown keys fall back to [`SortKey::Total`].
    pub fn parse(s: &str) -> Self {
        match s {
            "winRate" | "win-rate" | "winrate" => Self::WinRate,
            _ => Self::Total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompStatsRow {
    /// Spec id, or `_`-joined spec ids for a comp
    pub spec_key: String,
    pub win: u64,
    pub lose: u64,
    pub total: u64,
    /// In `[0, 1]`; 0 when there are no matches
    pub win_rate: f64,
}

impl CompStatsRow {
    pub fn specs(&self) -> Vec<&str> {
        self.spec_key.split('_').collect()
    }

    /// Bar fill relative to the most played row, floored to whole percent.
    pub fn progress_pct(&self, max_total: u64) -> u64 {
        if max_total == 0 {
            return 0;
        }
        (u128::from(self.total) * 100 / u128::from(max_total)) as u64
    }

    pub fn win_rate_label(&self, european: bool) -> String {
        format_win_rate(self.win, self.total, european)
    }

    fn sort_value(&self, key: SortKey) -> f64 {
        match key {
            SortKey::Total => self.total as f64,
            SortKey::WinRate => self.win_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompStatsTable {
    pub bracket: String,
    pub sort_key: SortKey,
    /// Significant rows, best first
    pub rows: Vec<CompStatsRow>,
    /// Largest total over every row, hidden ones included
    pub max_total: u64,
    /// Rows dropped for having fewer than [`MIN_SIGNIFICANT_MATCHES`]
    pub hidden_count: usize,
}

impl CompStatsTable {
    pub fn empty(bracket: &str, sort_key: SortKey) -> Self {
        Self {
            bracket: bracket.to_string(),
            sort_key,
            rows: Vec::new(),
            max_total: 0,
            hidden_count: 0,
        }
    }
}

/// Rank the specs (or comps) of one bracket.
pub fn rank_bracket(bracket: &str, stats: &BracketStats, sort_key: SortKey) -> CompStatsTable {
    let mut rows: Vec<CompStatsRow> = stats
        .iter()
        .filter(|(key, _)| !EXCLUDED_SPEC_KEYS.contains(&key.as_str()))
        .map(|(key, counts)| {
            let win = counts.win.unwrap_or(0);
            let lose = counts.lose.unwrap_or(0);
            let total = win.saturating_add(lose);
            let win_rate = if total > 0 { win as f64 / total as f64 } else { 0.0 };
            CompStatsRow {
                spec_key: key.clone(),
                win,
                lose,
                total,
                win_rate,
            }
        })
        .collect();

    // Map order is arbitrary; fix it before the stable sort so ties are reproducible
    rows.sort_by(|a, b| a.spec_key.cmp(&b.spec_key));
    rows.sort_by(|a, b| descending(a.sort_value(sort_key), b.sort_value(sort_key)));

    let max_total = rows.iter().map(|r| r.total).max().unwrap_or(0);
    let before = rows.len();
    rows.retain(|r| r.total >= MIN_SIGNIFICANT_MATCHES);

    CompStatsTable {
        bracket: bracket.to_string(),
        sort_key,
        hidden_count: before - rows.len(),
        rows,
        max_total,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
