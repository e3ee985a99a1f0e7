//! State scoped to one displayed combat report.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, Utc};

use crate::combat::{CombatRecord, CombatUnit};

type NavigateFn = Arc<dyn Fn(&str) + Send + Sync>;

/// What every view under a report can see: the combat itself, whether
/// names are hidden, and a way to jump to a player's page.
///
/// The combat is not validated here. Views check [`combat`](Self::combat)
/// and render nothing when it is absent.
#[derive(Clone)]
pub struct CombatReportContext {
    combat: Option<Arc<CombatRecord>>,
    is_anonymized: bool,
    navigate: NavigateFn,
}

impl CombatReportContext {
    pub fn new<F>(combat: Option<Arc<CombatRecord>>, is_anonymized: bool, navigate: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self {
            combat,
            is_anonymized,
            navigate: Arc::new(navigate),
        }
    }

    /// Context with no combat loaded. Navigation does nothing.
    pub fn empty() -> Self {
        Self::new(None, false, |_| {})
    }

    pub fn combat(&self) -> Option<&CombatRecord> {
        self.combat.as_deref()
    }

    pub fn is_anonymized(&self) -> bool {
        self.is_anonymized
    }

    /// Ask the owning report to open the players tab on `unit_id`.
    pub fn navigate_to_player_view(&self, unit_id: &str) {
        (self.navigate)(unit_id);
    }

    /// Name to show for `unit`; anonymized reports show the spec instead.
    pub fn unit_display_name(&self, unit: &CombatUnit) -> String {
        if !self.is_anonymized {
            return unit.name.clone();
        }
        unit.spec_name()
            .unwrap_or_else(|| unit.class.label())
            .to_string()
    }
}

impl std::fmt::Debug for CombatReportContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatReportContext")
            .field("combat", &self.combat.as_ref().map(|c| c.id.as_str()))
            .field("is_anonymized", &self.is_anonymized)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Report Screen
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReportTab {
    #[default]
    Summary,
    Players,
    Death,
    Curves,
    Replay,
}

impl ReportTab {
    pub const ALL: [ReportTab; 5] = [
        Self::Summary,
        Self::Players,
        Self::Death,
        Self::Curves,
        Self::Replay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Players => "Players",
            Self::Death => "Death",
            Self::Curves => "Curves",
            Self::Replay => "Replay",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
    }
}

/// Ephemeral per-screen state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportViewState {
    pub active_tab: ReportTab,
    pub active_player_id: Option<String>,
}

/// Title line data for a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportHeader {
    pub start_time: Option<DateTime<Utc>>,
    pub bracket: String,
    /// Round number, solo shuffle only
    pub sequence: Option<u32>,
    /// Team 0 MMR, full arena matches only
    pub mmr: Option<i64>,
}

impl ReportHeader {
    pub fn start_time_label(&self) -> String {
        self.start_time
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Unknown time".to_string())
    }
}

/// A displayed report: owns the view state and the context handed to children.
pub struct CombatReport {
    combat: Arc<CombatRecord>,
    state: Arc<Mutex<ReportViewState>>,
    context: CombatReportContext,
}

impl CombatReport {
    pub fn new(combat: Arc<CombatRecord>, anonymized: bool) -> Self {
        let state = Arc::new(Mutex::new(ReportViewState::default()));
        let nav_state = Arc::clone(&state);
        let context = CombatReportContext::new(Some(Arc::clone(&combat)), anonymized, move |unit_id| {
            let mut s = nav_state.lock().unwrap_or_else(PoisonError::into_inner);
            s.active_tab = ReportTab::Players;
            s.active_player_id = Some(unit_id.to_string());
        });
        Self {
            combat,
            state,
            context,
        }
    }

    pub fn context(&self) -> &CombatReportContext {
        &self.context
    }

    pub fn combat(&self) -> &CombatRecord {
        &self.combat
    }

    pub fn view_state(&self) -> ReportViewState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_active_tab(&self, tab: ReportTab) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active_tab = tab;
    }

    pub fn header(&self) -> ReportHeader {
        ReportHeader {
            start_time: DateTime::from_timestamp_millis(self.combat.start_time),
            bracket: self.combat.start_info.bracket.clone(),
            sequence: self.combat.sequence_number(),
            mmr: self.combat.mmr(),
        }
    }
}
