//! Parsed combat records as handed over by the log parser.
//!
//! Nothing in this crate mutates a record after it is loaded; views share it
//! behind an `Arc`.

mod action;
mod specs;
mod unit;

pub use action::{CombatAdvancedAction, CombatExtraSpellAction, CombatHpUpdateAction};
pub use specs::{SpecInfo, UNKNOWN_SPEC_ID, spec_info};
pub use unit::{CombatUnit, CombatUnitClass};

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One arena match or one solo shuffle round.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatRecord {
    pub id: String,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
    #[serde(default)]
    pub units: HashMap<String, CombatUnit>,
    #[serde(default)]
    pub has_advanced_logging: bool,
    #[serde(default)]
    pub start_info: ArenaStartInfo,
    #[serde(default)]
    pub result: CombatResult,
    /// Dispels cast during the combat, ordered by timestamp
    #[serde(default)]
    pub dispels: Vec<CombatExtraSpellAction>,
    #[serde(flatten)]
    pub kind: CombatKind,
}

/// Variant-specific data, discriminated by `dataType` in the parser output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all_fields = "camelCase")]
pub enum CombatKind {
    ArenaMatch {
        #[serde(default)]
        end_info: ArenaEndInfo,
    },
    ShuffleRound {
        sequence_number: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArenaStartInfo {
    pub zone_id: String,
    pub bracket: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaEndInfo {
    #[serde(rename = "team0MMR")]
    pub team0_mmr: i64,
    #[serde(rename = "team1MMR")]
    pub team1_mmr: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatResult {
    #[default]
    Unknown,
    Draw,
    Lose,
    Win,
}

#[derive(Debug, Error)]
pub enum CombatLoadError {
    #[error("failed to read combat file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid combat data: {0}")]
    Json(#[from] serde_json::Error),
}

impl CombatRecord {
    pub fn from_json_str(json: &str) -> Result<Self, CombatLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a record previously exported by the parser as JSON.
    pub fn load_json(path: &Path) -> Result<Self, CombatLoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CombatLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn unit(&self, unit_id: &str) -> Option<&CombatUnit> {
        self.units.get(unit_id)
    }

    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).max(0)
    }

    /// Units ordered by id so listings are stable between runs.
    pub fn units_sorted(&self) -> Vec<&CombatUnit> {
        let mut units: Vec<&CombatUnit> = self.units.values().collect();
        units.sort_by(|a, b| a.id.cmp(&b.id));
        units
    }

    /// Dispels with `start <= ts <= end`.
    pub fn dispels_between(&self, start: i64, end: i64) -> impl Iterator<Item = &CombatExtraSpellAction> {
        self.dispels
            .iter()
            .filter(move |d| d.timestamp >= start && d.timestamp <= end)
    }

    pub fn sequence_number(&self) -> Option<u32> {
        match self.kind {
            CombatKind::ShuffleRound { sequence_number } => Some(sequence_number),
            CombatKind::ArenaMatch { .. } => None,
        }
    }

    /// Team 0 MMR, only reported for full arena matches.
    pub fn mmr(&self) -> Option<i64> {
        match &self.kind {
            CombatKind::ArenaMatch { end_info } => Some(end_info.team0_mmr),
            CombatKind::ShuffleRound { .. } => None,
        }
    }
}
