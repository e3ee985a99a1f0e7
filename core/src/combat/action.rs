use serde::{Deserialize, Serialize};

/// A damage or healing event landing on a unit.
///
/// `effective_amount` is signed: damage is negative, healing positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatHpUpdateAction {
    /// Id of the originating log line
    #[serde(default)]
    pub id: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub src_unit_id: String,
    pub dest_unit_id: String,
    #[serde(default)]
    pub amount: f64,
    pub effective_amount: f64,
    #[serde(default)]
    pub spell_id: Option<String>,
    #[serde(default)]
    pub spell_name: Option<String>,
}

/// Advanced-logging snapshot of the acting unit's health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatAdvancedAction {
    pub timestamp: i64,
    pub advanced_actor_current_hp: f64,
    pub advanced_actor_max_hp: f64,
}

/// A spell that names a second spell, e.g. a dispel naming the removed aura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatExtraSpellAction {
    #[serde(default)]
    pub id: String,
    pub timestamp: i64,
    pub src_unit_id: String,
    #[serde(default)]
    pub src_unit_name: String,
    pub dest_unit_id: String,
    #[serde(default)]
    pub dest_unit_name: String,
    #[serde(default)]
    pub spell_id: Option<String>,
    #[serde(default)]
    pub spell_name: Option<String>,
    #[serde(default)]
    pub extra_spell_id: Option<String>,
    #[serde(default)]
    pub extra_spell_name: Option<String>,
}

impl CombatHpUpdateAction {
    pub fn abs_effective(&self) -> f64 {
        self.effective_amount.abs()
    }

    pub fn in_window(&self, start: i64, end: i64) -> bool {
        self.timestamp >= start && self.timestamp <= end
    }
}
