use serde::{Deserialize, Serialize};

use super::action::{CombatAdvancedAction, CombatHpUpdateAction};
use super::specs::{UNKNOWN_SPEC_ID, spec_info};

/// A participant of the combat with its incoming action streams.
///
/// Each stream is ordered by timestamp as produced by the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatUnit {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: CombatUnitClass,
    #[serde(default = "unknown_spec")]
    pub spec: String,
    #[serde(default)]
    pub damage_in: Vec<CombatHpUpdateAction>,
    #[serde(default)]
    pub heal_in: Vec<CombatHpUpdateAction>,
    #[serde(default)]
    pub advanced_actions: Vec<CombatAdvancedAction>,
}

fn unknown_spec() -> String {
    UNKNOWN_SPEC_ID.to_string()
}

impl CombatUnit {
    /// Largest max-hp seen in the advanced snapshots, if any.
    pub fn max_advanced_hp(&self) -> Option<f64> {
        self.advanced_actions
            .iter()
            .map(|a| a.advanced_actor_max_hp)
            .max_by(f64::total_cmp)
    }

    /// Spec display name, or `None` for unknown spec ids.
    pub fn spec_name(&self) -> Option<&'static str> {
        spec_info(&self.spec).map(|s| s.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatUnitClass {
    #[default]
    None,
    Warrior,
    Paladin,
    Hunter,
    Rogue,
    Priest,
    DeathKnight,
    Shaman,
    Mage,
    Warlock,
    Monk,
    Druid,
    DemonHunter,
    Evoker,
}

impl CombatUnitClass {
    /// Class color as `#RRGGBB`.
    pub fn color(self) -> &'static str {
        match self {
            Self::None => "#808080",
            Self::Warrior => "#C69B6D",
            Self::Paladin => "#F48CBA",
            Self::Hunter => "#AAD372",
            Self::Rogue => "#FFF468",
            Self::Priest => "#FFFFFF",
            Self::DeathKnight => "#C41E3A",
            Self::Shaman => "#0070DD",
            Self::Mage => "#3FC7EB",
            Self::Warlock => "#8788EE",
            Self::Monk => "#00FF98",
            Self::Druid => "#FF7C0A",
            Self::DemonHunter => "#A330C9",
            Self::Evoker => "#33937F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "Unknown",
            Self::Warrior => "Warrior",
            Self::Paladin => "Paladin",
            Self::Hunter => "Hunter",
            Self::Rogue => "Rogue",
            Self::Priest => "Priest",
            Self::DeathKnight => "Death Knight",
            Self::Shaman => "Shaman",
            Self::Mage => "Mage",
            Self::Warlock => "Warlock",
            Self::Monk => "Monk",
            Self::Druid => "Druid",
            Self::DemonHunter => "Demon Hunter",
            Self::Evoker => "Evoker",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::fixtures;

    #[test]
    fn max_advanced_hp_picks_largest_snapshot() {
        let mut unit = fixtures::unit("u", CombatUnitClass::Warrior, "71");
        assert_eq!(unit.max_advanced_hp(), None);
        unit.advanced_actions = vec![
            CombatAdvancedAction { timestamp: 1, advanced_actor_current_hp: 10.0, advanced_actor_max_hp: 500.0 },
            CombatAdvancedAction { timestamp: 2, advanced_actor_current_hp: 10.0, advanced_actor_max_hp: 800.0 },
        ];
        assert_eq!(unit.max_advanced_hp(), Some(800.0));
    }

    #[test]
    fn missing_spec_defaults_to_unknown() {
        let unit: CombatUnit = serde_json::from_str(r#"{"id": "Pet-1"}"#).unwrap();
        assert_eq!(unit.spec, UNKNOWN_SPEC_ID);
        assert_eq!(unit.class, CombatUnitClass::None);
        assert_eq!(unit.spec_name(), None);
    }

    #[test]
    fn class_colors_are_hex() {
        for class in [CombatUnitClass::None, CombatUnitClass::DemonHunter, CombatUnitClass::Evoker] {
            let color = class.color();
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
        }
    }
}
