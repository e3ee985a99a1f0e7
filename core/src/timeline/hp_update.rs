use crate::combat::{CombatHpUpdateAction, CombatRecord, CombatUnit, CombatUnitClass};

use super::buckets::segment_width_pct;

/// Spell icons only fit once a segment is this wide relative to the timeline.
pub const ICON_MIN_ABSOLUTE_WIDTH_PCT: f64 = 10.0;

const SPELL_ICON_BASE_URL: &str = "https://images.wowarenalogs.com/spells";

pub fn spell_icon_url(spell_id: &str) -> String {
    format!("{SPELL_ICON_BASE_URL}/{spell_id}.jpg")
}

/// One action's slice of a second's bar, colored by the other party's class.
#[derive(Debug, Clone, PartialEq)]
pub struct HpUpdateSegment {
    pub action_id: String,
    /// The unit on the other end of the action
    pub color_source_unit_id: String,
    pub color_source_class: CombatUnitClass,
    pub color: &'static str,
    /// Percent of this second's bar
    pub width_pct: f64,
    /// Percent of the widest second in the timeline
    pub absolute_width_pct: f64,
    pub spell_icon: Option<String>,
    pub tooltip: String,
}

impl HpUpdateSegment {
    pub fn new(
        action: &CombatHpUpdateAction,
        unit: &CombatUnit,
        combat: &CombatRecord,
        group_total: f64,
        timeline_max: f64,
    ) -> Self {
        let color_source_unit_id = if action.dest_unit_id == unit.id {
            &action.src_unit_id
        } else {
            &action.dest_unit_id
        };
        let color_source_class = combat
            .unit(color_source_unit_id)
            .map(|u| u.class)
            .unwrap_or(CombatUnitClass::None);

        // Widths follow the effective amount so a second's segments fill its bar
        let magnitude = action.abs_effective();
        let width_pct = segment_width_pct(magnitude, group_total);
        let absolute_width_pct = segment_width_pct(magnitude, timeline_max);

        let spell_icon = action
            .spell_id
            .as_deref()
            .filter(|_| absolute_width_pct >= ICON_MIN_ABSOLUTE_WIDTH_PCT)
            .map(spell_icon_url);

        let tooltip = format!(
            "{}: {}",
            action.spell_name.as_deref().unwrap_or("Auto Attack"),
            walogs_types::formatting::format_abs_amount(action.amount),
        );

        Self {
            action_id: action.id.clone(),
            color_source_unit_id: color_source_unit_id.clone(),
            color_source_class,
            color: color_source_class.color(),
            width_pct,
            absolute_width_pct,
            spell_icon,
            tooltip,
        }
    }
}
