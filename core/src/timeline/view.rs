//! Per-unit timeline: damage taken, healing taken and health, one row per
//! second counted back from the end of the window.

use walogs_types::formatting::{format_pct_whole, format_time_mark, print_combat_number};

use crate::combat::{CombatAdvancedAction, CombatRecord, CombatUnit};
use crate::context::CombatReportContext;

use super::buckets::{
    ActionBuckets, MS_PER_BUCKET, bar_width_pct, bucket_by_second, global_max, group_by_second_mark,
};
use super::hp_update::HpUpdateSegment;

pub const TIMELINE_HEIGHT_PER_SECOND: f64 = 24.0;

/// Per-second totals below this magnitude get no text label.
pub const SIGNIFICANT_DAMAGE_HEAL_THRESHOLD: f64 = 1000.0;

const TIME_MARK_INTERVAL_MS: f64 = 5000.0;

/// HP labels are hidden when the unit is at or above this share of max hp.
const HP_LABEL_HIDE_RATIO: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeMark {
    /// Epoch milliseconds, may be fractional
    pub timestamp: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub second_mark: i64,
    pub top_px: f64,
    pub signed_sum: f64,
    pub abs_sum: f64,
    pub label: Option<String>,
    /// Net healing (or zero) rather than net damage
    pub positive: bool,
    pub width_pct: f64,
    pub segments: Vec<HpUpdateSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HpUpdateColumn {
    pub align: ColumnAlign,
    pub height_px: f64,
    pub rows: Vec<TimelineRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HpCell {
    pub second_mark: i64,
    pub top_px: f64,
    pub hp: f64,
    pub pct: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HpColumn {
    pub height_px: f64,
    pub cells: Vec<HpCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombatUnitTimelineView {
    pub unit_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub time_marks: Vec<TimeMark>,
    pub damage: HpUpdateColumn,
    /// Present only for combats recorded with advanced logging
    pub hp: Option<HpColumn>,
    pub heal: HpUpdateColumn,
    /// Shared horizontal scale of both action columns
    pub global_max: f64,
}

impl CombatUnitTimelineView {
    /// Build the timeline of `unit` over `[start, end]`.
    ///
    /// Returns `None` when the context has no combat loaded.
    pub fn build(
        ctx: &CombatReportContext,
        unit: &CombatUnit,
        start: i64,
        end: i64,
        european: bool,
    ) -> Option<Self> {
        let combat = ctx.combat()?;

        let damage = bucket_by_second(&unit.damage_in, start, end);
        let heal = bucket_by_second(&unit.heal_in, start, end);
        let max = global_max(&damage, &heal);
        let height_px = column_height_px(start, end);

        let hp = combat
            .has_advanced_logging
            .then(|| hp_column(unit, start, end, height_px));

        tracing::debug!(
            unit = %unit.id,
            damage_rows = damage.len(),
            heal_rows = heal.len(),
            global_max = max,
            "Built unit timeline"
        );

        Some(Self {
            unit_id: unit.id.clone(),
            start_time: start,
            end_time: end,
            time_marks: time_marks(start, end),
            damage: action_column(&damage, ColumnAlign::Right, unit, combat, max, height_px, european),
            hp,
            heal: action_column(&heal, ColumnAlign::Left, unit, combat, max, height_px, european),
            global_max: max,
        })
    }
}

fn column_height_px(start: i64, end: i64) -> f64 {
    (end - start) as f64 / MS_PER_BUCKET as f64 * TIMELINE_HEIGHT_PER_SECOND
}

fn top_px(second_mark: i64) -> f64 {
    second_mark as f64 * TIMELINE_HEIGHT_PER_SECOND
}

/// Marks every ~5 seconds from `end` down to `start`.
///
/// Windows shorter than half an interval get the single mark at `end`.
pub fn time_marks(start: i64, end: i64) -> Vec<TimeMark> {
    let duration = (end - start) as f64;
    let count = (duration / TIME_MARK_INTERVAL_MS).round() as i64;
    let mark = |timestamp: f64| TimeMark {
        timestamp,
        label: format_time_mark(((end as f64 - timestamp) / 1000.0).round() as i64),
    };
    if count <= 0 {
        return vec![mark(end as f64)];
    }

    let step = duration / count as f64;
    (0..=count)
        .map(|i| end as f64 - i as f64 * step)
        .map(mark)
        .collect()
}

fn action_column(
    buckets: &ActionBuckets<'_>,
    align: ColumnAlign,
    unit: &CombatUnit,
    combat: &CombatRecord,
    timeline_max: f64,
    height_px: f64,
    european: bool,
) -> HpUpdateColumn {
    let rows = buckets
        .iter()
        .map(|bucket| {
            let signed_sum = bucket.signed_sum();
            let abs_sum = bucket.abs_sum();
            let label = (signed_sum.abs() >= SIGNIFICANT_DAMAGE_HEAL_THRESHOLD)
                .then(|| print_combat_number(signed_sum.abs(), european));
            let segments = bucket
                .actions
                .iter()
                .map(|action| HpUpdateSegment::new(action, unit, combat, abs_sum, timeline_max))
                .collect();
            TimelineRow {
                second_mark: bucket.second_mark,
                top_px: top_px(bucket.second_mark),
                signed_sum,
                abs_sum,
                label,
                positive: signed_sum >= 0.0,
                width_pct: bar_width_pct(abs_sum, timeline_max),
                segments,
            }
        })
        .collect();

    HpUpdateColumn { align, height_px, rows }
}

fn hp_column(unit: &CombatUnit, start: i64, end: i64, height_px: f64) -> HpColumn {
    let max = match unit.max_advanced_hp() {
        Some(m) if m > 0.0 => m,
        _ => 1.0,
    };

    let cells = group_by_second_mark(&unit.advanced_actions, |a| a.timestamp, start, end)
        .into_iter()
        .map(|(second_mark, snapshots)| {
            let hp = latest(&snapshots).map_or(0.0, |a| a.advanced_actor_current_hp);
            let ratio = hp / max;
            HpCell {
                second_mark,
                top_px: top_px(second_mark),
                hp,
                pct: ratio * 100.0,
                label: (ratio < HP_LABEL_HIDE_RATIO).then(|| format_pct_whole(hp * 100.0 / max)),
            }
        })
        .collect();

    HpColumn { height_px, cells }
}

/// Latest snapshot; the first one wins on equal timestamps.
fn latest<'a>(snapshots: &[&'a CombatAdvancedAction]) -> Option<&'a CombatAdvancedAction> {
    snapshots.iter().copied().fold(None, |best, a| match best {
        Some(b) if b.timestamp >= a.timestamp => Some(b),
        _ => Some(a),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::combat::{CombatUnitClass, fixtures};

    const START: i64 = 1_700_000_000_000;
    const END: i64 = START + 20_000;

    fn snapshot(timestamp: i64, current: f64, max: f64) -> CombatAdvancedAction {
        CombatAdvancedAction {
            timestamp,
            advanced_actor_current_hp: current,
            advanced_actor_max_hp: max,
        }
    }

    fn warrior() -> CombatUnit {
        let mut unit = fixtures::unit("warrior", CombatUnitClass::Warrior, "71");
        unit.damage_in = vec![
            fixtures::hp_action("d1", END - 100, "mage", "warrior", -40_000.0),
            fixtures::hp_action("d2", END - 300, "mage", "warrior", -10_000.0),
            fixtures::hp_action("d3", END - 5_200, "mage", "warrior", -600.0),
        ];
        unit.heal_in = vec![fixtures::hp_action("h1", END - 50, "priest", "warrior", 25_000.0)];
        unit.advanced_actions = vec![
            snapshot(END - 900, 400_000.0, 500_000.0),
            snapshot(END - 100, 250_000.0, 500_000.0),
            snapshot(END - 4_000, 499_000.0, 500_000.0),
        ];
        unit
    }

    fn context(unit: &CombatUnit, advanced: bool) -> CombatReportContext {
        let mut combat = fixtures::arena_match(vec![
            unit.clone(),
            fixtures::unit("mage", CombatUnitClass::Mage, "63"),
            fixtures::unit("priest", CombatUnitClass::Priest, "257"),
        ]);
        combat.has_advanced_logging = advanced;
        CombatReportContext::new(Some(Arc::new(combat)), false, |_| {})
    }

    #[test]
    fn no_combat_renders_nothing() {
        let unit = warrior();
        assert!(CombatUnitTimelineView::build(&CombatReportContext::empty(), &unit, START, END, false).is_none());
    }

    #[test]
    fn columns_share_one_scale() {
        let unit = warrior();
        let view = CombatUnitTimelineView::build(&context(&unit, true), &unit, START, END, false).unwrap();

        assert_eq!(view.global_max, 50_000.0);
        assert_eq!(view.damage.align, ColumnAlign::Right);
        assert_eq!(view.heal.align, ColumnAlign::Left);
        assert_eq!(view.damage.height_px, 480.0);

        let first = &view.damage.rows[0];
        assert_eq!(first.second_mark, 0);
        assert_eq!(first.top_px, 0.0);
        assert_eq!(first.width_pct, 90.0);
        assert!(!first.positive);
        assert_eq!(first.label.as_deref(), Some("50.0k"));
        assert_eq!(first.segments.len(), 2);
        assert_eq!(first.segments[0].color_source_unit_id, "mage");

        let heal = &view.heal.rows[0];
        assert!(heal.positive);
        assert_eq!(heal.width_pct, 45.0);
        assert_eq!(heal.segments[0].color_source_class, CombatUnitClass::Priest);
    }

    #[test]
    fn small_totals_get_no_label() {
        let unit = warrior();
        let view = CombatUnitTimelineView::build(&context(&unit, true), &unit, START, END, false).unwrap();
        let row = view.damage.rows.iter().find(|r| r.second_mark == 5).unwrap();
        assert_eq!(row.signed_sum, -600.0);
        assert_eq!(row.label, None);
        assert_eq!(row.top_px, 120.0);
    }

    #[test]
    fn hp_column_uses_latest_snapshot_per_second() {
        let unit = warrior();
        let view = CombatUnitTimelineView::build(&context(&unit, true), &unit, START, END, false).unwrap();
        let hp = view.hp.unwrap();

        let now = hp.cells.iter().find(|c| c.second_mark == 0).unwrap();
        assert_eq!(now.hp, 250_000.0);
        assert_eq!(now.label.as_deref(), Some("50%"));

        let topped = hp.cells.iter().find(|c| c.second_mark == 4).unwrap();
        assert_eq!(topped.label, None);
    }

    #[test]
    fn hp_column_requires_advanced_logging() {
        let unit = warrior();
        let view = CombatUnitTimelineView::build(&context(&unit, false), &unit, START, END, false).unwrap();
        assert!(view.hp.is_none());
    }

    #[test]
    fn equal_timestamps_keep_first_snapshot() {
        let a = snapshot(10, 1.0, 2.0);
        let b = snapshot(10, 2.0, 2.0);
        assert_eq!(latest(&[&a, &b]), Some(&a));
        assert_eq!(latest(&[]), None);
    }

    #[test]
    fn time_marks_every_five_seconds() {
        let marks = time_marks(START, END);
        let labels: Vec<&str> = marks.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["t-0s", "t-5s", "t-10s", "t-15s", "t-20s"]);
        assert_eq!(marks.last().unwrap().timestamp, START as f64);

        let short = time_marks(START, START + 2_000);
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].label, "t-0s");
    }

    #[test]
    fn empty_unit_has_empty_columns() {
        let unit = fixtures::unit("idle", CombatUnitClass::Hunter, "253");
        let view = CombatUnitTimelineView::build(&context(&unit, true), &unit, START, END, false).unwrap();
        assert!(view.damage.rows.is_empty());
        assert!(view.heal.rows.is_empty());
        assert!(view.hp.unwrap().cells.is_empty());
        assert_eq!(view.global_max, 1.0);
    }
}
