//! Per-unit damage/healing timeline.
//!
//! Actions are grouped into one-second buckets counting back from the end of
//! the window, then scaled into bar widths for rendering.

mod buckets;
mod hp_update;
mod view;

pub use buckets::{
    ActionBucket, ActionBuckets, BAR_WIDTH_SCALE_PCT, MS_PER_BUCKET, bar_width_pct,
    bucket_by_second, global_max, group_by_second_mark, second_mark, segment_width_pct,
};
pub use hp_update::{HpUpdateSegment, ICON_MIN_ABSOLUTE_WIDTH_PCT, spell_icon_url};
pub use view::{
    ColumnAlign, CombatUnitTimelineView, HpCell, HpColumn, HpUpdateColumn,
    SIGNIFICANT_DAMAGE_HEAL_THRESHOLD, TIMELINE_HEIGHT_PER_SECOND, TimeMark, TimelineRow, time_marks,
};
