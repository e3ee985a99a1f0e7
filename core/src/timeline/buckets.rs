use std::collections::BTreeMap;

use crate::combat::CombatHpUpdateAction;

pub const MS_PER_BUCKET: i64 = 1000;

/// Widest bar, in percent of the column, for the busiest second.
pub const BAR_WIDTH_SCALE_PCT: f64 = 90.0;

/// Bucket index of `timestamp`: whole seconds before `end`.
#[inline]
pub fn second_mark(end: i64, timestamp: i64) -> i64 {
    (end - timestamp).div_euclid(MS_PER_BUCKET)
}

/// Group the items with `start <= ts <= end` by [`second_mark`].
///
/// Items keep their input order inside a bucket.
pub fn group_by_second_mark<T, F>(items: &[T], timestamp: F, start: i64, end: i64) -> BTreeMap<i64, Vec<&T>>
where
    F: Fn(&T) -> i64,
{
    let mut groups: BTreeMap<i64, Vec<&T>> = BTreeMap::new();
    for item in items {
        let ts = timestamp(item);
        if ts < start || ts > end {
            continue;
        }
        groups.entry(second_mark(end, ts)).or_default().push(item);
    }
    groups
}

/// Actions landing in the same second.
#[derive(Debug, Clone)]
pub struct ActionBucket<'a> {
    pub second_mark: i64,
    pub actions: Vec<&'a CombatHpUpdateAction>,
}

impl ActionBucket<'_> {
    /// Net effect of the second (healing minus damage).
    pub fn signed_sum(&self) -> f64 {
        self.actions.iter().map(|a| a.effective_amount).sum()
    }

    /// Total magnitude, used for the bar width.
    pub fn abs_sum(&self) -> f64 {
        self.actions.iter().map(|a| a.abs_effective()).sum()
    }
}

/// One action stream bucketed over a window.
#[derive(Debug, Clone, Default)]
pub struct ActionBuckets<'a> {
    buckets: Vec<ActionBucket<'a>>,
}

impl<'a> ActionBuckets<'a> {
    /// Buckets ordered by second mark (latest second first).
    pub fn iter(&self) -> impl Iterator<Item = &ActionBucket<'a>> {
        self.buckets.iter()
    }

    pub fn get(&self, second_mark: i64) -> Option<&ActionBucket<'a>> {
        self.buckets
            .binary_search_by_key(&second_mark, |b| b.second_mark)
            .ok()
            .map(|i| &self.buckets[i])
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Largest per-bucket absolute sum, `None` without buckets.
    pub fn max_abs_sum(&self) -> Option<f64> {
        self.buckets
            .iter()
            .map(ActionBucket::abs_sum)
            .max_by(f64::total_cmp)
    }
}

pub fn bucket_by_second(actions: &[CombatHpUpdateAction], start: i64, end: i64) -> ActionBuckets<'_> {
    let buckets = group_by_second_mark(actions, |a| a.timestamp, start, end)
        .into_iter()
        .map(|(second_mark, actions)| ActionBucket { second_mark, actions })
        .collect();
    ActionBuckets { buckets }
}

/// Scale shared by the damage and healing columns of one unit.
///
/// Each series contributes its busiest second; an empty or all-zero series
/// counts as 1 so the scale is never zero.
pub fn global_max(damage: &ActionBuckets<'_>, heal: &ActionBuckets<'_>) -> f64 {
    let floor = |m: Option<f64>| m.filter(|v| *v > 0.0).unwrap_or(1.0);
    floor(damage.max_abs_sum()).max(floor(heal.max_abs_sum()))
}

/// Bar width in percent of the column for a bucket.
pub fn bar_width_pct(abs_sum: f64, global_max: f64) -> f64 {
    let scale = if global_max > 0.0 { global_max } else { 1.0 };
    abs_sum / scale * BAR_WIDTH_SCALE_PCT
}

/// Share of a bucket's bar taken by one action, in percent.
pub fn segment_width_pct(action_abs: f64, bucket_abs: f64) -> f64 {
    if bucket_abs > 0.0 {
        action_abs * 100.0 / bucket_abs
    } else {
        0.0
    }
}
