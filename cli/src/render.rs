//! Plain-text rendering of the view models.

use std::fmt::Write;

use walogs_core::bridge::InstallationRegistry;
use walogs_core::combat::{CombatRecord, spec_info};
use walogs_core::context::{ReportHeader, ReportTab};
use walogs_core::replay::ReplayDispelEvent;
use walogs_core::stats::{CompStatsTable, MIN_SIGNIFICANT_MATCHES};
use walogs_core::timeline::{CombatUnitTimelineView, HpUpdateColumn, TimelineRow};
use walogs_types::formatting::{format_duration, format_time_mark};

/// Character cells available to a full-width bar.
const BAR_COLUMNS: f64 = 30.0;

fn bar(width_pct: f64, fill: char) -> String {
    let cells = (width_pct / 100.0 * BAR_COLUMNS).round().max(1.0) as usize;
    std::iter::repeat_n(fill, cells).collect()
}

fn row_at(column: &HpUpdateColumn, second_mark: i64) -> Option<&TimelineRow> {
    column.rows.iter().find(|r| r.second_mark == second_mark)
}

pub fn render_timeline(view: &CombatUnitTimelineView, unit_name: &str) -> String {
    let mut out = String::new();
    let seconds = ((view.end_time - view.start_time) / 1000).max(0);
    let _ = writeln!(out, "{unit_name}  ({} window)", format_duration(seconds));

    let marks: Vec<String> = view.time_marks.iter().map(|m| m.label.clone()).collect();
    let _ = writeln!(out, "marks: {}", marks.join(" "));

    let hp_header = if view.hp.is_some() { " HP  |" } else { "" };
    let _ = writeln!(
        out,
        "{:>6} | {:>w$} |{hp_header} {}",
        "sec",
        "Damage Taken",
        "Healing Taken",
        w = BAR_COLUMNS as usize + 8
    );

    for second in 0..=seconds {
        let damage = row_at(&view.damage, second);
        let heal = row_at(&view.heal, second);
        let hp = view
            .hp
            .as_ref()
            .and_then(|c| c.cells.iter().find(|cell| cell.second_mark == second));
        if damage.is_none() && heal.is_none() && hp.is_none() {
            continue;
        }

        let damage_text = damage
            .map(|r| format!("{} {}", r.label.as_deref().unwrap_or(""), bar(r.width_pct, '<')))
            .unwrap_or_default();
        let heal_text = heal
            .map(|r| format!("{} {}", bar(r.width_pct, '>'), r.label.as_deref().unwrap_or("")))
            .unwrap_or_default();
        let hp_text = match (&view.hp, hp) {
            (Some(_), Some(cell)) => format!(" {:>4}|", cell.label.as_deref().unwrap_or("")),
            (Some(_), None) => "     |".to_string(),
            _ => String::new(),
        };

        let _ = writeln!(
            out,
            "{:>6} | {:>w$} |{hp_text} {}",
            format_time_mark(second),
            damage_text.trim_start(),
            heal_text.trim_end(),
            w = BAR_COLUMNS as usize + 8
        );
    }
    out
}

pub fn render_report_header(header: &ReportHeader, combat: &CombatRecord, tab: ReportTab) -> String {
    let mut out = String::new();
    let _ = write!(out, "{}  {}", header.start_time_label(), header.bracket);
    if let Some(round) = header.sequence {
        let _ = write!(out, "  round {round}");
    }
    if let Some(mmr) = header.mmr {
        let _ = write!(out, "  MMR {mmr}");
    }
    let _ = writeln!(out, "  {:?}", combat.result);
    let _ = writeln!(out, "duration {}", format_duration(combat.duration_ms() / 1000));

    let tabs: Vec<String> = ReportTab::ALL
        .iter()
        .map(|t| {
            if *t == tab {
                format!("[{}]", t.label())
            } else {
                t.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));
    out
}

pub fn render_dispels(events: &[ReplayDispelEvent], start_time: i64) -> String {
    if events.is_empty() {
        return "No dispels\n".to_string();
    }
    let mut out = String::new();
    for event in events {
        let secs = (event.timestamp - start_time).max(0) / 1000;
        let _ = writeln!(out, "{:>6}  {}", format_duration(secs), event.describe());
    }
    out
}

pub fn render_stats(table: &CompStatsTable, european: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (sorted by {})", table.bracket, table.sort_key.as_str());
    if table.rows.is_empty() {
        let _ = writeln!(out, "No data");
    }
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:>8} {:<30} {:>7}  {}",
            row.total,
            bar(row.progress_pct(table.max_total) as f64, '='),
            row.win_rate_label(european),
            comp_label(&row.specs())
        );
    }
    let _ = writeln!(
        out,
        "Specs and comps with less than {MIN_SIGNIFICANT_MATCHES} recorded matches are hidden ({}).",
        table.hidden_count
    );
    out
}

/// Spec names of a comp, unknown ids shown as-is.
fn comp_label(specs: &[&str]) -> String {
    specs
        .iter()
        .map(|id| spec_info(id).map_or(*id, |s| s.name))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn render_installations(found: &InstallationRegistry) -> String {
    if found.is_empty() {
        return "No installations found\n".to_string();
    }
    let mut out = String::new();
    for (kind, path) in found {
        let _ = writeln!(out, "{:<12} {}", kind.label(), path.display());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use walogs_core::bridge::InstallationKind;
    use walogs_core::stats::{CompStatsRow, SortKey};

    #[test]
    fn bars_scale_to_columns_and_never_vanish() {
        assert_eq!(bar(100.0, '#').len(), 30);
        assert_eq!(bar(50.0, '#').len(), 15);
        assert_eq!(bar(0.0, '#').len(), 1);
    }

    #[test]
    fn stats_table_lists_rows_and_footer() {
        let table = CompStatsTable {
            bracket: "3v3".to_string(),
            sort_key: SortKey::Total,
            rows: vec![CompStatsRow {
                spec_key: "62_105".to_string(),
                win: 12,
                lose: 8,
                total: 20,
                win_rate: 0.6,
            }],
            max_total: 20,
            hidden_count: 2,
        };
        let text = render_stats(&table, false);
        assert!(text.starts_with("3v3 (sorted by total)"));
        assert!(text.contains("Arcane Mage / Restoration Druid"));
        assert!(text.contains("60.0%"));
        assert!(text.contains("hidden (2)"));
    }

    #[test]
    fn comp_label_falls_back_to_raw_id() {
        assert_eq!(comp_label(&["64"]), "Frost Mage");
        assert_eq!(comp_label(&["256", "9999"]), "Discipline Priest / 9999");
    }

    #[test]
    fn installations_list_one_per_line() {
        let mut found = InstallationRegistry::new();
        found.insert(InstallationKind::Retail, PathBuf::from("/wow/_retail_"));
        found.insert(InstallationKind::Ptr, PathBuf::from("/wow/_ptr_"));
        let text = render_installations(&found);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().starts_with("retail"));
        assert_eq!(render_installations(&InstallationRegistry::new()), "No installations found\n");
    }

    #[test]
    fn empty_dispels_say_so() {
        assert_eq!(render_dispels(&[], 0), "No dispels\n");
    }
}
