use std::path::Path;
use std::sync::Arc;

use walogs_core::bridge::{FolderPrompts, Platform, detect_install_root};
use walogs_core::combat::CombatRecord;
use walogs_core::context::{CombatReport, ReportTab};
use walogs_core::replay::ReplayDispelEvent;
use walogs_core::stats::{CompStatsView, SortKey, load_comp_stats};
use walogs_core::timeline::CombatUnitTimelineView;
use walogs_types::WindowGeometry;

use crate::Shell;
use crate::render;

fn load_report(path: &str, anonymize: bool) -> Result<CombatReport, String> {
    let combat = CombatRecord::load_json(Path::new(path)).map_err(|e| e.to_string())?;
    tracing::info!(id = %combat.id, units = combat.units.len(), "Combat loaded");
    Ok(CombatReport::new(Arc::new(combat), anonymize))
}

/// Window in epoch ms from optional offsets (seconds) into the combat,
/// clamped to the combat itself.
fn window(combat: &CombatRecord, from_secs: Option<i64>, to_secs: Option<i64>) -> Result<(i64, i64), String> {
    let offset = |secs: i64| {
        secs.checked_mul(1000)
            .and_then(|ms| combat.start_time.checked_add(ms))
            .ok_or_else(|| format!("Offset out of range: {secs}s"))
    };
    let start = match from_secs {
        Some(s) => offset(s)?.max(combat.start_time),
        None => combat.start_time,
    };
    let end = match to_secs {
        Some(s) => offset(s)?.min(combat.end_time),
        None => combat.end_time,
    };
    Ok((start, end))
}

pub fn timeline(
    shell: &Shell,
    path: &str,
    unit_id: Option<&str>,
    from_secs: Option<i64>,
    to_secs: Option<i64>,
    anonymize: bool,
) -> Result<(), String> {
    let report = load_report(path, anonymize)?;
    let combat = report.combat();
    let ctx = report.context();

    let Some(unit) = unit_id.and_then(|id| combat.unit(id)) else {
        println!("Pick a unit with --unit:");
        for unit in combat.units_sorted() {
            println!("  {:<40} {}", unit.id, ctx.unit_display_name(unit));
        }
        return Ok(());
    };

    let (start, end) = window(combat, from_secs, to_secs)?;
    let european = shell.client.app_config().european_number_format;
    let view = CombatUnitTimelineView::build(ctx, unit, start, end, european)
        .ok_or("No combat loaded")?;
    print!("{}", render::render_timeline(&view, &ctx.unit_display_name(unit)));
    Ok(())
}

pub fn report(path: &str, tab: Option<&str>, player: Option<&str>, anonymize: bool) -> Result<(), String> {
    let report = load_report(path, anonymize)?;
    if let Some(tab) = tab {
        let tab = ReportTab::parse(tab).ok_or_else(|| format!("Unknown tab: {tab}"))?;
        report.set_active_tab(tab);
    }
    if let Some(player) = player {
        report.context().navigate_to_player_view(player);
    }

    let state = report.view_state();
    print!(
        "{}",
        render::render_report_header(&report.header(), report.combat(), state.active_tab)
    );

    let ctx = report.context();
    for unit in report.combat().units_sorted() {
        let marker = if state.active_player_id.as_deref() == Some(unit.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {:<28} {:<14} {}",
            ctx.unit_display_name(unit),
            unit.class.label(),
            unit.id
        );
    }
    Ok(())
}

pub fn dispels(path: &str, expanded: bool, anonymize: bool) -> Result<(), String> {
    let report = load_report(path, anonymize)?;
    let combat = report.combat();
    let events: Vec<ReplayDispelEvent> = combat
        .dispels_between(combat.start_time, combat.end_time)
        .map(|d| ReplayDispelEvent::new(d, expanded))
        .collect();
    print!("{}", render::render_dispels(&events, combat.start_time));
    Ok(())
}

pub async fn stats(shell: &Shell, bracket: &str, sort: &str, reload: bool) -> Result<(), String> {
    let client = shell.stats_client().await?;
    if reload {
        client.invalidate().await;
    }

    println!("Loading {bracket} stats...");
    match load_comp_stats(&client, bracket, SortKey::parse(sort)).await {
        CompStatsView::Ready(table) => {
            let european = shell.client.app_config().european_number_format;
            print!("{}", render::render_stats(&table, european));
            Ok(())
        }
        CompStatsView::Error(message) => Err(message),
        CompStatsView::Loading => Ok(()),
    }
}

pub fn show_config(shell: &Shell) -> Result<(), String> {
    let config = shell.client.app_config();
    let text = toml::to_string_pretty(&config).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

pub fn set_wow_dir(shell: &Shell, path: &str) -> Result<(), String> {
    shell.client.set_wow_directory(Path::new(path));
    installations(shell, false)
}

pub fn select_wow_dir(shell: &Shell) -> Result<(), String> {
    match shell.client.select_wow_directory(&FolderPrompts::english()) {
        Some(folder) => {
            println!("Using {}", folder.display());
            installations(shell, false)
        }
        None => {
            println!("No folder selected");
            Ok(())
        }
    }
}

pub fn clear_wow_dir(shell: &Shell) -> Result<(), String> {
    shell.client.clear_wow_directory();
    println!("Game directory cleared");
    Ok(())
}

pub fn installations(shell: &Shell, detect: bool) -> Result<(), String> {
    if detect && shell.client.app_config().wow_directory.is_none() {
        match detect_install_root() {
            Some(root) => {
                println!("Detected {}", root.display());
                shell.client.set_wow_directory(&root);
            }
            None => println!("No installation in the default locations"),
        }
    } else {
        shell.client.refresh_installations();
    }
    print!("{}", render::render_installations(&shell.client.wow_installations()));
    Ok(())
}

pub fn open_url(shell: &Shell, url: &str) -> Result<(), String> {
    shell.client.open_external_url(url);
    Ok(())
}

pub fn set_window(shell: &Shell, geometry: WindowGeometry) -> Result<(), String> {
    shell.window.update(geometry);
    if shell.client.platform() == Platform::Browser {
        println!("Headless host has no window, geometry will not be saved");
    } else {
        println!("Window reported, run save-window-pos to store it");
    }
    Ok(())
}

pub fn save_window_pos(shell: &Shell) -> Result<(), String> {
    shell.client.save_window_position();
    match shell.client.app_config().window {
        Some(w) => println!("Window {}x{} at ({}, {})", w.width, w.height, w.x, w.y),
        None => println!("No window to save (report one with set-window)"),
    }
    Ok(())
}

pub fn debug(shell: &Shell) -> Result<(), String> {
    let config = shell.client.app_config();
    println!("platform:       {}", shell.client.platform());
    println!("wow directory:  {}", config.wow_directory.as_deref().unwrap_or("(not set)"));
    println!("installations:  {}", shell.client.wow_installations().len());
    println!("stats feed:     {}", walogs_types::comp_stats_url(&config.stats.base_url));
    println!("stats ttl:      {}s", config.stats.cache_ttl_secs);
    println!("european fmt:   {}", config.european_number_format);
    Ok(())
}

pub fn exit() {
    tracing::debug!("Exiting shell");
}
