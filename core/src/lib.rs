pub mod bridge;
pub mod combat;
pub mod context;
pub mod replay;
pub mod stats;
pub mod timeline;

// Re-exports for convenience
pub use bridge::{
    BridgeError, BrowserBridge, DesktopBridge, FolderChooser, FolderPrompts, InstallationKind,
    InstallationRegistry, NativeBridge, Platform, WindowTracker, create_bridge,
};
pub use combat::{CombatLoadError, CombatRecord, CombatUnit, CombatUnitClass};
pub use context::{ClientContext, CombatReport, CombatReportContext, ReportTab};
pub use replay::ReplayDispelEvent;
pub use stats::{CompStatsTable, CompStatsView, SortKey, StatsClient, load_comp_stats};
pub use timeline::CombatUnitTimelineView;
pub use walogs_types::AppConfig;
