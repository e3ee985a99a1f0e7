//! Process-wide and per-report state shared with the views.

mod client;
mod report;

pub use client::ClientContext;
pub use report::{CombatReport, CombatReportContext, ReportHeader, ReportTab, ReportViewState};

#[cfg(test)]
mod client_tests;
