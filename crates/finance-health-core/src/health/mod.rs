//! Personal finance health check.
//!
//! Two pure steps run in sequence: [`ratios::calculate_ratios`] derives the
//! savings rate, expense ratio and emergency coverage, then
//! [`report::build_report`] scores them against fixed thresholds and renders
//! the report text.

pub mod analysis;
pub mod explanations;
pub mod ratios;
pub mod report;
pub mod scenario;

pub use analysis::{analyze, analyze_with_explanations, assess_financial_health};
pub use ratios::{calculate_ratios, FinancialInput, FinancialRatios, RatioOutcome};
pub use report::{
    build_report, AnalysisStatus, FinancialReport, Issue, IssueCategory, Recommendation,
    ReportOptions, Severity,
};
pub use scenario::{compare_scenarios, ScenarioComparison};
