use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use finance_health_core::health::{self, FinancialInput, ReportOptions};
use finance_health_core::with_metadata;

use crate::input;

/// Arguments for a single health check
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Path to JSON input file with income, expenses and savings (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Monthly expenses
    #[arg(long)]
    pub expenses: Option<Decimal>,

    /// Monthly savings
    #[arg(long)]
    pub savings: Option<Decimal>,

    /// Append "why these issues matter" notes
    #[arg(long)]
    pub explain: bool,
}

/// Arguments for a what-if comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct WhatIfArgs {
    #[command(flatten)]
    pub current: AnalyzeArgs,

    /// What-if monthly expenses
    #[arg(long)]
    pub new_expenses: Decimal,

    /// What-if monthly savings
    #[arg(long)]
    pub new_savings: Decimal,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let options = ReportOptions {
        explain: args.explain,
    };
    let finance_input = resolve_input(&args)?;
    debug!(?finance_input, "running health check");

    let output = health::assess_financial_health(&finance_input, &options)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_what_if(args: WhatIfArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let options = ReportOptions {
        explain: args.current.explain,
    };
    let current = resolve_input(&args.current)?;
    let what_if = current.with_scenario(args.new_expenses, args.new_savings);
    debug!(?current, ?what_if, "running what-if comparison");

    let comparison = health::compare_scenarios(&current, &what_if, &options)?;

    let mut warnings = Vec::new();
    if comparison.score_change < 0 {
        warnings.push(format!(
            "What-if scenario lowers the health score by {} points.",
            -comparison.score_change
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "income_carried_forward": true,
        "explanations": options.explain,
    });
    let output = with_metadata(
        "What-if comparison of two rule-based health checks",
        &assumptions,
        warnings,
        elapsed,
        comparison,
    );
    Ok(serde_json::to_value(output)?)
}

/// Input priority: `--input` file, then piped stdin JSON, then flags.
fn resolve_input(args: &AnalyzeArgs) -> Result<FinancialInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(FinancialInput::new(
        args.income
            .ok_or("--income is required (or provide --input)")?,
        args.expenses
            .ok_or("--expenses is required (or provide --input)")?,
        args.savings
            .ok_or("--savings is required (or provide --input)")?,
    ))
}
