use rust_decimal::Decimal;
use std::time::Instant;
use tracing::{debug, warn};

use super::ratios::{calculate_ratios, FinancialInput};
use super::report::{build_report, FinancialReport, ReportOptions};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::FinanceHealthResult;

const METHODOLOGY: &str = "Rule-based personal finance health check (fixed thresholds)";

/// Run the ratio step then the report step, wrapped in the standard envelope.
pub fn assess_financial_health(
    input: &FinancialInput,
    options: &ReportOptions,
) -> FinanceHealthResult<ComputationOutput<FinancialReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.expenses < Decimal::ZERO {
        warnings.push(
            "Expenses are negative; expense ratio and coverage may be meaningless.".into(),
        );
    }
    if input.savings < Decimal::ZERO {
        warnings.push(
            "Savings are negative; savings rate and coverage may be meaningless.".into(),
        );
    }

    let outcome = calculate_ratios(input)?;
    if outcome.is_rejected() {
        warn!(income = %input.income, "analysis rejected: income must be positive");
        warnings.push("Income is not positive; no metrics were computed.".into());
    }

    let report = build_report(input, &outcome, options)?;

    let elapsed = start.elapsed().as_micros() as u64;
    debug!(elapsed_us = elapsed, status = ?report.status, "health check complete");

    let assumptions = serde_json::json!({
        "savings_rate_thresholds": { "severe_below": "0.10", "target": "0.20" },
        "expense_ratio_thresholds": { "severe_above": "0.80", "target": "0.70" },
        "emergency_months_thresholds": { "severe_below": "1", "target": "3" },
        "penalties": { "savings": [30, 15], "expense": [30, 15], "emergency": [20, 10] },
        "explanations": options.explain,
    });

    Ok(with_metadata(METHODOLOGY, &assumptions, warnings, elapsed, report))
}

/// Core entry point: the formatted report text for three monthly figures.
pub fn analyze(income: Money, expenses: Money, savings: Money) -> FinanceHealthResult<String> {
    analyze_message(income, expenses, savings, &ReportOptions::default())
}

/// As [`analyze`], with the "why these issues matter" notes appended.
pub fn analyze_with_explanations(
    income: Money,
    expenses: Money,
    savings: Money,
) -> FinanceHealthResult<String> {
    analyze_message(income, expenses, savings, &ReportOptions::explained())
}

fn analyze_message(
    income: Money,
    expenses: Money,
    savings: Money,
    options: &ReportOptions,
) -> FinanceHealthResult<String> {
    let input = FinancialInput::new(income, expenses, savings);
    let output = assess_financial_health(&input, options)?;
    Ok(output.result.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::report::INCOME_ERROR_MESSAGE;
    use rust_decimal_macros::dec;

    #[test]
    fn test_analyze_is_deterministic() {
        let first = analyze(dec!(4321.5), dec!(2890.25), dec!(410)).unwrap();
        let second = analyze(dec!(4321.5), dec!(2890.25), dec!(410)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_rejects_zero_income() {
        let msg = analyze(Decimal::ZERO, dec!(100), dec!(10)).unwrap();
        assert_eq!(msg, INCOME_ERROR_MESSAGE);
    }

    #[test]
    fn test_warnings_for_negative_inputs() {
        let input = FinancialInput::new(dec!(1000), dec!(-10), dec!(-5));
        let output = assess_financial_health(&input, &ReportOptions::default()).unwrap();
        assert_eq!(output.warnings.len(), 2);
        assert!(!output.result.is_rejected());
    }

    #[test]
    fn test_rejected_income_warns() {
        let input = FinancialInput::new(dec!(-50), dec!(10), dec!(5));
        let output = assess_financial_health(&input, &ReportOptions::default()).unwrap();
        assert!(output.result.is_rejected());
        assert_eq!(output.warnings.len(), 1);
    }

    #[test]
    fn test_metadata_populated() {
        let input = FinancialInput::new(dec!(3000), dec!(1500), dec!(600));
        let output = assess_financial_health(&input, &ReportOptions::explained()).unwrap();
        assert_eq!(output.methodology, METHODOLOGY);
        assert_eq!(output.metadata.precision, "rust_decimal_128bit");
        assert_eq!(output.assumptions["explanations"], serde_json::json!(true));
    }

    #[test]
    fn test_explanations_variant_extends_plain_message() {
        let plain = analyze(dec!(3000), dec!(2700), dec!(100)).unwrap();
        let explained = analyze_with_explanations(dec!(3000), dec!(2700), dec!(100)).unwrap();
        assert!(explained.len() > plain.len());
        assert!(explained.starts_with(&plain));
    }
}
