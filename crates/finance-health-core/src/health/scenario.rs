use serde::{Deserialize, Serialize};

use super::analysis::assess_financial_health;
use super::ratios::FinancialInput;
use super::report::{FinancialReport, ReportOptions};
use crate::types::{Months, Rate};
use crate::FinanceHealthResult;

/// Current situation next to a what-if re-run on the same income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub current: FinancialReport,
    pub what_if: FinancialReport,
    /// Positive when the what-if scores better.
    pub score_change: i16,
    pub savings_rate_change: Rate,
    pub expense_ratio_change: Rate,
    pub emergency_months_change: Months,
}

/// Analyse `current` and `what_if` independently and record the deltas.
///
/// Deltas are zero-based on rejected reports, since their metrics are zero.
pub fn compare_scenarios(
    current: &FinancialInput,
    what_if: &FinancialInput,
    options: &ReportOptions,
) -> FinanceHealthResult<ScenarioComparison> {
    let current = assess_financial_health(current, options)?.result;
    let what_if = assess_financial_health(what_if, options)?.result;

    Ok(ScenarioComparison {
        score_change: i16::from(what_if.health_score) - i16::from(current.health_score),
        savings_rate_change: what_if.savings_rate - current.savings_rate,
        expense_ratio_change: what_if.expense_ratio - current.expense_ratio,
        emergency_months_change: what_if.emergency_months - current.emergency_months,
        current,
        what_if,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cutting_expenses_improves_score() {
        let current = FinancialInput::new(dec!(5000), dec!(4000), dec!(500));
        let what_if = current.with_scenario(dec!(3000), dec!(1000));
        let cmp = compare_scenarios(&current, &what_if, &ReportOptions::default()).unwrap();

        assert_eq!(cmp.current.health_score, 50);
        // savings 0.20, expenses 0.60, coverage 0.33 months => only severe emergency
        assert_eq!(cmp.what_if.health_score, 80);
        assert_eq!(cmp.score_change, 30);
        assert_eq!(cmp.savings_rate_change, dec!(0.1));
        assert_eq!(cmp.expense_ratio_change, dec!(-0.2));
    }

    #[test]
    fn test_worse_scenario_has_negative_change() {
        let current = FinancialInput::new(dec!(10000), dec!(3000), dec!(9000));
        let what_if = current.with_scenario(dec!(9000), dec!(100));
        let cmp = compare_scenarios(&current, &what_if, &ReportOptions::default()).unwrap();
        assert_eq!(cmp.current.health_score, 100);
        assert_eq!(cmp.what_if.health_score, 20);
        assert_eq!(cmp.score_change, -80);
    }

    #[test]
    fn test_rejected_income_carries_into_what_if() {
        let current = FinancialInput::new(Decimal::ZERO, dec!(100), dec!(10));
        let what_if = current.with_scenario(dec!(50), dec!(50));
        let cmp = compare_scenarios(&current, &what_if, &ReportOptions::default()).unwrap();
        assert!(cmp.current.is_rejected());
        assert!(cmp.what_if.is_rejected());
        assert_eq!(cmp.score_change, 0);
        assert_eq!(cmp.emergency_months_change, Decimal::ZERO);
    }
}
