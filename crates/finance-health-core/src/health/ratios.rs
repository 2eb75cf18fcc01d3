use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FinanceHealthError;
use crate::types::{Money, Months, Rate};
use crate::FinanceHealthResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The three monthly figures a health check starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInput {
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
}

impl FinancialInput {
    pub fn new(income: Money, expenses: Money, savings: Money) -> Self {
        Self {
            income,
            expenses,
            savings,
        }
    }

    /// What-if variant: same income, different expenses and savings.
    pub fn with_scenario(&self, expenses: Money, savings: Money) -> Self {
        Self {
            income: self.income,
            expenses,
            savings,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub savings_rate: Rate,
    pub expense_ratio: Rate,
    pub emergency_months: Months,
}

/// Result of the ratio step. `Rejected` is a normal terminal state, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioOutcome {
    Analyzed(FinancialRatios),
    /// Income was zero or negative.
    Rejected,
}

impl RatioOutcome {
    /// Ratios for display. All zero when rejected.
    pub fn ratios(&self) -> FinancialRatios {
        match self {
            Self::Analyzed(r) => *r,
            Self::Rejected => FinancialRatios::default(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Derive savings rate, expense ratio and emergency coverage.
///
/// Negative expenses or savings are passed through untouched; only
/// `income <= 0` stops the analysis.
pub fn calculate_ratios(input: &FinancialInput) -> FinanceHealthResult<RatioOutcome> {
    if input.income <= Decimal::ZERO {
        debug!(income = %input.income, "income not positive, rejecting analysis");
        return Ok(RatioOutcome::Rejected);
    }

    let savings_rate = checked_divide(input.savings, input.income, "savings / income")?;
    let expense_ratio = checked_divide(input.expenses, input.income, "expenses / income")?;
    let emergency_months = if input.expenses > Decimal::ZERO {
        checked_divide(input.savings, input.expenses, "savings / expenses")?
    } else {
        Decimal::ZERO
    };

    debug!(
        %savings_rate,
        %expense_ratio,
        %emergency_months,
        "ratios computed"
    );

    Ok(RatioOutcome::Analyzed(FinancialRatios {
        savings_rate,
        expense_ratio,
        emergency_months,
    }))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Callers guarantee a non-zero denominator; this only guards the 96-bit range.
fn checked_divide(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> FinanceHealthResult<Decimal> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| FinanceHealthError::ArithmeticOverflow {
            context: context.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
