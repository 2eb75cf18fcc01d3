use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::explanations;
use super::ratios::{FinancialInput, FinancialRatios, RatioOutcome};
use crate::error::FinanceHealthError;
use crate::types::{Money, Months, Rate};
use crate::FinanceHealthResult;

pub const INCOME_ERROR_MESSAGE: &str = "Income must be greater than 0 to analyse finances.";

pub const NO_ISSUES_MESSAGE: &str =
    "No major issues detected based on these simple rules. Good job!";

const MAX_SCORE: i32 = 100;

// Thresholds
const SEVERE_SAVINGS_RATE: Rate = dec!(0.10);
const TARGET_SAVINGS_RATE: Rate = dec!(0.20);
const SEVERE_EXPENSE_RATIO: Rate = dec!(0.80);
const TARGET_EXPENSE_RATIO: Rate = dec!(0.70);
const SEVERE_EMERGENCY_MONTHS: Months = dec!(1);
const TARGET_EMERGENCY_MONTHS: Months = dec!(3);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisStatus {
    Analyzed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    Savings,
    Expense,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Moderate,
    Severe,
}

impl Severity {
    /// Points deducted from the health score.
    pub fn penalty(self, category: IssueCategory) -> i32 {
        match (category, self) {
            (IssueCategory::Savings, Severity::Severe) => 30,
            (IssueCategory::Savings, Severity::Moderate) => 15,
            (IssueCategory::Expense, Severity::Severe) => 30,
            (IssueCategory::Expense, Severity::Moderate) => 15,
            (IssueCategory::Emergency, Severity::Severe) => 20,
            (IssueCategory::Emergency, Severity::Moderate) => 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub category: IssueCategory,
    pub severity: Severity,
    pub description: String,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: IssueCategory,
    /// Monthly amount to cut or add.
    pub amount: Money,
    pub message: String,
}

/// Controls optional report sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Append the "why these issues matter" notes.
    pub explain: bool,
}

impl ReportOptions {
    pub fn explained() -> Self {
        Self { explain: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub status: AnalysisStatus,
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
    pub savings_rate: Rate,
    pub expense_ratio: Rate,
    pub emergency_months: Months,
    pub health_score: u8,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub notes: Vec<String>,
    /// The complete newline-joined report text.
    pub message: String,
}

impl FinancialReport {
    pub fn is_rejected(&self) -> bool {
        self.status == AnalysisStatus::Rejected
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    fn rejected(input: &FinancialInput) -> Self {
        Self {
            status: AnalysisStatus::Rejected,
            income: input.income,
            expenses: input.expenses,
            savings: input.savings,
            savings_rate: Decimal::ZERO,
            expense_ratio: Decimal::ZERO,
            emergency_months: Decimal::ZERO,
            health_score: 0,
            issues: Vec::new(),
            recommendations: Vec::new(),
            notes: Vec::new(),
            message: INCOME_ERROR_MESSAGE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Turn computed ratios into a scored report with issues, recommendations
/// and the final message text.
pub fn build_report(
    input: &FinancialInput,
    outcome: &RatioOutcome,
    options: &ReportOptions,
) -> FinanceHealthResult<FinancialReport> {
    let ratios = match outcome {
        RatioOutcome::Analyzed(r) => *r,
        RatioOutcome::Rejected => return Ok(FinancialReport::rejected(input)),
    };

    let issues = detect_issues(&ratios);
    let health_score = score(&issues);
    let recommendations = if issues.is_empty() {
        Vec::new()
    } else {
        recommend(input, &ratios)?
    };
    let notes: Vec<String> = if options.explain {
        issues
            .iter()
            .map(|i| explanations::note_for(i.category).to_string())
            .collect()
    } else {
        Vec::new()
    };

    debug!(
        health_score,
        issues = issues.len(),
        recommendations = recommendations.len(),
        "report built"
    );

    let mut lines = vec![
        format!("Monthly income: {}", fmt_amount(input.income)),
        format!("Monthly expenses: {}", fmt_amount(input.expenses)),
        format!("Monthly savings: {}", fmt_amount(input.savings)),
        format!(
            "Savings rate: {}",
            fmt_percent(ratios.savings_rate, "savings rate percentage")?
        ),
        format!(
            "Expense-to-income ratio: {}",
            fmt_percent(ratios.expense_ratio, "expense ratio percentage")?
        ),
        format!(
            "Emergency fund coverage: {} months of expenses",
            fmt_amount(ratios.emergency_months)
        ),
        String::new(),
        format!("Financial health score: {health_score}/{MAX_SCORE}"),
    ];

    if issues.is_empty() {
        lines.push(String::new());
        lines.push(NO_ISSUES_MESSAGE.to_string());
    } else {
        lines.push(String::new());
        lines.push("Detected issues:".to_string());
        lines.extend(issues.iter().map(|i| format!("- {i}")));

        lines.push(String::new());
        lines.push("Recommended actions to improve your finances:".to_string());
        lines.extend(recommendations.iter().map(|r| format!("- {}", r.message)));

        if !notes.is_empty() {
            lines.push(String::new());
            lines.push(explanations::HEADING.to_string());
            lines.extend(notes.iter().map(|n| format!("- {n}")));
        }
    }

    Ok(FinancialReport {
        status: AnalysisStatus::Analyzed,
        income: input.income,
        expenses: input.expenses,
        savings: input.savings,
        savings_rate: ratios.savings_rate,
        expense_ratio: ratios.expense_ratio,
        emergency_months: ratios.emergency_months,
        health_score,
        issues,
        recommendations,
        notes,
        message: lines.join("\n"),
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// One issue per category at most, in savings / expense / emergency order.
fn detect_issues(ratios: &FinancialRatios) -> Vec<Issue> {
    let mut issues = Vec::new();

    if ratios.savings_rate < SEVERE_SAVINGS_RATE {
        issues.push(issue(
            IssueCategory::Savings,
            Severity::Severe,
            "Very low savings rate (less than 10% of income).",
        ));
    } else if ratios.savings_rate < TARGET_SAVINGS_RATE {
        issues.push(issue(
            IssueCategory::Savings,
            Severity::Moderate,
            "Savings rate is below recommended 20% of income.",
        ));
    }

    if ratios.expense_ratio > SEVERE_EXPENSE_RATIO {
        issues.push(issue(
            IssueCategory::Expense,
            Severity::Severe,
            "Expenses are more than 80% of income (very tight budget).",
        ));
    } else if ratios.expense_ratio > TARGET_EXPENSE_RATIO {
        issues.push(issue(
            IssueCategory::Expense,
            Severity::Moderate,
            "Expenses are more than 70% of income (limited flexibility).",
        ));
    }

    if ratios.emergency_months < SEVERE_EMERGENCY_MONTHS {
        issues.push(issue(
            IssueCategory::Emergency,
            Severity::Severe,
            "No emergency fund (less than 1 month of expenses saved).",
        ));
    } else if ratios.emergency_months < TARGET_EMERGENCY_MONTHS {
        issues.push(issue(
            IssueCategory::Emergency,
            Severity::Moderate,
            "Emergency fund is small (less than 3 months of expenses).",
        ));
    }

    issues
}

fn issue(category: IssueCategory, severity: Severity, description: &str) -> Issue {
    Issue {
        category,
        severity,
        description: description.to_string(),
    }
}

fn score(issues: &[Issue]) -> u8 {
    let deductions: i32 = issues
        .iter()
        .map(|i| i.severity.penalty(i.category))
        .sum();
    // clamp keeps the cast lossless
    (MAX_SCORE - deductions).clamp(0, MAX_SCORE) as u8
}

/// Recommendations are keyed on the target thresholds, so a severe issue and
/// a moderate one in the same category produce the same advice.
fn recommend(
    input: &FinancialInput,
    ratios: &FinancialRatios,
) -> FinanceHealthResult<Vec<Recommendation>> {
    let mut recs = Vec::new();

    if ratios.expense_ratio > TARGET_EXPENSE_RATIO {
        let target_expenses = checked(
            TARGET_EXPENSE_RATIO.checked_mul(input.income),
            "0.70 x income",
        )?;
        let cut_needed = checked(
            input.expenses.checked_sub(target_expenses),
            "expenses - target expenses",
        )?;
        if cut_needed > Decimal::ZERO {
            recs.push(Recommendation {
                category: IssueCategory::Expense,
                amount: cut_needed,
                message: format!(
                    "Try to reduce your monthly expenses by about {} \
                     to bring them under 70% of your income.",
                    fmt_amount(cut_needed)
                ),
            });
        }
    }

    if ratios.savings_rate < TARGET_SAVINGS_RATE {
        let target_savings = checked(
            TARGET_SAVINGS_RATE.checked_mul(input.income),
            "0.20 x income",
        )?;
        let extra_savings = checked(
            target_savings.checked_sub(input.savings),
            "target savings - savings",
        )?;
        if extra_savings > Decimal::ZERO {
            recs.push(Recommendation {
                category: IssueCategory::Savings,
                amount: extra_savings,
                message: format!(
                    "Try to increase your monthly savings by about {} \
                     to reach a 20% savings rate.",
                    fmt_amount(extra_savings)
                ),
            });
        }
    }

    if ratios.emergency_months < TARGET_EMERGENCY_MONTHS && input.expenses > Decimal::ZERO {
        let target_fund = checked(
            TARGET_EMERGENCY_MONTHS.checked_mul(input.expenses),
            "3 x expenses",
        )?;
        let shortfall = checked(
            target_fund.checked_sub(input.savings),
            "target emergency fund - savings",
        )?;
        if shortfall > Decimal::ZERO {
            recs.push(Recommendation {
                category: IssueCategory::Emergency,
                amount: shortfall,
                message: format!(
                    "Build an emergency fund of at least 3 months of expenses. \
                     You need about {} more saved.",
                    fmt_amount(shortfall)
                ),
            });
        }
    }

    Ok(recs)
}

fn checked(value: Option<Decimal>, context: &str) -> FinanceHealthResult<Decimal> {
    value.ok_or_else(|| FinanceHealthError::ArithmeticOverflow {
        context: context.to_string(),
    })
}

/// Two decimal places, banker's rounding on the exact decimal value.
fn fmt_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn fmt_percent(rate: Rate, context: &str) -> FinanceHealthResult<String> {
    let percent = checked(rate.checked_mul(dec!(100)), context)?;
    Ok(format!("{:.2}%", percent.round_dp(2)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
