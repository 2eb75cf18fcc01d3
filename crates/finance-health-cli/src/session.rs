//! Menu-driven session loop.
//!
//! All console access goes through [`InputProvider`] and [`OutputSink`], so the
//! loop can be driven by scripted input in tests.

use std::io;
use std::ops::ControlFlow;
use tracing::{debug, info, warn};

use finance_health_core::health::{self, FinancialInput, ReportOptions};
use finance_health_core::{parse_money, Money};

pub const BANNER: &str = "=== Personal Finance Health Check ===";
pub const MENU: &str =
    "\nChoose a mode:\n1. Full Financial Analysis\n2. What-If Simulation Only\n3. Exit";
pub const GOODBYE: &str = "Goodbye! Stay financially healthy.";
pub const INVALID_CHOICE: &str = "Invalid choice. Please enter 1, 2, or 3.";
pub const INVALID_NUMBER: &str = "Please enter a valid number.";

const CHOICE_PROMPT: &str = "Enter your choice (1/2/3): ";
const INCOME_PROMPT: &str = "Enter your monthly income: ";
const EXPENSES_PROMPT: &str = "Enter your monthly expenses: ";
const SAVINGS_PROMPT: &str = "Enter your monthly savings: ";
const WHAT_IF_EXPENSES_PROMPT: &str = "What-if monthly expenses: ";
const WHAT_IF_SAVINGS_PROMPT: &str = "What-if monthly savings: ";
const WHAT_IF_CONFIRM_PROMPT: &str = "\nDo you want to run a what-if scenario? (y/n): ";

pub type SessionResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Source of user-typed lines. `Ok(None)` means input is exhausted.
pub trait InputProvider {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Destination for everything the session prints.
pub trait OutputSink {
    fn emit(&mut self, text: &str) -> io::Result<()>;
}

impl OutputSink for Vec<String> {
    fn emit(&mut self, text: &str) -> io::Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}

pub struct Session<I, O> {
    input: I,
    output: O,
    options: ReportOptions,
    /// Income of the most recent full analysis, reused by what-if mode.
    last_income: Option<Money>,
}

impl<I: InputProvider, O: OutputSink> Session<I, O> {
    pub fn new(input: I, output: O, options: ReportOptions) -> Self {
        Self {
            input,
            output,
            options,
            last_income: None,
        }
    }

    /// Loop until the user exits or input runs out.
    pub fn run(&mut self) -> SessionResult<()> {
        self.output.emit(BANNER)?;

        loop {
            self.output.emit(MENU)?;
            let Some(choice) = self.input.read_line(CHOICE_PROMPT)? else {
                debug!("input closed at menu");
                break;
            };

            let flow = match choice.trim() {
                "1" => self.full_analysis()?,
                "2" => self.what_if_only()?,
                "3" => {
                    self.output.emit(GOODBYE)?;
                    ControlFlow::Break(())
                }
                other => {
                    debug!(choice = other, "invalid menu choice");
                    self.output.emit(INVALID_CHOICE)?;
                    ControlFlow::Continue(())
                }
            };

            if flow.is_break() {
                break;
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }

    fn full_analysis(&mut self) -> SessionResult<ControlFlow<()>> {
        self.output.emit("")?;
        let Some(income) = self.prompt_amount("income", INCOME_PROMPT)? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(expenses) = self.prompt_amount("expenses", EXPENSES_PROMPT)? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(savings) = self.prompt_amount("savings", SAVINGS_PROMPT)? else {
            return Ok(ControlFlow::Break(()));
        };

        let current = FinancialInput::new(income, expenses, savings);
        self.last_income = Some(income);
        self.print_report("--- Current Situation Analysis ---", &current)?;

        let Some(answer) = self.input.read_line(WHAT_IF_CONFIRM_PROMPT)? else {
            return Ok(ControlFlow::Break(()));
        };
        if answer.trim().eq_ignore_ascii_case("y") {
            return self.run_what_if(&current);
        }
        Ok(ControlFlow::Continue(()))
    }

    fn what_if_only(&mut self) -> SessionResult<ControlFlow<()>> {
        self.output.emit("\n--- What-If Simulation ---")?;
        let income = match self.last_income {
            Some(income) => {
                self.output.emit(&format!(
                    "Using monthly income from your last analysis: {:.2}",
                    income.round_dp(2)
                ))?;
                income
            }
            None => match self.prompt_amount("income", INCOME_PROMPT)? {
                Some(income) => income,
                None => return Ok(ControlFlow::Break(())),
            },
        };

        let base = FinancialInput::new(income, Money::ZERO, Money::ZERO);
        self.run_what_if(&base)
    }

    fn run_what_if(&mut self, base: &FinancialInput) -> SessionResult<ControlFlow<()>> {
        let Some(expenses) = self.prompt_amount("what-if expenses", WHAT_IF_EXPENSES_PROMPT)?
        else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(savings) = self.prompt_amount("what-if savings", WHAT_IF_SAVINGS_PROMPT)? else {
            return Ok(ControlFlow::Break(()));
        };

        let scenario = base.with_scenario(expenses, savings);
        self.print_report("--- What-If Scenario Result ---", &scenario)?;
        Ok(ControlFlow::Continue(()))
    }

    /// A failed analysis is reported to the user and the session carries on.
    fn print_report(&mut self, heading: &str, input: &FinancialInput) -> SessionResult<()> {
        let report = match health::assess_financial_health(input, &self.options) {
            Ok(output) => output.result,
            Err(e) => {
                warn!(error = %e, "analysis failed");
                self.output.emit(&format!("error: {e}"))?;
                return Ok(());
            }
        };
        info!(
            health_score = report.health_score,
            status = ?report.status,
            "analysis printed"
        );
        self.output.emit(&format!("\n{heading}"))?;
        self.output.emit(&report.message)?;
        Ok(())
    }

    /// Ask until the answer parses. `None` when input runs out.
    fn prompt_amount(&mut self, field: &str, prompt: &str) -> SessionResult<Option<Money>> {
        loop {
            let Some(line) = self.input.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_money(field, &line) {
                Ok(amount) => return Ok(Some(amount)),
                Err(e) => {
                    debug!(error = %e, "rejected typed amount");
                    self.output.emit(INVALID_NUMBER)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;

    /// Replays fixed lines and records every prompt shown.
    struct ScriptedInput {
        lines: VecDeque<String>,
        prompts: Vec<String>,
    }

    impl ScriptedInput {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|l| l.to_string()).collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl InputProvider for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
            self.prompts.push(prompt.to_string());
            Ok(self.lines.pop_front())
        }
    }

    fn run_script(lines: &[&str], options: ReportOptions) -> Vec<String> {
        let mut session = Session::new(ScriptedInput::new(lines), Vec::new(), options);
        session.run().unwrap();
        session.into_output()
    }

    fn report_text(income: &str, expenses: &str, savings: &str) -> String {
        health::analyze(
            parse_money("income", income).unwrap(),
            parse_money("expenses", expenses).unwrap(),
            parse_money("savings", savings).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_exit_immediately() {
        let out = run_script(&["3"], ReportOptions::default());
        assert_eq!(out, vec![BANNER, MENU, GOODBYE]);
    }

    #[test]
    fn test_full_analysis_without_what_if() {
        let out = run_script(&["1", "5000", "4000", "500", "n", "3"], ReportOptions::default());

        assert_eq!(out[2], "");
        assert_eq!(out[3], "\n--- Current Situation Analysis ---");
        assert_eq!(out[4], report_text("5000", "4000", "500"));
        assert_eq!(out[5], MENU);
        assert_eq!(out.last().unwrap(), GOODBYE);
    }

    #[test]
    fn test_full_analysis_with_what_if_reuses_income() {
        let out = run_script(
            &["1", "5000", "4000", "500", "Y", "3000", "1000", "3"],
            ReportOptions::default(),
        );

        let idx = out
            .iter()
            .position(|l| l == "\n--- What-If Scenario Result ---")
            .expect("what-if heading");
        assert_eq!(out[idx + 1], report_text("5000", "3000", "1000"));
    }

    #[test]
    fn test_what_if_only_prompts_for_income_first_time() {
        let mut session = Session::new(
            ScriptedInput::new(&["2", "4000", "2000", "800", "3"]),
            Vec::new(),
            ReportOptions::default(),
        );
        session.run().unwrap();
        let prompts = session.input.prompts.clone();
        let out = session.into_output();

        assert_eq!(
            prompts[1..4].to_vec(),
            vec![INCOME_PROMPT, WHAT_IF_EXPENSES_PROMPT, WHAT_IF_SAVINGS_PROMPT]
        );
        assert!(out.contains(&"\n--- What-If Simulation ---".to_string()));
        assert!(out.contains(&report_text("4000", "2000", "800")));
    }

    #[test]
    fn test_what_if_only_reuses_last_income() {
        let mut session = Session::new(
            ScriptedInput::new(&["1", "6000", "5000", "200", "n", "2", "4000", "1300", "3"]),
            Vec::new(),
            ReportOptions::default(),
        );
        session.run().unwrap();
        let prompts = session.input.prompts.clone();
        let out = session.into_output();

        // No second income prompt
        assert_eq!(prompts.iter().filter(|p| *p == INCOME_PROMPT).count(), 1);
        assert!(out.contains(
            &"Using monthly income from your last analysis: 6000.00".to_string()
        ));
        assert!(out.contains(&report_text("6000", "4000", "1300")));
    }

    #[test]
    fn test_invalid_choice_reprints_menu() {
        let out = run_script(&["9", "3"], ReportOptions::default());
        assert_eq!(out, vec![BANNER, MENU, INVALID_CHOICE, MENU, GOODBYE]);
    }

    #[test]
    fn test_bad_number_reprompts() {
        let mut session = Session::new(
            ScriptedInput::new(&["1", "abc", "5000", "4000", "500", "n", "3"]),
            Vec::new(),
            ReportOptions::default(),
        );
        session.run().unwrap();
        let prompts = session.input.prompts.clone();
        let out = session.into_output();

        assert_eq!(prompts[1], INCOME_PROMPT);
        assert_eq!(prompts[2], INCOME_PROMPT);
        assert!(out.contains(&INVALID_NUMBER.to_string()));
        assert!(out.contains(&report_text("5000", "4000", "500")));
    }

    #[test]
    fn test_end_of_input_stops_quietly() {
        let out = run_script(&["1", "5000"], ReportOptions::default());
        assert!(!out.contains(&GOODBYE.to_string()));
        assert!(!out.iter().any(|l| l.contains("Current Situation")));
    }

    #[test]
    fn test_zero_income_prints_error_report() {
        let out = run_script(&["1", "0", "100", "10", "n", "3"], ReportOptions::default());
        assert!(out.contains(&"Income must be greater than 0 to analyse finances.".to_string()));
    }

    #[test]
    fn test_overflowing_entry_does_not_end_session() {
        let out = run_script(
            &["1", "1e-28", "1", "100", "n", "1", "5000", "4000", "500", "n", "3"],
            ReportOptions::default(),
        );

        assert!(out.contains(&"error: Arithmetic overflow in savings / income".to_string()));
        let headings = out
            .iter()
            .filter(|l| *l == "\n--- Current Situation Analysis ---")
            .count();
        assert_eq!(headings, 1);
        assert!(out.contains(&report_text("5000", "4000", "500")));
        assert_eq!(out.last().unwrap(), GOODBYE);
    }

    #[test]
    fn test_explain_option_reaches_reports() {
        let out = run_script(&["1", "5000", "4000", "500", "n", "3"], ReportOptions::explained());
        assert!(out.iter().any(|l| l.contains("Why these issues matter:")));
    }
}
