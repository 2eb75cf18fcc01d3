//! Fixed explanatory sentences for the "why these issues matter" section.

use super::report::IssueCategory;

pub const HEADING: &str = "Why these issues matter:";

const SAVINGS_NOTE: &str = "Saving at least 20% of income builds long-term wealth and leaves room \
     to absorb price rises or a drop in income without borrowing.";

const EXPENSE_NOTE: &str = "When expenses take up most of your income, any unexpected bill has to \
     be covered with debt, and there is little left over for goals.";

const EMERGENCY_NOTE: &str = "An emergency fund of 3 to 6 months of expenses lets you handle job \
     loss, medical costs or urgent repairs without high-interest credit.";

pub fn note_for(category: IssueCategory) -> &'static str {
    match category {
        IssueCategory::Savings => SAVINGS_NOTE,
        IssueCategory::Expense => EXPENSE_NOTE,
        IssueCategory::Emergency => EMERGENCY_NOTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_distinct_note() {
        let notes = [
            note_for(IssueCategory::Savings),
            note_for(IssueCategory::Expense),
            note_for(IssueCategory::Emergency),
        ];
        assert!(notes.iter().all(|n| !n.is_empty()));
        assert_ne!(notes[0], notes[1]);
        assert_ne!(notes[1], notes[2]);
    }

    #[test]
    fn test_notes_are_single_line() {
        for category in [
            IssueCategory::Savings,
            IssueCategory::Expense,
            IssueCategory::Emergency,
        ] {
            assert!(!note_for(category).contains('\n'));
        }
    }
}
