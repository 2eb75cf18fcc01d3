use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceHealthError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },
}
