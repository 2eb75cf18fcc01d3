pub mod error;
pub mod health;
pub mod types;

pub use error::FinanceHealthError;
pub use types::*;

/// Standard result type for all finance-health operations
pub type FinanceHealthResult<T> = Result<T, FinanceHealthError>;
