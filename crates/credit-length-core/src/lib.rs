pub mod amortization;
pub mod error;
pub mod inflation;
pub mod investment;
pub mod sweep;
pub mod time_value;
pub mod types;

pub use error::CreditLengthError;
pub use types::*;

/// Standard result type for all credit-length operations
pub type CreditLengthResult<T> = Result<T, CreditLengthError>;
