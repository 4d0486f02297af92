use thiserror::Error;

//-----------------------------------------------------------------------------
// Accrual Errors
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccrualError {
    /// Salary amount is missing, non-numeric, non-finite or not above zero
    #[error("Invalid salary amount: {0:?} (must be a number greater than zero)")]
    InvalidAmount(String),

    #[error("Unknown currency: {0} (expected TL, USD or EUR)")]
    UnknownCurrency(String),

    #[error("Unknown preset earner: {0}")]
    UnknownPreset(String),

    #[error("Unknown language: {0} (expected tr or en)")]
    UnknownLanguage(String),

    #[error("Unknown salary kind: {0} (expected net or gross)")]
    UnknownSalaryKind(String),

    /// Pay-cycle boundary fell outside the representable calendar range
    #[error("Pay cycle date out of range: {year}-{month:02}")]
    DateOutOfRange { year: i32, month: u32 },
}

pub type Result<T> = std::result::Result<T, AccrualError>;
