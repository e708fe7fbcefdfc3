use super::regime::Regime;
use super::settings::FinancialYear;

/// Broad classification of a [`TaxError`], for callers that only need to branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidRegime,
    UnsupportedYear,
    Configuration,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },
    #[error("invalid regime '{0}': expected \"new\" or \"old\"")]
    InvalidRegime(String),
    #[error("unsupported financial year: {year}")]
    UnsupportedYear { year: FinancialYear },
    #[error("malformed tax tables for {year} ({regime}): {reason}")]
    Configuration {
        year: FinancialYear,
        regime: Regime,
        reason: String,
    },
}

impl TaxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaxError::InvalidInput { .. } => ErrorKind::InvalidInput,
            TaxError::InvalidRegime(_) => ErrorKind::InvalidRegime,
            TaxError::UnsupportedYear { .. } => ErrorKind::UnsupportedYear,
            TaxError::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TaxError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn negative(field: impl Into<String>) -> Self {
        Self::invalid_input(field, "amount must not be negative")
    }
}
