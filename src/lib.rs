//! Indian income tax under the old and new regimes

pub mod core;
pub mod tax;

pub use crate::core::{
    Deductions, FinancialYear, IncomeSources, Regime, Section, TaxError, TaxSettings,
};
pub use crate::tax::{IncomeTaxCalculator, Report, ReportOptions};
