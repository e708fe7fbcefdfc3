pub mod deductions;
pub mod error;
pub mod income;
pub mod regime;
pub mod settings;
pub mod slabs;
pub mod warnings;

// Flat public surface for domain types.
pub use deductions::{AgeLimit, Cap, Deductions, IncomeBase, Section, SectionRule};
pub use error::{ErrorKind, TaxError};
pub use income::{
    BusinessIncome, CapitalGainsIncome, IncomeRecord, IncomeSources, IncomeTotals, OtherIncome, SalaryIncome,
};
pub use regime::Regime;
pub use settings::{AgeBand, FinancialYear, TaxSettings};
pub use slabs::{Rebate, Slab, SurchargeBracket, SurchargeBrackets, TaxSlab};
pub use warnings::Warning;
