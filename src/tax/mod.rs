pub mod calculator;
pub mod capital_gains;
pub mod cess;
pub mod deduction;
pub mod india;
pub mod regime;
pub mod rules;
pub mod slab_tax;
pub mod surcharge;
pub mod taxable;

pub use calculator::{Comparison, IncomeSummary, IncomeTaxCalculator, Report, ReportOptions};
pub use capital_gains::capital_gains_tax;
pub use deduction::{admissible, hra_exemption, AdmissibleDeductions};
pub use regime::{RegimeEngine, RegimeResult, TaxBreakup};
pub use rules::{RegimeRules, RuleRegistry, SlabProvider, YearRules};
pub use slab_tax::{slab_tax, tax_per_slab, SlabTax};
