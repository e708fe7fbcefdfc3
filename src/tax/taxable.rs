use super::deduction::AdmissibleDeductions;
use crate::core::IncomeTotals;
use rust_decimal::Decimal;

/// Slab income less admissible deductions (standard deduction included), never
/// negative. Capital gains are taxed separately and stay out of it.
pub fn taxable_income(totals: &IncomeTotals, admissible: &AdmissibleDeductions) -> Decimal {
    (totals.slab_income() - admissible.total()).max(Decimal::ZERO)
}
