use crate::core::TaxSlab;
use rust_decimal::Decimal;
use serde::Serialize;

/// Tax contributed by one slab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlabTax {
    pub lower: Decimal,
    /// `None` for the open-ended top slab
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    /// Part of the income that falls in this slab
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Progressive tax on `taxable_income`
pub fn slab_tax(taxable_income: Decimal, slabs: &TaxSlab) -> Decimal {
    slabs
        .iter()
        .map(|slab| slab.rate * slab.portion_of(taxable_income))
        .sum()
}

/// Contribution of each slab the income reaches, lowest first
pub fn tax_per_slab(taxable_income: Decimal, slabs: &TaxSlab) -> Vec<SlabTax> {
    slabs
        .iter()
        .filter(|slab| taxable_income > slab.lower)
        .map(|slab| {
            let taxable_amount = slab.portion_of(taxable_income);
            SlabTax {
                lower: slab.lower,
                upper: slab.upper,
                rate: slab.rate,
                taxable_amount,
                tax: slab.rate * taxable_amount,
            }
        })
        .collect()
}
