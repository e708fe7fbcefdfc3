use super::cess::before_cess;
use super::slab_tax::slab_tax;
use crate::core::{SurchargeBracket, SurchargeBrackets, TaxSlab};
use rust_decimal::Decimal;

/// Surcharge on `tax` for `taxable_income`, with marginal relief.
///
/// The bracket applied is the highest one whose threshold is at or below the
/// income. Relief caps tax plus surcharge so that, with cess at `cess_rate`
/// added, the total rises by no more than the income above the threshold. The
/// tax at the threshold includes the surcharge the lower bracket levies there.
///
/// `tax` is the slab tax after rebate. Year rules reject rebate limits at or
/// above the lowest threshold, so the tax at a threshold is its plain slab tax.
pub fn surcharge(
    taxable_income: Decimal,
    tax: Decimal,
    brackets: &SurchargeBrackets,
    slabs: &TaxSlab,
    cess_rate: Decimal,
) -> Decimal {
    surcharge_within(taxable_income, tax, brackets.brackets(), slabs, cess_rate)
}

fn surcharge_within(
    taxable_income: Decimal,
    tax: Decimal,
    brackets: &[SurchargeBracket],
    slabs: &TaxSlab,
    cess_rate: Decimal,
) -> Decimal {
    let Some(index) = brackets.iter().rposition(|b| b.threshold <= taxable_income) else {
        return Decimal::ZERO;
    };
    let bracket = brackets[index];
    let raw = bracket.rate * tax;

    let threshold_tax = slab_tax(bracket.threshold, slabs);
    let tax_at_threshold = threshold_tax
        + surcharge_within(
            bracket.threshold,
            threshold_tax,
            &brackets[..index],
            slabs,
            cess_rate,
        );
    let relief_room = before_cess(taxable_income - bracket.threshold, cess_rate);
    let ceiling = tax_at_threshold + relief_room - tax;

    if raw > ceiling {
        log::debug!(
            "Marginal relief at {}: surcharge {} reduced to {}",
            bracket.threshold,
            raw,
            ceiling.max(Decimal::ZERO)
        );
    }
    raw.min(ceiling).max(Decimal::ZERO)
}
