//! Long-term capital gains at their special rates

use crate::core::IncomeTotals;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const LONG_TERM_RATE: Decimal = dec!(0.125);
/// Older long-term gains still taxed at 20%
pub const LONG_TERM_LEGACY_RATE: Decimal = dec!(0.20);

/// Flat tax on long-term gains. The same in both regimes; no slab, rebate or
/// deduction touches it.
pub fn capital_gains_tax(totals: &IncomeTotals) -> Decimal {
    totals.gains_at_12_5_percent * LONG_TERM_RATE
        + totals.gains_at_20_percent * LONG_TERM_LEGACY_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CapitalGainsIncome, IncomeSources};

    #[test]
    fn each_gain_at_its_rate() {
        let totals = IncomeSources::default()
            .with_capital_gains(CapitalGainsIncome {
                long_term_at_12_5_percent: dec!(25000),
                long_term_at_20_percent: dec!(5000),
            })
            .totals()
            .unwrap();
        assert_eq!(capital_gains_tax(&totals), dec!(4125));
    }

    #[test]
    fn no_gains_no_tax() {
        assert_eq!(capital_gains_tax(&IncomeTotals::default()), Decimal::ZERO);
    }
}
