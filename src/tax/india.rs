//! Built-in slab tables and rules for supported financial years.
//!
//! Amounts are in rupees. Adding a year means adding a function here and
//! registering it; the calculators never branch on the year.

use super::rules::{RegimeRules, RuleRegistry, YearRules};
use crate::core::{AgeBand, FinancialYear, Rebate, Regime, SurchargeBrackets, TaxSlab};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CESS_RATE: Decimal = dec!(0.04);

pub fn register(registry: &mut RuleRegistry) {
    registry.register(fy_2024_25());
    registry.register(fy_2025_26());
}

/// FY 2024-25 (AY 2025-26)
fn fy_2024_25() -> YearRules {
    let new_slabs = TaxSlab::from_limits(
        &[
            (dec!(300000), dec!(0)),
            (dec!(700000), dec!(0.05)),
            (dec!(1000000), dec!(0.10)),
            (dec!(1200000), dec!(0.15)),
            (dec!(1500000), dec!(0.20)),
        ],
        dec!(0.30),
    );

    with_old_regime(YearRules::new(FinancialYear(2024), CESS_RATE))
        .with_slabs(Regime::New, AgeBand::General, new_slabs)
        .with_regime(
            Regime::New,
            RegimeRules {
                standard_deduction: dec!(75000),
                rebate: Some(Rebate {
                    income_limit: dec!(700000),
                    marginal_relief: true,
                }),
                surcharge: new_regime_surcharge(),
            },
        )
}

/// FY 2025-26 (AY 2026-27)
fn fy_2025_26() -> YearRules {
    let new_slabs = TaxSlab::from_limits(
        &[
            (dec!(400000), dec!(0)),
            (dec!(800000), dec!(0.05)),
            (dec!(1200000), dec!(0.10)),
            (dec!(1600000), dec!(0.15)),
            (dec!(2000000), dec!(0.20)),
            (dec!(2400000), dec!(0.25)),
        ],
        dec!(0.30),
    );

    with_old_regime(YearRules::new(FinancialYear(2025), CESS_RATE))
        .with_slabs(Regime::New, AgeBand::General, new_slabs)
        .with_regime(
            Regime::New,
            RegimeRules {
                standard_deduction: dec!(75000),
                rebate: Some(Rebate {
                    income_limit: dec!(1200000),
                    marginal_relief: true,
                }),
                surcharge: new_regime_surcharge(),
            },
        )
}

// The old regime has been unchanged since FY 2020-21.
fn with_old_regime(rules: YearRules) -> YearRules {
    rules
        .with_slabs(
            Regime::Old,
            AgeBand::General,
            TaxSlab::from_limits(
                &[
                    (dec!(250000), dec!(0)),
                    (dec!(500000), dec!(0.05)),
                    (dec!(1000000), dec!(0.20)),
                ],
                dec!(0.30),
            ),
        )
        .with_slabs(
            Regime::Old,
            AgeBand::Senior,
            TaxSlab::from_limits(
                &[
                    (dec!(300000), dec!(0)),
                    (dec!(500000), dec!(0.05)),
                    (dec!(1000000), dec!(0.20)),
                ],
                dec!(0.30),
            ),
        )
        .with_slabs(
            Regime::Old,
            AgeBand::SuperSenior,
            TaxSlab::from_limits(
                &[(dec!(500000), dec!(0)), (dec!(1000000), dec!(0.20))],
                dec!(0.30),
            ),
        )
        .with_regime(
            Regime::Old,
            RegimeRules {
                standard_deduction: dec!(50000),
                rebate: Some(Rebate {
                    income_limit: dec!(500000),
                    marginal_relief: false,
                }),
                surcharge: SurchargeBrackets::from_pairs(&[
                    (dec!(5000000), dec!(0.10)),
                    (dec!(10000000), dec!(0.15)),
                    (dec!(20000000), dec!(0.25)),
                    (dec!(50000000), dec!(0.37)),
                ]),
            },
        )
}

// Capped at 25% in the new regime.
fn new_regime_surcharge() -> SurchargeBrackets {
    SurchargeBrackets::from_pairs(&[
        (dec!(5000000), dec!(0.10)),
        (dec!(10000000), dec!(0.15)),
        (dec!(20000000), dec!(0.25)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::rules::SlabProvider;

    #[test]
    fn builtin_tables_are_well_formed() {
        let registry = RuleRegistry::builtin();
        for year in registry.years() {
            for regime in Regime::ALL {
                for band in [AgeBand::General, AgeBand::Senior, AgeBand::SuperSenior] {
                    assert!(registry.get_slabs(year, regime, band).is_ok());
                }
                assert!(registry.year_rules(year).unwrap().regime(regime).is_ok());
            }
        }
    }

    #[test]
    fn new_regime_top_surcharge_is_25_percent() {
        let rules = fy_2025_26();
        let new = rules.regime(Regime::New).unwrap();
        let old = rules.regime(Regime::Old).unwrap();
        assert_eq!(new.surcharge.brackets().last().unwrap().rate, dec!(0.25));
        assert_eq!(old.surcharge.brackets().last().unwrap().rate, dec!(0.37));
    }

    #[test]
    fn super_senior_exemption_limit() {
        let rules = fy_2025_26();
        let slabs = rules.slabs(Regime::Old, AgeBand::SuperSenior).unwrap();
        assert_eq!(slabs.slabs()[0].upper, Some(dec!(500000)));
        assert_eq!(slabs.slabs()[0].rate, dec!(0));
    }
}
