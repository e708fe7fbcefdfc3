//! Reference scenarios for the full calculation (FY 2025-26, age 27, metro)

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use taxcalc::core::{CapitalGainsIncome, ErrorKind, OtherIncome, SalaryIncome, Warning};
use taxcalc::{Deductions, IncomeSources, IncomeTaxCalculator, Regime, ReportOptions, Section, TaxSettings};

fn settings() -> TaxSettings {
    TaxSettings::new(27, 2025)
}

fn salary(hra: Decimal) -> SalaryIncome {
    SalaryIncome {
        basic_and_da: dec!(900000),
        hra,
        other_allowances: dec!(200000),
        bonus_and_commissions: dec!(25000),
    }
}

#[test]
fn salary_only_without_hra() {
    let calc =
        IncomeTaxCalculator::new(settings(), IncomeSources::salary(salary(dec!(0))), None).unwrap();

    assert_eq!(calc.new_regime_tax().unwrap(), dec!(0));
    assert_eq!(calc.old_regime_tax().unwrap(), dec!(140400));
    assert_eq!(calc.recommended_regime().unwrap(), Regime::New);
    assert_eq!(calc.tax_savings().unwrap(), dec!(140400));
}

#[test]
fn hra_received_without_rent() {
    let calc =
        IncomeTaxCalculator::new(settings(), IncomeSources::salary(salary(dec!(500000))), None)
            .unwrap();

    assert_eq!(calc.new_regime_tax().unwrap(), dec!(117000));
    assert_eq!(calc.new_regime_breakup().unwrap().cess, dec!(4500));
    assert_eq!(calc.old_regime_tax().unwrap(), dec!(296400));
}

#[test]
fn hra_exemption_from_rent_paid() {
    let deductions = Deductions::new().with(Section::HraExemption, dec!(450000));
    let calc = IncomeTaxCalculator::new(
        settings(),
        IncomeSources::salary(salary(dec!(500000))),
        Some(deductions),
    )
    .unwrap();

    let old = calc.old_regime_breakup().unwrap();
    assert_eq!(old.surcharge, dec!(0));
    assert_eq!(old.cess, dec!(7080));
    assert_eq!(calc.old_regime_tax().unwrap(), dec!(184080));

    let new = calc.new_regime_breakup().unwrap();
    assert_eq!(new.surcharge, dec!(0));
    assert_eq!(new.cess, dec!(4500));
    assert_eq!(calc.new_regime_tax().unwrap(), dec!(117000));

    let report = calc
        .calculate_tax(ReportOptions {
            comparison: true,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(report.recommended_regime, Regime::New);
    assert_eq!(report.tax_savings, dec!(67080));
    assert_eq!(
        report.comparison.unwrap().summary,
        "New tax regime results in a savings of ₹67080 compared to the old regime"
    );
    assert_eq!(
        report.old_regime.deductions.get(Section::HraExemption),
        dec!(360000)
    );
    // not admissible in the new regime
    assert!(report
        .new_regime
        .deductions
        .warnings
        .contains(&Warning::NotAllowedInRegime {
            section: Section::HraExemption
        }));
}

#[test]
fn tax_per_slab_breakdown() {
    let sources = IncomeSources::salary(salary(dec!(500000)))
        .with_capital_gains(CapitalGainsIncome {
            long_term_at_12_5_percent: dec!(25000),
            long_term_at_20_percent: dec!(5000),
        })
        .with_other_income(OtherIncome {
            savings_account_interest: dec!(35000),
            fixed_deposit_interest: dec!(65000),
            ..Default::default()
        });
    let deductions = Deductions::new().with(Section::HraExemption, dec!(450000));
    let calc = IncomeTaxCalculator::new(settings(), sources, Some(deductions)).unwrap();

    assert_eq!(calc.new_regime_taxable_income().unwrap(), dec!(1650000));
    assert_eq!(calc.old_regime_taxable_income().unwrap(), dec!(1305000));

    let new: Vec<_> = calc
        .tax_per_slab(Regime::New)
        .unwrap()
        .into_iter()
        .map(|s| (s.lower, s.upper, s.tax))
        .collect();
    assert_eq!(
        new,
        vec![
            (dec!(0), Some(dec!(400000)), dec!(0)),
            (dec!(400000), Some(dec!(800000)), dec!(20000)),
            (dec!(800000), Some(dec!(1200000)), dec!(40000)),
            (dec!(1200000), Some(dec!(1600000)), dec!(60000)),
            (dec!(1600000), Some(dec!(2000000)), dec!(10000)),
        ]
    );

    let old: Vec<_> = calc
        .tax_per_slab(Regime::Old)
        .unwrap()
        .into_iter()
        .map(|s| (s.lower, s.taxable_amount, s.tax))
        .collect();
    assert_eq!(
        old,
        vec![
            (dec!(0), dec!(250000), dec!(0)),
            (dec!(250000), dec!(250000), dec!(12500)),
            (dec!(500000), dec!(500000), dec!(100000)),
            (dec!(1000000), dec!(305000), dec!(91500)),
        ]
    );

    let report = calc.calculate_tax(ReportOptions::full()).unwrap();
    // savings interest is deducted in the old regime without a claim
    assert_eq!(report.old_regime.deductions.get(Section::Section80TTA), dec!(10000));
    assert_eq!(report.income_summary.capital_gains, dec!(30000));
    assert_eq!(report.income_summary.gross_income, dec!(1755000));
    assert_eq!(report.new_regime.capital_gains_tax, dec!(4125));
    assert_eq!(report.new_regime.total_tax, dec!(139490));
    assert_eq!(report.old_regime.total_tax, dec!(216450));
    let per_slab = report.tax_per_slab.unwrap();
    assert_eq!(per_slab[&Regime::New].len(), 5);
    assert_eq!(per_slab[&Regime::Old].len(), 4);
}

fn on_basic(basic: Decimal) -> IncomeTaxCalculator<'static> {
    let sources = IncomeSources::salary(SalaryIncome {
        basic_and_da: basic,
        ..Default::default()
    });
    IncomeTaxCalculator::new(TaxSettings::new(50, 2025), sources, None).unwrap()
}

#[test]
fn crossing_a_threshold_costs_at_most_the_extra_income() {
    // old regime: taxable 50,00,000 -> 50,10,000 crosses the first surcharge threshold
    let at = on_basic(dec!(5050000));
    let above = on_basic(dec!(5060000));
    assert_eq!(at.old_regime_taxable_income().unwrap(), dec!(5000000));
    assert_eq!(at.old_regime_tax().unwrap(), dec!(1365000));
    assert_eq!(above.old_regime_tax().unwrap(), dec!(1374999.9952));

    // new regime: taxable 12,00,000 -> 12,10,000 leaves the rebate
    let at = on_basic(dec!(1275000));
    let above = on_basic(dec!(1285000));
    assert_eq!(at.new_regime_taxable_income().unwrap(), dec!(1200000));
    assert_eq!(at.new_regime_tax().unwrap(), dec!(0));
    assert_eq!(above.new_regime_tax().unwrap(), dec!(9999.9952));
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_total_tax_rises_no_faster_than_income(extra in 0u64..500_000) {
        let extra = Decimal::from(extra);

        let base = on_basic(dec!(1275000)).new_regime_tax().unwrap();
        let raised = on_basic(dec!(1275000) + extra).new_regime_tax().unwrap();
        prop_assert!(raised - base <= extra);

        let base = on_basic(dec!(5050000)).old_regime_tax().unwrap();
        let raised = on_basic(dec!(5050000) + extra).old_regime_tax().unwrap();
        prop_assert!(raised - base <= extra);
    }
}

#[test]
fn zero_income_all_zero() {
    let calc = IncomeTaxCalculator::new(
        TaxSettings::new(30, 2025).metro_resident(false),
        IncomeSources::salary(SalaryIncome::default()),
        None,
    )
    .unwrap();
    let report = calc.calculate_tax(ReportOptions::default()).unwrap();
    assert_eq!(report.new_regime.total_tax, dec!(0));
    assert_eq!(report.old_regime.total_tax, dec!(0));
    assert_eq!(report.recommended_regime, Regime::New);
    assert_eq!(report.income_summary.gross_income, dec!(0));
}

#[test]
fn regime_strings_parse_at_the_boundary() {
    assert_eq!(" Old ".parse::<Regime>().unwrap(), Regime::Old);
    let err = "flat".parse::<Regime>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRegime);
    assert!(err.to_string().contains("flat"));
}

#[test]
fn calculator_is_shareable_across_threads() {
    let calc =
        IncomeTaxCalculator::new(settings(), IncomeSources::salary(salary(dec!(0))), None).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| calc.old_regime_tax().unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), dec!(140400));
        }
    });
}
