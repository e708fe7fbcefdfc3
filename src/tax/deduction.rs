//! Deduction eligibility and caps per regime

use super::rules::RegimeRules;
use crate::core::{
    Deductions, IncomeBase, IncomeTotals, Regime, Section, TaxError, TaxSettings, Warning,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::collections::BTreeMap;

/// Deductions allowed under one regime, after caps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdmissibleDeductions {
    pub amounts: BTreeMap<Section, Decimal>,
    /// Claims that were dropped or reduced
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl AdmissibleDeductions {
    pub fn total(&self) -> Decimal {
        self.amounts.values().copied().sum()
    }

    pub fn get(&self, section: Section) -> Decimal {
        self.amounts.get(&section).copied().unwrap_or_default()
    }

    fn allow(&mut self, section: Section, amount: Decimal) {
        if amount > Decimal::ZERO {
            self.amounts.insert(section, amount);
        }
    }
}

/// Work out which claims are admissible under `regime` and by how much.
///
/// The standard deduction always comes from the year's rules. Under the new
/// regime, claims for sections it does not recognise are dropped without
/// error. Under the old regime each claim is limited by its statutory cap and
/// by the income it offsets, and the interest deduction for the taxpayer's age
/// (80TTA or 80TTB) applies to interest income even when nothing is claimed.
pub fn admissible(
    regime: Regime,
    totals: &IncomeTotals,
    deductions: &Deductions,
    settings: &TaxSettings,
    rules: &RegimeRules,
) -> Result<AdmissibleDeductions, TaxError> {
    deductions.validate()?;

    let mut admissible = AdmissibleDeductions::default();

    let standard = rules.standard_deduction.min(totals.salary);
    admissible.allow(Section::StandardDeduction, standard);
    if deductions.get(Section::StandardDeduction) > Decimal::ZERO {
        admissible.warnings.push(Warning::Overridden {
            section: Section::StandardDeduction,
        });
    }

    // salary left for salary-linked exemptions once the standard deduction is taken
    let mut salary_room = totals.salary - standard;
    let band = settings.age_band();

    for (section, claimed) in deductions.iter() {
        if section == Section::StandardDeduction || claimed.is_zero() {
            continue;
        }

        let rule = section.rule();
        if !rule.allowed_in(regime) {
            log::debug!("{} excluded from {} regime", section, regime);
            admissible
                .warnings
                .push(Warning::NotAllowedInRegime { section });
            continue;
        }
        if !rule.age.allows(band) {
            log::debug!("{} excluded for age band {}", section, band);
            admissible.warnings.push(Warning::NotAllowedForAge { section });
            continue;
        }
        if section == Section::Section80GG && totals.hra_received > Decimal::ZERO {
            admissible.warnings.push(Warning::NotApplicable {
                section,
                reason: "HRA is received",
            });
            continue;
        }

        let mut allowed = match section {
            Section::HraExemption => hra_exemption(claimed, totals, settings.is_metro_resident),
            _ => claimed * rule.share,
        };
        if let Some(cap) = rule.cap_for(regime, totals.basic_and_da) {
            allowed = allowed.min(cap);
        }
        if let Some(base) = rule.offsets {
            let limit = match base {
                IncomeBase::Salary => salary_room,
                IncomeBase::SavingsInterest => totals.savings_interest,
                IncomeBase::Interest => totals.interest(),
            };
            allowed = allowed.min(limit).max(Decimal::ZERO);
            if base == IncomeBase::Salary {
                salary_room -= allowed;
            }
        }

        if allowed != claimed {
            log::debug!("{} claimed {}, allowed {}", section, claimed, allowed);
            admissible.warnings.push(Warning::Capped {
                section,
                claimed,
                allowed,
            });
        }
        admissible.allow(section, allowed);
    }

    for section in [Section::Section80TTA, Section::Section80TTB] {
        let rule = section.rule();
        if deductions.get(section) > Decimal::ZERO
            || !rule.allowed_in(regime)
            || !rule.age.allows(band)
        {
            continue;
        }
        let interest = match rule.offsets {
            Some(IncomeBase::SavingsInterest) => totals.savings_interest,
            Some(IncomeBase::Interest) => totals.interest(),
            _ => continue,
        };
        let allowed = rule
            .cap_for(regime, totals.basic_and_da)
            .map_or(interest, |cap| interest.min(cap));
        if allowed > Decimal::ZERO {
            log::debug!("{} applied to interest income: {}", section, allowed);
            admissible.allow(section, allowed);
        }
    }

    Ok(admissible)
}

/// Exempt part of HRA given the annual rent paid: the least of the HRA
/// received, rent in excess of 10% of basic pay, and 50% (metro) or 40% of
/// basic pay.
pub fn hra_exemption(rent_paid: Decimal, totals: &IncomeTotals, is_metro_resident: bool) -> Decimal {
    let basic = totals.basic_and_da;
    let excess_rent = (rent_paid - basic * dec!(0.10)).max(Decimal::ZERO);
    let basic_share = if is_metro_resident {
        basic * dec!(0.50)
    } else {
        basic * dec!(0.40)
    };
    totals.hra_received.min(excess_rent).min(basic_share)
}
