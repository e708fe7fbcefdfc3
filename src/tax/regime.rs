//! Tax computation for a single regime

use super::capital_gains::capital_gains_tax;
use super::cess::{before_cess, cess};
use super::deduction::{admissible, AdmissibleDeductions};
use super::rules::SlabProvider;
use super::slab_tax::slab_tax;
use super::surcharge::surcharge;
use super::taxable::taxable_income;
use crate::core::{Deductions, IncomeTotals, Rebate, Regime, TaxError, TaxSettings, TaxSlab};
use rust_decimal::Decimal;
use serde::Serialize;

/// Liability under one regime
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeResult {
    pub regime: Regime,
    pub taxable_income: Decimal,
    /// Progressive tax before rebate
    pub slab_tax: Decimal,
    pub rebate: Decimal,
    pub rebate_applied: bool,
    pub surcharge: Decimal,
    /// Flat-rate tax on long-term capital gains
    pub capital_gains_tax: Decimal,
    pub cess: Decimal,
    pub total_tax: Decimal,
    pub deductions: AdmissibleDeductions,
}

/// Components of a regime's liability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxBreakup {
    pub slab_tax: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
}

impl RegimeResult {
    pub fn tax_after_rebate(&self) -> Decimal {
        self.slab_tax - self.rebate
    }

    pub fn breakup(&self) -> TaxBreakup {
        TaxBreakup {
            slab_tax: self.slab_tax,
            surcharge: self.surcharge,
            cess: self.cess,
        }
    }
}

/// Rebate on `tax`: all of it up to the income limit. Above the limit, with
/// marginal relief, the remaining tax plus its cess at `cess_rate` may not
/// exceed the income over the limit.
pub fn rebate(
    taxable_income: Decimal,
    tax: Decimal,
    rebate: Option<&Rebate>,
    cess_rate: Decimal,
) -> Decimal {
    match rebate {
        Some(r) if taxable_income <= r.income_limit => tax,
        Some(r) if r.marginal_relief => {
            let allowed = before_cess(taxable_income - r.income_limit, cess_rate);
            (tax - allowed).max(Decimal::ZERO)
        }
        _ => Decimal::ZERO,
    }
}

/// Runs the calculation pipeline for one regime
pub struct RegimeEngine<'a, P: SlabProvider + ?Sized> {
    provider: &'a P,
    settings: &'a TaxSettings,
}

impl<'a, P: SlabProvider + ?Sized> RegimeEngine<'a, P> {
    pub fn new(provider: &'a P, settings: &'a TaxSettings) -> Self {
        RegimeEngine { provider, settings }
    }

    /// Slab table this engine applies for `regime`
    pub fn slabs(&self, regime: Regime) -> Result<&'a TaxSlab, TaxError> {
        self.provider.get_slabs(
            self.settings.financial_year,
            regime,
            self.settings.age_band(),
        )
    }

    pub fn compute(
        &self,
        regime: Regime,
        totals: &IncomeTotals,
        deductions: &Deductions,
    ) -> Result<RegimeResult, TaxError> {
        let year = self.provider.year_rules(self.settings.financial_year)?;
        let rules = year.regime(regime)?;
        let slabs = self.slabs(regime)?;

        let deductions = admissible(regime, totals, deductions, self.settings, rules)?;
        let taxable_income = taxable_income(totals, &deductions);
        let slab_tax = slab_tax(taxable_income, slabs);
        let rebate = rebate(taxable_income, slab_tax, rules.rebate.as_ref(), year.cess_rate);
        let tax = slab_tax - rebate;
        let surcharge = surcharge(taxable_income, tax, &rules.surcharge, slabs, year.cess_rate);
        let capital_gains_tax = capital_gains_tax(totals);
        let cess = cess(tax + capital_gains_tax, surcharge, year.cess_rate);
        let total_tax = (tax + surcharge + capital_gains_tax + cess).max(Decimal::ZERO);

        log::debug!(
            "{} regime: taxable {}, slab tax {}, rebate {}, surcharge {}, capital gains tax {}, cess {}, total {}",
            regime,
            taxable_income,
            slab_tax,
            rebate,
            surcharge,
            capital_gains_tax,
            cess,
            total_tax
        );

        Ok(RegimeResult {
            regime,
            taxable_income,
            slab_tax,
            rebate,
            rebate_applied: rebate > Decimal::ZERO,
            surcharge,
            capital_gains_tax,
            cess,
            total_tax,
            deductions,
        })
    }
}
