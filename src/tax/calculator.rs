//! Regime comparison and report assembly

use super::regime::{RegimeEngine, RegimeResult, TaxBreakup};
use super::rules::{RuleRegistry, SlabProvider};
use super::slab_tax::{tax_per_slab, SlabTax};
use crate::core::{
    Deductions, FinancialYear, IncomeSources, IncomeTotals, Regime, TaxError, TaxSettings,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Which optional parts of the report to produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub comparison: bool,
    pub tax_per_slab: bool,
    /// Log the rendered report at info level
    pub display: bool,
}

impl ReportOptions {
    pub fn full() -> Self {
        ReportOptions {
            comparison: true,
            tax_per_slab: true,
            display: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IncomeSummary {
    pub gross_income: Decimal,
    pub salary: Decimal,
    pub business: Decimal,
    pub other: Decimal,
    pub capital_gains: Decimal,
}

impl From<&IncomeTotals> for IncomeSummary {
    fn from(totals: &IncomeTotals) -> Self {
        IncomeSummary {
            gross_income: totals.gross(),
            salary: totals.salary,
            business: totals.business,
            other: totals.other,
            capital_gains: totals.capital_gains(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub financial_year: FinancialYear,
    pub income_summary: IncomeSummary,
    pub new_regime: RegimeResult,
    pub old_regime: RegimeResult,
    pub recommended_regime: Regime,
    pub tax_savings: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_per_slab: Option<BTreeMap<Regime, Vec<SlabTax>>>,
}

impl Report {
    pub fn result(&self, regime: Regime) -> &RegimeResult {
        match regime {
            Regime::New => &self.new_regime,
            Regime::Old => &self.old_regime,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Income tax for FY {}", self.financial_year.display())?;
        writeln!(f, "  Gross income: {}", self.income_summary.gross_income)?;
        for regime in Regime::ALL {
            let result = self.result(regime);
            writeln!(
                f,
                "  {} regime: taxable {}, slab tax {}, rebate {}, surcharge {}, capital gains tax {}, cess {}, total {}",
                regime,
                result.taxable_income,
                result.slab_tax,
                result.rebate,
                result.surcharge,
                result.capital_gains_tax,
                result.cess,
                result.total_tax
            )?;
        }
        write!(
            f,
            "  Recommended: {} regime (savings {})",
            self.recommended_regime, self.tax_savings
        )?;
        if let Some(comparison) = &self.comparison {
            write!(f, "\n  {}", comparison.summary)?;
        }
        Ok(())
    }
}

/// Computes and compares the liability under both regimes.
///
/// Results are computed on first access and cached; later calls return the
/// same values without recomputing.
pub struct IncomeTaxCalculator<'p, P: SlabProvider + ?Sized = RuleRegistry> {
    settings: TaxSettings,
    sources: IncomeSources,
    deductions: Deductions,
    totals: IncomeTotals,
    provider: &'p P,
    results: OnceLock<Result<(RegimeResult, RegimeResult), TaxError>>,
}

impl IncomeTaxCalculator<'static, RuleRegistry> {
    /// Calculator backed by the built-in tax tables
    pub fn new(
        settings: TaxSettings,
        sources: IncomeSources,
        deductions: Option<Deductions>,
    ) -> Result<Self, TaxError> {
        Self::with_provider(settings, sources, deductions, RuleRegistry::builtin())
    }
}

impl<'p, P: SlabProvider + ?Sized> IncomeTaxCalculator<'p, P> {
    pub fn with_provider(
        settings: TaxSettings,
        sources: IncomeSources,
        deductions: Option<Deductions>,
        provider: &'p P,
    ) -> Result<Self, TaxError> {
        let totals = sources.totals()?;
        let deductions = deductions.unwrap_or_default();
        deductions.validate()?;
        Ok(IncomeTaxCalculator {
            settings,
            sources,
            deductions,
            totals,
            provider,
            results: OnceLock::new(),
        })
    }

    pub fn settings(&self) -> &TaxSettings {
        &self.settings
    }

    pub fn sources(&self) -> &IncomeSources {
        &self.sources
    }

    pub fn deductions(&self) -> &Deductions {
        &self.deductions
    }

    pub fn income_summary(&self) -> IncomeSummary {
        IncomeSummary::from(&self.totals)
    }

    fn engine(&self) -> RegimeEngine<'_, P> {
        RegimeEngine::new(self.provider, &self.settings)
    }

    fn results(&self) -> Result<&(RegimeResult, RegimeResult), TaxError> {
        self.results
            .get_or_init(|| {
                log::debug!(
                    "Computing tax for FY {} (age {})",
                    self.settings.financial_year.display(),
                    self.settings.age
                );
                let engine = self.engine();
                let new = engine.compute(Regime::New, &self.totals, &self.deductions)?;
                let old = engine.compute(Regime::Old, &self.totals, &self.deductions)?;
                Ok((new, old))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn result(&self, regime: Regime) -> Result<&RegimeResult, TaxError> {
        let (new, old) = self.results()?;
        Ok(match regime {
            Regime::New => new,
            Regime::Old => old,
        })
    }

    pub fn new_regime_tax(&self) -> Result<Decimal, TaxError> {
        Ok(self.result(Regime::New)?.total_tax)
    }

    pub fn old_regime_tax(&self) -> Result<Decimal, TaxError> {
        Ok(self.result(Regime::Old)?.total_tax)
    }

    pub fn new_regime_taxable_income(&self) -> Result<Decimal, TaxError> {
        Ok(self.result(Regime::New)?.taxable_income)
    }

    pub fn old_regime_taxable_income(&self) -> Result<Decimal, TaxError> {
        Ok(self.result(Regime::Old)?.taxable_income)
    }

    pub fn new_regime_breakup(&self) -> Result<TaxBreakup, TaxError> {
        Ok(self.result(Regime::New)?.breakup())
    }

    pub fn old_regime_breakup(&self) -> Result<TaxBreakup, TaxError> {
        Ok(self.result(Regime::Old)?.breakup())
    }

    /// Regime with the strictly lower total, the new regime on a tie
    pub fn recommended_regime(&self) -> Result<Regime, TaxError> {
        if self.old_regime_tax()? < self.new_regime_tax()? {
            Ok(Regime::Old)
        } else {
            Ok(Regime::New)
        }
    }

    pub fn tax_savings(&self) -> Result<Decimal, TaxError> {
        Ok((self.old_regime_tax()? - self.new_regime_tax()?).abs())
    }

    /// Contribution of each slab to the regime's tax
    pub fn tax_per_slab(&self, regime: Regime) -> Result<Vec<SlabTax>, TaxError> {
        let slabs = self.engine().slabs(regime)?;
        let taxable_income = self.result(regime)?.taxable_income;
        Ok(tax_per_slab(taxable_income, slabs))
    }

    pub fn calculate_tax(&self, options: ReportOptions) -> Result<Report, TaxError> {
        let recommended_regime = self.recommended_regime()?;
        let tax_savings = self.tax_savings()?;

        let comparison = options.comparison.then(|| Comparison {
            summary: format!(
                "{} tax regime results in a savings of ₹{} compared to the {} regime",
                capitalize(recommended_regime.as_str()),
                tax_savings.round_dp(2).normalize(),
                recommended_regime.other()
            ),
        });

        let tax_per_slab = if options.tax_per_slab {
            let mut per_slab = BTreeMap::new();
            for regime in Regime::ALL {
                per_slab.insert(regime, self.tax_per_slab(regime)?);
            }
            Some(per_slab)
        } else {
            None
        };

        let report = Report {
            financial_year: self.settings.financial_year,
            income_summary: self.income_summary(),
            new_regime: self.result(Regime::New)?.clone(),
            old_regime: self.result(Regime::Old)?.clone(),
            recommended_regime,
            tax_savings,
            comparison,
            tax_per_slab,
        };

        if options.display {
            log::info!("{}", report);
        }
        Ok(report)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
