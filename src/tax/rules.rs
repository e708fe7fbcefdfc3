//! Per-year tax rules and the lookup service that serves them

use crate::core::{
    AgeBand, FinancialYear, Rebate, Regime, SurchargeBrackets, TaxError, TaxSlab,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Rules that differ between the two regimes of a year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeRules {
    /// Standard deduction on salary income
    pub standard_deduction: Decimal,
    pub rebate: Option<Rebate>,
    pub surcharge: SurchargeBrackets,
}

impl RegimeRules {
    /// Surcharge brackets must be ordered, and a rebate must stop short of the
    /// lowest surcharge threshold.
    pub fn validate(&self) -> Result<(), String> {
        self.surcharge.validate()?;
        if let (Some(rebate), Some(lowest)) = (&self.rebate, self.surcharge.brackets().first()) {
            if rebate.income_limit >= lowest.threshold {
                return Err(format!(
                    "rebate limit {} is not below the lowest surcharge threshold {}",
                    rebate.income_limit, lowest.threshold
                ));
            }
        }
        Ok(())
    }
}

/// Everything needed to compute tax for one financial year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRules {
    pub year: FinancialYear,
    /// Health and education cess on tax plus surcharge
    pub cess_rate: Decimal,
    regimes: BTreeMap<Regime, RegimeRules>,
    slabs: BTreeMap<(Regime, AgeBand), TaxSlab>,
}

impl YearRules {
    pub fn new(year: FinancialYear, cess_rate: Decimal) -> Self {
        YearRules {
            year,
            cess_rate,
            regimes: BTreeMap::new(),
            slabs: BTreeMap::new(),
        }
    }

    pub fn with_regime(mut self, regime: Regime, rules: RegimeRules) -> Self {
        self.regimes.insert(regime, rules);
        self
    }

    /// Register a slab table. New regime tables are stored once, for every age.
    pub fn with_slabs(mut self, regime: Regime, band: AgeBand, slabs: TaxSlab) -> Self {
        self.slabs.insert((regime, slab_band(regime, band)), slabs);
        self
    }

    /// Validated slab table for a regime and age band
    pub fn slabs(&self, regime: Regime, band: AgeBand) -> Result<&TaxSlab, TaxError> {
        let slabs = self
            .slabs
            .get(&(regime, slab_band(regime, band)))
            .ok_or_else(|| self.config_error(regime, format!("no slab table for age {}", band)))?;
        slabs
            .validate()
            .map_err(|reason| self.config_error(regime, reason))?;
        Ok(slabs)
    }

    /// Validated regime rules
    pub fn regime(&self, regime: Regime) -> Result<&RegimeRules, TaxError> {
        let rules = self
            .regimes
            .get(&regime)
            .ok_or_else(|| self.config_error(regime, "no rules registered for regime"))?;
        rules
            .validate()
            .map_err(|reason| self.config_error(regime, reason))?;
        Ok(rules)
    }

    fn config_error(&self, regime: Regime, reason: impl Into<String>) -> TaxError {
        TaxError::Configuration {
            year: self.year,
            regime,
            reason: reason.into(),
        }
    }
}

fn slab_band(regime: Regime, band: AgeBand) -> AgeBand {
    match regime {
        Regime::New => AgeBand::General,
        Regime::Old => band,
    }
}

/// Lookup service for slab tables and per-year rules
pub trait SlabProvider {
    fn year_rules(&self, year: FinancialYear) -> Result<&YearRules, TaxError>;

    fn get_slabs(
        &self,
        year: FinancialYear,
        regime: Regime,
        band: AgeBand,
    ) -> Result<&TaxSlab, TaxError> {
        self.year_rules(year)?.slabs(regime, band)
    }
}

/// In-memory registry of year rules
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    years: BTreeMap<FinancialYear, YearRules>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry holding the built-in Indian tables
    pub fn builtin() -> &'static RuleRegistry {
        static BUILTIN: OnceLock<RuleRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut registry = RuleRegistry::new();
            super::india::register(&mut registry);
            registry
        })
    }

    /// Add or replace the rules for a year
    pub fn register(&mut self, rules: YearRules) {
        log::debug!("Registering tax rules for {}", rules.year);
        self.years.insert(rules.year, rules);
    }

    pub fn years(&self) -> impl Iterator<Item = FinancialYear> + '_ {
        self.years.keys().copied()
    }
}

impl SlabProvider for RuleRegistry {
    fn year_rules(&self, year: FinancialYear) -> Result<&YearRules, TaxError> {
        self.years
            .get(&year)
            .ok_or(TaxError::UnsupportedYear { year })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorKind, Slab};
    use rust_decimal_macros::dec;

    fn flat(rate: Decimal) -> TaxSlab {
        TaxSlab::from_limits(&[], rate)
    }

    fn regime_rules() -> RegimeRules {
        RegimeRules {
            standard_deduction: dec!(50000),
            rebate: None,
            surcharge: SurchargeBrackets::default(),
        }
    }

    #[test]
    fn unregistered_year_is_unsupported() {
        let registry = RuleRegistry::new();
        let err = registry
            .get_slabs(FinancialYear(2030), Regime::New, AgeBand::General)
            .unwrap_err();
        assert_eq!(
            err,
            TaxError::UnsupportedYear {
                year: FinancialYear(2030)
            }
        );
    }

    #[test]
    fn new_regime_ignores_age_band() {
        let mut registry = RuleRegistry::new();
        registry.register(
            YearRules::new(FinancialYear(2030), dec!(0.04)).with_slabs(
                Regime::New,
                AgeBand::Senior,
                flat(dec!(0.1)),
            ),
        );
        for band in [AgeBand::General, AgeBand::Senior, AgeBand::SuperSenior] {
            let slabs = registry
                .get_slabs(FinancialYear(2030), Regime::New, band)
                .unwrap();
            assert_eq!(slabs, &flat(dec!(0.1)));
        }
    }

    #[test]
    fn old_regime_slabs_keyed_by_age_band() {
        let mut registry = RuleRegistry::new();
        registry.register(
            YearRules::new(FinancialYear(2030), dec!(0.04))
                .with_slabs(Regime::Old, AgeBand::General, flat(dec!(0.1)))
                .with_slabs(Regime::Old, AgeBand::Senior, flat(dec!(0.05))),
        );
        let senior = registry
            .get_slabs(FinancialYear(2030), Regime::Old, AgeBand::Senior)
            .unwrap();
        assert_eq!(senior, &flat(dec!(0.05)));

        let err = registry
            .get_slabs(FinancialYear(2030), Regime::Old, AgeBand::SuperSenior)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn malformed_table_reported_at_lookup() {
        let broken = TaxSlab::new(vec![Slab {
            lower: dec!(100),
            upper: None,
            rate: dec!(0.1),
        }]);
        let mut registry = RuleRegistry::new();
        registry.register(
            YearRules::new(FinancialYear(2030), dec!(0.04)).with_slabs(
                Regime::Old,
                AgeBand::General,
                broken,
            ),
        );
        let err = registry
            .get_slabs(FinancialYear(2030), Regime::Old, AgeBand::General)
            .unwrap_err();
        assert_eq!(
            err,
            TaxError::Configuration {
                year: FinancialYear(2030),
                regime: Regime::Old,
                reason: "first slab starts at 100 instead of 0".to_string(),
            }
        );
    }

    #[test]
    fn malformed_surcharge_reported_at_lookup() {
        let mut rules = regime_rules();
        rules.surcharge =
            SurchargeBrackets::from_pairs(&[(dec!(100), dec!(0.2)), (dec!(200), dec!(0.1))]);
        let year = YearRules::new(FinancialYear(2030), dec!(0.04)).with_regime(Regime::Old, rules);
        assert_eq!(
            year.regime(Regime::Old).unwrap_err().kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            year.regime(Regime::New).unwrap_err().kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn rebate_reaching_surcharge_threshold_rejected() {
        let mut rules = regime_rules();
        rules.surcharge = SurchargeBrackets::from_pairs(&[(dec!(5000000), dec!(0.10))]);
        rules.rebate = Some(Rebate {
            income_limit: dec!(5000000),
            marginal_relief: true,
        });
        let year = YearRules::new(FinancialYear(2030), dec!(0.04)).with_regime(Regime::New, rules);
        assert_eq!(
            year.regime(Regime::New).unwrap_err(),
            TaxError::Configuration {
                year: FinancialYear(2030),
                regime: Regime::New,
                reason: "rebate limit 5000000 is not below the lowest surcharge threshold 5000000"
                    .to_string(),
            }
        );
    }

    #[test]
    fn builtin_rules_validate() {
        let registry = RuleRegistry::builtin();
        for year in registry.years() {
            let rules = registry.year_rules(year).unwrap();
            for regime in Regime::ALL {
                assert!(rules.regime(regime).is_ok(), "{} {}", year, regime);
            }
        }
    }

    #[test]
    fn builtin_registry_has_current_years() {
        let years: Vec<_> = RuleRegistry::builtin().years().collect();
        assert!(years.contains(&FinancialYear(2024)));
        assert!(years.contains(&FinancialYear(2025)));
    }
}
