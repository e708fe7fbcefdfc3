use super::error::TaxError;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A category of income made of non-negative components
pub trait IncomeRecord {
    /// Category name used in error messages (e.g. "salary")
    const CATEGORY: &'static str;

    /// Named components of the record
    fn components(&self) -> Vec<(&'static str, Decimal)>;

    fn total(&self) -> Decimal {
        self.components().into_iter().map(|(_, amount)| amount).sum()
    }

    /// Reject negative components, naming the first offending field
    fn validate(&self) -> Result<(), TaxError> {
        match self
            .components()
            .into_iter()
            .find(|(_, amount)| *amount < Decimal::ZERO)
        {
            Some((field, _)) => Err(TaxError::negative(format!("{}.{}", Self::CATEGORY, field))),
            None => Ok(()),
        }
    }
}

/// Salary income for the year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SalaryIncome {
    /// Basic salary plus dearness allowance
    #[schemars(with = "f64")]
    pub basic_and_da: Decimal,
    /// House rent allowance received
    #[schemars(with = "f64")]
    pub hra: Decimal,
    #[schemars(with = "f64")]
    pub other_allowances: Decimal,
    #[schemars(with = "f64")]
    pub bonus_and_commissions: Decimal,
}

impl IncomeRecord for SalaryIncome {
    const CATEGORY: &'static str = "salary";

    fn components(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("basic_and_da", self.basic_and_da),
            ("hra", self.hra),
            ("other_allowances", self.other_allowances),
            ("bonus_and_commissions", self.bonus_and_commissions),
        ]
    }
}

/// Business and house-property income for the year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BusinessIncome {
    #[schemars(with = "f64")]
    pub business_income: Decimal,
    #[schemars(with = "f64")]
    pub property_income: Decimal,
}

impl IncomeRecord for BusinessIncome {
    const CATEGORY: &'static str = "business";

    fn components(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("business_income", self.business_income),
            ("property_income", self.property_income),
        ]
    }
}

/// Income from other sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OtherIncome {
    #[schemars(with = "f64")]
    pub savings_account_interest: Decimal,
    #[schemars(with = "f64")]
    pub fixed_deposit_interest: Decimal,
    #[schemars(with = "f64")]
    pub other_sources: Decimal,
}

impl IncomeRecord for OtherIncome {
    const CATEGORY: &'static str = "other_income";

    fn components(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("savings_account_interest", self.savings_account_interest),
            ("fixed_deposit_interest", self.fixed_deposit_interest),
            ("other_sources", self.other_sources),
        ]
    }
}

/// Long-term capital gains, taxed at flat rates outside the slabs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CapitalGainsIncome {
    #[schemars(with = "f64")]
    pub long_term_at_12_5_percent: Decimal,
    #[schemars(with = "f64")]
    pub long_term_at_20_percent: Decimal,
}

impl IncomeRecord for CapitalGainsIncome {
    const CATEGORY: &'static str = "capital_gains";

    fn components(&self) -> Vec<(&'static str, Decimal)> {
        vec![
            ("long_term_at_12_5_percent", self.long_term_at_12_5_percent),
            ("long_term_at_20_percent", self.long_term_at_20_percent),
        ]
    }
}

/// The income records supplied by the caller; at least one must be present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IncomeSources {
    #[serde(default)]
    pub salary: Option<SalaryIncome>,
    #[serde(default)]
    pub business: Option<BusinessIncome>,
    #[serde(default)]
    pub other_income: Option<OtherIncome>,
    #[serde(default)]
    pub capital_gains: Option<CapitalGainsIncome>,
}

impl IncomeSources {
    pub fn salary(salary: SalaryIncome) -> Self {
        IncomeSources {
            salary: Some(salary),
            ..Default::default()
        }
    }

    pub fn with_business(mut self, business: BusinessIncome) -> Self {
        self.business = Some(business);
        self
    }

    pub fn with_other_income(mut self, other_income: OtherIncome) -> Self {
        self.other_income = Some(other_income);
        self
    }

    pub fn with_capital_gains(mut self, capital_gains: CapitalGainsIncome) -> Self {
        self.capital_gains = Some(capital_gains);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.salary.is_none()
            && self.business.is_none()
            && self.other_income.is_none()
            && self.capital_gains.is_none()
    }

    /// Validate every supplied record and collapse them into totals
    pub fn totals(&self) -> Result<IncomeTotals, TaxError> {
        if self.is_empty() {
            return Err(TaxError::invalid_input(
                "income",
                "at least one income source (salary, business, other_income or capital_gains) is required",
            ));
        }

        let salary = self.salary.clone().unwrap_or_default();
        let business = self.business.clone().unwrap_or_default();
        let other = self.other_income.clone().unwrap_or_default();
        let gains = self.capital_gains.clone().unwrap_or_default();
        salary.validate()?;
        business.validate()?;
        other.validate()?;
        gains.validate()?;

        Ok(IncomeTotals {
            salary: salary.total(),
            business: business.total(),
            other: other.total(),
            basic_and_da: salary.basic_and_da,
            hra_received: salary.hra,
            savings_interest: other.savings_account_interest,
            deposit_interest: other.fixed_deposit_interest,
            gains_at_12_5_percent: gains.long_term_at_12_5_percent,
            gains_at_20_percent: gains.long_term_at_20_percent,
        })
    }
}

/// Category totals plus the components that deduction limits refer to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncomeTotals {
    pub salary: Decimal,
    pub business: Decimal,
    pub other: Decimal,
    pub basic_and_da: Decimal,
    pub hra_received: Decimal,
    pub savings_interest: Decimal,
    pub deposit_interest: Decimal,
    pub gains_at_12_5_percent: Decimal,
    pub gains_at_20_percent: Decimal,
}

impl IncomeTotals {
    /// All income, capital gains included
    pub fn gross(&self) -> Decimal {
        self.slab_income() + self.capital_gains()
    }

    /// Income taxed at the slab rates
    pub fn slab_income(&self) -> Decimal {
        self.salary + self.business + self.other
    }

    pub fn capital_gains(&self) -> Decimal {
        self.gains_at_12_5_percent + self.gains_at_20_percent
    }

    /// Interest from savings accounts and deposits
    pub fn interest(&self) -> Decimal {
        self.savings_interest + self.deposit_interest
    }
}
