use super::error::TaxError;
use super::regime::Regime;
use super::settings::AgeBand;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Deduction or exemption identified by its section of the Income Tax Act
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Section {
    /// Filled in from the year's rules, never taken from a claim
    #[serde(rename = "standard_deduction")]
    StandardDeduction,
    #[serde(rename = "section_80c")]
    Section80C,
    #[serde(rename = "section_80d")]
    Section80D,
    #[serde(rename = "section_80gg")]
    Section80GG,
    #[serde(rename = "section_80dd")]
    Section80DD,
    #[serde(rename = "section_80ddb")]
    Section80DDB,
    #[serde(rename = "section_24b")]
    Section24B,
    #[serde(rename = "section_80ccd_1b")]
    Section80CCD1B,
    #[serde(rename = "section_80ccd_2")]
    Section80CCD2,
    #[serde(rename = "section_80eea")]
    Section80EEA,
    #[serde(rename = "section_80u")]
    Section80U,
    #[serde(rename = "section_80eeb")]
    Section80EEB,
    #[serde(rename = "section_80e")]
    Section80E,
    #[serde(rename = "section_80g_50percent")]
    Section80G50,
    #[serde(rename = "section_80g_100percent")]
    Section80G100,
    #[serde(rename = "section_80gga")]
    Section80GGA,
    #[serde(rename = "section_80ggc")]
    Section80GGC,
    #[serde(rename = "section_80tta")]
    Section80TTA,
    #[serde(rename = "section_80ttb")]
    Section80TTB,
    /// Claimed amount is the annual rent paid; the exempt part is derived from salary
    #[serde(rename = "hra_exemption")]
    HraExemption,
    #[serde(rename = "professional_tax")]
    ProfessionalTax,
    #[serde(rename = "food_coupons")]
    FoodCoupons,
    #[serde(rename = "other_exemption")]
    OtherExemption,
}

/// Statutory ceiling on a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Unlimited,
    Fixed(Decimal),
    /// Share of basic pay, which differs per regime
    BasicShare { old: Decimal, new: Decimal },
}

/// Income a deduction may not exceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeBase {
    Salary,
    SavingsInterest,
    /// Savings plus deposit interest
    Interest,
}

/// Which taxpayers a section is open to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeLimit {
    Any,
    BelowSixty,
    SixtyAndAbove,
}

impl AgeLimit {
    pub fn allows(&self, band: AgeBand) -> bool {
        match self {
            AgeLimit::Any => true,
            AgeLimit::BelowSixty => !band.is_senior(),
            AgeLimit::SixtyAndAbove => band.is_senior(),
        }
    }
}

/// Eligibility and limits for one section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionRule {
    pub cap: Cap,
    /// Also admissible under the new regime
    pub new_regime: bool,
    /// Fraction of the claim that qualifies before the cap applies
    pub share: Decimal,
    pub offsets: Option<IncomeBase>,
    pub age: AgeLimit,
}

impl SectionRule {
    fn old_only(cap: Cap) -> Self {
        SectionRule {
            cap,
            new_regime: false,
            share: Decimal::ONE,
            offsets: None,
            age: AgeLimit::Any,
        }
    }

    fn offsets(mut self, base: IncomeBase) -> Self {
        self.offsets = Some(base);
        self
    }

    fn age(mut self, age: AgeLimit) -> Self {
        self.age = age;
        self
    }

    /// Ceiling for this rule under a regime, given basic pay
    pub fn cap_for(&self, regime: Regime, basic_and_da: Decimal) -> Option<Decimal> {
        match self.cap {
            Cap::Unlimited => None,
            Cap::Fixed(amount) => Some(amount),
            Cap::BasicShare { old, new } => Some(match regime {
                Regime::Old => basic_and_da * old,
                Regime::New => basic_and_da * new,
            }),
        }
    }

    pub fn allowed_in(&self, regime: Regime) -> bool {
        match regime {
            Regime::Old => true,
            Regime::New => self.new_regime,
        }
    }
}

impl Section {
    pub const ALL: [Section; 23] = [
        Section::StandardDeduction,
        Section::Section80C,
        Section::Section80D,
        Section::Section80GG,
        Section::Section80DD,
        Section::Section80DDB,
        Section::Section24B,
        Section::Section80CCD1B,
        Section::Section80CCD2,
        Section::Section80EEA,
        Section::Section80U,
        Section::Section80EEB,
        Section::Section80E,
        Section::Section80G50,
        Section::Section80G100,
        Section::Section80GGA,
        Section::Section80GGC,
        Section::Section80TTA,
        Section::Section80TTB,
        Section::HraExemption,
        Section::ProfessionalTax,
        Section::FoodCoupons,
        Section::OtherExemption,
    ];

    pub fn rule(&self) -> SectionRule {
        use Cap::*;
        match self {
            Section::StandardDeduction => SectionRule {
                new_regime: true,
                ..SectionRule::old_only(Unlimited).offsets(IncomeBase::Salary)
            },
            Section::Section80C => SectionRule::old_only(Fixed(dec!(150000))),
            Section::Section80D => SectionRule::old_only(Fixed(dec!(100000))),
            Section::Section80GG => SectionRule::old_only(Fixed(dec!(60000))),
            Section::Section80DD => SectionRule::old_only(Fixed(dec!(125000))),
            Section::Section80DDB => SectionRule::old_only(Fixed(dec!(100000))),
            Section::Section24B => SectionRule::old_only(Fixed(dec!(200000))),
            Section::Section80CCD1B => SectionRule::old_only(Fixed(dec!(50000))),
            Section::Section80CCD2 => SectionRule {
                new_regime: true,
                ..SectionRule::old_only(BasicShare {
                    old: dec!(0.10),
                    new: dec!(0.14),
                })
            },
            Section::Section80EEA => SectionRule::old_only(Fixed(dec!(150000))),
            Section::Section80U => SectionRule::old_only(Fixed(dec!(125000))),
            Section::Section80EEB => SectionRule::old_only(Fixed(dec!(150000))),
            Section::Section80E => SectionRule::old_only(Unlimited),
            Section::Section80G50 => SectionRule {
                share: dec!(0.5),
                ..SectionRule::old_only(Unlimited)
            },
            Section::Section80G100 => SectionRule::old_only(Unlimited),
            Section::Section80GGA => SectionRule::old_only(Unlimited),
            Section::Section80GGC => SectionRule::old_only(Unlimited),
            Section::Section80TTA => SectionRule::old_only(Fixed(dec!(10000)))
                .offsets(IncomeBase::SavingsInterest)
                .age(AgeLimit::BelowSixty),
            Section::Section80TTB => SectionRule::old_only(Fixed(dec!(50000)))
                .offsets(IncomeBase::Interest)
                .age(AgeLimit::SixtyAndAbove),
            Section::HraExemption => SectionRule::old_only(Unlimited).offsets(IncomeBase::Salary),
            Section::ProfessionalTax => {
                SectionRule::old_only(Fixed(dec!(2500))).offsets(IncomeBase::Salary)
            }
            Section::FoodCoupons => {
                SectionRule::old_only(Fixed(dec!(26000))).offsets(IncomeBase::Salary)
            }
            Section::OtherExemption => SectionRule::old_only(Unlimited),
        }
    }

    /// Identifier used in input documents
    pub fn key(&self) -> &'static str {
        match self {
            Section::StandardDeduction => "standard_deduction",
            Section::Section80C => "section_80c",
            Section::Section80D => "section_80d",
            Section::Section80GG => "section_80gg",
            Section::Section80DD => "section_80dd",
            Section::Section80DDB => "section_80ddb",
            Section::Section24B => "section_24b",
            Section::Section80CCD1B => "section_80ccd_1b",
            Section::Section80CCD2 => "section_80ccd_2",
            Section::Section80EEA => "section_80eea",
            Section::Section80U => "section_80u",
            Section::Section80EEB => "section_80eeb",
            Section::Section80E => "section_80e",
            Section::Section80G50 => "section_80g_50percent",
            Section::Section80G100 => "section_80g_100percent",
            Section::Section80GGA => "section_80gga",
            Section::Section80GGC => "section_80ggc",
            Section::Section80TTA => "section_80tta",
            Section::Section80TTB => "section_80ttb",
            Section::HraExemption => "hra_exemption",
            Section::ProfessionalTax => "professional_tax",
            Section::FoodCoupons => "food_coupons",
            Section::OtherExemption => "other_exemption",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Section::StandardDeduction => "Standard deduction on salary (set by the year's rules)",
            Section::Section80C => "PF, PPF, ELSS, life insurance premiums, tuition fees",
            Section::Section80D => "Health insurance premiums",
            Section::Section80GG => "Rent paid when no HRA is received",
            Section::Section80DD => "Maintenance of a disabled dependant",
            Section::Section80DDB => "Treatment of specified diseases",
            Section::Section24B => "Interest on home loan",
            Section::Section80CCD1B => "Additional NPS contribution",
            Section::Section80CCD2 => "Employer NPS contribution",
            Section::Section80EEA => "Interest on loan for affordable housing",
            Section::Section80U => "Taxpayer with a disability",
            Section::Section80EEB => "Interest on electric vehicle loan",
            Section::Section80E => "Interest on education loan",
            Section::Section80G50 => "Donations qualifying at 50%",
            Section::Section80G100 => "Donations qualifying at 100%",
            Section::Section80GGA => "Donations for scientific research",
            Section::Section80GGC => "Contributions to political parties",
            Section::Section80TTA => "Savings account interest (below 60)",
            Section::Section80TTB => "Deposit interest (60 and above)",
            Section::HraExemption => "Annual rent paid, used to derive the HRA exemption",
            Section::ProfessionalTax => "Professional tax paid",
            Section::FoodCoupons => "Meal vouchers",
            Section::OtherExemption => "Other exempt allowances",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Claimed deduction amounts keyed by section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Deductions {
    #[schemars(with = "BTreeMap<String, f64>")]
    claims: BTreeMap<Section, Decimal>,
}

impl Deductions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, section: Section, amount: Decimal) -> Self {
        self.claim(section, amount);
        self
    }

    /// Record a claim, adding to any earlier claim under the same section
    pub fn claim(&mut self, section: Section, amount: Decimal) {
        *self.claims.entry(section).or_insert(Decimal::ZERO) += amount;
    }

    pub fn get(&self, section: Section) -> Decimal {
        self.claims.get(&section).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, Decimal)> + '_ {
        self.claims.iter().map(|(section, amount)| (*section, *amount))
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Sum of the raw claims, before any regime filtering or caps
    pub fn claimed_total(&self) -> Decimal {
        self.claims.values().copied().sum()
    }

    pub fn validate(&self) -> Result<(), TaxError> {
        match self.iter().find(|(_, amount)| *amount < Decimal::ZERO) {
            Some((section, _)) => Err(TaxError::negative(format!("deductions.{}", section))),
            None => Ok(()),
        }
    }
}

impl FromIterator<(Section, Decimal)> for Deductions {
    fn from_iter<I: IntoIterator<Item = (Section, Decimal)>>(iter: I) -> Self {
        let mut deductions = Deductions::new();
        for (section, amount) in iter {
            deductions.claim(section, amount);
        }
        deductions
    }
}
