use chrono::{Datelike, Local, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Indian financial year (runs 1 April to 31 March)
/// The year value represents the start year (e.g., 2025 = 2025-26 financial year)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FinancialYear(pub i32);

impl FinancialYear {
    /// Financial year containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        if date.month() >= 4 {
            FinancialYear(date.year())
        } else {
            FinancialYear(date.year() - 1)
        }
    }

    /// Financial year containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// First day of the financial year (1 April)
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, 4, 1)
    }

    /// Last day of the financial year (31 March)
    pub fn end_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0 + 1, 3, 31)
    }

    /// Display as "2025-26" format
    pub fn display(&self) -> String {
        format!("{}-{:02}", self.0, (self.0 + 1).rem_euclid(100))
    }
}

impl std::fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Age band used to pick the old regime's slab table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    /// Below 60
    #[default]
    General,
    /// 60 to 79
    Senior,
    /// 80 and above
    SuperSenior,
}

impl AgeBand {
    pub fn from_age(age: u32) -> Self {
        match age {
            0..=59 => AgeBand::General,
            60..=79 => AgeBand::Senior,
            _ => AgeBand::SuperSenior,
        }
    }

    pub fn is_senior(&self) -> bool {
        !matches!(self, AgeBand::General)
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AgeBand::General => "below 60",
            AgeBand::Senior => "60-79",
            AgeBand::SuperSenior => "80+",
        };
        write!(f, "{}", label)
    }
}

/// Taxpayer profile for one computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TaxSettings {
    /// Age of the taxpayer at the end of the financial year
    pub age: u32,
    /// Start year of the financial year (e.g., 2025 for 2025-26)
    pub financial_year: FinancialYear,
    /// Lives in Delhi, Mumbai, Kolkata or Chennai (affects the HRA exemption)
    #[serde(default = "default_metro")]
    pub is_metro_resident: bool,
}

fn default_metro() -> bool {
    true
}

impl TaxSettings {
    pub fn new(age: u32, financial_year: i32) -> Self {
        TaxSettings {
            age,
            financial_year: FinancialYear(financial_year),
            is_metro_resident: true,
        }
    }

    pub fn metro_resident(mut self, is_metro_resident: bool) -> Self {
        self.is_metro_resident = is_metro_resident;
        self
    }

    pub fn age_band(&self) -> AgeBand {
        AgeBand::from_age(self.age)
    }
}
