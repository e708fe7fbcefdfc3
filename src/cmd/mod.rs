pub mod calculate;
pub mod schema;
pub mod slabs;

use anyhow::Context;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use taxcalc::core::{
    BusinessIncome, CapitalGainsIncome, Deductions, FinancialYear, IncomeSources, OtherIncome,
    Regime, SalaryIncome, TaxSettings,
};

/// Input document for the `calculate` command
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TaxInput {
    pub settings: InputSettings,
    #[serde(default)]
    pub salary: Option<SalaryIncome>,
    #[serde(default)]
    pub business: Option<BusinessIncome>,
    #[serde(default)]
    pub other_income: Option<OtherIncome>,
    #[serde(default)]
    pub capital_gains: Option<CapitalGainsIncome>,
    /// Claimed amounts keyed by section (see `schema sections`)
    #[serde(default)]
    pub deductions: Option<Deductions>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InputSettings {
    pub age: u32,
    /// Start year of the financial year (e.g., 2025 for 2025-26). Defaults to the current one.
    #[serde(default)]
    pub financial_year: Option<FinancialYear>,
    #[serde(default = "default_metro")]
    pub is_metro_resident: bool,
}

fn default_metro() -> bool {
    true
}

impl TaxInput {
    /// Taxpayer settings, with `year` taking precedence over the document
    pub fn settings(&self, year: Option<FinancialYear>) -> TaxSettings {
        let year = year
            .or(self.settings.financial_year)
            .unwrap_or_else(FinancialYear::current);
        TaxSettings {
            age: self.settings.age,
            financial_year: year,
            is_metro_resident: self.settings.is_metro_resident,
        }
    }

    pub fn sources(&self) -> IncomeSources {
        IncomeSources {
            salary: self.salary.clone(),
            business: self.business.clone(),
            other_income: self.other_income.clone(),
            capital_gains: self.capital_gains.clone(),
        }
    }
}

/// Regime selector shared by the commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum RegimeArg {
    #[default]
    New,
    Old,
}

impl From<RegimeArg> for Regime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::New => Regime::New,
            RegimeArg::Old => Regime::Old,
        }
    }
}

/// Read the input document from a file (or stdin with "-")
pub fn read_input(path: &Path) -> anyhow::Result<TaxInput> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<TaxInput> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn read_from_stdin() -> anyhow::Result<TaxInput> {
    let mut buffer = Vec::new();
    io::stdin().lock().read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    serde_json::from_slice(&buffer).context("Failed to parse input from stdin")
}

/// Rupee amount with two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("₹{:.2}", amount.round_dp(2))
}

pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
