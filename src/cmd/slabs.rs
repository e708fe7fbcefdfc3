//! Slabs command - print the built-in tables for a year

use super::{format_amount, format_rate, RegimeArg};
use clap::Args;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use taxcalc::core::{AgeBand, FinancialYear, Regime, Slab, SurchargeBracket};
use taxcalc::tax::{RuleRegistry, SlabProvider};

#[derive(Args, Debug)]
pub struct SlabsCommand {
    /// Financial year (e.g., 2025 for 2025-26). Defaults to the current one.
    #[arg(short, long)]
    year: Option<i32>,

    /// Tax regime
    #[arg(short, long, value_enum, default_value_t = RegimeArg::New)]
    regime: RegimeArg,

    /// Taxpayer age, selects the old regime table
    #[arg(short, long, default_value_t = 30)]
    age: u32,

    /// Output as JSON instead of formatted tables
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct SlabsOutput<'a> {
    financial_year: FinancialYear,
    regime: Regime,
    age_band: AgeBand,
    slabs: &'a [Slab],
    surcharge: &'a [SurchargeBracket],
    standard_deduction: rust_decimal::Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    rebate_limit: Option<rust_decimal::Decimal>,
}

impl SlabsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self.year.map_or_else(FinancialYear::current, FinancialYear);
        let regime: Regime = self.regime.into();
        let band = AgeBand::from_age(self.age);

        let registry = RuleRegistry::builtin();
        let rules = registry.year_rules(year)?;
        let slabs = registry.get_slabs(year, regime, band)?;
        let regime_rules = rules.regime(regime)?;

        if self.json {
            let output = SlabsOutput {
                financial_year: year,
                regime,
                age_band: band,
                slabs: slabs.slabs(),
                surcharge: regime_rules.surcharge.brackets(),
                standard_deduction: regime_rules.standard_deduction,
                rebate_limit: regime_rules.rebate.map(|r| r.income_limit),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!();
        let title = regime.as_str().to_uppercase();
        match regime {
            Regime::New => println!("{} REGIME SLABS ({})", title, year.display()),
            Regime::Old => println!("{} REGIME SLABS ({}, age {})", title, year.display(), band),
        }
        println!();

        let rows: Vec<SlabRow> = slabs
            .iter()
            .map(|slab| SlabRow {
                from: format_amount(slab.lower),
                to: slab.upper.map_or_else(|| "-".to_string(), format_amount),
                rate: format_rate(slab.rate),
            })
            .collect();
        print_table(rows);

        if !regime_rules.surcharge.brackets().is_empty() {
            println!();
            println!("SURCHARGE");
            let rows: Vec<SurchargeRow> = regime_rules
                .surcharge
                .brackets()
                .iter()
                .map(|b| SurchargeRow {
                    above: format_amount(b.threshold),
                    rate: format_rate(b.rate),
                })
                .collect();
            print_table(rows);
        }

        println!();
        println!(
            "Standard deduction: {}",
            format_amount(regime_rules.standard_deduction)
        );
        if let Some(rebate) = regime_rules.rebate {
            println!(
                "Rebate up to taxable income of {}{}",
                format_amount(rebate.income_limit),
                if rebate.marginal_relief {
                    " (with marginal relief)"
                } else {
                    ""
                }
            );
        }
        println!("Cess: {}", format_rate(rules.cess_rate));
        Ok(())
    }
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
}

#[derive(Debug, Clone, Tabled)]
struct SlabRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct SurchargeRow {
    #[tabled(rename = "Income above")]
    above: String,
    #[tabled(rename = "Rate")]
    rate: String,
}
