//! Calculate command - tax under both regimes and a recommendation

use super::{format_amount, format_rate, read_input};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};
use taxcalc::core::{FinancialYear, Regime, Section};
use taxcalc::tax::{IncomeTaxCalculator, Report, ReportOptions, SlabTax};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// Input document (JSON). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Financial year (e.g., 2025 for 2025-26), overrides the input document
    #[arg(short, long)]
    year: Option<i32>,

    /// Show the contribution of each slab
    #[arg(long)]
    per_slab: bool,

    /// Output the full report as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Output the per-slab breakdown as CSV
    #[arg(long)]
    csv: bool,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_input(&self.file)?;
        let settings = input.settings(self.year.map(FinancialYear));
        let calculator = IncomeTaxCalculator::new(settings, input.sources(), input.deductions)
            .context("Invalid tax input")?;

        let report = calculator
            .calculate_tax(ReportOptions {
                comparison: true,
                tax_per_slab: self.per_slab || self.csv,
                display: false,
            })
            .with_context(|| {
                format!(
                    "Failed to calculate tax for FY {}",
                    calculator.settings().financial_year
                )
            })?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        } else if self.csv {
            write_csv(&report)
        } else {
            print_report(&report);
            Ok(())
        }
    }
}

fn print_report(report: &Report) {
    println!();
    println!("INCOME TAX ({})", report.financial_year.display());
    println!();
    println!(
        "Gross income: {} (salary {}, business {}, other {}, capital gains {})",
        format_amount(report.income_summary.gross_income),
        format_amount(report.income_summary.salary),
        format_amount(report.income_summary.business),
        format_amount(report.income_summary.other),
        format_amount(report.income_summary.capital_gains),
    );
    println!();

    let table = Table::new(liability_rows(report))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);

    let deductions = deduction_rows(report);
    if !deductions.is_empty() {
        println!();
        println!("DEDUCTIONS");
        let table = Table::new(deductions)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    for regime in Regime::ALL {
        for warning in &report.result(regime).deductions.warnings {
            println!("  note ({} regime): {}", regime, warning);
        }
    }

    if let Some(per_slab) = &report.tax_per_slab {
        for (regime, slabs) in per_slab {
            println!();
            println!("TAX PER SLAB ({} regime)", regime);
            if slabs.is_empty() {
                println!("  (no taxable income)");
                continue;
            }
            let rows: Vec<SlabRow> = slabs.iter().map(|s| SlabRow::new(*regime, s)).collect();
            let table = Table::new(rows)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
                .to_string();
            println!("{}", table);
        }
    }

    println!();
    println!(
        "Recommended: {} regime (savings {})",
        report.recommended_regime,
        format_amount(report.tax_savings)
    );
    if let Some(comparison) = &report.comparison {
        println!("{}", comparison.summary);
    }
}

#[derive(Debug, Clone, Tabled)]
struct LiabilityRow {
    #[tabled(rename = "")]
    label: &'static str,
    #[tabled(rename = "New regime")]
    new: String,
    #[tabled(rename = "Old regime")]
    old: String,
}

fn liability_rows(report: &Report) -> Vec<LiabilityRow> {
    let (new, old) = (&report.new_regime, &report.old_regime);
    let row = |label, new: Decimal, old: Decimal| LiabilityRow {
        label,
        new: format_amount(new),
        old: format_amount(old),
    };
    vec![
        row("Deductions", new.deductions.total(), old.deductions.total()),
        row("Taxable income", new.taxable_income, old.taxable_income),
        row("Slab tax", new.slab_tax, old.slab_tax),
        row("Rebate", new.rebate, old.rebate),
        row("Surcharge", new.surcharge, old.surcharge),
        row("Capital gains tax", new.capital_gains_tax, old.capital_gains_tax),
        row("Cess", new.cess, old.cess),
        row("Total tax", new.total_tax, old.total_tax),
    ]
}

#[derive(Debug, Clone, Tabled)]
struct DeductionRow {
    #[tabled(rename = "Section")]
    section: Section,
    #[tabled(rename = "New regime")]
    new: String,
    #[tabled(rename = "Old regime")]
    old: String,
}

fn deduction_rows(report: &Report) -> Vec<DeductionRow> {
    let sections: BTreeSet<Section> = Regime::ALL
        .iter()
        .flat_map(|regime| report.result(*regime).deductions.amounts.keys().copied())
        .collect();
    sections
        .into_iter()
        .map(|section| DeductionRow {
            section,
            new: format_amount(report.new_regime.deductions.get(section)),
            old: format_amount(report.old_regime.deductions.get(section)),
        })
        .collect()
}

/// One slab's contribution, for table and CSV output
#[derive(Debug, Clone, Tabled, Serialize)]
struct SlabRow {
    #[tabled(rename = "Regime")]
    regime: Regime,
    #[tabled(rename = "From")]
    lower: String,
    #[tabled(rename = "To")]
    upper: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable")]
    taxable_amount: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl SlabRow {
    fn new(regime: Regime, slab: &SlabTax) -> Self {
        SlabRow {
            regime,
            lower: slab.lower.to_string(),
            upper: slab.upper.map_or_else(String::new, |u| u.to_string()),
            rate: format_rate(slab.rate),
            taxable_amount: slab.taxable_amount.round_dp(2).to_string(),
            tax: slab.tax.round_dp(2).to_string(),
        }
    }
}

fn write_csv(report: &Report) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for (regime, slabs) in report.tax_per_slab.iter().flatten() {
        for slab in slabs {
            wtr.serialize(SlabRow::new(*regime, slab))?;
        }
    }
    wtr.flush()?;
    Ok(())
}
