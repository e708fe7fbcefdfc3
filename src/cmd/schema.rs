//! Schema command - print the expected input format

use super::{format_amount, format_rate, TaxInput};
use clap::Args;
use schemars::schema_for;
use taxcalc::core::{AgeLimit, Cap, IncomeBase, Regime, Section};

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or sections
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the input document
    JsonSchema,
    /// Deduction sections with their limits
    Sections,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(TaxInput);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Sections => print_sections(),
        }
        Ok(())
    }
}

fn print_sections() {
    println!("Deduction Sections");
    println!("==================");
    println!();
    for section in Section::ALL {
        let rule = section.rule();
        let regimes = if rule.allowed_in(Regime::New) {
            "old+new"
        } else {
            "old"
        };
        println!("{:24} ({:7})  {}", section.key(), regimes, section.description());

        let mut limits = vec![cap_label(rule.cap)];
        if rule.share != rust_decimal::Decimal::ONE {
            limits.push(format!("{} of claim qualifies", format_rate(rule.share)));
        }
        match rule.offsets {
            Some(IncomeBase::Salary) => limits.push("up to salary".to_string()),
            Some(IncomeBase::SavingsInterest) => limits.push("up to savings interest".to_string()),
            Some(IncomeBase::Interest) => limits.push("up to interest income".to_string()),
            None => {}
        }
        match rule.age {
            AgeLimit::Any => {}
            AgeLimit::BelowSixty => limits.push("below 60 only".to_string()),
            AgeLimit::SixtyAndAbove => limits.push("60 and above only".to_string()),
        }
        println!("{:35}{}", "", limits.join(", "));
    }
    println!();
    println!("standard_deduction is set from the year's rules and cannot be claimed.");
}

fn cap_label(cap: Cap) -> String {
    match cap {
        Cap::Unlimited => "no cap".to_string(),
        Cap::Fixed(amount) => format!("cap {}", format_amount(amount)),
        Cap::BasicShare { old, new } => format!(
            "cap {} of basic pay (old), {} (new)",
            format_rate(old),
            format_rate(new)
        ),
    }
}
