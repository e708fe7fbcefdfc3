//! E2E tests for the command line interface

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::process::Command;

fn amount(value: &serde_json::Value) -> Decimal {
    value.as_str().expect("amount string").parse().expect("decimal")
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute command")
}

/// Table output shows both regimes and the recommendation
#[test]
fn calculate_table() {
    let output = run(&["calculate", "tests/data/salaried_with_rent.json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("INCOME TAX (2025-26)"));
    assert!(stdout.contains("New regime"));
    assert!(stdout.contains("Old regime"));
    assert!(stdout.contains("₹117000.00"));
    assert!(stdout.contains("₹184080.00"));
    assert!(stdout.contains("hra_exemption"));
    assert!(stdout.contains("Recommended: new regime"));
}

/// JSON output carries the stable report keys
#[test]
fn calculate_json() {
    let output = run(&["calculate", "tests/data/heavy_deductions.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(report["financial_year"], 2025);
    assert_eq!(report["recommended_regime"], "old");
    assert_eq!(amount(&report["new_regime"]["total_tax"]), dec!(150800));
    assert_eq!(amount(&report["old_regime"]["total_tax"]), dec!(33800));
    assert_eq!(amount(&report["income_summary"]["salary"]), dec!(1800000));
    assert!(report["comparison"]["summary"]
        .as_str()
        .unwrap()
        .starts_with("Old tax regime results in a savings of"));
    assert!(report.get("tax_per_slab").is_none());
}

/// Capital gains are taxed apart from the slabs; interest is deducted unclaimed
#[test]
fn calculate_json_with_interest_and_gains() {
    let output = run(&["calculate", "tests/data/interest_and_gains.json", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(amount(&report["income_summary"]["capital_gains"]), dec!(30000));
    assert_eq!(amount(&report["new_regime"]["taxable_income"]), dec!(1650000));
    assert_eq!(amount(&report["old_regime"]["taxable_income"]), dec!(1305000));
    assert_eq!(amount(&report["old_regime"]["capital_gains_tax"]), dec!(4125));
    assert_eq!(
        amount(&report["old_regime"]["deductions"]["amounts"]["section_80tta"]),
        dec!(10000)
    );
    assert_eq!(report["new_regime"]["rebate_applied"], false);
}

/// CSV output lists each touched slab for both regimes
#[test]
fn calculate_csv_per_slab() {
    let output = run(&["calculate", "tests/data/salaried_with_rent.json", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("regime,lower,upper,rate,taxable_amount,tax")
    );
    let rows: Vec<_> = lines.collect();
    assert!(rows.iter().any(|r| r.starts_with("new,1200000,1600000,15%")));
    assert!(rows.iter().any(|r| r.starts_with("old,1000000,,30%")));
}

/// The year argument overrides the document
#[test]
fn calculate_year_override() {
    let output = run(&[
        "calculate",
        "tests/data/salaried_with_rent.json",
        "--year",
        "2024",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(report["financial_year"], 2024);
}

/// Unsupported years and negative amounts fail with a message
#[test]
fn calculate_errors() {
    let output = run(&[
        "calculate",
        "tests/data/salaried_with_rent.json",
        "--year",
        "2019",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported financial year"));

    let output = run(&["calculate", "tests/data/negative_income.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("business.business_income"));
}

/// Slab tables print for both regimes
#[test]
fn slabs_table() {
    let output = run(&["slabs", "--year", "2025", "--regime", "old", "--age", "65"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("OLD REGIME SLABS (2025-26, age 60-79)"));
    assert!(stdout.contains("₹300000.00"));
    assert!(stdout.contains("SURCHARGE"));
    assert!(stdout.contains("37%"));

    let output = run(&["slabs", "--year", "2024", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let slabs: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(slabs["regime"], "new");
    assert_eq!(amount(&slabs["rebate_limit"]), dec!(700000));
}

/// Schema command prints the input schema and the section reference
#[test]
fn schema_outputs() {
    let output = run(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("\"title\": \"TaxInput\""));
    assert!(stdout.contains("basic_and_da"));

    let output = run(&["schema", "sections"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    assert!(stdout.contains("section_80ccd_2"));
    assert!(stdout.contains("old+new"));
}
