use super::error::TaxError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Statutory tax computation scheme
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Default regime: wider slabs, almost no deductions
    New,
    /// Legacy regime: narrower slabs, full deduction set
    Old,
}

impl Regime {
    pub const ALL: [Regime; 2] = [Regime::New, Regime::Old];

    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::New => "new",
            Regime::Old => "old",
        }
    }

    pub fn other(&self) -> Regime {
        match self {
            Regime::New => Regime::Old,
            Regime::Old => Regime::New,
        }
    }
}

impl FromStr for Regime {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Regime::New),
            "old" => Ok(Regime::Old),
            _ => Err(TaxError::InvalidRegime(s.to_string())),
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
