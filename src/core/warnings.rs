use super::deductions::Section;
use rust_decimal::Decimal;
use serde::Serialize;

/// Adjustments made to a claim while working out admissible deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Warning {
    /// Section is not available under the regime.
    NotAllowedInRegime { section: Section },
    /// Section is restricted to another age band.
    NotAllowedForAge { section: Section },
    /// Section does not apply to this taxpayer's income.
    NotApplicable {
        section: Section,
        reason: &'static str,
    },
    /// Claim exceeded the statutory cap or the income it offsets.
    Capped {
        section: Section,
        claimed: Decimal,
        allowed: Decimal,
    },
    /// Claim was replaced by the amount set in the year's rules.
    Overridden { section: Section },
}

impl Warning {
    pub fn section(&self) -> Section {
        match self {
            Warning::NotAllowedInRegime { section }
            | Warning::NotAllowedForAge { section }
            | Warning::NotApplicable { section, .. }
            | Warning::Capped { section, .. }
            | Warning::Overridden { section } => *section,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NotAllowedInRegime { section } => {
                write!(f, "{} is not allowed in this regime", section)
            }
            Warning::NotAllowedForAge { section } => {
                write!(f, "{} is not available for this age", section)
            }
            Warning::NotApplicable { section, reason } => {
                write!(f, "{} does not apply: {}", section, reason)
            }
            Warning::Capped {
                section,
                claimed,
                allowed,
            } => write!(f, "{} capped from {} to {}", section, claimed, allowed),
            Warning::Overridden { section } => {
                write!(f, "{} is set by the year's rules", section)
            }
        }
    }
}
