use rust_decimal::Decimal;
use serde::Serialize;

/// Income range taxed at a single marginal rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slab {
    pub lower: Decimal,
    /// `None` for the open-ended top slab
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

impl Slab {
    /// Width of this slab that falls under `income`
    pub fn portion_of(&self, income: Decimal) -> Decimal {
        if income <= self.lower {
            return Decimal::ZERO;
        }
        let top = match self.upper {
            Some(upper) => income.min(upper),
            None => income,
        };
        top - self.lower
    }

    pub fn contains(&self, income: Decimal) -> bool {
        income > self.lower && self.upper.is_none_or(|upper| income <= upper)
    }
}

impl std::fmt::Display for Slab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{} - {}", self.lower, upper),
            None => write!(f, "above {}", self.lower),
        }
    }
}

/// Ordered, contiguous slab table covering [0, ∞)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxSlab {
    slabs: Vec<Slab>,
}

impl TaxSlab {
    pub fn new(slabs: Vec<Slab>) -> Self {
        TaxSlab { slabs }
    }

    /// Build a table from `(upper_limit, rate)` pairs plus the rate above the last limit
    pub fn from_limits(limits: &[(Decimal, Decimal)], top_rate: Decimal) -> Self {
        let mut slabs = Vec::with_capacity(limits.len() + 1);
        let mut lower = Decimal::ZERO;
        for &(upper, rate) in limits {
            slabs.push(Slab {
                lower,
                upper: Some(upper),
                rate,
            });
            lower = upper;
        }
        slabs.push(Slab {
            lower,
            upper: None,
            rate: top_rate,
        });
        TaxSlab { slabs }
    }

    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slab> {
        self.slabs.iter()
    }

    /// Check the table is contiguous from zero, bounded except at the top,
    /// and that rates lie in [0, 1) without decreasing.
    pub fn validate(&self) -> Result<(), String> {
        let first = self.slabs.first().ok_or("slab table is empty")?;
        if !first.lower.is_zero() {
            return Err(format!("first slab starts at {} instead of 0", first.lower));
        }

        let last_index = self.slabs.len() - 1;
        for (i, slab) in self.slabs.iter().enumerate() {
            if slab.rate < Decimal::ZERO || slab.rate >= Decimal::ONE {
                return Err(format!("slab {} has rate {} outside [0, 1)", i + 1, slab.rate));
            }
            match slab.upper {
                Some(upper) if upper <= slab.lower => {
                    return Err(format!("slab {} is empty or inverted", i + 1));
                }
                None if i != last_index => {
                    return Err(format!("slab {} is unbounded but not last", i + 1));
                }
                Some(_) if i == last_index => {
                    return Err("last slab must be unbounded".to_string());
                }
                _ => {}
            }
            if let Some(next) = self.slabs.get(i + 1) {
                if slab.upper != Some(next.lower) {
                    return Err(format!(
                        "slab {} does not start where slab {} ends",
                        i + 2,
                        i + 1
                    ));
                }
                if next.rate < slab.rate {
                    return Err(format!("rate decreases at slab {}", i + 2));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TaxSlab {
    type Item = &'a Slab;
    type IntoIter = std::slice::Iter<'a, Slab>;

    fn into_iter(self) -> Self::IntoIter {
        self.slabs.iter()
    }
}

/// Surcharge rate levied once income passes `threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurchargeBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Surcharge brackets ordered by threshold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SurchargeBrackets {
    brackets: Vec<SurchargeBracket>,
}

impl SurchargeBrackets {
    pub fn new(brackets: Vec<SurchargeBracket>) -> Self {
        SurchargeBrackets { brackets }
    }

    pub fn from_pairs(pairs: &[(Decimal, Decimal)]) -> Self {
        SurchargeBrackets {
            brackets: pairs
                .iter()
                .map(|&(threshold, rate)| SurchargeBracket { threshold, rate })
                .collect(),
        }
    }

    pub fn brackets(&self) -> &[SurchargeBracket] {
        &self.brackets
    }

    /// Index of the highest bracket whose threshold is at or below `income`
    pub fn position_for(&self, income: Decimal) -> Option<usize> {
        self.brackets.iter().rposition(|b| b.threshold <= income)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.threshold < Decimal::ZERO {
                return Err(format!("surcharge bracket {} has a negative threshold", i + 1));
            }
            if bracket.rate < Decimal::ZERO || bracket.rate >= Decimal::ONE {
                return Err(format!(
                    "surcharge bracket {} has rate {} outside [0, 1)",
                    i + 1,
                    bracket.rate
                ));
            }
        }
        for (i, pair) in self.brackets.windows(2).enumerate() {
            if pair[1].threshold <= pair[0].threshold {
                return Err(format!("surcharge bracket {} is out of order", i + 2));
            }
            if pair[1].rate < pair[0].rate {
                return Err(format!("surcharge rate decreases at bracket {}", i + 2));
            }
        }
        Ok(())
    }
}

/// Rebate zeroing out tax up to an income limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rebate {
    pub income_limit: Decimal,
    /// Above the limit, tax plus cess may not exceed the income over the limit
    pub marginal_relief: bool,
}
