use rust_decimal::{Decimal, RoundingStrategy};

/// Health and education cess: a flat rate on tax (after rebate) plus surcharge
pub fn cess(tax: Decimal, surcharge: Decimal, rate: Decimal) -> Decimal {
    rate * (tax + surcharge)
}

/// Largest tax which, once cess at `rate` is added, stays within `amount`.
/// Rounded down to the paisa.
pub fn before_cess(amount: Decimal, rate: Decimal) -> Decimal {
    (amount / (Decimal::ONE + rate)).round_dp_with_strategy(2, RoundingStrategy::ToZero)
}
