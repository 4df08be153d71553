pub mod cost;
pub mod energy;
pub mod rate;

use ordered_float::OrderedFloat;
use serde::Deserialize;

/// Physical or monetary quantity, dimensioned by the powers of power, time, and cost.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    derive_more::Add,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Sum,
)]
#[from(i32, f64, OrderedFloat<f64>)]
#[must_use]
pub struct Quantity<const POWER: isize, const TIME: isize, const COST: isize>(
    pub OrderedFloat<f64>,
);

impl<const POWER: isize, const TIME: isize, const COST: isize> Quantity<POWER, TIME, COST> {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    #[must_use]
    pub const fn into_inner(self) -> f64 {
        self.0.0
    }

    /// Round half away from zero to the given number of decimal places.
    pub fn round_to(self, decimals: i32) -> Self {
        let scale = 10.0_f64.powi(decimals);
        Self(OrderedFloat((self.0.0 * scale).round() / scale))
    }
}
