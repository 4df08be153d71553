use crate::{
    api::zaptec::ChargeSession,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// When the totals get rounded.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rounding {
    /// Keep the full precision until the very formatting.
    Exact,

    /// Energy to watt-hours, then the cost to øre.
    Billing,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct UsageTotals {
    pub energy: KilowattHours,
    pub cost: Cost,
}

impl UsageTotals {
    /// Sum up the sessions' energy and price it at the rate.
    ///
    /// Sessions without energy count as zero.
    pub fn aggregate<'a>(
        sessions: impl IntoIterator<Item = &'a ChargeSession>,
        rate: KilowattHourRate,
        rounding: Rounding,
    ) -> Self {
        let energy: KilowattHours =
            sessions.into_iter().map(|session| session.energy.unwrap_or_default()).sum();
        match rounding {
            Rounding::Exact => Self { energy, cost: energy * rate },
            Rounding::Billing => {
                let energy = energy.round_to(3);
                Self { energy, cost: (energy * rate).round_to(2) }
            }
        }
    }
}
