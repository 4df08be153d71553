use std::fmt::{Debug, Display, Formatter};

use chrono::{Datelike, Months, NaiveDate};

use crate::{prelude::*, quantity::rate::KilowattHourRate};

/// Calendar month being billed, together with the applied energy rate.
#[derive(Copy, Clone)]
#[must_use]
pub struct BillingPeriod {
    range: DateRange,
    pub rate: KilowattHourRate,
}

impl BillingPeriod {
    pub fn try_new(year: i32, month: u32, rate: KilowattHourRate) -> Result<Self> {
        ensure!(year >= 2000 && (1..=12).contains(&month), "invalid date: {year}-{month:02}");
        ensure!(
            rate.into_inner().is_finite() && rate >= KilowattHourRate::ZERO,
            "invalid NOK per kWh: {rate}",
        );
        let from = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("invalid date: {year}-{month:02}"))?;
        let to = from
            .checked_add_months(Months::new(1))
            .with_context(|| format!("no month after {year}-{month:02}"))?;
        Ok(Self { range: DateRange { from, to }, rate })
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.range.from.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.range.from.month()
    }

    pub const fn date_range(&self) -> DateRange {
        self.range
    }

    /// Prefix shared by the exported file names: `2024_06`.
    #[must_use]
    pub fn file_prefix(&self) -> String {
        format!("{}_{:02}", self.year(), self.month())
    }
}

impl Display for BillingPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month())
    }
}

impl Debug for BillingPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self} @ {:?}", self.rate)
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct DateRange {
    /// Inclusive.
    pub from: NaiveDate,

    /// Exclusive.
    pub to: NaiveDate,
}

impl Debug for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}

impl DateRange {
    #[must_use]
    pub fn from_timestamp(self) -> String {
        format!("{}T00:00:00Z", self.from)
    }

    #[must_use]
    pub fn to_timestamp(self) -> String {
        format!("{}T00:00:00Z", self.to)
    }
}
