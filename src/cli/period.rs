use chrono::{Datelike, Local};
use clap::Parser;

use crate::{core::period::BillingPeriod, prelude::*, quantity::rate::KilowattHourRate};

#[derive(Parser)]
pub struct PeriodArgs {
    /// Billed year, defaults to the current one.
    #[clap(long, env = "YEAR")]
    pub year: Option<i32>,

    /// Billed month, defaults to the current one.
    #[clap(long, env = "MONTH")]
    pub month: Option<u32>,

    /// Average energy price including the markup.
    #[clap(long = "nok-per-kwh", env = "NOK_PER_KWH")]
    pub rate: KilowattHourRate,
}

impl PeriodArgs {
    pub fn period(&self) -> Result<BillingPeriod> {
        let today = Local::now().date_naive();
        BillingPeriod::try_new(
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
            self.rate,
        )
    }
}
