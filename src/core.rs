pub mod period;
pub mod totals;
