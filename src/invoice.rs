pub mod layout;
pub mod pdf;
mod timestamp;

use bon::Builder;

pub use self::timestamp::format_timestamp;
use self::layout::{Alignment, Block, Row, Rule, Table};
use crate::{
    api::zaptec::ChargeSession,
    core::{period::BillingPeriod, totals::UsageTotals},
    fmt::format_accounting,
    prelude::*,
    quantity::energy::KilowattHours,
};

pub const DETAILS_HEADING: &str = "Detaljert strømforbruk for perioden";
pub const NO_SESSIONS: &str = "Ingen ladesesjoner funnet for denne perioden.";

/// Invoice basis («fakturagrunnlag») for a single installation over a billing period.
///
/// The totals are printed verbatim, so that pre-rounded totals stay consistent across the rows.
#[derive(Builder)]
pub struct Invoice<'a> {
    installation_id: &'a str,
    installation_name: Option<&'a str>,
    period: &'a BillingPeriod,
    sessions: &'a [ChargeSession],
    totals: UsageTotals,
}

impl Invoice<'_> {
    #[must_use]
    pub fn title(&self) -> String {
        let name = self.installation_name.filter(|name| !name.is_empty());
        format!("Fakturagrunnlag ({})", name.unwrap_or(self.installation_id))
    }

    #[must_use]
    pub fn blocks(&self) -> Vec<Block> {
        vec![
            Block::Title(self.title()),
            Block::Paragraph(format!(
                "For periode {} er den gjennomsnittlige strømprisne inkludert påslag satt til \
                 {:.2} NOK per kWh.",
                self.period,
                self.period.rate.into_inner(),
            )),
            Block::Spacer(20.0),
            Block::Table(self.build_summary_table()),
            Block::Spacer(20.0),
            Block::Heading(DETAILS_HEADING.to_owned()),
            if self.sessions.is_empty() {
                Block::Paragraph(NO_SESSIONS.to_owned())
            } else {
                Block::Table(self.build_usage_table())
            },
        ]
    }

    #[instrument(skip_all, fields(installation_id = self.installation_id, period = %self.period))]
    pub fn render(&self) -> Result<Vec<u8>> {
        let bytes = pdf::render(&self.title(), &self.blocks())?;
        info!(n_bytes = bytes.len(), "rendered");
        Ok(bytes)
    }

    fn build_summary_table(&self) -> Table {
        let amount = format!("{} kr", format_accounting(self.totals.cost.into_inner()));
        let value_added_tax = format!("{} kr", format_accounting(0.0));
        Table {
            column_widths: vec![
                4.0 / 12.0,
                1.0 / 12.0,
                1.0 / 6.0,
                1.0 / 12.0,
                1.0 / 12.0,
                3.0 / 12.0,
            ],
            alignments: vec![
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ],
            rows: vec![
                Row::new(["Beskrivelse", "Antall", "Pris", "Rabatt", "MVA", "Beløp"]).bold(),
                Row::new([
                    format!("Strømforbruk {}", self.period),
                    format!("{:.3}", self.totals.energy.into_inner()),
                    format!("{:.2}", self.period.rate.into_inner()),
                    "0 %".to_owned(),
                    "0 %".to_owned(),
                    amount.clone(),
                ]),
                Row::new(["", "", "", "", "Nettobeløp", amount.as_str()])
                    .with_rule(Rule::above(0..6, 1.0)),
                Row::new(["", "", "", "", "Merverdiavgift", value_added_tax.as_str()]),
                Row::new(["", "", "", "", "Beløp å betale", amount.as_str()])
                    .bold()
                    .with_font_size(12.0)
                    .with_rule(Rule::above(3..6, 1.0))
                    .with_rule(Rule::below(3..6, 1.5)),
            ],
        }
    }

    fn build_usage_table(&self) -> Table {
        let header =
            Row::new(["Starttidspunkt", "Sluttidspunkt", "Ladeenhet", "Strømforbruk (kWh)"]).bold();
        let sessions = self.sessions.iter().map(|session| {
            Row::new([
                format_timestamp(session.start.as_deref()),
                format_timestamp(session.end.as_deref()),
                session.device_name.clone().unwrap_or_else(|| "N/A".to_owned()),
                format_session_energy(session.energy),
            ])
        });
        let total = Row::new([
            "Sum kWh".to_owned(),
            String::new(),
            String::new(),
            format!("{:.3}", self.totals.energy.into_inner()),
        ])
        .bold()
        .with_rule(Rule::above(0..4, 1.0))
        .with_rule(Rule::below(0..4, 1.0));
        Table {
            column_widths: vec![0.25; 4],
            alignments: vec![Alignment::Left, Alignment::Left, Alignment::Left, Alignment::Right],
            rows: std::iter::once(header).chain(sessions).chain(std::iter::once(total)).collect(),
        }
    }
}

/// Shortest round-trip form of the reported energy.
///
/// Whole numbers keep `.0` (`5.0`) and tiny values switch to the exponent form (`1e-5`).
fn format_session_energy(energy: Option<KilowattHours>) -> String {
    energy.map_or_else(|| "0".to_owned(), |energy| format!("{:?}", energy.into_inner()))
}
