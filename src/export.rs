pub mod filename;
pub mod summary;

use std::io::{Cursor, Write};

use futures_util::{StreamExt, stream};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use self::{
    filename::{UniqueNames, invoice_stem},
    summary::SummaryRow,
};
use crate::{
    api::{
        ChargingCloud,
        zaptec::{ChargeSession, Installation},
    },
    core::{
        period::BillingPeriod,
        totals::{Rounding, UsageTotals},
    },
    invoice::Invoice,
    prelude::*,
};

/// Invoice documents of all the exported installations together with their summary.
#[must_use]
pub struct Bundle {
    period: BillingPeriod,

    /// File name and PDF bytes, in the installation list order.
    documents: Vec<(String, Vec<u8>)>,

    rows: Vec<SummaryRow>,
}

impl Bundle {
    #[must_use]
    pub fn documents(&self) -> &[(String, Vec<u8>)] {
        &self.documents
    }

    #[must_use]
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Archive file name: `2024_06.zip`.
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.period.file_prefix())
    }

    /// Pack the documents, followed by the spreadsheet and CSV summaries.
    #[instrument(skip_all, fields(period = %self.period, n_documents = self.documents.len()))]
    pub fn into_zip(self) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let prefix = self.period.file_prefix();
        let summaries = [
            (format!("{prefix}_oppsummering.xlsx"), summary::to_xlsx(&self.rows)?),
            (format!("{prefix}_oppsummering.csv"), summary::to_csv(&self.rows)?),
        ];

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in self.documents.iter().chain(&summaries) {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(bytes)?;
        }
        let bytes = writer.finish()?.into_inner();
        info!(n_bytes = bytes.len(), "packed");
        Ok(bytes)
    }
}

/// Successfully exported installation, before its file name is finalized.
struct Exported {
    stem: String,
    document: Vec<u8>,
    installation_name: String,
    installation_id: String,
    totals: UsageTotals,
}

/// Export every installation's invoice basis for the period.
///
/// Installations whose charge history cannot be fetched are skipped.
/// Up to `concurrency` installations are processed at a time, the results keep the list order.
#[instrument(skip_all, fields(period = %period, n_installations = installations.len()))]
pub async fn export_all<C: ChargingCloud + ?Sized>(
    cloud: &C,
    installations: &[Installation],
    period: &BillingPeriod,
    concurrency: usize,
) -> Result<Bundle> {
    let results: Vec<Result<Option<Exported>>> = stream::iter(installations)
        .map(|installation| export_one(cloud, installation, period))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut names = UniqueNames::default();
    let mut bundle = Bundle { period: *period, documents: Vec::new(), rows: Vec::new() };
    for exported in results {
        let Some(exported) = exported? else { continue };
        let file_name = names.claim(&exported.stem, "pdf");
        bundle.rows.push(
            SummaryRow::builder()
                .installation_name(exported.installation_name)
                .installation_id(exported.installation_id)
                .file_name(file_name.clone())
                .energy(exported.totals.energy)
                .cost(exported.totals.cost)
                .build(),
        );
        bundle.documents.push((file_name, exported.document));
    }
    info!(n_exported = bundle.documents.len(), "exported");
    Ok(bundle)
}

/// Fetch, aggregate and render a single installation.
///
/// Returns [`None`] when the charge history fetch fails.
#[instrument(skip_all, fields(installation_id = installation.id))]
async fn export_one<C: ChargingCloud + ?Sized>(
    cloud: &C,
    installation: &Installation,
    period: &BillingPeriod,
) -> Result<Option<Exported>> {
    let sessions: Vec<ChargeSession> =
        match cloud.get_charge_history(&installation.id, period.date_range()).await {
            Ok(sessions) => sessions,
            Err(error) => {
                warn!("skipping: {error:#}");
                return Ok(None);
            }
        };
    let totals = UsageTotals::aggregate(&sessions, period.rate, Rounding::Billing);
    let document = Invoice::builder()
        .installation_id(&installation.id)
        .maybe_installation_name(installation.name.as_deref())
        .period(period)
        .sessions(&sessions)
        .totals(totals)
        .build()
        .render()?;
    Ok(Some(Exported {
        stem: invoice_stem(period, installation.display_name()),
        document,
        installation_name: installation.display_name().to_owned(),
        installation_id: installation.id.clone(),
        totals,
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_abs_diff_eq;
    use async_trait::async_trait;
    use itertools::Itertools;
    use zip::ZipArchive;

    use super::*;
    use crate::{core::period::DateRange, quantity::rate::KilowattHourRate};

    /// Charging cloud serving canned sessions, failing for unknown installations.
    struct FakeCloud(HashMap<&'static str, Vec<f64>>);

    #[async_trait]
    impl ChargingCloud for FakeCloud {
        async fn get_installations(&self) -> Result<Vec<Installation>> {
            unimplemented!()
        }

        async fn get_charge_history(
            &self,
            installation_id: &str,
            _range: DateRange,
        ) -> Result<Vec<ChargeSession>> {
            let energies = self.0.get(installation_id).context("upstream is down")?;
            Ok(energies
                .iter()
                .map(|energy| ChargeSession::builder().energy(*energy).build())
                .collect())
        }
    }

    fn installation(id: &str, name: Option<&str>) -> Installation {
        Installation { id: id.to_owned(), name: name.map(ToOwned::to_owned) }
    }

    fn june() -> Result<BillingPeriod> {
        BillingPeriod::try_new(2024, 6, KilowattHourRate::from(1.5))
    }

    #[tokio::test]
    async fn test_failed_installation_is_skipped() -> Result {
        let cloud = FakeCloud(HashMap::from([("INST1", vec![2.0, 3.1, 2.1])]));
        let installations =
            [installation("INST1", Some("Hytta")), installation("INST2", Some("Garasje"))];
        let bundle = export_all(&cloud, &installations, &june()?, 4).await?;

        assert_eq!(bundle.rows().len(), 1);
        let row = &bundle.rows()[0];
        assert_eq!(row.installation_id, "INST1");
        assert_eq!(row.file_name, "2024_06_grunnlag_Hytta.pdf");
        assert_abs_diff_eq!(row.energy.into_inner(), 7.2);
        assert_abs_diff_eq!(row.cost.into_inner(), 10.8);
        assert_eq!(bundle.archive_name(), "2024_06.zip");

        let mut archive = ZipArchive::new(Cursor::new(bundle.into_zip()?))?;
        assert_eq!(archive.len(), 3);
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"2024_06_grunnlag_Hytta.pdf"));
        assert!(names.contains(&"2024_06_oppsummering.xlsx"));
        assert!(names.contains(&"2024_06_oppsummering.csv"));
        assert!(archive.by_name("2024_06_grunnlag_Hytta.pdf")?.size() > 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_order_follows_installations() -> Result {
        let cloud = FakeCloud(HashMap::from([
            ("A", vec![1.0]),
            ("B", vec![]),
            ("C", vec![3.0]),
            ("D", vec![4.0]),
        ]));
        let installations = [
            installation("D", None),
            installation("B", None),
            installation("X", None),
            installation("C", None),
            installation("A", None),
        ];
        let bundle = export_all(&cloud, &installations, &june()?, 2).await?;
        let ids = bundle.rows().iter().map(|row| row.installation_id.as_str()).collect_vec();
        assert_eq!(ids, ["D", "B", "C", "A"]);
        let names = bundle.documents().iter().map(|(name, _)| name.as_str()).collect_vec();
        assert_eq!(
            names,
            [
                "2024_06_grunnlag_D.pdf",
                "2024_06_grunnlag_B.pdf",
                "2024_06_grunnlag_C.pdf",
                "2024_06_grunnlag_A.pdf",
            ],
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_colliding_names_are_suffixed() -> Result {
        let cloud = FakeCloud(HashMap::from([("INST1", vec![1.0]), ("INST2", vec![2.0])]));
        let installations =
            [installation("INST1", Some("Hytta/1")), installation("INST2", Some("Hytta:1"))];
        let bundle = export_all(&cloud, &installations, &june()?, 1).await?;
        let names = bundle.rows().iter().map(|row| row.file_name.as_str()).collect_vec();
        assert_eq!(names, ["2024_06_grunnlag_Hytta_1.pdf", "2024_06_grunnlag_Hytta_1_2.pdf"]);
        let archive = ZipArchive::new(Cursor::new(bundle.into_zip()?))?;
        assert_eq!(archive.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_nothing_exported() -> Result {
        let bundle = export_all(&FakeCloud(HashMap::new()), &[], &june()?, 4).await?;
        assert!(bundle.rows().is_empty());
        let archive = ZipArchive::new(Cursor::new(bundle.into_zip()?))?;
        assert_eq!(archive.len(), 2);
        Ok(())
    }
}
