use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{
    api::ChargingCloud,
    cli::{period::PeriodArgs, zaptec::ZaptecArgs},
    core::totals::{Rounding, UsageTotals},
    export::{export_all, filename::invoice_stem},
    invoice::Invoice,
    prelude::*,
    tables::build_summary_table,
};

#[derive(Parser)]
pub struct ExportArgs {
    #[clap(flatten)]
    zaptec: ZaptecArgs,

    #[clap(flatten)]
    period: PeriodArgs,

    #[clap(long = "installation-id", env = "INSTALLATION_ID")]
    installation_id: String,

    /// Name to print on the document, defaults to the installation ID.
    #[clap(long = "installation-name", env = "INSTALLATION_NAME")]
    installation_name: Option<String>,

    #[clap(long, default_value = ".", env = "OUTPUT_DIR")]
    output_dir: PathBuf,
}

impl ExportArgs {
    #[instrument(skip_all, fields(installation_id = self.installation_id))]
    pub async fn run(self) -> Result {
        let period = self.period.period()?;
        let sessions = self
            .zaptec
            .connect()?
            .get_charge_history(&self.installation_id, period.date_range())
            .await
            .context("failed to fetch the charge history")?;
        let totals = UsageTotals::aggregate(&sessions, period.rate, Rounding::Exact);
        info!(energy = %totals.energy, cost = %totals.cost, "aggregated");

        let document = Invoice::builder()
            .installation_id(&self.installation_id)
            .maybe_installation_name(self.installation_name.as_deref())
            .period(&period)
            .sessions(&sessions)
            .totals(totals)
            .build()
            .render()?;
        let name = self.installation_name.as_deref().filter(|name| !name.is_empty());
        let stem = invoice_stem(&period, name.unwrap_or(&self.installation_id));
        write(&self.output_dir.join(format!("{stem}.pdf")), &document)
    }
}

#[derive(Parser)]
pub struct ExportAllArgs {
    #[clap(flatten)]
    zaptec: ZaptecArgs,

    #[clap(flatten)]
    period: PeriodArgs,

    /// Number of installations to process at the same time.
    #[clap(long, default_value = "4", env = "EXPORT_CONCURRENCY")]
    concurrency: usize,

    #[clap(long, default_value = ".", env = "OUTPUT_DIR")]
    output_dir: PathBuf,
}

impl ExportAllArgs {
    pub async fn run(self) -> Result {
        let period = self.period.period()?;
        let api = self.zaptec.connect()?;
        let installations =
            api.get_installations().await.context("failed to fetch the installations")?;
        let bundle = export_all(&api, &installations, &period, self.concurrency).await?;
        if bundle.documents().len() < installations.len() {
            warn!(
                n_skipped = installations.len() - bundle.documents().len(),
                "some installations are missing from the archive",
            );
        }
        println!("{}", build_summary_table(bundle.rows()));
        let path = self.output_dir.join(bundle.archive_name());
        write(&path, &bundle.into_zip()?)
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
fn write(path: &Path, bytes: &[u8]) -> Result {
    std::fs::write(path, bytes).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(n_bytes = bytes.len(), "written");
    Ok(())
}
