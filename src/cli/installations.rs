use clap::Parser;

use crate::{
    api::ChargingCloud,
    cli::zaptec::ZaptecArgs,
    prelude::*,
    tables::build_installations_table,
};

#[derive(Parser)]
pub struct InstallationsArgs {
    #[clap(flatten)]
    zaptec: ZaptecArgs,
}

impl InstallationsArgs {
    pub async fn run(self) -> Result {
        let installations = self.zaptec.connect()?.get_installations().await?;
        println!("{}", build_installations_table(&installations));
        Ok(())
    }
}
