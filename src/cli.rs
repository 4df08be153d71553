mod export;
mod installations;
mod login;
mod period;
mod zaptec;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        export::{ExportAllArgs, ExportArgs},
        installations::InstallationsArgs,
        login::{LoginArgs, LogoutArgs},
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in to Zaptec and store the session.
    Login(LoginArgs),

    /// Forget the stored session.
    Logout(LogoutArgs),

    /// List the installations available to the user.
    Installations(InstallationsArgs),

    /// Export the invoice basis of a single installation.
    Export(Box<ExportArgs>),

    /// Export the invoice basis of every installation into a single archive.
    #[clap(name = "export-all")]
    ExportAll(Box<ExportAllArgs>),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Login(args) => args.run().await,
            Self::Logout(args) => args.run(),
            Self::Installations(args) => args.run().await,
            Self::Export(args) => args.run().await,
            Self::ExportAll(args) => args.run().await,
        }
    }
}
