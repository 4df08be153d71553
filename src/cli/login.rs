use chrono::Utc;
use clap::Parser;

use crate::{
    api::zaptec,
    cli::zaptec::{SessionArgs, ZaptecArgs},
    prelude::*,
    session::{Session, SessionStore},
};

#[derive(Parser)]
pub struct LoginArgs {
    #[clap(flatten)]
    zaptec: ZaptecArgs,

    #[clap(long, env = "ZAPTEC_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginArgs {
    pub async fn run(self) -> Result {
        let session = &self.zaptec.session;
        let access_token =
            zaptec::request_access_token(&self.zaptec.api_url, &session.user, &self.password)
                .await
                .context("failed to log in")?;
        session.store().create(Session {
            access_token,
            user: session.user.clone(),
            created_at: Utc::now(),
        })?;
        info!(user = session.user, "logged in");
        Ok(())
    }
}

#[derive(Parser)]
pub struct LogoutArgs {
    #[clap(flatten)]
    session: SessionArgs,
}

impl LogoutArgs {
    pub fn run(self) -> Result {
        if self.session.store().delete(&self.session.user)? {
            info!(user = self.session.user, "logged out");
        } else {
            warn!(user = self.session.user, "was not logged in");
        }
        Ok(())
    }
}
