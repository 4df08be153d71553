use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

use crate::{
    api::zaptec::Api,
    prelude::*,
    session::{FileSessionStore, SessionStore},
};

#[derive(Parser)]
pub struct ZaptecArgs {
    #[clap(
        long = "zaptec-api-url",
        default_value = "https://api.zaptec.com",
        env = "ZAPTEC_API_URL"
    )]
    pub api_url: Url,

    #[clap(flatten)]
    pub session: SessionArgs,
}

impl ZaptecArgs {
    /// Connect to the API on behalf of the logged-in user.
    pub fn connect(&self) -> Result<Api> {
        Api::try_new(self.api_url.clone(), &self.session.access_token()?)
    }
}

#[derive(Parser)]
pub struct SessionArgs {
    #[clap(long, default_value = "sessions.toml", env = "SESSION_FILE")]
    pub session_file: PathBuf,

    /// Zaptec user name, normally the e-mail address.
    #[clap(long = "username", env = "ZAPTEC_USERNAME")]
    pub user: String,
}

impl SessionArgs {
    pub fn store(&self) -> FileSessionStore {
        FileSessionStore::new(&self.session_file)
    }

    fn access_token(&self) -> Result<String> {
        let session = self
            .store()
            .get(&self.user)?
            .with_context(|| format!("`{}` is not logged in, run `login` first", self.user))?;
        Ok(session.access_token)
    }
}
