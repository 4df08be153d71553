use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Logged-in user's access to the charging cloud.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

pub trait SessionStore {
    /// Store the session, replacing any previous one of the same user.
    fn create(&self, session: Session) -> Result;

    fn get(&self, user: &str) -> Result<Option<Session>>;

    /// Forget the user's session, returning whether there was one.
    fn delete(&self, user: &str) -> Result<bool>;
}

/// Sessions kept in a TOML file, keyed by the user name.
pub struct FileSessionStore {
    path: PathBuf,
}

#[derive(Default, Serialize, Deserialize)]
struct Sessions {
    #[serde(default)]
    sessions: BTreeMap<String, Session>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<Sessions> {
        read_from(&self.path)
            .with_context(|| format!("failed to read the sessions from `{}`", self.path.display()))
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn write(&self, sessions: &Sessions) -> Result {
        debug!(n_sessions = sessions.sessions.len(), "writing…");
        std::fs::write(&self.path, toml::to_string(sessions)?)
            .with_context(|| format!("failed to write the sessions to `{}`", self.path.display()))
    }
}

fn read_from(path: &Path) -> Result<Sessions> {
    if path.is_file() {
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    } else {
        Ok(Sessions::default())
    }
}

impl SessionStore for FileSessionStore {
    #[instrument(skip_all, fields(user = session.user))]
    fn create(&self, session: Session) -> Result {
        let mut sessions = self.read()?;
        sessions.sessions.insert(session.user.clone(), session);
        self.write(&sessions)?;
        info!("created");
        Ok(())
    }

    fn get(&self, user: &str) -> Result<Option<Session>> {
        Ok(self.read()?.sessions.remove(user))
    }

    #[instrument(skip_all, fields(user = user))]
    fn delete(&self, user: &str) -> Result<bool> {
        let mut sessions = self.read()?;
        if sessions.sessions.remove(user).is_none() {
            return Ok(false);
        }
        self.write(&sessions)?;
        info!("deleted");
        Ok(true)
    }
}
