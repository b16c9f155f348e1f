//! Per-invocation wiring: config, local store and the current session.

use crate::api::ApiClient;
use crate::config::Config;
use crate::db::storage::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::session::{Session, SessionStore};
use crate::tracker::{BreakPolicy, ConsoleNotifier, TimeTracker};
use std::fs;
use std::path::Path;

pub struct AppContext {
    pub cfg: Config,
    pub store: LocalStore,
}

impl AppContext {
    /// Open the local store named by `cfg`, creating its directory if needed.
    pub fn open(cfg: Config) -> AppResult<Self> {
        if let Some(parent) = Path::new(&cfg.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let store = LocalStore::open(&cfg.database)?;
        Ok(Self { cfg, store })
    }

    pub fn sessions(&self) -> SessionStore<'_> {
        SessionStore::new(&self.store)
    }

    pub fn session(&self) -> AppResult<Option<Session>> {
        self.sessions().load()
    }

    pub fn require_session(&self) -> AppResult<Session> {
        self.session()?.ok_or(AppError::NotLoggedIn)
    }

    /// Unauthenticated client, for login.
    pub fn api(&self) -> AppResult<ApiClient> {
        ApiClient::from_config(&self.cfg)
    }

    pub fn authed_api(&self) -> AppResult<(Session, ApiClient)> {
        let session = self.require_session()?;
        let api = self.api()?.for_session(&session);
        Ok((session, api))
    }

    pub fn admin_api(&self) -> AppResult<(Session, ApiClient)> {
        let (session, api) = self.authed_api()?;
        session.require_admin()?;
        Ok((session, api))
    }

    /// Hand the store over to a time tracker for the current session.
    /// Errors are left to the caller to print.
    pub fn into_tracker(self) -> AppResult<TimeTracker<ApiClient>> {
        let (session, api) = self.authed_api()?;
        Ok(TimeTracker::new(api, self.store, Some(session))
            .with_policy(BreakPolicy::from_config(&self.cfg))
            .with_overtime_threshold(self.cfg.overtime_threshold_secs())
            .with_notifier(ConsoleNotifier::without_errors()))
    }
}
