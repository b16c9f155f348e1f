//! Authenticated user session, persisted in the local store.
//!
//! A [`Session`] is created from the login response and destroyed on logout.
//! It is passed explicitly to whatever needs credentials.

use crate::api::ApiClient;
use crate::db::log::ttlog_quiet;
use crate::db::storage::{LocalStore, keys};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl Session {
    pub fn require_admin(&self) -> AppResult<&Self> {
        if self.is_admin {
            Ok(self)
        } else {
            Err(AppError::AdminRequired)
        }
    }
}

/// Load/save/clear of the session keys.
pub struct SessionStore<'a> {
    store: &'a LocalStore,
}

impl<'a> SessionStore<'a> {
    pub fn new(store: &'a LocalStore) -> Self {
        Self { store }
    }

    /// The persisted session, if a complete one is present.
    pub fn load(&self) -> AppResult<Option<Session>> {
        let Some(token) = self.store.get(keys::TOKEN)?.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        let Some(user_id) = self.store.get_parsed::<i64>(keys::USER_ID)? else {
            return Ok(None);
        };

        Ok(Some(Session {
            token,
            user_id,
            username: self.store.get(keys::USERNAME)?.unwrap_or_default(),
            is_admin: self.store.get_bool(keys::IS_ADMIN)?,
        }))
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        self.store.set(keys::TOKEN, &session.token)?;
        self.store.set(keys::USER_ID, session.user_id)?;
        self.store.set(keys::USERNAME, &session.username)?;
        self.store.set(keys::IS_ADMIN, session.is_admin)?;
        Ok(())
    }

    /// Authenticate against the server and persist the resulting session.
    ///
    /// The profile is fetched and cached afterwards; a failure there does not
    /// undo the login.
    pub async fn login(&self, api: &ApiClient, email: &str, password: &str) -> AppResult<Session> {
        let resp = api.login(email, password).await.map_err(|e| match e {
            AppError::Unauthorized => AppError::Validation("Invalid email or password".into()),
            other => other,
        })?;

        let session = Session {
            username: if resp.username.is_empty() {
                email.to_string()
            } else {
                resp.username
            },
            token: resp.token,
            user_id: resp.user_id,
            is_admin: resp.is_admin,
        };

        // A previous user's clock state must not leak into this session.
        self.store.remove(keys::CLOCK)?;
        self.store.remove(&[keys::PROFILE])?;
        self.save(&session)?;

        let authed = api.clone().for_session(&session);
        match authed.profile(session.user_id).await {
            Ok(profile) => self.cache_profile(&profile)?,
            Err(e) => tracing::warn!("Could not fetch profile: {}", e),
        }

        ttlog_quiet(
            self.store.conn(),
            "login",
            &session.username,
            if session.is_admin {
                "Logged in (admin)"
            } else {
                "Logged in"
            },
        );

        Ok(session)
    }

    /// Destroy the session and everything cached for it.
    pub fn logout(&self) -> AppResult<Option<Session>> {
        let previous = self.load()?;
        self.store.remove(keys::SESSION)?;
        self.store.remove(keys::CLOCK)?;

        if let Some(s) = &previous {
            ttlog_quiet(self.store.conn(), "logout", &s.username, "Logged out");
        }
        Ok(previous)
    }

    pub fn cache_profile(&self, profile: &Profile) -> AppResult<()> {
        let json = serde_json::to_string(profile).map_err(|e| AppError::Other(e.to_string()))?;
        self.store.set(keys::PROFILE, json)
    }

    pub fn cached_profile(&self) -> AppResult<Option<Profile>> {
        Ok(self
            .store
            .get(keys::PROFILE)?
            .and_then(|json| serde_json::from_str(&json).ok()))
    }
}
