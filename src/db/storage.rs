//! Durable key-value storage backing the session and the time clock.
//!
//! Every value is stored as text; typed accessors parse on the way out and
//! treat unparsable values as absent, since the store is only a cache of
//! server-side truth.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use std::str::FromStr;

/// Names of the persisted keys.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_ID: &str = "user_id";
    pub const USERNAME: &str = "username";
    pub const IS_ADMIN: &str = "is_admin";
    pub const PROFILE: &str = "profile";

    pub const CLOCK_IN_TIME: &str = "clock_in_time";
    pub const RECORD_ID: &str = "record_id";
    pub const IS_ON_BREAK: &str = "is_on_break";
    pub const TOTAL_WORKED_SECONDS: &str = "total_worked_seconds";
    /// When `total_worked_seconds` was last written.
    pub const WORKED_AS_OF: &str = "worked_as_of";
    pub const BREAK_ID: &str = "break_id";
    pub const BREAK_TYPE: &str = "break_type";
    pub const BREAK_START_TIME: &str = "break_start_time";

    pub const SESSION: &[&str] = &[TOKEN, USER_ID, USERNAME, IS_ADMIN, PROFILE];

    pub const CLOCK: &[&str] = &[
        CLOCK_IN_TIME,
        RECORD_ID,
        IS_ON_BREAK,
        TOTAL_WORKED_SECONDS,
        WORKED_AS_OF,
        BREAK_ID,
        BREAK_TYPE,
        BREAK_START_TIME,
    ];

    pub const BREAK: &[&str] = &[BREAK_ID, BREAK_TYPE, BREAK_START_TIME];
}

pub struct LocalStore {
    pool: DbPool,
}

impl LocalStore {
    /// Open (or create) the store at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    pub fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM storage WHERE key = ?1")?;
        Ok(stmt.query_row([key], |row| row.get(0)).optional()?)
    }

    pub fn get_parsed<T: FromStr>(&self, key: &str) -> AppResult<Option<T>> {
        Ok(self.get(key)?.and_then(|v| v.parse().ok()))
    }

    pub fn get_bool(&self, key: &str) -> AppResult<bool> {
        Ok(self.get_parsed::<bool>(key)?.unwrap_or(false))
    }

    pub fn set(&self, key: &str, value: impl ToString) -> AppResult<()> {
        let mut stmt = self.pool.conn.prepare_cached(
            "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, value.to_string(), Local::now().to_rfc3339()])?;
        Ok(())
    }

    /// Write `Some` values, remove keys mapped to `None`.
    pub fn set_optional(&self, key: &str, value: Option<impl ToString>) -> AppResult<()> {
        match value {
            Some(v) => self.set(key, v),
            None => self.remove(&[key]),
        }
    }

    pub fn remove(&self, keys: &[&str]) -> AppResult<()> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("DELETE FROM storage WHERE key = ?1")?;
        for key in keys {
            stmt.execute([key])?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> AppResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
