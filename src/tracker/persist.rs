//! Mirror of the clock state in the local store.

use super::state::ActiveBreak;
use crate::db::storage::{LocalStore, keys};
use crate::errors::AppResult;
use crate::models::clock::BreakType;
use chrono::{DateTime, Utc};

/// Clock state as found in the local store after a restart.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PersistedClock {
    pub clock_in_time: DateTime<Utc>,
    pub record_id: Option<i64>,
    pub total_worked_seconds: u64,
    /// Missing in stores written by older releases.
    pub worked_as_of: Option<DateTime<Utc>>,
    pub active_break: Option<ActiveBreak>,
}

impl PersistedClock {
    /// Worked total carried forward to `until`.
    ///
    /// The saved total is frozen while a break was open. Otherwise the time
    /// since it was written counts as work. `None` when the store does not
    /// say when the total was written and no break froze it.
    pub fn worked_at(&self, until: DateTime<Utc>) -> Option<u64> {
        if self.active_break.is_some() {
            return Some(self.total_worked_seconds);
        }
        self.worked_as_of.map(|as_of| {
            self.total_worked_seconds + (until - as_of).num_seconds().max(0) as u64
        })
    }
}

pub(crate) fn save(
    store: &LocalStore,
    clock_in_time: Option<DateTime<Utc>>,
    record_id: Option<i64>,
    worked_seconds: u64,
    active_break: Option<&ActiveBreak>,
) -> AppResult<()> {
    store.set_optional(keys::CLOCK_IN_TIME, clock_in_time.map(|t| t.to_rfc3339()))?;
    store.set_optional(keys::RECORD_ID, record_id)?;
    store.set(keys::TOTAL_WORKED_SECONDS, worked_seconds)?;
    store.set(keys::WORKED_AS_OF, Utc::now().to_rfc3339())?;
    store.set(keys::IS_ON_BREAK, active_break.is_some())?;

    match active_break {
        Some(b) => {
            store.set_optional(keys::BREAK_ID, b.break_id)?;
            store.set(keys::BREAK_TYPE, b.break_type)?;
            store.set(keys::BREAK_START_TIME, b.started_at.to_rfc3339())?;
        }
        None => store.remove(keys::BREAK)?,
    }
    Ok(())
}

pub(crate) fn load(store: &LocalStore) -> AppResult<Option<PersistedClock>> {
    let Some(clock_in_time) = store.get_parsed::<DateTime<Utc>>(keys::CLOCK_IN_TIME)? else {
        return Ok(None);
    };

    let active_break = if store.get_bool(keys::IS_ON_BREAK)? {
        let started_at = store.get_parsed::<DateTime<Utc>>(keys::BREAK_START_TIME)?;
        let break_type = store.get_parsed::<BreakType>(keys::BREAK_TYPE)?;
        match (started_at, break_type) {
            (Some(started_at), Some(break_type)) => Some(ActiveBreak {
                break_id: store.get_parsed(keys::BREAK_ID)?,
                break_type,
                started_at,
                notes: String::new(),
            }),
            _ => None,
        }
    } else {
        None
    };

    Ok(Some(PersistedClock {
        clock_in_time,
        record_id: store.get_parsed(keys::RECORD_ID)?,
        total_worked_seconds: store.get_parsed(keys::TOTAL_WORKED_SECONDS)?.unwrap_or(0),
        worked_as_of: store.get_parsed(keys::WORKED_AS_OF)?,
        active_break,
    }))
}

pub(crate) fn clear(store: &LocalStore) -> AppResult<()> {
    store.remove(keys::CLOCK)
}
