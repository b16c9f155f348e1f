use super::notify::{ConsoleNotifier, Notifier};
use super::persist;
use super::state::{ActiveBreak, BreakPolicy, Counters, Snapshot, TrackerState};
use super::ticker::Ticker;
use crate::api::ClockApi;
use crate::db::log::ttlog_quiet;
use crate::db::storage::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::models::clock::{BreakRecord, BreakType, ClockOutSummary, ClockRecord};
use crate::session::Session;
use crate::ui::messages::Level;
use crate::utils::time::{format_hms, local_hm};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const TICK: Duration = Duration::from_secs(1);
const DEFAULT_OVERTIME_SECS: u64 = 8 * 3600;

fn lock(counters: &Mutex<Counters>) -> MutexGuard<'_, Counters> {
    counters.lock().unwrap_or_else(PoisonError::into_inner)
}

fn secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_seconds().max(0) as u64
}

/// The client-side time clock of one user.
///
/// Transitions take `&mut self`, so at most one request per tracker is ever
/// in flight. Tick tasks are owned by the tracker and stop when it is dropped
/// or [`shutdown`](Self::shutdown).
pub struct TimeTracker<A: ClockApi> {
    api: A,
    store: LocalStore,
    session: Option<Session>,
    notifier: Box<dyn Notifier>,
    policy: BreakPolicy,
    overtime_threshold_secs: u64,

    state: TrackerState,
    record_id: Option<i64>,
    clock_in_time: Option<DateTime<Utc>>,
    active_break: Option<ActiveBreak>,
    counters: Arc<Mutex<Counters>>,

    worked_ticker: Option<Ticker>,
    break_ticker: Option<Ticker>,
}

impl<A: ClockApi> TimeTracker<A> {
    pub fn new(api: A, store: LocalStore, session: Option<Session>) -> Self {
        Self {
            api,
            store,
            session,
            notifier: Box::new(ConsoleNotifier::default()),
            policy: BreakPolicy::default(),
            overtime_threshold_secs: DEFAULT_OVERTIME_SECS,
            state: TrackerState::ClockedOut,
            record_id: None,
            clock_in_time: None,
            active_break: None,
            counters: Arc::new(Mutex::new(Counters::default())),
            worked_ticker: None,
            break_ticker: None,
        }
    }

    pub fn with_policy(mut self, policy: BreakPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_overtime_threshold(mut self, secs: u64) -> Self {
        self.overtime_threshold_secs = secs;
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn record_id(&self) -> Option<i64> {
        self.record_id
    }

    pub fn clock_in_time(&self) -> Option<DateTime<Utc>> {
        self.clock_in_time
    }

    pub fn active_break(&self) -> Option<&ActiveBreak> {
        self.active_break.as_ref()
    }

    pub fn worked_seconds(&self) -> u64 {
        lock(&self.counters).worked_seconds
    }

    pub fn break_seconds(&self) -> u64 {
        lock(&self.counters).break_seconds
    }

    pub fn break_exceeded(&self) -> bool {
        lock(&self.counters).break_exceeded
    }

    pub fn snapshot(&self) -> Snapshot {
        let c = *lock(&self.counters);
        Snapshot {
            state: self.state,
            record_id: self.record_id,
            clock_in_time: self.clock_in_time,
            active_break: self.active_break.clone(),
            worked_seconds: c.worked_seconds,
            break_seconds: c.break_seconds,
            break_limit_secs: c.break_limit_secs,
            break_exceeded: c.break_exceeded,
        }
    }

    /// Cancel all timers. Counters freeze at their current values.
    pub fn shutdown(&mut self) {
        self.stop_tickers();
    }

    // ------------------------------------------------
    // Transitions
    // ------------------------------------------------

    /// Rebuild local state from the server's view of the current user.
    ///
    /// When the server cannot be reached, the state saved in the local store
    /// is used instead and a warning is raised.
    pub async fn reconcile(&mut self) -> AppResult<TrackerState> {
        let result = self.try_reconcile().await;
        if let Err(e) = &result {
            self.notifier.notify(Level::Error, &e.to_string());
        }
        result
    }

    pub async fn clock_in(&mut self) -> AppResult<ClockRecord> {
        let result = self.try_clock_in().await;
        self.report(result, |r| {
            format!("Clocked in successfully (record #{})", r.record_id)
        })
    }

    pub async fn clock_out(&mut self) -> AppResult<ClockOutSummary> {
        let result = self.try_clock_out().await;
        self.report(result, |s| {
            format!(
                "Clocked out successfully after {}",
                format_hms(s.worked_seconds)
            )
        })
    }

    /// Start a break. The allowance for `break_type` is advisory: exceeding it
    /// only sets the `break_exceeded` flag.
    pub async fn take_break(&mut self, break_type: BreakType, notes: &str) -> AppResult<BreakRecord> {
        let result = self.try_take_break(break_type, notes).await;
        self.report(result, |b| format!("{} started", b.break_type.label()))
    }

    /// End the current break and resume the worked-time counter.
    /// Returns the break length in seconds.
    pub async fn end_break(&mut self) -> AppResult<u64> {
        let exceeded = self.break_exceeded();
        let limit = lock(&self.counters).break_limit_secs;

        let result = self.try_end_break().await;
        let result = self.report(result, |secs| format!("Break ended after {}", format_hms(*secs)));

        if result.is_ok() && exceeded {
            self.notifier.notify(
                Level::Warning,
                &format!("Break exceeded the {}-minute allowance", limit / 60),
            );
        }
        result
    }

    async fn try_reconcile(&mut self) -> AppResult<TrackerState> {
        self.require_token()?;
        let now = Utc::now();

        match self.api.active_clock_in().await {
            Ok(Some(record)) => {
                // Local totals are only trusted for the record they were saved for.
                let saved = persist::load(&self.store)?
                    .filter(|s| s.record_id == Some(record.record_id));

                let active_break = match self.api.active_break(record.record_id).await {
                    Ok(brk) => brk.map(ActiveBreak::from),
                    Err(e) if e.is_transport() => {
                        tracing::warn!("active break query failed: {}", e);
                        self.notifier.notify(
                            Level::Warning,
                            "Server unreachable: break state taken from the local store",
                        );
                        saved.as_ref().and_then(|s| s.active_break.clone())
                    }
                    Err(e) => return Err(e),
                };

                let worked_until = active_break.as_ref().map_or(now, |b| b.started_at);
                let known_worked = saved.as_ref().and_then(|s| s.worked_at(worked_until));

                self.rehydrate(
                    Some(record.record_id),
                    record.clock_in_time,
                    active_break,
                    known_worked,
                    now,
                );
                self.persist()?;

                self.notifier.notify(
                    Level::Info,
                    &format!(
                        "Resumed session #{} (clocked in at {})",
                        record.record_id,
                        local_hm(record.clock_in_time)
                    ),
                );
            }
            Ok(None) => {
                self.reset();
                persist::clear(&self.store)?;
            }
            Err(e) if e.is_transport() => {
                tracing::warn!("active session query failed: {}", e);

                match persist::load(&self.store)? {
                    Some(saved) => {
                        let worked_until = saved.active_break.as_ref().map_or(now, |b| b.started_at);
                        let known_worked = saved.worked_at(worked_until);
                        self.rehydrate(
                            saved.record_id,
                            saved.clock_in_time,
                            saved.active_break,
                            known_worked,
                            now,
                        );
                        self.notifier.notify(
                            Level::Warning,
                            "Server unreachable: resumed from locally saved session",
                        );
                    }
                    None => {
                        self.reset();
                        self.notifier
                            .notify(Level::Warning, "Server unreachable: no saved session");
                    }
                }
            }
            Err(e) => return Err(e),
        }

        Ok(self.state)
    }

    async fn try_clock_in(&mut self) -> AppResult<ClockRecord> {
        self.require_token()?;
        if self.state.is_clocked_in() {
            return Err(AppError::AlreadyClockedIn);
        }

        let record = self.api.clock_in().await?;

        self.reset();
        self.record_id = Some(record.record_id);
        self.clock_in_time = Some(record.clock_in_time);
        self.state = TrackerState::ClockedIn;
        self.start_worked_ticker();
        self.persist()?;

        self.log("clock_in", record.record_id, "Clocked in");
        Ok(record)
    }

    async fn try_clock_out(&mut self) -> AppResult<ClockOutSummary> {
        self.require_token()?;
        if !self.state.is_clocked_in() {
            return Err(AppError::NotClockedIn);
        }

        let record_id = self.ensure_record_id().await?;
        let closed = self.api.clock_out(record_id).await?;

        self.stop_tickers();
        let worked = self.worked_seconds();
        let summary = ClockOutSummary::new(
            record_id,
            self.clock_in_time.or(Some(closed.clock_in_time)),
            closed.clock_out_time.unwrap_or_else(Utc::now),
            worked,
            self.overtime_threshold_secs,
        );

        self.reset();
        persist::clear(&self.store)?;

        self.log(
            "clock_out",
            record_id,
            &format!("Clocked out after {}", format_hms(worked)),
        );
        Ok(summary)
    }

    async fn try_take_break(&mut self, break_type: BreakType, notes: &str) -> AppResult<BreakRecord> {
        self.require_token()?;
        match self.state {
            TrackerState::ClockedOut => return Err(AppError::NotClockedIn),
            TrackerState::OnBreak => return Err(AppError::AlreadyOnBreak),
            TrackerState::ClockedIn => {}
        }

        let notes = notes.trim();
        if notes.is_empty() {
            return Err(AppError::Validation(
                "Please add notes before taking a break.".into(),
            ));
        }

        let record_id = self.ensure_record_id().await?;
        let brk = self.api.start_break(record_id, break_type, notes).await?;

        lock(&self.counters).start_break(self.policy.limit_secs(break_type), 0);
        self.active_break = Some(ActiveBreak {
            break_id: Some(brk.break_id),
            break_type,
            started_at: brk.start_time,
            notes: notes.to_string(),
        });
        self.state = TrackerState::OnBreak;
        self.start_break_ticker();
        self.persist()?;

        self.log(
            "break_start",
            record_id,
            &format!("{} started: {}", break_type.label(), notes),
        );
        Ok(brk)
    }

    async fn try_end_break(&mut self) -> AppResult<u64> {
        self.require_token()?;
        if self.state != TrackerState::OnBreak {
            return Err(AppError::NotOnBreak);
        }

        let known_id = self.active_break.as_ref().and_then(|b| b.break_id);
        let break_id = match known_id {
            Some(id) => Some(id),
            None => {
                let record_id = self.ensure_record_id().await?;
                self.api.active_break(record_id).await?.map(|b| b.break_id)
            }
        };

        match break_id {
            Some(id) => self.api.end_break(id).await?,
            None => tracing::warn!("server reports no open break; closing it locally"),
        }

        let duration = self.break_seconds();
        lock(&self.counters).clear_break();
        self.active_break = None;
        self.state = TrackerState::ClockedIn;
        self.start_worked_ticker();
        self.persist()?;

        if let Some(record_id) = self.record_id {
            self.log(
                "break_end",
                record_id,
                &format!("Break ended after {}", format_hms(duration)),
            );
        }
        Ok(duration)
    }

    // ------------------------------------------------
    // Helpers
    // ------------------------------------------------

    fn require_token(&self) -> AppResult<&Session> {
        self.session
            .as_ref()
            .filter(|s| !s.token.is_empty())
            .ok_or(AppError::NotLoggedIn)
    }

    fn report<T>(&self, result: AppResult<T>, on_success: impl FnOnce(&T) -> String) -> AppResult<T> {
        match &result {
            Ok(value) => self.notifier.notify(Level::Success, &on_success(value)),
            Err(e) => self.notifier.notify(Level::Error, &e.to_string()),
        }
        result
    }

    /// The open record id, asking the server when it was lost locally.
    async fn ensure_record_id(&mut self) -> AppResult<i64> {
        if let Some(id) = self.record_id {
            return Ok(id);
        }

        tracing::info!("record id unknown locally; querying active clock-in");
        match self.api.active_clock_in().await? {
            Some(record) => {
                self.record_id = Some(record.record_id);
                self.clock_in_time.get_or_insert(record.clock_in_time);
                Ok(record.record_id)
            }
            None => {
                // Nothing open on the server: the local session is stale.
                self.reset();
                persist::clear(&self.store)?;
                Err(AppError::NoActiveSession)
            }
        }
    }

    /// Rebuild state from a clock-in time and optional open break.
    /// `known_worked` overrides the total derived from the clock-in time,
    /// which counts every earlier break as work.
    fn rehydrate(
        &mut self,
        record_id: Option<i64>,
        clock_in: DateTime<Utc>,
        active_break: Option<ActiveBreak>,
        known_worked: Option<u64>,
        now: DateTime<Utc>,
    ) {
        self.stop_tickers();

        let worked_until = active_break.as_ref().map_or(now, |b| b.started_at);
        let worked = known_worked.unwrap_or_else(|| secs_between(clock_in, worked_until));

        {
            let mut c = lock(&self.counters);
            *c = Counters::default();
            c.worked_seconds = worked;
            if let Some(b) = &active_break {
                c.start_break(
                    self.policy.limit_secs(b.break_type),
                    secs_between(b.started_at, now),
                );
            }
        }

        self.record_id = record_id;
        self.clock_in_time = Some(clock_in);
        self.state = if active_break.is_some() {
            TrackerState::OnBreak
        } else {
            TrackerState::ClockedIn
        };
        self.active_break = active_break;

        if self.state == TrackerState::OnBreak {
            self.start_break_ticker();
        } else {
            self.start_worked_ticker();
        }
    }

    fn reset(&mut self) {
        self.stop_tickers();
        self.state = TrackerState::ClockedOut;
        self.record_id = None;
        self.clock_in_time = None;
        self.active_break = None;
        *lock(&self.counters) = Counters::default();
    }

    fn persist(&self) -> AppResult<()> {
        persist::save(
            &self.store,
            self.clock_in_time,
            self.record_id,
            self.worked_seconds(),
            self.active_break.as_ref(),
        )
    }

    fn log(&self, operation: &str, record_id: i64, message: &str) {
        ttlog_quiet(
            self.store.conn(),
            operation,
            &format!("record #{}", record_id),
            message,
        );
    }

    fn start_worked_ticker(&mut self) {
        self.break_ticker = None;
        let counters = Arc::clone(&self.counters);
        self.worked_ticker = Some(Ticker::spawn(TICK, move || {
            lock(&counters).tick_worked();
        }));
    }

    fn start_break_ticker(&mut self) {
        self.worked_ticker = None;
        let counters = Arc::clone(&self.counters);
        self.break_ticker = Some(Ticker::spawn(TICK, move || {
            lock(&counters).tick_break();
        }));
    }

    fn stop_tickers(&mut self) {
        self.worked_ticker = None;
        self.break_ticker = None;
    }
}
