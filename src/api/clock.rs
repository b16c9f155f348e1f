use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::clock::{BreakRecord, BreakType, ClockRecord};
use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

/// Server operations the time clock depends on.
///
/// Implemented by [`ApiClient`]; tests substitute an in-memory server.
#[async_trait]
pub trait ClockApi: Send + Sync {
    /// Open a new clock record for the authenticated user.
    async fn clock_in(&self) -> AppResult<ClockRecord>;

    /// Close `record_id`; the server also ends any break still open in it.
    async fn clock_out(&self, record_id: i64) -> AppResult<ClockRecord>;

    async fn start_break(
        &self,
        record_id: i64,
        break_type: BreakType,
        notes: &str,
    ) -> AppResult<BreakRecord>;

    async fn end_break(&self, break_id: i64) -> AppResult<()>;

    /// The user's open clock record, if any.
    async fn active_clock_in(&self) -> AppResult<Option<ClockRecord>>;

    /// The open break inside `record_id`, if any.
    async fn active_break(&self, record_id: i64) -> AppResult<Option<BreakRecord>>;
}

#[derive(Debug, Serialize)]
struct ClockOutRequest {
    record_id: i64,
}

#[derive(Debug, Serialize)]
struct TakeBreakRequest<'a> {
    record_id: i64,
    break_type: BreakType,
    notes: &'a str,
}

#[derive(Debug, Serialize)]
struct EndBreakRequest {
    break_id: i64,
}

#[async_trait]
impl ClockApi for ApiClient {
    #[tracing::instrument(skip(self))]
    async fn clock_in(&self) -> AppResult<ClockRecord> {
        self.send_json(Method::POST, "clock-in/", &serde_json::json!({}))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn clock_out(&self, record_id: i64) -> AppResult<ClockRecord> {
        self.send_json(Method::POST, "clock-out/", &ClockOutRequest { record_id })
            .await
    }

    #[tracing::instrument(skip(self, notes))]
    async fn start_break(
        &self,
        record_id: i64,
        break_type: BreakType,
        notes: &str,
    ) -> AppResult<BreakRecord> {
        let req = TakeBreakRequest {
            record_id,
            break_type,
            notes,
        };
        self.send_json(Method::POST, "take-break/", &req).await
    }

    #[tracing::instrument(skip(self))]
    async fn end_break(&self, break_id: i64) -> AppResult<()> {
        self.send_unit(Method::POST, "end-break/", &EndBreakRequest { break_id })
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn active_clock_in(&self) -> AppResult<Option<ClockRecord>> {
        let record: Option<ClockRecord> = self.get_optional("active-clock-in/").await?;
        Ok(record.filter(ClockRecord::is_open))
    }

    #[tracing::instrument(skip(self))]
    async fn active_break(&self, record_id: i64) -> AppResult<Option<BreakRecord>> {
        let path = format!("active-break/?record_id={}", record_id);
        let brk: Option<BreakRecord> = self.get_optional(&path).await?;
        Ok(brk.filter(BreakRecord::is_active))
    }
}
