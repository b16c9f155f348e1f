use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::leave::{LeaveBalance, LeaveRequest, LeaveRequestInput, LeaveStatus};
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: LeaveStatus,
}

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn list_leave_requests(&self) -> AppResult<Vec<LeaveRequest>> {
        self.get_json("leave-requests/").await
    }

    /// Validates locally first; an invalid request never reaches the server.
    #[tracing::instrument(skip(self, input))]
    pub async fn create_leave_request(&self, input: &LeaveRequestInput) -> AppResult<LeaveRequest> {
        input.validate()?;
        self.send_json(Method::POST, "leave-requests/", input).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_leave_request(
        &self,
        id: i64,
        input: &LeaveRequestInput,
    ) -> AppResult<LeaveRequest> {
        input.validate()?;
        self.send_json(Method::PUT, &format!("leave-requests/{}/", id), input)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_leave_request(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("leave-requests/{}/", id)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn leave_balance(&self) -> AppResult<LeaveBalance> {
        self.get_json("leave-balance/").await
    }

    /// Admin decision on a pending request.
    #[tracing::instrument(skip(self))]
    pub async fn set_leave_status(&self, id: i64, status: LeaveStatus) -> AppResult<LeaveRequest> {
        self.send_json(Method::PUT, &format!("leaves/{}/", id), &StatusUpdate { status })
            .await
    }
}
