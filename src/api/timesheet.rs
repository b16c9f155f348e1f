use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::timesheet::TimesheetEntry;
use chrono::NaiveDate;

impl ApiClient {
    /// The signed-in user's clock records, optionally limited to one day.
    #[tracing::instrument(skip(self))]
    pub async fn timesheet(&self, date: Option<NaiveDate>) -> AppResult<Vec<TimesheetEntry>> {
        let path = match date {
            Some(d) => format!("timesheet/?date={}", d.format("%Y-%m-%d")),
            None => "timesheet/".to_string(),
        };
        self.get_json(&path).await
    }
}
