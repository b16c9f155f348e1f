use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::report::{Report, ReportKind};

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn report(&self, kind: ReportKind) -> AppResult<Report> {
        let path = kind.path();
        Ok(match kind {
            ReportKind::WorkHours => Report::WorkHours(self.get_json(path).await?),
            ReportKind::LeaveBalance => Report::LeaveBalance(self.get_json(path).await?),
            ReportKind::LeaveRequests => Report::LeaveRequests(self.get_json(path).await?),
            ReportKind::Tasks => Report::Tasks(self.get_json(path).await?),
            ReportKind::BillableHours => Report::BillableHours(self.get_json(path).await?),
            ReportKind::PerformanceMetrics => {
                Report::PerformanceMetrics(self.get_json(path).await?)
            }
        })
    }
}
