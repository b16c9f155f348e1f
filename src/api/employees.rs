use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::employee::{Employee, EmployeeInput};
use reqwest::Method;

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.get_json("employees/data/").await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_employee(&self, input: &EmployeeInput) -> AppResult<Employee> {
        self.send_json(Method::POST, "employees/data/", input).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_employee(&self, id: i64, input: &EmployeeInput) -> AppResult<Employee> {
        self.send_json(Method::PATCH, &format!("employees/data/{}/", id), input)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_employee(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("employees/data/{}/", id)).await
    }
}
