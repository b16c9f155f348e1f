use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::task::{Task, TaskInput};
use reqwest::Method;

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        self.get_json("tasks/").await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_task(&self, id: i64) -> AppResult<Task> {
        self.get_json(&format!("tasks/{}/", id)).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_task(&self, input: &TaskInput) -> AppResult<Task> {
        self.send_json(Method::POST, "tasks/", input).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_task(&self, id: i64, input: &TaskInput) -> AppResult<Task> {
        self.send_json(Method::PATCH, &format!("tasks/{}/", id), input)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("tasks/{}/", id)).await
    }
}
