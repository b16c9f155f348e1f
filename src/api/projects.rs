use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::project::{Project, ProjectInput};
use reqwest::Method;

impl ApiClient {
    #[tracing::instrument(skip(self))]
    pub async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.get_json("projects/").await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_project(&self, input: &ProjectInput) -> AppResult<Project> {
        self.send_json(Method::POST, "projects/", input).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_project(&self, id: i64, input: &ProjectInput) -> AppResult<Project> {
        self.send_json(Method::PATCH, &format!("projects/{}/", id), input)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_project(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("projects/{}/", id)).await
    }
}
