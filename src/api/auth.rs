use super::client::ApiClient;
use crate::errors::AppResult;
use crate::models::employee::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl ApiClient {
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        self.post_anonymous("login/", &LoginRequest { email, password })
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn profile(&self, user_id: i64) -> AppResult<Profile> {
        self.get_json(&format!("employees/data/{}/", user_id)).await
    }
}
