use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{ProfileUpdate, User};

impl ApiClient {
    pub async fn current_user(&self) -> Result<User, ClientError> {
        self.get_json("/users/me").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ClientError> {
        self.send_json(Method::PATCH, "/users/me", update).await
    }
}
