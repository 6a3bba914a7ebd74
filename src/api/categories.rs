use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{Category, CategoryDraft};

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.get_json("/categories").await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        self.send_json(Method::POST, "/categories", draft).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        self.send_json(Method::PUT, &format!("/categories/{}", id), draft)
            .await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("/categories/{}", id))
            .await
    }
}
