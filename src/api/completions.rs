use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{CompletionDraft, CompletionQuery, HabitCompletion};

impl ApiClient {
    pub async fn list_completions(
        &self,
        query: &CompletionQuery,
    ) -> Result<Vec<HabitCompletion>, ClientError> {
        let pairs = query.to_pairs();
        if pairs.is_empty() {
            self.get_json("/habit-completions").await
        } else {
            self.get_json_with_query("/habit-completions", &pairs).await
        }
    }

    pub async fn create_completion(
        &self,
        draft: &CompletionDraft,
    ) -> Result<HabitCompletion, ClientError> {
        self.send_json(Method::POST, "/habit-completions", draft)
            .await
    }

    pub async fn delete_completion(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("/habit-completions/{}", id))
            .await
    }
}
