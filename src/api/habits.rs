use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{Habit, HabitDraft};

impl ApiClient {
    /// All habits of the logged-in user, optionally narrowed to one category.
    pub async fn list_habits(&self, category_id: Option<i64>) -> Result<Vec<Habit>, ClientError> {
        match category_id {
            Some(id) => {
                self.get_json_with_query("/habits", &[("category_id", id.to_string())])
                    .await
            }
            None => self.get_json("/habits").await,
        }
    }

    pub async fn get_habit(&self, id: i64) -> Result<Habit, ClientError> {
        self.get_json(&format!("/habits/{}", id)).await
    }

    pub async fn create_habit(&self, draft: &HabitDraft) -> Result<Habit, ClientError> {
        self.send_json(Method::POST, "/habits", draft).await
    }

    pub async fn update_habit(&self, id: i64, draft: &HabitDraft) -> Result<Habit, ClientError> {
        self.send_json(Method::PUT, &format!("/habits/{}", id), draft)
            .await
    }

    pub async fn delete_habit(&self, id: i64) -> Result<(), ClientError> {
        self.send_empty(Method::DELETE, &format!("/habits/{}", id))
            .await
    }
}
