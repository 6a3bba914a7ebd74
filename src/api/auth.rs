//! Registration, login and logout.

use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::{AuthResponse, Credentials, Registration, Session, User};

impl ApiClient {
    pub async fn register(&self, registration: &Registration) -> Result<User, ClientError> {
        self.send_json(Method::POST, "/auth/register", registration).await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// A 401 here means bad credentials, not an expired session.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        let resp: AuthResponse = self
            .send_json(Method::POST, "/auth/login", credentials)
            .await
            .map_err(|e| match e {
                ClientError::Unauthorized => ClientError::InvalidCredentials,
                other => other,
            })?;
        Ok(resp.into())
    }

    /// Invalidate the current token server side.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.send_empty(Method::POST, "/auth/logout").await
    }
}
