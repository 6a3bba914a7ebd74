//! REST client for the habits API.
//!
//! [`ApiClient`] owns a `reqwest::Client`, the base URL and an optional bearer
//! token. Endpoint groups live in submodules as further `impl ApiClient`
//! blocks:
//!
//! | Module        | Endpoints                                  |
//! |---------------|--------------------------------------------|
//! | `auth`        | `/auth/register`, `/auth/login`, `/auth/logout` |
//! | `users`       | `/users/me`                                |
//! | `habits`      | `/habits`, `/habits/{id}`                  |
//! | `completions` | `/habit-completions`, `/habit-completions/{id}` |
//! | `categories`  | `/categories`, `/categories/{id}`          |

pub mod auth;
pub mod categories;
pub mod completions;
pub mod habits;
pub mod users;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::errors::{ClientError, extract_error_message};

const USER_AGENT: &str = concat!("habitual/", env!("CARGO_PKG_VERSION"));

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| ClientError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach the bearer token sent with every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header("Accept", "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send the request and hand back the body of a 2xx response.
    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<String, ClientError> {
        let resp = builder.send().await.map_err(|source| ClientError::Transport {
            url: self.url(path),
            source,
        })?;
        let status = resp.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api request");

        let body = resp.text().await.map_err(|source| ClientError::Transport {
            url: self.url(path),
            source,
        })?;

        if status.is_success() {
            return Ok(body);
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                path: path.to_string(),
            }),
            _ => Err(ClientError::Status {
                status,
                message: extract_error_message(&body),
            }),
        }
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ClientError> {
        serde_json::from_str(body).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let body = self
            .send(Method::GET, path, self.request(Method::GET, path))
            .await?;
        Self::decode(path, &body)
    }

    pub(crate) async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let builder = self.request(Method::GET, path).query(query);
        let body = self.send(Method::GET, path, builder).await?;
        Self::decode(path, &body)
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<T, ClientError> {
        let builder = self.request(method.clone(), path).json(payload);
        let body = self.send(method, path, builder).await?;
        Self::decode(path, &body)
    }

    /// Fire a request whose response body is irrelevant (DELETE, logout).
    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), ClientError> {
        let builder = self.request(method.clone(), path);
        self.send(method, path, builder).await.map(|_| ())
    }
}
