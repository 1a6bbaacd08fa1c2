//! REST implementation of [`AuthService`].
//!
//! Endpoints (relative to the configured API URL):
//! - `POST /auth/login`           `{email, password}`            -> `{token, user}`
//! - `POST /auth/register`        `{name, email, password}`      -> `{token, user}`
//! - `POST /auth/logout`                                         -> any 2xx
//! - `POST /auth/change-password` `{currentPassword, newPassword}` -> any 2xx
//!
//! Non-2xx responses become [`ServiceError::Rejected`], with the message taken
//! from a JSON body of the form `{"message": "..."}` when present.

use crate::{
    AuthService, Credentials, PasswordChange, Registration, ServiceError, ServiceResult,
    SessionRecord,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use session_store::{SessionStorage, StorageKeys};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client for the auth service.
#[derive(Clone)]
pub struct HttpAuthService {
    http_client: Client,
    api_url: String,
    token_storage: Option<Arc<dyn SessionStorage>>,
}

impl HttpAuthService {
    /// Create a client for `api_url` whose requests time out after `timeout`.
    pub fn new(api_url: &str, timeout: Duration) -> ServiceResult<Self> {
        Url::parse(api_url)?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token_storage: None,
        })
    }

    /// Attach the stored session token as a bearer header on every request
    /// that does not carry its own token.
    pub fn with_token_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.token_storage = Some(storage);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/{}", self.api_url, path)
    }

    fn stored_token(&self) -> Option<String> {
        let storage = self.token_storage.as_ref()?;
        match storage.get(StorageKeys::TOKEN) {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "Could not read stored token for request");
                None
            }
        }
    }

    fn post(&self, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(url = %url, "Calling auth service");

        let request = self
            .http_client
            .post(url)
            .header("Accept", "application/json");

        match token.map(str::to_string).or_else(|| self.stored_token()) {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn session_from(&self, response: Response, operation: &str) -> ServiceResult<SessionRecord> {
        let response = check_status(response, operation).await?;
        let body = response.text().await?;
        let session: SessionRecord = serde_json::from_str(&body)?;
        info!(user_id = %session.user.id, operation, "Auth service returned session");
        Ok(session)
    }
}

/// Turn a non-success response into a rejection carrying the service message.
async fn check_status(response: Response, operation: &str) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body);
    warn!(
        status = %status,
        operation,
        body_len = body.len(),
        has_message = message.is_some(),
        "Auth service rejected request"
    );

    Err(ServiceError::Rejected {
        status: status.as_u16(),
        message,
    })
}

/// Pull `message` (or `error`) out of a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|field| value.get(field).and_then(|v| v.as_str()))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> ServiceResult<SessionRecord> {
        let response = self.post("login", None).json(credentials).send().await?;
        self.session_from(response, "login").await
    }

    async fn register(&self, registration: &Registration) -> ServiceResult<SessionRecord> {
        let response = self
            .post("register", None)
            .json(registration)
            .send()
            .await?;
        self.session_from(response, "register").await
    }

    async fn logout(&self) -> ServiceResult<()> {
        let response = self.post("logout", None).send().await?;
        check_status(response, "logout").await?;
        Ok(())
    }

    async fn change_password(&self, change: &PasswordChange) -> ServiceResult<()> {
        let response = self
            .post("change-password", Some(&change.token))
            .json(change)
            .send()
            .await?;
        check_status(response, "change_password").await?;
        Ok(())
    }
}
