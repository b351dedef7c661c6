//! HTTP client for the admin API
//!
//! Single chokepoint for every request: attaches the current session
//! credential as a bearer token and serializes failures into the console
//! error taxonomy. No retries here; retry policy belongs to callers.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use tc_core::session::SessionStore;
use tc_core::tenant::{Plan, Statistics, TenantDetail, TenantPage, TenantQuery, TenantUpdate};
use tc_core::{Error, Result};

use super::{AdminApi, LoginResponse};

const API_PREFIX: &str = "/api/admin";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ExtendTrialRequest {
    days: u32,
}

#[derive(Serialize)]
struct SuspendRequest<'a> {
    reason: &'a str,
}

#[derive(Serialize)]
struct ActivateRequest {
    plan: Plan,
}

/// HTTP implementation of [`AdminApi`]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Attach the session credential, when one is live.
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.credential().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send the request and deserialize a JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.check(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| Error::request_failed(None, format!("Failed to parse response: {}", e)))
    }

    /// Send the request, discarding any success body.
    async fn execute_empty(&self, request: RequestBuilder) -> Result<()> {
        self.check(request).await.map(|_| ())
    }

    async fn check(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::request_failed(None, format!("Failed to reach API: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
        debug!(status = status.as_u16(), "API request failed: {}", message);
        Err(classify_status(status, message))
    }
}

/// Map a non-2xx status onto the error taxonomy. 401/403 mean the session
/// credential was absent, expired, or rejected; everything else is a plain
/// request failure carrying the server's message.
fn classify_status(status: StatusCode, message: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AuthInvalid(message),
        _ => Error::RequestFailed {
            status: Some(status.as_u16()),
            message,
        },
    }
}

/// Pull the server-provided `{message}` out of an error body, falling back
/// to the raw body text.
fn extract_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return Some(message.to_string());
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest { username, password });
        // A rejected login is a form error for the operator, not an
        // invalidated session; remap so the guard leaves it alone.
        match self.execute(request).await {
            Err(Error::AuthInvalid(message)) => Err(Error::RequestFailed {
                status: Some(401),
                message,
            }),
            other => other,
        }
    }

    async fn list_tenants(&self, query: &TenantQuery) -> Result<TenantPage> {
        let mut params: Vec<(&str, String)> = vec![("page", query.page.to_string())];
        if let Some(status) = query.status.as_param() {
            params.push(("status", status.to_string()));
        }
        let search = query.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }

        let request = self.client.get(self.url("/tenants")).query(&params);
        let request = self.authorize(request).await;
        self.execute(request).await
    }

    async fn fetch_statistics(&self) -> Result<Statistics> {
        let request = self.client.get(self.url("/stats"));
        let request = self.authorize(request).await;
        self.execute(request).await
    }

    async fn fetch_tenant(&self, tenant_id: Uuid) -> Result<TenantDetail> {
        let request = self.client.get(self.url(&format!("/tenants/{}", tenant_id)));
        let request = self.authorize(request).await;
        self.execute(request).await
    }

    async fn extend_trial(&self, tenant_id: Uuid, days: u32) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/tenants/{}/extend-trial", tenant_id)))
            .json(&ExtendTrialRequest { days });
        let request = self.authorize(request).await;
        self.execute_empty(request).await
    }

    async fn suspend(&self, tenant_id: Uuid, reason: &str) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/tenants/{}/suspend", tenant_id)))
            .json(&SuspendRequest { reason });
        let request = self.authorize(request).await;
        self.execute_empty(request).await
    }

    async fn activate(&self, tenant_id: Uuid, plan: Plan) -> Result<()> {
        let request = self
            .client
            .post(self.url(&format!("/tenants/{}/activate", tenant_id)))
            .json(&ActivateRequest { plan });
        let request = self.authorize(request).await;
        self.execute_empty(request).await
    }

    async fn update_tenant(&self, tenant_id: Uuid, update: &TenantUpdate) -> Result<()> {
        let request = self
            .client
            .put(self.url(&format!("/tenants/{}", tenant_id)))
            .json(update);
        let request = self.authorize(request).await;
        self.execute_empty(request).await
    }
}
