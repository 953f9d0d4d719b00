//! Request pipeline: credential transport and the CSRF retry protocol.
//!
//! Every call goes through [`ApiClient`]. Read calls are plain; state-changing
//! calls attach the current CSRF token in session mode and, when the server
//! reports the token stale, run a refresh-and-retry round exactly once.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use meterdesk_core::{ApiError, normalize};

use crate::types::AuthMeResp;

/// Header carrying the CSRF token on state-changing calls in session mode.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Literal marker in a 403 body signalling an expired CSRF token.
const CSRF_REQUIRED: &str = "csrf_required";

/// Credential transport, selected when the client is constructed.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// Cookie-backed login session; state-changing calls carry the CSRF token
    /// and participate in the refresh-and-retry protocol.
    Session,
    /// Out-of-band administrative bearer token. Bypasses cookies and CSRF
    /// mechanics entirely.
    Bearer(String),
}

/// HTTP client for the console API.
///
/// Holds the base URL, the credential mode, and (in session mode) the current
/// CSRF token. The token is refreshed by [`ApiClient::auth_me`] and by the
/// retry protocol; callers never manage it directly.
pub struct ApiClient {
    base_url: String,
    mode: AuthMode,
    csrf_token: Mutex<String>,
    http: reqwest::Client,
}

/// Terminal outcomes of the CSRF refresh-and-retry round.
///
/// Modeled explicitly so the "never double-retry" invariant is visible: every
/// outcome either yields the retried response or falls back to the original
/// failure, and no outcome re-enters the protocol.
enum CsrfRetry {
    /// The retried call went through; its response replaces the original.
    RetrySucceeded(Response),
    /// A fresh token was obtained but the retried call failed as well.
    RetryFailed,
    /// The session check failed or reported no usable token.
    RefreshFailed,
}

impl ApiClient {
    /// Client in cookie/session mode.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_mode(base_url, AuthMode::Session)
    }

    /// Client in bearer mode. A blank token falls back to session mode, so
    /// unset configuration behaves like an ordinary browser session.
    pub fn with_admin_token(base_url: &str, token: &str) -> Result<Self, ApiError> {
        let token = token.trim();
        if token.is_empty() {
            Self::with_mode(base_url, AuthMode::Session)
        } else {
            Self::with_mode(base_url, AuthMode::Bearer(token.to_string()))
        }
    }

    /// Construction fails only when the TLS/connector backend cannot be set
    /// up; that surfaces as an [`ApiError`] like any other transport failure.
    pub fn with_mode(base_url: &str, mode: AuthMode) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            mode,
            csrf_token: Mutex::new(String::new()),
            http,
        })
    }

    /// Seed the CSRF token, e.g. from a previously checked session.
    pub async fn set_csrf_token(&self, token: impl Into<String>) {
        *self.csrf_token.lock().await = token.into();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_bearer(&self) -> bool {
        matches!(self.mode, AuthMode::Bearer(_))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn credentials(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.mode {
            AuthMode::Bearer(token) => req.bearer_auth(token),
            // Session cookies ride along via the cookie store.
            AuthMode::Session => req,
        }
    }

    async fn send(req: RequestBuilder) -> Result<Response, ApiError> {
        req.send().await.map_err(|e| ApiError::network(e.to_string()))
    }

    async fn decode_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))
    }

    async fn body_text(resp: Response) -> String {
        resp.text().await.unwrap_or_default()
    }

    /// Read call. Never attaches a CSRF token and never retries; a 403 is
    /// surfaced directly through the normalizer.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut req = self.credentials(self.http.get(self.url(path)));
        if !query.is_empty() {
            req = req.query(query);
        }

        let resp = Self::send(req).await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(normalize(status, &Self::body_text(resp).await));
        }
        Self::decode_json(resp).await
    }

    /// Plain-text read (the metrics endpoint is not JSON).
    pub async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let resp = Self::send(self.credentials(self.http.get(self.url(path)))).await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(normalize(status, &Self::body_text(resp).await));
        }
        resp.text()
            .await
            .map_err(|e| ApiError::decode(e.to_string()))
    }

    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_mutating(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_mutating(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request_mutating::<T, ()>(Method::DELETE, path, query, None)
            .await
    }

    /// State-changing call, subject to the CSRF refresh-and-retry protocol.
    ///
    /// The protocol applies only in session mode, only when the first attempt
    /// fails with 403 and a body containing the `csrf_required` marker. It
    /// runs at most once per logical call; when the refresh round does not
    /// produce a successful retry, the *original* failure is normalized and
    /// returned.
    async fn request_mutating<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.attempt(method.clone(), path, query, body).await?;
        if resp.status().is_success() {
            return Self::decode_json(resp).await;
        }

        let status = resp.status().as_u16();
        let text = Self::body_text(resp).await;

        if status == 403 && !self.is_bearer() && text.contains(CSRF_REQUIRED) {
            match self.refresh_and_retry(method, path, query, body).await {
                CsrfRetry::RetrySucceeded(retried) => return Self::decode_json(retried).await,
                CsrfRetry::RetryFailed | CsrfRetry::RefreshFailed => {}
            }
        }

        Err(normalize(status, &text))
    }

    /// One raw attempt of a state-changing call, with whatever CSRF token is
    /// currently known.
    async fn attempt<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self.credentials(self.http.request(method, self.url(path)));
        if !self.is_bearer() {
            let token = self.csrf_token.lock().await;
            if !token.is_empty() {
                req = req.header(CSRF_HEADER, token.as_str());
            }
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Self::send(req).await
    }

    /// The refresh-and-retry round: one session check, then at most one
    /// retried call. Failures of the round itself are logged and swallowed so
    /// they never mask the primary failure.
    async fn refresh_and_retry<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> CsrfRetry
    where
        B: Serialize + ?Sized,
    {
        let me = match self.auth_me().await {
            Ok(me) => me,
            Err(err) => {
                tracing::warn!(error = %err, "csrf refresh round-trip failed; keeping original error");
                return CsrfRetry::RefreshFailed;
            }
        };

        if !me.authenticated || me.csrf_token.is_empty() {
            tracing::warn!("session check reported no usable csrf token; keeping original error");
            return CsrfRetry::RefreshFailed;
        }

        match self.attempt(method, path, query, body).await {
            Ok(resp) if resp.status().is_success() => CsrfRetry::RetrySucceeded(resp),
            Ok(resp) => {
                tracing::warn!(status = resp.status().as_u16(), "retried call failed; keeping original error");
                CsrfRetry::RetryFailed
            }
            Err(err) => {
                tracing::warn!(error = %err, "retried call failed; keeping original error");
                CsrfRetry::RetryFailed
            }
        }
    }

    /// Session check (`GET /api/auth/me`).
    ///
    /// In session mode the reported token (empty when unauthenticated)
    /// replaces the stored one, so the pipeline and the session store always
    /// share the server's latest view.
    pub async fn auth_me(&self) -> Result<AuthMeResp, ApiError> {
        let me: AuthMeResp = self.get_json("/api/auth/me", &[]).await?;
        if !self.is_bearer() {
            *self.csrf_token.lock().await = me.csrf_token.clone();
        }
        Ok(me)
    }
}
