use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::token_store::TokenStore;

/// Thin wrapper over the backend's REST surface.
///
/// Configures a base URL once and attaches `Authorization: Bearer <token>`
/// to every request for which the store holds a token. Bodies are JSON both
/// ways; the raw decoded body is handed back to the domain services
/// unmodified for them to interpret.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<TokenStore>,
}

/// Shape of the backend's structured error body.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: Arc<TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            tokens,
        }
    }

    #[must_use]
    pub fn tokens(&self) -> Arc<TokenStore> {
        Arc::clone(&self.tokens)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path`, decoding the JSON body as `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(path, self.request(Method::GET, path)).await
    }

    /// POST `body` to `path`, decoding the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::POST, path).json(body))
            .await
    }

    /// POST to `path` with no request body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(path, self.request(Method::POST, path)).await
    }

    /// PUT `body` to `path`, decoding the JSON response as `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::PUT, path).json(body))
            .await
    }

    /// PUT `body` to `path`, ignoring whatever body comes back.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn put_ignore_body<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send_ignore_body(path, self.request(Method::PUT, path).json(body))
            .await
    }

    /// DELETE `path`, ignoring whatever body comes back.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_ignore_body(path, self.request(Method::DELETE, path))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let mut request = self.http.request(method, url);
        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let bytes = self.check(path, request).await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    async fn send_ignore_body(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<(), ApiError> {
        self.check(path, request).await.map(|_| ())
    }

    /// Runs the request and maps the failure taxonomy: 401 clears the stale
    /// token, other non-success statuses surface the backend's message.
    async fn check(&self, path: &str, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        debug!(path, "api request");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "unauthorized response, clearing stored token");
            if let Err(err) = self.tokens.clear() {
                warn!(%err, "could not clear stale token");
            }
            return Err(ApiError::Unauthorized);
        }

        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error.or(body.message))
                .unwrap_or_else(|| format!("request failed with status {status}"));
            return Err(ApiError::Backend { status, message });
        }
        Ok(bytes.to_vec())
    }
}
