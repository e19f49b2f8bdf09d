use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

/// An opaque bearer token issued by the backend. The client never inspects
/// its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SignupResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Signup and login calls. Token persistence is the caller's concern; this
/// service only talks to the backend.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Registers a new account. Returns the backend's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the backend rejects the
    /// registration.
    pub async fn signup(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body = Credentials { email, password };
        let response: SignupResponse = self.client.post("/api/auth/signup", &body).await?;
        Ok(response
            .message
            .or(response.token)
            .unwrap_or_else(|| "Registered successfully".to_string()))
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` when the backend answers success
    /// without a token, and the usual `ApiError` variants otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, ApiError> {
        let body = Credentials { email, password };
        let response: LoginResponse = self.client.post("/api/auth/login", &body).await?;
        response
            .token
            .filter(|t| !t.trim().is_empty())
            .map(AuthToken)
            .ok_or(ApiError::MissingToken)
    }
}
