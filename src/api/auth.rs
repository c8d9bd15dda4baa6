//! Login, signup and profile endpoints.

use std::sync::Arc;

use tracing::info;

use crate::api::request::{json_headers, send_json};
use crate::api::ApiError;
use crate::models::{
    LoginRequest, LoginResponse, ProfileResponse, SignupRequest, SignupResponse,
};
use crate::traits::{HttpClient, Method};

/// Client for `/auth/*`
#[derive(Clone)]
pub struct AuthApiClient {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl AuthApiClient {
    pub fn new(http: Arc<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::to_string(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let response: LoginResponse = send_json(
            self.http.as_ref(),
            Method::Post,
            &url,
            Some(&body),
            &json_headers(None),
        )
        .await?;
        info!("Logged in as {}", email);
        Ok(response)
    }

    /// `POST /auth/signup`
    pub async fn signup(&self, email: &str, password: &str) -> Result<SignupResponse, ApiError> {
        let url = format!("{}/auth/signup", self.base_url);
        let body = serde_json::to_string(&SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        let response: SignupResponse = send_json(
            self.http.as_ref(),
            Method::Post,
            &url,
            Some(&body),
            &json_headers(None),
        )
        .await?;
        info!("Signed up {} (id {})", response.email, response.id);
        Ok(response)
    }

    /// `GET /auth/users/me`
    pub async fn profile(&self, token: &str) -> Result<ProfileResponse, ApiError> {
        let url = format!("{}/auth/users/me", self.base_url);
        send_json(
            self.http.as_ref(),
            Method::Get,
            &url,
            None,
            &json_headers(Some(token)),
        )
        .await
    }
}

impl std::fmt::Debug for AuthApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
