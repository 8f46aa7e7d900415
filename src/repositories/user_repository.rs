use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::Config,
    errors::AppResult,
    models::dto::{
        request::{SignInRequest, SignUpRequest},
        response::{MessageResponse, SignInResponse},
    },
    services::http_helpers::{endpoint, ensure_success_or, read_json, send},
};

pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed";
pub const SIGNIN_FAILED_MESSAGE: &str = "Signin failed";

/// Account endpoints. These are the only unauthenticated calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the server's confirmation message, if it sent one.
    async fn sign_up(&self, request: &SignUpRequest) -> AppResult<Option<String>>;
    /// Returns the session token.
    async fn sign_in(&self, request: &SignInRequest) -> AppResult<String>;
}

pub struct HttpUserRepository {
    client: Client,
    base_url: String,
}

impl HttpUserRepository {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepository {
    async fn sign_up(&self, request: &SignUpRequest) -> AppResult<Option<String>> {
        let url = endpoint(&self.base_url, "signup");
        log::debug!("POST {}", url);

        let response = send(self.client.post(&url).json(request)).await?;
        let response = ensure_success_or(response, SIGNUP_FAILED_MESSAGE).await?;
        let body = response.text().await?;
        let message = serde_json::from_str::<MessageResponse>(&body)
            .unwrap_or_default()
            .message;

        Ok(message)
    }

    async fn sign_in(&self, request: &SignInRequest) -> AppResult<String> {
        let url = endpoint(&self.base_url, "signin");
        log::debug!("POST {}", url);

        let response = send(self.client.post(&url).json(request)).await?;
        let response = ensure_success_or(response, SIGNIN_FAILED_MESSAGE).await?;
        let body: SignInResponse = read_json(response).await?;

        Ok(body.token)
    }
}
