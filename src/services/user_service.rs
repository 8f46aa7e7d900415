use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Session,
    errors::{AppError, AppResult},
    models::dto::request::{SignInRequest, SignUpRequest},
    repositories::UserRepository,
};

pub const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful";

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    session: Arc<Session>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, session: Arc<Session>) -> Self {
        Self {
            repository,
            session,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Registers an account. Does not sign in.
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<String> {
        request.validate()?;

        let message = self.repository.sign_up(&request).await.map_err(|err| {
            log::error!("Sign-up failed for {}: {}", request.email, err);
            err
        })?;

        log::info!("Registered account {}", request.email);
        Ok(message.unwrap_or_else(|| SIGNUP_SUCCESS_MESSAGE.to_string()))
    }

    /// Exchanges credentials for a token and returns the signed-in subject.
    ///
    /// A token that cannot be decoded leaves the user signed out.
    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<String> {
        request.validate()?;

        let token = self.repository.sign_in(&request).await.map_err(|err| {
            log::error!("Sign-in failed for {}: {}", request.email, err);
            err
        })?;

        self.session.initialize(&token);
        let subject = self.session.resolve_subject()?;

        log::info!("Signed in as {}", subject);
        Ok(subject)
    }

    /// Adopts a token obtained elsewhere, e.g. a persisted one.
    pub fn restore(&self, token: &str) -> AppResult<String> {
        if token.trim().is_empty() {
            return Err(AppError::ValidationError("Token must not be empty".to_string()));
        }

        self.session.initialize(token.trim());
        self.session.resolve_subject()
    }

    pub fn sign_out(&self) {
        self.session.clear();
    }
}
