use std::{env, str::FromStr};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_API_BASE_URL: &str = "https://quiz-app-backend-1-enh5.onrender.com";
pub const DEFAULT_AUTH_HEADER: &str = "token";

/// How the `id` claim of a session token maps to the subject identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubjectEncoding {
    /// The claim holds the subject base64-encoded a second time. This is what
    /// the current backend issues.
    #[default]
    Base64,
    /// The claim is the subject itself.
    Plain,
}

impl FromStr for SubjectEncoding {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base64" => Ok(SubjectEncoding::Base64),
            "plain" => Ok(SubjectEncoding::Plain),
            other => Err(AppError::InternalError(format!(
                "Unknown subject encoding '{}', expected 'base64' or 'plain'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub auth_header: String,
    pub subject_encoding: SubjectEncoding,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("QUIZ_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            auth_header: env::var("QUIZ_AUTH_HEADER")
                .unwrap_or_else(|_| DEFAULT_AUTH_HEADER.to_string()),
            subject_encoding: env::var("QUIZ_SUBJECT_ENCODING")
                .ok()
                .and_then(|e| e.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            subject_encoding: SubjectEncoding::default(),
        }
    }

    /// Check the values the HTTP repositories depend on.
    pub fn validate(&self) -> AppResult<()> {
        let url = reqwest::Url::parse(&self.api_base_url).map_err(|e| {
            AppError::InternalError(format!(
                "QUIZ_API_BASE_URL '{}' is not a valid URL: {}",
                self.api_base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AppError::InternalError(format!(
                "QUIZ_API_BASE_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.auth_header.trim().is_empty() {
            return Err(AppError::InternalError(
                "QUIZ_AUTH_HEADER must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self::with_base_url("http://localhost:3000")
    }
}
