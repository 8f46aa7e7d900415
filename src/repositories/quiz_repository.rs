use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::SecretString;

use crate::{
    config::Config,
    errors::AppResult,
    models::{
        domain::{Quiz, QuizSummary},
        dto::{
            request::{CreateQuizRequest, SubmitAttemptRequest, UpdateQuizRequest},
            response::{AttemptResponse, DashboardResponse},
        },
    },
    services::http_helpers::{endpoint, ensure_success, read_json, send, with_token},
};

/// Quiz endpoints of the backend. Every call carries the session token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// `Ok(None)` when the backend does not know the quiz.
    async fn find_by_id(&self, token: &SecretString, quiz_id: &str) -> AppResult<Option<Quiz>>;
    async fn list_dashboard(&self, token: &SecretString) -> AppResult<Vec<QuizSummary>>;
    async fn create(&self, token: &SecretString, request: &CreateQuizRequest) -> AppResult<Quiz>;
    async fn update(
        &self,
        token: &SecretString,
        quiz_id: &str,
        request: &UpdateQuizRequest,
    ) -> AppResult<()>;
    async fn delete(&self, token: &SecretString, quiz_id: &str) -> AppResult<()>;
    async fn submit_attempt(
        &self,
        token: &SecretString,
        quiz_id: &str,
        request: &SubmitAttemptRequest,
    ) -> AppResult<AttemptResponse>;
}

pub struct HttpQuizRepository {
    client: Client,
    base_url: String,
    auth_header: String,
}

impl HttpQuizRepository {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            auth_header: config.auth_header.clone(),
        }
    }

    fn quiz_url(&self, quiz_id: &str) -> String {
        endpoint(&self.base_url, &format!("quiz/{}", quiz_id))
    }
}

#[async_trait]
impl QuizRepository for HttpQuizRepository {
    async fn find_by_id(&self, token: &SecretString, quiz_id: &str) -> AppResult<Option<Quiz>> {
        let url = self.quiz_url(quiz_id);
        log::debug!("GET {}", url);

        let response = send(with_token(self.client.get(&url), &self.auth_header, token)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        Ok(Some(read_json(response).await?))
    }

    async fn list_dashboard(&self, token: &SecretString) -> AppResult<Vec<QuizSummary>> {
        let url = endpoint(&self.base_url, "dashboard");
        log::debug!("GET {}", url);

        let response = send(with_token(self.client.get(&url), &self.auth_header, token)).await?;
        let response = ensure_success(response).await?;
        let dashboard: DashboardResponse = read_json(response).await?;

        Ok(dashboard.dashboard_data.unwrap_or_default())
    }

    async fn create(&self, token: &SecretString, request: &CreateQuizRequest) -> AppResult<Quiz> {
        let url = endpoint(&self.base_url, "quiz/create");
        log::debug!("POST {}", url);

        let builder = with_token(self.client.post(&url), &self.auth_header, token).json(request);
        let response = ensure_success(send(builder).await?).await?;
        read_json(response).await
    }

    async fn update(
        &self,
        token: &SecretString,
        quiz_id: &str,
        request: &UpdateQuizRequest,
    ) -> AppResult<()> {
        let url = self.quiz_url(quiz_id);
        log::debug!("PUT {}", url);

        let builder = with_token(self.client.put(&url), &self.auth_header, token).json(request);
        ensure_success(send(builder).await?).await?;
        Ok(())
    }

    async fn delete(&self, token: &SecretString, quiz_id: &str) -> AppResult<()> {
        let url = self.quiz_url(quiz_id);
        log::debug!("DELETE {}", url);

        let builder = with_token(self.client.delete(&url), &self.auth_header, token);
        ensure_success(send(builder).await?).await?;
        Ok(())
    }

    async fn submit_attempt(
        &self,
        token: &SecretString,
        quiz_id: &str,
        request: &SubmitAttemptRequest,
    ) -> AppResult<AttemptResponse> {
        let url = endpoint(&self.base_url, &format!("quiz/{}/attempt", quiz_id));
        log::debug!("POST {}", url);

        let builder = with_token(self.client.post(&url), &self.auth_header, token).json(request);
        let response = ensure_success(send(builder).await?).await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_url() {
        let repository = HttpQuizRepository::new(&Config::with_base_url("http://localhost:3000/"));
        assert_eq!(repository.quiz_url("q1"), "http://localhost:3000/quiz/q1");
    }

    #[test]
    fn test_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpQuizRepository>();
    }
}
