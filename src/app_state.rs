use std::sync::Arc;

use crate::{
    auth::Session,
    config::Config,
    errors::AppResult,
    repositories::{HttpQuizRepository, HttpUserRepository, QuizRepository, UserRepository},
    services::{QuizAttemptService, QuizCatalogService, UserService},
};

/// Shared wiring for one signed-in client.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<Session>,
    pub quiz_repository: Arc<dyn QuizRepository>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        config.validate()?;

        let quiz_repository: Arc<dyn QuizRepository> = Arc::new(HttpQuizRepository::new(&config));
        let user_repository: Arc<dyn UserRepository> = Arc::new(HttpUserRepository::new(&config));

        Ok(Self::with_repositories(config, quiz_repository, user_repository))
    }

    /// Wires the services over caller-supplied repositories.
    pub fn with_repositories(
        config: Config,
        quiz_repository: Arc<dyn QuizRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        let session = Arc::new(Session::from_config(&config));
        let user_service = Arc::new(UserService::new(user_repository, Arc::clone(&session)));

        Self {
            config: Arc::new(config),
            session,
            quiz_repository,
            user_service,
        }
    }

    pub fn catalog(&self) -> QuizCatalogService {
        QuizCatalogService::new(Arc::clone(&self.quiz_repository), Arc::clone(&self.session))
    }

    /// Standalone attempt view for a quiz id.
    pub fn attempt(&self, quiz_id: &str) -> QuizAttemptService {
        QuizAttemptService::new(
            Arc::clone(&self.quiz_repository),
            Arc::clone(&self.session),
            quiz_id,
        )
    }
}
