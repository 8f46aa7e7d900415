use std::sync::Arc;

use crate::{
    auth::{is_owner, require_owner, Session},
    errors::{AppError, AppResult},
    models::{
        domain::{QuizDraft, QuizSummary},
        dto::request::UpdateQuizRequest,
    },
    repositories::QuizRepository,
    services::{
        quiz_attempt_service::QuizAttemptService,
        quiz_editor_service::{EditorOutcome, QuizEditorService},
    },
};

/// The signed-in user's dashboard list.
///
/// Entries only change after the backend confirms a create, edit or delete.
/// A failed request leaves the list as it was.
pub struct QuizCatalogService {
    repository: Arc<dyn QuizRepository>,
    session: Arc<Session>,
    entries: Option<Vec<QuizSummary>>, // None until the first successful load
}

impl QuizCatalogService {
    pub fn new(repository: Arc<dyn QuizRepository>, session: Arc<Session>) -> Self {
        Self {
            repository,
            session,
            entries: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.is_some()
    }

    pub fn entries(&self) -> &[QuizSummary] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub fn find(&self, quiz_id: &str) -> Option<&QuizSummary> {
        self.entries().iter().find(|entry| entry.quiz_id == quiz_id)
    }

    /// Whether edit and delete should be offered for `entry`.
    pub fn can_modify(&self, entry: &QuizSummary) -> bool {
        is_owner(entry, &self.session)
    }

    pub async fn load(&mut self) -> AppResult<&[QuizSummary]> {
        let token = self.session.require_token()?;

        let fetched = self.repository.list_dashboard(&token).await;
        match fetched {
            Ok(entries) => {
                log::info!("Loaded {} quizzes into the catalog", entries.len());
                self.entries = Some(entries);
                Ok(self.entries())
            }
            Err(err) => {
                log::error!("Failed to load the quiz catalog: {}", err);
                Err(err)
            }
        }
    }

    pub fn new_quiz_editor(&self) -> QuizEditorService {
        QuizEditorService::for_create(Arc::clone(&self.repository), Arc::clone(&self.session))
    }

    /// Opens an editor on a cached entry. Owner only.
    ///
    /// Dashboard entries carry no questions, so the full quiz is fetched
    /// unless the entry already holds them.
    pub async fn start_edit(&self, quiz_id: &str) -> AppResult<QuizEditorService> {
        let entry = self
            .find(quiz_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz '{}'", quiz_id)))?;
        require_owner(entry, &self.session)?;

        let draft = match QuizDraft::from_summary(entry) {
            Some(draft) => draft,
            None => self.fetch_draft(quiz_id).await?,
        };

        Ok(QuizEditorService::for_edit(
            Arc::clone(&self.repository),
            Arc::clone(&self.session),
            quiz_id,
            draft,
        ))
    }

    async fn fetch_draft(&self, quiz_id: &str) -> AppResult<QuizDraft> {
        let token = self.session.require_token()?;

        match self.repository.find_by_id(&token, quiz_id).await {
            Ok(Some(quiz)) => Ok(QuizDraft::from_quiz(&quiz)),
            Ok(None) => Err(AppError::NotFound(format!("Quiz '{}'", quiz_id))),
            Err(err) => {
                log::error!("Failed to fetch quiz {} for editing: {}", quiz_id, err);
                Err(err)
            }
        }
    }

    /// Submits the editor and applies the confirmed result.
    pub async fn save(&mut self, editor: &mut QuizEditorService) -> AppResult<()> {
        let outcome = editor.submit().await?;
        self.apply(outcome);
        Ok(())
    }

    pub fn apply(&mut self, outcome: EditorOutcome) {
        let entries = self.entries.get_or_insert_with(Vec::new);

        match outcome {
            EditorOutcome::Created(summary) => {
                log::info!("Adding quiz {} to the catalog", summary.quiz_id);
                entries.push(summary);
            }
            EditorOutcome::Updated { quiz_id, update } => {
                match entries.iter_mut().find(|entry| entry.quiz_id == quiz_id) {
                    Some(entry) => *entry = merged(entry, &update),
                    None => log::warn!("Edited quiz {} is not in the catalog", quiz_id),
                }
            }
        }
    }

    /// Deletes on the backend, then drops the one matching entry. Owner only.
    pub async fn delete(&mut self, quiz_id: &str) -> AppResult<()> {
        let entry = self
            .find(quiz_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz '{}'", quiz_id)))?;
        require_owner(entry, &self.session)?;
        let token = self.session.require_token()?;

        if let Err(err) = self.repository.delete(&token, quiz_id).await {
            log::error!("Failed to delete quiz {}: {}", quiz_id, err);
            return Err(err);
        }

        if let Some(entries) = self.entries.as_mut() {
            if let Some(position) = entries.iter().position(|entry| entry.quiz_id == quiz_id) {
                entries.remove(position);
            }
        }
        log::info!("Deleted quiz {}", quiz_id);
        Ok(())
    }

    /// Inline attempt from the dashboard. Same engine as the standalone view.
    pub fn start_attempt(&self, quiz_id: &str) -> QuizAttemptService {
        QuizAttemptService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.session),
            quiz_id,
        )
    }
}

/// Shallow merge of an edit. Fields outside the edit payload, such as
/// visibility and the backend aggregates, keep their cached values.
fn merged(entry: &QuizSummary, update: &UpdateQuizRequest) -> QuizSummary {
    QuizSummary {
        title: update.title.clone(),
        description: update.description.clone(),
        questions: Some(update.questions.clone()),
        ..entry.clone()
    }
}
