use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::Session,
    errors::{AppError, AppResult},
    models::{
        domain::{QuestionField, QuizDraft, QuizSummary},
        dto::request::{CreateQuizRequest, UpdateQuizRequest},
    },
    repositories::QuizRepository,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { quiz_id: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorStatus {
    Editing,
    Submitting,
    Closed,
}

/// Payload built from the draft, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorRequest {
    Create(CreateQuizRequest),
    Update {
        quiz_id: String,
        request: UpdateQuizRequest,
    },
}

/// What a confirmed save changed, for the catalog to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorOutcome {
    Created(QuizSummary),
    Updated {
        quiz_id: String,
        update: UpdateQuizRequest,
    },
}

pub struct QuizEditorService {
    repository: Arc<dyn QuizRepository>,
    session: Arc<Session>,
    mode: EditorMode,
    draft: QuizDraft,
    status: EditorStatus,
}

impl QuizEditorService {
    pub fn for_create(repository: Arc<dyn QuizRepository>, session: Arc<Session>) -> Self {
        Self {
            repository,
            session,
            mode: EditorMode::Create,
            draft: QuizDraft::default(),
            status: EditorStatus::Editing,
        }
    }

    pub fn for_edit(
        repository: Arc<dyn QuizRepository>,
        session: Arc<Session>,
        quiz_id: &str,
        draft: QuizDraft,
    ) -> Self {
        Self {
            repository,
            session,
            mode: EditorMode::Edit {
                quiz_id: quiz_id.to_string(),
            },
            draft,
            status: EditorStatus::Editing,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn draft(&self) -> &QuizDraft {
        &self.draft
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn set_title(&mut self, title: &str) -> AppResult<()> {
        self.replace_draft(|draft| Ok(draft.with_title(title)))
    }

    pub fn set_description(&mut self, description: &str) -> AppResult<()> {
        self.replace_draft(|draft| Ok(draft.with_description(description)))
    }

    /// Only sent when creating; the edit payload has no visibility field.
    pub fn set_visibility(&mut self, is_public: bool) -> AppResult<()> {
        self.replace_draft(|draft| Ok(draft.with_visibility(is_public)))
    }

    pub fn add_question(&mut self) -> AppResult<()> {
        self.replace_draft(|draft| Ok(draft.with_question_added()))
    }

    pub fn remove_question(&mut self, idx: usize) -> AppResult<()> {
        self.replace_draft(|draft| draft.with_question_removed(idx))
    }

    pub fn update_question_field(&mut self, idx: usize, field: QuestionField) -> AppResult<()> {
        self.replace_draft(|draft| draft.with_question_field(idx, field))
    }

    pub fn add_option(&mut self, q_idx: usize) -> AppResult<()> {
        self.replace_draft(|draft| draft.with_option_added(q_idx))
    }

    pub fn remove_option(&mut self, q_idx: usize, o_idx: usize) -> AppResult<()> {
        self.replace_draft(|draft| draft.with_option_removed(q_idx, o_idx))
    }

    pub fn update_option(&mut self, q_idx: usize, o_idx: usize, value: &str) -> AppResult<()> {
        self.replace_draft(|draft| draft.with_option_updated(q_idx, o_idx, value))
    }

    /// Validates the draft and moves to `Submitting`.
    pub fn begin_submission(&mut self) -> AppResult<EditorRequest> {
        match self.status {
            EditorStatus::Editing => {}
            EditorStatus::Submitting => {
                return Err(AppError::InvalidState(
                    "Quiz is already being saved".to_string(),
                ))
            }
            EditorStatus::Closed => {
                return Err(AppError::InvalidState("Editor is closed".to_string()))
            }
        }

        let request = match &self.mode {
            EditorMode::Create => {
                let request = CreateQuizRequest::from(&self.draft);
                request.validate()?;
                EditorRequest::Create(request)
            }
            EditorMode::Edit { quiz_id } => {
                let request = UpdateQuizRequest::from(&self.draft);
                request.validate()?;
                EditorRequest::Update {
                    quiz_id: quiz_id.clone(),
                    request,
                }
            }
        };

        self.status = EditorStatus::Submitting;
        Ok(request)
    }

    /// Closes the editor on success; on failure keeps the draft for a retry.
    pub fn finish_submission(
        &mut self,
        outcome: AppResult<EditorOutcome>,
    ) -> AppResult<EditorOutcome> {
        if self.status != EditorStatus::Submitting {
            return Err(AppError::InvalidState(
                "No save in progress".to_string(),
            ));
        }

        match outcome {
            Ok(outcome) => {
                log::info!("Quiz saved ({:?})", self.mode);
                self.status = EditorStatus::Closed;
                Ok(outcome)
            }
            Err(err) => {
                log::error!("Failed to save quiz ({:?}): {}", self.mode, err);
                self.status = EditorStatus::Editing;
                Err(err)
            }
        }
    }

    pub async fn submit(&mut self) -> AppResult<EditorOutcome> {
        let request = self.begin_submission()?;

        let outcome = match self.session.require_token() {
            Ok(token) => match request {
                EditorRequest::Create(request) => self
                    .repository
                    .create(&token, &request)
                    .await
                    .map(|quiz| EditorOutcome::Created(quiz.into())),
                EditorRequest::Update { quiz_id, request } => {
                    let updated = self.repository.update(&token, &quiz_id, &request).await;
                    updated.map(|_| EditorOutcome::Updated {
                        quiz_id,
                        update: request,
                    })
                }
            },
            Err(err) => Err(err),
        };

        self.finish_submission(outcome)
    }

    fn replace_draft<F>(&mut self, update: F) -> AppResult<()>
    where
        F: FnOnce(&QuizDraft) -> AppResult<QuizDraft>,
    {
        if self.status != EditorStatus::Editing {
            return Err(AppError::InvalidState(
                "Draft cannot change while it is saved or closed".to_string(),
            ));
        }

        self.draft = update(&self.draft)?;
        Ok(())
    }
}
