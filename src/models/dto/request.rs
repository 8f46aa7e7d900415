use serde::Serialize;
use validator::Validate;

use crate::models::domain::{QuizDraft, QuizQuestion};

#[derive(Debug, Clone, Serialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: String,
    pub is_public: bool,
    #[validate(nested)]
    pub questions: Vec<QuizQuestion>,
}

impl From<&QuizDraft> for CreateQuizRequest {
    fn from(draft: &QuizDraft) -> Self {
        CreateQuizRequest {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            is_public: draft.is_public,
            questions: draft.normalized_questions(),
        }
    }
}

/// Partial update sent by the edit form. Visibility is not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub description: String,
    #[validate(nested)]
    pub questions: Vec<QuizQuestion>,
}

impl From<&QuizDraft> for UpdateQuizRequest {
    fn from(draft: &QuizDraft) -> Self {
        UpdateQuizRequest {
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            questions: draft.normalized_questions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: String,
    pub chosen_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<AnswerSubmission>,
}
