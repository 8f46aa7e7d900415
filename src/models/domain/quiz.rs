use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

/// A quiz as returned by `GET /quiz/{id}` or after creation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id", alias = "id", alias = "quizId")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    #[serde(default)]
    pub owner: String, // Subject identifier of the author
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    // Aggregates computed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_max_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_is_public() -> bool {
    true
}

/// One entry of the dashboard catalog.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    #[serde(alias = "_id")]
    pub quiz_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub total_score: u32,
    #[serde(default)]
    pub total_max_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    // The dashboard omits questions; only created or edited entries hold them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuizQuestion>>,
}

impl From<Quiz> for QuizSummary {
    fn from(quiz: Quiz) -> Self {
        let question_count = quiz
            .question_count
            .unwrap_or(quiz.questions.len() as u32);

        QuizSummary {
            quiz_id: quiz.id,
            title: quiz.title,
            description: quiz.description,
            owner: quiz.owner,
            question_count,
            total_score: quiz.total_score.unwrap_or_default(),
            total_max_score: quiz.total_max_score.unwrap_or_default(),
            is_public: Some(quiz.is_public),
            questions: Some(quiz.questions),
        }
    }
}
