use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub chosen_index: Option<usize>, // None until the user picks an option
}

impl Answer {
    pub fn unanswered(question_id: &str) -> Self {
        Answer {
            question_id: question_id.to_string(),
            chosen_index: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.chosen_index.is_some()
    }
}

/// Score handed back by the backend for a submitted attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptResult {
    pub score: u32,
    pub max_score: u32,
    pub received_at: DateTime<Utc>,
}

impl AttemptResult {
    pub fn new(score: u32, max_score: u32) -> AppResult<Self> {
        if score > max_score {
            return Err(AppError::ServerError(format!(
                "Backend reported score {} above maximum {}",
                score, max_score
            )));
        }

        Ok(AttemptResult {
            score,
            max_score,
            received_at: Utc::now(),
        })
    }
}
