use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Fewest options a question may have.
pub const MIN_OPTIONS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_question_shape"))]
pub struct QuizQuestion {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>, // Absent until the backend persists the question
    #[validate(length(min = 1, message = "Question text must not be empty"))]
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "correctOption", alias = "correctOptionIndex")]
    pub correct_option_index: usize,
}

impl QuizQuestion {
    pub fn new(text: &str, options: &[&str], correct_option_index: usize) -> Self {
        QuizQuestion {
            id: None,
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option_index,
        }
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn is_valid(&self) -> bool {
        self.options.len() >= MIN_OPTIONS && self.correct_option_index < self.options.len()
    }
}

fn validate_question_shape(question: &QuizQuestion) -> Result<(), ValidationError> {
    if question.options.len() < MIN_OPTIONS {
        let mut err = ValidationError::new("too_few_options");
        err.message = Some("A question needs at least 2 options".into());
        return Err(err);
    }
    if question.correct_option_index >= question.options.len() {
        let mut err = ValidationError::new("correct_option_out_of_range");
        err.message = Some("Correct option index is out of range".into());
        return Err(err);
    }
    Ok(())
}
