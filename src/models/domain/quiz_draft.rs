//! Editable copy of a quiz.
//!
//! Every operation returns a new draft and leaves the receiver untouched, so an
//! editor can swap drafts wholesale and a UI can compare old and new values.

use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        quiz::{Quiz, QuizSummary},
        quiz_question::{QuizQuestion, MIN_OPTIONS},
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftQuestion {
    pub key: Uuid, // Local identity, stable across index shifts
    pub id: Option<String>,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
}

impl DraftQuestion {
    pub fn blank() -> Self {
        DraftQuestion {
            key: Uuid::new_v4(),
            id: None,
            text: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            correct_option_index: 0,
        }
    }

    fn from_question(question: &QuizQuestion) -> Self {
        DraftQuestion {
            key: Uuid::new_v4(),
            id: question.id.clone(),
            text: question.text.clone(),
            options: question.options.clone(),
            correct_option_index: question.correct_option_index,
        }
    }

    fn to_question(&self) -> QuizQuestion {
        QuizQuestion {
            id: self.id.clone(),
            text: self.text.trim().to_string(),
            options: self.options.iter().map(|o| o.trim().to_string()).collect(),
            correct_option_index: self.correct_option_index,
        }
    }

    fn check_option(&self, o_idx: usize) -> AppResult<()> {
        if o_idx >= self.options.len() {
            return Err(AppError::ValidationError(format!(
                "No option at index {} (question has {})",
                o_idx,
                self.options.len()
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionField {
    Text(String),
    CorrectOptionIndex(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub questions: Vec<DraftQuestion>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        QuizDraft {
            title: String::new(),
            description: String::new(),
            is_public: true,
            questions: Vec::new(),
        }
    }
}

impl QuizDraft {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        QuizDraft {
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            is_public: quiz.is_public,
            questions: quiz.questions.iter().map(DraftQuestion::from_question).collect(),
        }
    }

    /// `None` when the entry came from the dashboard without its questions.
    pub fn from_summary(summary: &QuizSummary) -> Option<Self> {
        let questions = summary.questions.as_ref()?;

        Some(QuizDraft {
            title: summary.title.clone(),
            description: summary.description.clone(),
            is_public: summary.is_public.unwrap_or(true),
            questions: questions.iter().map(DraftQuestion::from_question).collect(),
        })
    }

    pub fn question(&self, idx: usize) -> AppResult<&DraftQuestion> {
        self.questions.get(idx).ok_or_else(|| {
            AppError::ValidationError(format!(
                "No question at index {} (draft has {})",
                idx,
                self.questions.len()
            ))
        })
    }

    pub fn with_title(&self, title: &str) -> Self {
        QuizDraft {
            title: title.to_string(),
            ..self.clone()
        }
    }

    pub fn with_description(&self, description: &str) -> Self {
        QuizDraft {
            description: description.to_string(),
            ..self.clone()
        }
    }

    pub fn with_visibility(&self, is_public: bool) -> Self {
        QuizDraft {
            is_public,
            ..self.clone()
        }
    }

    pub fn with_question_added(&self) -> Self {
        let mut questions = self.questions.clone();
        questions.push(DraftQuestion::blank());
        QuizDraft {
            questions,
            ..self.clone()
        }
    }

    pub fn with_question_removed(&self, idx: usize) -> AppResult<Self> {
        self.question(idx)?;
        let mut questions = self.questions.clone();
        questions.remove(idx);
        Ok(QuizDraft {
            questions,
            ..self.clone()
        })
    }

    pub fn with_question_field(&self, idx: usize, field: QuestionField) -> AppResult<Self> {
        self.replace_question(idx, |question| match field {
            QuestionField::Text(text) => Ok(DraftQuestion {
                text,
                ..question.clone()
            }),
            QuestionField::CorrectOptionIndex(correct) => {
                question.check_option(correct)?;
                Ok(DraftQuestion {
                    correct_option_index: correct,
                    ..question.clone()
                })
            }
        })
    }

    pub fn with_option_added(&self, q_idx: usize) -> AppResult<Self> {
        self.replace_question(q_idx, |question| {
            let mut options = question.options.clone();
            options.push(String::new());
            Ok(DraftQuestion {
                options,
                ..question.clone()
            })
        })
    }

    /// Removes an option, keeping the correct index valid.
    ///
    /// A question never drops below [`MIN_OPTIONS`]. When an earlier option is
    /// removed the correct index follows its option down; when the correct
    /// option itself is removed the index stays put and is clamped to the new
    /// last option.
    pub fn with_option_removed(&self, q_idx: usize, o_idx: usize) -> AppResult<Self> {
        self.replace_question(q_idx, |question| {
            question.check_option(o_idx)?;
            if question.options.len() <= MIN_OPTIONS {
                return Err(AppError::ValidationError(format!(
                    "A question needs at least {} options",
                    MIN_OPTIONS
                )));
            }

            let mut options = question.options.clone();
            options.remove(o_idx);

            let correct = question.correct_option_index;
            let correct_option_index = if o_idx < correct {
                correct - 1
            } else {
                correct.min(options.len() - 1)
            };

            Ok(DraftQuestion {
                options,
                correct_option_index,
                ..question.clone()
            })
        })
    }

    pub fn with_option_updated(&self, q_idx: usize, o_idx: usize, value: &str) -> AppResult<Self> {
        self.replace_question(q_idx, |question| {
            question.check_option(o_idx)?;
            let mut options = question.options.clone();
            options[o_idx] = value.to_string();
            Ok(DraftQuestion {
                options,
                ..question.clone()
            })
        })
    }

    /// Questions as they go on the wire: trimmed, local keys dropped.
    pub fn normalized_questions(&self) -> Vec<QuizQuestion> {
        self.questions.iter().map(DraftQuestion::to_question).collect()
    }

    fn replace_question<F>(&self, idx: usize, update: F) -> AppResult<Self>
    where
        F: FnOnce(&DraftQuestion) -> AppResult<DraftQuestion>,
    {
        let replacement = update(self.question(idx)?)?;
        let mut questions = self.questions.clone();
        questions[idx] = replacement;
        Ok(QuizDraft {
            questions,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_questions(count: usize) -> QuizDraft {
        (0..count).fold(QuizDraft::default(), |draft, _| draft.with_question_added())
    }

    #[test]
    fn add_question_appends_blank_two_option_question() {
        let draft = QuizDraft::default().with_question_added();

        assert_eq!(draft.questions.len(), 1);
        let question = &draft.questions[0];
        assert_eq!(question.options, vec!["".to_string(), "".to_string()]);
        assert_eq!(question.correct_option_index, 0);
        assert_eq!(question.id, None);
    }

    #[test]
    fn operations_leave_original_draft_untouched() {
        let original = draft_with_questions(1);
        let updated = original
            .with_question_field(0, QuestionField::Text("What?".to_string()))
            .unwrap();

        assert_eq!(original.questions[0].text, "");
        assert_eq!(updated.questions[0].text, "What?");
        assert_eq!(original.questions[0].key, updated.questions[0].key);
    }

    #[test]
    fn remove_question_shifts_later_questions_down() {
        let draft = draft_with_questions(3);
        let keys: Vec<Uuid> = draft.questions.iter().map(|q| q.key).collect();

        let draft = draft.with_question_removed(1).unwrap();

        assert_eq!(draft.questions.len(), 2);
        assert_eq!(draft.questions[0].key, keys[0]);
        assert_eq!(draft.questions[1].key, keys[2]);
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let draft = draft_with_questions(1);

        assert!(matches!(
            draft.with_question_removed(1),
            Err(AppError::ValidationError(_))
        ));
        assert!(draft.with_option_added(5).is_err());
        assert!(draft.with_option_updated(0, 2, "z").is_err());
        assert!(draft
            .with_question_field(0, QuestionField::CorrectOptionIndex(2))
            .is_err());
    }

    #[test]
    fn add_then_remove_last_option_restores_count() {
        let draft = draft_with_questions(1);
        let grown = draft.with_option_added(0).unwrap();
        assert_eq!(grown.questions[0].options.len(), 3);

        let shrunk = grown.with_option_removed(0, 2).unwrap();
        assert_eq!(shrunk.questions[0].options.len(), 2);
        assert_eq!(shrunk.questions[0].correct_option_index, 0);
    }

    #[test]
    fn removing_the_correct_last_option_clamps_the_index() {
        let draft = draft_with_questions(1)
            .with_option_added(0)
            .unwrap()
            .with_question_field(0, QuestionField::CorrectOptionIndex(2))
            .unwrap();

        let draft = draft.with_option_removed(0, 2).unwrap();

        assert_eq!(draft.questions[0].options.len(), 2);
        assert_eq!(draft.questions[0].correct_option_index, 1);
    }

    #[test]
    fn removing_an_earlier_option_keeps_the_correct_option() {
        let draft = draft_with_questions(1)
            .with_option_added(0)
            .unwrap()
            .with_option_updated(0, 0, "a")
            .unwrap()
            .with_option_updated(0, 1, "b")
            .unwrap()
            .with_option_updated(0, 2, "c")
            .unwrap()
            .with_question_field(0, QuestionField::CorrectOptionIndex(2))
            .unwrap();

        let draft = draft.with_option_removed(0, 0).unwrap();

        let question = &draft.questions[0];
        assert_eq!(question.options, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(question.options[question.correct_option_index], "c");
    }

    #[test]
    fn removing_below_minimum_options_is_rejected() {
        let draft = draft_with_questions(1);
        let result = draft.with_option_removed(0, 1);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn normalized_questions_trim_text_and_options() {
        let draft = draft_with_questions(1)
            .with_question_field(0, QuestionField::Text("  Capital?  ".to_string()))
            .unwrap()
            .with_option_updated(0, 0, " Paris ")
            .unwrap()
            .with_option_updated(0, 1, "Rome")
            .unwrap();

        let questions = draft.normalized_questions();
        assert_eq!(questions[0].text, "Capital?");
        assert_eq!(questions[0].options, vec!["Paris".to_string(), "Rome".to_string()]);
    }

    #[test]
    fn draft_from_quiz_keeps_persisted_ids() {
        let mut question = QuizQuestion::new("Pick", &["x", "y"], 1);
        question.id = Some("a".to_string());
        let quiz = Quiz {
            id: "q1".to_string(),
            title: "Rust".to_string(),
            description: String::new(),
            is_public: false,
            owner: "u1".to_string(),
            questions: vec![question],
            question_count: Some(1),
            total_score: None,
            total_max_score: None,
            created_at: None,
        };

        let draft = QuizDraft::from_quiz(&quiz);
        assert_eq!(draft.title, "Rust");
        assert!(!draft.is_public);
        assert_eq!(draft.questions[0].id.as_deref(), Some("a"));
        assert_eq!(draft.normalized_questions()[0].correct_option_index, 1);
    }

    #[test]
    fn dashboard_summary_without_questions_yields_no_draft() {
        let json = r#"{"quizId":"q1","title":"T","description":"D","owner":"u1","questionCount":3}"#;
        let summary: QuizSummary = serde_json::from_str(json).unwrap();

        assert_eq!(QuizDraft::from_summary(&summary), None);

        let summary = QuizSummary {
            questions: Some(vec![QuizQuestion::new("Pick", &["x", "y"], 0)]),
            ..summary
        };
        let draft = QuizDraft::from_summary(&summary).unwrap();
        assert_eq!(draft.questions.len(), 1);
    }
}
