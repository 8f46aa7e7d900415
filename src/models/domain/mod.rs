pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_draft;
pub mod quiz_question;
pub use quiz::{Quiz, QuizSummary};
pub use quiz_attempt::{Answer, AttemptResult};
pub use quiz_draft::{DraftQuestion, QuestionField, QuizDraft};
pub use quiz_question::QuizQuestion;
