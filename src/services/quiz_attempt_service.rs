use std::sync::Arc;

use crate::{
    auth::Session,
    errors::{AppError, AppResult},
    models::{
        domain::{Answer, AttemptResult, Quiz},
        dto::{
            request::{AnswerSubmission, SubmitAttemptRequest},
            response::AttemptResponse,
        },
    },
    repositories::QuizRepository,
};

pub const INCOMPLETE_ATTEMPT_NOTICE: &str = "Please answer all questions";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptState {
    Loading,
    Answering,
    Submitting,
    Result(AttemptResult),
    NotFound,
}

/// One attempt at one quiz, from fetching it to showing the score.
///
/// Used both by the standalone attempt view and by the dashboard's inline
/// attempt flow.
pub struct QuizAttemptService {
    repository: Arc<dyn QuizRepository>,
    session: Arc<Session>,
    quiz_id: String,
    quiz: Option<Quiz>,
    answers: Vec<Answer>,
    state: AttemptState,
}

impl QuizAttemptService {
    pub fn new(repository: Arc<dyn QuizRepository>, session: Arc<Session>, quiz_id: &str) -> Self {
        Self {
            repository,
            session,
            quiz_id: quiz_id.to_string(),
            quiz: None,
            answers: Vec::new(),
            state: AttemptState::Loading,
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn result(&self) -> Option<&AttemptResult> {
        match &self.state {
            AttemptState::Result(result) => Some(result),
            _ => None,
        }
    }

    /// Fetches the quiz. Any failure, including an absent quiz, is terminal.
    pub async fn load(&mut self) -> AppResult<()> {
        self.expect_state(&AttemptState::Loading, "Quiz is already loaded")?;

        let fetched = match self.session.require_token() {
            Ok(token) => self.repository.find_by_id(&token, &self.quiz_id).await,
            Err(err) => Err(err),
        };

        match fetched {
            Ok(Some(quiz)) => self.initialize(quiz),
            Ok(None) => {
                log::warn!("Quiz {} not found", self.quiz_id);
                self.state = AttemptState::NotFound;
                Err(AppError::NotFound(format!("Quiz '{}'", self.quiz_id)))
            }
            Err(err) => {
                log::error!("Failed to load quiz {}: {}", self.quiz_id, err);
                self.state = AttemptState::NotFound;
                Err(err)
            }
        }
    }

    /// Starts answering `quiz` with every answer unset, in question order.
    pub fn initialize(&mut self, quiz: Quiz) -> AppResult<()> {
        self.expect_state(&AttemptState::Loading, "Quiz is already loaded")?;

        let answers = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(idx, question)| {
                question.id.as_deref().map(Answer::unanswered).ok_or_else(|| {
                    AppError::InternalError(format!("Question {} of quiz {} has no id", idx, quiz.id))
                })
            })
            .collect::<AppResult<Vec<_>>>();

        match answers {
            Ok(answers) => {
                log::info!("Attempt started on quiz {} ({} questions)", quiz.id, answers.len());
                self.quiz_id = quiz.id.clone();
                self.answers = answers;
                self.quiz = Some(quiz);
                self.state = AttemptState::Answering;
                Ok(())
            }
            Err(err) => {
                self.state = AttemptState::NotFound;
                Err(err)
            }
        }
    }

    pub fn update_answer(&mut self, q_idx: usize, chosen_index: usize) -> AppResult<()> {
        self.expect_state(&AttemptState::Answering, "Answers can no longer be changed")?;

        let option_count = self
            .quiz
            .as_ref()
            .and_then(|quiz| quiz.questions.get(q_idx))
            .map(|question| question.option_count())
            .ok_or_else(|| AppError::ValidationError(format!("No question at index {}", q_idx)))?;

        if chosen_index >= option_count {
            return Err(AppError::ValidationError(format!(
                "Question {} has no option {}",
                q_idx, chosen_index
            )));
        }

        let mut answers = self.answers.clone();
        answers[q_idx].chosen_index = Some(chosen_index);
        self.answers = answers;
        Ok(())
    }

    pub fn validate_completeness(&self) -> bool {
        self.answers.iter().all(Answer::is_answered)
    }

    /// Checks completeness, moves to `Submitting` and returns the payload.
    ///
    /// Fails without touching the state when answers are missing or a
    /// submission is already in flight.
    pub fn begin_submission(&mut self) -> AppResult<SubmitAttemptRequest> {
        match self.state {
            AttemptState::Answering => {}
            AttemptState::Submitting => {
                return Err(AppError::InvalidState(
                    "Attempt submission already in progress".to_string(),
                ))
            }
            _ => {
                return Err(AppError::InvalidState(
                    "Quiz is not open for answers".to_string(),
                ))
            }
        }

        if !self.validate_completeness() {
            log::warn!("Refusing to submit incomplete attempt on quiz {}", self.quiz_id);
            return Err(AppError::ValidationError(
                INCOMPLETE_ATTEMPT_NOTICE.to_string(),
            ));
        }

        let answers = self
            .answers
            .iter()
            .filter_map(|answer| {
                answer.chosen_index.map(|chosen_index| AnswerSubmission {
                    question_id: answer.question_id.clone(),
                    chosen_index,
                })
            })
            .collect();

        self.state = AttemptState::Submitting;
        Ok(SubmitAttemptRequest { answers })
    }

    /// Settles an in-flight submission with the backend's response.
    pub fn finish_submission(
        &mut self,
        response: AppResult<AttemptResponse>,
    ) -> AppResult<AttemptResult> {
        self.expect_state(&AttemptState::Submitting, "No submission in progress")?;

        match response.and_then(|r| AttemptResult::new(r.score, r.max_score)) {
            Ok(result) => {
                log::info!(
                    "Attempt on quiz {} scored {}/{}",
                    self.quiz_id,
                    result.score,
                    result.max_score
                );
                self.answers.clear();
                self.state = AttemptState::Result(result.clone());
                Ok(result)
            }
            Err(err) => {
                log::error!("Failed to submit attempt on quiz {}: {}", self.quiz_id, err);
                self.state = AttemptState::Answering;
                Err(err)
            }
        }
    }

    pub async fn submit(&mut self) -> AppResult<AttemptResult> {
        let request = self.begin_submission()?;

        let response = match self.session.require_token() {
            Ok(token) => {
                self.repository
                    .submit_attempt(&token, &self.quiz_id, &request)
                    .await
            }
            Err(err) => Err(err),
        };

        self.finish_submission(response)
    }

    fn expect_state(&self, expected: &AttemptState, message: &str) -> AppResult<()> {
        if &self.state != expected {
            return Err(AppError::InvalidState(message.to_string()));
        }
        Ok(())
    }
}
