#[cfg(test)]
pub mod fixtures {
    use base64::{engine::general_purpose, Engine as _};
    use jsonwebtoken::{encode, EncodingKey, Header};

    use crate::{
        auth::{Session, TokenClaims},
        config::Config,
        models::domain::{Quiz, QuizQuestion, QuizSummary},
    };

    /// Encodes claims the way the backend does. The signature is never checked.
    pub fn token_with_claims(claims: &TokenClaims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(b"test-signing-key"),
        )
        .expect("test token should encode")
    }

    /// Token whose `id` claim is the base64-encoded subject.
    pub fn signed_token(subject: &str) -> String {
        let id = general_purpose::STANDARD.encode(subject);
        token_with_claims(&TokenClaims::new(&id))
    }

    /// Signed-in session for `subject`.
    pub fn session_for(subject: &str) -> Session {
        let session = Session::from_config(&Config::test_config());
        session.initialize(&signed_token(subject));
        session
    }

    fn question(id: &str, options: &[&str], correct: usize) -> QuizQuestion {
        let mut question = QuizQuestion::new(&format!("Question {}", id), options, correct);
        question.id = Some(id.to_string());
        question
    }

    /// Two-question quiz: `a` with options x/y, `b` with options x/y/z.
    pub fn sample_quiz(owner: &str) -> Quiz {
        Quiz {
            id: "q1".to_string(),
            title: "Sample".to_string(),
            description: "Two questions".to_string(),
            is_public: true,
            owner: owner.to_string(),
            questions: vec![question("a", &["x", "y"], 0), question("b", &["x", "y", "z"], 2)],
            question_count: Some(2),
            total_score: None,
            total_max_score: None,
            created_at: None,
        }
    }

    /// Dashboard entry as `GET /dashboard` returns it: no questions, no visibility.
    pub fn sample_summary(quiz_id: &str, owner: &str) -> QuizSummary {
        QuizSummary {
            quiz_id: quiz_id.to_string(),
            title: format!("Quiz {}", quiz_id),
            description: "Summary".to_string(),
            owner: owner.to_string(),
            question_count: 1,
            total_score: 0,
            total_max_score: 1,
            is_public: None,
            questions: None,
        }
    }

    /// Entry added to the catalog after a create, holding the full quiz.
    pub fn created_summary(quiz_id: &str, owner: &str) -> QuizSummary {
        QuizSummary {
            is_public: Some(false),
            questions: Some(vec![question("a", &["x", "y"], 1)]),
            ..sample_summary(quiz_id, owner)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_sample_quiz() {
        let quiz = sample_quiz("user-1");
        assert_eq!(quiz.questions.len(), 2);
        assert!(quiz.questions.iter().all(|q| q.is_valid()));
        assert_eq!(quiz.questions[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_fixtures_summaries() {
        assert_eq!(sample_summary("q1", "u").questions, None);
        assert_eq!(created_summary("q1", "u").questions.map(|q| q.len()), Some(1));
    }

    #[test]
    fn test_fixtures_signed_token_has_three_segments() {
        let token = signed_token("user-1");
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_fixtures_session_for() {
        let session = session_for("user-9");
        assert_eq!(session.current_subject().as_deref(), Some("user-9"));
    }
}
