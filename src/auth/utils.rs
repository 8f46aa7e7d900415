use crate::{
    auth::session::Session,
    errors::{AppError, AppResult},
    models::domain::{Quiz, QuizSummary},
};

/// Anything carrying the subject identifier of its author.
pub trait Owned {
    fn owner(&self) -> &str;
}

impl Owned for Quiz {
    fn owner(&self) -> &str {
        &self.owner
    }
}

impl Owned for QuizSummary {
    fn owner(&self) -> &str {
        &self.owner
    }
}

/// Whether the signed-in user authored `resource`.
///
/// Only gates edit and delete affordances; the backend enforces ownership on
/// every write. An undecodable or missing session never owns anything.
pub fn is_owner<T: Owned + ?Sized>(resource: &T, session: &Session) -> bool {
    match session.current_subject() {
        Some(subject) => resource.owner() == subject,
        None => false,
    }
}

pub fn require_owner<T: Owned + ?Sized>(resource: &T, session: &Session) -> AppResult<()> {
    if !is_owner(resource, session) {
        return Err(AppError::Unauthorized(
            "You can only modify your own quizzes".to_string(),
        ));
    }
    Ok(())
}
