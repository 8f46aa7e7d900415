pub mod quiz_repository;
pub mod user_repository;

pub use quiz_repository::{HttpQuizRepository, QuizRepository};
pub use user_repository::{HttpUserRepository, UserRepository};
