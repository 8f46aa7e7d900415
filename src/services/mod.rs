pub mod http_helpers;
pub mod quiz_attempt_service;
pub mod quiz_catalog_service;
pub mod quiz_editor_service;
pub mod user_service;

pub use quiz_attempt_service::{AttemptState, QuizAttemptService};
pub use quiz_catalog_service::QuizCatalogService;
pub use quiz_editor_service::{EditorMode, EditorOutcome, EditorStatus, QuizEditorService};
pub use user_service::UserService;
