pub mod claims;
pub mod session;
pub mod token;
pub mod utils;

pub use claims::TokenClaims;
pub use session::Session;
pub use token::TokenDecoder;
pub use utils::{is_owner, require_owner, Owned};
