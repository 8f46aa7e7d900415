use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use once_cell::sync::OnceCell;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::token::TokenDecoder,
    config::Config,
    errors::{AppError, AppResult},
};

/// Client-held proof of identity.
///
/// Set on sign-in and cleared on sign-out or when the token turns out to be
/// undecodable. Shared between services as an `Arc<Session>`.
pub struct Session {
    decoder: TokenDecoder,
    state: RwLock<Option<SessionToken>>,
}

struct SessionToken {
    raw: SecretString,
    subject: OnceCell<AppResult<String>>, // Derived on first use
}

impl Session {
    pub fn new(decoder: TokenDecoder) -> Self {
        Self {
            decoder,
            state: RwLock::new(None),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(TokenDecoder::new(config.subject_encoding))
    }

    /// Stores a token, replacing any previous one.
    pub fn initialize(&self, token: &str) {
        *self.write() = Some(SessionToken {
            raw: SecretString::from(token.to_string()),
            subject: OnceCell::new(),
        });
        log::info!("Session initialized");
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Subject identifier of the signed-in user, `None` when signed out or
    /// when the token cannot be decoded.
    pub fn current_subject(&self) -> Option<String> {
        self.resolve_subject().ok()
    }

    pub fn resolve_subject(&self) -> AppResult<String> {
        let (resolved, failed) = {
            let state = self.read();
            let token = state
                .as_ref()
                .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))?;

            let resolved = token
                .subject
                .get_or_init(|| self.decoder.subject(token.raw.expose_secret()))
                .clone();
            let failed = resolved.is_err().then(|| token.raw.clone());
            (resolved, failed)
        };

        if let (Err(err), Some(failed)) = (&resolved, failed) {
            log::warn!("Clearing session after token decode failure: {}", err);
            self.clear_if_current(&failed);
        }

        resolved
    }

    /// Raw token for the auth header.
    pub fn require_token(&self) -> AppResult<SecretString> {
        self.read()
            .as_ref()
            .map(|token| token.raw.clone())
            .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))
    }

    pub fn clear(&self) {
        if self.write().take().is_some() {
            log::info!("Session cleared");
        }
    }

    /// Clears only while `raw` is still the stored token, so a token set by a
    /// concurrent `initialize` survives.
    fn clear_if_current(&self, raw: &SecretString) {
        let mut state = self.write();
        let current = state
            .as_ref()
            .is_some_and(|token| token.raw.expose_secret() == raw.expose_secret());

        if current {
            *state = None;
            log::info!("Session cleared");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<SessionToken>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<SessionToken>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{session_for, signed_token};

    #[test]
    fn test_new_session_is_signed_out() {
        let session = Session::from_config(&Config::test_config());

        assert!(!session.is_authenticated());
        assert_eq!(session.current_subject(), None);
        assert!(matches!(
            session.require_token(),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_initialized_session_yields_subject() {
        let session = session_for("user-1");

        assert!(session.is_authenticated());
        assert_eq!(session.current_subject().as_deref(), Some("user-1"));
        // Cached value is stable across calls
        assert_eq!(session.current_subject().as_deref(), Some("user-1"));
        assert_eq!(
            session.require_token().unwrap().expose_secret(),
            signed_token("user-1")
        );
    }

    #[test]
    fn test_reinitialize_replaces_subject() {
        let session = session_for("user-1");
        session.initialize(&signed_token("user-2"));

        assert_eq!(session.current_subject().as_deref(), Some("user-2"));
    }

    #[test]
    fn test_clear_signs_out() {
        let session = session_for("user-1");
        session.clear();

        assert!(!session.is_authenticated());
        assert_eq!(session.current_subject(), None);
    }

    #[test]
    fn test_malformed_token_fails_closed_and_clears() {
        let session = Session::from_config(&Config::test_config());
        session.initialize("garbage");

        assert!(session.is_authenticated());
        assert!(matches!(
            session.resolve_subject(),
            Err(AppError::DecodeError(_))
        ));
        assert!(!session.is_authenticated());
        assert_eq!(session.current_subject(), None);
    }

    #[test]
    fn test_decode_failure_does_not_clear_a_newer_token() {
        let session = Session::from_config(&Config::test_config());
        session.initialize("garbage");
        let stale = session.require_token().unwrap();

        // A sign-in lands between the failed decode and the clear
        session.initialize(&signed_token("user-2"));
        session.clear_if_current(&stale);

        assert!(session.is_authenticated());
        assert_eq!(session.current_subject().as_deref(), Some("user-2"));

        let current = session.require_token().unwrap();
        session.clear_if_current(&current);
        assert!(!session.is_authenticated());
    }
}
