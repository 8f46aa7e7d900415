use base64::{engine::general_purpose, Engine as _};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{
    auth::claims::TokenClaims,
    config::SubjectEncoding,
    errors::{AppError, AppResult},
};

/// Reads the subject out of a session token without verifying it.
///
/// The signing key stays on the backend. Only the payload is read here.
#[derive(Clone)]
pub struct TokenDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    subject_encoding: SubjectEncoding,
}

impl TokenDecoder {
    pub fn new(subject_encoding: SubjectEncoding) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(&[]),
            validation,
            subject_encoding,
        }
    }

    pub fn decode_claims(&self, token: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::DecodeError(format!("Malformed token: {}", e)))
    }

    pub fn subject(&self, token: &str) -> AppResult<String> {
        let claims = self.decode_claims(token)?;

        let subject = match self.subject_encoding {
            SubjectEncoding::Base64 => decode_base64_subject(&claims.id)?,
            SubjectEncoding::Plain => claims.id,
        };

        if subject.trim().is_empty() {
            return Err(AppError::DecodeError(
                "Token carries an empty subject".to_string(),
            ));
        }

        Ok(subject)
    }
}

fn decode_base64_subject(encoded: &str) -> AppResult<String> {
    let encoded = encoded.trim();
    let bytes = general_purpose::STANDARD
        .decode(encoded)
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(encoded))?;

    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{signed_token, token_with_claims};

    #[test]
    fn test_subject_is_decoded_twice_by_default() {
        let decoder = TokenDecoder::new(SubjectEncoding::Base64);
        let token = signed_token("user-1");

        assert_eq!(decoder.subject(&token).unwrap(), "user-1");
    }

    #[test]
    fn test_plain_subject_encoding() {
        let decoder = TokenDecoder::new(SubjectEncoding::Plain);
        let token = token_with_claims(&TokenClaims::new("user-2"));

        assert_eq!(decoder.subject(&token).unwrap(), "user-2");
    }

    #[test]
    fn test_unpadded_base64_subject() {
        let decoder = TokenDecoder::new(SubjectEncoding::Base64);
        let encoded = general_purpose::STANDARD_NO_PAD.encode("user-10");
        let token = token_with_claims(&TokenClaims::new(&encoded));

        assert_eq!(decoder.subject(&token).unwrap(), "user-10");
    }

    #[test]
    fn test_invalid_token() {
        let decoder = TokenDecoder::new(SubjectEncoding::Base64);

        let result = decoder.subject("invalid.token.here");
        assert!(matches!(result, Err(AppError::DecodeError(_))));

        assert!(decoder.subject("").is_err());
        assert!(decoder.subject("only-one-segment").is_err());
    }

    #[test]
    fn test_subject_that_is_not_base64() {
        let decoder = TokenDecoder::new(SubjectEncoding::Base64);
        let token = token_with_claims(&TokenClaims::new("not base64!"));

        match decoder.subject(&token) {
            Err(AppError::DecodeError(msg)) => assert!(msg.contains("base64")),
            other => panic!("Expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_subject_is_rejected() {
        let decoder = TokenDecoder::new(SubjectEncoding::Plain);
        let token = token_with_claims(&TokenClaims::new(""));

        assert!(matches!(decoder.subject(&token), Err(AppError::DecodeError(_))));
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let decoder = TokenDecoder::new(SubjectEncoding::Plain);
        let claims = TokenClaims {
            id: "user-3".to_string(),
            iat: Some(1),
            exp: Some(2),
        };
        let token = token_with_claims(&claims);

        assert_eq!(decoder.subject(&token).unwrap(), "user-3");
    }
}
