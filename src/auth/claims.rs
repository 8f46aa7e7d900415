use serde::{Deserialize, Serialize};

/// Payload segment of a session token as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String, // Subject, possibly encoded a second time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>, // Issued at (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>, // Expiration time (as UTC timestamp)
}

impl TokenClaims {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            iat: None,
            exp: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_without_timestamps() {
        let claims: TokenClaims = serde_json::from_str(r#"{"id":"dXNlci0x"}"#).unwrap();

        assert_eq!(claims.id, "dXNlci0x");
        assert_eq!(claims.iat, None);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_claims_ignore_unknown_fields() {
        let claims: TokenClaims =
            serde_json::from_str(r#"{"id":"abc","iat":1700000000,"role":"user"}"#).unwrap();

        assert_eq!(claims, TokenClaims { id: "abc".to_string(), iat: Some(1700000000), exp: None });
    }
}
