//! Signed, expiring access tokens.
//!
//! A token is `hex(claims_json).hex(signature)`, the signature being
//! HMAC-SHA256 over the hex payload under the configured secret.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::AuthConfig;
use crate::error::{TaxError, AppResult};

type HmacSha256 = Hmac<Sha256>;

/// The claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The username the token was issued to.
    pub sub: String,
    /// Expiry as unix seconds.
    pub exp: i64,
}

/// Issues and verifies access tokens.
///
/// `Debug` redacts the secret.
///
/// # Example
///
/// ```
/// use tax_calculator::auth::TokenSigner;
/// use chrono::{Duration, Utc};
///
/// let signer = TokenSigner::new("secret", Duration::minutes(30));
/// let now = Utc::now();
/// let token = signer.issue("alice", now).unwrap();
/// assert_eq!(signer.verify(&token, now).unwrap().sub, "alice");
/// ```
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer with the given secret and token lifetime.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    /// Creates a signer from the auth configuration.
    ///
    /// A lifetime too large for [`Duration`] saturates; [`issue`](Self::issue)
    /// then fails instead of overflowing.
    pub fn from_config(config: &AuthConfig) -> Self {
        let ttl = Duration::try_minutes(config.token_ttl_minutes).unwrap_or(Duration::MAX);
        Self::new(&config.token_secret, ttl)
    }

    /// Returns the token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `username` valid until `now + ttl`.
    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> AppResult<String> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TaxError::Internal {
                message: "token expiry out of range".to_string(),
            })?;
        let claims = TokenClaims {
            sub: username.to_string(),
            exp: expires_at.timestamp(),
        };
        let json = serde_json::to_vec(&claims).map_err(|e| TaxError::Internal {
            message: format!("failed to encode token claims: {e}"),
        })?;
        let payload = hex::encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    /// Verifies a token's signature and expiry and returns its claims.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> AppResult<TokenClaims> {
        let (payload, signature) = token
            .split_once('.')
            .ok_or_else(|| unauthorized("malformed token"))?;
        let signature = hex::decode(signature).map_err(|_| unauthorized("malformed token"))?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| unauthorized("invalid token signature"))?;

        let json = hex::decode(payload).map_err(|_| unauthorized("malformed token"))?;
        let claims: TokenClaims =
            serde_json::from_slice(&json).map_err(|_| unauthorized("malformed token"))?;

        if claims.exp <= now.timestamp() {
            return Err(unauthorized("token expired"));
        }
        Ok(claims)
    }

    fn mac(&self) -> AppResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| TaxError::Internal {
            message: format!("failed to key token signature: {e}"),
        })
    }
}

fn unauthorized(message: &str) -> TaxError {
    TaxError::Unauthorized {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", Duration::minutes(30))
    }

    fn assert_unauthorized(result: AppResult<TokenClaims>, expected: &str) {
        match result {
            Err(TaxError::Unauthorized { message }) => assert_eq!(message, expected),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_issued_token_verifies() {
        let now = Utc::now();
        let token = signer().issue("alice", now).unwrap();

        let claims = signer().verify(&token, now).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp, (now + Duration::minutes(30)).timestamp());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let now = Utc::now();
        let token = signer().issue("alice", now).unwrap();

        assert_unauthorized(
            signer().verify(&token, now + Duration::minutes(31)),
            "token expired",
        );
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let now = Utc::now();
        let token = TokenSigner::new("other", Duration::minutes(30))
            .issue("alice", now)
            .unwrap();

        assert_unauthorized(signer().verify(&token, now), "invalid token signature");
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let now = Utc::now();
        let token = signer().issue("alice", now).unwrap();
        let (_, signature) = token.split_once('.').unwrap();

        let forged_claims = TokenClaims {
            sub: "mallory".to_string(),
            exp: (now + Duration::days(365)).timestamp(),
        };
        let forged_payload = hex::encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{forged_payload}.{signature}");

        assert_unauthorized(signer().verify(&forged, now), "invalid token signature");
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let now = Utc::now();
        assert_unauthorized(signer().verify("", now), "malformed token");
        assert_unauthorized(signer().verify("abc", now), "malformed token");
        assert_unauthorized(signer().verify("abc.xyz", now), "malformed token");
    }

    #[test]
    fn test_expiry_overflow_is_an_error() {
        let signer = TokenSigner::new("test-secret", Duration::MAX);

        let result = signer.issue("alice", Utc::now());
        assert!(matches!(result, Err(TaxError::Internal { .. })));
    }

    #[test]
    fn test_from_config_saturates_huge_ttl() {
        let config = AuthConfig {
            token_ttl_minutes: i64::MAX,
            ..AuthConfig::default()
        };

        let signer = TokenSigner::from_config(&config);
        assert_eq!(signer.ttl(), Duration::MAX);
        assert!(signer.issue("alice", Utc::now()).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", signer());
        assert!(!debug.contains("test-secret"));
    }
}
