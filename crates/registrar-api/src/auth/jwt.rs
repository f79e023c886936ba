// JWT token service for authentication
// Decision: HS256 only; tokens claiming any other algorithm (including
// "none") are rejected outright to prevent forgery
// Decision: Zero clock-skew leeway and nbf == iat; there is no grace window

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use registrar_core::Role;

use super::config::JwtConfig;

/// Signed session claims.
///
/// Immutable once signed; any field change invalidates the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Account email (denormalized so handlers need no lookup)
    pub email: String,
    /// Privilege level
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not valid before (Unix timestamp, equals iat)
    pub nbf: i64,
    /// Expiration (Unix timestamp, iat + token lifetime)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Token verification failure.
///
/// Expired and not-yet-valid are split out for server-side logs; callers
/// see a single "invalid token" response either way.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Token service for signing and verifying session tokens.
///
/// Built once at startup from the signing config and shared read-only by
/// all request workers.
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[&config.issuer]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Token lifetime in seconds
    pub fn token_lifetime_secs(&self) -> i64 {
        self.config.token_lifetime.as_secs() as i64
    }

    /// Sign a session token for an account.
    ///
    /// Returns the token and its expiration instant.
    pub fn issue(
        &self,
        account_id: Uuid,
        email: &str,
        role: Role,
    ) -> anyhow::Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let iat = now.timestamp();
        let exp = iat + self.token_lifetime_secs();

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            role,
            iat,
            nbf: iat,
            exp,
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))?;

        let expires_at = now + chrono::Duration::seconds(self.token_lifetime_secs());
        Ok((token, expires_at))
    }

    /// Verify a token and return its claims.
    ///
    /// Rejects tokens whose header algorithm is not HS256, whose signature
    /// does not verify, whose issuer differs, or whose time window excludes
    /// the current instant.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                _ => TokenError::Invalid(e),
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.config.issuer)
            .field("token_lifetime", &self.config.token_lifetime)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            token_lifetime: Duration::from_secs(3600),
            issuer: "registrar".to_string(),
        }
    }

    fn test_service() -> TokenService {
        TokenService::new(test_config())
    }

    fn test_claims(iat: i64, exp: i64) -> Claims {
        Claims {
            sub: Uuid::nil().to_string(),
            email: "test@example.com".to_string(),
            role: Role::Standard,
            iat,
            nbf: iat,
            exp,
            iss: "registrar".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let service = test_service();
        let account_id = Uuid::now_v7();
        let (token, expires) = service
            .issue(account_id, "test@example.com", Role::Administrator)
            .unwrap();

        assert!(!token.is_empty());
        assert!(expires > Utc::now());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, Role::Administrator);
        assert_eq!(claims.iss, "registrar");
        // Window is exactly the configured lifetime with nbf == iat
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service();
        assert!(service.verify("not.a.token").is_err());
        assert!(service.verify("").is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service();
        let (token, _) = service
            .issue(Uuid::now_v7(), "test@example.com", Role::Standard)
            .unwrap();

        // Flip one byte at a time across the token; every variant must fail
        let bytes = token.as_bytes();
        for pos in [0, bytes.len() / 3, bytes.len() / 2, bytes.len() - 1] {
            let mut tampered = bytes.to_vec();
            tampered[pos] ^= 0x01;
            let tampered = String::from_utf8_lossy(&tampered).into_owned();
            if tampered == token {
                continue;
            }
            assert!(
                service.verify(&tampered).is_err(),
                "tampered token at byte {} was accepted",
                pos
            );
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let other = TokenService::new(JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            ..test_config()
        });

        let (token, _) = service
            .issue(Uuid::now_v7(), "test@example.com", Role::Standard)
            .unwrap();
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = test_service();
        let now = Utc::now().timestamp();
        // Correctly signed but already outside its window
        let claims = test_claims(now - 7200, now - 3600);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_not_yet_valid_token_rejected() {
        let service = test_service();
        let now = Utc::now().timestamp();
        let claims = test_claims(now + 3600, now + 7200);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::NotYetValid));
    }

    #[test]
    fn test_wrong_algorithm_rejected() {
        let service = test_service();
        let now = Utc::now().timestamp();
        let claims = test_claims(now, now + 3600);

        // Same secret, different declared algorithm: must be rejected
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service = test_service();
        let now = Utc::now().timestamp();
        let mut claims = test_claims(now, now + 3600);
        claims.iss = "someone-else".to_string();

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert!(service.verify(&token).is_err());
    }
}
