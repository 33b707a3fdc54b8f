//! JWT access-token verification.
//!
//! Token issuance lives with the account-management collaborator; this
//! subsystem only verifies HS256 tokens — on the HTTP surface via the
//! `Authorization` header, and on the WebSocket transport via a query
//! parameter supplied before the upgrade. Signing support exists so the
//! test suites can mint tokens against a known secret.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use pulseboard_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's role name (e.g. `"admin"`, `"employee"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for revocation / audit.
    pub jti: String,
}

/// Default access token expiry in hours.
const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Secret and lifetime for token verification (and test-only signing).
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the token issuer.
    pub secret: String,
    /// Access token lifetime in hours (default: 24).
    pub token_expiry_hours: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `JWT_SECRET`       | **yes**  | --      |
    /// | `JWT_EXPIRY_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_expiry_hours: i64 = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            token_expiry_hours,
        }
    }

    /// Sign an HS256 access token for the given user.
    ///
    /// The token carries the user id, role, issue time, expiration, and
    /// a unique `jti` claim.
    pub fn sign(&self, user_id: DbId, role: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();

        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            exp: now + self.token_expiry_hours * 3600,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(), // HS256
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify a token's signature and expiry, returning the embedded [`Claims`].
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(), // HS256, validates exp
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_expiry_hours: 24,
        }
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let config = test_config();
        let token = config.sign(42, "admin").expect("signing should succeed");

        let claims = config.verify(&token).expect("verification should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "admin");
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let token = test_config().sign(1, "employee").unwrap();

        let other = JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            token_expiry_hours: 24,
        };
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = JwtConfig {
            secret: test_config().secret,
            token_expiry_hours: -1,
        };
        let token = expired.sign(1, "employee").unwrap();
        assert!(test_config().verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(test_config().verify("not-a-jwt").is_err());
    }
}
