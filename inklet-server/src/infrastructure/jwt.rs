use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::user::Role;

#[derive(Debug, Error)]
pub(crate) enum JwtError {
    #[error("token encode failed")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token decode/validation failed")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Role rides in the claims: roles are immutable, so the token stays accurate
/// for its whole lifetime and the middleware needs no user lookup.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Claims {
    pub(crate) user_id: i64,
    pub(crate) username: String,
    pub(crate) role: Role,
    pub(crate) exp: i64,
}

#[derive(Clone)]
pub(crate) struct JwtService {
    secret: String,
    ttl_seconds: i64,
}

impl JwtService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub(crate) fn new(secret: &str, ttl_seconds: i64) -> Self {
        let ttl_seconds = if ttl_seconds > 0 {
            ttl_seconds
        } else {
            Self::DEFAULT_TTL_SECONDS
        };

        JwtService {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    pub(crate) fn generate_token(
        &self,
        user_id: i64,
        username: &str,
        role: Role,
    ) -> Result<String, JwtError> {
        let exp = (Utc::now() + Duration::seconds(self.ttl_seconds)).timestamp();

        let claims = Claims {
            user_id,
            username: username.into(),
            role,
            exp,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(JwtError::Encode)
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 10;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(JwtError::Decode)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

    use super::{Claims, JwtService};
    use crate::domain::user::Role;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn token_round_trips_claims() {
        let jwt = JwtService::new(SECRET, 3600);
        let token = jwt
            .generate_token(7, "some_admin", Role::Admin)
            .expect("token must be generated");

        let claims = jwt.verify_token(&token).expect("token must verify");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "some_admin");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            user_id: 7,
            username: "someone".to_string(),
            role: Role::User,
            exp: (Utc::now() - chrono::Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("token must encode");

        let jwt = JwtService::new(SECRET, 3600);
        assert!(jwt.verify_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new(SECRET, 3600);
        let token = issuer
            .generate_token(7, "someone", Role::User)
            .expect("token must be generated");

        let verifier = JwtService::new("ffffffffffffffffffffffffffffffff", 3600);
        assert!(verifier.verify_token(&token).is_err());
    }
}
