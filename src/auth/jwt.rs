use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::token::{Token, TokenError, TokenPayload, TokenProvider};
use crate::users::model::Role;

/// JWT claim set: user id and role, plus the usual timestamps.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 token provider keyed on the configured secret.
pub struct JwtProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtProvider {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenProvider for JwtProvider {
    fn generate(&self, payload: TokenPayload, expiry_secs: u64) -> Result<Token, TokenError> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::seconds(expiry_secs as i64);
        let claims = Claims {
            sub: payload.user_id,
            role: payload.role,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };

        let token = encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)?;
        debug!(user_id = %payload.user_id, role = %payload.role, "token signed");

        Ok(Token {
            token,
            created: now,
            expiry: expiry_secs,
        })
    }

    fn validate(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;

        Ok(TokenPayload {
            user_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> JwtProvider {
        JwtProvider::new("test-secret")
    }

    #[test]
    fn generate_and_validate_roundtrip() {
        let user_id = Uuid::new_v4();
        let payload = TokenPayload {
            user_id,
            role: Role::Regular,
        };

        let token = provider().generate(payload, 3600).expect("generate");
        assert!(!token.token.is_empty());
        assert_eq!(token.expiry, 3600);

        let decoded = provider().validate(&token.token).expect("validate");
        assert_eq!(decoded.user_id, user_id);
        assert_eq!(decoded.role, Role::Regular);
    }

    #[test]
    fn role_is_preserved_in_claims() {
        let payload = TokenPayload {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let token = provider().generate(payload, 60).expect("generate");
        let decoded = provider().validate(&token.token).expect("validate");
        assert_eq!(decoded.role, Role::Admin);
    }

    #[test]
    fn validate_rejects_tampered_token() {
        let payload = TokenPayload {
            user_id: Uuid::new_v4(),
            role: Role::Regular,
        };
        let token = provider().generate(payload, 3600).expect("generate");

        let mut tampered = token.token.clone();
        // Flip the last signature character.
        let last = tampered.pop().expect("non-empty token");
        tampered.push(if last == 'a' { 'b' } else { 'a' });

        assert!(matches!(
            provider().validate(&tampered),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn validate_rejects_wrong_secret() {
        let payload = TokenPayload {
            user_id: Uuid::new_v4(),
            role: Role::Regular,
        };
        let token = provider().generate(payload, 3600).expect("generate");

        let other = JwtProvider::new("different-secret");
        assert!(matches!(
            other.validate(&token.token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn validate_rejects_expired_token() {
        // Craft claims whose exp is far enough in the past to clear the
        // default leeway.
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Regular,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");

        assert!(matches!(
            provider().validate(&expired),
            Err(TokenError::Invalid)
        ));
    }
}
