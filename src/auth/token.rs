// JWT issuance and verification. Tokens are HS256-signed and travel in an
// httpOnly cookie named `token`.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Center,
    Company,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Center => "center",
            Role::Company => "company",
            Role::Admin => "admin",
        }
    }
}

/// Payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - document id of the principal.
    pub sub: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated principal handlers see, decoded from the cookie.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
}

impl Principal {
    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "Requires {} role",
                role.as_str()
            )))
        }
    }
}

pub fn issue_token(id: i64, role: Role, secret: &str, ttl_secs: i64) -> AppResult<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: id,
        role,
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token encode failed: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// Pull the `token` cookie out of a Cookie header value.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == TOKEN_COOKIE {
            Some(value)
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let token = issue_token(42, Role::Center, "secret", 3600).unwrap();
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Center);
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let token = issue_token(1, Role::Admin, "secret", 3600).unwrap();
        assert!(verify_token(&token, "other").is_err());

        let stale = issue_token(1, Role::Admin, "secret", -120).unwrap();
        assert!(verify_token(&stale, "secret").is_err());
    }

    #[test]
    fn finds_token_among_other_cookies() {
        assert_eq!(
            token_from_cookie_header("theme=dark; token=abc.def.ghi; lang=en"),
            Some("abc.def.ghi")
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
    }

    #[test]
    fn role_mismatch_is_forbidden() {
        let principal = Principal {
            id: 1,
            role: Role::Company,
        };
        assert!(principal.require_role(Role::Company).is_ok());
        assert!(principal.require_role(Role::Admin).is_err());
    }
}
