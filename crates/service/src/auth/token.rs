use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::domain::{AdminAccount, Claims};
use super::errors::AuthError;

/// Sign an HS256 admin token valid for `ttl_hours`.
pub fn issue(secret: &str, admin: &AdminAccount, ttl_hours: i64) -> Result<(String, Claims), AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin.username.clone(),
        uid: admin.id,
        is_admin: true,
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok((token, claims))
}

/// Check signature and expiry, returning the claims.
pub fn decode_claims(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| AuthError::TokenError(e.to_string()))?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> AdminAccount { AdminAccount { id: 1, username: "root".into() } }

    #[test]
    fn issued_token_decodes_with_same_secret() {
        let (token, claims) = issue("s3cret", &root(), 2).unwrap();
        let decoded = decode_claims("s3cret", &token).unwrap();
        assert_eq!(decoded, claims);
        assert!(decoded.is_admin);
        assert_eq!(decoded.exp - decoded.iat, 2 * 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = issue("s3cret", &root(), 2).unwrap();
        assert!(matches!(decode_claims("other", &token), Err(AuthError::TokenError(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        // default leeway is 60s, so expire well past it
        let (token, _) = issue("s3cret", &root(), -1).unwrap();
        assert!(decode_claims("s3cret", &token).is_err());
    }
}
