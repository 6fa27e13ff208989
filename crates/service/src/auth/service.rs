use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AdminAccount, AdminSession, Claims, Credentials, LoginInput};
use super::errors::AuthError;
use super::repository::AdminRepository;
use super::token;

pub const PASSWORD_ALGORITHM: &str = "argon2id";

/// Token signing settings
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Admin auth service independent of web framework
pub struct AuthService<R: AdminRepository> {
    repo: Arc<R>,
    cfg: AuthSettings,
}

impl<R: AdminRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthSettings) -> Self { Self { repo, cfg } }

    /// Register a new admin with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthSettings}, repository::mock::MockAdminRepository};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAdminRepository::default());
    /// let svc = AuthService::new(repo, AuthSettings { jwt_secret: "secret".into(), token_ttl_hours: 24 });
    /// let admin = tokio_test::block_on(svc.register("root", "Secret123")).unwrap();
    /// assert_eq!(admin.username, "root");
    /// ```
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<AdminAccount, AuthError> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation("username is required".into()));
        }
        if password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some((existing, _)) = self.repo.find_by_username(username).await? {
            debug!("admin exists: {}", existing.username);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();
        let credentials = Credentials { password_hash: hash, password_algorithm: PASSWORD_ALGORITHM.into() };

        let admin = self.repo.create_admin(username, credentials).await?;
        info!(admin_id = admin.id, username = %admin.username, "admin_registered");
        Ok(admin)
    }

    /// Make sure the bootstrap account exists. Returns `true` when it was created.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        match self.register(username, password).await {
            Ok(_) => Ok(true),
            Err(AuthError::Conflict) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check the password and issue a signed admin token.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AdminSession, AuthError> {
        let (admin, cred) = self.repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let (token, claims) = token::issue(&self.cfg.jwt_secret, &admin, self.cfg.token_ttl_hours)?;
        info!(admin_id = admin.id, "admin_logged_in");
        Ok(AdminSession { admin, token, expires_at: claims.exp })
    }

    /// Validate a token; anything that is not a live admin token is `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = token::decode_claims(&self.cfg.jwt_secret, token).map_err(|e| {
            debug!(error = %e, "token rejected");
            AuthError::Unauthorized
        })?;
        if !claims.is_admin {
            return Err(AuthError::Unauthorized);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAdminRepository;

    fn svc() -> AuthService<MockAdminRepository> {
        AuthService::new(
            Arc::new(MockAdminRepository::default()),
            AuthSettings { jwt_secret: "test-secret".into(), token_ttl_hours: 1 },
        )
    }

    fn login_input(password: &str) -> LoginInput {
        LoginInput { username: "root".into(), password: password.into() }
    }

    #[tokio::test]
    async fn register_then_login_yields_admin_token() {
        let s = svc();
        s.register("root", "password123").await.unwrap();
        let session = s.login(login_input("password123")).await.unwrap();
        let claims = s.verify(&session.token).unwrap();
        assert_eq!(claims.sub, "root");
        assert_eq!(claims.uid, session.admin.id);
        assert!(claims.is_admin);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let err = svc().register("root", "short").await.unwrap_err();
        assert_eq!(err.code(), 1001);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let s = svc();
        s.register("root", "password123").await.unwrap();
        assert!(matches!(s.register("root", "password456").await, Err(AuthError::Conflict)));
    }

    #[tokio::test]
    async fn ensure_admin_is_idempotent() {
        let s = svc();
        assert!(s.ensure_admin("root", "password123").await.unwrap());
        assert!(!s.ensure_admin("root", "password123").await.unwrap());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_unauthorized() {
        let s = svc();
        s.register("root", "password123").await.unwrap();
        assert!(matches!(s.login(login_input("nope-nope")).await, Err(AuthError::Unauthorized)));
        let ghost = LoginInput { username: "ghost".into(), password: "password123".into() };
        assert!(matches!(s.login(ghost).await, Err(AuthError::Unauthorized)));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        assert!(matches!(svc().verify("not.a.jwt"), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn non_admin_claims_are_unauthorized() {
        use jsonwebtoken::{encode, EncodingKey, Header};
        let now = chrono::Utc::now().timestamp();
        let claims = Claims { sub: "guest".into(), uid: 9, is_admin: false, iat: now, exp: now + 600 };
        let t = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap();
        assert!(matches!(svc().verify(&t), Err(AuthError::Unauthorized)));
    }
}
