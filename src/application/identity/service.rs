//! User management service: application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidateEmail;

use super::commands::{ProfileUpdate, RegisterUser};
use crate::application::ports::{Mailer, OutgoingMail};
use crate::config::AdminConfig;
use crate::domain::user::normalize_email;
use crate::domain::{
    non_empty, CreateUserDto, DomainError, DomainResult, UpdateUserDto, User, UserRepositoryInterface,
    UserRole,
};
use crate::infrastructure::crypto::jwt::{
    create_reset_token, create_session_token, verify_token, JwtConfig, TokenPurpose,
};
use crate::infrastructure::crypto::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authentication result returned after register or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub user: User,
}

/// User service: orchestrates all identity / user-management use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
    mailer: Arc<dyn Mailer>,
    /// Base of password reset links
    frontend_url: String,
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(
        repo: Arc<R>,
        jwt_config: JwtConfig,
        mailer: Arc<dyn Mailer>,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            repo,
            jwt_config,
            mailer,
            frontend_url: frontend_url.into(),
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Create an account and sign the new user in.
    pub async fn register(&self, cmd: RegisterUser) -> DomainResult<AuthResult> {
        let name = cmd.name.trim().to_string();
        let email = normalize_email(&cmd.email);

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name".to_string());
        }
        if email.is_empty() {
            missing.push("email".to_string());
        }
        if cmd.password.is_empty() {
            missing.push("password".to_string());
        }
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        if !email.validate_email() {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        let role = match non_empty(cmd.role) {
            Some(role) => role.parse::<UserRole>()?,
            None => UserRole::User,
        };

        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let user = self
            .repo
            .create_user(CreateUserDto {
                name,
                email,
                role,
                password: cmd.password,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "New user registered");
        self.sign_in(user)
    }

    /// Authenticate by email + password and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repo.get_user_by_email(email).await? else {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        info!(user_id = %user.id, "User logged in");
        self.sign_in(user)
    }

    /// Resolve a session token to the user it was issued for.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        let claims = verify_token(token, TokenPurpose::Session, &self.jwt_config)
            .map_err(|_| DomainError::Unauthorized("Not authorized, token failed".into()))?;

        self.repo
            .get_user_by_id(&claims.sub)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("Not authorized, user not found".into()))
    }

    fn sign_in(&self, user: User) -> DomainResult<AuthResult> {
        let token = create_session_token(&user.id, &self.jwt_config)
            .map_err(|e| DomainError::internal("Failed to create token", e))?;
        Ok(AuthResult { token, user })
    }

    // ── Profile ─────────────────────────────────────────────────

    pub async fn profile(&self, user_id: &str) -> DomainResult<User> {
        self.repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Partial update of the requester's own record.
    pub async fn update_profile(&self, requester: &User, update: ProfileUpdate) -> DomainResult<User> {
        let email = non_empty(update.email).map(|e| normalize_email(&e));
        if let Some(email) = &email {
            if !email.validate_email() {
                return Err(DomainError::Validation("Invalid email address".into()));
            }
            if let Some(other) = self.repo.get_user_by_email(email).await? {
                if other.id != requester.id {
                    return Err(DomainError::Conflict("Email already in use".into()));
                }
            }
        }

        let role = match non_empty(update.role) {
            Some(role) if requester.is_admin() => Some(role.parse::<UserRole>()?),
            _ => None,
        };

        let dto = UpdateUserDto {
            name: non_empty(update.name).map(|n| n.trim().to_string()),
            email,
            password: update.password.filter(|p| !p.is_empty()),
            role,
        };
        let password_changed = dto.password.is_some();

        let user = self
            .repo
            .update_user(&requester.id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        info!(user_id = %user.id, password_changed, "Profile updated");
        Ok(user)
    }

    // ── Password reset ──────────────────────────────────────────

    /// Mail a short-lived reset link to the account owner.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        if email.trim().is_empty() {
            return Err(DomainError::MissingFields(vec!["email".into()]));
        }

        let user = self
            .repo
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        let token = create_reset_token(&user.id, &self.jwt_config)
            .map_err(|e| DomainError::internal("Failed to create token", e))?;
        let link = format!(
            "{}/reset-password/{}",
            self.frontend_url.trim_end_matches('/'),
            token
        );

        self.mailer
            .send(OutgoingMail {
                to: user.email.clone(),
                subject: "Password Reset Request".into(),
                body: format!("Click here to reset your password: {}", link),
            })
            .await?;

        info!(user_id = %user.id, "Password reset link sent");
        Ok(())
    }

    pub async fn reset_password(&self, token: &str, password: &str) -> DomainResult<()> {
        let claims = verify_token(token, TokenPurpose::PasswordReset, &self.jwt_config)
            .map_err(|_| DomainError::Validation("Invalid or expired token".into()))?;

        let user = self.repo.get_user_by_id(&claims.sub).await?.ok_or_else(|| {
            DomainError::Validation("Invalid token or user does not exist".into())
        })?;

        if password.is_empty() {
            return Err(DomainError::Validation("Password is required".into()));
        }

        self.repo
            .update_user(
                &user.id,
                UpdateUserDto {
                    password: Some(password.to_string()),
                    ..UpdateUserDto::default()
                },
            )
            .await?;

        info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    // ── Administration ──────────────────────────────────────────

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repo.list_users().await
    }

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Admin accounts cannot be deleted.
    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let user = self.get_user(id).await?;
        if user.is_admin() {
            return Err(DomainError::Forbidden("Cannot delete an admin".into()));
        }

        self.repo.delete_user(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Seed an admin account when the user table is empty.
    pub async fn ensure_default_admin(&self, admin: &AdminConfig) -> DomainResult<Option<User>> {
        if self.repo.count_users().await? > 0 {
            return Ok(None);
        }

        info!("Creating default admin user...");
        let user = self
            .repo
            .create_user(CreateUserDto {
                name: admin.name.clone(),
                email: admin.email.clone(),
                role: UserRole::Admin,
                password: admin.password.clone(),
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "Default admin created");
        warn!("Please change the default admin password immediately");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::UserRepository;
    use crate::test_support::{test_db, RecordingMailer};

    struct Fixture {
        _dir: tempfile::TempDir,
        service: UserService<UserRepository>,
        mailer: RecordingMailer,
    }

    async fn fixture_with(mailer: RecordingMailer) -> Fixture {
        let (dir, db) = test_db().await;
        let jwt = JwtConfig {
            secret: "test-secret".into(),
            ..JwtConfig::default()
        };
        let service = UserService::new(
            Arc::new(UserRepository::new(db)),
            jwt,
            Arc::new(mailer.clone()),
            "http://localhost:3000/",
        );
        Fixture {
            _dir: dir,
            service,
            mailer,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(RecordingMailer::default()).await
    }

    fn signup(email: &str) -> RegisterUser {
        RegisterUser {
            name: "Freddie".into(),
            email: email.into(),
            password: "secret123".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_issues_a_session_token() {
        let f = fixture().await;
        let result = f.service.register(signup("Freddie@Queen.com")).await.unwrap();

        assert_eq!(result.user.email, "freddie@queen.com");
        assert_eq!(result.user.role, UserRole::User);
        let user = f.service.authenticate(&result.token).await.unwrap();
        assert_eq!(user.id, result.user.id);
    }

    #[tokio::test]
    async fn register_rejects_existing_email_in_any_case() {
        let f = fixture().await;
        f.service.register(signup("a@x.com")).await.unwrap();

        let err = f.service.register(signup("A@X.COM")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn register_lists_missing_fields() {
        let f = fixture().await;
        let err = f
            .service
            .register(RegisterUser {
                email: "a@x.com".into(),
                ..RegisterUser::default()
            })
            .await
            .unwrap_err();

        match err {
            DomainError::MissingFields(fields) => assert_eq!(fields, vec!["name", "password"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_rejects_unknown_role() {
        let f = fixture().await;
        let err = f
            .service
            .register(RegisterUser {
                role: Some("superuser".into()),
                ..signup("a@x.com")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let f = fixture().await;
        f.service.register(signup("a@x.com")).await.unwrap();

        assert!(f.service.login("A@x.com", "secret123").await.is_ok());
        assert!(matches!(
            f.service.login("a@x.com", "wrong").await,
            Err(DomainError::Unauthorized(_))
        ));
        assert!(matches!(
            f.service.login("nobody@x.com", "secret123").await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn reset_token_does_not_authenticate() {
        let f = fixture().await;
        let user = f.service.register(signup("a@x.com")).await.unwrap().user;
        let reset = create_reset_token(&user.id, f.service.jwt_config()).unwrap();

        assert!(matches!(
            f.service.authenticate(&reset).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn role_change_requires_admin() {
        let f = fixture().await;
        let user = f.service.register(signup("a@x.com")).await.unwrap().user;

        let updated = f
            .service
            .update_profile(
                &user,
                ProfileUpdate {
                    name: Some("".into()),
                    role: Some("admin".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.role, UserRole::User);
        assert_eq!(updated.name, "Freddie");

        let admin = f
            .service
            .register(RegisterUser {
                role: Some("admin".into()),
                ..signup("root@x.com")
            })
            .await
            .unwrap()
            .user;
        let promoted = f
            .service
            .update_profile(
                &admin,
                ProfileUpdate {
                    role: Some("moderator".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(promoted.role, UserRole::Moderator);
    }

    #[tokio::test]
    async fn profile_email_must_stay_unique() {
        let f = fixture().await;
        f.service.register(signup("taken@x.com")).await.unwrap();
        let user = f.service.register(signup("a@x.com")).await.unwrap().user;

        let err = f
            .service
            .update_profile(
                &user,
                ProfileUpdate {
                    email: Some("TAKEN@x.com".into()),
                    ..ProfileUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn forgot_then_reset_password() {
        let f = fixture().await;
        f.service.register(signup("a@x.com")).await.unwrap();

        f.service.forgot_password("A@X.com").await.unwrap();
        let sent = f.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.com");
        assert_eq!(sent[0].subject, "Password Reset Request");

        let prefix = "Click here to reset your password: http://localhost:3000/reset-password/";
        let token = sent[0].body.strip_prefix(prefix).unwrap();

        f.service.reset_password(token, "brand-new-pass").await.unwrap();
        assert!(f.service.login("a@x.com", "brand-new-pass").await.is_ok());
        assert!(f.service.login("a@x.com", "secret123").await.is_err());
    }

    #[tokio::test]
    async fn session_token_cannot_reset_password() {
        let f = fixture().await;
        let token = f.service.register(signup("a@x.com")).await.unwrap().token;

        let err = f.service.reset_password(&token, "whatever").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn forgot_password_for_unknown_email_is_not_found() {
        let f = fixture().await;
        assert!(matches!(
            f.service.forgot_password("ghost@x.com").await,
            Err(DomainError::NotFound(_))
        ));
        assert!(f.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn relay_failure_surfaces_as_internal() {
        let f = fixture_with(RecordingMailer::failing()).await;
        f.service.register(signup("a@x.com")).await.unwrap();

        assert!(matches!(
            f.service.forgot_password("a@x.com").await,
            Err(DomainError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn admins_cannot_be_deleted() {
        let f = fixture().await;
        let admin = f
            .service
            .ensure_default_admin(&AdminConfig::default())
            .await
            .unwrap()
            .unwrap();
        let user = f.service.register(signup("a@x.com")).await.unwrap().user;

        assert!(matches!(
            f.service.delete_user(&admin.id).await,
            Err(DomainError::Forbidden(_))
        ));
        f.service.delete_user(&user.id).await.unwrap();
        assert!(matches!(
            f.service.delete_user(&user.id).await,
            Err(DomainError::NotFound(_))
        ));
        assert_eq!(f.service.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn default_admin_is_seeded_once() {
        let f = fixture().await;
        let admin = AdminConfig::default();

        let first = f.service.ensure_default_admin(&admin).await.unwrap();
        assert!(first.is_some_and(|u| u.is_admin()));
        assert!(f.service.ensure_default_admin(&admin).await.unwrap().is_none());
    }
}
