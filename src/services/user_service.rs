//! User service - the account usecases.
//!
//! Every operation is a short pipeline that stops at the first failure.
//! Nothing is written before every check has passed, so no rollback is needed.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::token_issuer::{Claims, IssuedToken, TokenIssuer};
use crate::domain::{
    validate_email_shape, validate_password_rule, ChangePasswordRequest, LoginRequest, NewUser,
    Password, RegisterRequest, User,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: IssuedToken,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account
    async fn register(&self, req: RegisterRequest) -> AppResult<User>;

    /// Check credentials and issue a token
    async fn login(&self, req: LoginRequest) -> AppResult<LoginOutcome>;

    /// Replace the password of a registered email
    async fn change_password(&self, req: ChangePasswordRequest) -> AppResult<()>;

    /// Get a single user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all users (empty store yields an empty list)
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Permanently delete a user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Verify a bearer token issued by `login`
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of UserService over a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        validate_email_shape(&req.email)?;
        validate_password_rule(&req.password, &req.password_confirm)?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::EmailAlreadyUsed);
        }

        let password_hash = Password::hash(&req.password)?.into_string();

        // The store re-checks uniqueness, which covers a concurrent registration
        let user = self
            .repo
            .create(NewUser {
                name: req.name,
                email: req.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, req: LoginRequest) -> AppResult<LoginOutcome> {
        validate_email_shape(&req.email)?;

        let user = self
            .repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::EmailNotRegistered)?;

        let stored = Password::from_hash(user.password_hash.clone());
        if let Err(e) = stored.verify(&req.password) {
            tracing::warn!(user_id = %user.id, "Login rejected: invalid password");
            return Err(e);
        }

        let token = self.tokens.issue(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome { user, token })
    }

    async fn change_password(&self, req: ChangePasswordRequest) -> AppResult<()> {
        validate_email_shape(&req.email)?;
        validate_password_rule(&req.new_password, &req.password_confirm)?;

        let user = self
            .repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::EmailNotRegistered)?;

        let password_hash = Password::hash(&req.new_password)?.into_string();
        self.repo.update_password(&req.email, password_hash).await?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete_by_id(id).await?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        self.tokens.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    use super::*;
    use crate::errors::ValidationError;
    use crate::infra::MockUserRepository;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret-key-for-testing-only-32chars", Duration::hours(3))
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), issuer())
    }

    fn stored_user(email: &str, plain_password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "kale".to_string(),
            email: email.to_string(),
            password_hash: Password::hash(plain_password).unwrap().into_string(),
        }
    }

    fn register_request(email: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            name: "kale".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            name: "kale".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn change_request(email: &str, password: &str, confirm: &str) -> ChangePasswordRequest {
        ChangePasswordRequest {
            email: email.to_string(),
            new_password: password.to_string(),
            password_confirm: confirm.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // register
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_register_success_stores_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "kale@gmail.com")
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|u| u.email == "kale@gmail.com" && u.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|u| Ok(User::new(u.name, u.email, u.password_hash)));

        let user = service(repo)
            .register(register_request("kale@gmail.com", "password1", "password1"))
            .await
            .unwrap();

        assert_eq!(user.email, "kale@gmail.com");
        assert!(Password::from_hash(user.password_hash).verify("password1").is_ok());
    }

    #[tokio::test]
    async fn test_register_bad_email_touches_nothing() {
        // No expectations: any repository call would panic
        let repo = MockUserRepository::new();

        let result = service(repo)
            .register(register_request("kale", "123456789", "123456789"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::EmailFormat))
        ));
    }

    #[tokio::test]
    async fn test_register_password_rules() {
        let cases = [
            ("1234", "1234", ValidationError::PasswordTooShort),
            ("123456789", "1234987655", ValidationError::PasswordMismatch),
        ];

        for (password, confirm, expected) in cases {
            let repo = MockUserRepository::new();
            let result = service(repo)
                .register(register_request("leo@gmail.com", password, confirm))
                .await;

            match result {
                Err(AppError::Validation(kind)) => assert_eq!(kind, expected),
                other => panic!("expected {:?}, got {:?}", expected, other),
            }
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "12345678"))));
        repo.expect_create().never();

        let result = service(repo)
            .register(register_request("kale@gmail.com", "12345678", "12345678"))
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyUsed)));
    }

    #[tokio::test]
    async fn test_register_lost_race_reports_duplicate() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(AppError::EmailAlreadyUsed));

        let result = service(repo)
            .register(register_request("kale@gmail.com", "12345678", "12345678"))
            .await;

        assert!(matches!(result, Err(AppError::EmailAlreadyUsed)));
    }

    #[tokio::test]
    async fn test_register_storage_failure_propagates() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::Storage(DbErr::Custom("down".to_string()))));
        repo.expect_create().never();

        let result = service(repo)
            .register(register_request("kale@gmail.com", "12345678", "12345678"))
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    // -------------------------------------------------------------------------
    // login
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_login_success_issues_token() {
        let user = stored_user("joko@gmail.com", "password");
        let user_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "joko@gmail.com")
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(repo);
        let outcome = svc
            .login(login_request("joko@gmail.com", "password"))
            .await
            .unwrap();

        assert_eq!(outcome.user.id, user_id);
        let claims = svc.verify_token(&outcome.token.token).unwrap();
        assert_eq!(claims.id, user_id);
        assert_eq!(claims.email, "joko@gmail.com");
    }

    #[tokio::test]
    async fn test_login_bad_email_shape() {
        let repo = MockUserRepository::new();

        let result = service(repo)
            .login(login_request("kale@gmailcom", "password"))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::EmailFormat))
        ));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repo)
            .login(login_request("rahmad@gmail.com", "password"))
            .await;

        assert!(matches!(result, Err(AppError::EmailNotRegistered)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "123456789"))));

        let result = service(repo)
            .login(login_request("kale@gmail.com", "12345678"))
            .await;

        assert!(matches!(result, Err(AppError::InvalidPassword)));
    }

    // -------------------------------------------------------------------------
    // change_password
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_change_password_validation_precedes_lookup() {
        let cases = [
            ("kalegmail.com", "password123", "password123", "EMAIL_FORMAT"),
            ("kale@gmail.com", "password12", "password123", "PASSWORD_MISMATCH"),
            ("kale@gmail.com", "pass", "pass", "PASSWORD_TOO_SHORT"),
        ];

        for (email, password, confirm, code) in cases {
            let repo = MockUserRepository::new();
            let err = service(repo)
                .change_password(change_request(email, password, confirm))
                .await
                .unwrap_err();
            assert_eq!(err.code(), code);
        }
    }

    #[tokio::test]
    async fn test_change_password_unknown_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_update_password().never();

        let result = service(repo)
            .change_password(change_request("kale@gmail.com", "password", "password"))
            .await;

        assert!(matches!(result, Err(AppError::EmailNotRegistered)));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(email, "old_password"))));
        repo.expect_update_password()
            .withf(|email, hash| {
                email == "kale@gmail.com"
                    && Password::from_hash(hash.clone()).verify("password").is_ok()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(repo)
            .change_password(change_request("kale@gmail.com", "password", "password"))
            .await;

        assert!(result.is_ok());
    }

    // -------------------------------------------------------------------------
    // get_user / list_users / delete_user
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().with(eq(user_id)).returning(|id| {
            Ok(Some(User {
                id,
                name: "Bjorka".to_string(),
                email: "bjorka@gmail.com".to_string(),
                password_hash: "hash_password".to_string(),
            }))
        });

        let user = service(repo).get_user(user_id).await.unwrap();
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn test_list_users_empty_is_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| Ok(vec![]));

        let users = service(repo).list_users().await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_list_users_storage_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(AppError::Storage(DbErr::Custom("down".to_string()))));

        let result = service(repo).list_users().await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_delete_user_propagates_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_by_id()
            .returning(|_| Err(AppError::UserNotFound));

        let result = service(repo).delete_user(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_delete_by_id()
            .with(eq(user_id))
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(repo).delete_user(user_id).await.is_ok());
    }
}
