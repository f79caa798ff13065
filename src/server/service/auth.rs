//! Account authentication: registration, login, token rotation and password flows.

pub mod password;
pub mod token;

use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::user::Role,
    server::{
        data::{
            password_reset_token::PasswordResetTokenRepository,
            refresh_token::RefreshTokenRepository, user::UserRepository,
        },
        error::{auth::AuthError, validation::ValidationError, AppError},
        model::{
            auth::{AuthSession, AuthUser, TokenPair},
            user::{RegisterParams, User},
        },
        service::auth::{
            password::{generate_reset_token, hash_password, verify_password},
            token::TokenKeys,
        },
        util::validate,
    },
};

/// Validity of a password reset token.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Service for account credentials and sessions.
///
/// Access tokens are stateless; refresh tokens are persisted so they can be
/// rotated and revoked.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenKeys,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenKeys) -> Self {
        Self { db, tokens }
    }

    /// Creates an account and signs it in.
    ///
    /// # Returns
    /// - `Ok(AuthSession)` - New user with a fresh token pair
    /// - `Err(AppError::Conflict)` - Email already registered
    pub async fn register(&self, params: RegisterParams) -> Result<AuthSession, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_email(&params.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&params.password)?;
        let user = repo
            .create(&params.email, &password_hash, params.name, Role::User)
            .await?;
        let user = User::from_entity(user)?;

        tracing::info!("Registered user {}", user.id);

        let tokens = self.issue_pair(&user).await?;
        Ok(AuthSession { user, tokens })
    }

    /// Signs in with email and password.
    ///
    /// # Returns
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::AccountDeactivated)` - Correct credentials, inactive account
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };
        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }

        let user = User::from_entity(user)?;
        let tokens = self.issue_pair(&user).await?;
        Ok(AuthSession { user, tokens })
    }

    /// Exchanges a refresh token for a new pair, revoking the presented one.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.tokens.verify_refresh(refresh_token)?;

        let stored = RefreshTokenRepository::new(self.db)
            .find_by_token(refresh_token)
            .await?
            .filter(|stored| stored.expires_at > Utc::now())
            .ok_or(AuthError::RefreshTokenExpired)?;

        let user = UserRepository::new(self.db)
            .find_by_id(&claims.sub)
            .await?
            .filter(|user| user.is_active && user.id == stored.user_id)
            .ok_or(AuthError::UserInactive)?;
        let user = User::from_entity(user)?;

        let access_token = self.tokens.issue_access(&user)?;
        let (new_refresh, expires_at) = self.tokens.issue_refresh(&user.id)?;

        let txn = self.db.begin().await?;
        let repo = RefreshTokenRepository::new(&txn);
        repo.delete_by_token(refresh_token).await?;
        repo.create(&user.id, &new_refresh, expires_at).await?;
        txn.commit().await?;

        Ok(TokenPair {
            access_token,
            refresh_token: new_refresh,
        })
    }

    /// Revokes one refresh token. Unknown or missing tokens are not an error.
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AppError> {
        if let Some(token) = refresh_token {
            RefreshTokenRepository::new(self.db)
                .delete_by_token(token)
                .await?;
        }
        Ok(())
    }

    /// Revokes every refresh token of the user.
    pub async fn logout_all(&self, user_id: &str) -> Result<(), AppError> {
        let revoked = RefreshTokenRepository::new(self.db)
            .delete_by_user(user_id)
            .await?;

        tracing::debug!("Revoked {} refresh tokens of user {}", revoked, user_id);
        Ok(())
    }

    /// Changes the password after checking the current one and revokes all sessions.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut errors = ValidationError::default();
        validate::password(&mut errors, "newPassword", new_password);
        errors.into_result()?;

        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(current_password, &user.password_hash) {
            return Err(AuthError::IncorrectPassword.into());
        }

        let password_hash = hash_password(new_password)?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn)
            .update_password(user, password_hash)
            .await?;
        RefreshTokenRepository::new(&txn)
            .delete_by_user(user_id)
            .await?;
        txn.commit().await?;

        Ok(())
    }

    /// Starts a password reset.
    ///
    /// Always succeeds so callers cannot learn which emails are registered. The
    /// reset link is logged instead of mailed.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - Token issued for an active account
    /// - `Ok(None)` - No active account with that email
    pub async fn forgot_password(
        &self,
        email: &str,
        frontend_url: &str,
    ) -> Result<Option<String>, AppError> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_email(email)
            .await?
            .filter(|user| user.is_active)
        else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(None);
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        let txn = self.db.begin().await?;
        let repo = PasswordResetTokenRepository::new(&txn);
        repo.delete_by_user(&user.id).await?;
        repo.create(&user, &token, expires_at).await?;
        txn.commit().await?;

        tracing::info!(
            "Password reset link for {}: {}/reset-password?token={}",
            user.email,
            frontend_url.trim_end_matches('/'),
            token
        );

        Ok(Some(token))
    }

    /// Sets a new password using a reset token and revokes all sessions.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Token unknown, already used or expired
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AppError> {
        let mut errors = ValidationError::default();
        validate::password(&mut errors, "newPassword", new_password);
        errors.into_result()?;

        let invalid = || AppError::BadRequest("Invalid or expired reset token".to_string());

        let reset = PasswordResetTokenRepository::new(self.db)
            .find_by_token(token)
            .await?
            .ok_or_else(invalid)?;
        if reset.used || reset.expires_at <= Utc::now() {
            return Err(invalid());
        }

        let user = UserRepository::new(self.db)
            .find_by_id(&reset.user_id)
            .await?
            .ok_or_else(invalid)?;

        let password_hash = hash_password(new_password)?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn)
            .update_password(user, password_hash)
            .await?;
        PasswordResetTokenRepository::new(&txn)
            .mark_used(&reset.id)
            .await?;
        RefreshTokenRepository::new(&txn)
            .delete_by_user(&reset.user_id)
            .await?;
        txn.commit().await?;

        Ok(())
    }

    /// Resolves a bearer token to an active user.
    pub async fn authenticate(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let claims = self.tokens.verify_access(access_token)?;

        let user = UserRepository::new(self.db)
            .find_by_id(&claims.sub)
            .await
            .map_err(|err| {
                tracing::error!("Failed to load user for token: {}", err);
                AuthError::UserInactive
            })?
            .filter(|user| user.is_active)
            .ok_or(AuthError::UserInactive)?;

        let role = Role::parse(&user.role).ok_or(AuthError::UserInactive)?;

        Ok(AuthUser {
            id: user.id,
            email: user.email,
            role,
        })
    }

    /// Gets the signed-in user.
    pub async fn me(&self, user_id: &str) -> Result<User, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserInactive)?;

        Ok(User::from_entity(user)?)
    }

    /// Creates the first admin account when none exists yet.
    ///
    /// # Returns
    /// - `Ok(true)` - Admin created
    /// - `Ok(false)` - An admin already exists or the email is taken
    pub async fn bootstrap_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.admin_exists().await? {
            return Ok(false);
        }
        let email = email.to_lowercase();
        if repo.find_by_email(&email).await?.is_some() {
            tracing::warn!("Cannot bootstrap admin: {} is already registered", email);
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        repo.create(&email, &password_hash, Some("Admin".to_string()), Role::Admin)
            .await?;

        Ok(true)
    }

    async fn issue_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.tokens.issue_access(user)?;
        let (refresh_token, expires_at) = self.tokens.issue_refresh(&user.id)?;

        RefreshTokenRepository::new(self.db)
            .create(&user.id, &refresh_token, expires_at)
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }
}
