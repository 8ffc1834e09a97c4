//! Account lifecycle orchestration.
//!
//! Every operation here is an explicit, ordered composition over the hasher,
//! signer, and repositories; there is no hook registry. The two composition
//! points that matter:
//!
//! - pre-persist: a password is hashed exactly when it enters or changes
//!   (`register`, `update_user` with a new password). A save that does not
//!   touch the password never re-hashes the stored value.
//! - pre-delete: `delete_user` removes owned tasks and live tokens in the
//!   same transaction as the account row, so the cascade and the removal
//!   succeed or fail as one unit.

use crate::{IdentityError, Result as IdentityErrorResult, UserValidator};

use tm_auth::{AuthError, CredentialHasher, TokenSigner};
use tm_config::Config;
use tm_core::User;
use tm_db::{DbError, TaskRepository, TokenRepository, UserRepository};

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Registration input. Plaintext password only lives here until `register`
/// hashes it; the struct intentionally has no `Debug` impl.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i64,
}

impl NewUser {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            age: 0,
        }
    }
}

/// Partial account update. `None` fields are left untouched; in particular a
/// `None` password means the stored hash passes through unchanged.
#[derive(Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i64>,
}

pub struct IdentityService {
    pool: SqlitePool,
    signer: Arc<TokenSigner>,
    hasher: Arc<CredentialHasher>,
}

impl IdentityService {
    pub fn new(pool: SqlitePool, signer: TokenSigner, hasher: CredentialHasher) -> Self {
        Self {
            pool,
            signer: Arc::new(signer),
            hasher: Arc::new(hasher),
        }
    }

    /// Build the service from validated configuration. The signing secret is
    /// read out of config exactly once, here.
    pub fn from_config(pool: SqlitePool, config: &Config) -> IdentityErrorResult<Self> {
        let hasher = CredentialHasher::new(
            config.password.m_cost_kib,
            config.password.t_cost,
            config.password.p_cost,
        )?;
        let signer = TokenSigner::new(config.auth.secret());

        Ok(Self::new(pool, signer, hasher))
    }

    // ------------------------------------------------------------------ //
    // Registration and profile
    // ------------------------------------------------------------------ //

    /// Validate, hash, persist. The unique index on email arbitrates races
    /// between concurrent registrations; its rejection surfaces as
    /// `DuplicateEmail`.
    pub async fn register(&self, new_user: NewUser) -> IdentityErrorResult<User> {
        let name = new_user.name.trim().to_string();
        let email = UserValidator::normalize_email(&new_user.email);
        UserValidator::validate_registration(&name, &email, &new_user.password, new_user.age)?;

        let password_hash = self.hash_password(new_user.password).await?;

        let user = User::new(name, email, password_hash, new_user.age);
        UserRepository::create(&self.pool, &user).await?;

        info!("registered user {}", user.id);
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> IdentityErrorResult<Option<User>> {
        Ok(UserRepository::find_by_id(&self.pool, id).await?)
    }

    /// Apply a partial update. Only a supplied password is re-hashed; every
    /// other field of the stored hash is left byte-for-byte as it was.
    pub async fn update_user(&self, id: Uuid, update: UserUpdate) -> IdentityErrorResult<User> {
        let Some(mut user) = UserRepository::find_by_id(&self.pool, id).await? else {
            return Err(IdentityError::user_not_found());
        };

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            UserValidator::validate_name(&name)?;
            user.name = name;
        }

        if let Some(email) = update.email {
            let email = UserValidator::normalize_email(&email);
            UserValidator::validate_email(&email)?;
            user.email = email;
        }

        if let Some(age) = update.age {
            UserValidator::validate_age(age)?;
            user.age = age;
        }

        if let Some(password) = update.password {
            UserValidator::validate_password(&password)?;
            user.password_hash = self.hash_password(password).await?;
        }

        user.updated_at = Utc::now();
        let rows = UserRepository::update(&self.pool, &user).await?;
        if rows == 0 {
            // Deleted between the read and the write.
            return Err(IdentityError::user_not_found());
        }

        debug!("updated user {}", user.id);
        Ok(user)
    }

    /// Remove the account and everything it owns as a single unit: tasks,
    /// then live tokens, then the user row, in one transaction. If any step
    /// fails, nothing is deleted.
    pub async fn delete_user(&self, id: Uuid) -> IdentityErrorResult<()> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        let task_count = TaskRepository::delete_all_by_owner(&mut *tx, id).await?;
        TokenRepository::delete_all_for_user(&mut *tx, id).await?;
        let rows = UserRepository::delete(&mut *tx, id).await?;
        if rows == 0 {
            // Rolls back on drop; the cascade deletes above never land.
            return Err(IdentityError::user_not_found());
        }

        tx.commit().await.map_err(DbError::from)?;

        info!("deleted user {} and {} owned tasks", id, task_count);
        Ok(())
    }

    // ------------------------------------------------------------------ //
    // Credentials and sessions
    // ------------------------------------------------------------------ //

    /// Look up by normalized email and check the password. A missing account
    /// and a wrong password fail with the same error, so callers cannot
    /// probe which addresses are registered.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> IdentityErrorResult<User> {
        let email = UserValidator::normalize_email(email);

        let Some(user) = UserRepository::find_by_email(&self.pool, &email).await? else {
            return Err(IdentityError::AuthenticationFailed);
        };

        let matches = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches {
            return Err(IdentityError::AuthenticationFailed);
        }

        Ok(user)
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> IdentityErrorResult<(User, String)> {
        let user = self.find_by_credentials(email, password).await?;
        let token = self.issue_token(&user).await?;

        info!("user {} logged in", user.id);
        Ok((user, token))
    }

    /// Sign a token for the user and append it to their live set. The append
    /// is a single-row insert, so concurrent logins never overwrite each
    /// other's tokens.
    pub async fn issue_token(&self, user: &User) -> IdentityErrorResult<String> {
        let token = self.signer.sign(user.id)?;
        TokenRepository::insert(&self.pool, user.id, &token, Utc::now()).await?;

        Ok(token)
    }

    /// Revoke exactly one token. Revoking a token that was never issued (or
    /// is already revoked) is a no-op, not an error.
    pub async fn revoke_token(&self, user: &User, token: &str) -> IdentityErrorResult<()> {
        let removed = TokenRepository::delete(&self.pool, user.id, token).await?;
        if removed == 0 {
            debug!("revoke for user {} matched no token", user.id);
        }

        Ok(())
    }

    /// Revoke every live token for the user (log out everywhere).
    pub async fn revoke_all_tokens(&self, user: &User) -> IdentityErrorResult<u64> {
        let removed = TokenRepository::delete_all_for_user(&self.pool, user.id).await?;

        info!("revoked {} tokens for user {}", removed, user.id);
        Ok(removed)
    }

    /// Signature check only; does not consult the store. Returns the user id
    /// encoded in the token.
    pub fn verify_token(&self, token: &str) -> IdentityErrorResult<Uuid> {
        Ok(self.signer.verify(token)?)
    }

    /// Full bearer-token authentication: valid signature, token still live
    /// (not revoked), account still exists.
    pub async fn authenticate(&self, token: &str) -> IdentityErrorResult<User> {
        let user_id = self.signer.verify(token)?;

        if !TokenRepository::exists(&self.pool, user_id, token).await? {
            return Err(AuthError::invalid_token("token is not active").into());
        }

        let user = UserRepository::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AuthError::invalid_token("token subject no longer exists"))?;

        Ok(user)
    }

    /// The user's live tokens in issuance order.
    pub async fn tokens_for(&self, user: &User) -> IdentityErrorResult<Vec<String>> {
        Ok(TokenRepository::list_for_user(&self.pool, user.id).await?)
    }

    // ------------------------------------------------------------------ //
    // Hashing off the request path
    // ------------------------------------------------------------------ //

    async fn hash_password(&self, plaintext: String) -> IdentityErrorResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let phc = tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| IdentityError::internal(format!("hashing task failed: {e}")))??;

        Ok(phc)
    }

    async fn verify_password(
        &self,
        plaintext: String,
        phc: String,
    ) -> IdentityErrorResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &phc))
            .await
            .map_err(|e| IdentityError::internal(format!("verification task failed: {e}")))
    }
}
