use crate::domain::{normalize_email, Credentials, ProfileUpdate, Registration, SessionUser, User};
use crate::infrastructure::db::{db_error, write_error, UserRepository};
use crate::infrastructure::security::PasswordHasherService;
use fitness_errors::AppError;
use uuid::Uuid;

/// Credential sign-up, sign-in and profile management.
pub struct Accounts {
    users: UserRepository,
}

impl Accounts {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn register(&self, registration: Registration) -> Result<SessionUser, AppError> {
        registration.validate()?;
        let email = normalize_email(&registration.email);

        if self.users.find_by_email(&email).await.map_err(db_error)?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordHasherService::hash(&registration.password)?;
        let user = self
            .users
            .create(email, registration.name.trim().to_string(), password_hash)
            .await
            .map_err(|e| duplicate_email(write_error(e)))?;

        tracing::info!(user_id = %user.id, "Registered new user");
        Ok(SessionUser {
            id: user.id,
            email: user.email,
            name: user.name,
        })
    }

    pub async fn login(&self, credentials: Credentials) -> Result<SessionUser, AppError> {
        credentials.validate()?;
        let email = normalize_email(&credentials.email);

        let Some(user) = self.users.find_by_email(&email).await.map_err(db_error)? else {
            return Err(AppError::InvalidCredentials);
        };
        if !PasswordHasherService::verify(&credentials.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Failed sign-in attempt");
            return Err(AppError::InvalidCredentials);
        }

        Ok(SessionUser {
            id: user.id,
            email: user.email,
            name: user.name,
        })
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(db_error)?
            .map(User::from)
            .ok_or(AppError::NotFound)
    }

    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<User, AppError> {
        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }

        self.users
            .update_profile(user_id, &update)
            .await
            .map_err(db_error)?
            .map(User::from)
            .ok_or(AppError::NotFound)
    }
}

/// A concurrent sign-up with the same email loses at the unique index.
fn duplicate_email(err: AppError) -> AppError {
    match err {
        AppError::Conflict(_) => AppError::Conflict("Email already registered".to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_reads_as_registered_email() {
        let err = duplicate_email(AppError::Conflict("Record already exists".to_string()));
        assert!(matches!(err, AppError::Conflict(ref m) if m == "Email already registered"));
    }

    #[test]
    fn test_other_write_failures_pass_through() {
        let err = duplicate_email(AppError::Database("timeout".to_string()));
        assert!(matches!(err, AppError::Database(_)));
    }
}
