use super::ServiceError;
use crate::auth::PasswordHasher;
use crate::model::{NewUser, User, UserCreate, UserId, UserUpdate};
use crate::storage::{StorageError, UserStorage};
use crate::validation::{check_password, is_valid_email, is_valid_username};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const USER_NOT_FOUND: &str = "user not found";
const USERNAME_TAKEN: &str = "username already exists";
const INVALID_EMAIL: &str = "please enter a valid email address";

/// Maps a storage miss to the user-facing "user not found".
fn user_lookup(e: StorageError) -> ServiceError {
    match e {
        StorageError::NotFound(_) => ServiceError::not_found(USER_NOT_FOUND),
        other => other.into(),
    }
}

/// Field rules for registration that need no collaborator, in reporting order.
fn validate_registration(request: &UserCreate) -> Result<(), ServiceError> {
    if request.username.is_empty()
        || request.full_name.is_empty()
        || request.email.is_empty()
        || request.password.is_empty()
    {
        return Err(ServiceError::validation(
            "username, fullname, email, and password cannot be blank",
        ));
    }
    if !is_valid_username(&request.username) {
        return Err(ServiceError::validation(
            "usernames can only contain letters and numbers, with no spaces allowed",
        ));
    }
    if !is_valid_email(&request.email) {
        return Err(ServiceError::validation(INVALID_EMAIL));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ServiceError> {
    let policy = check_password(password);
    if !policy.min_length {
        return Err(ServiceError::validation(
            "password must be at least 8 characters long",
        ));
    }
    if !policy.has_letter {
        return Err(ServiceError::validation(
            "password must contain at least one letter",
        ));
    }
    if !policy.has_digit {
        return Err(ServiceError::validation(
            "password must contain at least one number",
        ));
    }
    Ok(())
}

/// Applies a profile update to `user`. Username, password and role are untouched.
fn apply_update(user: &mut User, update: UserUpdate) -> Result<(), ServiceError> {
    if update.is_empty() {
        return Err(ServiceError::validation(
            "fullname and email cannot be blank",
        ));
    }
    if let Some(full_name) = update.full_name.filter(|name| !name.is_empty()) {
        user.full_name = full_name;
    }
    if let Some(email) = update.email.filter(|email| !email.is_empty()) {
        if !is_valid_email(&email) {
            return Err(ServiceError::validation(INVALID_EMAIL));
        }
        user.email = email;
    }
    Ok(())
}

/// Registration, profile updates and removal of user accounts.
///
/// # Example
///
/// ```rust,ignore
/// let users = UserLifecycle::new(Arc::new(user_client), Arc::new(BcryptHasher::default()));
/// let ann = users.create_user(UserCreate {
///     username: "ann".into(),
///     full_name: "Ann Lee".into(),
///     email: "ann@example.com".into(),
///     password: "secret123".into(),
/// }).await?;
/// assert_eq!(ann.role, "user");
/// ```
#[derive(Clone)]
pub struct UserLifecycle {
    users: Arc<dyn UserStorage>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserLifecycle {
    pub fn new(users: Arc<dyn UserStorage>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.list_all().await?)
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<User, ServiceError> {
        self.users.get_by_id(id).await.map_err(user_lookup)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User, ServiceError> {
        self.users
            .get_by_username(username)
            .await
            .map_err(user_lookup)
    }

    /// Registers a new account with the default role.
    ///
    /// Checks run in a fixed order and the first failure is returned: blank fields,
    /// username format, email format, username availability, password policy.
    /// The username check is repeated by the store on insert, and the store's answer wins.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn create_user(&self, request: UserCreate) -> Result<User, ServiceError> {
        debug!(?request, "create_user called");
        validate_registration(&request)?;

        match self.users.get_by_username(&request.username).await {
            Ok(_) => {
                warn!("Username already taken");
                return Err(ServiceError::conflict(USERNAME_TAKEN));
            }
            Err(StorageError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }

        validate_password(&request.password)?;
        let password_hash = self.hasher.hash(&request.password)?;

        let record = NewUser::with_default_role(
            request.username,
            request.full_name,
            request.email,
            password_hash,
        );
        let user = self.users.create(record).await.map_err(|e| match e {
            StorageError::Conflict(_) => {
                warn!("Username taken by a concurrent registration");
                ServiceError::conflict(USERNAME_TAKEN)
            }
            other => other.into(),
        })?;

        info!(id = %user.id, "User created");
        Ok(user)
    }

    /// Changes full name and/or email. Nothing is written if any supplied field is invalid.
    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, ServiceError> {
        let mut user = self.get_by_id(id).await?;
        apply_update(&mut user, update)?;

        let user = self.users.update(user).await.map_err(user_lookup)?;
        info!("User updated");
        Ok(user)
    }

    /// Removes the account and returns what was removed.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<User, ServiceError> {
        let user = self.get_by_id(id).await?;
        let removed = self.users.delete(user).await.map_err(user_lookup)?;
        info!("User deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, full_name: &str, email: &str, password: &str) -> UserCreate {
        UserCreate {
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn message(result: Result<(), ServiceError>) -> String {
        match result {
            Err(ServiceError::Validation(msg)) => msg,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_registration_rules_report_first_failure() {
        assert_eq!(
            message(validate_registration(&request("", "", "bad", "x"))),
            "username, fullname, email, and password cannot be blank"
        );
        assert_eq!(
            message(validate_registration(&request("a b", "A", "bad", "x"))),
            "usernames can only contain letters and numbers, with no spaces allowed"
        );
        assert_eq!(
            message(validate_registration(&request("ab", "A", "bad", "x"))),
            "please enter a valid email address"
        );
        assert!(validate_registration(&request("ab", "A", "a@b.co", "x")).is_ok());
    }

    #[test]
    fn test_password_rules_in_order() {
        assert_eq!(
            message(validate_password("a1")),
            "password must be at least 8 characters long"
        );
        assert_eq!(
            message(validate_password("12345678")),
            "password must contain at least one letter"
        );
        assert_eq!(
            message(validate_password("abcdefgh")),
            "password must contain at least one number"
        );
        assert!(validate_password("abcdefg1").is_ok());
    }

    #[test]
    fn test_apply_update() {
        let mut user = NewUser::with_default_role("ann", "Ann", "ann@example.com", "hash")
            .into_user(UserId(1));
        let before = user.clone();

        assert_eq!(
            message(apply_update(&mut user, UserUpdate::default())),
            "fullname and email cannot be blank"
        );
        assert_eq!(
            message(apply_update(
                &mut user,
                UserUpdate {
                    full_name: Some(String::new()),
                    email: Some(String::new()),
                }
            )),
            "fullname and email cannot be blank"
        );
        assert_eq!(user, before);

        // An empty name is skipped, the email still applies
        apply_update(
            &mut user,
            UserUpdate {
                full_name: Some(String::new()),
                email: Some("ann@mail.example".into()),
            },
        )
        .unwrap();
        assert_eq!(user.full_name, "Ann");
        assert_eq!(user.email, "ann@mail.example");

        apply_update(
            &mut user,
            UserUpdate {
                full_name: None,
                email: Some("ann@new.example".into()),
            },
        )
        .unwrap();
        assert_eq!(user.email, "ann@new.example");
        assert_eq!(user.full_name, "Ann");
        assert_eq!(user.username, "ann");
        assert_eq!(user.role, "user");
    }
}
