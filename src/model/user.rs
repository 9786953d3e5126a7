use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The only role handed out by account registration.
pub const DEFAULT_ROLE: &str = "user";

/// Type-safe identifier for Users. `UserId(0)` means "unset".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub u32);

impl UserId {
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// Represents a registered user account.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait with the
/// username as its unique key, so the user store refuses duplicate usernames atomically.
///
/// The password field only ever holds a one-way hash and is never serialized.
#[derive(Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// A user record ready to be stored, before the store assigns its id.
///
/// There is deliberately no way to choose the role: the only constructor is
/// [`NewUser::with_default_role`].
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    role: &'static str,
}

impl NewUser {
    /// Builds a record carrying [`DEFAULT_ROLE`].
    pub fn with_default_role(
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: DEFAULT_ROLE,
        }
    }

    pub fn role(&self) -> &str {
        self.role
    }

    /// Turns the record into a stored [`User`] under the given id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.to_string(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Registration request as received from the transport layer.
#[derive(Clone, Default, Deserialize)]
pub struct UserCreate {
    #[serde(default)]
    pub username: String,
    #[serde(default, rename = "fullname")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Profile update request. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default, rename = "fullname")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);
        blank(&self.full_name) && blank(&self.email)
    }
}
