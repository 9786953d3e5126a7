//! Entity trait implementation for the User domain type.
//!
//! Users are stored whole: an update carries the complete replacement record and the
//! store only guards the id and the username uniqueness. Field rules live in the
//! lifecycle layer.

use crate::model::{NewUser, User, UserId};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = NewUser;
    type Update = User;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = Infallible;

    fn from_create_params(id: UserId, params: NewUser) -> Result<Self, Infallible> {
        Ok(params.into_user(id))
    }

    /// Usernames are unique across the store.
    fn unique_key(&self) -> Option<String> {
        Some(self.username.clone())
    }

    /// Replaces every field except the id.
    async fn on_update(&mut self, replacement: User, _ctx: &()) -> Result<(), Infallible> {
        *self = User {
            id: self.id,
            ..replacement
        };
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Infallible> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::{FrameworkError, ResourceActor};

    #[tokio::test]
    async fn test_replacement_keeps_id() {
        let (actor, client) = ResourceActor::<User>::new(8);
        tokio::spawn(actor.run(()));

        let created = client
            .create(NewUser::with_default_role("ann", "Ann", "ann@example.com", "h"))
            .await
            .unwrap();
        assert_eq!(created.id, UserId(1));
        assert_eq!(created.role, "user");

        let mut replacement = created.clone();
        replacement.id = UserId(99);
        replacement.full_name = "Ann Lee".into();
        let updated = client.update(created.id, replacement).await.unwrap();
        assert_eq!(updated.id, UserId(1));
        assert_eq!(updated.full_name, "Ann Lee");
    }

    #[tokio::test]
    async fn test_username_is_unique_key() {
        let (actor, client) = ResourceActor::<User>::new(8);
        tokio::spawn(actor.run(()));

        client
            .create(NewUser::with_default_role("ann", "Ann", "ann@example.com", "h"))
            .await
            .unwrap();
        let duplicate = client
            .create(NewUser::with_default_role("ann", "Other", "o@example.com", "h"))
            .await;
        assert!(matches!(duplicate, Err(FrameworkError::Conflict(key)) if key == "ann"));
    }
}
