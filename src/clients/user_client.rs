use crate::model::{NewUser, User, UserId};
use crate::storage::{StorageError, UserStorage};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = StorageError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

#[async_trait]
impl UserStorage for UserClient {
    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        self.list().await
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, StorageError> {
        self.get(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_by_username(&self, username: &str) -> Result<User, StorageError> {
        debug!("Scanning users");
        self.list()
            .await?
            .into_iter()
            .find(|user| user.username == username)
            .ok_or_else(|| StorageError::NotFound(username.to_string()))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: NewUser) -> Result<User, StorageError> {
        debug!("Sending request");
        self.inner.create(user).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, user), fields(id = %user.id))]
    async fn update(&self, user: User) -> Result<User, StorageError> {
        debug!("Sending request");
        self.inner.update(user.id, user).await.map_err(Self::map_error)
    }

    async fn delete(&self, user: User) -> Result<User, StorageError> {
        ActorClient::delete(self, user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_update, MockClient};

    fn user(id: u32, username: &str) -> User {
        NewUser::with_default_role(username, "Someone", "someone@example.com", "hash")
            .into_user(UserId(id))
    }

    #[tokio::test]
    async fn test_get_by_username_scans_list() {
        let mut mock = MockClient::<User>::new();
        mock.expect_list()
            .return_ok(vec![user(1, "ann"), user(2, "bob")]);
        mock.expect_list().return_ok(vec![user(1, "ann")]);

        let client = UserClient::new(mock.client());
        assert_eq!(client.get_by_username("bob").await.unwrap().id, UserId(2));
        assert_eq!(
            client.get_by_username("bob").await,
            Err(StorageError::NotFound("bob".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get(UserId(4)).return_ok(None);

        let client = UserClient::new(mock.client());
        assert_eq!(
            client.get_by_id(UserId(4)).await,
            Err(StorageError::NotFound("user_4".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_conflict_maps_to_storage_conflict() {
        let mut mock = MockClient::<User>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("ann".into()));

        let client = UserClient::new(mock.client());
        let result = client
            .create(NewUser::with_default_role("ann", "Ann", "a@example.com", "h"))
            .await;
        assert_eq!(result, Err(StorageError::Conflict("ann".into())));
        mock.verify();
    }

    #[tokio::test]
    async fn test_update_sends_whole_record() {
        let (inner, mut receiver) = create_mock_client::<User>(4);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.update(user(3, "cy")).await });

        let (id, replacement, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, UserId(3));
        assert_eq!(replacement.username, "cy");
        responder.send(Ok(replacement)).unwrap();

        assert_eq!(task.await.unwrap().unwrap().id, UserId(3));
    }
}
