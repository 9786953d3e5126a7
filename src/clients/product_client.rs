use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::storage::{ProductStorage, StorageError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
///
/// The lifecycle components only read products through [`ProductStorage`]. Creating
/// and updating products is for catalogue setup.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<Product, StorageError> {
        debug!("Sending request");
        self.inner.create(product).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, StorageError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = StorageError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

#[async_trait]
impl ProductStorage for ProductClient {
    async fn get_by_id(&self, id: ProductId) -> Result<Product, StorageError> {
        self.get(id)
            .await?
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }
}
