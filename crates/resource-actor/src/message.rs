//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// The variants map onto the standard CRUD operations plus `List` for whole-collection
/// reads and `Action` for entity-specific logic that doesn't fit the CRUD model.
///
/// - **Create**: builds the entity from [`ActorEntity::Create`] and answers with the stored entity.
/// - **Get**: fetches the current state by ID (`None` when absent).
/// - **List**: every stored entity, ordered by ID.
/// - **Update**: applies [`ActorEntity::Update`] and answers with the new state.
/// - **Delete**: removes the entity and answers with the removed snapshot.
/// - **Action**: executes an [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
