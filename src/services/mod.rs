//! # Lifecycle Components
//!
//! The business rules. Each component validates a request, reads the collaborators it
//! needs and writes through exactly one storage call. They hold no state of their own
//! besides shared handles to their collaborators.

pub mod error;
pub mod order_lifecycle;
pub mod user_lifecycle;

pub use error::ServiceError;
pub use order_lifecycle::OrderLifecycle;
pub use user_lifecycle::UserLifecycle;
