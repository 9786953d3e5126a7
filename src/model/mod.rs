//! Plain data structures: stored entities, the payloads used to create them, and the
//! request shapes the lifecycle components accept.

pub mod order;
pub mod product;
pub mod user;

pub use order::*;
pub use product::*;
pub use user::*;
