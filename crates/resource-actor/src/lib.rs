//! # Resource Actor
//!
//! Building blocks for in-memory, actor-backed entity stores. Each entity type gets its
//! own [`ResourceActor`]: a Tokio task that exclusively owns a `HashMap` of entities and
//! answers CRUD + Action requests sent through a cloneable [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the record, its DTOs, its hooks and its unique key.
//! 2. **Runtime Layer** ([`ResourceActor`]): message processing and exclusive state.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): type-safe communication.
//!
//! ## Why an actor per entity type?
//!
//! Requests to one store are processed sequentially, so a check and the write that
//! depends on it (e.g. "is this username taken?" then "insert") can never interleave with
//! another request. That gives callers an atomic unique-constraint primitive without any
//! locks, and a distinguishable [`FrameworkError::Conflict`] when it trips.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor is started (`run(context)`), not when it is
//! constructed, so actors can be created first and wired afterwards.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Multiple actors run in **parallel**
//! - Shutdown happens when every client clone has been dropped
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real `ResourceClient<T>` backed by a queue of
//! expectations instead of an actor, so code built on clients can be tested
//! deterministically, including proving that no write was sent.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
