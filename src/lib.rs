//! # Commercium
//!
//! The business-rule core of a small order-management backend: user accounts,
//! a product catalogue and orders.
//!
//! ## Architecture
//!
//! ### 1. Lifecycle components ([`services`])
//! [`UserLifecycle`](services::UserLifecycle) and [`OrderLifecycle`](services::OrderLifecycle)
//! validate requests, check references between entities, price orders and move them
//! through their statuses. They hold only `Arc<dyn …>` handles to their collaborators.
//!
//! ### 2. Collaborator contracts ([`storage`], [`auth`])
//! [`UserStorage`](storage::UserStorage), [`ProductStorage`](storage::ProductStorage),
//! [`OrderStorage`](storage::OrderStorage) and [`PasswordHasher`](auth::PasswordHasher).
//!
//! ### 3. In-memory stores ([`clients`], [`user_actor`], [`product_actor`], [`order_actor`])
//! One `resource_actor::ResourceActor` per entity type. Requests to a store are handled
//! one at a time, which makes the username constraint and the payment step atomic.
//!
//! ### 4. Orchestration ([`lifecycle`], [`config`])
//! [`OrderSystem`](lifecycle::OrderSystem) starts the stores and wires the lifecycles;
//! [`AppConfig`](config::AppConfig) reads the environment.
//!
//! ## Errors
//!
//! Every operation returns [`ServiceError`](services::ServiceError), whose
//! [`status_code`](services::ServiceError::status_code) gives the HTTP status a transport
//! layer should use: validation 400, not found 404, conflict 409, anything else 500.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run   # demo
//! cargo test --workspace
//! ```

pub mod auth;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod services;
pub mod storage;
pub mod user_actor;
pub mod validation;
