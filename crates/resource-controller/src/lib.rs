//! # Resource Controller
//!
//! Building blocks for administrative CRUD screens: fetch a collection from a backend, filter,
//! search and paginate it, mutate it through create/update/delete dialogs, and refetch after
//! every successful change.
//!
//! ## Why one generic controller?
//!
//! Every screen of an admin back office repeats the same shape. Written ad hoc per screen, the
//! copies drift: one resets the page when a filter changes, another forgets to; one discards
//! late responses, another lets a slow request overwrite a fast one. This crate implements the
//! shape once, generic over the [`Resource`] being managed.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`Resource`]) - the managed type, its id, input and projections
//! 2. **Backend Layer** ([`ResourceClient`]) - [`StoreClient`] over an in-memory
//!    [`StoreActor`], [`HttpClient`] over REST, [`MockClient`] for tests
//! 3. **Pure Layer** ([`FilterState`], [`view::derive`], [`Selection`]) - state and derived
//!    output with no I/O
//! 4. **Controller Layer** ([`ResourceController`], [`ControllerHandle`]) - the actor tying it
//!    together and publishing [`Snapshot`]s
//!
//! ## Concurrency Model
//!
//! Both the store and the controller are actors: each runs in its own Tokio task, owns its
//! state and processes messages sequentially. List queries and mutations run in spawned
//! tasks that report back to the controller as events, so requests overlap freely while state
//! changes stay serialized. The stale-response guard in [`controller`] decides which list
//! responses are applied.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use resource_controller::{
//!     ControllerConfig, FilterPatch, PaginationMode, ResourceController, StoreActor,
//! };
//!
//! let (store, client) = StoreActor::new(32, fixtures(), Box::new(next_id));
//! tokio::spawn(store.run());
//!
//! let (controller, handle) =
//!     ResourceController::new(client, ControllerConfig::default(), PaginationMode::Client);
//! tokio::spawn(controller.run());
//!
//! handle.update_filters(FilterPatch::new().set("section", "informatique")).await?;
//! let snapshot = handle.settled().await?;
//! assert_eq!(snapshot.pagination.page, 1);
//! ```
//!
//! ## Testing
//!
//! See [`mock`] for scripted clients and store channel helpers.

pub mod client;
pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod filters;
pub mod http;
pub mod message;
pub mod mock;
pub mod page;
pub mod selection;
pub mod store;
pub mod tracing;
pub mod value;
pub mod view;

// Re-export core types for convenience
pub use client::{ResourceClient, StoreClient};
pub use config::{ConfigError, ControllerConfig, HttpConfig, Settings};
pub use controller::{
    ControllerHandle, MutationKind, MutationStatus, Mutations, Notice, QueryStatus,
    ResourceController, Snapshot,
};
pub use entity::Resource;
pub use error::{FieldErrors, ResourceError};
pub use filters::{FilterPatch, FilterState, QueryKey, Sort};
pub use http::{FileField, HttpClient};
pub use message::{ControllerRequest, Response, StoreRequest};
pub use mock::MockClient;
pub use page::{ListResponse, Page};
pub use selection::{DialogMode, Selection};
pub use store::{IdGenerator, ListMode, StoreActor};
pub use value::Value;
pub use view::{PaginationMeta, PaginationMode, Stats, View};
