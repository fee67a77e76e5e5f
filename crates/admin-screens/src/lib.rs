//! # Admin Screens
//!
//! The back-office CRUD screens built on [`resource_controller`].
//!
//! ## Core Components
//!
//! - **[model]**: the managed resources ([`Maintenance`](model::Maintenance),
//!   [`MoyenDeTravail`](model::MoyenDeTravail), [`Exemplaire`](model::Exemplaire),
//!   [`Livraison`](model::Livraison)) implementing [`Resource`](resource_controller::Resource).
//! - **[fixtures]**: seed collections and id generators for the in-memory stores.
//! - **[screens]**: typed wrappers around each controller handle.
//! - **[lifecycle]**: the [`AdminSystem`](lifecycle::AdminSystem) that starts and stops them.
//!
//! ## Quick Start
//!
//! The binary in `main.rs` runs a scripted session against the fixtures:
//! 1. Filter the maintenance screen by section.
//! 2. Delete a record through the confirmation dialog.
//! 3. Open and close dialogs on the other screens.

pub mod error;
pub mod fixtures;
pub mod lifecycle;
pub mod model;
pub mod screens;

pub use error::AdminError;
pub use lifecycle::AdminSystem;
