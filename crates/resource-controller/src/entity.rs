//! # Resource Trait
//!
//! The `Resource` trait defines the contract every entity managed by a CRUD screen must
//! implement (a maintenance record, a delivery, a stock item, ...). It names the identifier
//! and input types, and exposes the handful of read-only projections the generic pieces
//! need: searchable text, filterable fields, a date for range filters and a category for
//! summary counts.
//!
//! # Architecture Note
//! By defining one contract that all resource types satisfy, the store actor, the clients,
//! the derived view and the controller are written *once* and instantiated per resource.
//! Associated types keep each instantiation honest: a `MaintenanceInput` can never be sent
//! to a delivery controller.
//!
//! # Provided Methods
//! Everything except [`Resource::id`], [`Resource::from_input`] and [`Resource::apply_input`]
//! has a default. A resource that overrides nothing is listed and paginated, but search,
//! field filters, date filters and category stats match nothing specific.

use crate::error::FieldErrors;
use crate::value::Value;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any entity must implement to be managed by a `ResourceController`.
pub trait Resource: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Stable identifier. Unique within a collection and never reassigned by an update.
    type Id: Eq
        + Hash
        + Clone
        + Debug
        + Display
        + Send
        + Sync
        + Serialize
        + DeserializeOwned
        + 'static;

    /// The entity minus its server-assigned fields (id, timestamps).
    type Input: Clone + Debug + Send + Sync + Serialize + 'static;

    /// Resource name used in query keys, logs and notices.
    const NAME: &'static str;

    fn id(&self) -> &Self::Id;

    /// Builds the canonical entity once the store has assigned an id.
    fn from_input(id: Self::Id, input: Self::Input) -> Self;

    /// Replaces the user-editable fields; the id is left untouched.
    fn apply_input(&mut self, input: Self::Input);

    /// Checks an input before the store accepts it.
    fn validate(_input: &Self::Input) -> Result<(), FieldErrors> {
        Ok(())
    }

    /// The documented subset of string fields free-text search looks at.
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Value of a filterable field, keyed by filter name.
    fn field(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Date compared against the `date_start`/`date_end` filters.
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// Category counted in summary statistics (status, type, section, ...).
    fn category(&self) -> Option<String> {
        None
    }
}
