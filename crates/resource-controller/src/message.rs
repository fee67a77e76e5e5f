//! # Actor Messages
//!
//! Both actors of the crate are driven by message enums:
//!
//! - [`StoreRequest`]: [`StoreClient`](crate::client::StoreClient) to
//!   [`StoreActor`](crate::store::StoreActor), one variant per resource client operation.
//! - [`ControllerRequest`]: [`ControllerHandle`](crate::controller::ControllerHandle) to
//!   [`ResourceController`](crate::controller::ResourceController), one variant per UI action.
//!
//! Every variant carries a oneshot sender the actor answers on.

use crate::controller::Snapshot;
use crate::entity::Resource;
use crate::error::ResourceError;
use crate::filters::{FilterPatch, FilterState};
use crate::page::ListResponse;
use tokio::sync::oneshot;

/// One-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, ResourceError>>;

/// Operations understood by the in-memory store.
///
/// `List` answers with a [`ListResponse`] rather than a page: depending on its mode the store
/// replies with a raw array or an envelope, exactly like the backends it stands in for.
#[derive(Debug)]
pub enum StoreRequest<T: Resource> {
    List {
        filters: FilterState,
        respond_to: Response<ListResponse<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    Create {
        input: T::Input,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        input: T::Input,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

/// Requests sent from a [`ControllerHandle`](crate::controller::ControllerHandle) to its
/// [`ResourceController`](crate::controller::ResourceController).
///
/// UI events (filter changes, dialog transitions) are acknowledged once the controller has
/// applied them and published the resulting snapshot. Mutations answer with the backend's
/// result.
#[derive(Debug)]
pub enum ControllerRequest<T: Resource> {
    UpdateFilters {
        patch: FilterPatch,
        respond_to: Response<()>,
    },
    ResetFilters {
        respond_to: Response<()>,
    },
    Retry {
        respond_to: Response<()>,
    },
    Create {
        input: T::Input,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        input: T::Input,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    OpenCreate {
        respond_to: Response<()>,
    },
    OpenEdit {
        entity: T,
        respond_to: Response<()>,
    },
    OpenDelete {
        entity: T,
        respond_to: Response<()>,
    },
    CloseDialog {
        respond_to: Response<()>,
    },
    /// Closes the delete confirmation and returns its target, if one was pending.
    TakeDeleteTarget {
        respond_to: Response<Option<T>>,
    },
    /// Answered with the current snapshot once no list query is in flight.
    Settled {
        respond_to: Response<Snapshot<T>>,
    },
}
