//! # In-Memory Store Actor
//!
//! `StoreActor` stands in for a backend: it owns an ordered collection of one resource type
//! and answers [`StoreRequest`]s sequentially. Each store is built from explicit seed records
//! and an id generator, so every screen (and every test) gets its own isolated data.
//!
//! ## List modes
//!
//! | Mode | Reply | Filters |
//! |------|-------|---------|
//! | [`ListMode::Raw`] | the whole collection as a bare array | ignored |
//! | [`ListMode::Paginated`] | an envelope with one page | applied server-side |

use crate::client::StoreClient;
use crate::entity::Resource;
use crate::error::ResourceError;
use crate::filters::FilterState;
use crate::message::StoreRequest;
use crate::page::{ListResponse, Page};
use crate::view::filter_sorted;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Shape of the `List` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    #[default]
    Raw,
    Paginated,
}

/// Assigns the id of the next created record, given the current collection.
pub type IdGenerator<T> = Box<dyn FnMut(&[T]) -> <T as Resource>::Id + Send>;

/// The actor owning one resource collection.
///
/// # Concurrency Model
/// Requests are processed one at a time inside the actor's task, so the collection needs no
/// lock. Clients hold only the sending half of the channel.
///
/// ```rust,ignore
/// let (store, client) = StoreActor::new(32, fixtures(), Box::new(next_id));
/// tokio::spawn(store.paginated().run());
/// let page = client.list(&FilterState::new(10)).await?;
/// ```
pub struct StoreActor<T: Resource> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: Vec<T>,
    next_id: IdGenerator<T>,
    mode: ListMode,
}

impl<T: Resource> StoreActor<T> {
    /// Creates the store and its client. The store replies with raw arrays until
    /// [`paginated`](Self::paginated) is called.
    pub fn new(buffer_size: usize, records: Vec<T>, next_id: IdGenerator<T>) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let store = Self {
            receiver,
            records,
            next_id,
            mode: ListMode::Raw,
        };
        (store, StoreClient::new(sender))
    }

    /// Switches `List` to server-side filtering with an envelope reply.
    pub fn paginated(mut self) -> Self {
        self.mode = ListMode::Paginated;
        self
    }

    pub fn with_mode(mut self, mode: ListMode) -> Self {
        self.mode = mode;
        self
    }

    /// Processes requests until every client is dropped.
    pub async fn run(mut self) {
        let resource = T::NAME;
        info!(resource, size = self.records.len(), mode = ?self.mode, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { filters, respond_to } => {
                    debug!(resource, ?filters, "List");
                    let _ = respond_to.send(self.list(&filters));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.records.iter().find(|r| r.id() == &id).cloned();
                    debug!(resource, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(item.ok_or_else(|| ResourceError::NotFound(id.to_string())));
                }
                StoreRequest::Create { input, respond_to } => {
                    debug!(resource, ?input, "Create");
                    let _ = respond_to.send(self.create(input));
                }
                StoreRequest::Update { id, input, respond_to } => {
                    debug!(resource, %id, ?input, "Update");
                    let _ = respond_to.send(self.update(&id, input));
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(resource, %id, "Delete");
                    let result = match self.records.iter().position(|r| r.id() == &id) {
                        Some(index) => {
                            self.records.remove(index);
                            info!(resource, %id, size = self.records.len(), "Deleted");
                            Ok(())
                        }
                        None => {
                            warn!(resource, %id, "Not found");
                            Err(ResourceError::NotFound(id.to_string()))
                        }
                    };
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(resource, size = self.records.len(), "Shutdown");
    }

    fn list(&self, filters: &FilterState) -> Result<ListResponse<T>, ResourceError> {
        match self.mode {
            ListMode::Raw => Ok(ListResponse::Raw(self.records.clone())),
            ListMode::Paginated => {
                filters.date_bounds()?;
                let selected = filter_sorted(&self.records, filters);
                Ok(Page::paginate(selected, filters.page(), filters.limit()).into())
            }
        }
    }

    fn create(&mut self, input: T::Input) -> Result<T, ResourceError> {
        validate::<T>(&input)?;
        let id = (self.next_id)(&self.records);
        if self.records.iter().any(|r| r.id() == &id) {
            warn!(resource = T::NAME, %id, "Duplicate id");
            return Err(ResourceError::Conflict(format!("{} {id} already exists", T::NAME)));
        }
        let item = T::from_input(id.clone(), input);
        self.records.push(item.clone());
        info!(resource = T::NAME, %id, size = self.records.len(), "Created");
        Ok(item)
    }

    fn update(&mut self, id: &T::Id, input: T::Input) -> Result<T, ResourceError> {
        let Some(item) = self.records.iter_mut().find(|r| r.id() == id) else {
            warn!(resource = T::NAME, %id, "Not found");
            return Err(ResourceError::NotFound(id.to_string()));
        };
        validate::<T>(&input)?;
        item.apply_input(input);
        info!(resource = T::NAME, %id, "Updated");
        Ok(item.clone())
    }
}

fn validate<T: Resource>(input: &T::Input) -> Result<(), ResourceError> {
    T::validate(input).map_err(|fields| {
        warn!(resource = T::NAME, ?fields, "Validation failed");
        ResourceError::Validation {
            message: format!("invalid {} input", T::NAME),
            fields,
        }
    })
}
