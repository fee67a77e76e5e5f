//! # Resource Controller
//!
//! The `ResourceController` is the actor behind one CRUD screen. It owns every piece of state
//! the screen renders (the fetched page, the filter state, the selection, the mutation
//! statuses) and publishes an immutable [`Snapshot`] after each change. UI code talks to it
//! through a cloneable [`ControllerHandle`].
//!
//! ## Query lifecycle
//!
//! ```text
//! Empty ──fetch──▶ Loading ──ok──▶ Loaded
//!                     │               │
//!                     └──err──▶ Errored
//! Loaded | Errored ──filter change / invalidation / retry──▶ Loading
//! ```
//!
//! While a refetch is in flight the previous items stay visible. A failed refetch keeps them
//! too; failures never corrupt the displayed collection.
//!
//! ## Stale-response guard
//!
//! Every list request is tagged with a sequence number and the [`QueryKey`] of the filter
//! state that produced it. A response is applied only if both still match the latest
//! request; anything else is logged and dropped. Responses arriving after the controller
//! stopped (the screen was unmounted) are ignored the same way, since nobody receives them.
//!
//! ## Mutations
//!
//! Create, update and delete run concurrently with list queries and with each other. Each
//! kind has its own [`MutationStatus`]. On completion the controller:
//!
//! 1. answers the caller,
//! 2. updates the mutation status, the selection and the single-entity cache,
//! 3. invalidates the list and starts a refetch.
//!
//! Callers therefore see "succeeded" before the list reflects the change. Validation failures
//! of create/update land in [`Snapshot::form_errors`]; every other failure is broadcast as a
//! [`Notice`]. Mutations are never retried automatically.

use crate::client::ResourceClient;
use crate::config::ControllerConfig;
use crate::entity::Resource;
use crate::error::{FieldErrors, ResourceError};
use crate::filters::{FilterPatch, FilterState, QueryKey};
use crate::message::{ControllerRequest, Response};
use crate::page::Page;
use crate::selection::Selection;
use crate::view::{derive, PaginationMeta, PaginationMode, Stats, View};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info, warn};

const NOTICE_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Outcome of the latest mutation of one kind.
///
/// `Succeeded` and `Failed` are kept until the next dialog transition, which returns them to
/// `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(ResourceError),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One [`MutationStatus`] per mutation kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mutations {
    pub create: MutationStatus,
    pub update: MutationStatus,
    pub delete: MutationStatus,
}

impl Mutations {
    pub fn get(&self, kind: MutationKind) -> &MutationStatus {
        match kind {
            MutationKind::Create => &self.create,
            MutationKind::Update => &self.update,
            MutationKind::Delete => &self.delete,
        }
    }

    fn get_mut(&mut self, kind: MutationKind) -> &mut MutationStatus {
        match kind {
            MutationKind::Create => &mut self.create,
            MutationKind::Update => &mut self.update,
            MutationKind::Delete => &mut self.delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Empty,
    Loading,
    Loaded,
    Errored,
}

/// Transient message for a failure that is not reported on a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub resource: &'static str,
    /// `list`, `create`, `update` or `delete`.
    pub action: &'static str,
    pub message: String,
}

/// Everything a screen renders, as of one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T: Resource> {
    pub resource: &'static str,
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
    pub stats: Stats,
    pub filters: FilterState,
    pub status: QueryStatus,
    pub error: Option<ResourceError>,
    pub selection: Selection<T>,
    pub mutations: Mutations,
    pub form_errors: FieldErrors,
}

impl<T: Resource> Snapshot<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self.status, QueryStatus::Empty | QueryStatus::Loading)
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Errored
    }

    /// `true` while a create or update submit is pending.
    pub fn is_submitting(&self) -> bool {
        self.mutations.create.is_pending() || self.mutations.update.is_pending()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }
}

enum Event<T: Resource> {
    Listed {
        seq: u64,
        key: QueryKey,
        result: Result<Page<T>, ResourceError>,
    },
    Created {
        result: Result<T, ResourceError>,
        respond_to: Response<T>,
    },
    Updated {
        id: T::Id,
        result: Result<T, ResourceError>,
        respond_to: Response<T>,
    },
    Deleted {
        id: T::Id,
        result: Result<(), ResourceError>,
        respond_to: Response<()>,
    },
    Fetched {
        id: T::Id,
        epoch: u64,
        result: Result<T, ResourceError>,
        respond_to: Response<T>,
    },
}

/// The actor owning one screen's state.
///
/// ```rust,ignore
/// let (controller, handle) = ResourceController::new(client, ControllerConfig::default(), PaginationMode::Client);
/// tokio::spawn(controller.run());
///
/// handle.update_filters(FilterPatch::new().set("section", "informatique")).await?;
/// let snapshot = handle.settled().await?;
/// ```
pub struct ResourceController<T: Resource, C: ResourceClient<T>> {
    client: Arc<C>,
    config: ControllerConfig,
    mode: PaginationMode,
    receiver: mpsc::Receiver<ControllerRequest<T>>,
    events: mpsc::UnboundedReceiver<Event<T>>,
    events_tx: mpsc::UnboundedSender<Event<T>>,
    snapshots: watch::Sender<Snapshot<T>>,
    notices: broadcast::Sender<Notice>,
    defaults: FilterState,
    filters: FilterState,
    raw: Option<Page<T>>,
    view: View<T>,
    status: QueryStatus,
    error: Option<ResourceError>,
    seq: u64,
    in_flight: Option<(u64, QueryKey)>,
    waiters: Vec<Response<Snapshot<T>>>,
    selection: Selection<T>,
    mutations: Mutations,
    pending: HashMap<MutationKind, usize>,
    form_errors: FieldErrors,
    details: HashMap<T::Id, T>,
    detail_epoch: u64,
}

impl<T: Resource, C: ResourceClient<T>> ResourceController<T, C> {
    /// Creates the controller and its handle. Nothing is fetched until [`run`](Self::run).
    pub fn new(client: C, config: ControllerConfig, mode: PaginationMode) -> (Self, ControllerHandle<T>) {
        let (sender, receiver) = mpsc::channel(config.channel_capacity.max(1));
        let (events_tx, events) = mpsc::unbounded_channel();
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        let defaults = FilterState::new(config.default_limit);
        let initial = Snapshot {
            resource: T::NAME,
            items: Vec::new(),
            pagination: PaginationMeta::empty(defaults.limit()),
            stats: Stats::default(),
            filters: defaults.clone(),
            status: QueryStatus::Empty,
            error: None,
            selection: Selection::None,
            mutations: Mutations::default(),
            form_errors: FieldErrors::new(),
        };
        let (snapshots, snapshot_rx) = watch::channel(initial);

        let handle = ControllerHandle {
            sender,
            snapshots: snapshot_rx,
            notices: notices.clone(),
        };
        let controller = Self {
            client: Arc::new(client),
            view: View::empty(defaults.limit()),
            filters: defaults.clone(),
            defaults,
            config,
            mode,
            receiver,
            events,
            events_tx,
            snapshots,
            notices,
            raw: None,
            status: QueryStatus::Empty,
            error: None,
            seq: 0,
            in_flight: None,
            waiters: Vec::new(),
            selection: Selection::None,
            mutations: Mutations::default(),
            pending: HashMap::new(),
            form_errors: FieldErrors::new(),
            details: HashMap::new(),
            detail_epoch: 0,
        };
        (controller, handle)
    }

    /// Starts with filters other than the defaults. `reset_filters` still returns to the
    /// defaults.
    pub fn with_filters(mut self, patch: FilterPatch) -> Self {
        self.filters.apply(patch);
        self.snapshots.send_modify(|s| s.filters = self.filters.clone());
        self
    }

    /// Fetches the first page, then serves requests until every handle is dropped.
    pub async fn run(mut self) {
        let resource = T::NAME;
        info!(resource, mode = ?self.mode, "Controller started");
        self.start_fetch();
        self.publish();

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => self.handle_request(request),
                    None => break,
                },
                Some(event) = self.events.recv() => self.handle_event(event),
            }
        }

        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(Err(ResourceError::ControllerClosed));
        }
        info!(resource, "Controller stopped");
    }

    fn handle_request(&mut self, request: ControllerRequest<T>) {
        match request {
            ControllerRequest::UpdateFilters { patch, respond_to } => {
                debug!(resource = T::NAME, ?patch, "Update filters");
                if self.filters.apply(patch) {
                    self.filters_changed();
                }
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::ResetFilters { respond_to } => {
                if self.filters.reset(&self.defaults) {
                    self.filters_changed();
                }
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::Retry { respond_to } => {
                info!(resource = T::NAME, "Manual retry");
                self.start_fetch();
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::Create { input, respond_to } => {
                self.begin(MutationKind::Create);
                let client = Arc::clone(&self.client);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = client.create(input).await;
                    let _ = events.send(Event::Created { result, respond_to });
                });
            }
            ControllerRequest::Update { id, input, respond_to } => {
                self.begin(MutationKind::Update);
                let client = Arc::clone(&self.client);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = client.update(&id, input).await;
                    let _ = events.send(Event::Updated { id, result, respond_to });
                });
            }
            ControllerRequest::Delete { id, respond_to } => {
                self.begin(MutationKind::Delete);
                let client = Arc::clone(&self.client);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = client.delete(&id).await;
                    let _ = events.send(Event::Deleted { id, result, respond_to });
                });
            }
            ControllerRequest::Get { id, respond_to } => {
                if let Some(entity) = self.details.get(&id) {
                    debug!(resource = T::NAME, %id, "Detail cache hit");
                    let _ = respond_to.send(Ok(entity.clone()));
                    return;
                }
                let epoch = self.detail_epoch;
                let client = Arc::clone(&self.client);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = client.get(&id).await;
                    let _ = events.send(Event::Fetched {
                        id,
                        epoch,
                        result,
                        respond_to,
                    });
                });
            }
            ControllerRequest::OpenCreate { respond_to } => {
                self.selection.open_create();
                self.dialog_changed();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::OpenEdit { entity, respond_to } => {
                self.selection.open_edit(entity);
                self.dialog_changed();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::OpenDelete { entity, respond_to } => {
                self.selection.open_delete(entity);
                self.dialog_changed();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::CloseDialog { respond_to } => {
                self.selection.close();
                self.dialog_changed();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::TakeDeleteTarget { respond_to } => {
                let target = self.selection.take_delete_target();
                self.publish();
                let _ = respond_to.send(Ok(target));
            }
            ControllerRequest::Settled { respond_to } => {
                if self.in_flight.is_some() {
                    self.waiters.push(respond_to);
                } else {
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event<T>) {
        match event {
            Event::Listed { seq, key, result } => self.on_listed(seq, key, result),
            Event::Created { result, respond_to } => {
                let _ = respond_to.send(result.clone());
                match result {
                    Ok(entity) => {
                        info!(resource = T::NAME, id = %entity.id(), "Created");
                        self.selection.submit_succeeded(true, entity.id());
                        self.succeed(MutationKind::Create);
                        self.invalidate();
                    }
                    Err(e) => self.fail(MutationKind::Create, e),
                }
            }
            Event::Updated { id, result, respond_to } => {
                let _ = respond_to.send(result.clone());
                match result {
                    Ok(_) => {
                        info!(resource = T::NAME, %id, "Updated");
                        self.evict(&id);
                        self.selection.submit_succeeded(false, &id);
                        self.succeed(MutationKind::Update);
                        self.invalidate();
                    }
                    Err(e) => self.fail(MutationKind::Update, e),
                }
            }
            Event::Deleted { id, result, respond_to } => {
                let _ = respond_to.send(result.clone());
                self.evict(&id);
                match result {
                    Ok(()) => {
                        info!(resource = T::NAME, %id, "Deleted");
                        self.succeed(MutationKind::Delete);
                        self.invalidate();
                    }
                    Err(e @ ResourceError::NotFound(_)) => {
                        self.fail(MutationKind::Delete, e);
                        self.invalidate();
                    }
                    Err(e) => self.fail(MutationKind::Delete, e),
                }
            }
            Event::Fetched {
                id,
                epoch,
                result,
                respond_to,
            } => {
                if let Ok(entity) = &result {
                    if epoch == self.detail_epoch {
                        self.details.insert(id, entity.clone());
                    } else {
                        debug!(resource = T::NAME, %id, "Detail invalidated while loading");
                    }
                }
                let _ = respond_to.send(result);
                return;
            }
        }
        self.publish();
    }

    fn on_listed(&mut self, seq: u64, key: QueryKey, result: Result<Page<T>, ResourceError>) {
        let current = matches!(&self.in_flight, Some((s, k)) if *s == seq && *k == key);
        if !current {
            warn!(resource = T::NAME, seq, %key, "Discarding stale response");
            return;
        }
        self.in_flight = None;
        match result {
            Ok(page) => {
                info!(resource = T::NAME, seq, total = page.total, "Loaded");
                let last = page.total_pages.max(1);
                let beyond = self.mode == PaginationMode::Server && page.total > 0 && page.page > last;
                self.raw = Some(page);
                if beyond {
                    warn!(resource = T::NAME, seq, last, "Page out of range, refetching last page");
                    self.filters.apply(FilterPatch::new().page(last));
                    self.recompute();
                    self.start_fetch();
                    self.publish();
                    return;
                }
                self.status = QueryStatus::Loaded;
                self.error = None;
                self.recompute();
                self.selection.refresh(self.raw.iter().flat_map(|page| page.data.iter()));
            }
            Err(e) => {
                warn!(resource = T::NAME, seq, error = %e, "List failed");
                self.status = QueryStatus::Errored;
                self.notify("list", &e);
                self.error = Some(e);
            }
        }
        self.publish();
        let snapshot = self.snapshot();
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(Ok(snapshot.clone()));
        }
    }

    fn filters_changed(&mut self) {
        if self.mode == PaginationMode::Client {
            self.recompute();
        }
        self.start_fetch();
    }

    fn recompute(&mut self) {
        self.view = match &self.raw {
            Some(page) => derive(page, &self.filters, self.mode),
            None => View::empty(self.filters.limit()),
        };
    }

    fn start_fetch(&mut self) {
        self.seq += 1;
        let seq = self.seq;
        let key = self.filters.query_key(T::NAME);
        info!(resource = T::NAME, seq, %key, "Fetching");
        self.in_flight = Some((seq, key.clone()));
        self.status = QueryStatus::Loading;

        let client = Arc::clone(&self.client);
        let events = self.events_tx.clone();
        let filters = self.filters.clone();
        let retries = self.config.list_retries;
        let delay = self.config.retry_delay();
        tokio::spawn(async move {
            let result = list_with_retry(&*client, &filters, retries, delay).await;
            let _ = events.send(Event::Listed { seq, key, result });
        });
    }

    fn invalidate(&mut self) {
        debug!(resource = T::NAME, "Invalidated");
        self.start_fetch();
    }

    fn evict(&mut self, id: &T::Id) {
        self.details.remove(id);
        self.detail_epoch += 1;
    }

    fn begin(&mut self, kind: MutationKind) {
        debug!(resource = T::NAME, kind = kind.as_str(), "Mutation started");
        *self.pending.entry(kind).or_default() += 1;
        *self.mutations.get_mut(kind) = MutationStatus::Pending;
        if kind != MutationKind::Delete {
            self.form_errors.clear();
        }
        self.publish();
    }

    /// Decrements the in-flight count; `true` if none of this kind remain.
    fn settle(&mut self, kind: MutationKind) -> bool {
        let count = self.pending.entry(kind).or_default();
        *count = count.saturating_sub(1);
        *count == 0
    }

    fn succeed(&mut self, kind: MutationKind) {
        if self.settle(kind) {
            *self.mutations.get_mut(kind) = MutationStatus::Succeeded;
        }
    }

    fn fail(&mut self, kind: MutationKind, error: ResourceError) {
        warn!(resource = T::NAME, kind = kind.as_str(), error = %error, "Mutation failed");
        match (&error, kind) {
            (ResourceError::Validation { fields, .. }, MutationKind::Create | MutationKind::Update) => {
                self.form_errors = fields.clone();
            }
            _ => self.notify(kind.as_str(), &error),
        }
        if self.settle(kind) {
            *self.mutations.get_mut(kind) = MutationStatus::Failed(error);
        }
    }

    fn notify(&self, action: &'static str, error: &ResourceError) {
        let notice = Notice {
            resource: T::NAME,
            action,
            message: error.to_string(),
        };
        let _ = self.notices.send(notice);
    }

    fn dialog_changed(&mut self) {
        for kind in [MutationKind::Create, MutationKind::Update, MutationKind::Delete] {
            let status = self.mutations.get_mut(kind);
            if !status.is_pending() {
                *status = MutationStatus::Idle;
            }
        }
        self.form_errors.clear();
        self.publish();
    }

    fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            resource: T::NAME,
            items: self.view.items.clone(),
            pagination: self.view.pagination,
            stats: self.view.stats.clone(),
            filters: self.filters.clone(),
            status: self.status,
            error: self.error.clone(),
            selection: self.selection.clone(),
            mutations: self.mutations.clone(),
            form_errors: self.form_errors.clone(),
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

async fn list_with_retry<T: Resource, C: ResourceClient<T>>(
    client: &C,
    filters: &FilterState,
    retries: u32,
    delay: Duration,
) -> Result<Page<T>, ResourceError> {
    let mut attempt = 0;
    loop {
        match client.list(filters).await {
            Ok(page) => return Ok(page),
            Err(e) if e.is_recoverable() && attempt < retries => {
                attempt += 1;
                warn!(resource = T::NAME, attempt, error = %e, "List failed, retrying");
                tokio::time::sleep(delay * attempt).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Cloneable interface to a [`ResourceController`].
///
/// Dropping every handle stops the controller; requests still in flight at that point have
/// no further effect on state.
pub struct ControllerHandle<T: Resource> {
    sender: mpsc::Sender<ControllerRequest<T>>,
    snapshots: watch::Receiver<Snapshot<T>>,
    notices: broadcast::Sender<Notice>,
}

impl<T: Resource> Clone for ControllerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            snapshots: self.snapshots.clone(),
            notices: self.notices.clone(),
        }
    }
}

impl<T: Resource> ControllerHandle<T> {
    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ControllerRequest<T>,
    ) -> Result<R, ResourceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ResourceError::ControllerClosed)?;
        response.await.map_err(|_| ResourceError::ControllerDropped)?
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshots.clone()
    }

    /// Receiver for failure notices (toasts).
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Waits until no list query is in flight and returns the resulting snapshot.
    pub async fn settled(&self) -> Result<Snapshot<T>, ResourceError> {
        self.request(|respond_to| ControllerRequest::Settled { respond_to })
            .await
    }

    /// Merges `patch` into the filters. Without an explicit page, the page returns to 1.
    pub async fn update_filters(&self, patch: FilterPatch) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::UpdateFilters { patch, respond_to })
            .await
    }

    pub async fn reset_filters(&self) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::ResetFilters { respond_to })
            .await
    }

    /// Refetches the current query, typically after it errored.
    pub async fn retry(&self) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::Retry { respond_to })
            .await
    }

    pub async fn create(&self, input: T::Input) -> Result<T, ResourceError> {
        self.request(|respond_to| ControllerRequest::Create { input, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, input: T::Input) -> Result<T, ResourceError> {
        self.request(|respond_to| ControllerRequest::Update {
            id,
            input,
            respond_to,
        })
        .await
    }

    pub async fn remove(&self, id: T::Id) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::Delete { id, respond_to })
            .await
    }

    /// Confirms the pending deletion. The confirmation closes whatever the outcome.
    ///
    /// Returns `Ok(false)` when no deletion was awaiting confirmation.
    pub async fn confirm_delete(&self) -> Result<bool, ResourceError> {
        let target = self
            .request(|respond_to| ControllerRequest::TakeDeleteTarget { respond_to })
            .await?;
        match target {
            Some(entity) => self.remove(entity.id().clone()).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Reads one entity, from the detail cache when possible.
    pub async fn get(&self, id: T::Id) -> Result<T, ResourceError> {
        self.request(|respond_to| ControllerRequest::Get { id, respond_to })
            .await
    }

    pub async fn open_create(&self) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::OpenCreate { respond_to })
            .await
    }

    pub async fn open_edit(&self, entity: T) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::OpenEdit { entity, respond_to })
            .await
    }

    pub async fn open_delete(&self, entity: T) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::OpenDelete { entity, respond_to })
            .await
    }

    pub async fn close_dialog(&self) -> Result<(), ResourceError> {
        self.request(|respond_to| ControllerRequest::CloseDialog { respond_to })
            .await
    }
}
