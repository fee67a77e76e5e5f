//! # Mock Clients & Testing Guide
//!
//! [`MockClient<T>`] implements [`ResourceClient<T>`] entirely in memory from a list of
//! expectations. It makes controller tests deterministic: every list reply, failure and delay
//! is scripted by the test.
//!
//! ## When to use which
//!
//! | Tool | Use Case |
//! |------|----------|
//! | [`MockClient`] | Controller behaviour: stale responses, retries, failures, invalidation |
//! | [`create_mock_store`] | Client logic: assert the exact [`StoreRequest`] a client sends |
//! | [`StoreActor`](crate::store::StoreActor) | End-to-end flows over real fixture data |
//!
//! ## Matching
//!
//! Expectations are matched by operation, and optionally by filters (lists) or id, in the
//! order they were declared. Overlapping requests can therefore be answered out of order
//! without the test depending on task scheduling. A request no expectation matches is
//! answered with a `Network` error and makes [`MockClient::verify`] fail.
//!
//! ## Holding a response
//!
//! A gated list expectation waits for its [`Gate`] to be released before answering, which
//! lets a test resolve an earlier request *after* a later one:
//!
//! ```rust,ignore
//! let mock = MockClient::<Gadget>::new();
//! let slow = mock.expect_list().with_filters(page_one).gated().return_ok(old_page);
//! mock.expect_list().with_filters(narrowed).return_ok(new_page);
//! // ... drive the controller ...
//! slow.release();
//! mock.verify();
//! ```

use crate::client::{ResourceClient, StoreClient};
use crate::entity::Resource;
use crate::error::ResourceError;
use crate::filters::FilterState;
use crate::message::{Response, StoreRequest};
use crate::page::{ListResponse, Page};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Resource> {
    List {
        filters: Option<FilterState>,
        response: Result<Page<T>, ResourceError>,
        gate: Option<oneshot::Receiver<()>>,
    },
    Get {
        id: Option<T::Id>,
        response: Result<T, ResourceError>,
    },
    Create {
        response: Result<T, ResourceError>,
    },
    Update {
        id: Option<T::Id>,
        response: Result<T, ResourceError>,
    },
    Delete {
        id: Option<T::Id>,
        response: Result<(), ResourceError>,
    },
}

fn id_matches<I: PartialEq>(expected: &Option<I>, actual: &I) -> bool {
    expected.as_ref().map_or(true, |id| id == actual)
}

struct State<T: Resource> {
    expectations: Vec<Expectation<T>>,
    unexpected: Vec<String>,
    list_calls: Vec<FilterState>,
}

fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A resource client answering from scripted expectations.
///
/// Clones share the same expectations, so a test keeps one clone and hands another to the
/// controller.
pub struct MockClient<T: Resource> {
    state: Arc<Mutex<State<T>>>,
}

impl<T: Resource> Clone for MockClient<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Resource> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> MockClient<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                expectations: Vec::new(),
                unexpected: Vec::new(),
                list_calls: Vec::new(),
            })),
        }
    }

    /// Expects a `list` call.
    pub fn expect_list(&self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            state: Arc::clone(&self.state),
            filters: None,
        }
    }

    /// Expects a `get` call for `id`.
    pub fn expect_get(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |id, response| Expectation::Get { id, response })
    }

    /// Expects a `create` call.
    pub fn expect_create(&self) -> ExpectationBuilder<T, T> {
        self.builder(None, |_, response| Expectation::Create { response })
    }

    /// Expects an `update` call for `id`.
    pub fn expect_update(&self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), |id, response| Expectation::Update { id, response })
    }

    /// Expects a `delete` call for `id`.
    pub fn expect_delete(&self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), |id, response| Expectation::Delete { id, response })
    }

    fn builder<R>(&self, id: Option<T::Id>, make: MakeExpectation<T, R>) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            state: Arc::clone(&self.state),
            id,
            make,
        }
    }

    /// Filters of every `list` call received so far, in arrival order.
    pub fn list_calls(&self) -> Vec<FilterState> {
        lock(&self.state).list_calls.clone()
    }

    /// Number of expectations not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.state).expectations.len()
    }

    /// Verifies that all expectations were met and no unexpected call was made.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.unexpected.is_empty() {
            panic!("Unexpected calls: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn take(&self, call: String, find: impl Fn(&Expectation<T>) -> bool) -> Option<Expectation<T>> {
        let mut state = lock(&self.state);
        match state.expectations.iter().position(find) {
            Some(index) => Some(state.expectations.remove(index)),
            None => {
                state.unexpected.push(call);
                None
            }
        }
    }
}

fn unexpected(call: &str) -> ResourceError {
    ResourceError::Network(format!("unexpected {call}"))
}

#[async_trait]
impl<T: Resource> ResourceClient<T> for MockClient<T> {
    async fn list(&self, filters: &FilterState) -> Result<Page<T>, ResourceError> {
        lock(&self.state).list_calls.push(filters.clone());
        let call = format!("list {}", filters.query_key(T::NAME));
        let found = self.take(call.clone(), |e| match e {
            Expectation::List { filters: expected, .. } => {
                expected.as_ref().map_or(true, |expected| expected == filters)
            }
            _ => false,
        });
        match found {
            Some(Expectation::List { response, gate, .. }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                response
            }
            _ => Err(unexpected(&call)),
        }
    }

    async fn get(&self, id: &T::Id) -> Result<T, ResourceError> {
        let call = format!("get {id}");
        match self.take(call.clone(), |e| matches!(e, Expectation::Get { id: expected, .. } if id_matches(expected, id))) {
            Some(Expectation::Get { response, .. }) => response,
            _ => Err(unexpected(&call)),
        }
    }

    async fn create(&self, input: T::Input) -> Result<T, ResourceError> {
        let call = format!("create {input:?}");
        match self.take(call.clone(), |e| matches!(e, Expectation::Create { .. })) {
            Some(Expectation::Create { response }) => response,
            _ => Err(unexpected(&call)),
        }
    }

    async fn update(&self, id: &T::Id, _input: T::Input) -> Result<T, ResourceError> {
        let call = format!("update {id}");
        match self.take(call.clone(), |e| matches!(e, Expectation::Update { id: expected, .. } if id_matches(expected, id))) {
            Some(Expectation::Update { response, .. }) => response,
            _ => Err(unexpected(&call)),
        }
    }

    async fn delete(&self, id: &T::Id) -> Result<(), ResourceError> {
        let call = format!("delete {id}");
        match self.take(call.clone(), |e| matches!(e, Expectation::Delete { id: expected, .. } if id_matches(expected, id))) {
            Some(Expectation::Delete { response, .. }) => response,
            _ => Err(unexpected(&call)),
        }
    }
}

type MakeExpectation<T, R> =
    fn(Option<<T as Resource>::Id>, Result<R, ResourceError>) -> Expectation<T>;

/// Builder for `get`, `create`, `update` and `delete` expectations.
pub struct ExpectationBuilder<T: Resource, R> {
    state: Arc<Mutex<State<T>>>,
    id: Option<T::Id>,
    make: MakeExpectation<T, R>,
}

impl<T: Resource, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ResourceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, ResourceError>) {
        let expectation = (self.make)(self.id, response);
        lock(&self.state).expectations.push(expectation);
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: Resource> {
    state: Arc<Mutex<State<T>>>,
    filters: Option<FilterState>,
}

impl<T: Resource> ListExpectationBuilder<T> {
    /// Only matches a call made with exactly these filters.
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Holds the response until the returned [`Gate`] is released.
    pub fn gated(self) -> GatedListExpectationBuilder<T> {
        GatedListExpectationBuilder { inner: self }
    }

    pub fn return_ok(self, page: Page<T>) {
        self.push(Ok(page), None);
    }

    pub fn return_err(self, error: ResourceError) {
        self.push(Err(error), None);
    }

    fn push(self, response: Result<Page<T>, ResourceError>, gate: Option<oneshot::Receiver<()>>) {
        lock(&self.state).expectations.push(Expectation::List {
            filters: self.filters,
            response,
            gate,
        });
    }
}

/// A list expectation whose answer waits for a [`Gate`].
pub struct GatedListExpectationBuilder<T: Resource> {
    inner: ListExpectationBuilder<T>,
}

impl<T: Resource> GatedListExpectationBuilder<T> {
    pub fn return_ok(self, page: Page<T>) -> Gate {
        self.push(Ok(page))
    }

    pub fn return_err(self, error: ResourceError) -> Gate {
        self.push(Err(error))
    }

    fn push(self, response: Result<Page<T>, ResourceError>) -> Gate {
        let (release, gate) = oneshot::channel();
        self.inner.push(response, Some(gate));
        Gate(release)
    }
}

/// Releases a gated response. Dropping the gate releases it too.
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

// =============================================================================
// STORE CHANNEL HELPERS
// =============================================================================

/// Creates a store client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// Instead of running a [`StoreActor`](crate::store::StoreActor), the test plays the store:
/// it reads each request from `receiver`, asserts on it and answers through the request's
/// `respond_to`.
pub fn create_mock_store<T: Resource>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size.max(1));
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request.
pub async fn expect_list<T: Resource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(FilterState, Response<ListResponse<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::List { filters, respond_to }) => Some((filters, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request.
pub async fn expect_create<T: Resource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Input, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Create { input, respond_to }) => Some((input, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request.
pub async fn expect_delete<T: Resource>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
