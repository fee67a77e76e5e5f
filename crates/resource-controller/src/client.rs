//! # Resource Clients
//!
//! [`ResourceClient`] is the backend boundary the controller talks to. Implementations:
//!
//! - [`StoreClient`]: sends requests to an in-memory [`StoreActor`](crate::store::StoreActor).
//! - [`HttpClient`](crate::http::HttpClient): talks to a REST backend.
//! - [`MockClient`](crate::mock::MockClient): answers from test expectations.
//!
//! Every implementation normalizes list replies into a [`Page`] before returning, so the
//! controller never sees the raw-array vs. envelope difference.

use crate::entity::Resource;
use crate::error::ResourceError;
use crate::filters::FilterState;
use crate::message::StoreRequest;
use crate::page::Page;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

/// Typed access to one resource's backend.
///
/// `list` does not fail for a well-formed filter object: it signals `Network` for transport
/// failures and `Validation` for filters the backend rejects. `create` and `update` return the
/// canonical entity, which callers must prefer over their own copy. `delete` of an unknown id
/// signals `NotFound`.
#[async_trait]
pub trait ResourceClient<T: Resource>: Send + Sync + 'static {
    async fn list(&self, filters: &FilterState) -> Result<Page<T>, ResourceError>;

    async fn get(&self, id: &T::Id) -> Result<T, ResourceError>;

    async fn create(&self, input: T::Input) -> Result<T, ResourceError>;

    async fn update(&self, id: &T::Id, input: T::Input) -> Result<T, ResourceError>;

    async fn delete(&self, id: &T::Id) -> Result<(), ResourceError>;
}

/// Channel-backed client for a [`StoreActor`](crate::store::StoreActor). Cheap to clone.
pub struct StoreClient<T: Resource> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Resource> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Resource> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, ResourceError>>) -> StoreRequest<T>,
    ) -> Result<R, ResourceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ResourceError::StoreClosed)?;
        response.await.map_err(|_| ResourceError::StoreDropped)?
    }
}

#[async_trait]
impl<T: Resource> ResourceClient<T> for StoreClient<T> {
    #[tracing::instrument(level = "debug", skip(self), fields(resource = T::NAME))]
    async fn list(&self, filters: &FilterState) -> Result<Page<T>, ResourceError> {
        let filters = filters.clone();
        let response = self
            .request(|respond_to| StoreRequest::List { filters, respond_to })
            .await?;
        Ok(response.into_page())
    }

    async fn get(&self, id: &T::Id) -> Result<T, ResourceError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(resource = T::NAME))]
    async fn create(&self, input: T::Input) -> Result<T, ResourceError> {
        self.request(|respond_to| StoreRequest::Create { input, respond_to })
            .await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(resource = T::NAME))]
    async fn update(&self, id: &T::Id, input: T::Input) -> Result<T, ResourceError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Update {
            id,
            input,
            respond_to,
        })
        .await
    }

    #[tracing::instrument(level = "debug", skip(self), fields(resource = T::NAME))]
    async fn delete(&self, id: &T::Id) -> Result<(), ResourceError> {
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }
}
