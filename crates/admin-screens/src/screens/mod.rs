//! # Screens
//!
//! One typed wrapper per resource around its [`ControllerHandle`]. The shared behaviour of a
//! table screen lives in [`ResourceScreen`]; each wrapper adds the filters and reference data
//! specific to its resource.
//!
//! Every operation waits for the controller to settle and returns the resulting
//! [`Snapshot`], which is what a caller would render next.

pub mod exemplaires;
pub mod livraisons;
pub mod maintenance;
pub mod moyens;

pub use exemplaires::ExemplairesScreen;
pub use livraisons::LivraisonsScreen;
pub use maintenance::MaintenanceScreen;
pub use moyens::MoyensScreen;

use crate::error::AdminError;
use async_trait::async_trait;
use chrono::NaiveDate;
use resource_controller::{ControllerHandle, FilterPatch, Resource, Snapshot};
use tracing::debug;

/// Common table-screen actions, provided on top of a [`ControllerHandle`].
#[async_trait]
pub trait ResourceScreen<T: Resource>: Send + Sync {
    /// Access the controller behind this screen.
    fn handle(&self) -> &ControllerHandle<T>;

    /// Current state once no list query is in flight.
    async fn view(&self) -> Result<Snapshot<T>, AdminError> {
        Ok(self.handle().settled().await?)
    }

    /// Applies a filter patch and returns the settled result.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn apply(&self, patch: FilterPatch) -> Result<Snapshot<T>, AdminError> {
        debug!("Sending request");
        self.handle().update_filters(patch).await?;
        self.view().await
    }

    async fn search(&self, text: &str) -> Result<Snapshot<T>, AdminError> {
        self.apply(FilterPatch::new().search(text)).await
    }

    async fn go_to_page(&self, page: u32) -> Result<Snapshot<T>, AdminError> {
        self.apply(FilterPatch::new().page(page)).await
    }

    async fn between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Snapshot<T>, AdminError> {
        self.apply(FilterPatch::new().date_range(start, end)).await
    }

    async fn reset(&self) -> Result<Snapshot<T>, AdminError> {
        self.handle().reset_filters().await?;
        self.view().await
    }

    /// Opens the edit dialog for a visible entity.
    async fn edit(&self, id: &T::Id) -> Result<(), AdminError> {
        let entity = self.visible(id).await?;
        Ok(self.handle().open_edit(entity).await?)
    }

    /// Opens the delete confirmation for a visible entity.
    async fn ask_delete(&self, id: &T::Id) -> Result<(), AdminError> {
        let entity = self.visible(id).await?;
        Ok(self.handle().open_delete(entity).await?)
    }

    /// Confirms the pending deletion; the confirmation closes whatever the outcome.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn confirm_delete(&self) -> Result<Snapshot<T>, AdminError> {
        debug!("Sending request");
        self.handle().confirm_delete().await?;
        self.view().await
    }

    async fn visible(&self, id: &T::Id) -> Result<T, AdminError> {
        self.view()
            .await?
            .items
            .into_iter()
            .find(|item| item.id() == id)
            .ok_or_else(|| AdminError::NotVisible {
                resource: T::NAME,
                id: id.to_string(),
            })
    }
}
