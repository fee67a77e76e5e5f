use super::ResourceScreen;
use crate::error::AdminError;
use crate::model::{Disponibilite, Exemplaire};
use async_trait::async_trait;
use resource_controller::filters::ALL;
use resource_controller::{ControllerHandle, FilterPatch, Snapshot};

#[derive(Clone)]
pub struct ExemplairesScreen {
    handle: ControllerHandle<Exemplaire>,
}

impl ExemplairesScreen {
    pub fn new(handle: ControllerHandle<Exemplaire>) -> Self {
        Self { handle }
    }

    /// Filters by availability; `None` shows every item.
    pub async fn by_status(
        &self,
        status: Option<Disponibilite>,
    ) -> Result<Snapshot<Exemplaire>, AdminError> {
        let value = status.map_or(ALL, Disponibilite::as_str);
        self.apply(FilterPatch::new().set("status", value)).await
    }

    /// Available items over the whole filtered set.
    pub async fn available_count(&self) -> Result<usize, AdminError> {
        let snapshot = self.view().await?;
        Ok(snapshot.stats.count(Disponibilite::Disponible.as_str()))
    }
}

#[async_trait]
impl ResourceScreen<Exemplaire> for ExemplairesScreen {
    fn handle(&self) -> &ControllerHandle<Exemplaire> {
        &self.handle
    }
}
