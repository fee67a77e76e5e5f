use super::ResourceScreen;
use crate::error::AdminError;
use crate::model::MoyenDeTravail;
use async_trait::async_trait;
use resource_controller::{ControllerHandle, FilterPatch, Snapshot};

/// The working-equipment table, filtered and paginated by the backend.
#[derive(Clone)]
pub struct MoyensScreen {
    handle: ControllerHandle<MoyenDeTravail>,
}

impl MoyensScreen {
    pub fn new(handle: ControllerHandle<MoyenDeTravail>) -> Self {
        Self { handle }
    }

    pub async fn by_section(&self, section: &str) -> Result<Snapshot<MoyenDeTravail>, AdminError> {
        self.apply(FilterPatch::new().set("section", section)).await
    }

    /// Most recently acquired first.
    pub async fn newest_first(&self) -> Result<Snapshot<MoyenDeTravail>, AdminError> {
        self.apply(FilterPatch::new().sort_by("date_acquisition", true))
            .await
    }
}

#[async_trait]
impl ResourceScreen<MoyenDeTravail> for MoyensScreen {
    fn handle(&self) -> &ControllerHandle<MoyenDeTravail> {
        &self.handle
    }
}
