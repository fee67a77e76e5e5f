use super::ResourceScreen;
use crate::error::AdminError;
use crate::model::Maintenance;
use async_trait::async_trait;
use resource_controller::{ControllerHandle, FilterPatch, Snapshot, Value};

/// Sections offered by the section select.
pub const SECTIONS: [&str; 6] = [
    "informatique",
    "bureautique",
    "electrique",
    "plomberie",
    "menuiserie",
    "autre",
];

/// The maintenance table: client-side filtering over the whole collection.
#[derive(Clone)]
pub struct MaintenanceScreen {
    handle: ControllerHandle<Maintenance>,
}

impl MaintenanceScreen {
    pub fn new(handle: ControllerHandle<Maintenance>) -> Self {
        Self { handle }
    }

    pub fn sections(&self) -> &'static [&'static str] {
        &SECTIONS
    }

    /// Filters by section. `"all"` removes the filter.
    pub async fn by_section(&self, section: impl Into<Value>) -> Result<Snapshot<Maintenance>, AdminError> {
        self.apply(FilterPatch::new().set("section", section)).await
    }

    pub async fn by_type(&self, type_maintenance: &str) -> Result<Snapshot<Maintenance>, AdminError> {
        self.apply(FilterPatch::new().set("type_maintenance", type_maintenance))
            .await
    }
}

#[async_trait]
impl ResourceScreen<Maintenance> for MaintenanceScreen {
    fn handle(&self) -> &ControllerHandle<Maintenance> {
        &self.handle
    }
}
