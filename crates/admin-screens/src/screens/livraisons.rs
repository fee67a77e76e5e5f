use super::ResourceScreen;
use crate::error::AdminError;
use crate::model::{Livraison, Partenaire};
use async_trait::async_trait;
use resource_controller::{ControllerHandle, FilterPatch, Snapshot};

/// The deliveries table, with the partner list as reference data.
#[derive(Clone)]
pub struct LivraisonsScreen {
    handle: ControllerHandle<Livraison>,
    partenaires: Vec<Partenaire>,
}

impl LivraisonsScreen {
    pub fn new(handle: ControllerHandle<Livraison>, partenaires: Vec<Partenaire>) -> Self {
        Self {
            handle,
            partenaires,
        }
    }

    pub fn partenaires(&self) -> &[Partenaire] {
        &self.partenaires
    }

    /// Display name of a partner id, if known.
    pub fn partenaire_name(&self, id: &str) -> Option<&str> {
        self.partenaires
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.nom_partenaire.as_str())
    }

    pub async fn by_partenaire(&self, id: &str) -> Result<Snapshot<Livraison>, AdminError> {
        self.apply(FilterPatch::new().set("partenaire", id)).await
    }
}

#[async_trait]
impl ResourceScreen<Livraison> for LivraisonsScreen {
    fn handle(&self) -> &ControllerHandle<Livraison> {
        &self.handle
    }
}
