//! Resources managed by the admin screens.

pub mod exemplaire;
pub mod livraison;
pub mod maintenance;
pub mod moyen;

pub use exemplaire::{Disponibilite, Exemplaire, ExemplaireInput};
pub use livraison::{Livraison, LivraisonInput, Partenaire};
pub use maintenance::{Maintenance, MaintenanceInput};
pub use moyen::{MoyenDeTravail, MoyenDeTravailInput};
