use admin_screens::model::{Disponibilite, MaintenanceInput};
use admin_screens::screens::ResourceScreen;
use admin_screens::{AdminError, AdminSystem};
use chrono::NaiveDate;
use resource_controller::config::ENV_API_URL;
use resource_controller::tracing::setup_tracing;
use resource_controller::{Settings, Value};
use std::path::PathBuf;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), AdminError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;
    info!(?settings, "Starting admin screens");

    // A configured API URL switches every screen to the REST backend
    let system = if std::env::var_os(ENV_API_URL).is_some() {
        AdminSystem::remote(&settings)?
    } else {
        AdminSystem::new(&settings)
    };

    // Narrow the maintenance table to one section
    let span = tracing::info_span!("maintenance_filter");
    let snapshot = async {
        info!("Filtering by section");
        system.maintenance.by_section("informatique").await
    }
    .instrument(span)
    .await?;
    info!(
        total = snapshot.pagination.total,
        total_pages = snapshot.pagination.total_pages,
        "Section filter applied"
    );

    // Delete through the confirmation dialog
    let target = Value::Number(154767);
    let span = tracing::info_span!("maintenance_delete", id = %target);
    let snapshot = async {
        system.maintenance.reset().await?;
        system.maintenance.ask_delete(&target).await?;
        system.maintenance.confirm_delete().await
    }
    .instrument(span)
    .await?;
    info!(
        total = snapshot.stats.total,
        preventive = snapshot.stats.count("preventive"),
        "Maintenance deleted"
    );

    // A rejected form stays open with its field errors
    system.maintenance.handle().open_create().await?;
    let invalid = MaintenanceInput {
        recurrence: String::new(),
        type_maintenance: "curative".to_string(),
        operations: "Remplacement filtre".to_string(),
        recommandations: String::new(),
        autre_intervenant: None,
        id_intervenants: None,
        id_partenaire: None,
        id_section: "plomberie".into(),
        id_exemplaire_produit: Value::Number(12),
        date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default(),
    };
    match system.maintenance.handle().create(invalid).await {
        Ok(created) => info!(id = %created.id_maintenance, "Unexpectedly created"),
        Err(e) => {
            let snapshot = system.maintenance.view().await?;
            error!(error = %e, fields = ?snapshot.form_errors, "Create rejected");
        }
    }
    system.maintenance.handle().close_dialog().await?;

    // Other screens
    let moyens = system.moyens.newest_first().await?;
    info!(
        first = ?moyens.items.first().map(|m| &m.denomination),
        pages = moyens.pagination.total_pages,
        "Moyens de travail"
    );
    let available = system.exemplaires.by_status(Some(Disponibilite::Disponible)).await?;
    info!(count = available.items.len(), "Exemplaires disponibles");
    let livraisons = system.livraisons.view().await?;
    for livraison in &livraisons.items {
        let partenaire = system
            .livraisons
            .partenaire_name(&livraison.details.id_partenaire)
            .unwrap_or("inconnu");
        info!(id = %livraison.id_livraison, partenaire, "Livraison");
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
