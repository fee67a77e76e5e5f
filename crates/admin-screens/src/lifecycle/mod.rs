//! # System Lifecycle & Orchestration
//!
//! Starts, wires and stops everything behind the admin screens.
//!
//! ## The AdminSystem Pattern
//!
//! Each screen is a pair of actors: a backend (an in-memory [`StoreActor`] or a REST
//! [`HttpClient`]) and a [`ResourceController`] that owns the screen state. [`AdminSystem`]
//! creates both for every resource, keeps the task handles and exposes one typed screen per
//! resource:
//!
//! | Screen | Backend reply | Pagination |
//! |--------|---------------|------------|
//! | maintenance | raw array | client |
//! | moyens-de-travail | envelope | server |
//! | exemplaires | raw array | client |
//! | livraisons | raw array | client |
//!
//! ```rust,ignore
//! let system = AdminSystem::new(&Settings::default());
//! let snapshot = system.maintenance.by_section("informatique").await?;
//! system.shutdown().await?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all screens** - closes the controllers' request channels
//! 2. **Controllers stop** - dropping their store clients in turn
//! 3. **Stores stop** - once the last client is gone
//! 4. **Await completion** - every task handle is joined
//!
//! The dependency graph is acyclic (screen to controller to store), so channel closure is
//! enough to stop everything in order.

use crate::error::AdminError;
use crate::fixtures;
use crate::screens::{ExemplairesScreen, LivraisonsScreen, MaintenanceScreen, MoyensScreen};
use resource_controller::{
    ControllerConfig, ControllerHandle, HttpClient, IdGenerator, ListMode, PaginationMode,
    Resource, ResourceClient, ResourceController, Settings, StoreActor, StoreClient,
};
use tokio::task::JoinHandle;
use tracing::info;

pub const MAINTENANCE_PATH: &str = "/maintenances";
pub const MOYENS_PATH: &str = "/moyens-de-travail";
pub const EXEMPLAIRES_PATH: &str = "/stocks/exemplaires";
pub const LIVRAISONS_PATH: &str = "/stocks/livraisons";

/// Every admin screen with the tasks running behind it.
pub struct AdminSystem {
    pub maintenance: MaintenanceScreen,
    pub moyens: MoyensScreen,
    pub exemplaires: ExemplairesScreen,
    pub livraisons: LivraisonsScreen,
    handles: Vec<JoinHandle<()>>,
}

impl AdminSystem {
    /// Starts every screen over in-memory stores seeded with the fixtures.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(settings: &Settings) -> Self {
        let config = &settings.controller;
        let mut handles = Vec::new();

        let store = seed(
            &mut handles,
            config,
            fixtures::maintenances(),
            Box::new(fixtures::next_maintenance_id),
            ListMode::Raw,
        );
        let maintenance = mount(&mut handles, config, store, PaginationMode::Client);

        let store = seed(
            &mut handles,
            config,
            fixtures::moyens(),
            Box::new(fixtures::next_moyen_id),
            ListMode::Paginated,
        );
        let moyens = mount(&mut handles, config, store, PaginationMode::Server);

        let store = seed(
            &mut handles,
            config,
            fixtures::exemplaires(),
            Box::new(fixtures::next_exemplaire_id),
            ListMode::Raw,
        );
        let exemplaires = mount(&mut handles, config, store, PaginationMode::Client);

        let store = seed(
            &mut handles,
            config,
            fixtures::livraisons(),
            Box::new(fixtures::next_livraison_id),
            ListMode::Raw,
        );
        let livraisons = mount(&mut handles, config, store, PaginationMode::Client);

        info!(tasks = handles.len(), "Admin system started");
        Self {
            maintenance: MaintenanceScreen::new(maintenance),
            moyens: MoyensScreen::new(moyens),
            exemplaires: ExemplairesScreen::new(exemplaires),
            livraisons: LivraisonsScreen::new(livraisons, fixtures::partenaires()),
            handles,
        }
    }

    /// Starts every screen against the REST backend at `settings.http.base_url`.
    pub fn remote(settings: &Settings) -> Result<Self, AdminError> {
        let config = &settings.controller;
        let http = &settings.http;
        let mut handles = Vec::new();

        let maintenance = mount(
            &mut handles,
            config,
            HttpClient::new(http, MAINTENANCE_PATH)?,
            PaginationMode::Client,
        );
        let moyens = mount(
            &mut handles,
            config,
            HttpClient::new(http, MOYENS_PATH)?,
            PaginationMode::Server,
        );
        let exemplaires = mount(
            &mut handles,
            config,
            HttpClient::new(http, EXEMPLAIRES_PATH)?,
            PaginationMode::Client,
        );
        let livraisons = mount(
            &mut handles,
            config,
            HttpClient::new(http, LIVRAISONS_PATH)?,
            PaginationMode::Client,
        );

        info!(base_url = %http.base_url, "Admin system connected");
        Ok(Self {
            maintenance: MaintenanceScreen::new(maintenance),
            moyens: MoyensScreen::new(moyens),
            exemplaires: ExemplairesScreen::new(exemplaires),
            livraisons: LivraisonsScreen::new(livraisons, fixtures::partenaires()),
            handles,
        })
    }

    /// Drops every screen, then waits for all controllers and stores to finish.
    pub async fn shutdown(self) -> Result<(), AdminError> {
        info!("Shutting down admin system");
        let Self {
            maintenance,
            moyens,
            exemplaires,
            livraisons,
            handles,
        } = self;
        drop(maintenance);
        drop(moyens);
        drop(exemplaires);
        drop(livraisons);

        for handle in handles {
            handle.await.map_err(|e| AdminError::Task(e.to_string()))?;
        }
        info!("Admin system stopped");
        Ok(())
    }
}

fn seed<T: Resource>(
    handles: &mut Vec<JoinHandle<()>>,
    config: &ControllerConfig,
    records: Vec<T>,
    next_id: IdGenerator<T>,
    mode: ListMode,
) -> StoreClient<T> {
    let (store, client) = StoreActor::new(config.channel_capacity, records, next_id);
    handles.push(tokio::spawn(store.with_mode(mode).run()));
    client
}

fn mount<T: Resource, C: ResourceClient<T>>(
    handles: &mut Vec<JoinHandle<()>>,
    config: &ControllerConfig,
    client: C,
    mode: PaginationMode,
) -> ControllerHandle<T> {
    let (controller, handle) = ResourceController::new(client, config.clone(), mode);
    handles.push(tokio::spawn(controller.run()));
    handle
}
