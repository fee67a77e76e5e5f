use resource_controller::{ConfigError, ResourceError};

/// Errors surfaced by the admin screens and their system.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{resource} {id} is not on the current page")]
    NotVisible { resource: &'static str, id: String },
    #[error("Task failed: {0}")]
    Task(String),
}
