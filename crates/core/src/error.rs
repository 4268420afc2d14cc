/// Domain-level errors shared by every crate in the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The caller supplied an option set that cannot be honoured.
    /// Reported before any network activity takes place.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
