use trustweb_core::TrustError;

/// Simulation errors.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("trust error: {0}")]
    Trust(#[from] TrustError),
}
