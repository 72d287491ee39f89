use travelfit_core::error::CoreError;
use travelfit_core::lookup::PresetLookupError;

use crate::generator::GeneratorError;

/// Errors surfaced by [`crate::service::GenerationService`].
///
/// Wraps [`CoreError`] for domain errors and adds orchestration variants.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error from `travelfit_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The session is unknown or has expired; the user must pick a preset
    /// again.
    #[error("session expired, please reconfigure")]
    SessionUnavailable(#[from] PresetLookupError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error("Image generation timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The generator finished without producing any image.
    #[error("Image generation returned no images")]
    EmptyResult,
}

/// Convenience type alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
