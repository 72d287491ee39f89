//! Image generation collaborator.
//!
//! The core hands over a [`PromptBundle`]; how many images are produced, how
//! seeds are chosen and where files end up is up to the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use travelfit_core::composer::PromptBundle;
use travelfit_core::types::GenerationId;
use travelfit_session::GeneratedImage;

/// Sampler settings passed to every generation call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub num_images: u32,
}

/// One unit of work for an [`ImageGenerator`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    pub generation_id: GenerationId,
    pub bundle: PromptBundle,
    pub params: GenerationParams,
}

/// What a generator returns for a job.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    pub images: Vec<GeneratedImage>,
    pub elapsed_secs: f64,
}

/// Failure reported by a generator backend.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The backend is missing credentials or otherwise cannot be called.
    #[error("Image generator not configured: {0}")]
    NotConfigured(String),

    #[error("Image generation failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Whether the backend has what it needs to accept jobs.
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, job: GenerationJob) -> Result<GenerationOutput, GeneratorError>;
}
