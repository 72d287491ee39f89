//! Records kept by the session store.

use serde::{Deserialize, Serialize};
use travelfit_core::composer::PromptBundle;
use travelfit_core::preset::ResolvedPreset;
use travelfit_core::request::GenerationRequest;
use travelfit_core::types::{GenerationId, SessionId, Timestamp};

/// A preset bound to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub preset: ResolvedPreset,
    pub created_at: Timestamp,
}

/// One image produced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_id: String,
    pub filename: String,
    /// Seed chosen by the generator.
    pub seed: u64,
}

/// Everything needed to explain or reproduce a finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation_id: GenerationId,
    pub session_id: SessionId,
    pub request: GenerationRequest,
    pub bundle: PromptBundle,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub images: Vec<GeneratedImage>,
    /// Wall-clock seconds spent in the generator.
    pub elapsed_secs: f64,
    pub created_at: Timestamp,
}

impl GenerationRecord {
    pub fn seeds(&self) -> Vec<u64> {
        self.images.iter().map(|image| image.seed).collect()
    }
}

/// Snapshot of store occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub active_sessions: usize,
    pub total_generations: usize,
    /// Age of the longest-lived stored session, `None` when empty.
    pub oldest_session_age_secs: Option<f64>,
}
