//! Orchestration: preset lookup -> composition -> generation -> history.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use travelfit_core::composer::{CompositionReport, PromptBundle, PromptComposer};
use travelfit_core::error::CoreError;
use travelfit_core::lexicon::Lexicon;
use travelfit_core::locations::LocationEntry;
use travelfit_core::lookup::PresetLookup;
use travelfit_core::preset::{resolve_preset, PresetSelection, PresetSummary, ResolvedPreset};
use travelfit_core::request::GenerationRequest;
use travelfit_core::resolver::LocationResolver;
use travelfit_core::types::SessionId;
use travelfit_session::{GenerationRecord, SessionStats, SessionStore};

use crate::config::{ConfigError, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::generator::{GenerationJob, GenerationParams, GeneratorError, ImageGenerator};

/// Result of binding a preset to a new session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetCreated {
    pub session_id: SessionId,
    pub preset: ResolvedPreset,
}

/// A composed bundle that was not sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub bundle: PromptBundle,
    pub report: CompositionReport,
}

/// Wires the composer, the session store and an image generator together.
///
/// Cheap to clone; every part is shared through `Arc`.
#[derive(Clone)]
pub struct GenerationService {
    composer: Arc<PromptComposer>,
    store: Arc<SessionStore>,
    generator: Arc<dyn ImageGenerator>,
    params: GenerationParams,
    timeout: Duration,
}

impl GenerationService {
    pub fn new(
        composer: Arc<PromptComposer>,
        store: Arc<SessionStore>,
        generator: Arc<dyn ImageGenerator>,
        params: GenerationParams,
        timeout: Duration,
    ) -> Self {
        Self {
            composer,
            store,
            generator,
            params,
            timeout,
        }
    }

    /// Build every component from configuration.
    pub fn from_config(
        config: &ServiceConfig,
        generator: Arc<dyn ImageGenerator>,
    ) -> Result<Self, ConfigError> {
        let catalog = Arc::new(config.load_catalog()?);
        let resolver = Arc::new(LocationResolver::new(catalog));
        let composer = Arc::new(PromptComposer::new(
            Arc::new(Lexicon::standard()),
            resolver,
            config.composer_config(),
        ));
        let mut store = SessionStore::new(config.session_expiry_secs);
        if let Some(limit) = config.generation_history_limit {
            store = store.with_history_limit(limit);
        }
        let store = Arc::new(store);

        tracing::info!(
            generator = generator.name(),
            locations = composer.resolver().catalog().len(),
            session_expiry_secs = config.session_expiry_secs,
            "Generation service ready",
        );

        Ok(Self::new(
            composer,
            store,
            generator,
            config.generation_params(),
            Duration::from_secs(config.generation_timeout_secs),
        ))
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn composer(&self) -> &Arc<PromptComposer> {
        &self.composer
    }

    // -----------------------------------------------------------------------
    // Presets
    // -----------------------------------------------------------------------

    pub fn available_presets(&self) -> Vec<PresetSummary> {
        self.composer.lexicon().available_presets()
    }

    /// Validate a preset choice and bind it to a fresh session.
    pub async fn create_preset(&self, selection: &PresetSelection) -> ServiceResult<PresetCreated> {
        let preset = resolve_preset(self.composer.lexicon(), selection)?;
        let session_id = self.store.create_session(preset.clone()).await;
        Ok(PresetCreated { session_id, preset })
    }

    /// The preset bound to a live session.
    pub async fn preset(&self, session_id: &str) -> ServiceResult<ResolvedPreset> {
        Ok(self.store.lookup_preset(session_id).await?)
    }

    // -----------------------------------------------------------------------
    // Locations
    // -----------------------------------------------------------------------

    /// Ranked catalog entries for a free-text query.
    pub fn search_locations(&self, query: &str, limit: usize) -> Vec<LocationEntry> {
        self.composer
            .resolver()
            .resolve(query, limit)
            .into_iter()
            .map(|m| m.entry.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Compose without generating.
    pub async fn preview(
        &self,
        session_id: &str,
        request: &GenerationRequest,
    ) -> ServiceResult<Preview> {
        let preset = self.store.lookup_preset(session_id).await?;
        let (bundle, report) = self.composer.compose_with_report(&preset, request);
        Ok(Preview { bundle, report })
    }

    /// Compose, generate and record one run.
    pub async fn generate(
        &self,
        session_id: &str,
        request: &GenerationRequest,
    ) -> ServiceResult<GenerationRecord> {
        tracing::info!(
            session_id = %session_id,
            location = %request.location,
            persona = %request.persona,
            "Generation requested",
        );

        let preset = self.store.lookup_preset(session_id).await?;

        if !self.generator.is_configured() {
            let name = self.generator.name().to_string();
            return Err(GeneratorError::NotConfigured(name).into());
        }

        let (bundle, report) = self.composer.compose_with_report(&preset, request);
        tracing::debug!(
            width = bundle.width,
            height = bundle.height,
            degraded = report.degradations().len(),
            positive_len = bundle.positive_prompt.len(),
            "Prompt composed",
        );

        let generation_id = uuid::Uuid::now_v7().to_string();
        let job = GenerationJob {
            generation_id: generation_id.clone(),
            bundle: bundle.clone(),
            params: self.params,
        };

        let started = Instant::now();
        let output = match tokio::time::timeout(self.timeout, self.generator.generate(job)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::error!(
                    generation_id = %generation_id,
                    timeout_secs = self.timeout.as_secs(),
                    "Image generation timed out",
                );
                return Err(ServiceError::Timeout {
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if output.images.is_empty() {
            tracing::error!(generation_id = %generation_id, "Image generation returned no images");
            return Err(ServiceError::EmptyResult);
        }

        tracing::info!(
            generation_id = %generation_id,
            images = output.images.len(),
            elapsed_secs = output.elapsed_secs,
            wall_secs = started.elapsed().as_secs_f64(),
            "Generation complete",
        );

        let record = GenerationRecord {
            generation_id,
            session_id: session_id.to_string(),
            request: request.clone(),
            bundle,
            num_inference_steps: self.params.num_inference_steps,
            guidance_scale: self.params.guidance_scale,
            images: output.images,
            elapsed_secs: output.elapsed_secs,
            created_at: chrono::Utc::now(),
        };
        self.store.save_generation(record.clone()).await;
        Ok(record)
    }

    /// A previously recorded generation.
    pub async fn generation(&self, generation_id: &str) -> ServiceResult<GenerationRecord> {
        self.store
            .get_generation(generation_id)
            .await
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "generation",
                    id: generation_id.to_string(),
                }
                .into()
            })
    }

    pub async fn stats(&self) -> SessionStats {
        self.store.stats().await
    }
}
