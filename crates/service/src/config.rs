use std::path::PathBuf;

use travelfit_core::composer::ComposerConfig;
use travelfit_core::locations::LocationCatalog;
use travelfit_core::pose::{ExpressionPolicy, Pose};
use travelfit_core::resolution::{ResolutionTable, DEFAULT_RATIO};
use travelfit_session::DEFAULT_SESSION_EXPIRY_SECS;

use crate::generator::GenerationParams;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pretty" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A malformed configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read location catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid location catalog {path}: {source}")]
    CatalogInvalid {
        path: PathBuf,
        #[source]
        source: travelfit_core::error::CoreError,
    },
}

/// Service configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Session lifetime (default: `3600`).
    pub session_expiry_secs: u64,
    /// Ratio key used for unknown ratios (default: `1:1`).
    pub default_ratio: String,
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
    pub num_images: u32,
    /// Poses for which request expression text is kept (default: none).
    pub expression_poses: Vec<Pose>,
    pub pose_exclusion_weight: Option<f32>,
    pub resolution_hint: bool,
    /// Upper bound on a single generator call (default: `300`).
    pub generation_timeout_secs: u64,
    /// Generation records kept in memory (default: unbounded).
    pub generation_history_limit: Option<usize>,
    /// JSON catalog replacing the built-in locations.
    pub locations_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            session_expiry_secs: DEFAULT_SESSION_EXPIRY_SECS,
            default_ratio: DEFAULT_RATIO.to_string(),
            num_inference_steps: 28,
            guidance_scale: 5.0,
            num_images: 4,
            expression_poses: Vec::new(),
            pose_exclusion_weight: None,
            resolution_hint: true,
            generation_timeout_secs: 300,
            generation_history_limit: None,
            locations_path: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default   |
    /// |---------------------------|-----------|
    /// | `SESSION_EXPIRY_SECS`     | `3600`    |
    /// | `DEFAULT_RATIO`           | `1:1`     |
    /// | `NUM_INFERENCE_STEPS`     | `28`      |
    /// | `GUIDANCE_SCALE`          | `5.0`     |
    /// | `NUM_IMAGES`              | `4`       |
    /// | `EXPRESSION_POSES`        | (empty)   |
    /// | `POSE_EXCLUSION_WEIGHT`   | (unset)   |
    /// | `RESOLUTION_HINT`         | `true`    |
    /// | `GENERATION_TIMEOUT_SECS` | `300`     |
    /// | `GENERATION_HISTORY_LIMIT`| (unset)   |
    /// | `LOCATIONS_PATH`          | (unset)   |
    /// | `LOG_FORMAT`              | `pretty`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset and blank keys take their
    /// default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let session_expiry_secs = parse_or(
            get("SESSION_EXPIRY_SECS"),
            "SESSION_EXPIRY_SECS",
            defaults.session_expiry_secs,
        )?;
        let num_inference_steps = parse_or(
            get("NUM_INFERENCE_STEPS"),
            "NUM_INFERENCE_STEPS",
            defaults.num_inference_steps,
        )?;
        let guidance_scale = parse_or(
            get("GUIDANCE_SCALE"),
            "GUIDANCE_SCALE",
            defaults.guidance_scale,
        )?;
        let num_images: u32 = parse_or(
            get("NUM_IMAGES"),
            "NUM_IMAGES",
            defaults.num_images,
        )?;
        let generation_timeout_secs = parse_or(
            get("GENERATION_TIMEOUT_SECS"),
            "GENERATION_TIMEOUT_SECS",
            defaults.generation_timeout_secs,
        )?;

        if num_images == 0 {
            return Err(invalid("NUM_IMAGES", "0", "must be at least 1"));
        }
        if generation_timeout_secs == 0 {
            return Err(invalid("GENERATION_TIMEOUT_SECS", "0", "must be at least 1"));
        }
        if !guidance_scale.is_finite() || guidance_scale <= 0.0 {
            return Err(invalid(
                "GUIDANCE_SCALE",
                &guidance_scale.to_string(),
                "must be a positive number",
            ));
        }

        let generation_history_limit = match get("GENERATION_HISTORY_LIMIT") {
            Some(raw) => {
                let limit: usize = parse("GENERATION_HISTORY_LIMIT", &raw)?;
                if limit == 0 {
                    return Err(invalid("GENERATION_HISTORY_LIMIT", &raw, "must be at least 1"));
                }
                Some(limit)
            }
            None => None,
        };

        let expression_poses = match get("EXPRESSION_POSES") {
            Some(raw) => parse_poses(&raw)?,
            None => defaults.expression_poses,
        };

        let pose_exclusion_weight = match get("POSE_EXCLUSION_WEIGHT") {
            Some(raw) => {
                let weight: f32 = parse("POSE_EXCLUSION_WEIGHT", &raw)?;
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(invalid(
                        "POSE_EXCLUSION_WEIGHT",
                        &raw,
                        "must be a positive number",
                    ));
                }
                Some(weight)
            }
            None => None,
        };

        let resolution_hint = match get("RESOLUTION_HINT") {
            Some(raw) => parse_bool("RESOLUTION_HINT", &raw)?,
            None => defaults.resolution_hint,
        };

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => LogFormat::from_str(&raw.to_lowercase())
                .ok_or_else(|| invalid("LOG_FORMAT", &raw, "expected 'pretty' or 'json'"))?,
            None => defaults.log_format,
        };

        Ok(Self {
            session_expiry_secs,
            default_ratio: get("DEFAULT_RATIO").unwrap_or(defaults.default_ratio),
            num_inference_steps,
            guidance_scale,
            num_images,
            expression_poses,
            pose_exclusion_weight,
            resolution_hint,
            generation_timeout_secs,
            generation_history_limit,
            locations_path: get("LOCATIONS_PATH").map(PathBuf::from),
            log_format,
        })
    }

    /// Composition policy derived from this configuration.
    pub fn composer_config(&self) -> ComposerConfig {
        let resolutions = ResolutionTable::standard();
        if !resolutions.contains(&self.default_ratio) {
            tracing::warn!(
                default_ratio = %self.default_ratio,
                "DEFAULT_RATIO is not in the resolution table; unknown ratios will use the first row",
            );
        }
        ComposerConfig {
            resolutions,
            default_ratio: self.default_ratio.clone(),
            expression: ExpressionPolicy::allow_for(self.expression_poses.iter().copied()),
            pose_exclusion_weight: self.pose_exclusion_weight,
            resolution_hint: self.resolution_hint,
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            num_inference_steps: self.num_inference_steps,
            guidance_scale: self.guidance_scale,
            num_images: self.num_images,
        }
    }

    /// The configured catalog file, or the built-in catalog.
    pub fn load_catalog(&self) -> Result<LocationCatalog, ConfigError> {
        let Some(path) = &self.locations_path else {
            return Ok(LocationCatalog::standard());
        };
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::CatalogRead {
            path: path.clone(),
            source,
        })?;
        let catalog =
            LocationCatalog::from_json(&json).map_err(|source| ConfigError::CatalogInvalid {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded location catalog");
        Ok(catalog)
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e: T::Err| invalid(key, raw, &e.to_string()))
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse(key, &raw),
        None => Ok(default),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, raw, "expected a boolean")),
    }
}

/// Comma-separated pose list, e.g. `side` or `back,side`.
fn parse_poses(raw: &str) -> Result<Vec<Pose>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Pose::from_str(&s.to_lowercase())
                .ok_or_else(|| invalid("EXPRESSION_POSES", s, "expected 'back' or 'side'"))
        })
        .collect()
}
