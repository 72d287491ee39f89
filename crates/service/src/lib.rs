//! Orchestration layer around the prompt composer.
//!
//! Loads configuration, installs tracing and runs the preset lookup ->
//! compose -> generate -> record flow against an [`generator::ImageGenerator`].

pub mod config;
pub mod error;
pub mod generator;
pub mod service;
pub mod telemetry;
