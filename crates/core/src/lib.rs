//! Prompt composition engine for travel-marketing image generation.
//!
//! Turns a session-bound [`preset::ResolvedPreset`] and a
//! [`request::GenerationRequest`] into a [`composer::PromptBundle`]. No I/O
//! happens here; session storage and image generation sit behind the
//! traits in [`lookup`] and in the service crate.

pub mod composer;
pub mod error;
pub mod lexicon;
pub mod locations;
pub mod lookup;
pub mod pose;
pub mod preset;
pub mod request;
pub mod resolution;
pub mod resolver;
pub mod template;
pub mod types;
