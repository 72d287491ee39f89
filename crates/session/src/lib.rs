//! In-memory session and generation-history store.
//!
//! Holds the preset chosen for each session until it expires and answers
//! [`travelfit_core::lookup::PresetLookup`] queries for the service layer.

pub mod record;
pub mod store;

pub use record::{GeneratedImage, GenerationRecord, SessionRecord, SessionStats};
pub use store::{SessionStore, DEFAULT_SESSION_EXPIRY_SECS};
