/// Opaque session identifier handed out by the preset store.
pub type SessionId = String;

/// Opaque identifier of a single generation run.
pub type GenerationId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
