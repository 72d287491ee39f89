use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use tokio::sync::RwLock;
use travelfit_core::lookup::{PresetLookup, PresetLookupError};
use travelfit_core::preset::ResolvedPreset;
use travelfit_core::types::{GenerationId, SessionId, Timestamp};

use crate::record::{GenerationRecord, SessionRecord, SessionStats};

/// Default session lifetime in seconds.
pub const DEFAULT_SESSION_EXPIRY_SECS: u64 = 3600;

/// In-memory store for session presets and generation history.
///
/// Thread-safe via interior `RwLock`s; designed to be wrapped in `Arc` and
/// shared across tasks. Nothing survives the process.
///
/// A session expires once its age exceeds the TTL. Expired sessions are
/// removed when they are looked up, whenever a new session is created, and
/// by [`SessionStore::cleanup_expired`].
///
/// Generation history never expires. Without a history limit it grows for
/// the lifetime of the process; with one, the oldest records are evicted
/// once the limit is exceeded.
pub struct SessionStore {
    ttl: TimeDelta,
    history_limit: Option<usize>,
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
    generations: RwLock<HashMap<GenerationId, GenerationRecord>>,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or_else(TimeDelta::max_value);
        Self {
            ttl,
            history_limit: None,
            sessions: RwLock::new(HashMap::new()),
            generations: RwLock::new(HashMap::new()),
        }
    }

    /// Keep at most `limit` generation records, evicting the oldest first.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.history_limit
    }

    fn is_expired(&self, record: &SessionRecord, now: Timestamp) -> bool {
        now - record.created_at > self.ttl
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Store a preset under a fresh session id.
    pub async fn create_session(&self, preset: ResolvedPreset) -> SessionId {
        self.create_session_at(preset, Utc::now()).await
    }

    /// [`create_session`](Self::create_session) with an explicit clock.
    pub async fn create_session_at(&self, preset: ResolvedPreset, now: Timestamp) -> SessionId {
        let session_id = uuid::Uuid::now_v7().to_string();

        tracing::info!(
            session_id = %session_id,
            tone = %preset.tone_key,
            nationality = preset.nationality.as_str(),
            age_group = preset.age_group.as_str(),
            "Session created",
        );

        let record = SessionRecord {
            session_id: session_id.clone(),
            preset,
            created_at: now,
        };
        self.sessions.write().await.insert(session_id.clone(), record);

        self.cleanup_expired_at(now).await;
        session_id
    }

    /// Fetch a live session. An expired session is removed and reported as
    /// [`PresetLookupError::Expired`].
    pub async fn get_session(&self, session_id: &str) -> Result<SessionRecord, PresetLookupError> {
        self.get_session_at(session_id, Utc::now()).await
    }

    /// [`get_session`](Self::get_session) with an explicit clock.
    pub async fn get_session_at(
        &self,
        session_id: &str,
        now: Timestamp,
    ) -> Result<SessionRecord, PresetLookupError> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => {
                    tracing::warn!(session_id = %session_id, "Session not found");
                    return Err(PresetLookupError::NotFound(session_id.to_string()));
                }
                Some(record) if !self.is_expired(record, now) => return Ok(record.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock; the session may have been swept
        // or replaced in between.
        let mut sessions = self.sessions.write().await;
        match sessions.get(session_id) {
            Some(record) if !self.is_expired(record, now) => Ok(record.clone()),
            Some(record) => {
                let age_secs = (now - record.created_at).num_seconds();
                sessions.remove(session_id);
                tracing::warn!(session_id = %session_id, age_secs, "Session expired");
                Err(PresetLookupError::Expired(session_id.to_string()))
            }
            None => Err(PresetLookupError::Expired(session_id.to_string())),
        }
    }

    /// Remove every expired session. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Utc::now()).await
    }

    /// [`cleanup_expired`](Self::cleanup_expired) with an explicit clock.
    pub async fn cleanup_expired_at(&self, now: Timestamp) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|session_id, record| {
            let keep = !self.is_expired(record, now);
            if !keep {
                tracing::info!(session_id = %session_id, "Expired session removed");
            }
            keep
        });
        before - sessions.len()
    }

    // -----------------------------------------------------------------------
    // Generation history
    // -----------------------------------------------------------------------

    pub async fn save_generation(&self, record: GenerationRecord) {
        tracing::info!(
            generation_id = %record.generation_id,
            session_id = %record.session_id,
            images = record.images.len(),
            "Generation recorded",
        );
        let mut generations = self.generations.write().await;
        generations.insert(record.generation_id.clone(), record);

        let Some(limit) = self.history_limit else {
            return;
        };
        while generations.len() > limit {
            let oldest = generations
                .values()
                .min_by(|a, b| {
                    a.created_at
                        .cmp(&b.created_at)
                        .then_with(|| a.generation_id.cmp(&b.generation_id))
                })
                .map(|oldest| oldest.generation_id.clone());
            let Some(oldest) = oldest else {
                break;
            };
            generations.remove(&oldest);
            tracing::debug!(generation_id = %oldest, limit, "Generation evicted from history");
        }
    }

    pub async fn get_generation(&self, generation_id: &str) -> Option<GenerationRecord> {
        self.generations.read().await.get(generation_id).cloned()
    }

    // -----------------------------------------------------------------------
    // Stats
    // -----------------------------------------------------------------------

    pub async fn stats(&self) -> SessionStats {
        self.stats_at(Utc::now()).await
    }

    /// [`stats`](Self::stats) with an explicit clock.
    pub async fn stats_at(&self, now: Timestamp) -> SessionStats {
        let sessions = self.sessions.read().await;
        let oldest_session_age_secs = sessions
            .values()
            .map(|record| (now - record.created_at).num_milliseconds() as f64 / 1000.0)
            .reduce(f64::max);

        SessionStats {
            active_sessions: sessions.len(),
            total_generations: self.generations.read().await.len(),
            oldest_session_age_secs,
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_EXPIRY_SECS)
    }
}

#[async_trait]
impl PresetLookup for SessionStore {
    async fn lookup_preset(&self, session_id: &str) -> Result<ResolvedPreset, PresetLookupError> {
        self.get_session(session_id).await.map(|record| record.preset)
    }
}
