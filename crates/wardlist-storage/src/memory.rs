//! In-memory episode backend.
//!
//! The reference [`EpisodeStore`] implementation, used by tests, demos and
//! embedders that have not wired a real record system yet. Concurrent maps
//! keep reads lock-free; identifiers are sequential starting from 1.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use wardlist_core::UserContext;

use crate::error::StoreError;
use crate::traits::EpisodeStore;
use crate::types::{Episode, EpisodeId, Patient, PatientId};

/// In-memory episode store backed by `DashMap`.
///
/// Writes are inherent methods rather than part of [`EpisodeStore`]: the
/// registry is a pure reader, and only the owning system (or a test
/// fixture) creates records and assigns tags.
#[derive(Debug)]
pub struct InMemoryEpisodeStore {
    patients: DashMap<PatientId, Patient>,
    episodes: DashMap<EpisodeId, Episode>,
    tags: DashMap<EpisodeId, Vec<String>>,
    next_patient_id: AtomicU64,
    next_episode_id: AtomicU64,
}

impl InMemoryEpisodeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patients: DashMap::new(),
            episodes: DashMap::new(),
            tags: DashMap::new(),
            next_patient_id: AtomicU64::new(1),
            next_episode_id: AtomicU64::new(1),
        }
    }

    /// Creates a new patient.
    pub fn create_patient(&self) -> Patient {
        let id = self.next_patient_id.fetch_add(1, Ordering::SeqCst);
        let patient = Patient { id };
        self.patients.insert(id, patient);
        patient
    }

    /// Creates a new episode for an existing patient.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PatientNotFound` if the patient does not exist.
    pub fn create_episode(&self, patient_id: PatientId) -> Result<Episode, StoreError> {
        if !self.patients.contains_key(&patient_id) {
            return Err(StoreError::patient_not_found(patient_id));
        }
        let id = self.next_episode_id.fetch_add(1, Ordering::SeqCst);
        let episode = Episode::new(id, patient_id);
        self.episodes.insert(id, episode.clone());
        Ok(episode)
    }

    /// Replaces the tag names on an episode.
    ///
    /// The user is recorded in the log line; tag history and audit belong
    /// to the owning system.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EpisodeNotFound` if the episode does not exist.
    pub fn set_tag_names(
        &self,
        id: EpisodeId,
        names: &[&str],
        user: &UserContext,
    ) -> Result<(), StoreError> {
        if !self.episodes.contains_key(&id) {
            return Err(StoreError::episode_not_found(id));
        }
        let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
        debug!(episode = id, user = %user.username, tags = ?names, "Set tag names");
        self.tags.insert(id, names);
        Ok(())
    }

    fn episode_has_tag(&self, id: EpisodeId, name: &str) -> bool {
        self.tags
            .get(&id)
            .is_some_and(|names| names.iter().any(|n| n == name))
    }
}

impl Default for InMemoryEpisodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeStore for InMemoryEpisodeStore {
    fn tagged_episodes(&self, tag: &str, subtag: Option<&str>) -> Result<Vec<Episode>, StoreError> {
        let mut matching: Vec<Episode> = self
            .episodes
            .iter()
            .filter(|entry| {
                let id = *entry.key();
                self.episode_has_tag(id, tag)
                    && subtag.is_none_or(|sub| self.episode_has_tag(id, sub))
            })
            .map(|entry| entry.value().clone())
            .collect();
        matching.sort_by_key(|episode| episode.id);
        Ok(matching)
    }

    fn episode(&self, id: EpisodeId) -> Result<Option<Episode>, StoreError> {
        Ok(self.episodes.get(&id).map(|entry| entry.value().clone()))
    }

    fn tag_names(&self, id: EpisodeId) -> Result<Vec<String>, StoreError> {
        if !self.episodes.contains_key(&id) {
            return Err(StoreError::episode_not_found(id));
        }
        Ok(self
            .tags
            .get(&id)
            .map(|names| names.clone())
            .unwrap_or_default())
    }

    fn serialize_episode(
        &self,
        episode: &Episode,
        _user: &UserContext,
    ) -> Result<Value, StoreError> {
        // This backend serializes the same payload for every user; the user
        // argument is part of the seam for backends that filter fields.
        let mut value = serde_json::to_value(episode)?;
        let tagging = self
            .tags
            .get(&episode.id)
            .map(|names| names.clone())
            .unwrap_or_default();
        if let Value::Object(map) = &mut value {
            map.insert("tagging".to_string(), serde_json::to_value(tagging)?);
        }
        Ok(value)
    }
}
