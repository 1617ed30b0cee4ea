//! Error types for episode storage operations.

use crate::types::{EpisodeId, PatientId};

/// Errors that can occur while querying or mutating episode storage.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested episode does not exist.
    #[error("Episode not found: {id}")]
    EpisodeNotFound {
        /// Identifier of the missing episode.
        id: EpisodeId,
    },

    /// The requested patient does not exist.
    #[error("Patient not found: {id}")]
    PatientNotFound {
        /// Identifier of the missing patient.
        id: PatientId,
    },

    /// An episode payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store failed for reasons of its own.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

impl StoreError {
    /// Creates a new `EpisodeNotFound` error.
    #[must_use]
    pub fn episode_not_found(id: EpisodeId) -> Self {
        Self::EpisodeNotFound { id }
    }

    /// Creates a new `PatientNotFound` error.
    #[must_use]
    pub fn patient_not_found(id: PatientId) -> Self {
        Self::PatientNotFound { id }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not-found error of either kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EpisodeNotFound { .. } | Self::PatientNotFound { .. }
        )
    }
}
