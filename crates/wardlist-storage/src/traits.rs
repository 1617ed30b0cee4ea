//! The storage trait patient lists query against.

use serde_json::Value;
use wardlist_core::UserContext;

use crate::error::StoreError;
use crate::types::{Episode, EpisodeId};

/// Read-side contract every episode backend must implement.
///
/// The registry performs no I/O of its own; every queryset and every
/// serialized payload comes through this trait. Implementations must be
/// thread-safe (`Send + Sync`) and must surface their own failures — the
/// registry propagates them unchanged rather than recovering.
///
/// # Example
///
/// ```ignore
/// use wardlist_storage::{EpisodeStore, StoreError};
///
/// fn herbivore_count(store: &dyn EpisodeStore) -> Result<usize, StoreError> {
///     Ok(store.tagged_episodes("eater", Some("herbivore"))?.len())
/// }
/// ```
pub trait EpisodeStore: Send + Sync {
    /// Returns the episodes carrying the given tag name, in ascending
    /// episode id order.
    ///
    /// When `subtag` is present, an episode must carry both names to match
    /// (exact membership, AND-combined).
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures, never for an empty
    /// result.
    fn tagged_episodes(&self, tag: &str, subtag: Option<&str>) -> Result<Vec<Episode>, StoreError>;

    /// Reads an episode by id.
    ///
    /// Returns `None` if the episode does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures.
    fn episode(&self, id: EpisodeId) -> Result<Option<Episode>, StoreError>;

    /// Returns the tag names currently attached to an episode.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EpisodeNotFound` if the episode does not exist.
    fn tag_names(&self, id: EpisodeId) -> Result<Vec<String>, StoreError>;

    /// Serializes one episode to a plain nested key/value structure for the
    /// requesting user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the payload cannot be built.
    fn serialize_episode(&self, episode: &Episode, user: &UserContext)
    -> Result<Value, StoreError>;
}
