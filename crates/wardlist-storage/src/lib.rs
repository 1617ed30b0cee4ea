//! # wardlist-storage
//!
//! Episode/tag storage abstraction for the wardlist registry.
//!
//! Patient lists never own episode rows or tag rows; they query them through
//! the [`EpisodeStore`] trait defined here. The trait covers exactly what
//! the registry needs:
//!
//! - querying episodes by exact tag-name membership, optionally AND-combined
//!   with a subtag name,
//! - reading the tag names attached to an episode,
//! - serializing a single episode to a plain key/value structure for a
//!   requesting user.
//!
//! Writes (creating patients and episodes, setting tag names) belong to the
//! system that owns the records. [`InMemoryEpisodeStore`] provides them as
//! inherent methods and is the reference backend used by tests and demos.
//!
//! ## Example
//!
//! ```ignore
//! use wardlist_storage::{EpisodeStore, InMemoryEpisodeStore};
//! use wardlist_core::UserContext;
//!
//! let store = InMemoryEpisodeStore::new();
//! let user = UserContext::new("hilda");
//! let patient = store.create_patient();
//! let episode = store.create_episode(patient.id)?;
//! store.set_tag_names(episode.id, &["eater", "herbivore"], &user)?;
//!
//! let matching = store.tagged_episodes("eater", Some("herbivore"))?;
//! assert_eq!(matching.len(), 1);
//! ```

mod error;
mod memory;
mod traits;
mod types;

pub use error::StoreError;
pub use memory::InMemoryEpisodeStore;
pub use traits::EpisodeStore;
pub use types::{Episode, EpisodeId, Patient, PatientId};

/// Type alias for a storage result.
pub type StoreResult<T> = Result<T, StoreError>;

/// Type alias for a shared episode store trait object.
pub type DynEpisodeStore = std::sync::Arc<dyn EpisodeStore>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use wardlist_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::memory::InMemoryEpisodeStore;
    pub use crate::traits::EpisodeStore;
    pub use crate::types::{Episode, EpisodeId, Patient, PatientId};
    pub use crate::{DynEpisodeStore, StoreResult};
}
