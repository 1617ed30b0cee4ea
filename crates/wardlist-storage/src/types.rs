//! Episode and patient identities as the registry sees them.
//!
//! These are deliberately thin: the clinical record proper lives in the
//! owning system, and lists only need stable identifiers, a category and
//! the admission window for ordering and serialization.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identifier of an episode within the episode store.
pub type EpisodeId = u64;

/// Identifier of a patient within the episode store.
pub type PatientId = u64;

/// A patient known to the episode store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
}

/// A clinical encounter record.
///
/// One patient may have many episodes; tags attach to episodes, not
/// patients, which is what makes tag-driven lists episode-level views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub patient_id: PatientId,

    /// Episode category, e.g. `"inpatient"`.
    pub category: String,

    /// Start of the episode (admission), if known.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start: Option<OffsetDateTime>,

    /// End of the episode (discharge), if known.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
}

impl Episode {
    /// Creates a new episode with the default `"inpatient"` category and an
    /// open admission window.
    #[must_use]
    pub fn new(id: EpisodeId, patient_id: PatientId) -> Self {
        Self {
            id,
            patient_id,
            category: "inpatient".to_string(),
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: OffsetDateTime) -> Self {
        self.start = Some(start);
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: OffsetDateTime) -> Self {
        self.end = Some(end);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_episode_defaults() {
        let episode = Episode::new(1, 1);
        assert_eq!(episode.category, "inpatient");
        assert!(episode.start.is_none());
        assert!(episode.end.is_none());
    }

    #[test]
    fn test_episode_builders() {
        let episode = Episode::new(2, 1)
            .with_category("outpatient")
            .with_start(datetime!(2024-03-01 09:00 UTC));
        assert_eq!(episode.category, "outpatient");
        assert!(episode.start.is_some());
    }

    #[test]
    fn test_episode_serializes_dates_as_rfc3339() {
        let episode = Episode::new(3, 1).with_start(datetime!(2024-03-01 09:00 UTC));
        let json = serde_json::to_value(&episode).unwrap();
        assert_eq!(json["start"], "2024-03-01T09:00:00Z");
        assert_eq!(json["end"], serde_json::Value::Null);
    }
}
