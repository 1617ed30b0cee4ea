//! Tagged patient lists: definitions that filter episodes by tag name.
//!
//! A tagged list is declared by a tag and an optional subtag. The pair
//! yields the list slug (`tag` or `tag-subtag`), which is why the hyphen is
//! reserved as the separator and cannot appear inside either component.
//! Definitions are validated when built, before they can ever reach a
//! registry.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use wardlist_core::slug::{title_words, validate_component};
use wardlist_core::{ColumnSpec, CoreError, Slug, UserContext};
use wardlist_storage::{Episode, EpisodeStore, StoreError};

use crate::list::PatientList;

type VisibilityPredicate = Arc<dyn Fn(&UserContext) -> bool + Send + Sync>;

/// The tag filter carried by a tagged list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    /// Main tag name.
    pub tag: String,
    /// Optional subtag name, AND-combined with the tag when querying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtag: Option<String>,
}

impl TagFilter {
    /// Creates a filter on a single tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            subtag: None,
        }
    }

    /// Creates a filter on a tag/subtag pair.
    #[must_use]
    pub fn with_subtag(tag: impl Into<String>, subtag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            subtag: Some(subtag.into()),
        }
    }

    /// Slug form of the filter: `tag` or `tag-subtag`.
    #[must_use]
    pub fn slug(&self) -> Slug {
        match &self.subtag {
            Some(subtag) => format!("{}-{}", self.tag, subtag),
            None => self.tag.clone(),
        }
    }
}

/// A patient list defined by a validated tag filter.
///
/// Built through [`TaggedList::builder`]; the builder is the only way to
/// construct one, so an instance always carries valid names and a
/// non-empty schema.
pub struct TaggedList {
    filter: TagFilter,
    display_name: String,
    order: i32,
    direct_add: bool,
    template_name: Option<String>,
    restricted: Option<bool>,
    schema: Vec<ColumnSpec>,
    visible_when: Option<VisibilityPredicate>,
}

impl TaggedList {
    /// Starts a definition filtering on the given tag.
    #[must_use]
    pub fn builder(tag: impl Into<String>) -> TaggedListBuilder {
        TaggedListBuilder {
            tag: tag.into(),
            subtag: None,
            display_name: None,
            order: 0,
            direct_add: true,
            template_name: None,
            restricted: None,
            schema: Vec::new(),
            visible_when: None,
        }
    }
}

impl PatientList for TaggedList {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn schema(&self) -> &[ColumnSpec] {
        &self.schema
    }

    fn queryset(&self, store: &dyn EpisodeStore) -> Result<Vec<Episode>, StoreError> {
        store.tagged_episodes(&self.filter.tag, self.filter.subtag.as_deref())
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn direct_add(&self) -> bool {
        self.direct_add
    }

    fn slug(&self) -> Slug {
        self.filter.slug()
    }

    fn restricted(&self) -> bool {
        self.restricted
            .unwrap_or_else(|| self.schema.iter().any(|column| column.restricted))
    }

    fn visible_to(&self, user: &UserContext) -> bool {
        match &self.visible_when {
            Some(predicate) => predicate(user),
            None => user.profile.restricted_only == self.restricted(),
        }
    }

    fn template_name(&self) -> Option<&str> {
        self.template_name.as_deref()
    }

    fn tagging(&self) -> Option<&TagFilter> {
        Some(&self.filter)
    }
}

impl fmt::Debug for TaggedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggedList")
            .field("slug", &self.filter.slug())
            .field("display_name", &self.display_name)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TaggedList`] definitions.
pub struct TaggedListBuilder {
    tag: String,
    subtag: Option<String>,
    display_name: Option<String>,
    order: i32,
    direct_add: bool,
    template_name: Option<String>,
    restricted: Option<bool>,
    schema: Vec<ColumnSpec>,
    visible_when: Option<VisibilityPredicate>,
}

impl TaggedListBuilder {
    /// Narrows the filter to a subtag, AND-combined with the tag.
    #[must_use]
    pub fn subtag(mut self, subtag: impl Into<String>) -> Self {
        self.subtag = Some(subtag.into());
        self
    }

    /// Display name; defaults to the title-cased words of the slug.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sort key for global enumeration.
    #[must_use]
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Whether patients can be added to the list directly.
    #[must_use]
    pub fn direct_add(mut self, direct_add: bool) -> Self {
        self.direct_add = direct_add;
        self
    }

    /// Template override for rendering the list.
    #[must_use]
    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Forces the restricted flag instead of deriving it from the schema.
    #[must_use]
    pub fn restricted(mut self, restricted: bool) -> Self {
        self.restricted = Some(restricted);
        self
    }

    /// Replaces the column schema.
    #[must_use]
    pub fn schema(mut self, columns: Vec<ColumnSpec>) -> Self {
        self.schema = columns;
        self
    }

    /// Appends a single column to the schema.
    #[must_use]
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.schema.push(column);
        self
    }

    /// Replaces the default visibility policy with a custom predicate.
    #[must_use]
    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&UserContext) -> bool + Send + Sync + 'static,
    {
        self.visible_when = Some(Arc::new(predicate));
        self
    }

    /// Validates the definition and builds the list.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidName` if the tag or subtag contains
    /// anything but lowercase letters, digits or underscores, and
    /// `CoreError::MissingSchema` if no column was declared.
    pub fn build(self) -> Result<TaggedList, CoreError> {
        validate_component("tag", &self.tag)?;
        if let Some(subtag) = &self.subtag {
            validate_component("subtag", subtag)?;
        }

        let filter = TagFilter {
            tag: self.tag,
            subtag: self.subtag,
        };
        if self.schema.is_empty() {
            return Err(CoreError::missing_schema(filter.slug()));
        }

        let display_name = self
            .display_name
            .unwrap_or_else(|| title_words(&filter.slug()));
        Ok(TaggedList {
            filter,
            display_name,
            order: self.order,
            direct_add: self.direct_add,
            template_name: self.template_name,
            restricted: self.restricted,
            schema: self.schema,
            visible_when: self.visible_when,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use wardlist_storage::{EpisodeId, InMemoryEpisodeStore};

    use super::*;

    fn demographics() -> ColumnSpec {
        ColumnSpec::new("demographics")
    }

    #[test]
    fn test_slug_composition() {
        let list = TaggedList::builder("eater")
            .subtag("herbivore")
            .column(demographics())
            .build()
            .unwrap();
        assert_eq!(list.slug(), "eater-herbivore");
        assert_eq!(list.tagging().unwrap(), &TagFilter::with_subtag("eater", "herbivore"));

        let bare = TaggedList::builder("carnivore")
            .column(demographics())
            .build()
            .unwrap();
        assert_eq!(bare.slug(), "carnivore");
        assert_eq!(bare.tagging().unwrap(), &TagFilter::new("carnivore"));
    }

    #[test]
    fn test_display_name_defaults_to_slug_words() {
        let list = TaggedList::builder("eater")
            .subtag("herbivore")
            .column(demographics())
            .build()
            .unwrap();
        assert_eq!(list.display_name(), "Eater Herbivore");
    }

    #[test]
    fn test_hyphenated_tag_rejected() {
        let err = TaggedList::builder("foo-bar")
            .column(demographics())
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidName { .. }));
        assert!(err.to_string().contains("tag"));
    }

    #[test]
    fn test_hyphenated_subtag_rejected() {
        let err = TaggedList::builder("foo")
            .subtag("one-two")
            .column(demographics())
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidName { .. }));
        assert!(err.to_string().contains("subtag"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = TaggedList::builder("carnivore").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Patient list \"carnivore\" declares no schema columns"
        );
    }

    #[test]
    fn test_restricted_override_beats_schema() {
        let list = TaggedList::builder("legal")
            .restricted(true)
            .column(demographics())
            .build()
            .unwrap();
        assert!(list.restricted());
        assert!(list.visible_to(&UserContext::restricted("praxis")));
        assert!(!list.visible_to(&UserContext::new("nurse")));
    }

    #[test]
    fn test_visible_when_replaces_default_policy() {
        let list = TaggedList::builder("eater")
            .subtag("shh")
            .visible_when(|user| user.username == "show me")
            .column(demographics())
            .build()
            .unwrap();

        assert!(list.visible_to(&UserContext::new("show me")));
        assert!(!list.visible_to(&UserContext::new("nurse")));
    }

    #[test]
    fn test_template_name_override() {
        let list = TaggedList::builder("carnivore")
            .template_name("carnivore.html")
            .column(demographics())
            .build()
            .unwrap();
        assert_eq!(list.get_template_names(), vec!["carnivore.html"]);
    }

    struct FailingStore;

    impl EpisodeStore for FailingStore {
        fn tagged_episodes(
            &self,
            _tag: &str,
            _subtag: Option<&str>,
        ) -> Result<Vec<Episode>, StoreError> {
            Err(StoreError::backend("connection reset"))
        }

        fn episode(&self, _id: EpisodeId) -> Result<Option<Episode>, StoreError> {
            Err(StoreError::backend("connection reset"))
        }

        fn tag_names(&self, _id: EpisodeId) -> Result<Vec<String>, StoreError> {
            Err(StoreError::backend("connection reset"))
        }

        fn serialize_episode(
            &self,
            _episode: &Episode,
            _user: &UserContext,
        ) -> Result<Value, StoreError> {
            Err(StoreError::backend("connection reset"))
        }
    }

    #[test]
    fn test_store_errors_propagate_through_to_dict() {
        let list = TaggedList::builder("eater")
            .column(demographics())
            .build()
            .unwrap();

        let err = list
            .to_dict(&FailingStore, &UserContext::new("nurse"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Storage backend error: connection reset");
    }

    #[test]
    fn test_queryset_filters_by_tag_and_subtag() {
        let store = InMemoryEpisodeStore::new();
        let user = UserContext::new("hilda");
        let patient = store.create_patient();
        let tagged = store.create_episode(patient.id).unwrap();
        let _untagged = store.create_episode(patient.id).unwrap();
        store
            .set_tag_names(tagged.id, &["eater", "herbivore"], &user)
            .unwrap();

        let herbivores = TaggedList::builder("eater")
            .subtag("herbivore")
            .column(demographics())
            .build()
            .unwrap();
        let episodes = herbivores.queryset(&store).unwrap();
        assert_eq!(episodes, vec![tagged]);

        let carnivores = TaggedList::builder("carnivore")
            .column(demographics())
            .build()
            .unwrap();
        assert!(carnivores.queryset(&store).unwrap().is_empty());
    }
}
