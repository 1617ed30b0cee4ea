//! The patient list contract and the frozen list registry.
//!
//! A patient list is a named, ordered view over episodes. Implementations
//! provide a display name, a column schema and a queryset; everything else
//! (slug, ordering, visibility, templates, serialization) has a default
//! the implementation may override. Lists and groups are collected through
//! [`ListRegistryBuilder`] and frozen into an immutable [`ListRegistry`]
//! that is safe to share across threads.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use wardlist_core::slug::snake_case;
use wardlist_core::{ColumnSpec, CoreError, Slug, UserContext};
use wardlist_storage::{Episode, EpisodeStore, StoreError};

use crate::discoverable::{Discoverable, Registry};
use crate::group::ListGroup;
use crate::tagged::TagFilter;

/// Template rendered for a list when the definition names none.
pub const DEFAULT_LIST_TEMPLATE: &str = "patient_lists/spreadsheet_list.html";

// ============================================================================
// PatientList contract
// ============================================================================

/// A named, permission-filtered view over patient episodes.
///
/// `display_name`, `schema` and `queryset` are required; a definition
/// cannot exist without them. The remaining methods carry the default
/// policies and are overridable per implementation.
pub trait PatientList: Send + Sync {
    /// Human-readable name shown in navigation.
    fn display_name(&self) -> &str;

    /// Ordered column schema of the list.
    fn schema(&self) -> &[ColumnSpec];

    /// The episodes backing the list, in backend order.
    ///
    /// # Errors
    ///
    /// Propagates any `StoreError` from the episode store.
    fn queryset(&self, store: &dyn EpisodeStore) -> Result<Vec<Episode>, StoreError>;

    /// The episodes actually served, defaulting to [`queryset`].
    ///
    /// Override this to post-process the raw queryset (extra filtering,
    /// annotation) without losing access to the unprocessed one.
    ///
    /// # Errors
    ///
    /// Propagates any `StoreError` from the episode store.
    ///
    /// [`queryset`]: PatientList::queryset
    fn get_queryset(&self, store: &dyn EpisodeStore) -> Result<Vec<Episode>, StoreError> {
        self.queryset(store)
    }

    /// Sort key for global enumeration; ties keep registration order.
    fn order(&self) -> i32 {
        0
    }

    /// Whether patients can be added to the list directly.
    fn direct_add(&self) -> bool {
        true
    }

    /// Stable identifier; defaults to the snake-cased display name.
    fn slug(&self) -> Slug {
        snake_case(self.display_name())
    }

    /// Whether the list is restricted; defaults to true when any schema
    /// column is restricted.
    fn restricted(&self) -> bool {
        self.schema().iter().any(|column| column.restricted)
    }

    /// Whether the user may see the list.
    ///
    /// Default policy: restricted lists are visible only to restricted-only
    /// users, and unrestricted lists are hidden from them.
    fn visible_to(&self, user: &UserContext) -> bool {
        user.profile.restricted_only == self.restricted()
    }

    /// Template override, if the definition names one.
    fn template_name(&self) -> Option<&str> {
        None
    }

    /// Candidate template names, most specific first.
    fn get_template_names(&self) -> Vec<String> {
        match self.template_name() {
            Some(name) => vec![name.to_string()],
            None => vec![DEFAULT_LIST_TEMPLATE.to_string()],
        }
    }

    /// The tag filter, for lists defined by tagging.
    fn tagging(&self) -> Option<&TagFilter> {
        None
    }

    /// Serializes every episode of [`get_queryset`] for the user, in
    /// queryset order. Empty lists serialize to an empty array.
    ///
    /// # Errors
    ///
    /// Propagates any `StoreError` from the episode store.
    ///
    /// [`get_queryset`]: PatientList::get_queryset
    fn to_dict(&self, store: &dyn EpisodeStore, user: &UserContext) -> Result<Vec<Value>, StoreError> {
        let episodes = self.get_queryset(store)?;
        let mut serialized = Vec::with_capacity(episodes.len());
        for episode in &episodes {
            serialized.push(store.serialize_episode(episode, user)?);
        }
        Ok(serialized)
    }
}

impl Discoverable for Arc<dyn PatientList> {
    fn slug(&self) -> Slug {
        self.as_ref().slug()
    }

    fn display_name(&self) -> String {
        self.as_ref().display_name().to_string()
    }
}

// ============================================================================
// ListRegistry
// ============================================================================

/// Frozen collection of list and group definitions.
///
/// Built once through [`ListRegistryBuilder`]; immutable afterwards, so an
/// `Arc<ListRegistry>` can be shared across request-handling threads
/// without locking. Visibility filtering is recomputed on every call and
/// never cached.
pub struct ListRegistry {
    lists: Registry<Arc<dyn PatientList>>,
    groups: Registry<Arc<ListGroup>>,
    /// Lists sorted by `(order, discovery index)`.
    ordered: Vec<Arc<dyn PatientList>>,
}

impl ListRegistry {
    /// Starts collecting definitions for a new registry.
    #[must_use]
    pub fn builder() -> ListRegistryBuilder {
        ListRegistryBuilder::new()
    }

    /// Looks up a list by exact slug.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no list uses the slug.
    pub fn get(&self, slug: &str) -> Result<Arc<dyn PatientList>, CoreError> {
        self.lists.get(slug).map(Arc::clone)
    }

    /// All lists in global order: ascending `order()`, ties in
    /// registration order.
    #[must_use]
    pub fn lists(&self) -> &[Arc<dyn PatientList>] {
        &self.ordered
    }

    /// The lists the user may see, in global order.
    pub fn for_user(&self, user: &UserContext) -> Vec<Arc<dyn PatientList>> {
        self.ordered
            .iter()
            .filter(|list| list.visible_to(user))
            .map(Arc::clone)
            .collect()
    }

    /// The tagged lists, in global order.
    pub fn tagged_lists(&self) -> Vec<Arc<dyn PatientList>> {
        self.ordered
            .iter()
            .filter(|list| list.tagging().is_some())
            .map(Arc::clone)
            .collect()
    }

    /// Every distinct tag and subtag name used by the tagged lists.
    pub fn tag_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for list in &self.ordered {
            if let Some(filter) = list.tagging() {
                names.insert(filter.tag.clone());
                if let Some(subtag) = &filter.subtag {
                    names.insert(subtag.clone());
                }
            }
        }
        names
    }

    /// All groups in registration order.
    pub fn groups(&self) -> Vec<Arc<ListGroup>> {
        self.groups.iter().map(Arc::clone).collect()
    }

    /// Looks up a group by exact slug.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no group uses the slug.
    pub fn get_group(&self, slug: &str) -> Result<Arc<ListGroup>, CoreError> {
        self.groups.get(slug).map(Arc::clone)
    }

    /// The group containing the list, if any.
    ///
    /// A list may appear in several groups; the first group in
    /// registration order wins.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` if the slug does not name a
    /// registered list. That is caller misuse, distinct from a list that
    /// exists but belongs to no group (`Ok(None)`).
    pub fn group_for_list(&self, list_slug: &str) -> Result<Option<Arc<ListGroup>>, CoreError> {
        if !self.lists.contains(list_slug) {
            return Err(CoreError::invalid_argument(format!(
                "{list_slug:?} is not a registered patient list"
            )));
        }
        Ok(self
            .groups
            .iter()
            .find(|group| group.contains(list_slug))
            .map(Arc::clone))
    }

    /// Number of registered lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether the registry holds no lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}

impl fmt::Debug for ListRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRegistry")
            .field("lists", &self.lists.len())
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects list and group definitions and validates them into a frozen
/// [`ListRegistry`].
///
/// Registration is chainable and infallible; all validation happens in
/// [`build`](ListRegistryBuilder::build) so a definition error surfaces
/// once, at startup, with everything registered.
pub struct ListRegistryBuilder {
    lists: Vec<Arc<dyn PatientList>>,
    groups: Vec<ListGroup>,
}

impl ListRegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lists: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Adds a list definition.
    #[must_use]
    pub fn list(mut self, list: Arc<dyn PatientList>) -> Self {
        self.lists.push(list);
        self
    }

    /// Adds a group definition.
    #[must_use]
    pub fn group(mut self, group: ListGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Validates every definition and freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidName` for a malformed list or group slug,
    /// `CoreError::DuplicateSlug` when two lists (or two groups) share a
    /// slug, and `CoreError::NotFound` when a group member is not itself a
    /// registered list.
    pub fn build(self) -> Result<ListRegistry, CoreError> {
        let mut lists = Registry::new("patient list");
        for list in self.lists {
            lists.insert(list)?;
        }

        let mut groups = Registry::new("list group");
        for group in self.groups {
            for member in group.member_lists() {
                lists.get(&member.slug())?;
            }
            groups.insert(Arc::new(group))?;
        }

        let mut ordered: Vec<Arc<dyn PatientList>> = lists.iter().map(Arc::clone).collect();
        ordered.sort_by_key(|list| list.as_ref().order());

        info!(
            lists = ordered.len(),
            groups = groups.len(),
            "Patient list registry built"
        );
        Ok(ListRegistry {
            lists,
            groups,
            ordered,
        })
    }
}

impl Default for ListRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
