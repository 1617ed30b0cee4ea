//! Tabbed list groups: ordered collections of lists rendered together.
//!
//! A group never carries its own visibility rule. It is visible exactly
//! when at least one member is, so an empty filter result hides the whole
//! tab strip for that user.

use std::fmt;
use std::sync::Arc;

use wardlist_core::slug::snake_case;
use wardlist_core::{Slug, UserContext};

use crate::discoverable::Discoverable;
use crate::list::PatientList;

/// Template rendered for a group when the definition names none.
pub const DEFAULT_GROUP_TEMPLATE: &str = "patient_lists/tabbed_list_group.html";

/// An ordered collection of patient lists shown as one tabbed view.
pub struct ListGroup {
    slug: Slug,
    display_name: String,
    template_name: Option<String>,
    members: Vec<Arc<dyn PatientList>>,
}

impl ListGroup {
    /// Starts a group definition with the given display name.
    ///
    /// The slug is the snake-cased name; it is validated when the group is
    /// registered.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ListGroupBuilder {
        ListGroupBuilder {
            name: name.into(),
            template_name: None,
            members: Vec::new(),
        }
    }

    /// Stable identifier of the group.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Human-readable name of the group.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Member lists in declared order, unfiltered.
    #[must_use]
    pub fn member_lists(&self) -> &[Arc<dyn PatientList>] {
        &self.members
    }

    /// The member lists the user may see, declared order preserved.
    pub fn member_lists_for_user(&self, user: &UserContext) -> Vec<Arc<dyn PatientList>> {
        self.members
            .iter()
            .filter(|list| list.visible_to(user))
            .map(Arc::clone)
            .collect()
    }

    /// Whether the user may see the group: true iff any member is visible.
    pub fn visible_to(&self, user: &UserContext) -> bool {
        self.members.iter().any(|list| list.visible_to(user))
    }

    /// Whether the group contains a list registered under the slug.
    #[must_use]
    pub fn contains(&self, list_slug: &str) -> bool {
        self.members.iter().any(|list| list.slug() == list_slug)
    }

    /// Candidate template names, most specific first.
    #[must_use]
    pub fn get_template_names(&self) -> Vec<String> {
        match &self.template_name {
            Some(name) => vec![name.clone()],
            None => vec![DEFAULT_GROUP_TEMPLATE.to_string()],
        }
    }
}

impl Discoverable for Arc<ListGroup> {
    fn slug(&self) -> Slug {
        self.as_ref().slug().to_string()
    }

    fn display_name(&self) -> String {
        self.as_ref().display_name().to_string()
    }
}

impl fmt::Debug for ListGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListGroup")
            .field("slug", &self.slug)
            .field("display_name", &self.display_name)
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ListGroup`] definitions.
pub struct ListGroupBuilder {
    name: String,
    template_name: Option<String>,
    members: Vec<Arc<dyn PatientList>>,
}

impl ListGroupBuilder {
    /// Appends a member list; declared order is preserved exactly.
    #[must_use]
    pub fn member(mut self, list: Arc<dyn PatientList>) -> Self {
        self.members.push(list);
        self
    }

    /// Template override for rendering the group.
    #[must_use]
    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Builds the group.
    #[must_use]
    pub fn build(self) -> ListGroup {
        ListGroup {
            slug: snake_case(&self.name),
            display_name: self.name,
            template_name: self.template_name,
            members: self.members,
        }
    }
}
