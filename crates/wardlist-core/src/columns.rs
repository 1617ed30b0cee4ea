//! Field-group (column) descriptors for list schemas.
//!
//! Every patient list declares an ordered schema of columns. The registry
//! never renders them; it only carries the descriptors through to the
//! rendering layer and uses the `restricted` flag to derive list-level
//! restriction.

use serde::{Deserialize, Serialize};

use crate::slug;

/// A single field group in a list schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Snake-cased identifier, derived from the declared name.
    pub name: String,

    /// Human title. Defaults to the title-cased words of `name`.
    pub title: String,

    /// Whether the column holds exactly one record per episode.
    #[serde(default)]
    pub single: bool,

    /// Icon hint for the rendering layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Maximum number of rows shown in list view, if capped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_limit: Option<u32>,

    /// Display template path, if the column overrides the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<String>,

    /// Detail template path, if the column overrides the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_template_path: Option<String>,

    /// Restricted-only columns make the whole list restricted by default.
    #[serde(default)]
    pub restricted: bool,
}

impl ColumnSpec {
    /// Creates a column descriptor from a declared name.
    ///
    /// The name is normalized (`"Demographics"` becomes `"demographics"`,
    /// `"TreatmentPlan"` becomes `"treatment_plan"`) and the title defaults
    /// to its title-cased words.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = slug::snake_case(&name.into());
        let title = slug::title_words(&name);
        Self {
            name,
            title,
            single: false,
            icon: None,
            list_limit: None,
            template_path: None,
            detail_template_path: None,
            restricted: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Marks the column as holding a single record per episode.
    #[must_use]
    pub fn singleton(mut self) -> Self {
        self.single = true;
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_template_path(mut self, path: impl Into<String>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_detail_template_path(mut self, path: impl Into<String>) -> Self {
        self.detail_template_path = Some(path.into());
        self
    }

    /// Marks the column as restricted; any restricted column makes the
    /// owning list restricted unless the list overrides the flag.
    #[must_use]
    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }
}
