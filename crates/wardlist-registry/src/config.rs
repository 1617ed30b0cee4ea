//! Declarative list definitions loaded from TOML.
//!
//! List definitions are static configuration, so deployments that do not
//! need custom Rust implementations can declare tagged lists and groups in
//! a TOML document. Column names resolve against a caller-supplied
//! [`ColumnCatalog`]; custom visibility predicates are code-only and cannot
//! be declared here.
//!
//! ```toml
//! [[lists]]
//! tag = "eater"
//! subtag = "herbivore"
//! display_name = "Herbivores"
//! order = 4
//! columns = ["demographics"]
//!
//! [[groups]]
//! name = "Eater Group"
//! members = ["eater-herbivore"]
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use wardlist_core::{ColumnSpec, CoreError};

use crate::group::ListGroup;
use crate::list::{ListRegistry, PatientList};
use crate::tagged::TaggedList;

/// Named column descriptors that TOML definitions resolve against.
#[derive(Debug, Clone, Default)]
pub struct ColumnCatalog {
    columns: IndexMap<String, ColumnSpec>,
}

impl ColumnCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
        }
    }

    /// Registers a column under its normalized name; a later column with
    /// the same name replaces the earlier one.
    #[must_use]
    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.insert(column.name.clone(), column);
        self
    }

    /// Looks up a column by normalized name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for a name the catalog does not hold.
    pub fn get(&self, name: &str) -> Result<&ColumnSpec, CoreError> {
        self.columns
            .get(name)
            .ok_or_else(|| CoreError::not_found("column", name))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryDoc {
    #[serde(default)]
    lists: Vec<ListDoc>,
    #[serde(default)]
    groups: Vec<GroupDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListDoc {
    tag: String,
    subtag: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    order: i32,
    #[serde(default = "default_direct_add")]
    direct_add: bool,
    template_name: Option<String>,
    restricted: Option<bool>,
    columns: Vec<String>,
}

fn default_direct_add() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GroupDoc {
    name: String,
    template_name: Option<String>,
    members: Vec<String>,
}

/// Parses a TOML document and builds a frozen registry from it.
///
/// # Errors
///
/// Returns `CoreError::Config` when the document does not parse or has an
/// unexpected shape, `CoreError::NotFound` for a column name missing from
/// the catalog or a group member that names no declared list, and any
/// definition error from the builders (`InvalidName`, `DuplicateSlug`,
/// `MissingSchema`).
pub fn load_registry(document: &str, catalog: &ColumnCatalog) -> Result<ListRegistry, CoreError> {
    let doc: RegistryDoc =
        toml::from_str(document).map_err(|err| CoreError::config(err.to_string()))?;

    let mut builder = ListRegistry::builder();
    let mut declared: IndexMap<String, Arc<dyn PatientList>> = IndexMap::new();
    for list_doc in doc.lists {
        let list = Arc::new(build_list(list_doc, catalog)?);
        declared.insert(list.as_ref().slug(), list.clone());
        builder = builder.list(list);
    }

    for group_doc in doc.groups {
        let mut group = ListGroup::builder(group_doc.name);
        if let Some(template) = group_doc.template_name {
            group = group.template_name(template);
        }
        for member in &group_doc.members {
            let list = declared
                .get(member)
                .ok_or_else(|| CoreError::not_found("patient list", member))?;
            group = group.member(list.clone());
        }
        builder = builder.group(group.build());
    }

    builder.build()
}

fn build_list(doc: ListDoc, catalog: &ColumnCatalog) -> Result<TaggedList, CoreError> {
    let mut builder = TaggedList::builder(doc.tag)
        .order(doc.order)
        .direct_add(doc.direct_add);
    if let Some(subtag) = doc.subtag {
        builder = builder.subtag(subtag);
    }
    if let Some(name) = doc.display_name {
        builder = builder.display_name(name);
    }
    if let Some(template) = doc.template_name {
        builder = builder.template_name(template);
    }
    if let Some(restricted) = doc.restricted {
        builder = builder.restricted(restricted);
    }

    let mut columns = Vec::with_capacity(doc.columns.len());
    for name in &doc.columns {
        columns.push(catalog.get(name)?.clone());
    }
    builder.schema(columns).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ColumnCatalog {
        ColumnCatalog::new()
            .column(ColumnSpec::new("demographics"))
            .column(ColumnSpec::new("diagnosis"))
    }

    const MENAGERIE: &str = r#"
        [[lists]]
        tag = "carnivore"
        display_name = "Carnivores"
        order = 1
        direct_add = false
        template_name = "carnivore.html"
        columns = ["demographics"]

        [[lists]]
        tag = "eater"
        subtag = "herbivore"
        display_name = "Herbivores"
        order = 4
        columns = ["demographics", "diagnosis"]

        [[groups]]
        name = "Eater Group"
        members = ["eater-herbivore"]
    "#;

    #[test]
    fn test_load_registry() {
        let registry = load_registry(MENAGERIE, &catalog()).unwrap();

        let slugs: Vec<_> = registry.lists().iter().map(|l| l.as_ref().slug()).collect();
        assert_eq!(slugs, vec!["carnivore", "eater-herbivore"]);

        let carnivores = registry.get("carnivore").unwrap();
        assert!(!carnivores.direct_add());
        assert_eq!(carnivores.get_template_names(), vec!["carnivore.html"]);

        let herbivores = registry.get("eater-herbivore").unwrap();
        assert_eq!(herbivores.schema().len(), 2);

        let group = registry.group_for_list("eater-herbivore").unwrap().unwrap();
        assert_eq!(group.slug(), "eater_group");
    }

    #[test]
    fn test_unknown_column_rejected() {
        let document = r#"
            [[lists]]
            tag = "carnivore"
            columns = ["no_such_column"]
        "#;
        let err = load_registry(document, &catalog()).unwrap_err();
        assert_eq!(err.to_string(), "column not found: no_such_column");
    }

    #[test]
    fn test_unknown_group_member_rejected() {
        let document = r#"
            [[groups]]
            name = "Ghosts"
            members = ["nobody"]
        "#;
        let err = load_registry(document, &catalog()).unwrap_err();
        assert_eq!(err.to_string(), "patient list not found: nobody");
    }

    #[test]
    fn test_malformed_document_rejected() {
        let err = load_registry("lists = 3", &catalog()).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let document = r#"
            [[lists]]
            tag = "carnivore"
            colour = "red"
            columns = ["demographics"]
        "#;
        let err = load_registry(document, &catalog()).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn test_duplicate_list_slug_rejected() {
        let document = r#"
            [[lists]]
            tag = "carnivore"
            columns = ["demographics"]

            [[lists]]
            tag = "carnivore"
            columns = ["diagnosis"]
        "#;
        let err = load_registry(document, &catalog()).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_invalid_tag_rejected() {
        let document = r#"
            [[lists]]
            tag = "foo-bar"
            columns = ["demographics"]
        "#;
        let err = load_registry(document, &catalog()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidName { .. }));
    }
}
