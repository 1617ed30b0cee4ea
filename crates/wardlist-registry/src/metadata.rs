//! Metadata payloads consumed by the rendering layer.

use serde_json::{Value, json};
use wardlist_core::UserContext;

use crate::list::{ListRegistry, PatientList};

/// Points a client at the first list the user may open.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstListMetadata;

impl FirstListMetadata {
    /// Serializes to `{"first_list_slug": ...}`.
    ///
    /// The slug is the first visible list in global order, or the empty
    /// string when the user can see no list at all. Recomputed on every
    /// call from current registry state.
    #[must_use]
    pub fn to_dict(registry: &ListRegistry, user: &UserContext) -> Value {
        let slug = registry
            .for_user(user)
            .first()
            .map(|list| list.as_ref().slug())
            .unwrap_or_default();
        json!({ "first_list_slug": slug })
    }
}

/// Serializes the column descriptors of a list for template consumption.
///
/// Every descriptor carries the same keys; absent settings serialize as
/// null rather than being dropped.
#[must_use]
pub fn schema_context(list: &dyn PatientList) -> Vec<Value> {
    list.schema()
        .iter()
        .map(|column| {
            json!({
                "name": column.name,
                "title": column.title,
                "single": column.single,
                "icon": column.icon,
                "list_limit": column.list_limit,
                "template_path": column.template_path,
                "detail_template_path": column.detail_template_path,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_json_diff::assert_json_eq;
    use wardlist_core::ColumnSpec;

    use super::*;
    use crate::tagged::TaggedList;

    fn registry_with_one_list() -> ListRegistry {
        let ward = TaggedList::builder("respiratory")
            .display_name("Respiratory Ward")
            .order(2)
            .column(ColumnSpec::new("demographics"))
            .build()
            .unwrap();
        ListRegistry::builder().list(Arc::new(ward)).build().unwrap()
    }

    #[test]
    fn test_first_list_slug() {
        let registry = registry_with_one_list();
        let value = FirstListMetadata::to_dict(&registry, &UserContext::new("nurse"));
        assert_json_eq!(value, json!({ "first_list_slug": "respiratory" }));
    }

    #[test]
    fn test_first_list_slug_empty_when_nothing_visible() {
        let registry = registry_with_one_list();
        let value = FirstListMetadata::to_dict(&registry, &UserContext::restricted("praxis"));
        assert_json_eq!(value, json!({ "first_list_slug": "" }));
    }

    #[test]
    fn test_schema_context_carries_column_fields() {
        let list = TaggedList::builder("respiratory")
            .column(
                ColumnSpec::new("Demographics")
                    .singleton()
                    .with_icon("fa-user")
                    .with_list_limit(3),
            )
            .column(ColumnSpec::new("TreatmentPlan"))
            .build()
            .unwrap();

        let context = schema_context(&list);
        assert_json_eq!(
            context[0],
            json!({
                "name": "demographics",
                "title": "Demographics",
                "single": true,
                "icon": "fa-user",
                "list_limit": 3,
                "template_path": null,
                "detail_template_path": null,
            })
        );
        assert_eq!(context[1]["name"], "treatment_plan");
        assert_eq!(context[1]["title"], "Treatment Plan");
        assert_eq!(context[1]["icon"], Value::Null);
    }
}
