//! Generic slug-keyed registry with explicit registration.
//!
//! Definitions are registered one by one and looked up by slug. The backing
//! map is insertion-ordered, so the registration position doubles as the
//! discovery index and enumeration is deterministic across runs. There is
//! no implicit discovery: whatever is not registered does not exist.

use indexmap::IndexMap;
use tracing::debug;
use wardlist_core::slug::validate_slug;
use wardlist_core::{CoreError, Slug};

/// A definition that can live in a [`Registry`].
pub trait Discoverable {
    /// Stable identifier used for registration and lookup.
    fn slug(&self) -> Slug;

    /// Human-readable name.
    fn display_name(&self) -> String;
}

/// Insertion-ordered registry of discoverable definitions.
///
/// The `kind` label names the definition family in error messages and log
/// lines (`"patient list"`, `"list group"`).
pub struct Registry<T> {
    kind: &'static str,
    entries: IndexMap<Slug, T>,
}

impl<T: Discoverable> Registry<T> {
    /// Creates an empty registry for the given definition kind.
    #[must_use]
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// Registers a definition under its slug.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidName` if the slug violates the naming
    /// rules, and `CoreError::DuplicateSlug` if an earlier registration
    /// already uses the slug. The earlier entry is never displaced.
    pub fn insert(&mut self, entry: T) -> Result<(), CoreError> {
        let slug = entry.slug();
        validate_slug(self.kind, &slug)?;
        if self.entries.contains_key(&slug) {
            return Err(CoreError::duplicate_slug(self.kind, slug));
        }
        debug!(kind = self.kind, slug = %slug, "Registered definition");
        self.entries.insert(slug, entry);
        Ok(())
    }

    /// Looks up a definition by exact slug.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no definition uses the slug.
    pub fn get(&self, slug: &str) -> Result<&T, CoreError> {
        self.entries
            .get(slug)
            .ok_or_else(|| CoreError::not_found(self.kind, slug))
    }

    /// Whether a definition is registered under the slug.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    /// Iterates definitions in discovery (registration) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Definition {
        slug: &'static str,
        name: &'static str,
    }

    impl Discoverable for Definition {
        fn slug(&self) -> Slug {
            self.slug.to_string()
        }

        fn display_name(&self) -> String {
            self.name.to_string()
        }
    }

    fn registry() -> Registry<Definition> {
        Registry::new("definition")
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = registry();
        registry
            .insert(Definition {
                slug: "ward_round",
                name: "Ward Round",
            })
            .unwrap();

        assert_eq!(registry.get("ward_round").unwrap().display_name(), "Ward Round");
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_get_unknown_slug() {
        let registry = registry();
        let err = registry.get("missing").unwrap_err();
        assert_eq!(err.to_string(), "definition not found: missing");
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut registry = registry();
        registry
            .insert(Definition {
                slug: "takers",
                name: "First",
            })
            .unwrap();
        let err = registry
            .insert(Definition {
                slug: "takers",
                name: "Second",
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::DuplicateSlug { .. }));
        assert_eq!(registry.get("takers").unwrap().display_name(), "First");
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let mut registry = registry();
        let err = registry
            .insert(Definition {
                slug: "Ward Round",
                name: "Ward Round",
            })
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidName { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_tagged_slug_accepted() {
        // A hyphen separates slug components; each side obeys the rules.
        let mut registry = registry();
        registry
            .insert(Definition {
                slug: "eater-herbivore",
                name: "Herbivores",
            })
            .unwrap();
        assert!(registry.contains("eater-herbivore"));
    }

    #[test]
    fn test_iteration_in_registration_order() {
        let mut registry = registry();
        for slug in ["zebra", "aardvark", "mongoose"] {
            registry.insert(Definition { slug, name: slug }).unwrap();
        }

        let slugs: Vec<_> = registry.iter().map(Discoverable::slug).collect();
        assert_eq!(slugs, vec!["zebra", "aardvark", "mongoose"]);
    }
}
