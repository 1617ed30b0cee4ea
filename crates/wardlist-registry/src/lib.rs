//! # wardlist-registry
//!
//! Discoverable, permission-filtered registry of patient list definitions.
//!
//! Clinicians view patients through named lists that filter and group
//! episodes by tag. This crate holds the definition side of that feature:
//!
//! - [`PatientList`]: the list contract (name, schema, queryset, ordering,
//!   visibility, templates),
//! - [`TaggedList`]: lists declared by a validated tag/subtag pair,
//! - [`ListGroup`]: ordered collections of lists rendered as one tabbed
//!   view, visible when any member is,
//! - [`ListRegistry`]: the frozen, slug-keyed collection of all of the
//!   above, built once at startup and shared across threads,
//! - [`FirstListMetadata`] and [`schema_context`]: serialized payloads for
//!   the rendering layer,
//! - [`load_registry`]: tagged lists and groups declared in TOML.
//!
//! Episodes themselves are reached through the `EpisodeStore` seam of
//! `wardlist-storage`; this crate performs no I/O of its own.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use wardlist_core::{ColumnSpec, UserContext};
//! use wardlist_registry::{ListRegistry, PatientList, TaggedList};
//!
//! # fn main() -> Result<(), wardlist_core::CoreError> {
//! let ward = TaggedList::builder("respiratory")
//!     .display_name("Respiratory Ward")
//!     .column(ColumnSpec::new("Demographics"))
//!     .build()?;
//!
//! let registry = ListRegistry::builder().list(Arc::new(ward)).build()?;
//!
//! let nurse = UserContext::new("nurse");
//! assert_eq!(registry.for_user(&nurse).len(), 1);
//! assert_eq!(registry.get("respiratory")?.display_name(), "Respiratory Ward");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discoverable;
pub mod group;
pub mod list;
pub mod metadata;
pub mod tagged;

pub use config::{ColumnCatalog, load_registry};
pub use discoverable::{Discoverable, Registry};
pub use group::{DEFAULT_GROUP_TEMPLATE, ListGroup, ListGroupBuilder};
pub use list::{DEFAULT_LIST_TEMPLATE, ListRegistry, ListRegistryBuilder, PatientList};
pub use metadata::{FirstListMetadata, schema_context};
pub use tagged::{TagFilter, TaggedList, TaggedListBuilder};

/// Prelude module for convenient imports.
///
/// ```ignore
/// use wardlist_registry::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ColumnCatalog, load_registry};
    pub use crate::discoverable::{Discoverable, Registry};
    pub use crate::group::{DEFAULT_GROUP_TEMPLATE, ListGroup, ListGroupBuilder};
    pub use crate::list::{DEFAULT_LIST_TEMPLATE, ListRegistry, ListRegistryBuilder, PatientList};
    pub use crate::metadata::{FirstListMetadata, schema_context};
    pub use crate::tagged::{TagFilter, TaggedList, TaggedListBuilder};
}
