pub mod columns;
pub mod error;
pub mod slug;
pub mod user;

pub use columns::ColumnSpec;
pub use error::{CoreError, ErrorCategory, Result};
pub use slug::Slug;
pub use user::{UserContext, UserProfile};
