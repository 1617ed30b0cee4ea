//! The user/profile collaborator surface.
//!
//! The registry only ever reads two things about a user: the username (for
//! custom visibility rules) and the profile's `restricted_only` flag (for
//! the default visibility policy). Authentication and profile storage live
//! outside this workspace.

use serde::{Deserialize, Serialize};

/// Per-user profile flags consulted by visibility checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Restricted-only users see only lists marked restricted.
    #[serde(default)]
    pub restricted_only: bool,
}

/// The requesting user, as seen by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub username: String,
    #[serde(default)]
    pub profile: UserProfile,
}

impl UserContext {
    /// An ordinary user with a default profile.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile: UserProfile::default(),
        }
    }

    /// A user whose profile is flagged restricted-only.
    #[must_use]
    pub fn restricted(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            profile: UserProfile {
                restricted_only: true,
            },
        }
    }
}
