//! Request status and screen mode types.
//!
//! Each fetch a screen performs moves through [`RequestStatus`]:
//!
//! ```text
//! Idle ──open──▶ Loading ──loaded──▶ Success
//!                   │  ▲
//!                failed │ retry
//!                   ▼  │
//!                  Error
//! ```
//!
//! [`FetchTarget`] names which fetch an event or action refers to, and
//! [`ProfileTab`] selects the list shown on the profile screen.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last response was decoded successfully.
    Success,
    /// The last request or decode failed; a retry is possible.
    Error,
}

impl RequestStatus {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// The fetches the screens perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchTarget {
    /// The thread screen's conversation tree.
    Conversation,
    /// The profile screen's profile.
    Profile,
    /// The profile's own casts (Threads tab).
    UserCasts,
    /// The profile's replies and recasts (Comments tab).
    Comments,
}

impl FetchTarget {
    /// Returns `true` for the cursor-paginated profile lists.
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::UserCasts | Self::Comments)
    }
}

/// Tabs of the profile screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileTab {
    #[default]
    Threads,
    Comments,
    About,
}

impl ProfileTab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Threads, Self::Comments, Self::About];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Threads => "Threads",
            Self::Comments => "Comments",
            Self::About => "About",
        }
    }
}
