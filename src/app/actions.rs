//! Actions representing side effects for the host to execute.
//!
//! The event handler never performs I/O or navigation. It returns a
//! `Vec<Action>` and the host executes each in order: sending a described
//! request and feeding the body back as a `*Loaded` event, or pushing a screen.
//!
//! # Example
//!
//! ```rust
//! use castview::app::{Action, FetchTarget};
//! use castview::api::{ApiClient, Endpoint, Session};
//!
//! let client = ApiClient::new("https://api.example.com/v2", Session::default())?;
//! let request = client.request(&Endpoint::Profile { fid: 3 })?;
//! let action = Action::Fetch { target: FetchTarget::Profile, request };
//! assert!(matches!(action, Action::Fetch { .. }));
//! # Ok::<(), castview::CastviewError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::api::ApiRequest;

use super::modes::FetchTarget;

/// Commands emitted by [`super::handle_event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Send `request`; report the outcome as the matching loaded or failed
    /// event for `target`.
    Fetch {
        target: FetchTarget,
        request: ApiRequest,
    },

    /// Push a thread detail screen for the cast.
    NavigateThread { hash: String },

    /// Push a profile screen for the user.
    NavigateProfile { fid: u64 },

    /// Push a channel screen.
    NavigateChannel { channel_id: String },
}
