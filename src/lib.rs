//! castview: the data core of a mobile social-feed client.
//!
//! castview turns upstream API payloads into what the thread and profile
//! screens display:
//! - Conversation flattening: a reply tree becomes a flat cast list plus
//!   header/replies sections with a nesting depth for every cast
//! - Sans-io request descriptions for the conversation, profile, and
//!   paginated profile-list endpoints
//! - Response decoding into owned domain types
//! - An event-driven state machine producing immutable view models

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (mobile shell, CLI in main.rs, tests)         │  ← I/O, navigation
//! └─────────────────────────────────────────────────────┘
//!                        │ Events ▲ Actions
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Fetch status tracking                            │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Conversation  │
//! │ (ui/)         │   │ (api/)        │   │ (conversation/)│
//! │ - View models │   │ - Endpoints   │   │ - Flattening  │
//! │ - Transforms  │   │ - Decoding    │   │ - Sections    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config and data paths (infrastructure/)          │
//! │  - Error types (domain/error)                       │
//! │  - Cast and profile models (domain/)                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans to a rotating JSON-lines file│
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Session, endpoints, request descriptions, response decoding
//! - [`app`]: Application state machine with event/action model
//! - [`conversation`]: Reply tree flattening
//! - [`domain`]: Core domain types (Cast, Profile, errors)
//! - [`infrastructure`]: Per-user paths
//! - [`ui`]: View models and cast transforms
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```toml
//! # ~/.config/castview/config.toml
//! api_base_url = "https://api.warpcast.com/v2"
//! token = "..."
//! fid = 3
//! reply_depth = 5
//! page_limit = 10
//! depth_mode = "recompute"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use castview::{flatten, Cast};
//!
//! let root = Cast::new("R").with_replies(vec![
//!     Cast::new("A").with_replies(vec![Cast::new("C")]),
//!     Cast::new("B"),
//! ]);
//! let roots = [root];
//! let conversation = flatten(&roots);
//!
//! let order: Vec<_> = conversation.casts.iter().map(|c| c.cast.hash.as_str()).collect();
//! assert_eq!(order, ["R", "A", "C", "B"]);
//! assert_eq!(conversation.sections.len(), 2);
//! ```

pub mod api;
pub mod app;
pub mod conversation;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ui;

pub use api::{ApiClient, Session};
pub use app::{handle_event, Action, AppState, Event, FetchTarget, ProfileTab, RequestStatus};
pub use conversation::{
    flatten, flatten_root, ConversationFlattener, ConversationSection, DepthMode, FlatCast,
    FlattenedConversation,
};
pub use domain::{Cast, CastviewError, Profile, Result};

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Runtime configuration, read from a TOML file.
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// # Example
///
/// ```rust
/// use castview::{Config, DepthMode};
///
/// let config = Config::from_toml_str("fid = 3\ndepth_mode = \"trust\"")?;
/// assert_eq!(config.fid, Some(3));
/// assert_eq!(config.depth_mode, DepthMode::Trust);
/// assert_eq!(config.reply_depth, 5);
/// # Ok::<(), castview::CastviewError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the endpoint paths are appended to.
    pub api_base_url: String,

    /// Bearer token; requests carry no `Authorization` header when empty.
    pub token: String,

    /// Fid of the signed-in user.
    pub fid: Option<u64>,

    /// Reply nesting requested with each conversation (1..=20).
    pub reply_depth: u32,

    /// Page size of the profile lists (1..=100).
    pub page_limit: u32,

    /// How conversation depth is assigned.
    pub depth_mode: DepthMode,

    /// Tracing filter, e.g. `"debug"` or `"castview=trace"`. `RUST_LOG` wins.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.warpcast.com/v2".to_string(),
            token: String::new(),
            fid: None,
            reply_depth: 5,
            page_limit: 10,
            depth_mode: DepthMode::Recompute,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CastviewError::Config`] for malformed TOML or values that fail
    /// [`Config::validate`].
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)
            .map_err(|e| CastviewError::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CastviewError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("load_config", path = %path.display()).entered();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges and the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`CastviewError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(1..=20).contains(&self.reply_depth) {
            return Err(CastviewError::Config(format!(
                "reply_depth must be within 1..=20, got {}",
                self.reply_depth
            )));
        }
        if !(1..=100).contains(&self.page_limit) {
            return Err(CastviewError::Config(format!(
                "page_limit must be within 1..=100, got {}",
                self.page_limit
            )));
        }
        api::parse_base_url(&self.api_base_url)?;
        Ok(())
    }

    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.token.clone(), self.fid)
    }

    #[must_use]
    pub const fn flattener(&self) -> ConversationFlattener {
        ConversationFlattener::new(self.depth_mode)
    }
}

/// Builds the application state from configuration.
///
/// Tracing is not installed here; hosts call
/// [`observability::init_tracing`] first if they want spans recorded.
///
/// # Errors
///
/// Returns [`CastviewError::Config`] if the configuration is invalid.
///
/// # Example
///
/// ```rust
/// use castview::{initialize, Config, RequestStatus};
///
/// let state = initialize(&Config::default())?;
/// assert_eq!(state.thread.status, RequestStatus::Idle);
/// # Ok::<(), castview::CastviewError>(())
/// ```
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!("initializing castview");
    config.validate()?;

    let client = ApiClient::new(&config.api_base_url, config.session())?;
    Ok(AppState::new(
        client,
        config.flattener(),
        config.reply_depth,
        config.page_limit,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_validate_ranges() {
        let config = Config {
            reply_depth: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CastviewError::Config(_))));

        let config = Config {
            page_limit: 101,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CastviewError::Config(_))));

        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CastviewError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            Config::from_toml_str("reply_depth = \"five\""),
            Err(CastviewError::Config(_))
        ));
    }

    #[test]
    fn test_initialize_carries_session() {
        let config = Config {
            token: "tok".to_string(),
            fid: Some(3),
            page_limit: 25,
            ..Config::default()
        };
        let state = initialize(&config).unwrap();

        assert!(state.client.session().is_current_user(3));
        assert_eq!(state.page_limit, 25);
    }
}
