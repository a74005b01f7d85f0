//! Domain layer for castview.
//!
//! This module holds the core types decoded from the upstream feed API,
//! independent of request building, screen state, or presentation.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`cast`]: Cast model and its nested reply tree
//! - [`profile`]: Profile model
//!
//! # Examples
//!
//! ```
//! use castview::domain::{Cast, Result};
//!
//! fn parse(body: &str) -> Result<Cast> {
//!     Ok(serde_json::from_str(body)?)
//! }
//!
//! assert_eq!(parse(r#"{"hash": "0x1"}"#).unwrap().hash, "0x1");
//! ```

pub mod cast;
pub mod error;
pub mod profile;

pub use cast::{Author, Cast, Count, Embeds, Image, ParentSource};
pub use error::{CastviewError, Result};
pub use profile::Profile;
