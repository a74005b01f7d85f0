//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the host (a mobile shell, the CLI, or a test) and
//! the domain/api/ui layers. It owns no I/O: the host sends requests, pushes
//! screens, and reports back through events.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Input → Events → Event Handler → State Mutations → Actions → Host Effects
//!                           ↑                                  ↓
//!                           └──────── Fetch Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Request status, fetch targets, and profile tabs
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use castview::app::{handle_event, Event};
//! use castview::{initialize, Config};
//!
//! let mut state = initialize(&Config::default())?;
//! let (render, actions) = handle_event(&mut state, &Event::OpenProfile { fid: 3 })?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! assert!(state.profile_viewmodel(0).loading);
//! # Ok::<(), castview::CastviewError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FetchTarget, ProfileTab, RequestStatus};
pub use state::{AppState, CastList, ProfileState, ThreadDetailState};
