//! Presentation-facing layer.
//!
//! castview does not draw anything. This layer turns domain data into view
//! models that a host renderer consumes.
//!
//! # Modules
//!
//! - [`viewmodel`]: Immutable display records for each screen
//! - [`transform`]: Cast-to-view transforms and relative time formatting

pub mod transform;
pub mod viewmodel;

pub use transform::{
    build_thread_viewmodel, now_millis, relative_time, transform_cast, transform_feed_item,
    transform_user_cast,
};
pub use viewmodel::{
    CastView, CommentView, EmptyState, ProfileHeaderView, ProfileViewModel, SectionView, TabView,
    ThreadDetailViewModel,
};
