//! View model types representing renderable screen state.
//!
//! View models are immutable, display-ready records computed from application
//! state. They carry no behaviour; a host renderer reads them field by field.
//! All of them serialize, so a host on the other side of an FFI or IPC
//! boundary can receive them as JSON.
//!
//! # Example
//!
//! ```rust
//! use castview::ui::viewmodel::{CastView, CommentView};
//!
//! let reply = CommentView {
//!     cast: CastView {
//!         hash: "0x2".to_string(),
//!         header_title: "Alice".to_string(),
//!         header_subtitle: "@alice".to_string(),
//!         content: "agreed".to_string(),
//!         ..CastView::default()
//!     },
//!     indent_level: 1,
//!     quote: None,
//! };
//! assert_eq!(reply.indent_level, 1);
//! ```

use serde::Serialize;

/// Display fields for a single cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CastView {
    pub hash: String,
    pub author_fid: u64,

    /// Display name, or the channel name for channel feed items.
    pub header_title: String,

    /// `@username`.
    pub header_subtitle: String,

    /// Avatar URL; empty when the author has none.
    pub header_img: String,

    /// Relative age, e.g. `"5m"` or `"just now"`.
    pub post_time: String,

    pub content: String,

    /// First embedded image.
    pub image: Option<String>,

    pub upvotes_count: u64,
    pub comments_count: u64,
    pub quotes_count: u64,

    /// Channel id, or empty for casts outside a channel.
    pub channel: String,
}

/// A cast rendered as a threaded comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub cast: CastView,

    /// Nesting depth within the conversation.
    pub indent_level: u32,

    /// Quoted text shown above a section header.
    pub quote: Option<String>,
}

/// A section header comment followed by its direct replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub header: CommentView,
    pub items: Vec<CommentView>,

    /// Index of the header within [`ThreadDetailViewModel::ancestors`].
    pub root_index: usize,
}

/// Message shown when a screen has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Everything the thread detail screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThreadDetailViewModel {
    /// A fetch is in flight; render a placeholder.
    pub loading: bool,

    /// The root cast, shown in the list header.
    pub header: Option<CastView>,

    /// Every cast of the conversation in flattened order.
    pub ancestors: Vec<CastView>,

    pub sections: Vec<SectionView>,

    pub empty_state: Option<EmptyState>,

    /// The last fetch failed; offer a retry.
    pub retry: bool,
}

/// Profile summary shown above the tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileHeaderView {
    pub fid: u64,
    pub title: String,
    pub subtitle: String,
    pub avatar: String,
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
}

/// One tab of the profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub label: String,
    pub selected: bool,
}

/// Everything the profile screen renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileViewModel {
    pub loading: bool,
    pub retry: bool,
    pub empty_state: Option<EmptyState>,

    pub header: Option<ProfileHeaderView>,
    pub is_logged_user: bool,
    pub tabs: Vec<TabView>,

    /// A list fetch for the profile tabs is in flight.
    pub list_loading: bool,

    /// A list fetch for the profile tabs failed.
    pub list_retry: bool,

    /// Items of the selected tab; empty for the About tab.
    pub items: Vec<CastView>,

    /// Bio text, set when the About tab is selected.
    pub about: Option<String>,
}
