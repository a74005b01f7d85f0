//! Conversation transforms.
//!
//! - [`flatten`]: reply tree to flat cast list plus threaded sections

pub mod flatten;

pub use flatten::{
    flatten, flatten_root, ConversationFlattener, ConversationSection, DepthMode, FlatCast,
    FlattenedConversation,
};
