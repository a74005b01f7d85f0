//! Cast domain model.
//!
//! A cast is a single user-authored item in the feed: a top-level post, a reply,
//! or a quote. Casts arrive from the upstream API as JSON and may carry their
//! direct replies inline, which makes a fetched conversation an owned, acyclic
//! tree rooted at one cast.
//!
//! Field names follow the upstream camelCase payloads. Snake-case aliases are
//! accepted so fixtures written by hand read naturally.

use serde::{Deserialize, Serialize};

/// An image reference (avatar or embedded media).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// A counter object as returned by the API, e.g. `{"count": 3}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    #[serde(default)]
    pub count: u64,
}

/// The author of a cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Numeric user id.
    #[serde(default)]
    pub fid: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp: Option<Image>,
}

/// Media embedded in a cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embeds {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Where a top-level cast was posted, when it was posted into a channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentSource {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
}

/// A single cast, possibly carrying its direct replies.
///
/// Only `hash` is required in a payload; every other field defaults when
/// absent. `depth` is the distance from the conversation root as labelled by
/// the upstream source.
///
/// # Examples
///
/// ```
/// use castview::Cast;
///
/// let root = Cast::new("0xroot")
///     .with_text("gm")
///     .with_replies(vec![Cast::new("0xa"), Cast::new("0xb")]);
///
/// assert!(root.has_replies());
/// assert_eq!(root.count_casts(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cast {
    pub hash: String,

    #[serde(default, alias = "thread_hash")]
    pub thread_hash: Option<String>,

    /// Hash of the immediate parent. A back-reference only; the parent owns us.
    #[serde(default, alias = "parent_hash")]
    pub parent_hash: Option<String>,

    #[serde(default, alias = "parent_source")]
    pub parent_source: Option<ParentSource>,

    #[serde(default)]
    pub author: Author,

    #[serde(default)]
    pub text: String,

    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub timestamp: i64,

    #[serde(default)]
    pub depth: u32,

    #[serde(default)]
    pub embeds: Embeds,

    #[serde(default)]
    pub replies: Count,

    #[serde(default)]
    pub reactions: Count,

    #[serde(default)]
    pub recasts: Count,

    #[serde(default, alias = "direct_replies")]
    pub direct_replies: Vec<Cast>,
}

impl Cast {
    /// Creates a cast with the given hash and every other field empty.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    /// Attaches direct replies, setting each reply's `parent_hash` to this cast.
    #[must_use]
    pub fn with_replies(mut self, replies: Vec<Cast>) -> Self {
        self.direct_replies = replies
            .into_iter()
            .map(|mut reply| {
                reply.parent_hash = Some(self.hash.clone());
                reply
            })
            .collect();
        self
    }

    /// Returns `true` if the payload carried at least one direct reply.
    #[must_use]
    pub fn has_replies(&self) -> bool {
        !self.direct_replies.is_empty()
    }

    /// Returns `true` if this cast answers another cast.
    #[must_use]
    pub fn is_reply(&self) -> bool {
        self.parent_hash.is_some()
    }

    /// Counts this cast and every reply nested below it.
    #[must_use]
    pub fn count_casts(&self) -> usize {
        let mut stack = vec![self];
        let mut count = 0;
        while let Some(cast) = stack.pop() {
            count += 1;
            stack.extend(cast.direct_replies.iter());
        }
        count
    }

    /// URL of the first embedded image, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.embeds.images.first().map(|image| image.url.as_str())
    }

    /// Channel id derived from the parent source URL.
    ///
    /// Channel URLs end in the channel id (`https://warpcast.com/~/channel/rust`
    /// gives `rust`). Returns `None` for casts outside a channel.
    #[must_use]
    pub fn channel_id(&self) -> Option<&str> {
        let url = self.parent_source.as_ref()?.url.trim_end_matches('/');
        url.rsplit('/').next().filter(|segment| !segment.is_empty())
    }
}
