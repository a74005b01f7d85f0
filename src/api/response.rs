//! Response envelopes and decoders.
//!
//! Every endpoint wraps its payload in a `result` object. List endpoints also
//! return an opaque `next.cursor` for the following page:
//!
//! ```json
//! { "result": [ { "hash": "0x1" } ], "next": { "cursor": "eyJwYWdlIjoyfQ" } }
//! ```
//!
//! The conversation endpoint nests the root cast (with its reply tree) under
//! `result.conversation.cast`.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::{Cast, Profile};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
    #[serde(default)]
    next: Option<NextPage>,
}

#[derive(Debug, Default, Deserialize)]
struct NextPage {
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConversationResult {
    conversation: Conversation,
}

#[derive(Debug, Deserialize)]
struct Conversation {
    #[serde(default)]
    cast: Option<Cast>,
}

/// One page of a cursor-paginated list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// Cursor for the next page; `None` on the last page.
    pub cursor: Option<String>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.cursor.is_some()
    }
}

/// Decodes a conversation response into its root cast.
///
/// A `null` or missing cast decodes to `Ok(None)`; the thread screen shows its
/// empty state for it.
///
/// # Errors
///
/// Returns [`crate::CastviewError::Decode`] if the body is not a conversation
/// envelope.
pub fn decode_conversation(body: &str) -> Result<Option<Cast>> {
    let _span = tracing::debug_span!("decode_conversation", bytes = body.len()).entered();

    let envelope: Envelope<ConversationResult> = serde_json::from_str(body)?;
    let cast = envelope.result.conversation.cast;

    tracing::debug!(
        root = cast.as_ref().map(|c| c.hash.as_str()),
        casts = cast.as_ref().map_or(0, Cast::count_casts),
        "conversation decoded"
    );
    Ok(cast)
}

/// Decodes a profile response.
///
/// # Errors
///
/// Returns [`crate::CastviewError::Decode`] if the body is not a profile
/// envelope.
pub fn decode_profile(body: &str) -> Result<Profile> {
    let _span = tracing::debug_span!("decode_profile", bytes = body.len()).entered();

    let envelope: Envelope<Profile> = serde_json::from_str(body)?;

    tracing::debug!(fid = envelope.result.fid, "profile decoded");
    Ok(envelope.result)
}

/// Decodes a page of casts (a user's casts, or their replies and recasts).
///
/// # Errors
///
/// Returns [`crate::CastviewError::Decode`] if the body is not a cast list
/// envelope.
pub fn decode_casts_page(body: &str) -> Result<Page<Cast>> {
    let _span = tracing::debug_span!("decode_casts_page", bytes = body.len()).entered();

    let envelope: Envelope<Vec<Cast>> = serde_json::from_str(body)?;
    let cursor = envelope
        .next
        .and_then(|next| next.cursor)
        .filter(|cursor| !cursor.is_empty());

    tracing::debug!(
        count = envelope.result.len(),
        has_more = cursor.is_some(),
        "cast page decoded"
    );
    Ok(Page {
        items: envelope.result,
        cursor,
    })
}
