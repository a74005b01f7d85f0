//! Transforms from domain casts to view models.
//!
//! These are pure functions of their input and the current time, so screens can
//! recompute them on every build.

use crate::conversation::{ConversationSection, FlatCast, FlattenedConversation};
use crate::domain::Cast;

use super::viewmodel::{CastView, CommentView, SectionView, ThreadDetailViewModel};

const MILLIS_PER_SECOND: i64 = 1000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;
const SECONDS_PER_WEEK: i64 = 604_800;

/// Formats how long ago `timestamp_ms` was, relative to `now_ms`.
///
/// - under a minute (or in the future): `"just now"`
/// - under an hour: `"5m"`
/// - under a day: `"3h"`
/// - under a week: `"2d"`
/// - otherwise: `"4w"`
///
/// # Examples
///
/// ```
/// use castview::ui::relative_time;
///
/// let now = 1_700_000_000_000;
/// assert_eq!(relative_time(now - 30_000, now), "just now");
/// assert_eq!(relative_time(now - 5 * 60_000, now), "5m");
/// ```
#[must_use]
pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms) / MILLIS_PER_SECOND;

    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h", diff / SECONDS_PER_HOUR)
    } else if diff < SECONDS_PER_WEEK {
        format!("{}d", diff / SECONDS_PER_DAY)
    } else {
        format!("{}w", diff / SECONDS_PER_WEEK)
    }
}

/// Current time in milliseconds since the Unix epoch.
///
/// The `now_ms` argument hosts pass to the transforms and view model builders.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Maps a cast to its display fields.
#[must_use]
pub fn transform_cast(cast: &Cast, now_ms: i64) -> CastView {
    let author = &cast.author;
    let subtitle = format!("@{}", author.username);
    let title = author
        .display_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map_or_else(|| subtitle.clone(), str::to_string);

    CastView {
        hash: cast.hash.clone(),
        author_fid: author.fid,
        header_title: title,
        header_subtitle: subtitle,
        header_img: author.pfp.as_ref().map(|pfp| pfp.url.clone()).unwrap_or_default(),
        post_time: relative_time(cast.timestamp, now_ms),
        content: cast.text.clone(),
        image: cast.first_image().map(str::to_string),
        upvotes_count: cast.reactions.count,
        comments_count: cast.replies.count,
        quotes_count: cast.recasts.count,
        channel: cast.channel_id().unwrap_or_default().to_string(),
    }
}

/// Maps one of a profile's own casts to its display fields.
#[must_use]
pub fn transform_user_cast(cast: &Cast, now_ms: i64) -> CastView {
    transform_cast(cast, now_ms)
}

/// Maps a reply or recast from a profile's comment feed.
///
/// Items posted into a channel are titled with the channel name.
#[must_use]
pub fn transform_feed_item(cast: &Cast, now_ms: i64) -> CastView {
    let mut view = transform_cast(cast, now_ms);
    if !view.channel.is_empty() {
        view.header_title = view.channel.clone();
    }
    view
}

fn comment_view(flat: FlatCast<'_>, quote: Option<String>, now_ms: i64) -> CommentView {
    CommentView {
        cast: transform_cast(flat.cast, now_ms),
        indent_level: flat.depth,
        quote,
    }
}

fn section_view(
    conversation: &FlattenedConversation<'_>,
    section: &ConversationSection<'_>,
    now_ms: i64,
) -> SectionView {
    let quote = conversation.quote_for(section).map(str::to_string);
    SectionView {
        header: comment_view(section.header, quote, now_ms),
        items: section
            .items
            .iter()
            .map(|&item| comment_view(item, None, now_ms))
            .collect(),
        root_index: section.root_index,
    }
}

/// Builds the thread screen's view model from a flattened conversation.
///
/// The caller handles the loading and empty cases; this assumes a root exists.
#[must_use]
pub fn build_thread_viewmodel(
    conversation: &FlattenedConversation<'_>,
    now_ms: i64,
) -> ThreadDetailViewModel {
    let _span = tracing::debug_span!("build_thread_viewmodel",
        casts = conversation.len(),
        sections = conversation.sections.len()
    )
    .entered();

    ThreadDetailViewModel {
        loading: false,
        header: conversation.root().map(|root| transform_cast(root, now_ms)),
        ancestors: conversation
            .casts
            .iter()
            .map(|flat| transform_cast(flat.cast, now_ms))
            .collect(),
        sections: conversation
            .sections
            .iter()
            .map(|section| section_view(conversation, section, now_ms))
            .collect(),
        empty_state: None,
        retry: false,
    }
}
