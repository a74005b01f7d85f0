//! Event handling and state transition logic.
//!
//! The host reports what happened (a screen opened, a response arrived, the
//! user pressed something) as an [`Event`]. [`handle_event`] updates
//! [`AppState`] and returns whether the screen must re-render together with the
//! [`Action`]s to execute.
//!
//! # Fetch flow
//!
//! ```text
//! OpenThread ──▶ Action::Fetch(Conversation) ──host──▶ ConversationLoaded
//!                                                  └──▶ FetchFailed ──▶ Retry
//! OpenProfile ─▶ Action::Fetch(Profile) ─▶ ProfileLoaded ─▶ Fetch(UserCasts) + Fetch(Comments)
//! ```
//!
//! # Example
//!
//! ```rust
//! use castview::app::{handle_event, Action, Event};
//! use castview::{initialize, Config};
//!
//! let mut state = initialize(&Config::default())?;
//! let (render, actions) = handle_event(&mut state, &Event::OpenThread { hash: "0xabc".into() })?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::Fetch { .. }));
//! # Ok::<(), castview::CastviewError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::api::{decode_casts_page, decode_conversation, decode_profile};
use crate::app::{Action, AppState};
use crate::domain::error::{CastviewError, Result};

use super::modes::{FetchTarget, ProfileTab, RequestStatus};
use super::state::{ProfileState, ThreadDetailState};

/// Events reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// The thread detail screen was opened for a cast.
    OpenThread { hash: String },

    /// The conversation response for `hash` arrived.
    ConversationLoaded { hash: String, body: String },

    /// The profile screen was opened for a user.
    OpenProfile { fid: u64 },

    /// The profile response arrived.
    ProfileLoaded { body: String },

    /// A page of the own casts of profile `fid` arrived.
    UserCastsLoaded { fid: u64, body: String },

    /// A page of the replies and recasts of profile `fid` arrived.
    CommentsLoaded { fid: u64, body: String },

    /// The request to `url` (as emitted in [`Action::Fetch`]) could not be
    /// completed.
    FetchFailed {
        target: FetchTarget,
        url: String,
        error: String,
    },

    /// The user asked to retry a failed fetch.
    Retry { target: FetchTarget },

    /// The user scrolled to the end of a profile list.
    LoadMore { target: FetchTarget },

    /// A profile tab was selected.
    SelectTab(ProfileTab),

    /// A cast body was pressed.
    PressCast { hash: String },

    /// A cast's author (avatar or handle) was pressed.
    PressAuthor { fid: u64 },

    /// A cast's header title or image was pressed.
    ///
    /// Opens the channel for casts in a channel, the author otherwise.
    PressCastHeader { fid: u64, channel: String },

    /// A channel link was pressed.
    PressChannel { channel_id: String },
}

impl Event {
    /// Variant name, for logging without response bodies.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OpenThread { .. } => "open_thread",
            Self::ConversationLoaded { .. } => "conversation_loaded",
            Self::OpenProfile { .. } => "open_profile",
            Self::ProfileLoaded { .. } => "profile_loaded",
            Self::UserCastsLoaded { .. } => "user_casts_loaded",
            Self::CommentsLoaded { .. } => "comments_loaded",
            Self::FetchFailed { .. } => "fetch_failed",
            Self::Retry { .. } => "retry",
            Self::LoadMore { .. } => "load_more",
            Self::SelectTab(_) => "select_tab",
            Self::PressCast { .. } => "press_cast",
            Self::PressAuthor { .. } => "press_author",
            Self::PressCastHeader { .. } => "press_cast_header",
            Self::PressChannel { .. } => "press_channel",
        }
    }
}

fn fetch(state: &AppState, target: FetchTarget, next_page: bool) -> Result<Action> {
    let request = state.request_for(target, next_page)?;
    Ok(Action::Fetch { target, request })
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the screens changed and should re-render.
/// Malformed response bodies do not fail the call; they put the targeted fetch
/// into [`RequestStatus::Error`] so the screen can offer a retry.
///
/// # Errors
///
/// Returns [`CastviewError::Request`] when a fetch cannot be described from the
/// current state (e.g. retrying the profile lists before the profile loaded),
/// and [`CastviewError::State`] when `LoadMore` names a non-list target.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::OpenThread { hash } => {
            tracing::debug!(hash = %hash, "opening thread");
            state.thread = ThreadDetailState {
                thread_hash: Some(hash.clone()),
                status: RequestStatus::Loading,
                thread: None,
            };
            Ok((true, vec![fetch(state, FetchTarget::Conversation, false)?]))
        }
        Event::ConversationLoaded { hash, body } => {
            if state.thread.thread_hash.as_deref() != Some(hash.as_str()) {
                tracing::debug!(hash = %hash, "ignoring stale conversation response");
                return Ok((false, vec![]));
            }

            match decode_conversation(body) {
                Ok(thread) => {
                    tracing::debug!(found = thread.is_some(), "conversation loaded");
                    state.thread.thread = thread;
                    state.thread.status = RequestStatus::Success;
                }
                Err(e) => {
                    tracing::warn!(hash = %hash, error = %e, "conversation response rejected");
                    state.thread.status = RequestStatus::Error;
                }
            }
            Ok((true, vec![]))
        }
        Event::OpenProfile { fid } => {
            tracing::debug!(fid = fid, "opening profile");
            state.profile = ProfileState {
                fid: Some(*fid),
                status: RequestStatus::Loading,
                ..ProfileState::default()
            };
            Ok((true, vec![fetch(state, FetchTarget::Profile, false)?]))
        }
        Event::ProfileLoaded { body } => {
            let profile = match decode_profile(body) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!(error = %e, "profile response rejected");
                    state.profile.status = RequestStatus::Error;
                    return Ok((true, vec![]));
                }
            };

            if state.profile.fid != Some(profile.fid) {
                tracing::debug!(fid = profile.fid, "ignoring stale profile response");
                return Ok((false, vec![]));
            }

            state.profile.profile = Some(profile);
            state.profile.status = RequestStatus::Success;

            let mut actions = Vec::with_capacity(2);
            for target in [FetchTarget::UserCasts, FetchTarget::Comments] {
                state.begin_list(target, false);
                actions.push(fetch(state, target, false)?);
            }
            Ok((true, actions))
        }
        Event::UserCastsLoaded { fid, body } => {
            Ok((apply_list(state, FetchTarget::UserCasts, *fid, body), vec![]))
        }
        Event::CommentsLoaded { fid, body } => {
            Ok((apply_list(state, FetchTarget::Comments, *fid, body), vec![]))
        }
        Event::FetchFailed { target, url, error } => {
            if !is_in_flight(state, *target, url) {
                tracing::debug!(fetch = ?target, url = %url, "ignoring stale fetch failure");
                return Ok((false, vec![]));
            }

            tracing::warn!(fetch = ?target, error = %error, "fetch failed");
            match target {
                FetchTarget::Conversation => state.thread.status = RequestStatus::Error,
                FetchTarget::Profile => state.profile.status = RequestStatus::Error,
                FetchTarget::UserCasts | FetchTarget::Comments => {
                    if let Some(list) = state.profile.list_mut(*target) {
                        list.status = RequestStatus::Error;
                    }
                }
            }
            Ok((true, vec![]))
        }
        Event::Retry { target } => {
            tracing::debug!(fetch = ?target, "retrying fetch");
            let next_page = state.profile.list_mut(*target).is_some_and(|list| list.appending);
            let action = fetch(state, *target, next_page)?;

            match target {
                FetchTarget::Conversation => state.thread.status = RequestStatus::Loading,
                FetchTarget::Profile => state.profile.status = RequestStatus::Loading,
                FetchTarget::UserCasts | FetchTarget::Comments => state.begin_list(*target, next_page),
            }
            Ok((true, vec![action]))
        }
        Event::LoadMore { target } => {
            if !target.is_list() {
                return Err(CastviewError::State(format!(
                    "{target:?} does not paginate"
                )));
            }

            let ready = state
                .profile
                .list_mut(*target)
                .is_some_and(|list| list.status == RequestStatus::Success && list.cursor.is_some());
            if !ready {
                tracing::debug!(fetch = ?target, "no further page to load");
                return Ok((false, vec![]));
            }

            state.begin_list(*target, true);
            Ok((true, vec![fetch(state, *target, true)?]))
        }
        Event::SelectTab(tab) => {
            let changed = state.profile.selected_tab != *tab;
            state.profile.selected_tab = *tab;
            Ok((changed, vec![]))
        }
        Event::PressCast { hash } => Ok((false, vec![Action::NavigateThread { hash: hash.clone() }])),
        Event::PressAuthor { fid } => Ok((false, vec![Action::NavigateProfile { fid: *fid }])),
        Event::PressCastHeader { fid, channel } => {
            let action = if channel.is_empty() {
                Action::NavigateProfile { fid: *fid }
            } else {
                Action::NavigateChannel {
                    channel_id: channel.clone(),
                }
            };
            Ok((false, vec![action]))
        }
        Event::PressChannel { channel_id } => Ok((
            false,
            vec![Action::NavigateChannel {
                channel_id: channel_id.clone(),
            }],
        )),
    }
}

/// Returns `true` if `url` is the request currently awaited for `target`.
fn is_in_flight(state: &AppState, target: FetchTarget, url: &str) -> bool {
    let profile = &state.profile;
    let (loading, next_page) = match target {
        FetchTarget::Conversation => (state.thread.status.is_loading(), false),
        FetchTarget::Profile => (profile.status.is_loading(), false),
        FetchTarget::UserCasts => (profile.user_casts.status.is_loading(), profile.user_casts.appending),
        FetchTarget::Comments => (profile.comments.status.is_loading(), profile.comments.appending),
    };

    loading
        && state
            .request_for(target, next_page)
            .is_ok_and(|request| request.url == url)
}

/// Decodes a list page of profile `fid` into the list for `target`.
///
/// Returns whether state changed. Pages for another profile, or for a list
/// with no fetch in flight, are ignored.
fn apply_list(state: &mut AppState, target: FetchTarget, fid: u64, body: &str) -> bool {
    let current = state.profile.profile.as_ref().map(|p| p.fid);
    let awaited = state
        .profile
        .list_mut(target)
        .is_some_and(|list| list.status.is_loading());
    if current != Some(fid) || !awaited {
        tracing::debug!(fetch = ?target, fid = fid, "ignoring stale list page");
        return false;
    }

    match decode_casts_page(body) {
        Ok(page) => {
            state.apply_list_page(target, page);
            true
        }
        Err(e) => {
            tracing::warn!(fetch = ?target, error = %e, "list response rejected");
            if let Some(list) = state.profile.list_mut(target) {
                list.status = RequestStatus::Error;
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, Session};
    use crate::conversation::ConversationFlattener;
    use crate::domain::Cast;

    fn state() -> AppState {
        let client =
            ApiClient::new("https://api.example.com/v2", Session::new("tok", Some(1))).unwrap();
        AppState::new(client, ConversationFlattener::default(), 5, 10)
    }

    fn fetch_url(action: &Action) -> &str {
        match action {
            Action::Fetch { request, .. } => &request.url,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    const CONVERSATION: &str = r#"{"result": {"conversation": {"cast": {
        "hash": "R", "directReplies": [{"hash": "A", "depth": 1}]
    }}}}"#;

    #[test]
    fn test_open_thread_emits_conversation_fetch() {
        let mut state = state();
        let (render, actions) =
            handle_event(&mut state, &Event::OpenThread { hash: "R".into() }).unwrap();

        assert!(render);
        assert_eq!(state.thread.status, RequestStatus::Loading);
        assert_eq!(actions.len(), 1);
        assert_eq!(
            fetch_url(&actions[0]),
            "https://api.example.com/v2/casts/R/conversation?replyDepth=5"
        );
    }

    #[test]
    fn test_conversation_loaded() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenThread { hash: "R".into() }).unwrap();
        let (render, actions) = handle_event(
            &mut state,
            &Event::ConversationLoaded {
                hash: "R".into(),
                body: CONVERSATION.into(),
            },
        )
        .unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.thread.status, RequestStatus::Success);
        assert_eq!(state.thread_viewmodel(0).sections.len(), 1);
    }

    #[test]
    fn test_stale_conversation_is_ignored() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenThread { hash: "new".into() }).unwrap();
        let (render, _) = handle_event(
            &mut state,
            &Event::ConversationLoaded {
                hash: "old".into(),
                body: CONVERSATION.into(),
            },
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.thread.status, RequestStatus::Loading);
        assert!(state.thread.thread.is_none());
    }

    #[test]
    fn test_malformed_conversation_sets_error_then_retry() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenThread { hash: "R".into() }).unwrap();
        handle_event(
            &mut state,
            &Event::ConversationLoaded {
                hash: "R".into(),
                body: "{".into(),
            },
        )
        .unwrap();
        assert_eq!(state.thread.status, RequestStatus::Error);

        let (_, actions) = handle_event(
            &mut state,
            &Event::Retry {
                target: FetchTarget::Conversation,
            },
        )
        .unwrap();
        assert_eq!(state.thread.status, RequestStatus::Loading);
        assert!(fetch_url(&actions[0]).contains("/casts/R/conversation"));
    }

    #[test]
    fn test_profile_load_cascades_to_lists() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenProfile { fid: 9 }).unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::ProfileLoaded {
                body: r#"{"result": {"fid": 9, "username": "carol"}}"#.into(),
            },
        )
        .unwrap();

        assert_eq!(state.profile.status, RequestStatus::Success);
        assert_eq!(actions.len(), 2);
        assert!(fetch_url(&actions[0]).ends_with("/profiles/9/casts?limit=10"));
        assert!(fetch_url(&actions[1]).ends_with("/profiles/9/replies-and-recasts?limit=10"));
        assert!(state.profile.user_casts.status.is_loading());
        assert!(state.profile.comments.status.is_loading());
    }

    #[test]
    fn test_stale_profile_is_ignored() {
        let mut state = state();
        handle_event(&mut state, &Event::OpenProfile { fid: 9 }).unwrap();
        let (render, actions) = handle_event(
            &mut state,
            &Event::ProfileLoaded {
                body: r#"{"result": {"fid": 8}}"#.into(),
            },
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.profile.profile.is_none());
    }

    fn open_loaded_profile(state: &mut AppState, fid: u64) -> Vec<Action> {
        handle_event(state, &Event::OpenProfile { fid }).unwrap();
        let (_, actions) = handle_event(
            state,
            &Event::ProfileLoaded {
                body: format!(r#"{{"result": {{"fid": {fid}}}}}"#),
            },
        )
        .unwrap();
        actions
    }

    #[test]
    fn test_list_failure_and_load_more() {
        let mut state = state();
        let actions = open_loaded_profile(&mut state, 9);

        handle_event(
            &mut state,
            &Event::FetchFailed {
                target: FetchTarget::Comments,
                url: fetch_url(&actions[1]).to_string(),
                error: "timeout".into(),
            },
        )
        .unwrap();
        assert!(state.profile_viewmodel(0).list_retry);

        handle_event(
            &mut state,
            &Event::UserCastsLoaded {
                fid: 9,
                body: r#"{"result": [{"hash": "1"}], "next": {"cursor": "p2"}}"#.into(),
            },
        )
        .unwrap();
        let (_, actions) = handle_event(
            &mut state,
            &Event::LoadMore {
                target: FetchTarget::UserCasts,
            },
        )
        .unwrap();
        assert!(fetch_url(&actions[0]).ends_with("casts?limit=10&cursor=p2"));

        handle_event(
            &mut state,
            &Event::UserCastsLoaded {
                fid: 9,
                body: r#"{"result": [{"hash": "2"}]}"#.into(),
            },
        )
        .unwrap();
        assert_eq!(state.profile.user_casts.items.len(), 2);

        let (render, actions) = handle_event(
            &mut state,
            &Event::LoadMore {
                target: FetchTarget::UserCasts,
            },
        )
        .unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_list_page_of_previous_profile_is_ignored() {
        let mut state = state();
        open_loaded_profile(&mut state, 9);
        open_loaded_profile(&mut state, 10);

        let (render, _) = handle_event(
            &mut state,
            &Event::UserCastsLoaded {
                fid: 9,
                body: r#"{"result": [{"hash": "from-fid-9"}]}"#.into(),
            },
        )
        .unwrap();

        assert!(!render);
        assert!(state.profile.user_casts.status.is_loading());
        assert!(state.profile.user_casts.items.is_empty());
    }

    #[test]
    fn test_list_page_without_fetch_in_flight_is_ignored() {
        let mut state = state();
        open_loaded_profile(&mut state, 9);
        let page = Event::UserCastsLoaded {
            fid: 9,
            body: r#"{"result": [{"hash": "1"}]}"#.into(),
        };
        handle_event(&mut state, &page).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::UserCastsLoaded {
                fid: 9,
                body: r#"{"result": [{"hash": "late"}]}"#.into(),
            },
        )
        .unwrap();

        assert!(!render);
        assert_eq!(state.profile.user_casts.items, vec![Cast::new("1")]);
    }

    #[test]
    fn test_failure_of_previous_thread_is_ignored() {
        let mut state = state();
        let (_, old) = handle_event(&mut state, &Event::OpenThread { hash: "old".into() }).unwrap();
        let (_, new) = handle_event(&mut state, &Event::OpenThread { hash: "new".into() }).unwrap();

        let (render, _) = handle_event(
            &mut state,
            &Event::FetchFailed {
                target: FetchTarget::Conversation,
                url: fetch_url(&old[0]).to_string(),
                error: "old timed out".into(),
            },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.thread.status, RequestStatus::Loading);

        handle_event(
            &mut state,
            &Event::FetchFailed {
                target: FetchTarget::Conversation,
                url: fetch_url(&new[0]).to_string(),
                error: "offline".into(),
            },
        )
        .unwrap();
        assert_eq!(state.thread.status, RequestStatus::Error);
    }

    #[test]
    fn test_load_more_rejects_non_list() {
        let mut state = state();
        let result = handle_event(
            &mut state,
            &Event::LoadMore {
                target: FetchTarget::Profile,
            },
        );

        assert!(matches!(result, Err(CastviewError::State(_))));
    }

    #[test]
    fn test_retry_lists_before_profile_is_an_error() {
        let mut state = state();
        let result = handle_event(
            &mut state,
            &Event::Retry {
                target: FetchTarget::UserCasts,
            },
        );

        assert!(matches!(result, Err(CastviewError::Request(_))));
        assert_eq!(state.profile.user_casts.status, RequestStatus::Idle);
    }

    #[test]
    fn test_navigation_presses() {
        let mut state = state();

        let (_, actions) = handle_event(&mut state, &Event::PressCast { hash: "0x1".into() }).unwrap();
        assert_eq!(actions, vec![Action::NavigateThread { hash: "0x1".into() }]);

        let (_, actions) = handle_event(&mut state, &Event::PressAuthor { fid: 3 }).unwrap();
        assert_eq!(actions, vec![Action::NavigateProfile { fid: 3 }]);

        let (_, actions) = handle_event(
            &mut state,
            &Event::PressCastHeader {
                fid: 3,
                channel: "rust".into(),
            },
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![Action::NavigateChannel {
                channel_id: "rust".into()
            }]
        );

        let (_, actions) = handle_event(
            &mut state,
            &Event::PressCastHeader {
                fid: 3,
                channel: String::new(),
            },
        )
        .unwrap();
        assert_eq!(actions, vec![Action::NavigateProfile { fid: 3 }]);

        let (render, actions) = handle_event(
            &mut state,
            &Event::PressChannel {
                channel_id: "memes".into(),
            },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(
            actions,
            vec![Action::NavigateChannel {
                channel_id: "memes".into()
            }]
        );
    }

    #[test]
    fn test_select_tab() {
        let mut state = state();

        let (render, _) = handle_event(&mut state, &Event::SelectTab(ProfileTab::About)).unwrap();
        assert!(render);
        assert_eq!(state.profile.selected_tab, ProfileTab::About);

        let (render, _) = handle_event(&mut state, &Event::SelectTab(ProfileTab::About)).unwrap();
        assert!(!render);
    }
}
