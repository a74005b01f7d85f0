//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the two data-driven screens:
//! thread detail and profile. It owns the API client (and with it the
//! session), the fetched data, and the status of every fetch. View models are
//! computed on demand from a state snapshot, so the flattened conversation is
//! rebuilt on every render and never cached in a mutable form.

use crate::api::{ApiClient, ApiRequest, Endpoint, Page};
use crate::conversation::ConversationFlattener;
use crate::domain::error::{CastviewError, Result};
use crate::domain::{Cast, Profile};
use crate::ui::transform::{build_thread_viewmodel, transform_feed_item, transform_user_cast};
use crate::ui::viewmodel::{
    EmptyState, ProfileHeaderView, ProfileViewModel, TabView, ThreadDetailViewModel,
};

use super::modes::{FetchTarget, ProfileTab, RequestStatus};

/// State of the thread detail screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadDetailState {
    /// Hash of the thread being shown.
    pub thread_hash: Option<String>,
    pub status: RequestStatus,
    /// Root cast with its reply tree, once loaded.
    pub thread: Option<Cast>,
}

/// A cursor-paginated list of casts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastList {
    pub status: RequestStatus,
    pub items: Vec<Cast>,
    /// Cursor of the next page, if the last page said there is one.
    pub cursor: Option<String>,
    /// The in-flight request continues the list instead of replacing it.
    pub appending: bool,
}

impl CastList {
    fn begin(&mut self, appending: bool) {
        self.status = RequestStatus::Loading;
        self.appending = appending;
    }

    fn apply_page(&mut self, page: Page<Cast>) {
        if self.appending {
            self.items.extend(page.items);
        } else {
            self.items = page.items;
        }
        self.cursor = page.cursor;
        self.appending = false;
        self.status = RequestStatus::Success;
    }
}

/// State of the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// Fid of the profile being shown.
    pub fid: Option<u64>,
    pub status: RequestStatus,
    pub profile: Option<Profile>,
    pub selected_tab: ProfileTab,
    pub user_casts: CastList,
    pub comments: CastList,
}

impl ProfileState {
    /// Returns the list backing `target`, if `target` is a list.
    pub fn list_mut(&mut self, target: FetchTarget) -> Option<&mut CastList> {
        match target {
            FetchTarget::UserCasts => Some(&mut self.user_casts),
            FetchTarget::Comments => Some(&mut self.comments),
            FetchTarget::Conversation | FetchTarget::Profile => None,
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Request builder carrying the session.
    pub client: ApiClient,
    pub flattener: ConversationFlattener,
    /// Reply nesting requested with each conversation.
    pub reply_depth: u32,
    /// Page size of the profile lists.
    pub page_limit: u32,
    pub thread: ThreadDetailState,
    pub profile: ProfileState,
}

impl AppState {
    /// Creates a state with both screens idle.
    #[must_use]
    pub fn new(
        client: ApiClient,
        flattener: ConversationFlattener,
        reply_depth: u32,
        page_limit: u32,
    ) -> Self {
        Self {
            client,
            flattener,
            reply_depth,
            page_limit,
            thread: ThreadDetailState::default(),
            profile: ProfileState::default(),
        }
    }

    /// Returns `true` if the profile screen shows the signed-in user.
    #[must_use]
    pub fn is_logged_user_profile(&self) -> bool {
        self.profile
            .fid
            .is_some_and(|fid| self.client.session().is_current_user(fid))
    }

    /// Describes the request for `target` from the current state.
    ///
    /// List requests continue from the stored cursor when `next_page` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CastviewError::Request`] if the state lacks what the request
    /// needs: a thread hash, a profile fid, or a loaded profile for the lists.
    pub fn request_for(&self, target: FetchTarget, next_page: bool) -> Result<ApiRequest> {
        let endpoint = match target {
            FetchTarget::Conversation => {
                let hash = self.thread.thread_hash.clone().ok_or_else(|| {
                    CastviewError::Request("no thread selected".to_string())
                })?;
                Endpoint::CastConversation {
                    hash,
                    reply_depth: self.reply_depth,
                }
            }
            FetchTarget::Profile => {
                let fid = self.profile.fid.ok_or_else(|| {
                    CastviewError::Request("no profile selected".to_string())
                })?;
                Endpoint::Profile { fid }
            }
            FetchTarget::UserCasts | FetchTarget::Comments => {
                let fid = self.profile.profile.as_ref().map(|p| p.fid).ok_or_else(|| {
                    CastviewError::Request("profile lists need a loaded profile".to_string())
                })?;
                let list = if target == FetchTarget::UserCasts {
                    &self.profile.user_casts
                } else {
                    &self.profile.comments
                };
                let cursor = if next_page { list.cursor.clone() } else { None };
                if target == FetchTarget::UserCasts {
                    Endpoint::ProfileCasts {
                        fid,
                        limit: self.page_limit,
                        cursor,
                    }
                } else {
                    Endpoint::ProfileRepliesAndRecasts {
                        fid,
                        limit: self.page_limit,
                        cursor,
                    }
                }
            }
        };

        self.client.request(&endpoint)
    }

    /// Computes the thread detail view model.
    ///
    /// The conversation is flattened afresh from the stored tree on every call.
    #[must_use]
    pub fn thread_viewmodel(&self, now_ms: i64) -> ThreadDetailViewModel {
        if self.thread.status.is_loading() {
            return ThreadDetailViewModel {
                loading: true,
                ..ThreadDetailViewModel::default()
            };
        }

        let Some(thread) = self.thread.thread.as_ref() else {
            return ThreadDetailViewModel {
                empty_state: Some(EmptyState {
                    message: "No thread visible".to_string(),
                    subtitle: String::new(),
                }),
                retry: self.thread.status.is_error(),
                ..ThreadDetailViewModel::default()
            };
        };

        let conversation = self.flattener.flatten_roots([Some(thread)]);
        build_thread_viewmodel(&conversation, now_ms)
    }

    /// Computes the profile view model.
    ///
    /// Tab items are only shown once both list fetches have succeeded, so the
    /// two tabs never show a half-loaded mix.
    #[must_use]
    pub fn profile_viewmodel(&self, now_ms: i64) -> ProfileViewModel {
        match self.profile.status {
            RequestStatus::Loading => {
                return ProfileViewModel {
                    loading: true,
                    ..ProfileViewModel::default()
                }
            }
            RequestStatus::Error => {
                return ProfileViewModel {
                    retry: true,
                    ..ProfileViewModel::default()
                }
            }
            RequestStatus::Idle | RequestStatus::Success => {}
        }

        let Some(profile) = self.profile.profile.as_ref() else {
            return ProfileViewModel {
                empty_state: Some(EmptyState {
                    message: "Profile not found".to_string(),
                    subtitle: String::new(),
                }),
                ..ProfileViewModel::default()
            };
        };

        let casts = &self.profile.user_casts;
        let comments = &self.profile.comments;
        let lists_ready =
            casts.status == RequestStatus::Success && comments.status == RequestStatus::Success;
        let tab = self.profile.selected_tab;

        let items = if lists_ready {
            match tab {
                ProfileTab::Threads => casts
                    .items
                    .iter()
                    .map(|cast| transform_user_cast(cast, now_ms))
                    .collect(),
                ProfileTab::Comments => comments
                    .items
                    .iter()
                    .map(|cast| transform_feed_item(cast, now_ms))
                    .collect(),
                ProfileTab::About => Vec::new(),
            }
        } else {
            Vec::new()
        };

        ProfileViewModel {
            loading: false,
            retry: false,
            empty_state: None,
            header: Some(ProfileHeaderView {
                fid: profile.fid,
                title: profile.title().to_string(),
                subtitle: format!("@{}", profile.username),
                avatar: profile.pfp.as_ref().map(|pfp| pfp.url.clone()).unwrap_or_default(),
                bio: profile.bio().to_string(),
                follower_count: profile.follower_count,
                following_count: profile.following_count,
            }),
            is_logged_user: self.is_logged_user_profile(),
            tabs: ProfileTab::ALL
                .iter()
                .map(|&t| TabView {
                    label: t.label().to_string(),
                    selected: t == tab,
                })
                .collect(),
            list_loading: casts.status.is_loading() || comments.status.is_loading(),
            list_retry: casts.status.is_error() || comments.status.is_error(),
            items,
            about: (tab == ProfileTab::About).then(|| profile.bio().to_string()),
        }
    }

    pub(crate) fn begin_list(&mut self, target: FetchTarget, appending: bool) {
        if let Some(list) = self.profile.list_mut(target) {
            list.begin(appending);
        }
    }

    pub(crate) fn apply_list_page(&mut self, target: FetchTarget, page: Page<Cast>) {
        if let Some(list) = self.profile.list_mut(target) {
            list.apply_page(page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Session;

    fn state() -> AppState {
        let client =
            ApiClient::new("https://api.example.com/v2", Session::new("tok", Some(1))).unwrap();
        AppState::new(client, ConversationFlattener::default(), 5, 10)
    }

    #[test]
    fn test_request_for_requires_thread_hash() {
        let state = state();
        assert!(matches!(
            state.request_for(FetchTarget::Conversation, false),
            Err(CastviewError::Request(_))
        ));
    }

    #[test]
    fn test_list_request_requires_loaded_profile() {
        let mut state = state();
        state.profile.fid = Some(4);

        assert!(state.request_for(FetchTarget::Profile, false).is_ok());
        assert!(state.request_for(FetchTarget::UserCasts, false).is_err());
    }

    #[test]
    fn test_list_request_uses_cursor_for_next_page() {
        let mut state = state();
        state.profile.profile = Some(Profile {
            fid: 4,
            ..Profile::default()
        });
        state.profile.comments.cursor = Some("c2".to_string());

        let first = state.request_for(FetchTarget::Comments, false).unwrap();
        let next = state.request_for(FetchTarget::Comments, true).unwrap();

        assert!(!first.url.contains("cursor"));
        assert!(next.url.ends_with("replies-and-recasts?limit=10&cursor=c2"));
    }

    #[test]
    fn test_cast_list_append_and_replace() {
        let mut list = CastList::default();
        list.begin(false);
        list.apply_page(Page {
            items: vec![Cast::new("1")],
            cursor: Some("next".to_string()),
        });
        list.begin(true);
        list.apply_page(Page {
            items: vec![Cast::new("2")],
            cursor: None,
        });

        assert_eq!(list.items.len(), 2);
        assert_eq!(list.cursor, None);
        assert_eq!(list.status, RequestStatus::Success);

        list.begin(false);
        list.apply_page(Page {
            items: vec![Cast::new("3")],
            cursor: None,
        });
        assert_eq!(list.items, vec![Cast::new("3")]);
    }

    #[test]
    fn test_thread_viewmodel_states() {
        let mut state = state();
        assert!(state.thread_viewmodel(0).empty_state.is_some());

        state.thread.status = RequestStatus::Loading;
        assert!(state.thread_viewmodel(0).loading);

        state.thread.status = RequestStatus::Error;
        let vm = state.thread_viewmodel(0);
        assert!(vm.retry);
        assert_eq!(
            vm.empty_state.map(|e| e.message),
            Some("No thread visible".to_string())
        );

        state.thread.status = RequestStatus::Success;
        state.thread.thread = Some(Cast::new("R").with_replies(vec![Cast::new("A")]));
        let vm = state.thread_viewmodel(0);
        assert_eq!(vm.ancestors.len(), 2);
        assert_eq!(vm.sections.len(), 1);
    }

    #[test]
    fn test_profile_viewmodel_not_found() {
        let mut state = state();
        state.profile.status = RequestStatus::Success;

        let vm = state.profile_viewmodel(0);
        assert_eq!(
            vm.empty_state.map(|e| e.message),
            Some("Profile not found".to_string())
        );
    }

    #[test]
    fn test_profile_viewmodel_waits_for_both_lists() {
        let mut state = state();
        state.profile.fid = Some(1);
        state.profile.status = RequestStatus::Success;
        state.profile.profile = Some(Profile {
            fid: 1,
            username: "me".to_string(),
            ..Profile::default()
        });
        state.profile.user_casts.status = RequestStatus::Success;
        state.profile.user_casts.items = vec![Cast::new("mine")];
        state.profile.comments.status = RequestStatus::Loading;

        let vm = state.profile_viewmodel(0);
        assert!(vm.is_logged_user);
        assert!(vm.list_loading);
        assert!(vm.items.is_empty());
        assert_eq!(vm.tabs.len(), 3);
        assert!(vm.tabs[0].selected);

        state.profile.comments.status = RequestStatus::Success;
        let vm = state.profile_viewmodel(0);
        assert_eq!(vm.items.len(), 1);
        assert_eq!(vm.items[0].hash, "mine");
    }
}
