//! Request descriptions for the feed REST API.
//!
//! castview never opens a socket. [`ApiClient`] turns an [`Endpoint`] into an
//! [`ApiRequest`] (method, absolute URL, headers) that the host sends with the
//! HTTP client of its choice, then hands the response body back to the
//! decoders in [`super::response`].
//!
//! Authentication is explicit: the bearer token and the signed-in user's fid
//! live in a [`Session`] owned by the client, not in global state.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::{CastviewError, Result};

/// Credentials and identity of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every request. Empty means anonymous.
    pub token: String,

    /// Fid of the signed-in user, when known.
    pub fid: Option<u64>,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>, fid: Option<u64>) -> Self {
        Self {
            token: token.into(),
            fid,
        }
    }

    /// Returns `true` if `fid` belongs to the signed-in user.
    #[must_use]
    pub fn is_current_user(&self, fid: u64) -> bool {
        self.fid == Some(fid)
    }
}

/// The REST calls the client makes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Endpoint {
    /// A cast with its replies nested up to `reply_depth` levels.
    CastConversation { hash: String, reply_depth: u32 },

    /// A user profile.
    Profile { fid: u64 },

    /// A page of a user's replies and recasts.
    ProfileRepliesAndRecasts {
        fid: u64,
        limit: u32,
        cursor: Option<String>,
    },

    /// A page of a user's own casts.
    ProfileCasts {
        fid: u64,
        limit: u32,
        cursor: Option<String>,
    },
}

impl Endpoint {
    fn path_segments(&self) -> Vec<String> {
        match self {
            Self::CastConversation { hash, .. } => {
                vec!["casts".to_string(), hash.clone(), "conversation".to_string()]
            }
            Self::Profile { fid } => vec!["profiles".to_string(), fid.to_string()],
            Self::ProfileRepliesAndRecasts { fid, .. } => vec![
                "profiles".to_string(),
                fid.to_string(),
                "replies-and-recasts".to_string(),
            ],
            Self::ProfileCasts { fid, .. } => {
                vec!["profiles".to_string(), fid.to_string(), "casts".to_string()]
            }
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::CastConversation { reply_depth, .. } => {
                vec![("replyDepth", reply_depth.to_string())]
            }
            Self::Profile { .. } => Vec::new(),
            Self::ProfileRepliesAndRecasts { limit, cursor, .. }
            | Self::ProfileCasts { limit, cursor, .. } => {
                let mut pairs = vec![("limit", limit.to_string())];
                if let Some(cursor) = cursor {
                    pairs.push(("cursor", cursor.clone()));
                }
                pairs
            }
        }
    }
}

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    Get,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
        }
    }
}

/// A fully described HTTP request, ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// Looks up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builds [`ApiRequest`]s against one API base URL for one session.
///
/// # Examples
///
/// ```
/// use castview::api::{ApiClient, Endpoint, Session};
///
/// let client = ApiClient::new("https://api.example.com/v2", Session::new("tok", Some(3)))?;
/// let request = client.request(&Endpoint::Profile { fid: 3 })?;
///
/// assert_eq!(request.url, "https://api.example.com/v2/profiles/3");
/// assert_eq!(request.header("authorization"), Some("Bearer tok"));
/// # Ok::<(), castview::CastviewError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CastviewError::Config`] if `base_url` is not an absolute
    /// `http`/`https` URL.
    pub fn new(base_url: &str, session: Session) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self { base_url, session })
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Describes the request for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`CastviewError::Request`] if the base URL cannot carry path
    /// segments.
    pub fn request(&self, endpoint: &Endpoint) -> Result<ApiRequest> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CastviewError::Request(format!("base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(endpoint.path_segments());

        let pairs = endpoint.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if !self.session.token.is_empty() {
            headers.push((
                "Authorization".to_string(),
                format!("Bearer {}", self.session.token),
            ));
        }

        tracing::debug!(url = %url, "request described");
        Ok(ApiRequest {
            method: Method::Get,
            url: url.into(),
            headers,
        })
    }
}

/// Parses and checks an API base URL.
///
/// # Errors
///
/// Returns [`CastviewError::Config`] for unparsable or non-http(s) URLs.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url)
        .map_err(|e| CastviewError::Config(format!("invalid api_base_url {base_url:?}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CastviewError::Config(format!(
            "api_base_url must use http or https, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("https://api.example.com/v2", Session::new("secret", Some(7))).unwrap()
    }

    #[test]
    fn test_conversation_request() {
        let request = client()
            .request(&Endpoint::CastConversation {
                hash: "0xabc".to_string(),
                reply_depth: 5,
            })
            .unwrap();

        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url,
            "https://api.example.com/v2/casts/0xabc/conversation?replyDepth=5"
        );
        assert_eq!(request.header("Authorization"), Some("Bearer secret"));
    }

    #[test]
    fn test_trailing_slash_base_url() {
        let client = ApiClient::new("https://api.example.com/v2/", Session::default()).unwrap();
        let request = client.request(&Endpoint::Profile { fid: 1 }).unwrap();

        assert_eq!(request.url, "https://api.example.com/v2/profiles/1");
    }

    #[test]
    fn test_anonymous_session_sends_no_authorization() {
        let client = ApiClient::new("https://api.example.com/v2", Session::default()).unwrap();
        let request = client.request(&Endpoint::Profile { fid: 1 }).unwrap();

        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.header("accept"), Some("application/json"));
    }

    #[test]
    fn test_profile_lists_with_cursor() {
        let request = client()
            .request(&Endpoint::ProfileCasts {
                fid: 7,
                limit: 10,
                cursor: Some("eyJwYWdlIjoyfQ==".to_string()),
            })
            .unwrap();

        assert_eq!(
            request.url,
            "https://api.example.com/v2/profiles/7/casts?limit=10&cursor=eyJwYWdlIjoyfQ%3D%3D"
        );

        let request = client()
            .request(&Endpoint::ProfileRepliesAndRecasts {
                fid: 7,
                limit: 10,
                cursor: None,
            })
            .unwrap();

        assert_eq!(
            request.url,
            "https://api.example.com/v2/profiles/7/replies-and-recasts?limit=10"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", Session::default()),
            Err(CastviewError::Config(_))
        ));
        assert!(matches!(
            ApiClient::new("ftp://example.com", Session::default()),
            Err(CastviewError::Config(_))
        ));
    }

    #[test]
    fn test_session_current_user() {
        let session = Session::new("t", Some(7));

        assert!(session.is_current_user(7));
        assert!(!session.is_current_user(8));
        assert!(!Session::default().is_current_user(7));
    }
}
