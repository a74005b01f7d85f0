//! Profile domain model.

use serde::{Deserialize, Serialize};

use super::cast::Image;

/// Free-form bio text attached to a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bio {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    #[serde(default)]
    pub bio: Bio,
}

/// A user profile as returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub fid: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "display_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub pfp: Option<Image>,
    #[serde(default)]
    pub profile: ProfileDetails,
    #[serde(default, alias = "follower_count")]
    pub follower_count: u64,
    #[serde(default, alias = "following_count")]
    pub following_count: u64,
}

impl Profile {
    /// Display name, falling back to the username.
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }

    #[must_use]
    pub fn bio(&self) -> &str {
        &self.profile.bio.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_profile() {
        let json = r#"{
            "fid": 42,
            "username": "alice",
            "displayName": "Alice",
            "profile": {"bio": {"text": "building things"}},
            "followerCount": 10,
            "followingCount": 3
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.title(), "Alice");
        assert_eq!(profile.bio(), "building things");
        assert_eq!(profile.follower_count, 10);
    }

    #[test]
    fn test_title_falls_back_to_username() {
        let profile = Profile {
            fid: 1,
            username: "bob".to_string(),
            display_name: Some(String::new()),
            ..Profile::default()
        };

        assert_eq!(profile.title(), "bob");
    }
}
