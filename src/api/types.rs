//! API response type definitions.

use serde::Deserialize;

/// Response of the `web_profile_info` endpoint.
#[derive(Debug, Deserialize)]
pub struct ProfileInfoResponse {
    pub data: ProfileInfoData,
}

#[derive(Debug, Deserialize)]
pub struct ProfileInfoData {
    pub user: Option<UserNode>,
}

/// User object as returned by the web API.
#[derive(Debug, Clone, Deserialize)]
pub struct UserNode {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub followed_by_viewer: bool,
    pub profile_pic_url: Option<String>,
    pub profile_pic_url_hd: Option<String>,
    pub edge_owner_to_timeline_media: Option<MediaConnection>,
}

/// A page of posts with its pagination info.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaConnection {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<PostNode>>,
}

/// Pagination cursor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// GraphQL edge wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A post, or a child of a sidecar post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostNode {
    #[serde(rename = "__typename", default)]
    pub typename: String,
    pub id: String,
    pub shortcode: Option<String>,
    pub display_url: String,
    #[serde(default)]
    pub is_video: bool,
    pub video_url: Option<String>,
    pub taken_at_timestamp: Option<i64>,
    pub edge_sidecar_to_children: Option<SidecarChildren>,
}

/// Children of a sidecar (multi-media) post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarChildren {
    #[serde(default)]
    pub edges: Vec<Edge<PostNode>>,
}

/// Response of the profile posts GraphQL query.
#[derive(Debug, Deserialize)]
pub struct TimelinePageResponse {
    pub data: TimelinePageData,
}

#[derive(Debug, Deserialize)]
pub struct TimelinePageData {
    pub user: Option<TimelineUser>,
}

#[derive(Debug, Deserialize)]
pub struct TimelineUser {
    pub edge_owner_to_timeline_media: MediaConnection,
}

/// Response of the single post GraphQL query.
#[derive(Debug, Deserialize)]
pub struct PostDetailsResponse {
    pub data: PostDetailsData,
}

#[derive(Debug, Deserialize)]
pub struct PostDetailsData {
    pub shortcode_media: Option<PostNode>,
}

/// Response of the web login endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: bool,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub two_factor_required: bool,
    pub message: Option<String>,
    pub checkpoint_url: Option<String>,
    pub status: Option<String>,
}

/// A resolved profile.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub is_private: bool,
    pub followed_by_viewer: bool,
    pub profile_pic_url: Option<String>,
    /// Total number of posts.
    pub media_count: u64,
    /// First page of posts, included in the profile response.
    pub timeline: MediaConnection,
}

impl From<UserNode> for Profile {
    fn from(user: UserNode) -> Self {
        let timeline = user.edge_owner_to_timeline_media.unwrap_or_default();
        Self {
            id: user.id,
            username: user.username,
            is_private: user.is_private,
            followed_by_viewer: user.followed_by_viewer,
            profile_pic_url: user.profile_pic_url_hd.or(user.profile_pic_url),
            media_count: timeline.count,
            timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_info() {
        let json = r#"{
            "data": {
                "user": {
                    "id": "25025320",
                    "username": "instagram",
                    "full_name": "Instagram",
                    "is_private": false,
                    "followed_by_viewer": false,
                    "profile_pic_url": "https://cdn.example/s150.jpg",
                    "profile_pic_url_hd": "https://cdn.example/hd.jpg",
                    "edge_owner_to_timeline_media": {
                        "count": 2,
                        "page_info": {"has_next_page": true, "end_cursor": "QVFE"},
                        "edges": [
                            {"node": {
                                "__typename": "GraphImage",
                                "id": "1",
                                "shortcode": "Cabc",
                                "display_url": "https://cdn.example/1.jpg",
                                "is_video": false,
                                "taken_at_timestamp": 1700000000
                            }}
                        ]
                    }
                }
            },
            "status": "ok"
        }"#;

        let response: ProfileInfoResponse = serde_json::from_str(json).unwrap();
        let profile = Profile::from(response.data.user.unwrap());

        assert_eq!(profile.id, "25025320");
        assert_eq!(profile.media_count, 2);
        assert_eq!(
            profile.profile_pic_url.as_deref(),
            Some("https://cdn.example/hd.jpg")
        );
        assert!(profile.timeline.page_info.has_next_page);
        assert_eq!(profile.timeline.edges[0].node.typename, "GraphImage");
    }

    #[test]
    fn test_parse_missing_user() {
        let response: ProfileInfoResponse =
            serde_json::from_str(r#"{"data": {"user": null}, "status": "ok"}"#).unwrap();
        assert!(response.data.user.is_none());
    }

    #[test]
    fn test_parse_login_responses() {
        let ok: LoginResponse = serde_json::from_str(
            r#"{"user": true, "userId": "42", "authenticated": true, "status": "ok"}"#,
        )
        .unwrap();
        assert!(ok.authenticated);
        assert_eq!(ok.user_id.as_deref(), Some("42"));

        let two_factor: LoginResponse = serde_json::from_str(
            r#"{"two_factor_required": true, "two_factor_info": {"username": "me"}, "status": "fail"}"#,
        )
        .unwrap();
        assert!(two_factor.two_factor_required);
        assert!(!two_factor.authenticated);
    }
}
