//! Profile download logic.

use std::path::Path;

use crate::api::{InstagramApi, PostNode, Profile};
use crate::download::media::{download_media_item, download_profile_pic};
use crate::download::state::TransferStats;
use crate::error::{Error, Result};
use crate::media::{needs_details, parse_post};
use crate::output::create_item_bar;

/// Download the profile picture and all posts of a profile into `dest`.
///
/// `dest` is created if missing, so library callers that skip
/// [`prepare_destination`](crate::fs::prepare_destination) still work.
pub async fn download_profile(
    api: &InstagramApi,
    profile: &Profile,
    dest: &Path,
) -> Result<TransferStats> {
    let is_own_profile = api.username() == Some(profile.username.as_str());
    if profile.is_private && !profile.followed_by_viewer && !is_own_profile {
        return Err(Error::PrivateProfileNotFollowed(profile.username.clone()));
    }

    tokio::fs::create_dir_all(dest).await?;

    let mut stats = TransferStats::default();

    if let Some(url) = &profile.profile_pic_url {
        download_profile_pic(api, url, dest, &mut stats).await?;
    }

    let progress = create_item_bar(profile.media_count, "Posts");
    let result = download_posts(api, profile, dest, &mut stats, |n| progress.inc(n)).await;
    progress.finish_and_clear();
    result?;

    tracing::debug!(
        "Profile {} complete: {} pictures, {} videos",
        profile.username,
        stats.pic_count,
        stats.vid_count
    );

    Ok(stats)
}

/// Walk every timeline page, starting with the one embedded in the profile.
async fn download_posts(
    api: &InstagramApi,
    profile: &Profile,
    dest: &Path,
    stats: &mut TransferStats,
    on_post: impl Fn(u64),
) -> Result<()> {
    let mut page = profile.timeline.clone();

    loop {
        for edge in &page.edges {
            download_post(api, &edge.node, dest, stats).await?;
            on_post(1);
        }

        if !page.page_info.has_next_page {
            break;
        }

        let Some(cursor) = page.page_info.end_cursor.clone() else {
            tracing::debug!("Timeline claims more pages but has no cursor");
            break;
        };

        api.pace().await;
        page = api.get_timeline(profile, &cursor).await?;
    }

    Ok(())
}

async fn download_post(
    api: &InstagramApi,
    node: &PostNode,
    dest: &Path,
    stats: &mut TransferStats,
) -> Result<()> {
    stats.posts_seen += 1;

    let details;
    let node = match node.shortcode.as_deref() {
        Some(shortcode) if needs_details(node) => {
            tracing::debug!("Fetching full post {}", shortcode);
            details = api.get_post(shortcode).await?;
            &details
        }
        _ => node,
    };

    for item in parse_post(node, api.options()) {
        download_media_item(api, &item, dest, stats).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MediaClient, SessionOptions};
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(server: &MockServer) -> InstagramApi {
        let mut config = Config::for_target("someone");
        config.options.request_delay_ms = 0;
        InstagramApi::new(&config, SessionOptions::default())
            .unwrap()
            .with_base_urls(&server.uri(), &server.uri())
            .unwrap()
    }

    async fn mount_media(server: &MockServer, media_path: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(media_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_download_full_profile() {
        let server = MockServer::start().await;
        let base = server.uri();

        Mock::given(method("GET"))
            .and(path("/api/v1/users/web_profile_info/"))
            .and(query_param("username", "public_user"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"{{"data": {{"user": {{
                    "id": "7", "username": "public_user", "is_private": false,
                    "profile_pic_url_hd": "{base}/media/pic.jpg",
                    "edge_owner_to_timeline_media": {{
                        "count": 2,
                        "page_info": {{"has_next_page": true, "end_cursor": "c1"}},
                        "edges": [{{"node": {{
                            "__typename": "GraphImage", "id": "1", "shortcode": "A1",
                            "display_url": "{base}/media/one.jpg", "is_video": false,
                            "taken_at_timestamp": 1700000000
                        }}}}]
                    }}
                }}}}, "status": "ok"}}"#
            )))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/graphql/query/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"{{"data": {{"user": {{"edge_owner_to_timeline_media": {{
                    "count": 2,
                    "page_info": {{"has_next_page": false, "end_cursor": null}},
                    "edges": [{{"node": {{
                        "__typename": "GraphSidecar", "id": "2", "shortcode": "B2",
                        "display_url": "{base}/media/cover.jpg", "is_video": false,
                        "taken_at_timestamp": 1600000000,
                        "edge_sidecar_to_children": {{"edges": [
                            {{"node": {{"__typename": "GraphImage", "id": "3",
                                "display_url": "{base}/media/two.jpg", "is_video": false}}}},
                            {{"node": {{"__typename": "GraphVideo", "id": "4",
                                "display_url": "{base}/media/thumb.jpg", "is_video": true,
                                "video_url": "{base}/media/three.mp4"}}}}
                        ]}}
                    }}}}]
                }}}}}}, "status": "ok"}}"#
            )))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/media/pic.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("last-modified", "Tue, 14 Nov 2023 22:13:20 GMT")
                    .set_body_string("pic"),
            )
            .mount(&server)
            .await;
        mount_media(&server, "/media/one.jpg", "one").await;
        mount_media(&server, "/media/two.jpg", "two").await;
        mount_media(&server, "/media/three.mp4", "three").await;

        let dir = TempDir::new().unwrap();
        let api = test_api(&server);
        let profile = api.profile("public_user").await.unwrap();
        let stats = api.download_profile(&profile, dir.path()).await.unwrap();

        assert_eq!(stats.pic_count, 3);
        assert_eq!(stats.vid_count, 1);
        assert_eq!(stats.posts_seen, 2);

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "2020-09-13_12-26-40_UTC_1.jpg",
                "2020-09-13_12-26-40_UTC_2.mp4",
                "2023-11-14_22-13-20_UTC.jpg",
                "2023-11-14_22-13-20_UTC_profile_pic.jpg",
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("2020-09-13_12-26-40_UTC_2.mp4")).unwrap(),
            "three"
        );
    }

    #[tokio::test]
    async fn test_private_profile_not_followed() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        let api = test_api(&server);

        let profile = Profile {
            id: "9".into(),
            username: "secret".into(),
            is_private: true,
            followed_by_viewer: false,
            ..Default::default()
        };

        let err = api.download_profile(&profile, dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::PrivateProfileNotFollowed(name) if name == "secret"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_existing_files_are_kept() {
        let server = MockServer::start().await;
        let base = server.uri();
        mount_media(&server, "/media/one.jpg", "new").await;
        mount_media(&server, "/media/two.jpg", "two").await;

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2023-11-14_22-13-20_UTC.jpg"), "old").unwrap();
        fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

        let node = |id: &str, shortcode: &str, url: String, ts: i64| PostNode {
            typename: "GraphImage".into(),
            id: id.into(),
            shortcode: Some(shortcode.into()),
            display_url: url,
            taken_at_timestamp: Some(ts),
            ..Default::default()
        };

        let mut profile = Profile {
            id: "7".into(),
            username: "public_user".into(),
            media_count: 2,
            ..Default::default()
        };
        profile.timeline.edges = vec![
            crate::api::Edge {
                node: node("1", "A1", format!("{base}/media/one.jpg"), 1_700_000_000),
            },
            crate::api::Edge {
                node: node("2", "A2", format!("{base}/media/two.jpg"), 1_600_000_000),
            },
        ];

        let api = test_api(&server);
        let stats = api.download_profile(&profile, dir.path()).await.unwrap();

        assert_eq!(stats.skipped_count, 1);
        assert_eq!(stats.pic_count, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("2023-11-14_22-13-20_UTC.jpg")).unwrap(),
            "old"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "unrelated"
        );
        assert!(dir.path().join("2020-09-13_12-26-40_UTC.jpg").exists());
    }

    #[tokio::test]
    async fn test_missing_destination_is_created() {
        let server = MockServer::start().await;
        mount_media(&server, "/media/one.jpg", "one").await;

        let mut profile = Profile {
            id: "7".into(),
            username: "public_user".into(),
            media_count: 1,
            ..Default::default()
        };
        profile.timeline.edges = vec![crate::api::Edge {
            node: PostNode {
                id: "1".into(),
                shortcode: Some("A1".into()),
                display_url: format!("{}/media/one.jpg", server.uri()),
                taken_at_timestamp: Some(1_700_000_000),
                ..Default::default()
            },
        }];

        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("nested").join("public_user");
        let api = test_api(&server);
        let stats = api.download_profile(&profile, &dest).await.unwrap();

        assert_eq!(stats.pic_count, 1);
        assert_eq!(
            fs::read_to_string(dest.join("2023-11-14_22-13-20_UTC.jpg")).unwrap(),
            "one"
        );
    }

    #[tokio::test]
    async fn test_failed_media_download_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/gone.jpg"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut profile = Profile {
            id: "7".into(),
            username: "public_user".into(),
            ..Default::default()
        };
        profile.timeline.edges = vec![crate::api::Edge {
            node: PostNode {
                id: "1".into(),
                shortcode: Some("A1".into()),
                display_url: format!("{}/media/gone.jpg", server.uri()),
                taken_at_timestamp: Some(1_700_000_000),
                ..Default::default()
            },
        }];

        let dir = TempDir::new().unwrap();
        let api = test_api(&server);
        let err = api.download_profile(&profile, dir.path()).await.unwrap_err();
        assert!(matches!(err, Error::Download(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
