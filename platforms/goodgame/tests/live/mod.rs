use hikari::{ExtractError, UpstreamError};
use hikari_goodgame::model::ChannelRef;
use serde_json::json;

use crate::common::{GoodGameMock, EMPTY_PLAYLIST, MASTER_PLAYLIST};

fn username(name: &str) -> ChannelRef {
    ChannelRef::Username(name.to_string())
}

#[tokio::test]
async fn test_resolve_online_channel() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": true, "streamKey": "abc", "title": "Foo's stream" }),
    )
    .await
    .mock_text("/manifest/abc_master.m3u8", MASTER_PLAYLIST)
    .await;

    let info = mock.client().resolve(&username("foo")).await.unwrap();

    assert_eq!(info.id, "foo");
    assert_eq!(info.title, "Foo's stream");
    assert_eq!(info.creator.as_deref(), Some("foo"));
    assert!(info.is_live);
    assert_eq!(info.formats.len(), 2);
    assert_eq!(info.formats[0].height, Some(720));
    assert_eq!(
        info.formats[0].url,
        format!("{}/manifest/abc_720/index.m3u8", mock.uri())
    );
    assert!(info
        .formats
        .iter()
        .all(|f| f.manifest_url.as_deref()
            == Some(format!("{}/manifest/abc_master.m3u8", mock.uri()).as_str())));
}

#[tokio::test]
async fn test_offline_channel_skips_manifests() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": false, "streamKey": "abc", "title": "Foo's stream" }),
    )
    .await
    .mock_text("/manifest/abc_master.m3u8", MASTER_PLAYLIST)
    .await;

    let result = mock.client().resolve(&username("foo")).await;

    assert!(matches!(result, Err(ExtractError::Offline(ref id)) if id == "foo"));
    assert_eq!(mock.manifest_requests().await, 0);
}

#[tokio::test]
async fn test_unexpected_status_is_upstream_error() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": "sometimes", "streamKey": "abc", "title": "Foo's stream" }),
    )
    .await;

    let result = mock.client().resolve(&username("foo")).await;

    assert!(matches!(
        result,
        Err(ExtractError::Upstream {
            source: UpstreamError::UnexpectedStatus(_),
            ..
        })
    ));
    assert_eq!(mock.manifest_requests().await, 0);
}

#[tokio::test]
async fn test_falls_back_to_next_template() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": true, "streamKey": "abc", "title": "Foo's stream" }),
    )
    .await
    .mock_status("/manifest/abc_master.m3u8", 404)
    .await
    .mock_text("/hls/abc.m3u8", MASTER_PLAYLIST)
    .await;

    let info = mock.client().resolve(&username("foo")).await.unwrap();

    assert!(!info.formats.is_empty());
    assert!(info
        .formats
        .iter()
        .all(|f| f.url.starts_with(&format!("{}/hls/", mock.uri()))));
    assert_eq!(mock.received("/manifest/").await, 1);
    assert_eq!(mock.received("/hls/").await, 1);
}

#[tokio::test]
async fn test_empty_manifest_falls_back() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": true, "streamKey": "abc", "title": "Foo's stream" }),
    )
    .await
    .mock_text("/manifest/abc_master.m3u8", EMPTY_PLAYLIST)
    .await
    .mock_text("/hls/abc.m3u8", MASTER_PLAYLIST)
    .await;

    let info = mock.client().resolve(&username("foo")).await.unwrap();

    assert_eq!(info.formats.len(), 2);
    assert_eq!(mock.received("/hls/").await, 1);
}

#[tokio::test]
async fn test_fails_after_all_templates_exhausted() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": true, "streamKey": "abc", "title": "Foo's stream" }),
    )
    .await
    .mock_text("/manifest/abc_master.m3u8", EMPTY_PLAYLIST)
    .await
    .mock_status("/hls/abc.m3u8", 500)
    .await;

    let result = mock.client().resolve(&username("foo")).await;

    assert!(matches!(
        result,
        Err(ExtractError::Upstream {
            source: UpstreamError::ManifestsExhausted(2),
            ..
        })
    ));
    assert_eq!(mock.received("/manifest/").await, 1);
    assert_eq!(mock.received("/hls/").await, 1);
}

#[tokio::test]
async fn test_player_token_resolves_same_channel() {
    let mock = GoodGameMock::start().await;
    let stream = json!({
        "online": true,
        "streamKey": "abc",
        "title": "Foo's stream",
        "preview": "https://goodgame.ru/preview/abc.jpg",
        "streamer": { "username": "foo" }
    });
    mock.mock_json("/api/4/streams/2/username/foo", stream.clone())
        .await
        .mock_json_query("/api/player", "src", "abc", json!({ "channel_id": 42 }))
        .await
        .mock_json("/api/4/streams/2/id/42", stream)
        .await
        .mock_text("/manifest/abc_master.m3u8", MASTER_PLAYLIST)
        .await;

    let client = mock.client();
    let by_username = client.resolve(&username("foo")).await.unwrap();
    let by_token = client
        .resolve(&ChannelRef::PlayerToken("abc".to_string()))
        .await
        .unwrap();

    assert_eq!(by_token.id, "foo");
    assert_eq!(by_token, by_username);
}

#[tokio::test]
async fn test_unknown_username() {
    let mock = GoodGameMock::start().await;
    mock.mock_status("/api/4/streams/2/username/nobody", 404)
        .await;

    let result = mock.client().resolve(&username("nobody")).await;
    assert!(matches!(result, Err(ExtractError::NotFound(ref id)) if id == "nobody"));
}

#[tokio::test]
async fn test_unknown_player_token() {
    let mock = GoodGameMock::start().await;
    mock.mock_json_query("/api/player", "src", "zzz", json!({ "channel_id": null }))
        .await;

    let result = mock
        .client()
        .resolve(&ChannelRef::PlayerToken("zzz".to_string()))
        .await;
    assert!(matches!(result, Err(ExtractError::NotFound(ref id)) if id == "zzz"));
}

#[tokio::test]
async fn test_missing_stream_key() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": true, "title": "Foo's stream" }),
    )
    .await;

    let result = mock.client().resolve(&username("foo")).await;
    assert!(matches!(
        result,
        Err(ExtractError::Upstream {
            source: UpstreamError::MissingField("streamKey"),
            ..
        })
    ));
}

#[tokio::test]
async fn test_untitled_stream_uses_channel_id() {
    let mock = GoodGameMock::start().await;
    mock.mock_json(
        "/api/4/streams/2/username/foo",
        json!({ "online": true, "streamKey": "abc" }),
    )
    .await
    .mock_text("/manifest/abc_master.m3u8", MASTER_PLAYLIST)
    .await;

    let info = mock.client().resolve(&username("foo")).await.unwrap();

    assert_eq!(info.title, "foo");
    assert_eq!(info.formats.len(), 2);
}
