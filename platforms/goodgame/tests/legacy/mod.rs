use hikari::{ExtractError, UpstreamError};
use hikari_goodgame::model::{ChannelRef, StreamStatus};
use serde_json::{json, Value};

use crate::common::{GoodGameMock, MASTER_PLAYLIST};

fn channel_status(status: &str) -> Value {
    json!({
        "42": {
            "stream_id": "42",
            "key": "foo",
            "title": "Foo's stream",
            "status": status,
            "thumb": "https://goodgame.ru/files/logotypes/ch_42.jpg",
            "embed": "<iframe frameborder=\"0\" width=\"800\" height=\"450\" src=\"https://goodgame.ru/player?abc\" allowfullscreen></iframe>"
        }
    })
}

#[tokio::test]
async fn test_legacy_live_channel_scrapes_stream_key() {
    let mock = GoodGameMock::start().await;
    mock.mock_json_query("/api/getchannelstatus", "id", "foo", channel_status("Live"))
        .await
        .mock_text("/manifest/abc_master.m3u8", MASTER_PLAYLIST)
        .await;

    let info = mock
        .legacy_client()
        .resolve(&ChannelRef::Username("foo".to_string()))
        .await
        .unwrap();

    assert_eq!(info.id, "foo");
    assert_eq!(info.title, "Foo's stream");
    assert_eq!(
        info.thumbnail.as_deref(),
        Some("https://goodgame.ru/files/logotypes/ch_42.jpg")
    );
    assert!(info.is_live);
    assert_eq!(info.formats.len(), 2);
}

#[tokio::test]
async fn test_legacy_dead_channel_is_offline() {
    let mock = GoodGameMock::start().await;
    mock.mock_json_query("/api/getchannelstatus", "id", "foo", channel_status("Dead"))
        .await;

    let result = mock
        .legacy_client()
        .resolve(&ChannelRef::Username("foo".to_string()))
        .await;

    assert!(matches!(result, Err(ExtractError::Offline(_))));
    assert_eq!(mock.manifest_requests().await, 0);
}

#[tokio::test]
async fn test_legacy_unexpected_status() {
    let mock = GoodGameMock::start().await;
    mock.mock_json_query("/api/getchannelstatus", "id", "foo", channel_status("Pending"))
        .await;

    let client = mock.legacy_client();
    let reference = ChannelRef::Username("foo".to_string());
    let channel = client.channel(&reference).await.unwrap();
    assert_eq!(
        channel.status,
        StreamStatus::Unknown("\"Pending\"".to_string())
    );

    let result = client.resolve(&reference).await;
    assert!(matches!(
        result,
        Err(ExtractError::Upstream {
            source: UpstreamError::UnexpectedStatus(_),
            ..
        })
    ));
}

#[tokio::test]
async fn test_legacy_unknown_channel() {
    let mock = GoodGameMock::start().await;
    mock.mock_json_query("/api/getchannelstatus", "id", "nobody", json!([]))
        .await;

    let result = mock
        .legacy_client()
        .resolve(&ChannelRef::Username("nobody".to_string()))
        .await;
    assert!(matches!(result, Err(ExtractError::NotFound(ref id)) if id == "nobody"));
}

#[tokio::test]
async fn test_legacy_player_token_resolves_same_channel() {
    let mock = GoodGameMock::start().await;
    mock.mock_json_query("/api/getchannelstatus", "id", "foo", channel_status("Live"))
        .await
        .mock_json_query(
            "/api/player",
            "src",
            "abc",
            json!({ "channel_id": 42, "channel_key": "foo" }),
        )
        .await
        .mock_text("/manifest/abc_master.m3u8", MASTER_PLAYLIST)
        .await;

    let client = mock.legacy_client();
    let by_username = client
        .resolve(&ChannelRef::Username("foo".to_string()))
        .await
        .unwrap();
    let by_token = client
        .resolve(&ChannelRef::PlayerToken("abc".to_string()))
        .await
        .unwrap();

    assert_eq!(by_token.id, "foo");
    assert_eq!(by_token, by_username);
}
