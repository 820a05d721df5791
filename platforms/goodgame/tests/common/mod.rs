use hikari::{Client, Url};
use hikari_goodgame::{
    config::{ApiGeneration, GoodGameConfig, ManifestTemplate},
    GoodGameClient,
};
use serde_json::Value;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const MASTER_PLAYLIST: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=854x480
abc_480/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2500000,RESOLUTION=1280x720,FRAME-RATE=60.000
abc_720/index.m3u8
";

pub const EMPTY_PLAYLIST: &str = "#EXTM3U
#EXT-X-TARGETDURATION:4
#EXT-X-ENDLIST
";

/// One mock server standing in for the API, the legacy API, vod storage and
/// the HLS hosts.
pub struct GoodGameMock {
    pub server: MockServer,
}

impl GoodGameMock {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn manifest_templates(&self) -> Vec<String> {
        vec![
            format!("{}/manifest/{{stream_key}}_master.m3u8", self.uri()),
            format!("{}/hls/{{stream_key}}.m3u8", self.uri()),
        ]
    }

    pub fn config(&self, generation: ApiGeneration) -> GoodGameConfig {
        GoodGameConfig {
            api_base: Url::parse(&format!("{}/api/4/", self.uri())).unwrap(),
            legacy_api_base: Url::parse(&format!("{}/api/", self.uri())).unwrap(),
            storage_base: Url::parse(&format!("{}/storage/", self.uri())).unwrap(),
            generation,
            manifest_templates: self
                .manifest_templates()
                .into_iter()
                .map(|t| ManifestTemplate::new(t).unwrap())
                .collect(),
        }
    }

    pub fn client(&self) -> GoodGameClient {
        GoodGameClient::new(Client::new(), self.config(ApiGeneration::V4))
    }

    pub fn legacy_client(&self) -> GoodGameClient {
        GoodGameClient::new(Client::new(), self.config(ApiGeneration::Legacy))
    }

    pub async fn mock_json(&self, mock_path: &str, body: Value) -> &Self {
        Mock::given(method("GET"))
            .and(path(mock_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
        self
    }

    pub async fn mock_json_query(
        &self,
        mock_path: &str,
        key: &str,
        value: &str,
        body: Value,
    ) -> &Self {
        Mock::given(method("GET"))
            .and(path(mock_path))
            .and(query_param(key, value))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
        self
    }

    pub async fn mock_text(&self, mock_path: &str, body: &str) -> &Self {
        Mock::given(method("GET"))
            .and(path(mock_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
        self
    }

    pub async fn mock_status(&self, mock_path: &str, status: u16) -> &Self {
        Mock::given(method("GET"))
            .and(path(mock_path))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
        self
    }

    /// Number of requests received on paths starting with `prefix`.
    pub async fn received(&self, prefix: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path().starts_with(prefix))
            .count()
    }

    pub async fn manifest_requests(&self) -> usize {
        self.received("/manifest/").await + self.received("/hls/").await
    }
}
