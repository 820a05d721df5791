pub const API_V4_BASE_URL: &str = "https://goodgame.ru/api/4/";
pub const LEGACY_API_BASE_URL: &str = "https://goodgame.ru/api/";
pub const STORAGE_BASE_URL: &str = "https://storage2.goodgame.ru/";

/// Live manifest locations, newest first.
pub const MANIFEST_TEMPLATES: [&str; 3] = [
    "https://hls.goodgame.ru/manifest/{stream_key}_master.m3u8",
    "https://hls.goodgame.ru/hls/{stream_key}_master.m3u8",
    "https://hls.goodgame.ru/hls/{stream_key}.m3u8",
];

pub const HOSTS: [&str; 2] = ["goodgame.ru", "www.goodgame.ru"];

/// Vod preview keys, in ascending preference.
pub const THUMBNAIL_KEYS: [&str; 3] = ["jpgSmall", "jpgFull", "png"];

pub const ARG_API_BASE: &str = "goodgame-api-base";
pub const ARG_LEGACY_API_BASE: &str = "goodgame-legacy-api-base";
pub const ARG_STORAGE_BASE: &str = "goodgame-storage-base";
pub const ARG_API_GENERATION: &str = "goodgame-api-generation";
pub const ARG_MANIFEST_TEMPLATE: &str = "goodgame-manifest-template";

pub const ENV_API_BASE: &str = "HIKARI_GOODGAME_API_BASE";
pub const ENV_LEGACY_API_BASE: &str = "HIKARI_GOODGAME_LEGACY_API_BASE";
pub const ENV_STORAGE_BASE: &str = "HIKARI_GOODGAME_STORAGE_BASE";
pub const ENV_API_GENERATION: &str = "HIKARI_GOODGAME_API_GENERATION";
pub const ENV_MANIFEST_TEMPLATE: &str = "HIKARI_GOODGAME_MANIFEST_TEMPLATE";

// stream_id and stream_key are not always the same:
// id = 5, key = "6" (Miker)
// id = 1644, key = "pomi" (Pomi)
#[cfg(test)]
pub const MIKER_STREAM_KEY: &str = "6";
#[cfg(test)]
pub const MIKER_STREAM_ID: u64 = 5;
