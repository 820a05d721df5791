use std::collections::HashMap;

use m3u8_rs::{Playlist, VariantStream};
use reqwest::{Client, Url};

use crate::{
    error::UpstreamError,
    fetch::fetch_text,
    info::{sort_formats, Format},
};

const VIDEO_CODEC_PREFIXES: [&str; 6] = ["avc", "hvc", "hev", "vp8", "vp09", "av01"];
const AUDIO_CODEC_PREFIXES: [&str; 4] = ["mp4a", "ac-3", "ec-3", "opus"];

/// Fetch an HLS playlist and list the formats it offers, best first.
///
/// A master playlist yields one format per variant. A media playlist is a
/// single format pointing at itself.
pub async fn extract_m3u8_formats(
    client: &Client,
    manifest_url: Url,
) -> Result<Vec<Format>, UpstreamError> {
    let body = fetch_text(client, manifest_url.clone()).await?;
    parse_m3u8_formats(&manifest_url, body.as_bytes())
}

pub fn parse_m3u8_formats(manifest_url: &Url, body: &[u8]) -> Result<Vec<Format>, UpstreamError> {
    let playlist = m3u8_rs::parse_playlist_res(body)
        .map_err(|e| UpstreamError::M3u8ParseError(e.to_string()))?;

    let mut formats = match playlist {
        Playlist::MasterPlaylist(pl) => {
            let mut ids = FormatIds::default();
            pl.variants
                .iter()
                .filter(|v| !v.is_i_frame)
                .map(|v| variant_format(manifest_url, v, &mut ids))
                .collect::<Result<Vec<_>, _>>()?
        }
        Playlist::MediaPlaylist(pl) => {
            if pl.segments.is_empty() && pl.end_list {
                Vec::new()
            } else {
                vec![Format {
                    format_id: "hls".to_string(),
                    url: manifest_url.to_string(),
                    manifest_url: Some(manifest_url.to_string()),
                    protocol: "m3u8".to_string(),
                    ext: "mp4".to_string(),
                    ..Default::default()
                }]
            }
        }
    };

    sort_formats(&mut formats);
    Ok(formats)
}

fn variant_format(
    manifest_url: &Url,
    variant: &VariantStream,
    ids: &mut FormatIds,
) -> Result<Format, UpstreamError> {
    let url = manifest_url.join(&variant.uri)?;
    let (vcodec, acodec) = split_codecs(variant.codecs.as_deref());

    let base_id = match variant.resolution {
        Some(resolution) => format!("hls-{}p", resolution.height),
        None => format!("hls-{}", variant.bandwidth / 1000),
    };

    Ok(Format {
        format_id: ids.assign(base_id),
        url: url.to_string(),
        manifest_url: Some(manifest_url.to_string()),
        protocol: "m3u8".to_string(),
        ext: "mp4".to_string(),
        tbr: Some(variant.bandwidth as f64 / 1000.0),
        width: variant.resolution.map(|r| r.width),
        height: variant.resolution.map(|r| r.height),
        fps: variant.frame_rate,
        vcodec,
        acodec,
    })
}

fn split_codecs(codecs: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(codecs) = codecs else {
        return (None, None);
    };

    let mut vcodec = None;
    let mut acodec = None;
    for codec in codecs.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let lower = codec.to_ascii_lowercase();
        if vcodec.is_none() && VIDEO_CODEC_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            vcodec = Some(codec.to_string());
        } else if acodec.is_none() && AUDIO_CODEC_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            acodec = Some(codec.to_string());
        }
    }

    (vcodec, acodec)
}

/// Hands out unique format ids, suffixing repeated ones with `-n`.
#[derive(Default)]
struct FormatIds(HashMap<String, usize>);

impl FormatIds {
    fn assign(&mut self, base: String) -> String {
        let count = self.0.entry(base.clone()).or_insert(0);
        *count += 1;
        match *count {
            1 => base,
            n => format!("{base}-{}", n - 1),
        }
    }
}
