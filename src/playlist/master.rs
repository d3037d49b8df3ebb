//! Master playlist builder.
//!
//! Emits one variant-stream entry per source-file group: a video variant
//! (with the paired audio folded into bandwidth and codec list) or an
//! audio-only variant.

use bytes::Bytes;

use crate::config::M3u8Config;
use crate::error::{PlaylistError, Result};
use crate::types::{StreamMetadata, TrackType};

use super::fmt::{PlaylistBuf, U32_DECIMAL_LEN};
use super::M3U8_HEADER;

const STREAM_INF: &str = "#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=";
const STREAM_INF_SUFFIX: &str = "\"\n";
const URL_SUFFIX: &str = ".m3u8\n";

/// Longest codec identifier the sizing formula accounts for.
const MAX_CODEC_NAME_LEN: usize = 64;

pub(crate) fn build_master_playlist(
    conf: &M3u8Config,
    base_url: &str,
    include_file_index: bool,
    metadata: &StreamMetadata,
) -> Result<Bytes> {
    // the per-variant worst case below assumes capped codec names
    for track in &metadata.tracks {
        if track.codec_name.len() > MAX_CODEC_NAME_LEN {
            tracing::error!(
                "codec name \"{}\" exceeds {} bytes",
                track.codec_name,
                MAX_CODEC_NAME_LEN
            );
            return Err(PlaylistError::CodecNameTooLong(track.codec_name.clone()));
        }
    }

    let max_video_stream_inf = STREAM_INF.len()
        + ",RESOLUTION=".len()
        + ",CODECS=\"".len()
        + 3 * U32_DECIMAL_LEN
        + 1
        + 2 * MAX_CODEC_NAME_LEN
        + 1
        + STREAM_INF_SUFFIX.len();
    let max_audio_stream_inf = STREAM_INF.len()
        + ",CODECS=\"".len()
        + U32_DECIMAL_LEN
        + MAX_CODEC_NAME_LEN
        + STREAM_INF_SUFFIX.len();

    let groups = metadata.file_groups();

    let mut result_size = M3U8_HEADER.len()
        + metadata.video_track_count() * max_video_stream_inf
        + metadata.audio_track_count() * max_audio_stream_inf;

    for group in &groups {
        let Some(stream) = group.primary() else {
            continue;
        };
        if !base_url.is_empty() {
            result_size += base_url.len() + stream.source_uri.len() + 1;
        }
        result_size += conf.index_file_prefix.len();
        result_size += "-f-v-a".len() + 3 * U32_DECIMAL_LEN;
        result_size += URL_SUFFIX.len();
    }

    let mut p = PlaylistBuf::with_capacity(result_size)?;
    p.push_str(M3U8_HEADER);

    for group in &groups {
        let Some(stream) = group.primary() else {
            continue;
        };

        // variant-stream tag
        if let Some(video) = group.video {
            let TrackType::Video { width, height } = video.track_type else {
                continue;
            };
            let mut bitrate = video.bitrate;
            if let Some(audio) = group.audio {
                bitrate += audio.bitrate;
            }
            p.push_str(STREAM_INF);
            p.push_uint(bitrate);
            p.push_str(",RESOLUTION=");
            p.push_uint(width);
            p.push_byte(b'x');
            p.push_uint(height);
            p.push_str(",CODECS=\"");
            p.push_str(&video.codec_name);
            if let Some(audio) = group.audio {
                p.push_byte(b',');
                p.push_str(&audio.codec_name);
            }
        } else {
            p.push_str(STREAM_INF);
            p.push_uint(stream.bitrate);
            p.push_str(",CODECS=\"");
            p.push_str(&stream.codec_name);
        }
        p.push_str(STREAM_INF_SUFFIX);

        // variant url
        if !base_url.is_empty() {
            // absolute url only
            p.push_str(base_url);
            p.push_str(&stream.source_uri);
            p.push_byte(b'/');
        }

        p.push_str(&conf.index_file_prefix);
        if base_url.is_empty() && include_file_index {
            p.push_str("-f");
            p.push_uint(stream.file_index);
        }

        if let Some(video) = group.video {
            p.push_str("-v");
            p.push_uint(video.track_index);
        }
        if let Some(audio) = group.audio {
            p.push_str("-a");
            p.push_uint(audio.track_index);
        }
        p.push_str(URL_SUFFIX);
    }

    p.finish()
}
