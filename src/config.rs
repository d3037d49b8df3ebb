//! Playlist configuration.
//!
//! `PlaylistSettings` is the raw configuration surface; `M3u8Config` is
//! built from it once per configuration change and caches the header,
//! I-frame header and fixed EXTINF templates so per-request builds never
//! re-format them.

use serde::Deserialize;

use crate::playlist::fmt::fixed_digits;

/// Raw playlist settings, deserialized from the server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Target segment duration in milliseconds.
    pub segment_duration: u32,
    /// Playlist format version advertised in EXT-X-VERSION.
    pub version: u32,
    /// Encryption key file name; when set the header carries an
    /// EXT-X-KEY tag pointing at it.
    pub encryption_key_file: Option<String>,
    /// File-name prefix for media segments.
    pub segment_file_prefix: String,
    /// File-name prefix for index playlists.
    pub index_file_prefix: String,
    /// Upper bound on the number of segments in one asset.
    pub max_segment_count: u32,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            segment_duration: 10_000,
            version: 3,
            encryption_key_file: None,
            segment_file_prefix: "seg".to_string(),
            index_file_prefix: "index".to_string(),
            // more than 1 day when using 10 sec segments
            max_segment_count: 10 * 1024,
        }
    }
}

impl PlaylistSettings {
    /// Parse settings from a TOML document.
    pub fn from_toml(input: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.segment_duration == 0 {
            return Err("segment duration must be positive".to_string());
        }
        if self.max_segment_count == 0 {
            return Err("max segment count must be positive".to_string());
        }
        if self.segment_file_prefix.is_empty() || self.index_file_prefix.is_empty() {
            return Err("file name prefixes must not be empty".to_string());
        }
        Ok(())
    }
}

/// Cached playlist templates.
///
/// Written once at configuration load and read-only afterwards; request
/// handlers share it by reference.
#[derive(Debug, Clone)]
pub struct M3u8Config {
    pub(crate) version: u32,
    pub(crate) max_segment_count: u32,
    pub(crate) segment_file_prefix: String,
    pub(crate) index_file_prefix: String,
    /// Media playlist header with target duration, optional key tag and
    /// version interpolated.
    pub(crate) header: String,
    /// I-frame playlist header.
    pub(crate) iframes_header: String,
    /// Fixed EXTINF tag reused for every whole segment.
    pub(crate) extinf: String,
}

impl M3u8Config {
    pub fn new(settings: &PlaylistSettings) -> Self {
        let extinf = if settings.version >= 3 {
            extinf_template(settings.segment_duration, 1000)
        } else {
            extinf_template((settings.segment_duration + 500) / 1000, 1)
        };

        let key_tag = match &settings.encryption_key_file {
            Some(name) => format!("#EXT-X-KEY:METHOD=AES-128,URI=\"{}\"\n", name),
            None => String::new(),
        };

        // EXT-X-TARGETDURATION is the segment duration rounded to the
        // nearest whole second
        let header = format!(
            "#EXTM3U\n\
             #EXT-X-TARGETDURATION:{}\n\
             #EXT-X-ALLOW-CACHE:YES\n\
             #EXT-X-PLAYLIST-TYPE:VOD\n\
             {}\
             #EXT-X-VERSION:{}\n\
             #EXT-X-MEDIA-SEQUENCE:1\n",
            (settings.segment_duration + 500) / 1000,
            key_tag,
            settings.version,
        );

        // I-FRAMES-ONLY requires protocol version 4 regardless of the
        // media playlist version
        let iframes_header = format!(
            "#EXTM3U\n\
             #EXT-X-TARGETDURATION:{}\n\
             #EXT-X-VERSION:4\n\
             #EXT-X-MEDIA-SEQUENCE:1\n\
             #EXT-X-I-FRAMES-ONLY\n",
            settings.segment_duration.div_ceil(1000),
        );

        tracing::debug!(
            "m3u8 config: segment duration {} ms, version {}",
            settings.segment_duration,
            settings.version
        );

        Self {
            version: settings.version,
            max_segment_count: settings.max_segment_count,
            segment_file_prefix: settings.segment_file_prefix.clone(),
            index_file_prefix: settings.index_file_prefix.clone(),
            header,
            iframes_header,
            extinf,
        }
    }
}

fn extinf_template(duration: u32, scale: u32) -> String {
    let mut tag = String::from("#EXTINF:");
    fixed_digits(duration, scale, &mut |b| tag.push(b as char));
    tag.push_str(",\n");
    tag
}
