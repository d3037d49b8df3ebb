//! Playlist generation module
//!
//! Renders the three m3u8 variants (index, I-frame, master) from stream
//! metadata. Every builder computes an upper bound on the output length,
//! reserves it once, fills sequentially, and asserts the written length
//! stayed within the bound.

pub(crate) mod fmt;
pub(crate) mod iframes;
pub(crate) mod index;
pub(crate) mod master;
pub(crate) mod tracks;

use self::fmt::PlaylistBuf;

pub(crate) const M3U8_HEADER: &str = "#EXTM3U\n";
pub(crate) const M3U8_FOOTER: &str = "#EXT-X-ENDLIST\n";
pub(crate) const SEGMENT_SUFFIX: &str = ".ts\n";

/// Append `#EXTINF:<duration/scale>,\n`.
pub(crate) fn append_extinf_tag(p: &mut PlaylistBuf, duration: u32, scale: u32) {
    p.push_str("#EXTINF:");
    p.push_fixed(duration, scale);
    p.push_str(",\n");
}

/// Append the segment file-name line
/// `<base_url><prefix>-<segment_index><required_tracks>.ts\n`.
pub(crate) fn append_segment_name(
    p: &mut PlaylistBuf,
    base_url: &str,
    prefix: &str,
    segment_index: u32,
    required_tracks: &str,
) {
    p.push_str(base_url);
    p.push_str(prefix);
    p.push_byte(b'-');
    p.push_uint(segment_index);
    p.push_str(required_tracks);
    p.push_str(SEGMENT_SUFFIX);
}
