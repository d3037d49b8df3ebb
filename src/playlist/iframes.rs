//! I-frame playlist builder.
//!
//! Drives the muxing layer's frame simulation and emits one
//! EXTINF + EXT-X-BYTERANGE + segment-name triple per key frame.

use bytes::Bytes;

use crate::config::M3u8Config;
use crate::error::{PlaylistError, Result};
use crate::types::{FrameSimulation, StreamMetadata};

use super::fmt::{digit_count, PlaylistBuf, U32_DECIMAL_LEN};
use super::tracks::build_required_tracks;
use super::{append_extinf_tag, append_segment_name, M3U8_FOOTER, SEGMENT_SUFFIX};

/// Largest frame the simulation may report, used for pre-sizing.
const MAX_FRAME_SIZE: u32 = 10 * 1024 * 1024;

pub(crate) fn build_iframe_playlist(
    conf: &M3u8Config,
    base_url: &str,
    include_file_index: bool,
    segment_duration: u32,
    metadata: &StreamMetadata,
    simulation: &mut dyn FrameSimulation,
) -> Result<Bytes> {
    if segment_duration == 0 {
        tracing::error!("iframe playlist requested with zero segment duration");
        return Err(PlaylistError::InvalidSegmentDuration);
    }

    if !simulation.simulation_supported() {
        tracing::error!("simulation not supported for this asset, cannot create iframe playlist");
        return Err(PlaylistError::SimulationUnsupported);
    }

    let required_tracks = build_required_tracks(metadata, include_file_index)?;

    let segment_count = metadata.duration_millis.div_ceil(segment_duration);

    // worst case per frame entry: a millisecond-precision EXTINF whose
    // integer part is bounded by the asset duration in seconds, a byte
    // range with a 32-bit offset and a bounded frame size, and the
    // segment-name line
    let iframe_length = "#EXTINF:.000,\n".len()
        + digit_count(metadata.duration_millis.div_ceil(1000))
        + "#EXT-X-BYTERANGE:@\n".len()
        + U32_DECIMAL_LEN
        + digit_count(MAX_FRAME_SIZE)
        + base_url.len()
        + conf.segment_file_prefix.len()
        + 1
        + digit_count(segment_count)
        + required_tracks.len()
        + SEGMENT_SUFFIX.len();

    let result_size = conf.iframes_header.len()
        + iframe_length * metadata.video_key_frame_count as usize
        + M3U8_FOOTER.len();

    let mut p = PlaylistBuf::with_capacity(result_size)?;
    p.push_str(&conf.iframes_header);

    simulation.simulate_iframes(segment_duration, &mut |frame| {
        append_extinf_tag(&mut p, frame.duration, 1000);
        p.push_str("#EXT-X-BYTERANGE:");
        p.push_uint(frame.size);
        p.push_byte(b'@');
        p.push_uint(frame.offset);
        p.push_byte(b'\n');
        append_segment_name(
            &mut p,
            base_url,
            &conf.segment_file_prefix,
            frame.segment_index,
            &required_tracks,
        );
    });

    p.push_str(M3U8_FOOTER);
    p.finish()
}
