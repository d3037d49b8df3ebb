//! Media (index) playlist builder.

use bytes::Bytes;

use crate::config::M3u8Config;
use crate::error::{PlaylistError, Result};
use crate::types::StreamMetadata;

use super::fmt::{digit_count, PlaylistBuf};
use super::tracks::build_required_tracks;
use super::{append_extinf_tag, append_segment_name, M3U8_FOOTER, SEGMENT_SUFFIX};

/// Build the media playlist: one EXTINF + segment-name entry per
/// fixed-duration chunk of the asset, the trailing chunk carrying the
/// remainder.
pub(crate) fn build_index_playlist(
    conf: &M3u8Config,
    base_url: &str,
    include_file_index: bool,
    segment_duration: u32,
    metadata: &StreamMetadata,
) -> Result<Bytes> {
    if segment_duration == 0 {
        tracing::error!("index playlist requested with zero segment duration");
        return Err(PlaylistError::InvalidSegmentDuration);
    }

    let required_tracks = build_required_tracks(metadata, include_file_index)?;

    let mut duration = metadata.duration_millis;
    let segment_count = duration.div_ceil(segment_duration);
    if segment_count > conf.max_segment_count {
        tracing::error!("invalid segment count {}", segment_count);
        return Err(PlaylistError::SegmentCountExceeded {
            count: segment_count,
            max: conf.max_segment_count,
        });
    }

    // per-segment upper bound; the trailing EXTINF is never longer than
    // the cached one because the remainder is below the segment duration
    let segment_length = conf.extinf.len()
        + base_url.len()
        + conf.segment_file_prefix.len()
        + 1
        + digit_count(segment_count)
        + required_tracks.len()
        + SEGMENT_SUFFIX.len();

    let result_size =
        conf.header.len() + segment_length * segment_count as usize + M3U8_FOOTER.len();

    let mut p = PlaylistBuf::with_capacity(result_size)?;
    p.push_str(&conf.header);

    let mut segment_index = 1;
    while duration > 0 {
        if duration >= segment_duration {
            p.push_str(&conf.extinf);
            duration -= segment_duration;
        } else {
            if conf.version >= 3 {
                append_extinf_tag(&mut p, duration, 1000);
            } else {
                append_extinf_tag(&mut p, (duration + 500) / 1000, 1);
            }
            duration = 0;
        }

        append_segment_name(
            &mut p,
            base_url,
            &conf.segment_file_prefix,
            segment_index,
            &required_tracks,
        );
        segment_index += 1;
    }

    p.push_str(M3U8_FOOTER);
    p.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaylistSettings;
    use crate::tests::fixtures::{config_with, default_config, single_file_set};

    fn text(bytes: &Bytes) -> String {
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_segment_count_and_trailing_remainder() {
        let conf = default_config();
        let metadata = single_file_set(95_000);
        let out = build_index_playlist(&conf, "", false, 10_000, &metadata).unwrap();
        let playlist = text(&out);

        assert_eq!(playlist.matches("#EXTINF:").count(), 10);
        assert_eq!(playlist.matches("#EXTINF:10.000,\n").count(), 9);
        assert!(playlist.contains("#EXTINF:5.000,\nseg-10-v1-a1.ts\n"));
        assert!(playlist.starts_with("#EXTM3U\n"));
        assert!(playlist.ends_with("#EXT-X-ENDLIST\n"));
    }

    #[test]
    fn test_declared_durations_sum_to_asset_duration() {
        let conf = default_config();
        let metadata = single_file_set(12_500);
        let out = build_index_playlist(&conf, "", false, 10_000, &metadata).unwrap();
        let playlist = text(&out);

        let total_ms: u32 = playlist
            .lines()
            .filter_map(|l| l.strip_prefix("#EXTINF:"))
            .map(|l| {
                let secs = l.trim_end_matches(',');
                let (int_part, frac_part) = secs.split_once('.').unwrap();
                int_part.parse::<u32>().unwrap() * 1000 + frac_part.parse::<u32>().unwrap()
            })
            .sum();
        assert_eq!(total_ms, 12_500);
    }

    #[test]
    fn test_version_2_rounds_trailing_segment() {
        let conf = config_with(10_000, 2);
        let metadata = single_file_set(12_500);
        let out = build_index_playlist(&conf, "", false, 10_000, &metadata).unwrap();
        let playlist = text(&out);

        assert!(playlist.contains("#EXTINF:10,\nseg-1-v1-a1.ts\n"));
        // (2500 + 500) / 1000 rounds to 3 whole seconds
        assert!(playlist.contains("#EXTINF:3,\nseg-2-v1-a1.ts\n"));
    }

    #[test]
    fn test_base_url_prefixes_segment_names() {
        let conf = default_config();
        let metadata = single_file_set(5_000);
        let out =
            build_index_playlist(&conf, "http://cdn.example.com/", true, 10_000, &metadata)
                .unwrap();
        let playlist = text(&out);
        assert!(playlist.contains("http://cdn.example.com/seg-1-f1-v1-a1.ts\n"));
    }

    #[test]
    fn test_rejects_segment_count_above_maximum() {
        let settings = PlaylistSettings {
            max_segment_count: 4,
            ..PlaylistSettings::default()
        };
        let conf = crate::config::M3u8Config::new(&settings);
        let metadata = single_file_set(50_000);
        match build_index_playlist(&conf, "", false, 10_000, &metadata) {
            Err(PlaylistError::SegmentCountExceeded { count, max }) => {
                assert_eq!(count, 5);
                assert_eq!(max, 4);
            }
            other => panic!("expected SegmentCountExceeded, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_zero_duration_asset() {
        let conf = default_config();
        let metadata = single_file_set(0);
        let out = build_index_playlist(&conf, "", false, 10_000, &metadata).unwrap();
        let playlist = text(&out);
        assert!(!playlist.contains("#EXTINF"));
        assert!(playlist.ends_with("#EXT-X-ENDLIST\n"));
    }

    #[test]
    fn test_zero_segment_duration_rejected() {
        let conf = default_config();
        let metadata = single_file_set(10_000);
        assert!(matches!(
            build_index_playlist(&conf, "", false, 0, &metadata),
            Err(PlaylistError::InvalidSegmentDuration)
        ));
    }
}
