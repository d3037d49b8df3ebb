//! Shared fixtures for playlist tests.

use crate::config::{M3u8Config, PlaylistSettings};
use crate::types::{FrameSimulation, IFrameEvent, StreamMetadata, TrackMetadata, TrackType};

pub(crate) fn video_track(
    file_index: u32,
    track_index: u32,
    bitrate: u32,
    width: u32,
    height: u32,
    codec: &str,
) -> TrackMetadata {
    TrackMetadata {
        track_type: TrackType::Video { width, height },
        track_index,
        file_index,
        source_uri: format!("media/file{}.mp4", file_index),
        codec_name: codec.to_string(),
        bitrate,
    }
}

pub(crate) fn audio_track(
    file_index: u32,
    track_index: u32,
    bitrate: u32,
    codec: &str,
) -> TrackMetadata {
    TrackMetadata {
        track_type: TrackType::Audio,
        track_index,
        file_index,
        source_uri: format!("media/file{}.mp4", file_index),
        codec_name: codec.to_string(),
        bitrate,
    }
}

/// One source file with a 720p video track and a stereo audio track.
pub(crate) fn single_file_set(duration_millis: u32) -> StreamMetadata {
    StreamMetadata {
        tracks: vec![
            video_track(1, 1, 2_000_000, 1280, 720, "avc1"),
            audio_track(1, 1, 128_000, "mp4a"),
        ],
        duration_millis,
        video_key_frame_count: 0,
    }
}

pub(crate) fn default_config() -> M3u8Config {
    M3u8Config::new(&PlaylistSettings::default())
}

pub(crate) fn config_with(segment_duration: u32, version: u32) -> M3u8Config {
    M3u8Config::new(&PlaylistSettings {
        segment_duration,
        version,
        ..PlaylistSettings::default()
    })
}

/// Scripted frame simulation; consumes its frame list on the single pass.
pub(crate) struct StubSimulation {
    pub(crate) supported: bool,
    pub(crate) frames: Vec<IFrameEvent>,
}

impl FrameSimulation for StubSimulation {
    fn simulation_supported(&self) -> bool {
        self.supported
    }

    fn simulate_iframes(&mut self, _segment_duration: u32, visit: &mut dyn FnMut(IFrameEvent)) {
        for frame in self.frames.drain(..) {
            visit(frame);
        }
    }
}
