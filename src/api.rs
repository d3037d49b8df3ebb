use bytes::Bytes;

use crate::config::M3u8Config;
use crate::error::Result;
use crate::playlist;
use crate::types::{FrameSimulation, StreamMetadata};

/// Build the media (index) playlist for an asset.
pub fn build_index_playlist(
    conf: &M3u8Config,
    base_url: &str,
    include_file_index: bool,
    segment_duration: u32,
    metadata: &StreamMetadata,
) -> Result<Bytes> {
    playlist::index::build_index_playlist(
        conf,
        base_url,
        include_file_index,
        segment_duration,
        metadata,
    )
}

/// Build the I-frame playlist for an asset.
///
/// Fails with [`crate::PlaylistError::SimulationUnsupported`] when the
/// muxing layer cannot simulate frames for this asset.
pub fn build_iframe_playlist(
    conf: &M3u8Config,
    base_url: &str,
    include_file_index: bool,
    segment_duration: u32,
    metadata: &StreamMetadata,
    simulation: &mut dyn FrameSimulation,
) -> Result<Bytes> {
    playlist::iframes::build_iframe_playlist(
        conf,
        base_url,
        include_file_index,
        segment_duration,
        metadata,
        simulation,
    )
}

/// Build the master playlist referencing one variant per file group.
pub fn build_master_playlist(
    conf: &M3u8Config,
    base_url: &str,
    include_file_index: bool,
    metadata: &StreamMetadata,
) -> Result<Bytes> {
    playlist::master::build_master_playlist(conf, base_url, include_file_index, metadata)
}
