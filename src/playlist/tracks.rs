//! Track-selection suffix encoder.
//!
//! A segment or playlist file name carries a short ASCII suffix encoding
//! which source file and tracks it belongs to, e.g. `-f2-v1-a2`.

use crate::error::{PlaylistError, Result};
use crate::types::{StreamMetadata, TrackType};

use super::fmt::{digit_count, uint_digits};

/// Build the `-f<file>-v<track>-a<track>` selection suffix for the set.
///
/// The string is reserved once at its precomputed upper bound; exceeding
/// that bound means the sizing formula and the writer have drifted apart
/// and is reported as an internal-consistency failure.
pub(crate) fn build_required_tracks(
    metadata: &StreamMetadata,
    include_file_index: bool,
) -> Result<String> {
    let mut length = metadata.tracks.len() * (2 + digit_count(metadata.max_track_index()));

    let file_index = match (include_file_index, metadata.tracks.first()) {
        (true, Some(first)) => Some(first.file_index),
        _ => None,
    };
    if let Some(file_index) = file_index {
        length += 2 + digit_count(file_index);
    }

    let mut tracks = String::new();
    tracks.try_reserve_exact(length)?;

    if let Some(file_index) = file_index {
        tracks.push_str("-f");
        uint_digits(file_index, &mut |b| tracks.push(b as char));
    }

    for track in &metadata.tracks {
        tracks.push('-');
        match track.track_type {
            TrackType::Video { .. } => tracks.push('v'),
            TrackType::Audio => tracks.push('a'),
        }
        uint_digits(track.track_index, &mut |b| tracks.push(b as char));
    }

    if tracks.len() > length {
        tracing::error!(
            "required tracks length {} exceeded allocated length {}",
            tracks.len(),
            length
        );
        return Err(PlaylistError::LengthExceeded {
            written: tracks.len(),
            allocated: length,
        });
    }

    Ok(tracks)
}
