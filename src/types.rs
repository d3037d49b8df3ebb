/// Kind of a media track, with the video pixel dimensions when present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Video { width: u32, height: u32 },
    Audio,
}

/// Metadata for a single track of a source file
#[derive(Debug, Clone)]
pub struct TrackMetadata {
    pub track_type: TrackType,
    /// 1-based index of this track within its source file
    pub track_index: u32,
    /// 1-based index of the source file this track belongs to
    pub file_index: u32,
    /// URI of the source file, used for absolute master playlist entries
    pub source_uri: String,
    /// Codec identifier as advertised in CODECS attributes (e.g. "avc1.42001e")
    pub codec_name: String,
    /// Track bitrate in bits per second
    pub bitrate: u32,
}

/// Parsed metadata for a whole asset, as handed over by the media layer.
///
/// Tracks are ordered and grouped contiguously by source file; each file
/// contributes at most one video and one audio track.
#[derive(Debug, Clone, Default)]
pub struct StreamMetadata {
    pub tracks: Vec<TrackMetadata>,
    /// Total asset duration in milliseconds
    pub duration_millis: u32,
    /// Number of video key frames across the asset
    pub video_key_frame_count: u32,
}

/// The tracks of one source file
#[derive(Debug, Clone, Copy)]
pub struct FileGroup<'a> {
    pub file_index: u32,
    pub video: Option<&'a TrackMetadata>,
    pub audio: Option<&'a TrackMetadata>,
}

impl<'a> FileGroup<'a> {
    /// The track used to address this group: video when present.
    pub fn primary(&self) -> Option<&'a TrackMetadata> {
        self.video.or(self.audio)
    }
}

impl StreamMetadata {
    pub fn video_track_count(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| matches!(t.track_type, TrackType::Video { .. }))
            .count()
    }

    pub fn audio_track_count(&self) -> usize {
        self.tracks
            .iter()
            .filter(|t| t.track_type == TrackType::Audio)
            .count()
    }

    /// Highest track index in the set, 0 when empty.
    pub fn max_track_index(&self) -> u32 {
        self.tracks.iter().map(|t| t.track_index).max().unwrap_or(0)
    }

    /// Partition the ordered track sequence into per-file groups.
    ///
    /// Both the master playlist size estimate and the fill pass walk the
    /// same grouping, so the two can never disagree on the group count.
    pub fn file_groups(&self) -> Vec<FileGroup<'_>> {
        let mut groups: Vec<FileGroup<'_>> = Vec::new();
        for track in &self.tracks {
            if groups
                .last()
                .map_or(true, |g| g.file_index != track.file_index)
            {
                groups.push(FileGroup {
                    file_index: track.file_index,
                    video: None,
                    audio: None,
                });
            }
            if let Some(group) = groups.last_mut() {
                match track.track_type {
                    TrackType::Video { .. } => group.video = Some(track),
                    TrackType::Audio => group.audio = Some(track),
                }
            }
        }
        groups
    }
}

/// One synthetic key frame yielded by segment simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IFrameEvent {
    /// Segment the frame falls into; consecutive frames may repeat it
    pub segment_index: u32,
    /// Frame duration in milliseconds
    pub duration: u32,
    /// Byte offset of the frame within its segment file
    pub offset: u32,
    /// Frame size in bytes
    pub size: u32,
}

/// Frame-simulation capability of the muxing layer.
///
/// The sequence is lazy, finite and non-restartable: the I-frame playlist
/// builder makes a single pass and never buffers events.
pub trait FrameSimulation {
    /// Whether per-frame simulation works for this asset.
    fn simulation_supported(&self) -> bool;

    /// Invoke `visit` once per key frame, in stream order.
    fn simulate_iframes(&mut self, segment_duration: u32, visit: &mut dyn FnMut(IFrameEvent));
}
