use crate::error::Result;
use crate::tables::{self, FrameRate};
use encoding_rs::{Encoding, BIG5, EUC_KR, GB18030, GBK, SHIFT_JIS, UTF_16BE, UTF_8};
use std::{
    fmt::{self, Debug, Display},
    io::{Cursor, Read, Seek},
};

/// A decoded length-prefixed section.
///
/// `data` is `None` exactly when the declared `length` is zero, i.e. the
/// section is present in the file but carries no content.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    /// The declared length, not counting the length field itself.
    pub length: u32,
    pub data: Option<T>,
}

impl<T> Section<T> {
    pub(crate) fn empty() -> Self {
        Section {
            length: 0,
            data: None,
        }
    }

    pub(crate) fn new(length: u32, data: T) -> Self {
        Section {
            length,
            data: Some(data),
        }
    }

    /// Returns `true` if the section was declared with a length of zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    pub fn get(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.data
    }
}

/// A complete movie playlist file.
///
/// See the [crate-level docs] for high-level documentation about how to use this type.
///
/// [crate-level docs]: ../index.html
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Mpls {
    pub header: MoviePlaylist,
    pub app_info_playlist: Section<AppInfoPlaylist>,
    pub playlist: Section<Playlist>,
    pub marks: Section<PlaylistMarks>,
    /// `None` if the header carries no extension data address.
    pub extension_data: Option<Section<ExtensionData>>,
}

/// Represents a playlist's angle.
///
/// "Angles", as they are called, are just a variation of a playlist where one
/// or more segments are swapped out for different ones. The overall number of
/// segments, however, is always the same for all angles.
///
/// You can use the [`segments`] method to retrieve the playlist segments
/// associated with this angle.
///
/// [`segments`]: #method.segments
#[derive(Copy, Clone, Debug)]
pub struct PlaylistAngle<'mpls> {
    /// The angle index in this playlist.
    pub index: u8,
    mpls: &'mpls Mpls,
}

impl Display for PlaylistAngle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl Mpls {
    /// Decodes a whole movie playlist from a seekable source.
    ///
    /// The source is rewound to its start first. Every top-level section is
    /// then located through the addresses in the file header.
    ///
    /// # Examples
    /// ```no_run
    /// # fn main() -> Result<(), bluray_mpls::MplsError> {
    /// use std::fs::File;
    /// use bluray_mpls::Mpls;
    ///
    /// let mut file = File::open("00800.mpls")?;
    /// let mpls = Mpls::load(&mut file)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load<R: Read + Seek>(reader: &mut R) -> Result<Mpls> {
        crate::load::load_mpls(reader)
    }

    /// Reads the whole of `reader` into memory and decodes it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Mpls> {
        let bytes = {
            let mut buffer = Vec::new();
            reader.read_to_end(&mut buffer)?;
            buffer
        };

        Mpls::parse(&bytes)
    }

    /// Decodes a movie playlist that is already in memory.
    pub fn parse(bytes: &[u8]) -> Result<Mpls> {
        Mpls::load(&mut Cursor::new(bytes))
    }

    /// Gets all of the movie's angles.
    ///
    /// This method will always return at least one element, since it counts the
    /// main feature as an angle regardless of whether the movie contains any
    /// additional angles.
    pub fn angles(&self) -> Vec<PlaylistAngle<'_>> {
        let n = self
            .play_items()
            .map(|p| p.multi_angle.as_ref().map_or(1, |m| m.angles.len() + 1))
            .max()
            .unwrap_or(1);

        (0..n)
            .map(|i| PlaylistAngle {
                index: i as u8,
                mpls: self,
            })
            .collect()
    }

    /// Iterates over the non-empty play items of the playlist, in playback order.
    pub fn play_items(&self) -> impl Iterator<Item = &PlayItem> {
        self.playlist
            .get()
            .into_iter()
            .flat_map(|p| p.play_items.iter().filter_map(Section::get))
    }
}

impl<'mpls> PlaylistAngle<'mpls> {
    /// Gets all segments for this angle, one per play item.
    ///
    /// The clips borrow from the [`Mpls`], not from this handle.
    pub fn segments(&self) -> Vec<&'mpls Clip> {
        self.mpls
            .play_items()
            .map(|play_item| play_item.clip_for_angle(self.index))
            .collect()
    }
}

/// The fixed-size file header.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviePlaylist {
    /// Always `"MPLS"`.
    pub type_indicator: String,
    /// e.g. `"0200"` or `"0300"`.
    pub version_number: String,
    pub playlist_start_address: u32,
    pub playlist_mark_start_address: u32,
    /// Zero if the file has no extension data.
    pub extension_data_start_address: u32,
}

impl MoviePlaylist {
    /// Size of the header in bytes, reserved area included.
    pub const SIZE: usize = 40;
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackType {
    Standard,
    Random,
    Shuffle,
    Unrecognized(u8),
}

impl PlaybackType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x1 => PlaybackType::Standard,
            0x2 => PlaybackType::Random,
            0x3 => PlaybackType::Shuffle,
            n => PlaybackType::Unrecognized(n),
        }
    }

    /// Random and shuffle playback carry a playback count.
    pub fn has_playback_count(&self) -> bool {
        matches!(self, PlaybackType::Random | PlaybackType::Shuffle)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AppInfoPlaylist {
    pub playback_type: PlaybackType,
    pub playback_count: Option<u16>,
    pub uo_mask_table: u64,
    pub misc_flags: u16,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub play_items: Vec<Section<PlayItem>>,
    pub sub_paths: Vec<Section<SubPath>>,
}

/// A clip file, also known as a segment.
///
/// This identifies the playable stream file. `file_name` consists of 5 numbers
/// (e.g. "00055"), and `codec_id` of 4 letters which will usually be "M2TS" on
/// blu-rays.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub file_name: String,
    pub codec_id: String,
}

/// An alternative clip for one angle of a multi-angle play item.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Angle {
    pub clip: Clip,
    pub ref_to_stcid: u8,
}

/// The angle block of a multi-angle play item.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiAngle {
    /// Number of angles, the play item's own clip included.
    pub nb_angles: u8,
    pub misc_flags: u8,
    /// The clips of angles `1..nb_angles`.
    pub angles: Vec<Angle>,
}

impl MultiAngle {
    pub fn is_different_audios(&self) -> bool {
        self.misc_flags & 0x2 != 0
    }

    pub fn is_seamless_angle_change(&self) -> bool {
        self.misc_flags & 0x1 != 0
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayItem {
    pub clip: Clip,
    pub misc_flags_1: u16,
    pub is_multi_angle: bool,
    pub ref_to_stcid: u8,
    pub in_time: TimeStamp,
    pub out_time: TimeStamp,
    pub uo_mask_table: u64,
    pub misc_flags_2: u8,
    pub still_mode: u8,
    /// Only present when `still_mode` is 1 (finite still).
    pub still_time: Option<u16>,
    /// Only present when `is_multi_angle` is set.
    pub multi_angle: Option<MultiAngle>,
    pub stn_table: Section<StnTable>,
}

impl PlayItem {
    /// Returns the clip used for the angle at `index`, falling back to the
    /// main clip if this play item has no such angle.
    pub fn clip_for_angle(&self, index: u8) -> &Clip {
        match index {
            0 => &self.clip,
            i => self
                .multi_angle
                .as_ref()
                .and_then(|m| m.angles.get(usize::from(i - 1)))
                .map_or(&self.clip, |a| &a.clip),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiClipEntry {
    pub clip: Clip,
    pub ref_to_stcid: u8,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiClip {
    /// Number of clips, the sub play item's own clip included.
    pub nb_multi_clip_entries: u8,
    pub entries: Vec<MultiClipEntry>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPlayItem {
    pub clip: Clip,
    pub misc_flags_1: u32,
    pub is_multi_clip_entries: bool,
    pub ref_to_stcid: u8,
    pub in_time: TimeStamp,
    pub out_time: TimeStamp,
    pub sync_play_item_id: u16,
    pub sync_start_pts: u32,
    /// Only present when `is_multi_clip_entries` is set.
    pub multi_clip: Option<MultiClip>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPath {
    pub sub_path_type: u8,
    pub misc_flags_1: u16,
    pub sub_play_items: Vec<Section<SubPlayItem>>,
}

impl SubPath {
    pub fn is_repeat(&self) -> bool {
        self.misc_flags_1 & 0x1 == 1
    }
}

/// The eight stream categories of an [`StnTable`], in on-disk order.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StreamCategory {
    PrimaryVideo,
    PrimaryAudio,
    PrimaryPg,
    PrimaryIg,
    SecondaryAudio,
    SecondaryVideo,
    SecondaryPg,
    DolbyVision,
}

impl StreamCategory {
    pub const ALL: [StreamCategory; 8] = [
        StreamCategory::PrimaryVideo,
        StreamCategory::PrimaryAudio,
        StreamCategory::PrimaryPg,
        StreamCategory::PrimaryIg,
        StreamCategory::SecondaryAudio,
        StreamCategory::SecondaryVideo,
        StreamCategory::SecondaryPg,
        StreamCategory::DolbyVision,
    ];
}

/// The stream number table of a play item.
///
/// Each list holds exactly as many streams as the count stored for its
/// category on disk.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StnTable {
    pub primary_video_streams: Vec<Stream>,
    pub primary_audio_streams: Vec<Stream>,
    pub primary_pg_streams: Vec<Stream>,
    pub primary_ig_streams: Vec<Stream>,
    pub secondary_audio_streams: Vec<Stream>,
    pub secondary_video_streams: Vec<Stream>,
    pub secondary_pg_streams: Vec<Stream>,
    pub dolby_vision_streams: Vec<Stream>,
}

impl StnTable {
    pub fn category(&self, category: StreamCategory) -> &[Stream] {
        match category {
            StreamCategory::PrimaryVideo => &self.primary_video_streams,
            StreamCategory::PrimaryAudio => &self.primary_audio_streams,
            StreamCategory::PrimaryPg => &self.primary_pg_streams,
            StreamCategory::PrimaryIg => &self.primary_ig_streams,
            StreamCategory::SecondaryAudio => &self.secondary_audio_streams,
            StreamCategory::SecondaryVideo => &self.secondary_video_streams,
            StreamCategory::SecondaryPg => &self.secondary_pg_streams,
            StreamCategory::DolbyVision => &self.dolby_vision_streams,
        }
    }

    /// The `nb_*` counts, in on-disk order.
    pub fn counts(&self) -> [usize; 8] {
        StreamCategory::ALL.map(|c| self.category(c).len())
    }

    /// Iterates over all categories and their streams, in on-disk order.
    pub fn iter(&self) -> impl Iterator<Item = (StreamCategory, &[Stream])> {
        StreamCategory::ALL.into_iter().map(move |c| (c, self.category(c)))
    }
}

/// A media stream within a [`Clip`].
///
/// [`Clip`]: struct.Clip.html
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub entry: Section<StreamEntry>,
    pub attributes: Section<StreamAttributes>,
}

/// A packet identifier, displayed as `0x` followed by four hex digits.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct StreamPid(pub u16);

impl Display for StreamPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl Debug for StreamPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Where a stream lives, selected by the entry's `stream_type`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StreamEntry {
    /// Type 1: a stream of the play item's own clip.
    PlayItem { ref_to_stream_pid: StreamPid },
    /// Type 2: a stream of a sub path's clip.
    SubPath {
        ref_to_sub_path_id: u8,
        ref_to_sub_clip_id: u8,
        ref_to_stream_pid: StreamPid,
    },
    /// Types 3 and 4: a stream multiplexed into the main clip but owned by a sub path.
    InMuxSubPath {
        stream_type: u8,
        ref_to_sub_path_id: u8,
        ref_to_stream_pid: StreamPid,
    },
    /// Any other type. Nothing past the type byte is decoded.
    Unrecognized(u8),
}

impl StreamEntry {
    pub fn stream_type(&self) -> u8 {
        match *self {
            StreamEntry::PlayItem { .. } => 0x01,
            StreamEntry::SubPath { .. } => 0x02,
            StreamEntry::InMuxSubPath { stream_type, .. } => stream_type,
            StreamEntry::Unrecognized(t) => t,
        }
    }

    pub fn ref_to_stream_pid(&self) -> Option<StreamPid> {
        match *self {
            StreamEntry::PlayItem { ref_to_stream_pid }
            | StreamEntry::SubPath {
                ref_to_stream_pid, ..
            }
            | StreamEntry::InMuxSubPath {
                ref_to_stream_pid, ..
            } => Some(ref_to_stream_pid),
            StreamEntry::Unrecognized(_) => None,
        }
    }

    pub fn ref_to_sub_path_id(&self) -> Option<u8> {
        match *self {
            StreamEntry::SubPath {
                ref_to_sub_path_id, ..
            }
            | StreamEntry::InMuxSubPath {
                ref_to_sub_path_id, ..
            } => Some(ref_to_sub_path_id),
            _ => None,
        }
    }

    pub fn ref_to_sub_clip_id(&self) -> Option<u8> {
        match *self {
            StreamEntry::SubPath {
                ref_to_sub_clip_id, ..
            } => Some(ref_to_sub_clip_id),
            _ => None,
        }
    }
}

/// Codec attributes of a stream, selected by its `stream_coding_type`.
///
/// The raw format codes are kept as-is; see [`tables`] to interpret them.
///
/// [`tables`]: ../tables/index.html
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamAttributes {
    Video {
        stream_coding_type: u8,
        video_format: u8,
        frame_rate: u8,
    },
    HdrVideo {
        stream_coding_type: u8,
        video_format: u8,
        frame_rate: u8,
        dynamic_range_type: u8,
        color_space: u8,
        cr_flag_and_hdr_plus_flag: u8,
    },
    Audio {
        stream_coding_type: u8,
        audio_format: u8,
        sample_rate: u8,
        language_code: LanguageCode,
    },
    Graphics {
        stream_coding_type: u8,
        language_code: LanguageCode,
    },
    /// Text subtitles, coding type `0x92`.
    Text {
        character_code: CharacterCode,
        language_code: LanguageCode,
    },
    /// Any other coding type. Nothing past the coding type byte is decoded.
    Unrecognized(u8),
}

impl StreamAttributes {
    pub const TEXT_SUBTITLE: u8 = 0x92;

    pub fn stream_coding_type(&self) -> u8 {
        match *self {
            StreamAttributes::Video {
                stream_coding_type, ..
            }
            | StreamAttributes::HdrVideo {
                stream_coding_type, ..
            }
            | StreamAttributes::Audio {
                stream_coding_type, ..
            }
            | StreamAttributes::Graphics {
                stream_coding_type, ..
            } => stream_coding_type,
            StreamAttributes::Text { .. } => StreamAttributes::TEXT_SUBTITLE,
            StreamAttributes::Unrecognized(t) => t,
        }
    }

    pub fn coding_type_name(&self) -> Option<&'static str> {
        tables::stream_coding_type_name(self.stream_coding_type())
    }

    pub fn language_code(&self) -> Option<&LanguageCode> {
        match self {
            StreamAttributes::Audio { language_code, .. }
            | StreamAttributes::Graphics { language_code, .. }
            | StreamAttributes::Text { language_code, .. } => Some(language_code),
            _ => None,
        }
    }

    pub fn frame_rate(&self) -> Option<FrameRate> {
        match *self {
            StreamAttributes::Video { frame_rate, .. }
            | StreamAttributes::HdrVideo { frame_rate, .. } => tables::frame_rate(frame_rate),
            _ => None,
        }
    }
}

/// A three-letter language code.
///
/// Text subtitle streams with an unknown character code keep the raw bytes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageCode {
    Text(String),
    Raw([u8; 3]),
}

impl LanguageCode {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LanguageCode::Text(s) => Some(s),
            LanguageCode::Raw(_) => None,
        }
    }
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageCode::Text(s) => f.write_str(s),
            LanguageCode::Raw(b) => write!(f, "{:02x}{:02x}{:02x}", b[0], b[1], b[2]),
        }
    }
}

/// The character encoding of a text subtitle stream.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharacterCode {
    Utf8,
    Utf16Be,
    ShiftJis,
    EucKr,
    Gb18030,
    Gb2312,
    Big5,
    Unrecognized(u8),
}

impl CharacterCode {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x1 => CharacterCode::Utf8,
            0x2 => CharacterCode::Utf16Be,
            0x3 => CharacterCode::ShiftJis,
            0x4 => CharacterCode::EucKr,
            0x5 => CharacterCode::Gb18030,
            0x6 => CharacterCode::Gb2312,
            0x7 => CharacterCode::Big5,
            n => CharacterCode::Unrecognized(n),
        }
    }

    pub fn code(&self) -> u8 {
        match *self {
            CharacterCode::Utf8 => 0x1,
            CharacterCode::Utf16Be => 0x2,
            CharacterCode::ShiftJis => 0x3,
            CharacterCode::EucKr => 0x4,
            CharacterCode::Gb18030 => 0x5,
            CharacterCode::Gb2312 => 0x6,
            CharacterCode::Big5 => 0x7,
            CharacterCode::Unrecognized(n) => n,
        }
    }

    /// The text encoding used for the stream's language code.
    pub fn encoding(&self) -> Option<&'static Encoding> {
        match self {
            CharacterCode::Utf8 => Some(UTF_8),
            CharacterCode::Utf16Be => Some(UTF_16BE),
            CharacterCode::ShiftJis => Some(SHIFT_JIS),
            CharacterCode::EucKr => Some(EUC_KR),
            CharacterCode::Gb18030 => Some(GB18030),
            // GB 2312 is a subset of GBK
            CharacterCode::Gb2312 => Some(GBK),
            CharacterCode::Big5 => Some(BIG5),
            CharacterCode::Unrecognized(_) => None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkType {
    EntryPoint,
    LinkPoint,
    Unrecognized(u8),
}

impl MarkType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0x1 => MarkType::EntryPoint,
            0x2 => MarkType::LinkPoint,
            n => MarkType::Unrecognized(n),
        }
    }
}

/// A chapter or entry point marker.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlaylistMark {
    pub mark_type: MarkType,
    pub ref_to_play_item_id: u16,
    pub mark_timestamp: TimeStamp,
    pub entry_es_pid: u16,
    pub duration: TimeStamp,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistMarks {
    pub marks: Vec<PlaylistMark>,
}

/// Describes one extension data block. The block itself is not decoded.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExtensionDataEntry {
    pub ext_data_type: u16,
    pub ext_data_version: u16,
    /// Relative to the start of the extension data section.
    pub ext_data_start_address: u32,
    pub ext_data_length: u32,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionData {
    pub data_block_start_address: u32,
    pub entries: Vec<ExtensionDataEntry>,
}

/// A time stamp, relative to some System Time Clock sequence, expressed in 45 KHz.
///
/// To get a floating-point value in seconds, you can use the [`seconds`] method.
///
/// [`seconds`]: #method.seconds
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeStamp(pub u32);

impl TimeStamp {
    /// Returns this time stamp in units of seconds.
    pub fn seconds(&self) -> f64 {
        (self.0 as f64) / 45_000f64
    }
}

impl Debug for TimeStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeStamp")
            .field("raw", &self.0)
            .field("secs", &self.seconds())
            .finish()
    }
}
