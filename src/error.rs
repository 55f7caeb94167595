use std::{fmt, io};

/// The kind of section being decoded when an error occurred.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SectionKind {
    MoviePlaylist,
    AppInfoPlaylist,
    Playlist,
    PlayItem,
    SubPath,
    SubPlayItem,
    StnTable,
    StreamEntry,
    StreamAttributes,
    PlaylistMarks,
    ExtensionData,
}

impl SectionKind {
    fn as_str(&self) -> &'static str {
        match *self {
            SectionKind::MoviePlaylist => "MoviePlaylist",
            SectionKind::AppInfoPlaylist => "AppInfoPlayList",
            SectionKind::Playlist => "PlayList",
            SectionKind::PlayItem => "PlayItem",
            SectionKind::SubPath => "SubPath",
            SectionKind::SubPlayItem => "SubPlayItem",
            SectionKind::StnTable => "STNTable",
            SectionKind::StreamEntry => "StreamEntry",
            SectionKind::StreamAttributes => "StreamAttributes",
            SectionKind::PlaylistMarks => "PlayListMark",
            SectionKind::ExtensionData => "ExtensionData",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type of every decode entry point in this crate.
///
/// All variants are terminal: once one is returned the traversal that
/// produced it must be abandoned. Unrecognized codes inside a section are not
/// errors; they are logged and the section is skipped by its declared length.
#[derive(Debug, thiserror::Error)]
pub enum MplsError {
    /// An I/O error occurred while reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source ended before a field could be read in full.
    #[error("truncated input in {section} at offset {offset}")]
    TruncatedInput { section: SectionKind, offset: u64 },

    /// The source refused to seek to the given absolute offset.
    #[error("cannot seek to offset {offset}: {source}")]
    InvalidOffset {
        offset: u64,
        #[source]
        source: io::Error,
    },

    /// The file header was decoded from somewhere other than the start of the file.
    #[error("MoviePlaylist must be decoded at offset 0, source is at offset {offset}")]
    NotAtFileStart { offset: u64 },

    /// The file does not start with the `MPLS` type indicator.
    #[error("invalid type indicator {found:?}, expected \"MPLS\"")]
    InvalidTypeIndicator { found: String },

    /// A text field is not valid in its mandated encoding.
    #[error("{section} at offset {offset}: bytes {bytes:02x?} are not valid {encoding}")]
    Decode {
        section: SectionKind,
        offset: u64,
        encoding: &'static str,
        bytes: Vec<u8>,
    },

    /// The section could not be parsed for any other reason.
    #[error("malformed {section} at offset {offset}")]
    Malformed { section: SectionKind, offset: u64 },
}

pub type Result<T> = std::result::Result<T, MplsError>;
