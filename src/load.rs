//! One entry point per top-level section.
//!
//! Except for [`load_movie_playlist`], the caller seeks the source to the
//! section's address first; see [`MoviePlaylist`] for where those addresses
//! come from. Each function leaves the source right after the section it
//! decoded.

use crate::error::{MplsError, Result, SectionKind};
use crate::parser;
use crate::source::Source;
use crate::types::{
    AppInfoPlaylist, ExtensionData, MoviePlaylist, Mpls, Playlist, PlaylistMarks, Section,
};
use std::io::{Read, Seek};

/// Decodes the file header. The source must be at offset 0.
pub fn load_movie_playlist<R: Read + Seek>(reader: &mut R) -> Result<MoviePlaylist> {
    let mut source = Source::new(reader);

    let offset = source.position()?;
    if offset != 0 {
        return Err(MplsError::NotAtFileStart { offset });
    }

    let buf = source.read(MoviePlaylist::SIZE, SectionKind::MoviePlaylist)?;
    parser::run(&buf, 0, SectionKind::MoviePlaylist, parser::movie_playlist)
}

pub fn load_app_info_playlist<R: Read + Seek>(reader: &mut R) -> Result<Section<AppInfoPlaylist>> {
    Source::new(reader).read_section()
}

pub fn load_playlist<R: Read + Seek>(reader: &mut R) -> Result<Section<Playlist>> {
    Source::new(reader).read_section()
}

pub fn load_playlist_marks<R: Read + Seek>(reader: &mut R) -> Result<Section<PlaylistMarks>> {
    Source::new(reader).read_section()
}

pub fn load_extension_data<R: Read + Seek>(reader: &mut R) -> Result<Section<ExtensionData>> {
    Source::new(reader).read_section()
}

/// Decodes every top-level section, following the addresses in the header.
pub(crate) fn load_mpls<R: Read + Seek>(reader: &mut R) -> Result<Mpls> {
    let mut source = Source::new(reader);
    source.seek_to(0)?;

    let header = load_movie_playlist(source.get_mut())?;
    // the app info section directly follows the header
    let app_info_playlist = load_app_info_playlist(source.get_mut())?;

    source.seek_to(u64::from(header.playlist_start_address))?;
    let playlist = load_playlist(source.get_mut())?;

    source.seek_to(u64::from(header.playlist_mark_start_address))?;
    let marks = load_playlist_marks(source.get_mut())?;

    let extension_data = match header.extension_data_start_address {
        0 => None,
        addr => {
            source.seek_to(u64::from(addr))?;
            Some(load_extension_data(source.get_mut())?)
        }
    };

    Ok(Mpls {
        header,
        app_info_playlist,
        playlist,
        marks,
        extension_data,
    })
}
