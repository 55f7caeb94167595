use super::{reserved, section, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{PlayItem, Playlist, SubPath};
use nom::{multi::count, number::complete::be_u16};

impl SectionBody for Playlist {
    const KIND: SectionKind = SectionKind::Playlist;
    const LENGTH_FIELD: LengthField = LengthField::U32;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, _) = reserved(2)(input)?;
        let (input, nb_play_items) = be_u16(input)?;
        let (input, nb_sub_paths) = be_u16(input)?;
        let (input, play_items) = count(section::<PlayItem>, nb_play_items as usize)(input)?;
        let (input, sub_paths) = count(section::<SubPath>, nb_sub_paths as usize)(input)?;

        Ok((
            input,
            Playlist {
                play_items,
                sub_paths,
            },
        ))
    }
}
