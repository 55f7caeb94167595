use super::{reserved, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{AppInfoPlaylist, PlaybackType};
use nom::{
    combinator::map,
    number::complete::{be_u16, be_u64, be_u8},
};

fn playback_type(input: &[u8]) -> PResult<'_, PlaybackType> {
    map(be_u8, PlaybackType::from_code)(input)
}

impl SectionBody for AppInfoPlaylist {
    const KIND: SectionKind = SectionKind::AppInfoPlaylist;
    const LENGTH_FIELD: LengthField = LengthField::U32;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, playback_type) = playback_type(input)?;
        let (input, playback_count) = if playback_type.has_playback_count() {
            map(be_u16, Some)(input)?
        } else {
            let (input, _) = reserved(2)(input)?;
            (input, None)
        };
        let (input, uo_mask_table) = be_u64(input)?;
        let (input, misc_flags) = be_u16(input)?;

        Ok((
            input,
            AppInfoPlaylist {
                playback_type,
                playback_count,
                uo_mask_table,
                misc_flags,
            },
        ))
    }
}
