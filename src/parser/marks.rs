use super::{reserved, time_stamp, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{MarkType, PlaylistMark, PlaylistMarks};
use nom::{
    combinator::map,
    multi::count,
    number::complete::{be_u16, be_u8},
};

fn mark(input: &[u8]) -> PResult<'_, PlaylistMark> {
    let (input, _) = reserved(1)(input)?;
    let (input, mark_type) = map(be_u8, MarkType::from_code)(input)?;
    let (input, ref_to_play_item_id) = be_u16(input)?;
    let (input, mark_timestamp) = time_stamp(input)?;
    let (input, entry_es_pid) = be_u16(input)?;
    let (input, duration) = time_stamp(input)?;

    Ok((
        input,
        PlaylistMark {
            mark_type,
            ref_to_play_item_id,
            mark_timestamp,
            entry_es_pid,
            duration,
        },
    ))
}

impl SectionBody for PlaylistMarks {
    const KIND: SectionKind = SectionKind::PlaylistMarks;
    const LENGTH_FIELD: LengthField = LengthField::U32;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, nb_playlist_marks) = be_u16(input)?;
        let (input, marks) = count(mark, nb_playlist_marks as usize)(input)?;
        Ok((input, PlaylistMarks { marks }))
    }
}
