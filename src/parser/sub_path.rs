use super::play_item::clip;
use super::{flag, reserved, section, time_stamp, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{MultiClip, MultiClipEntry, SubPath, SubPlayItem};
use nom::{
    combinator::map,
    multi::count,
    number::complete::{be_u16, be_u32, be_u8},
};

fn multi_clip_entry(input: &[u8]) -> PResult<'_, MultiClipEntry> {
    let (input, clip) = clip(input)?;
    let (input, ref_to_stcid) = be_u8(input)?;
    Ok((input, MultiClipEntry { clip, ref_to_stcid }))
}

fn multi_clip(input: &[u8]) -> PResult<'_, MultiClip> {
    let (input, nb_multi_clip_entries) = be_u8(input)?;
    let (input, _) = reserved(1)(input)?;
    // the sub play item's own clip is the first entry
    let (input, entries) = count(
        multi_clip_entry,
        nb_multi_clip_entries.saturating_sub(1) as usize,
    )(input)?;

    Ok((
        input,
        MultiClip {
            nb_multi_clip_entries,
            entries,
        },
    ))
}

impl SectionBody for SubPlayItem {
    const KIND: SectionKind = SectionKind::SubPlayItem;
    const LENGTH_FIELD: LengthField = LengthField::U16;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, clip) = clip(input)?;
        let (input, misc_flags_1) = be_u32(input)?;
        let is_multi_clip_entries = flag(misc_flags_1, 32, 4);
        let (input, ref_to_stcid) = be_u8(input)?;
        let (input, in_time) = time_stamp(input)?;
        let (input, out_time) = time_stamp(input)?;
        let (input, sync_play_item_id) = be_u16(input)?;
        let (input, sync_start_pts) = be_u32(input)?;
        let (input, multi_clip) = if is_multi_clip_entries {
            map(multi_clip, Some)(input)?
        } else {
            (input, None)
        };

        Ok((
            input,
            SubPlayItem {
                clip,
                misc_flags_1,
                is_multi_clip_entries,
                ref_to_stcid,
                in_time,
                out_time,
                sync_play_item_id,
                sync_start_pts,
                multi_clip,
            },
        ))
    }
}

impl SectionBody for SubPath {
    const KIND: SectionKind = SectionKind::SubPath;
    const LENGTH_FIELD: LengthField = LengthField::U32;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, _) = reserved(1)(input)?;
        let (input, sub_path_type) = be_u8(input)?;
        let (input, misc_flags_1) = be_u16(input)?;
        let (input, _) = reserved(1)(input)?;
        let (input, nb_sub_play_items) = be_u8(input)?;
        let (input, sub_play_items) =
            count(section::<SubPlayItem>, nb_sub_play_items as usize)(input)?;

        Ok((
            input,
            SubPath {
                sub_path_type,
                misc_flags_1,
                sub_play_items,
            },
        ))
    }
}
