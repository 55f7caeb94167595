use super::{flag, reserved, section, time_stamp, utf8, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{Angle, Clip, MultiAngle, PlayItem, StnTable};
use nom::{
    combinator::map,
    multi::count,
    number::complete::{be_u16, be_u64, be_u8},
};

fn clip_file_name(input: &[u8]) -> PResult<'_, String> {
    utf8(5)(input)
}

fn clip_codec_id(input: &[u8]) -> PResult<'_, String> {
    utf8(4)(input)
}

pub(super) fn clip(input: &[u8]) -> PResult<'_, Clip> {
    let (input, file_name) = clip_file_name(input)?;
    let (input, codec_id) = clip_codec_id(input)?;
    Ok((
        input,
        Clip {
            file_name,
            codec_id,
        },
    ))
}

fn angle(input: &[u8]) -> PResult<'_, Angle> {
    let (input, clip) = clip(input)?;
    let (input, ref_to_stcid) = be_u8(input)?;
    Ok((input, Angle { clip, ref_to_stcid }))
}

fn multi_angle(input: &[u8]) -> PResult<'_, MultiAngle> {
    let (input, nb_angles) = be_u8(input)?;
    let (input, misc_flags) = be_u8(input)?;
    // the main clip counts as an angle, too, so only (n - 1) angle clips follow
    let (input, angles) = count(angle, nb_angles.saturating_sub(1) as usize)(input)?;

    Ok((
        input,
        MultiAngle {
            nb_angles,
            misc_flags,
            angles,
        },
    ))
}

impl SectionBody for PlayItem {
    const KIND: SectionKind = SectionKind::PlayItem;
    const LENGTH_FIELD: LengthField = LengthField::U16;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, clip) = clip(input)?;
        let (input, misc_flags_1) = be_u16(input)?;
        let is_multi_angle = flag(u32::from(misc_flags_1), 16, 4);
        let (input, ref_to_stcid) = be_u8(input)?;
        let (input, in_time) = time_stamp(input)?;
        let (input, out_time) = time_stamp(input)?;
        let (input, uo_mask_table) = be_u64(input)?;
        let (input, misc_flags_2) = be_u8(input)?;
        let (input, still_mode) = be_u8(input)?;
        let (input, still_time) = if still_mode == 0x01 {
            map(be_u16, Some)(input)?
        } else {
            let (input, _) = reserved(2)(input)?;
            (input, None)
        };
        let (input, multi_angle) = if is_multi_angle {
            map(multi_angle, Some)(input)?
        } else {
            (input, None)
        };
        let (input, stn_table) = section::<StnTable>(input)?;

        Ok((
            input,
            PlayItem {
                clip,
                misc_flags_1,
                is_multi_angle,
                ref_to_stcid,
                in_time,
                out_time,
                uo_mask_table,
                misc_flags_2,
                still_mode,
                still_time,
                multi_angle,
                stn_table,
            },
        ))
    }
}
