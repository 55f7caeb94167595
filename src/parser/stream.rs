use super::{bytes, reserved, section, text, utf8, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{
    CharacterCode, LanguageCode, StnTable, Stream, StreamAttributes, StreamEntry, StreamPid,
};
use log::warn;
use nom::{
    combinator::map,
    multi::count,
    number::complete::{be_u16, be_u8},
    sequence::tuple,
};

fn stream_pid(input: &[u8]) -> PResult<'_, StreamPid> {
    map(be_u16, StreamPid)(input)
}

impl SectionBody for StreamEntry {
    const KIND: SectionKind = SectionKind::StreamEntry;
    const LENGTH_FIELD: LengthField = LengthField::U8;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, stream_type) = be_u8(input)?;
        match stream_type {
            0x01 => map(stream_pid, |ref_to_stream_pid| StreamEntry::PlayItem {
                ref_to_stream_pid,
            })(input),
            0x02 => map(
                tuple((be_u8, be_u8, stream_pid)),
                |(ref_to_sub_path_id, ref_to_sub_clip_id, ref_to_stream_pid)| {
                    StreamEntry::SubPath {
                        ref_to_sub_path_id,
                        ref_to_sub_clip_id,
                        ref_to_stream_pid,
                    }
                },
            )(input),
            0x03 | 0x04 => map(
                tuple((be_u8, stream_pid)),
                |(ref_to_sub_path_id, ref_to_stream_pid)| StreamEntry::InMuxSubPath {
                    stream_type,
                    ref_to_sub_path_id,
                    ref_to_stream_pid,
                },
            )(input),
            other => {
                warn!("unrecognized stream_type {:#04x}, skipping stream entry", other);
                Ok((input, StreamEntry::Unrecognized(other)))
            }
        }
    }
}

/// Splits a byte into its high and low nibble.
fn nibbles(input: &[u8]) -> PResult<'_, (u8, u8)> {
    map(be_u8, |n| (n >> 4, n & 0x0F))(input)
}

fn language_code(input: &[u8]) -> PResult<'_, LanguageCode> {
    map(utf8(3), LanguageCode::Text)(input)
}

fn text_language_code(input: &[u8], character_code: CharacterCode) -> PResult<'_, LanguageCode> {
    match character_code.encoding() {
        Some(encoding) => map(text(3, encoding), LanguageCode::Text)(input),
        None => {
            warn!(
                "unrecognized character_code {:#04x}, keeping raw language code",
                character_code.code()
            );
            map(bytes(3), |b: &[u8]| LanguageCode::Raw([b[0], b[1], b[2]]))(input)
        }
    }
}

impl SectionBody for StreamAttributes {
    const KIND: SectionKind = SectionKind::StreamAttributes;
    const LENGTH_FIELD: LengthField = LengthField::U8;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, stream_coding_type) = be_u8(input)?;
        match stream_coding_type {
            0x01 | 0x02 | 0x1B | 0x20 | 0xEA => map(nibbles, |(video_format, frame_rate)| {
                StreamAttributes::Video {
                    stream_coding_type,
                    video_format,
                    frame_rate,
                }
            })(input),
            0x24 => map(
                tuple((nibbles, nibbles, be_u8)),
                |((video_format, frame_rate), (dynamic_range_type, color_space), flags)| {
                    StreamAttributes::HdrVideo {
                        stream_coding_type,
                        video_format,
                        frame_rate,
                        dynamic_range_type,
                        color_space,
                        cr_flag_and_hdr_plus_flag: flags,
                    }
                },
            )(input),
            0x03 | 0x04 | 0x80..=0x86 | 0xA1 | 0xA2 => map(
                tuple((nibbles, language_code)),
                |((audio_format, sample_rate), language_code)| StreamAttributes::Audio {
                    stream_coding_type,
                    audio_format,
                    sample_rate,
                    language_code,
                },
            )(input),
            0x90 | 0x91 => map(language_code, |language_code| StreamAttributes::Graphics {
                stream_coding_type,
                language_code,
            })(input),
            StreamAttributes::TEXT_SUBTITLE => {
                let (input, character_code) = map(be_u8, CharacterCode::from_code)(input)?;
                let (input, language_code) = text_language_code(input, character_code)?;
                Ok((
                    input,
                    StreamAttributes::Text {
                        character_code,
                        language_code,
                    },
                ))
            }
            other => {
                warn!(
                    "unrecognized stream_coding_type {:#04x}, skipping stream attributes",
                    other
                );
                Ok((input, StreamAttributes::Unrecognized(other)))
            }
        }
    }
}

fn stream(input: &[u8]) -> PResult<'_, Stream> {
    let (input, (entry, attributes)) =
        tuple((section::<StreamEntry>, section::<StreamAttributes>))(input)?;
    Ok((input, Stream { entry, attributes }))
}

impl SectionBody for StnTable {
    const KIND: SectionKind = SectionKind::StnTable;
    const LENGTH_FIELD: LengthField = LengthField::U16;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, _) = reserved(2)(input)?;
        let (input, (p_video, p_audio, p_pg, p_ig, s_audio, s_video, s_pg, dv)) =
            tuple((be_u8, be_u8, be_u8, be_u8, be_u8, be_u8, be_u8, be_u8))(input)?;
        let (input, _) = reserved(4)(input)?;

        // categories are stored in the same order as their counts
        let (input, primary_video_streams) = count(stream, p_video as usize)(input)?;
        let (input, primary_audio_streams) = count(stream, p_audio as usize)(input)?;
        let (input, primary_pg_streams) = count(stream, p_pg as usize)(input)?;
        let (input, primary_ig_streams) = count(stream, p_ig as usize)(input)?;
        let (input, secondary_audio_streams) = count(stream, s_audio as usize)(input)?;
        let (input, secondary_video_streams) = count(stream, s_video as usize)(input)?;
        let (input, secondary_pg_streams) = count(stream, s_pg as usize)(input)?;
        let (input, dolby_vision_streams) = count(stream, dv as usize)(input)?;

        Ok((
            input,
            StnTable {
                primary_video_streams,
                primary_audio_streams,
                primary_pg_streams,
                primary_ig_streams,
                secondary_audio_streams,
                secondary_video_streams,
                secondary_pg_streams,
                dolby_vision_streams,
            },
        ))
    }
}
