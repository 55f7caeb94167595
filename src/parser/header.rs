use super::{bytes, reserved, utf8, PResult, ParseFailure, Reason};
use crate::types::MoviePlaylist;
use nom::{number::complete::be_u32, sequence::tuple};

const TYPE_INDICATOR: &[u8] = b"MPLS";

// matches the ASCII string "MPLS"
fn type_indicator(input: &[u8]) -> PResult<'_, String> {
    let (rest, tag) = bytes(4)(input)?;
    if tag == TYPE_INDICATOR {
        Ok((rest, String::from("MPLS")))
    } else {
        let found = String::from_utf8_lossy(tag).into_owned();
        Err(nom::Err::Failure(ParseFailure::new(
            input,
            Reason::TypeIndicator(found),
        )))
    }
}

fn version(input: &[u8]) -> PResult<'_, String> {
    utf8(4)(input)
}

pub(crate) fn movie_playlist(input: &[u8]) -> PResult<'_, MoviePlaylist> {
    let (input, type_indicator) = type_indicator(input)?;
    let (input, version_number) = version(input)?;
    let (input, (playlist_start_address, playlist_mark_start_address, extension_data_start_address)) =
        tuple((be_u32, be_u32, be_u32))(input)?;
    let (input, _) = reserved(20)(input)?;

    Ok((
        input,
        MoviePlaylist {
            type_indicator,
            version_number,
            playlist_start_address,
            playlist_mark_start_address,
            extension_data_start_address,
        },
    ))
}
