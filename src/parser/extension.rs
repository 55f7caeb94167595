use super::{reserved, LengthField, PResult, SectionBody};
use crate::error::SectionKind;
use crate::types::{ExtensionData, ExtensionDataEntry};
use nom::{
    multi::count,
    number::complete::{be_u16, be_u32, be_u8},
    sequence::tuple,
};

fn ext_data_entry(input: &[u8]) -> PResult<'_, ExtensionDataEntry> {
    let (input, (ext_data_type, ext_data_version, ext_data_start_address, ext_data_length)) =
        tuple((be_u16, be_u16, be_u32, be_u32))(input)?;

    Ok((
        input,
        ExtensionDataEntry {
            ext_data_type,
            ext_data_version,
            ext_data_start_address,
            ext_data_length,
        },
    ))
}

impl SectionBody for ExtensionData {
    const KIND: SectionKind = SectionKind::ExtensionData;
    const LENGTH_FIELD: LengthField = LengthField::U32;

    fn parse_body(input: &[u8]) -> PResult<'_, Self> {
        let (input, data_block_start_address) = be_u32(input)?;
        let (input, _) = reserved(3)(input)?;
        let (input, nb_ext_data_entries) = be_u8(input)?;
        let (input, entries) = count(ext_data_entry, nb_ext_data_entries as usize)(input)?;

        Ok((
            input,
            ExtensionData {
                data_block_start_address,
                entries,
            },
        ))
    }
}
