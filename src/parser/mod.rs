//! nom parsers for every section of a movie playlist.
//!
//! All parsers run over an in-memory slice. A length-prefixed section is
//! parsed with [`section`], which hands its body parser at most the declared
//! number of bytes and then always resumes right after the declared end, no
//! matter how much of the body was understood.

use crate::error::{MplsError, Result, SectionKind};
use crate::types::{Section, TimeStamp};
use encoding_rs::{Encoding, UTF_8};
use log::trace;
use nom::{
    bytes::complete::take,
    combinator::map,
    error::{ErrorKind, ParseError},
    number::complete::{be_u16, be_u32, be_u8},
    IResult, Offset,
};

mod app_info;
mod extension;
mod header;
mod marks;
mod play_item;
mod playlist;
mod stream;
mod sub_path;

pub(crate) use header::movie_playlist;

pub(crate) type PResult<'a, O> = IResult<&'a [u8], O, ParseFailure<'a>>;

/// Width of the length field that prefixes a section.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum LengthField {
    U8,
    U16,
    U32,
}

impl LengthField {
    /// Number of bytes the length field itself occupies.
    pub(crate) const fn bytes(self) -> usize {
        match self {
            LengthField::U8 => 1,
            LengthField::U16 => 2,
            LengthField::U32 => 4,
        }
    }

    fn parse(self, input: &[u8]) -> PResult<'_, u32> {
        match self {
            LengthField::U8 => be_u8(input).map(|(rest, n)| (rest, u32::from(n))),
            LengthField::U16 => be_u16(input).map(|(rest, n)| (rest, u32::from(n))),
            LengthField::U32 => be_u32(input),
        }
    }
}

/// A record that is stored on disk as a length-prefixed section.
pub(crate) trait SectionBody: Sized {
    const KIND: SectionKind;
    const LENGTH_FIELD: LengthField;

    /// Parses the section content that follows the length field. `input`
    /// never extends past the declared section end.
    fn parse_body(input: &[u8]) -> PResult<'_, Self>;
}

/// Parses one length-prefixed section.
///
/// A zero length yields an empty section without touching the body. The
/// returned remainder always starts at `length field + declared length`,
/// clamped to the end of the input.
pub(crate) fn section<T: SectionBody>(input: &[u8]) -> PResult<'_, Section<T>> {
    let (rest, length) = T::LENGTH_FIELD
        .parse(input)
        .map_err(|e| e.map(|f| f.within(T::KIND)))?;

    let end = (length as usize).min(rest.len());
    let (content, next) = rest.split_at(end);

    if length == 0 {
        trace!("empty {} section", T::KIND);
        return Ok((next, Section::empty()));
    }

    let (_, data) = T::parse_body(content).map_err(|e| e.map(|f| f.within(T::KIND)))?;
    Ok((next, Section::new(length, data)))
}

/// Takes exactly `len` bytes.
pub(crate) fn bytes<'a>(len: usize) -> impl Fn(&'a [u8]) -> PResult<'a, &'a [u8]> {
    move |input| take(len)(input)
}

/// Skips `len` reserved bytes.
pub(crate) fn reserved<'a>(len: usize) -> impl Fn(&'a [u8]) -> PResult<'a, ()> {
    move |input| take(len)(input).map(|(rest, _)| (rest, ()))
}

pub(crate) fn time_stamp(input: &[u8]) -> PResult<'_, TimeStamp> {
    map(be_u32, TimeStamp)(input)
}

/// Tests bit `position` of a `width`-bit field, counting from the most
/// significant bit as position 0.
pub(crate) fn flag(value: u32, width: u32, position: u32) -> bool {
    (value >> (width - 1 - position)) & 1 == 1
}

/// Reads `len` bytes and decodes them as text in `encoding`.
pub(crate) fn text<'a>(
    len: usize,
    encoding: &'static Encoding,
) -> impl Fn(&'a [u8]) -> PResult<'a, String> {
    move |input| {
        let (rest, raw) = bytes(len)(input)?;
        match encoding.decode_without_bom_handling_and_without_replacement(raw) {
            Some(s) => Ok((rest, s.into_owned())),
            None => Err(nom::Err::Failure(ParseFailure::new(
                input,
                Reason::Text {
                    encoding,
                    bytes: raw.to_vec(),
                },
            ))),
        }
    }
}

/// Reads `len` bytes of UTF-8 text.
pub(crate) fn utf8<'a>(len: usize) -> impl Fn(&'a [u8]) -> PResult<'a, String> {
    text(len, UTF_8)
}

/// Runs `parser` over `buf`, whose first byte sits at absolute offset `base`,
/// and turns a parse failure into an [`MplsError`].
pub(crate) fn run<'a, O>(
    buf: &'a [u8],
    base: u64,
    kind: SectionKind,
    mut parser: impl FnMut(&'a [u8]) -> PResult<'a, O>,
) -> Result<O> {
    match parser(buf) {
        Ok((_, out)) => Ok(out),
        Err(nom::Err::Error(failure)) | Err(nom::Err::Failure(failure)) => {
            Err(failure.into_error(buf, base, kind))
        }
        Err(nom::Err::Incomplete(_)) => Err(MplsError::TruncatedInput {
            section: kind,
            offset: base + buf.len() as u64,
        }),
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Reason {
    Truncated,
    TypeIndicator(String),
    Text {
        encoding: &'static Encoding,
        bytes: Vec<u8>,
    },
    Nom(ErrorKind),
}

/// The nom error type of this crate's parsers.
///
/// Keeps the remaining input at the point of failure so the absolute offset
/// can be recovered, and the innermost section being parsed.
#[derive(Debug, PartialEq)]
pub(crate) struct ParseFailure<'a> {
    input: &'a [u8],
    section: Option<SectionKind>,
    reason: Reason,
}

impl<'a> ParseFailure<'a> {
    pub(crate) fn new(input: &'a [u8], reason: Reason) -> Self {
        ParseFailure {
            input,
            section: None,
            reason,
        }
    }

    fn within(mut self, kind: SectionKind) -> Self {
        self.section.get_or_insert(kind);
        self
    }

    fn into_error(self, buf: &[u8], base: u64, fallback: SectionKind) -> MplsError {
        let section = self.section.unwrap_or(fallback);
        let offset = base + buf.offset(self.input) as u64;
        match self.reason {
            Reason::Truncated => MplsError::TruncatedInput { section, offset },
            Reason::TypeIndicator(found) => MplsError::InvalidTypeIndicator { found },
            Reason::Text { encoding, bytes } => MplsError::Decode {
                section,
                offset,
                encoding: encoding.name(),
                bytes,
            },
            Reason::Nom(_) => MplsError::Malformed { section, offset },
        }
    }
}

impl<'a> ParseError<&'a [u8]> for ParseFailure<'a> {
    fn from_error_kind(input: &'a [u8], kind: ErrorKind) -> Self {
        let reason = match kind {
            ErrorKind::Eof | ErrorKind::Complete => Reason::Truncated,
            other => Reason::Nom(other),
        };
        ParseFailure::new(input, reason)
    }

    fn append(_: &'a [u8], _: ErrorKind, other: Self) -> Self {
        other
    }
}
