//! Positional reads and absolute seeks over the byte source being decoded.

use crate::error::{MplsError, Result, SectionKind};
use crate::parser::{self, SectionBody};
use crate::types::Section;
use log::debug;
use std::io::{self, Read, Seek, SeekFrom};

/// A cursor over any [`Read`] + [`Seek`] source.
///
/// The decoder relies on the source position as implicit state, so a
/// `Source` must not be shared between concurrent decodes.
pub struct Source<R> {
    inner: R,
}

impl<R: Read + Seek> Source<R> {
    pub fn new(inner: R) -> Self {
        Source { inner }
    }

    /// Returns the current absolute offset.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Moves to the absolute `offset`.
    ///
    /// Seeking past the end of the source is allowed; the next read then
    /// fails with [`MplsError::TruncatedInput`].
    pub fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .map(|_| ())
            .map_err(|source| MplsError::InvalidOffset { offset, source })
    }

    /// Reads exactly `n` bytes.
    pub fn read(&mut self, n: usize, section: SectionKind) -> Result<Vec<u8>> {
        let offset = self.position()?;
        let mut buf = vec![0; n];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(MplsError::TruncatedInput { section, offset })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Appends up to `n` bytes to `buf`, stopping early at the end of the source.
    fn read_up_to(&mut self, n: u64, buf: &mut Vec<u8>) -> Result<usize> {
        Ok(self.inner.by_ref().take(n).read_to_end(buf)?)
    }

    /// Decodes the length-prefixed section that starts at the current position.
    ///
    /// Afterwards the source is always positioned at
    /// `start + length field + declared length`.
    pub(crate) fn read_section<T: SectionBody>(&mut self) -> Result<Section<T>> {
        let start = self.position()?;
        let width = T::LENGTH_FIELD.bytes();

        let mut buf = self.read(width, T::KIND)?;
        let length = buf.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b));
        self.read_up_to(u64::from(length), &mut buf)?;

        debug!("{} at offset {} with length {}", T::KIND, start, length);
        let section = parser::run(&buf, start, T::KIND, parser::section::<T>)?;

        self.seek_to(start + width as u64 + u64::from(length))?;
        Ok(section)
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
