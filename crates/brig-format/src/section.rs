//! Append-only section storage.
//!
//! A section is a header followed by fixed-capacity chunks. Offsets are
//! global (counted from the first header byte) and stay valid for the
//! section's lifetime. A single `add` never straddles two chunks, so any
//! record can be read back or patched as one contiguous slice.

use std::io;

use crate::constants::{CHUNK_SIZE, MIN_CHUNK_SIZE, SECTION_ALIGN, SECTION_HEADER_FIXED_SIZE};
use crate::error::FormatError;
use crate::output::SectionWriter;
use crate::records::Record;

#[derive(Debug)]
pub struct Section {
    name: String,
    /// Header bytes including the padding to [`SECTION_ALIGN`].
    /// `byteCount` is patched in on output.
    header: Vec<u8>,
    chunks: Vec<Vec<u8>>,
    chunk_size: usize,
    total_size: u32,
    header_byte_count: u32,
}

impl Section {
    pub fn new(name: &str) -> Self {
        Self::build(name, CHUNK_SIZE)
    }

    /// Creates a section whose chunks hold `chunk_size` bytes.
    ///
    /// `chunk_size` must be a power of two no smaller than [`MIN_CHUNK_SIZE`].
    pub fn with_chunk_size(name: &str, chunk_size: usize) -> Result<Self, FormatError> {
        if !chunk_size.is_power_of_two() || chunk_size < MIN_CHUNK_SIZE {
            return Err(FormatError::InvalidChunkSize {
                section: name.to_string(),
                chunk_size,
            });
        }
        Ok(Self::build(name, chunk_size))
    }

    fn build(name: &str, chunk_size: usize) -> Self {
        let mut header = Vec::with_capacity(SECTION_HEADER_FIXED_SIZE + name.len() + 4);
        header.extend_from_slice(&0u32.to_le_bytes());
        header.extend_from_slice(&0u32.to_le_bytes());
        header.extend_from_slice(&(name.len() as u32).to_le_bytes());
        header.extend_from_slice(name.as_bytes());
        header.push(0);
        let padded = header.len().next_multiple_of(SECTION_ALIGN as usize);
        header.resize(padded, 0);

        let header_byte_count = header.len() as u32;
        header[4..8].copy_from_slice(&header_byte_count.to_le_bytes());

        Self {
            name: name.to_string(),
            header,
            chunks: Vec::new(),
            chunk_size,
            total_size: header_byte_count,
            header_byte_count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current size in bytes, header included.
    pub fn total_size(&self) -> u32 {
        self.total_size
    }

    pub fn header_byte_count(&self) -> u32 {
        self.header_byte_count
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Live byte count of every chunk, in order.
    pub fn chunk_lens(&self) -> impl Iterator<Item = usize> {
        self.chunks.iter().map(Vec::len)
    }

    /// Appends `bytes` and returns the offset they were stored at.
    ///
    /// Opens a new chunk first when the current one cannot hold the whole
    /// payload.
    pub fn add(&mut self, bytes: &[u8]) -> Result<u32, FormatError> {
        if bytes.len() > self.chunk_size {
            return Err(FormatError::PayloadTooLarge {
                section: self.name.clone(),
                len: bytes.len(),
                capacity: self.chunk_size,
            });
        }

        let offset = self.total_size;
        self.total_size = self.grown_size(bytes.len())?;
        if bytes.is_empty() {
            return Ok(offset);
        }

        let chunk = self.chunk_with_room(bytes.len());
        chunk.extend_from_slice(bytes);
        Ok(offset)
    }

    /// Appends an encoded record.
    pub fn add_record<R: Record>(&mut self, record: &R) -> Result<u32, FormatError> {
        self.add(&record.to_bytes())
    }

    /// Pads with zeros until the size is a multiple of `factor`.
    ///
    /// Padding fills the current chunk and continues in a fresh one if it
    /// does not fit.
    pub fn round_up(&mut self, factor: u32) -> Result<(), FormatError> {
        debug_assert!(factor.is_power_of_two() && factor as usize <= self.chunk_size);

        let rem = self.total_size % factor;
        if rem == 0 {
            return Ok(());
        }
        let mut padding = (factor - rem) as usize;
        self.total_size = self.grown_size(padding)?;

        let chunk_size = self.chunk_size;
        if let Some(chunk) = self.chunks.last_mut() {
            let fill = padding.min(chunk_size - chunk.len());
            chunk.resize(chunk.len() + fill, 0);
            padding -= fill;
        }
        if padding > 0 {
            let mut chunk = Vec::with_capacity(chunk_size);
            chunk.resize(padding, 0);
            self.chunks.push(chunk);
        }
        Ok(())
    }

    /// Bytes `offset..offset + len` of the section body.
    pub fn record(&self, offset: u32, len: usize) -> Result<&[u8], FormatError> {
        let (index, local) = self.locate(offset, len)?;
        Ok(&self.chunks[index][local..local + len])
    }

    pub fn record_mut(&mut self, offset: u32, len: usize) -> Result<&mut [u8], FormatError> {
        let (index, local) = self.locate(offset, len)?;
        Ok(&mut self.chunks[index][local..local + len])
    }

    /// Overwrites already-written bytes in place.
    pub fn patch(&mut self, offset: u32, bytes: &[u8]) -> Result<(), FormatError> {
        self.record_mut(offset, bytes.len())?.copy_from_slice(bytes);
        Ok(())
    }

    pub fn patch_u32(&mut self, offset: u32, value: u32) -> Result<(), FormatError> {
        self.patch(offset, &value.to_le_bytes())
    }

    /// Decodes the record stored at `offset`.
    pub fn read_record<R: Record>(&self, offset: u32) -> Result<R, FormatError> {
        R::from_bytes(self.record(offset, R::SIZE)?)
    }

    /// Header with `byteCount` filled in.
    fn finished_header(&self) -> Vec<u8> {
        let mut header = self.header.clone();
        header[0..4].copy_from_slice(&self.total_size.to_le_bytes());
        header
    }

    /// Whole section as one buffer, exactly what [`Section::output`] writes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = self.finished_header();
        bytes.reserve(self.total_size as usize - self.header.len());
        for chunk in &self.chunks {
            bytes.extend_from_slice(chunk);
        }
        bytes
    }

    /// Switches `writer` to this section and writes the header and chunks.
    pub fn output(&self, writer: &mut dyn SectionWriter) -> io::Result<()> {
        writer.switch_section(&self.name)?;
        writer.write_bytes(&self.finished_header())?;
        for chunk in &self.chunks {
            writer.write_bytes(chunk)?;
        }
        Ok(())
    }

    fn grown_size(&self, len: usize) -> Result<u32, FormatError> {
        u32::try_from(len)
            .ok()
            .and_then(|len| self.total_size.checked_add(len))
            .ok_or_else(|| FormatError::SectionOverflow {
                section: self.name.clone(),
            })
    }

    fn chunk_with_room(&mut self, len: usize) -> &mut Vec<u8> {
        let needs_chunk = self
            .chunks
            .last()
            .is_none_or(|chunk| chunk.len() + len > self.chunk_size);
        if needs_chunk {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
        }
        let last = self.chunks.len() - 1;
        &mut self.chunks[last]
    }

    /// Resolves a global offset to (chunk index, offset within chunk).
    fn locate(&self, offset: u32, len: usize) -> Result<(usize, usize), FormatError> {
        let out_of_range = || FormatError::OffsetOutOfRange {
            section: self.name.clone(),
            offset,
            len,
            size: self.total_size,
        };
        if offset < self.header_byte_count {
            return Err(out_of_range());
        }

        let mut local = (offset - self.header_byte_count) as usize;
        for (index, chunk) in self.chunks.iter().enumerate() {
            if local < chunk.len() {
                if local + len > chunk.len() {
                    return Err(FormatError::RecordSplit {
                        section: self.name.clone(),
                        offset,
                        len,
                    });
                }
                return Ok((index, local));
            }
            local -= chunk.len();
        }
        Err(out_of_range())
    }
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;
