//! Destinations for finished sections.

use std::io::{self, Write};

/// Receives finished sections: a section switch followed by its bytes.
pub trait SectionWriter {
    /// Starts a new named section. Following writes belong to it.
    fn switch_section(&mut self, name: &str) -> io::Result<()>;

    /// Appends bytes to the current section.
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Keeps every section in its own buffer, in output order.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    sections: Vec<(String, Vec<u8>)>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of the named section, if it was written.
    pub fn section(&self, name: &str) -> Option<&[u8]> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.as_slice())
    }

    /// Section names in the order they were written.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    pub fn into_sections(self) -> Vec<(String, Vec<u8>)> {
        self.sections
    }
}

impl SectionWriter for MemoryWriter {
    fn switch_section(&mut self, name: &str) -> io::Result<()> {
        self.sections.push((name.to_string(), Vec::new()));
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        let Some((_, current)) = self.sections.last_mut() else {
            return Err(io::Error::other("write before any section switch"));
        };
        current.extend_from_slice(bytes);
        Ok(())
    }
}

/// Concatenates sections into one byte stream.
///
/// Section names are not written; each section is self-describing through
/// its header.
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    inner: W,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> SectionWriter for StreamWriter<W> {
    fn switch_section(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }
}
