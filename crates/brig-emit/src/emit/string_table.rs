//! String interning into the data section.
//!
//! Entry layout: `u32` length (prefix byte included), optional prefix byte,
//! the sanitized bytes, padding to 4.

use std::collections::HashMap;

use brig_format::Section;

use super::error::Result;

/// Maps (prefix, sanitized bytes) to the data-section offset of its entry.
#[derive(Debug, Default)]
pub struct StringTable {
    entries: HashMap<(Option<u8>, Vec<u8>), u32>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the offset of the entry for `text` with `prefix`, writing it
    /// to `data` on first use.
    pub fn intern(&mut self, data: &mut Section, text: &str, prefix: Option<u8>) -> Result<u32> {
        let key = (prefix, sanitize(text));
        if let Some(&offset) = self.entries.get(&key) {
            return Ok(offset);
        }

        let len = key.1.len() + usize::from(prefix.is_some());
        let mut entry = Vec::with_capacity(4 + len);
        entry.extend_from_slice(&(len as u32).to_le_bytes());
        entry.extend(prefix);
        entry.extend_from_slice(&key.1);

        let offset = data.add(&entry)?;
        data.round_up(4)?;
        tracing::trace!(text, offset, "interned string");

        self.entries.insert(key, offset);
        Ok(offset)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// BRIG names may not contain `.`.
fn sanitize(text: &str) -> Vec<u8> {
    text.bytes()
        .map(|b| if b == b'.' { b'_' } else { b })
        .collect()
}
