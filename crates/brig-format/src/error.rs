//! Errors raised by section storage and record decoding.

use crate::kinds::Kind;

/// Section or record fault.
///
/// Every variant is an internal-consistency failure: well-formed emission
/// never produces one, and a unit that hits one must be discarded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("section `{section}`: payload of {len} bytes exceeds chunk capacity {capacity}")]
    PayloadTooLarge {
        section: String,
        len: usize,
        capacity: usize,
    },

    #[error("section `{section}`: offset {offset} (+{len}) is outside the {size}-byte section")]
    OffsetOutOfRange {
        section: String,
        offset: u32,
        len: usize,
        size: u32,
    },

    #[error("section `{section}`: {len} bytes at offset {offset} straddle a chunk boundary")]
    RecordSplit {
        section: String,
        offset: u32,
        len: usize,
    },

    #[error(
        "section `{section}`: chunk size {chunk_size} is not a power of two of at least {min}",
        min = crate::constants::MIN_CHUNK_SIZE
    )]
    InvalidChunkSize { section: String, chunk_size: usize },

    #[error("section `{section}` grew past 4 GiB")]
    SectionOverflow { section: String },

    #[error("expected {expected} record, found {found}")]
    KindMismatch { expected: Kind, found: Kind },

    #[error("{kind} record declares {found} bytes, expected {expected}")]
    SizeMismatch {
        kind: Kind,
        expected: usize,
        found: usize,
    },

    #[error("{field}: invalid code {value}")]
    InvalidCode { field: &'static str, value: u32 },

    #[error("input truncated: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },
}
