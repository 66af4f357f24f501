//! BRIG container constants.

/// Section holding strings and operand-list blobs.
pub const DATA_SECTION_NAME: &str = "hsa_data";

/// Section holding directives and instructions.
pub const CODE_SECTION_NAME: &str = "hsa_code";

/// Section holding operand records.
pub const OPERAND_SECTION_NAME: &str = "hsa_operand";

/// Default capacity of a single section chunk in bytes.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Smallest chunk capacity accepted by [`crate::Section::with_chunk_size`].
///
/// Every fixed-size record must fit in one chunk; the largest is 32 bytes.
pub const MIN_CHUNK_SIZE: usize = 64;

/// Alignment of section contents and data-section entries.
pub const SECTION_ALIGN: u32 = 4;

/// Fixed part of a section header: byteCount, headerByteCount, nameLength.
pub const SECTION_HEADER_FIXED_SIZE: usize = 12;

pub const HSAIL_MAJOR: u32 = 1;
pub const HSAIL_MINOR: u32 = 0;
pub const BRIG_MAJOR: u32 = 1;
pub const BRIG_MINOR: u32 = 0;

/// Name prefix for program-scope symbols and functions.
pub const PREFIX_GLOBAL: u8 = b'&';

/// Name prefix for function-scope symbols.
pub const PREFIX_LOCAL: u8 = b'%';

/// Name prefix for labels.
pub const PREFIX_LABEL: u8 = b'@';

/// Symbol modifier flag marking a definition (as opposed to a declaration).
pub const SYMBOL_DEFINITION: u8 = 1;

/// Executable modifier flag marking a definition.
pub const EXECUTABLE_DEFINITION: u8 = 1;
