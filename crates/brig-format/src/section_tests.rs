use super::*;
use crate::output::MemoryWriter;

fn small(name: &str) -> Section {
    Section::with_chunk_size(name, MIN_CHUNK_SIZE).unwrap()
}

fn assert_size_invariant(section: &Section) {
    let live: usize = section.chunk_lens().sum();
    assert_eq!(
        section.total_size() as usize,
        section.header_byte_count() as usize + live
    );
}

#[test]
fn header_layout() {
    let section = Section::new("hsa_data");
    let bytes = section.to_bytes();

    assert_eq!(section.header_byte_count(), 24);
    assert_eq!(section.total_size(), 24);
    assert_eq!(section.chunk_count(), 0);
    assert_eq!(&bytes[0..4], &24u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &24u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &8u32.to_le_bytes());
    assert_eq!(&bytes[12..20], b"hsa_data");
    assert_eq!(&bytes[20..24], &[0, 0, 0, 0]);
}

#[test]
fn header_padded_to_four() {
    let section = Section::new("abc");

    // 12 + 3 + NUL = 16, already aligned
    assert_eq!(section.header_byte_count(), 16);
    assert_eq!(Section::new("abcd").header_byte_count(), 20);
}

#[test]
fn add_returns_running_total() {
    let mut section = Section::new("hsa_code");
    let mut expected = section.total_size();

    for len in [4usize, 8, 1, 3, 12, 0, 20] {
        let offset = section.add(&vec![0xaa; len]).unwrap();
        assert_eq!(offset, expected);
        expected += len as u32;
    }
    assert_eq!(section.total_size(), expected);
    assert_size_invariant(&section);
}

#[test]
fn add_never_splits_payload() {
    let mut section = small("s");

    let first = section.add(&[1; 40]).unwrap();
    let second = section.add(&[2; 40]).unwrap();

    assert_eq!(first, 16);
    assert_eq!(second, 56);
    assert_eq!(section.chunk_lens().collect::<Vec<_>>(), vec![40, 40]);
    assert_eq!(section.record(second, 40).unwrap(), &[2; 40]);
    assert_size_invariant(&section);
}

#[test]
fn add_fills_chunk_exactly() {
    let mut section = small("s");

    section.add(&[1; 32]).unwrap();
    section.add(&[2; 32]).unwrap();
    section.add(&[3; 4]).unwrap();

    assert_eq!(section.chunk_lens().collect::<Vec<_>>(), vec![64, 4]);
}

#[test]
fn payload_larger_than_chunk_rejected() {
    let mut section = small("s");
    let err = section.add(&[0; 65]).unwrap_err();

    assert_eq!(
        err,
        FormatError::PayloadTooLarge {
            section: "s".to_string(),
            len: 65,
            capacity: 64,
        }
    );
    assert_eq!(section.total_size(), section.header_byte_count());
}

#[test]
fn round_up_pads_within_chunk() {
    let mut section = Section::new("hsa_data");
    section.add(&[7; 5]).unwrap();
    section.round_up(4).unwrap();

    assert_eq!(section.total_size(), 32);
    assert_eq!(section.record(24, 8).unwrap(), &[7, 7, 7, 7, 7, 0, 0, 0]);
}

#[test]
fn round_up_noop_when_aligned() {
    let mut section = Section::new("hsa_data");
    section.add(&[7; 8]).unwrap();
    section.round_up(4).unwrap();

    assert_eq!(section.total_size(), 32);
}

#[test]
fn round_up_spans_chunk_boundary() {
    let mut section = Section::with_chunk_size("hsa_code", 64).unwrap();
    section.add(&[1; 62]).unwrap();
    assert_eq!(section.total_size(), 86);

    section.round_up(16).unwrap();

    assert_eq!(section.total_size(), 96);
    assert_eq!(section.chunk_lens().collect::<Vec<_>>(), vec![64, 8]);
    assert_size_invariant(&section);

    let next = section.add(&[9; 4]).unwrap();
    assert_eq!(next, 96);
}

#[test]
fn record_split_detected() {
    let mut section = Section::with_chunk_size("hsa_code", 64).unwrap();
    section.add(&[1; 62]).unwrap();
    section.round_up(16).unwrap();

    let err = section.record(84, 8).unwrap_err();
    assert!(matches!(err, FormatError::RecordSplit { offset: 84, len: 8, .. }));
}

#[test]
fn header_and_tail_offsets_rejected() {
    let mut section = Section::new("hsa_operand");
    section.add(&[0; 8]).unwrap();

    assert!(matches!(
        section.record(4, 4),
        Err(FormatError::OffsetOutOfRange { offset: 4, .. })
    ));
    assert!(matches!(
        section.record(32, 4),
        Err(FormatError::OffsetOutOfRange { offset: 32, .. })
    ));
}

#[test]
fn patch_in_later_chunk() {
    let mut section = small("s");
    section.add(&[0; 60]).unwrap();
    let offset = section.add(&[0; 8]).unwrap();

    section.patch_u32(offset + 4, 0xdead_beef).unwrap();

    assert_eq!(section.chunk_count(), 2);
    assert_eq!(
        section.record(offset, 8).unwrap(),
        &[0, 0, 0, 0, 0xef, 0xbe, 0xad, 0xde]
    );
}

#[test]
fn output_matches_to_bytes() {
    let mut section = small("hsa_data");
    section.add(&[1; 50]).unwrap();
    section.add(&[2; 30]).unwrap();
    section.round_up(4).unwrap();

    let mut writer = MemoryWriter::new();
    section.output(&mut writer).unwrap();
    let written = writer.section("hsa_data").unwrap();

    assert_eq!(written, section.to_bytes().as_slice());
    assert_eq!(written.len(), section.total_size() as usize);
    assert_eq!(&written[0..4], &section.total_size().to_le_bytes());
    assert_eq!(written.len() % 4, 0);
}

#[test]
fn chunk_size_must_be_power_of_two() {
    let err = Section::with_chunk_size("s", 100).unwrap_err();

    assert_eq!(
        err,
        FormatError::InvalidChunkSize {
            section: "s".to_string(),
            chunk_size: 100,
        }
    );
    assert_eq!(
        err.to_string(),
        "section `s`: chunk size 100 is not a power of two of at least 64"
    );
}

#[test]
fn chunk_size_below_minimum_rejected() {
    assert!(matches!(
        Section::with_chunk_size("s", 32),
        Err(FormatError::InvalidChunkSize { chunk_size: 32, .. })
    ));
    assert_eq!(Section::with_chunk_size("s", 128).unwrap().chunk_size(), 128);
}
