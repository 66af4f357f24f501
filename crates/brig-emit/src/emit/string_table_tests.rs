use brig_format::{DATA_SECTION_NAME, PREFIX_GLOBAL, PREFIX_LOCAL, Section};

use super::string_table::StringTable;

fn entry(section: &Section, offset: u32) -> Vec<u8> {
    let len = section.record(offset, 4).unwrap();
    let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]) as usize;
    section.record(offset + 4, len).unwrap().to_vec()
}

#[test]
fn same_text_same_offset() {
    let mut data = Section::new(DATA_SECTION_NAME);
    let mut strings = StringTable::new();

    let first = strings.intern(&mut data, "kernel", None).unwrap();
    let size = data.total_size();
    let second = strings.intern(&mut data, "kernel", None).unwrap();

    assert_eq!(first, second);
    assert_eq!(data.total_size(), size);
    assert_eq!(strings.len(), 1);
}

#[test]
fn prefixes_do_not_collide() {
    let mut data = Section::new(DATA_SECTION_NAME);
    let mut strings = StringTable::new();

    let global = strings.intern(&mut data, "foo", Some(PREFIX_GLOBAL)).unwrap();
    let local = strings.intern(&mut data, "foo", Some(PREFIX_LOCAL)).unwrap();

    assert_ne!(global, local);
    assert_eq!(entry(&data, global), b"&foo");
    assert_eq!(entry(&data, local), b"%foo");
    assert_eq!(
        strings.intern(&mut data, "foo", Some(PREFIX_GLOBAL)).unwrap(),
        global
    );
    assert_eq!(
        strings.intern(&mut data, "foo", Some(PREFIX_LOCAL)).unwrap(),
        local
    );
}

#[test]
fn entry_layout_and_padding() {
    let mut data = Section::new(DATA_SECTION_NAME);
    let mut strings = StringTable::new();
    let start = data.total_size();

    let offset = strings.intern(&mut data, "ab", Some(PREFIX_GLOBAL)).unwrap();

    assert_eq!(offset, start);
    // 4-byte length, '&', "ab", one byte of padding
    assert_eq!(data.total_size(), start + 8);
    assert_eq!(data.record(offset, 7).unwrap(), &[3, 0, 0, 0, b'&', b'a', b'b']);
}

#[test]
fn dots_are_sanitized() {
    let mut data = Section::new(DATA_SECTION_NAME);
    let mut strings = StringTable::new();

    let dotted = strings.intern(&mut data, "a.b", None).unwrap();
    let underscored = strings.intern(&mut data, "a_b", None).unwrap();

    assert_eq!(dotted, underscored);
    assert_eq!(entry(&data, dotted), b"a_b");
}
