use crate::measure::{Bytes, Line, Measure, Utf8};
use crate::Rope;

fn utf8_rope(s: &str) -> Rope<u8, Utf8> {
    Rope::from_utf8(s.as_bytes()).unwrap()
}

// S1
#[test]
fn s1_empty() {
    let r: Rope<u8, Bytes> = Rope::empty();
    assert_eq!(r.size(), 0);
    let mut chunks = 0;
    r.each_chunk(|_| chunks += 1);
    assert_eq!(chunks, 0);
    let begin = r.begin();
    let (l, rr) = r.split_before(&begin);
    assert!(l.is_empty());
    assert!(rr.is_empty());
}

// S2
#[test]
fn s2_ascii_split() {
    let r = utf8_rope("hello");
    assert_eq!(r.size(), 5);
    let mut cursor = r.begin();
    cursor.advance(2);
    let (l, rr) = r.split_before(&cursor);
    assert_eq!(l.to_vec(), b"he");
    assert_eq!(rr.to_vec(), b"llo");
}

// S3
#[test]
fn s3_utf8_boundary() {
    let s = "インターネット";
    assert_eq!(s.len(), 21);
    assert_eq!(s.chars().count(), 7);
    let r = utf8_rope(s);
    assert_eq!(r.measure().unit_of(), 7);

    let mut cursor = r.begin();
    cursor.advance(3);
    assert_eq!(cursor.raw_index(), 9);

    let (l, rr) = r.split_before(&cursor);
    assert_eq!(l.size(), 9);
    assert_eq!(rr.size(), 12);
    assert_eq!(String::from_utf8(l.to_vec()).unwrap(), "イン");
    assert_eq!(String::from_utf8(rr.to_vec()).unwrap(), "ターネット");
}

// S4
#[test]
fn s4_rebalance_preserves_order() {
    let mut r: Rope<u8, Bytes> = Rope::empty();
    for c in b'a'..=b'z' {
        r = r.concat(&Rope::from_buffer(&[c]));
    }
    let balanced = r.balance();
    assert_eq!(balanced.to_vec(), (b'a'..=b'z').collect::<Vec<u8>>());
}

// S5
#[test]
fn s5_substring() {
    let r = utf8_rope("the quick brown fox");
    let mut begin = r.begin();
    begin.advance(4);
    let mut end = r.begin();
    end.advance(9);
    let sub = r.substr(begin.raw_index(), end.raw_index());
    assert_eq!(sub.to_vec(), b"quick");
}

// S6
#[test]
fn s6_lines() {
    let r: Rope<u8, Line> = Rope::from_buffer(b"a\nbb\nccc");
    assert_eq!(r.measure().unit_of(), 3);
    let mut cursor = r.begin();
    cursor.advance(2);
    assert_eq!(cursor.raw_index(), 5);
    let (l, rr) = r.split_before(&cursor);
    assert_eq!(l.to_vec(), b"a\nbb\n");
    assert_eq!(rr.to_vec(), b"ccc");
}

#[test]
fn concat_identity() {
    let r = utf8_rope("hello world");
    let empty: Rope<u8, Utf8> = Rope::empty();
    assert_eq!(r.concat(&empty), r);
    assert_eq!(empty.concat(&r), r);
}

#[test]
fn substring_law_matches_composed_split_before() {
    let r = utf8_rope("the quick brown fox");
    let direct = r.substr(4, 9);
    let composed = r.split_before_index(9).split_after_index(4);
    assert_eq!(direct, composed);
}

#[test]
fn from_utf8_rejects_invalid_bytes() {
    let bytes = [0xff, 0xfe, 0x00];
    let err = Rope::from_utf8(&bytes).unwrap_err();
    assert_eq!(err, crate::error::RopeError::InvalidUtf8 { offset: 0 });
}

use quickcheck::quickcheck;

/// Independent reference for [`Line`]'s `unit_of`: one more than the
/// newline count unless the buffer ends with a newline, matching the
/// convention that an empty buffer still counts as one (empty) line.
fn expected_line_unit_of(data: &[u8]) -> usize {
    let newlines = data.iter().filter(|&&b| b == b'\n').count();
    let ends_with_newline = data.last() == Some(&b'\n');
    newlines + if ends_with_newline { 0 } else { 1 }
}

quickcheck! {
    fn round_trip_iter(data: Vec<u8>) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        r.iter().collect::<Vec<u8>>() == data
    }

    fn round_trip_each_chunk(data: Vec<u8>) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        let mut out = Vec::new();
        r.each_chunk(|chunk| out.extend_from_slice(chunk));
        out == data
    }

    fn measure_consistency(data: Vec<u8>) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        r.measure().unit_of() == data.len()
    }

    fn split_law(data: Vec<u8>, at: usize) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        let at = if data.is_empty() { 0 } else { at % (data.len() + 1) };
        let (l, rr) = (r.split_before_index(at), r.split_after_index(at));
        l.size() == at && l.to_vec() == data[..at] && rr.to_vec() == data[at..]
    }

    fn balance_preserves_contents(data: Vec<u8>) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        r.balance().to_vec() == data
    }

    /// Property 2: concatenating with the identity rope is a no-op on
    /// either side, for any contents.
    fn concat_identity_law(data: Vec<u8>) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        let empty: Rope<u8, Bytes> = Rope::empty();
        r.concat(&empty) == r && empty.concat(&r) == r
    }

    /// Property 4: `substr` agrees with composing the two split
    /// primitives, for arbitrary (clamped, ordered) start/end indices.
    fn substring_law(data: Vec<u8>, a: usize, b: usize) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        let len = data.len();
        let a = if len == 0 { 0 } else { a % (len + 1) };
        let b = if len == 0 { 0 } else { b % (len + 1) };
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let direct = r.substr(start, end);
        let composed = r.split_before_index(end).split_after_index(start);
        direct == composed
    }

    /// Property 7: repeatedly advancing a cursor one unit at a time never
    /// moves its raw index backward, and it saturates at the rope's size.
    fn cursor_advance_is_monotone(data: Vec<u8>) -> bool {
        let r: Rope<u8, Bytes> = Rope::from_buffer(&data);
        let mut cursor = r.begin();
        let mut last = cursor.raw_index();
        if last != 0 {
            return false;
        }
        for _ in 0..data.len() + 2 {
            cursor.advance(1);
            let now = cursor.raw_index();
            if now < last {
                return false;
            }
            last = now;
        }
        last == data.len()
    }

    /// Property 8: `Utf8::unit_of` agrees with `str::chars().count()`, even
    /// when the two halves are joined at an arbitrary byte offset that may
    /// land in the middle of a multi-byte code point.
    fn utf8_unit_of_matches_char_count(s: String, split: usize) -> bool {
        let bytes = s.as_bytes();
        let split = if bytes.is_empty() { 0 } else { split % (bytes.len() + 1) };
        let left: Rope<u8, Utf8> = Rope::from_buffer(&bytes[..split]);
        let right: Rope<u8, Utf8> = Rope::from_buffer(&bytes[split..]);
        let joined = left.concat(&right);
        joined.measure().unit_of() == s.chars().count()
    }

    /// Property 9: `Line::unit_of` agrees with an independent newline
    /// count, even when the two halves are joined at an arbitrary split
    /// point that may fall right after (or right before) a newline byte.
    fn line_unit_of_matches_newline_count(data: Vec<u8>, split: usize) -> bool {
        let split = if data.is_empty() { 0 } else { split % (data.len() + 1) };
        let left: Rope<u8, Line> = Rope::from_buffer(&data[..split]);
        let right: Rope<u8, Line> = Rope::from_buffer(&data[split..]);
        let joined = left.concat(&right);
        joined.measure().unit_of() == expected_line_unit_of(&data)
    }
}
