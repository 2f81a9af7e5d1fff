//! Minimal byte classification, table-driven, trimmed to the classes this
//! dialect actually needs to test for.

#[rustfmt::skip]
const CLASS: [u8; 256] = [
    /*      0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f */
    /* 0 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 1, 0, 0,
    /* 1 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 2 */ 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 3 */ 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 0, 0, 0, 0, 0, 0,
    /* 4 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 5 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 6 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 7 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// True for ASCII space, tab, newline, carriage return.
pub fn is_space(ch: u8) -> bool {
    CLASS[ch as usize] == 1
}

/// True for ASCII `0`-`9`.
pub fn is_digit(ch: u8) -> bool {
    CLASS[ch as usize] == 2
}

/// The fixed set of characters a backslash may escape in this dialect:
/// `* \ ` ! [ ] < > ( )`.
pub fn is_escapable(ch: u8) -> bool {
    matches!(
        ch,
        b'*' | b'\\' | b'`' | b'!' | b'[' | b']' | b'<' | b'>' | b'(' | b')'
    )
}

/// Characters that force an HTML attribute value to be quoted:
/// space, `"`, `'`, `` ` ``, `=`, `<`, `>`.
pub fn is_attr_unsafe(ch: u8) -> bool {
    matches!(ch, b' ' | b'"' | b'\'' | b'`' | b'=' | b'<' | b'>')
}
