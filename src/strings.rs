//! Small string utilities shared by the block and inline parsers: plain byte
//! scanning over `&str`, no `regex`/`unicode-segmentation`, since the
//! dialect is ASCII-anchored at the structural level.

pub fn rtrim(s: &str) -> &str {
    s.trim_end_matches([' ', '\t', '\n', '\r'])
}

pub fn ltrim(s: &str) -> &str {
    s.trim_start_matches([' ', '\t', '\n', '\r'])
}

pub fn trim(s: &str) -> &str {
    ltrim(rtrim(s))
}

/// True if `s` is empty or made up entirely of spaces/tabs.
pub fn is_blank(s: &str) -> bool {
    s.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Counts the leading run of ASCII spaces (not tabs — this dialect's
/// indentation rules are defined purely in terms of 2-space units).
pub fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b' ').count()
}

/// True if `s` ends with exactly one trailing space (used by the inline
/// whitespace-policing rule: a production must not be followed by two
/// trailing spaces).
pub fn ends_with_double_space(s: &str) -> bool {
    s.len() >= 2 && s.as_bytes()[s.len() - 1] == b' ' && s.as_bytes()[s.len() - 2] == b' '
}

/// True if `s` contains "  " (two consecutive spaces) anywhere.
pub fn contains_double_space(s: &str) -> bool {
    s.as_bytes().windows(2).any(|w| w == b"  ")
}
