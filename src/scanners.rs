//! Line-anchored block recognizers, kept isolated from the block parser's
//! control flow (`parser::block`) exactly as the recognizer functions are
//! kept separate from the cursor-management loop. Each function takes an
//! already-sliced line and returns the parsed pieces on a match, `None`
//! otherwise; no regex crate is used, matching the inline parser's hand-
//! scanning discipline, since every one of these productions is a simple
//! anchored prefix/suffix match over ASCII punctuation.

use crate::strings::{is_blank, trim};

/// A truly empty line (`Blank line`, recognizer order step 5): closes any
/// open section-like context.
pub fn is_empty_line(line: &str) -> bool {
    line.is_empty()
}

/// A non-empty line made up entirely of spaces/tabs (`Space-only line`,
/// recognizer order step 13): distinct from [`is_empty_line`], and fatal.
pub fn is_space_only_line(line: &str) -> bool {
    !line.is_empty() && is_blank(line)
}

/// ` ```lang?(:path)? `. Matches both the opening and closing fence line;
/// the block parser decides which based on whether the cursor is already a
/// `pre`. `lang`/`path` must each be a single run of non-whitespace bytes.
pub fn code_fence(line: &str) -> Option<(Option<String>, Option<String>)> {
    let rest = line.strip_prefix("```")?;
    if rest.is_empty() {
        return Some((None, None));
    }
    if rest.bytes().any(|b| b == b' ' || b == b'\t') {
        return None;
    }
    match rest.split_once(':') {
        Some((lang, path)) if !lang.is_empty() && !path.is_empty() => {
            Some((Some(lang.to_string()), Some(path.to_string())))
        }
        Some(_) => None,
        None => Some((Some(rest.to_string()), None)),
    }
}

/// Custom block marker: `:::`, `:::name`, or `:::name text`.
pub struct CustomBlockMarker {
    pub name: Option<String>,
    pub text: Option<String>,
}

pub fn custom_block_marker(line: &str) -> Option<CustomBlockMarker> {
    let rest = line.strip_prefix(":::")?;
    if rest.is_empty() {
        return Some(CustomBlockMarker {
            name: None,
            text: None,
        });
    }
    let rest = trim(rest);
    if rest.is_empty() {
        return None;
    }
    match rest.split_once(' ') {
        Some((name, text)) => Some(CustomBlockMarker {
            name: Some(name.to_string()),
            text: Some(trim(text).to_string()),
        }),
        None => Some(CustomBlockMarker {
            name: Some(rest.to_string()),
            text: None,
        }),
    }
}

/// Raw HTML block opener: a (possibly indented) line starting with `<` or
/// `</` followed by one of the whitelisted tag names.
pub fn html_block_start(line: &str) -> bool {
    const TAGS: [&str; 7] = ["iframe", "div", "span", "p", "pre", "code", "!--"];
    let s = line.trim_start_matches(' ');
    let s = s.strip_prefix('<').unwrap_or(return false);
    let s = s.strip_prefix('/').unwrap_or(s);
    TAGS.iter().any(|tag| s.starts_with(tag))
}

/// `^(#+) +(.+)$`.
pub fn atx_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    let spaces = rest.bytes().take_while(|&b| b == b' ').count();
    if spaces == 0 {
        return None;
    }
    let text = &rest[spaces..];
    if text.is_empty() {
        return None;
    }
    Some((hashes as u8, text))
}

/// `^( *)(\d+)\. +(.+)$`.
pub fn ordered_list_item(line: &str) -> Option<(usize, &str)> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    let rest = &line[indent..];
    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = &rest[digits..];
    let rest = rest.strip_prefix('.')?;
    let spaces = rest.bytes().take_while(|&b| b == b' ').count();
    if spaces == 0 {
        return None;
    }
    let text = &rest[spaces..];
    if text.is_empty() {
        return None;
    }
    Some((indent, text))
}

/// `^( *)- +(.+)$`.
pub fn unordered_list_item(line: &str) -> Option<(usize, &str)> {
    let indent = line.bytes().take_while(|&b| b == b' ').count();
    let rest = line[indent..].strip_prefix('-')?;
    let spaces = rest.bytes().take_while(|&b| b == b' ').count();
    if spaces == 0 {
        return None;
    }
    let text = &rest[spaces..];
    if text.is_empty() {
        return None;
    }
    Some((indent, text))
}

/// `^: +(.+)$`.
pub fn description_detail(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(':')?;
    let spaces = rest.bytes().take_while(|&b| b == b' ').count();
    if spaces == 0 {
        return None;
    }
    let text = &rest[spaces..];
    if text.is_empty() {
        return None;
    }
    Some(text)
}

/// `^> +(.+)$`.
pub fn blockquote_line(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    let spaces = rest.bytes().take_while(|&b| b == b' ').count();
    if spaces == 0 {
        return None;
    }
    let text = &rest[spaces..];
    if text.is_empty() {
        return None;
    }
    Some(text)
}

/// `^Caption: (.+)$`.
pub fn table_caption(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("Caption: ")?;
    if rest.is_empty() {
        return None;
    }
    Some(rest)
}

/// `^\|(.*)\|$`, returning the interior between the two pipes.
pub fn table_row(line: &str) -> Option<&str> {
    if line.len() < 2 {
        return None;
    }
    let bytes = line.as_bytes();
    if bytes[0] != b'|' || bytes[bytes.len() - 1] != b'|' {
        return None;
    }
    Some(&line[1..line.len() - 1])
}

/// True if a table row's interior is made up only of `:`, `-`, and
/// whitespace — the alignment separator row.
pub fn is_alignment_separator(inner: &str) -> bool {
    inner
        .bytes()
        .all(|b| matches!(b, b':' | b'-' | b' ' | b'\t' | b'|'))
        && inner.bytes().any(|b| b == b'-')
}

/// Splits a table row's interior into trimmed cell strings.
pub fn split_table_cells(inner: &str) -> Vec<&str> {
    inner.split('|').map(trim).collect()
}

/// Per-column alignment derived from one alignment-separator cell.
pub fn cell_alignment(cell: &str) -> crate::nodes::Align {
    let left = cell.starts_with(':');
    let right = cell.ends_with(':');
    match (left, right) {
        (true, false) => crate::nodes::Align::Left,
        (false, true) => crate::nodes::Align::Right,
        _ => crate::nodes::Align::Center,
    }
}

/// The blockquote attribution line: text already stripped of its `> `
/// prefix, beginning with `--- `.
pub fn blockquote_citation(text: &str) -> Option<&str> {
    text.strip_prefix("--- ")
}
