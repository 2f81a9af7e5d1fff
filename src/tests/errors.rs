use super::render;
use crate::error::DecodeError;

fn decode_err(md: &str) -> DecodeError {
    let arena = typed_arena::Arena::new();
    crate::decode(&arena, md).expect_err("expected a decode error")
}

#[test]
fn heading_level_skip_is_a_sectioning_violation() {
    assert!(matches!(decode_err("# H1\n### H3"), DecodeError::Sectioning { .. }));
}

#[test]
fn double_space_before_emphasis_is_a_whitespace_violation() {
    assert!(matches!(decode_err("a  *b*"), DecodeError::Whitespace { .. }));
}

#[test]
fn table_row_without_caption_is_structural() {
    assert!(matches!(decode_err("| a | b |"), DecodeError::Structural { .. }));
}

#[test]
fn dd_without_preceding_paragraph_is_structural() {
    assert!(matches!(decode_err(": orphan"), DecodeError::Structural { .. }));
}

#[test]
fn odd_list_indent_is_rejected() {
    assert!(matches!(decode_err("- a\n   - b"), DecodeError::OddIndent { .. }));
}

#[test]
fn unmatched_strong_delimiter_is_rejected() {
    assert!(matches!(decode_err("**open"), DecodeError::UnmatchedDelimiter { .. }));
}

#[test]
fn unmatched_code_delimiter_is_rejected() {
    assert!(matches!(decode_err("`open"), DecodeError::UnmatchedDelimiter { .. }));
}

#[test]
fn space_only_line_is_rejected() {
    assert!(matches!(decode_err(" "), DecodeError::Structural { .. }));
}

#[test]
fn error_message_embeds_the_offending_line() {
    let err = decode_err("a  *b*");
    assert!(err.to_string().contains("a  *b*"));
}

#[test]
fn sectioning_error_message_names_both_levels() {
    let err = decode_err("# H1\n### H3");
    let msg = err.to_string();
    assert!(msg.contains('3') && msg.contains('1'));
}

#[test]
fn valid_documents_still_render_fine() {
    assert_eq!(render("# ok"), "<article>\n  <h1>ok</h1>\n</article>\n");
}
