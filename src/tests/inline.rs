use pretty_assertions::assert_eq;

use super::render;

#[test]
fn strong_does_not_nest_emph() {
    assert_eq!(render("**a *b* c**"), "<p><strong>a *b* c</strong>\n");
}

#[test]
fn code_nests_inside_strong_and_emph() {
    assert_eq!(render("**a `b` c**"), "<p><strong>a <code translate=no>b</code> c</strong>\n");
    assert_eq!(render("*a `b` c*"), "<p><em>a <code translate=no>b</code> c</em>\n");
}

#[test]
fn link_with_text_and_url() {
    assert_eq!(render("[home](http://x)"), "<p><a href=\"http://x\">home</a>\n");
}

#[test]
fn link_with_no_closing_paren_falls_back_to_literal() {
    assert_eq!(render("[oops"), "<p>[oops\n");
}

#[test]
fn angle_autolink() {
    assert_eq!(render("<http://x>"), "<p><a href=\"http://x\">http://x</a>\n");
}

#[test]
fn angle_without_closing_gt_falls_back_to_literal_lt() {
    // No `>` closes the angle-autolink attempt, so `<` becomes literal text;
    // scanning then resumes and the bare `http://` URL still auto-links.
    assert_eq!(render("<http://x"), "<p>&lt;<a href=\"http://x\">http://x</a>\n");
}

#[test]
fn bare_autolink_bounded_by_space() {
    assert_eq!(render("see http://x here"), "<p>see <a href=\"http://x\">http://x</a> here\n");
}

#[test]
fn bare_autolink_bounded_by_closing_paren() {
    assert_eq!(render("(http://x)"), "<p>(<a href=\"http://x\">http://x</a>)\n");
}

#[test]
fn image_with_title() {
    assert_eq!(
        render("![alt](src.png \"a title\")"),
        "<p><img loading=lazy decoding=async src=src.png alt=\"alt\" title=\"a title\">\n"
    );
}

#[test]
fn image_without_title() {
    assert_eq!(
        render("![alt](src.png)"),
        "<p><img loading=lazy decoding=async src=src.png alt=\"alt\">\n"
    );
}

#[test]
fn backslash_escape_strips_backslash_for_escapable_chars() {
    assert_eq!(render("\\*not strong\\*"), "<p>*not strong*\n");
}

#[test]
fn backslash_before_non_escapable_char_is_kept() {
    assert_eq!(render("\\q"), "<p>\\q\n");
}

#[test]
fn text_is_html_escaped() {
    assert_eq!(render("a < b & c"), "<p>a &lt; b &amp; c\n");
}

#[test]
fn inline_blockquote_production_recurses() {
    assert_eq!(
        render("text > quoted"),
        concat!(
            "<p>text \n",
            "  <blockquote>\n",
            "    <p>quoted\n",
            "  </blockquote>\n",
        )
    );
}
