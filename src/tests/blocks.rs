use pretty_assertions::assert_eq;

use super::{render, with_ast};
use crate::nodes::NodeValue;

#[test]
fn fenced_code_with_lang() {
    assert_eq!(
        render("```js\nx=1\n```"),
        "<pre class=js data-code=js><code translate=no class=language-js>x=1</code></pre>\n"
    );
}

#[test]
fn fenced_code_with_lang_and_path() {
    assert_eq!(
        render("```js:src/a.js\nx=1\n```"),
        concat!(
            "<pre class=js data-code=js data-path=src/a.js>",
            "<code translate=no class=language-js>x=1</code></pre>\n",
        )
    );
}

#[test]
fn fenced_code_with_no_lang() {
    assert_eq!(render("```\nplain\n```"), "<pre><code translate=no>plain</code></pre>\n");
}

#[test]
fn fenced_code_joins_multiple_lines_with_newline() {
    assert_eq!(
        render("```\na\nb\n```"),
        "<pre><code translate=no>a\nb</code></pre>\n"
    );
}

#[test]
fn details_block_with_summary_text() {
    assert_eq!(
        render(":::details Notes\n\nbody\n\n:::"),
        concat!(
            "<details>\n",
            "  <summary>Notes</summary>\n",
            "  <section>\n",
            "    <p>body\n",
            "  </section>\n",
            "</details>\n",
        )
    );
}

#[test]
fn message_block_defaults_to_class_message() {
    assert_eq!(
        render(":::message\n\nhi\n\n:::"),
        concat!(
            "<details>\n",
            "  <summary>message</summary>\n",
            "  <section>\n",
            "    <p>hi\n",
            "  </section>\n",
            "</details>\n",
        )
    );
}

#[test]
fn message_alert_block_uses_alert_class_and_summary() {
    with_ast(":::message alert\n\nhi\n\n:::", |root| {
        let details = root.children().next().unwrap();
        let ast = details.data.borrow();
        assert!(matches!(ast.value, NodeValue::Details));
        assert_eq!(ast.attr.get("class"), Some(Some("alert")));
    });
    assert_eq!(
        render(":::message alert\n\nhi\n\n:::"),
        concat!(
            "<details>\n",
            "  <summary>alert</summary>\n",
            "  <section>\n",
            "    <p>hi\n",
            "  </section>\n",
            "</details>\n",
        )
    );
}

#[test]
fn raw_html_block_is_emitted_verbatim() {
    assert_eq!(render("<div class=\"x\">\n  hi\n</div>"), "<div class=\"x\">\n  hi\n</div>\n");
}

#[test]
fn blockquote_citation_line_sets_cite_attribute() {
    assert_eq!(
        render("> quoted\n> --- [src](http://x)"),
        concat!(
            "<blockquote cite=\"http://x\">\n",
            "  <p>quoted\n",
            "--- <cite><a href=\"http://x\">src</a></cite>\n",
            "</blockquote>\n",
        )
    );
}

#[test]
fn standalone_mdash_line_is_escaped_to_entity() {
    assert_eq!(render("--- "), "<p>&mdash; \n");
}

#[test]
fn definition_list_from_paragraph_and_dd() {
    assert_eq!(
        render("Term\n: Meaning"),
        concat!(
            "<dl>\n",
            "  <div>\n",
            "    <dt>Term\n",
            "    <dd>Meaning\n",
            "  </div>\n",
            "</dl>\n",
        )
    );
}

#[test]
fn second_dd_appends_to_same_dl_div() {
    with_ast("Term\n: One\n: Two", |root| {
        let dl = root.children().next().unwrap();
        assert!(matches!(dl.data.borrow().value, NodeValue::DescriptionList));
        let div = dl.children().next().unwrap();
        assert_eq!(div.children().count(), 3);
    });
}

#[test]
fn table_caption_builds_figure_with_aligned_columns() {
    assert_eq!(
        render("Caption: T\n|a|b|\n|:-|-:|\n|1|2|"),
        concat!(
            "<figure>\n",
            "  <figcaption>T</figcaption>\n",
            "  <table>\n",
            "    <thead>\n",
            "      <tr>\n",
            "        <th class=align-left>a</th>\n",
            "        <th class=align-right>b</th>\n",
            "      </tr>\n",
            "    </thead>\n",
            "    <tbody>\n",
            "      <tr>\n",
            "        <td class=align-left>1</td>\n",
            "        <td class=align-right>2</td>\n",
            "      </tr>\n",
            "    </tbody>\n",
            "  </table>\n",
            "</figure>\n",
        )
    );
}
