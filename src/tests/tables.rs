use pretty_assertions::assert_eq;

use super::with_ast;
use crate::nodes::{Align, NodeValue};

#[test]
fn thead_and_tbody_column_counts_match() {
    with_ast("Caption: T\n|a|b|c|\n|-|-|-|\n|1|2|3|", |root| {
        let figure = root.children().next().unwrap();
        let table = figure.children().nth(1).unwrap();
        let thead = table.children().next().unwrap();
        let tbody = table.children().nth(1).unwrap();
        let header_row = thead.children().next().unwrap();
        let body_row = tbody.children().next().unwrap();
        assert_eq!(header_row.children().count(), 3);
        assert_eq!(body_row.children().count(), 3);
        let aligns = tbody.data.borrow().aligns.clone().unwrap();
        assert_eq!(aligns.len(), 3);
    });
}

#[test]
fn unmarked_and_doubly_marked_columns_center() {
    with_ast("Caption: T\n|a|b|\n|-|:-:|\n|1|2|", |root| {
        let figure = root.children().next().unwrap();
        let table = figure.children().nth(1).unwrap();
        let tbody = table.children().nth(1).unwrap();
        let aligns = tbody.data.borrow().aligns.clone().unwrap();
        assert_eq!(aligns, vec![Align::Center, Align::Center]);
    });
}

#[test]
fn body_cells_inherit_the_same_column_alignment() {
    with_ast("Caption: T\n|a|b|\n|:-|-:|\n|1|2|", |root| {
        let figure = root.children().next().unwrap();
        let table = figure.children().nth(1).unwrap();
        let tbody = table.children().nth(1).unwrap();
        let row = tbody.children().next().unwrap();
        let cells: Vec<_> = row.children().collect();
        assert_eq!(cells[0].data.borrow().attr.get("align"), Some(Some("left")));
        assert_eq!(cells[1].data.borrow().attr.get("align"), Some(Some("right")));
    });
}

#[test]
fn header_row_is_th_not_td() {
    with_ast("Caption: T\n|a|\n|-|\n|1|", |root| {
        let figure = root.children().next().unwrap();
        let table = figure.children().nth(1).unwrap();
        let thead = table.children().next().unwrap();
        let header_row = thead.children().next().unwrap();
        let th = header_row.children().next().unwrap();
        assert!(matches!(th.data.borrow().value, NodeValue::TableHeaderCell));
    });
}
