// `<table>` → GFM table.
//
// The first row is the header row. Cell content is reduced to one line of
// phrasing content; `colspan` expands into empty cells so columns stay
// aligned. A `<caption>` becomes a paragraph above the table. Tables nested
// inside a cell collapse to their text.

use markup5ever_rcdom::Handle;

use super::handlers::{all, get_attr, tag_name};
use super::util::{is_blank, to_phrasing};
use super::State;
use crate::mdast::{self, AlignKind, Node};

/// Upper bound for `colspan`, as in the HTML table model.
const MAX_COLSPAN: usize = 1000;

pub(crate) fn table(state: &mut State, handle: &Handle) -> Vec<Node> {
    if state.in_table {
        return nested_table_text(state, handle);
    }

    state.in_table = true;
    let mut out = caption(state, handle);
    let mut align: Vec<Option<AlignKind>> = Vec::new();
    let mut rows: Vec<Node> = Vec::new();

    for tr in row_elements(handle) {
        let mut cells = Vec::new();
        for cell in &cell_elements(&tr) {
            let span = get_attr(cell, "colspan")
                .and_then(|s| s.trim().parse::<usize>().ok())
                .unwrap_or(1)
                .clamp(1, MAX_COLSPAN);

            if rows.is_empty() {
                align.push(cell_align(cell));
                align.extend(std::iter::repeat_n(None, span - 1));
            }

            state.depth += 1;
            let children = to_phrasing(all(state, cell));
            state.depth -= 1;

            cells.push(Node::TableCell(mdast::TableCell { children }));
            cells.extend(
                std::iter::repeat_with(|| Node::TableCell(mdast::TableCell { children: vec![] }))
                    .take(span - 1),
            );
        }
        if !cells.is_empty() {
            rows.push(Node::TableRow(mdast::TableRow { children: cells }));
        }
    }
    state.in_table = false;

    if !rows.is_empty() {
        out.push(Node::Table(mdast::Table {
            align,
            children: rows,
        }));
    }
    out
}

/// The table's `<caption>` as a paragraph, or nothing when it is missing or
/// blank.
fn caption(state: &mut State, table: &Handle) -> Vec<Node> {
    let Some(caption) = table
        .children
        .borrow()
        .iter()
        .find(|c| tag_name(c).as_deref() == Some("caption"))
        .cloned()
    else {
        return vec![];
    };

    let children = to_phrasing(all(state, &caption));
    if is_blank(&children) {
        return vec![];
    }
    vec![Node::Paragraph(mdast::Paragraph { children })]
}

/// Rows of this table in document order, looking through row groups but not
/// into nested tables.
fn row_elements(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in table.children.borrow().iter() {
        match tag_name(child).as_deref() {
            Some("tr") => rows.push(child.clone()),
            Some("thead" | "tbody" | "tfoot") => rows.extend(
                child
                    .children
                    .borrow()
                    .iter()
                    .filter(|c| tag_name(c).as_deref() == Some("tr"))
                    .cloned(),
            ),
            _ => {}
        }
    }
    rows
}

fn cell_elements(row: &Handle) -> Vec<Handle> {
    row.children
        .borrow()
        .iter()
        .filter(|c| matches!(tag_name(c).as_deref(), Some("td" | "th")))
        .cloned()
        .collect()
}

/// A table inside a table cell: its cells' content, space separated.
fn nested_table_text(state: &mut State, handle: &Handle) -> Vec<Node> {
    let mut out = to_phrasing(caption(state, handle));
    for tr in row_elements(handle) {
        for cell in cell_elements(&tr) {
            let content = to_phrasing(all(state, &cell));
            if content.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(Node::text(" "));
            }
            out.extend(content);
        }
    }
    out
}

/// Column alignment from a header cell's `align` attribute.
fn cell_align(cell: &Handle) -> Option<AlignKind> {
    match get_attr(cell, "align")?.trim().to_ascii_lowercase().as_str() {
        "left" => Some(AlignKind::Left),
        "right" => Some(AlignKind::Right),
        "center" => Some(AlignKind::Center),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{parse_html, transform};
    use crate::mdast::{self, AlignKind, Node};

    fn first_table(html: &str) -> crate::mdast::Table {
        let dom = parse_html(html);
        let root = transform(&dom.document);
        root.children()
            .unwrap()
            .iter()
            .find_map(|n| match n {
                Node::Table(t) => Some(t.clone()),
                _ => None,
            })
            .expect("table")
    }

    fn row_width(row: &Node) -> usize {
        row.children().map_or(0, <[Node]>::len)
    }

    #[test]
    fn test_rows_from_all_groups() {
        let table = first_table(
            "<table><thead><tr><th>h</th></tr></thead>\
             <tbody><tr><td>a</td></tr><tr><td>b</td></tr></tbody></table>",
        );
        assert_eq!(table.children.len(), 3);
    }

    #[test]
    fn test_colspan_expands() {
        let table = first_table(
            "<table><tr><th colspan=\"2\">wide</th></tr><tr><td>a</td><td>b</td></tr></table>",
        );
        assert_eq!(row_width(&table.children[0]), 2);
        assert_eq!(table.align, vec![None, None]);
    }

    #[test]
    fn test_align_from_header() {
        let table = first_table(
            "<table><tr><th align=\"right\">n</th><th>m</th></tr><tr><td>1</td><td>2</td></tr></table>",
        );
        assert_eq!(table.align, vec![Some(AlignKind::Right), None]);
    }

    #[test]
    fn test_nested_table_becomes_text() {
        let table = first_table(
            "<table><tr><td><table><tr><td>in</td><td>ner</td></tr></table></td></tr></table>",
        );
        let row = &table.children[0];
        let cell = &row.children().unwrap()[0];
        assert_eq!(cell.children().unwrap(), &[Node::text("in ner")]);
    }

    #[test]
    fn test_caption_becomes_paragraph_before_table() {
        let dom = parse_html(
            "<table><caption>Q3 <b>Budget</b></caption><tr><th>a</th></tr><tr><td>1</td></tr></table>",
        );
        let root = transform(&dom.document);
        let children = root.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[0],
            Node::Paragraph(mdast::Paragraph {
                children: vec![
                    Node::text("Q3 "),
                    Node::Strong(mdast::Strong {
                        children: vec![Node::text("Budget")],
                    }),
                ],
            })
        );
        assert!(matches!(children[1], Node::Table(_)));
    }

    #[test]
    fn test_caption_without_rows_is_kept() {
        let dom = parse_html("<table><caption>Empty</caption></table>");
        let root = transform(&dom.document);
        assert_eq!(
            root.children().unwrap(),
            &[Node::Paragraph(mdast::Paragraph {
                children: vec![Node::text("Empty")],
            })]
        );
    }

    #[test]
    fn test_nested_table_caption_leads_text() {
        let table = first_table(
            "<table><tr><td><table><caption>cap</caption><tr><td>x</td></tr></table></td></tr></table>",
        );
        let cell = &table.children[0].children().unwrap()[0];
        assert_eq!(cell.children().unwrap(), &[Node::text("cap x")]);
    }

    #[test]
    fn test_block_content_in_cell_flattened() {
        let table = first_table("<table><tr><td><p>one</p><p>two</p></td></tr></table>");
        let cell = &table.children[0].children().unwrap()[0];
        assert_eq!(cell.children().unwrap(), &[Node::text("one two")]);
    }
}
