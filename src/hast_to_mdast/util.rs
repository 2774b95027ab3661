// Shared utilities for the hast_to_mdast module.

use std::sync::LazyLock;

use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;

use crate::mdast::{self, Node};

/// Runs of HTML inter-element whitespace (space, tab, LF, FF, CR).
static HTML_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\x0C\r]+").expect("whitespace pattern"));

/// Collapse HTML whitespace runs to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    HTML_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Concatenated text of a subtree, `<br>` counted as a newline.
///
/// Iterative so it is safe on subtrees past the render depth limit.
pub(crate) fn text_content(handle: &Handle) -> String {
    let mut out = String::new();
    let mut stack = vec![handle.clone()];
    while let Some(node) = stack.pop() {
        match node.data {
            NodeData::Text { ref contents } => out.push_str(&contents.borrow()),
            NodeData::Element { ref name, .. } if name.local.as_ref() == "br" => out.push('\n'),
            _ => {}
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }
    out
}

/// Remove leading and trailing Break nodes and whitespace-only Text nodes.
pub(crate) fn drop_surrounding_breaks(mut nodes: Vec<Node>) -> Vec<Node> {
    fn is_droppable_edge(n: &Node) -> bool {
        matches!(n, Node::Break(_)) || matches!(n, Node::Text(t) if t.value.trim().is_empty())
    }

    let start = nodes
        .iter()
        .position(|n| !is_droppable_edge(n))
        .unwrap_or(nodes.len());
    if start > 0 {
        nodes.drain(..start);
    }

    while nodes.last().is_some_and(is_droppable_edge) {
        nodes.pop();
    }

    nodes
}

/// Check if a list of nodes contains only whitespace-only text.
pub(crate) fn is_whitespace_only(nodes: &[Node]) -> bool {
    nodes.iter().all(|n| match n {
        Node::Text(t) => t.value.trim().is_empty(),
        _ => false,
    })
}

/// Whether nodes would render as nothing but whitespace: only blank text,
/// breaks, and wrappers around such content. Images, code and links count
/// as content; a link with no text still carries its target.
pub(crate) fn is_blank(nodes: &[Node]) -> bool {
    nodes.iter().all(|n| match n {
        Node::Text(t) => t.value.trim().is_empty(),
        Node::Break(_) | Node::ThematicBreak(_) => true,
        Node::Image(_) | Node::InlineCode(_) | Node::Code(_) | Node::Link(_) => false,
        other => other.children().is_none_or(is_blank),
    })
}

/// Reduce arbitrary content to phrasing, for places that can only hold one
/// line of inline content (headings, table cells).
///
/// Phrasing nodes pass through; blocks are unwrapped to their inline content
/// with a space between siblings; code blocks become text.
pub(crate) fn to_phrasing(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::new();
    for node in nodes {
        if node.is_phrasing() {
            out.push(node);
            continue;
        }
        if !out.is_empty() {
            out.push(Node::text(" "));
        }
        match node {
            Node::Code(code) => out.push(Node::text(collapse_whitespace(&code.value))),
            Node::ThematicBreak(_) => {}
            other => {
                let children = match other {
                    Node::Root(n) => n.children,
                    Node::Blockquote(n) => n.children,
                    Node::Heading(n) => n.children,
                    Node::List(n) => n.children,
                    Node::ListItem(n) => n.children,
                    Node::Paragraph(n) => n.children,
                    Node::Table(n) => n.children,
                    Node::TableRow(n) => n.children,
                    Node::TableCell(n) => n.children,
                    _ => Vec::new(),
                };
                out.append(&mut to_phrasing(children));
            }
        }
    }
    out
}

/// Build a paragraph from a phrasing run, or nothing if the run is blank.
pub(crate) fn paragraph(run: Vec<Node>) -> Option<Node> {
    let run = drop_surrounding_breaks(run);
    if is_whitespace_only(&run) {
        None
    } else {
        Some(Node::Paragraph(mdast::Paragraph { children: run }))
    }
}
