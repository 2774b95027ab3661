// Whitespace normalization for MDAST trees.
//
// Post-processing pass over a freshly built MDAST tree. Edge whitespace and
// hard breaks move out of inline wrappers, empty wrappers and blocks are dropped, adjacent
// text nodes merge, and headings, paragraphs, table cells and the root get
// their leading/trailing whitespace trimmed.

use super::util::collapse_whitespace;
use crate::mdast::Node;

/// Run whitespace post-processing on an MDAST tree.
pub(crate) fn post_process_whitespace(node: &mut Node) {
    // Recursively process children first.
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            post_process_whitespace(child);
        }

        hoist_edge_whitespace(children);
        children.retain(|child| !is_empty_container(child));
        merge_adjacent_text(children);
        children.retain(|child| !is_empty_text(child));
    }

    let should_trim = matches!(
        node,
        Node::Heading(_) | Node::Paragraph(_) | Node::Root(_) | Node::TableCell(_)
    );
    if should_trim {
        if let Some(children) = node.children_mut() {
            trim_container(children);
            children.retain(|child| !is_empty_text(child));
        }
    }
}

/// Move leading/trailing spaces and hard breaks of emphasis, strong, delete
/// and link nodes to the parent, so `a<b> b </b>c` renders as `a **b** c`
/// rather than `a** b **c`, and a break never separates a delimiter from its
/// text.
fn hoist_edge_whitespace(children: &mut Vec<Node>) {
    if !children.iter().any(Node::is_inline_wrapper) {
        return;
    }

    let mut out = Vec::with_capacity(children.len());
    for mut child in children.drain(..) {
        if !child.is_inline_wrapper() {
            out.push(child);
            continue;
        }
        let (leading, trailing) = take_edges(&mut child);
        out.extend(leading);
        out.push(child);
        out.extend(trailing);
    }
    *children = out;
}

/// Detach edge spaces and breaks from a wrapper's children, returning what
/// belongs before and after it, in document order.
fn take_edges(node: &mut Node) -> (Vec<Node>, Vec<Node>) {
    let Some(children) = node.children_mut() else {
        return (Vec::new(), Vec::new());
    };

    let mut leading = Vec::new();
    loop {
        match children.first_mut() {
            Some(Node::Break(_)) => leading.push(children.remove(0)),
            Some(Node::Text(first)) if first.value.starts_with(' ') => {
                first.value = first.value.trim_start_matches(' ').to_string();
                if first.value.is_empty() {
                    children.remove(0);
                }
                leading.push(Node::text(" "));
            }
            _ => break,
        }
    }

    let mut trailing = Vec::new();
    loop {
        match children.last_mut() {
            Some(Node::Break(_)) => trailing.extend(children.pop()),
            Some(Node::Text(last)) if last.value.ends_with(' ') => {
                last.value = last.value.trim_end_matches(' ').to_string();
                if last.value.is_empty() {
                    children.pop();
                }
                trailing.push(Node::text(" "));
            }
            _ => break,
        }
    }
    trailing.reverse();

    (leading, trailing)
}

/// Merge adjacent Text nodes into a single node, collapsing the space runs
/// created where two nodes met.
fn merge_adjacent_text(children: &mut Vec<Node>) {
    let mut i = 0;
    while i < children.len() {
        if is_text(&children[i]) {
            while i + 1 < children.len() && is_text(&children[i + 1]) {
                if let Node::Text(next) = children.remove(i + 1) {
                    if let Node::Text(ref mut current) = children[i] {
                        current.value.push_str(&next.value);
                    }
                }
            }
            if let Node::Text(ref mut current) = children[i] {
                if current.value.contains("  ") {
                    current.value = collapse_whitespace(&current.value);
                }
            }
        }
        i += 1;
    }
}

/// Drop edge breaks, then trim leading/trailing whitespace from the first
/// and last text children.
fn trim_container(children: &mut Vec<Node>) {
    while matches!(children.first(), Some(Node::Break(_))) {
        children.remove(0);
    }
    while matches!(children.last(), Some(Node::Break(_))) {
        children.pop();
    }
    if let Some(Node::Text(ref mut first)) = children.first_mut() {
        first.value = first
            .value
            .trim_start_matches([' ', '\t', '\n', '\r'])
            .to_string();
    }
    if let Some(Node::Text(ref mut last)) = children.last_mut() {
        last.value = last.value.trim_end_matches([' ', '\t', '\n', '\r']).to_string();
    }
}

fn is_text(node: &Node) -> bool {
    matches!(node, Node::Text(_))
}

fn is_empty_text(node: &Node) -> bool {
    matches!(node, Node::Text(t) if t.value.is_empty())
}

/// Wrappers and blocks that would serialize to bare delimiters. Links are
/// kept: `[](url)` still carries the target.
fn is_empty_container(node: &Node) -> bool {
    match node {
        Node::Emphasis(_) | Node::Strong(_) | Node::Delete(_) | Node::Paragraph(_)
        | Node::Heading(_) => node.children().is_some_and(<[Node]>::is_empty),
        _ => false,
    }
}
