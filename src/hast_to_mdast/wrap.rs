// Implicit paragraph detection and block-in-inline resolution.
//
// When a flow container has mixed phrasing + block children, phrasing runs
// are wrapped in implicit Paragraph nodes. Inline wrappers that straddle
// block content (`<a><div>…</div></a>`, `<b><p>…</p></b>`) are split so the
// wrapper is distributed around each block child.

use super::util::{is_whitespace_only, paragraph};
use crate::mdast::{self, Node};

/// Wrap mixed content: phrasing runs become paragraphs, block content passes through.
/// Phrasing runs are always wrapped, even when no block sibling exists,
/// unless they are whitespace only.
pub(crate) fn wrap(nodes: Vec<Node>) -> Vec<Node> {
    let nodes = flatten(nodes);
    let mut result = Vec::new();
    let mut phrasing_run: Vec<Node> = Vec::new();

    for node in nodes {
        if node.is_phrasing() {
            phrasing_run.push(node);
        } else {
            let run = std::mem::take(&mut phrasing_run);
            result.extend(paragraph(run));
            result.push(node);
        }
    }

    result.extend(paragraph(phrasing_run));
    result
}

/// Check whether any node in the list is non-phrasing (i.e., needs wrapping).
pub(crate) fn wrap_needed(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| {
        if !node.is_phrasing() {
            return true;
        }
        node.children().is_some_and(wrap_needed)
    })
}

/// Flatten straddling inline wrappers so block content escapes them.
fn flatten(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::new();
    for node in nodes {
        if node.is_inline_wrapper() && node.children().is_some_and(wrap_needed) {
            result.append(&mut split_straddling(node));
        } else {
            result.push(node);
        }
    }
    result
}

/// Split a straddling inline wrapper into multiple nodes where the wrapper
/// is distributed around blocks.
fn split_straddling(node: Node) -> Vec<Node> {
    let children = match node.children().map(|c| c.to_vec()) {
        Some(c) => c,
        None => return vec![node],
    };

    let mut result: Vec<Node> = Vec::new();
    let mut phrasing_run: Vec<Node> = Vec::new();

    for child in flatten(children) {
        if child.is_phrasing() {
            phrasing_run.push(child);
        } else {
            let run = std::mem::take(&mut phrasing_run);
            if !is_whitespace_only(&run) {
                result.push(clone_with_children(&node, run));
            }
            result.push(wrap_parent_inside_child(&node, child));
        }
    }

    if !is_whitespace_only(&phrasing_run) {
        result.push(clone_with_children(&node, phrasing_run));
    }

    result
}

/// Create a new node of the same type as `parent` with the given children.
fn clone_with_children(parent: &Node, children: Vec<Node>) -> Node {
    match parent {
        Node::Link(l) => Node::Link(mdast::Link {
            url: l.url.clone(),
            title: l.title.clone(),
            children,
        }),
        Node::Delete(_) => Node::Delete(mdast::Delete { children }),
        Node::Emphasis(_) => Node::Emphasis(mdast::Emphasis { children }),
        Node::Strong(_) => Node::Strong(mdast::Strong { children }),
        _ => Node::Paragraph(mdast::Paragraph { children }),
    }
}

/// Place the `parent` (without its original children) as a wrapper inside `child`.
/// Only blocks holding phrasing content take the wrapper; other blocks pass
/// through unchanged.
fn wrap_parent_inside_child(parent: &Node, child: Node) -> Node {
    match child {
        Node::Heading(h) => Node::Heading(mdast::Heading {
            depth: h.depth,
            children: vec![clone_with_children(parent, h.children)],
        }),
        Node::Paragraph(p) => Node::Paragraph(mdast::Paragraph {
            children: vec![clone_with_children(parent, p.children)],
        }),
        Node::Blockquote(b) => Node::Blockquote(mdast::Blockquote {
            children: b
                .children
                .into_iter()
                .map(|c| wrap_parent_inside_child(parent, c))
                .collect(),
        }),
        other => other,
    }
}
