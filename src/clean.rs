// DOM cleanup pass.
//
// Removes nodes that never carry readable content in a Loop export: scripts,
// styles, embedded frames, comments, inline-hidden elements and head
// metadata. Runs in place on the html5ever tree before any rendering.

use std::sync::LazyLock;

use markup5ever::local_name;
use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;

/// Inline styles that hide an element. A raw attribute match, not a CSS
/// cascade: class-based hiding is out of reach.
static HIDDEN_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("hidden-style pattern"));

/// Counts of what a cleaning pass removed. Read by the debug log.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) struct CleanStats {
    pub elements: usize,
    pub comments: usize,
}

enum Removal {
    Element,
    Comment,
}

/// Remove every noise node below `root`, subtrees included.
///
/// Walks the tree with an explicit stack so arbitrarily deep documents are
/// safe. Removals are independent of each other, so visiting order does not
/// affect the result.
pub(crate) fn clean(root: &Handle) -> CleanStats {
    let mut stats = CleanStats::default();
    let mut stack = vec![root.clone()];

    while let Some(handle) = stack.pop() {
        let mut children = handle.children.borrow_mut();
        children.retain(|child| match removal(child) {
            Some(kind) => {
                match kind {
                    Removal::Element => stats.elements += 1,
                    Removal::Comment => stats.comments += 1,
                }
                child.parent.set(None);
                false
            }
            None => true,
        });
        stack.extend(children.iter().cloned());
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        elements = stats.elements,
        comments = stats.comments,
        "removed noise nodes"
    );

    stats
}

/// Decide whether a node is noise.
fn removal(handle: &Handle) -> Option<Removal> {
    match &handle.data {
        NodeData::Comment { .. } => Some(Removal::Comment),
        NodeData::Element { name, attrs, .. } => {
            let noise = matches!(
                name.local.as_ref(),
                "script" | "style" | "noscript" | "iframe" | "meta" | "link"
            );
            let hidden = attrs
                .borrow()
                .iter()
                .any(|attr| attr.name.local.as_ref() == "style" && is_hidden(&attr.value));
            (noise || hidden).then_some(Removal::Element)
        }
        _ => None,
    }
}

/// Whether an inline `style` attribute value hides its element.
pub(crate) fn is_hidden(style: &str) -> bool {
    HIDDEN_STYLE.is_match(style)
}

/// Find the first `body` element in document order.
pub(crate) fn find_body(root: &Handle) -> Option<Handle> {
    let mut stack = vec![root.clone()];
    while let Some(handle) = stack.pop() {
        if let NodeData::Element { ref name, .. } = handle.data {
            if name.local == local_name!("body") {
                return Some(handle);
            }
        }
        stack.extend(handle.children.borrow().iter().rev().cloned());
    }
    None
}
