// HTML tree → MDAST transform
//
// Parses HTML via html5ever and walks the resulting tree, dispatching each
// element to a handler that produces MDAST nodes. Handlers are looked up by
// tag name; links, images and tables have dedicated entries, everything else
// falls into a small set of generic behaviors (ignore, pass through, flow).

pub(crate) mod handlers;
pub(crate) mod table;
pub(crate) mod util;
pub(crate) mod whitespace;
pub(crate) mod wrap;

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, RcDom};

use crate::mdast;

/// Elements nested deeper than this contribute only their text content.
pub(crate) const MAX_DEPTH: usize = 256;

/// Transformation state threaded through all handlers.
#[derive(Debug, Default)]
pub(crate) struct State {
    /// Whether we're currently inside a table (nested tables → text).
    pub in_table: bool,
    /// Element nesting depth of the handler currently running.
    pub depth: usize,
}

/// Transform a cleaned subtree into an MDAST tree.
pub(crate) fn transform(start: &Handle) -> mdast::Node {
    let mut state = State::default();

    let children = handlers::one(&mut state, start);
    let mut root = mdast::Node::Root(mdast::Root {
        children: wrap::wrap(children),
    });
    whitespace::post_process_whitespace(&mut root);

    root
}

/// Parse an HTML string into an html5ever RcDom.
///
/// Never fails: html5ever recovers from malformed markup the way browsers do.
pub(crate) fn parse_html(html: &str) -> RcDom {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(html.as_bytes())
}
