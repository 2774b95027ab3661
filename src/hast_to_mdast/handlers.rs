// Element handlers — one function per HTML element (or element group).
//
// Each handler takes an html5ever node and returns zero or more MDAST nodes.
// Handlers only produce tree nodes — no string formatting happens here.

use markup5ever_rcdom::{Handle, NodeData};

use super::util::{collapse_whitespace, is_blank, text_content, to_phrasing};
use super::{State, MAX_DEPTH};
use crate::mdast::{self, Node};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Convert all children of an HTML node to MDAST nodes.
pub(crate) fn all(state: &mut State, handle: &Handle) -> Vec<Node> {
    let children = handle.children.borrow();
    let mut result = Vec::new();
    for child in children.iter() {
        let mut nodes = one(state, child);
        result.append(&mut nodes);
    }
    result
}

/// Convert a single HTML node to MDAST node(s).
pub(crate) fn one(state: &mut State, handle: &Handle) -> Vec<Node> {
    match &handle.data {
        NodeData::Text { ref contents } => {
            let text = collapse_whitespace(&contents.borrow());
            if text.is_empty() {
                vec![]
            } else {
                vec![Node::text(text)]
            }
        }
        NodeData::Element { ref name, .. } => {
            if state.depth >= MAX_DEPTH {
                return plain_text(handle);
            }
            state.depth += 1;
            let nodes = dispatch_element(state, handle, name.local.as_ref());
            state.depth -= 1;
            nodes
        }
        NodeData::Document => all(state, handle),
        // Comments are gone after cleaning; doctypes and processing
        // instructions never render.
        _ => vec![],
    }
}

/// Route an element to its handler based on tag name.
fn dispatch_element(state: &mut State, handle: &Handle, tag: &str) -> Vec<Node> {
    match tag {
        // Ignore — return nothing
        "applet" | "area" | "base" | "basefont" | "bgsound" | "col"
        | "colgroup" | "command" | "content" | "datalist" | "embed" | "frame" | "frameset"
        | "head" | "input" | "isindex" | "keygen" | "math" | "menuitem" | "nextid"
        | "noembed" | "noframes" | "optgroup" | "option" | "param" | "select" | "shadow"
        | "source" | "spacer" | "svg" | "template" | "textarea" | "title" | "track"
        | "wbr" => vec![],

        // Stripped to bare text. The cleaner removes these before rendering;
        // this arm only matters for trees that skipped it.
        "script" | "style" | "noscript" | "iframe" => plain_text(handle),

        // Pass-through — recurse into children, no wrapping
        "abbr" | "acronym" | "audio" | "bdi" | "bdo" | "big" | "blink" | "button"
        | "canvas" | "cite" | "data" | "dfn" | "font" | "ins" | "label" | "map" | "mark"
        | "marquee" | "meter" | "nobr" | "object" | "output" | "picture" | "progress" | "q"
        | "rb" | "rbc" | "rp" | "rt" | "rtc" | "ruby" | "slot" | "small" | "span" | "sub"
        | "sup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "time" | "tr" | "u"
        | "video" => all(state, handle),

        // Flow wrappers — children wrapped as flow content
        "address" | "article" | "aside" | "body" | "center" | "dd" | "details" | "dialog"
        | "div" | "dl" | "dt" | "fieldset" | "figcaption" | "figure" | "footer" | "form"
        | "header" | "hgroup" | "html" | "legend" | "li" | "main" | "multicol" | "nav"
        | "p" | "section" | "summary" => super::wrap::wrap(all(state, handle)),

        // Overrides
        "a" => link(state, handle),
        "img" | "image" => image(handle),
        "table" => super::table::table(state, handle),

        "blockquote" => blockquote(state, handle),
        "br" => vec![Node::Break(mdast::Break)],
        "code" | "kbd" | "samp" | "tt" => inline_code(handle),
        "del" | "s" | "strike" => vec![Node::Delete(mdast::Delete {
            children: all(state, handle),
        })],
        "em" | "i" | "var" => vec![Node::Emphasis(mdast::Emphasis {
            children: all(state, handle),
        })],
        "strong" | "b" => vec![Node::Strong(mdast::Strong {
            children: all(state, handle),
        })],
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => heading(state, handle, tag),
        "hr" => vec![Node::ThematicBreak(mdast::ThematicBreak)],
        "ol" | "ul" | "dir" | "menu" => list(state, handle, tag == "ol"),
        "pre" | "listing" | "xmp" | "plaintext" => code_block(handle),

        // Unknown elements — recurse into children
        _ => all(state, handle),
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// `<a>`: anchors with neither text nor target are dropped, anchors without
/// a target keep only their text.
fn link(state: &mut State, handle: &Handle) -> Vec<Node> {
    let href = get_attr(handle, "href").unwrap_or_default();
    let title = get_attr(handle, "title").unwrap_or_default();
    let children = all(state, handle);

    if href.is_empty() {
        return if is_blank(&children) { vec![] } else { children };
    }

    vec![Node::Link(mdast::Link {
        url: href,
        title: non_empty(title),
        children,
    })]
}

/// `<img>`: images without a source are dropped.
fn image(handle: &Handle) -> Vec<Node> {
    let src = get_attr(handle, "src").unwrap_or_default();
    if src.is_empty() {
        return vec![];
    }

    vec![Node::Image(mdast::Image {
        url: src,
        title: non_empty(get_attr(handle, "title").unwrap_or_default()),
        alt: get_attr(handle, "alt").unwrap_or_default(),
    })]
}

// ---------------------------------------------------------------------------
// Flow handlers
// ---------------------------------------------------------------------------

fn heading(state: &mut State, handle: &Handle, tag: &str) -> Vec<Node> {
    let depth = tag.as_bytes()[1] - b'0';
    let children = to_phrasing(all(state, handle));
    if is_blank(&children) {
        return vec![];
    }
    vec![Node::Heading(mdast::Heading { depth, children })]
}

fn blockquote(state: &mut State, handle: &Handle) -> Vec<Node> {
    let children = super::wrap::wrap(all(state, handle));
    if children.is_empty() {
        return vec![];
    }
    vec![Node::Blockquote(mdast::Blockquote { children })]
}

/// `<ul>`/`<ol>`: each `<li>` becomes an item. Stray children (a nested
/// `<ul>` placed directly inside its parent list, loose text) attach to the
/// preceding item.
fn list(state: &mut State, handle: &Handle, ordered: bool) -> Vec<Node> {
    let mut items: Vec<Vec<Node>> = Vec::new();

    for child in handle.children.borrow().iter() {
        let is_item = tag_name(child).as_deref() == Some("li");
        let content = if is_item {
            state.depth += 1;
            let content = all(state, child);
            state.depth -= 1;
            content
        } else {
            one(state, child)
        };

        if is_item {
            items.push(content);
        } else if is_blank(&content) {
            continue;
        } else if let Some(last) = items.last_mut() {
            last.extend(content);
        } else {
            items.push(content);
        }
    }

    let children: Vec<Node> = items
        .into_iter()
        .map(|content| {
            let children = super::wrap::wrap(content);
            let paragraphs = children
                .iter()
                .filter(|c| matches!(c, Node::Paragraph(_)))
                .count();
            Node::ListItem(mdast::ListItem {
                spread: paragraphs > 1,
                children,
            })
        })
        .collect();

    if children.is_empty() {
        return vec![];
    }

    let spread = children
        .iter()
        .any(|c| matches!(c, Node::ListItem(li) if li.spread));
    let start = if ordered {
        get_attr(handle, "start").and_then(|s| s.trim().parse::<u32>().ok())
    } else {
        None
    };

    vec![Node::List(mdast::List {
        ordered,
        start,
        spread,
        children,
    })]
}

/// `<pre>`: fenced code block holding the raw text of the subtree.
fn code_block(handle: &Handle) -> Vec<Node> {
    let raw = text_content(handle);
    let value = raw.strip_prefix('\n').unwrap_or(&raw).trim_end_matches('\n');
    if value.trim().is_empty() {
        return vec![];
    }

    let lang = code_language(handle).or_else(|| {
        handle
            .children
            .borrow()
            .iter()
            .find(|c| tag_name(c).as_deref() == Some("code"))
            .and_then(code_language)
    });

    vec![Node::Code(mdast::Code {
        value: value.to_string(),
        lang,
    })]
}

/// Language from a `language-*` or `lang-*` class.
fn code_language(handle: &Handle) -> Option<String> {
    let class = get_attr(handle, "class")?;
    class.split_ascii_whitespace().find_map(|name| {
        name.strip_prefix("language-")
            .or_else(|| name.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    })
}

// ---------------------------------------------------------------------------
// Phrasing handlers
// ---------------------------------------------------------------------------

fn inline_code(handle: &Handle) -> Vec<Node> {
    let value = collapse_whitespace(&text_content(handle));
    if value.trim().is_empty() {
        return vec![];
    }
    vec![Node::InlineCode(mdast::InlineCode { value })]
}

/// Text content of a subtree as a single text node.
fn plain_text(handle: &Handle) -> Vec<Node> {
    let text = collapse_whitespace(&text_content(handle));
    if text.is_empty() {
        vec![]
    } else {
        vec![Node::text(text)]
    }
}

// ---------------------------------------------------------------------------
// Attribute helpers
// ---------------------------------------------------------------------------

/// Get the value of an attribute on an element node.
pub(crate) fn get_attr(handle: &Handle, name: &str) -> Option<String> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        for attr in attrs.borrow().iter() {
            if attr.name.local.as_ref() == name {
                return Some(attr.value.to_string());
            }
        }
    }
    None
}

/// Get the tag name of an element node.
pub(crate) fn tag_name(handle: &Handle) -> Option<String> {
    if let NodeData::Element { ref name, .. } = handle.data {
        Some(name.local.as_ref().to_string())
    } else {
        None
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
