// loop2md — Microsoft Loop HTML export to Markdown converter.
//
// Architecture:
//   HTML string → html5ever parse → clean → body subtree → hast_to_mdast →
//   MDAST → stringify → normalize → Markdown
//
// Every stage is a pure function of its input; nothing is shared between
// conversions, so callers may run conversions on as many threads as they like.

mod clean;
mod error;
mod hast_to_mdast;
pub mod mdast;
mod postprocess;
mod stringify;

pub use error::ConversionError;
pub use postprocess::normalize;

/// Whether an input document is empty (or whitespace only).
///
/// Empty documents convert to an empty string; callers use this to decide
/// how to report them.
pub fn is_empty_input(html: &str) -> bool {
    html.trim().is_empty()
}

/// Convert an HTML string to normalized Markdown.
///
/// The result ends with exactly one newline. Only empty (or whitespace-only)
/// input converts to the empty string.
///
/// # Examples
///
/// ```
/// let md = loop2md::convert("<h1>Hello</h1><p>World</p>").unwrap();
/// assert_eq!(md, "# Hello\n\nWorld\n");
/// ```
pub fn convert(html: &str) -> Result<String, ConversionError> {
    if is_empty_input(html) {
        return Ok(String::new());
    }

    let mdast = html_to_mdast(html)?;
    let markdown = mdast_to_string(&mdast)?;
    let markdown = normalize(&markdown);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        input_bytes = html.len(),
        output_bytes = markdown.len(),
        "converted document"
    );

    Ok(markdown)
}

/// Parse and clean HTML, then transform it into an MDAST tree.
///
/// Only the `body` subtree is transformed when the document has one.
pub fn html_to_mdast(html: &str) -> Result<mdast::Node, ConversionError> {
    let dom = hast_to_mdast::parse_html(html);
    clean::clean(&dom.document);

    let start = match clean::find_body(&dom.document) {
        Some(body) => body,
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!("no body element, rendering whole document");
            dom.document.clone()
        }
    };

    Ok(hast_to_mdast::transform(&start))
}

/// Serialize an MDAST tree to a Markdown string, before whitespace
/// normalization.
pub fn mdast_to_string(node: &mdast::Node) -> Result<String, ConversionError> {
    stringify::stringify(node, &stringify::StringifyOptions::loop_export())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_empty() {
        assert_eq!(convert("").unwrap(), "");
        assert_eq!(convert(" \n\t ").unwrap(), "");
    }

    #[test]
    fn test_is_empty_input() {
        assert!(is_empty_input(""));
        assert!(is_empty_input("  \n"));
        assert!(!is_empty_input("<p></p>"));
    }

    #[test]
    fn test_convert_simple_paragraph() {
        assert_eq!(convert("<p>Hello, world!</p>").unwrap(), "Hello, world!\n");
    }

    #[test]
    fn test_convert_heading() {
        assert_eq!(convert("<h1>Title</h1>").unwrap(), "# Title\n");
    }

    #[test]
    fn test_noise_only_document_is_single_newline() {
        assert_eq!(convert("<script>x()</script><!-- c -->").unwrap(), "\n");
    }

    #[test]
    fn test_head_content_dropped() {
        let md = convert("<html><head><title>Page</title></head><body><p>hi</p></body></html>")
            .unwrap();
        assert_eq!(md, "hi\n");
    }

    #[test]
    fn test_stages_compose() {
        let html = "<ul><li>a</li><li>b</li></ul>";
        let tree = html_to_mdast(html).unwrap();
        let raw = mdast_to_string(&tree).unwrap();
        assert_eq!(normalize(&raw), convert(html).unwrap());
        assert_eq!(raw, "- a\n- b\n");
    }
}
