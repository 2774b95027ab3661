// MDAST → Markdown string serializer.
//
// Walks an MDAST tree and emits a Markdown string. All formatting choices
// (list markers, emphasis characters, fences, …) live here, fixed to the
// house style for Loop exports.

pub(crate) mod escape;
pub(crate) mod flow;
pub(crate) mod handlers;
pub(crate) mod phrasing;

use crate::error::ConversionError;
use crate::mdast::Node;

/// Serializer configuration. Headings are always ATX without closing hashes.
#[derive(Debug, Clone)]
pub(crate) struct StringifyOptions {
    pub bullet: char,
    pub bullet_ordered: char,
    pub emphasis: char,
    pub strong: char,
    pub fence: char,
    pub rule: char,
    pub rule_repetition: u8,
    pub increment_list_marker: bool,
    pub quote: char,
}

impl StringifyOptions {
    /// The fixed output style for Loop exports.
    pub fn loop_export() -> Self {
        Self {
            bullet: '-',
            bullet_ordered: '.',
            emphasis: '*',
            strong: '*',
            fence: '`',
            rule: '-',
            rule_repetition: 3,
            increment_list_marker: true,
            quote: '"',
        }
    }
}

/// Serializer state threaded through all handlers.
pub(crate) struct State<'a> {
    pub options: &'a StringifyOptions,
    /// Whether text is being written into a table cell, where `|` must be
    /// escaped.
    pub in_table_cell: bool,
}

impl<'a> State<'a> {
    pub fn new(options: &'a StringifyOptions) -> Self {
        Self {
            options,
            in_table_cell: false,
        }
    }
}

/// Serialize an MDAST tree to a Markdown string.
pub(crate) fn stringify(node: &Node, options: &StringifyOptions) -> Result<String, ConversionError> {
    let mut state = State::new(options);
    let mut output = handlers::handle(&mut state, node)?;

    // Ensure trailing newline (only if non-empty).
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
