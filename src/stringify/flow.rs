// Block-level container serialization.
//
// Serializes block children separated by blank lines (root, blockquote) or,
// inside tight list items, by single newlines.

use super::State;
use crate::error::ConversionError;
use crate::mdast::Node;

/// Serialize a list of block-level (flow) children with blank lines between them.
pub(crate) fn container_flow(state: &mut State, children: &[Node]) -> Result<String, ConversionError> {
    container_flow_tight(state, children, true)
}

/// Serialize block-level children for a list item, respecting tight/spread.
/// `spread` = true → blank line between children, false → single newline.
pub(crate) fn container_flow_tight(
    state: &mut State,
    children: &[Node],
    spread: bool,
) -> Result<String, ConversionError> {
    let mut result = String::new();

    for child in children {
        let content = super::handlers::handle(state, child)?;
        if content.is_empty() {
            continue;
        }
        if !result.is_empty() {
            result.push_str(if spread { "\n\n" } else { "\n" });
        }
        result.push_str(&content);
    }

    Ok(result)
}
