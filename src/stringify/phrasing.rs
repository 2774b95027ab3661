// Inline container serialization.
//
// Serializes inline children flush together.

use super::State;
use crate::error::ConversionError;
use crate::mdast::Node;

/// Serialize a list of inline (phrasing) children.
pub(crate) fn container_phrasing(state: &mut State, children: &[Node]) -> Result<String, ConversionError> {
    let mut parts: Vec<String> = Vec::with_capacity(children.len());

    for child in children {
        parts.push(super::handlers::handle(state, child)?);
    }

    // Trim whitespace adjacent to hard breaks ("\\\n"):
    // trailing spaces before the break, leading spaces after it.
    for i in 0..parts.len() {
        if parts[i] == "\\\n" {
            if i > 0 {
                let prev = parts[i - 1].trim_end_matches(' ').to_string();
                parts[i - 1] = prev;
            }
            if i + 1 < parts.len() {
                let next = parts[i + 1].trim_start_matches(' ').to_string();
                parts[i + 1] = next;
            }
        }
    }

    Ok(parts.join(""))
}
