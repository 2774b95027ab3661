// Node type handlers for MDAST → Markdown serialization.
//
// One handler per MDAST node type. Each takes a State and Node, returns a String.

use super::phrasing::container_phrasing;
use super::State;
use crate::error::ConversionError;
use crate::mdast::{self, AlignKind, Node};

/// Dispatch to the appropriate handler for a node.
pub(crate) fn handle(state: &mut State, node: &Node) -> Result<String, ConversionError> {
    match node {
        Node::Root(n) => super::flow::container_flow(state, &n.children),
        Node::Paragraph(n) => container_phrasing(state, &n.children),
        Node::Heading(n) => handle_heading(state, n),
        Node::ThematicBreak(_) => Ok(handle_thematic_break(state)),
        Node::Blockquote(n) => handle_blockquote(state, n),
        Node::List(n) => handle_list(state, n),
        Node::ListItem(n) => super::flow::container_flow_tight(state, &n.children, n.spread),
        Node::Code(n) => Ok(handle_code(state, n)),
        Node::Text(n) => Ok(super::escape::escape_phrasing(&n.value, state.in_table_cell)),
        Node::Emphasis(n) => handle_emphasis(state, n),
        Node::Strong(n) => handle_strong(state, n),
        Node::InlineCode(n) => Ok(handle_inline_code(n)),
        Node::Break(_) => Ok("\\\n".to_string()),
        Node::Link(n) => handle_link(state, n),
        Node::Image(n) => Ok(handle_image(state, n)),
        Node::Delete(n) => Ok(format!("~~{}~~", container_phrasing(state, &n.children)?)),
        Node::Table(n) => handle_table(state, n),
        Node::TableRow(_) | Node::TableCell(_) => Err(ConversionError::Render(
            "table row or cell outside of a table".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Flow (block) handlers
// ---------------------------------------------------------------------------

fn handle_heading(state: &mut State, node: &mdast::Heading) -> Result<String, ConversionError> {
    let content = container_phrasing(state, &node.children)?;

    // ATX headings cannot span lines: hard breaks first, then bare newlines.
    // Order matters: reversing would leave the backslash of "\\\n" behind.
    let content = content.replace("\\\n", " ").replace('\n', " ");
    let hashes = "#".repeat(usize::from(node.depth.clamp(1, 6)));
    Ok(format!("{} {}", hashes, content.trim()))
}

fn handle_thematic_break(state: &mut State) -> String {
    std::iter::repeat_n(state.options.rule, usize::from(state.options.rule_repetition)).collect()
}

fn handle_blockquote(state: &mut State, node: &mdast::Blockquote) -> Result<String, ConversionError> {
    let content = super::flow::container_flow(state, &node.children)?;
    Ok(content
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

fn handle_list(state: &mut State, node: &mdast::List) -> Result<String, ConversionError> {
    let mut result = Vec::new();
    let start = node.start.unwrap_or(1);

    for (i, child) in node.children.iter().enumerate() {
        let prefix = if node.ordered {
            let number = if state.options.increment_list_marker {
                start.saturating_add(u32::try_from(i).unwrap_or(u32::MAX))
            } else {
                start
            };
            format!("{}{}", number, state.options.bullet_ordered)
        } else {
            state.options.bullet.to_string()
        };

        let content = match child {
            Node::ListItem(li) => {
                let spread = node.spread || li.spread;
                super::flow::container_flow_tight(state, &li.children, spread)?
            }
            other => handle(state, other)?,
        };

        let indent = " ".repeat(prefix.len() + 1); // +1 for the space after bullet
        let mut lines = content.lines();

        // Don't add trailing space if the first line is empty (empty list item).
        let mut item = match lines.next() {
            Some(first) if !first.is_empty() => format!("{} {}", prefix, first),
            _ => prefix,
        };
        for line in lines {
            item.push('\n');
            if !line.is_empty() {
                item.push_str(&indent);
                item.push_str(line);
            }
        }
        result.push(item);
    }

    let separator = if node.spread { "\n\n" } else { "\n" };
    Ok(result.join(separator))
}

fn handle_code(state: &mut State, node: &mdast::Code) -> String {
    let fence_char = state.options.fence;
    // Find minimum fence length that doesn't conflict with content.
    let content_max = node
        .value
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.chars().all(|c| c == fence_char) && trimmed.len() >= 3 {
                Some(trimmed.len())
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0);
    let fence: String = std::iter::repeat_n(fence_char, (content_max + 1).max(3)).collect();

    let info = node.lang.as_deref().unwrap_or("");
    format!("{}{}\n{}\n{}", fence, info, node.value, fence)
}

// ---------------------------------------------------------------------------
// Phrasing (inline) handlers
// ---------------------------------------------------------------------------

fn handle_emphasis(state: &mut State, node: &mdast::Emphasis) -> Result<String, ConversionError> {
    let marker = state.options.emphasis;
    let content = container_phrasing(state, &node.children)?;
    Ok(format!("{}{}{}", marker, content, marker))
}

fn handle_strong(state: &mut State, node: &mdast::Strong) -> Result<String, ConversionError> {
    let marker = state.options.strong;
    let content = container_phrasing(state, &node.children)?;
    Ok(format!("{0}{0}{1}{0}{0}", marker, content))
}

fn handle_inline_code(node: &mdast::InlineCode) -> String {
    // Choose backtick count to avoid conflicts with content.
    let max_run = longest_backtick_run(&node.value);
    let ticks = "`".repeat(max_run + 1);

    let needs_space = node.value.starts_with('`')
        || node.value.ends_with('`')
        || (node.value.starts_with(' ')
            && node.value.ends_with(' ')
            && !node.value.trim().is_empty());

    if needs_space {
        format!("{} {} {}", ticks, node.value, ticks)
    } else {
        format!("{}{}{}", ticks, node.value, ticks)
    }
}

/// Always a resource link, never an autolink.
fn handle_link(state: &mut State, node: &mdast::Link) -> Result<String, ConversionError> {
    let content = container_phrasing(state, &node.children)?;
    let quote = state.options.quote;
    Ok(match &node.title {
        Some(title) => format!("[{}]({} {}{}{})", content, node.url, quote, title, quote),
        None => format!("[{}]({})", content, node.url),
    })
}

fn handle_image(state: &mut State, node: &mdast::Image) -> String {
    let quote = state.options.quote;
    match &node.title {
        Some(title) => format!("![{}]({} {}{}{})", node.alt, node.url, quote, title, quote),
        None => format!("![{}]({})", node.alt, node.url),
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Narrowest column: room for a `---` delimiter.
const MIN_COLUMN_WIDTH: usize = 3;

fn handle_table(state: &mut State, node: &mdast::Table) -> Result<String, ConversionError> {
    // Collect all cell contents, each reduced to a single line.
    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in &node.children {
        let Node::TableRow(tr) = row else {
            return Err(ConversionError::Render(
                "table child is not a table row".to_string(),
            ));
        };
        let mut cells = Vec::with_capacity(tr.children.len());
        for cell in &tr.children {
            let Node::TableCell(tc) = cell else {
                return Err(ConversionError::Render(
                    "table row child is not a table cell".to_string(),
                ));
            };
            state.in_table_cell = true;
            let content = container_phrasing(state, &tc.children);
            state.in_table_cell = false;
            // Hard breaks (\<LF>) → space; bare newlines → space.
            cells.push(content?.replace("\\\n", " ").replace('\n', " ").trim().to_string());
        }
        rows.push(cells);
    }

    if rows.is_empty() {
        return Ok(String::new());
    }

    // Determine column count and widths; short rows are padded with empty cells.
    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let mut col_widths = vec![MIN_COLUMN_WIDTH; col_count];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);

    // Header row.
    lines.push(format_row(&rows[0], &col_widths, &node.align));

    // Separator row.
    let sep: Vec<String> = col_widths
        .iter()
        .enumerate()
        .map(|(i, &width)| format_separator(width, node.align.get(i).copied().flatten()))
        .collect();
    lines.push(format!("| {} |", sep.join(" | ")));

    // Data rows.
    for row in rows.iter().skip(1) {
        lines.push(format_row(row, &col_widths, &node.align));
    }

    Ok(lines.join("\n"))
}

fn format_row(cells: &[String], widths: &[usize], aligns: &[Option<AlignKind>]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            let content = cells.get(i).map_or("", String::as_str);
            pad_cell(content, width, aligns.get(i).copied().flatten())
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn pad_cell(content: &str, width: usize, align: Option<AlignKind>) -> String {
    let padding = width.saturating_sub(content.chars().count());
    match align {
        Some(AlignKind::Right) => format!("{}{}", " ".repeat(padding), content),
        Some(AlignKind::Center) => {
            let left_pad = padding.div_ceil(2);
            let right_pad = padding / 2;
            format!("{}{}{}", " ".repeat(left_pad), content, " ".repeat(right_pad))
        }
        _ => format!("{}{}", content, " ".repeat(padding)),
    }
}

fn format_separator(width: usize, align: Option<AlignKind>) -> String {
    match align {
        Some(AlignKind::Left) => format!(":{}", "-".repeat(width.saturating_sub(1))),
        Some(AlignKind::Right) => format!("{}:", "-".repeat(width.saturating_sub(1))),
        Some(AlignKind::Center) => format!(":{}:", "-".repeat(width.saturating_sub(2))),
        None => "-".repeat(width),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find the longest consecutive run of backticks in a string.
fn longest_backtick_run(s: &str) -> usize {
    let mut max = 0;
    let mut current = 0;
    for c in s.chars() {
        if c == '`' {
            current += 1;
            max = max.max(current);
        } else {
            current = 0;
        }
    }
    max
}
