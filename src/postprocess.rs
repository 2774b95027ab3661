// Final whitespace normalization of rendered Markdown.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line pattern"));

/// Normalize whitespace in a Markdown document.
///
/// Collapses runs of blank lines to one, strips trailing whitespace from
/// every line (a trailing `\` hard break is content and stays), drops
/// leading and trailing blank lines, and ends the text with exactly one
/// newline. A document with no content left becomes a lone newline.
///
/// Idempotent: normalizing the output again returns it unchanged.
///
/// ```
/// assert_eq!(loop2md::normalize("\n\nhi  \n\n\n\nthere\\\n"), "hi\n\nthere\\\n");
/// ```
pub fn normalize(markdown: &str) -> String {
    let collapsed = BLANK_LINE_RUNS.replace_all(markdown, "\n\n");

    let mut lines: Vec<&str> = Vec::new();
    for line in collapsed.lines() {
        let line = line.trim_end();
        // Whitespace-only lines become blank here and can form new runs.
        if line.is_empty() && lines.last().is_none_or(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
