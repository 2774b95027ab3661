// Escaping for Markdown serialization.
//
// Emphasis markers in text are always escaped so literal `*` and `_` survive
// a round trip. Inside table cells `|` is escaped too, since it would end the
// cell.

/// Escape text for phrasing content.
pub(crate) fn escape_phrasing(text: &str, in_table_cell: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '*' | '_' => out.push('\\'),
            '|' if in_table_cell => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}
