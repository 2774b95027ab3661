// Shared test helpers for loop2md.

/// Check the shape every converted document must have.
pub fn assert_markdown_invariants(md: &str) {
    if md.is_empty() {
        return;
    }
    if md == "\n" {
        assert_eq!(loop2md::normalize(md), md, "normalization is not a fixed point");
        return;
    }
    assert!(md.ends_with('\n'), "missing trailing newline: {md:?}");
    assert!(!md.ends_with("\n\n"), "more than one trailing newline: {md:?}");
    assert!(!md.starts_with('\n'), "leading blank line: {md:?}");
    assert!(!md.contains("\n\n\n"), "consecutive blank lines: {md:?}");
    for line in md.lines() {
        assert!(
            !line.ends_with(' ') && !line.ends_with('\t'),
            "trailing whitespace on line {line:?} in {md:?}"
        );
    }
    assert_eq!(loop2md::normalize(md), md, "normalization is not a fixed point");
}
