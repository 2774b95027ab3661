// End-to-end API tests for loop2md.

mod common;

use loop2md::{convert, is_empty_input, normalize};
use pretty_assertions::assert_eq;

#[test]
fn test_empty_input() {
    assert_eq!(convert("").unwrap(), "");
    assert!(is_empty_input(""));
}

#[test]
fn test_plain_text() {
    assert_eq!(convert("Hello, world!").unwrap(), "Hello, world!\n");
}

#[test]
fn test_link_with_title() {
    let md = convert(r#"<a href="https://x.com" title="t">hi</a>"#).unwrap();
    assert_eq!(md, "[hi](https://x.com \"t\")\n");
}

#[test]
fn test_link_without_href() {
    assert_eq!(convert("<a>hi</a>").unwrap(), "hi\n");
}

#[test]
fn test_link_without_href_or_text() {
    assert_eq!(convert(r#"<a href=""></a>"#).unwrap(), "\n");
}

#[test]
fn test_link_with_href_but_no_text() {
    assert_eq!(convert(r#"<a href="https://x.com"></a>"#).unwrap(), "[](https://x.com)\n");
}

#[test]
fn test_image() {
    assert_eq!(convert(r#"<img src="a.png" alt="cat">"#).unwrap(), "![cat](a.png)\n");
}

#[test]
fn test_image_with_title() {
    let md = convert(r#"<img src="a.png" alt="cat" title="A cat">"#).unwrap();
    assert_eq!(md, "![cat](a.png \"A cat\")\n");
}

#[test]
fn test_image_without_src() {
    assert_eq!(convert(r#"<img alt="x">"#).unwrap(), "\n");
}

#[test]
fn test_noise_stripping() {
    let md =
        convert("<html><head><script>evil()</script></head><body><p>hi</p></body></html>").unwrap();
    assert_eq!(md, "hi\n");
}

#[test]
fn test_hidden_element_removal() {
    let md = convert(r#"<div style="display:none">secret</div><p>visible</p>"#).unwrap();
    assert!(md.contains("visible"));
    assert!(!md.contains("secret"));
}

#[test]
fn test_heading_levels_are_atx() {
    let md = convert("<h1>One</h1><h2>Two</h2><h6>Six</h6>").unwrap();
    assert_eq!(md, "# One\n\n## Two\n\n###### Six\n");
}

#[test]
fn test_bullets_and_emphasis() {
    let md = convert("<ul><li><em>a</em></li><li><strong>b</strong></li></ul>").unwrap();
    assert_eq!(md, "- *a*\n- **b**\n");
}

#[test]
fn test_sub_and_sup_are_plain() {
    assert_eq!(convert("<p>H<sub>2</sub>O and x<sup>2</sup></p>").unwrap(), "H2O and x2\n");
}

#[test]
fn test_hard_break_uses_backslash() {
    assert_eq!(convert("<p>one<br>two</p>").unwrap(), "one\\\ntwo\n");
}

#[test]
fn test_table_is_gfm() {
    use pulldown_cmark::{Event, Options, Parser, Tag};

    let md = convert(
        "<table><tr><th>Task</th><th>Owner</th></tr><tr><td>Docs</td><td>Ana</td></tr></table>",
    )
    .unwrap();
    assert_eq!(
        md,
        "| Task | Owner |\n| ---- | ----- |\n| Docs | Ana   |\n"
    );

    let has_table = Parser::new_ext(&md, Options::ENABLE_TABLES)
        .any(|event| matches!(event, Event::Start(Tag::Table(_))));
    assert!(has_table, "not parsed as a table: {md:?}");
}

#[test]
fn test_link_parses_back() {
    use pulldown_cmark::{Event, Parser, Tag};

    let md = convert(r#"<p>See <a href="https://x.com/a_b" title="t">the_docs</a></p>"#).unwrap();
    let mut link = None;
    let mut text = String::new();
    for event in Parser::new(&md) {
        match event {
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => link = Some((dest_url.to_string(), title.to_string())),
            Event::Text(t) => text.push_str(&t),
            _ => {}
        }
    }
    assert_eq!(link, Some(("https://x.com/a_b".to_string(), "t".to_string())));
    assert_eq!(text, "See the_docs");
}

#[test]
fn test_output_invariants() {
    let docs = [
        "<p>a</p>\n\n\n<p>b</p>",
        "<div><p>x </p>   <p>  y</p></div>",
        "<ul><li>a<ul><li>b</li></ul></li></ul><p>after</p>",
        "<blockquote><p>q</p><p>r</p></blockquote>",
        "<pre>code  \n\n\n\nmore   </pre>",
        "<p>line<br><br><br>after</p>",
        "<table><tr><td>a</td></tr><tr><td> b </td><td>c</td></tr></table>",
        "<p>&nbsp;</p><p>x&nbsp;</p>",
    ];
    for html in docs {
        let md = convert(html).unwrap();
        common::assert_markdown_invariants(&md);
    }
}

#[test]
fn test_normalize_is_public_and_idempotent() {
    let once = normalize("a  \n\n\n\n  \nb\t\n\n");
    assert_eq!(once, "a\n\nb\n");
    assert_eq!(normalize(&once), once);
}

#[test]
fn test_concurrent_conversions() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || convert(&format!("<h2>Doc {i}</h2><p>body</p>")).unwrap())
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("## Doc {i}\n\nbody\n"));
    }
}
