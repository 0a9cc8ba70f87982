//! Edge-case tests: teardown, invalid targets, odd tree shapes

use fos_cssom::ParseOptions;
use fos_hdom::{Document, DocumentConfig, DomError, Namespace};

#[test]
fn test_released_node_rejects_access() {
    let mut doc = Document::default();
    let body = doc.body();
    let div = doc.create_element("div");
    let child = doc.create_element("span");
    doc.append_child(div, child).unwrap();
    doc.append_child(body, div).unwrap();
    doc.set_attribute(div, "style", "color: red").unwrap();
    assert_eq!(doc.style(div).unwrap().css_text(), "color: red");

    doc.release(div).unwrap();

    assert!(doc.child_nodes(body).is_empty());
    assert_eq!(doc.style(div).err(), Some(DomError::Released));
    assert_eq!(doc.dataset(child).err(), Some(DomError::Released));
    assert_eq!(doc.set_attribute(div, "title", "x"), Err(DomError::Released));
    assert_eq!(doc.append_child(body, div), Err(DomError::Released));
}

#[test]
fn test_released_style_element_drops_sheet() {
    let mut doc = Document::default();
    let head = doc.head();
    let style = doc.create_element("style");
    doc.append_child(head, style).unwrap();
    assert!(doc.sheet(style).unwrap().is_some());

    doc.release(style).unwrap();
    assert_eq!(doc.sheet(style).err(), Some(DomError::Released));
    assert!(doc.child_nodes(head).is_empty());
}

#[test]
fn test_text_nodes_have_no_derived_state() {
    let mut doc = Document::default();
    let text = doc.create_text_node("x");

    assert_eq!(doc.style(text).err(), Some(DomError::InvalidNodeType));
    assert_eq!(doc.dataset(text).err(), Some(DomError::InvalidNodeType));
    assert_eq!(doc.set_attribute(text, "a", "b"), Err(DomError::InvalidNodeType));
}

#[test]
fn test_insert_before_foreign_reference() {
    let mut doc = Document::default();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    let stranger = doc.create_element("p");
    doc.append_child(b, stranger).unwrap();

    let child = doc.create_element("span");
    assert_eq!(doc.insert_before(a, child, Some(stranger)), Err(DomError::NotAChild));
    assert_eq!(doc.parent_node(child), None);
}

#[test]
fn test_insert_before_none_appends() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    let first = doc.create_text_node("1");
    let second = doc.create_text_node("2");
    doc.append_child(div, first).unwrap();
    doc.insert_before(div, second, None).unwrap();

    assert_eq!(doc.child_nodes(div), vec![first, second]);
}

#[test]
fn test_comments_are_not_style_text() {
    let mut doc = Document::default();
    let head = doc.head();
    let style = doc.create_element("style");
    let comment = doc.create_comment("b { color: red; }");
    let text = doc.create_text_node("a { color: red; }");
    doc.append_child(style, comment).unwrap();
    doc.append_child(style, text).unwrap();
    doc.append_child(head, style).unwrap();

    assert_eq!(doc.text_content(style).unwrap(), "a { color: red; }");
    assert_eq!(doc.sheet(style).unwrap().map(|s| s.len()), Some(1));
}

#[test]
fn test_remove_absent_style_attribute() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    assert_eq!(doc.style(div).unwrap().css_text(), "");

    assert_eq!(doc.remove_attribute(div, "style").unwrap(), None);
    assert_eq!(doc.style(div).unwrap().css_text(), "");
    assert_eq!(doc.get_attribute(div, "style").unwrap(), None);
}

#[test]
fn test_remove_missing_style_property_leaves_attribute_alone() {
    let mut doc = Document::default();
    let div = doc.create_element("div");

    assert_eq!(doc.remove_style_property(div, "color").unwrap(), "");
    assert!(!doc.has_attribute(div, "style").unwrap());
}

#[test]
fn test_invalid_style_text_is_kept_verbatim() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    doc.set_style_text(div, "not css at all").unwrap();

    let style = doc.style(div).unwrap();
    assert_eq!(style.css_text(), "not css at all");
}

#[test]
fn test_empty_document_config() {
    let mut doc = Document::with_config(DocumentConfig {
        url: "https://example.com/".to_string(),
        scaffold: false,
        css: ParseOptions { error_recovery: false },
    });
    assert_eq!(doc.url(), "https://example.com/");
    assert!(!doc.head().is_valid());

    let root = doc.tree().root();
    let style = doc.create_element("style");
    let text = doc.create_text_node("a { color: red; }");
    doc.append_child(style, text).unwrap();
    doc.append_child(root, style).unwrap();
    assert_eq!(doc.sheet(style).unwrap().map(|s| s.len()), Some(1));
}

#[test]
fn test_svg_style_element_is_not_a_style_sheet() {
    let mut doc = Document::default();
    let body = doc.body();
    let style = doc.create_element_ns(Namespace::Svg, "style");
    doc.append_child(body, style).unwrap();

    assert_eq!(doc.sheet(style).err(), Some(DomError::InvalidNodeType));
}

#[test]
fn test_uppercase_style_tag() {
    let mut doc = Document::default();
    let head = doc.head();
    let style = doc.create_element("STYLE");
    doc.append_child(head, style).unwrap();

    assert!(doc.sheet(style).unwrap().is_some());
}

#[test]
fn test_deep_tree_connection() {
    let mut doc = Document::default();
    let top = doc.create_element("div");
    let mut current = top;
    for _ in 0..200 {
        let next = doc.create_element("div");
        doc.append_child(current, next).unwrap();
        current = next;
    }
    let style = doc.create_element("style");
    doc.append_child(current, style).unwrap();

    let body = doc.body();
    doc.append_child(body, top).unwrap();
    assert!(doc.is_connected(style).unwrap());
    assert!(doc.sheet(style).unwrap().is_some());
}
