//! Comprehensive tests for dq-css
//!
//! Selector queries against small hand-built trees.

use dq_css::{SelectorError, matches, parse, query_all, query_first};
use dq_dom::{DomTree, NodeId};

/// ```text
/// <nav id="menu" class="side">
///   <ul>
///     <li class="item" hx-replace-url="/docs/introduction">
///     <li class="item active" hx-replace-url="/docs/configuration">
///     <li class="item" hx-replace-url="/blog/news" lang="en-US">
///   </ul>
///   <p>
/// </nav>
/// ```
struct Fixture {
    tree: DomTree,
    nav: NodeId,
    ul: NodeId,
    items: Vec<NodeId>,
    p: NodeId,
}

fn fixture() -> Fixture {
    let mut tree = DomTree::new();
    let root = tree.root();
    let nav = tree.create_element("nav");
    tree.append_child(root, nav).unwrap();
    {
        let el = tree.element_mut(nav).unwrap();
        el.set_attr("id", "menu");
        el.set_attr("class", "side");
    }
    let ul = tree.create_element("ul");
    tree.append_child(nav, ul).unwrap();

    let mut items = Vec::new();
    for (url, class) in [
        ("/docs/introduction", "item"),
        ("/docs/configuration", "item active"),
        ("/blog/news", "item"),
    ] {
        let li = tree.create_element("li");
        let el = tree.element_mut(li).unwrap();
        el.set_attr("class", class);
        el.set_attr("hx-replace-url", url);
        tree.append_child(ul, li).unwrap();
        items.push(li);
    }
    tree.element_mut(items[2]).unwrap().set_attr("lang", "en-US");

    let p = tree.create_element("p");
    tree.append_child(nav, p).unwrap();
    Fixture { tree, nav, ul, items, p }
}

fn select(f: &Fixture, selector: &str) -> Vec<NodeId> {
    query_all(&f.tree, f.tree.root(), &parse(selector).unwrap())
}

// ============================================================================
// SIMPLE SELECTORS
// ============================================================================

#[test]
fn test_type_selector_document_order() {
    let f = fixture();
    assert_eq!(select(&f, "li"), f.items);
    assert_eq!(select(&f, "LI"), f.items);
}

#[test]
fn test_universal_selector() {
    let f = fixture();
    assert_eq!(select(&f, "*").len(), 6);
}

#[test]
fn test_id_and_class() {
    let f = fixture();
    assert_eq!(select(&f, "#menu"), vec![f.nav]);
    assert_eq!(select(&f, ".active"), vec![f.items[1]]);
    assert_eq!(select(&f, "li.item.active"), vec![f.items[1]]);
    assert!(select(&f, "#Menu").is_empty());
}

#[test]
fn test_attribute_operators() {
    let f = fixture();
    assert_eq!(select(&f, "[hx-replace-url]").len(), 3);
    assert_eq!(select(&f, r#"[hx-replace-url="/blog/news"]"#), vec![f.items[2]]);
    assert_eq!(select(&f, "[hx-replace-url^='/docs/']"), f.items[..2].to_vec());
    assert_eq!(select(&f, "[hx-replace-url$=tion]"), f.items[..2].to_vec());
    assert_eq!(select(&f, "[hx-replace-url*=fig]"), vec![f.items[1]]);
    assert_eq!(select(&f, "[class~=active]"), vec![f.items[1]]);
    assert_eq!(select(&f, "[lang|=en]"), vec![f.items[2]]);
}

// ============================================================================
// PSEUDO-CLASSES
// ============================================================================

#[test]
fn test_structural_pseudo_classes() {
    let f = fixture();
    assert_eq!(select(&f, "li:first-child"), vec![f.items[0]]);
    assert_eq!(select(&f, "li:last-child"), vec![f.items[2]]);
    assert_eq!(select(&f, "ul:first-of-type"), vec![f.ul]);
    assert_eq!(select(&f, "p:last-of-type"), vec![f.p]);
    assert_eq!(select(&f, "p:only-of-type"), vec![f.p]);
    assert_eq!(select(&f, "p:empty"), vec![f.p]);
    assert_eq!(select(&f, ":root"), vec![f.nav]);
}

#[test]
fn test_nth_child() {
    let f = fixture();
    assert_eq!(select(&f, "li:nth-child(odd)"), vec![f.items[0], f.items[2]]);
    assert_eq!(select(&f, "li:nth-child(2)"), vec![f.items[1]]);
    assert_eq!(select(&f, "li:nth-last-child(1)"), vec![f.items[2]]);
    assert_eq!(select(&f, "li:nth-child(-n+2)"), f.items[..2].to_vec());
}

#[test]
fn test_nth_child_extreme_offsets() {
    let f = fixture();
    assert!(select(&f, "li:nth-child(-n-2147483648)").is_empty());
    assert!(select(&f, "li:nth-child(2147483647n-2147483648)").is_empty());
    assert_eq!(select(&f, "li:nth-last-child(n-2147483648)"), f.items.to_vec());
}

#[test]
fn test_not() {
    let f = fixture();
    assert_eq!(select(&f, "li:not(.active)"), vec![f.items[0], f.items[2]]);
}

// ============================================================================
// COMBINATORS AND LISTS
// ============================================================================

#[test]
fn test_combinators() {
    let f = fixture();
    assert_eq!(select(&f, "nav li"), f.items);
    assert!(select(&f, "nav > li").is_empty());
    assert_eq!(select(&f, "nav > ul > li"), f.items);
    assert_eq!(select(&f, ".active + li"), vec![f.items[2]]);
    assert_eq!(select(&f, "li:first-child ~ li"), f.items[1..].to_vec());
    assert_eq!(select(&f, "ul ~ p"), vec![f.p]);
}

#[test]
fn test_list_dedupes_in_document_order() {
    let f = fixture();
    assert_eq!(select(&f, "p, li, .item"), vec![f.items[0], f.items[1], f.items[2], f.p]);
}

#[test]
fn test_scope_excludes_itself() {
    let f = fixture();
    let list = parse("ul, li").unwrap();
    assert_eq!(query_all(&f.tree, f.ul, &list), f.items);
    assert_eq!(query_first(&f.tree, f.nav, &list), Some(f.ul));
}

#[test]
fn test_scoped_query_still_sees_ancestors() {
    let f = fixture();
    let list = parse("nav li").unwrap();
    assert_eq!(query_all(&f.tree, f.ul, &list), f.items);
}

#[test]
fn test_matches() {
    let f = fixture();
    assert!(matches(&f.tree, f.items[1], &parse("ul > .active").unwrap()));
    assert!(!matches(&f.tree, f.items[0], &parse("ul > .active").unwrap()));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_syntax_error_carries_pattern() {
    let err = parse("li[").unwrap_err();
    let SelectorError::Syntax { selector, .. } = &err;
    assert_eq!(selector, "li[");
    assert!(err.to_string().starts_with("Invalid selector 'li['"));
}
