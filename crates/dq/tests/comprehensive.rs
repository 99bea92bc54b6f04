//! Comprehensive tests for dq
//!
//! Selection, collection iteration, element behaviors, the element factory
//! and the JSON client, driven through the public API.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use dq::api::{ApiError, JsonClient, Method, Transport};
use dq::net::{NetError, Request, Response};
use dq::{Document, ElementBuilder, Error, Event, ListenerOptions, PropertyBag, Selection};
use serde_json::json;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Docs</title></head>
<body>
  <nav id="nav">
    <ul id="menu">
      <li class="item" hx-replace-url="/docs/introduction">Introduction</li>
      <li class="item" hx-replace-url="/docs/configuration">Configuration</li>
      <li class="item extra" hx-replace-url="/docs/api">API</li>
    </ul>
  </nav>
  <main id="content"><p>A</p></main>
</body>
</html>"#;

fn page() -> Document {
    Document::parse_with_url(PAGE, "https://example.com/docs/configuration")
}

// ============================================================================
// SELECTION
// ============================================================================

#[test]
fn test_select_id_returns_single() {
    let doc = page();
    match doc.select("#menu").unwrap() {
        Selection::Single(Some(el)) => assert_eq!(el.id().as_deref(), Some("menu")),
        other => panic!("expected single element, got {other:?}"),
    }
}

#[test]
fn test_select_non_id_returns_document_order() {
    let doc = page();
    let items = doc.select("li").unwrap().into_collection();
    let texts: Vec<String> = items.iter().map(|el| el.text()).collect();
    assert_eq!(texts, vec!["Introduction", "Configuration", "API"]);
}

#[test]
fn test_select_list_deduplicates() {
    let doc = page();
    let items = doc.select_all(".item, .extra, li[hx-replace-url$=api]").unwrap();
    assert_eq!(items.len(), 3);
}

#[test]
fn test_element_relative_select() {
    let doc = page();
    let nav = doc.by_id("nav").unwrap();
    let in_nav = nav.select("li:nth-child(2)").unwrap().into_collection();
    assert_eq!(in_nav.len(), 1);
    assert_eq!(in_nav[0].text(), "Configuration");

    let content = doc.by_id("content").unwrap();
    assert!(content.select("li").unwrap().into_collection().is_empty());
    assert_eq!(content.select("#menu").unwrap(), Selection::Single(None));
}

#[test]
fn test_free_functions_match_methods() {
    let doc = page();
    assert_eq!(dq::by_id(&doc, "menu"), doc.by_id("menu"));
    assert_eq!(dq::select_all(&doc, "p").unwrap(), doc.select_all("p").unwrap());
}

// ============================================================================
// COLLECTION ITERATION
// ============================================================================

#[test]
fn test_each_adds_class_to_every_member() {
    let doc = page();
    let items = doc.select_all("li").unwrap();
    dq::each(&items, |el, index, _| {
        el.add_class(&format!("n{index}"));
    });
    assert!(items[0].has_class("n0"));
    assert!(items[2].has_class("n2"));
    assert!(items[2].has_class("extra"));
}

// ============================================================================
// ELEMENT BEHAVIORS
// ============================================================================

#[test]
fn test_add_and_prep_text() {
    let doc = page();
    let p = doc.select_all("main p").unwrap()[0].clone();
    p.add("X").unwrap();
    assert_eq!(p.text(), "AX");
    p.set_text("A");
    p.prep("X").unwrap();
    assert_eq!(p.text(), "XA");
}

#[test]
fn test_add_list_appends_in_order() {
    let doc = page();
    let main = doc.by_id("content").unwrap();
    let e1 = doc.create_element("span");
    e1.set_text("1");
    let e2 = doc.create_element("span");
    e2.set_text("2");
    main.add([e1.clone(), e2.clone()]).unwrap();
    let children = main.children();
    assert_eq!(children.len(), 3);
    assert_eq!(children[1], e1);
    assert_eq!(children[2], e2);
}

#[test]
fn test_prep_list_keeps_input_order() {
    let doc = page();
    let main = doc.by_id("content").unwrap();
    let e1 = doc.create_element("h1");
    let e2 = doc.create_element("h2");
    main.prep(vec![e1.clone(), e2.clone()]).unwrap();
    let tags: Vec<String> = main.children().iter().map(|el| el.tag_name()).collect();
    assert_eq!(tags, vec!["h1", "h2", "p"]);
}

#[test]
fn test_add_html_parses_markup() {
    let doc = page();
    let menu = doc.by_id("menu").unwrap();
    menu.add(r#"<li class="item" hx-replace-url="/docs/faq">FAQ</li>"#).unwrap();
    assert_eq!(doc.select_all("li").unwrap().len(), 4);
    assert_eq!(menu.children().last().unwrap().text(), "FAQ");
}

#[test]
fn test_add_moves_existing_element() {
    let doc = page();
    let p = doc.select_all("p").unwrap()[0].clone();
    let nav = doc.by_id("nav").unwrap();
    nav.add(&p).unwrap();
    assert_eq!(p.parent(), Some(nav));
    assert!(doc.by_id("content").unwrap().children().is_empty());
}

#[test]
fn test_text_round_trip() {
    let doc = page();
    let main = doc.by_id("content").unwrap();
    main.set_text("hi");
    assert_eq!(main.text(), "hi");
    assert_eq!(main.inner_html(), "hi");
    main.set_text("<b>not markup</b>");
    assert_eq!(main.inner_html(), "&lt;b&gt;not markup&lt;/b&gt;");
}

#[test]
fn test_css_round_trip() {
    let doc = page();
    let main = doc.by_id("content").unwrap();
    main.set_css("color", "red");
    assert_eq!(main.css("color"), "red");
    main.set_css("color", "");
    assert_eq!(main.css("color"), "");
}

#[test]
fn test_class_flags() {
    let doc = page();
    let main = doc.by_id("content").unwrap();
    assert!(!main.has_class("active"));
    main.add_class("active").add_class("active");
    assert!(main.has_class("active"));
    assert_eq!(main.attr("class").as_deref(), Some("active"));
    main.rm_class("active");
    assert!(!main.has_class("active"));
    main.rm_class("never-there");
}

#[test]
fn test_click_bubbles_to_ancestor_listener() {
    let doc = page();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    doc.by_id("nav")
        .unwrap()
        .on("click", move |e: &mut Event| s.borrow_mut().push(e.target))
        .unwrap();

    let item = doc.select_all("li").unwrap()[1].clone();
    assert!(item.emit("click"));
    assert_eq!(*seen.borrow(), vec![item.node_id()]);
}

#[test]
fn test_stop_propagation_and_once() {
    let doc = page();
    let menu = doc.by_id("menu").unwrap();
    let nav = doc.by_id("nav").unwrap();
    let count = Rc::new(RefCell::new(0));

    let c = count.clone();
    nav.on("ping", move |_| *c.borrow_mut() += 10).unwrap();
    let c = count.clone();
    menu.on_with(
        "ping",
        ListenerOptions { once: true, ..ListenerOptions::default() },
        move |e| {
            *c.borrow_mut() += 1;
            e.stop_propagation();
        },
    )
    .unwrap();

    menu.emit("ping");
    assert_eq!(*count.borrow(), 1);
    menu.emit("ping");
    assert_eq!(*count.borrow(), 11);
}

#[test]
fn test_non_bubbling_event_stays_on_target() {
    let doc = page();
    let hits = Rc::new(RefCell::new(0));
    let h = hits.clone();
    doc.by_id("nav").unwrap().on("focus", move |_| *h.borrow_mut() += 1).unwrap();
    let item = doc.select_all("li").unwrap()[0].clone();
    let event = item.dispatch(Event::non_bubbling("focus"));
    assert_eq!(*hits.borrow(), 0);
    assert!(!event.is_default_prevented());
}

// ============================================================================
// ELEMENT FACTORY
// ============================================================================

#[test]
fn test_create_span_text_before_child() {
    let doc = page();
    let child = doc.create_element("i");
    let span = dq::create(
        &doc,
        Some("span"),
        &PropertyBag::from([("className", "tag")]),
        Some("hi"),
        [child.clone()],
    )
    .unwrap();
    assert!(span.has_class("tag"));
    assert_eq!(span.text(), "hi");
    assert_eq!(span.inner_html(), "hi<i></i>");
    assert_eq!(span.children().last(), Some(&child));
}

#[test]
fn test_created_element_can_be_inserted() {
    let doc = page();
    let badge = ElementBuilder::new(&doc)
        .tag("span")
        .class("badge")
        .text("new")
        .build()
        .unwrap();
    let menu = doc.by_id("menu").unwrap();
    menu.children()[2].add(&badge).unwrap();
    assert_eq!(doc.select_all("li .badge").unwrap().len(), 1);
    assert!(doc.html().contains(r#"API<span class="badge">new</span></li>"#));
}

// ============================================================================
// JSON CLIENT
// ============================================================================

#[derive(Default)]
struct Recorder {
    sent: RefCell<Vec<Request>>,
}

impl Transport for Recorder {
    fn send(&self, request: Request) -> impl Future<Output = Result<Response, NetError>> {
        // Echo the request body back, or an empty object
        let body = request.body.clone().unwrap_or_else(|| b"{}".to_vec());
        self.sent.borrow_mut().push(request);
        async move { Ok(Response::new(200, body)) }
    }
}

fn client_for(doc: &Document) -> (Rc<Recorder>, JsonClient<Rc<Recorder>>) {
    let recorder = Rc::new(Recorder::default());
    let client = JsonClient::builder()
        .base_url(&doc.location())
        .build_with(recorder.clone());
    (recorder, client)
}

#[test]
fn test_get_has_no_body_and_json_content_type() {
    let doc = page();
    let (recorder, client) = client_for(&doc);
    smol::block_on(client.get("items")).unwrap();
    let sent = recorder.sent.borrow();
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "https://example.com/docs/items");
    assert_eq!(sent[0].header("content-type"), Some("application/json"));
    assert!(sent[0].body.is_none());
}

#[test]
fn test_post_body_round_trips() {
    let doc = page();
    let (recorder, client) = client_for(&doc);
    let reply = smol::block_on(client.post("/api/echo", &json!({"a": 1}))).unwrap();
    assert_eq!(reply, json!({"a": 1}));
    let body = recorder.sent.borrow()[0].body.clone().unwrap();
    assert_eq!(serde_json::from_slice::<serde_json::Value>(&body).unwrap(), json!({"a": 1}));
}

#[test]
fn test_client_error_surfaces() {
    let doc = page();
    let (_, client) = client_for(&doc);
    let err = smol::block_on(client.get("http://[::1")).unwrap_err();
    assert!(matches!(err, ApiError::Net(NetError::InvalidUrl(_))));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_errors_display() {
    let doc = page();
    let err = doc.select_all("li[").unwrap_err();
    assert!(matches!(err, Error::Selector(_)));
    assert!(err.to_string().starts_with("Invalid selector 'li['"));

    let menu = doc.by_id("menu").unwrap();
    let err = menu.add(doc.by_id("nav").unwrap()).unwrap_err();
    assert_eq!(err.to_string(), "Invalid insertable: an ancestor of the target");
}
