//! Element handle and behaviors
//!
//! Every behavior acts on the live tree immediately. The tree is borrowed
//! only for the duration of each call, never across a listener.

use std::fmt;
use std::rc::Rc;

use dq_dom::properties::{self, PropertyTarget};
use dq_dom::{DomTree, Event, ListenerId, ListenerOptions, NodeId};

use crate::{Collection, Document, Error, Insertable, Result, Selection, event, selection};

/// Handle to one element of a live document
#[derive(Clone)]
pub struct Element {
    document: Document,
    node: NodeId,
}

impl Element {
    /// `node` must be an element of `document`
    pub(crate) fn from_parts(document: Document, node: NodeId) -> Self {
        Self { document, node }
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn read<R>(&self, f: impl FnOnce(&DomTree, NodeId) -> R) -> R {
        self.document.with_tree(|tree| f(tree, self.node))
    }

    fn write<R>(&self, f: impl FnOnce(&mut DomTree, NodeId) -> R) -> R {
        self.document.with_tree_mut(|tree| f(tree, self.node))
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener. Registering the same closure twice runs it twice.
    pub fn on<F>(&self, event_type: &str, listener: F) -> Result<ListenerId>
    where
        F: Fn(&mut Event) + 'static,
    {
        self.on_with(event_type, ListenerOptions::default(), listener)
    }

    pub fn on_with<F>(&self, event_type: &str, options: ListenerOptions, listener: F) -> Result<ListenerId>
    where
        F: Fn(&mut Event) + 'static,
    {
        let id = self.write(|tree, node| tree.add_listener(node, event_type, Rc::new(listener), options))?;
        tracing::trace!(event_type, node = self.node.index(), "listener added");
        Ok(id)
    }

    /// Unregister a listener; false if it was not registered here
    pub fn off(&self, listener: ListenerId) -> bool {
        self.write(|tree, node| tree.remove_listener(node, listener))
    }

    /// Fire `event` at this element through capture, target and bubble
    /// phases; returns the event after dispatch
    pub fn dispatch(&self, event: Event) -> Event {
        event::dispatch(&self.document, self.node, event)
    }

    /// Fire a bubbling, cancelable event. Returns false if a listener
    /// called `prevent_default`.
    pub fn emit(&self, event_type: &str) -> bool {
        !self.dispatch(Event::new(event_type)).is_default_prevented()
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn has_class(&self, name: &str) -> bool {
        self.read(|tree, node| tree.element(node).is_some_and(|e| e.has_class(name)))
    }

    pub fn add_class(&self, name: &str) -> &Self {
        self.write(|tree, node| {
            if let Some(element) = tree.element_mut(node) {
                element.add_class(name);
            }
        });
        self
    }

    pub fn rm_class(&self, name: &str) -> &Self {
        self.write(|tree, node| {
            if let Some(element) = tree.element_mut(node) {
                element.remove_class(name);
            }
        });
        self
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Append content after the existing children
    pub fn add(&self, content: impl Into<Insertable>) -> Result<&Self> {
        let content = content.into();
        let nodes = self.prepare(&content)?;
        self.write(|tree, target| -> Result<()> {
            for node in nodes.resolve(tree, target) {
                tree.append_child(target, node)?;
            }
            Ok(())
        })?;
        tracing::trace!(shape = content.shape(), node = self.node.index(), "add");
        Ok(self)
    }

    /// Insert content before the existing children, keeping its own order
    pub fn prep(&self, content: impl Into<Insertable>) -> Result<&Self> {
        let content = content.into();
        let nodes = self.prepare(&content)?;
        self.write(|tree, target| -> Result<()> {
            for node in nodes.resolve(tree, target).into_iter().rev() {
                tree.prepend_child(target, node)?;
            }
            Ok(())
        })?;
        tracing::trace!(shape = content.shape(), node = self.node.index(), "prep");
        Ok(self)
    }

    /// Validate element content against this target before any mutation
    fn prepare(&self, content: &Insertable) -> Result<Pending> {
        let elements: &[Element] = match content {
            Insertable::Html(html) => return Ok(Pending::Html(html.clone())),
            Insertable::Node(element) => std::slice::from_ref(element),
            Insertable::Nodes(elements) => elements,
        };

        for element in elements {
            if !element.document.same_document(&self.document) {
                return Err(Error::InvalidInsertable { shape: "element from another document" });
            }
            if element.node == self.node {
                return Err(Error::InvalidInsertable { shape: "the target element itself" });
            }
            if self.read(|tree, target| tree.is_inclusive_ancestor(element.node, target)) {
                return Err(Error::InvalidInsertable { shape: "an ancestor of the target" });
            }
        }
        Ok(Pending::Nodes(elements.iter().map(|e| e.node).collect()))
    }

    /// Concatenated text of all descendants
    pub fn text(&self) -> String {
        self.read(|tree, node| tree.text_content(node))
    }

    /// Replace all content with one text node (none for "")
    pub fn set_text(&self, value: &str) -> &Self {
        if let Err(err) = self.write(|tree, node| tree.set_text_content(node, value)) {
            tracing::debug!(%err, node = self.node.index(), "set_text failed");
        }
        self
    }

    pub fn inner_html(&self) -> String {
        self.read(dq_html::inner_html)
    }

    pub fn outer_html(&self) -> String {
        self.read(dq_html::outer_html)
    }

    /// Replace all content with parsed markup
    pub fn set_inner_html(&self, html: &str) -> Result<&Self> {
        self.write(|tree, target| tree.clear_children(target));
        self.add(html)
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    /// Inline style value; "" when absent
    pub fn css(&self, property: &str) -> String {
        self.read(|tree, node| {
            tree.element(node)
                .map(|e| e.style().get_property(property).to_string())
                .unwrap_or_default()
        })
    }

    /// Set an inline style property; "" removes it
    pub fn set_css(&self, property: &str, value: &str) -> &Self {
        self.write(|tree, node| {
            if let Some(element) = tree.element_mut(node) {
                element.set_style_property(property, value);
            }
        });
        self
    }

    // ------------------------------------------------------------------
    // Attributes and properties
    // ------------------------------------------------------------------

    pub fn tag_name(&self) -> String {
        self.read(|tree, node| tree.tag_name(node).unwrap_or_default().to_string())
    }

    pub fn id(&self) -> Option<String> {
        self.attr("id")
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.read(|tree, node| {
            tree.element(node)
                .and_then(|e| e.get_attr(name))
                .map(str::to_string)
        })
    }

    pub fn set_attr(&self, name: &str, value: &str) -> &Self {
        self.write(|tree, node| {
            if let Some(element) = tree.element_mut(node) {
                element.set_attr(name, value);
            }
        });
        self
    }

    pub fn remove_attr(&self, name: &str) -> Option<String> {
        self.write(|tree, node| tree.element_mut(node).and_then(|e| e.remove_attr(name)))
    }

    /// Read a property the way a direct property access would
    pub fn property(&self, name: &str) -> Option<String> {
        match properties::reflect(name) {
            PropertyTarget::InnerHtml => Some(self.inner_html()),
            _ => self.read(|tree, node| tree.property(node, name)),
        }
    }

    /// Direct property write: reflected properties update their attribute,
    /// content properties replace children, others become expandos
    pub fn set_property(&self, name: &str, value: &str) -> Result<&Self> {
        match properties::reflect(name) {
            PropertyTarget::InnerHtml => self.set_inner_html(value),
            _ => {
                self.write(|tree, node| tree.set_property(node, name, value))?;
                Ok(self)
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Element children as a collection
    pub fn children(&self) -> Collection {
        self.read(|tree, node| tree.element_children(node))
            .into_iter()
            .filter_map(|n| self.document.element(n))
            .collect()
    }

    /// Parent element; `None` at the top or when detached
    pub fn parent(&self) -> Option<Element> {
        let parent = self.read(|tree, node| tree.parent(node))?;
        self.document.element(parent)
    }

    /// Whether the element is reachable from the document root
    pub fn is_connected(&self) -> bool {
        self.read(|tree, node| tree.is_connected(node))
    }

    /// Select among descendants: `#`-patterns yield one element, others a
    /// collection
    pub fn select(&self, pattern: &str) -> Result<Selection> {
        selection::select_in(&self.document, self.node, pattern)
    }

    pub fn select_all(&self, pattern: &str) -> Result<Collection> {
        selection::query_all(&self.document, self.node, pattern)
    }
}

/// Validated content waiting to be placed
enum Pending {
    Html(String),
    Nodes(Vec<NodeId>),
}

impl Pending {
    /// Node ids to insert, parsing markup in the target's context
    fn resolve(self, tree: &mut DomTree, target: NodeId) -> Vec<NodeId> {
        match self {
            Pending::Html(html) => {
                let context = tree.tag_name(target).unwrap_or("body").to_string();
                dq_html::parse_fragment(tree, &context, &html)
            }
            Pending::Nodes(nodes) => nodes,
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.document.same_document(&other.document)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Element");
        s.field("node", &self.node);
        self.document.try_with_tree(|tree| {
            if let Some(tag) = tree.tag_name(self.node) {
                s.field("tag", &tag);
            }
        });
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn doc() -> Document {
        Document::parse(r#"<div id="box">A</div><ul id="list"><li>1</li></ul>"#)
    }

    #[test]
    fn test_class_names_split_on_whitespace() {
        let doc = doc();
        let el = doc.by_id("box").unwrap();
        el.add_class("a  b\tc");
        assert!(el.has_class("a") && el.has_class("b") && el.has_class("c"));
        assert!(!el.has_class("a b"));
        assert_eq!(el.attr("class").as_deref(), Some("a b c"));
        el.rm_class("a c");
        assert_eq!(el.attr("class").as_deref(), Some("b"));
    }

    #[test]
    fn test_set_text_replaces_content() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        list.set_text("<li>raw</li>");
        assert_eq!(list.children().len(), 0);
        assert_eq!(list.text(), "<li>raw</li>");
        assert_eq!(list.inner_html(), "&lt;li&gt;raw&lt;/li&gt;");
    }

    #[test]
    fn test_add_and_prep_html() {
        let doc = doc();
        let el = doc.by_id("box").unwrap();
        el.add("X").unwrap();
        assert_eq!(el.text(), "AX");
        el.prep("Y").unwrap();
        assert_eq!(el.text(), "YAX");
    }

    #[test]
    fn test_add_html_keeps_existing_listeners() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        let first = list.children()[0].clone();
        let hits = Rc::new(RefCell::new(0));
        let h = hits.clone();
        first.on("click", move |_| *h.borrow_mut() += 1).unwrap();

        list.add("<li>2</li>").unwrap();
        assert_eq!(list.children().len(), 2);
        assert_eq!(list.children()[0], first);
        first.emit("click");
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_prep_list_keeps_order() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        let a = doc.create_element("li");
        a.set_text("a");
        let b = doc.create_element("li");
        b.set_text("b");
        list.prep([a, b]).unwrap();
        assert_eq!(list.text(), "ab1");
    }

    #[test]
    fn test_insert_rejects_self_and_ancestors() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        let item = list.children()[0].clone();
        assert!(matches!(list.add(&list), Err(Error::InvalidInsertable { .. })));
        assert!(matches!(item.add(&list), Err(Error::InvalidInsertable { .. })));
        let body = doc.body().unwrap();
        assert!(matches!(item.prep(vec![body]), Err(Error::InvalidInsertable { .. })));
    }

    #[test]
    fn test_failed_list_insert_changes_nothing() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        let fresh = doc.create_element("li");
        let result = list.add(vec![fresh.clone(), list.clone()]);
        assert!(result.is_err());
        assert!(!fresh.is_connected());
        assert_eq!(list.children().len(), 1);
    }

    #[test]
    fn test_foreign_document_rejected() {
        let here = doc();
        let there = Document::default();
        let stranger = there.create_element("p");
        let err = here.by_id("box").unwrap().add(stranger).unwrap_err();
        assert_eq!(err.to_string(), "Invalid insertable: element from another document");
    }

    #[test]
    fn test_css_accessors() {
        let doc = doc();
        let el = doc.by_id("box").unwrap();
        assert_eq!(el.css("color"), "");
        el.set_css("color", "red").set_css("backgroundColor", "blue");
        assert_eq!(el.css("color"), "red");
        assert_eq!(el.css("background-color"), "blue");
        assert_eq!(el.attr("style").unwrap(), "color: red; background-color: blue;");
    }

    #[test]
    fn test_property_vs_attribute() {
        let doc = doc();
        let el = doc.by_id("box").unwrap();
        el.set_property("className", "a b").unwrap();
        el.set_property("dataKey", "k").unwrap();
        assert!(el.has_class("b"));
        assert_eq!(el.property("dataKey").as_deref(), Some("k"));
        assert_eq!(el.attr("datakey"), None);
        el.set_property("innerHTML", "<b>bold</b>").unwrap();
        assert_eq!(el.inner_html(), "<b>bold</b>");
        assert_eq!(el.property("innerHTML").as_deref(), Some("<b>bold</b>"));
    }

    #[test]
    fn test_bubbling_and_capture_order() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        let item = list.children()[0].clone();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        list.on("click", move |_| l.borrow_mut().push("list bubble")).unwrap();
        let l = log.clone();
        list.on_with("click", ListenerOptions::capture(), move |_| l.borrow_mut().push("list capture"))
            .unwrap();
        let l = log.clone();
        item.on("click", move |e| {
            assert_eq!(e.phase, dq_dom::EventPhase::AtTarget);
            l.borrow_mut().push("item");
        })
        .unwrap();

        item.emit("click");
        assert_eq!(*log.borrow(), vec!["list capture", "item", "list bubble"]);
    }

    #[test]
    fn test_listener_may_mutate_tree() {
        let doc = doc();
        let el = doc.by_id("box").unwrap();
        let target = el.clone();
        el.on("click", move |_| {
            target.add_class("clicked").set_text("done");
        })
        .unwrap();
        el.emit("click");
        assert!(el.has_class("clicked"));
        assert_eq!(el.text(), "done");
    }

    #[test]
    fn test_off_and_prevent_default() {
        let doc = doc();
        let el = doc.by_id("box").unwrap();
        let id = el.on("submit", |e| e.prevent_default()).unwrap();
        assert!(!el.emit("submit"));
        assert!(el.off(id));
        assert!(!el.off(id));
        assert!(el.emit("submit"));
    }

    #[test]
    fn test_parent_and_children() {
        let doc = doc();
        let list = doc.by_id("list").unwrap();
        assert_eq!(list.parent(), doc.body());
        assert_eq!(doc.document_element().unwrap().parent(), None);
        assert_eq!(list.children()[0].tag_name(), "li");
    }
}
