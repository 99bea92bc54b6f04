//! Element factory
//!
//! Builds a detached element from a tag, a property bag, optional text and
//! child elements, in that order.

use crate::{Document, Element, Insertable, Result};

/// Insertion-ordered string properties applied to a new element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBag {
    entries: Vec<(String, String)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for PropertyBag {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

/// Create a detached element.
///
/// `tag` falls back to the document's configured default (`div`).
/// Properties are written in bag order as direct property writes, then
/// `text` replaces the content, then `children` are appended in order.
pub fn create<I>(
    document: &Document,
    tag: Option<&str>,
    properties: &PropertyBag,
    text: Option<&str>,
    children: I,
) -> Result<Element>
where
    I: IntoIterator<Item = Element>,
{
    let tag = tag.unwrap_or(document.config().default_tag.as_str());
    let element = document.create_element(tag);
    tracing::trace!(tag, properties = properties.len(), "create");

    for (name, value) in properties.iter() {
        element.set_property(name, value)?;
    }
    if let Some(text) = text {
        element.set_text(text);
    }

    let children: Vec<Element> = children.into_iter().collect();
    if !children.is_empty() {
        element.add(Insertable::Nodes(children))?;
    }
    Ok(element)
}

/// Fluent form of [`create`]
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    document: Document,
    tag: Option<String>,
    properties: PropertyBag,
    text: Option<String>,
    children: Vec<Element>,
}

impl ElementBuilder {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            tag: None,
            properties: PropertyBag::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name, value);
        self
    }

    pub fn class(self, class_name: &str) -> Self {
        self.property("className", class_name)
    }

    pub fn id(self, id: &str) -> Self {
        self.property("id", id)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> Result<Element> {
        create(
            &self.document,
            self.tag.as_deref(),
            &self.properties,
            self.text.as_deref(),
            self.children,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_property_bag_keeps_order_and_replaces_in_place() {
        let mut bag = PropertyBag::from([("a", "1"), ("b", "2")]);
        bag.insert("a", "3");
        let entries: Vec<_> = bag.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
        assert_eq!(bag.get("b"), Some("2"));
        assert!(bag.get("c").is_none());
    }

    #[test]
    fn test_create_span_with_text_then_child() {
        let doc = Document::default();
        let child = doc.create_element("b");
        child.set_text("!");
        let span = create(
            &doc,
            Some("span"),
            &PropertyBag::from([("className", "tag")]),
            Some("hi"),
            [child.clone()],
        )
        .unwrap();

        assert_eq!(span.tag_name(), "span");
        assert!(span.has_class("tag"));
        assert_eq!(span.text(), "hi!");
        assert_eq!(span.children().last(), Some(&child));
        assert_eq!(span.outer_html(), r#"<span class="tag">hi<b>!</b></span>"#);
        assert!(!span.is_connected());
    }

    #[test]
    fn test_default_tag_from_config() {
        let doc = Document::default();
        let el = create(&doc, None, &PropertyBag::new(), None, []).unwrap();
        assert_eq!(el.tag_name(), "div");

        let custom = Document::default().with_config(Config {
            default_tag: "section".into(),
            ..Config::default()
        });
        let el = ElementBuilder::new(&custom).build().unwrap();
        assert_eq!(el.tag_name(), "section");
    }

    #[test]
    fn test_properties_applied_in_order() {
        let doc = Document::default();
        let props = PropertyBag::new()
            .with("textContent", "first")
            .with("innerHTML", "<i>second</i>")
            .with("htmlFor", "field")
            .with("hidden", "yes")
            .with("payload", "42");
        let el = create(&doc, Some("label"), &props, None, []).unwrap();
        assert_eq!(el.inner_html(), "<i>second</i>");
        assert_eq!(el.attr("for").as_deref(), Some("field"));
        assert_eq!(el.attr("hidden").as_deref(), Some(""));
        assert_eq!(el.property("payload").as_deref(), Some("42"));
        assert_eq!(el.attr("payload"), None);
    }

    #[test]
    fn test_text_replaces_property_content() {
        let doc = Document::default();
        let props = PropertyBag::from([("innerHTML", "<b>x</b>")]);
        let el = create(&doc, Some("p"), &props, Some("plain"), []).unwrap();
        assert_eq!(el.inner_html(), "plain");
    }

    #[test]
    fn test_children_move_from_previous_parent() {
        let doc = Document::parse(r#"<ul id="old"><li>a</li><li>b</li></ul>"#);
        let old = doc.by_id("old").unwrap();
        let items = old.children();
        let list = ElementBuilder::new(&doc)
            .tag("ol")
            .id("new")
            .children(items)
            .build()
            .unwrap();
        assert!(old.children().is_empty());
        assert_eq!(list.text(), "ab");
        assert_eq!(list.id().as_deref(), Some("new"));
    }

    #[test]
    fn test_builder_rejects_foreign_child() {
        let doc = Document::default();
        let stranger = Document::default().create_element("p");
        let result = ElementBuilder::new(&doc).child(stranger).build();
        assert!(matches!(result, Err(crate::Error::InvalidInsertable { .. })));
    }
}
