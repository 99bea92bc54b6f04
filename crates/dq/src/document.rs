//! Document handle
//!
//! A cheaply clonable, shared handle to one live document. Every
//! [`Element`] keeps a clone, so the tree lives as long as any handle.

use std::cell::RefCell;
use std::fmt;
use std::io::Read;
use std::rc::Rc;

use dq_dom::{DomTree, NodeId};
use dq_html::HtmlParser;
use dq_net::{ClientBuilder, JsonClient};

use crate::{Collection, Config, Element, Result, Selection};

/// Shared handle to a live document
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<dq_dom::Document>>,
    config: Rc<Config>,
}

impl Document {
    /// Empty `<html><head></head><body></body></html>` document
    pub fn new(url: &str) -> Self {
        Self::from_dom(dq_dom::Document::new(url))
    }

    /// Parse markup into a document at `about:blank`
    pub fn parse(html: &str) -> Self {
        Self::from_dom(HtmlParser::new().parse(html))
    }

    /// Parse markup into a document at `url`
    pub fn parse_with_url(html: &str, url: &str) -> Self {
        Self::from_dom(HtmlParser::new().parse_with_url(html, url))
    }

    /// Parse UTF-8 markup from a reader
    pub fn from_reader<R: Read>(reader: &mut R, url: &str) -> Result<Self> {
        Ok(Self::from_dom(HtmlParser::new().parse_reader(reader, url)?))
    }

    fn from_dom(document: dq_dom::Document) -> Self {
        Self {
            inner: Rc::new(RefCell::new(document)),
            config: Rc::new(Config::default()),
        }
    }

    /// Replace the configuration of this handle (other clones keep theirs)
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Rc::new(config);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Document location
    pub fn location(&self) -> String {
        self.inner.borrow().url().to_string()
    }

    /// Change the location (no navigation happens)
    pub fn set_location(&self, url: &str) {
        self.inner.borrow_mut().set_url(url);
    }

    /// Path part of the location. Locations that are not absolute URLs
    /// are taken as a path with any query or fragment stripped.
    pub fn path(&self) -> String {
        let location = self.location();
        match url::Url::parse(&location) {
            Ok(url) => url.path().to_string(),
            Err(_) => location
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn title(&self) -> String {
        self.inner.borrow().title()
    }

    pub fn document_element(&self) -> Option<Element> {
        let node = self.inner.borrow().document_element()?;
        self.element(node)
    }

    pub fn head(&self) -> Option<Element> {
        let node = self.inner.borrow().head()?;
        self.element(node)
    }

    pub fn body(&self) -> Option<Element> {
        let node = self.inner.borrow().body()?;
        self.element(node)
    }

    /// `#id` patterns resolve to one element, everything else to a collection
    pub fn select(&self, pattern: &str) -> Result<Selection> {
        crate::select(self, pattern)
    }

    pub fn by_id(&self, id: &str) -> Option<Element> {
        crate::by_id(self, id)
    }

    pub fn select_all(&self, pattern: &str) -> Result<Collection> {
        crate::select_all(self, pattern)
    }

    /// New detached element
    pub fn create_element(&self, tag: &str) -> Element {
        let node = self.inner.borrow_mut().tree.create_element(tag);
        Element::from_parts(self.clone(), node)
    }

    /// Serialized markup of the whole document
    pub fn html(&self) -> String {
        let doc = self.inner.borrow();
        dq_html::outer_html(&doc.tree, doc.tree.root())
    }

    /// JSON client resolving relative URLs against the location
    pub fn api(&self) -> JsonClient {
        ClientBuilder::new()
            .base_url(&self.location())
            .user_agent(&self.config.user_agent)
            .build()
    }

    /// Handle for `node` if it is an element of this document
    pub fn element(&self, node: NodeId) -> Option<Element> {
        let is_element = self.inner.borrow().tree.element(node).is_some();
        is_element.then(|| Element::from_parts(self.clone(), node))
    }

    /// Run `f` with shared access to the tree. Must not call back into
    /// mutating methods of this document.
    pub fn with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> R {
        f(&self.inner.borrow().tree)
    }

    /// `None` while the tree is mutably borrowed
    pub(crate) fn try_with_tree<R>(&self, f: impl FnOnce(&DomTree) -> R) -> Option<R> {
        let doc = self.inner.try_borrow().ok()?;
        Some(f(&doc.tree))
    }

    pub(crate) fn with_tree_mut<R>(&self, f: impl FnOnce(&mut DomTree) -> R) -> R {
        f(&mut self.inner.borrow_mut().tree)
    }

    /// True if both handles refer to the same document
    pub fn same_document(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.same_document(other)
    }
}

impl Eq for Document {}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Document");
        if let Ok(doc) = self.inner.try_borrow() {
            s.field("url", &doc.url()).field("nodes", &doc.tree.len());
        }
        s.finish_non_exhaustive()
    }
}
