//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts the result into the dq arena.

use std::io::Read;

use dq_dom::{Document, DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, QualName, parse_document, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// HTML5 parser
#[derive(Debug, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        self.build_document(&dom, url)
    }

    /// Parse HTML from a reader (UTF-8)
    pub fn parse_reader<R: Read>(&self, reader: &mut R, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document from reader: {}", url);
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(reader)?;
        Ok(self.build_document(&dom, url))
    }

    fn build_document(&self, dom: &RcDom, url: &str) -> Document {
        let mut document = Document::empty(url);
        let root = document.tree().root();
        convert_children(&dom.document, document.tree_mut(), root);
        document.finalize();
        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Parse a fragment in the context of an element named `context`.
    /// Nodes are created detached in `tree`.
    pub fn parse_fragment(&self, tree: &mut DomTree, context: &str, html: &str) -> Vec<NodeId> {
        let context_name = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from(context.to_ascii_lowercase()),
        );
        let dom = parse_fragment(RcDom::default(), Default::default(), context_name, Vec::new()).one(html);

        // The fragment parser wraps its output in a synthetic <html> element
        let wrapper = dom.document.children.borrow().first().cloned();
        let Some(wrapper) = wrapper else {
            return Vec::new();
        };

        let mut top = Vec::new();
        for child in wrapper.children.borrow().iter() {
            if let Some(id) = convert_node(child, tree) {
                top.push(id);
            }
        }
        tracing::trace!(context, nodes = top.len(), "parsed fragment");
        top
    }
}

fn convert_children(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    for child in handle.children.borrow().iter() {
        if let Some(id) = convert_node(child, tree) {
            // Nodes are freshly created and detached
            let _ = tree.append_child(parent, id);
        }
    }
}

/// Convert one RcDom node (and its subtree) into a detached dq node
fn convert_node(handle: &Handle, tree: &mut DomTree) -> Option<NodeId> {
    match &handle.data {
        RcNodeData::Document => None,
        RcNodeData::Doctype { name, .. } => Some(tree.create_doctype(name)),
        RcNodeData::Text { contents } => Some(tree.create_text(&contents.borrow())),
        RcNodeData::Comment { contents } => Some(tree.create_comment(contents)),
        RcNodeData::Element { name, attrs, template_contents, .. } => {
            let id = tree.create_element(&name.local);
            if let Some(element) = tree.element_mut(id) {
                for attr in attrs.borrow().iter() {
                    element.set_attr(&attr.name.local, attr.value.to_string());
                }
            }

            convert_children(handle, tree, id);
            // <template> content lives in a separate fragment in RcDom
            if let Some(content) = template_contents.borrow().as_ref() {
                convert_children(content, tree, id);
            }
            Some(id)
        }
        RcNodeData::ProcessingInstruction { .. } => None,
    }
}
