//! Document - tree plus location and cached structural elements

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot violate the hierarchy
        let _ = tree.append_child(tree.root(), html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create a document with no structure; call [`Document::finalize`]
    /// after filling the tree
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate `<html>`, `<head>` and `<body>` after parsing
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let html = tree
            .element_children(tree.root())
            .into_iter()
            .find(|&n| tree.tag_name(n) == Some("html"));
        let Some(html) = html else {
            return;
        };
        let find = |tag: &str| {
            tree.element_children(html)
                .into_iter()
                .find(|&n| tree.tag_name(n) == Some(tag))
                .unwrap_or(NodeId::NONE)
        };
        self.head_element = find("head");
        self.body_element = find("body");
        self.html_element = html;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Change the document location (no navigation happens)
    pub fn set_url(&mut self, url: &str) {
        self.url = url.to_string();
    }

    /// Text of the first `<title>` in `<head>`
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .into_iter()
            .find(|&n| self.tree.tag_name(n) == Some("title"))
            .map(|n| self.tree.text_content(n).trim().to_string())
            .unwrap_or_default()
    }

    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.option()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head_element.option()
    }

    pub fn body(&self) -> Option<NodeId> {
        self.body_element.option()
    }

    /// First element in document order with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(self.tree.root(), id)
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
