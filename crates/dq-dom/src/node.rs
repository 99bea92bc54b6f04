//! DOM Node
//!
//! Nodes link to each other through `NodeId`s instead of pointers, so the
//! whole tree lives in one `Vec` and handles stay `Copy`.

use std::collections::HashMap;

use crate::events::RegisteredListener;
use crate::{ClassList, InternedString, NodeId, StyleDeclaration};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: InternedString) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(TextData { content }))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Document and element nodes may hold children
    #[inline]
    pub fn can_have_children(&self) -> bool {
        matches!(self.data, NodeData::Document | NodeData::Element(_))
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are held both as attributes and in structured form;
/// every mutation path keeps the two in sync.
#[derive(Debug)]
pub struct ElementData {
    /// Tag name (lowercase local name)
    pub name: InternedString,
    attrs: Vec<Attribute>,
    classes: ClassList,
    style: StyleDeclaration,
    /// Properties with no reflected attribute
    expandos: HashMap<String, String>,
    pub(crate) listeners: Vec<RegisteredListener>,
}

impl ElementData {
    pub fn new(name: InternedString) -> Self {
        Self {
            name,
            attrs: Vec::new(),
            classes: ClassList::new(),
            style: StyleDeclaration::new(),
            expandos: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute. `class` and `style` also reparse their structured form.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match name.as_str() {
            "class" => self.classes = ClassList::parse(&value),
            "style" => self.style = StyleDeclaration::parse(&value),
            _ => {}
        }
        self.write_attr(name, value);
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(name))?;
        let old = self.attrs.remove(pos);
        match old.name.as_str() {
            "class" => self.classes = ClassList::new(),
            "style" => self.style = StyleDeclaration::new(),
            _ => {}
        }
        Some(old.value)
    }

    /// Attributes in insertion order
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Add each whitespace-separated class in `class`; writes the `class`
    /// attribute
    pub fn add_class(&mut self, class: &str) {
        for token in class.split_whitespace() {
            self.classes.add(token);
        }
        let value = self.classes.to_string();
        self.write_attr("class".to_string(), value);
    }

    /// Remove each whitespace-separated class in `class`; writes the
    /// `class` attribute
    pub fn remove_class(&mut self, class: &str) {
        let mut changed = false;
        for token in class.split_whitespace() {
            changed |= self.classes.remove(token);
        }
        if changed {
            let value = self.classes.to_string();
            self.write_attr("class".to_string(), value);
        }
    }

    pub fn style(&self) -> &StyleDeclaration {
        &self.style
    }

    /// Set an inline style property; writes the `style` attribute
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.set_property(name, value);
        let css = self.style.to_string();
        self.write_attr("style".to_string(), css);
    }

    pub fn expando(&self, name: &str) -> Option<&str> {
        self.expandos.get(name).map(|s| s.as_str())
    }

    pub fn set_expando(&mut self, name: &str, value: impl Into<String>) {
        self.expandos.insert(name.to_string(), value.into());
    }

    fn write_attr(&mut self, name: String, value: String) {
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute { name, value }),
        }
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
