//! Content accepted by insert operations

use crate::{Collection, Element};

/// Markup, one element, or an ordered list of elements
#[derive(Debug, Clone, PartialEq)]
pub enum Insertable {
    /// Parsed as a fragment in the context of the target element
    Html(String),
    Node(Element),
    Nodes(Vec<Element>),
}

impl Insertable {
    /// Short name of the shape, for diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            Insertable::Html(_) => "html",
            Insertable::Node(_) => "element",
            Insertable::Nodes(_) => "element list",
        }
    }
}

impl From<&str> for Insertable {
    fn from(html: &str) -> Self {
        Insertable::Html(html.to_string())
    }
}

impl From<String> for Insertable {
    fn from(html: String) -> Self {
        Insertable::Html(html)
    }
}

impl From<&String> for Insertable {
    fn from(html: &String) -> Self {
        Insertable::Html(html.clone())
    }
}

impl From<Element> for Insertable {
    fn from(element: Element) -> Self {
        Insertable::Node(element)
    }
}

impl From<&Element> for Insertable {
    fn from(element: &Element) -> Self {
        Insertable::Node(element.clone())
    }
}

impl From<Vec<Element>> for Insertable {
    fn from(elements: Vec<Element>) -> Self {
        Insertable::Nodes(elements)
    }
}

impl From<&[Element]> for Insertable {
    fn from(elements: &[Element]) -> Self {
        Insertable::Nodes(elements.to_vec())
    }
}

impl<const N: usize> From<[Element; N]> for Insertable {
    fn from(elements: [Element; N]) -> Self {
        Insertable::Nodes(elements.into())
    }
}

impl From<Collection> for Insertable {
    fn from(collection: Collection) -> Self {
        Insertable::Nodes(collection.into_vec())
    }
}

impl From<&Collection> for Insertable {
    fn from(collection: &Collection) -> Self {
        Insertable::Nodes(collection.to_vec())
    }
}
