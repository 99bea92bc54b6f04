//! Element selection
//!
//! A pattern starting with `#` selects at most one element; any other
//! pattern selects a collection.

use dq_dom::{DomTree, NodeId};

use crate::{Collection, Document, Element, Result};

/// Outcome of [`select`]
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// `#`-pattern: the first match, if any
    Single(Option<Element>),
    /// Every match in document order
    Many(Collection),
}

impl Selection {
    pub fn is_single(&self) -> bool {
        matches!(self, Selection::Single(_))
    }

    /// The element of a `Single` selection
    pub fn single(&self) -> Option<&Element> {
        match self {
            Selection::Single(element) => element.as_ref(),
            Selection::Many(_) => None,
        }
    }

    /// The collection of a `Many` selection
    pub fn collection(&self) -> Option<&Collection> {
        match self {
            Selection::Single(_) => None,
            Selection::Many(collection) => Some(collection),
        }
    }

    /// The element of a `Single` selection; `None` for `Many`
    pub fn into_single(self) -> Option<Element> {
        match self {
            Selection::Single(element) => element,
            Selection::Many(_) => None,
        }
    }

    /// Members as a collection; a `Single` becomes zero or one members
    pub fn into_collection(self) -> Collection {
        match self {
            Selection::Single(element) => element.into_iter().collect(),
            Selection::Many(collection) => collection,
        }
    }
}

/// Select from the whole document
pub fn select(document: &Document, pattern: &str) -> Result<Selection> {
    select_in(document, document_scope(document), pattern)
}

/// First element whose id is `id`
pub fn by_id(document: &Document, id: &str) -> Option<Element> {
    let scope = document_scope(document);
    let node = document.with_tree(|tree| tree.get_element_by_id(scope, id))?;
    document.element(node)
}

/// Every match of `pattern` in document order
pub fn select_all(document: &Document, pattern: &str) -> Result<Collection> {
    query_all(document, document_scope(document), pattern)
}

fn document_scope(document: &Document) -> NodeId {
    document.with_tree(DomTree::root)
}

pub(crate) fn select_in(document: &Document, scope: NodeId, pattern: &str) -> Result<Selection> {
    let Some(id) = pattern.strip_prefix('#') else {
        return Ok(Selection::Many(query_all(document, scope, pattern)?));
    };

    let node = if is_plain_id(id) {
        document.with_tree(|tree| tree.get_element_by_id(scope, id))
    } else {
        // `#menu > li` and friends: first match of the full selector
        let list = dq_css::parse(pattern)?;
        document.with_tree(|tree| dq_css::query_first(tree, scope, &list))
    };
    Ok(Selection::Single(node.and_then(|n| document.element(n))))
}

pub(crate) fn query_all(document: &Document, scope: NodeId, pattern: &str) -> Result<Collection> {
    let list = dq_css::parse(pattern)?;
    let nodes = document.with_tree(|tree| dq_css::query_all(tree, scope, &list));
    tracing::debug!(pattern, matched = nodes.len(), "select");
    Ok(nodes.into_iter().filter_map(|n| document.element(n)).collect())
}

/// An id with no selector syntax after it
fn is_plain_id(id: &str) -> bool {
    !id.is_empty()
        && !id.contains(|c: char| {
            c.is_ascii_whitespace() || matches!(c, '.' | '#' | '[' | ':' | '>' | '+' | '~' | ',' | '(')
        })
}
