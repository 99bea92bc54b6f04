//! Static element collections

use std::ops::Index;
use std::slice;

use crate::Element;

/// Ordered snapshot of elements from a multi-match selection.
/// Tree changes after the query are not reflected in membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    elements: Vec<Element>,
}

impl Collection {
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Call `callback(element, index, collection)` for every member in
    /// order. No early exit.
    pub fn each<F>(&self, mut callback: F)
    where
        F: FnMut(&Element, usize, &Collection),
    {
        for (index, element) in self.elements.iter().enumerate() {
            callback(element, index, self);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn to_vec(&self) -> Vec<Element> {
        self.elements.clone()
    }

    pub fn into_vec(self) -> Vec<Element> {
        self.elements
    }
}

/// Free-standing form of [`Collection::each`]
pub fn each<F>(collection: &Collection, callback: F)
where
    F: FnMut(&Element, usize, &Collection),
{
    collection.each(callback);
}

impl Index<usize> for Collection {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.elements[index]
    }
}

impl IntoIterator for Collection {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Element;
    type IntoIter = slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl FromIterator<Element> for Collection {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Element>> for Collection {
    fn from(elements: Vec<Element>) -> Self {
        Self::new(elements)
    }
}
