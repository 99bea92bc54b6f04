//! Selector matching against the document tree
//!
//! Complex selectors are matched right to left: the rightmost compound must
//! match the candidate, then each combinator walks to an ancestor or earlier
//! sibling that matches the next compound to the left.

use std::collections::HashSet;

use dq_dom::{DomTree, NodeData, NodeId};

use crate::selectors::{
    Combinator, ComplexSelector, CompoundSelector, PseudoClass, SelectorComponent, SelectorList,
    SelectorPart,
};

/// Does `node` match any selector in the list
pub fn matches(tree: &DomTree, node: NodeId, list: &SelectorList) -> bool {
    tree.element(node).is_some() && list.selectors.iter().any(|s| matches_complex(tree, node, s))
}

/// All elements under `scope` (excluding `scope` itself) matching `list`,
/// in document order, each at most once
pub fn query_all(tree: &DomTree, scope: NodeId, list: &SelectorList) -> Vec<NodeId> {
    if let [single] = list.selectors.as_slice() {
        if let [part] = single.parts.as_slice() {
            if let Some(id) = part.compound.id_only() {
                return tree
                    .element_descendants(scope)
                    .into_iter()
                    .filter(|&n| tree.element(n).and_then(|e| e.id()) == Some(id))
                    .collect();
            }
        }
    }

    let mut seen = HashSet::new();
    let matched: Vec<NodeId> = tree
        .element_descendants(scope)
        .into_iter()
        .filter(|&candidate| {
            list.selectors
                .iter()
                .any(|selector| matches_complex(tree, candidate, selector))
        })
        .filter(|&candidate| seen.insert(candidate))
        .collect();
    tracing::trace!(scope = scope.index(), matched = matched.len(), "selector query");
    matched
}

/// First match under `scope` in document order
pub fn query_first(tree: &DomTree, scope: NodeId, list: &SelectorList) -> Option<NodeId> {
    tree.element_descendants(scope).into_iter().find(|&candidate| {
        list.selectors
            .iter()
            .any(|selector| matches_complex(tree, candidate, selector))
    })
}

fn matches_complex(tree: &DomTree, node: NodeId, selector: &ComplexSelector) -> bool {
    let parts: &[SelectorPart] = &selector.parts;
    let Some(last) = parts.last() else {
        return false;
    };
    if !matches_compound(tree, node, &last.compound) {
        return false;
    }
    matches_left(tree, node, parts)
}

/// `parts.last()` is known to match `node`; check the rest of the chain.
/// Descendant and subsequent-sibling combinators backtrack over every
/// candidate, so `div > p span` finds the right `p` even when a closer
/// ancestor `p` sits outside any `div`.
fn matches_left(tree: &DomTree, node: NodeId, parts: &[SelectorPart]) -> bool {
    let (Some(current), rest) = (parts.last(), &parts[..parts.len().saturating_sub(1)]) else {
        return true;
    };
    let Some(combinator) = current.combinator else {
        return true;
    };
    let Some(prev) = rest.last() else {
        return true;
    };

    let ok = |candidate: NodeId| {
        matches_compound(tree, candidate, &prev.compound) && matches_left(tree, candidate, rest)
    };

    match combinator {
        Combinator::Child => element_parent(tree, node).is_some_and(ok),
        Combinator::Descendant => {
            let mut cursor = element_parent(tree, node);
            while let Some(ancestor) = cursor {
                if ok(ancestor) {
                    return true;
                }
                cursor = element_parent(tree, ancestor);
            }
            false
        }
        Combinator::NextSibling => tree.prev_element_sibling(node).is_some_and(ok),
        Combinator::SubsequentSibling => {
            let mut cursor = tree.prev_element_sibling(node);
            while let Some(sibling) = cursor {
                if ok(sibling) {
                    return true;
                }
                cursor = tree.prev_element_sibling(sibling);
            }
            false
        }
    }
}

/// Parent if it is an element (the document node never matches)
fn element_parent(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.parent(node).filter(|&p| tree.element(p).is_some())
}

fn matches_compound(tree: &DomTree, node: NodeId, compound: &CompoundSelector) -> bool {
    let Some(element) = tree.element(node) else {
        return false;
    };

    compound.components.iter().all(|component| match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => tree.resolve(element.name).eq_ignore_ascii_case(tag),
        SelectorComponent::Id(id) => element.id() == Some(id.as_str()),
        SelectorComponent::Class(class) => element.has_class(class),
        SelectorComponent::Attribute(attr) => attr.matches(element.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => matches_pseudo_class(tree, node, pseudo),
    })
}

/// 1-based position among element siblings, and the sibling count,
/// optionally restricted to siblings with the same tag
fn sibling_position(tree: &DomTree, node: NodeId, same_type: bool) -> (i32, i32) {
    let Some(parent) = tree.parent(node) else {
        return (1, 1);
    };
    let tag = tree.tag_name(node);
    let siblings: Vec<NodeId> = tree
        .element_children(parent)
        .into_iter()
        .filter(|&s| !same_type || tree.tag_name(s) == tag)
        .collect();
    let index = siblings.iter().position(|&s| s == node).map_or(1, |i| i + 1);
    (index as i32, siblings.len() as i32)
}

fn matches_pseudo_class(tree: &DomTree, node: NodeId, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Root => tree
            .parent(node)
            .and_then(|p| tree.get(p))
            .is_some_and(|p| matches!(p.data, NodeData::Document)),
        PseudoClass::Empty => tree
            .children(node)
            .all(|(_, child)| !child.is_element() && child.as_text().is_none_or(str::is_empty)),
        PseudoClass::FirstChild => sibling_position(tree, node, false).0 == 1,
        PseudoClass::LastChild => {
            let (index, count) = sibling_position(tree, node, false);
            index == count
        }
        PseudoClass::OnlyChild => sibling_position(tree, node, false).1 == 1,
        PseudoClass::FirstOfType => sibling_position(tree, node, true).0 == 1,
        PseudoClass::LastOfType => {
            let (index, count) = sibling_position(tree, node, true);
            index == count
        }
        PseudoClass::OnlyOfType => sibling_position(tree, node, true).1 == 1,
        PseudoClass::NthChild(expr) => expr.matches(sibling_position(tree, node, false).0),
        PseudoClass::NthLastChild(expr) => {
            let (index, count) = sibling_position(tree, node, false);
            expr.matches(count - index + 1)
        }
        PseudoClass::NthOfType(expr) => expr.matches(sibling_position(tree, node, true).0),
        PseudoClass::NthLastOfType(expr) => {
            let (index, count) = sibling_position(tree, node, true);
            expr.matches(count - index + 1)
        }
        PseudoClass::Not(inner) => !matches_compound(tree, node, inner),
    }
}
