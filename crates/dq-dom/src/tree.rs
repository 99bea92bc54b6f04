//! DOM Tree (arena-based allocation)
//!
//! Core node manipulation: create, append, insert, remove, text content,
//! property writes and listener bookkeeping.

use crate::events::{Listener, ListenerId, ListenerOptions, RegisteredListener};
use crate::properties::{self, PropertyTarget};
use crate::{DomError, DomResult, ElementData, InternedString, Node, NodeData, NodeId, StringInterner};

/// Arena-based DOM tree. Node 0 is always the document node.
///
/// Nodes are never freed. Detaching a node (or replacing content with
/// `set_text_content`) leaves it in the arena so that outstanding `NodeId`s
/// stay valid and can be reinserted. A long-lived tree that repeatedly
/// replaces content therefore grows with every replacement; rebuild the
/// tree to reclaim that memory.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
    next_listener: u64,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
            next_listener: 1,
        }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolve an interned string
    pub fn resolve(&self, id: InternedString) -> &str {
        self.interner.get(id)
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element. Tag names are lowercased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let name = self.interner.intern(&tag.to_ascii_lowercase());
        let id = self.push(Node::element(name));
        tracing::trace!(?id, tag, "create element");
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text.to_string()))
    }

    /// Create a detached doctype node
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(Node {
            data: NodeData::Doctype { name: name.to_string() },
            ..Node::document()
        })
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent.option()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.first_child.option()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.last_child.option()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.next_sibling.option()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.prev_sibling.option()
    }

    /// Iterate direct children as `(id, node)`
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Direct child IDs
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// Direct element children
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .filter(|(_, n)| n.is_element())
            .map(|(child, _)| child)
            .collect()
    }

    /// All descendants of `id` in document (pre-)order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(id).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.child_ids(node).into_iter().rev());
        }
        out
    }

    /// Element descendants of `id` in document order
    pub fn element_descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(Node::is_element))
            .collect()
    }

    /// Previous sibling that is an element
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.prev_sibling(id);
        while let Some(node) = cursor {
            if self.get(node).is_some_and(Node::is_element) {
                return Some(node);
            }
            cursor = self.prev_sibling(node);
        }
        None
    }

    /// True if `ancestor` is `node` or contains it
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// True if the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root(), id)
    }

    /// Path from `id` up to its topmost ancestor (inclusive)
    pub fn ancestor_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.get(id).map(|_| id);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.parent(node);
        }
        path
    }

    // ------------------------------------------------------------------
    // Element data
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    /// Mutable element data or `InvalidNodeType`
    pub fn expect_element_mut(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        match self.get_mut(id) {
            None => Err(DomError::NotFound(id)),
            Some(node) => node.as_element_mut().ok_or(DomError::InvalidNodeType(id)),
        }
    }

    /// Lowercase tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| self.resolve(e.name))
    }

    /// First element under `scope` (document order) whose id matches
    pub fn get_element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.element_descendants(scope)
            .into_iter()
            .find(|&n| self.element(n).and_then(ElementData::id) == Some(id))
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if !parent_node.can_have_children()
            || matches!(child_node.data, NodeData::Document)
            || self.is_inclusive_ancestor(child, parent)
        {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Unlink a node from its parent. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Append `child` as the last child of `parent`, moving it out of any
    /// previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let first = self.first_child(parent);
        self.insert_before(parent, child, first)
    }

    /// Insert `child` before `reference` (append when `None`)
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;

        let mut reference = reference;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
            // Inserting a node before itself keeps its position
            if r == child {
                reference = self.next_sibling(child);
            }
        }

        self.detach(child);

        match reference {
            None => {
                let last = self.nodes[parent.index()].last_child;
                if last.is_valid() {
                    self.nodes[last.index()].next_sibling = child;
                } else {
                    self.nodes[parent.index()].first_child = child;
                }
                self.nodes[parent.index()].last_child = child;
                let node = &mut self.nodes[child.index()];
                node.prev_sibling = last;
                node.next_sibling = NodeId::NONE;
            }
            Some(r) => {
                let prev = self.nodes[r.index()].prev_sibling;
                if prev.is_valid() {
                    self.nodes[prev.index()].next_sibling = child;
                } else {
                    self.nodes[parent.index()].first_child = child;
                }
                self.nodes[r.index()].prev_sibling = child;
                let node = &mut self.nodes[child.index()];
                node.prev_sibling = prev;
                node.next_sibling = r;
            }
        }
        self.nodes[child.index()].parent = parent;

        tracing::trace!(?parent, ?child, "inserted node");
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Detach every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        for child in self.child_ids(id) {
            self.detach(child);
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) => t.content.clone(),
            Some(NodeData::Comment(c)) => c.clone(),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => {
                let mut out = String::new();
                for node in self.descendants(id) {
                    if let Some(text) = self.get(node).and_then(Node::as_text) {
                        out.push_str(text);
                    }
                }
                out
            }
            Some(NodeData::Doctype { .. }) | None => String::new(),
        }
    }

    /// Replace all children with a single text node (none for "")
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        match self.get_mut(id).map(|n| &mut n.data) {
            None => return Err(DomError::NotFound(id)),
            Some(NodeData::Text(t)) => {
                t.content = text.to_string();
                return Ok(());
            }
            Some(NodeData::Comment(c)) => {
                *c = text.to_string();
                return Ok(());
            }
            Some(NodeData::Doctype { .. }) => return Err(DomError::InvalidNodeType(id)),
            Some(NodeData::Element(_)) | Some(NodeData::Document) => {}
        }

        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    /// Direct property write. `innerHTML` needs a parser and is rejected
    /// here with `InvalidNodeType`; callers handle it before delegating.
    pub fn set_property(&mut self, id: NodeId, property: &str, value: &str) -> DomResult<()> {
        match properties::reflect(property) {
            PropertyTarget::Attribute(attr) => {
                self.expect_element_mut(id)?.set_attr(attr, value);
            }
            PropertyTarget::BooleanAttribute(attr) => {
                let element = self.expect_element_mut(id)?;
                if properties::is_truthy(value) {
                    element.set_attr(attr, "");
                } else {
                    element.remove_attr(attr);
                }
            }
            PropertyTarget::TextContent => self.set_text_content(id, value)?,
            PropertyTarget::InnerHtml => return Err(DomError::InvalidNodeType(id)),
            PropertyTarget::Expando => {
                self.expect_element_mut(id)?.set_expando(property, value);
            }
        }
        Ok(())
    }

    /// Direct property read
    pub fn property(&self, id: NodeId, property: &str) -> Option<String> {
        let element = self.element(id)?;
        match properties::reflect(property) {
            PropertyTarget::Attribute(attr) => {
                Some(element.get_attr(attr).unwrap_or_default().to_string())
            }
            PropertyTarget::BooleanAttribute(attr) => {
                Some(if element.has_attr(attr) { "true" } else { "" }.to_string())
            }
            PropertyTarget::TextContent => Some(self.text_content(id)),
            PropertyTarget::InnerHtml => None,
            PropertyTarget::Expando => element.expando(property).map(str::to_string),
        }
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    /// Register a listener on an element. Duplicates are kept.
    pub fn add_listener(
        &mut self,
        id: NodeId,
        event_type: &str,
        callback: Listener,
        options: ListenerOptions,
    ) -> DomResult<ListenerId> {
        let listener_id = ListenerId(self.next_listener);
        let element = self.expect_element_mut(id)?;
        element.listeners.push(RegisteredListener {
            id: listener_id,
            event_type: event_type.to_string(),
            callback,
            options,
        });
        self.next_listener += 1;
        Ok(listener_id)
    }

    /// Remove a listener. Returns false if it was not registered on `id`.
    pub fn remove_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let before = element.listeners.len();
        element.listeners.retain(|l| l.id != listener);
        before != element.listeners.len()
    }

    /// Snapshot of listeners on `id` for `event_type` in registration order,
    /// filtered by phase (`capture == true` for the capture phase).
    pub fn listeners_for(
        &self,
        id: NodeId,
        event_type: &str,
        capture: Option<bool>,
    ) -> Vec<(ListenerId, Listener, ListenerOptions)> {
        let Some(element) = self.element(id) else {
            return Vec::new();
        };
        element
            .listeners
            .iter()
            .filter(|l| l.event_type == event_type)
            .filter(|l| capture.is_none_or(|c| l.options.capture == c))
            .map(|l| (l.id, l.callback.clone(), l.options))
            .collect()
    }

    /// Check a snapshotted listener just before it runs. Returns false if it
    /// has been removed since; a `once` listener is unregistered here.
    pub fn claim_listener(&mut self, id: NodeId, listener: ListenerId) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        let Some(pos) = element.listeners.iter().position(|l| l.id == listener) else {
            return false;
        };
        if element.listeners[pos].options.once {
            element.listeners.remove(pos);
        }
        true
    }

    /// Number of listeners registered on `id`
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.element(id).map(|e| e.listeners.len()).unwrap_or(0)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.option()?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
