//! Markup serialization for `inner_html` / `outer_html`
//!
//! Attributes are always written quoted. Void elements get no end tag and
//! the contents of `script`/`style` are written verbatim.

use dq_dom::{DomTree, ElementData, NodeData, NodeId};

/// HTML serializer
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Break lines and indent nested elements
    pub pretty_print: bool,
    /// One level of indentation
    pub indent: String,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }

    /// Markup of the children of `node`
    pub fn serialize_inner(&self, tree: &DomTree, node: NodeId) -> String {
        let mut writer = Writer::new(self, tree);
        writer.children(node, 0);
        writer.out
    }

    /// Markup of `node` itself and its subtree
    pub fn serialize_outer(&self, tree: &DomTree, node: NodeId) -> String {
        let mut writer = Writer::new(self, tree);
        writer.node(node, 0);
        writer.out
    }
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "param" | "source" | "track" | "wbr"
    )
}

fn is_raw_text(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

struct Writer<'a> {
    options: &'a HtmlSerializer,
    tree: &'a DomTree,
    out: String,
}

impl<'a> Writer<'a> {
    fn new(options: &'a HtmlSerializer, tree: &'a DomTree) -> Self {
        Self { options, tree, out: String::new() }
    }

    fn node(&mut self, id: NodeId, depth: usize) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => self.children(id, depth),
            NodeData::Element(element) => self.element(id, element, depth),
            NodeData::Text(text) => push_escaped(&mut self.out, &text.content, false),
            NodeData::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            NodeData::Doctype { name } => {
                self.out.push_str("<!DOCTYPE ");
                self.out.push_str(name);
                self.out.push('>');
            }
        }
    }

    fn element(&mut self, id: NodeId, element: &ElementData, depth: usize) {
        let tag = self.tree.resolve(element.name);
        if depth > 0 {
            self.line_break(depth);
        }

        self.out.push('<');
        self.out.push_str(tag);
        for attr in element.attrs() {
            self.out.push(' ');
            self.out.push_str(&attr.name);
            self.out.push_str("=\"");
            push_escaped(&mut self.out, &attr.value, true);
            self.out.push('"');
        }
        self.out.push('>');
        if is_void(tag) {
            return;
        }

        if is_raw_text(tag) {
            for (_, child) in self.tree.children(id) {
                if let Some(text) = child.as_text() {
                    self.out.push_str(text);
                }
            }
        } else {
            self.children(id, depth + 1);
        }

        if self.tree.first_child(id).is_some() {
            self.line_break(depth);
        }
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn children(&mut self, parent: NodeId, depth: usize) {
        for child in self.tree.child_ids(parent) {
            self.node(child, depth);
        }
    }

    fn line_break(&mut self, depth: usize) {
        if !self.options.pretty_print {
            return;
        }
        self.out.push('\n');
        self.out.push_str(&self.options.indent.repeat(depth));
    }
}

/// Escape `&`, no-break spaces and either `"` (attributes) or `<`/`>` (text)
fn push_escaped(out: &mut String, value: &str, attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
