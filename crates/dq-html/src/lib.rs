//! dq HTML Parser
//!
//! HTML5 parsing built on html5ever, converting into the dq arena tree,
//! plus innerHTML/outerHTML serialization.

mod parser;
mod serializer;

pub use dq_dom::{Document, DomTree, NodeId};
pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse an HTML string with a base URL
pub fn parse_with_url(html: &str, url: &str) -> Document {
    HtmlParser::new().parse_with_url(html, url)
}

/// Parse a markup fragment as if assigned to the `innerHTML` of an element
/// named `context`. Returns new detached top-level nodes in source order.
pub fn parse_fragment(tree: &mut DomTree, context: &str, html: &str) -> Vec<NodeId> {
    HtmlParser::new().parse_fragment(tree, context, html)
}

/// Serialize the children of `node`
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node)
}

/// Serialize `node` and its descendants
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}
