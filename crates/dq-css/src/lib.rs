//! dq CSS - selector engine
//!
//! Parses CSS selector lists and matches them against a [`dq_dom::DomTree`].
//! Supported: type, `*`, `#id`, `.class`, attribute selectors with all six
//! operators, structural pseudo-classes, `:not(compound)` and the four
//! combinators.

mod matching;
mod parser;
pub mod selectors;

pub use matching::{matches, query_all, query_first};
pub use selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList, SelectorPart,
};

/// Parse a selector list
pub fn parse(selector: &str) -> Result<SelectorList, SelectorError> {
    parser::parse_selector_list(selector)
}

/// Selector syntax error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Invalid selector '{selector}': {reason}")]
    Syntax { selector: String, reason: String },
}
