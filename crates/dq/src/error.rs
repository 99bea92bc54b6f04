//! Error types

use dq_css::SelectorError;
use dq_dom::DomError;
use dq_html::ParseError;

/// Result alias for the convenience layer
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience layer error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Content that cannot be inserted at the requested place
    #[error("Invalid insertable: {shape}")]
    InvalidInsertable { shape: &'static str },

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
