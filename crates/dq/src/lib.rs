//! dq
//!
//! A terse, jQuery-like vocabulary over a live document tree: element
//! selection, class/content/text/style manipulation, event binding, an
//! element factory and a JSON-over-HTTP client.
//!
//! # Example
//! ```rust,ignore
//! use dq::{Document, PropertyBag};
//!
//! let doc = Document::parse_with_url(html, "https://example.com/docs/intro");
//! for item in doc.select_all("nav li")?.iter() {
//!     item.add_class("entry");
//! }
//! let badge = dq::create(&doc, Some("span"), &PropertyBag::from([("className", "tag")]), Some("new"), [])?;
//! doc.by_id("menu").unwrap().prep(&badge)?;
//! let items = doc.api().get("/api/items").await?;
//! ```

pub mod api;
mod collection;
mod config;
mod document;
mod element;
mod error;
mod event;
mod factory;
mod insertable;
mod selection;

pub use collection::{Collection, each};
pub use config::Config;
pub use document::Document;
pub use element::Element;
pub use error::{Error, Result};
pub use factory::{ElementBuilder, PropertyBag, create};
pub use insertable::Insertable;
pub use selection::{Selection, by_id, select, select_all};

pub use dq_dom::{Event, EventPhase, ListenerId, ListenerOptions};

// Re-export sub-crates for advanced usage
pub use dq_css as css;
pub use dq_dom as dom;
pub use dq_html as html;
pub use dq_net as net;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
