//! dq-nav
//!
//! Marks the navigation item of the page being viewed. The page key is a
//! segment of the document path (`/docs/configuration` gives
//! `configuration`); each item's key is the last segment of its target URL
//! attribute.

use dq::{Document, Element};

/// Highlighter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavConfig {
    /// Index into `path.split('/')` holding the page key
    pub segment_index: usize,
    /// Key used when the path has no such segment. An empty segment
    /// (`/docs/`) is kept as the empty key.
    pub default_key: String,
    /// Selector for navigation items
    pub item_selector: String,
    /// Attribute holding an item's target URL
    pub target_attribute: String,
    /// Class marking the current item
    pub active_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            segment_index: 2,
            default_key: "introduction".into(),
            item_selector: "li".into(),
            target_attribute: "hx-replace-url".into(),
            active_class: "active".into(),
        }
    }
}

/// Page key of the document location
pub fn current_page_key(document: &Document, config: &NavConfig) -> String {
    document
        .path()
        .split('/')
        .nth(config.segment_index)
        .unwrap_or(config.default_key.as_str())
        .to_string()
}

/// Key of a navigation item; `None` without a target attribute
pub fn item_key(item: &Element, config: &NavConfig) -> Option<String> {
    let target = item.attr(&config.target_attribute)?;
    target.rsplit('/').next().map(str::to_string)
}

/// Highlight the item matching the document location. Returns the page key.
pub fn highlight_current_page(document: &Document, config: &NavConfig) -> dq::Result<String> {
    let key = current_page_key(document, config);
    set_highlighted_page(document, &key, config)?;
    Ok(key)
}

/// Add the active class to items whose key is `key` and remove it from all
/// others. Returns the number of active items.
pub fn set_highlighted_page(document: &Document, key: &str, config: &NavConfig) -> dq::Result<usize> {
    let items = document.select_all(&config.item_selector)?;
    let mut active = 0;
    items.each(|item, _, _| {
        if item_key(item, config).as_deref() == Some(key) {
            item.add_class(&config.active_class);
            active += 1;
        } else {
            item.rm_class(&config.active_class);
        }
    });
    tracing::debug!(key, items = items.len(), active, "highlighted navigation");
    Ok(active)
}
