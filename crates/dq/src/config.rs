//! Document configuration

/// Per-document options
#[derive(Debug, Clone)]
pub struct Config {
    /// Tag used by the element factory when none is given
    pub default_tag: String,

    /// User agent sent by the document's JSON client
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tag: "div".into(),
            user_agent: format!("dq/{}", crate::VERSION),
        }
    }
}
