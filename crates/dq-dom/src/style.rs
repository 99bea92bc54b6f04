//! Inline style declaration (CSSStyleDeclaration)
//!
//! Backs the `style` attribute. Property names are stored in their
//! hyphenated form; camelCase names are accepted on every accessor.

use std::fmt;

/// Ordered list of inline `property: value` declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    decls: Vec<(String, String)>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute value. Malformed entries are skipped.
    pub fn parse(css: &str) -> Self {
        let mut style = Self::new();
        for entry in css.split(';') {
            let Some((name, value)) = entry.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            style.set_property(name, value);
        }
        style
    }

    /// Value of `name`, or "" when not declared
    pub fn get_property(&self, name: &str) -> &str {
        let name = normalize_property_name(name);
        self.decls
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Set `name` to `value`. An empty value removes the declaration.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = normalize_property_name(name);
        let value = value.trim();
        if value.is_empty() {
            self.decls.retain(|(n, _)| *n != name);
            return;
        }
        match self.decls.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.decls.push((name, value.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.decls.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.decls.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

/// `backgroundColor` -> `background-color`, `cssFloat` -> `float`.
/// Custom properties (`--x`) keep their case.
pub(crate) fn normalize_property_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("--") {
        return name.to_string();
    }
    if name == "cssFloat" {
        return "float".to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            // WebkitTransform -> -webkit-transform
            if i > 0 || matches!(name.get(..6), Some("Webkit")) {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}
