//! Element property reflection
//!
//! Maps IDL property names (`className`, `htmlFor`, `tabIndex`) to what a
//! direct property write actually touches on an HTML element.

/// Where a property write lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTarget {
    /// String property reflecting a content attribute
    Attribute(&'static str),
    /// Boolean property: truthy value sets the attribute, falsy removes it
    BooleanAttribute(&'static str),
    /// `textContent` / `innerText`: replaces children with text
    TextContent,
    /// `innerHTML`: replaces children with parsed markup
    InnerHtml,
    /// No reflection; stored on the element object only
    Expando,
}

const REFLECTED: &[(&str, &str)] = &[
    ("id", "id"),
    ("className", "class"),
    ("htmlFor", "for"),
    ("title", "title"),
    ("lang", "lang"),
    ("dir", "dir"),
    ("href", "href"),
    ("src", "src"),
    ("alt", "alt"),
    ("name", "name"),
    ("type", "type"),
    ("value", "value"),
    ("placeholder", "placeholder"),
    ("role", "role"),
    ("rel", "rel"),
    ("target", "target"),
    ("action", "action"),
    ("method", "method"),
    ("tabIndex", "tabindex"),
    ("accessKey", "accesskey"),
    ("slot", "slot"),
    ("style", "style"),
];

const BOOLEAN: &[(&str, &str)] = &[
    ("hidden", "hidden"),
    ("disabled", "disabled"),
    ("checked", "checked"),
    ("selected", "selected"),
    ("required", "required"),
    ("readOnly", "readonly"),
    ("multiple", "multiple"),
    ("autofocus", "autofocus"),
];

/// Resolve an IDL property name
pub fn reflect(property: &str) -> PropertyTarget {
    match property {
        "textContent" | "innerText" => return PropertyTarget::TextContent,
        "innerHTML" => return PropertyTarget::InnerHtml,
        _ => {}
    }
    if let Some((_, attr)) = REFLECTED.iter().find(|(p, _)| *p == property) {
        return PropertyTarget::Attribute(attr);
    }
    if let Some((_, attr)) = BOOLEAN.iter().find(|(p, _)| *p == property) {
        return PropertyTarget::BooleanAttribute(attr);
    }
    PropertyTarget::Expando
}

/// String-to-boolean coercion for boolean properties
pub fn is_truthy(value: &str) -> bool {
    !value.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_class_name() {
        assert_eq!(reflect("className"), PropertyTarget::Attribute("class"));
        assert_eq!(reflect("htmlFor"), PropertyTarget::Attribute("for"));
        assert_eq!(reflect("tabIndex"), PropertyTarget::Attribute("tabindex"));
    }

    #[test]
    fn test_reflect_content_properties() {
        assert_eq!(reflect("textContent"), PropertyTarget::TextContent);
        assert_eq!(reflect("innerText"), PropertyTarget::TextContent);
        assert_eq!(reflect("innerHTML"), PropertyTarget::InnerHtml);
    }

    #[test]
    fn test_reflect_boolean_and_expando() {
        assert_eq!(reflect("hidden"), PropertyTarget::BooleanAttribute("hidden"));
        assert_eq!(reflect("class"), PropertyTarget::Expando);
        assert_eq!(reflect("dataFoo"), PropertyTarget::Expando);
        assert!(is_truthy("false"));
        assert!(!is_truthy(""));
    }
}
