//! Selector data model
//!
//! A selector list is a set of complex selectors; each complex selector is a
//! chain of compound selectors joined by combinators.

/// Comma-separated list of complex selectors
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators, left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

/// One compound plus its relation to the part on its left
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    /// `None` for the leftmost part
    pub combinator: Option<Combinator>,
}

/// Relation between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Simple selectors that must all match one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// `#id` with nothing else
    pub fn id_only(&self) -> Option<&str> {
        match self.components.as_slice() {
            [SelectorComponent::Id(id)] => Some(id),
            _ => None,
        }
    }
}

/// One simple selector inside a compound
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// `*`
    Universal,
    /// Lowercase tag name
    Type(String),
    Id(String),
    Class(String),
    Attribute(AttributeSelector),
    PseudoClass(PseudoClass),
}

/// Pseudo-classes that depend only on tree structure
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    /// `:not(compound)`
    Not(Box<CompoundSelector>),
}

/// `An+B` argument of the `:nth-*` pseudo-classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    pub a: i32,
    pub b: i32,
}

impl NthExpression {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// `2n+1`
    pub fn odd() -> Self {
        Self::new(2, 1)
    }

    /// `2n`
    pub fn even() -> Self {
        Self::new(2, 0)
    }

    /// A single 1-based position
    pub fn index(n: i32) -> Self {
        Self::new(0, n)
    }

    /// Parse `odd`, `even`, `B`, `An`, `An+B` or `An-B`; whitespace is
    /// ignored and `A` may be `+`, `-` or omitted
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        let Some((a, b)) = s.split_once('n') else {
            return s.parse().ok().map(Self::index);
        };
        let a = match a {
            "" | "+" => 1,
            "-" => -1,
            _ => a.parse().ok()?,
        };
        let b = match b.as_bytes().first() {
            None => 0,
            Some(b'+') => b[1..].parse().ok().filter(|_| b.len() > 1)?,
            Some(b'-') if b.len() > 1 => b.parse().ok()?,
            Some(_) => return None,
        };
        Some(Self::new(a, b))
    }

    /// Whether 1-based position `n` is `A*k + B` for some `k >= 0`
    pub fn matches(&self, n: i32) -> bool {
        // Widened so extreme coefficients cannot overflow
        let offset = i64::from(n) - i64::from(self.b);
        match i64::from(self.a) {
            0 => offset == 0,
            a => offset % a == 0 && offset / a >= 0,
        }
    }
}

/// `[name]` or `[name <op> value]`, with the `i` flag folding ASCII case
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    /// Lowercase attribute name
    pub name: String,
    /// `None` for bare presence
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

/// Value test of an attribute selector, by operator
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// `=`
    Exact(String),
    /// `~=`: one of the whitespace-separated words
    Includes(String),
    /// `|=`: the value or the value followed by `-`
    DashMatch(String),
    /// `^=`
    Prefix(String),
    /// `$=`
    Suffix(String),
    /// `*=`
    Substring(String),
}

impl AttributeSelector {
    /// Test the value of the attribute on an element; `None` when absent
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, value) = match (&self.matcher, value) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(matcher), Some(value)) => (matcher, value),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_ascii_lowercase()
            } else {
                s.to_string()
            }
        };
        let value = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => value == fold(expected),
            AttributeMatcher::Includes(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && value.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                value == expected || value.starts_with(&format!("{}-", expected))
            }
            // Empty needles never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && value.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && value.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && value.contains(&fold(expected))
            }
        }
    }
}
