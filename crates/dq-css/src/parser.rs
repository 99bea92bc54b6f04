//! Selector parser
//!
//! Splits a selector list on top-level commas, tokenizes each group into
//! compounds and combinators, then parses compounds byte by byte.

use crate::selectors::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorComponent, SelectorList, SelectorPart,
};
use crate::SelectorError;

/// Parse a selector list such as `ul > li.active, a[href^="/docs"]`
pub fn parse_selector_list(selector: &str) -> Result<SelectorList, SelectorError> {
    let groups = split_groups(selector)?;
    let mut selectors = Vec::with_capacity(groups.len());
    for group in groups {
        selectors.push(parse_complex(selector, &group)?);
    }
    tracing::trace!(selector, groups = selectors.len(), "parsed selector list");
    Ok(SelectorList { selectors })
}

fn syntax(selector: &str, reason: &str) -> SelectorError {
    SelectorError::Syntax {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

/// Tracks nesting so separators inside `[...]`, `(...)` and quotes are ignored
#[derive(Default)]
struct Nesting {
    brackets: usize,
    parens: usize,
    quote: Option<char>,
}

impl Nesting {
    /// Feed one char; returns false on an unbalanced closer
    fn feed(&mut self, ch: char) -> bool {
        if let Some(q) = self.quote {
            if ch == q {
                self.quote = None;
            }
            return true;
        }
        match ch {
            '"' | '\'' if self.brackets > 0 || self.parens > 0 => self.quote = Some(ch),
            '[' => self.brackets += 1,
            ']' => {
                if self.brackets == 0 {
                    return false;
                }
                self.brackets -= 1;
            }
            '(' => self.parens += 1,
            ')' => {
                if self.parens == 0 {
                    return false;
                }
                self.parens -= 1;
            }
            _ => {}
        }
        true
    }

    fn top_level(&self) -> bool {
        self.brackets == 0 && self.parens == 0 && self.quote.is_none()
    }

    fn balanced(&self) -> bool {
        self.top_level()
    }
}

fn split_groups(selector: &str) -> Result<Vec<String>, SelectorError> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::default();

    for ch in selector.chars() {
        if ch == ',' && nesting.top_level() {
            let trimmed = current.trim();
            if trimmed.is_empty() {
                return Err(syntax(selector, "empty selector in list"));
            }
            groups.push(trimmed.to_string());
            current.clear();
            continue;
        }
        if !nesting.feed(ch) {
            return Err(syntax(selector, "unbalanced bracket or parenthesis"));
        }
        current.push(ch);
    }

    if !nesting.balanced() {
        return Err(syntax(selector, "unterminated bracket, parenthesis or string"));
    }
    let trimmed = current.trim();
    if trimmed.is_empty() {
        return Err(syntax(selector, "empty selector"));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

#[derive(Debug, PartialEq)]
enum Token {
    Compound(String),
    Combinator(Combinator),
}

fn tokenize(selector: &str, group: &str) -> Result<Vec<Token>, SelectorError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::default();

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if !current.is_empty() {
            tokens.push(Token::Compound(std::mem::take(current)));
        }
    };

    for ch in group.chars() {
        if nesting.top_level() {
            let combinator = match ch {
                '>' => Some(Combinator::Child),
                '+' => Some(Combinator::NextSibling),
                '~' => Some(Combinator::SubsequentSibling),
                _ => None,
            };
            if let Some(combinator) = combinator {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Combinator(combinator));
                continue;
            }
            if ch.is_ascii_whitespace() {
                flush(&mut current, &mut tokens);
                continue;
            }
        }
        if !nesting.feed(ch) {
            return Err(syntax(selector, "unbalanced bracket or parenthesis"));
        }
        current.push(ch);
    }
    flush(&mut current, &mut tokens);
    Ok(tokens)
}

fn parse_complex(selector: &str, group: &str) -> Result<ComplexSelector, SelectorError> {
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut pending: Option<Combinator> = None;

    for token in tokenize(selector, group)? {
        match token {
            Token::Combinator(combinator) => {
                if pending.is_some() || parts.is_empty() {
                    return Err(syntax(selector, "misplaced combinator"));
                }
                pending = Some(combinator);
            }
            Token::Compound(text) => {
                let compound = parse_compound(selector, &text)?;
                let combinator = if parts.is_empty() {
                    None
                } else {
                    Some(pending.take().unwrap_or(Combinator::Descendant))
                };
                parts.push(SelectorPart { compound, combinator });
            }
        }
    }

    if parts.is_empty() || pending.is_some() {
        return Err(syntax(selector, "dangling combinator"));
    }
    Ok(ComplexSelector { parts })
}

fn parse_compound(selector: &str, part: &str) -> Result<CompoundSelector, SelectorError> {
    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut compound = CompoundSelector::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if i != 0 {
                    return Err(syntax(selector, "universal selector must come first"));
                }
                compound.components.push(SelectorComponent::Universal);
                i += 1;
            }
            b'#' => {
                let (id, next) = parse_ident(part, i + 1)
                    .ok_or_else(|| syntax(selector, "expected identifier after '#'"))?;
                compound.components.push(SelectorComponent::Id(id));
                i = next;
            }
            b'.' => {
                let (class, next) = parse_ident(part, i + 1)
                    .ok_or_else(|| syntax(selector, "expected identifier after '.'"))?;
                compound.components.push(SelectorComponent::Class(class));
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_attribute(selector, part, i)?;
                compound.components.push(SelectorComponent::Attribute(attr));
                i = next;
            }
            b':' => {
                let (pseudo, next) = parse_pseudo(selector, part, i)?;
                compound.components.push(SelectorComponent::PseudoClass(pseudo));
                i = next;
            }
            _ => {
                if i != 0 {
                    return Err(syntax(selector, "type selector must come first"));
                }
                let (tag, next) = parse_ident(part, i)
                    .ok_or_else(|| syntax(selector, "unexpected character"))?;
                compound
                    .components
                    .push(SelectorComponent::Type(tag.to_ascii_lowercase()));
                i = next;
            }
        }
    }

    if compound.components.is_empty() {
        return Err(syntax(selector, "empty compound selector"));
    }
    Ok(compound)
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b >= 0x80
}

fn parse_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut end = start;
    while end < bytes.len() && is_ident_char(bytes[end]) {
        end += 1;
    }
    if end == start {
        return None;
    }
    // Identifiers cannot start with a digit
    if bytes[start].is_ascii_digit() {
        return None;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn parse_attribute(
    selector: &str,
    src: &str,
    open_bracket: usize,
) -> Result<(AttributeSelector, usize), SelectorError> {
    let bytes = src.as_bytes();
    let mut i = skip_whitespace(bytes, open_bracket + 1);

    let name_start = i;
    while i < bytes.len() && (is_ident_char(bytes[i]) || bytes[i] == b':') {
        i += 1;
    }
    if name_start == i {
        return Err(syntax(selector, "expected attribute name"));
    }
    let name = src[name_start..i].to_ascii_lowercase();

    i = skip_whitespace(bytes, i);
    if bytes.get(i) == Some(&b']') {
        let attr = AttributeSelector { name, matcher: None, case_insensitive: false };
        return Ok((attr, i + 1));
    }

    let op = match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'='), _) => {
            i += 1;
            b'='
        }
        (Some(&(op @ (b'~' | b'|' | b'^' | b'$' | b'*'))), Some(b'=')) => {
            i += 2;
            op
        }
        _ => return Err(syntax(selector, "unknown attribute operator")),
    };

    i = skip_whitespace(bytes, i);
    let (value, next) = parse_attribute_value(selector, src, i)?;
    i = skip_whitespace(bytes, next);

    let mut case_insensitive = false;
    if matches!(bytes.get(i), Some(b'i' | b'I')) {
        case_insensitive = true;
        i = skip_whitespace(bytes, i + 1);
    } else if matches!(bytes.get(i), Some(b's' | b'S')) {
        i = skip_whitespace(bytes, i + 1);
    }

    if bytes.get(i) != Some(&b']') {
        return Err(syntax(selector, "expected ']'"));
    }

    let matcher = match op {
        b'=' => AttributeMatcher::Exact(value),
        b'~' => AttributeMatcher::Includes(value),
        b'|' => AttributeMatcher::DashMatch(value),
        b'^' => AttributeMatcher::Prefix(value),
        b'$' => AttributeMatcher::Suffix(value),
        _ => AttributeMatcher::Substring(value),
    };
    let attr = AttributeSelector { name, matcher: Some(matcher), case_insensitive };
    Ok((attr, i + 1))
}

fn parse_attribute_value(
    selector: &str,
    src: &str,
    start: usize,
) -> Result<(String, usize), SelectorError> {
    let bytes = src.as_bytes();
    match bytes.get(start) {
        Some(&(quote @ (b'"' | b'\''))) => {
            let body = start + 1;
            let close = bytes[body..]
                .iter()
                .position(|&b| b == quote)
                .ok_or_else(|| syntax(selector, "unterminated string"))?;
            Ok((src[body..body + close].to_string(), body + close + 1))
        }
        _ => {
            let mut end = start;
            while end < bytes.len() && is_ident_char(bytes[end]) {
                end += 1;
            }
            if end == start {
                return Err(syntax(selector, "expected attribute value"));
            }
            Ok((src[start..end].to_string(), end))
        }
    }
}

fn parse_pseudo(
    selector: &str,
    src: &str,
    colon: usize,
) -> Result<(PseudoClass, usize), SelectorError> {
    let bytes = src.as_bytes();
    if bytes.get(colon + 1) == Some(&b':') {
        return Err(syntax(selector, "pseudo-elements are not supported"));
    }
    let (name, mut i) = parse_ident(src, colon + 1)
        .ok_or_else(|| syntax(selector, "expected pseudo-class name"))?;
    let name = name.to_ascii_lowercase();

    let mut argument = None;
    if bytes.get(i) == Some(&b'(') {
        let body = i + 1;
        let mut depth = 1usize;
        let mut j = body;
        while j < bytes.len() {
            match bytes[j] {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            j += 1;
        }
        if depth != 0 {
            return Err(syntax(selector, "unterminated pseudo-class argument"));
        }
        argument = Some(src[body..j].trim());
        i = j + 1;
    }

    let nth = |arg: Option<&str>| {
        arg.and_then(NthExpression::parse)
            .ok_or_else(|| syntax(selector, "invalid An+B expression"))
    };

    let pseudo = match (name.as_str(), argument) {
        ("root", None) => PseudoClass::Root,
        ("empty", None) => PseudoClass::Empty,
        ("first-child", None) => PseudoClass::FirstChild,
        ("last-child", None) => PseudoClass::LastChild,
        ("only-child", None) => PseudoClass::OnlyChild,
        ("first-of-type", None) => PseudoClass::FirstOfType,
        ("last-of-type", None) => PseudoClass::LastOfType,
        ("only-of-type", None) => PseudoClass::OnlyOfType,
        ("nth-child", arg @ Some(_)) => PseudoClass::NthChild(nth(arg)?),
        ("nth-last-child", arg @ Some(_)) => PseudoClass::NthLastChild(nth(arg)?),
        ("nth-of-type", arg @ Some(_)) => PseudoClass::NthOfType(nth(arg)?),
        ("nth-last-of-type", arg @ Some(_)) => PseudoClass::NthLastOfType(nth(arg)?),
        ("not", Some(arg)) => {
            if arg.is_empty() || arg.bytes().any(|b| b.is_ascii_whitespace() || b == b',') {
                return Err(syntax(selector, ":not() takes a single compound selector"));
            }
            PseudoClass::Not(Box::new(parse_compound(selector, arg)?))
        }
        _ => return Err(syntax(selector, "unsupported pseudo-class")),
    };
    Ok((pseudo, i))
}
