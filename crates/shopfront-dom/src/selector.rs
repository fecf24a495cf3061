//! Compound CSS selectors.
//!
//! Only the subset the storefront markup uses is supported: a single
//! compound selector made of an optional tag, `#id`, `.class` and
//! `[attr]` / `[attr=value]` parts, e.g. `input.field[required]`.
//! Combinators and pseudo-classes are rejected.

use std::fmt;
use std::str::FromStr;

use crate::SelectorError;

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Selector::default();
        let mut rest = input;

        let tag_len = rest.find(['.', '#', '[']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if tag == "*" {
                // universal selector matches any tag
            } else if is_ident(tag) {
                selector.tag = Some(tag.to_ascii_lowercase());
            } else {
                return Err(SelectorError::Unsupported(tag.to_string()));
            }
            rest = &rest[tag_len..];
        }

        while let Some(first) = rest.chars().next() {
            match first {
                '.' | '#' => {
                    let body = &rest[1..];
                    let len = body.find(['.', '#', '[']).unwrap_or(body.len());
                    let name = &body[..len];
                    if !is_ident(name) {
                        return Err(SelectorError::Unsupported(rest.to_string()));
                    }
                    if first == '.' {
                        selector.classes.push(name.to_string());
                    } else {
                        selector.id = Some(name.to_string());
                    }
                    rest = &body[len..];
                }
                '[' => {
                    let close = rest
                        .find(']')
                        .ok_or_else(|| SelectorError::Unterminated(input.to_string()))?;
                    selector.attributes.push(parse_attribute(&rest[1..close], rest)?);
                    rest = &rest[close + 1..];
                }
                _ => return Err(SelectorError::Unsupported(rest.to_string())),
            }
        }

        Ok(selector)
    }

    /// Selector matching a single class.
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            classes: vec![name.into()],
            ..Self::default()
        }
    }

    /// Selector matching a tag name.
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into().to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Selector matching presence of an attribute.
    pub fn has_attribute(name: impl Into<String>) -> Self {
        Self {
            attributes: vec![(name.into(), None)],
            ..Self::default()
        }
    }

    /// Test an element given its tag name and an attribute lookup.
    ///
    /// Classes are read from the `class` attribute.
    pub fn matches<F>(&self, tag: &str, attribute: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(expected) = &self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }

        if let Some(expected) = &self.id {
            if attribute("id").as_deref() != Some(expected.as_str()) {
                return false;
            }
        }

        if !self.classes.is_empty() {
            let class_attr = attribute("class").unwrap_or_default();
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }

        self.attributes.iter().all(|(name, value)| match value {
            None => attribute(name).is_some(),
            Some(expected) => attribute(name).as_deref() == Some(expected.as_str()),
        })
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{}", tag)?,
            None if self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty() => {
                write!(f, "*")?
            }
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for (name, value) in &self.attributes {
            match value {
                None => write!(f, "[{}]", name)?,
                Some(value) => {
                    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
                    write!(f, "[{}=\"{}\"]", name, escaped)?
                }
            }
        }
        Ok(())
    }
}

fn parse_attribute(body: &str, context: &str) -> Result<(String, Option<String>), SelectorError> {
    let (name, value) = match body.split_once('=') {
        Some((name, value)) => {
            let value = value.trim();
            let unquoted = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (name.trim(), Some(unquoted.to_string()))
        }
        None => (body.trim(), None),
    };

    if !is_ident(name) {
        return Err(SelectorError::Unsupported(context.to_string()));
    }
    Ok((name.to_string(), value))
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
