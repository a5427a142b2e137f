//! Selectors
//!
//! Simple selector matching: tag, `#id`, `.class`, `[attr]`,
//! `[attr=value]`, `*`, compounds of those, and comma-separated lists.
//! Enough surface for targeting a semantic element inside a container;
//! combinators are out of scope.

use crate::node::ElementData;

/// A parsed selector list
#[derive(Debug, Clone)]
pub struct Selector {
    parts: Vec<Compound>,
}

/// One compound selector: all constraints must hold
#[derive(Debug, Clone, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCheck>,
}

#[derive(Debug, Clone)]
struct AttrCheck {
    name: String,
    value: Option<String>,
}

impl Selector {
    /// Parse a selector list. Returns `None` on empty or malformed input.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = Vec::new();
        for chunk in text.split(',') {
            parts.push(Compound::parse(chunk.trim())?);
        }
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    /// Check an element against the list (any compound may match)
    pub fn matches(&self, elem: &ElementData) -> bool {
        self.parts.iter().any(|p| p.matches(elem))
    }
}

impl Compound {
    fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        let mut compound = Self::default();
        let mut chars = s.char_indices().peekable();

        // Leading tag name or universal
        if let Some(&(_, c)) = chars.peek() {
            if c == '*' {
                chars.next();
            } else if c.is_ascii_alphabetic() {
                let start = chars.peek()?.0;
                let mut end = s.len();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '-' {
                        chars.next();
                    } else {
                        end = i;
                        break;
                    }
                }
                compound.tag = Some(s[start..end].to_ascii_lowercase());
            }
        }

        while let Some((i, c)) = chars.next() {
            match c {
                '#' | '.' => {
                    let start = i + 1;
                    let mut end = s.len();
                    while let Some(&(j, c)) = chars.peek() {
                        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                            chars.next();
                        } else {
                            end = j;
                            break;
                        }
                    }
                    if start == end {
                        return None;
                    }
                    let name = s[start..end].to_string();
                    if c == '#' {
                        compound.id = Some(name);
                    } else {
                        compound.classes.push(name);
                    }
                }
                '[' => {
                    let rest = &s[i + 1..];
                    let close = rest.find(']')?;
                    let body = &rest[..close];
                    // Consume up to and including the bracket
                    while let Some((j, _)) = chars.next() {
                        if j == i + 1 + close {
                            break;
                        }
                    }
                    let check = match body.split_once('=') {
                        Some((name, value)) => AttrCheck {
                            name: name.trim().to_string(),
                            value: Some(value.trim().trim_matches(['"', '\'']).to_string()),
                        },
                        None => AttrCheck {
                            name: body.trim().to_string(),
                            value: None,
                        },
                    };
                    if check.name.is_empty() {
                        return None;
                    }
                    compound.attrs.push(check);
                }
                _ => return None,
            }
        }

        Some(compound)
    }

    fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if elem.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| elem.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match &a.value {
            Some(v) => elem.get_attr(&a.name) == Some(v.as_str()),
            None => elem.has_attr(&a.name),
        })
    }
}
