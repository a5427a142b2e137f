//! DOM Node
//!
//! Node structure with parent/sibling links and element data.

use crate::style::InlineStyle;
use crate::{NodeId, ShadowRootMode};

/// DOM node with arena links
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Shadow subtree root; `parent` link points at the host element
    ShadowRoot { host: NodeId, mode: ShadowRootMode },
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercase
    pub tag: String,
    /// Attributes in set order
    attrs: Vec<Attribute>,
}

/// Attribute name/value pair
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any existing value
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(idx).value)
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Iterate over attributes
    pub fn attrs(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Parsed `tabindex` attribute, if present and a well-formed integer
    pub fn tab_index(&self) -> Option<i32> {
        self.get_attr("tabindex")?.trim().parse().ok()
    }

    /// Check the `disabled` attribute (meaningful for form controls)
    pub fn disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    /// Check the `hidden` attribute
    pub fn hidden(&self) -> bool {
        self.has_attr("hidden")
    }

    /// Check `aria-hidden="true"`
    pub fn aria_hidden(&self) -> bool {
        self.get_attr("aria-hidden") == Some("true")
    }

    /// Check contenteditable ("" and "true" both enable editing)
    pub fn content_editable(&self) -> bool {
        matches!(self.get_attr("contenteditable"), Some("") | Some("true"))
    }

    /// Parsed inline `style` attribute
    pub fn inline_style(&self) -> InlineStyle {
        self.get_attr("style")
            .map(InlineStyle::parse)
            .unwrap_or_default()
    }

    /// Check the element's id attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Check membership in the space-separated `class` attribute
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_ascii_whitespace().any(|p| p == class))
            .unwrap_or(false)
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_attribute() {
        let mut elem = ElementData::new("BUTTON");
        elem.set_attr("class", "btn primary");
        elem.set_attr("id", "submit");

        assert_eq!(elem.tag, "button");
        assert_eq!(elem.get_attr("class"), Some("btn primary"));
        assert!(elem.has_class("primary"));
        assert_eq!(elem.id(), Some("submit"));
    }

    #[test]
    fn test_replace_and_remove_attribute() {
        let mut elem = ElementData::new("input");
        elem.set_attr("type", "text");
        elem.set_attr("type", "email");

        assert_eq!(elem.get_attr("type"), Some("email"));
        assert_eq!(elem.remove_attr("type"), Some("email".to_string()));
        assert!(!elem.has_attr("type"));
    }

    #[test]
    fn test_tab_index_parsing() {
        let mut elem = ElementData::new("div");
        assert_eq!(elem.tab_index(), None);

        elem.set_attr("tabindex", "3");
        assert_eq!(elem.tab_index(), Some(3));

        elem.set_attr("tabindex", " -1 ");
        assert_eq!(elem.tab_index(), Some(-1));

        elem.set_attr("tabindex", "bogus");
        assert_eq!(elem.tab_index(), None);
    }

    #[test]
    fn test_aria_hidden_and_contenteditable() {
        let mut elem = ElementData::new("div");
        assert!(!elem.aria_hidden());

        elem.set_attr("aria-hidden", "true");
        assert!(elem.aria_hidden());
        elem.set_attr("aria-hidden", "false");
        assert!(!elem.aria_hidden());

        elem.set_attr("contenteditable", "");
        assert!(elem.content_editable());
        elem.set_attr("contenteditable", "false");
        assert!(!elem.content_editable());
    }
}
