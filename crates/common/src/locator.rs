//! Element locators and handles
//!
//! A [`Locator`] is a semantic predicate over UI nodes: any combination of
//! resource id, exact text, text substring and role. Every field that is set
//! must match. An [`ElementHandle`] is a snapshot of one matched node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accessibility role of a UI node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Button,
    Text,
    TextField,
    MenuItem,
    ListItem,
    Header,
    Dialog,
    Snackbar,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Button => write!(f, "button"),
            Role::Text => write!(f, "text"),
            Role::TextField => write!(f, "text_field"),
            Role::MenuItem => write!(f, "menu_item"),
            Role::ListItem => write!(f, "list_item"),
            Role::Header => write!(f, "header"),
            Role::Dialog => write!(f, "dialog"),
            Role::Snackbar => write!(f, "snackbar"),
        }
    }
}

/// Snapshot of a single UI node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    pub resource_id: String,
    pub text: Option<String>,
    pub role: Role,
}

impl ElementHandle {
    pub fn new(resource_id: impl Into<String>, text: Option<String>, role: Role) -> Self {
        Self {
            resource_id: resource_id.into(),
            text,
            role,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Predicate used to look elements up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub text_contains: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Locator {
    /// Match by exact visible text
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Match by resource id
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Match by role alone
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn containing(mut self, fragment: impl Into<String>) -> Self {
        self.text_contains = Some(fragment.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Check whether a node satisfies every field of this locator
    pub fn matches(&self, element: &ElementHandle) -> bool {
        if let Some(id) = &self.id {
            if &element.resource_id != id {
                return false;
            }
        }
        if let Some(text) = &self.text {
            if element.text.as_deref() != Some(text.as_str()) {
                return false;
            }
        }
        if let Some(fragment) = &self.text_contains {
            if !element.text().contains(fragment.as_str()) {
                return false;
            }
        }
        if let Some(role) = self.role {
            if element.role != role {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = &self.id {
            parts.push(format!("id={:?}", id));
        }
        if let Some(text) = &self.text {
            parts.push(format!("text={:?}", text));
        }
        if let Some(fragment) = &self.text_contains {
            parts.push(format!("text~={:?}", fragment));
        }
        if let Some(role) = self.role {
            parts.push(format!("role={}", role));
        }
        if parts.is_empty() {
            write!(f, "<any>")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn row(text: &str) -> ElementHandle {
        ElementHandle::new("collection_title", Some(text.to_string()), Role::ListItem)
    }

    #[test_case(Locator::text("testcollection_1"), true ; "exact text")]
    #[test_case(Locator::text("testcollection"), false ; "prefix is not exact")]
    #[test_case(Locator::id("collection_title"), true ; "id only")]
    #[test_case(Locator::id("collection_title").with_text("testcollection_1"), true ; "id and text")]
    #[test_case(Locator::id("collection_title").with_text("other"), false ; "id with wrong text")]
    #[test_case(Locator::default().containing("collection_1"), true ; "substring")]
    #[test_case(Locator::text("testcollection_1").with_role(Role::Button), false ; "wrong role")]
    fn test_locator_matches(locator: Locator, expected: bool) {
        assert_eq!(locator.matches(&row("testcollection_1")), expected);
    }

    #[test]
    fn test_locator_display() {
        let locator = Locator::id("snackbar_text").with_text("Tab saved!");
        assert_eq!(locator.to_string(), "id=\"snackbar_text\" text=\"Tab saved!\"");
        assert_eq!(Locator::default().to_string(), "<any>");
    }

    #[test]
    fn test_handle_without_text() {
        let handle = ElementHandle::new("wordmark", None, Role::Header);
        assert_eq!(handle.text(), "");
        assert!(!Locator::text("").matches(&handle));
    }
}
