//! Semantic UI elements and the strategies that turn them into locators
//!
//! Robots never spell out a locator. They name a [`UiElement`] and the
//! session's [`LocatorStrategy`] decides how the driver should find it, so a
//! scenario runs unchanged whether elements are matched by visible text or
//! by resource id.

use std::fmt;
use std::sync::Arc;

use tabshelf_common::labels::{self, ids};
use tabshelf_common::{Locator, Role};

use crate::config::LocatorKind;

/// Every element the robots look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiElement {
    Wordmark,
    UrlBar,
    ToolbarEditField,
    OpenTabsHeader,
    CloseTabButton,
    CollectionsHeader,
    NoCollectionsHeader,
    /// Title row of the named collection on the home surface
    CollectionRow(String),
    /// Three-dot button of the named collection
    CollectionOverflow(String),
    /// Any saved tab shown under an expanded collection
    CollectionItems,
    /// Saved tab with the given title under an expanded collection
    CollectionItem(String),
    BrowserMenuButton,
    HomeButton,
    PageTitle,
    PageContent(String),
    SaveToCollectionItem,
    PickerTitle,
    PickerCollection(String),
    AddNewCollection,
    CollectionNameField,
    RenameCollectionItem,
    DeleteCollectionItem,
    DeletePromptMessage(String),
    DeleteConfirm,
    Snackbar,
    /// Free text anywhere on screen
    Label(String),
}

impl fmt::Display for UiElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiElement::Wordmark => write!(f, "wordmark"),
            UiElement::UrlBar => write!(f, "URL bar"),
            UiElement::ToolbarEditField => write!(f, "URL edit field"),
            UiElement::OpenTabsHeader => write!(f, "open tabs header"),
            UiElement::CloseTabButton => write!(f, "close tab button"),
            UiElement::CollectionsHeader => write!(f, "collections header"),
            UiElement::NoCollectionsHeader => write!(f, "no collections header"),
            UiElement::CollectionRow(name) => write!(f, "collection {:?}", name),
            UiElement::CollectionOverflow(name) => write!(f, "three-dot button of {:?}", name),
            UiElement::CollectionItems => write!(f, "collection items"),
            UiElement::CollectionItem(title) => write!(f, "collection item {:?}", title),
            UiElement::BrowserMenuButton => write!(f, "three-dot menu button"),
            UiElement::HomeButton => write!(f, "home button"),
            UiElement::PageTitle => write!(f, "page title"),
            UiElement::PageContent(content) => write!(f, "page content {:?}", content),
            UiElement::SaveToCollectionItem => write!(f, "save to collection item"),
            UiElement::PickerTitle => write!(f, "collection picker title"),
            UiElement::PickerCollection(name) => write!(f, "picker entry {:?}", name),
            UiElement::AddNewCollection => write!(f, "add new collection button"),
            UiElement::CollectionNameField => write!(f, "collection name field"),
            UiElement::RenameCollectionItem => write!(f, "rename collection item"),
            UiElement::DeleteCollectionItem => write!(f, "delete collection item"),
            UiElement::DeletePromptMessage(name) => write!(f, "delete prompt for {:?}", name),
            UiElement::DeleteConfirm => write!(f, "delete confirmation button"),
            UiElement::Snackbar => write!(f, "snackbar"),
            UiElement::Label(text) => write!(f, "text {:?}", text),
        }
    }
}

/// Maps semantic elements to driver locators
pub trait LocatorStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn locate(&self, element: &UiElement) -> Locator;
}

/// Matches elements by what the user reads.
///
/// Nodes without stable visible text (text fields, the page title, the
/// snackbar and the anonymous list of collection items) fall back to their
/// resource id or role.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLocators;

impl LocatorStrategy for TextLocators {
    fn name(&self) -> &'static str {
        "text"
    }

    fn locate(&self, element: &UiElement) -> Locator {
        match element {
            UiElement::Wordmark => Locator::text(labels::WORDMARK),
            UiElement::UrlBar => Locator::text(labels::URL_BAR_HINT),
            UiElement::ToolbarEditField => {
                Locator::id(ids::TOOLBAR_EDIT_URL).with_role(Role::TextField)
            }
            UiElement::OpenTabsHeader => Locator::text(labels::OPEN_TABS_HEADER),
            UiElement::CloseTabButton => Locator::text(labels::CLOSE_TAB),
            UiElement::CollectionsHeader => Locator::text(labels::COLLECTIONS_HEADER),
            UiElement::NoCollectionsHeader => Locator::text(labels::NO_COLLECTIONS_HEADER),
            UiElement::CollectionRow(name) => Locator::text(name.as_str()).with_role(Role::ListItem),
            UiElement::CollectionOverflow(name) => Locator::text(labels::collection_menu_label(name)),
            UiElement::CollectionItems => Locator::id(ids::COLLECTION_ITEM),
            // Saved tabs share their text with open tab rows.
            UiElement::CollectionItem(title) => {
                Locator::id(ids::COLLECTION_ITEM).with_text(title.as_str())
            }
            UiElement::BrowserMenuButton => Locator::text(labels::BROWSER_MENU),
            UiElement::HomeButton => Locator::text(labels::HOME_BUTTON),
            UiElement::PageTitle => Locator::id(ids::PAGE_TITLE),
            UiElement::PageContent(content) => Locator::text(content.as_str()),
            UiElement::SaveToCollectionItem => Locator::text(labels::SAVE_TO_COLLECTION),
            UiElement::PickerTitle => Locator::text(labels::SELECT_COLLECTION),
            UiElement::PickerCollection(name) => {
                Locator::text(name.as_str()).with_role(Role::ListItem)
            }
            UiElement::AddNewCollection => Locator::text(labels::ADD_NEW_COLLECTION),
            UiElement::CollectionNameField => {
                Locator::id(ids::NAME_COLLECTION_FIELD).with_role(Role::TextField)
            }
            // The rename dialog's title reads the same; only the menu item is tappable.
            UiElement::RenameCollectionItem => {
                Locator::text(labels::RENAME_COLLECTION).with_role(Role::MenuItem)
            }
            UiElement::DeleteCollectionItem => Locator::text(labels::DELETE_COLLECTION),
            UiElement::DeletePromptMessage(name) => {
                Locator::text(labels::delete_prompt_message(name))
            }
            UiElement::DeleteConfirm => Locator::text(labels::DELETE).with_role(Role::Button),
            UiElement::Snackbar => Locator::role(Role::Snackbar),
            UiElement::Label(text) => Locator::text(text.as_str()),
        }
    }
}

/// Matches elements by resource id, narrowing parameterised rows by text
#[derive(Debug, Default, Clone, Copy)]
pub struct IdLocators;

impl LocatorStrategy for IdLocators {
    fn name(&self) -> &'static str {
        "id"
    }

    fn locate(&self, element: &UiElement) -> Locator {
        match element {
            UiElement::Wordmark => Locator::id(ids::WORDMARK),
            UiElement::UrlBar => Locator::id(ids::URL_BAR),
            UiElement::ToolbarEditField => Locator::id(ids::TOOLBAR_EDIT_URL),
            UiElement::OpenTabsHeader => Locator::id(ids::TAB_LIST_HEADER),
            UiElement::CloseTabButton => Locator::id(ids::CLOSE_TAB_BUTTON),
            UiElement::CollectionsHeader => Locator::id(ids::COLLECTIONS_HEADER),
            UiElement::NoCollectionsHeader => Locator::id(ids::NO_COLLECTIONS_HEADER),
            UiElement::CollectionRow(name) => {
                Locator::id(ids::COLLECTION_TITLE).with_text(name.as_str())
            }
            UiElement::CollectionOverflow(name) => {
                Locator::id(ids::COLLECTION_OVERFLOW).with_text(labels::collection_menu_label(name))
            }
            UiElement::CollectionItems => Locator::id(ids::COLLECTION_ITEM),
            UiElement::CollectionItem(title) => {
                Locator::id(ids::COLLECTION_ITEM).with_text(title.as_str())
            }
            UiElement::BrowserMenuButton => Locator::id(ids::BROWSER_MENU_BUTTON),
            UiElement::HomeButton => Locator::id(ids::BROWSER_HOME_BUTTON),
            UiElement::PageTitle => Locator::id(ids::PAGE_TITLE),
            UiElement::PageContent(content) => {
                Locator::id(ids::PAGE_CONTENT).with_text(content.as_str())
            }
            UiElement::SaveToCollectionItem => Locator::id(ids::MENU_SAVE_TO_COLLECTION),
            UiElement::PickerTitle => Locator::id(ids::COLLECTION_PICKER_TITLE),
            UiElement::PickerCollection(name) => {
                Locator::id(ids::COLLECTION_PICKER_ITEM).with_text(name.as_str())
            }
            UiElement::AddNewCollection => Locator::id(ids::ADD_NEW_COLLECTION),
            UiElement::CollectionNameField => Locator::id(ids::NAME_COLLECTION_FIELD),
            UiElement::RenameCollectionItem => Locator::id(ids::COLLECTION_MENU_RENAME),
            UiElement::DeleteCollectionItem => Locator::id(ids::COLLECTION_MENU_DELETE),
            UiElement::DeletePromptMessage(name) => Locator::id(ids::DELETE_PROMPT_MESSAGE)
                .with_text(labels::delete_prompt_message(name)),
            UiElement::DeleteConfirm => Locator::id(ids::DELETE_PROMPT_CONFIRM),
            UiElement::Snackbar => Locator::id(ids::SNACKBAR_TEXT),
            UiElement::Label(text) => Locator::text(text.as_str()),
        }
    }
}

/// Strategy selected by configuration
pub fn for_kind(kind: LocatorKind) -> Arc<dyn LocatorStrategy> {
    match kind {
        LocatorKind::Text => Arc::new(TextLocators),
        LocatorKind::Id => Arc::new(IdLocators),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabshelf_common::ElementHandle;
    use test_case::test_case;

    fn handle(id: &str, text: &str, role: Role) -> ElementHandle {
        ElementHandle::new(id, Some(text.to_string()), role)
    }

    #[test_case(LocatorKind::Text ; "text strategy")]
    #[test_case(LocatorKind::Id ; "id strategy")]
    fn test_collection_row_is_specific_to_its_name(kind: LocatorKind) {
        let strategy = for_kind(kind);
        let locator = strategy.locate(&UiElement::CollectionRow("testcollection_1".into()));
        assert!(locator.matches(&handle(ids::COLLECTION_TITLE, "testcollection_1", Role::ListItem)));
        assert!(!locator.matches(&handle(ids::COLLECTION_TITLE, "testcollection_2", Role::ListItem)));
    }

    #[test_case(LocatorKind::Text ; "text strategy")]
    #[test_case(LocatorKind::Id ; "id strategy")]
    fn test_rename_item_is_not_the_dialog_title(kind: LocatorKind) {
        let locator = for_kind(kind).locate(&UiElement::RenameCollectionItem);
        assert!(locator.matches(&handle(
            ids::COLLECTION_MENU_RENAME,
            labels::RENAME_COLLECTION,
            Role::MenuItem
        )));
        assert!(!locator.matches(&handle(
            ids::NAME_COLLECTION_TITLE,
            labels::RENAME_COLLECTION,
            Role::Header
        )));
    }

    #[test_case(LocatorKind::Text ; "text strategy")]
    #[test_case(LocatorKind::Id ; "id strategy")]
    fn test_name_field_matches_whatever_was_typed(kind: LocatorKind) {
        let locator = for_kind(kind).locate(&UiElement::CollectionNameField);
        assert!(locator.matches(&handle(ids::NAME_COLLECTION_FIELD, "", Role::TextField)));
        assert!(locator.matches(&handle(
            ids::NAME_COLLECTION_FIELD,
            "renamed_collection",
            Role::TextField
        )));
    }

    #[test_case(LocatorKind::Text ; "text strategy")]
    #[test_case(LocatorKind::Id ; "id strategy")]
    fn test_collection_item_ignores_open_tab_with_same_title(kind: LocatorKind) {
        let locator = for_kind(kind).locate(&UiElement::CollectionItem("Test_Page_1".into()));
        assert!(!locator.matches(&handle(ids::TAB_ITEM, "Test_Page_1", Role::ListItem)));
        assert!(locator.matches(&handle(ids::COLLECTION_ITEM, "Test_Page_1", Role::ListItem)));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(for_kind(LocatorKind::Text).name(), "text");
        assert_eq!(for_kind(LocatorKind::Id).name(), "id");
    }
}
