//! Builds the visible UI tree from the application model

use std::time::Instant;

use tabshelf_common::labels::{self, ids};
use tabshelf_common::{ElementHandle, Role};

use crate::state::{AppState, Naming, NodeAction, Overlay, PageLoad, Surface};

/// A rendered node together with what tapping it does
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub handle: ElementHandle,
    pub action: NodeAction,
}

fn node(id: &str, text: impl Into<String>, role: Role, action: NodeAction) -> Node {
    Node {
        handle: ElementHandle::new(id, Some(text.into()), role),
        action,
    }
}

/// Whether `node` is the node a previously returned handle refers to.
///
/// Text fields are identified by id alone since typing changes their text.
pub(crate) fn same_node(node: &Node, handle: &ElementHandle) -> bool {
    node.handle.resource_id == handle.resource_id
        && node.handle.role == handle.role
        && (handle.role == Role::TextField || node.handle.text == handle.text)
}

/// Home rows in display order; each row scrolls as a unit.
pub(crate) fn home_rows(state: &AppState) -> Vec<Vec<Node>> {
    let mut rows = Vec::new();

    if !state.tabs.is_empty() {
        rows.push(vec![node(
            ids::TAB_LIST_HEADER,
            labels::OPEN_TABS_HEADER,
            Role::Header,
            NodeAction::Inert,
        )]);
        for tab in &state.tabs {
            rows.push(vec![
                node(ids::TAB_ITEM, tab.label(), Role::ListItem, NodeAction::Inert),
                node(
                    ids::CLOSE_TAB_BUTTON,
                    labels::CLOSE_TAB,
                    Role::Button,
                    NodeAction::CloseTab(tab.id),
                ),
            ]);
        }
    }

    if state.collections.is_empty() {
        rows.push(vec![node(
            ids::NO_COLLECTIONS_HEADER,
            labels::NO_COLLECTIONS_HEADER,
            Role::Header,
            NodeAction::Inert,
        )]);
        return rows;
    }

    rows.push(vec![node(
        ids::COLLECTIONS_HEADER,
        labels::COLLECTIONS_HEADER,
        Role::Header,
        NodeAction::Inert,
    )]);
    for (index, collection) in state.collections.iter().enumerate() {
        rows.push(vec![
            node(
                ids::COLLECTION_TITLE,
                collection.name.clone(),
                Role::ListItem,
                NodeAction::ToggleCollection(index),
            ),
            node(
                ids::COLLECTION_OVERFLOW,
                labels::collection_menu_label(&collection.name),
                Role::Button,
                NodeAction::OpenCollectionMenu(index),
            ),
        ]);
        if collection.expanded {
            for saved in &collection.tabs {
                rows.push(vec![node(
                    ids::COLLECTION_ITEM,
                    saved.title.clone(),
                    Role::ListItem,
                    NodeAction::Inert,
                )]);
            }
        }
    }
    rows
}

/// Largest valid scroll offset for the current home content.
pub(crate) fn max_scroll_offset(state: &AppState, viewport_rows: usize) -> usize {
    home_rows(state).len().saturating_sub(viewport_rows)
}

fn render_home(state: &AppState, viewport_rows: usize, out: &mut Vec<Node>) {
    out.push(node(ids::WORDMARK, labels::WORDMARK, Role::Header, NodeAction::Inert));
    out.push(node(
        ids::URL_BAR,
        labels::URL_BAR_HINT,
        Role::Button,
        NodeAction::OpenToolbar,
    ));
    let rows = home_rows(state);
    let offset = state.scroll_offset.min(rows.len().saturating_sub(viewport_rows));
    for row in rows.into_iter().skip(offset).take(viewport_rows) {
        out.extend(row);
    }
}

fn render_browser(state: &AppState, out: &mut Vec<Node>) {
    let Some(tab) = state.selected() else {
        return;
    };
    out.push(node(ids::BROWSER_URL, tab.url.clone(), Role::Text, NodeAction::Inert));
    out.push(node(
        ids::BROWSER_MENU_BUTTON,
        labels::BROWSER_MENU,
        Role::Button,
        NodeAction::OpenBrowserMenu,
    ));
    out.push(node(
        ids::BROWSER_HOME_BUTTON,
        labels::HOME_BUTTON,
        Role::Button,
        NodeAction::GoHome,
    ));
    match &tab.load {
        PageLoad::Loading => out.push(node(
            ids::PAGE_PROGRESS,
            labels::LOADING,
            Role::Text,
            NodeAction::Inert,
        )),
        PageLoad::Loaded { title, content } => {
            out.push(node(ids::PAGE_TITLE, title.clone(), Role::Header, NodeAction::Inert));
            out.push(node(ids::PAGE_CONTENT, content.clone(), Role::Text, NodeAction::Inert));
        }
        PageLoad::Failed => out.push(node(
            ids::PAGE_ERROR,
            labels::UNABLE_TO_CONNECT,
            Role::Text,
            NodeAction::Inert,
        )),
    }
}

fn render_overlay(state: &AppState, overlay: &Overlay, out: &mut Vec<Node>) {
    match overlay {
        Overlay::BrowserMenu => {
            out.push(node(ids::MENU_SHARE, labels::SHARE, Role::MenuItem, NodeAction::DismissOverlay));
            out.push(node(
                ids::MENU_SETTINGS,
                labels::SETTINGS,
                Role::MenuItem,
                NodeAction::DismissOverlay,
            ));
            out.push(node(
                ids::MENU_SAVE_TO_COLLECTION,
                labels::SAVE_TO_COLLECTION,
                Role::MenuItem,
                NodeAction::SaveToCollection,
            ));
        }
        Overlay::CollectionPicker => {
            out.push(node(
                ids::COLLECTION_PICKER_TITLE,
                labels::SELECT_COLLECTION,
                Role::Header,
                NodeAction::Inert,
            ));
            out.push(node(
                ids::ADD_NEW_COLLECTION,
                labels::ADD_NEW_COLLECTION,
                Role::Button,
                NodeAction::AddNewCollection,
            ));
            for (index, collection) in state.collections.iter().enumerate() {
                out.push(node(
                    ids::COLLECTION_PICKER_ITEM,
                    collection.name.clone(),
                    Role::ListItem,
                    NodeAction::PickCollection(index),
                ));
            }
        }
        Overlay::NameCollection { purpose, draft } => {
            let title = match purpose {
                Naming::SaveTab => labels::NAME_COLLECTION,
                Naming::Rename(_) => labels::RENAME_COLLECTION,
            };
            out.push(node(ids::NAME_COLLECTION_TITLE, title, Role::Header, NodeAction::Inert));
            out.push(node(
                ids::NAME_COLLECTION_FIELD,
                draft.clone(),
                Role::TextField,
                NodeAction::EditCollectionName,
            ));
        }
        Overlay::CollectionMenu { collection } => {
            out.push(node(
                ids::COLLECTION_MENU_RENAME,
                labels::RENAME_COLLECTION,
                Role::MenuItem,
                NodeAction::RenameCollection(*collection),
            ));
            out.push(node(
                ids::COLLECTION_MENU_DELETE,
                labels::DELETE_COLLECTION,
                Role::MenuItem,
                NodeAction::DeleteCollection(*collection),
            ));
        }
        Overlay::DeletePrompt { collection } => {
            let name = state
                .collections
                .get(*collection)
                .map(|c| c.name.as_str())
                .unwrap_or_default();
            out.push(node(
                ids::DELETE_PROMPT_MESSAGE,
                labels::delete_prompt_message(name),
                Role::Dialog,
                NodeAction::Inert,
            ));
            out.push(node(
                ids::DELETE_PROMPT_CONFIRM,
                labels::DELETE,
                Role::Button,
                NodeAction::ConfirmDelete(*collection),
            ));
            out.push(node(
                ids::DELETE_PROMPT_CANCEL,
                labels::CANCEL,
                Role::Button,
                NodeAction::DismissOverlay,
            ));
        }
    }
}

/// Render the tree the application shows once settled.
pub(crate) fn render(state: &AppState, viewport_rows: usize, now: Instant) -> Vec<Node> {
    let mut out = Vec::new();
    if !state.launched {
        return out;
    }

    match &state.overlay {
        Some(overlay) => render_overlay(state, overlay, &mut out),
        None => match state.surface {
            Surface::Home => render_home(state, viewport_rows, &mut out),
            Surface::ToolbarEditing => out.push(node(
                ids::TOOLBAR_EDIT_URL,
                state.toolbar_draft.clone(),
                Role::TextField,
                NodeAction::EditToolbar,
            )),
            Surface::Browser => render_browser(state, &mut out),
        },
    }

    if let Some(text) = state.active_snackbar(now) {
        out.push(node(ids::SNACKBAR_TEXT, text, Role::Snackbar, NodeAction::Inert));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tabshelf_common::Locator;

    fn texts(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(|n| n.handle.text()).collect()
    }

    fn home_with(tabs: usize, collections: &[&str]) -> AppState {
        let mut state = AppState::new();
        state.launch();
        for i in 0..tabs {
            state.open_tab(format!("http://127.0.0.1:1/pages/generic{}.html", i + 1));
        }
        for name in collections {
            state.create_collection(name, Duration::ZERO);
        }
        state.go_home();
        state
    }

    #[test]
    fn test_nothing_rendered_before_launch() {
        assert!(render(&AppState::new(), 5, Instant::now()).is_empty());
    }

    #[test]
    fn test_empty_home_shows_no_collections_header() {
        let state = home_with(0, &[]);
        let nodes = render(&state, 5, Instant::now());
        assert_eq!(
            texts(&nodes),
            vec![
                labels::WORDMARK,
                labels::URL_BAR_HINT,
                labels::NO_COLLECTIONS_HEADER
            ]
        );
    }

    #[test]
    fn test_home_viewport_hides_rows_past_the_fold() {
        let mut state = home_with(2, &["testcollection_1", "testcollection_2"]);
        let now = Instant::now();
        let visible = render(&state, 5, now);
        assert!(visible.iter().any(|n| n.handle.text() == "testcollection_1"));
        assert!(!visible.iter().any(|n| n.handle.text() == "testcollection_2"));

        state.scroll_offset = max_scroll_offset(&state, 5);
        let scrolled = render(&state, 5, now);
        assert!(scrolled.iter().any(|n| n.handle.text() == "testcollection_2"));
        // Wordmark and URL bar are pinned.
        assert_eq!(scrolled[0].handle.resource_id, ids::WORDMARK);
    }

    #[test]
    fn test_overlay_replaces_surface() {
        let mut state = home_with(1, &[]);
        state.surface = Surface::Browser;
        state.overlay = Some(Overlay::BrowserMenu);
        let nodes = render(&state, 5, Instant::now());
        let save = Locator::text(labels::SAVE_TO_COLLECTION);
        assert!(nodes.iter().any(|n| save.matches(&n.handle)));
        assert!(!nodes.iter().any(|n| n.handle.resource_id == ids::BROWSER_MENU_BUTTON));
    }

    #[test]
    fn test_text_field_identity_ignores_text() {
        let field = node(
            ids::NAME_COLLECTION_FIELD,
            "typed",
            Role::TextField,
            NodeAction::EditCollectionName,
        );
        let stale = ElementHandle::new(ids::NAME_COLLECTION_FIELD, Some("Collection 1".into()), Role::TextField);
        assert!(same_node(&field, &stale));

        let button = node(ids::CLOSE_TAB_BUTTON, labels::CLOSE_TAB, Role::Button, NodeAction::Inert);
        let other = ElementHandle::new(ids::CLOSE_TAB_BUTTON, Some("Close".into()), Role::Button);
        assert!(!same_node(&button, &other));
    }
}
