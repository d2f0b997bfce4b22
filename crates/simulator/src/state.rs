//! Application model behind the simulated UI

use serde::Serialize;
use std::time::{Duration, Instant};

use tabshelf_common::labels;

/// Top-level surface the application is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Surface {
    Home,
    ToolbarEditing,
    Browser,
}

/// What submitting the collection name field does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Naming {
    SaveTab,
    Rename(usize),
}

/// Modal layer drawn instead of the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Overlay {
    BrowserMenu,
    CollectionPicker,
    NameCollection { purpose: Naming, draft: String },
    CollectionMenu { collection: usize },
    DeletePrompt { collection: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PageLoad {
    Loading,
    Loaded { title: String, content: String },
    Failed,
}

#[derive(Debug, Clone)]
pub(crate) struct Tab {
    pub id: u64,
    pub url: String,
    pub load: PageLoad,
}

impl Tab {
    /// Label shown in tab lists and used when the tab is saved
    pub fn label(&self) -> &str {
        match &self.load {
            PageLoad::Loaded { title, .. } if !title.is_empty() => title,
            _ => &self.url,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Collection {
    pub name: String,
    pub tabs: Vec<SavedTab>,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedTab {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Snackbar {
    pub text: String,
    pub until: Instant,
}

/// Effect attached to a rendered node, run when the node is tapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeAction {
    Inert,
    OpenToolbar,
    EditToolbar,
    CloseTab(u64),
    ToggleCollection(usize),
    OpenCollectionMenu(usize),
    OpenBrowserMenu,
    GoHome,
    DismissOverlay,
    SaveToCollection,
    PickCollection(usize),
    AddNewCollection,
    EditCollectionName,
    RenameCollection(usize),
    DeleteCollection(usize),
    ConfirmDelete(usize),
}

#[derive(Debug)]
pub(crate) struct AppState {
    pub launched: bool,
    pub surface: Surface,
    pub overlay: Option<Overlay>,
    pub toolbar_draft: String,
    pub tabs: Vec<Tab>,
    pub selected_tab: Option<u64>,
    pub collections: Vec<Collection>,
    pub snackbar: Option<Snackbar>,
    pub scroll_offset: usize,
    /// Instant at which the current tree is attached
    pub settled_at: Instant,
    next_tab_id: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            launched: false,
            surface: Surface::Home,
            overlay: None,
            toolbar_draft: String::new(),
            tabs: Vec::new(),
            selected_tab: None,
            collections: Vec::new(),
            snackbar: None,
            scroll_offset: 0,
            settled_at: Instant::now(),
            next_tab_id: 1,
        }
    }

    /// Mark the tree as changed; it attaches after `delay`.
    pub fn invalidate(&mut self, delay: Duration) {
        self.settled_at = Instant::now() + delay;
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        now >= self.settled_at
    }

    pub fn launch(&mut self) {
        self.launched = true;
        self.go_home();
    }

    pub fn go_home(&mut self) {
        self.surface = Surface::Home;
        self.overlay = None;
        self.scroll_offset = 0;
    }

    pub fn selected(&self) -> Option<&Tab> {
        let id = self.selected_tab?;
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Open `url` in a new selected tab and switch to the browser surface.
    pub fn open_tab(&mut self, url: String) -> u64 {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        self.tabs.push(Tab {
            id,
            url,
            load: PageLoad::Loading,
        });
        self.selected_tab = Some(id);
        self.surface = Surface::Browser;
        self.overlay = None;
        self.toolbar_draft.clear();
        id
    }

    pub fn finish_load(&mut self, tab_id: u64, load: PageLoad) -> bool {
        match self.tabs.iter_mut().find(|t| t.id == tab_id) {
            Some(tab) => {
                tab.load = load;
                true
            }
            None => false,
        }
    }

    pub fn close_tab(&mut self, tab_id: u64) {
        self.tabs.retain(|t| t.id != tab_id);
        if self.selected_tab == Some(tab_id) {
            self.selected_tab = self.tabs.last().map(|t| t.id);
        }
    }

    fn saved_selected_tab(&self) -> Option<SavedTab> {
        self.selected().map(|tab| SavedTab {
            title: tab.label().to_string(),
            url: tab.url.clone(),
        })
    }

    fn show_snackbar(&mut self, text: &str, duration: Duration) {
        self.snackbar = Some(Snackbar {
            text: text.to_string(),
            until: Instant::now() + duration,
        });
    }

    /// Save the selected tab into a new collection named `name`.
    pub fn create_collection(&mut self, name: &str, snackbar: Duration) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(saved) = self.saved_selected_tab() else {
            return false;
        };
        self.collections.push(Collection {
            name: name.to_string(),
            tabs: vec![saved],
            expanded: false,
        });
        self.overlay = None;
        self.show_snackbar(labels::TAB_SAVED, snackbar);
        true
    }

    /// Append the selected tab to an existing collection.
    pub fn add_to_collection(&mut self, index: usize, snackbar: Duration) -> bool {
        let Some(saved) = self.saved_selected_tab() else {
            return false;
        };
        let Some(collection) = self.collections.get_mut(index) else {
            return false;
        };
        if !collection.tabs.contains(&saved) {
            collection.tabs.push(saved);
        }
        self.overlay = None;
        self.show_snackbar(labels::TAB_SAVED, snackbar);
        true
    }

    pub fn rename_collection(&mut self, index: usize, name: &str) -> bool {
        let name = name.trim();
        match self.collections.get_mut(index) {
            Some(collection) if !name.is_empty() => {
                collection.name = name.to_string();
                self.overlay = None;
                true
            }
            _ => false,
        }
    }

    pub fn delete_collection(&mut self, index: usize) {
        if index < self.collections.len() {
            self.collections.remove(index);
        }
        self.overlay = None;
    }

    pub fn active_snackbar(&self, now: Instant) -> Option<&str> {
        self.snackbar
            .as_ref()
            .filter(|s| now < s.until)
            .map(|s| s.text.as_str())
    }

    /// Run the effect of a tapped node. Returns whether the tree changed.
    pub fn apply(&mut self, action: &NodeAction, snackbar: Duration) -> bool {
        match action {
            NodeAction::Inert | NodeAction::EditToolbar | NodeAction::EditCollectionName => false,
            NodeAction::OpenToolbar => {
                self.surface = Surface::ToolbarEditing;
                self.overlay = None;
                self.toolbar_draft.clear();
                true
            }
            NodeAction::CloseTab(id) => {
                self.close_tab(*id);
                true
            }
            NodeAction::ToggleCollection(index) => match self.collections.get_mut(*index) {
                Some(collection) => {
                    collection.expanded = !collection.expanded;
                    true
                }
                None => false,
            },
            NodeAction::OpenCollectionMenu(index) => {
                self.overlay = Some(Overlay::CollectionMenu { collection: *index });
                true
            }
            NodeAction::OpenBrowserMenu => {
                self.overlay = Some(Overlay::BrowserMenu);
                true
            }
            NodeAction::GoHome => {
                self.go_home();
                true
            }
            NodeAction::DismissOverlay => {
                self.overlay = None;
                true
            }
            NodeAction::SaveToCollection => {
                self.overlay = Some(if self.collections.is_empty() {
                    Overlay::NameCollection {
                        purpose: Naming::SaveTab,
                        draft: labels::default_collection_name(1),
                    }
                } else {
                    Overlay::CollectionPicker
                });
                true
            }
            NodeAction::AddNewCollection => {
                self.overlay = Some(Overlay::NameCollection {
                    purpose: Naming::SaveTab,
                    draft: labels::default_collection_name(self.collections.len() + 1),
                });
                true
            }
            NodeAction::RenameCollection(index) => {
                let draft = self
                    .collections
                    .get(*index)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                self.overlay = Some(Overlay::NameCollection {
                    purpose: Naming::Rename(*index),
                    draft,
                });
                true
            }
            NodeAction::DeleteCollection(index) => {
                self.overlay = Some(Overlay::DeletePrompt { collection: *index });
                true
            }
            NodeAction::ConfirmDelete(index) => {
                self.delete_collection(*index);
                true
            }
            NodeAction::PickCollection(index) => self.add_to_collection(*index, snackbar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNACK: Duration = Duration::from_secs(4);

    fn state_with_loaded_tab(index: u32) -> AppState {
        let mut state = AppState::new();
        state.launch();
        let id = state.open_tab(format!("http://127.0.0.1:1/pages/generic{}.html", index));
        state.finish_load(
            id,
            PageLoad::Loaded {
                title: format!("Test_Page_{}", index),
                content: format!("Page content: {}", index),
            },
        );
        state
    }

    #[test]
    fn test_first_save_opens_naming_dialog() {
        let mut state = state_with_loaded_tab(1);
        state.apply(&NodeAction::SaveToCollection, SNACK);
        assert_eq!(
            state.overlay,
            Some(Overlay::NameCollection {
                purpose: Naming::SaveTab,
                draft: "Collection 1".to_string()
            })
        );
    }

    #[test]
    fn test_later_saves_open_picker() {
        let mut state = state_with_loaded_tab(1);
        assert!(state.create_collection("testcollection_1", SNACK));
        state.apply(&NodeAction::SaveToCollection, SNACK);
        assert_eq!(state.overlay, Some(Overlay::CollectionPicker));
    }

    #[test]
    fn test_create_collection_saves_selected_tab() {
        let mut state = state_with_loaded_tab(1);
        assert!(state.create_collection("  testcollection_1 ", SNACK));
        assert_eq!(state.collections[0].name, "testcollection_1");
        assert_eq!(state.collections[0].tabs[0].title, "Test_Page_1");
        assert_eq!(state.active_snackbar(Instant::now()), Some("Tab saved!"));
        assert!(!state.create_collection("   ", SNACK));
    }

    #[test]
    fn test_add_to_collection_skips_duplicates() {
        let mut state = state_with_loaded_tab(1);
        state.create_collection("testcollection_1", SNACK);
        assert!(state.add_to_collection(0, SNACK));
        assert_eq!(state.collections[0].tabs.len(), 1);
        assert!(!state.add_to_collection(3, SNACK));
    }

    #[test]
    fn test_close_selected_tab_moves_selection() {
        let mut state = state_with_loaded_tab(1);
        let second = state.open_tab("http://127.0.0.1:1/pages/generic2.html".into());
        state.close_tab(second);
        assert_eq!(state.selected_tab, Some(1));
        state.close_tab(1);
        assert_eq!(state.selected_tab, None);
        assert!(!state.create_collection("orphan", SNACK));
    }

    #[test]
    fn test_unloaded_tab_is_labelled_by_url() {
        let mut state = AppState::new();
        state.open_tab("http://127.0.0.1:1/pages/generic9.html".into());
        assert_eq!(state.selected().unwrap().label(), "http://127.0.0.1:1/pages/generic9.html");
    }

    #[test]
    fn test_snackbar_expires() {
        let mut state = state_with_loaded_tab(1);
        state.create_collection("testcollection_1", Duration::ZERO);
        assert_eq!(state.active_snackbar(Instant::now()), None);
    }

    #[test]
    fn test_rename_and_delete() {
        let mut state = state_with_loaded_tab(1);
        state.create_collection("testcollection_1", SNACK);
        state.apply(&NodeAction::RenameCollection(0), SNACK);
        assert!(state.rename_collection(0, "renamed_collection"));
        assert_eq!(state.collections[0].name, "renamed_collection");
        assert!(state.overlay.is_none());

        state.apply(&NodeAction::DeleteCollection(0), SNACK);
        assert_eq!(state.overlay, Some(Overlay::DeletePrompt { collection: 0 }));
        state.apply(&NodeAction::ConfirmDelete(0), SNACK);
        assert!(state.collections.is_empty());
        assert!(state.overlay.is_none());
    }
}
