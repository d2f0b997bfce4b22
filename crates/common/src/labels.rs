//! Resource ids and user-visible strings of the collections UI
//!
//! Both the harness's locator strategies and the application stand-in read
//! these, so a renamed string only has to change here.

pub const WORDMARK: &str = "Tabshelf";
pub const URL_BAR_HINT: &str = "Search or enter address";
pub const OPEN_TABS_HEADER: &str = "Open tabs";
pub const CLOSE_TAB: &str = "Close tab";
pub const COLLECTIONS_HEADER: &str = "Collections";
pub const NO_COLLECTIONS_HEADER: &str = "Collect the things that matter to you";
pub const BROWSER_MENU: &str = "Menu";
pub const HOME_BUTTON: &str = "Home";
pub const SAVE_TO_COLLECTION: &str = "Save to collection";
pub const SHARE: &str = "Share";
pub const SETTINGS: &str = "Settings";
pub const SELECT_COLLECTION: &str = "Select collection";
pub const ADD_NEW_COLLECTION: &str = "Add new collection";
pub const NAME_COLLECTION: &str = "Name collection";
pub const RENAME_COLLECTION: &str = "Rename collection";
pub const DELETE_COLLECTION: &str = "Delete collection";
pub const DELETE: &str = "Delete";
pub const CANCEL: &str = "Cancel";
pub const TAB_SAVED: &str = "Tab saved!";
pub const UNABLE_TO_CONNECT: &str = "Unable to connect";
pub const LOADING: &str = "Loading";

/// Accessible label of a collection row's three-dot button.
pub fn collection_menu_label(collection: &str) -> String {
    format!("Collection menu for {}", collection)
}

pub fn delete_prompt_message(collection: &str) -> String {
    format!("Are you sure you want to delete {}?", collection)
}

/// Default name offered when the `n`th collection is created.
pub fn default_collection_name(n: usize) -> String {
    format!("Collection {}", n)
}

pub mod ids {
    pub const WORDMARK: &str = "wordmark";
    pub const URL_BAR: &str = "url_bar";
    pub const TOOLBAR_EDIT_URL: &str = "toolbar_edit_url";
    pub const TAB_LIST_HEADER: &str = "tab_list_header";
    pub const TAB_ITEM: &str = "tab_item";
    pub const CLOSE_TAB_BUTTON: &str = "close_tab_button";
    pub const COLLECTIONS_HEADER: &str = "collections_header";
    pub const NO_COLLECTIONS_HEADER: &str = "no_collections_header";
    pub const COLLECTION_TITLE: &str = "collection_title";
    pub const COLLECTION_OVERFLOW: &str = "collection_overflow_button";
    pub const COLLECTION_ITEM: &str = "collection_item";
    pub const BROWSER_URL: &str = "browser_url";
    pub const BROWSER_MENU_BUTTON: &str = "browser_toolbar_menu";
    pub const BROWSER_HOME_BUTTON: &str = "browser_home_button";
    pub const PAGE_TITLE: &str = "page_title";
    pub const PAGE_CONTENT: &str = "testContent";
    pub const PAGE_ERROR: &str = "page_error";
    pub const PAGE_PROGRESS: &str = "page_progress";
    pub const MENU_SHARE: &str = "menu_share";
    pub const MENU_SETTINGS: &str = "menu_settings";
    pub const MENU_SAVE_TO_COLLECTION: &str = "menu_save_to_collection";
    pub const COLLECTION_PICKER_TITLE: &str = "collection_picker_title";
    pub const COLLECTION_PICKER_ITEM: &str = "collection_picker_item";
    pub const ADD_NEW_COLLECTION: &str = "add_new_collection";
    pub const NAME_COLLECTION_TITLE: &str = "name_collection_title";
    pub const NAME_COLLECTION_FIELD: &str = "name_collection_field";
    pub const COLLECTION_MENU_RENAME: &str = "collection_menu_rename";
    pub const COLLECTION_MENU_DELETE: &str = "collection_menu_delete";
    pub const DELETE_PROMPT_MESSAGE: &str = "delete_prompt_message";
    pub const DELETE_PROMPT_CONFIRM: &str = "delete_prompt_confirm";
    pub const DELETE_PROMPT_CANCEL: &str = "delete_prompt_cancel";
    pub const SNACKBAR_TEXT: &str = "snackbar_text";
}
