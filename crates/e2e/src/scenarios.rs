//! User journeys over the collections feature
//!
//! Each script starts from a confirmed home screen, moves only through
//! transitions and returns the robot it ends on.

use std::fmt;
use std::str::FromStr;
use tracing::info;

use tabshelf_common::labels;
use tabshelf_common::StubAsset;

use crate::error::{E2eError, E2eResult};
use crate::fixture::TestFixture;
use crate::robots::{ready, HomeScreen};

pub const FIRST_COLLECTION: &str = "testcollection_1";
pub const SECOND_COLLECTION: &str = "testcollection_2";
pub const RENAMED_COLLECTION: &str = "renamed_collection";

/// Open `asset` in a new tab and save it to a new collection `name`.
///
/// `first_collection` says whether no collection exists yet, in which case
/// saving goes straight to naming; otherwise the picker is shown and a new
/// collection is requested from it.
pub async fn create_collection_from_tab(
    home: HomeScreen,
    asset: &StubAsset,
    name: &str,
    first_collection: bool,
) -> E2eResult<HomeScreen> {
    let target = home
        .open_navigation_toolbar(ready)
        .await?
        .enter_url_and_enter_to_browser(&asset.url, move |browser| {
            browser.verify_page_content(&asset.content)
        })
        .await?
        .open_three_dot_menu(ready)
        .await?
        .click_browser_view_save_collection_button()
        .await?;

    let naming = if first_collection {
        target.into_naming()?
    } else {
        target.into_picker()?.click_add_new_collection(ready).await?
    };

    naming
        .type_collection_name(name, move |browser| {
            browser.verify_snack_bar_text(labels::TAB_SAVED)
        })
        .await?
        .open_home_screen(move |home| home.verify_collection_is_displayed(name))
        .await
}

/// Save a second page into an existing collection and check both pages are
/// listed under it.
pub async fn add_tab_to_collection(
    home: HomeScreen,
    first: &StubAsset,
    second: &StubAsset,
    name: &str,
) -> E2eResult<HomeScreen> {
    let home = create_collection_from_tab(home, first, name, true).await?;

    home.verify_existing_tab_list()
        .await?
        .close_tab(ready)
        .await?
        .open_navigation_toolbar(ready)
        .await?
        .enter_url_and_enter_to_browser(&second.url, move |browser| {
            browser.verify_page_content(&second.content)
        })
        .await?
        .open_three_dot_menu(ready)
        .await?
        .click_browser_view_save_collection_button()
        .await?
        .into_picker()?
        .select_existing_collection(name, move |browser| {
            browser.verify_snack_bar_text(labels::TAB_SAVED)
        })
        .await?
        .open_home_screen(move |home| home.verify_existing_tab_list())
        .await?
        .close_tab(ready)
        .await?
        .expand_collection(name, move |home| async move {
            home.verify_item_in_collection_exists(&first.title)
                .await?
                .verify_item_in_collection_exists(&second.title)
                .await
        })
        .await
}

pub async fn rename_collection(
    home: HomeScreen,
    asset: &StubAsset,
    from: &str,
    to: &str,
) -> E2eResult<HomeScreen> {
    create_collection_from_tab(home, asset, from, true)
        .await?
        .click_collection_three_dot_button(from, ready)
        .await?
        .select_rename_collection(move |dialog| dialog.verify_suggested_name(from))
        .await?
        .type_collection_name(to, move |home| async move {
            home.verify_collection_is_displayed(to)
                .await?
                .verify_collection_is_not_displayed(from)
                .await
        })
        .await
}

pub async fn delete_collection(
    home: HomeScreen,
    asset: &StubAsset,
    name: &str,
) -> E2eResult<HomeScreen> {
    create_collection_from_tab(home, asset, name, true)
        .await?
        .click_collection_three_dot_button(name, ready)
        .await?
        .select_delete_collection(move |prompt| prompt.verify_prompt_names(name))
        .await?
        .confirm_delete_collection(move |home| home.verify_no_collections_header())
        .await
}

/// Two collections from two tabs of the same page; the second is created
/// through the picker's "Add new collection".
pub async fn create_two_collections(
    home: HomeScreen,
    asset: &StubAsset,
    first: &str,
    second: &str,
) -> E2eResult<HomeScreen> {
    let home = create_collection_from_tab(home, asset, first, true).await?;
    create_collection_from_tab(home, asset, second, false)
        .await?
        .verify_home_screen()
        .await?
        .scroll_to_element_by_text(first, move |home| async move {
            home.verify_collection_is_displayed(first)
                .await?
                .verify_collection_is_displayed(second)
                .await
        })
        .await
}

/// The journeys the runner knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    AddTabToCollection,
    RenameCollection,
    DeleteCollection,
    CreateCollectionFromTab,
}

impl Scenario {
    pub fn all() -> [Scenario; 4] {
        [
            Scenario::AddTabToCollection,
            Scenario::RenameCollection,
            Scenario::DeleteCollection,
            Scenario::CreateCollectionFromTab,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::AddTabToCollection => "add_tab_to_collection",
            Scenario::RenameCollection => "rename_collection",
            Scenario::DeleteCollection => "delete_collection",
            Scenario::CreateCollectionFromTab => "create_collection_from_tab",
        }
    }

    /// Run the journey against a freshly set up fixture
    pub async fn run(&self, fixture: &TestFixture) -> E2eResult<()> {
        info!("Scenario {}", self.name());
        let home = fixture.launch().await?;
        let first_page = fixture.asset(1);

        match self {
            Scenario::AddTabToCollection => {
                let second_page = fixture.asset(2);
                add_tab_to_collection(home, &first_page, &second_page, FIRST_COLLECTION).await?;
            }
            Scenario::RenameCollection => {
                rename_collection(home, &first_page, FIRST_COLLECTION, RENAMED_COLLECTION).await?;
            }
            Scenario::DeleteCollection => {
                delete_collection(home, &first_page, FIRST_COLLECTION).await?;
            }
            Scenario::CreateCollectionFromTab => {
                create_two_collections(home, &first_page, FIRST_COLLECTION, SECOND_COLLECTION)
                    .await?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = E2eError;

    fn from_str(s: &str) -> E2eResult<Self> {
        let wanted = s.trim().replace('-', "_");
        Scenario::all()
            .into_iter()
            .find(|scenario| scenario.name() == wanted)
            .ok_or_else(|| E2eError::ScenarioNotFound(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("rename_collection", Scenario::RenameCollection ; "snake case")]
    #[test_case("add-tab-to-collection", Scenario::AddTabToCollection ; "kebab case")]
    #[test_case(" delete_collection ", Scenario::DeleteCollection ; "padded")]
    fn test_parse_scenario(input: &str, expected: Scenario) {
        assert_eq!(input.parse::<Scenario>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_scenario() {
        assert!(matches!(
            "share_collection".parse::<Scenario>(),
            Err(E2eError::ScenarioNotFound(_))
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for scenario in Scenario::all() {
            assert_eq!(scenario.to_string().parse::<Scenario>().unwrap(), scenario);
        }
    }
}
