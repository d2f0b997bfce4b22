//! Home screen robot

use std::future::Future;
use tracing::debug;

use super::{transition, Landed, Robot, ScreenKind};
use super::{CollectionMenu, NavigationToolbar};
use crate::error::E2eResult;
use crate::locators::UiElement;
use crate::session::Session;

/// The home surface: tab list, collections and the address bar
#[derive(Debug)]
pub struct HomeScreen {
    session: Session,
}

impl Robot for HomeScreen {
    const KIND: ScreenKind = ScreenKind::Home;

    fn landmark() -> UiElement {
        UiElement::Wordmark
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

impl HomeScreen {
    async fn check<Fut>(self, name: &str, fut: Fut) -> E2eResult<Self>
    where
        Fut: Future<Output = E2eResult<()>>,
    {
        self.session.step(Self::KIND, name, fut).await?;
        Ok(self)
    }

    pub async fn verify_home_screen(self) -> E2eResult<Self> {
        let session = self.session.clone();
        self.check("verify_home_screen", async {
            session.wait_for_element(&UiElement::Wordmark).await?;
            session.wait_for_element(&UiElement::UrlBar).await?;
            Ok(())
        })
        .await
    }

    pub async fn verify_existing_tab_list(self) -> E2eResult<Self> {
        let session = self.session.clone();
        self.check("verify_existing_tab_list", async {
            session.wait_for_element(&UiElement::OpenTabsHeader).await?;
            Ok(())
        })
        .await
    }

    /// Passes once the named collection's row is on screen, scrolling the
    /// list when it is below the fold.
    pub async fn verify_collection_is_displayed(self, name: &str) -> E2eResult<Self> {
        let session = self.session.clone();
        self.check("verify_collection_is_displayed", async {
            session
                .reveal(&UiElement::CollectionRow(name.to_string()))
                .await?;
            Ok(())
        })
        .await
    }

    pub async fn verify_collection_is_not_displayed(self, name: &str) -> E2eResult<Self> {
        let session = self.session.clone();
        self.check("verify_collection_is_not_displayed", async {
            session
                .wait_for_absent(&UiElement::CollectionRow(name.to_string()))
                .await
        })
        .await
    }

    pub async fn verify_item_in_collection_exists(self, title: &str) -> E2eResult<Self> {
        let session = self.session.clone();
        self.check("verify_item_in_collection_exists", async {
            session
                .reveal(&UiElement::CollectionItem(title.to_string()))
                .await?;
            Ok(())
        })
        .await
    }

    pub async fn verify_no_collections_header(self) -> E2eResult<Self> {
        let session = self.session.clone();
        self.check("verify_no_collections_header", async {
            session
                .wait_for_element(&UiElement::NoCollectionsHeader)
                .await?;
            Ok(())
        })
        .await
    }

    /// The address bar is part of the home surface; this confirms it is
    /// ready and hands over the toolbar robot.
    pub async fn open_navigation_toolbar<F, Fut>(self, verify: F) -> E2eResult<NavigationToolbar>
    where
        F: FnOnce(NavigationToolbar) -> Fut,
        Fut: Future<Output = E2eResult<NavigationToolbar>>,
    {
        transition(
            self.session,
            Self::KIND,
            "open_navigation_toolbar",
            |_| async { Ok(()) },
            verify,
        )
        .await
    }

    /// Close the first open tab and wait for the tab list to shrink.
    pub async fn close_tab<F, Fut>(self, verify: F) -> E2eResult<HomeScreen>
    where
        F: FnOnce(HomeScreen) -> Fut,
        Fut: Future<Output = E2eResult<HomeScreen>>,
    {
        transition(
            self.session,
            Self::KIND,
            "close_tab",
            |s| async move {
                let before = s.wait_for_count_above(&UiElement::CloseTabButton, 0).await?;
                s.tap(&UiElement::CloseTabButton).await?;
                let after = s
                    .wait_for_count_below(&UiElement::CloseTabButton, before)
                    .await?;
                debug!("open tabs: {} -> {}", before, after);
                Ok(())
            },
            verify,
        )
        .await
    }

    /// Tap a collapsed collection and wait for its saved tabs to appear.
    pub async fn expand_collection<F, Fut>(self, name: &str, verify: F) -> E2eResult<HomeScreen>
    where
        F: FnOnce(HomeScreen) -> Fut,
        Fut: Future<Output = E2eResult<HomeScreen>>,
    {
        let row = UiElement::CollectionRow(name.to_string());
        transition(
            self.session,
            Self::KIND,
            "expand_collection",
            |s| async move {
                s.reveal(&row).await?;
                let before = s.count(&UiElement::CollectionItems).await?;
                s.tap(&row).await?;
                s.reveal_more(&UiElement::CollectionItems, before).await?;
                Ok(())
            },
            verify,
        )
        .await
    }

    /// Scroll the home list until `text` is on screen.
    pub async fn scroll_to_element_by_text<F, Fut>(self, text: &str, verify: F) -> E2eResult<HomeScreen>
    where
        F: FnOnce(HomeScreen) -> Fut,
        Fut: Future<Output = E2eResult<HomeScreen>>,
    {
        let target = UiElement::Label(text.to_string());
        transition(
            self.session,
            Self::KIND,
            "scroll_to_element_by_text",
            |s| async move {
                s.reveal(&target).await?;
                Ok(())
            },
            verify,
        )
        .await
    }

    pub async fn click_collection_three_dot_button<F, Fut>(
        self,
        name: &str,
        verify: F,
    ) -> E2eResult<CollectionMenu>
    where
        F: FnOnce(CollectionMenu) -> Fut,
        Fut: Future<Output = E2eResult<CollectionMenu>>,
    {
        let button = UiElement::CollectionOverflow(name.to_string());
        transition(
            self.session,
            Self::KIND,
            "click_collection_three_dot_button",
            |s| async move {
                s.reveal(&button).await?;
                s.tap(&button).await
            },
            verify,
        )
        .await
    }
}
