//! Navigation toolbar robot

use std::future::Future;

use super::{transition, BrowserView, Landed, Robot, ScreenKind};
use crate::error::E2eResult;
use crate::locators::UiElement;
use crate::session::Session;

#[derive(Debug)]
pub struct NavigationToolbar {
    session: Session,
}

impl Robot for NavigationToolbar {
    const KIND: ScreenKind = ScreenKind::Toolbar;

    fn landmark() -> UiElement {
        UiElement::UrlBar
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

impl NavigationToolbar {
    /// Type `url` into the address bar and load it in a new tab.
    pub async fn enter_url_and_enter_to_browser<F, Fut>(self, url: &str, verify: F) -> E2eResult<BrowserView>
    where
        F: FnOnce(BrowserView) -> Fut,
        Fut: Future<Output = E2eResult<BrowserView>>,
    {
        transition(
            self.session,
            Self::KIND,
            "enter_url_and_enter_to_browser",
            |s| async move {
                s.tap(&UiElement::UrlBar).await?;
                s.type_into(&UiElement::ToolbarEditField, url).await?;
                s.submit(&UiElement::ToolbarEditField).await
            },
            verify,
        )
        .await
    }
}
