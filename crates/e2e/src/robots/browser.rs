//! Browser view robot

use std::future::Future;

use super::{transition, HomeScreen, Landed, Robot, ScreenKind, ThreeDotMenu};
use crate::error::{E2eError, E2eResult};
use crate::locators::UiElement;
use crate::session::Session;

/// A loaded (or loading) tab with its toolbar
#[derive(Debug)]
pub struct BrowserView {
    session: Session,
}

impl Robot for BrowserView {
    const KIND: ScreenKind = ScreenKind::Browser;

    fn landmark() -> UiElement {
        UiElement::BrowserMenuButton
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

impl BrowserView {
    /// Wait until the page's content marker reads `content`.
    pub async fn verify_page_content(self, content: &str) -> E2eResult<Self> {
        let element = UiElement::PageContent(content.to_string());
        self.session
            .step(Self::KIND, "verify_page_content", async {
                self.session.wait_for_element(&element).await.map(|_| ())
            })
            .await?;
        Ok(self)
    }

    pub async fn verify_page_title(self, title: &str) -> E2eResult<Self> {
        self.session
            .step(Self::KIND, "verify_page_title", async {
                let shown = self.session.wait_for_element(&UiElement::PageTitle).await?;
                expect_text(title, shown.text())
            })
            .await?;
        Ok(self)
    }

    /// The first snackbar to show must read `text`.
    pub async fn verify_snack_bar_text(self, text: &str) -> E2eResult<Self> {
        self.session
            .step(Self::KIND, "verify_snack_bar_text", async {
                let shown = self.session.wait_for_element(&UiElement::Snackbar).await?;
                expect_text(text, shown.text())
            })
            .await?;
        Ok(self)
    }

    pub async fn open_three_dot_menu<F, Fut>(self, verify: F) -> E2eResult<ThreeDotMenu>
    where
        F: FnOnce(ThreeDotMenu) -> Fut,
        Fut: Future<Output = E2eResult<ThreeDotMenu>>,
    {
        transition(
            self.session,
            Self::KIND,
            "open_three_dot_menu",
            |s| async move { s.tap(&UiElement::BrowserMenuButton).await },
            verify,
        )
        .await
    }

    pub async fn open_home_screen<F, Fut>(self, verify: F) -> E2eResult<HomeScreen>
    where
        F: FnOnce(HomeScreen) -> Fut,
        Fut: Future<Output = E2eResult<HomeScreen>>,
    {
        transition(
            self.session,
            Self::KIND,
            "open_home_screen",
            |s| async move { s.tap(&UiElement::HomeButton).await },
            verify,
        )
        .await
    }
}

fn expect_text(expected: &str, observed: &str) -> E2eResult<()> {
    if expected == observed {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed {
            screen: ScreenKind::Browser,
            expected: format!("{:?}", expected),
            observed: format!("{:?}", observed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_text_reports_both_sides() {
        assert!(expect_text("Tab saved!", "Tab saved!").is_ok());
        let err = expect_text("Tab saved!", "Collection deleted").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed on browser view: expected \"Tab saved!\", observed \"Collection deleted\""
        );
    }
}
