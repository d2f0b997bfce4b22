//! Screen robots
//!
//! Each robot stands for one confirmed-ready screen and exposes only what is
//! valid there. Verifications take the robot by value and hand it back, so
//! they chain. Transitions consume the robot, perform one user-visible
//! action, wait for the destination's landmark, run the caller's
//! verification block against the destination and return it. A robot that
//! has been transitioned away from is gone; there is no way to act on a
//! screen that is no longer showing.
//!
//! ```text
//!  Home ──open_navigation_toolbar──▶ Toolbar ──enter_url──▶ Browser
//!   ▲  ◀──────────────open_home_screen───────────────────────┘  │
//!   │                                                  open_three_dot_menu
//!   │                                                           ▼
//!   │                          SaveTarget ◀──save_collection── ThreeDotMenu
//!   │                          │        │
//!   │                   Picker ▼        ▼ Naming<SaveTab> ──type_name──▶ Browser
//!   │                   select_existing ──▶ Browser
//!   │
//!   ├─click_collection_three_dot_button──▶ CollectionMenu
//!   │      CollectionMenu ──rename──▶ Naming<Rename> ──type_name──▶ Home
//!   │      CollectionMenu ──delete──▶ DeleteCollectionPrompt ──confirm──▶ Home
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use tracing::info;

use crate::error::E2eResult;
use crate::locators::UiElement;
use crate::session::Session;

mod browser;
mod collection;
mod home;
mod menu;
mod toolbar;

pub use browser::BrowserView;
pub use collection::{
    CollectionMenu, CollectionNamingDialog, DeleteCollectionPrompt, NamingPurpose, Rename,
    SaveTab, SaveToCollectionDialog,
};
pub use home::HomeScreen;
pub use menu::{SaveTarget, ThreeDotMenu};
pub use toolbar::NavigationToolbar;

/// The screens a scenario can be on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Home,
    Toolbar,
    Browser,
    ThreeDotMenu,
    SaveToCollectionDialog,
    CollectionNamingDialog,
    CollectionMenu,
    DeleteCollectionPrompt,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScreenKind::Home => "home screen",
            ScreenKind::Toolbar => "navigation toolbar",
            ScreenKind::Browser => "browser view",
            ScreenKind::ThreeDotMenu => "three-dot menu",
            ScreenKind::SaveToCollectionDialog => "save to collection dialog",
            ScreenKind::CollectionNamingDialog => "collection naming dialog",
            ScreenKind::CollectionMenu => "collection menu",
            ScreenKind::DeleteCollectionPrompt => "delete collection prompt",
        };
        f.write_str(name)
    }
}

mod sealed {
    /// Proof that the screen's landmark has been seen.
    ///
    /// Only this module can mint one, so robots cannot be built from
    /// outside a transition.
    pub struct Landed(pub(super) ());
}

use sealed::Landed;

/// A confirmed-ready screen
pub trait Robot: Sized + Send {
    const KIND: ScreenKind;

    /// Element whose presence means the screen is ready
    fn landmark() -> UiElement;

    fn session(&self) -> &Session;

    #[doc(hidden)]
    fn landed(session: Session, proof: Landed) -> Self;
}

/// Wait for `R`'s landmark and build `R`.
pub(crate) async fn arrive<R: Robot>(session: Session) -> E2eResult<R> {
    session
        .wait_for_element(&R::landmark())
        .await
        .map_err(|e| e.on_screen(R::KIND))?;
    Ok(R::landed(session, Landed(())))
}

/// [`arrive`], then run the caller's verification block.
pub(crate) async fn land<R, F, Fut>(session: Session, verify: F) -> E2eResult<R>
where
    R: Robot,
    F: FnOnce(R) -> Fut,
    Fut: Future<Output = E2eResult<R>>,
{
    let robot = arrive::<R>(session).await?;
    verify(robot).await
}

/// Perform `action` from screen `from`, then land on `R`.
///
/// The action and the landing are recorded as one step named `name`; the
/// verification block records its own steps.
pub(crate) async fn transition<R, A, AFut, F, Fut>(
    session: Session,
    from: ScreenKind,
    name: &str,
    action: A,
    verify: F,
) -> E2eResult<R>
where
    R: Robot,
    A: FnOnce(Session) -> AFut,
    AFut: Future<Output = E2eResult<()>>,
    F: FnOnce(R) -> Fut,
    Fut: Future<Output = E2eResult<R>>,
{
    let act = action(session.clone());
    let robot = session
        .step(from, name, async {
            act.await?;
            arrive::<R>(session.clone()).await
        })
        .await?;
    verify(robot).await
}

/// The empty verification block
pub async fn ready<R>(robot: R) -> E2eResult<R> {
    Ok(robot)
}

impl Session {
    /// Launch the application and wait for the home screen
    pub async fn launch_home(&self) -> E2eResult<HomeScreen> {
        info!("Launching application");
        self.step(ScreenKind::Home, "launch", async {
            self.driver().launch().await?;
            arrive::<HomeScreen>(self.clone()).await
        })
        .await
    }

    /// Enter the flow at the address bar
    pub async fn navigation_toolbar(&self) -> E2eResult<NavigationToolbar> {
        self.step(
            ScreenKind::Toolbar,
            "navigation_toolbar",
            arrive::<NavigationToolbar>(self.clone()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_kind_display_and_serde() {
        assert_eq!(ScreenKind::Home.to_string(), "home screen");
        assert_eq!(
            ScreenKind::DeleteCollectionPrompt.to_string(),
            "delete collection prompt"
        );
        assert_eq!(
            serde_json::to_string(&ScreenKind::SaveToCollectionDialog).unwrap(),
            "\"save_to_collection_dialog\""
        );
    }
}
