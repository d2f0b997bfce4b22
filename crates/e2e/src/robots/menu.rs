//! Browser three-dot menu robot

use tracing::debug;

use super::{arrive, CollectionNamingDialog, Landed, Robot, SaveTab, SaveToCollectionDialog, ScreenKind};
use crate::error::{E2eError, E2eResult};
use crate::locators::UiElement;
use crate::session::Session;
use crate::wait::{wait_for, WaitCondition};

#[derive(Debug)]
pub struct ThreeDotMenu {
    session: Session,
}

impl Robot for ThreeDotMenu {
    const KIND: ScreenKind = ScreenKind::ThreeDotMenu;

    fn landmark() -> UiElement {
        UiElement::SaveToCollectionItem
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

/// Where "Save to collection" leads.
///
/// With no collections yet the application goes straight to naming a new
/// one; otherwise it offers the existing collections first.
#[derive(Debug)]
pub enum SaveTarget {
    Picker(SaveToCollectionDialog),
    Naming(CollectionNamingDialog<SaveTab>),
}

impl SaveTarget {
    pub fn kind(&self) -> ScreenKind {
        match self {
            SaveTarget::Picker(_) => ScreenKind::SaveToCollectionDialog,
            SaveTarget::Naming(_) => ScreenKind::CollectionNamingDialog,
        }
    }

    pub fn into_picker(self) -> E2eResult<SaveToCollectionDialog> {
        match self {
            SaveTarget::Picker(dialog) => Ok(dialog),
            other => Err(E2eError::UnexpectedScreen {
                expected: ScreenKind::SaveToCollectionDialog,
                actual: other.kind(),
            }),
        }
    }

    pub fn into_naming(self) -> E2eResult<CollectionNamingDialog<SaveTab>> {
        match self {
            SaveTarget::Naming(dialog) => Ok(dialog),
            other => Err(E2eError::UnexpectedScreen {
                expected: ScreenKind::CollectionNamingDialog,
                actual: other.kind(),
            }),
        }
    }
}

impl ThreeDotMenu {
    /// Tap "Save to collection" and land on whichever dialog appears.
    pub async fn click_browser_view_save_collection_button(self) -> E2eResult<SaveTarget> {
        let session = self.session;
        session
            .step(Self::KIND, "click_browser_view_save_collection_button", async {
                session.tap(&UiElement::SaveToCollectionItem).await?;

                let condition = WaitCondition::new(
                    "collection picker or naming dialog",
                    session.wait_config(),
                );
                let s = &session;
                let shown = wait_for(&condition, || async move {
                    if s.find_now(&UiElement::PickerTitle).await?.is_some() {
                        return Ok(Some(ScreenKind::SaveToCollectionDialog));
                    }
                    if s.find_now(&UiElement::CollectionNameField).await?.is_some() {
                        return Ok(Some(ScreenKind::CollectionNamingDialog));
                    }
                    Ok(None)
                })
                .await?;
                debug!("save to collection opened the {}", shown);

                Ok(match shown {
                    ScreenKind::SaveToCollectionDialog => {
                        SaveTarget::Picker(arrive::<SaveToCollectionDialog>(session.clone()).await?)
                    }
                    _ => SaveTarget::Naming(
                        arrive::<CollectionNamingDialog<SaveTab>>(session.clone()).await?,
                    ),
                })
            })
            .await
    }
}
