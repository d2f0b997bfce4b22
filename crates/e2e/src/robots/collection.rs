//! Collection dialogs: picker, naming, collection menu, delete prompt

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use super::{transition, BrowserView, HomeScreen, Landed, Robot, ScreenKind};
use crate::error::{E2eError, E2eResult};
use crate::locators::UiElement;
use crate::session::Session;

/// Picker listing existing collections plus "Add new collection"
#[derive(Debug)]
pub struct SaveToCollectionDialog {
    session: Session,
}

impl Robot for SaveToCollectionDialog {
    const KIND: ScreenKind = ScreenKind::SaveToCollectionDialog;

    fn landmark() -> UiElement {
        UiElement::PickerTitle
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

impl SaveToCollectionDialog {
    /// Save the current tab into `name`; the dialog closes back to the tab.
    pub async fn select_existing_collection<F, Fut>(self, name: &str, verify: F) -> E2eResult<BrowserView>
    where
        F: FnOnce(BrowserView) -> Fut,
        Fut: Future<Output = E2eResult<BrowserView>>,
    {
        let entry = UiElement::PickerCollection(name.to_string());
        transition(
            self.session,
            Self::KIND,
            "select_existing_collection",
            |s| async move { s.tap(&entry).await },
            verify,
        )
        .await
    }

    pub async fn click_add_new_collection<F, Fut>(
        self,
        verify: F,
    ) -> E2eResult<CollectionNamingDialog<SaveTab>>
    where
        F: FnOnce(CollectionNamingDialog<SaveTab>) -> Fut,
        Fut: Future<Output = E2eResult<CollectionNamingDialog<SaveTab>>>,
    {
        transition(
            self.session,
            Self::KIND,
            "click_add_new_collection",
            |s| async move { s.tap(&UiElement::AddNewCollection).await },
            verify,
        )
        .await
    }
}

/// Why the naming dialog is open, and so where confirming it leads
pub trait NamingPurpose: fmt::Debug + Send + 'static {
    type Next: Robot;
}

/// Naming a new collection for the current tab
#[derive(Debug)]
pub enum SaveTab {}

/// Renaming an existing collection from the home screen
#[derive(Debug)]
pub enum Rename {}

impl NamingPurpose for SaveTab {
    type Next = BrowserView;
}

impl NamingPurpose for Rename {
    type Next = HomeScreen;
}

/// Single-field dialog for a collection name
#[derive(Debug)]
pub struct CollectionNamingDialog<P: NamingPurpose> {
    session: Session,
    purpose: PhantomData<fn() -> P>,
}

impl<P: NamingPurpose> Robot for CollectionNamingDialog<P> {
    const KIND: ScreenKind = ScreenKind::CollectionNamingDialog;

    fn landmark() -> UiElement {
        UiElement::CollectionNameField
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self {
            session,
            purpose: PhantomData,
        }
    }
}

impl<P: NamingPurpose> CollectionNamingDialog<P> {
    /// The field is pre-filled with `expected`.
    pub async fn verify_suggested_name(self, expected: &str) -> E2eResult<Self> {
        self.session
            .step(Self::KIND, "verify_suggested_name", async {
                let field = self
                    .session
                    .wait_for_element(&UiElement::CollectionNameField)
                    .await?;
                if field.text() == expected {
                    Ok(())
                } else {
                    Err(E2eError::AssertionFailed {
                        screen: Self::KIND,
                        expected: format!("{:?}", expected),
                        observed: format!("{:?}", field.text()),
                    })
                }
            })
            .await?;
        Ok(self)
    }

    /// Replace the suggested name with `name` and confirm.
    pub async fn type_collection_name<F, Fut>(self, name: &str, verify: F) -> E2eResult<P::Next>
    where
        F: FnOnce(P::Next) -> Fut,
        Fut: Future<Output = E2eResult<P::Next>>,
    {
        transition(
            self.session,
            Self::KIND,
            "type_collection_name",
            |s| async move {
                s.type_into(&UiElement::CollectionNameField, name).await?;
                s.submit(&UiElement::CollectionNameField).await
            },
            verify,
        )
        .await
    }
}

/// Overflow menu of one collection on the home screen
#[derive(Debug)]
pub struct CollectionMenu {
    session: Session,
}

impl Robot for CollectionMenu {
    const KIND: ScreenKind = ScreenKind::CollectionMenu;

    fn landmark() -> UiElement {
        UiElement::RenameCollectionItem
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

impl CollectionMenu {
    pub async fn select_rename_collection<F, Fut>(
        self,
        verify: F,
    ) -> E2eResult<CollectionNamingDialog<Rename>>
    where
        F: FnOnce(CollectionNamingDialog<Rename>) -> Fut,
        Fut: Future<Output = E2eResult<CollectionNamingDialog<Rename>>>,
    {
        transition(
            self.session,
            Self::KIND,
            "select_rename_collection",
            |s| async move { s.tap(&UiElement::RenameCollectionItem).await },
            verify,
        )
        .await
    }

    pub async fn select_delete_collection<F, Fut>(self, verify: F) -> E2eResult<DeleteCollectionPrompt>
    where
        F: FnOnce(DeleteCollectionPrompt) -> Fut,
        Fut: Future<Output = E2eResult<DeleteCollectionPrompt>>,
    {
        transition(
            self.session,
            Self::KIND,
            "select_delete_collection",
            |s| async move { s.tap(&UiElement::DeleteCollectionItem).await },
            verify,
        )
        .await
    }
}

/// Confirmation prompt shown before a collection is deleted
#[derive(Debug)]
pub struct DeleteCollectionPrompt {
    session: Session,
}

impl Robot for DeleteCollectionPrompt {
    const KIND: ScreenKind = ScreenKind::DeleteCollectionPrompt;

    fn landmark() -> UiElement {
        UiElement::DeleteConfirm
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn landed(session: Session, _: Landed) -> Self {
        Self { session }
    }
}

impl DeleteCollectionPrompt {
    pub async fn verify_prompt_names(self, collection: &str) -> E2eResult<Self> {
        let message = UiElement::DeletePromptMessage(collection.to_string());
        self.session
            .step(Self::KIND, "verify_prompt_names", async {
                self.session.wait_for_element(&message).await.map(|_| ())
            })
            .await?;
        Ok(self)
    }

    pub async fn confirm_delete_collection<F, Fut>(self, verify: F) -> E2eResult<HomeScreen>
    where
        F: FnOnce(HomeScreen) -> Fut,
        Fut: Future<Output = E2eResult<HomeScreen>>,
    {
        transition(
            self.session,
            Self::KIND,
            "confirm_delete_collection",
            |s| async move { s.tap(&UiElement::DeleteConfirm).await },
            verify,
        )
        .await
    }
}
