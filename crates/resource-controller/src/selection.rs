//! Dialog/selection coordinator.
//!
//! At most one of create, edit or delete-confirmation is active at a time. Opening a dialog
//! replaces whatever was open; there is no stacking.

use crate::entity::Resource;
use serde::Serialize;

/// Dialog mode reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogMode {
    None,
    Create,
    Edit,
    Delete,
}

/// Which entity (if any) is being created, edited or confirmed for deletion.
///
/// The active entity is carried by the variant, so `Create` can never hold one and
/// `Edit`/`ConfirmDelete` can never lack one.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    None,
    Create,
    Edit(T),
    ConfirmDelete(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T: Resource> Selection<T> {
    pub fn mode(&self) -> DialogMode {
        match self {
            Self::None => DialogMode::None,
            Self::Create => DialogMode::Create,
            Self::Edit(_) => DialogMode::Edit,
            Self::ConfirmDelete(_) => DialogMode::Delete,
        }
    }

    pub fn active_entity(&self) -> Option<&T> {
        match self {
            Self::Edit(entity) | Self::ConfirmDelete(entity) => Some(entity),
            Self::None | Self::Create => None,
        }
    }

    /// `true` while the create or edit form is shown.
    pub fn is_dialog_open(&self) -> bool {
        matches!(self, Self::Create | Self::Edit(_))
    }

    pub fn open_create(&mut self) {
        *self = Self::Create;
    }

    pub fn open_edit(&mut self, entity: T) {
        *self = Self::Edit(entity);
    }

    pub fn open_delete(&mut self, entity: T) {
        *self = Self::ConfirmDelete(entity);
    }

    pub fn close(&mut self) {
        *self = Self::None;
    }

    /// Closes the create form, or the edit form for `id`, after a successful submit.
    ///
    /// A dialog opened for another entity in the meantime stays open.
    pub fn submit_succeeded(&mut self, created: bool, id: &T::Id) {
        let closes = match self {
            Self::Create => created,
            Self::Edit(entity) => !created && entity.id() == id,
            Self::None | Self::ConfirmDelete(_) => false,
        };
        if closes {
            self.close();
        }
    }

    /// Closes the delete confirmation and hands back its target.
    pub fn take_delete_target(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Self::ConfirmDelete(entity) => Some(entity),
            other => {
                *self = other;
                None
            }
        }
    }

    /// Swaps the active entity for its refetched copy. An entity that disappeared from the
    /// collection is left as is until the dialog closes.
    pub fn refresh<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) {
        let Some(active) = self.active_entity() else {
            return;
        };
        let id = active.id().clone();
        if let Some(fresh) = items.into_iter().find(|item| item.id() == &id) {
            match self {
                Self::Edit(entity) | Self::ConfirmDelete(entity) => *entity = fresh.clone(),
                Self::None | Self::Create => {}
            }
        }
    }
}
