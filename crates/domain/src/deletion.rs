//! Delete confirmation state machine.
//!
//! ```text
//! Idle -> ConfirmPending(id) -> Idle            (cancel)
//!                            -> Deleting(id) -> Idle   (settled)
//! ```

use crate::error::{DomainError, DomainResult};
use crate::record::RecordId;

/// Where a deletion currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeletionState {
    /// No deletion requested.
    #[default]
    Idle,
    /// Waiting for the user to confirm removal of `id`.
    ConfirmPending(RecordId),
    /// Remote removal of `id` is in flight.
    Deleting(RecordId),
}

impl DeletionState {
    /// Asks for confirmation to delete `id`.
    ///
    /// # Errors
    ///
    /// Returns `DeletionInProgress` unless the state is `Idle`.
    pub fn request(&mut self, id: RecordId) -> DomainResult<()> {
        match self {
            Self::Idle => {
                *self = Self::ConfirmPending(id);
                Ok(())
            }
            Self::ConfirmPending(_) | Self::Deleting(_) => Err(DomainError::DeletionInProgress),
        }
    }

    /// Confirms the pending deletion and returns its target.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless a confirmation is pending.
    pub fn confirm(&mut self) -> DomainResult<RecordId> {
        match std::mem::take(self) {
            Self::ConfirmPending(id) => {
                *self = Self::Deleting(id.clone());
                Ok(id)
            }
            other => {
                *self = other;
                Err(DomainError::InvalidTransition("no deletion awaiting confirmation"))
            }
        }
    }

    /// Drops a pending confirmation. Returns true if one was pending.
    ///
    /// An in-flight deletion cannot be cancelled and is left untouched.
    pub fn cancel(&mut self) -> bool {
        if matches!(self, Self::ConfirmPending(_)) {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }

    /// Marks the in-flight deletion as settled.
    pub fn settle(&mut self) {
        if matches!(self, Self::Deleting(_)) {
            *self = Self::Idle;
        }
    }

    /// Returns true while the confirmation dialog should be open.
    #[must_use]
    pub const fn is_confirm_pending(&self) -> bool {
        matches!(self, Self::ConfirmPending(_))
    }

    /// Returns true while a remote removal is in flight.
    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        matches!(self, Self::Deleting(_))
    }

    /// Returns the record targeted by a pending or in-flight deletion.
    #[must_use]
    pub const fn target(&self) -> Option<&RecordId> {
        match self {
            Self::Idle => None,
            Self::ConfirmPending(id) | Self::Deleting(id) => Some(id),
        }
    }
}
