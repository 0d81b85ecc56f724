//! The owned session aggregate handed to window and icon units.
//!
//! Every mutation routes through [`SessionRegistry`] methods, so the session
//! is unit-testable without a rendering surface and no caller can observe a
//! half-updated window list.

use desktop_contract::{ContentCatalog, PayloadEvent, WindowKindId};

use crate::catalog;
use crate::icons;
use crate::model::{InteractionState, SessionState, WindowId};
use crate::reducer::{reduce_session, SessionAction, SessionEffect, SessionError};

/// Top-level authority over windows, focus, stacking, and desktop icons.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    state: SessionState,
    interaction: InteractionState,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    /// Creates the process-wide session with the default desktop icon layout.
    pub fn new() -> Self {
        let mut state = SessionState::default();
        state.icons = icons::initial_icons();
        Self {
            state,
            interaction: InteractionState::default(),
        }
    }

    /// Read access to the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Read access to the transient gesture state.
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Applies an action, surfacing rejections to the caller.
    pub fn apply(&mut self, action: SessionAction) -> Result<Vec<SessionEffect>, SessionError> {
        reduce_session(&mut self.state, &mut self.interaction, action)
    }

    /// Applies an action at the input-handler boundary: rejections are logged
    /// and swallowed, so every operation succeeds or no-ops.
    pub fn dispatch(&mut self, action: SessionAction) -> Vec<SessionEffect> {
        tracing::trace!(action = ?action, "dispatch");
        match reduce_session(&mut self.state, &mut self.interaction, action) {
            Ok(effects) => effects,
            Err(err) => {
                tracing::debug!(%err, "session action rejected");
                Vec::new()
            }
        }
    }

    /// Opens (or refocuses) a catalog kind.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownKind`] when the catalog does not know
    /// `kind`; session state is untouched in that case.
    pub fn open_kind(
        &mut self,
        catalog: &dyn ContentCatalog,
        kind: &WindowKindId,
    ) -> Result<Vec<SessionEffect>, SessionError> {
        let request = catalog::open_request(catalog, kind)?;
        self.apply(SessionAction::OpenWindow(request))
    }

    /// Handles an event emitted by a hosted content payload as ordinary
    /// open/close calls.
    pub fn handle_payload_event(
        &mut self,
        catalog: &dyn ContentCatalog,
        event: PayloadEvent,
    ) -> Vec<SessionEffect> {
        match event {
            PayloadEvent::OpenWindow(kind) => match catalog::open_request(catalog, &kind) {
                Ok(request) => self.dispatch(SessionAction::OpenWindow(request)),
                Err(err) => {
                    tracing::debug!(%err, kind = %kind, "payload open rejected");
                    Vec::new()
                }
            },
            PayloadEvent::CloseWindow(kind) => self.dispatch(SessionAction::CloseWindow {
                window_id: WindowId::for_kind(&kind),
            }),
        }
    }
}
