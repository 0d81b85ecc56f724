//! Reducer actions, effect intents, and transition logic for the desktop
//! session.
//!
//! All session mutation flows through [`reduce_session`]; it is the single
//! source of truth for focus, stacking, and the taskbar toggle protocol.

use thiserror::Error;

use desktop_contract::{Point, Rect, WindowKindId};

use crate::geometry::{self, EdgeSnap};
use crate::icons;
use crate::model::{
    DragSession, IconId, InteractionState, OpenWindowRequest, ResizeEdge, ResizeSession,
    SessionState, WindowId, WindowPhase, WindowRecord, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_session`] to mutate [`SessionState`].
pub enum SessionAction {
    /// Open a window from a catalog-built request; reopening an existing id
    /// focuses it instead.
    OpenWindow(OpenWindowRequest),
    /// Close a window and release its content payload.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window, implicitly restoring it when minimized.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window to the taskbar.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Remove a window from the minimized set without changing focus.
    RestoreWindow {
        /// Window to restore.
        window_id: WindowId,
    },
    /// Taskbar toggle: branch purely on the window's current tri-state.
    ToggleWindow {
        /// Request used to open the window when it is currently closed.
        request: OpenWindowRequest,
    },
    /// Maximize to the usable area, or restore the pre-maximize geometry.
    ToggleMaximize {
        /// Window to maximize or restore.
        window_id: WindowId,
        /// Current usable desktop rectangle.
        bounds: Rect,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: Point,
    },
    /// Update an in-progress window drag.
    UpdateMove {
        /// Current pointer position.
        pointer: Point,
        /// Current usable desktop rectangle.
        bounds: Rect,
    },
    /// End the active window drag.
    EndMove,
    /// End the active window drag and apply viewport edge snapping.
    EndMoveWithBounds {
        /// Current usable desktop rectangle.
        bounds: Rect,
    },
    /// Begin resizing a window from an edge or corner.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: Point,
    },
    /// Update an in-progress window resize.
    UpdateResize {
        /// Current pointer position.
        pointer: Point,
        /// Current usable desktop rectangle.
        bounds: Rect,
    },
    /// End the active window resize.
    EndResize,
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Select an icon, clearing any other selection.
    SelectIcon {
        /// Icon to select.
        icon_id: IconId,
    },
    /// Clear the icon selection (click on empty desktop).
    ClearIconSelection,
    /// Double-click an icon; suppressed when a drag just completed.
    ActivateIcon {
        /// Icon being activated.
        icon_id: IconId,
        /// Request used to open the icon's associated window.
        request: OpenWindowRequest,
    },
    /// Begin a pointer gesture on an icon.
    BeginIconDrag {
        /// Icon under the pointer.
        icon_id: IconId,
        /// Pointer position at gesture start.
        pointer: Point,
    },
    /// Update an icon gesture; becomes a drag past the movement threshold.
    UpdateIconDrag {
        /// Current pointer position.
        pointer: Point,
        /// Current usable desktop rectangle.
        bounds: Rect,
    },
    /// End an icon gesture, snapping the final position to the grid.
    EndIconDrag {
        /// Current usable desktop rectangle.
        bounds: Rect,
    },
    /// Open the icon context menu.
    OpenIconMenu {
        /// Icon that was right-clicked.
        icon_id: IconId,
        /// Pointer position for menu placement.
        position: Point,
    },
    /// Close the icon context menu.
    CloseIconMenu,
    /// Start inline rename of an icon.
    BeginIconRename {
        /// Icon being renamed.
        icon_id: IconId,
    },
    /// Commit an inline rename; empty names revert to the prior name.
    CommitIconRename {
        /// Edited name.
        name: String,
    },
    /// Cancel an inline rename (Escape).
    CancelIconRename,
    /// Store a value copy of an icon on the clipboard.
    CopyIcon {
        /// Source icon.
        icon_id: IconId,
    },
    /// Store a value copy of an icon, marking the source for removal on paste.
    CutIcon {
        /// Source icon.
        icon_id: IconId,
    },
    /// Paste the clipboard entry as a fresh icon.
    PasteIcon,
    /// Soft-delete an icon.
    DeleteIcon {
        /// Icon to delete.
        icon_id: IconId,
    },
    /// Clear every transient gesture; dispatched on unit teardown.
    ResetInteractions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted for the rendering host to execute.
pub enum SessionEffect {
    /// Move input focus into the window's content payload.
    FocusContent(WindowId),
    /// Unmount the content payload of a closed window.
    ReleaseContent(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejections for invalid actions; state is never left half-updated.
pub enum SessionError {
    /// The target window id is not open.
    #[error("window not found")]
    WindowNotFound,
    /// The target icon does not exist or was deleted.
    #[error("icon not found")]
    IconNotFound,
    /// The kind id is not in the content catalog.
    #[error("window kind `{0}` is not in the catalog")]
    UnknownKind(WindowKindId),
    /// The operation is disabled by the window's capabilities.
    #[error("operation not permitted by window capabilities")]
    CapabilityDenied,
    /// An inline rename committed an empty or whitespace-only name.
    #[error("icon name cannot be empty")]
    EmptyName,
}

/// Applies a [`SessionAction`] to the session and collects resulting effects.
///
/// # Errors
///
/// Returns a [`SessionError`] when an action references a missing window or
/// icon, or is disabled by window capabilities. Rejections happen before any
/// mutation.
pub fn reduce_session(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    action: SessionAction,
) -> Result<Vec<SessionEffect>, SessionError> {
    let mut effects = Vec::new();
    match action {
        SessionAction::OpenWindow(request) => {
            open_window(state, request, &mut effects)?;
        }
        SessionAction::CloseWindow { window_id } => {
            let closable = state
                .windows
                .get(&window_id)
                .ok_or(SessionError::WindowNotFound)?
                .capabilities
                .closable;
            if !closable {
                return Err(SessionError::CapabilityDenied);
            }
            state.windows.remove(&window_id);
            state.minimized_ids.remove(&window_id);
            if state.focused_window_id.as_ref() == Some(&window_id) {
                state.focused_window_id = None;
            }
            if interaction.dragging.as_ref().map(|s| &s.window_id) == Some(&window_id) {
                interaction.dragging = None;
            }
            if interaction.resizing.as_ref().map(|s| &s.window_id) == Some(&window_id) {
                interaction.resizing = None;
            }
            tracing::debug!(window = %window_id, "closed window");
            effects.push(SessionEffect::ReleaseContent(window_id));
        }
        SessionAction::FocusWindow { window_id } => {
            focus_window(state, &window_id, &mut effects)?;
            state.start_menu_open = false;
        }
        SessionAction::MinimizeWindow { window_id } => {
            minimize_window(state, &window_id)?;
        }
        SessionAction::RestoreWindow { window_id } => {
            if !state.windows.contains_key(&window_id) {
                return Err(SessionError::WindowNotFound);
            }
            state.minimized_ids.remove(&window_id);
        }
        SessionAction::ToggleWindow { request } => {
            let window_id = request.window_id();
            match state.phase(&window_id) {
                None => open_window(state, request, &mut effects)?,
                Some(WindowPhase::Minimized) | Some(WindowPhase::Unfocused) => {
                    focus_window(state, &window_id, &mut effects)?;
                }
                Some(WindowPhase::Focused) => minimize_window(state, &window_id)?,
            }
        }
        SessionAction::ToggleMaximize { window_id, bounds } => {
            let record = state
                .windows
                .get_mut(&window_id)
                .ok_or(SessionError::WindowNotFound)?;
            if !record.capabilities.maximizable {
                return Err(SessionError::CapabilityDenied);
            }
            if record.maximized {
                if let Some(prev) = record.restore_rect.take() {
                    record.rect = prev;
                }
                record.maximized = false;
            } else {
                record.restore_rect = Some(record.rect);
                record.rect = bounds.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
                record.maximized = true;
            }
            focus_window(state, &window_id, &mut effects)?;
        }
        SessionAction::BeginMove { window_id, pointer } => {
            let rect_start = state
                .windows
                .get(&window_id)
                .ok_or(SessionError::WindowNotFound)?
                .rect;
            focus_window(state, &window_id, &mut effects)?;
            interaction.dragging = Some(DragSession {
                window_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        SessionAction::UpdateMove { pointer, bounds } => {
            if let Some(session) = interaction.dragging.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let window = state
                    .windows
                    .get_mut(&session.window_id)
                    .ok_or(SessionError::WindowNotFound)?;
                if !window.maximized {
                    window.rect = geometry::clamp_rect(session.rect_start.offset(dx, dy), bounds);
                }
            }
        }
        SessionAction::EndMove => {
            interaction.dragging = None;
        }
        SessionAction::EndMoveWithBounds { bounds } => {
            let dragged = interaction.dragging.take().map(|s| s.window_id);
            if let Some(window_id) = dragged {
                snap_window_to_edge(state, &window_id, bounds);
            }
        }
        SessionAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let record = state
                .windows
                .get(&window_id)
                .ok_or(SessionError::WindowNotFound)?;
            if !record.capabilities.resizable {
                return Err(SessionError::CapabilityDenied);
            }
            let rect_start = record.rect;
            focus_window(state, &window_id, &mut effects)?;
            interaction.resizing = Some(ResizeSession {
                window_id,
                edge,
                pointer_start: pointer,
                rect_start,
            });
        }
        SessionAction::UpdateResize { pointer, bounds } => {
            if let Some(session) = interaction.resizing.as_ref() {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                let window = state
                    .windows
                    .get_mut(&session.window_id)
                    .ok_or(SessionError::WindowNotFound)?;
                if !window.maximized {
                    let min = geometry::min_window_size();
                    let resized =
                        geometry::resize_rect(session.rect_start, session.edge, dx, dy, min);
                    window.rect = geometry::clamp_resized(resized, session.edge, bounds, min);
                }
            }
        }
        SessionAction::EndResize => {
            interaction.resizing = None;
        }
        SessionAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        SessionAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        SessionAction::SelectIcon { icon_id } => {
            icons::select(state, interaction, &icon_id)?;
        }
        SessionAction::ClearIconSelection => {
            icons::clear_selection(state, interaction);
        }
        SessionAction::ActivateIcon { icon_id, request } => {
            if icons::take_activation_suppressed(interaction, &icon_id) {
                tracing::debug!(icon = %icon_id, "activation suppressed after drag");
            } else if state.icon(&icon_id).is_none() {
                return Err(SessionError::IconNotFound);
            } else {
                open_window(state, request, &mut effects)?;
            }
        }
        SessionAction::BeginIconDrag { icon_id, pointer } => {
            icons::begin_drag(state, interaction, &icon_id, pointer)?;
        }
        SessionAction::UpdateIconDrag { pointer, bounds } => {
            icons::update_drag(state, interaction, pointer, bounds)?;
        }
        SessionAction::EndIconDrag { bounds } => {
            icons::end_drag(state, interaction, bounds)?;
        }
        SessionAction::OpenIconMenu { icon_id, position } => {
            icons::open_menu(state, interaction, &icon_id, position)?;
        }
        SessionAction::CloseIconMenu => {
            interaction.icon_menu = None;
        }
        SessionAction::BeginIconRename { icon_id } => {
            icons::begin_rename(state, interaction, &icon_id)?;
        }
        SessionAction::CommitIconRename { name } => {
            icons::commit_rename(state, interaction, &name)?;
        }
        SessionAction::CancelIconRename => {
            icons::cancel_rename(interaction);
        }
        SessionAction::CopyIcon { icon_id } => {
            icons::copy_to_clipboard(
                state,
                interaction,
                &icon_id,
                crate::model::ClipboardAction::Copy,
            )?;
        }
        SessionAction::CutIcon { icon_id } => {
            icons::copy_to_clipboard(
                state,
                interaction,
                &icon_id,
                crate::model::ClipboardAction::Cut,
            )?;
        }
        SessionAction::PasteIcon => {
            icons::paste_from_clipboard(state, interaction)?;
        }
        SessionAction::DeleteIcon { icon_id } => {
            icons::delete_icon(state, interaction, &icon_id)?;
        }
        SessionAction::ResetInteractions => {
            *interaction = InteractionState::default();
        }
    }
    Ok(effects)
}

fn open_window(
    state: &mut SessionState,
    request: OpenWindowRequest,
    effects: &mut Vec<SessionEffect>,
) -> Result<(), SessionError> {
    let window_id = request.window_id();
    if state.windows.contains_key(&window_id) {
        // Idempotent reopen: one instance per kind, reopening focuses it.
        focus_window(state, &window_id, effects)?;
        state.start_menu_open = false;
        return Ok(());
    }
    let rect = request
        .rect
        .unwrap_or(Rect::new(
            48,
            48,
            DEFAULT_WINDOW_WIDTH,
            DEFAULT_WINDOW_HEIGHT,
        ))
        .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
    let title = request
        .title
        .unwrap_or_else(|| request.kind.as_str().to_string());
    let icon_id = request
        .icon_id
        .unwrap_or_else(|| request.kind.as_str().to_string());
    let record = WindowRecord {
        id: window_id.clone(),
        kind: request.kind,
        title,
        icon_id,
        content: request.content,
        rect,
        restore_rect: None,
        maximized: false,
        z_index: 0,
        opened_seq: state.next_open_seq,
        capabilities: request.capabilities,
        status_text: request.status_text,
        launch_params: request.launch_params,
    };
    state.next_open_seq += 1;
    state.windows.insert(window_id.clone(), record);
    tracing::debug!(window = %window_id, "opened window");
    focus_window(state, &window_id, effects)?;
    state.start_menu_open = false;
    Ok(())
}

/// Focuses and raises a window: implicit restore, then a fresh z-index from
/// the monotonic counter, so the focused window is topmost in O(1) without
/// renumbering the rest of the stack.
fn focus_window(
    state: &mut SessionState,
    window_id: &WindowId,
    effects: &mut Vec<SessionEffect>,
) -> Result<(), SessionError> {
    if !state.windows.contains_key(window_id) {
        return Err(SessionError::WindowNotFound);
    }
    effects.push(SessionEffect::FocusContent(window_id.clone()));
    if state.is_focused(window_id) && !state.is_minimized(window_id) {
        return Ok(());
    }
    state.minimized_ids.remove(window_id);
    state.max_z_index += 1;
    let z_index = state.max_z_index;
    if let Some(record) = state.windows.get_mut(window_id) {
        record.z_index = z_index;
    }
    state.focused_window_id = Some(window_id.clone());
    tracing::debug!(window = %window_id, z_index, "focused window");
    Ok(())
}

fn minimize_window(state: &mut SessionState, window_id: &WindowId) -> Result<(), SessionError> {
    let record = state
        .windows
        .get(window_id)
        .ok_or(SessionError::WindowNotFound)?;
    if !record.capabilities.minimizable {
        return Err(SessionError::CapabilityDenied);
    }
    state.minimized_ids.insert(window_id.clone());
    if state.focused_window_id.as_ref() == Some(window_id) {
        state.focused_window_id = None;
    }
    Ok(())
}

// Drag-release edge snap: top maximizes, left/right fill half the bounds.
fn snap_window_to_edge(state: &mut SessionState, window_id: &WindowId, bounds: Rect) {
    if state.minimized_ids.contains(window_id) {
        return;
    }
    let Some(record) = state.windows.get_mut(window_id) else {
        return;
    };
    match geometry::edge_snap_target(record.rect, bounds) {
        Some(EdgeSnap::Maximize) if record.capabilities.maximizable => {
            if !record.maximized {
                record.restore_rect = Some(record.rect);
            }
            record.rect = bounds.clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
            record.maximized = true;
        }
        Some(snap @ (EdgeSnap::LeftHalf | EdgeSnap::RightHalf))
            if record.capabilities.resizable =>
        {
            record.restore_rect = Some(record.rect);
            record.rect = geometry::half_rect(bounds, snap, geometry::min_window_size());
            record.maximized = false;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{open_request, BuiltinCatalog};
    use crate::model::{BASE_Z_INDEX, ICON_GRID};

    const BOUNDS: Rect = Rect::new(0, 0, 1280, 752);

    fn request(kind: &str) -> OpenWindowRequest {
        open_request(&BuiltinCatalog, &WindowKindId::trusted(kind)).expect("catalog kind")
    }

    fn open(state: &mut SessionState, interaction: &mut InteractionState, kind: &str) -> WindowId {
        reduce_session(state, interaction, SessionAction::OpenWindow(request(kind)))
            .expect("open window");
        WindowId::for_kind(&WindowKindId::trusted(kind))
    }

    fn toggle(state: &mut SessionState, interaction: &mut InteractionState, kind: &str) {
        reduce_session(
            state,
            interaction,
            SessionAction::ToggleWindow {
                request: request(kind),
            },
        )
        .expect("toggle window");
    }

    fn focused_count(state: &SessionState) -> usize {
        state
            .windows
            .keys()
            .filter(|id| state.phase(id) == Some(WindowPhase::Focused))
            .count()
    }

    fn session() -> (SessionState, InteractionState) {
        let mut state = SessionState::default();
        state.icons = crate::icons::initial_icons();
        (state, InteractionState::default())
    }

    #[test]
    fn open_focus_and_stacking_scenario() {
        let (mut state, mut interaction) = session();

        let calculator = open(&mut state, &mut interaction, "calculator");
        assert_eq!(state.focused_window_id, Some(calculator.clone()));
        assert_eq!(state.window(&calculator).unwrap().z_index, BASE_Z_INDEX + 1);

        let paint = open(&mut state, &mut interaction, "paint");
        assert_eq!(state.focused_window_id, Some(paint.clone()));
        assert_eq!(state.window(&paint).unwrap().z_index, BASE_Z_INDEX + 2);
        assert_eq!(state.window(&calculator).unwrap().z_index, BASE_Z_INDEX + 1);
        assert_eq!(state.phase(&calculator), Some(WindowPhase::Unfocused));

        toggle(&mut state, &mut interaction, "paint");
        assert!(state.minimized_ids.contains(&paint));
        assert_eq!(state.focused_window_id, None);

        toggle(&mut state, &mut interaction, "paint");
        assert!(state.minimized_ids.is_empty());
        assert_eq!(state.focused_window_id, Some(paint.clone()));
        assert_eq!(state.window(&paint).unwrap().z_index, BASE_Z_INDEX + 3);
    }

    #[test]
    fn at_most_one_window_is_focused_across_lifecycle_sequences() {
        let (mut state, mut interaction) = session();
        let explorer = open(&mut state, &mut interaction, "explorer");
        open(&mut state, &mut interaction, "notepad");
        open(&mut state, &mut interaction, "terminal");
        assert!(focused_count(&state) <= 1);

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::FocusWindow {
                window_id: explorer.clone(),
            },
        )
        .unwrap();
        assert!(focused_count(&state) <= 1);

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::MinimizeWindow {
                window_id: explorer.clone(),
            },
        )
        .unwrap();
        assert!(focused_count(&state) <= 1);
        assert_eq!(state.focused_window_id, None);

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::CloseWindow {
                window_id: explorer,
            },
        )
        .unwrap();
        assert!(focused_count(&state) <= 1);
    }

    #[test]
    fn focus_always_yields_the_strictly_highest_z_index() {
        let (mut state, mut interaction) = session();
        let notepad = open(&mut state, &mut interaction, "notepad");
        open(&mut state, &mut interaction, "stocks");
        open(&mut state, &mut interaction, "dictionary");

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::FocusWindow {
                window_id: notepad.clone(),
            },
        )
        .unwrap();

        let focused_z = state.window(&notepad).unwrap().z_index;
        for record in state.windows.values() {
            if record.id != notepad {
                assert!(record.z_index < focused_z);
            }
        }
    }

    #[test]
    fn toggling_twice_from_freshly_opened_returns_to_focused() {
        let (mut state, mut interaction) = session();
        let terminal = open(&mut state, &mut interaction, "terminal");
        toggle(&mut state, &mut interaction, "terminal");
        assert_eq!(state.phase(&terminal), Some(WindowPhase::Minimized));
        toggle(&mut state, &mut interaction, "terminal");
        assert_eq!(state.phase(&terminal), Some(WindowPhase::Focused));
    }

    #[test]
    fn toggle_on_an_unfocused_window_focuses_it() {
        let (mut state, mut interaction) = session();
        let notepad = open(&mut state, &mut interaction, "notepad");
        open(&mut state, &mut interaction, "paint");
        assert_eq!(state.phase(&notepad), Some(WindowPhase::Unfocused));
        toggle(&mut state, &mut interaction, "notepad");
        assert_eq!(state.phase(&notepad), Some(WindowPhase::Focused));
        assert!(state.minimized_ids.is_empty());
    }

    #[test]
    fn reopening_an_open_kind_focuses_the_existing_instance() {
        let (mut state, mut interaction) = session();
        let paint = open(&mut state, &mut interaction, "paint");
        open(&mut state, &mut interaction, "explorer");
        let effects = reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::OpenWindow(request("paint")),
        )
        .unwrap();
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.focused_window_id, Some(paint.clone()));
        assert!(effects.contains(&SessionEffect::FocusContent(paint)));
    }

    #[test]
    fn restore_removes_from_minimized_without_changing_focus() {
        let (mut state, mut interaction) = session();
        let notepad = open(&mut state, &mut interaction, "notepad");
        let stocks = open(&mut state, &mut interaction, "stocks");
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::MinimizeWindow {
                window_id: notepad.clone(),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::RestoreWindow {
                window_id: notepad.clone(),
            },
        )
        .unwrap();
        assert_eq!(state.phase(&notepad), Some(WindowPhase::Unfocused));
        assert_eq!(state.focused_window_id, Some(stocks));
    }

    #[test]
    fn close_clears_focus_and_the_minimized_entry() {
        let (mut state, mut interaction) = session();
        let terminal = open(&mut state, &mut interaction, "terminal");
        let effects = reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::CloseWindow {
                window_id: terminal.clone(),
            },
        )
        .unwrap();
        assert!(state.windows.is_empty());
        assert!(state.minimized_ids.is_empty());
        assert_eq!(state.focused_window_id, None);
        assert_eq!(effects, vec![SessionEffect::ReleaseContent(terminal)]);
    }

    #[test]
    fn minimize_is_rejected_without_the_capability() {
        let (mut state, mut interaction) = session();
        let about = open(&mut state, &mut interaction, "about");
        let before = state.clone();
        let err = reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::MinimizeWindow {
                window_id: about.clone(),
            },
        )
        .unwrap_err();
        assert_eq!(err, SessionError::CapabilityDenied);
        assert_eq!(state, before);

        let err = reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::ToggleMaximize {
                window_id: about,
                bounds: BOUNDS,
            },
        )
        .unwrap_err();
        assert_eq!(err, SessionError::CapabilityDenied);
    }

    #[test]
    fn maximize_then_restore_returns_the_exact_geometry() {
        let (mut state, mut interaction) = session();
        let notepad = open(&mut state, &mut interaction, "notepad");
        let original = state.window(&notepad).unwrap().rect;

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::ToggleMaximize {
                window_id: notepad.clone(),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        let record = state.window(&notepad).unwrap();
        assert!(record.maximized);
        assert_eq!(record.rect, BOUNDS);
        assert_eq!(record.restore_rect, Some(original));

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::ToggleMaximize {
                window_id: notepad.clone(),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        let record = state.window(&notepad).unwrap();
        assert!(!record.maximized);
        assert_eq!(record.rect, original);
        assert_eq!(record.restore_rect, None);
    }

    #[test]
    fn dragging_moves_by_pointer_delta_and_clamps_to_bounds() {
        let (mut state, mut interaction) = session();
        let paint = open(&mut state, &mut interaction, "paint");
        let original = state.window(&paint).unwrap().rect;

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginMove {
                window_id: paint.clone(),
                pointer: Point::new(300, 100),
            },
        )
        .unwrap();
        assert_eq!(state.focused_window_id, Some(paint.clone()));

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateMove {
                pointer: Point::new(325, 140),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        let moved = state.window(&paint).unwrap().rect;
        assert_eq!(moved.x, original.x + 25);
        assert_eq!(moved.y, original.y + 40);

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateMove {
                pointer: Point::new(-2000, -2000),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        let clamped = state.window(&paint).unwrap().rect;
        assert_eq!((clamped.x, clamped.y), (0, 0));

        reduce_session(&mut state, &mut interaction, SessionAction::EndMove).unwrap();
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn drag_release_near_the_top_edge_maximizes() {
        let (mut state, mut interaction) = session();
        let explorer = open(&mut state, &mut interaction, "explorer");
        let original = state.window(&explorer).unwrap().rect;

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginMove {
                window_id: explorer.clone(),
                pointer: Point::new(200, 100),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateMove {
                pointer: Point::new(260, 100 - original.y),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::EndMoveWithBounds { bounds: BOUNDS },
        )
        .unwrap();

        let record = state.window(&explorer).unwrap();
        assert!(record.maximized);
        assert_eq!(record.rect, BOUNDS);
        assert!(record.restore_rect.is_some());
        assert_eq!(interaction.dragging, None);
    }

    #[test]
    fn drag_release_near_the_left_edge_snaps_to_the_left_half() {
        let (mut state, mut interaction) = session();
        let stocks = open(&mut state, &mut interaction, "stocks");
        let original = state.window(&stocks).unwrap().rect;

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginMove {
                window_id: stocks.clone(),
                pointer: Point::new(300, 200),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateMove {
                pointer: Point::new(300 - original.x, 200 + 120),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::EndMoveWithBounds { bounds: BOUNDS },
        )
        .unwrap();

        let record = state.window(&stocks).unwrap();
        assert!(!record.maximized);
        assert_eq!(record.rect, Rect::new(0, 0, 640, 752));
        assert_eq!(record.restore_rect, Some(original.offset(-original.x, 120)));
    }

    #[test]
    fn resizing_from_every_edge_respects_the_minimum_size() {
        for edge in [
            ResizeEdge::North,
            ResizeEdge::South,
            ResizeEdge::East,
            ResizeEdge::West,
            ResizeEdge::NorthEast,
            ResizeEdge::NorthWest,
            ResizeEdge::SouthEast,
            ResizeEdge::SouthWest,
        ] {
            let (mut state, mut interaction) = session();
            let notepad = open(&mut state, &mut interaction, "notepad");
            reduce_session(
                &mut state,
                &mut interaction,
                SessionAction::BeginResize {
                    window_id: notepad.clone(),
                    edge,
                    pointer: Point::new(400, 300),
                },
            )
            .unwrap();
            reduce_session(
                &mut state,
                &mut interaction,
                SessionAction::UpdateResize {
                    pointer: Point::new(400 - 3000, 300 - 3000),
                    bounds: BOUNDS,
                },
            )
            .unwrap();
            reduce_session(
                &mut state,
                &mut interaction,
                SessionAction::UpdateResize {
                    pointer: Point::new(400 + 3000, 300 + 3000),
                    bounds: BOUNDS,
                },
            )
            .unwrap();
            let record = state.window(&notepad).unwrap();
            assert!(record.rect.w >= MIN_WINDOW_WIDTH, "{edge:?}");
            assert!(record.rect.h >= MIN_WINDOW_HEIGHT, "{edge:?}");
            reduce_session(&mut state, &mut interaction, SessionAction::EndResize).unwrap();
            assert_eq!(interaction.resizing, None);
        }
    }

    #[test]
    fn resize_is_rejected_for_fixed_size_windows() {
        let (mut state, mut interaction) = session();
        let calculator = open(&mut state, &mut interaction, "calculator");
        let err = reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginResize {
                window_id: calculator,
                edge: ResizeEdge::SouthEast,
                pointer: Point::new(0, 0),
            },
        )
        .unwrap_err();
        assert_eq!(err, SessionError::CapabilityDenied);
        assert_eq!(interaction.resizing, None);
    }

    #[test]
    fn icon_drag_release_lands_on_the_grid_inside_bounds() {
        let (mut state, mut interaction) = session();
        let icon_id = state.icons[0].id.clone();

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconDrag {
                icon_id: icon_id.clone(),
                pointer: Point::new(30, 30),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateIconDrag {
                pointer: Point::new(5000, 5000),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::EndIconDrag { bounds: BOUNDS },
        )
        .unwrap();

        let position = state.icon(&icon_id).unwrap().position;
        assert_eq!(position.x % ICON_GRID, 0);
        assert_eq!(position.y % ICON_GRID, 0);
        assert!(position.x + crate::model::ICON_CELL_WIDTH <= BOUNDS.right());
        assert!(position.y + crate::model::ICON_CELL_HEIGHT <= BOUNDS.bottom());
        assert_eq!(interaction.icon_drag, None);
    }

    #[test]
    fn sub_threshold_pointer_travel_is_a_click_not_a_drag() {
        let (mut state, mut interaction) = session();
        let icon_id = state.icons[0].id.clone();
        let original = state.icon(&icon_id).unwrap().position;

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconDrag {
                icon_id: icon_id.clone(),
                pointer: Point::new(30, 30),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateIconDrag {
                pointer: Point::new(33, 32),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::EndIconDrag { bounds: BOUNDS },
        )
        .unwrap();

        assert_eq!(state.icon(&icon_id).unwrap().position, original);
        assert_eq!(state.selected_icon_id, Some(icon_id));
        assert_eq!(interaction.suppress_activation, None);
    }

    #[test]
    fn activation_is_suppressed_once_after_a_completed_drag() {
        let (mut state, mut interaction) = session();
        let icon_id = IconId::new("calculator");

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconDrag {
                icon_id: icon_id.clone(),
                pointer: Point::new(30, 30),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::UpdateIconDrag {
                pointer: Point::new(90, 90),
                bounds: BOUNDS,
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::EndIconDrag { bounds: BOUNDS },
        )
        .unwrap();

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::ActivateIcon {
                icon_id: icon_id.clone(),
                request: request("calculator"),
            },
        )
        .unwrap();
        assert!(state.windows.is_empty());

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::ActivateIcon {
                icon_id,
                request: request("calculator"),
            },
        )
        .unwrap();
        assert_eq!(state.windows.len(), 1);
    }

    #[test]
    fn copy_then_paste_keeps_the_source_icon() {
        let (mut state, mut interaction) = session();
        let source_id = IconId::new("calculator");
        let source_position = state.icon(&source_id).unwrap().position;

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::CopyIcon {
                icon_id: source_id.clone(),
            },
        )
        .unwrap();
        reduce_session(&mut state, &mut interaction, SessionAction::PasteIcon).unwrap();

        let pasted = state
            .visible_icons()
            .find(|icon| icon.name == "Calculator (Copy)")
            .expect("pasted icon");
        assert_ne!(pasted.id, source_id);
        assert_eq!(pasted.position, source_position.offset(20, 20));
        assert!(state.icon(&source_id).is_some());
        assert_eq!(state.clipboard, None);
    }

    #[test]
    fn cut_then_paste_removes_the_source_icon() {
        let (mut state, mut interaction) = session();
        let source_id = IconId::new("calculator");

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::CutIcon {
                icon_id: source_id.clone(),
            },
        )
        .unwrap();
        assert!(state.icon(&source_id).is_some());

        reduce_session(&mut state, &mut interaction, SessionAction::PasteIcon).unwrap();
        assert!(state.icon(&source_id).is_none());
        assert!(state
            .visible_icons()
            .any(|icon| icon.name == "Calculator (Copy)"));
        assert_eq!(state.clipboard, None);
    }

    #[test]
    fn rename_commits_trimmed_names_and_rejects_empty_ones() {
        let (mut state, mut interaction) = session();
        let icon_id = state.icons[0].id.clone();
        let original = state.icon(&icon_id).unwrap().name.clone();

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconRename {
                icon_id: icon_id.clone(),
            },
        )
        .unwrap();
        let err = reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::CommitIconRename {
                name: "   ".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, SessionError::EmptyName);
        assert_eq!(state.icon(&icon_id).unwrap().name, original);
        assert_eq!(interaction.renaming, None);

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconRename {
                icon_id: icon_id.clone(),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::CommitIconRename {
                name: "  My App  ".to_string(),
            },
        )
        .unwrap();
        assert_eq!(state.icon(&icon_id).unwrap().name, "My App");

        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconRename {
                icon_id: icon_id.clone(),
            },
        )
        .unwrap();
        reduce_session(&mut state, &mut interaction, SessionAction::CancelIconRename).unwrap();
        assert_eq!(state.icon(&icon_id).unwrap().name, "My App");
    }

    #[test]
    fn opening_a_window_closes_the_start_menu() {
        let (mut state, mut interaction) = session();
        reduce_session(&mut state, &mut interaction, SessionAction::ToggleStartMenu).unwrap();
        assert!(state.start_menu_open);
        open(&mut state, &mut interaction, "browser");
        assert!(!state.start_menu_open);
    }

    #[test]
    fn reset_interactions_clears_every_in_flight_gesture() {
        let (mut state, mut interaction) = session();
        let paint = open(&mut state, &mut interaction, "paint");
        let icon_id = state.icons[0].id.clone();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginMove {
                window_id: paint,
                pointer: Point::new(0, 0),
            },
        )
        .unwrap();
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::BeginIconRename { icon_id },
        )
        .unwrap();
        assert!(interaction.dragging.is_some());
        assert!(interaction.renaming.is_some());

        reduce_session(&mut state, &mut interaction, SessionAction::ResetInteractions).unwrap();
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn max_z_index_only_ever_increases() {
        let (mut state, mut interaction) = session();
        let mut last = state.max_z_index;
        for kind in ["notepad", "paint", "terminal", "notepad", "paint"] {
            toggle(&mut state, &mut interaction, kind);
            assert!(state.max_z_index >= last);
            last = state.max_z_index;
        }
    }

    #[test]
    fn taskbar_entries_keep_stable_open_order() {
        let (mut state, mut interaction) = session();
        open(&mut state, &mut interaction, "stocks");
        open(&mut state, &mut interaction, "calculator");
        open(&mut state, &mut interaction, "notepad");
        reduce_session(
            &mut state,
            &mut interaction,
            SessionAction::FocusWindow {
                window_id: WindowId::for_kind(&WindowKindId::trusted("stocks")),
            },
        )
        .unwrap();

        let entries = state.taskbar_entries();
        let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["Stocks", "Calculator", "Notepad"]);
        assert_eq!(entries[0].phase, WindowPhase::Focused);

        let stacking: Vec<&str> = state
            .stacking_order()
            .iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(stacking, vec!["Calculator", "Notepad", "Stocks"]);
    }
}
