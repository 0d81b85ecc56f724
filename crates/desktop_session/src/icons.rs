//! Desktop icon engine: selection, threshold drag with live grid snapping,
//! inline rename, the right-click menu, and the icon clipboard.

use desktop_contract::{Point, Rect, Size, WindowKindId};

use crate::catalog;
use crate::geometry;
use crate::model::{
    ClipboardAction, IconClipboard, IconDragSession, IconId, IconKind, IconMenuState, IconRecord,
    InteractionState, RenameSession, SessionState, DRAG_THRESHOLD, ICON_CELL_HEIGHT,
    ICON_CELL_WIDTH, ICON_GRID, PASTE_OFFSET,
};
use crate::reducer::SessionError;

/// Entries of the icon right-click menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMenuEntry {
    Rename,
    Delete,
    Copy,
    Cut,
    Paste,
}

/// One context-menu row with its enablement flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconMenuItem {
    pub entry: IconMenuEntry,
    pub enabled: bool,
}

/// Builds the icon context menu; paste is enabled only while the clipboard
/// holds an entry.
pub fn menu_items(state: &SessionState) -> Vec<IconMenuItem> {
    let paste_enabled = state.clipboard.is_some();
    [
        IconMenuEntry::Rename,
        IconMenuEntry::Delete,
        IconMenuEntry::Copy,
        IconMenuEntry::Cut,
        IconMenuEntry::Paste,
    ]
    .into_iter()
    .map(|entry| IconMenuItem {
        entry,
        enabled: entry != IconMenuEntry::Paste || paste_enabled,
    })
    .collect()
}

/// Builds the initial desktop layout from the catalog's desktop shortcuts
/// plus the static folder/file shortcuts.
pub fn initial_icons() -> Vec<IconRecord> {
    let mut icons: Vec<IconRecord> = catalog::desktop_entries()
        .map(|entry| IconRecord {
            id: IconId::new(entry.kind),
            name: entry.title.to_string(),
            icon_id: entry.icon_id.to_string(),
            kind: IconKind::Application,
            position: Point::default(),
            deleted: false,
            launch: Some(WindowKindId::trusted(entry.kind)),
        })
        .collect();
    icons.push(IconRecord {
        id: IconId::new("documents"),
        name: "Documents".to_string(),
        icon_id: "folder".to_string(),
        kind: IconKind::Folder,
        position: Point::default(),
        deleted: false,
        launch: Some(WindowKindId::trusted("explorer")),
    });
    icons.push(IconRecord {
        id: IconId::new("readme"),
        name: "readme.txt".to_string(),
        icon_id: "document-text".to_string(),
        kind: IconKind::File,
        position: Point::default(),
        deleted: false,
        launch: Some(WindowKindId::trusted("notepad")),
    });
    for (index, icon) in icons.iter_mut().enumerate() {
        icon.position = default_icon_position(index);
    }
    icons
}

// Left-hand columns, seven icons per column; every slot is a grid multiple.
fn default_icon_position(index: usize) -> Point {
    let column = (index / 7) as i32;
    let row = (index % 7) as i32;
    Point::new(
        ICON_GRID + column * (ICON_CELL_WIDTH + ICON_GRID),
        ICON_GRID + row * (ICON_CELL_HEIGHT + ICON_GRID),
    )
}

fn icon_cell() -> Size {
    Size::new(ICON_CELL_WIDTH, ICON_CELL_HEIGHT)
}

fn visible_icon_mut<'a>(
    state: &'a mut SessionState,
    icon_id: &IconId,
) -> Result<&'a mut IconRecord, SessionError> {
    state
        .icons
        .iter_mut()
        .find(|icon| &icon.id == icon_id && !icon.deleted)
        .ok_or(SessionError::IconNotFound)
}

pub(crate) fn select(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    icon_id: &IconId,
) -> Result<(), SessionError> {
    if state.icon(icon_id).is_none() {
        return Err(SessionError::IconNotFound);
    }
    state.selected_icon_id = Some(icon_id.clone());
    interaction.icon_menu = None;
    Ok(())
}

pub(crate) fn clear_selection(state: &mut SessionState, interaction: &mut InteractionState) {
    state.selected_icon_id = None;
    interaction.icon_menu = None;
}

pub(crate) fn begin_drag(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    icon_id: &IconId,
    pointer: Point,
) -> Result<(), SessionError> {
    let origin = state.icon(icon_id).ok_or(SessionError::IconNotFound)?.position;
    state.selected_icon_id = Some(icon_id.clone());
    interaction.icon_menu = None;
    interaction.suppress_activation = None;
    interaction.icon_drag = Some(IconDragSession {
        icon_id: icon_id.clone(),
        pointer_start: pointer,
        origin,
        moved: false,
    });
    Ok(())
}

pub(crate) fn update_drag(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    pointer: Point,
    bounds: Rect,
) -> Result<(), SessionError> {
    let Some(session) = interaction.icon_drag.as_mut() else {
        return Ok(());
    };
    let dx = pointer.x - session.pointer_start.x;
    let dy = pointer.y - session.pointer_start.y;
    if !session.moved && dx.abs() < DRAG_THRESHOLD && dy.abs() < DRAG_THRESHOLD {
        return Ok(());
    }
    session.moved = true;
    let snapped =
        geometry::snap_icon_position(session.origin.offset(dx, dy), bounds, icon_cell(), ICON_GRID);
    let icon_id = session.icon_id.clone();
    visible_icon_mut(state, &icon_id)?.position = snapped;
    Ok(())
}

pub(crate) fn end_drag(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    bounds: Rect,
) -> Result<(), SessionError> {
    let Some(session) = interaction.icon_drag.take() else {
        return Ok(());
    };
    if !session.moved {
        return Ok(());
    }
    let icon = visible_icon_mut(state, &session.icon_id)?;
    icon.position = geometry::snap_icon_position(icon.position, bounds, icon_cell(), ICON_GRID);
    interaction.suppress_activation = Some(session.icon_id);
    Ok(())
}

/// Consumes the post-drag suppression flag for `icon_id`, returning whether
/// the pending activation should be swallowed.
pub(crate) fn take_activation_suppressed(
    interaction: &mut InteractionState,
    icon_id: &IconId,
) -> bool {
    if interaction.suppress_activation.as_ref() == Some(icon_id) {
        interaction.suppress_activation = None;
        true
    } else {
        false
    }
}

pub(crate) fn open_menu(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    icon_id: &IconId,
    position: Point,
) -> Result<(), SessionError> {
    if state.icon(icon_id).is_none() {
        return Err(SessionError::IconNotFound);
    }
    state.selected_icon_id = Some(icon_id.clone());
    interaction.icon_menu = Some(IconMenuState {
        icon_id: icon_id.clone(),
        position,
    });
    Ok(())
}

pub(crate) fn begin_rename(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    icon_id: &IconId,
) -> Result<(), SessionError> {
    let original_name = state.icon(icon_id).ok_or(SessionError::IconNotFound)?.name.clone();
    interaction.icon_menu = None;
    interaction.renaming = Some(RenameSession {
        icon_id: icon_id.clone(),
        original_name,
    });
    Ok(())
}

/// Commits an inline rename. Empty or whitespace-only names end the rename
/// and leave the prior name in place.
pub(crate) fn commit_rename(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    name: &str,
) -> Result<(), SessionError> {
    let Some(session) = interaction.renaming.take() else {
        return Ok(());
    };
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SessionError::EmptyName);
    }
    visible_icon_mut(state, &session.icon_id)?.name = trimmed.to_string();
    Ok(())
}

pub(crate) fn cancel_rename(interaction: &mut InteractionState) {
    interaction.renaming = None;
}

pub(crate) fn copy_to_clipboard(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    icon_id: &IconId,
    action: ClipboardAction,
) -> Result<(), SessionError> {
    let record = state.icon(icon_id).ok_or(SessionError::IconNotFound)?.clone();
    state.clipboard = Some(IconClipboard { record, action });
    interaction.icon_menu = None;
    Ok(())
}

/// Synthesizes a fresh icon from the clipboard entry; a pasted cut deletes
/// the source icon. Paste always clears the clipboard, even as a no-op.
pub(crate) fn paste_from_clipboard(
    state: &mut SessionState,
    interaction: &mut InteractionState,
) -> Result<(), SessionError> {
    interaction.icon_menu = None;
    let Some(clip) = state.clipboard.take() else {
        return Ok(());
    };
    let source = clip.record;
    let source_id = source.id.clone();
    let pasted_id = IconId::new(format!("{}-copy-{}", source_id, state.next_icon_seq));
    state.next_icon_seq += 1;
    let pasted = IconRecord {
        id: pasted_id.clone(),
        name: format!("{} (Copy)", source.name),
        position: source.position.offset(PASTE_OFFSET, PASTE_OFFSET),
        deleted: false,
        icon_id: source.icon_id,
        kind: source.kind,
        launch: source.launch,
    };
    if clip.action == ClipboardAction::Cut {
        if let Some(original) = state.icons.iter_mut().find(|icon| icon.id == source_id) {
            original.deleted = true;
        }
        if state.selected_icon_id.as_ref() == Some(&source_id) {
            state.selected_icon_id = None;
        }
    }
    state.icons.push(pasted);
    state.selected_icon_id = Some(pasted_id);
    Ok(())
}

pub(crate) fn delete_icon(
    state: &mut SessionState,
    interaction: &mut InteractionState,
    icon_id: &IconId,
) -> Result<(), SessionError> {
    visible_icon_mut(state, icon_id)?.deleted = true;
    if state.selected_icon_id.as_ref() == Some(icon_id) {
        state.selected_icon_id = None;
    }
    if interaction.renaming.as_ref().map(|r| &r.icon_id) == Some(icon_id) {
        interaction.renaming = None;
    }
    if interaction.icon_drag.as_ref().map(|d| &d.icon_id) == Some(icon_id) {
        interaction.icon_drag = None;
    }
    interaction.icon_menu = None;
    Ok(())
}
