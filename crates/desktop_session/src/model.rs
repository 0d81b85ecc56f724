use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use desktop_contract::{ContentRef, Point, Rect, WindowCapabilities, WindowKindId};

pub const MIN_WINDOW_WIDTH: i32 = 200;
pub const MIN_WINDOW_HEIGHT: i32 = 150;
pub const DEFAULT_WINDOW_WIDTH: i32 = 420;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 300;
/// Height of the reserved taskbar strip at the bottom of the viewport.
pub const TASKBAR_HEIGHT: i32 = 48;
/// Z-index counter start; the first focused window gets `BASE_Z_INDEX + 1`.
pub const BASE_Z_INDEX: u32 = 1000;
/// Desktop icons snap to multiples of this pitch.
pub const ICON_GRID: i32 = 20;
pub const ICON_CELL_WIDTH: i32 = 80;
pub const ICON_CELL_HEIGHT: i32 = 80;
/// Pointer travel below this distinguishes a click from a drag.
pub const DRAG_THRESHOLD: i32 = 5;
/// Offset applied to a pasted icon relative to its source.
pub const PASTE_OFFSET: i32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    /// One window instance exists per distinguishable kind; reopening an
    /// existing id focuses it instead of creating a second instance.
    pub fn for_kind(kind: &WindowKindId) -> Self {
        Self(kind.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IconId(String);

impl IconId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub kind: WindowKindId,
    pub title: String,
    pub icon_id: String,
    pub content: ContentRef,
    pub rect: Rect,
    /// Geometry before the last maximize/edge-snap, restored on un-maximize.
    pub restore_rect: Option<Rect>,
    pub maximized: bool,
    pub z_index: u32,
    /// Stable open order used by the taskbar.
    pub opened_seq: u64,
    pub capabilities: WindowCapabilities,
    pub status_text: Option<String>,
    pub launch_params: Value,
}

/// Derived per-window tri-state; focus and minimization are never stored on
/// the record itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowPhase {
    Focused,
    Unfocused,
    Minimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Application,
    Folder,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    pub id: IconId,
    pub name: String,
    pub icon_id: String,
    pub kind: IconKind,
    pub position: Point,
    /// Soft-delete flag; deleted icons are retained but never shown.
    pub deleted: bool,
    /// Window kind invoked on double-click, when the icon opens anything.
    pub launch: Option<WindowKindId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardAction {
    Copy,
    Cut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconClipboard {
    /// Value copy of the source record taken at copy/cut time.
    pub record: IconRecord,
    pub action: ClipboardAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenWindowRequest {
    pub kind: WindowKindId,
    pub title: Option<String>,
    pub icon_id: Option<String>,
    pub rect: Option<Rect>,
    pub capabilities: WindowCapabilities,
    pub status_text: Option<String>,
    pub content: ContentRef,
    pub launch_params: Value,
}

impl OpenWindowRequest {
    pub fn new(kind: WindowKindId, content: ContentRef) -> Self {
        Self {
            kind,
            title: None,
            icon_id: None,
            rect: None,
            capabilities: WindowCapabilities::default(),
            status_text: None,
            content,
            launch_params: Value::Null,
        }
    }

    pub fn window_id(&self) -> WindowId {
        WindowId::for_kind(&self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub fn bears_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn bears_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn bears_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn bears_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: Point,
    pub rect_start: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: Point,
    pub rect_start: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDragSession {
    pub icon_id: IconId,
    pub pointer_start: Point,
    pub origin: Point,
    /// Set once pointer travel crosses [`DRAG_THRESHOLD`].
    pub moved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameSession {
    pub icon_id: IconId,
    pub original_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMenuState {
    pub icon_id: IconId,
    pub position: Point,
}

/// Transient gesture state; cleared on every end-of-gesture action and by
/// `ResetInteractions` on unit teardown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
    pub icon_drag: Option<IconDragSession>,
    pub renaming: Option<RenameSession>,
    pub icon_menu: Option<IconMenuState>,
    /// Icon whose next activation is swallowed because a drag just completed.
    pub suppress_activation: Option<IconId>,
}

/// One taskbar button's read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub icon_id: String,
    pub phase: WindowPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub windows: BTreeMap<WindowId, WindowRecord>,
    pub focused_window_id: Option<WindowId>,
    pub minimized_ids: BTreeSet<WindowId>,
    /// Strictly monotonic for the session's lifetime.
    pub max_z_index: u32,
    pub next_open_seq: u64,
    pub icons: Vec<IconRecord>,
    pub next_icon_seq: u64,
    pub selected_icon_id: Option<IconId>,
    pub clipboard: Option<IconClipboard>,
    pub start_menu_open: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            windows: BTreeMap::new(),
            focused_window_id: None,
            minimized_ids: BTreeSet::new(),
            max_z_index: BASE_Z_INDEX,
            next_open_seq: 1,
            icons: Vec::new(),
            next_icon_seq: 1,
            selected_icon_id: None,
            clipboard: None,
            start_menu_open: false,
        }
    }
}

impl SessionState {
    pub fn window(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.get(id)
    }

    pub fn is_minimized(&self, id: &WindowId) -> bool {
        self.minimized_ids.contains(id)
    }

    pub fn is_focused(&self, id: &WindowId) -> bool {
        self.focused_window_id.as_ref() == Some(id)
    }

    /// Derived tri-state for an open window; `None` when the id is closed.
    pub fn phase(&self, id: &WindowId) -> Option<WindowPhase> {
        if !self.windows.contains_key(id) {
            return None;
        }
        Some(if self.minimized_ids.contains(id) {
            WindowPhase::Minimized
        } else if self.is_focused(id) {
            WindowPhase::Focused
        } else {
            WindowPhase::Unfocused
        })
    }

    pub fn icon(&self, id: &IconId) -> Option<&IconRecord> {
        self.icons.iter().find(|icon| &icon.id == id && !icon.deleted)
    }

    pub fn visible_icons(&self) -> impl Iterator<Item = &IconRecord> {
        self.icons.iter().filter(|icon| !icon.deleted)
    }

    /// Open windows in stable open order, one entry per taskbar button.
    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        let mut entries: Vec<&WindowRecord> = self.windows.values().collect();
        entries.sort_by_key(|record| record.opened_seq);
        entries
            .into_iter()
            .map(|record| TaskbarEntry {
                id: record.id.clone(),
                title: record.title.clone(),
                icon_id: record.icon_id.clone(),
                phase: self.phase(&record.id).unwrap_or(WindowPhase::Unfocused),
            })
            .collect()
    }

    /// Non-minimized windows sorted back-to-front for the rendering surface.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut order: Vec<&WindowRecord> = self
            .windows
            .values()
            .filter(|record| !self.minimized_ids.contains(&record.id))
            .collect();
        order.sort_by_key(|record| record.z_index);
        order
    }
}
