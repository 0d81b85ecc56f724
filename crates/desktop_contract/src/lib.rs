//! Shared contract types between the desktop session manager and its
//! collaborators.
//!
//! The session manager never renders anything itself: window content, the
//! catalog of openable window kinds, and the usable desktop rectangle are all
//! supplied from outside through the types and traits defined here.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point on the desktop surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point from coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the point translated by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A width/height pair, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Size {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Size {
    /// Creates a size from dimensions.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// An axis-aligned rectangle on the desktop surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Creates a rectangle from origin and dimensions.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns the rectangle translated by `(dx, dy)`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the rectangle with dimensions raised to at least `min_w`/`min_h`.
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Returns the rectangle with a strip of `strip` pixels removed from the
    /// bottom edge.
    pub fn minus_bottom(self, strip: i32) -> Self {
        Self {
            h: (self.h - strip).max(0),
            ..self
        }
    }
}

/// Stable identifier for an openable window kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowKindId(String);

impl WindowKindId {
    /// Returns a kind identifier when `raw` conforms to the kebab-case policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_window_kind(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid window kind `{raw}`; expected lowercase kebab-case"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates a kind id without validation for compile-time trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for WindowKindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_window_kind(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 64 {
        return false;
    }
    let bytes = raw.as_bytes();
    if !bytes[0].is_ascii_lowercase() {
        return false;
    }
    if !bytes
        .iter()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    {
        return false;
    }
    !raw.ends_with('-') && !raw.contains("--")
}

/// Per-window behavior flags declared by the catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCapabilities {
    /// Whether edge/corner resize is permitted.
    pub resizable: bool,
    /// Whether the window can be minimized to the taskbar.
    pub minimizable: bool,
    /// Whether the window can be maximized to the usable area.
    pub maximizable: bool,
    /// Whether the window can be closed.
    pub closable: bool,
}

impl Default for WindowCapabilities {
    fn default() -> Self {
        Self {
            resizable: true,
            minimizable: true,
            maximizable: true,
            closable: true,
        }
    }
}

/// Opaque handle to the visual payload hosted inside a window frame.
///
/// The session manager stores and forwards the handle; it never interprets
/// the payload's internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRef(Value);

impl ContentRef {
    /// Wraps an externally supplied payload handle.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw payload handle for the rendering host.
    pub fn value(&self) -> &Value {
        &self.0
    }
}

/// Static metadata defining how one window kind is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDescriptor {
    /// Catalog identifier of the kind.
    pub kind: WindowKindId,
    /// Title shown in the window frame and taskbar.
    pub title: String,
    /// Icon identifier resolved by the rendering host.
    pub icon_id: String,
    /// Initial geometry for a freshly opened window.
    pub default_rect: Rect,
    /// Behavior flags for the window frame.
    pub capabilities: WindowCapabilities,
    /// Optional status-bar text shown by the frame.
    pub status_text: Option<String>,
    /// Opaque content payload handle.
    pub content: ContentRef,
}

/// Catalog collaborator resolving window kinds to descriptors.
///
/// Unknown kinds yield `None`; callers reject them before touching session
/// state.
pub trait ContentCatalog {
    /// Resolves a kind id to its descriptor.
    fn lookup(&self, kind: &WindowKindId) -> Option<WindowDescriptor>;

    /// Enumerates every kind the catalog can open, in display order.
    fn kinds(&self) -> Vec<WindowKindId>;
}

/// Collaborator supplying the usable desktop rectangle.
///
/// The usable rectangle is the viewport minus the reserved taskbar strip and
/// is consulted on every geometry clamp.
pub trait DesktopBounds {
    /// Current usable desktop rectangle.
    fn usable_rect(&self) -> Rect;
}

impl DesktopBounds for Rect {
    fn usable_rect(&self) -> Rect {
        *self
    }
}

/// Events a hosted content payload may emit toward the session manager.
///
/// These are handled as ordinary open/close calls; content cannot reach into
/// session state directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadEvent {
    /// Request to open (or refocus) the window of another kind.
    OpenWindow(WindowKindId),
    /// Request to close the window of a kind.
    CloseWindow(WindowKindId),
}
