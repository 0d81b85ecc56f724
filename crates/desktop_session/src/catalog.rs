use desktop_contract::{
    ContentCatalog, ContentRef, Rect, WindowCapabilities, WindowDescriptor, WindowKindId,
};
use serde_json::json;

use crate::model::OpenWindowRequest;
use crate::reducer::SessionError;

pub(crate) struct CatalogEntry {
    pub(crate) kind: &'static str,
    pub(crate) title: &'static str,
    pub(crate) icon_id: &'static str,
    pub(crate) default_rect: Rect,
    pub(crate) resizable: bool,
    pub(crate) minimizable: bool,
    pub(crate) maximizable: bool,
    pub(crate) status_text: Option<&'static str>,
    pub(crate) show_on_desktop: bool,
}

// The whole legacy roster lives here; every kind opens through lookup().
const CATALOG: [CatalogEntry; 12] = [
    CatalogEntry {
        kind: "calculator",
        title: "Calculator",
        icon_id: "calculator",
        default_rect: Rect::new(72, 64, 260, 340),
        resizable: false,
        minimizable: true,
        maximizable: false,
        status_text: None,
        show_on_desktop: true,
    },
    CatalogEntry {
        kind: "notepad",
        title: "Notepad",
        icon_id: "document-text",
        default_rect: Rect::new(120, 80, 480, 360),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: Some("Ln 1, Col 1"),
        show_on_desktop: false,
    },
    CatalogEntry {
        kind: "paint",
        title: "Paint",
        icon_id: "paint-brush",
        default_rect: Rect::new(140, 90, 640, 480),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: None,
        show_on_desktop: true,
    },
    CatalogEntry {
        kind: "explorer",
        title: "Explorer",
        icon_id: "folder",
        default_rect: Rect::new(96, 72, 560, 400),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: Some("0 items"),
        show_on_desktop: true,
    },
    CatalogEntry {
        kind: "terminal",
        title: "Terminal",
        icon_id: "terminal",
        default_rect: Rect::new(160, 120, 600, 380),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: None,
        show_on_desktop: true,
    },
    CatalogEntry {
        kind: "dictionary",
        title: "Dictionary",
        icon_id: "book",
        default_rect: Rect::new(180, 100, 460, 420),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: None,
        show_on_desktop: true,
    },
    CatalogEntry {
        kind: "stocks",
        title: "Stocks",
        icon_id: "chart",
        default_rect: Rect::new(200, 80, 620, 440),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: Some("Quotes delayed 15 min"),
        show_on_desktop: true,
    },
    CatalogEntry {
        kind: "browser",
        title: "Browser",
        icon_id: "globe",
        default_rect: Rect::new(60, 40, 760, 520),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: None,
        show_on_desktop: false,
    },
    CatalogEntry {
        kind: "music-player",
        title: "Music Player",
        icon_id: "music-note",
        default_rect: Rect::new(220, 140, 360, 240),
        resizable: false,
        minimizable: true,
        maximizable: false,
        status_text: None,
        show_on_desktop: false,
    },
    CatalogEntry {
        kind: "minesweeper",
        title: "Minesweeper",
        icon_id: "grid",
        default_rect: Rect::new(240, 120, 320, 400),
        resizable: false,
        minimizable: true,
        maximizable: false,
        status_text: None,
        show_on_desktop: false,
    },
    CatalogEntry {
        kind: "settings",
        title: "Settings",
        icon_id: "settings",
        default_rect: Rect::new(130, 110, 520, 440),
        resizable: true,
        minimizable: true,
        maximizable: true,
        status_text: None,
        show_on_desktop: false,
    },
    CatalogEntry {
        kind: "about",
        title: "About",
        icon_id: "info",
        default_rect: Rect::new(260, 160, 420, 260),
        resizable: false,
        minimizable: false,
        maximizable: false,
        status_text: None,
        show_on_desktop: false,
    },
];

impl CatalogEntry {
    fn descriptor(&self) -> WindowDescriptor {
        WindowDescriptor {
            kind: WindowKindId::trusted(self.kind),
            title: self.title.to_string(),
            icon_id: self.icon_id.to_string(),
            default_rect: self.default_rect,
            capabilities: WindowCapabilities {
                resizable: self.resizable,
                minimizable: self.minimizable,
                maximizable: self.maximizable,
                closable: true,
            },
            status_text: self.status_text.map(str::to_string),
            content: ContentRef::new(json!({ "view": self.kind })),
        }
    }
}

pub(crate) fn desktop_entries() -> impl Iterator<Item = &'static CatalogEntry> {
    CATALOG.iter().filter(|entry| entry.show_on_desktop)
}

/// Builtin declarative window catalog covering the full application roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl ContentCatalog for BuiltinCatalog {
    fn lookup(&self, kind: &WindowKindId) -> Option<WindowDescriptor> {
        CATALOG
            .iter()
            .find(|entry| entry.kind == kind.as_str())
            .map(CatalogEntry::descriptor)
    }

    fn kinds(&self) -> Vec<WindowKindId> {
        CATALOG
            .iter()
            .map(|entry| WindowKindId::trusted(entry.kind))
            .collect()
    }
}

/// Builds the open request for a catalog kind; unknown kinds are rejected
/// before any session state is touched.
pub fn open_request(
    catalog: &dyn ContentCatalog,
    kind: &WindowKindId,
) -> Result<OpenWindowRequest, SessionError> {
    let descriptor = catalog
        .lookup(kind)
        .ok_or_else(|| SessionError::UnknownKind(kind.clone()))?;
    Ok(OpenWindowRequest {
        kind: descriptor.kind,
        title: Some(descriptor.title),
        icon_id: Some(descriptor.icon_id),
        rect: Some(descriptor.default_rect),
        capabilities: descriptor.capabilities,
        status_text: descriptor.status_text,
        content: descriptor.content,
        launch_params: serde_json::Value::Null,
    })
}
