use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Position, Size, WindowId};

/// What a window hosts. The window manager only carries this around, the
/// presentation layer maps it to a concrete view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentRef {
    Notepad,
    Calculator,
    FileBrowser,
    Settings,
    SystemMonitor,
    Other(String),
}

impl From<&str> for ContentRef {
    fn from(value: &str) -> Self {
        match value {
            "notepad" => ContentRef::Notepad,
            "calculator" => ContentRef::Calculator,
            "file-browser" => ContentRef::FileBrowser,
            "settings" => ContentRef::Settings,
            "system-monitor" => ContentRef::SystemMonitor,
            other => ContentRef::Other(other.to_string()),
        }
    }
}

impl From<String> for ContentRef {
    fn from(value: String) -> Self {
        ContentRef::from(value.as_str())
    }
}

impl From<ContentRef> for String {
    fn from(value: ContentRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentRef::Notepad => f.write_str("notepad"),
            ContentRef::Calculator => f.write_str("calculator"),
            ContentRef::FileBrowser => f.write_str("file-browser"),
            ContentRef::Settings => f.write_str("settings"),
            ContentRef::SystemMonitor => f.write_str("system-monitor"),
            ContentRef::Other(tag) => f.write_str(tag),
        }
    }
}

/// Everything needed to open a window. Geometry is a request, the registry
/// clamps it before storing.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    pub content: ContentRef,
    pub position: Position,
    pub size: Size,
    pub resizable: bool,
    pub closable: bool,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, content: ContentRef, position: Position, size: Size) -> Self {
        Self {
            title: title.into(),
            content,
            position,
            size,
            resizable: true,
            closable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
}

/// One open application instance.
///
/// Instances handed out by the registry are snapshots: changing one does not
/// touch the stored window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    pub title: String,
    pub content: ContentRef,
    pub position: Position,
    pub size: Size,
    pub z_index: u64,
    pub is_minimized: bool,
    pub is_maximized: bool,
    // pre-maximize geometry, kept while maximized (minimized or not)
    pub saved_position: Option<Position>,
    pub saved_size: Option<Size>,
    pub is_resizable: bool,
    pub is_closable: bool,
}

impl Window {
    pub(crate) fn new(id: WindowId, z_index: u64, spec: WindowSpec) -> Self {
        Self {
            id,
            title: spec.title,
            content: spec.content,
            position: spec.position,
            size: spec.size,
            z_index,
            is_minimized: false,
            is_maximized: false,
            saved_position: None,
            saved_size: None,
            is_resizable: spec.resizable,
            is_closable: spec.closable,
        }
    }

    /// A window minimized while maximized reports `Minimized`.
    pub fn state(&self) -> WindowState {
        if self.is_minimized {
            WindowState::Minimized
        } else if self.is_maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}
