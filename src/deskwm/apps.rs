use serde::Deserialize;

use super::{ContentRef, Size};

fn default_true() -> bool {
    true
}

/// What the application registry tells us about an application. Read once,
/// when one of its windows is opened.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppDefinition {
    pub id: String,
    pub title: String,
    pub content: ContentRef,
    pub default_width: i32,
    pub default_height: i32,
    #[serde(default = "default_true")]
    pub resizable: bool,
    #[serde(default = "default_true")]
    pub closable: bool,
}

impl AppDefinition {
    pub fn default_size(&self) -> Size {
        Size {
            width: self.default_width,
            height: self.default_height,
        }
    }
}

fn app(id: &str, title: &str, width: i32, height: i32, resizable: bool) -> AppDefinition {
    AppDefinition {
        id: id.to_string(),
        title: title.to_string(),
        content: ContentRef::from(id),
        default_width: width,
        default_height: height,
        resizable,
        closable: true,
    }
}

/// The applications the desktop ships with.
pub fn builtin_apps() -> Vec<AppDefinition> {
    vec![
        app("notepad", "Notepad", 600, 400, true),
        app("calculator", "Calculator", 320, 480, false),
        app("file-browser", "Files", 800, 500, true),
        app("settings", "Settings", 640, 480, true),
        app("system-monitor", "System Monitor", 700, 450, true),
    ]
}

pub fn find_app<'a>(apps: &'a [AppDefinition], id: &str) -> Option<&'a AppDefinition> {
    apps.iter().find(|app| app.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_apps_map_to_known_content() {
        for app in builtin_apps() {
            assert!(
                !matches!(app.content, ContentRef::Other(_)),
                "{} has no content variant",
                app.id
            );
        }
    }

    #[test]
    fn lookup_by_id() {
        let apps = builtin_apps();
        assert_eq!(find_app(&apps, "calculator").unwrap().title, "Calculator");
        assert!(find_app(&apps, "doom").is_none());
    }
}
