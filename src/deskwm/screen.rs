use serde::Serialize;

use super::{Position, Size};

/// The browser viewport the desktop is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub width: i32,
    pub height: i32,
    /// Strip at the bottom kept for the taskbar.
    pub taskbar_height: i32,
}

impl Screen {
    pub fn new_screen(width: i32, height: i32, taskbar_height: i32) -> Self {
        Self {
            width,
            height,
            taskbar_height,
        }
    }

    /// Area a maximized window covers: everything but the taskbar.
    pub fn available_area(&self) -> (Position, Size) {
        (
            Position { x: 0, y: 0 },
            Size {
                width: self.width.max(0),
                height: self.height.saturating_sub(self.taskbar_height).max(0),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_area_excludes_taskbar() {
        let screen = Screen::new_screen(1920, 1080, 48);
        let (position, size) = screen.available_area();
        assert_eq!(position, Position { x: 0, y: 0 });
        assert_eq!(size, Size { width: 1920, height: 1032 });
    }

    #[test]
    fn available_area_never_negative() {
        let screen = Screen::new_screen(100, 20, 48);
        assert_eq!(screen.available_area().1.height, 0);
        let negative = Screen::new_screen(-500, i32::MIN, 48);
        assert_eq!(
            negative.available_area().1,
            Size { width: 0, height: 0 }
        );
    }
}
