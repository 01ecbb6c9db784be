use crate::deskwm::{Position, Screen, Size};

use super::Placement;

/// Every window opens in the middle of the area above the taskbar.
pub struct CenteredPlacement;

impl CenteredPlacement {
    pub fn init() -> CenteredPlacement {
        CenteredPlacement {}
    }
}

impl Placement for CenteredPlacement {
    fn place(&mut self, screen: &Screen, size: Size, _open_windows: usize) -> Position {
        let (_, area) = screen.available_area();
        Position {
            x: (area.width - size.width) / 2,
            y: ((area.height - size.height) / 2).max(0),
        }
    }

    fn id(&self) -> String {
        String::from("center")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_in_available_area() {
        let screen = Screen::new_screen(1920, 1080, 48);
        let mut centered = CenteredPlacement::init();
        let position = centered.place(&screen, Size { width: 800, height: 600 }, 0);
        assert_eq!(position, Position { x: 560, y: 216 });
    }

    #[test]
    fn tall_window_is_pinned_to_the_top() {
        let screen = Screen::new_screen(1024, 600, 48);
        let mut centered = CenteredPlacement::init();
        let position = centered.place(&screen, Size { width: 400, height: 900 }, 0);
        assert_eq!(position.y, 0);
    }
}
