use log::trace;

use crate::deskwm::{Position, Screen, Size};

use super::Placement;

const ORIGIN: i32 = 40;
const STEP: i32 = 30;

/// Each new window lands a step down and to the right of the previous one,
/// starting over at the top-left once the next one would not fit.
pub struct CascadePlacement;

impl CascadePlacement {
    pub fn init() -> CascadePlacement {
        CascadePlacement {}
    }
}

impl Placement for CascadePlacement {
    fn place(&mut self, screen: &Screen, size: Size, open_windows: usize) -> Position {
        let (_, area) = screen.available_area();
        let fit_x = area.width.saturating_sub(size.width).saturating_sub(ORIGIN) / STEP;
        let fit_y = area.height.saturating_sub(size.height).saturating_sub(ORIGIN) / STEP;
        // how many steps fit before the window would cross an edge
        let steps = fit_x.min(fit_y).max(0) as usize + 1;
        let offset = (open_windows % steps) as i32 * STEP;
        trace!("cascade: {} steps fit, offset {}", steps, offset);
        Position {
            x: ORIGIN + offset,
            y: ORIGIN + offset,
        }
    }

    fn id(&self) -> String {
        String::from("cascade")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_down_and_right() {
        let screen = Screen::new_screen(1920, 1080, 48);
        let size = Size { width: 600, height: 400 };
        let mut cascade = CascadePlacement::init();
        assert_eq!(cascade.place(&screen, size, 0), Position { x: 40, y: 40 });
        assert_eq!(cascade.place(&screen, size, 2), Position { x: 100, y: 100 });
    }

    #[test]
    fn wraps_before_leaving_the_screen() {
        let screen = Screen::new_screen(800, 600, 48);
        let size = Size { width: 600, height: 400 };
        let mut cascade = CascadePlacement::init();
        // (552 - 400 - 40) / 30 = 3 steps fit after the first slot
        assert_eq!(cascade.place(&screen, size, 3), Position { x: 130, y: 130 });
        assert_eq!(cascade.place(&screen, size, 4), Position { x: 40, y: 40 });
    }

    #[test]
    fn oversized_window_stays_at_origin() {
        let screen = Screen::new_screen(640, 480, 48);
        let size = Size { width: 1000, height: 1000 };
        let mut cascade = CascadePlacement::init();
        assert_eq!(cascade.place(&screen, size, 5), Position { x: 40, y: 40 });
        let huge = Size { width: i32::MAX, height: i32::MAX };
        assert_eq!(cascade.place(&screen, huge, 1), Position { x: 40, y: 40 });
    }
}
